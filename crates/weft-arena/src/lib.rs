//! Generational slot arena and intrusive membership lists.
//!
//! All record storage is allocated once, up front, and addressed through
//! generation-checked [`RecordRef`] handles that can never dangle into a
//! freed or reused slot. Records embed [`Link`] blocks — one per list role —
//! which the arena threads into circular doubly-linked rings, so membership
//! relations ("items in this inventory") cost no secondary allocation.
//!
//! # Architecture
//!
//! ```text
//! SlotArena<T: Linked>
//! ├── Slot[capacity + 1]     (slot 0 permanently nil; the default view)
//! ├── MembershipTracker      (RecordRef → link roles currently occupied)
//! └── Option<Box<dyn DiagnosticSink>>
//!
//! record T ──embeds──▶ Link { owner, role, first, next, prev }
//!                        └── threaded into a ring with its neighbours
//! ```
//!
//! Misuse never panics: stale handles resolve to a default view, list
//! operations through unbound blocks are no-ops, and every degradation is
//! reported through the injected diagnostic sink. The single condition a
//! caller must check is [`RecordRef::NIL`] coming back from
//! [`SlotArena::alloc`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod handle;
pub mod link;
pub mod list;
mod tracker;

#[cfg(test)]
mod testutil;

// Public re-exports for the primary API surface.
pub use arena::SlotArena;
pub use handle::RecordRef;
pub use link::{Link, Linked};
pub use list::{ListView, Members};
