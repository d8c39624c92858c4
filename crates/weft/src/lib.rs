//! Weft: fixed-capacity record storage behind generation-checked handles,
//! with intrusive membership lists threaded through the records.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Weft sub-crates. For most users, adding `weft` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! const INVENTORY: LinkId = LinkId(0);
//!
//! #[derive(Default)]
//! struct Thing {
//!     name: &'static str,
//!     inventory: Link,
//! }
//!
//! impl Linked for Thing {
//!     fn link(&self, role: LinkId) -> Option<&Link> {
//!         (role == INVENTORY).then_some(&self.inventory)
//!     }
//!     fn link_mut(&mut self, role: LinkId) -> Option<&mut Link> {
//!         (role == INVENTORY).then_some(&mut self.inventory)
//!     }
//! }
//!
//! // All storage for 100 records is allocated here, once.
//! let mut arena = SlotArena::new(100);
//! let player = arena.alloc(Thing { name: "player", ..Thing::default() });
//! let sword = arena.alloc(Thing { name: "sword", ..Thing::default() });
//! let shield = arena.alloc(Thing { name: "shield", ..Thing::default() });
//!
//! // The player's inventory is a ring threaded through the records.
//! arena.init_list(player, INVENTORY);
//! arena.append(player, INVENTORY, &[sword, shield]);
//! assert_eq!(arena.list(player, INVENTORY).count(), 3);
//!
//! // Freeing a record detaches it from every list it is in, then bumps
//! // the slot's generation so the old handle stops resolving.
//! arena.free(sword);
//! let names: Vec<_> = arena
//!     .list(player, INVENTORY)
//!     .iter()
//!     .map(|(_, thing)| thing.name)
//!     .collect();
//! assert_eq!(names, ["player", "shield"]);
//! assert!(!arena.is_active(sword));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `weft-arena` | `SlotArena`, handles, link blocks, list views |
//! | [`types`] | `weft-core` | Link-role ids, diagnostics, sinks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Slot arena, handles, link blocks, and the list engine (`weft-arena`).
pub use weft_arena as arena;

/// Identifiers and diagnostics (`weft-core`).
pub use weft_core as types;

pub mod prelude {
    //! Single-import surface for typical use.

    pub use weft_arena::{Link, Linked, ListView, Members, RecordRef, SlotArena};
    pub use weft_core::{Diagnostic, DiagnosticSink, Fault, LinkId, LogSink, Severity};
}
