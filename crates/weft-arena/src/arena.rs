//! Fixed-capacity record storage behind generation-checked handles.

use std::panic::Location;

use weft_core::{Diagnostic, DiagnosticSink, Fault, LinkId, Severity};

use crate::handle::RecordRef;
use crate::link::{Link, Linked};
use crate::tracker::MembershipTracker;

/// One storage slot: a payload plus the liveness flag and generation
/// counter that make handle validation possible.
#[derive(Debug, Default)]
struct Slot<T> {
    value: T,
    used: bool,
    generation: u32,
}

/// Fixed-capacity arena of `T` records addressed by [`RecordRef`] handles.
///
/// `capacity + 1` slots are allocated at construction (slot 0 is
/// permanently nil); nothing grows afterwards. Freeing a slot bumps its
/// generation, so stale handles stop resolving instead of aliasing the
/// slot's next occupant.
///
/// Stale or nil handles degrade to a shared default view rather than
/// failing: [`SlotArena::get`] always returns a dereferenceable record.
/// It is therefore safe to hold handles across frees — but do not store
/// references obtained from `get`; re-resolve the handle each time.
///
/// The arena is a single-owner, single-threaded structure. If concurrent
/// access is ever needed, lock around the whole arena: list mutations
/// touch several records' blocks and are only atomic under exclusive
/// access.
pub struct SlotArena<T: Linked> {
    /// `capacity + 1` slots; slot 0 doubles as the default view handed out
    /// for degraded lookups.
    slots: Vec<Slot<T>>,
    /// Number of live records.
    live: usize,
    /// Which rings each live record is threaded into.
    pub(crate) tracker: MembershipTracker,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl<T: Linked> SlotArena<T> {
    /// Create an arena for at most `capacity` simultaneously live records.
    ///
    /// All storage is allocated here. Diagnostics are disabled; use
    /// [`SlotArena::with_sink`] to receive them.
    pub fn new(capacity: u32) -> Self {
        Self::build(capacity, None)
    }

    /// Like [`SlotArena::new`], with an injected diagnostic sink.
    pub fn with_sink(capacity: u32, sink: Box<dyn DiagnosticSink>) -> Self {
        Self::build(capacity, Some(sink))
    }

    fn build(capacity: u32, sink: Option<Box<dyn DiagnosticSink>>) -> Self {
        let mut slots = Vec::with_capacity(capacity as usize + 1);
        slots.resize_with(capacity as usize + 1, Slot::default);
        Self {
            slots,
            live: 0,
            tracker: MembershipTracker::new(),
            sink,
        }
    }

    /// Maximum number of simultaneously live records.
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no records are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Whether `handle` currently addresses a live record.
    pub fn is_active(&self, handle: RecordRef) -> bool {
        let index = handle.index as usize;
        index > 0
            && index < self.slots.len()
            && self.slots[index].used
            && self.slots[index].generation == handle.generation
    }

    /// Store `value` in the first free slot and return its handle.
    ///
    /// On exhaustion an error diagnostic is emitted and [`RecordRef::NIL`]
    /// is returned. This is the one condition callers must check; every
    /// other misuse is absorbed downstream by handle validation.
    #[track_caller]
    pub fn alloc(&mut self, value: T) -> RecordRef {
        let Some(index) = (1..self.slots.len()).find(|&i| !self.slots[i].used) else {
            self.report(Severity::Error, Fault::CapacityExhausted, || {
                format!("no free slot for new record (capacity {})", self.capacity())
            });
            return RecordRef::NIL;
        };
        let slot = &mut self.slots[index];
        slot.used = true;
        slot.value = value;
        self.live += 1;
        RecordRef {
            index: index as u32,
            generation: self.slots[index].generation,
        }
    }

    /// Return `handle`'s slot to the free pool.
    ///
    /// The record is first detached from every ring it still occupies, and
    /// only then cleared and generation-bumped — neighbours' blocks point
    /// at this slot until the detach completes. Freeing an inactive handle
    /// is a warned no-op.
    #[track_caller]
    pub fn free(&mut self, handle: RecordRef) {
        if !self.is_active(handle) {
            self.report(Severity::Warning, Fault::InvalidHandle, || {
                format!("free of inactive handle {handle}")
            });
            return;
        }
        let roles = self.tracker.take(handle);
        for role in roles {
            if self.link_copy(handle, role).is_some_and(|link| link.bound) {
                self.detach(handle, role);
            }
        }
        let slot = &mut self.slots[handle.index as usize];
        slot.value = T::default();
        slot.used = false;
        let (generation, wrapped) = slot.generation.overflowing_add(1);
        slot.generation = generation;
        self.live -= 1;
        if wrapped {
            self.report(Severity::Warning, Fault::InvalidHandle, || {
                format!(
                    "generation wrapped on slot {}; stale handles may alias",
                    handle.index
                )
            });
        }
    }

    /// Resolve `handle` to its record.
    ///
    /// Inactive handles degrade to the default view with a warning; the
    /// returned reference is always safe to use.
    #[track_caller]
    pub fn get(&self, handle: RecordRef) -> &T {
        if self.is_active(handle) {
            return &self.slots[handle.index as usize].value;
        }
        self.report(Severity::Warning, Fault::InvalidHandle, || {
            format!("dereference of inactive handle {handle}")
        });
        &self.slots[0].value
    }

    /// Mutable variant of [`SlotArena::get`].
    ///
    /// A degraded call re-defaults slot 0 before handing it out, so writes
    /// through one degraded view never leak into the next.
    #[track_caller]
    pub fn get_mut(&mut self, handle: RecordRef) -> &mut T {
        if self.is_active(handle) {
            return &mut self.slots[handle.index as usize].value;
        }
        self.report(Severity::Warning, Fault::InvalidHandle, || {
            format!("dereference of inactive handle {handle}")
        });
        self.slots[0].value = T::default();
        &mut self.slots[0].value
    }

    /// Iterate over every live record in slot order.
    ///
    /// Lazy, and stops scanning once every live record has been yielded.
    /// Freeing not-yet-visited records mid-iteration is unrepresentable
    /// here: the arena stays shared-borrowed for the iterator's lifetime.
    pub fn iter(&self) -> impl Iterator<Item = (RecordRef, &T)> {
        self.slots
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, slot)| slot.used)
            .take(self.live)
            .map(|(index, slot)| {
                (
                    RecordRef {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    &slot.value,
                )
            })
    }

    /// Silent resolution used by traversal internals, so a degradation
    /// already reported at the operation entry point is not re-reported
    /// for every member lookup.
    pub(crate) fn peek(&self, handle: RecordRef) -> &T {
        if self.is_active(handle) {
            &self.slots[handle.index as usize].value
        } else {
            &self.slots[0].value
        }
    }

    /// Copy of the block `handle` stores under `role`; `None` when the
    /// handle is inactive or the record type lacks the role.
    pub(crate) fn link_copy(&self, handle: RecordRef, role: LinkId) -> Option<Link> {
        if !self.is_active(handle) {
            return None;
        }
        self.slots[handle.index as usize].value.link(role).copied()
    }

    /// Copy of the block under `role`, only if it is threaded into a ring.
    pub(crate) fn bound_link(&self, handle: RecordRef, role: LinkId) -> Option<Link> {
        self.link_copy(handle, role).filter(|link| link.bound)
    }

    /// Apply `mutate` to the block `handle` stores under `role`.
    pub(crate) fn update_link(
        &mut self,
        handle: RecordRef,
        role: LinkId,
        mutate: impl FnOnce(&mut Link),
    ) {
        if !self.is_active(handle) {
            return;
        }
        if let Some(link) = self.slots[handle.index as usize].value.link_mut(role) {
            mutate(link);
        }
    }

    /// Emit one diagnostic if a sink is attached. The message closure only
    /// runs when it is.
    #[track_caller]
    pub(crate) fn report(&self, severity: Severity, fault: Fault, message: impl FnOnce() -> String) {
        if let Some(sink) = &self.sink {
            let diagnostic = Diagnostic::new(severity, fault, message(), Location::caller());
            sink.emit(&diagnostic);
        }
    }
}
