//! Circular intrusive membership lists threaded through arena records.
//!
//! Every list is a ring of records connected through the [`Link`] blocks
//! embedded in the records themselves. [`SlotArena::init_list`] binds a
//! block and makes its owner the ring's head; appending splices new
//! members in as the head's predecessor, so ring order is insertion order
//! and the tail is always `first.prev`. Structural operations live on the
//! arena because each one touches several records' blocks plus the
//! membership tracker; reads go through the borrow-scoped [`ListView`].

use weft_core::{Fault, LinkId, Severity};

use crate::arena::SlotArena;
use crate::handle::RecordRef;
use crate::link::{Link, Linked};

impl<T: Linked> SlotArena<T> {
    /// Bind the block `owner` stores under `role`, making the owner the
    /// sole member of a fresh ring (`first == next == prev == owner`).
    ///
    /// Must be called before splicing other records in. Refused with a
    /// diagnostic when `owner` is nil or stale, when the record type does
    /// not expose `role`, or when the block is already bound — embed a
    /// second role instead of re-binding one.
    #[track_caller]
    pub fn init_list(&mut self, owner: RecordRef, role: LinkId) {
        if !self.is_active(owner) {
            self.report(Severity::Warning, Fault::InvalidHandle, || {
                format!("list bound to inactive owner {owner}")
            });
            return;
        }
        let Some(block) = self.link_copy(owner, role) else {
            self.report(Severity::Error, Fault::Structural, || {
                format!("record type does not expose link role {role}")
            });
            return;
        };
        if block.bound {
            self.report(Severity::Error, Fault::Structural, || {
                format!(
                    "link role {role} on {owner} is already bound; \
                     embed a separate role for a second list"
                )
            });
            return;
        }
        self.update_link(owner, role, |link| {
            *link = Link {
                bound: true,
                owner,
                role,
                first: owner,
                next: owner,
                prev: owner,
            };
        });
        self.tracker.record(owner, role);
    }

    /// Splice each of `handles` into the ring reachable from `at`, as the
    /// new tail (predecessor of `first`).
    ///
    /// Per handle, degraded no-ops with a diagnostic: unbound block at
    /// `at`, nil or stale handle, or a record already threaded under
    /// `role` — a block represents membership in exactly one ring at a
    /// time.
    #[track_caller]
    pub fn append(&mut self, at: RecordRef, role: LinkId, handles: &[RecordRef]) {
        for &handle in handles {
            self.append_one(at, role, handle);
        }
    }

    #[track_caller]
    fn append_one(&mut self, at: RecordRef, role: LinkId, handle: RecordRef) {
        let Some(anchor) = self.guard_splice(at, role, handle) else {
            return;
        };
        let first = anchor.first;
        let Some(head) = self.bound_link(first, role) else {
            return;
        };
        let tail = head.prev;
        self.update_link(handle, role, |link| {
            *link = Link {
                bound: true,
                owner: anchor.owner,
                role,
                first,
                next: first,
                prev: tail,
            };
        });
        self.update_link(tail, role, |link| link.next = handle);
        self.update_link(first, role, |link| link.prev = handle);
        self.tracker.record(handle, role);
    }

    /// Splice `handle` in immediately after `at`, independent of the head.
    ///
    /// Inserting after the tail makes `handle` the new tail; `first.prev`
    /// follows from the circular relink. Guards match [`SlotArena::append`].
    #[track_caller]
    pub fn insert_next(&mut self, at: RecordRef, role: LinkId, handle: RecordRef) {
        let Some(anchor) = self.guard_splice(at, role, handle) else {
            return;
        };
        let next = anchor.next;
        self.update_link(handle, role, |link| {
            *link = Link {
                bound: true,
                owner: anchor.owner,
                role,
                first: anchor.first,
                next,
                prev: at,
            };
        });
        self.update_link(at, role, |link| link.next = handle);
        self.update_link(next, role, |link| link.prev = handle);
        self.tracker.record(handle, role);
    }

    /// Remove `at` from the ring its block under `role` is threaded into.
    ///
    /// O(1) through the stored neighbour handles. Removing the head
    /// promotes its successor and repoints every survivor's head copy;
    /// removing the sole member resets the block to the inert zero state.
    /// Unbound or empty blocks are warned no-ops.
    #[track_caller]
    pub fn pop_self(&mut self, at: RecordRef, role: LinkId) {
        let Some(block) = self.bound_link(at, role) else {
            self.report(Severity::Warning, Fault::UninitializedList, || {
                format!("pop through unbound link role {role} on {at}")
            });
            return;
        };
        if block.first.is_nil() {
            self.report(Severity::Warning, Fault::UninitializedList, || {
                format!("pop from empty list under role {role}")
            });
            return;
        }
        self.detach(at, role);
    }

    /// Structural removal shared by [`SlotArena::pop_self`] and `free`.
    pub(crate) fn detach(&mut self, at: RecordRef, role: LinkId) {
        let Some(block) = self.bound_link(at, role) else {
            return;
        };
        if block.next == at {
            // Sole member: the ring disappears with it.
            self.update_link(at, role, |link| *link = Link::default());
            self.tracker.clear(at, role);
            return;
        }
        self.update_link(block.prev, role, |link| link.next = block.next);
        self.update_link(block.next, role, |link| link.prev = block.prev);
        if block.first == at {
            // The head left: promote its successor and repoint every
            // survivor's head copy so the ring stays navigable from any
            // member.
            let first = block.next;
            let mut cursor = first;
            loop {
                self.update_link(cursor, role, |link| link.first = first);
                let Some(next) = self.bound_link(cursor, role).map(|link| link.next) else {
                    break;
                };
                if next == first {
                    break;
                }
                cursor = next;
            }
        }
        self.update_link(at, role, |link| *link = Link::default());
        self.tracker.clear(at, role);
    }

    /// Checks shared by the splice operations. Returns the anchor block
    /// when `handle` may be threaded into the ring reachable from `at`.
    #[track_caller]
    fn guard_splice(&mut self, at: RecordRef, role: LinkId, handle: RecordRef) -> Option<Link> {
        let Some(anchor) = self.bound_link(at, role) else {
            self.report(Severity::Warning, Fault::UninitializedList, || {
                format!("splice through unbound link role {role} on {at}")
            });
            return None;
        };
        if !self.is_active(handle) {
            self.report(Severity::Warning, Fault::InvalidHandle, || {
                format!("splice of inactive handle {handle}")
            });
            return None;
        }
        match self.link_copy(handle, role) {
            None => {
                self.report(Severity::Error, Fault::Structural, || {
                    format!("record type does not expose link role {role}")
                });
                None
            }
            Some(block) if block.bound => {
                self.report(Severity::Warning, Fault::Structural, || {
                    format!("{handle} is already in a list under role {role}")
                });
                None
            }
            Some(_) => Some(anchor),
        }
    }

    /// Read-only view of the list reachable from `at` under `role`.
    pub fn list(&self, at: RecordRef, role: LinkId) -> ListView<'_, T> {
        ListView {
            arena: self,
            at,
            role,
        }
    }
}

/// Read-only view of one membership ring, anchored at a member.
///
/// Accessors degrade to a warned default when the anchor's block is
/// unbound, mirroring [`SlotArena::get`]. While a view or an iterator from
/// it is alive the arena stays shared-borrowed, which is what makes
/// removal-during-iteration unrepresentable.
pub struct ListView<'a, T: Linked> {
    arena: &'a SlotArena<T>,
    at: RecordRef,
    role: LinkId,
}

impl<'a, T: Linked> ListView<'a, T> {
    #[track_caller]
    fn anchor(&self, op: &str) -> Option<Link> {
        let block = self.arena.bound_link(self.at, self.role);
        if block.is_none() {
            self.arena
                .report(Severity::Warning, Fault::UninitializedList, || {
                    format!("{op} through unbound link role {} on {}", self.role, self.at)
                });
        }
        block
    }

    fn members_from(&self, block: Option<Link>) -> Members<'a, T> {
        match block {
            Some(block) => Members {
                arena: self.arena,
                role: self.role,
                start: block.first,
                cursor: Some(block.first),
            },
            None => Members {
                arena: self.arena,
                role: self.role,
                start: RecordRef::NIL,
                cursor: None,
            },
        }
    }

    /// Whether the anchor's block is currently threaded into a ring.
    pub fn is_bound(&self) -> bool {
        self.arena.bound_link(self.at, self.role).is_some()
    }

    /// Handle of the list's owner; NIL with a warning when unbound.
    #[track_caller]
    pub fn owner(&self) -> RecordRef {
        self.anchor("owner").map_or(RecordRef::NIL, |b| b.owner)
    }

    /// Handle of the head member.
    #[track_caller]
    pub fn first_ref(&self) -> RecordRef {
        self.anchor("first").map_or(RecordRef::NIL, |b| b.first)
    }

    /// Handle of the member after the anchor.
    #[track_caller]
    pub fn next_ref(&self) -> RecordRef {
        self.anchor("next").map_or(RecordRef::NIL, |b| b.next)
    }

    /// Handle of the member before the anchor.
    #[track_caller]
    pub fn prev_ref(&self) -> RecordRef {
        self.anchor("prev").map_or(RecordRef::NIL, |b| b.prev)
    }

    /// Handle of the tail member. The tail is `first.prev`; there is no
    /// separate tail pointer to fall out of sync.
    #[track_caller]
    pub fn last_ref(&self) -> RecordRef {
        let Some(block) = self.anchor("last") else {
            return RecordRef::NIL;
        };
        self.arena
            .bound_link(block.first, self.role)
            .map_or(RecordRef::NIL, |head| head.prev)
    }

    /// The head member's record; the default view when unbound.
    #[track_caller]
    pub fn first(&self) -> &'a T {
        let handle = self.first_ref();
        self.arena.peek(handle)
    }

    /// Record after the anchor; the default view when unbound.
    #[track_caller]
    pub fn next(&self) -> &'a T {
        let handle = self.next_ref();
        self.arena.peek(handle)
    }

    /// Record before the anchor; the default view when unbound.
    #[track_caller]
    pub fn prev(&self) -> &'a T {
        let handle = self.prev_ref();
        self.arena.peek(handle)
    }

    /// The tail member's record; the default view when unbound.
    #[track_caller]
    pub fn last(&self) -> &'a T {
        let handle = self.last_ref();
        self.arena.peek(handle)
    }

    /// Number of members, by traversal. 0 with a warning when unbound.
    #[track_caller]
    pub fn count(&self) -> usize {
        let block = self.anchor("count");
        self.members_from(block).count()
    }

    /// Lazy `(handle, record)` pairs starting at the head and following
    /// `next` until the head recurs. Empty with a warning when unbound.
    #[track_caller]
    pub fn iter(&self) -> Members<'a, T> {
        let block = self.anchor("iterate");
        self.members_from(block)
    }
}

/// Iterator over one ring's members. Created by [`ListView::iter`].
pub struct Members<'a, T: Linked> {
    arena: &'a SlotArena<T>,
    role: LinkId,
    start: RecordRef,
    cursor: Option<RecordRef>,
}

impl<'a, T: Linked> Iterator for Members<'a, T> {
    type Item = (RecordRef, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        let block = self.arena.bound_link(current, self.role)?;
        self.cursor = (block.next != self.start).then_some(block.next);
        Some((current, self.arena.peek(current)))
    }
}
