//! Reverse index from records to the link roles they currently occupy.

use indexmap::IndexMap;
use smallvec::SmallVec;
use weft_core::LinkId;

use crate::handle::RecordRef;

/// Which rings each record is currently threaded into.
///
/// Populated on every successful splice (including the owner's own binding
/// at list init) and consumed when a record is freed: the slot may only be
/// recycled after the record has been detached from every ring that still
/// points at it, otherwise the neighbours' blocks would dangle into the
/// reused slot.
#[derive(Debug, Default)]
pub(crate) struct MembershipTracker {
    entries: IndexMap<RecordRef, SmallVec<[LinkId; 4]>>,
}

impl MembershipTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Note that `handle` now occupies `role`.
    pub(crate) fn record(&mut self, handle: RecordRef, role: LinkId) {
        let roles = self.entries.entry(handle).or_default();
        if !roles.contains(&role) {
            roles.push(role);
        }
    }

    /// Note that `handle` no longer occupies `role`.
    pub(crate) fn clear(&mut self, handle: RecordRef, role: LinkId) {
        if let Some(roles) = self.entries.get_mut(&handle) {
            roles.retain(|r| *r != role);
            if roles.is_empty() {
                self.entries.swap_remove(&handle);
            }
        }
    }

    /// Remove and return every role `handle` occupies.
    pub(crate) fn take(&mut self, handle: RecordRef) -> SmallVec<[LinkId; 4]> {
        self.entries.swap_remove(&handle).unwrap_or_default()
    }

    /// Number of records with at least one recorded membership.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Roles currently recorded for `handle`, in insertion order.
    #[cfg(test)]
    pub(crate) fn roles(&self, handle: RecordRef) -> Vec<LinkId> {
        self.entries
            .get(&handle)
            .map(|roles| roles.to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(index: u32) -> RecordRef {
        RecordRef {
            index,
            generation: 0,
        }
    }

    #[test]
    fn record_deduplicates_roles() {
        let mut tracker = MembershipTracker::new();
        tracker.record(handle(1), LinkId(0));
        tracker.record(handle(1), LinkId(0));
        tracker.record(handle(1), LinkId(1));
        assert_eq!(tracker.roles(handle(1)), vec![LinkId(0), LinkId(1)]);
    }

    #[test]
    fn clear_drops_empty_entries() {
        let mut tracker = MembershipTracker::new();
        tracker.record(handle(1), LinkId(0));
        tracker.clear(handle(1), LinkId(0));
        assert_eq!(tracker.len(), 0);
    }

    #[test]
    fn clear_of_unknown_role_is_harmless() {
        let mut tracker = MembershipTracker::new();
        tracker.record(handle(1), LinkId(0));
        tracker.clear(handle(1), LinkId(7));
        tracker.clear(handle(2), LinkId(0));
        assert_eq!(tracker.roles(handle(1)), vec![LinkId(0)]);
    }

    #[test]
    fn take_empties_the_entry() {
        let mut tracker = MembershipTracker::new();
        tracker.record(handle(3), LinkId(0));
        tracker.record(handle(3), LinkId(2));
        let roles = tracker.take(handle(3));
        assert_eq!(roles.as_slice(), &[LinkId(0), LinkId(2)]);
        assert_eq!(tracker.len(), 0);
        assert!(tracker.take(handle(3)).is_empty());
    }
}
