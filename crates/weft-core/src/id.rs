//! Strongly-typed identifiers.

use std::fmt;

/// Identifies one embedded link role within a record type.
///
/// A record type may embed several link blocks to participate in several
/// independent lists at once ("is in the world" vs "is in an inventory").
/// Each embedded block is named by a `LinkId` the record type assigns, and
/// the arena stores the id inside every member's block so that any member
/// can locate the matching block in a neighbour's record without knowing
/// the record's memory layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub u32);

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LinkId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
