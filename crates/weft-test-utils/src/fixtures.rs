//! Reusable test fixtures.
//!
//! - [`CaptureSink`] — records every diagnostic for later assertions.
//! - [`Critter`] — a small game-entity record with two link roles, the
//!   shape intrusive arenas are typically used for.

use std::cell::RefCell;
use std::rc::Rc;

use weft_arena::{Link, Linked};
use weft_core::{Diagnostic, DiagnosticSink, Fault, LinkId};

/// Role id for "this record is somewhere in the world".
pub const IN_WORLD: LinkId = LinkId(0);
/// Role id for "this record sits in some inventory".
pub const IN_INVENTORY: LinkId = LinkId(1);

/// What a [`Critter`] is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Kind {
    /// Unoccupied slot payload.
    #[default]
    Nil,
    /// Player-controlled entity.
    Player,
    /// Pickup item.
    Item,
}

/// Fixture record: a game entity with health, a position, and two
/// independent link roles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Critter {
    /// Entity class.
    pub kind: Kind,
    /// Hit points.
    pub health: i32,
    /// Item payload, meaningful for [`Kind::Item`].
    pub item_id: i32,
    /// World position.
    pub position: (f32, f32),
    /// Membership block for [`IN_WORLD`].
    pub in_world: Link,
    /// Membership block for [`IN_INVENTORY`].
    pub in_inventory: Link,
}

impl Critter {
    /// A player at `position`.
    pub fn player(position: (f32, f32)) -> Self {
        Self {
            kind: Kind::Player,
            health: 10,
            position,
            ..Self::default()
        }
    }

    /// An item with the given payload id.
    pub fn item(item_id: i32) -> Self {
        Self {
            kind: Kind::Item,
            item_id,
            ..Self::default()
        }
    }
}

impl Linked for Critter {
    fn link(&self, role: LinkId) -> Option<&Link> {
        match role {
            IN_WORLD => Some(&self.in_world),
            IN_INVENTORY => Some(&self.in_inventory),
            _ => None,
        }
    }

    fn link_mut(&mut self, role: LinkId) -> Option<&mut Link> {
        match role {
            IN_WORLD => Some(&mut self.in_world),
            IN_INVENTORY => Some(&mut self.in_inventory),
            _ => None,
        }
    }
}

/// Diagnostic sink that records every event for later inspection.
///
/// Clones share one buffer: keep a clone for assertions and hand the
/// other to [`weft_arena::SlotArena::with_sink`].
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    events: Rc<RefCell<Vec<Diagnostic>>>,
}

impl CaptureSink {
    /// Fresh sink with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every captured event.
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.borrow().clone()
    }

    /// Fault kinds in emission order.
    pub fn faults(&self) -> Vec<Fault> {
        self.events.borrow().iter().map(Diagnostic::fault).collect()
    }

    /// Number of captured events.
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Number of events with the given fault kind.
    pub fn count_of(&self, fault: Fault) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|d| d.fault() == fault)
            .count()
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl DiagnosticSink for CaptureSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.events.borrow_mut().push(diagnostic.clone());
    }
}
