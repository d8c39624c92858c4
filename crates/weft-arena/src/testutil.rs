//! Shared fixtures for this crate's unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use weft_core::{Diagnostic, DiagnosticSink, Fault, LinkId};

use crate::link::{Link, Linked};

/// Role id for the "is in the world" list.
pub(crate) const IN_WORLD: LinkId = LinkId(0);
/// Role id for the "is in a bag" list.
pub(crate) const IN_BAG: LinkId = LinkId(1);

/// Minimal record with two link roles.
#[derive(Debug, Default)]
pub(crate) struct Item {
    pub(crate) kind: u32,
    pub(crate) world: Link,
    pub(crate) bag: Link,
}

impl Item {
    pub(crate) fn with_kind(kind: u32) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

impl Linked for Item {
    fn link(&self, role: LinkId) -> Option<&Link> {
        match role {
            IN_WORLD => Some(&self.world),
            IN_BAG => Some(&self.bag),
            _ => None,
        }
    }

    fn link_mut(&mut self, role: LinkId) -> Option<&mut Link> {
        match role {
            IN_WORLD => Some(&mut self.world),
            IN_BAG => Some(&mut self.bag),
            _ => None,
        }
    }
}

/// Sink that records every diagnostic. Clones share the same buffer, so
/// tests keep one clone and hand the other to the arena.
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    events: Rc<RefCell<Vec<Diagnostic>>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn faults(&self) -> Vec<Fault> {
        self.events.borrow().iter().map(Diagnostic::fault).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.events.borrow().len()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.events.borrow_mut().push(diagnostic.clone());
    }
}
