//! Diagnostic events and the pluggable sink they are delivered to.
//!
//! Weft's core operations never panic and never return `Result`: misuse
//! degrades to a safe no-op or a default view, and the event is reported
//! through an injected [`DiagnosticSink`]. An arena constructed without a
//! sink runs silent; behaviour is otherwise identical.

use std::error::Error;
use std::fmt;
use std::panic::Location;

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// The operation degraded to a no-op or a default value.
    Warning,
    /// The caller must act: capacity exhaustion, or structural misuse
    /// caught at bind time.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// The misuse categories a diagnostic can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fault {
    /// A nil, out-of-range, or stale (generation-mismatched) handle.
    InvalidHandle,
    /// A list operation through a block that was never bound.
    UninitializedList,
    /// Allocation found no free slot.
    CapacityExhausted,
    /// A shape problem: unknown link role, re-binding an already-bound
    /// block, or splicing a record that is already in a list.
    Structural,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHandle => write!(f, "invalid handle"),
            Self::UninitializedList => write!(f, "uninitialized list"),
            Self::CapacityExhausted => write!(f, "capacity exhausted"),
            Self::Structural => write!(f, "structural misuse"),
        }
    }
}

impl Error for Fault {}

/// A single reported event.
///
/// Carries the fault category, a human-readable message, and the call site
/// that triggered it. Call sites are captured with `#[track_caller]`, so
/// the location points at the offending caller, not at arena internals.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    severity: Severity,
    fault: Fault,
    message: String,
    location: &'static Location<'static>,
}

impl Diagnostic {
    /// Assemble an event.
    pub fn new(
        severity: Severity,
        fault: Fault,
        message: impl Into<String>,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            severity,
            fault,
            message: message.into(),
            location,
        }
    }

    /// Event severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Fault category.
    pub fn fault(&self) -> Fault {
        self.fault
    }

    /// Human-readable description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Call site that triggered the event.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({}) at {}",
            self.severity, self.message, self.fault, self.location
        )
    }
}

/// Receives diagnostic events from an arena.
///
/// Implementations must not panic; the arena calls `emit` from inside
/// otherwise-infallible operations.
pub trait DiagnosticSink {
    /// Deliver one event.
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Sink that forwards events to the [`log`] facade.
///
/// Warnings become `log::warn!`, errors become `log::error!`. Useful when
/// the host application already routes `log` output somewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => log::warn!("{diagnostic}"),
            Severity::Error => log::error!("{diagnostic}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_fault_and_location() {
        let diagnostic = Diagnostic::new(
            Severity::Warning,
            Fault::InvalidHandle,
            "dereference of inactive handle",
            Location::caller(),
        );
        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("warning: dereference of inactive handle"));
        assert!(rendered.contains("(invalid handle)"));
        assert!(rendered.contains("diag.rs"));
    }

    #[test]
    fn fault_display_is_stable() {
        assert_eq!(Fault::CapacityExhausted.to_string(), "capacity exhausted");
        assert_eq!(Fault::Structural.to_string(), "structural misuse");
    }
}
