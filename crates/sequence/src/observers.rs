//! Synchronous callbacks fired after each completed layout pass.

use crate::breakpoints::Breakpoint;
use crate::error::SequenceError;
use anyhow::Error;
use core::fmt;
use core::str::FromStr;
use html::DOM;
use std::collections::HashMap;

/// The event a callback subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEvent {
    /// Fired after every pass.
    Update,
    /// Fired after a pass run while this breakpoint is active.
    Breakpoint(Breakpoint),
}

impl FromStr for LayoutEvent {
    type Err = SequenceError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.trim().eq_ignore_ascii_case("update") {
            return Ok(Self::Update);
        }
        name.parse()
            .map(Self::Breakpoint)
            .map_err(|_| SequenceError::InvalidEventName(name.to_owned()))
    }
}

impl fmt::Display for LayoutEvent {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => formatter.write_str("update"),
            Self::Breakpoint(breakpoint) => write!(formatter, "{breakpoint}"),
        }
    }
}

/// Host callback. Receives the document after the pass and the active
/// breakpoint.
pub type Callback = Box<dyn FnMut(&DOM, Breakpoint) -> Result<(), Error>>;

/// Callbacks grouped by event, each group in registration order.
#[derive(Default)]
pub struct Observers {
    on_update: Vec<Callback>,
    by_breakpoint: HashMap<Breakpoint, Vec<Callback>>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scoped: HashMap<&Breakpoint, usize> = self
            .by_breakpoint
            .iter()
            .map(|(breakpoint, callbacks)| (breakpoint, callbacks.len()))
            .collect();
        formatter
            .debug_struct("Observers")
            .field("on_update", &self.on_update.len())
            .field("by_breakpoint", &scoped)
            .finish()
    }
}

impl Observers {
    pub fn register(&mut self, event: LayoutEvent, callback: Callback) {
        match event {
            LayoutEvent::Update => self.on_update.push(callback),
            LayoutEvent::Breakpoint(breakpoint) => {
                self.by_breakpoint.entry(breakpoint).or_default().push(callback);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.on_update.len() + self.by_breakpoint.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the `update` callbacks, then those scoped to `active`.
    ///
    /// # Errors
    /// The first callback error stops dispatch and is returned unchanged.
    pub fn notify(&mut self, dom: &DOM, active: Breakpoint) -> Result<(), Error> {
        for callback in &mut self.on_update {
            callback(dom, active)?;
        }
        if let Some(callbacks) = self.by_breakpoint.get_mut(&active) {
            for callback in callbacks {
                callback(dom, active)?;
            }
        }
        Ok(())
    }
}
