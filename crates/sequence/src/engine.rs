use crate::attributes::AttributeNames;
use crate::breakpoints::{Breakpoint, BreakpointResolver};
use crate::config::SequenceConfig;
use crate::error::SequenceError;
use crate::observers::{LayoutEvent, Observers};
use crate::reorganize::{PassSummary, reorganize};
use anyhow::Error;
use html::DOM;
use log::{info, trace};

/// A responsive layout engine instance.
///
/// Owns the breakpoint set, the active breakpoint, the attribute names and
/// the observer registry. The document is passed to each operation.
#[derive(Debug, Default)]
pub struct Sequence {
    names: AttributeNames,
    resolver: BreakpointResolver,
    observers: Observers,
}

impl Sequence {
    /// An engine using the `sq` prefix and no breakpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Rejects an empty prefix or one containing whitespace.
    pub fn with_prefix(prefix: &str) -> Result<Self, SequenceError> {
        Ok(Self {
            names: AttributeNames::new(prefix)?,
            ..Self::default()
        })
    }

    /// Builds an engine from `config` without running a pass.
    ///
    /// # Errors
    /// Rejects an invalid prefix.
    pub fn from_config(config: &SequenceConfig) -> Result<Self, SequenceError> {
        let mut engine = Self::with_prefix(&config.prefix)?;
        engine.resolver.set_thresholds(config.breakpoints.iter().copied());
        Ok(engine)
    }

    pub fn attribute_names(&self) -> &AttributeNames {
        &self.names
    }

    /// Configured thresholds, ascending.
    pub fn breakpoints(&self) -> &[Breakpoint] {
        self.resolver.thresholds()
    }

    pub fn active_breakpoint(&self) -> Breakpoint {
        self.resolver.active()
    }

    /// The width most recently passed to [`resolve`](Self::resolve).
    pub fn last_width(&self) -> Option<u32> {
        self.resolver.last_width()
    }

    /// Replaces the breakpoint set and runs a full pass. An empty set resets
    /// the active breakpoint to [`Breakpoint::BASE`].
    ///
    /// # Errors
    /// Propagates errors from [`update`](Self::update).
    pub fn configure<I, B>(&mut self, dom: &mut DOM, breakpoints: I) -> Result<PassSummary, Error>
    where
        I: IntoIterator<Item = B>,
        B: Into<Breakpoint>,
    {
        self.resolver.set_thresholds(breakpoints);
        self.update(dom)
    }

    /// Clears the breakpoint set and runs a full pass.
    ///
    /// # Errors
    /// Propagates errors from [`update`](Self::update).
    pub fn clear_breakpoints(&mut self, dom: &mut DOM) -> Result<PassSummary, Error> {
        self.configure(dom, Vec::<Breakpoint>::new())
    }

    /// Resolves the active breakpoint for `width`. Returns true when it
    /// changed; the caller decides whether to run [`update`](Self::update).
    pub fn resolve(&mut self, width: u32) -> bool {
        self.resolver.resolve(width)
    }

    /// Re-parents and re-orders the document for the active breakpoint, then
    /// notifies observers. Running it twice without changes leaves the tree
    /// as the first run left it.
    ///
    /// # Errors
    /// Returns the first error raised by an observer callback.
    pub fn update(&mut self, dom: &mut DOM) -> Result<PassSummary, Error> {
        let active = self.resolver.active();
        let summary = reorganize(dom, &self.names, active)?;
        info!(
            "layout pass at {active}: moved {}, skipped {}, sorted {} containers",
            summary.moved, summary.skipped, summary.containers
        );
        trace!("document after pass at {active}:\n{dom:?}");
        self.observers.notify(dom, active)?;
        Ok(summary)
    }

    /// Registers `callback` for `event`: `"update"` for every pass, or a
    /// breakpoint width such as `"900"` for passes run at that breakpoint.
    ///
    /// # Errors
    /// Rejects event names that are neither.
    pub fn on<F>(&mut self, event: &str, callback: F) -> Result<(), SequenceError>
    where
        F: FnMut(&DOM, Breakpoint) -> Result<(), Error> + 'static,
    {
        self.on_event(event.parse()?, callback);
        Ok(())
    }

    pub fn on_event<F>(&mut self, event: LayoutEvent, callback: F)
    where
        F: FnMut(&DOM, Breakpoint) -> Result<(), Error> + 'static,
    {
        self.observers.register(event, Box::new(callback));
    }
}
