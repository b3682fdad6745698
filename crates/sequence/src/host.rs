//! Binding of an engine to a document and the host's viewport events.

use crate::engine::Sequence;
use crate::reorganize::PassSummary;
use anyhow::Error;
use html::DOM;
use log::debug;

/// A document shown in a viewport, laid out by a [`Sequence`] engine.
///
/// Mirrors the two host events the engine reacts to: the initial load and
/// subsequent resizes.
#[derive(Debug)]
pub struct Window {
    engine: Sequence,
    document: DOM,
}

impl Window {
    pub fn new(engine: Sequence, document: DOM) -> Self {
        Self { engine, document }
    }

    /// Initial layout: resolve the breakpoint for `width` and always run a
    /// full pass.
    ///
    /// # Errors
    /// Propagates observer errors from the pass.
    pub fn load(&mut self, width: u32) -> Result<PassSummary, Error> {
        self.engine.resolve(width);
        self.engine.update(&mut self.document)
    }

    /// Viewport resize: re-layout only when the active breakpoint changed.
    /// Returns the pass summary when a pass ran.
    ///
    /// # Errors
    /// Propagates observer errors from the pass.
    pub fn resize(&mut self, width: u32) -> Result<Option<PassSummary>, Error> {
        if !self.engine.resolve(width) {
            debug!("resize to {width} stays at {}", self.engine.active_breakpoint());
            return Ok(None);
        }
        self.engine.update(&mut self.document).map(Some)
    }

    /// Last width reported through [`load`](Self::load) or [`resize`](Self::resize).
    pub fn width(&self) -> Option<u32> {
        self.engine.last_width()
    }

    pub fn engine(&self) -> &Sequence {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Sequence {
        &mut self.engine
    }

    pub fn document(&self) -> &DOM {
        &self.document
    }

    /// Engine and document together, for calls such as
    /// [`Sequence::configure`] that need both.
    pub fn parts_mut(&mut self) -> (&mut Sequence, &mut DOM) {
        (&mut self.engine, &mut self.document)
    }

    pub fn into_document(self) -> DOM {
        self.document
    }
}
