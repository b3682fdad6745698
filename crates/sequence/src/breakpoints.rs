//! Viewport-width thresholds and the resolver that picks the active one.
//!
//! A width satisfies a threshold when `width >= threshold`. This inclusive
//! bound is the only comparison used when resolving.

use crate::error::SequenceError;
use core::fmt;
use core::str::FromStr;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A viewport-width threshold in CSS pixels.
///
/// `Breakpoint::BASE` (0) is the implicit tier that applies when no
/// configured threshold is met.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Breakpoint(u32);

impl Breakpoint {
    pub const BASE: Self = Self(0);

    pub const fn new(width: u32) -> Self {
        Self(width)
    }

    pub const fn width(self) -> u32 {
        self.0
    }

    /// Whether a viewport of `width` pixels meets this threshold.
    pub const fn is_met_by(self, width: u32) -> bool {
        width >= self.0
    }
}

impl From<u32> for Breakpoint {
    fn from(width: u32) -> Self {
        Self(width)
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for Breakpoint {
    type Err = SequenceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| SequenceError::InvalidBreakpoint(text.to_owned()))
    }
}

/// Parses a comma-separated breakpoint list such as `"600, 900"`.
///
/// # Errors
/// Fails on the first entry that is not a non-negative integer.
pub fn parse_breakpoint_list(text: &str) -> Result<Vec<Breakpoint>, SequenceError> {
    text.split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Holds the configured thresholds and the currently active one.
#[derive(Debug, Clone, Default)]
pub struct BreakpointResolver {
    /// Sorted ascending, no duplicates.
    thresholds: Vec<Breakpoint>,
    active: Breakpoint,
    last_width: Option<u32>,
}

impl BreakpointResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thresholds(&self) -> &[Breakpoint] {
        &self.thresholds
    }

    pub fn active(&self) -> Breakpoint {
        self.active
    }

    /// The width passed to the most recent [`resolve`](Self::resolve) call.
    pub fn last_width(&self) -> Option<u32> {
        self.last_width
    }

    /// Replaces the whole threshold set, then re-resolves against the last
    /// observed width (0 when none was observed). An empty set resets the
    /// active breakpoint to [`Breakpoint::BASE`].
    pub fn set_thresholds<I, B>(&mut self, thresholds: I)
    where
        I: IntoIterator<Item = B>,
        B: Into<Breakpoint>,
    {
        let mut thresholds: Vec<Breakpoint> = thresholds.into_iter().map(Into::into).collect();
        thresholds.sort_unstable();
        thresholds.dedup();
        debug!("breakpoints set to {thresholds:?}");
        self.thresholds = thresholds;
        self.active = self.compute(self.last_width.unwrap_or(0));
    }

    /// Resolves the active breakpoint for `width`.
    ///
    /// Returns true exactly when the active breakpoint changed.
    pub fn resolve(&mut self, width: u32) -> bool {
        self.last_width = Some(width);
        let resolved = self.compute(width);
        if resolved == self.active {
            return false;
        }
        info!("active breakpoint {} -> {resolved} (width {width})", self.active);
        self.active = resolved;
        true
    }

    fn compute(&self, width: u32) -> Breakpoint {
        self.thresholds
            .iter()
            .rev()
            .copied()
            .find(|threshold| threshold.is_met_by(width))
            .unwrap_or(Breakpoint::BASE)
    }
}
