//! Breakpoint-driven re-parenting and re-ordering of document elements.
//!
//! Authors tag elements with attributes (default prefix `sq`):
//!
//! - `sq-id="name"` marks an element that can be moved.
//! - `sq-for="a,b"` / `sq-for-900="a,b"` on a container lists the identities
//!   it accepts, always or only while breakpoint 900 is active.
//! - `sq-order="3"` / `sq-order-900="3"` orders siblings, highest first.
//!
//! A [`Sequence`] engine resolves the active breakpoint from the viewport
//! width and, on change, moves every tagged element under the container
//! that accepts it before sorting each container's children.

pub mod attributes;
pub mod breakpoints;
pub mod config;
mod engine;
pub mod error;
pub mod host;
pub mod observers;
pub mod reorganize;

pub use attributes::AttributeNames;
pub use breakpoints::{Breakpoint, BreakpointResolver};
pub use config::SequenceConfig;
pub use engine::Sequence;
pub use error::SequenceError;
pub use host::Window;
pub use observers::LayoutEvent;
pub use reorganize::PassSummary;
