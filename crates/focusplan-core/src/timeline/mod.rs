//! Time intervals and the free-time set of a scheduling run.
//!
//! This module provides:
//! - Half-open [`Interval`] values with a `start < end` invariant
//! - [`FreeTimeSet`], the ordered disjoint remainder of the work window

mod free_time;
mod interval;

pub use free_time::FreeTimeSet;
pub use interval::Interval;
