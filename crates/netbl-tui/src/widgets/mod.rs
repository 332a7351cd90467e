//! Shared widgets.

pub mod meter;
