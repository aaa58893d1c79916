//! Element data backing the per-atom physical-property accessors.

pub mod elements;

pub use elements::{ChemError, ElementParams, ElementTable};
