//! # densfit core library
//!
//! The data layer beneath a density-fitting engine: coordinate file I/O
//! and an in-memory atomic structure supporting rigid-body transforms,
//! composition, and per-atom physical-property lookup.
//!
//! ## Architecture
//!
//! - **[`models`]: The Data.** A column-oriented atom table
//!   (`AtomTable`) and the `Structure` entity that owns one table
//!   exclusively, exposing derived properties (coordinates, sequence,
//!   masses, centre of mass) and in-place transforms (rotate, translate,
//!   combine) plus the non-standard flat-mean RMSD used by fitting
//!   pipelines.
//!
//! - **[`io`]: The Codecs.** A fixed-width PDB reader/writer and a
//!   simplified mmCIF reader/writer restricted to the `_atom_site` loop,
//!   both speaking the same atom table. Formats are resolved once at the
//!   boundary via `CoordFormat`.
//!
//! - **[`chem`]: The Element Data.** A built-in periodic-table subset and
//!   the `ElementTable` collaborator that resolves element symbols to
//!   atomic mass and van der Waals radius, with optional TOML overrides.

pub mod chem;
pub mod io;
pub mod models;
