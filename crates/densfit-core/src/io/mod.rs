//! Reading and writing of macromolecular coordinate files.
//!
//! Two codecs share one columnar atom table: a fixed-width PDB
//! reader/writer and a simplified mmCIF reader/writer restricted to the
//! `_atom_site` loop. Format selection happens once, at the boundary,
//! through [`CoordFormat`]; the per-format entry points live behind the
//! [`traits::CoordFile`] trait.

pub mod error;
pub mod mmcif;
pub mod pdb;
pub mod traits;

pub use error::{CoordError, ParseErrorKind};

use std::path::Path;

/// Supported coordinate file formats, resolved once from a path extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordFormat {
    /// Fixed-width PDB (`.pdb`, `.ent`).
    Pdb,
    /// Simplified mmCIF, `_atom_site` loop only (`.cif`).
    Mmcif,
}

impl CoordFormat {
    /// Resolves the format from a file extension (ASCII case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::UnsupportedFormat`] for a missing or
    /// unrecognized extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CoordError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdb") | Some("ent") => Ok(CoordFormat::Pdb),
            Some("cif") => Ok(CoordFormat::Mmcif),
            _ => Err(CoordError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_path_recognizes_pdb_and_ent_and_cif() {
        assert_eq!(CoordFormat::from_path("a/model.pdb").unwrap(), CoordFormat::Pdb);
        assert_eq!(CoordFormat::from_path("1abc.ent").unwrap(), CoordFormat::Pdb);
        assert_eq!(CoordFormat::from_path("1ABC.CIF").unwrap(), CoordFormat::Mmcif);
    }

    #[test]
    fn from_path_rejects_unknown_extensions() {
        assert!(matches!(
            CoordFormat::from_path("model.xyz"),
            Err(CoordError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            CoordFormat::from_path("no_extension"),
            Err(CoordError::UnsupportedFormat { .. })
        ));
    }
}
