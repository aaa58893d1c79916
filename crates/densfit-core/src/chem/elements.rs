use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Physical parameters of one element: atomic mass in u and van der Waals
/// radius in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ElementParams {
    pub mass: f64,
    pub vdw_radius: f64,
}

// Masses are standard atomic weights; radii are Bondi-style van der Waals
// radii. Coverage is the set of elements that occur in macromolecular
// coordinate files, not the full periodic table.
static ELEMENTS: Map<&'static str, ElementParams> = phf_map! {
    "H" => ElementParams { mass: 1.008, vdw_radius: 1.20 },
    "D" => ElementParams { mass: 2.014, vdw_radius: 1.20 },
    "He" => ElementParams { mass: 4.0026, vdw_radius: 1.40 },
    "Li" => ElementParams { mass: 6.94, vdw_radius: 1.82 },
    "Be" => ElementParams { mass: 9.0122, vdw_radius: 1.53 },
    "B" => ElementParams { mass: 10.81, vdw_radius: 1.92 },
    "C" => ElementParams { mass: 12.011, vdw_radius: 1.70 },
    "N" => ElementParams { mass: 14.007, vdw_radius: 1.55 },
    "O" => ElementParams { mass: 15.999, vdw_radius: 1.52 },
    "F" => ElementParams { mass: 18.998, vdw_radius: 1.47 },
    "Ne" => ElementParams { mass: 20.180, vdw_radius: 1.54 },
    "Na" => ElementParams { mass: 22.990, vdw_radius: 2.27 },
    "Mg" => ElementParams { mass: 24.305, vdw_radius: 1.73 },
    "Al" => ElementParams { mass: 26.982, vdw_radius: 1.84 },
    "Si" => ElementParams { mass: 28.085, vdw_radius: 2.10 },
    "P" => ElementParams { mass: 30.974, vdw_radius: 1.80 },
    "S" => ElementParams { mass: 32.06, vdw_radius: 1.80 },
    "Cl" => ElementParams { mass: 35.45, vdw_radius: 1.75 },
    "Ar" => ElementParams { mass: 39.948, vdw_radius: 1.88 },
    "K" => ElementParams { mass: 39.098, vdw_radius: 2.75 },
    "Ca" => ElementParams { mass: 40.078, vdw_radius: 2.31 },
    "Mn" => ElementParams { mass: 54.938, vdw_radius: 2.05 },
    "Fe" => ElementParams { mass: 55.845, vdw_radius: 2.04 },
    "Co" => ElementParams { mass: 58.933, vdw_radius: 2.00 },
    "Ni" => ElementParams { mass: 58.693, vdw_radius: 1.63 },
    "Cu" => ElementParams { mass: 63.546, vdw_radius: 1.40 },
    "Zn" => ElementParams { mass: 65.38, vdw_radius: 1.39 },
    "As" => ElementParams { mass: 74.922, vdw_radius: 1.85 },
    "Se" => ElementParams { mass: 78.971, vdw_radius: 1.90 },
    "Br" => ElementParams { mass: 79.904, vdw_radius: 1.85 },
    "Kr" => ElementParams { mass: 83.798, vdw_radius: 2.02 },
    "Mo" => ElementParams { mass: 95.95, vdw_radius: 2.10 },
    "Ru" => ElementParams { mass: 101.07, vdw_radius: 2.05 },
    "Ag" => ElementParams { mass: 107.87, vdw_radius: 1.72 },
    "Cd" => ElementParams { mass: 112.41, vdw_radius: 1.58 },
    "I" => ElementParams { mass: 126.90, vdw_radius: 1.98 },
    "Xe" => ElementParams { mass: 131.29, vdw_radius: 2.16 },
    "Cs" => ElementParams { mass: 132.91, vdw_radius: 3.43 },
    "Ba" => ElementParams { mass: 137.33, vdw_radius: 2.68 },
    "W" => ElementParams { mass: 183.84, vdw_radius: 2.10 },
    "Pt" => ElementParams { mass: 195.08, vdw_radius: 1.75 },
    "Au" => ElementParams { mass: 196.97, vdw_radius: 1.66 },
    "Hg" => ElementParams { mass: 200.59, vdw_radius: 1.55 },
    "Pb" => ElementParams { mass: 207.2, vdw_radius: 2.02 },
    "U" => ElementParams { mass: 238.03, vdw_radius: 1.86 },
};

/// Normalizes an element symbol for lookup: first character uppercased,
/// the rest lowercased (`"FE"` becomes `"Fe"`).
pub fn normalize_symbol(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    match chars.next() {
        Some(first) => {
            let mut normalized = first.to_ascii_uppercase().to_string();
            normalized.push_str(&chars.as_str().to_ascii_lowercase());
            normalized
        }
        None => String::new(),
    }
}

/// Looks up the built-in parameters for an already-normalized symbol.
pub fn builtin(symbol: &str) -> Option<ElementParams> {
    ELEMENTS.get(symbol).copied()
}

#[derive(Debug, Error)]
pub enum ChemError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// The periodic-table lookup handed to structure property accessors.
///
/// Lookups fall back to the built-in table; entries loaded from a TOML
/// file shadow built-ins of the same symbol. Symbols are normalized on
/// every lookup, so `"FE"`, `"fe"` and `"Fe"` resolve identically.
#[derive(Debug, Clone, Default)]
pub struct ElementTable {
    overrides: HashMap<String, ElementParams>,
}

impl ElementTable {
    /// A table backed by the built-in element data only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads element overrides from a TOML file of the form:
    ///
    /// ```toml
    /// [Ru]
    /// mass = 101.07
    /// vdw_radius = 2.05
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ChemError`] if the file cannot be read or parsed.
    pub fn from_toml_path(path: &Path) -> Result<Self, ChemError> {
        let content = std::fs::read_to_string(path).map_err(|e| ChemError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let raw: HashMap<String, ElementParams> =
            toml::from_str(&content).map_err(|e| ChemError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        let overrides = raw
            .into_iter()
            .map(|(symbol, params)| (normalize_symbol(&symbol), params))
            .collect();
        Ok(Self { overrides })
    }

    /// Resolves one element symbol, normalizing it first.
    pub fn get(&self, symbol: &str) -> Option<ElementParams> {
        let normalized = normalize_symbol(symbol);
        self.overrides
            .get(&normalized)
            .copied()
            .or_else(|| builtin(&normalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn builtin_covers_the_common_organic_elements() {
        assert_eq!(builtin("C").unwrap().mass, 12.011);
        assert_eq!(builtin("N").unwrap().vdw_radius, 1.55);
        assert!(builtin("S").is_some());
        assert!(builtin("P").is_some());
    }

    #[test]
    fn normalize_symbol_capitalizes() {
        assert_eq!(normalize_symbol("FE"), "Fe");
        assert_eq!(normalize_symbol("fe"), "Fe");
        assert_eq!(normalize_symbol(" ca "), "Ca");
        assert_eq!(normalize_symbol("c"), "C");
        assert_eq!(normalize_symbol(""), "");
    }

    #[test]
    fn table_lookup_normalizes_before_resolving() {
        let table = ElementTable::new();
        assert_eq!(table.get("FE").unwrap().mass, 55.845);
        assert_eq!(table.get("fe").unwrap().mass, 55.845);
        assert!(table.get("Xx").is_none());
    }

    #[test]
    fn toml_overrides_shadow_builtins_and_add_new_symbols() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("elements.toml");
        fs::write(
            &path,
            "[C]\nmass = 13.0\nvdw_radius = 1.7\n\n[Xx]\nmass = 1.0\nvdw_radius = 2.0\n",
        )
        .unwrap();
        let table = ElementTable::from_toml_path(&path).unwrap();
        assert_eq!(table.get("C").unwrap().mass, 13.0);
        assert_eq!(table.get("xx").unwrap().vdw_radius, 2.0);
        // Untouched symbols still resolve through the built-ins.
        assert_eq!(table.get("O").unwrap().mass, 15.999);
    }

    #[test]
    fn unreadable_or_invalid_files_are_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            ElementTable::from_toml_path(&missing),
            Err(ChemError::Io { .. })
        ));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "not [valid toml").unwrap();
        assert!(matches!(
            ElementTable::from_toml_path(&bad),
            Err(ChemError::Toml { .. })
        ));
    }
}
