use crate::chem::{ElementParams, ElementTable};
use crate::chem::elements::normalize_symbol;
use crate::io::CoordFormat;
use crate::io::error::CoordError;
use crate::io::mmcif::CifFile;
use crate::io::pdb::PdbFile;
use crate::io::traits::CoordFile;
use crate::models::table::AtomTable;
use nalgebra::{Matrix3, Point3, Vector3};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureError {
    #[error(transparent)]
    Coord(#[from] CoordError),
    #[error("Unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
    #[error("Atom count mismatch: {left} vs {right} atoms")]
    AtomCountMismatch { left: usize, right: usize },
    #[error("Structure contains no atoms")]
    Empty,
}

/// An atomic structure owning one atom table.
///
/// The table is held exclusively: there is no mutable handle to it, only
/// the accessor and transform operations below, so a [`Structure::duplicate`]
/// is guaranteed to share no storage with its source. Transforms mutate in
/// place; callers that need to try many orientations of one template are
/// expected to duplicate once per candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    table: AtomTable,
}

impl Structure {
    /// Wraps an externally built atom table.
    pub fn from_table(table: AtomTable) -> Self {
        Self { table }
    }

    /// Reads a structure from a coordinate file, dispatching on the
    /// extension: `.pdb`/`.ent` are parsed as fixed-width PDB, `.cif` as
    /// simplified mmCIF.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::UnsupportedFormat`] for any other extension,
    /// or the underlying codec error if parsing fails.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CoordError> {
        let path = path.as_ref();
        let table = match CoordFormat::from_path(path)? {
            CoordFormat::Pdb => PdbFile::read_from_path(path)?,
            CoordFormat::Mmcif => CifFile::read_from_path(path)?,
        };
        Ok(Self { table })
    }

    /// Read-only view of the owned atom table.
    pub fn table(&self) -> &AtomTable {
        &self.table
    }

    /// Consumes the structure, handing the table back out.
    pub fn into_table(self) -> AtomTable {
        self.table
    }

    /// Number of atoms.
    pub fn natoms(&self) -> usize {
        self.table.len()
    }

    /// Atom positions, in atom order.
    pub fn coor(&self) -> Vec<Point3<f64>> {
        (0..self.table.len())
            .map(|index| self.table.position(index).unwrap_or_else(Point3::origin))
            .collect()
    }

    /// Per-atom temperature factors, in atom order.
    pub fn bfacs(&self) -> &[f64] {
        self.table.b_factors()
    }

    /// Per-atom serial numbers, in atom order.
    pub fn atom_numbers(&self) -> &[i32] {
        self.table.serials()
    }

    /// Distinct chain identifiers, in encounter order.
    pub fn chain_list(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut chains = Vec::new();
        for chain in self.table.chains() {
            if seen.insert(chain.clone()) {
                chains.push(chain.clone());
            }
        }
        chains
    }

    /// Residue names restricted to one representative atom per residue,
    /// the alpha carbon.
    pub fn sequence(&self) -> Vec<String> {
        self.table
            .names()
            .iter()
            .zip(self.table.res_names())
            .filter(|(name, _)| name.as_str() == "CA")
            .map(|(_, res_name)| res_name.clone())
            .collect()
    }

    /// Resolves one value per atom from the element table, looking each
    /// distinct symbol up exactly once and broadcasting the result back
    /// across all atoms sharing it.
    fn broadcast_element_property(
        &self,
        elements: &ElementTable,
        pick: impl Fn(ElementParams) -> f64,
    ) -> Result<Vec<f64>, StructureError> {
        let mut slot_of: HashMap<String, usize> = HashMap::new();
        let mut distinct: Vec<String> = Vec::new();
        let mut slots = Vec::with_capacity(self.table.len());
        for symbol in self.table.elements() {
            let normalized = normalize_symbol(symbol);
            let next = distinct.len();
            let slot = *slot_of.entry(normalized.clone()).or_insert_with(|| {
                distinct.push(normalized);
                next
            });
            slots.push(slot);
        }

        let values = distinct
            .iter()
            .map(|symbol| {
                elements
                    .get(symbol)
                    .map(&pick)
                    .ok_or_else(|| StructureError::UnknownElement {
                        symbol: symbol.clone(),
                    })
            })
            .collect::<Result<Vec<f64>, StructureError>>()?;

        Ok(slots.into_iter().map(|slot| values[slot]).collect())
    }

    /// Per-atom atomic masses.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownElement`] if any element symbol is
    /// absent from the table.
    pub fn mass(&self, elements: &ElementTable) -> Result<Vec<f64>, StructureError> {
        self.broadcast_element_property(elements, |params| params.mass)
    }

    /// Per-atom van der Waals radii.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::UnknownElement`] if any element symbol is
    /// absent from the table.
    pub fn rvdw(&self, elements: &ElementTable) -> Result<Vec<f64>, StructureError> {
        self.broadcast_element_property(elements, |params| params.vdw_radius)
    }

    /// Mass-weighted centroid of the structure.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::Empty`] for a structure with no atoms, or
    /// [`StructureError::UnknownElement`] if a symbol cannot be resolved.
    pub fn centre_of_mass(&self, elements: &ElementTable) -> Result<Point3<f64>, StructureError> {
        if self.table.is_empty() {
            return Err(StructureError::Empty);
        }
        let masses = self.mass(elements)?;
        let mut weighted = Vector3::zeros();
        let mut total = 0.0;
        for (index, mass) in masses.iter().enumerate() {
            weighted += *mass
                * Vector3::new(
                    self.table.xs()[index],
                    self.table.ys()[index],
                    self.table.zs()[index],
                );
            total += mass;
        }
        Ok(Point3::from(weighted / total))
    }

    /// Applies a 3x3 matrix to every atom coordinate, in place.
    pub fn rotate(&mut self, matrix: &Matrix3<f64>) {
        self.table.rotate(matrix);
    }

    /// Adds a vector to every atom coordinate, in place.
    pub fn translate(&mut self, shift: &Vector3<f64>) {
        self.table.translate(shift);
    }

    /// Appends a copy of another structure's atoms. This is concatenation,
    /// not a spatial merge.
    pub fn combine(&mut self, other: &Structure) {
        self.table.append(&other.table);
    }

    /// Returns an independent deep copy of this structure.
    pub fn duplicate(&self) -> Structure {
        self.clone()
    }

    /// Root-mean-square deviation against a structure with identical atom
    /// count and ordering.
    ///
    /// The mean runs over every per-axis deviation, so the divisor is
    /// `3 * natoms`, not `natoms`. This differs from the conventional
    /// per-atom-distance RMSD by a factor of `sqrt(3)` and is kept for
    /// compatibility with existing fitting pipelines.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::AtomCountMismatch`] if the two structures
    /// differ in atom count.
    pub fn rmsd(&self, other: &Structure) -> Result<f64, StructureError> {
        let natoms = self.natoms();
        if natoms != other.natoms() {
            return Err(StructureError::AtomCountMismatch {
                left: natoms,
                right: other.natoms(),
            });
        }
        if natoms == 0 {
            return Ok(0.0);
        }
        let mut sum = 0.0;
        for index in 0..natoms {
            let dx = self.table.xs()[index] - other.table.xs()[index];
            let dy = self.table.ys()[index] - other.table.ys()[index];
            let dz = self.table.zs()[index] - other.table.zs()[index];
            sum += dx * dx + dy * dy + dz * dz;
        }
        Ok((sum / (3 * natoms) as f64).sqrt())
    }

    /// Writes the structure, dispatching on the output path's extension.
    ///
    /// The format is resolved before any file is created, so an
    /// unrecognized extension produces no partial output.
    ///
    /// # Errors
    ///
    /// Returns [`CoordError::UnsupportedFormat`] for an unrecognized
    /// extension, or the underlying codec error if writing fails.
    pub fn tofile<P: AsRef<Path>>(&self, path: P) -> Result<(), CoordError> {
        let format = CoordFormat::from_path(path.as_ref())?;
        self.tofile_as(path, format)
    }

    /// Writes the structure in an explicitly chosen format.
    ///
    /// # Errors
    ///
    /// Returns the underlying codec error if writing fails.
    pub fn tofile_as<P: AsRef<Path>>(&self, path: P, format: CoordFormat) -> Result<(), CoordError> {
        match format {
            CoordFormat::Pdb => PdbFile::write_to_path(&self.table, path),
            CoordFormat::Mmcif => CifFile::write_to_path(&self.table, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::table::AtomRecord;
    use tempfile::tempdir;

    fn atom(serial: i32, name: &str, element: &str, chain: &str, position: [f64; 3]) -> AtomRecord {
        AtomRecord {
            serial,
            name: name.to_string(),
            res_name: "ALA".to_string(),
            chain: chain.to_string(),
            res_seq: serial,
            x: position[0],
            y: position[1],
            z: position[2],
            b_factor: serial as f64,
            element: element.to_string(),
            ..AtomRecord::default()
        }
    }

    fn sample_structure() -> Structure {
        let mut table = AtomTable::new();
        table.push(atom(1, "N", "N", "A", [0.0, 0.0, 0.0]));
        table.push(atom(2, "CA", "C", "A", [1.5, 0.0, 0.0]));
        table.push(atom(3, "C", "C", "A", [2.0, 1.0, 0.0]));
        table.push(atom(4, "CA", "C", "B", [0.0, 0.0, 4.0]));
        Structure::from_table(table)
    }

    mod properties {
        use super::*;

        #[test]
        fn coor_returns_positions_in_atom_order() {
            let structure = sample_structure();
            let coor = structure.coor();
            assert_eq!(coor.len(), 4);
            assert_eq!(coor[1], Point3::new(1.5, 0.0, 0.0));
            assert_eq!(coor[3], Point3::new(0.0, 0.0, 4.0));
        }

        #[test]
        fn bfacs_and_atom_numbers_expose_their_columns() {
            let structure = sample_structure();
            assert_eq!(structure.bfacs(), &[1.0, 2.0, 3.0, 4.0]);
            assert_eq!(structure.atom_numbers(), &[1, 2, 3, 4]);
        }

        #[test]
        fn chain_list_is_unique_in_encounter_order() {
            let structure = sample_structure();
            assert_eq!(structure.chain_list(), vec!["A", "B"]);
        }

        #[test]
        fn sequence_keeps_one_residue_name_per_alpha_carbon() {
            let structure = sample_structure();
            assert_eq!(structure.sequence(), vec!["ALA", "ALA"]);
        }

        #[test]
        fn mass_broadcasts_one_lookup_per_distinct_element() {
            let structure = sample_structure();
            let masses = structure.mass(&ElementTable::new()).unwrap();
            assert_eq!(masses, vec![14.007, 12.011, 12.011, 12.011]);
        }

        #[test]
        fn element_symbols_are_case_normalized_before_lookup() {
            let mut table = AtomTable::new();
            table.push(atom(1, "FE", "FE", "A", [0.0, 0.0, 0.0]));
            let structure = Structure::from_table(table);
            let masses = structure.mass(&ElementTable::new()).unwrap();
            assert_eq!(masses, vec![55.845]);
        }

        #[test]
        fn unknown_element_symbol_is_a_hard_error() {
            let mut table = AtomTable::new();
            table.push(atom(1, "Q1", "Xx", "A", [0.0, 0.0, 0.0]));
            let structure = Structure::from_table(table);
            let err = structure.mass(&ElementTable::new()).unwrap_err();
            assert!(matches!(
                err,
                StructureError::UnknownElement { symbol } if symbol == "Xx"
            ));
        }

        #[test]
        fn rvdw_resolves_radii() {
            let structure = sample_structure();
            let radii = structure.rvdw(&ElementTable::new()).unwrap();
            assert_eq!(radii, vec![1.55, 1.70, 1.70, 1.70]);
        }

        #[test]
        fn centre_of_mass_weights_positions_by_mass() {
            let mut table = AtomTable::new();
            table.push(atom(1, "C", "C", "A", [0.0, 0.0, 0.0]));
            table.push(atom(2, "O", "O", "A", [1.0, 0.0, 0.0]));
            let structure = Structure::from_table(table);
            let com = structure.centre_of_mass(&ElementTable::new()).unwrap();
            let expected_x = 15.999 / (12.011 + 15.999);
            assert!((com.x - expected_x).abs() < 1e-12);
            assert_eq!(com.y, 0.0);
            assert_eq!(com.z, 0.0);
        }

        #[test]
        fn centre_of_mass_of_an_empty_structure_is_an_error() {
            let structure = Structure::from_table(AtomTable::new());
            assert!(matches!(
                structure.centre_of_mass(&ElementTable::new()),
                Err(StructureError::Empty)
            ));
        }
    }

    mod transforms {
        use super::*;

        #[test]
        fn duplicate_then_rotate_leaves_the_source_unchanged() {
            let structure = sample_structure();
            let mut copy = structure.duplicate();
            let rot = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
            copy.rotate(&rot);
            assert_eq!(structure.coor()[1], Point3::new(1.5, 0.0, 0.0));
            assert_eq!(copy.coor()[1], Point3::new(0.0, 1.5, 0.0));
        }

        #[test]
        fn rotate_then_translate_matches_the_direct_affine_map() {
            let structure = sample_structure();
            let rot = Matrix3::new(0.8, -0.6, 0.0, 0.6, 0.8, 0.0, 0.0, 0.0, 1.0);
            let shift = Vector3::new(1.0, -2.0, 3.0);

            let mut moved = structure.duplicate();
            moved.rotate(&rot);
            moved.translate(&shift);

            for (before, after) in structure.coor().iter().zip(moved.coor()) {
                let expected = rot * before.coords + shift;
                assert!((after.coords - expected).norm() < 1e-12);
            }
        }

        #[test]
        fn combine_concatenates_and_leaves_the_other_intact() {
            let mut structure = sample_structure();
            let other = sample_structure();
            structure.combine(&other);
            assert_eq!(structure.natoms(), 8);
            assert_eq!(other.natoms(), 4);
            assert_eq!(structure.atom_numbers(), &[1, 2, 3, 4, 1, 2, 3, 4]);
        }
    }

    mod rmsd {
        use super::*;

        #[test]
        fn rmsd_of_a_structure_with_itself_is_zero() {
            let structure = sample_structure();
            assert_eq!(structure.rmsd(&structure).unwrap(), 0.0);
        }

        #[test]
        fn rmsd_divides_by_three_times_the_atom_count() {
            // For a pure translation by v every per-axis deviation is a
            // component of v, so the flat mean is |v|^2 / 3 regardless of
            // the atom count.
            let structure = sample_structure();
            let mut moved = structure.duplicate();
            let shift = Vector3::new(1.0, 2.0, 2.0);
            moved.translate(&shift);
            let expected = (shift.norm_squared() / 3.0).sqrt();
            assert!((structure.rmsd(&moved).unwrap() - expected).abs() < 1e-12);
            assert!((structure.rmsd(&moved).unwrap() - 3.0f64.sqrt()).abs() < 1e-12);
        }

        #[test]
        fn rmsd_requires_matching_atom_counts() {
            let structure = sample_structure();
            let mut bigger = structure.duplicate();
            bigger.combine(&structure);
            assert!(matches!(
                structure.rmsd(&bigger),
                Err(StructureError::AtomCountMismatch { left: 4, right: 8 })
            ));
        }
    }

    mod files {
        use super::*;

        #[test]
        fn pdb_write_and_read_round_trip() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("sample.pdb");
            let structure = sample_structure();
            structure.tofile(&path).unwrap();
            let reread = Structure::from_path(&path).unwrap();
            assert_eq!(structure.natoms(), reread.natoms());
            assert_eq!(structure.coor(), reread.coor());
            assert_eq!(structure.table().chains(), reread.table().chains());
            assert_eq!(structure.table().res_seqs(), reread.table().res_seqs());
        }

        #[test]
        fn cif_write_and_read_round_trip() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("sample.cif");
            let structure = sample_structure();
            structure.tofile(&path).unwrap();
            let reread = Structure::from_path(&path).unwrap();
            assert_eq!(structure.natoms(), reread.natoms());
            assert_eq!(structure.coor(), reread.coor());
        }

        #[test]
        fn explicit_format_overrides_the_extension() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("looks_like.pdb");
            sample_structure()
                .tofile_as(&path, CoordFormat::Mmcif)
                .unwrap();
            let text = std::fs::read_to_string(&path).unwrap();
            assert!(text.starts_with("data_"));
        }

        #[test]
        fn unrecognized_read_extension_is_rejected() {
            assert!(matches!(
                Structure::from_path("model.xyz"),
                Err(CoordError::UnsupportedFormat { .. })
            ));
        }

        #[test]
        fn unrecognized_write_extension_produces_no_file() {
            let dir = tempdir().unwrap();
            let path = dir.path().join("out.xyz");
            let err = sample_structure().tofile(&path).unwrap_err();
            assert!(matches!(err, CoordError::UnsupportedFormat { .. }));
            assert!(!path.exists());
        }
    }
}
