use nalgebra::{Matrix3, Point3, Vector3};

/// Distinguishes standard polymer atoms from heterogen atoms.
///
/// The distinction mirrors the `ATOM`/`HETATM` record tags of the PDB
/// format and controls `TER` insertion when writing: a chain break is only
/// terminated after a run of `Atom` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    /// A standard polymer atom (`ATOM` record).
    #[default]
    Atom,
    /// A heterogen atom (`HETATM` record): ligands, ions, waters.
    Hetatm,
}

impl RecordKind {
    /// The fixed-width 6-character PDB record tag.
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM  ",
            RecordKind::Hetatm => "HETATM",
        }
    }

    /// The trimmed label used in whitespace-tokenized formats (mmCIF `group_PDB`).
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Atom => "ATOM",
            RecordKind::Hetatm => "HETATM",
        }
    }
}

/// One atom row in its owned, record-oriented form.
///
/// `AtomRecord` is the unit of exchange with [`AtomTable`]: readers build
/// rows and push them, `AtomTable::row` hands a copy back out. The table
/// itself stores the same fields column-oriented.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub record: RecordKind,
    /// Atom serial number.
    pub serial: i32,
    /// Atom name, stored trimmed (e.g. "CA", "OXT").
    pub name: String,
    /// Alternate-location code, raw one-character column.
    pub alt_loc: String,
    /// Residue name, stored trimmed (e.g. "GLY").
    pub res_name: String,
    /// Chain identifier.
    pub chain: String,
    /// Residue sequence number.
    pub res_seq: i32,
    /// Insertion code, raw one-character column.
    pub insert_code: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub occupancy: f64,
    /// Isotropic temperature factor.
    pub b_factor: f64,
    /// Element symbol, stored trimmed (e.g. "C", "FE").
    pub element: String,
    /// Formal charge, kept as text (e.g. "2+", may be empty).
    pub charge: String,
    /// Model number the atom belongs to.
    pub model: i32,
}

impl Default for AtomRecord {
    fn default() -> Self {
        Self {
            record: RecordKind::Atom,
            serial: 0,
            name: String::new(),
            alt_loc: String::new(),
            res_name: String::new(),
            chain: String::new(),
            res_seq: 0,
            insert_code: String::new(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            occupancy: 1.0,
            b_factor: 0.0,
            element: String::new(),
            charge: String::new(),
            model: 1,
        }
    }
}

/// Column-oriented storage for an ordered sequence of atom records.
///
/// Every field of [`AtomRecord`] is kept in its own vector; all columns
/// always have identical length. The fields are private so the only way
/// to grow the table is [`AtomTable::push`] / [`AtomTable::append`], which
/// write every column in lockstep.
///
/// Atoms belonging to the same model are expected to be stored
/// contiguously, in non-decreasing model order; the PDB writer checks this
/// when it splits the table into model blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomTable {
    record: Vec<RecordKind>,
    serial: Vec<i32>,
    name: Vec<String>,
    alt_loc: Vec<String>,
    res_name: Vec<String>,
    chain: Vec<String>,
    res_seq: Vec<i32>,
    insert_code: Vec<String>,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    occupancy: Vec<f64>,
    b_factor: Vec<f64>,
    element: Vec<String>,
    charge: Vec<String>,
    model: Vec<i32>,
}

impl AtomTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `capacity` atoms per column.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            record: Vec::with_capacity(capacity),
            serial: Vec::with_capacity(capacity),
            name: Vec::with_capacity(capacity),
            alt_loc: Vec::with_capacity(capacity),
            res_name: Vec::with_capacity(capacity),
            chain: Vec::with_capacity(capacity),
            res_seq: Vec::with_capacity(capacity),
            insert_code: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
            occupancy: Vec::with_capacity(capacity),
            b_factor: Vec::with_capacity(capacity),
            element: Vec::with_capacity(capacity),
            charge: Vec::with_capacity(capacity),
            model: Vec::with_capacity(capacity),
        }
    }

    /// Number of atoms in the table.
    pub fn len(&self) -> usize {
        self.serial.len()
    }

    /// Returns `true` if the table holds no atoms.
    pub fn is_empty(&self) -> bool {
        self.serial.is_empty()
    }

    /// Appends one atom row, writing every column.
    pub fn push(&mut self, row: AtomRecord) {
        self.record.push(row.record);
        self.serial.push(row.serial);
        self.name.push(row.name);
        self.alt_loc.push(row.alt_loc);
        self.res_name.push(row.res_name);
        self.chain.push(row.chain);
        self.res_seq.push(row.res_seq);
        self.insert_code.push(row.insert_code);
        self.x.push(row.x);
        self.y.push(row.y);
        self.z.push(row.z);
        self.occupancy.push(row.occupancy);
        self.b_factor.push(row.b_factor);
        self.element.push(row.element);
        self.charge.push(row.charge);
        self.model.push(row.model);
    }

    /// Returns an owned copy of row `index`, or `None` past the end.
    pub fn row(&self, index: usize) -> Option<AtomRecord> {
        if index >= self.len() {
            return None;
        }
        Some(AtomRecord {
            record: self.record[index],
            serial: self.serial[index],
            name: self.name[index].clone(),
            alt_loc: self.alt_loc[index].clone(),
            res_name: self.res_name[index].clone(),
            chain: self.chain[index].clone(),
            res_seq: self.res_seq[index],
            insert_code: self.insert_code[index].clone(),
            x: self.x[index],
            y: self.y[index],
            z: self.z[index],
            occupancy: self.occupancy[index],
            b_factor: self.b_factor[index],
            element: self.element[index].clone(),
            charge: self.charge[index].clone(),
            model: self.model[index],
        })
    }

    pub fn records(&self) -> &[RecordKind] {
        &self.record
    }

    pub fn serials(&self) -> &[i32] {
        &self.serial
    }

    pub fn names(&self) -> &[String] {
        &self.name
    }

    pub fn alt_locs(&self) -> &[String] {
        &self.alt_loc
    }

    pub fn res_names(&self) -> &[String] {
        &self.res_name
    }

    pub fn chains(&self) -> &[String] {
        &self.chain
    }

    pub fn res_seqs(&self) -> &[i32] {
        &self.res_seq
    }

    pub fn insert_codes(&self) -> &[String] {
        &self.insert_code
    }

    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    pub fn zs(&self) -> &[f64] {
        &self.z
    }

    pub fn occupancies(&self) -> &[f64] {
        &self.occupancy
    }

    pub fn b_factors(&self) -> &[f64] {
        &self.b_factor
    }

    pub fn elements(&self) -> &[String] {
        &self.element
    }

    pub fn charges(&self) -> &[String] {
        &self.charge
    }

    pub fn models(&self) -> &[i32] {
        &self.model
    }

    /// Position of atom `index`, or `None` past the end.
    pub fn position(&self, index: usize) -> Option<Point3<f64>> {
        if index >= self.len() {
            return None;
        }
        Some(Point3::new(self.x[index], self.y[index], self.z[index]))
    }

    /// Overwrites the position of atom `index`. Out-of-range indices are ignored.
    pub fn set_position(&mut self, index: usize, position: Point3<f64>) {
        if index < self.len() {
            self.x[index] = position.x;
            self.y[index] = position.y;
            self.z[index] = position.z;
        }
    }

    /// Applies a 3x3 matrix to every atom coordinate, in place.
    pub fn rotate(&mut self, matrix: &Matrix3<f64>) {
        for index in 0..self.len() {
            let rotated = matrix * Vector3::new(self.x[index], self.y[index], self.z[index]);
            self.x[index] = rotated.x;
            self.y[index] = rotated.y;
            self.z[index] = rotated.z;
        }
    }

    /// Adds a vector to every atom coordinate, in place.
    pub fn translate(&mut self, shift: &Vector3<f64>) {
        for index in 0..self.len() {
            self.x[index] += shift.x;
            self.y[index] += shift.y;
            self.z[index] += shift.z;
        }
    }

    /// Appends a copy of every row of `other` to this table.
    pub fn append(&mut self, other: &AtomTable) {
        self.record.extend_from_slice(&other.record);
        self.serial.extend_from_slice(&other.serial);
        self.name.extend_from_slice(&other.name);
        self.alt_loc.extend_from_slice(&other.alt_loc);
        self.res_name.extend_from_slice(&other.res_name);
        self.chain.extend_from_slice(&other.chain);
        self.res_seq.extend_from_slice(&other.res_seq);
        self.insert_code.extend_from_slice(&other.insert_code);
        self.x.extend_from_slice(&other.x);
        self.y.extend_from_slice(&other.y);
        self.z.extend_from_slice(&other.z);
        self.occupancy.extend_from_slice(&other.occupancy);
        self.b_factor.extend_from_slice(&other.b_factor);
        self.element.extend_from_slice(&other.element);
        self.charge.extend_from_slice(&other.charge);
        self.model.extend_from_slice(&other.model);
    }
}
