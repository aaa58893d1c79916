//! Simplified mmCIF reader and writer, restricted to the `_atom_site` loop.
//!
//! The reader is not a general CIF parser: `_atom_site.<name>` lines
//! declare columns in encounter order, and every line starting with `ATOM`
//! is whitespace-tokenized and zipped positionally against the declared
//! names. Data rows are assumed to follow the declaration order; a
//! mismatch silently misassigns fields.

use crate::io::error::{CoordError, ParseErrorKind};
use crate::io::traits::CoordFile;
use crate::models::table::{AtomRecord, AtomTable, RecordKind};
use std::io::{BufRead, Write};

/// Raw `_atom_site` loop: declared column names in order, with the string
/// tokens collected for each.
///
/// Unrecognized columns are retained here even though the conversion to
/// [`AtomTable`] ignores them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomSiteLoop {
    columns: Vec<(String, Vec<String>)>,
}

impl AtomSiteLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the next column name, in loop-header order.
    pub fn declare(&mut self, name: &str) {
        self.columns.push((name.to_string(), Vec::new()));
    }

    /// Assigns one data row's tokens to the declared columns positionally.
    /// The shorter of the two sequences wins; nothing is validated.
    pub fn push_row<'a>(&mut self, tokens: impl Iterator<Item = &'a str>) {
        for ((_, values), token) in self.columns.iter_mut().zip(tokens) {
            values.push(token.to_string());
        }
    }

    /// The tokens of one declared column, or `None` if it was never declared.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Declared column names, in encounter order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }
}

/// Scans a reader for the `_atom_site` declarations and `ATOM` data rows.
///
/// # Errors
///
/// Returns an error if the underlying reader fails.
pub fn read_atom_site(reader: &mut impl BufRead) -> Result<AtomSiteLoop, CoordError> {
    let mut site = AtomSiteLoop::new();
    for line_res in reader.lines() {
        let line = line_res?;
        if let Some(name) = line.strip_prefix("_atom_site.") {
            site.declare(name.trim());
        } else if line.starts_with("ATOM") {
            site.push_row(line.split_whitespace());
        }
    }
    Ok(site)
}

fn required<'a>(site: &'a AtomSiteLoop, name: &'static str) -> Result<&'a [String], CoordError> {
    site.column(name).ok_or(CoordError::MissingColumn {
        name: name.to_string(),
    })
}

fn token(column: &[String], row: usize) -> &str {
    column.get(row).map(String::as_str).unwrap_or("")
}

fn convert_int(column: &[String], row: usize, field: &'static str) -> Result<i32, CoordError> {
    let value = token(column, row);
    value.parse().map_err(|_| CoordError::Convert {
        row: row + 1,
        kind: ParseErrorKind::InvalidInt {
            field,
            value: value.into(),
        },
    })
}

fn convert_float(column: &[String], row: usize, field: &'static str) -> Result<f64, CoordError> {
    let value = token(column, row);
    value.parse().map_err(|_| CoordError::Convert {
        row: row + 1,
        kind: ParseErrorKind::InvalidFloat {
            field,
            value: value.into(),
        },
    })
}

/// Converts a raw `_atom_site` loop into the unified atom table.
///
/// Only the fixed set of recognized column names is mapped; the record
/// kind is always [`RecordKind::Atom`] on this path, so the `HETATM`
/// distinction does not survive an mmCIF read.
///
/// # Errors
///
/// Returns [`CoordError::MissingColumn`] if a mapped column was never
/// declared, or [`CoordError::Convert`] if a numeric token fails to coerce.
pub fn table_from_atom_site(site: &AtomSiteLoop) -> Result<AtomTable, CoordError> {
    let serials = required(site, "id")?;
    let names = required(site, "label_atom_id")?;
    let res_names = required(site, "label_comp_id")?;
    let chains = required(site, "label_asym_id")?;
    let res_seqs = required(site, "label_seq_id")?;
    let xs = required(site, "Cartn_x")?;
    let ys = required(site, "Cartn_y")?;
    let zs = required(site, "Cartn_z")?;
    let occupancies = required(site, "occupancy")?;
    let b_factors = required(site, "B_iso_or_equiv")?;
    let elements = required(site, "type_symbol")?;
    let charges = required(site, "pdbx_formal_charge")?;
    let models = required(site, "pdbx_PDB_model_num")?;

    let natoms = serials.len();
    let mut table = AtomTable::with_capacity(natoms);
    for row in 0..natoms {
        table.push(AtomRecord {
            record: RecordKind::Atom,
            serial: convert_int(serials, row, "id")?,
            name: token(names, row).to_string(),
            alt_loc: String::new(),
            res_name: token(res_names, row).to_string(),
            chain: token(chains, row).to_string(),
            res_seq: convert_int(res_seqs, row, "label_seq_id")?,
            insert_code: String::new(),
            x: convert_float(xs, row, "Cartn_x")?,
            y: convert_float(ys, row, "Cartn_y")?,
            z: convert_float(zs, row, "Cartn_z")?,
            occupancy: convert_float(occupancies, row, "occupancy")?,
            b_factor: convert_float(b_factors, row, "B_iso_or_equiv")?,
            element: token(elements, row).to_string(),
            charge: token(charges, row).to_string(),
            model: convert_int(models, row, "pdbx_PDB_model_num")?,
        });
    }
    Ok(table)
}

const ATOM_SITE_COLUMNS: [&str; 16] = [
    "group_PDB",
    "id",
    "label_atom_id",
    "label_alt_id",
    "label_comp_id",
    "label_asym_id",
    "label_seq_id",
    "pdbx_PDB_ins_code",
    "Cartn_x",
    "Cartn_y",
    "Cartn_z",
    "occupancy",
    "B_iso_or_equiv",
    "type_symbol",
    "pdbx_formal_charge",
    "pdbx_PDB_model_num",
];

fn cif_text(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() { "." } else { trimmed }
}

/// The simplified mmCIF codec.
pub struct CifFile;

impl CoordFile for CifFile {
    fn read_from(reader: &mut impl BufRead) -> Result<AtomTable, CoordError> {
        let site = read_atom_site(reader)?;
        table_from_atom_site(&site)
    }

    fn write_to(table: &AtomTable, writer: &mut impl Write) -> Result<(), CoordError> {
        writeln!(writer, "data_densfit")?;
        writeln!(writer, "#")?;
        writeln!(writer, "loop_")?;
        for name in ATOM_SITE_COLUMNS {
            writeln!(writer, "_atom_site.{name}")?;
        }
        for index in 0..table.len() {
            writeln!(
                writer,
                "{} {} {} {} {} {} {} {} {:.3} {:.3} {:.3} {:.2} {:.2} {} {} {}",
                table.records()[index].label(),
                table.serials()[index],
                cif_text(&table.names()[index]),
                cif_text(&table.alt_locs()[index]),
                cif_text(&table.res_names()[index]),
                cif_text(&table.chains()[index]),
                table.res_seqs()[index],
                cif_text(&table.insert_codes()[index]),
                table.xs()[index],
                table.ys()[index],
                table.zs()[index],
                table.occupancies()[index],
                table.b_factors()[index],
                cif_text(&table.elements()[index]),
                cif_text(&table.charges()[index]),
                table.models()[index],
            )?;
        }
        writeln!(writer, "#")?;
        Ok(())
    }
}
