//! Fixed-width PDB reader and writer.
//!
//! The reader scans the 6-character record tag of every line: `ATOM  ` /
//! `HETATM` rows are sliced at the canonical byte offsets, `MODEL ` lines
//! update the model number applied to subsequent atoms, everything else is
//! ignored. The writer reconstructs the same fixed layout, splitting the
//! table into contiguous model blocks and inserting `TER` records at chain
//! boundaries.

use crate::io::error::{CoordError, ParseErrorKind};
use crate::io::traits::CoordFile;
use crate::models::table::{AtomRecord, AtomTable, RecordKind};
use std::io::{BufRead, Write};
use std::ops::Range;

fn slice(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("")
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    slice(line, start, end).trim()
}

fn parse_int(value: &str, field: &'static str, line: usize) -> Result<i32, CoordError> {
    value.parse().map_err(|_| CoordError::Parse {
        line,
        kind: ParseErrorKind::InvalidInt {
            field,
            value: value.into(),
        },
    })
}

fn parse_float(value: &str, field: &'static str, line: usize) -> Result<f64, CoordError> {
    value.parse().map_err(|_| CoordError::Parse {
        line,
        kind: ParseErrorKind::InvalidFloat {
            field,
            value: value.into(),
        },
    })
}

/// Splits the table into contiguous runs of equal model number.
///
/// Multi-model output requires all runs to have the same length; a table
/// that is not partitioned into equal-sized blocks cannot be written back
/// as a well-formed multi-model file.
///
/// # Errors
///
/// Returns [`CoordError::UnevenModelBlocks`] if two runs differ in size.
pub fn model_blocks(table: &AtomTable) -> Result<Vec<Range<usize>>, CoordError> {
    let models = table.models();
    let mut blocks: Vec<Range<usize>> = Vec::new();
    let mut start = 0;
    for index in 1..=models.len() {
        if index == models.len() || models[index] != models[start] {
            blocks.push(start..index);
            start = index;
        }
    }
    if let Some(first) = blocks.first() {
        let expected = first.len();
        for block in &blocks[1..] {
            if block.len() != expected {
                return Err(CoordError::UnevenModelBlocks {
                    model: models[block.start],
                    expected,
                    found: block.len(),
                });
            }
        }
    }
    Ok(blocks)
}

/// The fixed-width PDB codec.
pub struct PdbFile;

impl CoordFile for PdbFile {
    fn read_from(reader: &mut impl BufRead) -> Result<AtomTable, CoordError> {
        let mut table = AtomTable::new();
        let mut model_number = 1;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice(&line, 0, 6) {
                tag @ ("ATOM  " | "HETATM") => {
                    let record = if tag == "ATOM  " {
                        RecordKind::Atom
                    } else {
                        RecordKind::Hetatm
                    };
                    let name = slice_and_trim(&line, 12, 16).to_string();
                    // Be forgiving when the element column is blank: fall
                    // back to the first alphabetic character of the name.
                    let mut element = slice_and_trim(&line, 76, 78).to_string();
                    if element.is_empty() {
                        element = name
                            .chars()
                            .find(|c| c.is_alphabetic())
                            .map(|c| c.to_string())
                            .unwrap_or_default();
                    }
                    table.push(AtomRecord {
                        record,
                        serial: parse_int(slice_and_trim(&line, 6, 11), "serial", line_num)?,
                        name,
                        alt_loc: slice(&line, 16, 17).to_string(),
                        res_name: slice_and_trim(&line, 17, 20).to_string(),
                        chain: slice(&line, 21, 22).to_string(),
                        res_seq: parse_int(slice_and_trim(&line, 22, 26), "resi", line_num)?,
                        insert_code: slice(&line, 26, 27).to_string(),
                        x: parse_float(slice_and_trim(&line, 30, 38), "x", line_num)?,
                        y: parse_float(slice_and_trim(&line, 38, 46), "y", line_num)?,
                        z: parse_float(slice_and_trim(&line, 46, 54), "z", line_num)?,
                        occupancy: parse_float(slice_and_trim(&line, 54, 60), "occupancy", line_num)?,
                        b_factor: parse_float(slice_and_trim(&line, 60, 66), "b-factor", line_num)?,
                        element,
                        charge: slice_and_trim(&line, 78, 80).to_string(),
                        model: model_number,
                    });
                }
                "MODEL " => {
                    model_number = parse_int(slice_and_trim(&line, 10, 14), "model", line_num)?;
                }
                _ => {}
            }
        }
        Ok(table)
    }

    fn write_to(table: &AtomTable, writer: &mut impl Write) -> Result<(), CoordError> {
        let blocks = model_blocks(table)?;
        let multi_model = blocks.len() > 1;

        for (block_index, block) in blocks.iter().enumerate() {
            if multi_model {
                writeln!(writer, "MODEL     {:>4}", block_index + 1)?;
            }
            let mut prev_chain = &table.chains()[block.start];
            for index in block.clone() {
                let chain = &table.chains()[index];
                if chain != prev_chain {
                    // A chain break terminates the previous chain only if
                    // it ended on a polymer atom.
                    if table.records()[index - 1] == RecordKind::Atom {
                        writeln!(
                            writer,
                            "TER   {:>5}      {:<3} {:<1}{:>4}{:<1}{:53}",
                            table.serials()[index - 1] + 1,
                            table.res_names()[index - 1],
                            table.chains()[index - 1],
                            table.res_seqs()[index - 1],
                            table.insert_codes()[index - 1],
                            ""
                        )?;
                    }
                    prev_chain = chain;
                }

                let element = &table.elements()[index];
                let name = &table.names()[index];
                // One-letter elements start their name in column 14 unless
                // the name already fills all four columns.
                let name = if element.len() == 1 && name.len() != 4 {
                    format!(" {name}")
                } else {
                    name.clone()
                };
                writeln!(
                    writer,
                    "{:<6}{:>5} {:<4}{:<1}{:<3} {:<1}{:>4}{:<1}   \
                     {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}          {:<2}{:<2}",
                    table.records()[index].tag(),
                    table.serials()[index],
                    name,
                    table.alt_locs()[index],
                    table.res_names()[index],
                    table.chains()[index],
                    table.res_seqs()[index],
                    table.insert_codes()[index],
                    table.xs()[index],
                    table.ys()[index],
                    table.zs()[index],
                    table.occupancies()[index],
                    table.b_factors()[index],
                    element,
                    table.charges()[index],
                )?;
            }
            if multi_model {
                writeln!(writer, "ENDMDL")?;
            }
        }
        writeln!(writer, "END   ")?;
        Ok(())
    }
}
