use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading or writing coordinate files.
#[derive(Debug, Error)]
pub enum CoordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A fixed-width numeric column failed to parse. The whole parse is
    /// aborted; no partial table is returned.
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
    /// A numeric mmCIF token failed to coerce during conversion to the
    /// atom table. `row` is the 1-based data-row ordinal, not a file line.
    #[error("Conversion error in atom-site row {row}: {kind}")]
    Convert { row: usize, kind: ParseErrorKind },
    #[error("Unrecognized coordinate format for '{path}'", path = path.display())]
    UnsupportedFormat { path: PathBuf },
    /// The mmCIF conversion referenced an `_atom_site` column that was
    /// never declared in the loop header.
    #[error("Missing `_atom_site.{name}` column in mmCIF input")]
    MissingColumn { name: String },
    /// The atom table is not partitioned into equal-sized contiguous
    /// model blocks, so it cannot be written as a multi-model PDB file.
    #[error("Uneven model blocks: model {model} holds {found} atoms, expected {expected}")]
    UnevenModelBlocks {
        model: i32,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum ParseErrorKind {
    #[error("invalid integer in {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("invalid float in {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
}
