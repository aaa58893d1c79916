use crate::io::error::CoordError;
use crate::models::table::AtomTable;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Common interface of the coordinate file codecs.
///
/// Implementors parse from and serialize to one format; the path helpers
/// take care of opening and closing the underlying file. File handles are
/// scoped: they are dropped (and thus released) on every exit path,
/// including parse failure.
pub trait CoordFile {
    /// Reads an atom table from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<AtomTable, CoordError>;

    /// Writes an atom table to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or I/O operations encounter issues.
    fn write_to(table: &AtomTable, writer: &mut impl Write) -> Result<(), CoordError>;

    /// Reads an atom table from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<AtomTable, CoordError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes an atom table to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(table: &AtomTable, path: P) -> Result<(), CoordError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(table, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
