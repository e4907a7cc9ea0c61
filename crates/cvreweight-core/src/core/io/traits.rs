use crate::core::field::ScalarField;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing serialized scalar fields.
///
/// Implementors handle format-specific parsing and serialization; the path helpers
/// wrap them in buffered file handles.
pub trait GridFieldFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a field (axes plus one value per bin) from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is malformed or the number of values does not
    /// match the declared bin count.
    fn read_from(reader: &mut impl BufRead) -> Result<ScalarField, Self::Error>;

    /// Writes a field in a fixed traversal order so that reading it back reproduces
    /// the same bins.
    fn write_to(field: &ScalarField, writer: &mut impl Write) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ScalarField, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(field: &ScalarField, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(field, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
