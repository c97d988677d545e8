//! Streaming reader for replay scripts
//!
//! Provides an iterator over [`Operation`]s read from CSV. Delegates CSV format
//! concerns to the csv_format module.
//!
//! ```no_run
//! use pin_ledger::io::OperationReader;
//! use std::path::Path;
//!
//! let reader = OperationReader::from_path(Path::new("script.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(operation) => println!("Applying: {:?}", operation),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from the constructors
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::{convert_operation_record, Operation, OperationRecord};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV operation reader
///
/// Reads one record at a time; memory use does not grow with the script size.
#[derive(Debug)]
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
    line_num: usize,
}

impl OperationReader<File> {
    /// Open a script file
    ///
    /// # Returns
    ///
    /// * `Ok(OperationReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> OperationReader<R> {
    /// Read a script from any source
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing columns may be omitted)
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(source);

        Self {
            reader,
            line_num: 0,
        }
    }
}

impl<R: Read> Iterator for OperationReader<R> {
    type Item = Result<Operation, String>;

    /// Get the next operation
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Operation))` - Successfully parsed record
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of input reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<OperationRecord>();

        let result = deserializer.next()?;
        self.line_num += 1;
        // Line 1 is the header
        let line = self.line_num + 1;

        Some(match result {
            Ok(record) => convert_operation_record(record).map_err(|e| format!("Line {}: {}", line, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}
