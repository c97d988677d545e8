//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Streaming reader over replay script operations

pub mod csv_format;
pub mod sync_reader;

pub use csv_format::{
    convert_operation_record, write_accounts_csv, write_history_csv, Operation, OperationRecord,
};
pub use sync_reader::OperationReader;
