//! Bulk Order Ingest - turns raw address rows into validated records.
//!
//! Ingestion is all-or-nothing: the first row that fails validation rejects
//! the whole batch, so no order is attempted from a malformed input file.
//!
//! # Example
//!
//! ```rust
//! use bulkorder_core::MemoryReporter;
//! use bulkorder_ingest::ingest_reader;
//!
//! let csv = "first_name,last_name,email,street_address,city,state,zip_code\n\
//!            Jo,Li,,1 Elm,Metropolis,NY,10001\n";
//! let reporter = MemoryReporter::new();
//! let records = ingest_reader(csv.as_bytes(), &reporter).unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].shipping_first_name(), "Jo");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod reader;
pub mod record;
pub mod validator;

// Re-export commonly used types
pub use error::{IngestError, Result};
pub use reader::{ingest_file, ingest_reader, ingest_rows};
pub use record::{AddressRecord, RawRow, RecordField};
pub use validator::validate_row;
