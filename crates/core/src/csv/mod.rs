//! CSV exchange: lead import and export, payment import.
//!
//! # Modules
//!
//! - `reader` - Quote-aware CSV reader
//! - `import` - Mapping rows to leads and payments
//! - `export` - Lead export

pub mod export;
pub mod import;
pub mod reader;

pub use export::{LEAD_EXPORT_HEADERS, export_leads};
pub use import::{
    LEAD_IMPORT_COLUMNS, LeadImport, PAYMENT_IMPORT_COLUMNS, PaymentImport, import_leads,
    import_payments, parse_payment_date,
};
pub use reader::{CsvRow, CsvTable};

use leadflow_shared::AppError;
use thiserror::Error;

/// Errors that reject a whole import.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CsvError {
    /// The header lacks required columns.
    #[error("CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

impl From<CsvError> for AppError {
    fn from(err: CsvError) -> Self {
        Self::Validation(err.to_string())
    }
}
