//! Generation of periodic-maintenance inspection sheets as fillable PDFs.
//!
//! Given an installation and a selected maintenance frequency, the library
//! filters the installation's activities with inclusive-frequency semantics,
//! renders them into an HTML template and converts the result into a PDF
//! with interactive form fields (one radio group of outcomes plus one note
//! field per activity row). Installations and clients live in a local JSON
//! document store.

pub mod filter;
pub mod generator;
pub mod models;
pub mod store;

pub use crate::filter::{available_frequencies, filter_by_frequency};
pub use crate::generator::{GeneratedSheet, GeneratorError, PdfBackend, SheetGenerator};
pub use crate::models::{
    Activity, Client, Frequency, FrequencyUnit, Installation, InvalidFrequency, MaintenanceDb,
    Regulation,
};
pub use crate::store::{JsonStore, StoreError, DEFAULT_DB_FILE};
