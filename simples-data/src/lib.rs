//! CSV loaders for annex bracket tables and batches of calculation requests.

mod annex_tables;
pub mod requests;

pub use annex_tables::{AnnexTableLoader, AnnexTableLoaderError, AnnexTableRecord};
pub use requests::RequestLoadError;
