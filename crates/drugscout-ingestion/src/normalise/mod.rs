//! Gene symbol normalisation.

pub mod hgnc;

pub use hgnc::GeneSymbolSet;
