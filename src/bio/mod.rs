pub mod catalog;
pub mod taxonomy;

pub use catalog::{CatalogSchema, Record};
pub use taxonomy::{DescendantSet, TaxonId, TaxonomyGraph};
