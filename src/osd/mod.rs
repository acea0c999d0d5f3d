pub mod catalog;
pub mod field;
pub mod fields;
pub mod grid;
pub mod stats;
pub mod symbol;
pub mod warnings;

pub use catalog::Catalog;
pub use field::{Definition, FieldDefinition, Preview, PreviewContext, PreviewHints, Sprite};
pub use grid::Grid;
