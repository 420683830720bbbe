pub mod cell;
pub mod error_class;
pub mod table;

pub use cell::{CellValue, SENTINEL};
pub use error_class::ErrorClass;
pub use table::Table;
