//! Data module - result table loading, aggregation and reshaping

mod loader;
mod processor;
mod schema;

pub use loader::{DataLoader, LoadedTables};
pub use processor::{DataProcessor, GroupedTotals, LongTable, ProcessorError};
pub use schema::{ResultTable, DELAY_CAUSES};
