pub mod quote;
pub mod series;
pub mod table;

pub use quote::QuotePoint;
pub use series::{QuoteSeries, SeriesOutcome};
pub use table::MergedTable;
