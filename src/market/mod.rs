pub mod config;
pub mod types;
pub mod validate;

pub use config::{ConventionTable, DeltaConvention};
pub use types::{MarketQuoteSet, QuoteWarning, ValidatedQuoteSet};
pub use validate::validate_quote_set;
