pub mod chart;
pub mod config;
pub mod error;
pub mod estimate;
pub mod export;
pub mod ingestion;
pub mod logging;
pub mod query;
pub mod record;
pub mod session;

pub use error::{IngestError, Result};
pub use ingestion::{parse, ParseOutcome, RowError};
pub use query::{process, QueryKind, QueryResult};
pub use record::Record;
pub use session::Session;
