pub mod csv_file;
pub mod error;
pub mod postgres;
pub mod sheets;
pub mod sink;

pub use csv_file::CsvSink;
pub use error::LoadError;
pub use postgres::PostgresSink;
pub use sheets::SheetsSink;
pub use sink::{save_all, SaveSummary, Sink, SinkOutcome};
