pub mod clean;
pub mod coerce;
pub mod error;
pub mod rules;
pub mod table;

pub use clean::{clean, Clean, Cleaner, DEFAULT_EXCHANGE_RATE};
pub use error::{CleanError, InvalidInputKind};
pub use rules::{DirtyPatterns, Rejected};
pub use table::{CleanTable, RawTable};
