pub mod date;
pub mod loader;
pub mod record;

pub use date::{parse_as_of, parse_date};
pub use loader::{load_records, parse_records};
pub use record::EscrowRecord;
