pub mod payments;

pub use payments::{
    export_file_name, format_amount, upcoming_payments_csv, write_upcoming_payments_csv,
    CSV_HEADERS,
};
