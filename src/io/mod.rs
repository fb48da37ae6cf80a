pub mod load;
pub mod report;

pub use load::{LoadError, load_path, parse_records};
pub use report::{REPORT_HEADER, report_to_string, write_report};
