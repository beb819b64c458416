pub mod html;

pub use html::{report_file_name, write_report, WrittenReport};
