//! File formats.
//!
//! - [`instance_file`]: problem instances (read and write)
//! - [`hapset_file`]: `HAPset_for_<n>.txt` pattern files and [`FileHapTable`]
//! - [`report`]: the plain-text solution report

pub mod hapset_file;
pub mod instance_file;
pub mod report;

pub use hapset_file::{hapset_file_name, parse_hapset, FileHapTable};
pub use instance_file::{
    instance_file_name, parse_instance, read_instance, save_instance, write_instance,
};
pub use report::{report_file_name, save_report, write_report};
