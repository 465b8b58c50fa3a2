pub mod files;
pub mod records;
pub mod store;

pub use files::{atomic_write, ensure_data_dir, init_local_dir, log_dir, report_file};
pub use store::Store;
