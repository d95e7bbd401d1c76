pub mod check;
mod context;
pub mod file;
pub mod init;
pub mod problems;

pub use check::{run_check, run_check_impl};
pub use file::{run_file, run_file_impl};
pub use init::{run_init, run_init_impl};
pub use problems::{run_problems, run_problems_impl};
