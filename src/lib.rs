pub mod analyzer;
pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod path_utils;
pub mod project;
pub mod scanner;
pub mod source_fs;
pub mod state;
pub mod store;

#[cfg(test)]
mod test_fixtures;

pub use error::{DocDoctorError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PROBLEMS_FOUND: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
