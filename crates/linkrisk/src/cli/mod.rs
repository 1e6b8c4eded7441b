pub mod check;
pub mod config;
pub mod doctor;
pub mod last;

/// Exit code for configuration and I/O failures, distinct from risk levels.
pub const EXIT_ERROR: i32 = 3;
