//! the console application
pub mod cli;
pub mod console;
pub mod core;
pub mod logging;

pub use core::FinderApp;
