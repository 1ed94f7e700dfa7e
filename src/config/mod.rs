//! configuration
pub mod options;
pub mod validate;

pub use options::{CONFIG_FILE_NAME, FinderCfg, HttpConfig, LoggingConfig, LoggingFormat};
