//! logging stuff
use {
    crate::config::{LoggingConfig, LoggingFormat},
    color_eyre::Result,
    tracing::{info, level_filters::LevelFilter, subscriber},
    tracing_subscriber::FmtSubscriber,
};

/// setup logging
pub fn setup(cfg: &LoggingConfig) -> Result<()> {
    if !cfg.enable {
        return Ok(());
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(string_to_level_filter(&cfg.level))
        .with_ansi(cfg.ansi)
        .with_line_number(cfg.line_numbers)
        .with_target(cfg.event_targets)
        .with_writer(std::io::stderr);

    match cfg.format {
        LoggingFormat::Pretty => {
            subscriber::set_global_default(subscriber.pretty().finish())?;
        }
        LoggingFormat::Compact => {
            subscriber::set_global_default(subscriber.compact().finish())?;
        }
    }

    info!("Logging setup successfully");
    Ok(())
}

/// convert a string to a level filter, unknown strings only let errors through
pub fn string_to_level_filter(lvl: &str) -> LevelFilter {
    match lvl.to_lowercase().as_str() {
        "d" | "debug" | "dbg" => LevelFilter::DEBUG,
        "t" | "trace" | "trc" => LevelFilter::TRACE,
        "e" | "error" | "err" => LevelFilter::ERROR,
        "i" | "info" | "inf" => LevelFilter::INFO,
        "w" | "warn" | "wrn" => LevelFilter::WARN,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(string_to_level_filter("INFO"), LevelFilter::INFO);
        assert_eq!(string_to_level_filter("wrn"), LevelFilter::WARN);
        assert_eq!(string_to_level_filter("off"), LevelFilter::OFF);
        assert_eq!(string_to_level_filter("loud"), LevelFilter::ERROR);
    }
}
