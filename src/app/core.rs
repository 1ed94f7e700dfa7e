//! the core app
use {
    super::{cli::Cli, console::ConsoleHost, logging},
    crate::{config::FinderCfg, finder::Finder},
    clap::Parser,
    color_eyre::{Section, eyre::Context, eyre::Result},
    std::sync::Arc,
    tokio::io::{AsyncBufReadExt, BufReader},
    tracing::info,
};

/// the e6finder console app
pub struct FinderApp {
    /// the parsed arguments
    cli: Cli,
    /// the plugin
    finder: Finder,
    /// where messages are printed
    host: ConsoleHost,
}

impl FinderApp {
    /// initialize e6finder
    ///
    /// - 1. parses the cli arguments
    /// - 2. loads the config file
    /// - 3. handles the config generation flags
    /// - 4. sets up logging
    /// - 5. sets up the plugin and the console host
    ///
    /// returns `None` when the cli only asked to generate files
    ///
    /// # Errors
    ///
    /// returns an error if it fails to load the configuration file
    /// returns an error if the cli fails to generate files
    /// returns an error if it fails to setup logging
    /// returns an error if the group data directory can't be created
    pub async fn init() -> Result<Option<Self>> {
        let cli = Cli::parse();
        let cfg = FinderCfg::load(cli.config.as_deref())
            .wrap_err("Failed to load configuration")?;

        if cli.generate(&cfg)? {
            return Ok(None);
        }

        logging::setup(&cfg.logging)?;

        let cfg = Arc::new(cfg);
        let host = ConsoleHost::new(&cfg)?;
        let finder = Finder::new(cfg.clone())
            .wrap_err("Failed to set up the plugin")
            .suggestion("Check that data_dir points to a writable directory")?;

        info!(
            "Starting {} v{} against {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            cfg.base_url
        );

        Ok(Some(Self { cli, finder, host }))
    }

    /// run the command given on the command line, or every line read from stdin
    pub async fn run(&self) -> Result<()> {
        let group = self.cli.group();

        if let Some(line) = self.cli.command_line() {
            self.finder.handle_line(&self.host, group, &line).await;
            return Ok(());
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = tokio::select! {
                line = lines.next_line() => line.wrap_err("Failed to read from stdin")?,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, exiting");
                    None
                }
            };

            let Some(line) = line else {
                break;
            };

            if line.trim().is_empty() {
                continue;
            }

            self.finder.handle_line(&self.host, group, &line).await;
        }

        Ok(())
    }
}
