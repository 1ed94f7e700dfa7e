//! every available configuration option and its type is listed in this file
use {
    crate::config::validate::{Validate, format_validation_errors},
    color_eyre::{
        Section, SectionExt,
        eyre::{Context, OptionExt, Result, eyre},
    },
    config::{Config, ConfigBuilder, Environment, File},
    schemars::JsonSchema,
    serde::{Deserialize, Serialize},
    smart_default::SmartDefault,
    std::path::{Path, PathBuf},
    tracing::info,
};

/// The name of the config file looked up locally and globally
pub const CONFIG_FILE_NAME: &str = "e6finder.toml";

/// The caption template used when none is configured
pub const DEFAULT_POST_TEMPLATE: &str =
    "#{id} [♥{score.total|score} ★{fav_count} ✉{comment_count}] ({RATING})\n\n{description}";

/// Configuration options for making HTTP requests
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[default(30)]
    pub timeout: u64,

    /// Connection timeout in seconds
    #[default(10)]
    pub connect_timeout: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, SmartDefault, PartialEq, Eq)]
/// The format to log in
pub enum LoggingFormat {
    /// Use the compact output format
    Compact,

    /// Use an excessively pretty output format
    #[default]
    Pretty,
}

/// Settings for logging
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    #[default(true)]
    pub enable: bool,

    /// The max level to log at
    #[default("info".to_string())]
    pub level: String,

    /// The output format
    #[default(LoggingFormat::Pretty)]
    pub format: LoggingFormat,

    /// Enable ANSI escape codes for colors and stuff
    #[default(true)]
    pub ansi: bool,

    /// Display event targets in log messages
    #[default(false)]
    pub event_targets: bool,

    /// Display line numbers in log messages
    #[default(false)]
    pub line_numbers: bool,
}

/// The e6finder configuration
#[derive(Serialize, Deserialize, Clone, Debug, JsonSchema, SmartDefault)]
#[serde(default)]
pub struct FinderCfg {
    /// The base URL of the imageboard API
    #[default("https://e621.net/".to_string())]
    pub base_url: String,

    /// User agent string in the format:
    /// `<project name>/<project version> (by <valid e6 username> on <e621/e926>)`
    #[default(format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,

    /// The separator users put between tags in commands
    #[default(",".to_string())]
    pub tag_separator: String,

    /// The caption template for posts (see the template module for the syntax)
    #[default(DEFAULT_POST_TEMPLATE.to_string())]
    pub post_template: String,

    /// The maximum number of posts a single search may send
    #[default(5)]
    pub max_count_posts: usize,

    /// How many posts a search request asks the API for before paginating
    #[default(75)]
    pub search_limit: u64,

    /// Tags appended to every request regardless of group or user input
    pub constant_tags: Vec<String>,

    /// The directory group settings are stored in
    #[default(default_data_dir())]
    pub data_dir: String,

    /// Image sent for posts without a file url (url or local path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_image: Option<String>,

    /// HTTP settings
    pub http: HttpConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// the platform data directory for group settings
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(env!("CARGO_PKG_NAME"))
        .join("groups")
        .display()
        .to_string()
}

impl FinderCfg {
    /// load config from default locations
    ///
    /// load prio: env > explicit > local > global > defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Self::create_builder(&Self::default())?;

        if let Some(global) = Self::global_config_path() {
            builder = builder.add_source(File::from(global).required(false));
        }

        if let Some(local) = Self::find_local_config()? {
            builder = builder.add_source(File::from(local).required(false));
        }

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("E6FINDER")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("constant_tags")
                .try_parsing(true),
        );

        Self::from_builder(builder)
    }

    /// build and validate a config from a single toml document layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let builder = Self::create_builder(&Self::default())?
            .add_source(File::from_str(toml, config::FileFormat::Toml));

        Self::from_builder(builder)
    }

    /// deserialize and validate
    fn from_builder(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings = builder.build().wrap_err("Failed to build configuration")?;
        let cfg: FinderCfg = settings
            .try_deserialize()
            .wrap_err("Failed to deserialize configuration")?;

        cfg.run_validation()?;
        info!("Configuration validation successful");

        Ok(cfg)
    }

    /// get the global config file path
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// create a config builder with defaults
    fn create_builder(defaults: &FinderCfg) -> Result<ConfigBuilder<config::builder::DefaultState>> {
        let config_source = Config::try_from(defaults)
            .wrap_err("Failed to convert default FinderCfg struct to config source")?;

        Ok(Config::builder().add_source(config_source))
    }

    /// run validation and return a pretty error if it fails
    fn run_validation(&self) -> Result<()> {
        self.validate()
            .map_err(|errors| eyre!(format_validation_errors(&errors)))
            .wrap_err("config validation failed")
            .suggestion(format!("Check your {CONFIG_FILE_NAME} for invalid values"))
    }

    /// find the local config file
    fn find_local_config() -> Result<Option<PathBuf>> {
        let curr_dir = std::env::current_dir()
            .wrap_err("Failed to get current working directory")
            .suggestion("Ensure the current directory exists and is accessible")?;

        Ok(curr_dir
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|path| path.exists()))
    }

    /// save config to a file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let toml_str =
            toml::to_string_pretty(self).wrap_err("Failed to serialize config to TOML")?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .wrap_err("Failed to create config directory")
                .with_section(|| dir.display().to_string().header("Directory:"))?;
        }

        std::fs::write(path, &toml_str)
            .wrap_err_with(|| format!("Failed to write config file: {}", path.display()))
            .with_section(|| path.display().to_string().header("File path"))?;

        Ok(())
    }

    /// save config to the global config location
    pub fn save(&self) -> Result<()> {
        let path = Self::global_config_path()
            .ok_or_eyre("Unable to determine system config directory")
            .suggestion("Ensure XDG_CONFIG_HOME or HOME environment variables are set")?;

        self.save_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = FinderCfg::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.tag_separator, ",");
        assert_eq!(cfg.max_count_posts, 5);
        assert!(cfg.constant_tags.is_empty());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let cfg = FinderCfg::from_toml_str(
            r#"
            base_url = "https://e926.net/"
            max_count_posts = 3
            constant_tags = ["-gore"]

            [logging]
            format = "Compact"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.base_url, "https://e926.net/");
        assert_eq!(cfg.max_count_posts, 3);
        assert_eq!(cfg.constant_tags, vec!["-gore".to_string()]);
        assert_eq!(cfg.logging.format, LoggingFormat::Compact);
        assert_eq!(cfg.search_limit, 75);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = FinderCfg::from_toml_str(
            r#"
            base_url = "ftp://nope"
            max_count_posts = 0
            "#,
        )
        .unwrap_err();

        let msg = format!("{:?}", err);
        assert!(msg.contains("base_url"));
        assert!(msg.contains("max_count_posts"));
    }

    #[test]
    fn test_default_toml_round_trips() {
        let toml = toml::to_string_pretty(&FinderCfg::default()).unwrap();
        let cfg = FinderCfg::from_toml_str(&toml).unwrap();
        assert_eq!(cfg.post_template, DEFAULT_POST_TEMPLATE);
    }
}
