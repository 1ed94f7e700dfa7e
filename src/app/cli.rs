//! cli stuff
use {
    crate::config::{CONFIG_FILE_NAME, FinderCfg},
    clap::Parser,
    color_eyre::{Report, eyre::Result},
    schemars::generate::SchemaSettings,
    std::{
        fs::OpenOptions,
        io::{BufWriter, Write},
        path::PathBuf,
    },
};

/// the group used when none is given
pub const PRIVATE_GROUP: &str = "private";

/// the CLI
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// The group to run commands for
    #[arg(short, long, default_value = "")]
    pub group: String,

    /// Load this config file on top of the global and local ones
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Save instead of printing
    #[arg(long)]
    pub save: bool,

    /// Generate a JSON schemafile based on the defaults
    #[arg(short = 's', long)]
    pub gen_schema: bool,

    /// Generate the default config file
    #[arg(short = 'd', long)]
    pub gen_default: bool,

    /// Generate both the schema and the default config file
    #[arg(short = 'a', long)]
    pub gen_all: bool,

    /// A command to run, e.g. `search wolf 3`. Commands are read from stdin when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// the group to run commands for, `private` when empty
    pub fn group(&self) -> &str {
        match self.group.trim() {
            "" => PRIVATE_GROUP,
            group => group,
        }
    }

    /// the command given on the command line, if any
    pub fn command_line(&self) -> Option<String> {
        (!self.command.is_empty()).then(|| self.command.join(" "))
    }

    /// handle the config generation flags
    ///
    /// returns `true` if anything was generated, in which case nothing else should run
    ///
    /// # Errors
    ///
    /// returns an error if it fails to generate and/or save the json schema
    /// returns an error if it fails to generate and/or save the default config
    /// returns an error if `--save` alone fails to save the loaded config
    pub fn generate(&self, cfg: &FinderCfg) -> Result<bool> {
        if self.gen_schema || self.gen_all {
            Self::gen_schema(self.save)?;
        }

        if self.gen_default || self.gen_all {
            Self::gen_defaults(self.save)?;
        }

        let generated = self.gen_schema || self.gen_default || self.gen_all;

        if self.save && !generated {
            cfg.save()?;
            println!("saved the loaded configuration");
            return Ok(true);
        }

        Ok(generated)
    }

    /// save a string to a file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to open `path`
    pub fn write_to_file(path: &str, contents: &str) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        let mut w = BufWriter::new(file);
        w.write_all(contents.as_bytes()).map_err(Report::new)
    }

    /// generate/save the config schema
    ///
    /// # Errors
    ///
    /// returns an error if it fails to convert the schema to a JSON string
    /// returns an error if it fails to save the schema to `e6finder.schema.json`
    pub fn gen_schema(save: bool) -> Result<()> {
        let settings = SchemaSettings::draft2020_12().for_serialize();
        let generator = settings.into_generator();
        let schema = generator.into_root_schema_for::<FinderCfg>();
        let schema_str = serde_json::to_string_pretty(&schema)?;

        if save {
            Self::write_to_file(concat!(env!("CARGO_PKG_NAME"), ".schema.json"), &schema_str)?;
        } else {
            println!("{}", schema_str);
        }

        Ok(())
    }

    /// generate/save the default config file
    ///
    /// # Errors
    ///
    /// returns an error if it fails to convert the default config to TOML
    /// returns an error if it fails to save it to the local config file
    pub fn gen_defaults(save: bool) -> Result<()> {
        let defaults = toml::to_string_pretty(&FinderCfg::default())?;

        if save {
            Self::write_to_file(CONFIG_FILE_NAME, &defaults)?;
        } else {
            println!("{}", defaults);
        }

        Ok(())
    }
}
