//! chat command parsing
use {
    crate::error::{FinderError, Result},
    clap::{Parser, Subcommand},
};

/// A chat command line
#[derive(Parser, Debug)]
#[command(name = "e6finder", no_binary_name = true, disable_version_flag = true)]
pub struct ChatCommand {
    /// the command
    #[command(subcommand)]
    pub command: Command,
}

/// Every command the plugin understands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a random post matching the given tags
    #[command(visible_aliases = ["e621", "neko"], alias = "random-image")]
    Random {
        /// Tags, separated by the configured tag separator
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tags: Vec<String>,
    },

    /// Show a post by its id
    #[command(visible_aliases = ["post", "view"], alias = "fetch-post")]
    Fetch {
        /// The post id
        id: u64,
    },

    /// Search posts, sending one page of results
    #[command(visible_alias = "find", alias = "search-post")]
    Search {
        /// Tags, separated by the configured tag separator
        #[arg(allow_hyphen_values = true)]
        tags: String,

        /// How many posts to send
        #[arg(allow_negative_numbers = true)]
        count: i64,

        /// Which page to send
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },

    /// Rating restriction commands
    Rating {
        /// what to do
        #[command(subcommand)]
        action: RatingAction,
    },

    /// Constant tag commands
    Constants {
        /// what to do
        #[command(subcommand)]
        action: ConstantsAction,
    },
}

/// Rating restriction commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum RatingAction {
    /// List every rating
    List,

    /// Set the group's rating (s, q, e or all)
    Set {
        /// The new rating
        #[arg(default_value = "all")]
        rating: String,
    },

    /// Show the group's rating
    Look,

    /// Remove the group's rating restriction
    Clear,
}

/// Constant tag commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConstantsAction {
    /// Add a constant tag
    #[command(visible_alias = "+")]
    Add {
        /// The tag to add
        #[arg(allow_hyphen_values = true)]
        tag: String,
    },

    /// Delete a constant tag
    #[command(visible_alias = "-")]
    Delete {
        /// The tag to delete
        #[arg(allow_hyphen_values = true)]
        tag: String,
    },

    /// Replace a constant tag, keeping its position
    #[command(visible_alias = "=")]
    Replace {
        /// The tag to replace
        #[arg(allow_hyphen_values = true)]
        old_tag: String,

        /// The tag to put in its place
        #[arg(allow_hyphen_values = true)]
        new_tag: String,
    },

    /// List the group's constant tags
    #[command(visible_alias = "?")]
    Get,
}

impl Command {
    /// parse a chat line such as `search wolf,solo 3 2`
    ///
    /// a leading `/` is ignored
    pub fn parse_line(line: &str) -> Result<Self> {
        let line = line.trim();
        let line = line.strip_prefix('/').unwrap_or(line);

        ChatCommand::try_parse_from(line.split_whitespace())
            .map(|parsed| parsed.command)
            .map_err(|e| FinderError::InvalidCommand(e.render().to_string().trim_end().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_with_aliases() {
        assert_eq!(
            Command::parse_line("/e621 big cat,solo").unwrap(),
            Command::Random {
                tags: vec!["big".into(), "cat,solo".into()]
            }
        );
        assert_eq!(
            Command::parse_line("random").unwrap(),
            Command::Random { tags: vec![] }
        );
        assert_eq!(
            Command::parse_line("random -gore,wolf").unwrap(),
            Command::Random {
                tags: vec!["-gore,wolf".into()]
            }
        );
    }

    #[test]
    fn test_search_defaults_page() {
        assert_eq!(
            Command::parse_line("search wolf 3").unwrap(),
            Command::Search {
                tags: "wolf".into(),
                count: 3,
                page: 1
            }
        );
        assert_eq!(
            Command::parse_line("find wolf -1 2").unwrap(),
            Command::Search {
                tags: "wolf".into(),
                count: -1,
                page: 2
            }
        );
    }

    #[test]
    fn test_settings_commands() {
        assert_eq!(
            Command::parse_line("rating set").unwrap(),
            Command::Rating {
                action: RatingAction::Set {
                    rating: "all".into()
                }
            }
        );
        assert_eq!(
            Command::parse_line("constants = male female").unwrap(),
            Command::Constants {
                action: ConstantsAction::Replace {
                    old_tag: "male".into(),
                    new_tag: "female".into()
                }
            }
        );
        assert_eq!(
            Command::parse_line("constants ?").unwrap(),
            Command::Constants {
                action: ConstantsAction::Get
            }
        );
    }

    #[test]
    fn test_bad_input() {
        assert!(matches!(
            Command::parse_line("fetch abc"),
            Err(FinderError::InvalidCommand(_))
        ));
        assert!(matches!(
            Command::parse_line("dance"),
            Err(FinderError::InvalidCommand(_))
        ));
    }
}
