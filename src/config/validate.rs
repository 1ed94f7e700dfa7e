//! configuration validation stuff
use {
    crate::{config::options::*, validate_nested, validator},
    url::Url,
};

/// trait for validating config structs
pub trait Validate {
    /// validate the config
    fn validate(&self) -> Result<(), Vec<String>>;

    /// check if the config is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

validator! { HttpConfig,
    timeout => |v: &u64| *v > 0,
        "must be greater than 0";
    connect_timeout => |v: &u64| *v > 0,
        "must be greater than 0";
}

/// valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

validator! { LoggingConfig,
    level => |v: &String| VALID_LOG_LEVELS.contains(&v.to_lowercase().as_str()),
        "must be one of: trace, debug, info, warn, error, off";
}

/// whether a string is an absolute http(s) url
fn is_http_url(v: &str) -> bool {
    Url::parse(v).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

impl Validate for FinderCfg {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors: Vec<String> = Vec::new();

        if !is_http_url(&self.base_url) {
            errors.push("base_url: must be a valid http(s) url".to_string());
        }

        if self.user_agent.trim().is_empty() {
            errors.push("user_agent: must not be empty".to_string());
        }

        if self.tag_separator.is_empty() {
            errors.push("tag_separator: must not be empty".to_string());
        }

        if self.tag_separator.contains('+') {
            errors.push("tag_separator: must not contain '+', it joins query tags".to_string());
        }

        if self.post_template.trim().is_empty() {
            errors.push("post_template: must not be empty".to_string());
        }

        if self.max_count_posts == 0 {
            errors.push("max_count_posts: must be greater than 0".to_string());
        }

        if !(1..=320).contains(&self.search_limit) {
            errors.push("search_limit: must be between 1 and 320".to_string());
        }

        if self.constant_tags.iter().any(|tag| tag.trim().is_empty()) {
            errors.push("constant_tags: tags must not be empty strings".to_string());
        }

        if self.data_dir.trim().is_empty() {
            errors.push("data_dir: must not be empty".to_string());
        }

        validate_nested!(errors, self, http, logging);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// format validation errors for display
pub fn format_validation_errors(errors: &[String]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, err) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, err));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_errors_are_prefixed() {
        let mut cfg = FinderCfg::default();
        cfg.http.timeout = 0;
        cfg.logging.level = "loud".to_string();

        let errors = cfg.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "http.timeout: must be greater than 0".to_string(),
                "logging.level: must be one of: trace, debug, info, warn, error, off".to_string(),
            ]
        );
    }

    #[test]
    fn test_separator_rules() {
        let mut cfg = FinderCfg::default();
        cfg.tag_separator = "+".to_string();
        assert!(!cfg.is_valid());
    }

    #[test]
    fn test_format_errors() {
        let out = format_validation_errors(&["a: bad".to_string()]);
        assert_eq!(out, "Configuration validation failed:\n  1. a: bad\n");
    }
}
