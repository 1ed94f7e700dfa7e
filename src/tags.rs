//! search tag composition
use {crate::rating::Rating, tracing::debug};

/// Builds the `tags` query parameter for a search
///
/// Order is fixed: user tags, then constant tags, then the rating tag. Nothing is
/// de-duplicated across those groups.
#[derive(Debug, Clone)]
pub struct TagComposer {
    /// the separator users put between tags
    separator: String,
    /// tags appended to every request of the deployment
    constant_tags: Vec<String>,
}

impl TagComposer {
    /// make a new composer
    pub fn new<S: Into<String>>(separator: S, constant_tags: Vec<String>) -> Self {
        Self {
            separator: separator.into(),
            constant_tags,
        }
    }

    /// the separator users put between tags
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// compose a query for a group
    ///
    /// the deployment-wide constant tags come first, then the group's own constant tags
    pub fn compose(&self, raw: &str, group_constants: &[String], rating: Rating) -> String {
        let constants: Vec<String> = self
            .constant_tags
            .iter()
            .chain(group_constants)
            .cloned()
            .collect();

        let query = compose_tags(raw, &self.separator, &constants, rating);
        debug!(query, "composed search tags");
        query
    }

    /// split tags given as a list (tool calls) back into the user's raw form
    pub fn join_user_tags(&self, tags: &[String]) -> String {
        tags.join(&self.separator)
    }
}

/// split `raw` on `separator` and drop the empty pieces
pub fn split_user_tags<'a>(raw: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return if raw.is_empty() { vec![] } else { vec![raw] };
    }

    raw.split(separator).filter(|tag| !tag.is_empty()).collect()
}

/// compose the full, ordered tag list
pub fn total_tags(raw: &str, separator: &str, constants: &[String], rating: Rating) -> Vec<String> {
    split_user_tags(raw, separator)
        .into_iter()
        .map(str::to_string)
        .chain(constants.iter().filter(|tag| !tag.is_empty()).cloned())
        .chain(rating.search_tag())
        .collect()
}

/// compose the `+`-joined query string with spaces replaced by underscores
pub fn compose_tags(raw: &str, separator: &str, constants: &[String], rating: Rating) -> String {
    total_tags(raw, separator, constants, rating)
        .iter()
        .map(|tag| tag.replace(' ', "_"))
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_stable() {
        let query = compose_tags("foo,bar", ",", &["safe1".to_string()], Rating::Explicit);
        assert_eq!(query, "foo+bar+safe1+rating:e");
    }

    #[test]
    fn test_unrestricted_adds_no_rating() {
        let query = compose_tags("foo", ",", &[], Rating::Unrestricted);
        assert_eq!(query, "foo");
        assert!(!query.contains("rating:"));
    }

    #[test]
    fn test_empty_entries_dropped_and_spaces_normalized() {
        let query = compose_tags(",big cat,,red panda,", ",", &[], Rating::Safe);
        assert_eq!(query, "big_cat+red_panda+rating:s");
    }

    #[test]
    fn test_no_dedup_across_groups() {
        let query = compose_tags("male", ",", &["male".to_string()], Rating::Safe);
        assert_eq!(query, "male+male+rating:s");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compose_tags("", ",", &[], Rating::Questionable), "rating:q");
        assert_eq!(compose_tags("", ",", &[], Rating::Unrestricted), "");
    }

    #[test]
    fn test_composer_puts_deployment_tags_first() {
        let composer = TagComposer::new(" ", vec!["-gore".to_string()]);
        let query = composer.compose("wolf  solo", &["male".to_string()], Rating::Safe);
        assert_eq!(query, "wolf+solo+-gore+male+rating:s");
        assert_eq!(composer.join_user_tags(&["a".into(), "b".into()]), "a b");
    }
}
