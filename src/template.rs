//! post caption templates
//!
//! A template is plain text with `{path}` placeholders. A path is a dotted list of object keys
//! and array indices (`file.url`, `tags.artist.0`), and a placeholder may list fallbacks
//! separated by `|` which are tried left to right (`{score.total|score}`).
//!
//! A placeholder that can't be resolved to a non-null value is left in the output untouched.
use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::ops::Range,
};

/// A `{...}` segment found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// the byte range of the whole segment, braces included
    pub span: Range<usize>,
    /// the text between the braces
    pub body: &'t str,
}

impl<'t> Placeholder<'t> {
    /// the candidate paths, in the order they should be tried
    pub fn paths(&self) -> impl Iterator<Item = &'t str> {
        self.body.split('|').map(str::trim)
    }

    /// resolve the first candidate path that yields a non-null value
    pub fn resolve<'v>(&self, data: &'v Value) -> Option<&'v Value> {
        self.paths()
            .filter_map(|path| lookup(data, path))
            .find(|value| !value.is_null())
    }
}

/// A post caption template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PostTemplate {
    /// the raw template text
    pub template: String,
}

impl PostTemplate {
    /// make a new template
    pub fn new<S: Into<String>>(template: S) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// find every placeholder in the template, left to right
    ///
    /// braces can't nest, so in `{{a}}` only the inner `{a}` is a placeholder
    pub fn placeholders(&self) -> Vec<Placeholder<'_>> {
        let bytes = self.template.as_bytes();
        let mut found = Vec::new();
        let mut start = 0;

        while start < bytes.len() {
            if bytes[start] != b'{' {
                start += 1;
                continue;
            }

            let end = bytes[start + 1..]
                .iter()
                .position(|&b| b == b'{' || b == b'}')
                .map(|offset| start + 1 + offset);

            match end {
                Some(end) if bytes[end] == b'}' && end > start + 1 => {
                    found.push(Placeholder {
                        span: start..end + 1,
                        body: &self.template[start + 1..end],
                    });
                    start = end + 1;
                }
                _ => start += 1,
            }
        }

        found
    }

    /// render the template against `data`
    pub fn render(&self, data: &Value) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut last = 0;

        for placeholder in self.placeholders() {
            out.push_str(&self.template[last..placeholder.span.start]);

            match placeholder.resolve(data) {
                Some(value) => out.push_str(&stringify(value)),
                None => out.push_str(&self.template[placeholder.span.clone()]),
            }

            last = placeholder.span.end;
        }

        out.push_str(&self.template[last..]);
        out
    }
}

impl From<&str> for PostTemplate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// render `template` against `data`
pub fn render_template(template: &str, data: &Value) -> String {
    PostTemplate::new(template).render(data)
}

/// walk a dotted path through objects and arrays
///
/// returns `None` if any segment is empty, names a missing key, isn't a valid index, or tries
/// to descend into a scalar
pub fn lookup<'v>(data: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(data, |current, key| {
        if key.is_empty() {
            return None;
        }

        match current {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    })
}

/// turn a resolved value into text
///
/// strings are inserted without quotes, containers as compact json
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    fn post() -> Value {
        json!({
            "id": 42,
            "rating": "s",
            "score": { "up": 10, "down": -2, "total": 8 },
            "file": { "url": null, "ext": "png" },
            "tags": { "artist": ["someone", "another"] },
            "description": "",
            "ratio": 1.5,
            "flagged": false
        })
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let text = "nothing to see here, not even } or { alone";
        assert_eq!(render_template(text, &post()), text);
        assert_eq!(render_template("", &post()), "");
    }

    #[test]
    fn test_scalar_substitution() {
        assert_eq!(render_template("#{id}!", &post()), "#42!");
        assert_eq!(render_template("{ratio} {flagged}", &post()), "1.5 false");
        assert_eq!(render_template("[{description}]", &post()), "[]");
    }

    #[test]
    fn test_nested_and_indexed_paths() {
        assert_eq!(render_template("{score.total}", &post()), "8");
        assert_eq!(render_template("by {tags.artist.1}", &post()), "by another");
    }

    #[test]
    fn test_fallback_paths() {
        assert_eq!(render_template("{file.url|file.ext}", &post()), "png");
        assert_eq!(render_template("{missing | id}", &post()), "42");
        assert_eq!(render_template("{score.total|score}", &post()), "8");
    }

    #[test]
    fn test_unresolved_stays_literal() {
        assert_eq!(render_template("{file.url}", &post()), "{file.url}");
        assert_eq!(render_template("a {nope|also.nope} b", &post()), "a {nope|also.nope} b");
        assert_eq!(render_template("{tags.artist.x}", &post()), "{tags.artist.x}");
        assert_eq!(render_template("{tags.artist.9}", &post()), "{tags.artist.9}");
        assert_eq!(render_template("{id.value}", &post()), "{id.value}");
        assert_eq!(render_template("{score..total}", &post()), "{score..total}");
    }

    #[test]
    fn test_containers_are_deterministic() {
        let rendered = render_template("{tags.artist}", &post());
        assert_eq!(rendered, r#"["someone","another"]"#);
        assert_eq!(rendered, render_template("{tags.artist}", &post()));
    }

    #[test]
    fn test_braces_do_not_nest() {
        assert_eq!(render_template("{{id}}", &post()), "{42}");
        assert_eq!(render_template("{}{id}", &post()), "{}42");
        assert_eq!(render_template("{id", &post()), "{id");
    }

    #[test]
    fn test_many_placeholders_left_to_right() {
        let template = PostTemplate::new("{id}-{rating}-{id}-{nope}-ünï{score.up}");
        assert_eq!(template.placeholders().len(), 5);
        assert_eq!(template.render(&post()), "42-s-42-{nope}-ünï10");
    }
}
