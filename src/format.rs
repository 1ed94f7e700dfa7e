//! turning posts into chat messages
use {
    crate::{rating::Rating, template::PostTemplate},
    serde_json::Value,
    std::fmt,
};

/// Text shown in place of an image when a post has none
pub const NO_IMAGE_MARKER: &str = "[no image]";

/// One piece of a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// an image, by url or local path
    Image(String),
    /// plain text
    Text(String),
}

/// An ordered message handed to the host for delivery
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayPayload {
    /// the id of the post this message shows, if any
    pub post_id: Option<i64>,
    /// the message segments, in display order
    pub segments: Vec<Segment>,
}

impl DisplayPayload {
    /// a plain text message
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            post_id: None,
            segments: vec![Segment::Text(text.into())],
        }
    }

    /// whether the message carries an image
    pub fn has_image(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Image(_)))
    }

    /// the image reference, if any
    pub fn image(&self) -> Option<&str> {
        self.segments.iter().find_map(|segment| match segment {
            Segment::Image(src) => Some(src.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// every text segment joined together
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text(text) => Some(text.as_str()),
                Segment::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// the text-only form sent when the image couldn't be delivered
    pub fn without_image(&self) -> Self {
        let note = match self.post_id {
            Some(id) => format!("(the image failed to load, use `fetch {id}` to try again)"),
            None => "(the image failed to load)".to_string(),
        };

        let mut segments: Vec<Segment> = self
            .segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Text(_)))
            .cloned()
            .collect();
        segments.push(Segment::Text(note));

        Self {
            post_id: self.post_id,
            segments,
        }
    }
}

impl fmt::Display for DisplayPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            match segment {
                Segment::Image(src) => write!(f, "[image] {src}")?,
                Segment::Text(text) => f.write_str(text)?,
            }
        }

        Ok(())
    }
}

/// Where a post sits in a page of results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// zero-based index within the page
    pub index: usize,
    /// how many posts the page shows
    pub total: usize,
}

/// Formats posts with a caption template
#[derive(Debug, Clone)]
pub struct PostFormatter {
    /// the caption template
    template: PostTemplate,
    /// image shown for posts without a file url
    placeholder_image: Option<String>,
}

impl PostFormatter {
    /// make a new formatter
    pub fn new(template: PostTemplate, placeholder_image: Option<String>) -> Self {
        Self {
            template,
            placeholder_image: placeholder_image.filter(|p| !p.trim().is_empty()),
        }
    }

    /// format one post
    pub fn format(&self, post: &Value, position: Option<Position>) -> DisplayPayload {
        let caption = self.template.render(&template_data(post, position));
        let mut segments = Vec::with_capacity(2);

        match image_url(post).or(self.placeholder_image.as_deref()) {
            Some(src) => {
                segments.push(Segment::Image(src.to_string()));
                segments.push(Segment::Text(caption));
            }
            None => segments.push(Segment::Text(format!("{NO_IMAGE_MARKER}\n{caption}"))),
        }

        DisplayPayload {
            post_id: post.get("id").and_then(Value::as_i64),
            segments,
        }
    }
}

/// the post's image url
///
/// flat api responses use `file_url`, e621 style responses nest it as `file.url`
pub fn image_url(post: &Value) -> Option<&str> {
    post.get("file_url")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .or_else(|| {
            post.pointer("/file/url")
                .and_then(Value::as_str)
                .filter(|url| !url.is_empty())
        })
}

/// the post plus the derived fields templates can use
///
/// `RATING` is the rating label (or the raw code if unknown), `INDEX`/`TOTAL` are set for
/// posts shown as part of a page
pub fn template_data(post: &Value, position: Option<Position>) -> Value {
    let mut data = post.clone();

    if let Value::Object(map) = &mut data {
        if let Some(code) = post.get("rating").and_then(Value::as_str) {
            let label = Rating::label_for_code(code).unwrap_or(code);
            map.insert("RATING".to_string(), Value::from(label));
        }

        if let Some(Position { index, total }) = position {
            map.insert("INDEX".to_string(), Value::from(index + 1));
            map.insert("TOTAL".to_string(), Value::from(total));
        }
    }

    data
}
