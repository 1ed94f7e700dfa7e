//! client extensions for post operations on the imageboard api
use {
    crate::{
        client::{BoardClient, Post, PostSource},
        error::*,
    },
    async_trait::async_trait,
    serde_json::Value,
    tracing::{debug, instrument, warn},
};

impl BoardClient {
    /// the url with `path` joined onto the base url, as a string
    fn api_url(&self, path: &str) -> String {
        match self.join_api(path) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.base_url, path),
        }
    }

    /// send a GET request and interpret the response
    async fn fetch_api(&self, url: &str) -> Result<Vec<Post>> {
        debug!(url, "fetching from api");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, url, "request failed");
            FinderError::Network
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            warn!(error = %e, url, "failed to read response body");
            FinderError::Network
        })?;

        let posts = interpret_response(status, &body)?;
        debug!(count = posts.len(), "fetched posts");
        Ok(posts)
    }
}

#[async_trait]
impl PostSource for BoardClient {
    fn random_post_url(&self, tags: &str) -> String {
        self.api_url(&format!("posts/random.json?tags={}", encode_tags(tags)))
    }

    fn post_url(&self, id: u64) -> String {
        self.api_url(&format!("posts/{}.json", id))
    }

    fn search_url(&self, tags: &str, limit: Option<u64>, page: Option<u64>) -> String {
        let mut path = format!("posts.json?tags={}", encode_tags(tags));

        if let Some(limit) = limit {
            path.push_str(&format!("&limit={}", limit));
        }

        if let Some(page) = page {
            path.push_str(&format!("&page={}", page));
        }

        self.api_url(&path)
    }

    #[instrument(skip(self))]
    async fn random_post(&self, tags: &str) -> Result<Vec<Post>> {
        self.fetch_api(&self.random_post_url(tags)).await
    }

    #[instrument(skip(self))]
    async fn post_by_id(&self, id: u64) -> Result<Vec<Post>> {
        self.fetch_api(&self.post_url(id)).await
    }

    #[instrument(skip(self))]
    async fn search_posts(
        &self,
        tags: &str,
        limit: Option<u64>,
        page: Option<u64>,
    ) -> Result<Vec<Post>> {
        self.fetch_api(&self.search_url(tags, limit, page)).await
    }
}

/// url-encode each tag of a `+`-joined query, keeping the `+` joiners
pub fn encode_tags(tags: &str) -> String {
    tags.split('+')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("+")
}

/// turn an api response into a list of posts
///
/// - any status but 200/404 is [`FinderError::BadStatus`]
/// - a body that isn't json is [`FinderError::NoPostData`]
/// - `success: false`, or an empty `post`/`posts`/document, is [`FinderError::NoPostFound`]
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Vec<Post>> {
    if status != 200 && status != 404 {
        return Err(FinderError::BadStatus(status));
    }

    let data: Value = serde_json::from_slice(body).map_err(|_| FinderError::NoPostData)?;

    if data.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(FinderError::NoPostFound);
    }

    let payload = match data {
        Value::Object(mut map) => match map.remove("post") {
            Some(post) => post,
            None => match map.remove("posts") {
                Some(posts) => posts,
                None => Value::Object(map),
            },
        },
        other => other,
    };

    match payload {
        Value::Array(posts) if !posts.is_empty() => Ok(posts),
        Value::Object(map) if !map.is_empty() => Ok(vec![Value::Object(map)]),
        Value::Array(_) | Value::Object(_) | Value::Null => Err(FinderError::NoPostFound),
        _ => Err(FinderError::NoPostData),
    }
}

/// split posts into pages of `count` posts, the last page may be shorter
pub fn paginate(posts: Vec<Post>, count: usize) -> Vec<Vec<Post>> {
    posts
        .chunks(count.max(1))
        .map(<[Post]>::to_vec)
        .collect()
}
