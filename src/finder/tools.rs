//! hooks for a host that lets a language model call the plugin as a tool
//!
//! Each hook sends the same payloads as its command and returns a summary of the posts for
//! the model to read. Failures come back as the summary instead of an error.
use {
    super::Finder,
    crate::{client::Post, error::Result, format::Position, host::ChatHost},
    tracing::{instrument, warn},
};

impl Finder {
    /// send a random post matching `tags`
    #[instrument(skip(self, host))]
    pub async fn tool_random_image(&self, host: &dyn ChatHost, group: &str, tags: &[String]) -> String {
        let raw = tags.join(self.composer.separator());

        let result: Result<Post> = async {
            let post = self.random_post(group, &raw).await?;
            self.deliver(host, group, self.formatter.format(&post, None))
                .await?;
            Ok(post)
        }
        .await;

        self.summarize_one(host, group, result).await
    }

    /// send a known post
    #[instrument(skip(self, host))]
    pub async fn tool_view_post(&self, host: &dyn ChatHost, group: &str, id: u64) -> String {
        let result: Result<Post> = async {
            let post = self.post_by_id(id).await?;
            self.deliver(host, group, self.formatter.format(&post, None))
                .await?;
            Ok(post)
        }
        .await;

        self.summarize_one(host, group, result).await
    }

    /// send one page of search results
    ///
    /// errors are only returned to the model, nothing is sent for them
    #[instrument(skip(self, host))]
    pub async fn tool_search_posts(
        &self,
        host: &dyn ChatHost,
        group: &str,
        tags: &[String],
        count_per_page: i64,
        page: i64,
    ) -> String {
        let raw = tags.join(self.composer.separator());

        let result: Result<String> = async {
            let result = self.search_page(group, &raw, count_per_page, page).await?;
            let mut summary = String::new();

            if result.posts.len() < result.count {
                summary.push_str(&format!("this page only has {} post(s)\n", result.posts.len()));
            }

            let total = result.posts.len().min(result.count);
            for (index, post) in result.posts.iter().enumerate() {
                summary.push_str(&format!("post {}: {}\n", index + 1, post));
                self.deliver(host, group, self.formatter.format(post, Some(Position { index, total })))
                    .await?;
            }

            Ok(summary)
        }
        .await;

        result.unwrap_or_else(|e| {
            warn!(error = %e, "search tool failed");
            e.to_string()
        })
    }

    /// the summary of a single post, or the error after telling the group about it
    async fn summarize_one(&self, host: &dyn ChatHost, group: &str, result: Result<Post>) -> String {
        match result {
            Ok(post) => format!("post data: {post}"),
            Err(e) => {
                self.reply_error(host, group, &e).await;
                e.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;

    #[tokio::test]
    async fn test_random_tool_summary() {
        let (_dir, finder) = finder(FakeSource::with_posts(2));
        let host = RecordingHost::default();

        let summary = finder
            .tool_random_image(&host, "g", &["big cat".into(), "solo".into()])
            .await;

        assert!(summary.starts_with("post data: {"));
        assert!(summary.contains("\"id\":1"));
        assert_eq!(host.texts(), vec!["#1 (Safe)"]);
    }

    #[tokio::test]
    async fn test_view_tool_reports_missing_post() {
        let (_dir, finder) = finder(FakeSource::with_posts(2));
        let host = RecordingHost::default();

        let summary = finder.tool_view_post(&host, "g", 42).await;

        assert_eq!(summary, "no post matched your tags");
        assert_eq!(host.texts(), vec!["no post matched your tags"]);
    }

    #[tokio::test]
    async fn test_search_tool() {
        let (_dir, finder) = finder(FakeSource::with_posts(5));
        let host = RecordingHost::default();

        let summary = finder
            .tool_search_posts(&host, "g", &["wolf".into()], 2, 3)
            .await;

        assert!(summary.starts_with("this page only has 1 post(s)\npost 1: {"));
        assert!(summary.ends_with("}\n"));
        assert_eq!(summary.lines().count(), 2);
        assert_eq!(host.texts(), vec!["#5 (Safe)"]);
    }

    #[tokio::test]
    async fn test_search_tool_rejects_count_silently() {
        let (_dir, finder) = finder(FakeSource::with_posts(5));
        let host = RecordingHost::default();

        let summary = finder
            .tool_search_posts(&host, "g", &["wolf".into()], 9, 1)
            .await;

        assert!(summary.contains("9 ∈ (0, 5]"));
        assert!(host.texts().is_empty());
    }
}
