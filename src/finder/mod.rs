//! the chat plugin: commands in, messages out
//!
//! Every operation takes the group it runs for explicitly. The only state shared between
//! requests is what the [`GroupStore`] keeps on disk.
use {
    crate::{
        client::{BoardClient, PostSource},
        config::FinderCfg,
        error::{FinderError, Result},
        format::{DisplayPayload, PostFormatter},
        host::ChatHost,
        store::GroupStore,
        tags::TagComposer,
        template::PostTemplate,
    },
    std::sync::Arc,
    tracing::{debug, error, info, instrument, warn},
};

pub mod commands;
pub mod posts;
pub mod settings;
pub mod tools;

pub use commands::{Command, ConstantsAction, RatingAction};

/// The plugin
pub struct Finder {
    /// the loaded configuration
    cfg: Arc<FinderCfg>,
    /// where posts come from
    source: Arc<dyn PostSource>,
    /// per-group settings
    store: GroupStore,
    /// builds search queries
    composer: TagComposer,
    /// renders posts
    formatter: PostFormatter,
}

impl Finder {
    /// make a plugin talking to the configured api and storing settings in the configured
    /// data directory
    pub fn new(cfg: Arc<FinderCfg>) -> Result<Self> {
        let source = Arc::new(BoardClient::new(&cfg)?);
        let store = GroupStore::new(&cfg.data_dir)?;
        Ok(Self::with_source(cfg, source, store))
    }

    /// make a plugin around an existing post source and store
    pub fn with_source(cfg: Arc<FinderCfg>, source: Arc<dyn PostSource>, store: GroupStore) -> Self {
        let composer = TagComposer::new(cfg.tag_separator.clone(), cfg.constant_tags.clone());
        let formatter = PostFormatter::new(
            PostTemplate::new(cfg.post_template.clone()),
            cfg.placeholder_image.clone(),
        );

        Self {
            cfg,
            source,
            store,
            composer,
            formatter,
        }
    }

    /// the loaded configuration
    pub fn cfg(&self) -> &FinderCfg {
        &self.cfg
    }

    /// the group settings store
    pub fn store(&self) -> &GroupStore {
        &self.store
    }

    /// parse and run a chat line
    pub async fn handle_line(&self, host: &dyn ChatHost, group: &str, line: &str) {
        match Command::parse_line(line) {
            Ok(command) => self.handle(host, group, command).await,
            Err(e) => self.reply_error(host, group, &e).await,
        }
    }

    /// run a command, replying with an error message if it fails
    #[instrument(skip(self, host, command))]
    pub async fn handle(&self, host: &dyn ChatHost, group: &str, command: Command) {
        info!(?command, "handling command");

        let result = match command {
            Command::Random { tags } => self.random(host, group, &tags.join(" ")).await,
            Command::Fetch { id } => self.fetch(host, group, id).await,
            Command::Search { tags, count, page } => {
                self.search(host, group, &tags, count, page).await
            }
            Command::Rating { action } => self.rating(host, group, action).await,
            Command::Constants { action } => self.constants(host, group, action).await,
        };

        if let Err(e) = result {
            self.reply_error(host, group, &e).await;
        }
    }

    /// compose the query tags for a group
    pub fn compose_for_group(&self, group: &str, raw: &str) -> Result<String> {
        let settings = self.store.read(group)?;
        Ok(self
            .composer
            .compose(raw, &settings.constant_tags, settings.rating))
    }

    /// send a message, falling back to text only if it carries an image that fails to send
    pub async fn deliver(&self, host: &dyn ChatHost, group: &str, payload: DisplayPayload) -> Result<()> {
        match host.send(group, &payload).await {
            Ok(()) => Ok(()),
            Err(e) if payload.has_image() => {
                warn!(error = %e, post_id = ?payload.post_id, "failed to send image, sending text only");
                host.send(group, &payload.without_image()).await
            }
            Err(e) => Err(e),
        }
    }

    /// send a plain text message
    pub async fn say<S: Into<String>>(&self, host: &dyn ChatHost, group: &str, text: S) -> Result<()> {
        host.send(group, &DisplayPayload::text(text)).await
    }

    /// tell the user what went wrong
    async fn reply_error(&self, host: &dyn ChatHost, group: &str, e: &FinderError) {
        if e.is_user_facing() {
            debug!(error = %e, "request rejected");
        } else {
            error!(error = %e, "request failed");
        }

        if let Err(send_err) = self.say(host, group, e.to_string()).await {
            warn!(error = %send_err, "failed to send error message");
        }
    }
}


#[cfg(test)]
mod tests {
    use {
        super::testing::*,
        crate::rating::Rating,
    };

    #[tokio::test]
    async fn test_compose_uses_group_state() {
        let (_dir, finder) = finder(FakeSource::default());
        finder.store().set_rating("g", Rating::Explicit).unwrap();

        assert_eq!(finder.compose_for_group("g", "wolf").unwrap(), "wolf+male+rating:e");
        assert_eq!(finder.compose_for_group("h", "wolf").unwrap(), "wolf+male+rating:s");
    }

    #[tokio::test]
    async fn test_parse_errors_are_replied() {
        let (_dir, finder) = finder(FakeSource::default());
        let host = RecordingHost::default();

        finder.handle_line(&host, "g", "fetch not-a-number").await;

        let texts = host.texts();
        assert_eq!(texts.len(), 1);
        assert!(texts[0].contains("not-a-number"));
    }

    #[tokio::test]
    async fn test_image_failure_degrades_to_text() {
        let (_dir, finder) = finder(FakeSource::with_posts(1));
        let host = RecordingHost {
            reject_images: true,
            ..Default::default()
        };

        finder.handle_line(&host, "g", "fetch 1").await;

        let payloads = host.payloads();
        let last = payloads.last().unwrap();
        assert!(!last.has_image());
        assert!(last.plain_text().contains("fetch 1"));
        assert!(last.plain_text().starts_with("#1 (Safe)"));
    }

    #[tokio::test]
    async fn test_network_error_is_plain_reply() {
        let source = FakeSource {
            offline: true,
            ..Default::default()
        };
        let (_dir, finder) = finder(source);
        let host = RecordingHost::default();

        finder.handle_line(&host, "g", "random wolf").await;

        assert_eq!(
            host.texts().last().unwrap(),
            "request failed: server network problem"
        );
    }
}
