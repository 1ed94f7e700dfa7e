//! a chat host that prints to the terminal
use {
    crate::{
        client::BoardClient,
        config::FinderCfg,
        error::{FinderError, Result},
        format::{DisplayPayload, Segment},
        host::ChatHost,
    },
    async_trait::async_trait,
    reqwest::Client,
    tracing::debug,
};

/// Prints every message to stdout
///
/// images are downloaded before printing so a broken link fails the send like it would on a
/// real chat platform
pub struct ConsoleHost {
    /// used to check images
    client: Client,
}

impl ConsoleHost {
    /// make a console host using the configured http settings
    pub fn new(cfg: &FinderCfg) -> Result<Self> {
        Ok(Self {
            client: BoardClient::build_http_client(cfg)?,
        })
    }

    /// download an image, failing on anything but a successful response
    async fn verify_image(&self, url: &str) -> Result<()> {
        let res = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?;
        let bytes = res.bytes().await?;

        if bytes.is_empty() {
            return Err(FinderError::Other(format!("empty image at {url}")));
        }

        debug!(url, size = bytes.len(), "image downloaded");
        Ok(())
    }
}

#[async_trait]
impl ChatHost for ConsoleHost {
    async fn send(&self, group: &str, payload: &DisplayPayload) -> Result<()> {
        if let Some(url) = payload.image() {
            self.verify_image(url).await?;
        }

        println!("[{group}]");
        for segment in &payload.segments {
            match segment {
                Segment::Image(url) => println!("<image: {url}>"),
                Segment::Text(text) => println!("{text}"),
            }
        }
        println!();

        Ok(())
    }
}
