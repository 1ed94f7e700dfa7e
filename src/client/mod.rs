//! imageboard api stuff
use {
    crate::{config::FinderCfg, error::*},
    async_trait::async_trait,
    reqwest::Client,
    serde_json::Value,
    std::time::Duration,
    tracing::info,
    url::Url,
};

pub mod posts;

pub use posts::{interpret_response, paginate};

/// A loosely typed post record as returned by the api
pub type Post = Value;

/// Something posts can be fetched from
///
/// Every call makes at most one request and nothing is retried.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// the url a random post request for `tags` goes to
    fn random_post_url(&self, tags: &str) -> String;

    /// the url a post lookup goes to
    fn post_url(&self, id: u64) -> String;

    /// the url a search for `tags` goes to
    fn search_url(&self, tags: &str, limit: Option<u64>, page: Option<u64>) -> String;

    /// fetch a random post matching `tags`
    async fn random_post(&self, tags: &str) -> Result<Vec<Post>>;

    /// fetch a post by its id
    async fn post_by_id(&self, id: u64) -> Result<Vec<Post>>;

    /// search posts matching `tags`
    async fn search_posts(&self, tags: &str, limit: Option<u64>, page: Option<u64>)
    -> Result<Vec<Post>>;
}

/// the imageboard api client
#[derive(Clone, Debug)]
pub struct BoardClient {
    /// the http client
    pub client: Client,
    /// the base url for api requests
    pub base_url: Url,
}

impl BoardClient {
    /// make a new api client from the loaded configuration
    pub fn new(cfg: &FinderCfg) -> Result<Self> {
        let client = Self::build_http_client(cfg)?;
        let base_url = normalize_base_url(&cfg.base_url)?;

        info!(base_url = %base_url, "initialized http client");

        Ok(Self { client, base_url })
    }

    /// make a client around an existing http client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// build an http client based on the loaded configuration
    pub fn build_http_client(cfg: &FinderCfg) -> Result<Client> {
        let user_agent = if cfg.user_agent.trim().is_empty() {
            crate::USER_AGENT
        } else {
            cfg.user_agent.as_str()
        };

        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(cfg.http.timeout))
            .connect_timeout(Duration::from_secs(cfg.http.connect_timeout))
            .build()
            .map_err(FinderError::from)
    }

    /// join a path onto the base url
    pub fn join_api(&self, child: &str) -> Result<Url> {
        Ok(self.base_url.join(child)?)
    }
}

/// parse the base url, making sure relative joins keep its path
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    Ok(Url::parse(&base)?)
}
