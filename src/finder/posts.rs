//! post commands: random, fetch and search
use {
    super::Finder,
    crate::{
        client::{Post, paginate},
        error::{FinderError, Result},
        format::Position,
        host::ChatHost,
    },
    tracing::{debug, info},
};

/// A validated page of search results
pub struct SearchPage {
    /// the page number, 1-based
    pub page: usize,
    /// how many pages the results span
    pub pages: usize,
    /// how many posts were asked for
    pub count: usize,
    /// the posts on the page
    pub posts: Vec<Post>,
}

impl Finder {
    /// check a requested posts-per-page count against the configured maximum
    pub fn validate_count(&self, count: i64) -> Result<usize> {
        let max = self.cfg.max_count_posts;

        match usize::try_from(count) {
            Ok(n) if n >= 1 && n <= max => Ok(n),
            _ => Err(FinderError::CountOutOfRange { count, max }),
        }
    }

    /// fetch one random post for a group
    pub async fn random_post(&self, group: &str, raw_tags: &str) -> Result<Post> {
        let tags = self.compose_for_group(group, raw_tags)?;
        self.random_post_tagged(&tags).await
    }

    /// fetch one random post for an already composed query
    async fn random_post_tagged(&self, tags: &str) -> Result<Post> {
        first_post(self.source.random_post(tags).await?)
    }

    /// fetch one post by id
    pub async fn post_by_id(&self, id: u64) -> Result<Post> {
        first_post(self.source.post_by_id(id).await?)
    }

    /// run a search and cut out the requested page
    ///
    /// `count` and `page` are checked before anything is fetched
    pub async fn search_page(&self, group: &str, raw_tags: &str, count: i64, page: i64) -> Result<SearchPage> {
        let (count, page) = self.validate_search(count, page)?;
        let tags = self.compose_for_group(group, raw_tags)?;
        self.search_page_tagged(&tags, count, page).await
    }

    /// check `count` and `page` of a search request
    fn validate_search(&self, count: i64, page: i64) -> Result<(usize, usize)> {
        let count = self.validate_count(count)?;
        let page = usize::try_from(page)
            .ok()
            .filter(|page| *page >= 1)
            .ok_or(FinderError::InvalidPage(page))?;

        Ok((count, page))
    }

    /// fetch and paginate a search for an already composed query
    async fn search_page_tagged(&self, tags: &str, count: usize, page: usize) -> Result<SearchPage> {
        let posts = self
            .source
            .search_posts(tags, Some(self.cfg.search_limit), None)
            .await?;

        let mut pages = paginate(posts, count);
        let total = pages.len();

        if page > total {
            return Err(FinderError::PageOutOfRange {
                page: page as i64,
                pages: total,
            });
        }

        Ok(SearchPage {
            page,
            pages: total,
            count,
            posts: pages.swap_remove(page - 1),
        })
    }

    /// `random [tags]`
    pub async fn random(&self, host: &dyn ChatHost, group: &str, raw_tags: &str) -> Result<()> {
        let tags = self.compose_for_group(group, raw_tags)?;
        self.say(
            host,
            group,
            format!("fetching a random post: {}", self.source.random_post_url(&tags)),
        )
        .await?;

        let post = self.random_post_tagged(&tags).await?;
        debug!(post_id = ?post.get("id"), "got random post");

        self.deliver(host, group, self.formatter.format(&post, None))
            .await
    }

    /// `fetch <id>`
    pub async fn fetch(&self, host: &dyn ChatHost, group: &str, id: u64) -> Result<()> {
        self.say(
            host,
            group,
            format!("fetching post #{}: {}", id, self.source.post_url(id)),
        )
        .await?;

        let post = self.post_by_id(id).await?;
        self.deliver(host, group, self.formatter.format(&post, None))
            .await
    }

    /// `search <tags> <count> [page]`
    pub async fn search(
        &self,
        host: &dyn ChatHost,
        group: &str,
        raw_tags: &str,
        count: i64,
        page: i64,
    ) -> Result<()> {
        let (count, page) = self.validate_search(count, page)?;
        let tags = self.compose_for_group(group, raw_tags)?;
        self.say(
            host,
            group,
            format!(
                "searching posts tagged [{}]: {}",
                tags,
                self.source.search_url(&tags, Some(self.cfg.search_limit), None)
            ),
        )
        .await?;

        let result = self.search_page_tagged(&tags, count, page).await?;
        info!(page = result.page, pages = result.pages, "sending search page");

        self.say(
            host,
            group,
            format!(
                "page ({}/{}), change the page argument to switch pages",
                result.page, result.pages
            ),
        )
        .await?;

        if result.posts.len() < result.count {
            self.say(
                host,
                group,
                format!("this page only has {} post(s)", result.posts.len()),
            )
            .await?;
        }

        let total = result.posts.len().min(result.count);
        for (index, post) in result.posts.iter().enumerate() {
            let payload = self.formatter.format(post, Some(Position { index, total }));
            self.deliver(host, group, payload).await?;
        }

        Ok(())
    }
}

/// the first post of a response
fn first_post(posts: Vec<Post>) -> Result<Post> {
    posts.into_iter().next().ok_or(FinderError::NoPostFound)
}
