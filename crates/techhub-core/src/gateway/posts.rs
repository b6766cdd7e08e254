use super::{ALL_TAG, Gateway};
use crate::domain::{ContentEntity, Post, PostKind};
use crate::ports::{Filter, Order, Query};

/// Size of the "latest posts" strip shown next to the featured post.
pub const LATEST_POSTS_LIMIT: usize = 6;

impl Gateway<Post> {
    /// Exact slug lookup.
    pub async fn get_by_slug(&self, slug: &str) -> Option<Post> {
        self.fetch_one("get_by_slug", Self::query().filter(Filter::eq("slug", slug))).await
    }

    /// Most recent post flagged as featured, otherwise the most recent post.
    pub async fn get_featured(&self) -> Option<Post> {
        let featured = self
            .fetch_one(
                "get_featured",
                Self::newest_first().filter(Filter::eq("featured", true)),
            )
            .await;

        match featured {
            Some(post) => Some(post),
            None => self.fetch_one("get_featured", Self::newest_first()).await,
        }
    }

    /// Newest posts, leaving out the one shown as featured.
    pub async fn get_latest_posts(&self, limit: usize) -> Vec<Post> {
        let featured_id = self.get_featured().await.map(|post| post.id);

        self.fetch("get_latest_posts", Self::newest_first().limit(limit.saturating_add(1)))
            .await
            .into_iter()
            .filter(|post| Some(&post.id) != featured_id.as_ref())
            .take(limit)
            .collect()
    }

    /// Posts whose (derived) category matches, ignoring case.
    ///
    /// The category may come from the first tag, so the match happens after
    /// decoding rather than in the store.
    pub async fn get_by_category(&self, category: &str) -> Vec<Post> {
        let posts = self.get_all().await;
        if category == ALL_TAG {
            return posts;
        }
        posts
            .into_iter()
            .filter(|post| post.category.to_lowercase() == category.to_lowercase())
            .collect()
    }

    /// Articles or tutorials; rows without a type count as articles.
    pub async fn get_by_type(&self, kind: PostKind) -> Vec<Post> {
        let filter = match kind {
            PostKind::Tutorial => Filter::eq("type", PostKind::Tutorial.as_str()),
            PostKind::Article => Filter::or(vec![
                Filter::neq("type", PostKind::Tutorial.as_str()),
                Filter::is_null("type"),
            ]),
        };
        self.fetch("get_by_type", Self::newest_first().filter(filter))
            .await
            .into_iter()
            .filter(|post| post.kind == kind)
            .collect()
    }

    /// Up to `limit` other posts in the same category as `current_slug`,
    /// ignoring case. Matched after decoding, like [`Self::get_by_category`].
    pub async fn get_related(&self, current_slug: &str, limit: usize) -> Vec<Post> {
        let Some(current) = self.get_by_slug(current_slug).await else {
            return Vec::new();
        };
        let category = current.category.to_lowercase();

        let query = Self::newest_first().filter(Filter::neq("slug", current_slug));
        self.fetch("get_related", query)
            .await
            .into_iter()
            .filter(|post| post.id != current.id && post.category.to_lowercase() == category)
            .take(limit)
            .collect()
    }

    /// Slugs and dates of every post, newest first, for the sitemap.
    pub async fn get_sitemap_entries(&self) -> Vec<Post> {
        let query = Query::table(Post::TABLE)
            .select("id,slug,title,created_at")
            .order(Order::desc(Post::CREATED_AT));
        self.fetch("get_sitemap_entries", query).await
    }
}
