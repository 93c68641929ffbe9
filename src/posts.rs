use leptos::prelude::*;
use tracing::warn;

use crate::api::Backend;
use crate::error::CurioError;
use crate::models::{PostId, PostSummary};

/// Which collection a list view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    All,
    Hot,
    Search(String),
}

impl Feed {
    pub fn path(&self) -> &'static str {
        match self {
            Feed::All => "/posts",
            Feed::Hot => "/posts/hot",
            Feed::Search(_) => "/posts/search",
        }
    }

    pub fn empty_notice(&self) -> &'static str {
        match self {
            Feed::All => "No posts available yet.",
            Feed::Hot => "No hot posts available yet.",
            Feed::Search(_) => "No posts match your search query.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionView {
    Loading,
    Failed(String),
    Loaded(Vec<PostSummary>),
}

impl CollectionView {
    /// The literal notice for a successful fetch with no items.
    pub fn empty_notice(&self, feed: &Feed) -> Option<&'static str> {
        match self {
            CollectionView::Loaded(posts) if posts.is_empty() => Some(feed.empty_notice()),
            _ => None,
        }
    }

    pub fn interest_count(&self, id: PostId) -> Option<u32> {
        match self {
            CollectionView::Loaded(posts) => {
                posts.iter().find(|p| p.id == id).map(|p| p.interest_count)
            }
            _ => None,
        }
    }
}

/// State behind a post grid: the held collection plus a one-shot notice
/// for failed per-item actions.
#[derive(Debug, Clone, Copy)]
pub struct PostListController {
    view: RwSignal<CollectionView>,
    notice: RwSignal<Option<String>>,
    generation: StoredValue<u64>,
}

impl PostListController {
    pub fn new() -> Self {
        Self {
            view: RwSignal::new(CollectionView::Loading),
            notice: RwSignal::new(None),
            generation: StoredValue::new(0),
        }
    }

    pub fn view(&self) -> Signal<CollectionView> {
        self.view.into()
    }

    pub fn notice(&self) -> Signal<Option<String>> {
        self.notice.into()
    }

    pub fn snapshot(&self) -> CollectionView {
        self.view.get_untracked()
    }

    pub fn dismiss_notice(&self) {
        self.notice.set(None);
    }

    /// Fetch the feed and replace the whole collection. A response that
    /// arrives after a newer load started is dropped.
    pub async fn load_collection<B: Backend + ?Sized>(self, api: &B, feed: &Feed) {
        let Some(stamp) = self.generation.try_update_value(|g| {
            *g += 1;
            *g
        }) else {
            return;
        };
        self.view.set(CollectionView::Loading);

        let result = api.list_posts(feed).await;
        if self.generation.try_get_value() != Some(stamp) {
            return;
        }
        match result {
            Ok(posts) => self.view.set(CollectionView::Loaded(posts)),
            Err(e) => {
                warn!("Failed to load {}: {}", feed.path(), e);
                self.view.set(CollectionView::Failed(e.to_string()));
            }
        }
    }

    /// Toggle interest on one post and copy the server's count into that
    /// post only. Nothing changes until the server answers.
    pub async fn apply_interest_toggle<B: Backend + ?Sized>(
        self,
        api: &B,
        post_id: PostId,
    ) -> Result<u32, CurioError> {
        self.notice.set(None);
        match api.toggle_interest(post_id).await {
            Ok(ack) => {
                self.view.update(|view| {
                    if let CollectionView::Loaded(posts) = view {
                        if let Some(post) = posts.iter_mut().find(|p| p.id == post_id) {
                            post.interest_count = ack.interest_count;
                        }
                    }
                });
                Ok(ack.interest_count)
            }
            Err(e) => {
                warn!("Interest toggle on post {} failed: {}", post_id, e);
                self.notice.set(Some(format!("Error: {}", e)));
                Err(e)
            }
        }
    }
}

impl Default for PostListController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: PostId) -> PostSummary {
        PostSummary {
            id,
            title: format!("Post {}", id),
            creator: "alice".to_string(),
            image_ref: None,
            interest_count: 0,
            description: None,
        }
    }

    #[test]
    fn test_empty_notice_only_for_loaded_empty() {
        let feed = Feed::All;
        assert_eq!(
            CollectionView::Loaded(vec![]).empty_notice(&feed),
            Some("No posts available yet.")
        );
        assert_eq!(CollectionView::Loaded(vec![post(1)]).empty_notice(&feed), None);
        assert_eq!(CollectionView::Loading.empty_notice(&feed), None);
        assert_eq!(
            CollectionView::Failed("boom".to_string()).empty_notice(&feed),
            None
        );
    }

    #[test]
    fn test_feed_paths() {
        assert_eq!(Feed::All.path(), "/posts");
        assert_eq!(Feed::Hot.path(), "/posts/hot");
        assert_eq!(Feed::Search("mug".to_string()).path(), "/posts/search");
        assert_eq!(
            Feed::Search(String::new()).empty_notice(),
            "No posts match your search query."
        );
    }
}
