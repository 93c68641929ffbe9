use leptos::prelude::*;
use tracing::{debug, warn};

use crate::api::Backend;
use crate::error::CurioError;
use crate::models::{CommentId, PostDetail, PostId, Tag};

pub const NO_TAGS_NOTICE: &str = "No tags available.";
pub const NO_COMMENTS_NOTICE: &str = "No comments yet.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Failed(String),
    Loaded(PostDetail),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTone {
    Positive,
    Negative,
    Neutral,
}

impl ScoreTone {
    pub fn class(self) -> &'static str {
        match self {
            ScoreTone::Positive => "score score-positive",
            ScoreTone::Negative => "score score-negative",
            ScoreTone::Neutral => "score score-neutral",
        }
    }
}

/// How a comment score is shown: explicit `+` for positive, the raw number
/// for negative, plain `0` otherwise.
pub fn score_display(score: i64) -> (String, ScoreTone) {
    match score {
        s if s > 0 => (format!("+{}", s), ScoreTone::Positive),
        s if s < 0 => (s.to_string(), ScoreTone::Negative),
        _ => ("0".to_string(), ScoreTone::Neutral),
    }
}

pub fn tags_notice(tags: &[Tag]) -> Option<&'static str> {
    tags.is_empty().then_some(NO_TAGS_NOTICE)
}

/// State behind the single-post page. The post is always replaced as a
/// whole; mutations are followed by a fresh load.
#[derive(Debug, Clone, Copy)]
pub struct PostDetailController {
    view: RwSignal<DetailView>,
    comment_draft: RwSignal<String>,
    notice: RwSignal<Option<String>>,
    generation: StoredValue<u64>,
}

impl PostDetailController {
    pub fn new() -> Self {
        Self {
            view: RwSignal::new(DetailView::Loading),
            comment_draft: RwSignal::new(String::new()),
            notice: RwSignal::new(None),
            generation: StoredValue::new(0),
        }
    }

    pub fn view(&self) -> Signal<DetailView> {
        self.view.into()
    }

    pub fn snapshot(&self) -> DetailView {
        self.view.get_untracked()
    }

    pub fn comment_draft(&self) -> RwSignal<String> {
        self.comment_draft
    }

    pub fn notice(&self) -> Signal<Option<String>> {
        self.notice.into()
    }

    pub async fn load_detail<B: Backend + ?Sized>(self, api: &B, id: PostId) {
        let Some(stamp) = self.generation.try_update_value(|g| {
            *g += 1;
            *g
        }) else {
            return;
        };

        let result = api.get_post(id).await;
        if self.generation.try_get_value() != Some(stamp) {
            return;
        }
        match result {
            Ok(post) => self.view.set(DetailView::Loaded(post)),
            Err(e) => {
                warn!("Failed to load post {}: {}", id, e);
                self.view.set(DetailView::Failed(e.to_string()));
            }
        }
    }

    /// Post a comment, then reload. Blank content never reaches the
    /// server; a rejected comment keeps the draft for another try.
    pub async fn submit_comment<B: Backend + ?Sized>(
        self,
        api: &B,
        post_id: PostId,
        content: &str,
    ) -> Result<(), CurioError> {
        if content.trim().is_empty() {
            let err = CurioError::Validation("Comment cannot be empty".to_string());
            self.notice.set(Some(err.to_string()));
            return Err(err);
        }

        self.notice.set(None);
        let stamp = self.generation.try_get_value();
        let result = api.add_comment(post_id, content).await;
        if !self.still_showing(stamp) {
            debug!("Post {} left before its comment returned", post_id);
            return result;
        }
        if let Err(e) = result {
            warn!("Comment on post {} rejected: {}", post_id, e);
            self.notice.set(Some(e.to_string()));
            return Err(e);
        }

        self.comment_draft.set(String::new());
        self.load_detail(api, post_id).await;
        Ok(())
    }

    /// Vote, then reload the owning post. Scores are never adjusted
    /// locally because other users vote concurrently.
    pub async fn submit_vote<B: Backend + ?Sized>(
        self,
        api: &B,
        post_id: PostId,
        comment_id: CommentId,
        is_upvote: bool,
    ) -> Result<(), CurioError> {
        self.notice.set(None);
        let stamp = self.generation.try_get_value();
        let result = api.vote_comment(comment_id, is_upvote).await;
        if !self.still_showing(stamp) {
            debug!("Post {} left before its vote returned", post_id);
            return result;
        }
        if let Err(e) = result {
            warn!("Vote on comment {} failed: {}", comment_id, e);
            self.notice.set(Some(e.to_string()));
            return Err(e);
        }

        self.load_detail(api, post_id).await;
        Ok(())
    }

    /// Whether no load started since `stamp` was read. A mutation whose
    /// page was replaced meanwhile must not reload the old post.
    fn still_showing(&self, stamp: Option<u64>) -> bool {
        stamp.is_some() && self.generation.try_get_value() == stamp
    }
}

impl Default for PostDetailController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_display_boundaries() {
        assert_eq!(score_display(5), ("+5".to_string(), ScoreTone::Positive));
        assert_eq!(score_display(1), ("+1".to_string(), ScoreTone::Positive));
        assert_eq!(score_display(0), ("0".to_string(), ScoreTone::Neutral));
        assert_eq!(score_display(-1), ("-1".to_string(), ScoreTone::Negative));
        assert_eq!(score_display(-12), ("-12".to_string(), ScoreTone::Negative));
    }

    #[test]
    fn test_score_classes_are_distinct() {
        let classes = [
            ScoreTone::Positive.class(),
            ScoreTone::Negative.class(),
            ScoreTone::Neutral.class(),
        ];
        assert_ne!(classes[0], classes[1]);
        assert_ne!(classes[1], classes[2]);
        assert_ne!(classes[0], classes[2]);
    }

    #[test]
    fn test_tags_notice() {
        assert_eq!(tags_notice(&[]), Some("No tags available."));
        let tag = Tag {
            label: "Stone".to_string(),
            description: None,
            external_reference_url: None,
        };
        assert_eq!(tags_notice(&[tag]), None);
    }
}
