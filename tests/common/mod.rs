#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::oneshot;

use curio::api::Backend;
use curio::error::CurioError;
use curio::models::{
    Comment, CommentAuthor, CommentId, CurrentUser, InterestAck, PostDetail, PostDraft, PostId,
    PostSummary, TagCandidate,
};
use curio::posts::Feed;

type Queue<T> = RefCell<VecDeque<Result<T, CurioError>>>;

/// Backend that answers from scripted queues and records every call.
#[derive(Default)]
pub struct FakeBackend {
    pub calls: RefCell<Vec<String>>,
    pub users: Queue<CurrentUser>,
    pub logins: Queue<()>,
    pub logouts: Queue<()>,
    pub registrations: Queue<()>,
    pub posts: Queue<Vec<PostSummary>>,
    pub details: Queue<PostDetail>,
    pub interests: Queue<InterestAck>,
    pub comments: Queue<()>,
    pub votes: Queue<()>,
    pub tags: Queue<Vec<TagCandidate>>,
    /// When set, the next `list_posts` waits for this before answering.
    pub posts_gate: RefCell<Option<oneshot::Receiver<()>>>,
    /// When set, the next `search_tags` waits for this before answering.
    pub tags_gate: RefCell<Option<oneshot::Receiver<()>>>,
    /// When set, the next `current_user` waits for this before answering.
    pub users_gate: RefCell<Option<oneshot::Receiver<()>>>,
    /// When set, the next `add_comment` waits for this before answering.
    pub comments_gate: RefCell<Option<oneshot::Receiver<()>>>,
    /// When set, the next `vote_comment` waits for this before answering.
    pub votes_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

fn next<T>(queue: &Queue<T>, what: &str) -> Result<T, CurioError> {
    queue
        .borrow_mut()
        .pop_front()
        .unwrap_or_else(|| Err(CurioError::Network(format!("unscripted call: {}", what))))
}

async fn wait(gate: &RefCell<Option<oneshot::Receiver<()>>>) {
    let rx = gate.borrow_mut().take();
    if let Some(rx) = rx {
        let _ = rx.await;
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn current_user(&self) -> Result<CurrentUser, CurioError> {
        self.record("GET /users/me".to_string());
        let answer = next(&self.users, "current_user");
        wait(&self.users_gate).await;
        answer
    }

    async fn login(&self, username: &str, _password: &str) -> Result<(), CurioError> {
        self.record(format!("POST /login {}", username));
        next(&self.logins, "login")
    }

    async fn logout(&self) -> Result<(), CurioError> {
        self.record("POST /logout".to_string());
        next(&self.logouts, "logout")
    }

    async fn register(&self, username: &str, _password: &str) -> Result<(), CurioError> {
        self.record(format!("POST /register {}", username));
        next(&self.registrations, "register")
    }

    async fn list_posts(&self, feed: &Feed) -> Result<Vec<PostSummary>, CurioError> {
        self.record(format!("GET {}", feed.path()));
        let answer = next(&self.posts, "list_posts");
        wait(&self.posts_gate).await;
        answer
    }

    async fn get_post(&self, id: PostId) -> Result<PostDetail, CurioError> {
        self.record(format!("GET /posts/{}", id));
        next(&self.details, "get_post")
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<(), CurioError> {
        self.record(format!("POST /posts {}", draft.title));
        Ok(())
    }

    async fn toggle_interest(&self, id: PostId) -> Result<InterestAck, CurioError> {
        self.record(format!("POST /posts/{}/interested", id));
        next(&self.interests, "toggle_interest")
    }

    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<(), CurioError> {
        self.record(format!("POST /posts/{}/comments {}", post_id, content));
        let answer = next(&self.comments, "add_comment");
        wait(&self.comments_gate).await;
        answer
    }

    async fn vote_comment(&self, comment_id: CommentId, is_upvote: bool) -> Result<(), CurioError> {
        self.record(format!("POST /comments/{}/vote {}", comment_id, is_upvote));
        let answer = next(&self.votes, "vote_comment");
        wait(&self.votes_gate).await;
        answer
    }

    async fn search_tags(&self, query: &str) -> Result<Vec<TagCandidate>, CurioError> {
        self.record(format!("GET /tags/search {}", query));
        let answer = next(&self.tags, "search_tags");
        wait(&self.tags_gate).await;
        answer
    }
}

// -- Fixtures --

pub fn user(name: &str) -> CurrentUser {
    CurrentUser {
        id: Some(1),
        username: name.to_string(),
    }
}

pub fn client_error(status: u16, detail: &str) -> CurioError {
    CurioError::Client {
        status,
        detail: detail.to_string(),
    }
}

pub fn summary(id: PostId, interest_count: u32) -> PostSummary {
    PostSummary {
        id,
        title: format!("Object {}", id),
        creator: "alice".to_string(),
        image_ref: Some(format!("/static/{}.jpg", id)),
        interest_count,
        description: None,
    }
}

pub fn comment(id: CommentId, score: i64) -> Comment {
    Comment {
        id,
        author: CommentAuthor {
            username: "bob".to_string(),
        },
        content: format!("Comment {}", id),
        score,
    }
}

pub fn detail(id: PostId, comments: Vec<Comment>) -> PostDetail {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("Object {}", id),
        "creator": "alice",
        "image_url": null,
        "interest_count": 0,
        "tags": [],
        "comments": comments,
    }))
    .expect("fixture detail is valid")
}
