use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::CurioError;
use crate::models::{
    CommentId, Credentials, CurrentUser, InterestAck, NewComment, PostDetail, PostDraft, PostId,
    PostSummary, TagCandidate, Vote,
};
use crate::posts::Feed;

/// Every call the client makes to the catalog server.
///
/// Futures are not `Send`: in the browser they run on the single
/// `spawn_local` executor.
#[async_trait(?Send)]
pub trait Backend {
    async fn current_user(&self) -> Result<CurrentUser, CurioError>;
    async fn login(&self, username: &str, password: &str) -> Result<(), CurioError>;
    async fn logout(&self) -> Result<(), CurioError>;
    async fn register(&self, username: &str, password: &str) -> Result<(), CurioError>;
    async fn list_posts(&self, feed: &Feed) -> Result<Vec<PostSummary>, CurioError>;
    async fn get_post(&self, id: PostId) -> Result<PostDetail, CurioError>;
    async fn create_post(&self, draft: &PostDraft) -> Result<(), CurioError>;
    async fn toggle_interest(&self, id: PostId) -> Result<InterestAck, CurioError>;
    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<(), CurioError>;
    async fn vote_comment(&self, comment_id: CommentId, is_upvote: bool) -> Result<(), CurioError>;
    async fn search_tags(&self, query: &str) -> Result<Vec<TagCandidate>, CurioError>;
}

/// A completed request with a success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Body(String),
    Empty,
}

impl Reply {
    pub fn json<T: DeserializeOwned>(self) -> Result<T, CurioError> {
        match self {
            Reply::Body(text) => {
                serde_json::from_str(&text).map_err(|e| CurioError::Decode(e.to_string()))
            }
            Reply::Empty => Err(CurioError::Decode("empty response body".to_string())),
        }
    }
}

/// Sort a finished response into a success reply or a client error.
pub fn classify(status: u16, body: String) -> Result<Reply, CurioError> {
    if (200..300).contains(&status) {
        if body.trim().is_empty() {
            Ok(Reply::Empty)
        } else {
            Ok(Reply::Body(body))
        }
    } else {
        Err(CurioError::Client {
            status,
            detail: extract_detail(status, &body),
        })
    }
}

/// Pull the human-readable `detail` out of an error body. Structured
/// details (validation lists) are kept as JSON text.
fn extract_detail(status: u16, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    match parsed.as_ref().and_then(|v| v.get("detail")) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status)),
        Some(other) => other.to_string(),
    }
}

/// The gateway: one origin, cookies attached to every request, one attempt
/// per call.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        with_credentials(self.client.get(self.config.endpoint(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        with_credentials(self.client.post(self.config.endpoint(path)))
    }

    async fn execute(&self, request: RequestBuilder, label: &str) -> Result<Reply, CurioError> {
        debug!("Request: {}", label);
        let response = request.send().await.map_err(|e| {
            warn!("{} failed before a response: {}", label, e);
            CurioError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            warn!("{} body could not be read: {}", label, e);
            CurioError::Network(e.to_string())
        })?;

        classify(status, body).inspect_err(|e| {
            warn!("{} returned {}: {}", label, status, e);
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(request: RequestBuilder) -> RequestBuilder {
    request
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn current_user(&self) -> Result<CurrentUser, CurioError> {
        self.execute(self.get("/users/me"), "GET /users/me")
            .await?
            .json()
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), CurioError> {
        let request = self.post("/login").form(&Credentials { username, password });
        self.execute(request, "POST /login").await.map(|_| ())
    }

    async fn logout(&self) -> Result<(), CurioError> {
        self.execute(self.post("/logout"), "POST /logout")
            .await
            .map(|_| ())
    }

    async fn register(&self, username: &str, password: &str) -> Result<(), CurioError> {
        let request = self.post("/register").json(&Credentials { username, password });
        self.execute(request, "POST /register").await.map(|_| ())
    }

    async fn list_posts(&self, feed: &Feed) -> Result<Vec<PostSummary>, CurioError> {
        let mut request = self.get(feed.path());
        if let Feed::Search(query) = feed {
            request = request.query(&[("query", query.as_str())]);
        }
        self.execute(request, &format!("GET {}", feed.path()))
            .await?
            .json()
    }

    async fn get_post(&self, id: PostId) -> Result<PostDetail, CurioError> {
        let path = format!("/posts/{}", id);
        self.execute(self.get(&path), &format!("GET {}", path))
            .await?
            .json()
    }

    async fn create_post(&self, draft: &PostDraft) -> Result<(), CurioError> {
        let mut form = Form::new();
        for (name, value) in draft.form_fields() {
            form = form.text(name, value);
        }
        if let Some(image) = &draft.image {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)
                .map_err(|e| {
                    CurioError::Validation(format!("Unsupported image type '{}': {}", image.content_type, e))
                })?;
            form = form.part("image", part);
        }

        let request = self.post("/posts").multipart(form);
        self.execute(request, "POST /posts").await.map(|_| ())
    }

    async fn toggle_interest(&self, id: PostId) -> Result<InterestAck, CurioError> {
        let path = format!("/posts/{}/interested", id);
        self.execute(self.post(&path), &format!("POST {}", path))
            .await?
            .json()
    }

    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<(), CurioError> {
        let path = format!("/posts/{}/comments", post_id);
        let request = self.post(&path).json(&NewComment { content });
        self.execute(request, &format!("POST {}", path))
            .await
            .map(|_| ())
    }

    async fn vote_comment(&self, comment_id: CommentId, is_upvote: bool) -> Result<(), CurioError> {
        let path = format!("/comments/{}/vote", comment_id);
        let request = self.post(&path).json(&Vote { is_upvote });
        self.execute(request, &format!("POST {}", path))
            .await
            .map(|_| ())
    }

    async fn search_tags(&self, query: &str) -> Result<Vec<TagCandidate>, CurioError> {
        let request = self.get("/tags/search").query(&[("query", query)]);
        self.execute(request, "GET /tags/search").await?.json()
    }
}
