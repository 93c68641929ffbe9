use std::time::Duration;

use url::Url;

use crate::error::CurioError;

pub const DEFAULT_BACKEND_ORIGIN: &str = "http://localhost:8000";

/// Quiet period before the tag lookup issues a query.
pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(500);

/// Client settings, fixed at build time and shared through context.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub backend_origin: Url,
    pub lookup_delay: Duration,
}

impl ClientConfig {
    /// Read `CURIO_BACKEND_URL` as baked in by the build, falling back to
    /// the local development server.
    pub fn from_build_env() -> Result<Self, CurioError> {
        let origin = option_env!("CURIO_BACKEND_URL").unwrap_or(DEFAULT_BACKEND_ORIGIN);
        Self::with_origin(origin)
    }

    pub fn with_origin(origin: &str) -> Result<Self, CurioError> {
        let url = Url::parse(origin.trim())
            .map_err(|e| CurioError::Config(format!("Invalid backend URL '{}': {}", origin, e)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(CurioError::Config(format!(
                    "Backend URL must use http or https, got '{}'",
                    other
                )))
            }
        }

        if url.host_str().is_none() {
            return Err(CurioError::Config(format!("No host in backend URL: {}", origin)));
        }

        Ok(Self {
            backend_origin: url,
            lookup_delay: DEFAULT_LOOKUP_DELAY,
        })
    }

    /// The origin without a trailing slash, ready for path concatenation.
    pub fn origin_str(&self) -> &str {
        self.backend_origin.as_str().trim_end_matches('/')
    }

    /// Build the absolute URL of a backend path such as `/posts/42`.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.origin_str(), path)
        } else {
            format!("{}/{}", self.origin_str(), path)
        }
    }

    /// Image fields come back as server-relative paths; absolute URLs pass
    /// through untouched.
    pub fn resolve_media(&self, image_ref: &str) -> String {
        if Url::parse(image_ref).is_ok() {
            return image_ref.to_string();
        }
        self.endpoint(image_ref)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_origin: Url::parse(DEFAULT_BACKEND_ORIGIN).expect("default origin is valid"),
            lookup_delay: DEFAULT_LOOKUP_DELAY,
        }
    }
}
