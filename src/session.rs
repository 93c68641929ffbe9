use leptos::prelude::*;
use tracing::{debug, info, warn};

use crate::api::Backend;
use crate::error::CurioError;

/// The one place that knows who is signed in.
///
/// Created once by the root component and handed to every view through
/// context. Only the flows below write the identity.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    identity: RwSignal<Option<String>>,
    generation: StoredValue<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            identity: RwSignal::new(None),
            generation: StoredValue::new(0),
        }
    }

    /// Tracked read, for view closures that branch on authentication.
    pub fn identity(&self) -> Option<String> {
        self.identity.get()
    }

    pub fn identity_untracked(&self) -> Option<String> {
        self.identity.get_untracked()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.with(Option::is_some)
    }

    pub fn set_identity(&self, identity: Option<String>) {
        self.identity.set(identity);
    }

    fn bump(&self) -> Option<u64> {
        self.generation.try_update_value(|g| {
            *g += 1;
            *g
        })
    }

    fn is_current(&self, stamp: Option<u64>) -> bool {
        stamp.is_some() && self.generation.try_get_value() == stamp
    }

    /// Ask the server who owns the current cookies. Any failure means
    /// "nobody" and is not an error. An answer that arrives after a login
    /// or logout started is dropped; the identity held then is returned.
    pub async fn probe<B: Backend + ?Sized>(self, api: &B) -> Option<String> {
        let stamp = self.bump();
        let identity = match api.current_user().await {
            Ok(user) => Some(user.username),
            Err(e) => {
                debug!("No active session: {}", e);
                None
            }
        };

        if !self.is_current(stamp) {
            debug!("Dropping superseded identity probe");
            return self.identity.try_get_untracked().flatten();
        }
        if let Some(name) = &identity {
            info!("Session restored for {}", name);
        }
        self.set_identity(identity.clone());
        identity
    }

    /// Log in, then hydrate the identity from the probe. A rejected login
    /// leaves the session as it was.
    pub async fn login<B: Backend + ?Sized>(
        self,
        api: &B,
        username: &str,
        password: &str,
    ) -> Result<String, CurioError> {
        check_credentials(username, password, "Please enter a username and password")?;
        let stamp = self.bump();
        api.login(username, password).await?;

        let user = api.current_user().await.inspect_err(|e| {
            warn!("Login accepted but identity probe failed: {}", e);
        })?;
        info!("Logged in as {}", user.username);
        if self.is_current(stamp) {
            self.set_identity(Some(user.username.clone()));
        }
        Ok(user.username)
    }

    /// Create an account. The identity is untouched: a new account still
    /// has to log in.
    pub async fn register<B: Backend + ?Sized>(
        self,
        api: &B,
        username: &str,
        password: &str,
    ) -> Result<(), CurioError> {
        check_credentials(username, password, "Please choose a username and password")?;
        match api.register(username, password).await {
            Ok(()) => {
                info!("Registered {}", username);
                Ok(())
            }
            Err(e) => {
                warn!("Registration of {} failed: {}", username, e);
                Err(e)
            }
        }
    }

    /// Clear the identity only once the server confirms the logout.
    pub async fn logout<B: Backend + ?Sized>(self, api: &B) -> Result<(), CurioError> {
        let stamp = self.bump();
        match api.logout().await {
            Ok(()) => {
                info!("Logged out");
                if self.is_current(stamp) {
                    self.set_identity(None);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Logout failed, keeping session: {}", e);
                Err(e)
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn check_credentials(username: &str, password: &str, message: &str) -> Result<(), CurioError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(CurioError::Validation(message.to_string()));
    }
    Ok(())
}
