//! Process-wide session state.
//!
//! `SessionStore` is the single source of truth for "who is the current
//! user". It is constructed once per process by the host and injected by
//! reference into every consumer; all writes funnel through `restore`,
//! `login`, and `logout`, which replace the Identity wholesale. The host's
//! event loop serializes those calls, so no interleaving is possible.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::models::{Identity, LoginTokens};
use crate::errors::{ClientError, ClientResult};
use crate::routing;
use crate::storage::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, TokenStorage};
use crate::utils::token;

pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    current: Option<Identity>,
    is_loading: bool,
}

impl SessionStore {
    /// Create a session in its initial loading state. Callers are expected
    /// to run `restore()` before reading the identity.
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        SessionStore {
            storage,
            current: None,
            is_loading: true,
        }
    }

    /// The authenticated identity, if any.
    ///
    /// An identity whose expiry has passed is never exposed: this read path
    /// re-checks `expires_at` so a token that expires while the process is
    /// running stops being authenticated without waiting for a restore.
    pub fn current_identity(&self) -> Option<&Identity> {
        self.current.as_ref().filter(|id| !id.is_expired())
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_identity().is_some()
    }

    /// Rebuild session state from durable storage on process start.
    ///
    /// Bad stored tokens (undecodable or expired) degrade to "logged out"
    /// and clear storage; this never returns an error for them.
    pub fn restore(&mut self) {
        self.is_loading = true;

        match self.storage.get(ACCESS_TOKEN_KEY) {
            Ok(Some(stored)) => match token::decode_identity(&stored) {
                Ok(identity) if !identity.is_expired() => {
                    debug!(user_id = %identity.id, "session restored from storage");
                    self.current = Some(identity);
                }
                Ok(_) => {
                    info!("stored token has expired; clearing session");
                    self.clear_storage();
                    self.current = None;
                }
                Err(err) => {
                    warn!(error = %err, "stored token is unreadable; clearing session");
                    self.clear_storage();
                    self.current = None;
                }
            },
            Ok(None) => {
                self.current = None;
            }
            Err(err) => {
                warn!(error = %err, "token storage unavailable; treating as logged out");
                self.current = None;
            }
        }

        self.is_loading = false;
    }

    /// Establish a session from freshly issued tokens and return the
    /// role-appropriate redirect target.
    ///
    /// Fails closed: if the access token cannot be decoded, or decodes to an
    /// already-expired identity, storage is cleared, no identity is set, and
    /// the error is surfaced for the host to display.
    pub fn login(&mut self, tokens: LoginTokens) -> ClientResult<&'static str> {
        self.storage.set(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        if let Some(refresh) = &tokens.refresh_token {
            self.storage.set(REFRESH_TOKEN_KEY, refresh)?;
        }

        let identity = match token::decode_identity(&tokens.access_token) {
            Ok(identity) if identity.is_expired() => {
                self.clear_storage();
                self.current = None;
                return Err(ClientError::ExpiredToken);
            }
            Ok(identity) => identity,
            Err(err) => {
                self.clear_storage();
                self.current = None;
                return Err(err);
            }
        };

        info!(user_id = %identity.id, role = ?identity.role, "logged in");
        let destination = routing::destination_for(identity.role);
        self.current = Some(identity);
        self.is_loading = false;
        Ok(destination)
    }

    /// Tear down the session and return the public entry view path.
    pub fn logout(&mut self) -> &'static str {
        if let Some(identity) = &self.current {
            info!(user_id = %identity.id, "logged out");
        }
        self.clear_storage();
        self.current = None;
        self.is_loading = false;
        routing::LOGIN_PATH
    }

    /// Forced logout after the server rejected our credentials (401).
    pub fn handle_unauthorized(&mut self) -> &'static str {
        info!("session invalidated by server; forcing logout");
        self.logout()
    }

    // Best effort: a failed clear only means a bad token lingers until the
    // next restore rejects it again.
    fn clear_storage(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, error = %err, "failed to clear token from storage");
            }
        }
    }
}
