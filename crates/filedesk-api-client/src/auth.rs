//! Bearer credential management.
//!
//! [`CredentialManager`] owns the only cached access token of the process and
//! guarantees at most one login exchange is outstanding at a time. Callers
//! that arrive while a login is running await that same login instead of
//! starting another one.
//!
//! Lifecycle of the cached token: absent -> cached (first successful login)
//! -> absent again only through [`CredentialManager::invalidate`]. Tokens are
//! never refreshed or expired here; a long-running process keeps using the
//! same token until someone invalidates it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use filedesk_core::{ApiResponse, ClientConfig, LoginData, LoginRequest};
use futures::future::{BoxFuture, FutureExt, Shared};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::{AuthError, ClientError};

/// Performs the login exchange and yields a bearer token.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_token(&self) -> Result<String, AuthError>;
}

/// Logs in against `POST {auth_url}/login` with fixed credentials.
pub struct HttpTokenSource {
    client: Client,
    login_url: String,
    credentials: LoginRequest,
}

impl HttpTokenSource {
    pub fn new(client: Client, config: &ClientConfig) -> Self {
        Self {
            client,
            login_url: config.login_url(),
            credentials: LoginRequest {
                login_id: config.login_id.clone(),
                password: config.password.clone(),
            },
        }
    }
}

#[async_trait]
impl TokenSource for HttpTokenSource {
    async fn fetch_token(&self) -> Result<String, AuthError> {
        debug!(url = %self.login_url, login_id = %self.credentials.login_id, "Logging in");

        let response = self
            .client
            .post(&self.login_url)
            .json(&self.credentials)
            .send()
            .await
            .map_err(|e| AuthError(format!("Login request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError(format!("Login failed with status {}", status)));
        }

        let envelope: ApiResponse<LoginData> = response
            .json()
            .await
            .map_err(|_| AuthError("Invalid login response".to_string()))?;

        if !envelope.success {
            return Err(AuthError("Invalid login response".to_string()));
        }

        envelope
            .data
            .and_then(|data| data.access_token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError("Invalid login response".to_string()))
    }
}

type PendingLogin = Shared<BoxFuture<'static, Result<String, AuthError>>>;

#[derive(Default)]
struct CredentialState {
    token: Option<String>,
    in_flight: Option<PendingLogin>,
}

fn lock(state: &Mutex<CredentialState>) -> MutexGuard<'_, CredentialState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Single-flight cache for the bearer token.
///
/// The state lock is only held for synchronous bookkeeping, never across an
/// await. The login itself runs on its own task, so it finishes (and fills
/// the cache) even if every caller waiting on it has been dropped.
///
/// Starting a login spawns onto the current Tokio runtime, so [`acquire`]
/// must be polled from within one.
///
/// [`acquire`]: CredentialManager::acquire
pub struct CredentialManager {
    source: Arc<dyn TokenSource>,
    state: Arc<Mutex<CredentialState>>,
}

impl CredentialManager {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(CredentialState::default())),
        }
    }

    /// Manager backed by the HTTP login endpoint from `config`.
    pub fn from_config(client: Client, config: &ClientConfig) -> Self {
        Self::new(Arc::new(HttpTokenSource::new(client, config)))
    }

    /// Cached token, or the result of the (possibly shared) login exchange.
    pub async fn acquire(&self) -> Result<String, ClientError> {
        let pending = {
            let mut state = lock(&self.state);
            if let Some(token) = &state.token {
                return Ok(token.clone());
            }
            match &state.in_flight {
                Some(pending) => {
                    debug!("Joining in-flight login");
                    pending.clone()
                }
                None => {
                    let pending = self.start_login();
                    state.in_flight = Some(pending.clone());
                    pending
                }
            }
        };

        pending.await.map_err(ClientError::from)
    }

    /// `Authorization` header pair for the current token.
    pub async fn auth_header(&self) -> Result<(&'static str, String), ClientError> {
        let token = self.acquire().await?;
        Ok(("Authorization", format!("Bearer {}", token)))
    }

    /// Drop the cached token. A login already in flight is not cancelled and
    /// will cache its result when it completes.
    pub fn invalidate(&self) {
        lock(&self.state).token = None;
        debug!("Cached credential invalidated");
    }

    /// Token currently cached, without logging in.
    pub fn cached_token(&self) -> Option<String> {
        lock(&self.state).token.clone()
    }

    pub fn is_login_in_flight(&self) -> bool {
        lock(&self.state).in_flight.is_some()
    }

    // Called with the state lock held; the spawned task cannot settle before
    // the caller has stored the returned handle.
    fn start_login(&self) -> PendingLogin {
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        let task = tokio::spawn(async move {
            let result = source.fetch_token().await;
            let mut guard = lock(&state);
            guard.in_flight = None;
            match &result {
                Ok(token) => {
                    guard.token = Some(token.clone());
                    info!("Login succeeded, credential cached");
                }
                Err(e) => warn!(error = %e, "Login failed"),
            }
            result
        });

        let state = Arc::clone(&self.state);
        async move {
            match task.await {
                Ok(result) => result,
                Err(e) => {
                    lock(&state).in_flight = None;
                    Err(AuthError(format!("Login task failed: {}", e)))
                }
            }
        }
        .boxed()
        .shared()
    }
}
