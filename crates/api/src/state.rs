//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::db::{AccountStore, MemoryStore, PgAccountStore, PgProductStore, ProductStore};
use crate::services::auth::{AuthError, AuthService, CredentialManager, TokenService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything inside is either
/// immutable after startup (keys, work factor) or internally synchronized
/// (the stores).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    accounts: Arc<dyn AccountStore>,
    products: Arc<dyn ProductStore>,
    credentials: CredentialManager,
    tokens: TokenService,
}

impl AppState {
    /// Create application state from explicit parts.
    #[must_use]
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        products: Arc<dyn ProductStore>,
        credentials: CredentialManager,
        tokens: TokenService,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                accounts,
                products,
                credentials,
                tokens,
            }),
        }
    }

    /// State backed by `PostgreSQL`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if the configured work factor is
    /// rejected by Argon2.
    pub fn postgres(config: &ApiConfig, pool: PgPool) -> Result<Self, AuthError> {
        Ok(Self::new(
            Arc::new(PgAccountStore::new(pool.clone())),
            Arc::new(PgProductStore::new(pool)),
            CredentialManager::new(config.password_hash)?,
            TokenService::new(&config.token),
        ))
    }

    /// State backed by a single in-memory store.
    #[must_use]
    pub fn in_memory(credentials: CredentialManager, tokens: TokenService) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, credentials, tokens)
    }

    #[must_use]
    pub fn accounts(&self) -> &dyn AccountStore {
        self.inner.accounts.as_ref()
    }

    #[must_use]
    pub fn products(&self) -> &dyn ProductStore {
        self.inner.products.as_ref()
    }

    /// Get the bearer token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Authentication service borrowing this state.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(
            self.accounts(),
            &self.inner.credentials,
            &self.inner.tokens,
        )
    }
}
