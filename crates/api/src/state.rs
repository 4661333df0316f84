use std::sync::Arc;

use tfe_core::admin::ContentAdmin;
use tfe_core::cache::{CacheInvalidator, ViewCache};
use tfe_core::rate_limit::{FixedWindowLimiter, RateLimiter};
use tfe_core::store::ContentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend. The public read views go straight to it.
    pub store: Arc<dyn ContentStore>,
    /// Admin workflow service, sharing `store` and `views`.
    pub admin: ContentAdmin,
    /// Cached public views, invalidated by admin mutations.
    pub views: Arc<ViewCache>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the admin service to `store` with a wall-clock rate limiter.
    pub fn new(store: Arc<dyn ContentStore>, config: ServerConfig) -> Self {
        Self::with_limiter(store, Arc::new(FixedWindowLimiter::system()), config)
    }

    pub fn with_limiter(
        store: Arc<dyn ContentStore>,
        limiter: Arc<dyn RateLimiter>,
        config: ServerConfig,
    ) -> Self {
        let views = Arc::new(ViewCache::new());
        let invalidator: Arc<dyn CacheInvalidator> = views.clone();
        let admin = ContentAdmin::new(
            Arc::clone(&store),
            limiter,
            invalidator,
            config.rate_limits.budgets(),
        );
        Self {
            store,
            admin,
            views,
            config: Arc::new(config),
        }
    }
}
