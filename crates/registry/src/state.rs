//! Application state shared across lookup-server handlers.

use std::sync::Arc;

use crate::services::resolver::PostalResolver;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    resolver: PostalResolver,
}

impl AppState {
    /// Build the shared state around a resolver client.
    #[must_use]
    pub fn new(resolver: PostalResolver) -> Self {
        Self {
            inner: Arc::new(AppStateInner { resolver }),
        }
    }

    /// The postal-code resolver client.
    #[must_use]
    pub fn resolver(&self) -> &PostalResolver {
        &self.inner.resolver
    }
}
