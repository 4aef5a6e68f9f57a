use std::sync::Arc;

use crate::cache::DataCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<DataCache>,
}

impl AppState {
    pub fn new(cache: DataCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }
}
