use std::sync::Arc;

use crate::features::relay::RelayService;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
    pub api_key: Option<Arc<String>>,
}

impl AppState {
    pub fn new(relay: Arc<RelayService>, api_key: Option<String>) -> Self {
        Self {
            relay,
            api_key: api_key.map(Arc::new),
        }
    }
}
