use std::sync::Arc;

use taskboard_db::DbPool;

use crate::config::ServerConfig;
use crate::storage::ImageStore;

/// Shared application state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    pub images: Arc<ImageStore>,
}
