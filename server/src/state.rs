//! 共享应用状态

use std::sync::Arc;

use crate::persistence::MaterialRepository;
use crate::upload::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn MaterialRepository>,
    pub uploads: Arc<UploadStore>,
}
