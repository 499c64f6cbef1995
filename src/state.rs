use std::sync::Arc;

use crate::config::Config;
use crate::mail::Mailer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub mailer: Mailer,
}

impl AppState {
    pub fn new(config: Config, mailer: Mailer) -> Self {
        Self {
            config: Arc::new(config),
            mailer,
        }
    }
}
