use std::sync::Arc;

use crate::auth::CredentialService;
use crate::config::AppConfig;
use crate::database::Store;

/// Process-wide, immutable dependencies shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub credentials: Arc<CredentialService>,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let credentials = CredentialService::new(&config.security);
        Self {
            config: Arc::new(config),
            credentials: Arc::new(credentials),
            store,
        }
    }
}

/// State over `store` with a fixed secret and the cheapest bcrypt cost.
#[cfg(test)]
pub(crate) fn test_state(store: Arc<dyn Store>) -> AppState {
    let config = AppConfig::from_lookup(|name| match name {
        "JWT_SECRET" => Some("test-secret".to_string()),
        "SECURITY_BCRYPT_COST" => Some(crate::config::MIN_BCRYPT_COST.to_string()),
        _ => None,
    })
    .expect("test configuration is valid");
    AppState::new(config, store)
}
