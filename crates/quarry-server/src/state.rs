use std::sync::Arc;

use quarry_llm::{CredentialSource, Dispatcher};
use quarry_store::SelectionStore;
use secrecy::SecretString;

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub store: Arc<dyn SelectionStore>,
    pub credentials: Arc<dyn CredentialSource>,
    pub admin_password: Option<Arc<SecretString>>,
}

impl AppState {
    pub fn new(
        dispatcher: Dispatcher,
        store: Arc<dyn SelectionStore>,
        credentials: Arc<dyn CredentialSource>,
        admin_password: Option<SecretString>,
    ) -> Self {
        Self {
            dispatcher,
            store,
            credentials,
            admin_password: admin_password.map(Arc::new),
        }
    }
}
