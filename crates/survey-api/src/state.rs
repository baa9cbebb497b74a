use std::sync::Arc;

use crate::submission::SurveyService;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SurveyService>,
}

impl AppState {
    pub fn new(service: SurveyService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
