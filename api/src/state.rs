use std::sync::Arc;
use tutor_system::AnswerService;

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<AnswerService>,
}

impl AppState {
    pub fn new(answer_service: AnswerService) -> Self {
        Self {
            answer_service: Arc::new(answer_service),
        }
    }
}
