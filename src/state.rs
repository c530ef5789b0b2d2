//! Shared application state injected into handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::config::VisitCounting;
use crate::domain::visit_event::VisitEvent;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Producer side of the best-effort visit queue.
    pub visit_sender: mpsc::Sender<VisitEvent>,
    pub visit_counting: VisitCounting,
    /// Public prefix of generated short URLs.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        visit_sender: mpsc::Sender<VisitEvent>,
        visit_counting: VisitCounting,
        base_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            link_service,
            visit_sender,
            visit_counting,
            base_url: base_url.into(),
        }
    }
}
