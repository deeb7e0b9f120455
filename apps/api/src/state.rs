use std::sync::Arc;

use tokio::sync::RwLock;

use crate::landing::LayoutStore;
use crate::schema::resume_schema;
use crate::submission::SubmissionSink;
use crate::wizard::WizardRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub wizards: Arc<WizardRegistry>,
    pub layout: Arc<RwLock<LayoutStore>>,
    /// Where finished resumes go. In memory by default, PostgreSQL when configured.
    pub sink: Arc<dyn SubmissionSink>,
}

impl AppState {
    pub fn new(sink: Arc<dyn SubmissionSink>) -> Self {
        Self {
            wizards: Arc::new(WizardRegistry::new(resume_schema())),
            layout: Arc::new(RwLock::new(LayoutStore::new())),
            sink,
        }
    }
}
