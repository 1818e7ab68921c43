use std::sync::Arc;

use page::{DocumentSnapshot, InMemoryDocument};

use crate::vm::ExamPage;

/// Shared handles the desktop view reads from and dispatches into.
///
/// Provided by the composition root (`crates/app`).
#[derive(Clone)]
pub struct ExamContext {
    page: Arc<ExamPage>,
    document: InMemoryDocument,
}

impl ExamContext {
    #[must_use]
    pub fn new(page: Arc<ExamPage>, document: InMemoryDocument) -> Self {
        Self { page, document }
    }

    #[must_use]
    pub fn page(&self) -> Arc<ExamPage> {
        Arc::clone(&self.page)
    }

    #[must_use]
    pub fn snapshot(&self) -> DocumentSnapshot {
        self.document.snapshot()
    }
}
