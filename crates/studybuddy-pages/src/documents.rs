//! Documents page

use serde_json::json;

use studybuddy_session::models::Document;
use studybuddy_session::{RequestOptions, SessionManager};

use crate::loadable::Loadable;
use crate::{surface, Result};

pub struct DocumentsPage {
    session: SessionManager,
    documents: Loadable<Vec<Document>>,
}

impl DocumentsPage {
    pub fn new(session: SessionManager) -> Self {
        Self {
            session,
            documents: Loadable::new(),
        }
    }

    pub async fn load(&mut self) -> Result<&[Document]> {
        self.documents.begin();

        let result = self
            .session
            .request_field::<Vec<Document>>("/documents", RequestOptions::get(), "documents")
            .await;

        match surface(&self.session, result) {
            Ok(documents) => {
                tracing::debug!(count = documents.len(), "Loaded documents");
                self.documents.finish(documents);
                Ok(self.documents.data().as_slice())
            }
            Err(e) => {
                self.documents.fail();
                Err(e)
            }
        }
    }

    /// AI summary of an uploaded document
    pub async fn summarize(&self, document_id: i64) -> Result<String> {
        let result = self
            .session
            .request_field::<String>(
                "/ai/generate-summary",
                RequestOptions::post(json!({ "document_id": document_id })),
                "summary",
            )
            .await;
        let summary = surface(&self.session, result)?;

        tracing::info!(document_id, "Generated document summary");
        Ok(summary)
    }

    pub fn documents(&self) -> &[Document] {
        self.documents.data()
    }

    pub fn is_loading(&self) -> bool {
        self.documents.is_loading()
    }
}
