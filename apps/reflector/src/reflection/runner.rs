//! One reflection run: fetch → compose → request → write.
//!
//! Steps run strictly in sequence. The first failing step ends the run and its
//! error names the step; nothing is retried.

use serde::Serialize;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::ReflectionGenerator;
use crate::notion::JournalStore;
use crate::reflection::entry::JournalEntry;
use crate::reflection::prompts::{compose_prompt, PromptTemplate};

/// What a successful run did.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub page_id: String,
    pub reflection: String,
}

/// Entry Fetcher: the most recently dated entry, read through `template`.
pub async fn fetch_latest_entry(
    store: &dyn JournalStore,
    template: PromptTemplate,
) -> Result<JournalEntry, AppError> {
    let page = store.latest_page().await.map_err(|e| {
        error!("Fetching latest entry failed: {e}");
        AppError::from_fetch(e)
    })?;
    Ok(JournalEntry::from_page(&page, template))
}

/// Runs the full pipeline against the given store and generator.
pub async fn run_reflection(
    store: &dyn JournalStore,
    generator: &dyn ReflectionGenerator,
    template: PromptTemplate,
) -> Result<RunReport, AppError> {
    let run_id = Uuid::new_v4();
    let span = info_span!("reflection_run", %run_id, ?template);

    async move {
        let entry = fetch_latest_entry(store, template).await?;
        info!(page_id = %entry.id, date = ?entry.date, "Fetched latest entry");

        let prompt = compose_prompt(&entry);
        info!("Composed prompt ({} chars)", prompt.len());

        let reflection = generator.generate(&prompt).await.map_err(|e| {
            error!("Requesting reflection failed: {e}");
            AppError::Generation(e)
        })?;
        if reflection.is_empty() {
            info!("Reflection service returned no text; writing an empty reflection");
        } else {
            info!("Received reflection ({} chars)", reflection.len());
        }

        store
            .write_reflection(&entry.id, &reflection)
            .await
            .map_err(|e| {
                error!(page_id = %entry.id, "Writing reflection failed: {e}");
                AppError::WriteBack(e)
            })?;
        info!(page_id = %entry.id, "Reflection written");

        Ok(RunReport {
            run_id,
            page_id: entry.id,
            reflection,
        })
    }
    .instrument(span)
    .await
}
