//! Term sinks: where a finished glossary ends up

use async_trait::async_trait;
use devglossary_domain::{slugify, SinkError, TermBatch, TermSink};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Writes the glossary as a pretty-printed JSON document
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    /// Create a sink writing to `path`; the file is replaced on every write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Serialize)]
struct GlossaryDocument<'a> {
    repo: String,
    project: &'a str,
    project_slug: String,
    files_analyzed: &'a [String],
    terms: Vec<GlossaryEntry<'a>>,
}

#[derive(Serialize)]
struct GlossaryEntry<'a> {
    term: &'a str,
    slug: String,
    definition: &'a str,
    tags: &'a [String],
    confidence: f64,
    status: &'static str,
}

impl<'a> GlossaryDocument<'a> {
    fn from_batch(batch: &'a TermBatch) -> Self {
        Self {
            repo: batch.repo.to_string(),
            project: &batch.project_name,
            project_slug: slugify(&batch.project_name),
            files_analyzed: &batch.files_analyzed,
            terms: batch
                .terms
                .iter()
                .map(|t| GlossaryEntry {
                    term: &t.term,
                    slug: t.slug(),
                    definition: &t.definition,
                    tags: &t.tags,
                    confidence: t.confidence,
                    status: "published",
                })
                .collect(),
        }
    }
}

#[async_trait]
impl TermSink for JsonFileSink {
    async fn accept(&self, batch: &TermBatch) -> Result<(), SinkError> {
        let document = GlossaryDocument::from_batch(batch);
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| SinkError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, json).await?;

        info!(
            "Wrote {} terms for {} to {}",
            batch.terms.len(),
            batch.repo,
            self.path.display()
        );
        Ok(())
    }
}

/// Keeps every accepted batch in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    batches: Arc<Mutex<Vec<TermBatch>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches accepted so far
    pub fn batches(&self) -> Vec<TermBatch> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TermSink for MemorySink {
    async fn accept(&self, batch: &TermBatch) -> Result<(), SinkError> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(batch.clone());
        Ok(())
    }
}
