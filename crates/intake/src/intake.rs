//! Concurrent batch intake.

use crate::extract::{extract_poem, ExtractOptions};
use crate::upload::Upload;
use notebook_core::{Event, Notebook, MAX_BATCH_FILES};
use notebook_ocr::OcrService;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Where a batch item comes from.
enum Source {
    Upload(Upload),
    Path(PathBuf),
}

impl Source {
    fn label(&self) -> String {
        match self {
            Self::Upload(upload) => upload.name.clone(),
            Self::Path(path) => path.display().to_string(),
        }
    }
}

/// Feeds batches of files into a notebook.
#[derive(Clone)]
pub struct Intake {
    ocr: Option<Arc<OcrService>>,
    options: Arc<ExtractOptions>,
}

impl Intake {
    /// Create an intake without OCR; image uploads will be reported as
    /// failures.
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            ocr: None,
            options: Arc::new(options),
        }
    }

    /// Use an OCR service for image uploads.
    pub fn with_ocr(mut self, ocr: OcrService) -> Self {
        self.ocr = Some(Arc::new(ocr));
        self
    }

    /// Extract a batch of uploads and fold the results into `notebook`.
    ///
    /// Batches larger than [`MAX_BATCH_FILES`] are rejected whole. Poems are
    /// appended in the order their extractions finish.
    pub async fn ingest(&self, notebook: Notebook, uploads: Vec<Upload>) -> Notebook {
        self.run(notebook, uploads.into_iter().map(Source::Upload).collect())
            .await
    }

    /// Read files from disk and ingest them as one batch.
    ///
    /// Files that can't be read produce a warning like any other failed
    /// extraction.
    pub async fn ingest_paths(&self, notebook: Notebook, paths: Vec<PathBuf>) -> Notebook {
        self.run(notebook, paths.into_iter().map(Source::Path).collect())
            .await
    }

    async fn run(&self, notebook: Notebook, batch: Vec<Source>) -> Notebook {
        if batch.len() > MAX_BATCH_FILES {
            return notebook.update(Event::BatchRejected { count: batch.len() });
        }

        log::info!("Ingesting batch of {} files", batch.len());

        let (tx, mut rx) = mpsc::unbounded_channel();

        for source in batch {
            let tx = tx.clone();
            let intake = self.clone();

            tokio::spawn(async move {
                let event = intake.process(source).await;
                if tx.send(event).is_err() {
                    log::error!("Notebook stopped listening before extraction finished");
                }
            });
        }

        // Only the task senders remain; the loop ends once every task reported
        drop(tx);

        let mut notebook = notebook;
        while let Some(event) = rx.recv().await {
            notebook = notebook.update(event);
        }

        notebook
    }

    /// Read and extract one batch item, always yielding exactly one event.
    async fn process(&self, source: Source) -> Event {
        let label = source.label();

        let upload = match source {
            Source::Upload(upload) => upload,
            Source::Path(path) => match Upload::from_path(&path).await {
                Ok(upload) => upload,
                Err(e) => {
                    return Event::ExtractionFailed {
                        file: label,
                        reason: e.to_string(),
                    }
                }
            },
        };

        let ocr = self.ocr.clone();
        let options = Arc::clone(&self.options);

        // DOCX parsing and OCR are CPU bound
        let joined = tokio::task::spawn_blocking(move || {
            extract_poem(&upload, ocr.as_deref(), &options)
        })
        .await;

        joined.unwrap_or_else(|e| Event::ExtractionFailed {
            file: label,
            reason: format!("extraction task failed: {}", e),
        })
    }
}

impl Default for Intake {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}
