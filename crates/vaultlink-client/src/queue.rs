//! Client-side upload queue.
//!
//! One [`UploadBatch`] is an owned, single-use value: adding items and
//! draining them belong to the same batch, and a second batch is a second
//! value, so concurrent batches cannot clobber each other's pending items.
//!
//! Draining is strictly sequential (one submission in flight) and fail-fast:
//! the first failure abandons every remaining item. Progress flows through a
//! [`BatchObserver`]; an optional [`FileRemover`] deletes the local source
//! after each confirmed submission.

use std::collections::VecDeque;

use crate::ApiClient;

/// One queued submission: the id to submit plus a display name.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub file_id: u64,
    pub name: String,
    pub comment: String,
}

impl BatchItem {
    pub fn new(file_id: u64, name: impl Into<String>) -> Self {
        BatchItem {
            file_id,
            name: name.into(),
            comment: String::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Batch progress notifications. All methods default to no-ops so observers
/// implement only what they display.
pub trait BatchObserver: Send + Sync {
    fn upload_started(&self, _item: &BatchItem) {}

    fn upload_finished(&self, _item: &BatchItem, _remote_id: &str) {}

    fn upload_failed(&self, _item: &BatchItem, _message: &str) {}

    /// Called once when the batch drains to empty without a failure.
    /// `last_name` is the final submitted item, `None` for an empty batch.
    /// An aborted batch ends with `upload_failed` and no aggregate summary.
    fn batch_complete(&self, _submitted: usize, _last_name: Option<&str>) {}
}

/// Deletes the local source of an item after the endpoint confirmed it.
pub trait FileRemover: Send + Sync {
    fn remove(&self, item: &BatchItem) -> anyhow::Result<()>;
}

/// Why a batch stopped early.
#[derive(Debug)]
pub struct BatchFailure {
    /// Display name of the item that failed
    pub name: String,
    /// The API's error message, verbatim
    pub message: String,
    /// Items abandoned without an attempt
    pub abandoned: usize,
}

/// Result of draining one batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Display names of the items the endpoint confirmed, in submission order
    pub submitted: Vec<String>,
    /// Present when the batch aborted on a failure
    pub failure: Option<BatchFailure>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// A single-use batch of submissions.
#[derive(Debug, Default)]
pub struct UploadBatch {
    items: VecDeque<BatchItem>,
}

impl UploadBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: BatchItem) {
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drain the batch sequentially. Consumes the batch; the first failure
    /// abandons all remaining items.
    pub async fn run(
        mut self,
        client: &ApiClient,
        observer: &dyn BatchObserver,
        remover: Option<&dyn FileRemover>,
    ) -> BatchOutcome {
        let mut submitted = Vec::new();
        let mut failure = None;

        while let Some(item) = self.items.pop_front() {
            observer.upload_started(&item);

            match client.submit_file(item.file_id, &item.comment).await {
                Ok(result) => {
                    tracing::info!(
                        name = %item.name,
                        remote_id = %result.remote_file_id,
                        "Submission confirmed"
                    );
                    observer.upload_finished(&item, &result.remote_file_id);

                    if let Some(remover) = remover {
                        if let Err(err) = remover.remove(&item) {
                            tracing::warn!(
                                name = %item.name,
                                error = %err,
                                "Failed to remove local source after submission"
                            );
                        }
                    }

                    submitted.push(item.name);
                }
                Err(err) => {
                    let message = err.to_string();
                    let abandoned = self.items.len();
                    tracing::warn!(
                        name = %item.name,
                        error = %message,
                        abandoned,
                        "Submission failed, aborting batch"
                    );
                    observer.upload_failed(&item, &message);
                    self.items.clear();
                    failure = Some(BatchFailure {
                        name: item.name,
                        message,
                        abandoned,
                    });
                    break;
                }
            }
        }

        if failure.is_none() {
            observer.batch_complete(submitted.len(), submitted.last().map(String::as_str));
        }

        BatchOutcome { submitted, failure }
    }
}
