//! Recursive prefix ("folder") deletion
//!
//! Object stores have no real directories, so deleting a folder means
//! enumerating every key under the prefix, batch-deleting them up to the API
//! ceiling, and removing the zero-byte marker object that made the empty
//! folder visible. Versioned buckets complicate the marker: MinIO leaves a
//! delete marker addressable only through its null-version sentinel, so every
//! delete is tried versioned first and unversioned second.
//!
//! The whole operation is best effort. Partial failures are routed around,
//! recorded in [`DeletionOutcome`], and never abort the sweep; only a failure
//! of the enumeration itself (store unreachable, bad credentials) is
//! terminal.

use crate::config::S3Result;
use crate::recent::{RecentStore, RecentlyDeletedSet};
use crate::store::{ListPage, ObjectStore, ObjectVersionRef};
use log::{debug, error, info, warn};
use std::fmt;

/// Ceiling on one batch-delete call, imposed by the S3 API.
pub const MAX_DELETE_BATCH: usize = 1000;

/// What one top-level folder deletion accomplished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionOutcome {
    /// Objects removed by the batch sweep.
    pub succeeded: usize,
    /// Keys that survived both the versioned and the unversioned attempt.
    pub failed_keys: Vec<String>,
    /// Whether a marker delete succeeded (fast path or cleanup path).
    pub marker_removed: bool,
}

/// Terminal failures that abort a sweep. Everything below this severity is
/// swallowed or retried per [`BatchOutcome`].
#[derive(Debug)]
pub enum SweepError {
    /// The enumeration call itself failed; nothing was deleted past the fast
    /// path.
    Listing(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::Listing(e) => write!(f, "listing objects under prefix failed: {}", e),
        }
    }
}

impl std::error::Error for SweepError {}

/// How one batch fared across the two delete attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Deleted on the first (versioned) attempt.
    Deleted,
    /// The versioned attempt failed, the unversioned retry succeeded.
    DeletedOnFallback,
    /// Both attempts failed; the batch's keys are left in place.
    Failed,
}

/// A prefix is always treated as a directory-like boundary.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with('/') {
        prefix.to_string()
    } else {
        format!("{}/", prefix)
    }
}

/// Delete a folder and everything under it.
///
/// Never returns an error: partial failures are absorbed per the sweep rules
/// and `false` only means the sweep could not run at all. Concurrent
/// deletions of overlapping prefixes are not guarded against; the sweep only
/// guarantees removal of what the listing returned at invocation time.
pub async fn delete_folder<S, P>(
    store: &S,
    recent: &mut RecentlyDeletedSet<P>,
    prefix: &str,
) -> bool
where
    S: ObjectStore,
    P: RecentStore,
{
    match delete_folder_outcome(store, recent, prefix).await {
        Ok(outcome) => {
            if outcome.failed_keys.is_empty() {
                info!(
                    "deleted folder {}: {} objects removed",
                    prefix, outcome.succeeded
                );
            } else {
                warn!(
                    "deleted folder {}: {} objects removed, {} left behind",
                    prefix,
                    outcome.succeeded,
                    outcome.failed_keys.len()
                );
            }
            true
        }
        Err(e) => {
            error!("failed to delete folder {}: {}", prefix, e);
            false
        }
    }
}

/// Same operation as [`delete_folder`], surfacing the per-step results the
/// boolean contract folds away.
pub async fn delete_folder_outcome<S, P>(
    store: &S,
    recent: &mut RecentlyDeletedSet<P>,
    prefix: &str,
) -> Result<DeletionOutcome, SweepError>
where
    S: ObjectStore,
    P: RecentStore,
{
    let prefix = normalize_prefix(prefix);

    // Fast path: an empty folder is just its marker object, no listing
    // needed.
    if delete_marker(store, &prefix).await {
        debug!("removed folder marker {} directly", prefix);
        recent.record(&prefix);
        return Ok(DeletionOutcome {
            succeeded: 0,
            failed_keys: Vec::new(),
            marker_removed: true,
        });
    }

    let entries = collect_entries(store, &prefix)
        .await
        .map_err(SweepError::Listing)?;
    info!("sweeping {}: {} objects under prefix", prefix, entries.len());

    let mut outcome = DeletionOutcome::default();
    for batch in entries.chunks(MAX_DELETE_BATCH) {
        match delete_batch(store, batch).await {
            BatchOutcome::Deleted | BatchOutcome::DeletedOnFallback => {
                outcome.succeeded += batch.len();
            }
            BatchOutcome::Failed => {
                warn!(
                    "batch of {} objects under {} could not be deleted, continuing",
                    batch.len(),
                    prefix
                );
                outcome
                    .failed_keys
                    .extend(batch.iter().map(|entry| entry.key.clone()));
            }
        }
    }

    // The marker may exist independently of the listed objects; try it again
    // now that the subtree is gone.
    outcome.marker_removed = delete_marker(store, &prefix).await;

    recent.record(&prefix);
    Ok(outcome)
}

/// Attempt the marker delete both ways (null-version sentinel, then
/// unversioned), swallowing errors. True if either attempt succeeded.
async fn delete_marker<S: ObjectStore>(store: &S, prefix: &str) -> bool {
    let mut removed = false;

    if let Some(version) = store.null_version() {
        match store.delete_object(prefix, Some(version), true).await {
            Ok(()) => removed = true,
            Err(e) => debug!("versioned marker delete of {} failed: {}", prefix, e),
        }
    }

    match store.delete_object(prefix, None, true).await {
        Ok(()) => removed = true,
        Err(e) => debug!("marker delete of {} failed: {}", prefix, e),
    }

    removed
}

/// Accumulate every key under the prefix across all listing pages, attaching
/// the page's version marker when the store exposes one.
async fn collect_entries<S: ObjectStore>(
    store: &S,
    prefix: &str,
) -> S3Result<Vec<ObjectVersionRef>> {
    let mut entries = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let ListPage {
            keys,
            version_marker,
            next_token,
            has_more,
        } = store.list_objects_page(prefix, token.as_deref()).await?;

        entries.extend(keys.into_iter().map(|key| ObjectVersionRef {
            key,
            version_id: version_marker.clone(),
        }));

        if !has_more {
            break;
        }
        token = next_token;
    }

    Ok(entries)
}

/// Delete one batch, forcing the null-version sentinel first and falling back
/// to an unversioned delete of the same batch.
pub(crate) async fn delete_batch<S: ObjectStore>(
    store: &S,
    batch: &[ObjectVersionRef],
) -> BatchOutcome {
    let mut fell_back = false;

    if let Some(version) = store.null_version() {
        let forced: Vec<ObjectVersionRef> = batch
            .iter()
            .map(|entry| ObjectVersionRef {
                key: entry.key.clone(),
                version_id: Some(version.to_string()),
            })
            .collect();

        match store.delete_objects_batch(&forced, true).await {
            Ok(()) => return BatchOutcome::Deleted,
            Err(e) => {
                debug!("versioned batch delete failed, retrying unversioned: {}", e);
                fell_back = true;
            }
        }
    }

    let plain: Vec<ObjectVersionRef> = batch
        .iter()
        .map(|entry| ObjectVersionRef {
            key: entry.key.clone(),
            version_id: None,
        })
        .collect();

    match store.delete_objects_batch(&plain, true).await {
        Ok(()) if fell_back => BatchOutcome::DeletedOnFallback,
        Ok(()) => BatchOutcome::Deleted,
        Err(e) => {
            warn!("unversioned batch delete failed as well: {}", e);
            BatchOutcome::Failed
        }
    }
}
