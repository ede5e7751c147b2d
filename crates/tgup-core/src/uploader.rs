//! Depth-first folder upload with a per-folder reply anchor.
//!
//! For every folder the uploader:
//! - announces the folder (`📁 name`) as a reply to the parent's anchor
//! - uploads the folder's files, replying to that announcement
//! - then walks the subfolders, in the same sorted order
//!
//! Files of a folder therefore always appear contiguously, before any nested content.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use crate::{
    domain::{Destination, MessageId},
    errors::Error,
    sorter::sorted_entries,
    store::Ledger,
    transport::{port::UploadTransport, throttled::ThrottledTransport},
    Result,
};

const FOLDER_MARKER: &str = "📁";

/// Sent once the whole run is over.
pub const COMPLETION_TEXT: &str = "✅ All done";

/// What happened during one `upload_path` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub folders: usize,
}

struct PendingFolder {
    dir: PathBuf,
    parent_anchor: Option<MessageId>,
}

pub struct Uploader {
    transport: ThrottledTransport,
    ledger: Ledger,
    destination: Destination,
}

impl Uploader {
    /// Every send through `transport` is spaced at least `send_interval` apart.
    pub fn new(
        transport: Arc<dyn UploadTransport>,
        ledger: Ledger,
        destination: Destination,
        send_interval: Duration,
    ) -> Self {
        Self {
            transport: ThrottledTransport::new(transport, send_interval),
            ledger,
            destination,
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Upload a single file or a whole folder tree.
    ///
    /// Per-item failures are logged and counted, never returned; the only error is a
    /// `path` that cannot be stat'ed.
    pub async fn upload_path(
        &self,
        path: &Path,
        anchor: Option<MessageId>,
    ) -> Result<UploadReport> {
        let meta = fs::metadata(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut report = UploadReport::default();
        if meta.is_dir() {
            self.upload_tree(path, anchor, &mut report).await;
        } else {
            self.upload_file(path, anchor, &mut report).await;
        }

        tracing::info!(
            uploaded = report.uploaded,
            skipped = report.skipped,
            failed = report.failed,
            folders = report.folders,
            "upload finished"
        );
        Ok(report)
    }

    pub async fn announce_completion(&self) -> Result<MessageId> {
        self.transport
            .send_text(&self.destination, COMPLETION_TEXT, None)
            .await
    }

    async fn upload_file(
        &self,
        path: &Path,
        anchor: Option<MessageId>,
        report: &mut UploadReport,
    ) {
        if self.ledger.is_uploaded(path) {
            tracing::info!("Skipping already uploaded: {}", path.display());
            report.skipped += 1;
            return;
        }

        tracing::info!("Uploading: {}", path.display());
        let caption = base_name(path);
        match self
            .transport
            .send_file(&self.destination, path, &caption, anchor)
            .await
        {
            Ok(_) => {
                self.ledger.mark_uploaded(path, Some(&self.destination));
                report.uploaded += 1;
            }
            Err(e) => {
                // Not marked: the next run retries it.
                tracing::warn!("Failed upload {}: {e}", path.display());
                report.failed += 1;
            }
        }
    }

    async fn upload_tree(
        &self,
        root: &Path,
        anchor: Option<MessageId>,
        report: &mut UploadReport,
    ) {
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut pending = vec![PendingFolder {
            dir: root.to_path_buf(),
            parent_anchor: anchor,
        }];

        while let Some(folder) = pending.pop() {
            let key = fs::canonicalize(&folder.dir).unwrap_or_else(|_| folder.dir.clone());
            if !visited.insert(key) {
                tracing::warn!(
                    "Skipping {}: folder already visited (symlink loop?)",
                    folder.dir.display()
                );
                continue;
            }
            if folder.dir != root {
                tracing::info!("Entering folder: {}", folder.dir.display());
            }

            let folder_anchor = self
                .announce_folder(&folder.dir, folder.parent_anchor, report)
                .await;
            let entries = sorted_entries(&folder.dir);

            for entry in entries.iter().filter(|e| !e.is_dir) {
                self.upload_file(&entry.path, folder_anchor, report).await;
            }

            // Pushed in reverse so the first subfolder is walked next.
            for entry in entries.into_iter().rev().filter(|e| e.is_dir) {
                pending.push(PendingFolder {
                    dir: entry.path,
                    parent_anchor: folder_anchor,
                });
            }
        }
    }

    /// Returns the anchor for the folder's children. Falls back to the parent's
    /// anchor when the announcement cannot be sent.
    async fn announce_folder(
        &self,
        dir: &Path,
        parent_anchor: Option<MessageId>,
        report: &mut UploadReport,
    ) -> Option<MessageId> {
        let text = format!("{FOLDER_MARKER} {}", base_name(dir));
        match self
            .transport
            .send_text(&self.destination, &text, parent_anchor)
            .await
        {
            Ok(id) => {
                report.folders += 1;
                Some(id)
            }
            Err(e) => {
                tracing::warn!("Failed to announce folder {}: {e}", dir.display());
                report.failed += 1;
                parent_anchor
            }
        }
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
