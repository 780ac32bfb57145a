//! Recording archive: upload path allocation and the size-bounded
//! retention sweep.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::telemetry::events::record_retention_sweep;

/// Extensions the sweep considers part of the audio archive.
const AUDIO_EXTENSIONS: [&str; 2] = ["webm", "wav"];

/// One retained recording.
#[derive(Debug, Clone)]
pub struct ArchiveFile {
    pub name: String,
    pub path: PathBuf,
    pub created_at: SystemTime,
    pub size_bytes: u64,
}

/// Summary of one retention sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetentionReport {
    pub scanned_bytes: u64,
    pub deleted: usize,
    pub remaining_bytes: u64,
}

/// Filesystem-backed archive of uploaded recordings. All operations are
/// individually atomic create/stat/delete calls; no locking is needed.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    root: PathBuf,
}

impl ArchiveStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root)
    }

    /// Unique destination path for a freshly uploaded recording.
    pub fn allocate_recording_path(&self) -> PathBuf {
        self.root.join(format!("{}-recording.webm", Uuid::new_v4()))
    }

    /// Archived audio files sorted oldest-first by creation time. Creation
    /// time falls back to the modification time on filesystems without
    /// birth-time support.
    pub fn list(&self) -> Vec<ArchiveFile> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    target: "archive_retention",
                    %err,
                    root = %self.root.display(),
                    "could not read archive directory"
                );
                return Vec::new();
            }
        };

        let mut files: Vec<ArchiveFile> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if !is_audio_file(&path) {
                    return None;
                }
                let metadata = entry.metadata().ok()?;
                let created_at = metadata
                    .created()
                    .or_else(|_| metadata.modified())
                    .unwrap_or(UNIX_EPOCH);
                Some(ArchiveFile {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path,
                    created_at,
                    size_bytes: metadata.len(),
                })
            })
            .collect();

        files.sort_by_key(|file| file.created_at);
        files
    }

    /// Deletes archived recordings oldest-first until the archive fits
    /// within `limit_bytes`. A per-file deletion failure is logged and
    /// skipped; the sweep never aborts.
    pub fn enforce_size_limit(&self, limit_bytes: u64) -> RetentionReport {
        let files = self.list();
        let total: u64 = files.iter().map(|file| file.size_bytes).sum();

        let mut remaining = total;
        let mut deleted = 0usize;

        for file in &files {
            if remaining <= limit_bytes {
                break;
            }
            match fs::remove_file(&file.path) {
                Ok(()) => {
                    remaining -= file.size_bytes;
                    deleted += 1;
                    info!(
                        target: "archive_retention",
                        name = %file.name,
                        size_bytes = file.size_bytes,
                        "evicted recording"
                    );
                }
                Err(err) => {
                    warn!(
                        target: "archive_retention",
                        %err,
                        name = %file.name,
                        "failed to evict recording, skipping"
                    );
                }
            }
        }

        let report = RetentionReport {
            scanned_bytes: total,
            deleted,
            remaining_bytes: remaining,
        };
        record_retention_sweep(&report);
        report
    }

    /// Runs the sweep off the request path.
    pub fn spawn_enforce(&self, limit_bytes: u64) -> JoinHandle<RetentionReport> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.enforce_size_limit(limit_bytes))
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}
