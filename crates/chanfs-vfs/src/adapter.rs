//! The channel filesystem adapter.
//!
//! Routes filesystem operations over a [`MessageStore`] handle. The
//! adapter holds no state besides that handle and an open-handle
//! counter; every call recomputes from current store state.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chanfs_store::MessageStore;
use tracing::debug;

use crate::content::materialize;
use crate::error::{FsError, FsResult};
use crate::ops::FsOps;
use crate::path::{CHANNEL_PREFIX, CHANNEL_SUFFIX, ResolvedPath, resolve};
use crate::types::{DirEntry, FileAttr, OpenFlags, SetAttr, StatFs};

/// Inode number of the root directory.
pub const ROOT_INO: u64 = 1;

/// Maximum directory entry name length in bytes.
const MAX_NAME_LEN: usize = 255;

/// Filesystem adapter exposing one `#<channel>.txt` file per channel.
///
/// Read operations query the store; mutation operations report success
/// and do nothing, so ordinary tooling can treat the mount as writable
/// while the store stays untouched. [`FsOps::read_only`] answers
/// `true`.
pub struct ChannelFs {
    store: Arc<dyn MessageStore>,
    next_handle: AtomicU64,
}

impl ChannelFs {
    /// Create an adapter over the given store handle.
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            store,
            next_handle: AtomicU64::new(1),
        }
    }

    fn issue_handle(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::Relaxed)
    }

    fn synthetic_file_attr(path: &Path, size: u64, perm: u32) -> FileAttr {
        FileAttr::file(stable_ino(&path.to_string_lossy()), size, perm)
    }
}

/// Derive a stable inode number from a name (FNV-1a).
///
/// The same name always maps to the same inode within and across
/// calls. The high bit keeps synthetic inodes clear of [`ROOT_INO`].
fn stable_ino(name: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in name.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash | (1 << 63)
}

/// Render a channel name as its directory entry, capped at
/// [`MAX_NAME_LEN`] bytes on a char boundary.
fn channel_entry_name(channel: &str) -> String {
    let mut name = format!("{CHANNEL_PREFIX}{channel}{CHANNEL_SUFFIX}");
    if name.len() > MAX_NAME_LEN {
        let mut end = MAX_NAME_LEN;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    name
}

#[async_trait]
impl FsOps for ChannelFs {
    async fn getattr(&self, path: &Path) -> FsResult<FileAttr> {
        debug!(op = "getattr", path = %path.display());
        match resolve(path)? {
            ResolvedPath::Root => Ok(FileAttr::directory(ROOT_INO, 0o755)),
            ResolvedPath::HiddenProbe => Ok(Self::synthetic_file_attr(path, 0, 0o644)),
            ResolvedPath::Channel(channel) => {
                // Size must match what a read at this store state
                // returns, so the content is assembled in full.
                let content = materialize(self.store.as_ref(), &channel).await?;
                Ok(FileAttr::file(
                    stable_ino(&channel),
                    content.len() as u64,
                    0o644,
                ))
            }
        }
    }

    async fn readdir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        debug!(op = "readdir", path = %path.display());
        match resolve(path)? {
            ResolvedPath::Root => {
                let mut entries = vec![DirEntry::directory("."), DirEntry::directory("..")];

                let mut names: Vec<String> = self
                    .store
                    .list_channels()
                    .await?
                    .iter()
                    .map(|channel| channel_entry_name(channel))
                    .collect();
                // Store enumeration order is unspecified; sort for
                // deterministic listings.
                names.sort();

                entries.extend(names.into_iter().map(DirEntry::file));
                Ok(entries)
            }
            ResolvedPath::HiddenProbe | ResolvedPath::Channel(_) => {
                Err(FsError::not_a_directory(path.display().to_string()))
            }
        }
    }

    async fn read(&self, path: &Path, offset: u64, size: u32) -> FsResult<Vec<u8>> {
        debug!(op = "read", path = %path.display(), offset, size);
        match resolve(path)? {
            ResolvedPath::Root => Err(FsError::is_a_directory(path.display().to_string())),
            ResolvedPath::HiddenProbe => Ok(Vec::new()),
            ResolvedPath::Channel(channel) => {
                let content = materialize(self.store.as_ref(), &channel).await?;
                let start = (offset as usize).min(content.len());
                let end = start.saturating_add(size as usize).min(content.len());
                Ok(content[start..end].to_vec())
            }
        }
    }

    async fn readlink(&self, path: &Path) -> FsResult<PathBuf> {
        // No symlinks exist; echo the path back as its own target.
        debug!(op = "readlink", path = %path.display());
        Ok(path.to_path_buf())
    }

    async fn open(&self, path: &Path, flags: OpenFlags) -> FsResult<u64> {
        // Always succeeds; no descriptor state is tracked.
        debug!(op = "open", path = %path.display(), write = flags.write);
        Ok(self.issue_handle())
    }

    async fn statfs(&self) -> FsResult<StatFs> {
        debug!(op = "statfs");
        Ok(StatFs::default())
    }

    // ========================================================================
    // Mutation path: report success, touch nothing.
    // ========================================================================

    async fn write(&self, path: &Path, offset: u64, data: &[u8]) -> FsResult<u32> {
        debug!(op = "write", path = %path.display(), offset, len = data.len(), "discarded (read-only mount)");
        Ok(data.len() as u32)
    }

    async fn create(&self, path: &Path, mode: u32) -> FsResult<FileAttr> {
        debug!(op = "create", path = %path.display(), mode, "discarded (read-only mount)");
        Ok(Self::synthetic_file_attr(path, 0, mode))
    }

    async fn mknod(&self, path: &Path, mode: u32) -> FsResult<()> {
        debug!(op = "mknod", path = %path.display(), mode, "discarded (read-only mount)");
        Ok(())
    }

    async fn mkdir(&self, path: &Path, mode: u32) -> FsResult<FileAttr> {
        debug!(op = "mkdir", path = %path.display(), mode, "discarded (read-only mount)");
        Ok(FileAttr::directory(
            stable_ino(&path.to_string_lossy()),
            mode,
        ))
    }

    async fn unlink(&self, path: &Path) -> FsResult<()> {
        debug!(op = "unlink", path = %path.display(), "discarded (read-only mount)");
        Ok(())
    }

    async fn rmdir(&self, path: &Path) -> FsResult<()> {
        debug!(op = "rmdir", path = %path.display(), "discarded (read-only mount)");
        Ok(())
    }

    async fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        debug!(op = "rename", from = %from.display(), to = %to.display(), "discarded (read-only mount)");
        Ok(())
    }

    async fn truncate(&self, path: &Path, size: u64) -> FsResult<()> {
        debug!(op = "truncate", path = %path.display(), size, "discarded (read-only mount)");
        Ok(())
    }

    async fn setattr(&self, path: &Path, attr: SetAttr) -> FsResult<FileAttr> {
        debug!(op = "setattr", path = %path.display(), "discarded (read-only mount)");
        // Acknowledge with current synthetic attributes; mutation
        // operations have no error surface, so an unresolvable path
        // still gets an answer.
        match self.getattr(path).await {
            Ok(current) => Ok(current),
            Err(_) => Ok(Self::synthetic_file_attr(path, 0, attr.perm.unwrap_or(0o644))),
        }
    }

    async fn symlink(&self, path: &Path, target: &Path) -> FsResult<FileAttr> {
        debug!(op = "symlink", path = %path.display(), target = %target.display(), "discarded (read-only mount)");
        Ok(Self::synthetic_file_attr(path, 0, 0o644))
    }

    async fn link(&self, oldpath: &Path, newpath: &Path) -> FsResult<FileAttr> {
        debug!(op = "link", from = %oldpath.display(), to = %newpath.display(), "discarded (read-only mount)");
        Ok(Self::synthetic_file_attr(newpath, 0, 0o644))
    }

    async fn flush(&self, path: &Path, handle: u64) -> FsResult<()> {
        debug!(op = "flush", path = %path.display(), handle);
        Ok(())
    }

    async fn release(&self, path: &Path, handle: u64) -> FsResult<()> {
        debug!(op = "release", path = %path.display(), handle);
        Ok(())
    }

    async fn fsync(&self, path: &Path, datasync: bool) -> FsResult<()> {
        debug!(op = "fsync", path = %path.display(), datasync);
        Ok(())
    }

    fn read_only(&self) -> bool {
        true
    }
}
