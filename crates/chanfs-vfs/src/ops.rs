//! Filesystem operations trait.
//!
//! Path-based (no inode numbers in the interface) with explicit
//! offset/size on reads, so the surface maps one-to-one onto the
//! conventional kernel-facing operation set without handle state.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::FsResult;
use crate::types::{DirEntry, FileAttr, OpenFlags, SetAttr, StatFs};

/// Core filesystem operations.
///
/// Read-path operations may fail; on a read-only implementation every
/// mutation-path operation must report success and have no observable
/// effect (see [`FsOps::read_only`]).
#[async_trait]
pub trait FsOps: Send + Sync {
    // ========================================================================
    // Read path
    // ========================================================================

    /// Get file attributes.
    async fn getattr(&self, path: &Path) -> FsResult<FileAttr>;

    /// Read directory entries.
    async fn readdir(&self, path: &Path) -> FsResult<Vec<DirEntry>>;

    /// Read file contents.
    ///
    /// Reads up to `size` bytes starting at `offset`. Returns fewer
    /// bytes if EOF is reached, and an empty buffer for offsets at or
    /// past EOF; never an out-of-range error.
    async fn read(&self, path: &Path, offset: u64, size: u32) -> FsResult<Vec<u8>>;

    /// Read a link target.
    async fn readlink(&self, path: &Path) -> FsResult<PathBuf>;

    /// Open a file. Returns an opaque handle usable by read.
    async fn open(&self, path: &Path, flags: OpenFlags) -> FsResult<u64>;

    /// Get filesystem statistics.
    async fn statfs(&self) -> FsResult<StatFs>;

    // ========================================================================
    // Mutation path
    // ========================================================================

    /// Write data to a file. Returns the number of bytes written.
    async fn write(&self, path: &Path, offset: u64, data: &[u8]) -> FsResult<u32>;

    /// Create a new file. Returns its attributes.
    async fn create(&self, path: &Path, mode: u32) -> FsResult<FileAttr>;

    /// Create a filesystem node.
    async fn mknod(&self, path: &Path, mode: u32) -> FsResult<()>;

    /// Create a new directory. Returns its attributes.
    async fn mkdir(&self, path: &Path, mode: u32) -> FsResult<FileAttr>;

    /// Remove a file.
    async fn unlink(&self, path: &Path) -> FsResult<()>;

    /// Remove a directory.
    async fn rmdir(&self, path: &Path) -> FsResult<()>;

    /// Rename a file or directory.
    async fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Truncate a file to the specified size.
    async fn truncate(&self, path: &Path, size: u64) -> FsResult<()>;

    /// Set file attributes (covers chmod, chown, utimens).
    async fn setattr(&self, path: &Path, attr: SetAttr) -> FsResult<FileAttr>;

    /// Create a symbolic link at `path` pointing to `target`.
    async fn symlink(&self, path: &Path, target: &Path) -> FsResult<FileAttr>;

    /// Create a hard link at `newpath` pointing to `oldpath`.
    async fn link(&self, oldpath: &Path, newpath: &Path) -> FsResult<FileAttr>;

    /// Flush buffered data for a handle.
    async fn flush(&self, path: &Path, handle: u64) -> FsResult<()>;

    /// Release an open handle.
    async fn release(&self, path: &Path, handle: u64) -> FsResult<()>;

    /// Synchronize file contents.
    async fn fsync(&self, path: &Path, datasync: bool) -> FsResult<()>;

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Returns true if this filesystem is read-only.
    ///
    /// A read-only implementation still reports success for every
    /// mutation operation; this flag is the discoverable contract that
    /// those writes are discarded.
    fn read_only(&self) -> bool;

    // ========================================================================
    // Convenience methods (default implementations)
    // ========================================================================

    /// Check if a path exists.
    async fn exists(&self, path: &Path) -> bool {
        self.getattr(path).await.is_ok()
    }

    /// Read entire file contents.
    async fn read_all(&self, path: &Path) -> FsResult<Vec<u8>> {
        let attr = self.getattr(path).await?;
        self.read(path, 0, attr.size as u32).await
    }
}
