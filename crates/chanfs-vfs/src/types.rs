//! Core filesystem types.
//!
//! Everything here is synthetic: attributes are fabricated per call
//! from current store state, never persisted.

use std::time::SystemTime;

/// File type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl FileType {
    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, FileType::File)
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, FileType::Directory)
    }
}

/// File attributes (metadata).
#[derive(Debug, Clone, PartialEq)]
pub struct FileAttr {
    /// Inode number. Derived deterministically from the path so
    /// repeated queries of one file report one identity.
    pub ino: u64,
    /// Size in bytes.
    pub size: u64,
    /// File type.
    pub kind: FileType,
    /// Unix permissions (e.g., 0o644).
    pub perm: u32,
    /// Number of hard links.
    pub nlink: u32,
    /// User ID.
    pub uid: u32,
    /// Group ID.
    pub gid: u32,
    /// Last modification time.
    pub mtime: SystemTime,
    /// Last access time.
    pub atime: SystemTime,
    /// Creation time.
    pub ctime: SystemTime,
}

impl FileAttr {
    /// Create attributes for a regular file.
    pub fn file(ino: u64, size: u64, perm: u32) -> Self {
        let now = SystemTime::now();
        Self {
            ino,
            size,
            kind: FileType::File,
            perm,
            nlink: 1,
            uid: 501,
            gid: 20,
            mtime: now,
            atime: now,
            ctime: now,
        }
    }

    /// Create attributes for a directory.
    pub fn directory(ino: u64, perm: u32) -> Self {
        let now = SystemTime::now();
        Self {
            ino,
            size: 0,
            kind: FileType::Directory,
            perm,
            nlink: 1,
            uid: 501,
            gid: 20,
            mtime: now,
            atime: now,
            ctime: now,
        }
    }

    /// Returns true if this is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Returns true if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (not full path).
    pub name: String,
    /// Entry type.
    pub kind: FileType,
}

impl DirEntry {
    /// Create a new directory entry.
    pub fn new(name: impl Into<String>, kind: FileType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, FileType::File)
    }

    /// Create a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, FileType::Directory)
    }
}

/// Attributes to set (for the setattr operation).
///
/// On a read-only mount these are acknowledged, never applied.
#[derive(Debug, Clone, Default)]
pub struct SetAttr {
    /// New size (truncate/extend).
    pub size: Option<u64>,
    /// New modification time.
    pub mtime: Option<SystemTime>,
    /// New access time.
    pub atime: Option<SystemTime>,
    /// New permissions.
    pub perm: Option<u32>,
    /// New user ID.
    pub uid: Option<u32>,
    /// New group ID.
    pub gid: Option<u32>,
}

/// Filesystem statistics.
///
/// Fixed synthetic numbers; only `namelen` carries a real constraint
/// (directory entry names are truncated to fit it).
#[derive(Debug, Clone)]
pub struct StatFs {
    /// Total blocks.
    pub blocks: u64,
    /// Free blocks.
    pub bfree: u64,
    /// Available blocks (to non-root).
    pub bavail: u64,
    /// Total inodes.
    pub files: u64,
    /// Free inodes.
    pub ffree: u64,
    /// Block size.
    pub bsize: u32,
    /// Maximum name length.
    pub namelen: u32,
    /// Fragment size.
    pub frsize: u32,
}

impl Default for StatFs {
    fn default() -> Self {
        Self {
            blocks: 1024 * 1024,
            bfree: 512 * 1024,
            bavail: 512 * 1024,
            files: 1024 * 1024,
            ffree: 512 * 1024,
            bsize: 4096,
            namelen: 255,
            frsize: 4096,
        }
    }
}

/// Open file flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags {
    /// Read access requested.
    pub read: bool,
    /// Write access requested.
    pub write: bool,
    /// Append mode.
    pub append: bool,
    /// Create if not exists.
    pub create: bool,
    /// Truncate on open.
    pub truncate: bool,
}

impl Default for OpenFlags {
    fn default() -> Self {
        Self {
            read: true,
            write: false,
            append: false,
            create: false,
            truncate: false,
        }
    }
}

impl OpenFlags {
    /// Read-only access.
    pub fn read() -> Self {
        Self::default()
    }

    /// Write access (also enables read).
    pub fn write() -> Self {
        Self {
            read: true,
            write: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type() {
        assert!(FileType::File.is_file());
        assert!(!FileType::File.is_dir());
        assert!(FileType::Directory.is_dir());
    }

    #[test]
    fn attr_constructors() {
        let file = FileAttr::file(42, 1024, 0o644);
        assert!(file.is_file());
        assert_eq!(file.ino, 42);
        assert_eq!(file.size, 1024);
        assert_eq!(file.nlink, 1);

        let dir = FileAttr::directory(1, 0o755);
        assert!(dir.is_dir());
        assert_eq!(dir.size, 0);
        assert_eq!(dir.nlink, 1);
    }

    #[test]
    fn dir_entry() {
        let file = DirEntry::file("#general.txt");
        assert_eq!(file.name, "#general.txt");
        assert!(file.kind.is_file());

        let dot = DirEntry::directory(".");
        assert!(dot.kind.is_dir());
    }

    #[test]
    fn statfs_name_limit() {
        assert_eq!(StatFs::default().namelen, 255);
    }
}
