//! Virtual filesystem adapter over a message store.
//!
//! Presents each channel in a [`chanfs_store::MessageStore`] as one
//! virtual text file at the root, named `#<channel>.txt`, whose content
//! is rebuilt from the store on every access. Key components:
//!
//! - [`FsOps`] - path-based filesystem operations trait
//! - [`ChannelFs`] - the adapter implementing it over a store handle
//! - [`resolve`] - virtual path classification
//! - [`materialize`] - on-demand channel content assembly
//!
//! ## Design Decisions
//!
//! - **Path-based, no inode table**: operations take paths; inode
//!   numbers are synthesized deterministically from channel names so a
//!   file's identity is stable across calls.
//! - **No caching**: every call recomputes from current store state.
//!   Two calls may observe different content if the store changed
//!   between them.
//! - **Writable-looking, inert mutations**: every mutation operation
//!   succeeds without touching the store. [`FsOps::read_only`] is the
//!   discoverable contract; tooling that probes with writes gets
//!   success instead of permission errors, and the store is never
//!   corrupted from the filesystem side.

mod adapter;
mod content;
mod error;
mod ops;
mod path;
mod types;

pub use adapter::{ChannelFs, ROOT_INO};
pub use content::{materialize, render_record, SEPARATOR};
pub use error::{FsError, FsResult};
pub use ops::FsOps;
pub use path::{resolve, ResolvedPath};
pub use types::{DirEntry, FileAttr, FileType, OpenFlags, SetAttr, StatFs};
