pub mod path;
pub mod service;

pub use path::RemotePath;
pub use service::RemoteFileService;

use serde::{Deserialize, Serialize};

/// Kind of a remote directory entry.
///
/// Anything that is neither a plain file nor a directory (symlinks,
/// sockets, ...) is reported as `Unknown`; the navigator gives those
/// entries no click or menu behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Directory,
    File,
    Unknown,
}

/// One file-or-directory record in a listing.
///
/// Field names are serialized as camelCase for the frontend. `size` is
/// present only for plain files. `editing` is the transient inline-rename
/// flag; it never crosses the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip)]
    pub editing: bool,
}

impl FileEntry {
    /// Build a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            size: None,
            editing: false,
        }
    }

    /// Build a plain-file entry with its byte size.
    pub fn file(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            size: Some(size),
            editing: false,
        }
    }

    /// Build an entry of a kind the navigator has no behavior for.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Unknown,
            size: None,
            editing: false,
        }
    }
}
