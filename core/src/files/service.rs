//! Async request/response surface of the remote file-access backend.
//!
//! The backend owns the "current directory": every operation takes bare
//! entry names and resolves them against an implicit server-side cursor.
//! Consumers never see paths, only listings of the directory the cursor
//! points at.

use crate::errors::FileError;
use crate::files::FileEntry;

/// Remote file-access operations consumed by the navigator session.
///
/// All operations are asynchronous with a uniform success/failure shape.
/// Implementations must be `Send` so the session can be driven from an
/// async runtime; methods take `&self` and use interior mutability for
/// connection state.
#[async_trait::async_trait]
pub trait RemoteFileService: Send {
    /// List the entries of the current remote directory.
    async fn list(&self) -> Result<Vec<FileEntry>, FileError>;

    /// Move the directory cursor into `name` (relative, `..` allowed).
    async fn change_directory(&self, name: &str) -> Result<(), FileError>;

    /// Fetch the file `name` from the current directory. When
    /// `open_after` is set, hand the local copy to the platform opener.
    async fn download(&self, name: &str, open_after: bool) -> Result<(), FileError>;

    /// Delete the entry `name` from the current directory.
    async fn delete(&self, name: &str) -> Result<(), FileError>;

    /// Rename `old` to `new` within the current directory.
    async fn rename(&self, old: &str, new: &str) -> Result<(), FileError>;

    /// Create an empty directory `name` in the current directory.
    async fn create_directory(&self, name: &str) -> Result<(), FileError>;

    /// Create an empty file `name` in the current directory.
    async fn create_file(&self, name: &str) -> Result<(), FileError>;

    /// Tear down the backend connection. Failures are non-fatal to
    /// session teardown.
    async fn disconnect(&self) -> Result<(), FileError>;
}
