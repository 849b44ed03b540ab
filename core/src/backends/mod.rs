//! Backend implementations of
//! [`RemoteFileService`](crate::files::RemoteFileService).
//!
//! Only the SSH/SFTP backend ships with the core crate; embedders are
//! free to provide their own implementations of the trait.

#[cfg(feature = "ssh")]
pub mod ssh;
