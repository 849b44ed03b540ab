//! SFTP-backed [`RemoteFileService`] over `ssh2`.
//!
//! The SSH session is opened lazily on first use in blocking mode and
//! reused for subsequent operations; blocking calls are offloaded to
//! `tokio::task::spawn_blocking`. The backend owns the directory cursor
//! the rest of the crate treats as implicit server-side state: every
//! operation resolves bare entry names against a [`RemotePath`] that
//! starts at the authenticated user's home directory.

use std::io::Read;
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::config::SshConfig;
use crate::errors::FileError;
use crate::files::{FileEntry, RemoteFileService, RemotePath};

/// State of a connected SFTP session.
struct SftpState {
    session: ssh2::Session,
    sftp: ssh2::Sftp,
    cursor: RemotePath,
}

/// SFTP navigator backend for SSH connections.
pub struct SftpNavigator {
    config: SshConfig,
    state: Arc<Mutex<Option<SftpState>>>,
}

impl SftpNavigator {
    pub fn new(config: SshConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(None)),
        }
    }

    /// Ensure the SFTP session is connected, opening it if needed and
    /// seeding the cursor from the remote home directory.
    fn ensure_connected(
        state: &Mutex<Option<SftpState>>,
        config: &SshConfig,
    ) -> Result<(), FileError> {
        let mut guard = state
            .lock()
            .map_err(|e| FileError::OperationFailed(format!("Failed to lock SFTP state: {e}")))?;

        if guard.is_some() {
            return Ok(());
        }

        let session = connect_and_authenticate(config)?;
        session.set_blocking(true);

        let sftp = session
            .sftp()
            .map_err(|e| FileError::OperationFailed(format!("SFTP init failed: {e}")))?;

        let home = sftp
            .realpath(Path::new("."))
            .map_err(|e| FileError::OperationFailed(format!("realpath failed: {e}")))?;
        let cursor = RemotePath::parse(&home.to_string_lossy());
        info!(host = %config.host, cursor = %cursor, "SFTP session opened");

        *guard = Some(SftpState {
            session,
            sftp,
            cursor,
        });

        Ok(())
    }

    /// Run `op` against the connected SFTP state on a blocking thread.
    async fn with_sftp<T, F>(&self, op: F) -> Result<T, FileError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SftpState) -> Result<T, FileError> + Send + 'static,
    {
        let state = self.state.clone();
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || {
            Self::ensure_connected(&state, &config)?;
            let mut guard = state
                .lock()
                .map_err(|e| FileError::OperationFailed(format!("Lock failed: {e}")))?;
            let sftp_state = guard
                .as_mut()
                .ok_or_else(|| FileError::OperationFailed("SFTP not connected".to_string()))?;
            op(sftp_state)
        })
        .await
        .map_err(|e| FileError::OperationFailed(format!("Task join failed: {e}")))?
    }
}

#[async_trait::async_trait]
impl RemoteFileService for SftpNavigator {
    async fn list(&self) -> Result<Vec<FileEntry>, FileError> {
        self.with_sftp(|state| {
            let dir = PathBuf::from(state.cursor.to_string());
            let raw = state
                .sftp
                .readdir(&dir)
                .map_err(|e| FileError::OperationFailed(format!("readdir failed: {e}")))?;

            let mut listing = Vec::with_capacity(raw.len() + 1);
            if !state.cursor.is_root() {
                listing.push(FileEntry::directory(".."));
            }
            let mut entries: Vec<FileEntry> = raw
                .into_iter()
                .filter_map(|(pathbuf, stat)| {
                    let name = pathbuf.file_name()?.to_string_lossy().to_string();
                    Some(entry_from_stat(name, &stat))
                })
                .collect();
            sort_listing(&mut entries);
            listing.extend(entries);
            Ok(listing)
        })
        .await
    }

    async fn change_directory(&self, name: &str) -> Result<(), FileError> {
        let name = name.to_string();
        self.with_sftp(move |state| {
            let target = state.cursor.child(&name);
            let stat = state
                .sftp
                .stat(&PathBuf::from(target.to_string()))
                .map_err(|_| FileError::NotFound(name.clone()))?;
            if !stat.is_dir() {
                return Err(FileError::OperationFailed(format!(
                    "Not a directory: {name}"
                )));
            }
            debug!(cursor = %target, "directory cursor moved");
            state.cursor = target;
            Ok(())
        })
        .await
    }

    async fn download(&self, name: &str, open_after: bool) -> Result<(), FileError> {
        let name = name.to_string();
        let download_dir = self.config.download_dir.clone();
        self.with_sftp(move |state| {
            let remote = PathBuf::from(state.cursor.child(&name).to_string());
            let mut remote_file = state
                .sftp
                .open(&remote)
                .map_err(|e| FileError::OperationFailed(format!("open failed: {e}")))?;

            let mut data = Vec::new();
            remote_file
                .read_to_end(&mut data)
                .map_err(|e| FileError::OperationFailed(format!("read failed: {e}")))?;

            std::fs::create_dir_all(&download_dir)?;
            let local = download_dir.join(&name);
            std::fs::write(&local, &data)?;
            debug!(local = %local.display(), bytes = data.len(), "download spooled");

            if open_after {
                open::that(&local)?;
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, name: &str) -> Result<(), FileError> {
        let name = name.to_string();
        self.with_sftp(move |state| {
            let path = PathBuf::from(state.cursor.child(&name).to_string());
            let stat = state
                .sftp
                .stat(&path)
                .map_err(|_| FileError::NotFound(name.clone()))?;

            if stat.is_dir() {
                state
                    .sftp
                    .rmdir(&path)
                    .map_err(|e| FileError::OperationFailed(format!("rmdir failed: {e}")))?;
            } else {
                state
                    .sftp
                    .unlink(&path)
                    .map_err(|e| FileError::OperationFailed(format!("unlink failed: {e}")))?;
            }
            Ok(())
        })
        .await
    }

    async fn rename(&self, old: &str, new: &str) -> Result<(), FileError> {
        let old = old.to_string();
        let new = new.to_string();
        self.with_sftp(move |state| {
            let from = PathBuf::from(state.cursor.child(&old).to_string());
            let to = PathBuf::from(state.cursor.child(&new).to_string());
            state
                .sftp
                .rename(&from, &to, None)
                .map_err(|e| FileError::OperationFailed(format!("rename failed: {e}")))?;
            Ok(())
        })
        .await
    }

    async fn create_directory(&self, name: &str) -> Result<(), FileError> {
        let name = name.to_string();
        self.with_sftp(move |state| {
            let path = PathBuf::from(state.cursor.child(&name).to_string());
            state
                .sftp
                .mkdir(&path, 0o755)
                .map_err(|e| FileError::OperationFailed(format!("mkdir failed: {e}")))?;
            Ok(())
        })
        .await
    }

    async fn create_file(&self, name: &str) -> Result<(), FileError> {
        let name = name.to_string();
        self.with_sftp(move |state| {
            let path = PathBuf::from(state.cursor.child(&name).to_string());
            state
                .sftp
                .create(&path)
                .map_err(|e| FileError::OperationFailed(format!("create failed: {e}")))?;
            Ok(())
        })
        .await
    }

    async fn disconnect(&self) -> Result<(), FileError> {
        let state = self.state.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = state
                .lock()
                .map_err(|e| FileError::OperationFailed(format!("Lock failed: {e}")))?;
            let Some(sftp_state) = guard.take() else {
                debug!("disconnect on already-closed SFTP session");
                return Ok(());
            };
            sftp_state
                .session
                .disconnect(None, "session closed", None)
                .map_err(|e| {
                    warn!(%e, "SSH disconnect reported an error");
                    FileError::OperationFailed(format!("disconnect failed: {e}"))
                })
        })
        .await
        .map_err(|e| FileError::OperationFailed(format!("Task join failed: {e}")))?
    }
}

/// Connect to the SSH server, perform the handshake, and authenticate.
///
/// Returns an authenticated session in blocking mode. `auth_method`
/// selects agent, key-file, or password authentication; key files must
/// be in a format libssh2 accepts (PEM/PKCS#8).
fn connect_and_authenticate(config: &SshConfig) -> Result<ssh2::Session, FileError> {
    let tcp = TcpStream::connect((config.host.as_str(), config.port))
        .map_err(|e| FileError::OperationFailed(format!("Connection failed: {e}")))?;

    let mut session =
        ssh2::Session::new().map_err(|e| FileError::OperationFailed(e.to_string()))?;
    session.set_tcp_stream(tcp);
    session
        .handshake()
        .map_err(|e| FileError::OperationFailed(format!("Handshake failed: {e}")))?;

    match config.auth_method.as_str() {
        "agent" => {
            session
                .userauth_agent(&config.username)
                .map_err(|e| FileError::OperationFailed(format!("Agent auth failed: {e}")))?;
        }
        "key" => {
            let key_path_str = config
                .key_path
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or("~/.ssh/id_rsa");
            let key_path = PathBuf::from(expand_tilde(key_path_str));
            session
                .userauth_pubkey_file(
                    &config.username,
                    None,
                    &key_path,
                    config.password.as_deref(),
                )
                .map_err(|e| FileError::OperationFailed(format!("Key auth failed: {e}")))?;
        }
        _ => {
            let password = config.password.as_deref().unwrap_or("");
            session
                .userauth_password(&config.username, password)
                .map_err(|e| FileError::OperationFailed(format!("Password auth failed: {e}")))?;
        }
    }

    if !session.authenticated() {
        return Err(FileError::PermissionDenied(
            "Authentication failed".to_string(),
        ));
    }

    Ok(session)
}

/// Expand a leading `~/` (or a bare `~`) in a key path to the user's
/// home directory. `~user` forms are left alone.
fn expand_tilde(input: &str) -> String {
    let rest = match input.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return input.to_string(),
    };

    #[cfg(unix)]
    let home = std::env::var("HOME").ok();
    #[cfg(windows)]
    let home = std::env::var("USERPROFILE").ok();
    #[cfg(not(any(unix, windows)))]
    let home: Option<String> = None;

    match home {
        Some(home) => format!("{home}{rest}"),
        None => input.to_string(),
    }
}

/// Map an SFTP stat result onto the navigator's entry model. Symlinks
/// and specials surface as unknown-kind entries with no behavior.
fn entry_from_stat(name: String, stat: &ssh2::FileStat) -> FileEntry {
    if stat.is_dir() {
        FileEntry::directory(name)
    } else if stat.is_file() {
        FileEntry::file(name, stat.size.unwrap_or(0))
    } else {
        FileEntry::unknown(name)
    }
}

/// Directories first, then by name, so listing indices are stable for a
/// given directory state.
fn sort_listing(entries: &mut [FileEntry]) {
    use crate::files::EntryKind;
    entries.sort_by(|a, b| {
        let a_dir = a.kind == EntryKind::Directory;
        let b_dir = b.kind == EntryKind::Directory;
        b_dir.cmp(&a_dir).then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::EntryKind;

    fn stat(perm: u32, size: Option<u64>) -> ssh2::FileStat {
        ssh2::FileStat {
            size,
            uid: None,
            gid: None,
            perm: Some(perm),
            atime: None,
            mtime: None,
        }
    }

    #[test]
    fn regular_file_maps_to_file_entry_with_size() {
        let entry = entry_from_stat("a.txt".to_string(), &stat(0o100644, Some(120)));
        assert_eq!(entry.kind, EntryKind::File);
        assert_eq!(entry.size, Some(120));
    }

    #[test]
    fn directory_maps_to_directory_entry() {
        let entry = entry_from_stat("docs".to_string(), &stat(0o040755, None));
        assert_eq!(entry.kind, EntryKind::Directory);
        assert_eq!(entry.size, None);
    }

    #[test]
    fn symlink_maps_to_unknown_entry() {
        let entry = entry_from_stat("link".to_string(), &stat(0o120777, None));
        assert_eq!(entry.kind, EntryKind::Unknown);
    }

    #[test]
    fn tilde_slash_expands_to_home() {
        let result = expand_tilde("~/.ssh/id_rsa");
        assert!(!result.starts_with('~'), "expected expansion, got {result}");
        assert!(result.ends_with("/.ssh/id_rsa"));
    }

    #[test]
    fn tilde_user_and_plain_paths_are_unchanged() {
        assert_eq!(expand_tilde("~user/key"), "~user/key");
        assert_eq!(expand_tilde("/etc/key"), "/etc/key");
    }

    #[test]
    fn sort_puts_directories_first_then_names() {
        let mut entries = vec![
            FileEntry::file("b.txt", 1),
            FileEntry::directory("zeta"),
            FileEntry::file("a.txt", 1),
            FileEntry::directory("alpha"),
        ];
        sort_listing(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["alpha", "zeta", "a.txt", "b.txt"]);
    }
}
