use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables for a navigator session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigatorConfig {
    /// Seconds before an in-flight remote request force-releases the
    /// operation gate.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Listing index whose context menu is suppressed, protecting the
    /// entry from delete/rename. Off by default; see DESIGN.md for why
    /// this exists at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected_index: Option<usize>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            protected_index: None,
        }
    }
}

impl NavigatorConfig {
    /// The gate timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// SSH/SFTP backend configuration.
///
/// - `port`: defaults to 22.
/// - `auth_method`: `"password"`, `"key"` or `"agent"`; anything else
///   falls back to password auth.
/// - `key_path`: a PEM or PKCS#8 private key accepted by libssh2.
///   OpenSSH-format keys must be converted first
///   (`ssh-keygen -p -m pem`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SshConfig {
    pub host: String,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
    pub username: String,
    #[serde(default)]
    pub auth_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_path: Option<String>,
    /// Directory downloaded files are spooled into.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_ssh_port(),
            username: String::new(),
            auth_method: String::new(),
            password: None,
            key_path: None,
            download_dir: default_download_dir(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_ssh_port() -> u16 {
    22
}

fn default_download_dir() -> PathBuf {
    std::env::temp_dir().join("remit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigator_config_defaults() {
        let config = NavigatorConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.protected_index, None);
    }

    #[test]
    fn navigator_config_deserializes_with_defaults() {
        let config: NavigatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.protected_index, None);

        let config: NavigatorConfig =
            serde_json::from_str(r#"{"requestTimeoutSecs":5,"protectedIndex":1}"#).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.protected_index, Some(1));
    }

    #[test]
    fn ssh_config_port_defaults_to_22() {
        let config: SshConfig = serde_json::from_str(
            r#"{"host":"example.com","username":"user","authMethod":"password"}"#,
        )
        .unwrap();
        assert_eq!(config.port, 22);
        assert_eq!(config.auth_method, "password");
    }
}
