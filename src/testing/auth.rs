//! Temporary hop credential files.
//!
//! hop looks for credentials in `<config root>/hop/auth.toml`. Two layouts exist: the legacy
//! one holds a single `[auth]` table, the current one an `[[auth]]` array of tables so several
//! credentials can be stored side by side.
//!
//! [`TempAuthFile`] writes such a file below a chosen root with chosen permission bits and
//! removes it again when dropped, including while a failed test is unwinding.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::error::{Error, Result};

/// Permission bits used when a test doesn't care: readable and writable by the owner only.
pub const DEFAULT_AUTH_FILE_MODE: u32 = 0o600;

const AUTH_DIR: &str = "hop";
const AUTH_FILE: &str = "auth.toml";

/// Location of the credential file below `root`.
pub fn auth_file_path(root: &Path) -> PathBuf {
    root.join(AUTH_DIR).join(AUTH_FILE)
}

/// One set of credentials.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,

    /// Broker the credential applies to; absent in legacy files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Security protocol, e.g. `SASL_SSL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// SASL mechanism, e.g. `SCRAM-SHA-512`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mechanism: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_ca_location: Option<String>,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub fn with_hostname(self, hostname: impl Into<String>) -> Self {
        Self {
            hostname: Some(hostname.into()),
            ..self
        }
    }

    pub fn with_protocol(self, protocol: impl Into<String>) -> Self {
        Self {
            protocol: Some(protocol.into()),
            ..self
        }
    }

    pub fn with_mechanism(self, mechanism: impl Into<String>) -> Self {
        Self {
            mechanism: Some(mechanism.into()),
            ..self
        }
    }

    pub fn with_ssl_ca_location(self, ssl_ca_location: impl Into<String>) -> Self {
        Self {
            ssl_ca_location: Some(ssl_ca_location.into()),
            ..self
        }
    }
}

/// Contents of a credential file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// A single `[auth]` table.
    Legacy(Credential),
    /// An `[[auth]]` array of tables.
    Multiple(Vec<Credential>),
}

#[derive(Serialize)]
struct LegacyFile<'a> {
    auth: &'a Credential,
}

#[derive(Serialize)]
struct MultipleFile<'a> {
    auth: &'a [Credential],
}

#[derive(Deserialize)]
struct AnyFile {
    auth: OneOrMany,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Credential),
    Many(Vec<Credential>),
}

impl AuthConfig {
    pub fn to_toml(&self) -> Result<String> {
        let rendered = match self {
            Self::Legacy(auth) => toml::to_string(&LegacyFile { auth }),
            Self::Multiple(auth) => toml::to_string(&MultipleFile { auth }),
        };

        rendered.map_err(|e| Error::Config(format!("Failed to serialize auth config: {e}")))
    }

    /// Parses either file layout.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: AnyFile = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse auth config: {e}")))?;

        Ok(match file.auth {
            OneOrMany::One(credential) => Self::Legacy(credential),
            OneOrMany::Many(credentials) => Self::Multiple(credentials),
        })
    }

    /// All credentials in the file, in order.
    pub fn credentials(&self) -> &[Credential] {
        match self {
            Self::Legacy(credential) => std::slice::from_ref(credential),
            Self::Multiple(credentials) => credentials,
        }
    }
}

/// A credential file that is removed when dropped.
#[derive(Debug)]
pub struct TempAuthFile {
    path: PathBuf,
}

impl TempAuthFile {
    /// Writes `config` to `<root>/hop/auth.toml`.
    pub fn create(root: impl AsRef<Path>, config: &AuthConfig, mode: u32) -> Result<Self> {
        let contents = config.to_toml()?;
        Self::with_contents(root, &contents, mode)
    }

    /// Writes `contents` verbatim to `<root>/hop/auth.toml`.
    ///
    /// The `hop` directory is created if missing and is left in place on drop.
    pub fn with_contents(root: impl AsRef<Path>, contents: &str, mode: u32) -> Result<Self> {
        let path = auth_file_path(root.as_ref());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;

        // from here on the file is cleaned up even if setting the mode fails
        let file = Self { path };
        set_mode(&file.path, mode)?;

        debug!(
            path = %file.path.display(),
            mode = %format!("{mode:o}"),
            "Wrote auth config",
        );

        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file back.
    pub fn read(&self) -> Result<AuthConfig> {
        let contents = fs::read_to_string(&self.path)?;
        AuthConfig::from_toml(&contents)
    }
}

impl Drop for TempAuthFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed auth config"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                %e,
                "Failed to remove auth config",
            ),
        }
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn legacy_layout() {
        let config = AuthConfig::Legacy(
            Credential::new("username", "password")
                .with_protocol("SASL_SSL")
                .with_mechanism("SCRAM-SHA-512"),
        );

        let rendered = config.to_toml().unwrap();
        assert!(rendered.starts_with("[auth]\n"));
        assert!(rendered.contains("username = \"username\"\n"));
        assert!(!rendered.contains("hostname"));

        assert_eq!(AuthConfig::from_toml(&rendered).unwrap(), config);
    }

    #[test]
    fn multiple_layout() {
        let config = AuthConfig::Multiple(vec![
            Credential::new("user1", "pass1").with_hostname("example.com"),
            Credential::new("user2", "pass2")
                .with_hostname("example.org:9092")
                .with_ssl_ca_location("/etc/ssl/ca.pem"),
        ]);

        let rendered = config.to_toml().unwrap();
        assert_eq!(rendered.matches("[[auth]]").count(), 2);

        let parsed = AuthConfig::from_toml(&rendered).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.credentials().len(), 2);
        assert_eq!(
            parsed.credentials()[1].ssl_ca_location.as_deref(),
            Some("/etc/ssl/ca.pem")
        );
    }

    #[test]
    fn parse_handwritten_files() {
        let legacy = r#"
[auth]
username = "username"
password = "password"
protocol = "SASL_SSL"
mechanism = "PLAIN"
"#;
        assert_matches!(
            AuthConfig::from_toml(legacy).unwrap(),
            AuthConfig::Legacy(Credential { username, mechanism: Some(mechanism), .. })
                if username == "username" && mechanism == "PLAIN"
        );

        let multiple = r#"
auth = [{ username = "a", password = "b", hostname = "kafka.scimma.org" }]
"#;
        assert_matches!(
            AuthConfig::from_toml(multiple).unwrap(),
            AuthConfig::Multiple(credentials) if credentials.len() == 1
        );
    }

    #[test]
    fn parse_error() {
        assert_matches!(
            AuthConfig::from_toml("auth = 42"),
            Err(Error::Config(_))
        );
        assert_matches!(AuthConfig::from_toml("[other]"), Err(Error::Config(_)));
    }

    #[test]
    fn path_layout() {
        assert_eq!(
            auth_file_path(Path::new("/tmp/config")),
            PathBuf::from("/tmp/config/hop/auth.toml")
        );
    }
}
