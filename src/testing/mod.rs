//! Helpers for tests of code built on the hop client.
//!
//! - [`fixtures`] - sample alert payloads (GCN circular, VOEvent, unstructured blob)
//! - [`auth`] - a temporary `hop/auth.toml` credential file
//! - [`env`] - a scoped overlay of process environment variables
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "auth-file")]
//! # fn main() {
//! use hop_mock::testing::{auth::TempAuthFile, env::EnvScope};
//!
//! const AUTH_TOML: &str = r#"
//! [auth]
//! username = "username"
//! password = "password"
//! "#;
//!
//! let root = tempfile::tempdir().unwrap();
//! let auth = TempAuthFile::with_contents(root.path(), AUTH_TOML, 0o600).unwrap();
//! let _env = EnvScope::set([("XDG_CONFIG_HOME", root.path())]).unwrap();
//!
//! // code under test reads $XDG_CONFIG_HOME/hop/auth.toml here
//! let config = auth.read().unwrap();
//! assert_eq!(config.credentials()[0].username, "username");
//! # }
//! # #[cfg(not(feature = "auth-file"))]
//! # fn main() {}
//! ```

#[cfg(feature = "auth-file")]
pub mod auth;
pub mod env;
pub mod fixtures;
