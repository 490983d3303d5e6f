//! Path resolution for tenant definition documents.
//!
//! # Layout
//!
//! ```text
//! {app_data_path}/
//! └── {container_name}/          # "Sites" unless overridden
//!     └── {tenant}/
//!         └── ContentDefinition.json
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::consts::{APP_DATA_ENV, APP_NAME, CONTAINER_ENV, DEFAULT_CONTAINER_NAME};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  let userprofile = std::env::var("USERPROFILE").expect("USERPROFILE not set");
  PathBuf::from(userprofile)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  let home = std::env::var("HOME").expect("HOME not set");
  PathBuf::from(home)
}

/// Returns the directory for data files for the application
#[cfg(windows)]
pub fn data_dir() -> PathBuf {
  let appdata = std::env::var("APPDATA").expect("APPDATA not set");
  PathBuf::from(appdata).join(APP_NAME)
}

/// Returns the directory for data files for the application
#[cfg(not(windows))]
pub fn data_dir() -> PathBuf {
  let data_home = std::env::var("XDG_DATA_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".local").join("share"));
  data_home.join(APP_NAME)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
  #[error("invalid tenant name {0:?}: must be a single non-empty path segment")]
  InvalidTenant(String),
}

/// Name of a tenant, usable as a single directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantName(String);

impl TenantName {
  pub fn new(name: &str) -> Result<Self, PathError> {
    let valid = !name.is_empty()
      && name != "."
      && name != ".."
      && !name.contains(['/', '\\', '\0'])
      && name.trim() == name;

    if !valid {
      return Err(PathError::InvalidTenant(name.to_string()));
    }
    Ok(Self(name.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TenantName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Builds the location of a tenant-scoped file.
pub trait PathResolver {
  fn resolve(&self, tenant: &TenantName, file_name: &str) -> PathBuf;
}

/// Where tenant data lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOptions {
  /// Application data root (e.g., `~/.local/share/defstore`).
  pub app_data_path: PathBuf,
  /// Directory under the root holding one directory per tenant.
  pub container_name: String,
}

impl ShellOptions {
  pub fn new(app_data_path: impl Into<PathBuf>, container_name: impl Into<String>) -> Self {
    Self {
      app_data_path: app_data_path.into(),
      container_name: container_name.into(),
    }
  }

  /// Options from `DEFSTORE_APP_DATA` and `DEFSTORE_CONTAINER`, falling back
  /// to the platform data directory and `Sites`.
  pub fn from_env() -> Self {
    Self::from_env_with(None, None)
  }

  /// Like [`ShellOptions::from_env`], with explicit values taking precedence.
  ///
  /// The platform data directory is only looked up when neither `app_data`
  /// nor `DEFSTORE_APP_DATA` supplies a root.
  pub fn from_env_with(app_data: Option<PathBuf>, container: Option<String>) -> Self {
    let app_data_path = app_data
      .filter(|path| !path.as_os_str().is_empty())
      .or_else(|| {
        std::env::var(APP_DATA_ENV)
          .ok()
          .filter(|path| !path.is_empty())
          .map(PathBuf::from)
      })
      .unwrap_or_else(data_dir);
    let container_name = container
      .filter(|name| !name.is_empty())
      .or_else(|| std::env::var(CONTAINER_ENV).ok().filter(|name| !name.is_empty()))
      .unwrap_or_else(|| DEFAULT_CONTAINER_NAME.to_string());

    Self {
      app_data_path,
      container_name,
    }
  }

  /// Directory holding all files of a tenant.
  pub fn tenant_dir(&self, tenant: &TenantName) -> PathBuf {
    self
      .app_data_path
      .join(&self.container_name)
      .join(tenant.as_str())
  }
}

impl PathResolver for ShellOptions {
  fn resolve(&self, tenant: &TenantName, file_name: &str) -> PathBuf {
    self.tenant_dir(tenant).join(file_name)
  }
}
