//! Acting-user resolution
//!
//! Mutations that are gated by role need to know who is acting. The id is
//! resolved from, in order: an explicit `--user` flag (or `ANASA_USER`), the
//! per-store `user` file written by `anasa user use`, and the configured
//! default identity. Commands that do not need an actor never trigger the
//! lookup.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::Storage;

/// Where the acting user came from, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Flag,
    StoreFile,
    ConfigDefault,
}

impl IdentitySource {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentitySource::Flag => "flag",
            IdentitySource::StoreFile => "store",
            IdentitySource::ConfigDefault => "config",
        }
    }
}

/// Resolve the acting user id, or `None` when nothing is configured.
///
/// The returned id is raw input; callers resolve it against the snapshot
/// (prefix matching included) when they actually need the user.
pub fn resolve(
    explicit: Option<&str>,
    storage: &Storage,
    config: &Config,
) -> Option<(String, IdentitySource)> {
    if let Some(id) = explicit.map(str::trim).filter(|id| !id.is_empty()) {
        return Some((id.to_string(), IdentitySource::Flag));
    }
    if let Some(id) = storage.read_user() {
        return Some((id, IdentitySource::StoreFile));
    }
    let default = config.identity.default.trim();
    if !default.is_empty() {
        return Some((default.to_string(), IdentitySource::ConfigDefault));
    }
    None
}

/// Like [`resolve`], but an absent identity is an error. Used by gated
/// mutations and actor-centric views.
pub fn require(explicit: Option<&str>, storage: &Storage, config: &Config) -> Result<String> {
    resolve(explicit, storage, config)
        .map(|(id, _)| id)
        .ok_or(Error::NoActingUser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Config) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::for_root(temp.path().to_path_buf());
        (temp, storage, Config::default())
    }

    #[test]
    fn explicit_flag_wins() {
        let (_temp, storage, mut config) = setup();
        storage.write_user("user-2").unwrap();
        config.identity.default = "user-3".to_string();

        let (id, source) = resolve(Some("user-1"), &storage, &config).unwrap();
        assert_eq!(id, "user-1");
        assert_eq!(source, IdentitySource::Flag);
    }

    #[test]
    fn store_file_beats_config_default() {
        let (_temp, storage, mut config) = setup();
        storage.write_user("user-2").unwrap();
        config.identity.default = "user-3".to_string();

        let (id, source) = resolve(None, &storage, &config).unwrap();
        assert_eq!(id, "user-2");
        assert_eq!(source, IdentitySource::StoreFile);
    }

    #[test]
    fn config_default_is_last_resort() {
        let (_temp, storage, mut config) = setup();
        config.identity.default = "user-3".to_string();

        let (id, source) = resolve(None, &storage, &config).unwrap();
        assert_eq!(id, "user-3");
        assert_eq!(source, IdentitySource::ConfigDefault);
    }

    #[test]
    fn blank_flag_is_ignored() {
        let (_temp, storage, config) = setup();
        assert!(resolve(Some("  "), &storage, &config).is_none());
    }

    #[test]
    fn require_errors_when_unset() {
        let (_temp, storage, config) = setup();
        let err = require(None, &storage, &config).unwrap_err();
        assert!(matches!(err, Error::NoActingUser));
    }
}
