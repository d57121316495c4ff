//! Authorizer backed by an INI key file.
//!
//! The key file keeps one `[servers]` group with three keys per credential
//! domain:
//!
//! ```ini
//! [servers]
//! translate_zanata_org.url=https://translate.zanata.org/
//! translate_zanata_org.username=alice
//! translate_zanata_org.key=0123456789abcdef
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use ini::Ini;
use reqwest::RequestBuilder;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::{apply_credentials, Authorizer};
use crate::cancel::check_cancelled;
use crate::error::{Result, ZanataError};

const SERVERS_GROUP: &str = "servers";
const KEY_FILE_NAME: &str = "zanata.ini";

/// Reads server URLs and API keys from a key file.
///
/// Keys are static, so refreshing is a no-op that always succeeds.
pub struct KeyFileAuthorizer {
    key_file: Mutex<Ini>,
}

impl std::fmt::Debug for KeyFileAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyFileAuthorizer").finish_non_exhaustive()
    }
}

impl KeyFileAuthorizer {
    /// Create an authorizer from an already loaded key file.
    pub fn new(key_file: Ini) -> Self {
        Self {
            key_file: Mutex::new(key_file),
        }
    }

    /// Parse key file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the contents are not valid INI.
    pub fn parse(contents: &str) -> Result<Self> {
        let key_file =
            Ini::load_from_str(contents).map_err(|e| ZanataError::KeyFileError(e.to_string()))?;
        Ok(Self::new(key_file))
    }

    /// Load a key file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let key_file = Ini::load_from_file(path)
            .map_err(|e| ZanataError::KeyFileError(format!("{}: {e}", path.display())))?;
        Ok(Self::new(key_file))
    }

    /// Load `zanata.ini` from the user's configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no configuration directory or the file
    /// cannot be loaded.
    pub fn from_default_location() -> Result<Self> {
        let path = Self::default_path().ok_or_else(|| {
            ZanataError::ConfigMissing("could not determine the user config directory".to_string())
        })?;
        Self::from_path(path)
    }

    /// Location of the default key file (`<config dir>/zanata.ini`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(KEY_FILE_NAME))
    }

    /// Replace the key file used for subsequent lookups.
    pub fn set_key_file(&self, key_file: Ini) {
        *self.lock() = key_file;
    }

    fn lock(&self) -> MutexGuard<'_, Ini> {
        self.key_file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(key_file: &Ini, domain: &str, field: &str) -> Option<String> {
        let key = format!("{domain}.{field}");
        let value = key_file.get_from(Some(SERVERS_GROUP), &key);
        if value.is_none() {
            tracing::warn!(group = SERVERS_GROUP, key = %key, "key not found in key file");
        }
        value.map(str::to_string)
    }
}

impl Authorizer for KeyFileAuthorizer {
    fn url(&self, domain: &str) -> Option<Url> {
        let value = {
            let key_file = self.lock();
            Self::lookup(&key_file, domain, "url")?
        };

        match Url::parse(&value) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(domain, url = %value, error = %e, "invalid server URL in key file");
                None
            }
        }
    }

    fn process_request(&self, domain: &str, request: RequestBuilder) -> RequestBuilder {
        let (username, key) = {
            let key_file = self.lock();
            (
                Self::lookup(&key_file, domain, "username"),
                Self::lookup(&key_file, domain, "key"),
            )
        };
        apply_credentials(request, username.as_deref(), key.as_deref())
    }

    fn refresh_authorization(&self, cancellable: Option<&CancellationToken>) -> Result<bool> {
        check_cancelled(cancellable)?;
        Ok(true)
    }
}
