use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "orchid-console";
const KEYRING_USER: &str = "bearer-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV: &str = "ORCHID_AUTH__TOKEN";

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
        }
    }
}

/// Keyring service name. `ORCHID_KEYRING_SERVICE` overrides it so tests do
/// not touch real credentials.
fn keyring_service() -> String {
    std::env::var("ORCHID_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store a bearer token in the OS keychain. Falls back to the credentials
/// file if the keyring is unavailable.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if both keyring and file storage fail.
pub fn store(jwt: &str) -> Result<(), AuthError> {
    let saved = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        .and_then(|entry| entry.set_password(jwt));
    if let Err(error) = saved {
        tracing::warn!(%error, "keyring store failed; writing credentials file");
        CredentialsFile::locate()?.write(jwt)?;
    }
    Ok(())
}

/// Load the bearer token. Priority: keyring, `ORCHID_AUTH__TOKEN`, file.
#[must_use]
pub fn load() -> Option<String> {
    load_with_source().map(|(token, _)| token)
}

/// Load the bearer token together with the tier it came from.
#[must_use]
pub fn load_with_source() -> Option<(String, TokenSource)> {
    let from_keyring = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        .and_then(|entry| entry.get_password())
        .ok()
        .and_then(non_blank);
    if let Some(token) = from_keyring {
        return Some((token, TokenSource::Keyring));
    }
    if let Some(token) = std::env::var(TOKEN_ENV).ok().and_then(non_blank) {
        return Some((token, TokenSource::Env));
    }
    CredentialsFile::locate()
        .ok()
        .and_then(|file| file.read())
        .map(|token| (token, TokenSource::File))
}

/// Forget the token in every tier this module writes to.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        // No entry is fine.
        let _ = entry.delete_credential();
    }
    CredentialsFile::locate()?.remove()
}

fn non_blank(token: String) -> Option<String> {
    let trimmed = token.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// `~/.orchid/credentials`, owner-only.
struct CredentialsFile {
    path: PathBuf,
}

impl CredentialsFile {
    fn locate() -> Result<Self, AuthError> {
        let home = dirs::home_dir().ok_or_else(|| {
            AuthError::TokenStoreError("no home directory for the credentials file".into())
        })?;
        Ok(Self::at(home.join(".orchid").join(CREDENTIALS_FILE_NAME)))
    }

    const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn failed(&self, action: &str, error: &std::io::Error) -> AuthError {
        AuthError::TokenStoreError(format!("{action} {}: {error}", self.path.display()))
    }

    fn write(&self, jwt: &str) -> Result<(), AuthError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.failed("create parent of", &e))?;
            restrict(dir, 0o700);
        }
        fs::write(&self.path, jwt.trim()).map_err(|e| self.failed("write", &e))?;
        if !restrict(&self.path, 0o600) {
            return Err(AuthError::TokenStoreError(format!(
                "could not make {} owner-only",
                self.path.display()
            )));
        }
        Ok(())
    }

    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok().and_then(non_blank)
    }

    fn remove(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Err(error) if error.kind() != std::io::ErrorKind::NotFound => {
                Err(self.failed("remove", &error))
            }
            _ => Ok(()),
        }
    }
}

/// Set unix permission bits; reports whether it worked. Always true elsewhere.
#[cfg(unix)]
fn restrict(path: &Path, mode: u32) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match fs::set_permissions(path, fs::Permissions::from_mode(mode)) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "chmod {mode:o} failed");
            false
        }
    }
}

#[cfg(not(unix))]
const fn restrict(_path: &Path, _mode: u32) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn credentials_live_under_home() {
        let file = CredentialsFile::locate().expect("home resolves");
        assert!(file.path.ends_with(".orchid/credentials"));
    }

    #[test]
    fn file_tier_round_trips_and_trims() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let file = CredentialsFile::at(tmp.path().join("lab").join("credentials"));

        file.write("  eyJ.token.sig\n").expect("write");
        assert_eq!(file.read().as_deref(), Some("eyJ.token.sig"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&file.path).expect("metadata").permissions().mode() & 0o777;
            assert_eq!(mode, 0o600);
        }

        file.remove().expect("remove");
        assert!(!file.path.exists());
        file.remove().expect("removing a missing file is fine");
    }

    #[test]
    fn blank_file_reads_as_no_token() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let file = CredentialsFile::at(tmp.path().join("credentials"));
        fs::write(&file.path, "   \n  ").expect("write");
        assert_eq!(file.read(), None);
    }

    #[test]
    fn token_source_labels() {
        assert_eq!(TokenSource::Keyring.as_str(), "keyring");
        assert_eq!(TokenSource::Env.as_str(), "env");
        assert_eq!(TokenSource::File.as_str(), "file");
    }
}
