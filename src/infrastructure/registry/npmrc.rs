//! Temporary npm user config carrying the registry token

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::core::config::RegistryToken;
use crate::core::error::{Error, Result};

const NPMRC_PREFIX: &str = ".temp-npmrc-";

/// Scoped `.npmrc` holding the auth token for one registry query.
///
/// The file is removed when the guard is closed or dropped, whichever comes
/// first, so it never outlives the query.
pub struct NpmrcGuard {
    file: NamedTempFile,
}

impl NpmrcGuard {
    /// Write a uniquely named npm config into `dir`
    pub fn create(dir: &Path, registry: &str, scope: &str, token: &RegistryToken) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(NPMRC_PREFIX)
            .tempfile_in(dir)
            .map_err(|e| {
                Error::registry(format!(
                    "Failed to create temporary npm config in {}: {e}",
                    dir.display()
                ))
            })?;

        let contents = npmrc_contents(registry, scope, token);
        file.write_all(contents.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| Error::registry(format!("Failed to write temporary npm config: {e}")))?;

        debug!(path = %file.path().display(), "Created temporary npm config");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Remove the file now, logging instead of failing if removal does not succeed
    pub fn close(self) {
        let path = self.file.path().to_path_buf();
        match self.file.close() {
            Ok(()) => debug!(path = %path.display(), "Removed temporary npm config"),
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove temporary npm config"
            ),
        }
    }
}

/// `//host/path/:_authToken=<token>` followed by the scope registry mapping
fn npmrc_contents(registry: &str, scope: &str, token: &RegistryToken) -> String {
    let registry = registry.trim_end_matches('/');
    let auth_key = registry
        .strip_prefix("https:")
        .or_else(|| registry.strip_prefix("http:"))
        .unwrap_or(registry);
    format!(
        "{auth_key}/:_authToken={}\n{scope}:registry={registry}\n",
        token.expose_secret()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn token() -> RegistryToken {
        RegistryToken::new("ghp_test_token").unwrap()
    }

    #[test]
    fn test_npmrc_contents() {
        let contents = npmrc_contents("https://npm.pkg.github.com", "@events-project", &token());
        assert_eq!(
            contents,
            "//npm.pkg.github.com/:_authToken=ghp_test_token\n@events-project:registry=https://npm.pkg.github.com\n"
        );
    }

    #[test]
    fn test_npmrc_contents_with_path() {
        let contents = npmrc_contents("http://localhost:4873/npm/", "@acme", &token());
        assert!(contents.starts_with("//localhost:4873/npm/:_authToken=ghp_test_token\n"));
        assert!(contents.ends_with("@acme:registry=http://localhost:4873/npm\n"));
    }

    #[test]
    fn test_guard_writes_and_removes_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = {
            let guard =
                NpmrcGuard::create(dir.path(), "https://npm.pkg.github.com", "@events-project", &token())
                    .unwrap();
            let path = guard.path().to_path_buf();
            assert!(path.exists());
            assert!(
                path.file_name()
                    .unwrap()
                    .to_string_lossy()
                    .starts_with(".temp-npmrc-")
            );
            let written = std::fs::read_to_string(&path).unwrap();
            assert!(written.contains("_authToken=ghp_test_token"));
            path
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_guard_close_removes_file() {
        let dir = TempDir::new().unwrap();
        let guard =
            NpmrcGuard::create(dir.path(), "https://npm.pkg.github.com", "@events-project", &token())
                .unwrap();
        let path = guard.path().to_path_buf();
        guard.close();
        assert!(!path.exists());
    }

    #[test]
    fn test_guards_get_unique_names() {
        let dir = TempDir::new().unwrap();
        let a = NpmrcGuard::create(dir.path(), "https://r.example", "@s", &token()).unwrap();
        let b = NpmrcGuard::create(dir.path(), "https://r.example", "@s", &token()).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_create_in_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let result = NpmrcGuard::create(&missing, "https://r.example", "@s", &token());
        assert!(matches!(result, Err(Error::Registry(_))));
    }
}
