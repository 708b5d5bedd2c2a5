//! Registry lookup through `npm view`

use async_trait::async_trait;
use semver::Version;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::core::config::{GeneratorConfig, RegistryToken};
use crate::core::error::{Error, Result};
use crate::infrastructure::registry::npmrc::NpmrcGuard;
use crate::infrastructure::shell::CommandExecutor;
use crate::versioning::{RegistryClient, parse_version};

const NPM: &str = if cfg!(target_os = "windows") {
    "npm.cmd"
} else {
    "npm"
};

/// Queries the registry with the npm CLI, authenticating through a temporary
/// user config written next to the service
pub struct NpmCliRegistry {
    executor: Arc<dyn CommandExecutor>,
    working_dir: PathBuf,
    registry: String,
    scope: String,
    timeout: Duration,
}

impl NpmCliRegistry {
    pub fn new(
        executor: Arc<dyn CommandExecutor>,
        working_dir: PathBuf,
        config: &GeneratorConfig,
    ) -> Self {
        Self {
            executor,
            working_dir,
            registry: config.registry_base().to_string(),
            scope: config.package_scope.clone(),
            timeout: config.registry_timeout(),
        }
    }
}

#[async_trait]
impl RegistryClient for NpmCliRegistry {
    async fn latest_version(
        &self,
        package: &str,
        token: &RegistryToken,
    ) -> Result<Option<Version>> {
        let npmrc = NpmrcGuard::create(&self.working_dir, &self.registry, &self.scope, token)?;

        let args = vec![
            "view".to_string(),
            package.to_string(),
            "version".to_string(),
            format!("--registry={}", self.registry),
            format!("--userconfig={}", npmrc.path().display()),
        ];
        debug!(package, registry = %self.registry, "Running npm view");

        let outcome = tokio::time::timeout(
            self.timeout,
            self.executor.execute(NPM, &args, &self.working_dir),
        )
        .await;
        npmrc.close();

        let result = outcome
            .map_err(|_| {
                Error::registry(format!(
                    "npm view timed out after {}s",
                    self.timeout.as_secs_f32()
                ))
            })?
            .map_err(|e| Error::registry(format!("npm view could not run: {e}")))?;

        if !result.is_success() {
            return Err(Error::registry(format!(
                "npm view exited with status {}: {}",
                result.exit_code,
                result.stderr.trim()
            )));
        }

        let published = result.stdout.trim();
        if published.is_empty() {
            return Ok(None);
        }

        parse_version(published)
            .map(Some)
            .map_err(|e| Error::registry(format!("Unexpected npm view output \"{published}\": {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::shell::{CommandResult, MockCommandExecutor};
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records whether the `--userconfig` file existed, and what it held, while npm ran
    struct NpmrcProbe {
        reply: CommandResult,
        delay: Option<Duration>,
        seen: Mutex<Vec<(PathBuf, Option<String>)>>,
    }

    impl NpmrcProbe {
        fn new(exit_code: i32, stdout: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: CommandResult {
                    exit_code,
                    stdout: stdout.to_string(),
                    stderr: if exit_code == 0 {
                        String::new()
                    } else {
                        "npm ERR! code E404".to_string()
                    },
                },
                delay: None,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn slow() -> Arc<Self> {
            Arc::new(Self {
                reply: CommandResult {
                    exit_code: 0,
                    stdout: "1.0.0".to_string(),
                    stderr: String::new(),
                },
                delay: Some(Duration::from_secs(30)),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn seen(&self) -> Vec<(PathBuf, Option<String>)> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandExecutor for NpmrcProbe {
        async fn execute(
            &self,
            _program: &str,
            args: &[String],
            _working_dir: &Path,
        ) -> Result<CommandResult> {
            let userconfig = args
                .iter()
                .find_map(|a| a.strip_prefix("--userconfig="))
                .map(PathBuf::from)
                .expect("npm view gets a --userconfig argument");
            let contents = std::fs::read_to_string(&userconfig).ok();
            self.seen.lock().unwrap().push((userconfig, contents));

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self.reply.clone())
        }
    }

    fn registry(dir: &TempDir, executor: Arc<dyn CommandExecutor>) -> NpmCliRegistry {
        NpmCliRegistry::new(executor, dir.path().to_path_buf(), &GeneratorConfig::default())
    }

    fn token() -> RegistryToken {
        RegistryToken::new("ghp_test_token").unwrap()
    }

    fn leftover_npmrc_files(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".temp-npmrc-"))
            .count()
    }

    #[tokio::test]
    async fn test_published_version() {
        let dir = TempDir::new().unwrap();
        let probe = NpmrcProbe::new(0, "1.4.2\n");
        let version = registry(&dir, probe.clone())
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap();

        assert_eq!(version, Some(Version::new(1, 4, 2)));

        let seen = probe.seen();
        assert_eq!(seen.len(), 1);
        let (path, contents) = &seen[0];
        let contents = contents.as_deref().expect("npmrc exists during the query");
        assert!(contents.contains("//npm.pkg.github.com/:_authToken=ghp_test_token"));
        assert!(contents.contains("@events-project:registry=https://npm.pkg.github.com"));
        assert!(!path.exists());
        assert_eq!(leftover_npmrc_files(&dir), 0);
    }

    #[tokio::test]
    async fn test_failed_query_removes_npmrc() {
        let dir = TempDir::new().unwrap();
        let probe = NpmrcProbe::new(1, "");
        let err = registry(&dir, probe.clone())
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Registry(_)));
        assert!(err.to_string().contains("E404"));
        assert!(probe.seen()[0].1.is_some());
        assert_eq!(leftover_npmrc_files(&dir), 0);
    }

    #[tokio::test]
    async fn test_empty_output_means_unpublished() {
        let dir = TempDir::new().unwrap();
        let version = registry(&dir, NpmrcProbe::new(0, "\n"))
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap();
        assert_eq!(version, None);
    }

    #[tokio::test]
    async fn test_garbage_output_is_registry_error() {
        let dir = TempDir::new().unwrap();
        let err = registry(&dir, NpmrcProbe::new(0, "npm WARN something"))
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Registry(_)));
        assert_eq!(leftover_npmrc_files(&dir), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_removes_npmrc() {
        let dir = TempDir::new().unwrap();
        let probe = NpmrcProbe::slow();
        let err = registry(&dir, probe.clone())
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("timed out"));
        assert_eq!(probe.seen().len(), 1);
        assert_eq!(leftover_npmrc_files(&dir), 0);
    }

    #[tokio::test]
    async fn test_executor_error_removes_npmrc() {
        let dir = TempDir::new().unwrap();
        let executor = Arc::new(MockCommandExecutor::new());
        let err = registry(&dir, executor.clone())
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Registry(_)));
        assert!(err.to_string().contains("could not run"));
        let invocations = executor.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].1[0], "view");
        assert_eq!(invocations[0].1[1], "@events-project/grpc-account");
        assert_eq!(invocations[0].1[3], "--registry=https://npm.pkg.github.com");
        assert_eq!(leftover_npmrc_files(&dir), 0);
    }
}
