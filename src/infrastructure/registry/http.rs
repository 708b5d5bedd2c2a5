//! Registry lookup over the npm registry HTTP API

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use semver::Version;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::core::config::{GeneratorConfig, RegistryToken};
use crate::core::error::{Error, Result};
use crate::versioning::{RegistryClient, parse_version};

/// Package document returned by `GET /<package>`; only the dist-tags are read
#[derive(Debug, Deserialize)]
struct PackageDocument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
}

/// Reads the `latest` dist-tag of a package with a bearer token
pub struct HttpRegistry {
    client: Client,
    registry: String,
}

impl HttpRegistry {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.registry_timeout())
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| Error::registry(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            registry: config.registry_base().to_string(),
        })
    }

    /// Scoped names are requested as `@scope%2fname`
    fn package_url(&self, package: &str) -> String {
        format!("{}/{}", self.registry, package.replace('/', "%2f"))
    }
}

#[async_trait]
impl RegistryClient for HttpRegistry {
    async fn latest_version(
        &self,
        package: &str,
        token: &RegistryToken,
    ) -> Result<Option<Version>> {
        let url = self.package_url(package);
        debug!(url = %url, "Fetching package document");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::registry(format!("Failed to query {url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::registry(format!("HTTP {status} when fetching {url}")));
        }

        let document: PackageDocument = response
            .json()
            .await
            .map_err(|e| Error::registry(format!("Failed to parse package document: {e}")))?;

        match document.dist_tags.get("latest") {
            Some(latest) => parse_version(latest)
                .map(Some)
                .map_err(|e| Error::registry(format!("Invalid latest version \"{latest}\": {e}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn http_registry(server: &MockServer) -> HttpRegistry {
        let config = GeneratorConfig {
            registry_url: Url::parse(&server.uri()).unwrap(),
            ..GeneratorConfig::default()
        };
        HttpRegistry::new(&config).unwrap()
    }

    fn token() -> RegistryToken {
        RegistryToken::new("ghp_test_token").unwrap()
    }

    #[tokio::test]
    async fn test_latest_dist_tag() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/@events-project%2fgrpc-account"))
            .and(header("authorization", "Bearer ghp_test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{
                    "name": "@events-project/grpc-account",
                    "dist-tags": { "latest": "1.2.9", "next": "2.0.0-rc.1" },
                    "versions": {}
                }"#,
            ))
            .mount(&mock_server)
            .await;

        let version = http_registry(&mock_server)
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap();

        assert_eq!(version, Some(Version::new(1, 2, 9)));
    }

    #[tokio::test]
    async fn test_not_found_means_unpublished() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let version = http_registry(&mock_server)
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap();

        assert_eq!(version, None);
    }

    #[tokio::test]
    async fn test_unauthorized_is_registry_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = http_registry(&mock_server)
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap_err();

        match err {
            Error::Registry(msg) => assert!(msg.contains("HTTP 401")),
            other => panic!("Expected Registry error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_latest_tag() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{ "name": "x" }"#))
            .mount(&mock_server)
            .await;

        let version = http_registry(&mock_server)
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap();

        assert_eq!(version, None);
    }

    #[tokio::test]
    async fn test_malformed_body_is_registry_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = http_registry(&mock_server)
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Registry(_)));
    }

    #[tokio::test]
    async fn test_unreachable_registry_is_registry_error() {
        let config = GeneratorConfig {
            registry_url: Url::parse("http://127.0.0.1:1").unwrap(),
            registry_timeout_secs: 1,
            ..GeneratorConfig::default()
        };
        let err = HttpRegistry::new(&config)
            .unwrap()
            .latest_version("@events-project/grpc-account", &token())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Registry(_)));
    }
}
