//! HTTP registry client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::registry::{PackageMetadata, Registry, RegistryError};
use crate::types::{PackageName, Version};

/// Registry client speaking the JSON metadata protocol over HTTP.
///
/// Metadata lives at `<base>/packages/<name>` with an optional trailing
/// `/<version>` segment; artifacts are fetched from whatever URL the metadata
/// advertises.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: Client,
    base_url: String,
}

impl HttpRegistry {
    /// Client for the registry at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn metadata_url(&self, name: &PackageName, version: Option<&Version>) -> String {
        match version {
            Some(version) => format!("{}/packages/{name}/{version}", self.base_url),
            None => format!("{}/packages/{name}", self.base_url),
        }
    }
}

#[async_trait]
impl Registry for HttpRegistry {
    async fn resolve(
        &self,
        name: &PackageName,
        version: Option<&Version>,
    ) -> Result<PackageMetadata, RegistryError> {
        let url = self.metadata_url(name, version);
        tracing::debug!(%url, "resolving package metadata");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound {
                name: name.clone(),
                version: version.cloned(),
            });
        }

        let metadata = response.error_for_status()?.json().await?;
        Ok(metadata)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, RegistryError> {
        tracing::debug!(%url, "fetching artifact");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolve_parses_registry_metadata() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/packages/jq")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "jq",
                    "version": "1.7.1",
                    "download_url": "https://artifacts.test/jq.keg",
                    "signature": "abc123"
                }"#,
            )
            .create_async()
            .await;

        let registry = HttpRegistry::new(&server.url());
        let name = PackageName::new("jq");
        let metadata = registry.resolve(&name, None).await.unwrap();

        assert_eq!(metadata.name, name);
        assert_eq!(metadata.version.as_str(), "1.7.1");
        assert_eq!(metadata.download_url, "https://artifacts.test/jq.keg");
        assert_eq!(metadata.signature, "abc123");
        assert!(metadata.dependencies.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn resolve_with_version_hits_the_versioned_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/packages/jq/1.6.0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"name":"jq","version":"1.6.0","download_url":"https://artifacts.test/jq-1.6.0.keg"}"#,
            )
            .create_async()
            .await;

        let registry = HttpRegistry::new(&server.url());
        let metadata = registry
            .resolve(&PackageName::new("jq"), Some(&Version::new("1.6.0")))
            .await
            .unwrap();

        assert_eq!(metadata.version.as_str(), "1.6.0");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_version_defaults_to_one_point_oh() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/packages/jq")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"jq","download_url":"https://artifacts.test/jq.keg"}"#)
            .create_async()
            .await;

        let registry = HttpRegistry::new(&server.url());
        let metadata = registry.resolve(&PackageName::new("jq"), None).await.unwrap();
        assert_eq!(metadata.version.as_str(), "1.0.0");
        assert!(metadata.signature.is_empty());
    }

    #[tokio::test]
    async fn not_found_maps_to_a_typed_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/packages/ghost")
            .with_status(404)
            .create_async()
            .await;

        let registry = HttpRegistry::new(&server.url());
        let err = registry
            .resolve(&PackageName::new("ghost"), None)
            .await
            .unwrap_err();

        match err {
            RegistryError::NotFound { name, version } => {
                assert_eq!(name.as_str(), "ghost");
                assert!(version.is_none());
            }
            RegistryError::Http(err) => panic!("expected NotFound, got {err}"),
        }
    }

    #[tokio::test]
    async fn server_error_surfaces_as_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/packages/jq")
            .with_status(500)
            .create_async()
            .await;

        let registry = HttpRegistry::new(&server.url());
        let err = registry.resolve(&PackageName::new("jq"), None).await.unwrap_err();
        assert!(matches!(err, RegistryError::Http(_)));
    }

    #[tokio::test]
    async fn fetch_returns_raw_bytes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/artifacts/jq.keg")
            .with_status(200)
            .with_body(&b"opaque artifact payload"[..])
            .create_async()
            .await;

        let registry = HttpRegistry::new(&server.url());
        let url = format!("{}/artifacts/jq.keg", server.url());
        let bytes = registry.fetch(&url).await.unwrap();
        assert_eq!(bytes, b"opaque artifact payload");
    }

    #[tokio::test]
    async fn fetch_rejects_error_statuses() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/artifacts/jq.keg")
            .with_status(403)
            .create_async()
            .await;

        let registry = HttpRegistry::new(&server.url());
        let url = format!("{}/artifacts/jq.keg", server.url());
        assert!(registry.fetch(&url).await.is_err());
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let registry = HttpRegistry::new("https://registry.test/");
        assert_eq!(
            registry.metadata_url(&PackageName::new("jq"), None),
            "https://registry.test/packages/jq"
        );
    }
}
