//! Configuration versions: uploaded Terraform configuration bundles

use std::path::Path;

use serde_json::{json, Value};

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::tfe::helpers::{api_path, resource_payload};
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

const CONFIGURATION_VERSIONS: &str = "configuration-versions";

#[derive(Debug, Clone)]
pub struct ConfigurationVersions {
    ctx: ResourceContext,
}

impl Resource for ConfigurationVersions {
    const KEY: &'static str = "configuration_versions";
    const SCOPE: RequiredScope = RequiredScope::OrganizationAndWorkspace;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl ConfigurationVersions {
    fn workspace_path(&self, workspace_id: Option<&str>) -> Result<String> {
        let id = self.ctx.workspace_id(workspace_id)?;
        Ok(api_path(&[api::WORKSPACES, id, CONFIGURATION_VERSIONS]))
    }

    /// GET /workspaces/:workspace_id/configuration-versions
    pub async fn list(&self, workspace_id: Option<&str>, page: Option<Page>) -> Result<ApiResponse> {
        let path = self.workspace_path(workspace_id)?;
        self.ctx
            .requestor()
            .get(&path, &Query::new().paged(page))
            .await
    }

    /// GET /configuration-versions/:configuration_id
    pub async fn show(&self, cv_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&[CONFIGURATION_VERSIONS, cv_id]), &Query::default())
            .await
    }

    /// POST /workspaces/:workspace_id/configuration-versions
    ///
    /// The response carries the one-time `upload-url` used by [`upload`].
    ///
    /// [`upload`]: ConfigurationVersions::upload
    pub async fn create(
        &self,
        workspace_id: Option<&str>,
        auto_queue_runs: bool,
        speculative: bool,
    ) -> Result<ApiResponse> {
        let path = self.workspace_path(workspace_id)?;
        let payload = resource_payload(
            CONFIGURATION_VERSIONS,
            json!({
                "auto-queue-runs": auto_queue_runs,
                "speculative": speculative,
            }),
        );
        self.ctx.requestor().post(&path, Some(&payload)).await
    }

    /// `data.attributes.upload-url` of a `create` response
    pub fn upload_url(response: &ApiResponse) -> Result<&str> {
        response
            .data()
            .and_then(|doc| doc.pointer("/data/attributes/upload-url"))
            .and_then(Value::as_str)
            .ok_or_else(|| TfeError::Json("configuration version has no upload-url".to_string()))
    }

    /// PUT a `.tar.gz` bundle to an upload URL
    ///
    /// The URL points at the archive service, not the API, so no token is sent.
    pub async fn upload(&self, upload_url: &str, tarball: Vec<u8>) -> Result<ApiResponse> {
        self.ctx.log().info(format_args!(
            "Uploading configuration bundle ({} bytes)",
            tarball.len()
        ));
        self.ctx.requestor().put_bytes(upload_url, tarball).await
    }

    /// [`upload`](ConfigurationVersions::upload) the contents of a local bundle file
    pub async fn upload_file(&self, upload_url: &str, bundle: &Path) -> Result<ApiResponse> {
        let tarball = tokio::fs::read(bundle).await.map_err(|e| TfeError::Io {
            message: format!("Failed to read '{}': {}", bundle.display(), e),
        })?;
        self.upload(upload_url, tarball).await
    }

    /// GET /configuration-versions/:configuration_id/download into `output_path`
    ///
    /// Returns the number of bytes written. A 204 means nothing was uploaded.
    pub async fn download(&self, cv_id: &str, output_path: &Path) -> Result<u64> {
        let path = api_path(&[CONFIGURATION_VERSIONS, cv_id, "download"]);
        let response = self
            .ctx
            .requestor()
            .get(&path, &Query::default())
            .await?
            .error_for_status()?;

        if response.status_code() == 204 {
            return Err(TfeError::Api {
                status: 204,
                message: format!(
                    "Configuration version '{}' has no downloadable content",
                    cv_id
                ),
            });
        }

        let bytes = response.bytes();
        tokio::fs::write(output_path, bytes)
            .await
            .map_err(|e| TfeError::Io {
                message: format!("Failed to write '{}': {}", output_path.display(), e),
            })?;

        self.ctx.log().debug(format_args!(
            "Downloaded {} bytes to {}",
            bytes.len(),
            output_path.display()
        ));
        Ok(bytes.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfe::scope::Scope;
    use wiremock::matchers::{body_bytes, body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> ConfigurationVersions {
        let mut scope = Scope::with_organization("acme");
        scope
            .set_workspace("demo".to_string(), "ws-123".to_string())
            .unwrap();
        ConfigurationVersions::new(ResourceContext::test_context(uri, scope))
    }

    #[tokio::test]
    async fn test_create_then_upload() {
        let mock_server = MockServer::start().await;
        let upload_url = format!("{}/archivist/v1/object/abc", mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/workspaces/ws-123/configuration-versions"))
            .and(body_json(json!({
                "data": {
                    "type": "configuration-versions",
                    "attributes": {"auto-queue-runs": false, "speculative": true}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {
                    "id": "cv-1",
                    "type": "configuration-versions",
                    "attributes": {"upload-url": upload_url}
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/archivist/v1/object/abc"))
            .and(body_bytes(vec![0x1f, 0x8b, 0x08]))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let versions = client(&mock_server.uri());
        let created = versions.create(None, false, true).await.unwrap();
        let url = ConfigurationVersions::upload_url(&created).unwrap().to_string();
        assert_eq!(url, upload_url);

        versions.upload(&url, vec![0x1f, 0x8b, 0x08]).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_sends_no_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&mock_server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let url = format!("{}/upload", mock_server.uri());
        let response = client(&mock_server.uri()).upload(&url, vec![1]).await.unwrap();
        assert_eq!(response.status_code(), 200);
    }

    #[tokio::test]
    async fn test_list_and_show() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/workspaces/ws-123/configuration-versions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "cv-2", "type": "configuration-versions"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/configuration-versions/cv-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"id": "cv-2", "type": "configuration-versions", "attributes": {"status": "uploaded"}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let versions = client(&mock_server.uri());
        let listed = versions.list(None, None).await.unwrap();
        let latest = listed.items()[0]["id"].as_str().unwrap();
        let shown = versions.show(latest).await.unwrap();
        assert!(ConfigurationVersions::upload_url(&shown).is_err());
    }

    #[tokio::test]
    async fn test_upload_file_reads_bundle() {
        let mock_server = MockServer::start().await;
        let temp_dir = tempfile::tempdir().unwrap();
        let bundle = temp_dir.path().join("config.tar.gz");
        std::fs::write(&bundle, b"bundle bytes").unwrap();

        Mock::given(method("PUT"))
            .and(path("/upload/cv-1"))
            .and(body_bytes(b"bundle bytes".to_vec()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/upload/cv-1", mock_server.uri());
        client(&mock_server.uri())
            .upload_file(&url, &bundle)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_file_missing_bundle() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = client("http://127.0.0.1:9")
            .upload_file("http://127.0.0.1:9/upload", &temp_dir.path().join("absent.tar.gz"))
            .await;
        assert!(matches!(result, Err(TfeError::Io { .. })));
    }

    #[tokio::test]
    async fn test_download_writes_file() {
        let mock_server = MockServer::start().await;
        let content = b"fake tar.gz content";

        Mock::given(method("GET"))
            .and(path("/configuration-versions/cv-abc/download"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
            .mount(&mock_server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("config.tar.gz");
        let size = client(&mock_server.uri())
            .download("cv-abc", &output)
            .await
            .unwrap();

        assert_eq!(size, content.len() as u64);
        assert_eq!(std::fs::read(&output).unwrap(), content);
    }

    #[tokio::test]
    async fn test_download_without_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/configuration-versions/cv-empty/download"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("config.tar.gz");
        let result = client(&mock_server.uri())
            .download("cv-empty", &output)
            .await;

        assert!(matches!(result, Err(TfeError::Api { status: 204, .. })));
        assert!(!output.exists());
    }
}
