//! State version outputs

use crate::error::Result;
use crate::tfe::helpers::api_path;
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

#[derive(Debug, Clone)]
pub struct StateVersionOutputs {
    ctx: ResourceContext,
}

impl Resource for StateVersionOutputs {
    const KEY: &'static str = "state_version_outputs";
    const SCOPE: RequiredScope = RequiredScope::None;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl StateVersionOutputs {
    /// GET /state-versions/:state_version_id/outputs
    pub async fn list(&self, state_version_id: &str, page: Option<Page>) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(
                &api_path(&["state-versions", state_version_id, "outputs"]),
                &Query::new().paged(page),
            )
            .await
    }

    pub async fn list_all(&self, state_version_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .list_all(
                &api_path(&["state-versions", state_version_id, "outputs"]),
                &Query::default(),
            )
            .await
    }

    /// GET /state-version-outputs/:id
    pub async fn show(&self, output_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&["state-version-outputs", output_id]), &Query::default())
            .await
    }

    /// GET /workspaces/:workspace_id/current-state-version-outputs
    pub async fn show_current_for_workspace(&self, workspace_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(
                &api_path(&["workspaces", workspace_id, "current-state-version-outputs"]),
                &Query::default(),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfe::scope::Scope;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> StateVersionOutputs {
        StateVersionOutputs::new(ResourceContext::test_context(uri, Scope::unscoped()))
    }

    #[tokio::test]
    async fn test_list_all_outputs_over_two_pages() {
        let mock_server = MockServer::start().await;

        for (page, id) in [("1", "wsout-1"), ("2", "wsout-2")] {
            Mock::given(method("GET"))
                .and(path("/state-versions/sv-1/outputs"))
                .and(query_param("page[number]", page))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "data": [{"id": id, "type": "state-version-outputs"}],
                    "meta": {"pagination": {"current-page": page.parse::<u32>().unwrap(), "total-pages": 2}}
                })))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let response = client(&mock_server.uri()).list_all("sv-1").await.unwrap();
        let ids: Vec<&str> = response
            .items()
            .iter()
            .filter_map(|item| item["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["wsout-1", "wsout-2"]);
    }

    #[tokio::test]
    async fn test_current_outputs_for_workspace() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/workspaces/ws-1/current-state-version-outputs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "wsout-1", "type": "state-version-outputs",
                          "attributes": {"name": "vpc_id", "value": "vpc-1"}}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client(&mock_server.uri())
            .show_current_for_workspace("ws-1")
            .await
            .unwrap();
        assert_eq!(response.items()[0]["attributes"]["value"], "vpc-1");
    }
}
