//! Policy checks (Sentinel results attached to a run)

use crate::error::Result;
use crate::tfe::helpers::{api_path, validate_include};
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

/// Related resources `show` accepts in `include`
const SHOW_INCLUDES: &[&str] = &["run", "run.workspace"];

#[derive(Debug, Clone)]
pub struct PolicyChecks {
    ctx: ResourceContext,
}

impl Resource for PolicyChecks {
    const KEY: &'static str = "policy_checks";
    const SCOPE: RequiredScope = RequiredScope::None;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl PolicyChecks {
    /// GET /runs/:run_id/policy-checks
    pub async fn list(&self, run_id: &str, page: Option<Page>) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(
                &api_path(&["runs", run_id, "policy-checks"]),
                &Query::new().paged(page),
            )
            .await
    }

    /// GET /policy-checks/:id
    ///
    /// `include` must be `run` or `run.workspace`; anything else fails
    /// without sending a request.
    pub async fn show(&self, policy_check_id: &str, include: Option<&str>) -> Result<ApiResponse> {
        validate_include(include, SHOW_INCLUDES)?;
        let mut query = Query::new();
        query.include = include.map(str::to_string);
        self.ctx
            .requestor()
            .get(&api_path(&["policy-checks", policy_check_id]), &query)
            .await
    }

    /// POST /policy-checks/:id/actions/override
    pub async fn override_check(&self, policy_check_id: &str) -> Result<ApiResponse> {
        self.ctx.log().info(format_args!(
            "Overriding policy check {}",
            policy_check_id
        ));
        self.ctx
            .requestor()
            .post(
                &api_path(&["policy-checks", policy_check_id, "actions", "override"]),
                None,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use crate::tfe::scope::Scope;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> PolicyChecks {
        PolicyChecks::new(ResourceContext::test_context(uri, Scope::unscoped()))
    }

    #[tokio::test]
    async fn test_show_with_valid_include() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/policy-checks/polchk-1"))
            .and(query_param("include", "run.workspace"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "polchk-1", "type": "policy-checks"},
                "included": [{"id": "ws-1", "type": "workspaces"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client(&mock_server.uri())
            .show("polchk-1", Some("run.workspace"))
            .await
            .unwrap();
        assert_eq!(response.included().len(), 1);
    }

    #[tokio::test]
    async fn test_show_with_invalid_include_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri())
            .show("polchk-1", Some("plan"))
            .await;
        match result {
            Err(TfeError::InvalidQueryParam { param, value, .. }) => {
                assert_eq!(param, "include");
                assert_eq!(value, "plan");
            }
            other => panic!("Expected InvalidQueryParam, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_and_override() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/runs/run-1/policy-checks"))
            .and(query_param("page[number]", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "polchk-1", "type": "policy-checks"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/policy-checks/polchk-1/actions/override"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "polchk-1", "type": "policy-checks"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let checks = client(&mock_server.uri());
        let listed = checks.list("run-1", Some(Page::default())).await.unwrap();
        assert_eq!(listed.items().len(), 1);
        checks.override_check("polchk-1").await.unwrap();
    }
}
