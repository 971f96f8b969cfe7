//! Runs of the scoped workspace

use serde_json::{json, Value};

use crate::config::api;
use crate::error::Result;
use crate::tfe::helpers::api_path;
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

/// Run state transitions under `/runs/:run_id/actions/`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    Apply,
    Discard,
    Cancel,
    ForceCancel,
    ForceExecute,
}

impl RunAction {
    fn segment(self) -> &'static str {
        match self {
            RunAction::Apply => "apply",
            RunAction::Discard => "discard",
            RunAction::Cancel => "cancel",
            RunAction::ForceCancel => "force-cancel",
            RunAction::ForceExecute => "force-execute",
        }
    }
}

impl std::fmt::Display for RunAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}

#[derive(Debug, Clone)]
pub struct Runs {
    ctx: ResourceContext,
}

impl Resource for Runs {
    const KEY: &'static str = "runs";
    const SCOPE: RequiredScope = RequiredScope::OrganizationAndWorkspace;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl Runs {
    fn workspace_runs_path(&self, workspace_id: Option<&str>) -> Result<String> {
        let id = self.ctx.workspace_id(workspace_id)?;
        Ok(api_path(&[api::WORKSPACES, id, api::RUNS]))
    }

    fn filtered(filters: Option<&[&str]>) -> Query {
        Query {
            filters: filters.map(|f| f.iter().map(|s| s.to_string()).collect()),
            ..Query::default()
        }
    }

    /// GET /workspaces/:workspace_id/runs
    ///
    /// Filters take the `[status]=applied` form.
    pub async fn list(
        &self,
        workspace_id: Option<&str>,
        page: Option<Page>,
        filters: Option<&[&str]>,
    ) -> Result<ApiResponse> {
        let path = self.workspace_runs_path(workspace_id)?;
        self.ctx
            .requestor()
            .get(&path, &Self::filtered(filters).paged(page))
            .await
    }

    pub async fn list_all(
        &self,
        workspace_id: Option<&str>,
        filters: Option<&[&str]>,
    ) -> Result<ApiResponse> {
        let path = self.workspace_runs_path(workspace_id)?;
        self.ctx
            .requestor()
            .list_all(&path, &Self::filtered(filters))
            .await
    }

    /// GET /runs/:run_id
    pub async fn show(&self, run_id: &str, include: Option<&str>) -> Result<ApiResponse> {
        let mut query = Query::new();
        query.include = include.map(str::to_string);
        self.ctx
            .requestor()
            .get(&api_path(&[api::RUNS, run_id]), &query)
            .await
    }

    /// POST /runs against the scoped workspace
    ///
    /// Without a configuration version id the workspace's latest one is used.
    pub async fn create(
        &self,
        message: &str,
        is_destroy: bool,
        configuration_version_id: Option<&str>,
    ) -> Result<ApiResponse> {
        let workspace_id = self.ctx.workspace_id(None)?;

        let mut relationships = json!({
            "workspace": {"data": {"type": "workspaces", "id": workspace_id}}
        });
        if let Some(cv_id) = configuration_version_id {
            relationships["configuration-version"] =
                json!({"data": {"type": "configuration-versions", "id": cv_id}});
        }
        let payload = json!({
            "data": {
                "type": "runs",
                "attributes": {"is-destroy": is_destroy, "message": message},
                "relationships": relationships,
            }
        });

        self.ctx.log().info(format_args!(
            "Queuing {}run in workspace {}",
            if is_destroy { "destroy " } else { "" },
            workspace_id
        ));
        self.ctx
            .requestor()
            .post(&api_path(&[api::RUNS]), Some(&payload))
            .await
    }

    /// POST /runs/:run_id/actions/:action with an optional comment
    pub async fn action(
        &self,
        run_id: &str,
        action: RunAction,
        comment: Option<&str>,
    ) -> Result<ApiResponse> {
        let payload: Option<Value> = comment.map(|c| json!({ "comment": c }));
        let path = api_path(&[api::RUNS, run_id, "actions", action.segment()]);
        self.ctx
            .log()
            .info(format_args!("Run {}: {}", run_id, action));
        self.ctx.requestor().post(&path, payload.as_ref()).await
    }

    pub async fn apply(&self, run_id: &str, comment: Option<&str>) -> Result<ApiResponse> {
        self.action(run_id, RunAction::Apply, comment).await
    }

    pub async fn discard(&self, run_id: &str, comment: Option<&str>) -> Result<ApiResponse> {
        self.action(run_id, RunAction::Discard, comment).await
    }

    pub async fn cancel(&self, run_id: &str, comment: Option<&str>) -> Result<ApiResponse> {
        self.action(run_id, RunAction::Cancel, comment).await
    }

    pub async fn force_cancel(&self, run_id: &str, comment: Option<&str>) -> Result<ApiResponse> {
        self.action(run_id, RunAction::ForceCancel, comment).await
    }

    /// Skip the queue; the API takes no comment here
    pub async fn force_execute(&self, run_id: &str) -> Result<ApiResponse> {
        self.action(run_id, RunAction::ForceExecute, None).await
    }
}
