//! State versions of the scoped workspace

use crate::config::api;
use crate::error::Result;
use crate::tfe::helpers::api_path;
use crate::tfe::query::Query;
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

const STATE_VERSIONS: &str = "state-versions";

#[derive(Debug, Clone)]
pub struct StateVersions {
    ctx: ResourceContext,
}

impl Resource for StateVersions {
    const KEY: &'static str = "state_versions";
    const SCOPE: RequiredScope = RequiredScope::OrganizationAndWorkspace;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl StateVersions {
    /// GET /state-versions for the scoped workspace, all pages aggregated
    ///
    /// The endpoint selects the workspace through
    /// `filter[organization][name]` and `filter[workspace][name]`; these are
    /// sent first, followed by any extra `filters`.
    pub async fn list_all(&self, filters: Option<&[&str]>) -> Result<ApiResponse> {
        let org = self.ctx.require_org()?;
        let workspace = self.ctx.workspace_name(None)?;

        let mut query = Query::new()
            .filter(format!("[organization][name]={}", org))
            .filter(format!("[workspace][name]={}", workspace));
        for fragment in filters.unwrap_or_default() {
            query = query.filter(*fragment);
        }

        self.ctx
            .requestor()
            .list_all(&api_path(&[STATE_VERSIONS]), &query)
            .await
    }

    /// GET /state-versions/:state_version_id
    pub async fn show(&self, state_version_id: &str, include: Option<&str>) -> Result<ApiResponse> {
        let mut query = Query::new();
        query.include = include.map(str::to_string);
        self.ctx
            .requestor()
            .get(&api_path(&[STATE_VERSIONS, state_version_id]), &query)
            .await
    }

    /// GET /workspaces/:workspace_id/current-state-version
    pub async fn current(&self, workspace_id: Option<&str>) -> Result<ApiResponse> {
        let id = self.ctx.workspace_id(workspace_id)?;
        self.ctx
            .requestor()
            .get(
                &api_path(&[api::WORKSPACES, id, "current-state-version"]),
                &Query::default(),
            )
            .await
    }
}
