//! Resources under management in a workspace's current state

use crate::config::api;
use crate::error::Result;
use crate::tfe::helpers::api_path;
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

#[derive(Debug, Clone)]
pub struct WorkspaceResources {
    ctx: ResourceContext,
}

impl Resource for WorkspaceResources {
    const KEY: &'static str = "workspace_resources";
    const SCOPE: RequiredScope = RequiredScope::OrganizationAndWorkspace;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl WorkspaceResources {
    fn resources_path(&self, workspace_id: Option<&str>) -> Result<String> {
        let id = self.ctx.workspace_id(workspace_id)?;
        Ok(api_path(&[api::WORKSPACES, id, "resources"]))
    }

    /// GET /workspaces/:workspace_id/resources
    pub async fn list(&self, workspace_id: Option<&str>, page: Option<Page>) -> Result<ApiResponse> {
        let path = self.resources_path(workspace_id)?;
        self.ctx
            .requestor()
            .get(&path, &Query::new().paged(page))
            .await
    }

    pub async fn list_all(&self, workspace_id: Option<&str>) -> Result<ApiResponse> {
        let path = self.resources_path(workspace_id)?;
        self.ctx
            .requestor()
            .list_all(&path, &Query::default())
            .await
    }
}
