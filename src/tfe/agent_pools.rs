//! Agent pools

use serde_json::json;

use crate::config::api;
use crate::error::Result;
use crate::tfe::helpers::{api_path, resource_payload, validate_include};
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

const AGENT_POOLS: &str = "agent-pools";
const INCLUDES: &[&str] = &["workspaces"];

#[derive(Debug, Clone)]
pub struct AgentPools {
    ctx: ResourceContext,
}

impl Resource for AgentPools {
    const KEY: &'static str = "agent_pools";
    const SCOPE: RequiredScope = RequiredScope::Organization;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl AgentPools {
    fn collection_path(&self) -> Result<String> {
        let org = self.ctx.require_org()?;
        Ok(api_path(&[api::ORGANIZATIONS, org, AGENT_POOLS]))
    }

    /// GET /organizations/:organization_name/agent-pools
    pub async fn list(&self, page: Option<Page>) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&self.collection_path()?, &Query::new().paged(page))
            .await
    }

    pub async fn list_all(&self) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .list_all(&self.collection_path()?, &Query::default())
            .await
    }

    /// GET /agent-pools/:id; `include` may only be `workspaces`
    pub async fn show(&self, agent_pool_id: &str, include: Option<&str>) -> Result<ApiResponse> {
        validate_include(include, INCLUDES)?;
        let mut query = Query::new();
        query.include = include.map(str::to_string);
        self.ctx
            .requestor()
            .get(&api_path(&[AGENT_POOLS, agent_pool_id]), &query)
            .await
    }

    /// POST /organizations/:organization_name/agent-pools
    pub async fn create(&self, name: &str) -> Result<ApiResponse> {
        let payload = resource_payload(AGENT_POOLS, json!({ "name": name }));
        self.ctx
            .requestor()
            .post(&self.collection_path()?, Some(&payload))
            .await
    }
}
