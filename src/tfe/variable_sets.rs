//! Variable sets

use serde_json::json;

use crate::config::api;
use crate::error::Result;
use crate::tfe::helpers::{api_path, resource_payload};
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

const VARSETS: &str = "varsets";

#[derive(Debug, Clone)]
pub struct VariableSets {
    ctx: ResourceContext,
}

impl Resource for VariableSets {
    const KEY: &'static str = "variable_sets";
    const SCOPE: RequiredScope = RequiredScope::Organization;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl VariableSets {
    fn collection_path(&self) -> Result<String> {
        let org = self.ctx.require_org()?;
        Ok(api_path(&[api::ORGANIZATIONS, org, VARSETS]))
    }

    /// GET /organizations/:organization_name/varsets
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

    /// GET /varsets/:varset_id
    pub async fn show(&self, varset_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&[VARSETS, varset_id]), &Query::default())
            .await
    }

    /// POST /organizations/:organization_name/varsets
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        global: bool,
    ) -> Result<ApiResponse> {
        let payload = resource_payload(
            VARSETS,
            json!({
                "name": name,
                "description": description,
                "global": global,
            }),
        );
        self.ctx
            .requestor()
            .post(&self.collection_path()?, Some(&payload))
            .await
    }

    /// DELETE /varsets/:varset_id
    pub async fn delete(&self, varset_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .delete(&api_path(&[VARSETS, varset_id]), None)
            .await
    }
}
