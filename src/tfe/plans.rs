//! Plans: read-only views of a run's plan phase

use crate::error::Result;
use crate::tfe::helpers::api_path;
use crate::tfe::query::Query;
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

#[derive(Debug, Clone)]
pub struct Plans {
    ctx: ResourceContext,
}

impl Resource for Plans {
    const KEY: &'static str = "plans";
    const SCOPE: RequiredScope = RequiredScope::None;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl Plans {
    /// GET /plans/:plan_id
    pub async fn show(&self, plan_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&["plans", plan_id]), &Query::default())
            .await
    }

    /// GET /plans/:plan_id/json-output
    ///
    /// The body is the Terraform JSON plan, not a JSON:API document.
    pub async fn json_output(&self, plan_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&["plans", plan_id, "json-output"]), &Query::default())
            .await
    }
}
