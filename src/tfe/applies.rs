//! Applies

use crate::error::Result;
use crate::tfe::helpers::api_path;
use crate::tfe::query::Query;
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

#[derive(Debug, Clone)]
pub struct Applies {
    ctx: ResourceContext,
}

impl Resource for Applies {
    const KEY: &'static str = "applies";
    const SCOPE: RequiredScope = RequiredScope::None;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl Applies {
    /// GET /applies/:apply_id
    pub async fn show(&self, apply_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&["applies", apply_id]), &Query::default())
            .await
    }
}
