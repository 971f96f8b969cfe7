//! Team API tokens

use crate::config::api;
use crate::error::Result;
use crate::tfe::helpers::api_path;
use crate::tfe::query::Query;
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

const TOKEN_SEGMENT: &str = "authentication-token";

#[derive(Debug, Clone)]
pub struct TeamTokens {
    ctx: ResourceContext,
}

impl Resource for TeamTokens {
    const KEY: &'static str = "team_tokens";
    const SCOPE: RequiredScope = RequiredScope::None;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl TeamTokens {
    /// POST /teams/:team_id/authentication-token
    ///
    /// Replaces any existing token of the team.
    pub async fn create(&self, team_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .post(&api_path(&[api::TEAMS, team_id, TOKEN_SEGMENT]), None)
            .await
    }

    /// GET /teams/:team_id/authentication-token
    pub async fn show(&self, team_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&[api::TEAMS, team_id, TOKEN_SEGMENT]), &Query::default())
            .await
    }

    /// DELETE /teams/:team_id/authentication-token
    pub async fn delete(&self, team_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .delete(&api_path(&[api::TEAMS, team_id, TOKEN_SEGMENT]), None)
            .await
    }
}
