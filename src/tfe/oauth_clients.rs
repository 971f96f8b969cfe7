//! OAuth clients (VCS provider connections)

use crate::config::api;
use crate::error::Result;
use crate::tfe::helpers::api_path;
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

const OAUTH_CLIENTS: &str = "oauth-clients";

#[derive(Debug, Clone)]
pub struct OAuthClients {
    ctx: ResourceContext,
}

impl Resource for OAuthClients {
    const KEY: &'static str = "oauth_clients";
    const SCOPE: RequiredScope = RequiredScope::Organization;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl OAuthClients {
    fn collection_path(&self) -> Result<String> {
        let org = self.ctx.require_org()?;
        Ok(api_path(&[api::ORGANIZATIONS, org, OAUTH_CLIENTS]))
    }

    /// GET /organizations/:organization_name/oauth-clients
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

    /// GET /oauth-clients/:id
    pub async fn show(&self, oauth_client_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&[OAUTH_CLIENTS, oauth_client_id]), &Query::default())
            .await
    }
}
