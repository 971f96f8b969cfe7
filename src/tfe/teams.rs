//! Teams of the scoped organization

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::tfe::helpers::{api_path, validate_include};
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

/// The only filter the teams endpoint understands
const NAMES_FILTER: &str = "[names]=";

const INCLUDES: &[&str] = &["users", "organization-memberships"];

#[derive(Debug, Clone)]
pub struct Teams {
    ctx: ResourceContext,
}

impl Resource for Teams {
    const KEY: &'static str = "teams";
    const SCOPE: RequiredScope = RequiredScope::Organization;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}

impl Teams {
    /// Validate filters and include, then build the list query
    fn list_query(&self, filters: Option<&[&str]>, include: Option<&str>) -> Result<Query> {
        let mut query = Query::new();
        if let Some(filters) = filters {
            if let Some(bad) = filters.iter().find(|f| !f.starts_with(NAMES_FILTER)) {
                self.ctx.log().error(format_args!(
                    "'{}<team name>' is the only valid teams filter",
                    NAMES_FILTER
                ));
                return Err(TfeError::invalid_param("filters", bad, &["[names]=<team name>"]));
            }
            query.filters = Some(filters.iter().map(|f| f.to_string()).collect());
        }
        validate_include(include, INCLUDES)?;
        query.include = include.map(str::to_string);
        Ok(query)
    }

    fn collection_path(&self) -> Result<String> {
        let org = self.ctx.require_org()?;
        Ok(api_path(&[api::ORGANIZATIONS, org, api::TEAMS]))
    }

    /// GET /organizations/:organization_name/teams
    ///
    /// ```text
    /// teams.list(None, Some(&["[names]=owners"]), None)
    /// ```
    pub async fn list(
        &self,
        page: Option<Page>,
        filters: Option<&[&str]>,
        include: Option<&str>,
    ) -> Result<ApiResponse> {
        let query = self.list_query(filters, include)?.paged(page);
        self.ctx
            .requestor()
            .get(&self.collection_path()?, &query)
            .await
    }

    /// Every matching team, all pages aggregated
    pub async fn list_all(&self, filters: Option<&[&str]>, include: Option<&str>) -> Result<ApiResponse> {
        let query = self.list_query(filters, include)?;
        self.ctx
            .requestor()
            .list_all(&self.collection_path()?, &query)
            .await
    }

    /// GET /teams/:team_id
    pub async fn show(&self, team_id: &str, include: Option<&str>) -> Result<ApiResponse> {
        validate_include(include, INCLUDES)?;
        let mut query = Query::new();
        query.include = include.map(str::to_string);
        self.ctx
            .requestor()
            .get(&api_path(&[api::TEAMS, team_id]), &query)
            .await
    }

    /// DELETE /teams/:team_id
    pub async fn delete(&self, team_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .delete(&api_path(&[api::TEAMS, team_id]), None)
            .await
    }
}
