//! Workspace API operations

use serde_json::{json, Map, Value};

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::tfe::helpers::{api_path, merge_attributes, resource_payload};
use crate::tfe::query::{Page, Query, Search};
use crate::tfe::response::ApiResponse;
use crate::tfe::scope::resolve_workspace_id;

use super::models::Workspace;
use super::Workspaces;

impl Workspaces {
    /// `/organizations/{org}/workspaces`
    fn collection_path(&self) -> Result<String> {
        let org = self.ctx.require_org()?;
        Ok(api_path(&[api::ORGANIZATIONS, org, api::WORKSPACES]))
    }

    /// `/organizations/{org}/workspaces/{name}`, name defaulting to the scoped one
    fn named_path(&self, name: Option<&str>) -> Result<String> {
        let org = self.ctx.require_org()?;
        let name = self.ctx.workspace_name(name)?;
        Ok(api_path(&[api::ORGANIZATIONS, org, api::WORKSPACES, name]))
    }

    /// GET /organizations/:organization_name/workspaces
    pub async fn list(
        &self,
        page: Option<Page>,
        search: Option<Search>,
        include: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut query = Query::new().paged(page);
        query.search = search;
        query.include = include.map(str::to_string);
        self.ctx
            .requestor()
            .get(&self.collection_path()?, &query)
            .await
    }

    /// Every workspace of the organization, all pages aggregated
    pub async fn list_all(
        &self,
        search: Option<Search>,
        include: Option<&str>,
    ) -> Result<ApiResponse> {
        let query = Query {
            search,
            include: include.map(str::to_string),
            ..Query::default()
        };
        self.ctx
            .requestor()
            .list_all(&self.collection_path()?, &query)
            .await
    }

    /// GET /organizations/:organization_name/workspaces/:name
    pub async fn show(&self, name: Option<&str>) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&self.named_path(name)?, &Query::default())
            .await
    }

    /// GET /workspaces/:workspace_id
    pub async fn show_by_id(&self, id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&[api::WORKSPACES, id]), &Query::default())
            .await
    }

    /// Typed workspace by name; fails on any error status
    pub async fn get_workspace(&self, name: Option<&str>) -> Result<Workspace> {
        self.show(name).await?.error_for_status()?.data_as()
    }

    /// POST /organizations/:organization_name/workspaces
    ///
    /// `attributes` are added next to `name`; underscores in keys become dashes.
    pub async fn create(&self, name: &str, attributes: &Map<String, Value>) -> Result<ApiResponse> {
        let mut base = Map::new();
        base.insert("name".to_string(), json!(name));
        let payload = resource_payload(api::WORKSPACES, merge_attributes(base, attributes));

        self.ctx
            .log()
            .info(format_args!("Creating workspace '{}'", name));
        self.ctx
            .requestor()
            .post(&self.collection_path()?, Some(&payload))
            .await
    }

    /// PATCH /organizations/:organization_name/workspaces/:name
    pub async fn update(
        &self,
        name: Option<&str>,
        attributes: &Map<String, Value>,
    ) -> Result<ApiResponse> {
        let payload = resource_payload(api::WORKSPACES, merge_attributes(Map::new(), attributes));
        self.ctx
            .requestor()
            .patch(&self.named_path(name)?, &payload)
            .await
    }

    /// DELETE /organizations/:organization_name/workspaces/:name
    pub async fn delete(&self, name: Option<&str>) -> Result<ApiResponse> {
        let path = self.named_path(name)?;
        self.ctx
            .log()
            .info(format_args!("Deleting workspace at {}", path));
        self.ctx.requestor().delete(&path, None).await
    }

    /// POST /workspaces/:workspace_id/actions/lock
    pub async fn lock(&self, id: Option<&str>, reason: &str) -> Result<ApiResponse> {
        let payload = json!({ "reason": reason });
        self.action(id, "lock", Some(&payload)).await
    }

    /// POST /workspaces/:workspace_id/actions/unlock
    pub async fn unlock(&self, id: Option<&str>) -> Result<ApiResponse> {
        self.action(id, "unlock", None).await
    }

    /// POST /workspaces/:workspace_id/actions/force-unlock
    pub async fn force_unlock(&self, id: Option<&str>) -> Result<ApiResponse> {
        self.action(id, "force-unlock", None).await
    }

    async fn action(&self, id: Option<&str>, action: &str, payload: Option<&Value>) -> Result<ApiResponse> {
        let id = self.ctx.workspace_id(id)?;
        let path = api_path(&[api::WORKSPACES, id, "actions", action]);
        self.ctx.requestor().post(&path, payload).await
    }

    /// Workspace id for a name (one lookup request per call)
    pub async fn get_ws_id(&self, name: Option<&str>) -> Result<String> {
        let name = self.ctx.workspace_name(name)?;
        let org = self.ctx.require_org()?;
        resolve_workspace_id(self.ctx.requestor(), Some(org), name).await
    }

    /// Workspace name for an id
    pub async fn get_ws_name(&self, id: Option<&str>) -> Result<String> {
        let id = self.ctx.workspace_id(id)?;
        let response = self.show_by_id(id).await?.error_for_status()?;
        response
            .data()
            .and_then(|doc| doc.pointer("/data/attributes/name"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| TfeError::Json(format!("workspace '{}' has no name attribute", id)))
    }
}
