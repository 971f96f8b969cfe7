//! Organization API operations

use serde_json::{json, Map, Value};

use crate::config::api;
use crate::error::Result;
use crate::tfe::helpers::{api_path, merge_attributes, resource_payload};
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;

use super::models::Organization;
use super::Organizations;

impl Organizations {
    /// GET /organizations
    pub async fn list(&self, page: Option<Page>, include: Option<&str>) -> Result<ApiResponse> {
        let mut query = Query::new().paged(page);
        query.include = include.map(str::to_string);
        self.ctx
            .requestor()
            .get(&api_path(&[api::ORGANIZATIONS]), &query)
            .await
    }

    /// All organizations, all pages aggregated
    pub async fn list_all(&self) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .list_all(&api_path(&[api::ORGANIZATIONS]), &Query::default())
            .await
    }

    /// GET /organizations/:organization_name
    pub async fn show(&self, name: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&[api::ORGANIZATIONS, name]), &Query::default())
            .await
    }

    /// Typed organization; fails on any error status
    pub async fn get_organization(&self, name: &str) -> Result<Organization> {
        self.show(name).await?.error_for_status()?.data_as()
    }

    /// POST /organizations
    pub async fn create(&self, name: &str, email: &str) -> Result<ApiResponse> {
        let payload = resource_payload(
            api::ORGANIZATIONS,
            json!({ "name": name, "email": email }),
        );
        self.ctx
            .log()
            .info(format_args!("Creating organization '{}'", name));
        self.ctx
            .requestor()
            .post(&api_path(&[api::ORGANIZATIONS]), Some(&payload))
            .await
    }

    /// PATCH /organizations/:organization_name
    pub async fn update(&self, name: &str, attributes: &Map<String, Value>) -> Result<ApiResponse> {
        let payload = resource_payload(api::ORGANIZATIONS, merge_attributes(Map::new(), attributes));
        self.ctx
            .requestor()
            .patch(&api_path(&[api::ORGANIZATIONS, name]), &payload)
            .await
    }

    /// DELETE /organizations/:organization_name
    pub async fn delete(&self, name: &str) -> Result<ApiResponse> {
        self.ctx
            .log()
            .warn(format_args!("Deleting organization '{}'", name));
        self.ctx
            .requestor()
            .delete(&api_path(&[api::ORGANIZATIONS, name]), None)
            .await
    }

    /// GET /organizations/:organization_name/entitlement-set
    pub async fn show_entitlements(&self, name: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(
                &api_path(&[api::ORGANIZATIONS, name, "entitlement-set"]),
                &Query::default(),
            )
            .await
    }
}
