//! Workspace variable API operations

use serde_json::{Map, Value};

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::tfe::helpers::{api_path, merge_attributes, resource_payload};
use crate::tfe::query::Query;
use crate::tfe::response::ApiResponse;

use super::models::NewVariable;
use super::WorkspaceVariables;

const VARS: &str = "vars";

impl WorkspaceVariables {
    fn vars_path(&self, workspace_id: Option<&str>) -> Result<String> {
        let id = self.ctx.workspace_id(workspace_id)?;
        Ok(api_path(&[api::WORKSPACES, id, VARS]))
    }

    fn var_path(&self, workspace_id: Option<&str>, var_id: &str) -> Result<String> {
        let id = self.ctx.workspace_id(workspace_id)?;
        Ok(api_path(&[api::WORKSPACES, id, VARS, var_id]))
    }

    /// GET /workspaces/:workspace_id/vars
    pub async fn list(&self, workspace_id: Option<&str>) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&self.vars_path(workspace_id)?, &Query::default())
            .await
    }

    /// POST /workspaces/:workspace_id/vars
    pub async fn create(&self, workspace_id: Option<&str>, variable: &NewVariable) -> Result<ApiResponse> {
        let path = self.vars_path(workspace_id)?;
        let payload = resource_payload(VARS, serde_json::to_value(variable)?);
        self.ctx.log().debug(format_args!(
            "Creating {} variable '{}'",
            variable.category, variable.key
        ));
        self.ctx.requestor().post(&path, Some(&payload)).await
    }

    /// PATCH /workspaces/:workspace_id/vars/:variable_id
    pub async fn update(
        &self,
        workspace_id: Option<&str>,
        var_id: &str,
        attributes: &Map<String, Value>,
    ) -> Result<ApiResponse> {
        let path = self.var_path(workspace_id, var_id)?;
        let mut payload = resource_payload(VARS, merge_attributes(Map::new(), attributes));
        payload["data"]["id"] = Value::String(var_id.to_string());
        self.ctx.requestor().patch(&path, &payload).await
    }

    /// DELETE /workspaces/:workspace_id/vars/:variable_id
    pub async fn delete(&self, workspace_id: Option<&str>, var_id: &str) -> Result<ApiResponse> {
        let path = self.var_path(workspace_id, var_id)?;
        self.ctx.requestor().delete(&path, None).await
    }

    /// Id of the variable with this key, `None` if the workspace has none
    pub async fn get_var_id(&self, workspace_id: Option<&str>, key: &str) -> Result<Option<String>> {
        let response = self.list(workspace_id).await?.error_for_status()?;
        let found = response
            .items()
            .iter()
            .find(|item| item.pointer("/attributes/key").and_then(Value::as_str) == Some(key));

        match found {
            Some(item) => item
                .get("id")
                .and_then(Value::as_str)
                .map(|id| Some(id.to_string()))
                .ok_or_else(|| TfeError::Json(format!("variable '{}' has no id", key))),
            None => Ok(None),
        }
    }
}
