//! Project API operations

use serde_json::{json, Map, Value};

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::tfe::helpers::{api_path, merge_attributes, resource_payload};
use crate::tfe::query::{Page, Query};
use crate::tfe::response::ApiResponse;
use crate::tfe::traits::TfeResource;

use super::models::Project;
use super::Projects;

impl Projects {
    fn collection_path(&self) -> Result<String> {
        let org = self.ctx.require_org()?;
        Ok(api_path(&[api::ORGANIZATIONS, org, api::PROJECTS]))
    }

    /// GET /organizations/:organization_name/projects
    pub async fn list(
        &self,
        page: Option<Page>,
        query: Option<&str>,
        include: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut params = Query::new().paged(page);
        params.query = query.map(str::to_string);
        params.include = include.map(str::to_string);
        self.ctx
            .requestor()
            .get(&self.collection_path()?, &params)
            .await
    }

    /// Every project of the organization, all pages aggregated
    pub async fn list_all(&self, query: Option<&str>, include: Option<&str>) -> Result<ApiResponse> {
        let params = Query {
            query: query.map(str::to_string),
            include: include.map(str::to_string),
            ..Query::default()
        };
        self.ctx
            .requestor()
            .list_all(&self.collection_path()?, &params)
            .await
    }

    /// GET /projects/:project_id
    pub async fn show(&self, project_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .get(&api_path(&[api::PROJECTS, project_id]), &Query::default())
            .await
    }

    /// POST /organizations/:organization_name/projects
    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<ApiResponse> {
        let mut attributes = json!({ "name": name });
        if let Some(description) = description {
            attributes["description"] = json!(description);
        }
        let payload = resource_payload(api::PROJECTS, attributes);
        self.ctx
            .requestor()
            .post(&self.collection_path()?, Some(&payload))
            .await
    }

    /// PATCH /projects/:project_id
    pub async fn update(&self, project_id: &str, attributes: &Map<String, Value>) -> Result<ApiResponse> {
        let payload = resource_payload(api::PROJECTS, merge_attributes(Map::new(), attributes));
        self.ctx
            .requestor()
            .patch(&api_path(&[api::PROJECTS, project_id]), &payload)
            .await
    }

    /// DELETE /projects/:project_id
    pub async fn delete(&self, project_id: &str) -> Result<ApiResponse> {
        self.ctx
            .requestor()
            .delete(&api_path(&[api::PROJECTS, project_id]), None)
            .await
    }

    /// Id of the project with exactly this name, `None` if there is none
    ///
    /// `q=` is a substring search, so results are narrowed to exact matches.
    /// More than one exact match is reported as an error.
    pub async fn get_project_id(&self, name: &str) -> Result<Option<String>> {
        let response = self.list_all(Some(name), None).await?;
        let projects: Vec<Project> = response.data_as()?;

        let mut matches = projects.iter().filter(|p| p.name() == name);
        match (matches.next(), matches.next()) {
            (None, _) => {
                self.ctx
                    .log()
                    .debug(format_args!("No project found with name '{}'", name));
                Ok(None)
            }
            (Some(project), None) => Ok(Some(project.id.clone())),
            (Some(_), Some(_)) => Err(TfeError::Config(format!(
                "multiple projects named '{}' in organization",
                name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfe::scope::Scope;
    use crate::tfe::traits::{Resource, ResourceContext};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> Projects {
        Projects::new(ResourceContext::test_context(uri, Scope::with_organization("acme")))
    }

    fn project(id: &str, name: &str) -> Value {
        json!({"id": id, "type": "projects", "attributes": {"name": name}})
    }

    #[tokio::test]
    async fn test_get_project_id_exact_match() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations/acme/projects"))
            .and(query_param("q", "core"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [project("prj-1", "core-legacy"), project("prj-2", "core")]
            })))
            .mount(&mock_server)
            .await;

        let id = client(&mock_server.uri()).get_project_id("core").await.unwrap();
        assert_eq!(id.as_deref(), Some("prj-2"));
    }

    #[tokio::test]
    async fn test_get_project_id_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations/acme/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&mock_server)
            .await;

        let id = client(&mock_server.uri()).get_project_id("nope").await.unwrap();
        assert!(id.is_none());
    }

    #[tokio::test]
    async fn test_create_with_description() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/organizations/acme/projects"))
            .and(body_json(json!({
                "data": {"type": "projects", "attributes": {"name": "core", "description": "shared infra"}}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": project("prj-9", "core")})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let response = client(&mock_server.uri())
            .create("core", Some("shared infra"))
            .await
            .unwrap();
        assert_eq!(response.resource_id().unwrap(), "prj-9");
    }

    #[tokio::test]
    async fn test_requires_organization() {
        let projects = Projects::new(ResourceContext::test_context("http://127.0.0.1:9", Scope::unscoped()));
        assert!(matches!(
            projects.list(None, None, None).await,
            Err(TfeError::MissingOrganization)
        ));
    }
}
