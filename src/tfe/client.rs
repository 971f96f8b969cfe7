//! Client facade: requestor, scope and resource registry behind one entry point

use std::sync::Arc;

use crate::config::api;
use crate::error::Result;
use crate::logging::{default_level, parse_level, LogHandle};

use super::agent_pools::AgentPools;
use super::applies::Applies;
use super::configuration_versions::ConfigurationVersions;
use super::credentials::{
    process_env, resolve_hostname, resolve_organization, resolve_token, EnvLookup,
};
use super::oauth_clients::OAuthClients;
use super::organizations::Organizations;
use super::plans::Plans;
use super::policy_checks::PolicyChecks;
use super::projects::Projects;
use super::registry::{Registered, Registry, ResourceClient};
use super::requestor::Requestor;
use super::runs::Runs;
use super::scope::Scope;
use super::state_version_outputs::StateVersionOutputs;
use super::state_versions::StateVersions;
use super::team_tokens::TeamTokens;
use super::teams::Teams;
use super::variable_sets::VariableSets;
use super::workspace_resources::WorkspaceResources;
use super::workspace_variables::WorkspaceVariables;
use super::workspaces::Workspaces;

/// Explicit client settings; anything left unset falls back to the
/// environment (`TFE_HOSTNAME`, `TFE_TOKEN`, `TFE_ORG`) and then to defaults
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    hostname: Option<String>,
    token: Option<String>,
    org: Option<String>,
    ws: Option<String>,
    log_level: Option<String>,
    verify: bool,
    base_url: Option<String>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            hostname: None,
            token: None,
            org: None,
            ws: None,
            log_level: None,
            verify: true,
            base_url: None,
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn org(mut self, org: impl Into<String>) -> Self {
        self.org = Some(org.into());
        self
    }

    /// Workspace to scope to; requires an organization
    pub fn ws(mut self, ws: impl Into<String>) -> Self {
        self.ws = Some(ws.into());
        self
    }

    /// `error`, `warn`, `info`, `debug`, `trace` or `off`
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// `false` accepts invalid TLS certificates
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Full API base URL, replacing `https://{hostname}/api/v2`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build with the process environment as fallback
    pub async fn build(self) -> Result<Client> {
        self.build_with_env(&process_env).await
    }

    /// Build with a custom environment lookup
    ///
    /// Order: hostname, token, requestor, organization, workspace. Setting a
    /// workspace costs one request to resolve its id.
    pub async fn build_with_env(self, lookup: EnvLookup<'_>) -> Result<Client> {
        let level = match self.log_level.as_deref() {
            Some(name) => parse_level(name)?,
            None => default_level(),
        };
        let log = LogHandle::new(level, "tfe_client");

        let hostname = resolve_hostname(self.hostname.as_deref(), lookup, log)?;
        let token = resolve_token(self.token.as_deref(), lookup, log)?;
        let base_uri = self
            .base_url
            .unwrap_or_else(|| format!("https://{}{}", hostname, api::BASE_PATH));

        let requestor = Requestor::new(
            token,
            base_uri,
            self.verify,
            log.child("tfe_client::requestor"),
        )?;

        let mut registry = Registry::new(Arc::new(requestor), log.child("tfe_client::registry"));
        registry.initialize();

        if let Some(org) = resolve_organization(self.org.as_deref(), lookup, log) {
            registry.reinitialize_for_org(&org);
        }
        if let Some(ws) = self.ws.as_deref() {
            registry.reinitialize_for_workspace(ws).await?;
        }

        log.debug(format_args!(
            "Client ready for {} ({} resource clients)",
            hostname,
            registry.keys().count()
        ));

        Ok(Client {
            hostname,
            registry,
            log,
        })
    }
}

/// Entry point to the API
///
/// Resource clients are available once the scope permits: the unscoped ones
/// always, organization ones after `set_org`, workspace ones after `set_ws`.
#[derive(Debug)]
pub struct Client {
    hostname: String,
    registry: Registry,
    log: LogHandle,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn scope(&self) -> &Scope {
        self.registry.scope()
    }

    pub fn requestor(&self) -> &Requestor {
        self.registry.requestor()
    }

    pub fn log(&self) -> LogHandle {
        self.log
    }

    /// Switch organization; drops the workspace and its clients
    pub fn set_org(&mut self, org: &str) {
        self.registry.reinitialize_for_org(org);
    }

    /// Switch workspace within the current organization
    pub async fn set_ws(&mut self, ws: &str) -> Result<()> {
        self.registry.reinitialize_for_workspace(ws).await
    }

    /// Typed client, `None` while its scope is not satisfied
    pub fn resource<R: Registered>(&self) -> Option<&R> {
        self.registry.resource::<R>()
    }

    /// Client by registry key (e.g. `"workspace_variables"`)
    pub fn get(&self, key: &str) -> Option<&ResourceClient> {
        self.registry.get(key)
    }

    /// Keys of the clients currently available
    pub fn resource_keys(&self) -> Vec<&'static str> {
        self.registry.keys().collect()
    }

    pub fn organizations(&self) -> Option<&Organizations> {
        self.resource()
    }

    pub fn plans(&self) -> Option<&Plans> {
        self.resource()
    }

    pub fn applies(&self) -> Option<&Applies> {
        self.resource()
    }

    pub fn policy_checks(&self) -> Option<&PolicyChecks> {
        self.resource()
    }

    pub fn state_version_outputs(&self) -> Option<&StateVersionOutputs> {
        self.resource()
    }

    pub fn team_tokens(&self) -> Option<&TeamTokens> {
        self.resource()
    }

    pub fn workspaces(&self) -> Option<&Workspaces> {
        self.resource()
    }

    pub fn projects(&self) -> Option<&Projects> {
        self.resource()
    }

    pub fn teams(&self) -> Option<&Teams> {
        self.resource()
    }

    pub fn oauth_clients(&self) -> Option<&OAuthClients> {
        self.resource()
    }

    pub fn variable_sets(&self) -> Option<&VariableSets> {
        self.resource()
    }

    pub fn agent_pools(&self) -> Option<&AgentPools> {
        self.resource()
    }

    pub fn runs(&self) -> Option<&Runs> {
        self.resource()
    }

    pub fn workspace_variables(&self) -> Option<&WorkspaceVariables> {
        self.resource()
    }

    pub fn workspace_resources(&self) -> Option<&WorkspaceResources> {
        self.resource()
    }

    pub fn state_versions(&self) -> Option<&StateVersions> {
        self.resource()
    }

    pub fn configuration_versions(&self) -> Option<&ConfigurationVersions> {
        self.resource()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use crate::tfe::scope::ScopeState;
    use crate::tfe::traits::Resource;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[tokio::test]
    async fn test_build_requires_token() {
        let result = ClientBuilder::new().build_with_env(&no_env).await;
        assert!(matches!(result, Err(TfeError::MissingToken(_))));
    }

    #[tokio::test]
    async fn test_build_rejects_bad_log_level() {
        let result = ClientBuilder::new()
            .token("t")
            .log_level("loud")
            .build_with_env(&no_env)
            .await;
        assert!(matches!(result, Err(TfeError::InvalidQueryParam { .. })));
    }

    #[tokio::test]
    async fn test_base_uri_from_hostname() {
        let client = ClientBuilder::new()
            .token("t")
            .hostname("tfe.example.com/")
            .build_with_env(&no_env)
            .await
            .unwrap();
        assert_eq!(client.hostname(), "tfe.example.com");
        assert_eq!(client.requestor().base_uri(), "https://tfe.example.com/api/v2");
        assert_eq!(client.scope().state(), ScopeState::Unscoped);
        assert!(client.organizations().is_some());
        assert!(client.workspaces().is_none());
    }

    #[tokio::test]
    async fn test_org_from_environment() {
        let env = |name: &str| match name {
            "TFE_TOKEN" => Some("env-token".to_string()),
            "TFE_ORG" => Some("acme".to_string()),
            _ => None,
        };
        let client = ClientBuilder::new().build_with_env(&env).await.unwrap();
        assert_eq!(client.scope().organization(), Some("acme"));
        assert!(client.workspaces().is_some());
        assert!(client.runs().is_none());
    }

    #[tokio::test]
    async fn test_workspace_without_org_fails() {
        let result = ClientBuilder::new()
            .token("t")
            .ws("demo")
            .base_url("http://127.0.0.1:9")
            .build_with_env(&no_env)
            .await;
        assert!(matches!(result, Err(TfeError::MissingOrganization)));
    }

    #[tokio::test]
    async fn test_build_with_workspace_resolves_once() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations/acme/workspaces/demo"))
            .and(header("Authorization", "Bearer t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "ws-123"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ClientBuilder::new()
            .token("t")
            .org("acme")
            .ws("demo")
            .base_url(mock_server.uri())
            .build_with_env(&no_env)
            .await
            .unwrap();

        assert_eq!(client.scope().state(), ScopeState::OrgAndWorkspaceSet);
        assert_eq!(client.resource_keys().len(), 17);
        assert!(client.configuration_versions().is_some());
    }

    #[tokio::test]
    async fn test_set_org_and_set_ws() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations/beta/workspaces/web"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "ws-web"}
            })))
            .mount(&mock_server)
            .await;

        let mut client = ClientBuilder::new()
            .token("t")
            .base_url(mock_server.uri())
            .build_with_env(&no_env)
            .await
            .unwrap();

        assert!(matches!(
            client.set_ws("web").await,
            Err(TfeError::MissingOrganization)
        ));

        client.set_org("beta");
        client.set_ws("web").await.unwrap();
        assert_eq!(client.scope().workspace_id(), Some("ws-web"));
        assert!(client.get("runs").is_some());
        assert_eq!(
            client
                .teams()
                .unwrap()
                .context()
                .scope()
                .organization(),
            Some("beta")
        );
    }
}
