//! Resource registry
//!
//! Three static tables of descriptors, one per scope requirement. The
//! registry builds a client for every descriptor whose requirement the current
//! scope satisfies, and rebuilds the affected tables when the scope changes.
//! Clients of an unsatisfied table are absent, never half-built.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;
use crate::logging::LogHandle;

use super::agent_pools::AgentPools;
use super::applies::Applies;
use super::configuration_versions::ConfigurationVersions;
use super::oauth_clients::OAuthClients;
use super::organizations::Organizations;
use super::plans::Plans;
use super::policy_checks::PolicyChecks;
use super::projects::Projects;
use super::requestor::Requestor;
use super::runs::Runs;
use super::scope::{resolve_workspace_id, RequiredScope, Scope};
use super::state_version_outputs::StateVersionOutputs;
use super::state_versions::StateVersions;
use super::team_tokens::TeamTokens;
use super::teams::Teams;
use super::traits::{Resource, ResourceContext};
use super::variable_sets::VariableSets;
use super::workspace_resources::WorkspaceResources;
use super::workspace_variables::WorkspaceVariables;
use super::workspaces::Workspaces;

/// Declares the `ResourceClient` enum and the conversions between it and
/// each client type.
macro_rules! resource_clients {
    ($($variant:ident($client:ty)),+ $(,)?) => {
        /// Any constructed resource client
        #[derive(Debug, Clone)]
        pub enum ResourceClient {
            $($variant($client)),+
        }

        impl ResourceClient {
            pub fn key(&self) -> &'static str {
                match self {
                    $(ResourceClient::$variant(_) => <$client as Resource>::KEY),+
                }
            }

            pub fn context(&self) -> &ResourceContext {
                match self {
                    $(ResourceClient::$variant(client) => client.context()),+
                }
            }
        }

        $(
            impl Registered for $client {
                fn into_client(self) -> ResourceClient {
                    ResourceClient::$variant(self)
                }

                fn from_client(client: &ResourceClient) -> Option<&Self> {
                    match client {
                        ResourceClient::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )+
    };
}

/// A resource client that has a `ResourceClient` variant
pub trait Registered: Resource {
    fn into_client(self) -> ResourceClient;

    fn from_client(client: &ResourceClient) -> Option<&Self>;
}

resource_clients! {
    Organizations(Organizations),
    Plans(Plans),
    Applies(Applies),
    PolicyChecks(PolicyChecks),
    StateVersionOutputs(StateVersionOutputs),
    TeamTokens(TeamTokens),
    Workspaces(Workspaces),
    Projects(Projects),
    Teams(Teams),
    OAuthClients(OAuthClients),
    VariableSets(VariableSets),
    AgentPools(AgentPools),
    Runs(Runs),
    WorkspaceVariables(WorkspaceVariables),
    WorkspaceResources(WorkspaceResources),
    StateVersions(StateVersions),
    ConfigurationVersions(ConfigurationVersions),
}

/// Key, scope requirement and constructor of one resource client
#[derive(Debug, Clone, Copy)]
pub struct ResourceDescriptor {
    pub key: &'static str,
    pub required_scope: RequiredScope,
    pub constructor: fn(ResourceContext) -> ResourceClient,
}

fn construct<R: Registered>(ctx: ResourceContext) -> ResourceClient {
    R::new(ctx).into_client()
}

const fn descriptor<R: Registered>() -> ResourceDescriptor {
    ResourceDescriptor {
        key: R::KEY,
        required_scope: R::SCOPE,
        constructor: construct::<R>,
    }
}

/// Clients that need no scope
pub static UNSCOPED_RESOURCES: [ResourceDescriptor; 6] = [
    descriptor::<Organizations>(),
    descriptor::<Plans>(),
    descriptor::<Applies>(),
    descriptor::<PolicyChecks>(),
    descriptor::<StateVersionOutputs>(),
    descriptor::<TeamTokens>(),
];

/// Clients that need an organization
pub static ORG_RESOURCES: [ResourceDescriptor; 6] = [
    descriptor::<Workspaces>(),
    descriptor::<Projects>(),
    descriptor::<Teams>(),
    descriptor::<OAuthClients>(),
    descriptor::<VariableSets>(),
    descriptor::<AgentPools>(),
];

/// Clients that need an organization and a resolved workspace
pub static WORKSPACE_RESOURCES: [ResourceDescriptor; 5] = [
    descriptor::<Runs>(),
    descriptor::<WorkspaceVariables>(),
    descriptor::<WorkspaceResources>(),
    descriptor::<StateVersions>(),
    descriptor::<ConfigurationVersions>(),
];

/// Every descriptor, tables in scope order
pub fn all_descriptors() -> impl Iterator<Item = &'static ResourceDescriptor> {
    UNSCOPED_RESOURCES
        .iter()
        .chain(ORG_RESOURCES.iter())
        .chain(WORKSPACE_RESOURCES.iter())
}

/// Owns the scope and the clients built for it
#[derive(Debug)]
pub struct Registry {
    requestor: Arc<Requestor>,
    scope: Scope,
    log: LogHandle,
    clients: BTreeMap<&'static str, ResourceClient>,
}

impl Registry {
    pub fn new(requestor: Arc<Requestor>, log: LogHandle) -> Self {
        Self {
            requestor,
            scope: Scope::unscoped(),
            log,
            clients: BTreeMap::new(),
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn requestor(&self) -> &Requestor {
        &self.requestor
    }

    /// Build every client whose table the current scope satisfies
    pub fn initialize(&mut self) {
        for table in [&UNSCOPED_RESOURCES[..], &ORG_RESOURCES[..], &WORKSPACE_RESOURCES[..]] {
            self.build_table(table);
        }
    }

    /// Switch organization: the workspace is dropped, organization clients are
    /// rebuilt and workspace clients removed
    pub fn reinitialize_for_org(&mut self, org: &str) {
        self.log
            .info(format_args!("Setting organization to '{}'", org));
        self.scope.set_organization(org);
        self.build_table(&ORG_RESOURCES);
        self.build_table(&WORKSPACE_RESOURCES);
    }

    /// Switch workspace: resolve its id (always one request) and rebuild
    /// the organization and workspace clients against the new scope
    ///
    /// Fails with `MissingOrganization` when no organization is set; the
    /// scope is left untouched on any failure.
    pub async fn reinitialize_for_workspace(&mut self, name: &str) -> Result<()> {
        let id = match resolve_workspace_id(&self.requestor, self.scope.organization(), name).await
        {
            Ok(id) => id,
            Err(err) => {
                self.log.error(format_args!(
                    "Cannot set workspace '{}': {}",
                    name, err
                ));
                return Err(err);
            }
        };

        self.scope.set_workspace(name.to_string(), id)?;
        self.log.info(format_args!(
            "Workspace set to '{}' ({})",
            name,
            self.scope.workspace_id().unwrap_or_default()
        ));
        self.build_table(&ORG_RESOURCES);
        self.build_table(&WORKSPACE_RESOURCES);
        Ok(())
    }

    /// Construct or remove each client of a table according to the scope
    fn build_table(&mut self, table: &[ResourceDescriptor]) {
        for descriptor in table {
            if self.scope.satisfies(descriptor.required_scope) {
                let ctx = ResourceContext::new(
                    Arc::clone(&self.requestor),
                    self.scope.clone(),
                    self.log.child("tfe_client::resources"),
                );
                self.clients
                    .insert(descriptor.key, (descriptor.constructor)(ctx));
            } else if self.clients.remove(descriptor.key).is_some() {
                self.log.debug(format_args!(
                    "Dropped '{}' client: scope no longer satisfied",
                    descriptor.key
                ));
            }
        }
    }

    /// Client registered under `key`, if currently constructed
    pub fn get(&self, key: &str) -> Option<&ResourceClient> {
        self.clients.get(key)
    }

    /// Typed client, if its scope is currently satisfied
    pub fn resource<R: Registered>(&self) -> Option<&R> {
        self.clients.get(R::KEY).and_then(R::from_client)
    }

    /// Keys of the constructed clients, sorted
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.clients.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfeError;
    use std::collections::HashSet;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn registry(uri: &str) -> Registry {
        Registry::new(
            Arc::new(Requestor::test_requestor(uri)),
            LogHandle::default(),
        )
    }

    async fn mount_workspace(server: &MockServer, org: &str, name: &str, id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/organizations/{}/workspaces/{}", org, name)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": {"id": id, "type": "workspaces"}})),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn test_tables_are_consistent() {
        let mut keys = HashSet::new();
        for descriptor in all_descriptors() {
            assert!(keys.insert(descriptor.key), "duplicate key {}", descriptor.key);
        }
        assert_eq!(keys.len(), 17);

        assert!(UNSCOPED_RESOURCES
            .iter()
            .all(|d| d.required_scope == RequiredScope::None));
        assert!(ORG_RESOURCES
            .iter()
            .all(|d| d.required_scope == RequiredScope::Organization));
        assert!(WORKSPACE_RESOURCES
            .iter()
            .all(|d| d.required_scope == RequiredScope::OrganizationAndWorkspace));
    }

    #[test]
    fn test_constructor_builds_matching_client() {
        let scope = Scope::with_organization("acme");
        for descriptor in all_descriptors() {
            let ctx = ResourceContext::test_context("http://localhost", scope.clone());
            let client = (descriptor.constructor)(ctx);
            assert_eq!(client.key(), descriptor.key);
            assert_eq!(client.context().scope(), &scope);
        }
    }

    #[test]
    fn test_initialize_unscoped() {
        let mut registry = registry("http://localhost");
        registry.initialize();

        assert!(registry.resource::<Organizations>().is_some());
        assert!(registry.resource::<TeamTokens>().is_some());
        assert!(registry.resource::<Workspaces>().is_none());
        assert!(registry.resource::<Runs>().is_none());
        assert_eq!(registry.keys().count(), 6);
    }

    #[test]
    fn test_set_org_cascade() {
        let mut registry = registry("http://localhost");
        registry.initialize();
        registry.reinitialize_for_org("acme");

        for descriptor in ORG_RESOURCES.iter() {
            let client = registry.get(descriptor.key).unwrap();
            assert_eq!(client.context().scope().organization(), Some("acme"));
        }
        for descriptor in WORKSPACE_RESOURCES.iter() {
            assert!(registry.get(descriptor.key).is_none());
        }
        // unscoped clients keep the scope they were built with
        let orgs = registry.resource::<Organizations>().unwrap();
        assert!(orgs.context().scope().organization().is_none());
    }

    #[tokio::test]
    async fn test_set_org_drops_workspace_clients() {
        let mock_server = MockServer::start().await;
        mount_workspace(&mock_server, "acme", "demo", "ws-123").await;

        let mut registry = registry(&mock_server.uri());
        registry.reinitialize_for_org("acme");
        registry.reinitialize_for_workspace("demo").await.unwrap();
        assert!(registry.resource::<Runs>().is_some());

        registry.reinitialize_for_org("beta");
        assert!(registry.resource::<Runs>().is_none());
        assert!(registry.scope().workspace_name().is_none());
        assert_eq!(
            registry
                .resource::<Workspaces>()
                .unwrap()
                .context()
                .scope()
                .organization(),
            Some("beta")
        );
    }

    #[tokio::test]
    async fn test_set_workspace_twice_resolves_twice() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/organizations/acme/workspaces/demo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "ws-123", "type": "workspaces"}
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let mut registry = registry(&mock_server.uri());
        registry.reinitialize_for_org("acme");

        registry.reinitialize_for_workspace("demo").await.unwrap();
        let first = registry.scope().clone();
        registry.reinitialize_for_workspace("demo").await.unwrap();

        assert_eq!(registry.scope(), &first);
        assert_eq!(first.workspace_id(), Some("ws-123"));
        let runs = registry.resource::<Runs>().unwrap();
        assert_eq!(runs.context().scope().workspace_id(), Some("ws-123"));
    }

    #[tokio::test]
    async fn test_set_workspace_rebuilds_org_clients() {
        let mock_server = MockServer::start().await;
        mount_workspace(&mock_server, "acme", "demo", "ws-123").await;

        let mut registry = registry(&mock_server.uri());
        registry.reinitialize_for_org("acme");
        let before = registry.resource::<Workspaces>().unwrap();
        assert!(before.context().scope().workspace_name().is_none());

        registry.reinitialize_for_workspace("demo").await.unwrap();

        let workspaces = registry.resource::<Workspaces>().unwrap();
        assert_eq!(workspaces.context().workspace_name(None).unwrap(), "demo");
        assert_eq!(workspaces.context().workspace_id(None).unwrap(), "ws-123");
        for descriptor in ORG_RESOURCES.iter() {
            let client = registry.get(descriptor.key).unwrap();
            assert_eq!(client.context().scope().workspace_id(), Some("ws-123"));
        }
    }

    #[tokio::test]
    async fn test_set_workspace_without_org() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut registry = registry(&mock_server.uri());
        registry.initialize();
        let result = registry.reinitialize_for_workspace("demo").await;

        assert!(matches!(result, Err(TfeError::MissingOrganization)));
        assert_eq!(registry.scope(), &Scope::unscoped());
        assert!(registry.resource::<Runs>().is_none());
    }

    #[tokio::test]
    async fn test_failed_resolution_keeps_previous_workspace() {
        let mock_server = MockServer::start().await;
        mount_workspace(&mock_server, "acme", "demo", "ws-123").await;
        Mock::given(method("GET"))
            .and(path("/organizations/acme/workspaces/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let mut registry = registry(&mock_server.uri());
        registry.reinitialize_for_org("acme");
        registry.reinitialize_for_workspace("demo").await.unwrap();

        let err = registry.reinitialize_for_workspace("ghost").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(registry.scope().workspace_name(), Some("demo"));
        assert_eq!(registry.scope().workspace_id(), Some("ws-123"));
    }
}
