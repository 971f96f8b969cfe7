//! Terraform API client
//!
//! A [`Client`] owns one [`Requestor`] and a [`Scope`]; resource clients are
//! built from static descriptor tables whenever the scope changes.

pub mod agent_pools;
pub mod applies;
mod client;
pub mod configuration_versions;
pub mod credentials;
pub(crate) mod helpers;
pub mod models;
pub mod oauth_clients;
pub mod organizations;
pub mod pagination;
pub mod plans;
pub mod policy_checks;
pub mod projects;
pub mod query;
pub mod registry;
pub mod requestor;
pub mod response;
pub mod runs;
pub mod scope;
pub mod state_version_outputs;
pub mod state_versions;
pub mod team_tokens;
pub mod teams;
pub mod traits;
pub mod variable_sets;
pub mod workspace_resources;
pub mod workspace_variables;
pub mod workspaces;

pub use agent_pools::AgentPools;
pub use applies::Applies;
pub use client::{Client, ClientBuilder};
pub use configuration_versions::ConfigurationVersions;
pub use models::JsonApiResource;
pub use oauth_clients::OAuthClients;
pub use organizations::{Organization, OrganizationAttributes, Organizations};
pub use pagination::PageInfo;
pub use plans::Plans;
pub use policy_checks::PolicyChecks;
pub use projects::{Project, ProjectAttributes, Projects};
pub use query::{Page, Query, Search};
pub use registry::{all_descriptors, Registered, Registry, ResourceClient, ResourceDescriptor};
pub use requestor::Requestor;
pub use response::ApiResponse;
pub use runs::{RunAction, Runs};
pub use scope::{RequiredScope, Scope, ScopeState};
pub use state_version_outputs::StateVersionOutputs;
pub use state_versions::StateVersions;
pub use team_tokens::TeamTokens;
pub use teams::Teams;
pub use traits::{Resource, ResourceContext, TfeResource};
pub use variable_sets::VariableSets;
pub use workspace_resources::WorkspaceResources;
pub use workspace_variables::{Category, NewVariable, WorkspaceVariables};
pub use workspaces::{Workspace, WorkspaceAttributes, Workspaces};
