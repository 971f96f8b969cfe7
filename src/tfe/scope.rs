//! Organization / workspace scope shared by resource clients
//!
//! A workspace can only be scoped under an organization, and a workspace id is
//! only ever stored next to the name it was resolved from. Fields are private
//! so these rules hold for every `Scope` value.

use crate::config::api;
use crate::error::{Result, TfeError};

use super::query::Query;
use super::requestor::Requestor;

/// Which scope a resource client needs before it can be constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequiredScope {
    None,
    Organization,
    OrganizationAndWorkspace,
}

/// Readiness of a scope: `Unscoped -> OrgSet -> OrgAndWorkspaceSet`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeState {
    Unscoped,
    OrgSet,
    OrgAndWorkspaceSet,
}

/// The (organization, workspace name, workspace id) triple
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    organization: Option<String>,
    workspace_name: Option<String>,
    workspace_id: Option<String>,
}

impl Scope {
    pub fn unscoped() -> Self {
        Self::default()
    }

    pub fn with_organization(org: impl Into<String>) -> Self {
        Self {
            organization: Some(org.into()),
            ..Self::default()
        }
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn workspace_name(&self) -> Option<&str> {
        self.workspace_name.as_deref()
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.workspace_id.as_deref()
    }

    pub fn state(&self) -> ScopeState {
        match (&self.organization, &self.workspace_id) {
            (None, _) => ScopeState::Unscoped,
            (Some(_), None) => ScopeState::OrgSet,
            (Some(_), Some(_)) => ScopeState::OrgAndWorkspaceSet,
        }
    }

    pub fn satisfies(&self, required: RequiredScope) -> bool {
        match required {
            RequiredScope::None => true,
            RequiredScope::Organization => self.state() != ScopeState::Unscoped,
            RequiredScope::OrganizationAndWorkspace => {
                self.state() == ScopeState::OrgAndWorkspaceSet
            }
        }
    }

    /// Organization name, or `MissingOrganization`
    pub fn require_organization(&self) -> Result<&str> {
        self.organization().ok_or(TfeError::MissingOrganization)
    }

    /// Replace the organization, dropping any workspace
    pub(crate) fn set_organization(&mut self, org: impl Into<String>) {
        self.organization = Some(org.into());
        self.workspace_name = None;
        self.workspace_id = None;
    }

    /// Record a resolved workspace; requires an organization
    pub(crate) fn set_workspace(&mut self, name: String, id: String) -> Result<()> {
        self.require_organization()?;
        self.workspace_name = Some(name);
        self.workspace_id = Some(id);
        Ok(())
    }
}

/// Look up a workspace id by name with one
/// `GET /organizations/{org}/workspaces/{name}` call
pub async fn resolve_workspace_id(
    requestor: &Requestor,
    organization: Option<&str>,
    name: &str,
) -> Result<String> {
    let org = organization.ok_or(TfeError::MissingOrganization)?;
    let path = format!(
        "/{}/{}/{}/{}",
        api::ORGANIZATIONS,
        urlencoding::encode(org),
        api::WORKSPACES,
        urlencoding::encode(name)
    );

    let response = requestor
        .get(&path, &Query::default())
        .await?
        .error_for_status()?;
    let id = response.resource_id()?.to_string();

    requestor.log.debug(format_args!(
        "Resolved workspace '{}' in '{}' to {}",
        name, org, id
    ));
    Ok(id)
}
