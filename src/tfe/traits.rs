//! Common traits for resource clients and the models they return

use std::sync::Arc;

use crate::error::{Result, TfeError};
use crate::logging::LogHandle;

use super::requestor::Requestor;
use super::scope::{RequiredScope, Scope};

/// Common trait for named API resources (organizations, projects, workspaces)
pub trait TfeResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Check if the resource matches by name or ID
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.name() == input
    }
}

/// A resource client that the registry can construct
///
/// `KEY` is the name the client is registered and looked up under; `SCOPE`
/// is what the current scope must satisfy before the client is built.
pub trait Resource: Sized {
    const KEY: &'static str;
    const SCOPE: RequiredScope;

    fn new(ctx: ResourceContext) -> Self;

    fn context(&self) -> &ResourceContext;
}

/// Everything a resource client is constructed with
///
/// The scope is a snapshot taken when the registry built the client. A
/// client never changes it; the registry replaces the client instead.
#[derive(Debug, Clone)]
pub struct ResourceContext {
    requestor: Arc<Requestor>,
    scope: Scope,
    log: LogHandle,
}

impl ResourceContext {
    pub fn new(requestor: Arc<Requestor>, scope: Scope, log: LogHandle) -> Self {
        Self {
            requestor,
            scope,
            log,
        }
    }

    pub fn requestor(&self) -> &Requestor {
        &self.requestor
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn log(&self) -> LogHandle {
        self.log
    }

    /// Organization from scope, or `MissingOrganization`
    pub fn require_org(&self) -> Result<&str> {
        self.scope.require_organization().inspect_err(|_| {
            self.log
                .error(format_args!("Operation requires an organization"));
        })
    }

    /// Explicit workspace id, else the scoped one, else `MissingWorkspace`
    pub fn workspace_id<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit
            .or_else(|| self.scope.workspace_id())
            .ok_or_else(|| self.missing_workspace())
    }

    /// Explicit workspace name, else the scoped one, else `MissingWorkspace`
    pub fn workspace_name<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        explicit
            .or_else(|| self.scope.workspace_name())
            .ok_or_else(|| self.missing_workspace())
    }

    fn missing_workspace(&self) -> TfeError {
        self.log
            .error(format_args!("Operation requires a workspace"));
        TfeError::MissingWorkspace
    }
}

#[cfg(test)]
impl ResourceContext {
    /// Context pointed at a mock server with the given scope
    pub fn test_context(base_uri: &str, scope: Scope) -> Self {
        Self::new(
            Arc::new(Requestor::test_requestor(base_uri)),
            scope,
            LogHandle::default(),
        )
    }
}
