//! Workspace variables module

mod api;
mod models;

pub use models::{Category, NewVariable};

use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

/// Variables of the scoped workspace (or an explicitly given one)
#[derive(Debug, Clone)]
pub struct WorkspaceVariables {
    ctx: ResourceContext,
}

impl Resource for WorkspaceVariables {
    const KEY: &'static str = "workspace_variables";
    const SCOPE: RequiredScope = RequiredScope::OrganizationAndWorkspace;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}
