//! Workspace module

mod api;
mod models;

pub use models::{Workspace, WorkspaceAttributes};

use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

/// Workspaces of the scoped organization
///
/// Methods taking `Option<&str>` for a workspace fall back to the workspace
/// the client was scoped to when it was built.
#[derive(Debug, Clone)]
pub struct Workspaces {
    ctx: ResourceContext,
}

impl Resource for Workspaces {
    const KEY: &'static str = "workspaces";
    const SCOPE: RequiredScope = RequiredScope::Organization;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}
