//! Project module

mod api;
mod models;

pub use models::{Project, ProjectAttributes};

use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

/// Projects of the scoped organization
#[derive(Debug, Clone)]
pub struct Projects {
    ctx: ResourceContext,
}

impl Resource for Projects {
    const KEY: &'static str = "projects";
    const SCOPE: RequiredScope = RequiredScope::Organization;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}
