//! Organization module

mod api;
mod models;

pub use models::{Organization, OrganizationAttributes};

use crate::tfe::scope::RequiredScope;
use crate::tfe::traits::{Resource, ResourceContext};

/// Organizations visible to the token; needs no scope
#[derive(Debug, Clone)]
pub struct Organizations {
    ctx: ResourceContext,
}

impl Resource for Organizations {
    const KEY: &'static str = "organizations";
    const SCOPE: RequiredScope = RequiredScope::None;

    fn new(ctx: ResourceContext) -> Self {
        Self { ctx }
    }

    fn context(&self) -> &ResourceContext {
        &self.ctx
    }
}
