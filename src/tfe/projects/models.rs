//! Project data models

use serde::Deserialize;

use crate::tfe::traits::TfeResource;

/// Project data from the API
#[derive(Deserialize, Debug, Clone)]
pub struct Project {
    pub id: String,
    pub attributes: ProjectAttributes,
}

/// Project attributes
#[derive(Deserialize, Debug, Clone)]
pub struct ProjectAttributes {
    pub name: String,
    pub description: Option<String>,
}

impl TfeResource for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}
