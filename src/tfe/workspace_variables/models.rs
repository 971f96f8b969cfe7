//! Workspace variable models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TfeError;

/// Where a variable is exposed during a run
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Terraform input variable
    #[default]
    Terraform,
    /// Shell environment variable
    Env,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Terraform => write!(f, "terraform"),
            Category::Env => write!(f, "env"),
        }
    }
}

impl FromStr for Category {
    type Err = TfeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terraform" => Ok(Category::Terraform),
            "env" => Ok(Category::Env),
            other => Err(TfeError::invalid_param("category", other, &["terraform", "env"])),
        }
    }
}

/// Attributes of a variable to create
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewVariable {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub category: Category,
    pub hcl: bool,
    pub sensitive: bool,
}

impl NewVariable {
    /// Plain, non-sensitive Terraform variable
    pub fn terraform(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
            category: Category::Terraform,
            hcl: false,
            sensitive: false,
        }
    }

    /// Plain, non-sensitive environment variable
    pub fn env(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: Category::Env,
            ..Self::terraform(key, value)
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn hcl(mut self) -> Self {
        self.hcl = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
