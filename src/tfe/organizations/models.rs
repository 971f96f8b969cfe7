//! Organization data models

use serde::Deserialize;

use crate::tfe::traits::TfeResource;

/// Organization data from the API
#[derive(Deserialize, Debug, Clone)]
pub struct Organization {
    pub id: String,
    #[serde(rename = "type")]
    pub org_type: Option<String>,
    pub attributes: Option<OrganizationAttributes>,
}

/// Organization attributes
#[derive(Deserialize, Debug, Clone)]
pub struct OrganizationAttributes {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "external-id")]
    pub external_id: Option<String>,
    #[serde(rename = "created-at")]
    pub created_at: Option<String>,
    #[serde(rename = "saml-enabled")]
    pub saml_enabled: Option<bool>,
}

impl TfeResource for Organization {
    fn id(&self) -> &str {
        &self.id
    }

    /// Falls back to the id, which is the organization name in this API
    fn name(&self) -> &str {
        self.attributes
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .unwrap_or(&self.id)
    }
}

impl Organization {
    pub fn email(&self) -> Option<&str> {
        self.attributes.as_ref().and_then(|a| a.email.as_deref())
    }
}
