//! Workspace data models

use serde::Deserialize;

use crate::tfe::traits::TfeResource;

/// The part of a workspace document the client reads back
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub id: String,
    pub attributes: WorkspaceAttributes,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceAttributes {
    pub name: String,
    /// Absent on documents from older API versions
    #[serde(default)]
    pub locked: bool,
}

impl TfeResource for Workspace {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

impl Workspace {
    pub fn is_locked(&self) -> bool {
        self.attributes.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_ignores_unread_fields() {
        let raw = serde_json::json!({
            "id": "ws-123",
            "type": "workspaces",
            "attributes": {"name": "demo", "locked": true, "execution-mode": "agent"},
            "relationships": {"project": {"data": {"id": "prj-1", "type": "projects"}}}
        });

        let ws: Workspace = serde_json::from_value(raw).unwrap();
        assert!(ws.matches("demo"));
        assert!(ws.matches("ws-123"));
        assert!(!ws.matches("prj-1"));
        assert!(ws.is_locked());
    }

    #[test]
    fn test_lock_flag_defaults_to_unlocked() {
        let raw = serde_json::json!({"id": "ws-1", "attributes": {"name": "bare"}});
        let ws: Workspace = serde_json::from_value(raw).unwrap();
        assert!(!ws.is_locked());
    }
}
