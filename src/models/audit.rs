use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The sensitive operations worth an audit trail entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessAction {
    View,
    Edit,
    Delete,
    Export,
}

impl std::fmt::Display for AccessAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessAction::View => write!(f, "view"),
            AccessAction::Edit => write!(f, "edit"),
            AccessAction::Delete => write!(f, "delete"),
            AccessAction::Export => write!(f, "export"),
        }
    }
}

/// One entry in the data-access log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogEntry {
    pub user_id: String,
    pub action: AccessAction,
    /// Identifiers of the records touched by the operation.
    pub member_ids: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl AccessLogEntry {
    pub fn new(
        user_id: impl Into<String>,
        action: AccessAction,
        member_ids: Vec<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            action,
            member_ids,
            timestamp: Utc::now(),
            ip_address: None,
        }
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_names_are_lowercase() {
        assert_eq!(serde_json::to_string(&AccessAction::Export).unwrap(), "\"export\"");
        assert_eq!(
            serde_json::from_str::<AccessAction>("\"delete\"").unwrap(),
            AccessAction::Delete
        );
    }

    #[test]
    fn test_entry_json_shape() {
        let entry = AccessLogEntry::new("admin", AccessAction::View, vec!["m1".into()])
            .with_ip_address("10.0.0.7");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"userId\":\"admin\""));
        assert!(json.contains("\"memberIds\":[\"m1\"]"));
        assert!(json.contains("\"ipAddress\":\"10.0.0.7\""));

        let back: AccessLogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
