//! Special-event registries: newly-weds, marriage preparation, baby
//! dedications. Each collection is independent; there are no foreign-key
//! constraints against the member list and no cascade on delete.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CounsellingStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl std::fmt::Display for CounsellingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounsellingStatus::NotStarted => write!(f, "Not Started"),
            CounsellingStatus::InProgress => write!(f, "In Progress"),
            CounsellingStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewlyWed {
    pub id: String,
    pub couple_names: String,
    pub date_of_wedding: NaiveDate,
    pub counselling_status: CounsellingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_mentor: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub const DEFAULT_TOTAL_SESSIONS: u32 = 8;

fn default_total_sessions() -> u32 {
    DEFAULT_TOTAL_SESSIONS
}

/// A couple working through pre-marriage counselling sessions.
///
/// `sessions_attended <= total_sessions` is enforced at the input-validation
/// boundary, not here; the store persists whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarriagePreparation {
    pub id: String,
    pub couple_names: String,
    pub intended_wedding_date: NaiveDate,
    pub sessions_attended: u32,
    #[serde(default = "default_total_sessions")]
    pub total_sessions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MarriagePreparation {
    /// Fraction of sessions completed, clamped to the 0..=1 range used by
    /// progress displays.
    pub fn progress(&self) -> f64 {
        if self.total_sessions == 0 {
            return 0.0;
        }
        (f64::from(self.sessions_attended) / f64::from(self.total_sessions)).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BabyDedication {
    pub id: String,
    pub child_name: String,
    pub date_of_birth: NaiveDate,
    pub parent_names: String,
    /// Member ids of the parents, when they are registered members. May be
    /// empty and is not checked against the member collection.
    #[serde(default)]
    pub parent_member_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_dedicated: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub officiating_minister: Option<String>,
    pub created_at: DateTime<Utc>,
}
