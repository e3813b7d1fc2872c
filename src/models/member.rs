use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::age_group::{calculate_age, AgeGroup};

/// Ministries offered on the registration form's toggle set.
pub const MINISTRY_OPTIONS: &[&str] = &[
    "Ushering",
    "Greeters",
    "Security & Protocol",
    "Compassion Ministry",
    "Counselling",
    "Graphics & Displays",
    "Social Media",
    "Production",
    "Sound Engineering",
    "Worship Team",
    "Children Ministry",
    "Youth Ministry",
    "Prayer Ministry",
    "Evangelism",
    "Administrative",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
    Divorced,
    Widowed,
}

impl std::fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaritalStatus::Single => write!(f, "Single"),
            MaritalStatus::Married => write!(f, "Married"),
            MaritalStatus::Divorced => write!(f, "Divorced"),
            MaritalStatus::Widowed => write!(f, "Widowed"),
        }
    }
}

/// A spiritual milestone: whether it was reached, and when if known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Milestone {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Milestone {
    pub fn reached(date: Option<NaiveDate>) -> Self {
        Self { status: true, date }
    }
}

/// A registered church member.
///
/// `age_group` is derived from `date_of_birth` and recomputed on every save;
/// it is persisted alongside the record (so exports carry it) but is never
/// accepted from user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub occupation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub date_joined_church: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invited_by: Option<String>,
    pub born_again: Milestone,
    pub water_baptized: Milestone,
    pub spirit_baptized: Milestone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub ministries: Vec<String>,
    pub age_group: AgeGroup,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Member {
    /// Age in whole years as of `today`.
    pub fn age(&self, today: NaiveDate) -> i32 {
        calculate_age(self.date_of_birth, today)
    }

    /// Recompute the derived age-group field as of `today`.
    pub fn refresh_age_group(&mut self, today: NaiveDate) {
        self.age_group = AgeGroup::classify(Some(self.date_of_birth), today);
    }

    /// Add or remove a ministry, keeping the list free of duplicates.
    pub fn toggle_ministry(&mut self, ministry: &str) {
        if let Some(pos) = self.ministries.iter().position(|m| m == ministry) {
            self.ministries.remove(pos);
        } else {
            self.ministries.push(ministry.to_string());
        }
    }

    pub fn in_ministry(&self, ministry: &str) -> bool {
        self.ministries.iter().any(|m| m == ministry)
    }
}
