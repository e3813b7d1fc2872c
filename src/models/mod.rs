//! Data models for the membership register.
//!
//! This module contains all record types persisted by the store:
//!
//! - `Member`: the core roster record with contact info, spiritual
//!   milestones, ministries, and the derived age group
//! - `NewlyWed`, `MarriagePreparation`, `BabyDedication`: special-event
//!   registry records
//! - `AccessLogEntry`: one line of the data-access audit trail
//! - `AgeGroup`: the classifier for the derived life-stage bucket

pub mod age_group;
pub mod audit;
pub mod member;
pub mod registry;

pub use age_group::{calculate_age, AgeGroup};
pub use audit::{AccessAction, AccessLogEntry};
pub use member::{Gender, MaritalStatus, Member, Milestone, MINISTRY_OPTIONS};
pub use registry::{
    BabyDedication, CounsellingStatus, MarriagePreparation, NewlyWed, DEFAULT_TOTAL_SESSIONS,
};

/// Generate a fresh record identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
