//! Flockbook - a church membership register.
//!
//! This crate is the data layer of a membership register: typed records for
//! members and special-event registries (newly-weds, marriage preparation,
//! baby dedications), a pure age-group classifier, a JSON record store over
//! a pluggable key-value backend, and a capped audit trail of sensitive
//! record operations.
//!
//! Each collection is persisted wholesale as a JSON array under its own
//! storage key; every write is a read-modify-write of that one key, last
//! writer wins. Reads that hit missing or corrupt data degrade to an empty
//! collection rather than failing.
//!
//! ```
//! use chrono::Utc;
//! use flockbook::store::RecordStore;
//! use flockbook::validate::MemberForm;
//! use flockbook::{AccessAction, AccessLogEntry, AgeGroup};
//!
//! let mut store = RecordStore::in_memory();
//!
//! let form = MemberForm {
//!     full_name: "Grace Mwangi".to_string(),
//!     date_of_birth: "1990-04-12".to_string(),
//!     occupation: "Teacher".to_string(),
//!     phone: "0712345678".to_string(),
//!     email: "grace@example.com".to_string(),
//!     address: "14 Riverside Drive".to_string(),
//!     date_joined_church: "2020-01-05".to_string(),
//!     ..MemberForm::default()
//! };
//! let member = form.validate(Utc::now())?;
//! let id = member.id.clone();
//!
//! store.save_member(member)?;
//! store.log_access(AccessLogEntry::new("admin", AccessAction::Edit, vec![id]))?;
//!
//! assert_eq!(store.members().len(), 1);
//! assert_ne!(store.members()[0].age_group, AgeGroup::Unknown);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod store;
pub mod summaries;
pub mod utils;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{
    calculate_age, new_id, AccessAction, AccessLogEntry, AgeGroup, BabyDedication,
    CounsellingStatus, Gender, MaritalStatus, MarriagePreparation, Member, Milestone, NewlyWed,
    DEFAULT_TOTAL_SESSIONS, MINISTRY_OPTIONS,
};
pub use roster::{filter_and_sort, MemberFilter, MemberSortColumn};
pub use store::backend::{FileStore, MemoryStore, StorageBackend};
pub use store::{ExportPayload, RecordStore};
pub use summaries::{monthly_growth, GrowthPoint, MembershipSummary};
pub use validate::{
    BabyDedicationForm, MarriagePrepForm, MemberForm, MilestoneForm, NewlyWedForm,
    ValidationErrors,
};
