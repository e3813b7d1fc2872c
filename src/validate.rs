//! Form-level input validation.
//!
//! Forms hold raw string input the way the registration screens collect it.
//! Validation either returns a fully assembled record (fresh id, computed
//! age group, creation timestamp) or a field-keyed error map for inline
//! rendering. Nothing touches storage until validation has passed.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    new_id, AgeGroup, BabyDedication, CounsellingStatus, Gender, MaritalStatus,
    MarriagePreparation, Member, Milestone, NewlyWed, DEFAULT_TOTAL_SESSIONS,
};
use crate::utils::parse_date;

/// Field-keyed validation failures. Keys are the camelCase form field names
/// so callers can render errors next to the offending input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Trimmed non-empty string, or `None`.
fn opt(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Lightweight shape check: something before the `@`, a dot somewhere in
/// the domain, no whitespace anywhere.
fn looks_like_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = raw.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .rsplit_once('.')
        .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty())
}

/// Require a date field: empty and unparseable are distinct errors.
fn require_date(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> Option<NaiveDate> {
    if raw.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
        return None;
    }
    match parse_date(raw) {
        Some(date) => Some(date),
        None => {
            errors.add(field, format!("{} is not a valid date", label));
            None
        }
    }
}

fn require_text(errors: &mut ValidationErrors, field: &'static str, label: &str, raw: &str) {
    if raw.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
    }
}

/// Raw input for a spiritual milestone checkbox plus its optional date.
#[derive(Debug, Clone, Default)]
pub struct MilestoneForm {
    pub status: bool,
    pub date: String,
}

impl MilestoneForm {
    fn to_milestone(&self) -> Milestone {
        Milestone {
            status: self.status,
            date: parse_date(&self.date),
        }
    }
}

/// Raw member registration input.
#[derive(Debug, Clone, Default)]
pub struct MemberForm {
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub occupation: String,
    pub national_id: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub date_joined_church: String,
    pub invited_by: String,
    pub born_again: MilestoneForm,
    pub water_baptized: MilestoneForm,
    pub spirit_baptized: MilestoneForm,
    pub notes: String,
    pub ministries: Vec<String>,
}

impl MemberForm {
    /// Validate and assemble a new member record.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<Member, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        require_text(&mut errors, "fullName", "Full name", &self.full_name);
        let date_of_birth =
            require_date(&mut errors, "dateOfBirth", "Date of birth", &self.date_of_birth);
        require_text(&mut errors, "occupation", "Occupation", &self.occupation);
        require_text(&mut errors, "phone", "Phone number", &self.phone);

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !looks_like_email(email) {
            errors.add("email", "Invalid email format");
        }

        require_text(&mut errors, "address", "Address", &self.address);
        let date_joined_church = require_date(
            &mut errors,
            "dateJoinedChurch",
            "Date joined church",
            &self.date_joined_church,
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        // Required dates are present once the error map is empty.
        let date_of_birth = date_of_birth.expect("validated");
        let date_joined_church = date_joined_church.expect("validated");

        Ok(Member {
            id: new_id(),
            full_name: self.full_name.trim().to_string(),
            date_of_birth,
            gender: self.gender,
            marital_status: self.marital_status,
            occupation: self.occupation.trim().to_string(),
            national_id: opt(&self.national_id),
            phone: self.phone.trim().to_string(),
            email: email.to_string(),
            address: self.address.trim().to_string(),
            date_joined_church,
            invited_by: opt(&self.invited_by),
            born_again: self.born_again.to_milestone(),
            water_baptized: self.water_baptized.to_milestone(),
            spirit_baptized: self.spirit_baptized.to_milestone(),
            notes: opt(&self.notes),
            ministries: self.ministries.clone(),
            age_group: AgeGroup::classify(Some(date_of_birth), now.date_naive()),
            created_at: now,
            updated_at: None,
        })
    }

    /// Validate an edit of an existing member, preserving its identity and
    /// creation time and stamping the update time.
    pub fn validate_update(
        &self,
        existing: &Member,
        now: DateTime<Utc>,
    ) -> Result<Member, ValidationErrors> {
        let mut member = self.validate(now)?;
        member.id = existing.id.clone();
        member.created_at = existing.created_at;
        member.updated_at = Some(now);
        Ok(member)
    }
}

/// Raw newly-wed registry input.
#[derive(Debug, Clone, Default)]
pub struct NewlyWedForm {
    pub couple_names: String,
    pub date_of_wedding: String,
    pub counselling_status: CounsellingStatus,
    pub assigned_mentor: String,
}

impl NewlyWedForm {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<NewlyWed, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        require_text(&mut errors, "coupleNames", "Couple names", &self.couple_names);
        let date_of_wedding = require_date(
            &mut errors,
            "dateOfWedding",
            "Wedding date",
            &self.date_of_wedding,
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewlyWed {
            id: new_id(),
            couple_names: self.couple_names.trim().to_string(),
            date_of_wedding: date_of_wedding.expect("validated"),
            counselling_status: self.counselling_status,
            assigned_mentor: opt(&self.assigned_mentor),
            created_at: now,
        })
    }
}

/// Raw marriage-preparation registry input.
#[derive(Debug, Clone)]
pub struct MarriagePrepForm {
    pub couple_names: String,
    pub intended_wedding_date: String,
    pub sessions_attended: u32,
    pub total_sessions: u32,
    pub notes: String,
}

impl Default for MarriagePrepForm {
    fn default() -> Self {
        Self {
            couple_names: String::new(),
            intended_wedding_date: String::new(),
            sessions_attended: 0,
            total_sessions: DEFAULT_TOTAL_SESSIONS,
            notes: String::new(),
        }
    }
}

impl MarriagePrepForm {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<MarriagePreparation, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        require_text(&mut errors, "coupleNames", "Couple names", &self.couple_names);
        let intended_wedding_date = require_date(
            &mut errors,
            "intendedWeddingDate",
            "Intended wedding date",
            &self.intended_wedding_date,
        );
        if self.total_sessions == 0 {
            errors.add("totalSessions", "Total sessions must be at least 1");
        } else if self.sessions_attended > self.total_sessions {
            errors.add(
                "sessionsAttended",
                "Sessions attended cannot exceed total sessions",
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(MarriagePreparation {
            id: new_id(),
            couple_names: self.couple_names.trim().to_string(),
            intended_wedding_date: intended_wedding_date.expect("validated"),
            sessions_attended: self.sessions_attended,
            total_sessions: self.total_sessions,
            notes: opt(&self.notes),
            created_at: now,
        })
    }
}

/// Raw baby-dedication registry input.
#[derive(Debug, Clone, Default)]
pub struct BabyDedicationForm {
    pub child_name: String,
    pub date_of_birth: String,
    pub parent_names: String,
    pub parent_member_ids: Vec<String>,
    pub date_dedicated: String,
    pub officiating_minister: String,
}

impl BabyDedicationForm {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<BabyDedication, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        require_text(&mut errors, "childName", "Child name", &self.child_name);
        let date_of_birth =
            require_date(&mut errors, "dateOfBirth", "Date of birth", &self.date_of_birth);
        require_text(&mut errors, "parentNames", "Parent names", &self.parent_names);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BabyDedication {
            id: new_id(),
            child_name: self.child_name.trim().to_string(),
            date_of_birth: date_of_birth.expect("validated"),
            parent_names: self.parent_names.trim().to_string(),
            parent_member_ids: self.parent_member_ids.clone(),
            date_dedicated: parse_date(&self.date_dedicated),
            officiating_minister: opt(&self.officiating_minister),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap()
    }

    fn valid_member_form() -> MemberForm {
        MemberForm {
            full_name: "Grace Mwangi".to_string(),
            date_of_birth: "2010-06-15".to_string(),
            occupation: "Student".to_string(),
            phone: "0712345678".to_string(),
            email: "grace@example.com".to_string(),
            address: "14 Riverside Drive".to_string(),
            date_joined_church: "2023-02-05".to_string(),
            ministries: vec!["Worship Team".to_string()],
            ..MemberForm::default()
        }
    }

    #[test]
    fn test_valid_member_is_assembled() {
        let member = valid_member_form().validate(now()).unwrap();
        assert_eq!(member.full_name, "Grace Mwangi");
        assert_eq!(member.age_group, AgeGroup::Youth);
        assert_eq!(member.created_at, now());
        assert_eq!(member.updated_at, None);
        assert_eq!(member.id.len(), 36);
        assert_eq!(member.national_id, None);
    }

    #[test]
    fn test_missing_required_fields_are_keyed() {
        let err = MemberForm::default().validate(now()).unwrap_err();
        assert_eq!(err.get("fullName"), Some("Full name is required"));
        assert_eq!(err.get("dateOfBirth"), Some("Date of birth is required"));
        assert_eq!(err.get("occupation"), Some("Occupation is required"));
        assert_eq!(err.get("phone"), Some("Phone number is required"));
        assert_eq!(err.get("email"), Some("Email is required"));
        assert_eq!(err.get("address"), Some("Address is required"));
        assert_eq!(
            err.get("dateJoinedChurch"),
            Some("Date joined church is required")
        );
        assert_eq!(err.len(), 7);
    }

    #[test]
    fn test_malformed_email_and_date() {
        let mut form = valid_member_form();
        form.email = "not-an-email".to_string();
        form.date_of_birth = "15/06/2010".to_string();

        let err = form.validate(now()).unwrap_err();
        assert_eq!(err.get("email"), Some("Invalid email format"));
        assert_eq!(err.get("dateOfBirth"), Some("Date of birth is not a valid date"));
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn test_email_shape_check() {
        assert!(looks_like_email("a@b.co"));
        assert!(looks_like_email("first.last@church.org"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a b@c.de"));
        assert!(!looks_like_email("plain"));
    }

    #[test]
    fn test_update_preserves_identity() {
        let original = valid_member_form().validate(now()).unwrap();

        let mut form = valid_member_form();
        form.full_name = "Grace Mwangi-Kariuki".to_string();
        let later = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
        let updated = form.validate_update(&original, later).unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.updated_at, Some(later));
        assert_eq!(updated.full_name, "Grace Mwangi-Kariuki");
    }

    #[test]
    fn test_milestone_dates_parse_leniently() {
        let mut form = valid_member_form();
        form.born_again = MilestoneForm {
            status: true,
            date: "2020-01-05".to_string(),
        };
        form.water_baptized = MilestoneForm {
            status: true,
            date: "someday".to_string(),
        };

        let member = form.validate(now()).unwrap();
        assert_eq!(
            member.born_again.date,
            NaiveDate::from_ymd_opt(2020, 1, 5)
        );
        assert!(member.water_baptized.status);
        assert_eq!(member.water_baptized.date, None);
    }

    #[test]
    fn test_newly_wed_required_fields() {
        let err = NewlyWedForm::default().validate(now()).unwrap_err();
        assert_eq!(err.get("coupleNames"), Some("Couple names is required"));
        assert_eq!(err.get("dateOfWedding"), Some("Wedding date is required"));

        let record = NewlyWedForm {
            couple_names: "John & Mary".to_string(),
            date_of_wedding: "2024-02-17".to_string(),
            ..NewlyWedForm::default()
        }
        .validate(now())
        .unwrap();
        assert_eq!(record.counselling_status, CounsellingStatus::NotStarted);
        assert_eq!(record.assigned_mentor, None);
    }

    #[test]
    fn test_marriage_prep_session_bounds() {
        let mut form = MarriagePrepForm {
            couple_names: "Daniel & Esther".to_string(),
            intended_wedding_date: "2025-09-20".to_string(),
            ..MarriagePrepForm::default()
        };
        assert_eq!(form.total_sessions, DEFAULT_TOTAL_SESSIONS);

        form.sessions_attended = 9;
        let err = form.validate(now()).unwrap_err();
        assert_eq!(
            err.get("sessionsAttended"),
            Some("Sessions attended cannot exceed total sessions")
        );

        form.sessions_attended = 8;
        assert!(form.validate(now()).is_ok());

        form.total_sessions = 0;
        let err = form.validate(now()).unwrap_err();
        assert_eq!(
            err.get("totalSessions"),
            Some("Total sessions must be at least 1")
        );
    }

    #[test]
    fn test_baby_dedication_form() {
        let err = BabyDedicationForm::default().validate(now()).unwrap_err();
        assert_eq!(err.get("childName"), Some("Child name is required"));
        assert_eq!(err.get("parentNames"), Some("Parent names is required"));

        let record = BabyDedicationForm {
            child_name: "Amani".to_string(),
            date_of_birth: "2024-11-03".to_string(),
            parent_names: "Peter & Jane".to_string(),
            parent_member_ids: vec!["m1".to_string()],
            ..BabyDedicationForm::default()
        }
        .validate(now())
        .unwrap();
        assert_eq!(record.parent_member_ids, vec!["m1".to_string()]);
        assert_eq!(record.date_dedicated, None);
    }

    #[test]
    fn test_errors_display_joins_fields() {
        let err = NewlyWedForm::default().validate(now()).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("coupleNames: Couple names is required"));
        assert!(text.contains("; "));
    }
}
