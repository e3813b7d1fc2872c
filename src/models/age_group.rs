//! Age-group classification from date of birth.
//!
//! Every member carries a derived age-group field; it is recomputed from the
//! date of birth whenever the record is saved, never edited directly. The
//! current date is always passed in explicitly so the buckets are
//! reproducible under test.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::parse_date;

/// Life-stage bucket derived from date of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    Children,
    Youth,
    #[serde(rename = "Young Adults")]
    YoungAdults,
    Adults,
    Seniors,
    Unknown,
}

impl AgeGroup {
    /// Every bucket in display order.
    pub const ALL: [AgeGroup; 6] = [
        AgeGroup::Children,
        AgeGroup::Youth,
        AgeGroup::YoungAdults,
        AgeGroup::Adults,
        AgeGroup::Seniors,
        AgeGroup::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Children => "Children",
            AgeGroup::Youth => "Youth",
            AgeGroup::YoungAdults => "Young Adults",
            AgeGroup::Adults => "Adults",
            AgeGroup::Seniors => "Seniors",
            AgeGroup::Unknown => "Unknown",
        }
    }

    /// Classify a date of birth into a bucket as of `today`.
    ///
    /// A missing date yields `Unknown`. Buckets are evaluated in order,
    /// first match wins: under 13 Children, under 18 Youth, under 35 Young
    /// Adults, under 55 Adults, otherwise Seniors.
    pub fn classify(date_of_birth: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(dob) = date_of_birth else {
            return AgeGroup::Unknown;
        };
        let age = calculate_age(dob, today);
        if age < 13 {
            AgeGroup::Children
        } else if age < 18 {
            AgeGroup::Youth
        } else if age < 35 {
            AgeGroup::YoungAdults
        } else if age < 55 {
            AgeGroup::Adults
        } else {
            AgeGroup::Seniors
        }
    }

    /// Classify a raw date string; unparseable or missing input yields
    /// `Unknown` rather than an error.
    pub fn classify_raw(raw: Option<&str>, today: NaiveDate) -> Self {
        Self::classify(raw.and_then(parse_date), today)
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Age in whole years as of `today`, counting a birthday as reached on the
/// day itself (month/day comparison, not day-of-year).
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = d(2010, 6, 15);
        assert_eq!(calculate_age(dob, d(2024, 6, 14)), 13);
        assert_eq!(calculate_age(dob, d(2024, 6, 15)), 14);
        assert_eq!(calculate_age(dob, d(2024, 6, 16)), 14);
    }

    #[test]
    fn test_birthday_scenarios() {
        // Turning 14 the next day: still Youth either side of the birthday.
        assert_eq!(
            AgeGroup::classify(Some(d(2010, 6, 15)), d(2024, 6, 14)),
            AgeGroup::Youth
        );
        assert_eq!(
            AgeGroup::classify(Some(d(2010, 6, 15)), d(2024, 6, 15)),
            AgeGroup::Youth
        );
        // Still 11, birthday not yet reached.
        assert_eq!(
            AgeGroup::classify(Some(d(2012, 6, 20)), d(2024, 6, 14)),
            AgeGroup::Children
        );
    }

    #[test]
    fn test_bucket_boundaries_move_on_the_birthday() {
        let today = d(2024, 3, 1);
        // Day before the 13th birthday: Children. On it: Youth.
        assert_eq!(AgeGroup::classify(Some(d(2011, 3, 2)), today), AgeGroup::Children);
        assert_eq!(AgeGroup::classify(Some(d(2011, 3, 1)), today), AgeGroup::Youth);
        // 18 boundary.
        assert_eq!(AgeGroup::classify(Some(d(2006, 3, 2)), today), AgeGroup::Youth);
        assert_eq!(AgeGroup::classify(Some(d(2006, 3, 1)), today), AgeGroup::YoungAdults);
        // 35 boundary.
        assert_eq!(AgeGroup::classify(Some(d(1989, 3, 2)), today), AgeGroup::YoungAdults);
        assert_eq!(AgeGroup::classify(Some(d(1989, 3, 1)), today), AgeGroup::Adults);
        // 55 boundary.
        assert_eq!(AgeGroup::classify(Some(d(1969, 3, 2)), today), AgeGroup::Adults);
        assert_eq!(AgeGroup::classify(Some(d(1969, 3, 1)), today), AgeGroup::Seniors);
    }

    #[test]
    fn test_missing_or_unparseable_is_unknown() {
        let today = d(2024, 6, 14);
        assert_eq!(AgeGroup::classify(None, today), AgeGroup::Unknown);
        assert_eq!(AgeGroup::classify_raw(None, today), AgeGroup::Unknown);
        assert_eq!(AgeGroup::classify_raw(Some("yesterday"), today), AgeGroup::Unknown);
        assert_eq!(
            AgeGroup::classify_raw(Some("2010-06-15"), today),
            AgeGroup::Youth
        );
    }

    #[test]
    fn test_serde_display_names() {
        assert_eq!(
            serde_json::to_string(&AgeGroup::YoungAdults).unwrap(),
            "\"Young Adults\""
        );
        assert_eq!(
            serde_json::from_str::<AgeGroup>("\"Seniors\"").unwrap(),
            AgeGroup::Seniors
        );
        assert_eq!(AgeGroup::YoungAdults.to_string(), "Young Adults");
    }
}
