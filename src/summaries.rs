//! Dashboard and analytics statistics over the member roster.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{AgeGroup, Gender, Member};

/// Months covered by the membership-growth series, current month included.
const GROWTH_WINDOW_MONTHS: u32 = 12;

/// Aggregate counts shown on the dashboard. Pure computation; the current
/// date is passed in so "new this month" is reproducible under test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSummary {
    pub total: usize,
    /// Members who joined the church in the current calendar month.
    pub new_this_month: usize,
    pub born_again: usize,
    pub water_baptized: usize,
    pub spirit_baptized: usize,
    pub by_age_group: BTreeMap<AgeGroup, usize>,
    pub by_gender: BTreeMap<Gender, usize>,
    pub by_ministry: BTreeMap<String, usize>,
}

impl MembershipSummary {
    pub fn compute(members: &[Member], today: NaiveDate) -> Self {
        let mut summary = Self {
            total: members.len(),
            ..Self::default()
        };

        for member in members {
            let joined = member.date_joined_church;
            if joined.year() == today.year() && joined.month() == today.month() {
                summary.new_this_month += 1;
            }
            if member.born_again.status {
                summary.born_again += 1;
            }
            if member.water_baptized.status {
                summary.water_baptized += 1;
            }
            if member.spirit_baptized.status {
                summary.spirit_baptized += 1;
            }
            *summary.by_age_group.entry(member.age_group).or_default() += 1;
            *summary.by_gender.entry(member.gender).or_default() += 1;
            for ministry in &member.ministries {
                *summary.by_ministry.entry(ministry.clone()).or_default() += 1;
            }
        }

        summary
    }

    /// Count for one bucket, zero when absent.
    pub fn age_group_count(&self, group: AgeGroup) -> usize {
        self.by_age_group.get(&group).copied().unwrap_or(0)
    }

    pub fn gender_count(&self, gender: Gender) -> usize {
        self.by_gender.get(&gender).copied().unwrap_or(0)
    }
}

/// Joins recorded in one calendar month of the growth window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPoint {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

impl GrowthPoint {
    /// Chart label, e.g. "Mar 2024".
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_default()
    }
}

/// The calendar month `back` months before `(year, month)`.
fn months_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - back as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

/// Members joined per calendar month over the last twelve months, oldest
/// first and current month last, keyed on the church join date.
pub fn monthly_growth(members: &[Member], today: NaiveDate) -> Vec<GrowthPoint> {
    (0..GROWTH_WINDOW_MONTHS)
        .rev()
        .map(|back| {
            let (year, month) = months_back(today.year(), today.month(), back);
            let count = members
                .iter()
                .filter(|m| {
                    m.date_joined_church.year() == year && m.date_joined_church.month() == month
                })
                .count();
            GrowthPoint { year, month, count }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::member_fixture;
    use crate::models::Milestone;

    fn joined(member: &mut Member, y: i32, m: u32, d: u32) {
        member.date_joined_church = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    }

    #[test]
    fn test_empty_roster() {
        let summary =
            MembershipSummary::compute(&[], NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert_eq!(summary, MembershipSummary::default());
    }

    #[test]
    fn test_counts_on_fixed_clock() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();

        let mut a = member_fixture("m1", "Alice");
        joined(&mut a, 2024, 6, 2); // inside the current month
        a.born_again = Milestone { status: true, date: None };
        a.water_baptized = Milestone { status: true, date: None };
        a.ministries = vec!["Ushering".to_string(), "Evangelism".to_string()];

        let mut b = member_fixture("m2", "Bob");
        b.gender = Gender::Male;
        joined(&mut b, 2023, 12, 30);
        b.age_group = AgeGroup::Seniors;
        b.born_again = Milestone { status: true, date: None };
        b.ministries = vec!["Ushering".to_string()];

        let summary = MembershipSummary::compute(&[a, b], today);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.new_this_month, 1);
        assert_eq!(summary.born_again, 2);
        assert_eq!(summary.water_baptized, 1);
        assert_eq!(summary.spirit_baptized, 0);
        assert_eq!(summary.age_group_count(AgeGroup::YoungAdults), 1);
        assert_eq!(summary.age_group_count(AgeGroup::Seniors), 1);
        assert_eq!(summary.age_group_count(AgeGroup::Children), 0);
        assert_eq!(summary.gender_count(Gender::Female), 1);
        assert_eq!(summary.gender_count(Gender::Male), 1);
        assert_eq!(summary.by_ministry.get("Ushering"), Some(&2));
        assert_eq!(summary.by_ministry.get("Evangelism"), Some(&1));
    }

    #[test]
    fn test_new_this_month_keys_on_join_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();

        // Record created this month, but the join date is years old: the
        // dashboard count follows the join date.
        let mut member = member_fixture("m1", "Alice");
        member.created_at = chrono::Utc::now();
        joined(&mut member, 2020, 1, 5);

        let summary = MembershipSummary::compute(&[member], today);
        assert_eq!(summary.new_this_month, 0);
    }

    #[test]
    fn test_months_back_wraps_the_year() {
        assert_eq!(months_back(2024, 2, 0), (2024, 2));
        assert_eq!(months_back(2024, 2, 1), (2024, 1));
        assert_eq!(months_back(2024, 2, 2), (2023, 12));
        assert_eq!(months_back(2024, 2, 11), (2023, 3));
    }

    #[test]
    fn test_monthly_growth_window() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        let mut current = member_fixture("m1", "Alice");
        joined(&mut current, 2024, 2, 1);
        let mut oldest = member_fixture("m2", "Bob");
        joined(&mut oldest, 2023, 3, 15); // oldest month still in the window
        let mut outside = member_fixture("m3", "Carol");
        joined(&mut outside, 2023, 2, 20); // one month too old

        let growth = monthly_growth(&[current, oldest, outside], today);
        assert_eq!(growth.len(), 12);

        let first = growth.first().unwrap();
        assert_eq!((first.year, first.month, first.count), (2023, 3, 1));
        let last = growth.last().unwrap();
        assert_eq!((last.year, last.month, last.count), (2024, 2, 1));

        let joins: usize = growth.iter().map(|p| p.count).sum();
        assert_eq!(joins, 2); // the too-old join never appears

        assert_eq!(first.label(), "Mar 2023");
    }
}
