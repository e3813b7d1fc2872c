//! Roster filtering and sorting for the members list.

use crate::models::{AgeGroup, Gender, Member};
use crate::utils::{cmp_ignore_case, contains_ignore_case};

/// Filter criteria for the members list. Empty/`None` criteria match
/// everything.
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    /// Matched case-insensitively against name and email, and as a plain
    /// substring against the phone number.
    pub search: String,
    pub age_group: Option<AgeGroup>,
    pub gender: Option<Gender>,
    pub ministry: Option<String>,
}

impl MemberFilter {
    pub fn matches(&self, member: &Member) -> bool {
        let search = self.search.trim();
        let matches_search = search.is_empty()
            || contains_ignore_case(&member.full_name, search)
            || contains_ignore_case(&member.email, search)
            || member.phone.contains(search);

        matches_search
            && self.age_group.is_none_or(|g| member.age_group == g)
            && self.gender.is_none_or(|g| member.gender == g)
            && self
                .ministry
                .as_deref()
                .is_none_or(|m| member.in_ministry(m))
    }
}

/// Sortable columns of the members list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberSortColumn {
    #[default]
    Name,
    DateJoined,
    AgeGroup,
}

impl MemberSortColumn {
    pub fn next(self) -> Self {
        match self {
            MemberSortColumn::Name => MemberSortColumn::DateJoined,
            MemberSortColumn::DateJoined => MemberSortColumn::AgeGroup,
            MemberSortColumn::AgeGroup => MemberSortColumn::Name,
        }
    }
}

/// Apply the filter, then sort by the given column.
pub fn filter_and_sort(
    members: &[Member],
    filter: &MemberFilter,
    sort: MemberSortColumn,
    ascending: bool,
) -> Vec<Member> {
    let mut filtered: Vec<Member> = members
        .iter()
        .filter(|m| filter.matches(m))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = match sort {
            MemberSortColumn::Name => cmp_ignore_case(&a.full_name, &b.full_name),
            MemberSortColumn::DateJoined => a.date_joined_church.cmp(&b.date_joined_church),
            MemberSortColumn::AgeGroup => a.age_group.cmp(&b.age_group),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    filtered
}
