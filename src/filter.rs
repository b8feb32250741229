use crate::derive::DerivedMatch;
use crate::group::category_key;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// What the user asked to see. Everything defaults to "off".
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    /// Substring to look for across title, team names and category.
    pub search: String,
    /// Canonical category key, or "all".
    pub category: String,
    pub favorite_teams: HashSet<String>,
    /// Only meaningful when `favorite_teams` is non-empty; an empty set
    /// never hides anything.
    pub restrict_to_favorites: bool,
    pub sort: SortOrder,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: "all".into(),
            favorite_teams: HashSet::new(),
            restrict_to_favorites: false,
            sort: SortOrder::Ascending,
        }
    }
}

/// Run the filter pipeline and sort the survivors by start time.
///
/// Search, category and favorites filters apply in that order; the input is
/// untouched and ties keep their batch order.
pub fn filter_and_sort<'a>(
    matches: &'a [DerivedMatch],
    criteria: &FilterCriteria,
) -> Vec<&'a DerivedMatch> {
    let search = criteria.search.to_lowercase();
    let use_favorites = criteria.restrict_to_favorites && !criteria.favorite_teams.is_empty();

    let mut result: Vec<&DerivedMatch> = matches
        .iter()
        .filter(|m| {
            if search.is_empty() {
                return true;
            }
            let r = &m.record;
            r.title.to_lowercase().contains(&search)
                || r.home.name.to_lowercase().contains(&search)
                || r.away.name.to_lowercase().contains(&search)
                || r.category.to_lowercase().contains(&search)
        })
        .filter(|m| {
            criteria.category == "all" || category_key(&m.record.category) == criteria.category
        })
        .filter(|m| {
            !use_favorites
                || criteria.favorite_teams.contains(&m.record.home.name)
                || criteria.favorite_teams.contains(&m.record.away.name)
        })
        .collect();

    match criteria.sort {
        SortOrder::Ascending => result.sort_by(|a, b| a.start_time.cmp(&b.start_time)),
        SortOrder::Descending => result.sort_by(|a, b| b.start_time.cmp(&a.start_time)),
    }
    result
}

/// Other matches a viewer of `target` might want: same category or a shared
/// participant, in batch order, at most `limit`.
pub fn find_related<'a>(
    target: &DerivedMatch,
    all: &'a [DerivedMatch],
    limit: usize,
) -> Vec<&'a DerivedMatch> {
    let target_key = category_key(&target.record.category);
    let names = [&target.record.home.name, &target.record.away.name];
    let shares_team = |m: &DerivedMatch| {
        [&m.record.home.name, &m.record.away.name]
            .iter()
            .any(|n| !n.is_empty() && names.contains(n))
    };
    let same_category = |m: &DerivedMatch| {
        if category_key(&m.record.category) != target_key {
            return false;
        }
        // "other" is a catch-all, not a shared sport; two unmapped
        // categories only relate when the raw strings agree.
        target_key != "other" || m.record.category.eq_ignore_ascii_case(&target.record.category)
    };

    all.iter()
        .filter(|m| m.record.id != target.record.id)
        .filter(|m| same_category(m) || shares_team(m))
        .take(limit)
        .collect()
}
