use crate::derive::DerivedMatch;

/// One entry of the sport category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SportCategory {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// Upstream category strings that map here, compared lowercased.
    pub aliases: &'static [&'static str],
}

/// Fixed category table, in display order. "other" is the reserved fallback
/// and must stay last.
pub const CATEGORIES: [SportCategory; 8] = [
    SportCategory {
        key: "football",
        name: "Football",
        icon: "⚽",
        aliases: &["soccer", "football", "epl", "laliga", "seriea", "bundesliga", "ligue1"],
    },
    SportCategory {
        key: "basketball",
        name: "Basketball",
        icon: "🏀",
        aliases: &["basketball", "nba", "euroleague"],
    },
    SportCategory { key: "tennis", name: "Tennis", icon: "🎾", aliases: &["tennis", "atp", "wta"] },
    SportCategory { key: "baseball", name: "Baseball", icon: "⚾", aliases: &["baseball", "mlb"] },
    SportCategory { key: "hockey", name: "Hockey", icon: "🏒", aliases: &["hockey", "nhl"] },
    SportCategory {
        key: "american-football",
        name: "American Football",
        icon: "🏈",
        aliases: &["nfl", "american-football", "americanfootball"],
    },
    SportCategory {
        key: "motorsport",
        name: "Motorsport",
        icon: "🏎️",
        aliases: &["f1", "motorsport", "racing"],
    },
    SportCategory { key: "other", name: "Other", icon: "🏆", aliases: &[] },
];

/// Canonical category key for a raw upstream category string. Unknown or
/// empty input falls back to "other", so every match has a home.
pub fn category_key(raw: &str) -> &'static str {
    let raw = raw.to_lowercase();
    CATEGORIES
        .iter()
        .find(|c| c.key == raw || c.aliases.contains(&raw.as_str()))
        .map(|c| c.key)
        .unwrap_or("other")
}

pub fn category_by_key(key: &str) -> Option<&'static SportCategory> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Matches of one sport, for sectioned display.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: &'static SportCategory,
    pub matches: Vec<&'a DerivedMatch>,
}

/// Partition a batch into per-sport groups.
///
/// Groups come back in table order with empty ones dropped; inside a group
/// the busiest streams sort first, ties keeping batch order.
pub fn group_by_category(matches: &[DerivedMatch]) -> Vec<CategoryGroup<'_>> {
    let mut groups = Vec::new();
    for category in &CATEGORIES {
        let mut members: Vec<&DerivedMatch> = matches
            .iter()
            .filter(|m| category_key(&m.record.category) == category.key)
            .collect();
        if members.is_empty() {
            continue;
        }
        members.sort_by(|a, b| b.record.viewer_count.cmp(&a.record.viewer_count));
        groups.push(CategoryGroup { category, matches: members });
    }
    groups
}
