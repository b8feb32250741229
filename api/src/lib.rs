pub mod client;
pub mod espn;
pub mod streamed;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the upstream wire formats
// ---------------------------------------------------------------------------

/// One match/event, normalised from either upstream shape.
///
/// The ESPN scoreboard variant carries scores and status text but no stream
/// sources; the stream-directory variant carries sources and badges but no
/// scores. Both land here, with absent fields left at their defaults.
#[derive(Debug, Clone, Default)]
pub struct MatchRecord {
    pub id: String,
    pub title: String,
    /// Raw grouping label from upstream: a sport key ("basketball") or a
    /// league keyword ("epl"). Matched case-insensitively downstream.
    pub category: String,
    /// League display name, when the batch came from a league scoreboard.
    pub league: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub home: Competitor,
    pub away: Competitor,
    pub status: StatusInfo,
    pub sources: Vec<SourceRef>,
    /// Upstream-reported viewer count; 0 when the source has none.
    pub viewer_count: u64,
    pub poster: Option<String>,
}

impl MatchRecord {
    /// Records without an id and a start time cannot be classified and are
    /// skipped by consumers rather than treated as errors.
    pub fn is_well_formed(&self) -> bool {
        !self.id.is_empty() && self.start_time.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Competitor {
    pub name: String,
    pub badge: Option<String>,
    /// Upstream sends scores as strings; empty/absent means not started.
    pub score: Option<String>,
}

/// Free-text match state as the upstream reports it ("FT", "Half",
/// "In Progress"). Classification heuristics live downstream, not here.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    pub state: String,
    pub detail: String,
    pub completed: bool,
}

/// Pointer to a stream provider; resolved to playable [`Stream`]s on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRef {
    pub provider: String,
    pub id: String,
}

/// A resolved, playable stream variant.
#[derive(Debug, Clone, Default)]
pub struct Stream {
    pub id: String,
    pub stream_no: u32,
    pub provider: String,
    pub hd: bool,
    pub embed_url: String,
    pub viewers: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Sport {
    pub id: String,
    pub name: String,
}

/// A covered soccer league: ESPN slug plus the keyword used for sport
/// grouping downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct League {
    pub name: &'static str,
    pub slug: &'static str,
    pub keyword: &'static str,
}

pub const LEAGUES: [League; 5] = [
    League { name: "Premier League", slug: "eng.1", keyword: "epl" },
    League { name: "La Liga", slug: "esp.1", keyword: "laliga" },
    League { name: "Serie A", slug: "ita.1", keyword: "seriea" },
    League { name: "Bundesliga", slug: "ger.1", keyword: "bundesliga" },
    League { name: "Ligue 1", slug: "fra.1", keyword: "ligue1" },
];

impl League {
    pub fn by_slug(slug: &str) -> Option<League> {
        LEAGUES.iter().copied().find(|l| l.slug == slug)
    }
}

/// One row of a league table.
#[derive(Debug, Clone, Default)]
pub struct StandingRow {
    pub rank: u32,
    pub team: String,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_diff: i64,
    pub points: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Article {
    pub headline: String,
    pub description: String,
    pub published: Option<DateTime<Utc>>,
    pub link: String,
}
