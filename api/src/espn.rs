/// ESPN API raw wire types — serde shapes for deserializing ESPN responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// League scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub date: Option<String>, // ISO 8601
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    /// Free text: "FT", "Half", "Sat, March 14th at 3:00 PM GMT", ...
    pub detail: Option<String>,
    /// "pre" | "in" | "post"
    pub state: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<String>, // ESPN sends scores as strings
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnTeam {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub logo: Option<String>,
}

// ---------------------------------------------------------------------------
// League standings  (v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsResponse {
    pub children: Option<Vec<StandingsGroup>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StandingsGroup {
    pub standings: Option<StandingsTable>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsTable {
    pub entries: Option<Vec<StandingsEntry>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsEntry {
    pub team: Option<EspnTeam>,
    pub stats: Option<Vec<StandingsStat>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StandingsStat {
    pub name: Option<String>,
    pub value: Option<f64>,
}

// ---------------------------------------------------------------------------
// League news  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct NewsResponse {
    pub articles: Option<Vec<EspnArticle>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnArticle {
    pub headline: Option<String>,
    pub description: Option<String>,
    pub published: Option<String>, // ISO 8601
    pub links: Option<EspnArticleLinks>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnArticleLinks {
    pub web: Option<EspnArticleLink>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnArticleLink {
    pub href: Option<String>,
}
