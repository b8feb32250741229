/// Wire types for the streamed.su match/stream directory.
/// Endpoints: /api/sports, /api/matches/{live,all-today,all}[/popular],
/// /api/stream/{source}/{id}
use serde::Deserialize;

#[derive(Deserialize, Default, Debug, Clone)]
pub struct StreamedSport {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StreamedMatch {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Scheduled start as epoch milliseconds; 0 when the directory has no
    /// date for the event.
    #[serde(default)]
    pub date: i64,
    pub poster: Option<String>,
    pub teams: Option<StreamedTeams>,
    #[serde(default)]
    pub sources: Vec<StreamedSourceRef>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct StreamedTeams {
    pub home: Option<StreamedTeam>,
    pub away: Option<StreamedTeam>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct StreamedTeam {
    pub name: Option<String>,
    pub badge: Option<String>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct StreamedSourceRef {
    pub source: String,
    pub id: String,
}

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StreamedStream {
    pub id: String,
    #[serde(default)]
    pub stream_no: u32,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub hd: bool,
    #[serde(default)]
    pub embed_url: String,
    #[serde(default)]
    pub viewers: u64,
}
