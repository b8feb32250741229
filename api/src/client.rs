use crate::espn::{
    EspnCompetitor, EspnEvent, NewsResponse, ScoreboardResponse, StandingsEntry,
    StandingsResponse,
};
use crate::streamed::{StreamedMatch, StreamedSport, StreamedStream, StreamedTeam};
use crate::{
    Article, Competitor, LEAGUES, League, MatchRecord, SourceRef, Sport, StandingRow,
    StatusInfo, Stream,
};
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use log::warn;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/soccer";
const ESPN_V2: &str = "https://site.api.espn.com/apis/v2/sports/soccer";
const STREAMED: &str = "https://streamed.su";

/// Sports data client backed by ESPN's public soccer endpoints and the
/// streamed.su match/stream directory.
#[derive(Debug, Clone)]
pub struct SportsApi {
    client: Client,
    timeout: Duration,
    espn_site_base: String,
    espn_v2_base: String,
    streamed_base: String,
}

impl Default for SportsApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("streamhub/0.1 (terminal sports portal)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            espn_site_base: ESPN_SITE_V2.to_owned(),
            espn_v2_base: ESPN_V2.to_owned(),
            streamed_base: STREAMED.to_owned(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Which slice of the stream directory to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchListKind {
    #[default]
    Live,
    AllToday,
    All,
}

impl MatchListKind {
    pub fn endpoint(self, popular: bool) -> &'static str {
        match (self, popular) {
            (MatchListKind::Live, false) => "/api/matches/live",
            (MatchListKind::Live, true) => "/api/matches/live/popular",
            (MatchListKind::AllToday, false) => "/api/matches/all-today",
            (MatchListKind::AllToday, true) => "/api/matches/all-today/popular",
            (MatchListKind::All, false) => "/api/matches/all",
            (MatchListKind::All, true) => "/api/matches/all/popular",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "live" => Some(MatchListKind::Live),
            "today" => Some(MatchListKind::AllToday),
            "all" => Some(MatchListKind::All),
            _ => None,
        }
    }
}

impl SportsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at alternate hosts (mirror domains, test servers).
    pub fn with_bases(
        espn_site_base: impl Into<String>,
        espn_v2_base: impl Into<String>,
        streamed_base: impl Into<String>,
    ) -> Self {
        Self {
            espn_site_base: espn_site_base.into(),
            espn_v2_base: espn_v2_base.into(),
            streamed_base: streamed_base.into(),
            ..Self::default()
        }
    }

    /// Fetch one league's scoreboard for one calendar date.
    pub async fn fetch_scoreboard(
        &self,
        league: League,
        date: NaiveDate,
    ) -> ApiResult<Vec<MatchRecord>> {
        let url = format!(
            "{}/{}/scoreboard?dates={}",
            self.espn_site_base,
            league.slug,
            scoreboard_date(date)
        );
        let raw: ScoreboardResponse = self.get(&url).await?;
        Ok(raw
            .events
            .unwrap_or_default()
            .iter()
            .map(|e| map_event(e, league))
            .collect())
    }

    /// Fetch scoreboards for every covered league across a date window.
    /// Individual request failures are logged and skipped so one bad day or
    /// league never empties the whole batch.
    pub async fn fetch_all_leagues(&self, dates: &[NaiveDate]) -> Vec<MatchRecord> {
        let mut all = Vec::new();
        for league in LEAGUES {
            for &date in dates {
                match self.fetch_scoreboard(league, date).await {
                    Ok(mut batch) => all.append(&mut batch),
                    Err(e) => {
                        warn!("scoreboard fetch failed for {} on {date}: {e}", league.name)
                    }
                }
            }
        }
        all
    }

    /// Fetch the list of sports the stream directory covers.
    pub async fn fetch_sports(&self) -> ApiResult<Vec<Sport>> {
        let url = format!("{}/api/sports", self.streamed_base);
        let raw: Vec<StreamedSport> = self.get(&url).await?;
        Ok(raw
            .into_iter()
            .map(|s| Sport { id: s.id, name: s.name })
            .collect())
    }

    /// Fetch a slice of the stream directory (live / today / all).
    pub async fn fetch_matches(
        &self,
        kind: MatchListKind,
        popular: bool,
    ) -> ApiResult<Vec<MatchRecord>> {
        let url = format!("{}{}", self.streamed_base, kind.endpoint(popular));
        let raw: Vec<StreamedMatch> = self.get(&url).await?;
        Ok(raw.iter().map(map_streamed_match).collect())
    }

    /// Resolve one provider reference to its playable streams.
    pub async fn fetch_streams(&self, source: &SourceRef) -> ApiResult<Vec<Stream>> {
        let url = format!(
            "{}/api/stream/{}/{}",
            self.streamed_base, source.provider, source.id
        );
        let raw: Vec<StreamedStream> = self.get(&url).await?;
        Ok(raw.iter().map(map_stream).collect())
    }

    /// Resolve every provider a match advertises, tolerating per-provider
    /// failures, in the order the directory listed them.
    pub async fn fetch_match_streams(&self, record: &MatchRecord) -> Vec<Stream> {
        let mut streams = Vec::new();
        for source in &record.sources {
            match self.fetch_streams(source).await {
                Ok(mut batch) => streams.append(&mut batch),
                Err(e) => warn!("stream fetch failed for {}: {e}", source.provider),
            }
        }
        streams
    }

    /// Fetch the league table.
    pub async fn fetch_standings(&self, league: League) -> ApiResult<Vec<StandingRow>> {
        let url = format!("{}/{}/standings", self.espn_v2_base, league.slug);
        let raw: StandingsResponse = self.get(&url).await?;
        let entries = raw
            .children
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|g| g.standings)
            .and_then(|t| t.entries)
            .unwrap_or_default();
        Ok(entries
            .iter()
            .enumerate()
            .map(|(i, e)| map_standing_entry(i as u32 + 1, e))
            .collect())
    }

    /// Fetch the league news feed.
    pub async fn fetch_news(&self, league: League) -> ApiResult<Vec<Article>> {
        let url = format!("{}/{}/news", self.espn_site_base, league.slug);
        let raw: NewsResponse = self.get(&url).await?;
        Ok(raw
            .articles
            .unwrap_or_default()
            .iter()
            .map(map_article)
            .collect())
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Date helpers
// ---------------------------------------------------------------------------

/// ESPN scoreboard date parameter: YYYYMMDD.
pub fn scoreboard_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Consecutive dates from `days_back` before `today` through `days_ahead`
/// after it, oldest first. The home view uses (7, 3); match center (14, 7).
pub fn date_window(today: NaiveDate, days_back: u32, days_ahead: u32) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity((days_back + days_ahead + 1) as usize);
    for i in (1..=i64::from(days_back)).rev() {
        dates.push(today - ChronoDuration::days(i));
    }
    dates.push(today);
    for i in 1..=i64::from(days_ahead) {
        dates.push(today + ChronoDuration::days(i));
    }
    dates
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_event(event: &EspnEvent, league: League) -> MatchRecord {
    let status_type = event.status.as_ref().and_then(|s| s.status_type.as_ref());
    let status = StatusInfo {
        state: status_type
            .and_then(|t| t.state.clone())
            .unwrap_or_default(),
        detail: status_type
            .and_then(|t| t.detail.clone())
            .unwrap_or_default(),
        completed: status_type.and_then(|t| t.completed).unwrap_or(false),
    };

    let start_time = event
        .date
        .as_deref()
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc));

    // Flatten competitions → competitors
    let competitors: Vec<&EspnCompetitor> = event
        .competitions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .flat_map(|c| c.competitors.iter().flatten())
        .collect();
    let (home, away) = split_competitors(&competitors);

    MatchRecord {
        id: event.id.clone().unwrap_or_default(),
        title: event.name.clone().unwrap_or_default(),
        category: league.keyword.to_owned(),
        league: Some(league.name.to_owned()),
        start_time,
        home,
        away,
        status,
        sources: Vec::new(),
        viewer_count: 0,
        poster: None,
    }
}

fn split_competitors(competitors: &[&EspnCompetitor]) -> (Competitor, Competitor) {
    // Use the homeAway tag when present; fall back to index order.
    let home = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("home"))
        .copied()
        .or_else(|| competitors.first().copied());
    let away = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("away"))
        .copied()
        .or_else(|| competitors.get(1).copied());
    (
        home.map(map_competitor).unwrap_or_default(),
        away.map(map_competitor).unwrap_or_default(),
    )
}

fn map_competitor(c: &EspnCompetitor) -> Competitor {
    Competitor {
        name: c
            .team
            .as_ref()
            .and_then(|t| t.display_name.clone())
            .unwrap_or_default(),
        badge: c.team.as_ref().and_then(|t| t.logo.clone()),
        // ESPN sends "" for unplayed fixtures; treat that as no score.
        score: c.score.clone().filter(|s| !s.is_empty()),
    }
}

fn map_standing_entry(rank: u32, entry: &StandingsEntry) -> StandingRow {
    let stats = entry.stats.as_deref().unwrap_or_default();
    let get = |name: &str| -> i64 {
        stats
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
            .and_then(|s| s.value)
            .unwrap_or(0.0) as i64
    };

    StandingRow {
        rank,
        team: entry
            .team
            .as_ref()
            .and_then(|t| t.display_name.clone())
            .unwrap_or_default(),
        played: get("gamesPlayed"),
        won: get("wins"),
        drawn: get("ties"),
        lost: get("losses"),
        goals_for: get("pointsFor"),
        goals_against: get("pointsAgainst"),
        goal_diff: get("pointDifferential"),
        points: get("points"),
    }
}

fn map_article(a: &crate::espn::EspnArticle) -> Article {
    Article {
        headline: a.headline.clone().unwrap_or_default(),
        description: a.description.clone().unwrap_or_default(),
        published: a
            .published
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|dt| dt.with_timezone(&Utc)),
        link: a
            .links
            .as_ref()
            .and_then(|l| l.web.as_ref())
            .and_then(|w| w.href.clone())
            .unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Mapping: stream directory wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_streamed_match(m: &StreamedMatch) -> MatchRecord {
    let teams = m.teams.clone().unwrap_or_default();

    MatchRecord {
        id: m.id.clone(),
        title: m.title.clone(),
        category: m.category.clone(),
        league: None,
        // The directory sends 0 when it has no date; that is "malformed"
        // downstream, not a 1970 timestamp.
        start_time: (m.date > 0)
            .then(|| DateTime::from_timestamp_millis(m.date))
            .flatten(),
        home: map_streamed_team(teams.home.as_ref()),
        away: map_streamed_team(teams.away.as_ref()),
        status: StatusInfo::default(),
        sources: m
            .sources
            .iter()
            .map(|s| SourceRef { provider: s.source.clone(), id: s.id.clone() })
            .collect(),
        viewer_count: 0,
        poster: m.poster.clone(),
    }
}

fn map_streamed_team(t: Option<&StreamedTeam>) -> Competitor {
    Competitor {
        name: t.and_then(|t| t.name.clone()).unwrap_or_default(),
        badge: t.and_then(|t| t.badge.clone()),
        score: None,
    }
}

fn map_stream(s: &StreamedStream) -> Stream {
    Stream {
        id: s.id.clone(),
        stream_no: s.stream_no,
        provider: s.source.clone(),
        hd: s.hd,
        embed_url: s.embed_url.clone(),
        viewers: s.viewers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::espn::{EspnCompetition, EspnStatus, EspnStatusType, EspnTeam};
    use crate::streamed::{StreamedSourceRef, StreamedTeams};
    use chrono::Datelike;

    fn league() -> League {
        LEAGUES[0]
    }

    fn competitor(side: &str, name: &str, score: Option<&str>) -> EspnCompetitor {
        EspnCompetitor {
            home_away: Some(side.into()),
            team: Some(EspnTeam {
                display_name: Some(name.into()),
                logo: None,
            }),
            score: score.map(str::to_owned),
        }
    }

    #[test]
    fn scoreboard_date_is_compact_ymd() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(scoreboard_date(d), "20260307");
    }

    #[test]
    fn date_window_is_ordered_and_inclusive() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let dates = date_window(today, 7, 3);
        assert_eq!(dates.len(), 11);
        assert_eq!(dates[0], today - ChronoDuration::days(7));
        assert_eq!(dates[7], today);
        assert_eq!(dates[10], today + ChronoDuration::days(3));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn event_maps_to_record_with_league_keyword() {
        let event = EspnEvent {
            id: Some("401".into()),
            name: Some("Arsenal at Chelsea".into()),
            date: Some("2026-03-07T15:00Z".into()),
            status: Some(EspnStatus {
                status_type: Some(EspnStatusType {
                    detail: Some("FT".into()),
                    state: Some("post".into()),
                    completed: Some(true),
                }),
            }),
            competitions: Some(vec![EspnCompetition {
                competitors: Some(vec![
                    competitor("away", "Arsenal", Some("2")),
                    competitor("home", "Chelsea", Some("1")),
                ]),
            }]),
        };

        let record = map_event(&event, league());
        assert!(record.is_well_formed());
        assert_eq!(record.category, "epl");
        assert_eq!(record.league.as_deref(), Some("Premier League"));
        assert_eq!(record.home.name, "Chelsea");
        assert_eq!(record.away.name, "Arsenal");
        assert_eq!(record.home.score.as_deref(), Some("1"));
        assert_eq!(record.status.state, "post");
        assert!(record.status.completed);
        assert_eq!(record.start_time.unwrap().year(), 2026);
    }

    #[test]
    fn empty_event_yields_skippable_record() {
        let record = map_event(&EspnEvent::default(), league());
        assert!(!record.is_well_formed());
        assert!(record.home.name.is_empty());
        assert!(record.home.score.is_none());
        assert!(record.start_time.is_none());
    }

    #[test]
    fn empty_score_strings_map_to_none() {
        let c = competitor("home", "Lyon", Some(""));
        assert_eq!(map_competitor(&c).score, None);
    }

    #[test]
    fn streamed_match_maps_sources_and_badges() {
        let m = StreamedMatch {
            id: "abc".into(),
            title: "Celtics vs Lakers".into(),
            category: "basketball".into(),
            date: 1_772_000_000_000,
            poster: Some("poster-key".into()),
            teams: Some(StreamedTeams {
                home: Some(StreamedTeam {
                    name: Some("Celtics".into()),
                    badge: Some("celtics-badge".into()),
                }),
                away: Some(StreamedTeam { name: Some("Lakers".into()), badge: None }),
            }),
            sources: vec![StreamedSourceRef { source: "alpha".into(), id: "42".into() }],
        };

        let record = map_streamed_match(&m);
        assert!(record.is_well_formed());
        assert_eq!(record.category, "basketball");
        assert_eq!(record.home.badge.as_deref(), Some("celtics-badge"));
        assert_eq!(
            record.sources,
            vec![SourceRef { provider: "alpha".into(), id: "42".into() }]
        );
        assert_eq!(record.home.score, None);
    }

    #[test]
    fn streamed_match_with_zero_date_has_no_start_time() {
        let m = StreamedMatch { id: "abc".into(), ..Default::default() };
        let record = map_streamed_match(&m);
        assert!(record.start_time.is_none());
        assert!(!record.is_well_formed());
    }

    #[test]
    fn standing_entry_looks_stats_up_by_name() {
        let entry: StandingsEntry = serde_json::from_str(
            r#"{
                "team": {"displayName": "Arsenal"},
                "stats": [
                    {"name": "gamesPlayed", "value": 29.0},
                    {"name": "wins", "value": 20.0},
                    {"name": "ties", "value": 5.0},
                    {"name": "losses", "value": 4.0},
                    {"name": "pointsFor", "value": 62.0},
                    {"name": "pointsAgainst", "value": 24.0},
                    {"name": "pointDifferential", "value": 38.0},
                    {"name": "points", "value": 65.0}
                ]
            }"#,
        )
        .unwrap();

        let row = map_standing_entry(1, &entry);
        assert_eq!(row.team, "Arsenal");
        assert_eq!(row.played, 29);
        assert_eq!(row.drawn, 5);
        assert_eq!(row.goal_diff, 38);
        assert_eq!(row.points, 65);
    }

    #[test]
    fn match_list_endpoints_cover_popular_variants() {
        assert_eq!(MatchListKind::Live.endpoint(false), "/api/matches/live");
        assert_eq!(
            MatchListKind::AllToday.endpoint(true),
            "/api/matches/all-today/popular"
        );
        assert_eq!(MatchListKind::All.endpoint(false), "/api/matches/all");
        assert_eq!(MatchListKind::parse("today"), Some(MatchListKind::AllToday));
        assert_eq!(MatchListKind::parse("bogus"), None);
    }

    #[tokio::test]
    async fn fetch_matches_parses_directory_payload() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"[{
            "id": "m1",
            "title": "Celtics vs Lakers",
            "category": "basketball",
            "date": 1772000000000,
            "teams": {"home": {"name": "Celtics"}, "away": {"name": "Lakers"}},
            "sources": [{"source": "alpha", "id": "42"}]
        }]"#;
        let _mock = server
            .mock("GET", "/api/matches/live")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let api = SportsApi::with_bases(server.url(), server.url(), server.url());
        let matches = api.fetch_matches(MatchListKind::Live, false).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "m1");
        assert_eq!(matches[0].sources[0].provider, "alpha");
    }

    #[tokio::test]
    async fn fetch_streams_resolves_a_source_ref() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"[{
            "id": "42",
            "streamNo": 1,
            "source": "alpha",
            "hd": true,
            "embedUrl": "https://example.test/embed/42",
            "viewers": 1500
        }]"#;
        let _mock = server
            .mock("GET", "/api/stream/alpha/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let api = SportsApi::with_bases(server.url(), server.url(), server.url());
        let source = SourceRef { provider: "alpha".into(), id: "42".into() };
        let streams = api.fetch_streams(&source).await.unwrap();
        assert_eq!(streams.len(), 1);
        assert!(streams[0].hd);
        assert_eq!(streams[0].viewers, 1500);
        assert_eq!(streams[0].embed_url, "https://example.test/embed/42");
    }

    #[tokio::test]
    async fn client_errors_degrade_to_empty_payload() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/matches/all")
            .with_status(404)
            .create_async()
            .await;

        let api = SportsApi::with_bases(server.url(), server.url(), server.url());
        let matches = api.fetch_matches(MatchListKind::All, false).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn fetch_standings_reads_first_group() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{
            "children": [{
                "standings": {
                    "entries": [
                        {"team": {"displayName": "Arsenal"},
                         "stats": [{"name": "points", "value": 65.0}]},
                        {"team": {"displayName": "Chelsea"},
                         "stats": [{"name": "points", "value": 58.0}]}
                    ]
                }
            }]
        }"#;
        let _mock = server
            .mock("GET", "/eng.1/standings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let api = SportsApi::with_bases(server.url(), server.url(), server.url());
        let rows = api.fetch_standings(LEAGUES[0]).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].team, "Arsenal");
        assert_eq!(rows[1].points, 58);
    }
}
