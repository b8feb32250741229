use anyhow::{Result, bail};
use chrono::{Local, NaiveDate, Utc};
use sports_api::client::{MatchListKind, SportsApi, date_window};
use sports_api::{LEAGUES, League};
use streamhub::derive::{DerivedMatch, derive};
use streamhub::favorites::{FavoritesStore, FileStore};
use streamhub::filter::{FilterCriteria, SortOrder, filter_and_sort};
use streamhub::format;
use streamhub::group::{category_key, group_by_category};

#[derive(Debug, Default)]
struct MatchesCmd {
    kind: MatchListKind,
    popular: bool,
    criteria: FilterCriteria,
}

#[derive(Debug)]
enum Command {
    Matches(MatchesCmd),
    Scores { date: Option<NaiveDate> },
    Standings(League),
    News(League),
    Streams(String),
    Sports,
    Favorite(String),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if handle_cli_args(&args) {
        return Ok(());
    }
    let command = match parse_command(args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    let api = SportsApi::new();
    match command {
        Command::Matches(cmd) => run_matches(&api, cmd).await,
        Command::Scores { date } => run_scores(&api, date).await,
        Command::Standings(league) => run_standings(&api, league).await,
        Command::News(league) => run_news(&api, league).await,
        Command::Streams(id) => run_streams(&api, &id).await,
        Command::Sports => run_sports(&api).await,
        Command::Favorite(team) => run_favorite(&team),
    }
}

fn handle_cli_args(args: &[String]) -> bool {
    match args.first().map(String::as_str) {
        Some("-h" | "--help") => {
            println!("{}", usage_text());
            true
        }
        Some("-V" | "--version") => {
            println!("streamhub {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => false,
    }
}

fn usage_text() -> &'static str {
    "streamhub - sports match portal for the terminal

Usage:
  streamhub [live|today|all] [--popular] [--category KEY] [--search TEXT]
            [--favorites] [--desc]
  streamhub scores [--date YYYY-MM-DD]
  streamhub standings LEAGUE
  streamhub news LEAGUE
  streamhub streams MATCH_ID
  streamhub sports
  streamhub favorite TEAM
  streamhub --help | --version

LEAGUE is one of: epl, laliga, seriea, bundesliga, ligue1

Environment:
  STREAMHUB_FAVORITES_PATH   Path to the favorites file
  RUST_LOG                   Log filter (e.g. streamhub=debug)"
}

fn parse_command(args: Vec<String>) -> Result<Command, String> {
    let mut args = args.into_iter();
    let Some(first) = args.next() else {
        return Ok(Command::Matches(MatchesCmd::default()));
    };

    match first.as_str() {
        "scores" => {
            let mut date = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--date" => {
                        let value = args.next().ok_or("--date needs a value")?;
                        date = Some(
                            NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                                .map_err(|_| format!("Invalid date: {value}"))?,
                        );
                    }
                    other => return Err(format!("Unknown argument: {other}")),
                }
            }
            Ok(Command::Scores { date })
        }
        "standings" => Ok(Command::Standings(league_arg(args.next())?)),
        "news" => Ok(Command::News(league_arg(args.next())?)),
        "streams" => {
            let id = args.next().ok_or("streams needs a match id")?;
            Ok(Command::Streams(id))
        }
        "sports" => Ok(Command::Sports),
        "favorite" => {
            // Multi-word team names work unquoted.
            let team = args.collect::<Vec<_>>().join(" ");
            if team.is_empty() {
                return Err("favorite needs a team name".into());
            }
            Ok(Command::Favorite(team))
        }
        other => {
            if let Some(kind) = MatchListKind::parse(other) {
                parse_match_flags(kind, args)
            } else if other.starts_with('-') {
                // Flags without a list kind mean the default live view.
                parse_match_flags(
                    MatchListKind::Live,
                    std::iter::once(first).chain(args),
                )
            } else {
                Err(format!("Unknown command: {other}"))
            }
        }
    }
}

fn parse_match_flags(
    kind: MatchListKind,
    mut args: impl Iterator<Item = String>,
) -> Result<Command, String> {
    let mut cmd = MatchesCmd { kind, ..Default::default() };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--popular" => cmd.popular = true,
            "--desc" => cmd.criteria.sort = SortOrder::Descending,
            "--favorites" => cmd.criteria.restrict_to_favorites = true,
            "--search" => {
                cmd.criteria.search = args.next().ok_or("--search needs a value")?;
            }
            "--category" => {
                let value = args.next().ok_or("--category needs a value")?;
                let key = category_key(&value);
                if key == "other" && !value.eq_ignore_ascii_case("other") {
                    return Err(format!("Unknown category: {value}"));
                }
                cmd.criteria.category = key.to_owned();
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(Command::Matches(cmd))
}

fn league_arg(value: Option<String>) -> Result<League, String> {
    let Some(value) = value else {
        return Err("Missing league argument".into());
    };
    let lowered = value.to_lowercase();
    LEAGUES
        .iter()
        .copied()
        .find(|l| l.keyword == lowered || l.slug == lowered)
        .ok_or_else(|| format!("Unknown league: {value}"))
}

async fn run_matches(api: &SportsApi, mut cmd: MatchesCmd) -> Result<()> {
    if cmd.criteria.restrict_to_favorites
        && let Some(path) = FileStore::default_path()
    {
        cmd.criteria.favorite_teams = FileStore::new(path).load().into_iter().collect();
    }

    let records = api.fetch_matches(cmd.kind, cmd.popular).await?;
    let derived = derive(records, Utc::now());
    let filtered: Vec<DerivedMatch> =
        filter_and_sort(&derived, &cmd.criteria).into_iter().cloned().collect();

    if filtered.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    for group in group_by_category(&filtered) {
        println!("{} {} ({})", group.category.icon, group.category.name, group.matches.len());
        for m in group.matches {
            print_match_line(m, today);
        }
        println!();
    }
    Ok(())
}

fn print_match_line(m: &DerivedMatch, today: NaiveDate) {
    let viewers = if m.record.viewer_count > 0 {
        format!("  {} watching", m.viewer_label)
    } else {
        String::new()
    };
    println!(
        "  [{:<13}] {} {}  {}{}",
        m.status.label(),
        format::date_label(m.start_time, today),
        m.time_label,
        m.record.title,
        viewers,
    );
}

async fn run_scores(api: &SportsApi, date: Option<NaiveDate>) -> Result<()> {
    // Without an explicit date, show last week plus the next few days.
    let dates = match date {
        Some(date) => vec![date],
        None => date_window(Utc::now().date_naive(), 7, 3),
    };
    let records = api.fetch_all_leagues(&dates).await;
    let derived = derive(records, Utc::now());
    if derived.is_empty() {
        println!("No fixtures.");
        return Ok(());
    }

    let mut current_league = String::new();
    for m in &derived {
        let league = m.record.league.clone().unwrap_or_default();
        if league != current_league {
            println!("\n{league}");
            current_league = league;
        }
        let side = |name: &str, winner: Option<bool>| {
            if winner == Some(true) { format!("{name} *") } else { name.to_owned() }
        };
        println!(
            "  {} {} - {} {}  [{}]",
            side(&m.record.home.name, m.home_winner),
            m.record.home.score.as_deref().unwrap_or("-"),
            m.record.away.score.as_deref().unwrap_or("-"),
            side(&m.record.away.name, m.away_winner),
            if m.record.status.detail.is_empty() {
                m.status.label()
            } else {
                m.record.status.detail.as_str()
            },
        );
    }
    Ok(())
}

async fn run_standings(api: &SportsApi, league: League) -> Result<()> {
    let rows = api.fetch_standings(league).await?;
    if rows.is_empty() {
        bail!("no standings available for {}", league.name);
    }

    println!("{} table\n", league.name);
    println!(
        "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for row in rows {
        println!(
            "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}",
            row.rank,
            row.team,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            row.goal_diff,
            row.points,
        );
    }
    Ok(())
}

async fn run_news(api: &SportsApi, league: League) -> Result<()> {
    let articles = api.fetch_news(league).await?;
    if articles.is_empty() {
        bail!("no news available for {}", league.name);
    }

    for article in articles {
        let published = article
            .published
            .map(|p| p.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("{}  {}", published, article.headline);
        if !article.description.is_empty() {
            println!("  {}", article.description);
        }
        if !article.link.is_empty() {
            println!("  {}", article.link);
        }
        println!();
    }
    Ok(())
}

async fn run_streams(api: &SportsApi, id: &str) -> Result<()> {
    let records = api.fetch_matches(MatchListKind::All, false).await?;
    let Some(record) = records.into_iter().find(|r| r.id == id) else {
        bail!("no match with id {id}");
    };

    println!("{}", record.title);
    let streams = api.fetch_match_streams(&record).await;
    if streams.is_empty() {
        bail!("no streams available for {id}");
    }
    for stream in streams {
        println!(
            "  {} #{}{}  {} watching  {}",
            stream.provider,
            stream.stream_no,
            if stream.hd { " [HD]" } else { "" },
            format::viewer_count_label(stream.viewers),
            stream.embed_url,
        );
    }
    Ok(())
}

async fn run_sports(api: &SportsApi) -> Result<()> {
    for sport in api.fetch_sports().await? {
        println!("{:<20} {}", sport.id, sport.name);
    }
    Ok(())
}

fn run_favorite(team: &str) -> Result<()> {
    let Some(path) = FileStore::default_path() else {
        bail!("no usable config directory; set STREAMHUB_FAVORITES_PATH");
    };
    let store = FileStore::new(path);
    if store.toggle(team)? {
        println!("Added favorite: {team}");
    } else {
        println!("Removed favorite: {team}");
    }
    Ok(())
}
