use chrono::{DateTime, Utc};
use sports_api::StatusInfo;

/// Lifecycle bucket of a match relative to "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStatus {
    Live,
    StartingSoon,
    Today,
    #[default]
    Upcoming,
    Finished,
}

impl MatchStatus {
    pub fn label(&self) -> &str {
        match self {
            MatchStatus::Live => "LIVE",
            MatchStatus::StartingSoon => "Starting soon",
            MatchStatus::Today => "Today",
            MatchStatus::Upcoming => "Upcoming",
            MatchStatus::Finished => "FT",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, MatchStatus::Live)
    }
}

/// Classify a match from its upstream status text and scheduled start.
///
/// Rules apply in order; the first hit wins. Status text is matched
/// case-insensitively by substring, so "Halftime" and "2nd Half" both read
/// as live and "FT"/"Full Time" as finished.
pub fn classify_status(
    status: &StatusInfo,
    start_time: DateTime<Utc>,
    now: DateTime<Utc>,
) -> MatchStatus {
    let state = status.state.to_lowercase();
    let detail = status.detail.to_lowercase();

    if state == "in" || detail.contains("live") || detail.contains("half") {
        return MatchStatus::Live;
    }
    if state == "post" || detail.contains("ft") || detail.contains("full") || status.completed {
        return MatchStatus::Finished;
    }
    if start_time.date_naive() == now.date_naive() && start_time > now {
        if (start_time - now).num_minutes() < 60 {
            return MatchStatus::StartingSoon;
        }
        return MatchStatus::Today;
    }
    MatchStatus::Upcoming
}

/// Winner flags for the two sides, from the upstream string scores.
///
/// Returns `(None, None)` unless both sides have a non-empty score. Scores
/// that do not parse count as 0. A draw is `(Some(false), Some(false))`;
/// at most one side is ever `Some(true)`.
pub fn compute_winners(
    home_score: Option<&str>,
    away_score: Option<&str>,
) -> (Option<bool>, Option<bool>) {
    let (home, away) = match (home_score, away_score) {
        (Some(h), Some(a)) if !h.is_empty() && !a.is_empty() => (h, a),
        _ => return (None, None),
    };

    let home: i64 = home.trim().parse().unwrap_or(0);
    let away: i64 = away.trim().parse().unwrap_or(0);
    if home > away {
        (Some(true), Some(false))
    } else if away > home {
        (Some(false), Some(true))
    } else {
        (Some(false), Some(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn status(state: &str, detail: &str, completed: bool) -> StatusInfo {
        StatusInfo { state: state.into(), detail: detail.into(), completed }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, h, m, 0).unwrap()
    }

    #[test]
    fn in_state_is_live() {
        let s = classify_status(&status("in", "32'", false), at(14, 0), at(14, 30));
        assert_eq!(s, MatchStatus::Live);
    }

    #[test]
    fn halftime_detail_is_live() {
        let s = classify_status(&status("", "Halftime", false), at(14, 0), at(14, 50));
        assert_eq!(s, MatchStatus::Live);
        assert!(s.is_live());
    }

    #[test]
    fn live_beats_finished_when_both_match() {
        // Rule order: a live signal wins even with the completed flag set.
        let s = classify_status(&status("in", "", true), at(14, 0), at(15, 0));
        assert_eq!(s, MatchStatus::Live);
    }

    #[test]
    fn full_time_is_finished() {
        assert_eq!(
            classify_status(&status("post", "FT", true), at(12, 0), at(15, 0)),
            MatchStatus::Finished
        );
        assert_eq!(
            classify_status(&status("", "Full Time", false), at(12, 0), at(15, 0)),
            MatchStatus::Finished
        );
    }

    #[test]
    fn completed_flag_alone_is_finished() {
        let s = classify_status(&status("", "", true), at(12, 0), at(15, 0));
        assert_eq!(s, MatchStatus::Finished);
    }

    #[test]
    fn under_an_hour_away_is_starting_soon() {
        let s = classify_status(&status("pre", "", false), at(15, 30), at(14, 45));
        assert_eq!(s, MatchStatus::StartingSoon);
    }

    #[test]
    fn later_same_day_is_today() {
        let s = classify_status(&status("pre", "", false), at(20, 0), at(10, 0));
        assert_eq!(s, MatchStatus::Today);
    }

    #[test]
    fn future_dates_and_past_unscored_are_upcoming() {
        let tomorrow = Utc.with_ymd_and_hms(2026, 3, 8, 15, 0, 0).unwrap();
        assert_eq!(
            classify_status(&status("pre", "", false), tomorrow, at(15, 0)),
            MatchStatus::Upcoming
        );
        // Started earlier today with no status text: no bucket matches.
        assert_eq!(
            classify_status(&status("", "", false), at(10, 0), at(12, 0)),
            MatchStatus::Upcoming
        );
    }

    #[test]
    fn winners_need_both_scores() {
        assert_eq!(compute_winners(None, None), (None, None));
        assert_eq!(compute_winners(Some("2"), None), (None, None));
        assert_eq!(compute_winners(Some(""), Some("1")), (None, None));
    }

    #[test]
    fn higher_score_wins() {
        assert_eq!(compute_winners(Some("2"), Some("1")), (Some(true), Some(false)));
        assert_eq!(compute_winners(Some("0"), Some("3")), (Some(false), Some(true)));
    }

    #[test]
    fn draw_marks_neither_side() {
        assert_eq!(compute_winners(Some("1"), Some("1")), (Some(false), Some(false)));
    }

    #[test]
    fn unparseable_scores_count_as_zero() {
        assert_eq!(compute_winners(Some("abandoned"), Some("2")), (Some(false), Some(true)));
        assert_eq!(compute_winners(Some("x"), Some("y")), (Some(false), Some(false)));
    }
}
