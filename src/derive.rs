use crate::classify::{MatchStatus, classify_status, compute_winners};
use crate::format;
use chrono::{DateTime, Utc};
use log::debug;
use sports_api::MatchRecord;

/// A [`MatchRecord`] enriched with everything the views need: lifecycle
/// status, winner flags and preformatted display labels.
#[derive(Debug, Clone, Default)]
pub struct DerivedMatch {
    pub record: MatchRecord,
    pub status: MatchStatus,
    pub home_winner: Option<bool>,
    pub away_winner: Option<bool>,
    /// `record.start_time`, unwrapped; derivation skips records without one.
    pub start_time: DateTime<Utc>,
    pub viewer_label: String,
    pub time_label: String,
}

/// Derive a display batch from raw records.
///
/// Records missing an id or start time are logged and skipped; everything
/// else always produces an entry, so this never fails. Batch order is kept.
pub fn derive(records: Vec<MatchRecord>, now: DateTime<Utc>) -> Vec<DerivedMatch> {
    let mut derived = Vec::with_capacity(records.len());
    for record in records {
        if !record.is_well_formed() {
            let missing = if record.id.is_empty() { "id" } else { "start time" };
            debug!("skipping record without {missing}: {:?}", record.title);
            continue;
        }
        // is_well_formed guarantees the start time.
        let Some(start_time) = record.start_time else { continue };

        let status = classify_status(&record.status, start_time, now);
        let (home_winner, away_winner) =
            compute_winners(record.home.score.as_deref(), record.away.score.as_deref());
        derived.push(DerivedMatch {
            status,
            home_winner,
            away_winner,
            start_time,
            viewer_label: format::viewer_count_label(record.viewer_count),
            time_label: format::time_label(start_time),
            record,
        });
    }
    derived
}
