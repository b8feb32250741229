use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

/// Compact viewer count: 850 → "850", 12_345 → "12.3K".
pub fn viewer_count_label(count: u64) -> String {
    if count >= 1000 {
        format!("{:.1}K", count as f64 / 1000.0)
    } else {
        count.to_string()
    }
}

/// Kick-off time in the viewer's local clock, 24h.
pub fn time_label(start: DateTime<Utc>) -> String {
    start.with_timezone(&Local).format("%H:%M").to_string()
}

/// Relative day label: Today / Tomorrow / Yesterday, otherwise "Sat, Mar 7".
pub fn date_label(start: DateTime<Utc>, today: NaiveDate) -> String {
    let date = start.with_timezone(&Local).date_naive();
    match (date - today).num_days() {
        0 => "Today".to_owned(),
        1 => "Tomorrow".to_owned(),
        -1 => "Yesterday".to_owned(),
        _ => format!("{}, {} {}", date.format("%a"), date.format("%b"), date.day()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn small_viewer_counts_stay_plain() {
        assert_eq!(viewer_count_label(0), "0");
        assert_eq!(viewer_count_label(999), "999");
    }

    #[test]
    fn thousands_abbreviate_with_one_decimal() {
        assert_eq!(viewer_count_label(1000), "1.0K");
        assert_eq!(viewer_count_label(12_345), "12.3K");
    }

    #[test]
    fn date_label_names_nearby_days() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let noon = |d: u32| {
            Local
                .with_ymd_and_hms(2026, 3, d, 12, 0, 0)
                .unwrap()
                .with_timezone(&Utc)
        };
        assert_eq!(date_label(noon(7), today), "Today");
        assert_eq!(date_label(noon(8), today), "Tomorrow");
        assert_eq!(date_label(noon(6), today), "Yesterday");
        assert_eq!(date_label(noon(14), today), "Sat, Mar 14");
    }
}
