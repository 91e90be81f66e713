use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::Tournament;

use super::rates::rounded_win_rate;
use super::records::tournament_summary;
use super::types::TrendPoint;

/// One point per tournament in chronological order. The input slice is
/// left as given; ordering happens on a separate list of references.
pub fn win_rate_trend(tournaments: &[Tournament]) -> Vec<TrendPoint> {
    let mut chronological: Vec<&Tournament> = tournaments.iter().collect();
    chronological.sort_by_key(|t| parse_date(&t.date));

    chronological
        .into_iter()
        .map(|t| {
            let summary = tournament_summary(t);
            TrendPoint {
                date: t.date.clone(),
                win_rate: rounded_win_rate(
                    summary.match_wins,
                    summary.match_wins + summary.match_losses,
                ),
            }
        })
        .collect()
}

/// Accepts plain dates and full timestamps. Unparseable dates yield `None`,
/// which sorts ahead of every real date.
pub fn parse_date(date: &str) -> Option<NaiveDateTime> {
    let date = date.trim();

    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }

    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{games, match_of, tournament};

    #[test]
    fn test_trend_sorted_without_touching_input() {
        let tournaments = vec![
            tournament(
                "late",
                "2024-01-05",
                vec![match_of("Burn", "", games(&[false, true, false]))],
            ),
            tournament(
                "early",
                "2024-01-01",
                vec![match_of("Burn", "", games(&[true, true]))],
            ),
        ];
        let before: Vec<String> = tournaments.iter().map(|t| t.id.clone()).collect();

        let trend = win_rate_trend(&tournaments);

        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    date: "2024-01-01".to_string(),
                    win_rate: 100
                },
                TrendPoint {
                    date: "2024-01-05".to_string(),
                    win_rate: 0
                },
            ]
        );
        let after: Vec<String> = tournaments.iter().map(|t| t.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_trend_keeps_one_point_per_tournament() {
        let tournaments = vec![
            tournament("a", "2024-03-01", vec![match_of("Burn", "", games(&[true, true]))]),
            tournament("b", "2024-03-01", vec![]),
            tournament("c", "2024-02-01", vec![]),
        ];

        let trend = win_rate_trend(&tournaments);

        assert_eq!(trend.len(), 3);
        assert_eq!(trend[0].date, "2024-02-01");
        assert_eq!(trend[1].win_rate, 100);
        assert_eq!(trend[2].win_rate, 0);
        assert!(trend.windows(2).all(|w| parse_date(&w[0].date) <= parse_date(&w[1].date)));
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-01-01").is_some());
        assert!(parse_date("2024-01-01T10:00:00Z").is_some());
        assert!(parse_date("2024-01-01T10:00:00").is_some());
        assert!(parse_date("").is_none());
        assert!(parse_date("2024-01-01") < parse_date("2024-01-01T10:00:00Z"));
    }
}
