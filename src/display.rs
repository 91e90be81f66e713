use colored::{ColoredString, Colorize};

use crate::stats::{StatsReport, WinRate};

/// Percent with one decimal, green at or above even, red below
pub fn colored_rate(rate: WinRate) -> ColoredString {
    let text = format!("{:.1}%", rate);
    if rate >= 50.0 {
        text.green()
    } else {
        text.red()
    }
}

pub fn render_report(report: &StatsReport) -> String {
    let mut lines = Vec::new();
    let overall = &report.overall;

    lines.push("Overall Record".bold().to_string());
    lines.push(format!(
        "  {}-{} matches, {}% win rate",
        overall.total_match_wins, overall.total_match_losses, overall.match_win_rate
    ));
    lines.push(format!(
        "  {}-{} games",
        overall.total_game_wins, overall.total_game_losses
    ));

    let pd = &report.play_draw;
    lines.push(String::new());
    lines.push("Play vs Draw".bold().to_string());
    lines.push(format!(
        "  On the play: {} ({}-{}, {} games)",
        colored_rate(pd.on_play_win_rate),
        pd.on_play_wins,
        pd.on_play_total - pd.on_play_wins,
        pd.on_play_total
    ));
    lines.push(format!(
        "  On the draw: {} ({}-{}, {} games)",
        colored_rate(pd.on_draw_win_rate),
        pd.on_draw_wins,
        pd.on_draw_total - pd.on_draw_wins,
        pd.on_draw_total
    ));

    lines.push(String::new());
    lines.push("Deck Performance".bold().to_string());
    if report.decks.is_empty() {
        lines.push("  No deck data available".to_string());
    }
    for deck in &report.decks {
        lines.push(format!(
            "  {:<24} {}-{}  {}",
            deck.deck_name,
            deck.match_wins,
            deck.match_losses,
            colored_rate(deck.win_rate)
        ));
    }

    lines.push(String::new());
    lines.push("Matchup Matrix".bold().to_string());
    if report.matchups.is_empty() {
        lines.push("  No matchup data available".to_string());
    }
    for matchup in &report.matchups {
        lines.push(format!(
            "  {:<24} {}-{}  {}",
            matchup.opponent_deck,
            matchup.wins,
            matchup.losses,
            colored_rate(matchup.win_rate)
        ));
    }

    lines.push(String::new());
    lines.push("Win Rate Trend".bold().to_string());
    for point in &report.trend {
        lines.push(format!("  {:<12} {:>3}%", point.date, point.win_rate));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{self, test_support};

    #[test]
    fn test_rate_has_one_decimal() {
        colored::control::set_override(false);
        assert_eq!(colored_rate(66.666).to_string(), "66.7%");
        assert_eq!(colored_rate(0.0).to_string(), "0.0%");
    }

    #[test]
    fn test_render_report_sections() {
        colored::control::set_override(false);
        let tournaments = vec![test_support::tournament(
            "t1",
            "2024-01-01",
            vec![test_support::match_of(
                "Burn",
                "Control",
                test_support::games(&[true, false, true]),
            )],
        )];

        let text = render_report(&stats::report(&tournaments));

        assert!(text.contains("1-0 matches, 100% win rate"));
        assert!(text.contains("On the play: 100.0% (2-0, 2 games)"));
        assert!(text.contains("Burn"));
        assert!(text.contains("Control"));
        assert!(text.contains("2024-01-01"));
    }

    #[test]
    fn test_render_empty_report() {
        colored::control::set_override(false);
        let text = render_report(&stats::report(&[]));
        assert!(text.contains("No matchup data available"));
        assert!(text.contains("0-0 matches, 0% win rate"));
    }
}
