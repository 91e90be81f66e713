use super::types::{RoundedWinRate, WinRate};

/// Percentage of wins out of `total`, 0 when there is nothing to divide by
pub fn win_rate(wins: usize, total: usize) -> WinRate {
    if total == 0 {
        return 0.0;
    }
    (wins as f64 / total as f64) * 100.0
}

/// `win_rate` rounded half-up to a whole percent
pub fn rounded_win_rate(wins: usize, total: usize) -> RoundedWinRate {
    round_half_up(win_rate(wins, total))
}

fn round_half_up(value: WinRate) -> RoundedWinRate {
    // rates are never negative, so floor(x + 0.5) is half-up
    (value + 0.5).floor() as RoundedWinRate
}
