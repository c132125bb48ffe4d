use super::{clamp_score, finite_or_zero, round_to};
use crate::types::index::SPARKLINE_LEN;
use crate::types::snapshot::HistoricalScore;

/// History points needed before a 7-day delta is reported.
pub const MIN_POINTS_DELTA_7D: usize = 2;
/// History points needed before a 30-day delta is reported. The window is
/// whatever the provider supplied, not a calendar lookback.
pub const MIN_POINTS_DELTA_30D: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub previous_score: f64,
    pub delta7d: f64,
    pub delta30d: f64,
    pub sparkline: [f64; SPARKLINE_LEN],
}

/// `history` is oldest first; `score` is the freshly computed index.
pub fn summarize(history: &[HistoricalScore], score: f64) -> HistorySummary {
    let previous_score = if history.len() >= MIN_POINTS_DELTA_7D {
        clamp_score(history[history.len() - 2].score)
    } else {
        score
    };

    let delta7d = if history.len() >= MIN_POINTS_DELTA_7D {
        round_to(score - previous_score, 1)
    } else {
        0.0
    };

    let delta30d = match history.first() {
        Some(oldest) if history.len() >= MIN_POINTS_DELTA_30D => {
            round_to(score - finite_or_zero(oldest.score), 1)
        }
        _ => 0.0,
    };

    HistorySummary {
        previous_score,
        delta7d,
        delta30d,
        sparkline: sparkline(history, score),
    }
}

/// Last seven points, left-padded with the earliest one kept.
pub fn sparkline(history: &[HistoricalScore], score: f64) -> [f64; SPARKLINE_LEN] {
    let recent = &history[history.len().saturating_sub(SPARKLINE_LEN)..];
    let fill = recent.first().map(|point| point.score).unwrap_or(score);
    let mut line = [fill; SPARKLINE_LEN];
    let offset = SPARKLINE_LEN - recent.len();
    for (slot, point) in line[offset..].iter_mut().zip(recent) {
        *slot = point.score;
    }
    line
}
