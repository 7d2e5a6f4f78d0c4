//! Comparison Chart
//!
//! Horizontal ASCII bar chart of the baseline scores with the current run's
//! score appended as a final `You` bar.

use crate::report::BaselineReference;
use lapbench_stats::{SCORE_DIGITS, Score, format_rounded};

/// Width of the longest bar in characters
const BAR_WIDTH: usize = 40;

/// Render baselines plus the current score as a bar chart.
///
/// Bars are scaled to the largest value shown. An undefined score gets no
/// bar and is labelled `undefined`.
pub fn render_comparison_chart(baselines: &[BaselineReference], score: Score) -> String {
    let mut rows: Vec<(&str, Option<f64>)> = baselines
        .iter()
        .map(|b| (b.label.as_str(), Some(b.reference_score)))
        .collect();
    rows.push(("You", score.value()));

    let max_value = rows
        .iter()
        .filter_map(|(_, v)| *v)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(3);

    let mut output = String::new();
    for (label, value) in rows {
        let (bar, text) = match value {
            Some(v) => {
                let len = if max_value > 0.0 && v > 0.0 {
                    ((v / max_value) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                ("#".repeat(len.min(BAR_WIDTH)), format_rounded(v, SCORE_DIGITS))
            }
            None => (String::new(), "undefined".to_string()),
        };

        output.push_str(&format!(
            "  {:<lw$} | {:<bw$} {}\n",
            label,
            bar,
            text,
            lw = label_width,
            bw = BAR_WIDTH
        ));
    }

    output
}
