//! CSV Output
//!
//! One row per test followed by a `score` row:
//!
//! ```text
//! test,average_time_secs,description
//! tableCreation,0.012,"Creates a table, one cell at a time."
//! score,83.33,
//! ```

use crate::report::Report;
use lapbench_stats::Score;

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::from("test,average_time_secs,description\n");

    for result in &report.scores.results {
        output.push_str(&format!(
            "{},{},{}\n",
            escape(&result.test_name),
            result.average_time_secs,
            escape(&result.description)
        ));
    }

    let score = match report.scores.score {
        Score::Finite(v) => v.to_string(),
        Score::Undefined => String::new(),
    };
    output.push_str(&format!("score,{},\n", score));

    output
}

/// Quote a field when it contains a delimiter, quote or newline
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
