use crate::{
    aggregate::extract_executive_summary,
    types::{EvaluationRecord, FeedbackDocument, RubricDimension},
};

pub const UNTITLED_VIDEO: &str = "Untitled Video";
pub const UNKNOWN_CHANNEL: &str = "Unknown";
pub const NO_FEEDBACK_SELECTED: &str = "No feedback selected.";

/// Bar fill as a percentage of 100, clamped to 0..=100.
pub fn bar_percent(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Number of filled cells for a bar `width` cells wide
pub fn bar_cells(score: f64, width: usize) -> usize {
    ((bar_percent(score) / 100.0) * width as f64).round() as usize
}

pub fn channel_label(record: &EvaluationRecord) -> &str {
    record
        .channel()
        .filter(|channel| !channel.is_empty())
        .unwrap_or(UNKNOWN_CHANNEL)
}

/// Format a score without a trailing `.0` for whole numbers
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

pub fn overall_label(record: &EvaluationRecord) -> String {
    format!("{}/100", format_score(record.overall()))
}

/// One `(dimension, percent)` pair per rubric dimension, in display order.
pub fn dimension_bars(record: &EvaluationRecord) -> Vec<(RubricDimension, f64)> {
    RubricDimension::ALL
        .iter()
        .map(|&dimension| (dimension, bar_percent(record.score(dimension))))
        .collect()
}

/// Markdown shown in the feedback panel
pub fn summary_markdown(feedback: &FeedbackDocument) -> String {
    format!(
        "### Executive Summary\n\n{}",
        extract_executive_summary(&feedback.feedback)
    )
}
