use console::style;

use clipgrade_core::{
    DashboardState, Tab, VideoGroup,
    format::{
        NO_FEEDBACK_SELECTED, bar_cells, bar_percent, channel_label, dimension_bars, format_score,
        overall_label, summary_markdown,
    },
};

const BAR_WIDTH: usize = 24;
const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    style("─".repeat(RULE_WIDTH)).dim().to_string()
}

pub fn header() -> String {
    format!(
        "\n{}  {}\n",
        style("clipgrade").cyan().bold(),
        style("Video Submission Dashboard").dim()
    )
}

pub fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                style(format!("[ {} ]", tab.label()))
                    .black()
                    .on_cyan()
                    .bold()
                    .to_string()
            } else {
                style(format!("  {}  ", tab.label())).dim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Score bar like `████████░░░░ 42%`
pub fn score_bar(score: f64) -> String {
    let filled = bar_cells(score, BAR_WIDTH);
    format!(
        "{}{} {:>3}%",
        style("█".repeat(filled)).cyan(),
        style("░".repeat(BAR_WIDTH - filled)).dim(),
        format_score(bar_percent(score))
    )
}

fn render_group(group: &VideoGroup<'_>) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", style(format!("▶ {}", group.title())).bold()));

    for record in &group.records {
        output.push_str(&format!(
            "  {} {}   {} {}\n",
            style("Channel:").dim(),
            channel_label(record),
            style("Overall:").dim(),
            style(overall_label(record)).yellow().bold()
        ));
        for (dimension, percent) in dimension_bars(record) {
            output.push_str(&format!(
                "    {:<15} {}\n",
                dimension.label(),
                score_bar(percent)
            ));
        }
        output.push_str(&format!(
            "  {} {}\n\n",
            style("Watch:").dim(),
            style(group.key).underlined()
        ));
    }

    output
}

pub fn evaluations_view(state: &DashboardState) -> String {
    let groups = state.grouped();
    if groups.is_empty() {
        return format!("{}\n", style("No evaluations yet.").dim());
    }

    groups.iter().map(render_group).collect()
}

pub fn feedback_view(state: &DashboardState) -> String {
    let Some(feedback) = state.feedback() else {
        return format!("{}\n", style(NO_FEEDBACK_SELECTED).dim());
    };

    let mut output = String::new();
    output.push_str(&format!(
        "{} {}\n\n",
        style("Feedback for:").green().bold(),
        style(state.active_key().unwrap_or_default()).underlined()
    ));
    output.push_str(&markdown(&summary_markdown(feedback)));
    output
}

/// Full dashboard: header, tab bar and the active tab's view.
pub fn dashboard(state: &DashboardState) -> String {
    let active = state.tabs.active();
    let body = match active {
        Tab::Evaluations => evaluations_view(state),
        Tab::Feedback => feedback_view(state),
    };

    format!("{}{}\n{}\n\n{}", header(), tab_bar(active), rule(), body)
}

/// Minimal terminal styling for the markdown the service produces: headings,
/// bullet lists and `**bold**` spans.
pub fn markdown(text: &str) -> String {
    let mut output = String::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        let rendered = if let Some(heading) = trimmed.strip_prefix('#') {
            style(heading.trim_start_matches('#').trim())
                .cyan()
                .bold()
                .to_string()
        } else if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            format!("  • {}", inline_bold(item))
        } else {
            inline_bold(line)
        };
        output.push_str(&rendered);
        output.push('\n');
    }
    output
}

fn inline_bold(text: &str) -> String {
    let mut output = String::new();
    let mut parts = text.split("**");
    let mut bold = false;

    if let Some(first) = parts.next() {
        output.push_str(first);
    }
    for part in parts {
        bold = !bold;
        if bold {
            output.push_str(&style(part).bold().to_string());
        } else {
            output.push_str(part);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use clipgrade_core::{EvaluationRecord, FeedbackDocument, VideoMetadata};
    use console::strip_ansi_codes;

    use super::*;

    fn plain(s: &str) -> String {
        strip_ansi_codes(s).to_string()
    }

    fn sample_state() -> DashboardState {
        let mut state = DashboardState::default();
        state.apply_evaluations(vec![
            EvaluationRecord {
                youtube_url: "https://youtu.be/v1".into(),
                metadata: Some(VideoMetadata {
                    title: Some("Lifetimes".into()),
                    channel: Some("Ferris".into()),
                }),
                overall_score: Some(82.0),
                scores: HashMap::from([("content".into(), 80.0), ("tone".into(), 100.0)]),
            },
            EvaluationRecord {
                youtube_url: "https://youtu.be/v2".into(),
                ..Default::default()
            },
        ]);
        state
    }

    #[test]
    fn score_bar_fills_proportionally() {
        let bar = plain(&score_bar(50.0));
        assert_eq!(bar.matches('█').count(), BAR_WIDTH / 2);
        assert_eq!(bar.matches('░').count(), BAR_WIDTH / 2);
        assert!(bar.ends_with(" 50%"));

        let empty = plain(&score_bar(0.0));
        assert_eq!(empty.matches('█').count(), 0);
        assert!(empty.ends_with("  0%"));
    }

    #[test]
    fn evaluation_grid_shows_groups_and_fallbacks() {
        let out = plain(&evaluations_view(&sample_state()));

        assert!(out.contains("▶ Lifetimes"));
        assert!(out.contains("Channel: Ferris"));
        assert!(out.contains("82/100"));
        assert!(out.contains("▶ Untitled Video"));
        assert!(out.contains("Channel: Unknown"));
        assert!(out.contains("0/100"));
        assert!(out.contains("Structure flow"));
        assert!(out.contains("https://youtu.be/v2"));
    }

    #[test]
    fn empty_grid_says_so() {
        let out = plain(&evaluations_view(&DashboardState::default()));
        assert_eq!(out, "No evaluations yet.\n");
    }

    #[test]
    fn feedback_panel_placeholder_without_document() {
        let out = plain(&feedback_view(&DashboardState::default()));
        assert_eq!(out, "No feedback selected.\n");
    }

    #[test]
    fn feedback_panel_shows_active_key_and_summary() {
        let mut state = DashboardState::default();
        state.set_input("https://youtu.be/v1");
        state.begin_submit();
        state.finish_submit();
        state.apply_feedback(FeedbackDocument {
            youtube_url: None,
            feedback: "**1. Executive Summary:**\nStrong **opening**.\n- keep it up\n**2. Tips:**\nx"
                .into(),
        });

        let out = plain(&feedback_view(&state));
        assert!(out.contains("Feedback for: https://youtu.be/v1"));
        assert!(out.contains("Executive Summary\n"));
        assert!(out.contains("Strong opening."));
        assert!(out.contains("  • keep it up"));
        assert!(!out.contains("Tips"));
    }

    #[test]
    fn dashboard_draws_only_active_tab() {
        let mut state = sample_state();
        let evaluations = plain(&dashboard(&state));
        assert!(evaluations.contains("[ Evaluations ]"));
        assert!(evaluations.contains("Lifetimes"));
        assert!(!evaluations.contains("No feedback selected."));

        state.tabs.select(Tab::Feedback);
        let feedback = plain(&dashboard(&state));
        assert!(feedback.contains("[ Feedback & Tips ]"));
        assert!(feedback.contains("No feedback selected."));
        assert!(!feedback.contains("Lifetimes"));
    }
}
