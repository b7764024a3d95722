//! Client-side views over fetched data: grouping evaluations per video and
//! pulling labeled sections out of a feedback report.
//!
//! Section extraction is a compatibility shim over the service's prose format.
//! A renamed heading yields the fallback text rather than an error.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;

use crate::{format::UNTITLED_VIDEO, types::EvaluationRecord};

pub const EXECUTIVE_SUMMARY_HEADING: &str = "1. Executive Summary";
pub const NO_SUMMARY_FOUND: &str = "No summary found.";

static EXECUTIVE_SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| section_pattern(EXECUTIVE_SUMMARY_HEADING));

static HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*([^*\n]+?):?\*\*[ \t]*\r?$").expect("heading pattern is valid")
});

/// Evaluations sharing one video key, in the order they were received.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoGroup<'a> {
    pub key: &'a str,
    pub records: Vec<&'a EvaluationRecord>,
}

impl<'a> VideoGroup<'a> {
    /// Title of the first record in the group
    pub fn title(&self) -> &'a str {
        self.records
            .first()
            .and_then(|record| record.title())
            .filter(|title| !title.is_empty())
            .unwrap_or(UNTITLED_VIDEO)
    }
}

/// Partition records by `youtube_url`.
///
/// Groups come out in order of each key's first appearance; records keep their
/// relative order within a group.
pub fn group_by_video(records: &[EvaluationRecord]) -> Vec<VideoGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<VideoGroup<'_>> = Vec::new();

    for record in records {
        let key = record.youtube_url.as_str();
        match index.get(key) {
            Some(&i) => groups[i].records.push(record),
            None => {
                index.insert(key, groups.len());
                groups.push(VideoGroup {
                    key,
                    records: vec![record],
                });
            }
        }
    }

    groups
}

fn section_pattern(heading: &str) -> Regex {
    let pattern = format!(r"\*\*{}:\*\*\n((?s:.*?))(?:\n\*\*|\z)", regex::escape(heading));
    Regex::new(&pattern).expect("escaped heading always forms a valid pattern")
}

fn capture_section(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str().trim().to_string())
}

/// Text under `**1. Executive Summary:**`, or [`NO_SUMMARY_FOUND`].
pub fn extract_executive_summary(text: &str) -> String {
    capture_section(&EXECUTIVE_SUMMARY, text).unwrap_or_else(|| NO_SUMMARY_FOUND.to_string())
}

/// Text under a `**<heading>:**` line up to the next bold line or end of text.
pub fn extract_section(text: &str, heading: &str) -> Option<String> {
    capture_section(&section_pattern(heading), text)
}

/// Bold headings that occupy a whole line, trailing colon removed.
pub fn section_headings(text: &str) -> Vec<String> {
    HEADING_LINE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|heading| heading.as_str().trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::types::VideoMetadata;

    fn record(key: &str, content: f64) -> EvaluationRecord {
        EvaluationRecord {
            youtube_url: key.to_string(),
            scores: HashMap::from([("content".to_string(), content)]),
            ..Default::default()
        }
    }

    const REPORT: &str = "**1. Executive Summary:**\n  The speaker explains ownership clearly.\nPacing is good.  \n**2. Strengths:**\n- Clear examples\n";

    #[test]
    fn groups_by_key_in_first_seen_order() {
        let records = vec![record("v1", 80.0), record("v1", 60.0), record("v2", 90.0)];
        let groups = group_by_video(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "v1");
        assert_eq!(groups[0].records, vec![&records[0], &records[1]]);
        assert_eq!(groups[1].key, "v2");
        assert_eq!(groups[1].records, vec![&records[2]]);
    }

    #[test]
    fn grouping_keeps_every_record_once_and_intra_group_order() {
        let keys = ["a", "b", "a", "c", "b", "a"];
        let records: Vec<_> = keys
            .iter()
            .enumerate()
            .map(|(i, k)| record(k, i as f64))
            .collect();

        let groups = group_by_video(&records);
        let total: usize = groups.iter().map(|g| g.records.len()).sum();
        assert_eq!(total, records.len());

        for group in &groups {
            assert!(group.records.iter().all(|r| r.youtube_url == group.key));
            let order: Vec<f64> = group.records.iter().map(|r| r.scores["content"]).collect();
            let mut sorted = order.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(order, sorted);
        }
        assert_eq!(
            groups.iter().map(|g| g.key).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn empty_list_has_no_groups() {
        assert!(group_by_video(&[]).is_empty());
    }

    #[test]
    fn group_title_falls_back_when_missing_or_empty() {
        let mut titled = record("v1", 1.0);
        titled.metadata = Some(VideoMetadata {
            title: Some("Intro to Rust".into()),
            channel: None,
        });
        let mut blank = record("v2", 1.0);
        blank.metadata = Some(VideoMetadata {
            title: Some(String::new()),
            channel: None,
        });
        let records = vec![titled, blank, record("v3", 1.0)];
        let groups = group_by_video(&records);

        assert_eq!(groups[0].title(), "Intro to Rust");
        assert_eq!(groups[1].title(), UNTITLED_VIDEO);
        assert_eq!(groups[2].title(), UNTITLED_VIDEO);
    }

    #[test]
    fn extracts_interior_of_summary_section_trimmed() {
        assert_eq!(
            extract_executive_summary(REPORT),
            "The speaker explains ownership clearly.\nPacing is good."
        );
    }

    #[test]
    fn summary_runs_to_end_of_text_without_next_heading() {
        let text = "Intro\n**1. Executive Summary:**\nOnly section here.\n\n";
        assert_eq!(extract_executive_summary(text), "Only section here.");
    }

    #[test]
    fn missing_marker_yields_fallback() {
        assert_eq!(extract_executive_summary(""), NO_SUMMARY_FOUND);
        assert_eq!(
            extract_executive_summary("**Executive Summary:**\nrenamed heading"),
            NO_SUMMARY_FOUND
        );
    }

    #[test]
    fn extracts_arbitrary_sections() {
        assert_eq!(
            extract_section(REPORT, "2. Strengths").as_deref(),
            Some("- Clear examples")
        );
        assert_eq!(extract_section(REPORT, "3. Weaknesses"), None);
    }

    #[test]
    fn heading_with_regex_metacharacters_is_escaped() {
        let text = "**Tips (a+b)?:**\nuse fewer filler words\n";
        assert_eq!(
            extract_section(text, "Tips (a+b)?").as_deref(),
            Some("use fewer filler words")
        );
    }

    #[test]
    fn lists_whole_line_headings() {
        let text = format!("{REPORT}**3. Tips**\nspeak slower, **not** faster\n");
        assert_eq!(
            section_headings(&text),
            vec!["1. Executive Summary", "2. Strengths", "3. Tips"]
        );
    }
}
