use serde::Deserialize;
use tracing::info;

use crate::{
    aggregate::{VideoGroup, group_by_video},
    types::{EvaluationRecord, FeedbackDocument},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    IdleWithResult,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Evaluations,
    Feedback,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Evaluations, Tab::Feedback];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Evaluations => "Evaluations",
            Tab::Feedback => "Feedback & Tips",
        }
    }

    pub fn parse(name: &str) -> Option<Tab> {
        match name.trim().to_ascii_lowercase().as_str() {
            "evaluations" | "evals" | "e" => Some(Tab::Evaluations),
            "feedback" | "tips" | "f" => Some(Tab::Feedback),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TabState {
    active: Tab,
}

impl TabState {
    pub fn new(active: Tab) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn toggle(&mut self) {
        self.active = match self.active {
            Tab::Evaluations => Tab::Feedback,
            Tab::Feedback => Tab::Evaluations,
        };
    }
}

/// Everything the dashboard shows, for the lifetime of one session.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    input: String,
    evaluations: Vec<EvaluationRecord>,
    feedback: Option<FeedbackDocument>,
    busy: bool,
    active_key: Option<String>,
    phase: Phase,
    pub tabs: TabState,
}

impl DashboardState {
    pub fn new(default_tab: Tab) -> Self {
        Self {
            tabs: TabState::new(default_tab),
            ..Default::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn evaluations(&self) -> &[EvaluationRecord] {
        &self.evaluations
    }

    /// Recomputed on every call.
    pub fn grouped(&self) -> Vec<VideoGroup<'_>> {
        group_by_video(&self.evaluations)
    }

    pub fn feedback(&self) -> Option<&FeedbackDocument> {
        self.feedback.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Point the feedback panel at a key without going through a submit.
    pub fn set_active_key(&mut self, key: impl Into<String>) {
        self.active_key = Some(key.into());
    }

    /// Idle/IdleWithResult -> Submitting. The active key is taken from the
    /// input before any request goes out; returns the key to submit.
    pub fn begin_submit(&mut self) -> String {
        let key = self.input.clone();
        self.busy = true;
        self.active_key = Some(key.clone());
        self.phase = Phase::Submitting;
        info!(key = %key, "submit started");
        key
    }

    /// Submitting -> IdleWithResult, whether or not the submit succeeded.
    /// With overlapping submits the first to finish clears `busy` while later
    /// ones are still in flight.
    pub fn finish_submit(&mut self) {
        self.busy = false;
        self.phase = Phase::IdleWithResult;
        info!("submit finished");
    }

    pub fn apply_evaluations(&mut self, evaluations: Vec<EvaluationRecord>) {
        info!(count = evaluations.len(), "evaluations replaced");
        self.evaluations = evaluations;
    }

    pub fn apply_feedback(&mut self, feedback: FeedbackDocument) {
        info!("feedback replaced");
        self.feedback = Some(feedback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_submit_sets_busy_and_active_key_from_input() {
        let mut state = DashboardState::default();
        state.set_input("https://youtu.be/abc");

        let key = state.begin_submit();

        assert_eq!(key, "https://youtu.be/abc");
        assert!(state.is_busy());
        assert_eq!(state.active_key(), Some("https://youtu.be/abc"));
        assert_eq!(state.phase(), Phase::Submitting);
    }

    #[test]
    fn finish_submit_clears_busy() {
        let mut state = DashboardState::default();
        state.set_input("v1");
        state.begin_submit();
        state.finish_submit();

        assert!(!state.is_busy());
        assert_eq!(state.phase(), Phase::IdleWithResult);
        assert_eq!(state.active_key(), Some("v1"));
    }

    #[test]
    fn submit_is_reentrant_from_result_state() {
        let mut state = DashboardState::default();
        state.set_input("v1");
        state.begin_submit();
        state.finish_submit();

        state.set_input("v2");
        assert_eq!(state.begin_submit(), "v2");
        assert_eq!(state.phase(), Phase::Submitting);
        assert_eq!(state.active_key(), Some("v2"));
    }

    #[test]
    fn evaluations_and_feedback_are_replaced_wholesale() {
        let mut state = DashboardState::default();
        state.apply_evaluations(vec![EvaluationRecord {
            youtube_url: "old".into(),
            ..Default::default()
        }]);
        state.apply_evaluations(vec![EvaluationRecord {
            youtube_url: "new".into(),
            ..Default::default()
        }]);
        assert_eq!(state.evaluations().len(), 1);
        assert_eq!(state.grouped()[0].key, "new");

        assert!(state.feedback().is_none());
        state.apply_feedback(FeedbackDocument {
            youtube_url: None,
            feedback: "report".into(),
        });
        assert_eq!(state.feedback().map(|f| f.feedback.as_str()), Some("report"));
    }

    #[test]
    fn tabs_select_and_toggle() {
        let mut tabs = TabState::default();
        assert_eq!(tabs.active(), Tab::Evaluations);
        tabs.toggle();
        assert_eq!(tabs.active(), Tab::Feedback);
        tabs.select(Tab::Evaluations);
        assert_eq!(tabs.active(), Tab::Evaluations);
    }

    #[test]
    fn tab_names_parse_leniently() {
        assert_eq!(Tab::parse(" Feedback "), Some(Tab::Feedback));
        assert_eq!(Tab::parse("e"), Some(Tab::Evaluations));
        assert_eq!(Tab::parse("scores"), None);
    }
}
