use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::{
    client::AnalysisApi,
    state::{DashboardState, Tab},
};

/// Drives [`DashboardState`] through mount, submit and refresh using an
/// [`AnalysisApi`].
///
/// Clones share the same state. Flows never fail: request errors are logged
/// and the affected part of the state is left as it was.
#[derive(Clone)]
pub struct Dashboard {
    api: Arc<dyn AnalysisApi>,
    state: Arc<Mutex<DashboardState>>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn AnalysisApi>, default_tab: Tab) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(DashboardState::new(default_tab))),
        }
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    pub async fn set_input(&self, value: impl Into<String>) {
        self.state.lock().await.set_input(value);
    }

    pub async fn select_tab(&self, tab: Tab) {
        self.state.lock().await.tabs.select(tab);
    }

    pub async fn toggle_tab(&self) {
        self.state.lock().await.tabs.toggle();
    }

    /// Initial load: the evaluation list only, no key is active yet.
    pub async fn mount(&self) {
        self.fetch_evaluations().await;
    }

    /// Submit the current input, then re-fetch the evaluation list and the
    /// feedback for the submitted key.
    ///
    /// Overlapping calls are not cancelled; whichever fetch lands last wins.
    pub async fn submit(&self) {
        let key = self.state.lock().await.begin_submit();
        self.run_submit(key).await;
    }

    /// Set the input and submit it. Both happen under one lock so a concurrent
    /// call cannot swap the link before it is taken as the active key.
    pub async fn submit_url(&self, url: impl Into<String>) {
        let key = {
            let mut state = self.state.lock().await;
            state.set_input(url);
            state.begin_submit()
        };
        self.run_submit(key).await;
    }

    #[instrument(skip(self), fields(dispatch = %Uuid::new_v4()))]
    async fn run_submit(&self, key: String) {
        if let Err(e) = self.api.submit_for_analysis(&key).await {
            error!(key = %key, error = %e, "Analysis failed");
        }

        self.state.lock().await.finish_submit();

        tokio::join!(self.fetch_evaluations(), self.fetch_feedback(&key));
    }

    /// Re-fetch the list, and the feedback for the active key if there is one.
    pub async fn refresh(&self) {
        let active = self.state.lock().await.active_key().map(str::to_string);
        match active {
            Some(key) => {
                tokio::join!(self.fetch_evaluations(), self.fetch_feedback(&key));
            }
            None => self.fetch_evaluations().await,
        }
    }

    /// Fetch feedback for a key without submitting it. The key becomes active
    /// once the document arrives.
    pub async fn open_feedback(&self, key: &str) {
        match self.api.fetch_feedback(key).await {
            Ok(feedback) => {
                let mut state = self.state.lock().await;
                state.set_active_key(key);
                state.apply_feedback(feedback);
            }
            Err(e) => error!(key, error = %e, "Error fetching feedback"),
        }
    }

    async fn fetch_evaluations(&self) {
        match self.api.list_evaluations().await {
            Ok(evaluations) => self.state.lock().await.apply_evaluations(evaluations),
            Err(e) => error!(error = %e, "Error fetching evaluations"),
        }
    }

    async fn fetch_feedback(&self, key: &str) {
        match self.api.fetch_feedback(key).await {
            Ok(feedback) => self.state.lock().await.apply_feedback(feedback),
            Err(e) => error!(key, error = %e, "Error fetching feedback"),
        }
    }
}
