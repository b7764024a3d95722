//! Clipgrade Core Library
//!
//! Client for a video analysis service: submit a video link, list stored
//! evaluations, fetch feedback reports, and keep the dashboard view state.

pub mod aggregate;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod state;
pub mod types;

// Re-export commonly used items at crate root
pub use aggregate::{
    NO_SUMMARY_FOUND, VideoGroup, extract_executive_summary, extract_section, group_by_video,
    section_headings,
};
pub use client::{AnalysisApi, ServiceClient};
pub use config::{Config, DEFAULT_BASE_URL};
pub use dashboard::Dashboard;
pub use error::{ClientError, ConfigError, Result};
pub use state::{DashboardState, Phase, Tab, TabState};
pub use types::{EvaluationRecord, FeedbackDocument, RubricDimension, VideoMetadata};
