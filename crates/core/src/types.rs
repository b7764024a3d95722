use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The four fixed scoring categories, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RubricDimension {
    Content,
    Clarity,
    Tone,
    StructureFlow,
}

impl RubricDimension {
    pub const ALL: [RubricDimension; 4] = [
        RubricDimension::Content,
        RubricDimension::Clarity,
        RubricDimension::Tone,
        RubricDimension::StructureFlow,
    ];

    /// Key used by the analysis service in the `scores` map
    pub fn key(&self) -> &'static str {
        match self {
            RubricDimension::Content => "content",
            RubricDimension::Clarity => "clarity",
            RubricDimension::Tone => "tone",
            RubricDimension::StructureFlow => "structure_flow",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RubricDimension::Content => "Content",
            RubricDimension::Clarity => "Clarity",
            RubricDimension::Tone => "Tone",
            RubricDimension::StructureFlow => "Structure flow",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
}

/// A scored assessment of one submitted video, as stored by the service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub youtube_url: String,
    #[serde(default)]
    pub metadata: Option<VideoMetadata>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub scores: HashMap<String, f64>,
}

impl EvaluationRecord {
    pub fn title(&self) -> Option<&str> {
        self.metadata.as_ref()?.title.as_deref()
    }

    pub fn channel(&self) -> Option<&str> {
        self.metadata.as_ref()?.channel.as_deref()
    }

    /// Sub-score for a dimension; a missing dimension reads as 0.
    pub fn score(&self, dimension: RubricDimension) -> f64 {
        self.scores.get(dimension.key()).copied().unwrap_or(0.0)
    }

    pub fn overall(&self) -> f64 {
        self.overall_score.unwrap_or(0.0)
    }
}

/// Free-text report the service generated for a submitted video.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackDocument {
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeRequest<'a> {
    pub youtube_url: &'a str,
}
