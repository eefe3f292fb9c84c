use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::visualization::VisualizationPayload;

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Tutor,
    System,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Tutor => "Tutor",
            Role::System => "System",
        }
    }
}

/// A single transcript entry. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Only ever set on tutor replies
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub visualization: Option<VisualizationPayload>,
}

impl Message {
    fn new(role: Role, content: String, visualization: Option<VisualizationPayload>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content,
            created_at: Utc::now(),
            visualization,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), None)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text.into(), None)
    }

    pub fn tutor(text: impl Into<String>) -> Self {
        Self::new(Role::Tutor, text.into(), None)
    }

    /// A tutor reply after extraction, optionally carrying a chart.
    pub fn tutor_reply(
        narrative: impl Into<String>,
        visualization: Option<VisualizationPayload>,
    ) -> Self {
        Self::new(Role::Tutor, narrative.into(), visualization)
    }

    pub fn has_visualization(&self) -> bool {
        self.visualization.is_some()
    }
}
