use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Example sentence pair linked to zero or more words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub id: Uuid,
    pub igbo: String,
    pub english: String,
    pub associated_words: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request structure for creating a new example
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExampleRequest {
    pub igbo: String,
    pub english: String,
    #[serde(default)]
    pub associated_words: Vec<String>,
}

/// Request structure for a partial example update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExampleRequest {
    pub igbo: Option<String>,
    pub english: Option<String>,
    pub associated_words: Option<Vec<String>>,
}

impl Example {
    pub fn new(request: CreateExampleRequest) -> Self {
        let now = Utc::now();

        Example {
            id: Uuid::new_v4(),
            igbo: request.igbo,
            english: request.english,
            associated_words: request.associated_words,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: UpdateExampleRequest) {
        if let Some(igbo) = update.igbo {
            self.igbo = igbo;
        }

        if let Some(english) = update.english {
            self.english = english;
        }

        if let Some(associated_words) = update.associated_words {
            self.associated_words = associated_words;
        }

        self.updated_at = Utc::now();
    }

    /// Case-insensitive match on either sentence.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.igbo.to_lowercase().contains(&keyword) || self.english.to_lowercase().contains(&keyword)
    }
}
