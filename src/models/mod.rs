// Models module

pub mod example;
pub mod word;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export commonly used types
pub use example::{CreateExampleRequest, Example, UpdateExampleRequest};
pub use word::{CreateWordRequest, UpdateWordRequest, Word};

/// Query string accepted by the list endpoints.
/// Values are kept exactly as sent; `page` and `range` (`[x,y]`) are not parsed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    pub keyword: Option<String>,
    pub page: Option<String>,
    pub range: Option<String>,
}

impl ListQuery {
    /// Build from raw query pairs. A repeated key keeps its first value and
    /// unknown keys are dropped; nothing is rejected.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = ListQuery::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "keyword" => &mut query.keyword,
                "page" => &mut query.page,
                "range" => &mut query.range,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        query
    }

    /// Keyword filter, ignoring an empty `?keyword=`.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|keyword| !keyword.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.keyword.is_none() && self.page.is_none() && self.range.is_none()
    }
}

/// Body returned by the create endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}
