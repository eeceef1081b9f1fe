use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Dictionary headword with its definitions and spelling variations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: Uuid,
    pub word: String,
    pub word_class: String,
    pub definitions: Vec<String>,
    pub variations: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request structure for creating a new word.
/// `definitions` and `variations` default to empty when omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWordRequest {
    pub word: String,
    pub word_class: String,
    #[serde(default)]
    pub definitions: Vec<String>,
    #[serde(default)]
    pub variations: Vec<String>,
}

/// Request structure for a partial word update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWordRequest {
    pub word: Option<String>,
    pub word_class: Option<String>,
    pub definitions: Option<Vec<String>>,
    pub variations: Option<Vec<String>>,
}

impl Word {
    pub fn new(request: CreateWordRequest) -> Self {
        let now = Utc::now();

        Word {
            id: Uuid::new_v4(),
            word: request.word,
            word_class: request.word_class,
            definitions: request.definitions,
            variations: request.variations,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the fields that are present and refresh `updated_at`
    pub fn apply(&mut self, update: UpdateWordRequest) {
        if let Some(word) = update.word {
            self.word = word;
        }

        if let Some(word_class) = update.word_class {
            self.word_class = word_class;
        }

        if let Some(definitions) = update.definitions {
            self.definitions = definitions;
        }

        if let Some(variations) = update.variations {
            self.variations = variations;
        }

        self.updated_at = Utc::now();
    }

    /// Case-insensitive match on the headword and its variations.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.word.to_lowercase().contains(&keyword)
            || self
                .variations
                .iter()
                .any(|variation| variation.to_lowercase().contains(&keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CreateWordRequest {
        CreateWordRequest {
            word: "bia".to_string(),
            word_class: "verb".to_string(),
            definitions: vec!["come".to_string()],
            variations: vec!["bịa".to_string()],
        }
    }

    #[test]
    fn test_create_word_request_deserialization() {
        let json = r#"{"word":"bia","wordClass":"verb","definitions":["come"],"variations":["bịa"]}"#;
        let request: CreateWordRequest = serde_json::from_str(json).expect("Failed to deserialize CreateWordRequest");

        assert_eq!(request.word, "bia");
        assert_eq!(request.word_class, "verb");
        assert_eq!(request.definitions, vec!["come"]);
        assert_eq!(request.variations, vec!["bịa"]);

        // Arrays are optional
        let json = r#"{"word":"nri","wordClass":"noun"}"#;
        let request: CreateWordRequest = serde_json::from_str(json).expect("Failed to deserialize CreateWordRequest");
        assert!(request.definitions.is_empty());
        assert!(request.variations.is_empty());
    }

    #[test]
    fn test_word_serialization_uses_camel_case() {
        let word = Word::new(sample_request());
        let value = serde_json::to_value(&word).expect("Failed to serialize word");

        assert_eq!(value["word"], "bia");
        assert_eq!(value["wordClass"], "verb");
        assert_eq!(value["definitions"][0], "come");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("word_class").is_none());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut word = Word::new(sample_request());
        let created_at = word.created_at;

        word.apply(UpdateWordRequest {
            definitions: Some(vec!["come".to_string(), "arrive".to_string()]),
            ..Default::default()
        });

        assert_eq!(word.word, "bia");
        assert_eq!(word.word_class, "verb");
        assert_eq!(word.definitions.len(), 2);
        assert_eq!(word.variations, vec!["bịa"]);
        assert_eq!(word.created_at, created_at);
        assert!(word.updated_at >= created_at);
    }

    #[test]
    fn test_matches_keyword() {
        let word = Word::new(sample_request());

        assert!(word.matches_keyword("BI"));
        assert!(word.matches_keyword("bịa"));
        assert!(!word.matches_keyword("come"));
    }
}
