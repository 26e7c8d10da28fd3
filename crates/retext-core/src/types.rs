use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub current_val: String,
    pub new_val: String,
}

impl Suggestion {
    pub fn new(current_val: impl Into<String>, new_val: impl Into<String>) -> Self {
        Self {
            current_val: current_val.into(),
            new_val: new_val.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub url: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub xpath: String,
    pub original_text: String,
    pub new_text: String,
    pub suggestion_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    pub url: String,
    pub document_digest: String,
    pub change_log: Vec<ChangeLogEntry>,
    pub unmatched: Vec<usize>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionOutcome {
    pub suggestion_index: usize,
    pub current_val: String,
    pub new_val: String,
    pub matched: bool,
    pub change_log: Vec<ChangeLogEntry>,
}

impl ChangeReport {
    pub fn entries_for(&self, suggestion_index: usize) -> impl Iterator<Item = &ChangeLogEntry> {
        self.change_log
            .iter()
            .filter(move |entry| entry.suggestion_index == suggestion_index)
    }

    pub fn is_unmatched(&self, suggestion_index: usize) -> bool {
        self.unmatched.contains(&suggestion_index)
    }

    pub fn by_suggestion(&self, suggestions: &[Suggestion]) -> Vec<SuggestionOutcome> {
        suggestions
            .iter()
            .enumerate()
            .map(|(idx, suggestion)| SuggestionOutcome {
                suggestion_index: idx,
                current_val: suggestion.current_val.clone(),
                new_val: suggestion.new_val.clone(),
                matched: !self.is_unmatched(idx),
                change_log: self.entries_for(idx).cloned().collect(),
            })
            .collect()
    }
}
