//! Model catalog with partial-match resolution
//!
//! The model selector and the `--model` flag both accept partial names;
//! resolution is case-insensitive, prefers an exact match, and refuses
//! ambiguous fragments.

use crate::{ParleyError, Result};

/// The models the endpoint is expected to serve.
pub const DEFAULT_MODELS: &[&str] = &[
    "dans-personalityengine",
    "llama-3.2-3b-instruct",
    "mistral-7b-instruct",
    "phi-3.5-mini-instruct",
    "qwen2.5-7b-instruct",
];

/// Ordered list of selectable model names.
#[derive(Clone, Debug)]
pub struct ModelCatalog {
    models: Vec<String>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_MODELS.iter().map(|m| m.to_string()))
    }
}

impl ModelCatalog {
    pub fn new(models: impl IntoIterator<Item = String>) -> Self {
        Self {
            models: models.into_iter().collect(),
        }
    }

    /// All model names, in selector order.
    pub fn names(&self) -> &[String] {
        &self.models
    }

    /// Resolve a possibly-partial model name.
    ///
    /// An exact (case-insensitive) match wins; otherwise a unique substring
    /// match wins. No match or an ambiguous fragment is an error naming the
    /// candidates.
    pub fn resolve(&self, query: &str) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ParleyError::UnknownModel(format!(
                "empty model name (available: {})",
                self.models.join(", ")
            )));
        }

        let lowered = query.to_lowercase();

        if let Some(exact) = self
            .models
            .iter()
            .find(|m| m.to_lowercase() == lowered)
        {
            return Ok(exact.clone());
        }

        let matches: Vec<&String> = self
            .models
            .iter()
            .filter(|m| m.to_lowercase().contains(&lowered))
            .collect();

        match matches.as_slice() {
            [single] => Ok((*single).clone()),
            [] => Err(ParleyError::UnknownModel(format!(
                "'{query}' (available: {})",
                self.models.join(", ")
            ))),
            many => Err(ParleyError::UnknownModel(format!(
                "'{query}' is ambiguous (matches: {})",
                many.iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let catalog = ModelCatalog::default();
        assert_eq!(
            catalog.resolve("mistral-7b-instruct").unwrap(),
            "mistral-7b-instruct"
        );
    }

    #[test]
    fn test_partial_match() {
        let catalog = ModelCatalog::default();
        assert_eq!(catalog.resolve("dans").unwrap(), "dans-personalityengine");
        assert_eq!(catalog.resolve("PHI").unwrap(), "phi-3.5-mini-instruct");
    }

    #[test]
    fn test_ambiguous_match() {
        let catalog = ModelCatalog::new(vec![
            "llama-3b".to_string(),
            "llama-8b".to_string(),
        ]);
        let err = catalog.resolve("llama").unwrap_err();
        assert!(matches!(err, ParleyError::UnknownModel(_)));
        assert!(err.to_string().contains("ambiguous"));
    }

    #[test]
    fn test_no_match() {
        let catalog = ModelCatalog::default();
        assert!(catalog.resolve("gpt-99").is_err());
        assert!(catalog.resolve("").is_err());
    }

    #[test]
    fn test_exact_beats_substring() {
        let catalog = ModelCatalog::new(vec![
            "mistral".to_string(),
            "mistral-large".to_string(),
        ]);
        assert_eq!(catalog.resolve("mistral").unwrap(), "mistral");
    }
}
