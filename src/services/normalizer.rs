//! Turns whatever JSON the completion service produced into a short list of movies.
//!
//! The reply is decoded as either a bare list or an object. Objects are searched
//! in a fixed order: `movies`, then `recommendations`, then the first value in
//! the document. If that value is not a list, the object itself is treated as
//! the only movie.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::message::Movie;

pub const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("completion was not a JSON object or list: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("completion contained no movies")]
    Empty,
    #[error("movie {index} is invalid: {source}")]
    InvalidMovie {
        index: usize,
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CompletionPayload {
    List(Vec<Value>),
    Object(Map<String, Value>),
}

impl CompletionPayload {
    pub fn parse(raw: &str) -> Result<Self, NormalizeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The candidate movie entries, before validation.
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            CompletionPayload::List(items) => items,
            CompletionPayload::Object(mut map) => {
                let key = ["movies", "recommendations"]
                    .into_iter()
                    .find(|k| map.contains_key(*k))
                    .map(str::to_string)
                    .or_else(|| map.keys().next().cloned());

                let Some(key) = key else {
                    return Vec::new();
                };
                let is_list = matches!(map.get(&key), Some(Value::Array(_)));
                if is_list {
                    if let Some(Value::Array(items)) = map.shift_remove(&key) {
                        return items;
                    }
                }
                vec![Value::Object(map)]
            }
        }
    }
}

pub fn normalize(raw: &str) -> Result<Vec<Movie>, NormalizeError> {
    let entries = CompletionPayload::parse(raw)?.into_entries();
    if entries.is_empty() {
        return Err(NormalizeError::Empty);
    }

    entries
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry)
                .map_err(|source| NormalizeError::InvalidMovie { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie_json(title: &str) -> Value {
        json!({"title": title, "description": "d", "reason": "r"})
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn movies_key_wins() {
        let raw = json!({
            "recommendations": [movie_json("B")],
            "movies": [movie_json("A")],
        })
        .to_string();
        assert_eq!(titles(&normalize(&raw).unwrap()), ["A"]);
    }

    #[test]
    fn falls_back_to_recommendations() {
        let raw = json!({"recommendations": [movie_json("Heat"), movie_json("Ronin")]}).to_string();
        assert_eq!(titles(&normalize(&raw).unwrap()), ["Heat", "Ronin"]);
    }

    #[test]
    fn falls_back_to_first_key_in_document_order() {
        let raw = r#"{"zz_picks": [{"title":"Alien","description":"d","reason":"r"}], "aa": 1}"#;
        assert_eq!(titles(&normalize(raw).unwrap()), ["Alien"]);
    }

    #[test]
    fn single_object_is_wrapped() {
        let raw = movie_json("Arrival").to_string();
        assert_eq!(titles(&normalize(&raw).unwrap()), ["Arrival"]);
    }

    #[test]
    fn non_list_movies_key_wraps_whole_object() {
        let raw = json!({"movies": "none", "title": "Up", "description": "d", "reason": "r"}).to_string();
        assert_eq!(titles(&normalize(&raw).unwrap()), ["Up"]);
    }

    #[test]
    fn bare_list_is_accepted() {
        let raw = json!([movie_json("Jaws")]).to_string();
        assert_eq!(titles(&normalize(&raw).unwrap()), ["Jaws"]);
    }

    #[test]
    fn truncates_to_five() {
        let list: Vec<Value> = (0..8).map(|i| movie_json(&format!("M{i}"))).collect();
        let raw = json!({"movies": list}).to_string();
        let movies = normalize(&raw).unwrap();
        assert_eq!(movies.len(), MAX_RECOMMENDATIONS);
        assert_eq!(movies[4].title, "M4");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let raw = json!({"movies": [{"title": "Heat", "description": "d", "reason": "r", "year": 1995}]})
            .to_string();
        assert_eq!(normalize(&raw).unwrap()[0], Movie::new("Heat", "d", "r"));
    }

    #[test]
    fn empty_results_are_errors() {
        assert!(matches!(normalize("{}"), Err(NormalizeError::Empty)));
        assert!(matches!(normalize(r#"{"movies": []}"#), Err(NormalizeError::Empty)));
        assert!(matches!(normalize("[]"), Err(NormalizeError::Empty)));
    }

    #[test]
    fn scalars_and_garbage_are_malformed() {
        assert!(matches!(normalize("42"), Err(NormalizeError::Malformed(_))));
        assert!(matches!(normalize("\"movies\""), Err(NormalizeError::Malformed(_))));
        assert!(matches!(normalize("not json"), Err(NormalizeError::Malformed(_))));
    }

    #[test]
    fn missing_field_reports_index() {
        let raw = json!({"movies": [movie_json("Ok"), {"title": "No reason", "description": "d"}]})
            .to_string();
        match normalize(&raw) {
            Err(NormalizeError::InvalidMovie { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn invalid_entry_past_limit_is_not_checked() {
        let mut list: Vec<Value> = (0..5).map(|i| movie_json(&format!("M{i}"))).collect();
        list.push(json!("garbage"));
        let raw = json!({"movies": list}).to_string();
        assert_eq!(normalize(&raw).unwrap().len(), 5);
    }
}
