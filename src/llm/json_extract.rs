// ABOUTME: Extraction of a JSON object embedded in free-form model text
// ABOUTME: Reports "not found" and "invalid" as result variants, never as errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # JSON Extraction
//!
//! Models asked for "JSON only" still wrap answers in prose or code fences.
//! [`extract_json`] scans for balanced top-level `{...}` blocks (string and
//! escape aware) and returns the first one that deserializes into the target
//! type. Parse failure is a normal outcome here; callers decide the fallback.

use serde::de::DeserializeOwned;

/// Outcome of looking for a JSON object in model text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonExtraction<T> {
    /// A block was found and parsed
    Extracted(T),
    /// The text holds no `{...}` block
    NotFound,
    /// Blocks were found but none parsed; carries the last parse error
    Invalid(String),
}

impl<T> JsonExtraction<T> {
    /// The parsed value, if any
    #[must_use]
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Extracted(value) => Some(value),
            Self::NotFound | Self::Invalid(_) => None,
        }
    }
}

/// Find and parse the first JSON object in `text` that matches `T`
pub fn extract_json<T: DeserializeOwned>(text: &str) -> JsonExtraction<T> {
    let (candidates, unterminated) = balanced_objects(text);
    let mut last_error = None;

    for candidate in candidates {
        match serde_json::from_str::<T>(candidate) {
            Ok(value) => return JsonExtraction::Extracted(value),
            Err(e) => last_error = Some(e.to_string()),
        }
    }

    match last_error {
        Some(error) => JsonExtraction::Invalid(error),
        None if unterminated => JsonExtraction::Invalid("unterminated JSON object".to_owned()),
        None => JsonExtraction::NotFound,
    }
}

/// Top-level balanced `{...}` slices, plus whether an object was left open
fn balanced_objects(text: &str) -> (Vec<&str>, bool) {
    let mut objects = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;

    for (index, byte) in text.bytes().enumerate() {
        if depth == 0 {
            if byte == b'{' {
                depth = 1;
                start = index;
                in_string = false;
                escaped = false;
            }
            continue;
        }

        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    objects.push(&text[start..=index]);
                }
            }
            _ => {}
        }
    }

    (objects, depth > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_extracts_from_code_fence() {
        let text = "Here you go:\n```json\n{\"foods\": [{\"name\": \"Leek\"}]}\n```\nEnjoy!";
        let value: Value = extract_json(text).ok().unwrap();
        assert_eq!(value["foods"][0]["name"], "Leek");
    }

    #[test]
    fn test_braces_inside_strings() {
        let text = r#"{"advice": "avoid {onion} and \"garlic}\"", "globalScore": 3}"#;
        let value: Value = extract_json(text).ok().unwrap();
        assert_eq!(value["globalScore"], 3);
    }

    #[test]
    fn test_skips_non_matching_block() {
        #[derive(serde::Deserialize)]
        struct Shape {
            foods: Vec<String>,
        }
        let text = r#"Note {this} then {"foods": ["rice"]}"#;
        let shape: Shape = extract_json(text).ok().unwrap();
        assert_eq!(shape.foods, ["rice"]);
    }

    #[test]
    fn test_not_found_and_invalid() {
        assert_eq!(
            extract_json::<Value>("I could not identify anything."),
            JsonExtraction::NotFound
        );
        assert!(matches!(
            extract_json::<Value>("{\"foods\": [1, 2"),
            JsonExtraction::Invalid(_)
        ));
        assert!(matches!(
            extract_json::<Value>("{not json}"),
            JsonExtraction::Invalid(_)
        ));
    }
}
