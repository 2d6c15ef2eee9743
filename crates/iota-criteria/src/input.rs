//! User input backing a [`SearchCriteria`](crate::SearchCriteria)

use serde::{Deserialize, Serialize};

/// A single form value or the values of a multi-select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Single(String),
    List(Vec<String>),
}

impl InputValue {
    /// Empty strings and empty lists count as no input at all
    pub fn is_empty(&self) -> bool {
        match self {
            InputValue::Single(value) => value.is_empty(),
            InputValue::List(values) => values.is_empty(),
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            InputValue::Single(value) => Some(value),
            InputValue::List(_) => None,
        }
    }

    /// All values, a single value becoming a one-element list
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            InputValue::Single(value) => vec![value.clone()],
            InputValue::List(values) => values.clone(),
        }
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Single(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for InputValue {
    fn from(values: Vec<String>) -> Self {
        InputValue::List(values)
    }
}

impl From<Vec<&str>> for InputValue {
    fn from(values: Vec<&str>) -> Self {
        InputValue::List(values.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(InputValue::from("").is_empty());
        assert!(InputValue::List(Vec::new()).is_empty());
        assert!(!InputValue::from(vec![""]).is_empty());
        assert!(!InputValue::from("x").is_empty());
    }

    #[test]
    fn test_deserializes_either_shape() {
        let single: InputValue = serde_json::from_str("\"red\"").unwrap();
        let list: InputValue = serde_json::from_str("[\"red\",\"blue\"]").unwrap();

        assert_eq!(single.as_single(), Some("red"));
        assert_eq!(list.as_single(), None);
        assert_eq!(list.to_vec(), vec!["red", "blue"]);
    }
}
