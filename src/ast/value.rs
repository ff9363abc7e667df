// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde_json::Map;

/// A scalar cell value from one VALUES tuple
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `NULL`, and the fallback for literals outside the grammar
    Null,
    /// Numeric literal without a decimal point
    Integer(i64),
    /// Numeric literal with a decimal point
    Float(f64),
    /// Quoted string literal, with escapes already processed
    String(String),
    /// Quoted string literal that decoded as a JSON object
    Json(Map<String, serde_json::Value>),
}

impl Value {
    /// Classify the content of a quoted literal. Text shaped like a JSON
    /// object is decoded into one; anything else, including text that merely
    /// looks like JSON but fails to decode, stays a plain string.
    pub fn from_quoted(text: String) -> Value {
        if text.starts_with('{') && text.ends_with('}') {
            if let Ok(object) = serde_json::from_str(&text) {
                return Value::Json(object);
            }
        }
        Value::String(text)
    }

    /// Classify a numeric literal, optionally carrying a sign. A decimal
    /// point makes it a float; an integer that does not fit i64 falls back to
    /// float as well. Returns None for digit runs that are not a number, such
    /// as `1.2.3`.
    pub fn from_number(text: &str) -> Option<Value> {
        if text.contains('.') {
            text.parse::<f64>().ok().map(Value::Float)
        } else {
            match text.parse::<i64>() {
                Ok(n) => Some(Value::Integer(n)),
                Err(_) => text.parse::<f64>().ok().map(Value::Float),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;

    #[test]
    fn quoted_text_stays_a_string() {
        assert_eq!(
            Value::from_quoted("hello".to_string()),
            Value::String("hello".to_string())
        );
        // quoted numerics are strings, not numbers
        assert_eq!(
            Value::from_quoted("42".to_string()),
            Value::String("42".to_string())
        );
    }

    #[test]
    fn json_objects_are_decoded() {
        match Value::from_quoted(r#"{"a": 1, "b": {"c": true}}"#.to_string()) {
            Value::Json(object) => {
                assert_eq!(object["a"], serde_json::json!(1));
                assert_eq!(object["b"]["c"], serde_json::json!(true));
            }
            other => panic!("expected a JSON object, got {:?}", other),
        }
    }

    #[test]
    fn invalid_json_falls_back_to_string() {
        assert_matches!(Value::from_quoted("{oops}".to_string()), Value::String(_));
        // top-level arrays are not attempted at all
        assert_matches!(Value::from_quoted("[1, 2]".to_string()), Value::String(_));
    }

    #[test]
    fn numbers_split_on_the_decimal_point() {
        assert_eq!(Value::from_number("42"), Some(Value::Integer(42)));
        assert_eq!(Value::from_number("-17"), Some(Value::Integer(-17)));
        assert_eq!(Value::from_number("-3.5"), Some(Value::Float(-3.5)));
    }

    #[test]
    fn oversized_integers_become_floats() {
        assert_matches!(
            Value::from_number("99999999999999999999"),
            Some(Value::Float(_))
        );
    }

    #[test]
    fn malformed_digit_runs_are_rejected() {
        assert_eq!(Value::from_number("1.2.3"), None);
    }
}
