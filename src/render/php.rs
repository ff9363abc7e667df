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

//! PHP source fragments
//!
//! All PHP text the converter emits goes through the types in this module,
//! so quoting and escaping rules live in exactly one place.

use std::fmt;

use serde_json::Map;

use crate::ast::Value;

/// A PHP expression, rendered through `Display`
#[derive(Debug, Clone, PartialEq)]
pub enum PhpExpr {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A function call: `json_decode('...', true)`
    Call(&'static str, Vec<PhpExpr>),
    /// A single-line associative array literal: `['k' => v, ...]`
    Assoc(Vec<(String, PhpExpr)>),
}

impl From<&Value> for PhpExpr {
    fn from(value: &Value) -> PhpExpr {
        match value {
            Value::Null => PhpExpr::Null,
            Value::Integer(n) => PhpExpr::Int(*n),
            Value::Float(x) => PhpExpr::Float(*x),
            Value::String(s) => PhpExpr::Str(s.clone()),
            Value::Json(map) => PhpExpr::Call(
                "json_decode",
                vec![PhpExpr::Str(json_text(map)), PhpExpr::Bool(true)],
            ),
        }
    }
}

/// Compact JSON text for a decoded object. Serializing a map the JSON
/// parser itself produced cannot fail, so the fallback is never reached.
fn json_text(map: &Map<String, serde_json::Value>) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| "{}".to_string())
}

impl fmt::Display for PhpExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhpExpr::Null => f.write_str("null"),
            PhpExpr::Bool(true) => f.write_str("true"),
            PhpExpr::Bool(false) => f.write_str("false"),
            PhpExpr::Int(n) => write!(f, "{}", n),
            PhpExpr::Float(x) if !x.is_finite() => {
                // PHP spells non-finite floats as constants
                let constant = if x.is_nan() {
                    "NAN"
                } else if x.is_sign_positive() {
                    "INF"
                } else {
                    "-INF"
                };
                f.write_str(constant)
            }
            // `{:?}` keeps the decimal point on round floats
            PhpExpr::Float(x) => write!(f, "{:?}", x),
            PhpExpr::Str(s) => write!(f, "'{}'", escape_single_quote_string(s)),
            PhpExpr::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut first = true;
                for arg in args {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            PhpExpr::Assoc(entries) => {
                f.write_str("[")?;
                let mut first = true;
                for (key, value) in entries {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    write!(f, "'{}' => {}", escape_single_quote_string(key), value)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Display adapter escaping a string for a single-quoted PHP literal
pub struct EscapeSingleQuoteString<'a>(&'a str);

impl fmt::Display for EscapeSingleQuoteString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\'' => f.write_str("\\'")?,
                _ => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

pub fn escape_single_quote_string(s: &str) -> EscapeSingleQuoteString<'_> {
    EscapeSingleQuoteString(s)
}
