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

//! SQL type to schema-builder method mapping

/// Ordered mapping from SQL type fragments to schema-builder methods.
/// Matching is by substring containment and the first match wins, so a
/// specific type sits above every general type it contains: `tinyint(1)`
/// and `bigint` above `int`, `datetime` above `date`.
const TYPE_MAP: &[(&str, &str)] = &[
    ("tinyint(1)", "boolean"),
    ("bigint", "bigInteger"),
    ("int", "integer"),
    ("varchar", "string"),
    ("text", "text"),
    ("timestamp", "timestamp"),
    ("datetime", "dateTime"),
    ("date", "date"),
    ("decimal", "decimal"),
    ("enum", "enum"),
];

/// The schema-builder method a raw SQL type token converts to. Types the
/// table does not cover build as strings.
pub fn builder_method(sql_type: &str) -> &'static str {
    let lowered = sql_type.to_lowercase();
    for &(fragment, method) in TYPE_MAP {
        if lowered.contains(fragment) {
            return method;
        }
    }
    "string"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_integer_types_win_over_the_int_fragment() {
        assert_eq!(builder_method("bigint(20)"), "bigInteger");
        assert_eq!(builder_method("tinyint(1)"), "boolean");
        assert_eq!(builder_method("tinyint(4)"), "integer");
        assert_eq!(builder_method("int(11)"), "integer");
        assert_eq!(builder_method("smallint(6)"), "integer");
    }

    #[test]
    fn datetime_wins_over_the_date_fragment() {
        assert_eq!(builder_method("datetime"), "dateTime");
        assert_eq!(builder_method("date"), "date");
        assert_eq!(builder_method("timestamp"), "timestamp");
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(builder_method("VARCHAR(255)"), "string");
        assert_eq!(builder_method("DECIMAL(8,2)"), "decimal");
    }

    #[test]
    fn unknown_types_build_as_strings() {
        assert_eq!(builder_method("json"), "string");
        assert_eq!(builder_method("blob"), "string");
        assert_eq!(builder_method("geometry"), "string");
    }

    #[test]
    fn textual_types_keep_their_builders() {
        assert_eq!(builder_method("varchar(100)"), "string");
        assert_eq!(builder_method("mediumtext"), "text");
        assert_eq!(builder_method("enum('a','b')"), "enum");
    }
}
