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

//! PHP array rendering of extracted row data

use log::warn;

use super::php::PhpExpr;
use super::{php_document, RenderConfig};
use crate::ast::{Table, TruncationRecord};

/// The array conversion of one dump
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayOutput {
    /// Combined PHP document holding one array literal per table
    pub script: String,
    /// Standalone documents for the tables the row cap pushed out
    pub overflows: Vec<OverflowArtifact>,
    /// One record per table that hit the cap
    pub truncations: Vec<TruncationRecord>,
}

/// Complete row set of a table whose count exceeded the cap
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowArtifact {
    pub table: String,
    /// `<table>_overflow.php`
    pub file_name: String,
    pub script: String,
}

/// Render each table as a `$name = [...];` literal.
///
/// A table within `config.max_rows` renders inline. A larger one is replaced
/// in the combined document by a placeholder comment and every one of its
/// rows moves to a standalone overflow document, reported through the
/// returned truncation records. Row order is never changed by the split.
pub fn render_tables(tables: &[Table], config: &RenderConfig) -> ArrayOutput {
    let mut lines: Vec<String> = Vec::new();
    let mut overflows = Vec::new();
    let mut truncations = Vec::new();

    for table in tables {
        if table.rows.len() <= config.max_rows {
            push_table_lines(&mut lines, table, &config.indent);
            continue;
        }

        let file_name = format!("{}_overflow.php", table.name);
        warn!(
            "table `{}` holds {} rows, above the cap of {}; moving its data to {}",
            table.name,
            table.rows.len(),
            config.max_rows,
            file_name
        );
        lines.push(format!(
            "// {} rows for `{}` exceed the cap of {}; see {}",
            table.rows.len(),
            table.name,
            config.max_rows,
            file_name
        ));
        lines.push(String::new());

        let mut overflow_lines = Vec::new();
        push_table_lines(&mut overflow_lines, table, &config.indent);
        overflows.push(OverflowArtifact {
            table: table.name.clone(),
            file_name,
            script: php_document(&overflow_lines.join("\n")),
        });
        truncations.push(TruncationRecord {
            table: table.name.clone(),
            total_rows: table.rows.len(),
            retained_rows: config.max_rows,
        });
    }

    ArrayOutput {
        script: php_document(&lines.join("\n")),
        overflows,
        truncations,
    }
}

/// One array literal plus the blank line that separates tables
fn push_table_lines(lines: &mut Vec<String>, table: &Table, indent: &str) {
    lines.push(format!("${} = [", table.name));
    for row in &table.rows {
        let entries = row
            .cells
            .iter()
            .map(|(name, value)| (name.clone(), PhpExpr::from(value)))
            .collect();
        lines.push(format!("{}{},", indent, PhpExpr::Assoc(entries)));
    }
    lines.push("];".to_string());
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Row, Value};

    fn id_rows(count: i64) -> Vec<Row> {
        let columns = vec!["id".to_string()];
        (1..=count)
            .map(|n| Row::new(&columns, vec![Value::Integer(n)]))
            .collect()
    }

    #[test]
    fn renders_the_two_row_scenario_verbatim() {
        let columns = vec!["id".to_string(), "name".to_string()];
        let table = Table {
            name: "users".to_string(),
            rows: vec![
                Row::new(
                    &columns,
                    vec![Value::Integer(1), Value::String("Ann".to_string())],
                ),
                Row::new(&columns, vec![Value::Integer(2), Value::Null]),
            ],
        };
        let output = render_tables(&[table], &RenderConfig::default());
        assert_eq!(
            output.script,
            "<?php\n\n\
             $users = [\n    \
             ['id' => 1, 'name' => 'Ann'],\n    \
             ['id' => 2, 'name' => null],\n\
             ];\n\n\
             ?>"
        );
        assert!(output.overflows.is_empty());
        assert!(output.truncations.is_empty());
    }

    #[test]
    fn a_blank_line_separates_tables() {
        let tables = vec![
            Table {
                name: "users".to_string(),
                rows: id_rows(1),
            },
            Table {
                name: "posts".to_string(),
                rows: id_rows(1),
            },
        ];
        let output = render_tables(&tables, &RenderConfig::default());
        assert!(output.script.contains("];\n\n$posts = ["));
    }

    #[test]
    fn oversized_tables_move_to_an_overflow_document() {
        let table = Table {
            name: "logs".to_string(),
            rows: id_rows(3),
        };
        let config = RenderConfig {
            max_rows: 2,
            indent: "    ".to_string(),
        };
        let output = render_tables(&[table], &config);

        assert!(output
            .script
            .contains("// 3 rows for `logs` exceed the cap of 2; see logs_overflow.php"));
        assert!(!output.script.contains("'id' =>"));

        assert_eq!(output.overflows.len(), 1);
        let artifact = &output.overflows[0];
        assert_eq!(artifact.file_name, "logs_overflow.php");
        assert!(artifact.script.starts_with("<?php\n\n$logs = ["));
        assert_eq!(artifact.script.matches("['id' =>").count(), 3);

        assert_eq!(
            output.truncations,
            vec![TruncationRecord {
                table: "logs".to_string(),
                total_rows: 3,
                retained_rows: 2,
            }]
        );
    }

    #[test]
    fn a_table_exactly_at_the_cap_stays_inline() {
        let table = Table {
            name: "logs".to_string(),
            rows: id_rows(2),
        };
        let config = RenderConfig {
            max_rows: 2,
            indent: "    ".to_string(),
        };
        let output = render_tables(&[table], &config);
        assert!(output.overflows.is_empty());
        assert!(output.script.contains("['id' => 2],"));
    }

    #[test]
    fn indentation_is_configurable() {
        let table = Table {
            name: "t".to_string(),
            rows: id_rows(1),
        };
        let config = RenderConfig {
            max_rows: 10,
            indent: "\t".to_string(),
        };
        let output = render_tables(&[table], &config);
        assert!(output.script.contains("\n\t['id' => 1],"));
    }
}
