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

//! Data structures extracted from a dump, shared by the parser and the
//! renderers.

mod schema;
mod value;

pub use self::schema::{ColumnDescriptor, DefaultKind, MigrationUnit};
pub use self::value::Value;

/// Everything one pass over a dump produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dump {
    /// Row data per table, in first-appearance order. Rows from repeated
    /// `INSERT INTO` blocks for one table are merged into a single entry.
    pub tables: Vec<Table>,
    /// One unit per accepted `CREATE TABLE` statement, in source order
    pub migrations: Vec<MigrationUnit>,
    /// Input the parser left behind, with the reason for each piece
    pub skipped: Vec<SkipRecord>,
}

impl Dump {
    /// Appends the rows of one `INSERT` block, merging with an earlier block
    /// for the same table when there is one.
    pub(crate) fn merge_insert(&mut self, table: String, rows: Vec<Row>) {
        match self.tables.iter_mut().find(|t| t.name == table) {
            Some(existing) => existing.rows.extend(rows),
            None => self.tables.push(Table { name: table, rows }),
        }
    }
}

/// One table's accumulated row data
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub rows: Vec<Row>,
}

/// One `VALUES` tuple, keyed by the column list of its `INSERT` statement
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<(String, Value)>,
}

impl Row {
    /// Pairs values with column names positionally. A length mismatch drops
    /// the unmatched tail on whichever side is longer.
    pub(crate) fn new(columns: &[String], values: Vec<Value>) -> Row {
        Row {
            cells: columns.iter().cloned().zip(values).collect(),
        }
    }
}

/// A statement or definition line the restricted grammar does not cover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipRecord {
    /// Compact reconstruction of the skipped source
    pub fragment: String,
    pub reason: String,
}

/// Issued when a table holds more rows than the inline render cap admits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationRecord {
    pub table: String,
    /// Rows the dump held for this table
    pub total_rows: usize,
    /// Rows the configured cap admits inline
    pub retained_rows: usize,
}
