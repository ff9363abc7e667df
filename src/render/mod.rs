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

//! Rendering of extracted dump data into PHP source text
//!
//! The two renderers are independent: `render_tables` turns row data into
//! array literals, `render_migration` turns one schema into a migration.
//! Both are pure functions of their inputs and a [`RenderConfig`].

mod array;
mod migration;
mod php;

pub use self::array::{render_tables, ArrayOutput, OverflowArtifact};
pub use self::migration::{render_migration, MigrationFile};
pub use self::php::PhpExpr;

/// Read-only settings shared by the renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Rows a table may hold before its data moves to an overflow artifact
    pub max_rows: usize,
    /// Indentation prefix for rendered row entries
    pub indent: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            max_rows: 1000,
            indent: "    ".to_string(),
        }
    }
}

/// Wrap rendered statements in a complete PHP document
pub(crate) fn php_document(body: &str) -> String {
    format!("<?php\n\n{}\n?>", body)
}
