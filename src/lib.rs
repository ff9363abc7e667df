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

//! MySQL mysqldump to PHP converter
//!
//! This crate parses the restricted SQL dialect mysqldump emits and renders
//! the result two ways: the row data of `INSERT` statements as PHP array
//! literals, and the `CREATE TABLE` schemas as Laravel migration classes.
//! The two paths are independent, so a dump with rows but no schema (or the
//! other way around) converts fine. Statements outside the dialect are
//! reported as skipped, with the reason, instead of failing the run.
//!
//! ```rust
//! use mysqldump_converter::{render_tables, Parser, RenderConfig};
//!
//! let dump = Parser::parse_dump(
//!     "INSERT INTO `users` (`id`, `name`) VALUES (1,'Ann'),(2,NULL);",
//! );
//!
//! let output = render_tables(&dump.tables, &RenderConfig::default());
//! assert!(output.script.contains("'name' => 'Ann'"));
//! assert!(output.script.contains("'name' => null"));
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod ast;
mod parser;
mod render;
mod tokenizer;
mod typemap;

pub use ast::{
    ColumnDescriptor, DefaultKind, Dump, MigrationUnit, Row, SkipRecord, Table, TruncationRecord,
    Value,
};
pub use parser::{Parser, ParserError};
pub use render::{
    render_migration, render_tables, ArrayOutput, MigrationFile, OverflowArtifact, PhpExpr,
    RenderConfig,
};
pub use tokenizer::{ScanError, Token, Tokenizer, Word};
pub use typemap::builder_method;
