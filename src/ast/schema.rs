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

use std::fmt;

/// The declared properties of one column from a `CREATE TABLE` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// Column name, without backticks
    pub name: String,
    /// Raw type token, parenthesized arguments included: `varchar(255)`
    pub sql_type: String,
    pub unsigned: bool,
    /// True unless the definition carries `NOT NULL`
    pub nullable: bool,
    /// The `DEFAULT` literal, verbatim and unquoted. `None` only when no
    /// DEFAULT clause was present; an explicit `DEFAULT NULL` is `Some("NULL")`.
    pub default: Option<String>,
    /// The `COMMENT` text, when present
    pub comment: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        ColumnDescriptor {
            name: name.into(),
            sql_type: sql_type.into(),
            unsigned: false,
            nullable: true,
            default: None,
            comment: None,
        }
    }

    /// The DEFAULT clause with its sentinels resolved, if one was present.
    pub fn default_kind(&self) -> Option<DefaultKind<'_>> {
        self.default.as_deref().map(|literal| {
            if literal.eq_ignore_ascii_case("NULL") {
                DefaultKind::Null
            } else if literal.eq_ignore_ascii_case("CURRENT_TIMESTAMP") {
                DefaultKind::CurrentTimestamp
            } else {
                DefaultKind::Literal(literal)
            }
        })
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "`{}` {}", self.name, self.sql_type)?;
        if self.unsigned {
            f.write_str(" unsigned")?;
        }
        if !self.nullable {
            f.write_str(" NOT NULL")?;
        }
        match self.default_kind() {
            Some(DefaultKind::Literal(literal)) if !is_bare_number(literal) => {
                write!(f, " DEFAULT '{}'", EscapeSingleQuote(literal))?;
            }
            Some(_) => write!(f, " DEFAULT {}", self.default.as_deref().unwrap_or(""))?,
            None => {}
        }
        if let Some(ref comment) = self.comment {
            write!(f, " COMMENT '{}'", EscapeSingleQuote(comment))?;
        }
        Ok(())
    }
}

/// How a `DEFAULT` literal should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKind<'a> {
    /// Explicit `DEFAULT NULL`
    Null,
    /// `DEFAULT CURRENT_TIMESTAMP`
    CurrentTimestamp,
    /// Any other literal, verbatim
    Literal(&'a str),
}

/// One table's schema, ready to render as a migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationUnit {
    pub table: String,
    /// Columns in declaration order
    pub columns: Vec<ColumnDescriptor>,
    /// Storage engine from the `ENGINE=` table option
    pub engine: String,
}

/// True for text the dump grammar reads back as a single signed number:
/// an optional leading `-`, then digits with at most one `.`. Anything
/// else, `1e5` or `.5` included, must render quoted to survive a re-parse.
fn is_bare_number(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|&c| c == '.').count() <= 1
}

struct EscapeSingleQuote<'a>(&'a str);

impl fmt::Display for EscapeSingleQuote<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.0.chars() {
            if c == '\'' {
                f.write_str("''")?;
            } else if c == '\\' {
                f.write_str("\\\\")?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
