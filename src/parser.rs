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

//! Dump parser
//!
//! Recognizes the two statement families a mysqldump file contributes to the
//! conversion, `INSERT INTO` and `CREATE TABLE`. Everything else is recorded
//! as skipped and parsing resumes at the next statement terminator, so one
//! unreadable statement never costs the rest of the file.

use log::{debug, warn};
use thiserror::Error;

use super::ast::*;
use super::tokenizer::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParserError {
    /// The statement began like one of ours but did not match the grammar
    #[error("sql parser error: {0}")]
    Syntax(String),
    /// The leading token does not start a statement this converter extracts
    #[error("statement type is not supported: {0}")]
    Unsupported(String),
}

// Use `Parser::expected` instead, if possible
macro_rules! parser_err {
    ($MSG:expr) => {
        Err(ParserError::Syntax($MSG.to_string()))
    };
}

/// A single accepted statement
enum Statement {
    Insert {
        table: String,
        rows: Vec<Row>,
    },
    CreateTable {
        unit: MigrationUnit,
        skipped: Vec<SkipRecord>,
    },
}

/// Recursive-descent parser over the token stream of one dump
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, index: 0 }
    }

    /// Parse a whole dump, collecting row data, schema definitions and a
    /// record of everything that had to be skipped.
    ///
    /// A scan failure ends tokenization but not the conversion: statements
    /// read before the failure are parsed normally and the unreadable tail
    /// becomes one more skip record.
    pub fn parse_dump(input: &str) -> Dump {
        let mut tokenizer = Tokenizer::new(input);
        let mut tokens = Vec::new();
        let mut scan_failure = None;
        loop {
            match tokenizer.next_token() {
                Ok(Some(token)) => tokens.push(token),
                Ok(None) => break,
                Err(error) => {
                    scan_failure = Some(error);
                    break;
                }
            }
        }

        let mut dump = Dump::default();
        Parser::new(tokens).parse_statements(&mut dump);

        if let Some(error) = scan_failure {
            warn!("tokenizing stopped early: {}", error);
            let line = input
                .lines()
                .nth(error.line.saturating_sub(1) as usize)
                .unwrap_or("");
            dump.skipped.push(SkipRecord {
                fragment: preview(line),
                reason: error.to_string(),
            });
        }

        dump
    }

    /// Parse statements until the token stream runs out, stopping each one
    /// before its statement terminator.
    fn parse_statements(&mut self, dump: &mut Dump) {
        loop {
            // ignore empty statements (between successive statement delimiters)
            while self.consume_token(&Token::SemiColon) {}

            if self.peek_token().is_none() {
                break;
            }

            let start = self.index;
            match self.parse_statement() {
                Ok(Statement::Insert { table, rows }) => dump.merge_insert(table, rows),
                Ok(Statement::CreateTable { unit, skipped }) => {
                    dump.migrations.push(unit);
                    dump.skipped.extend(skipped);
                }
                Err(error) => {
                    self.recover_to_semicolon();
                    debug!("skipping statement: {}", error);
                    dump.skipped.push(SkipRecord {
                        fragment: self.fragment(start, self.index),
                        reason: error.to_string(),
                    });
                }
            }
        }
    }

    /// Parse a single top-level statement, stopping before the statement
    /// separator, if any.
    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match self.next_token() {
            Some(Token::Word(ref w)) if w.keyword == "INSERT" => self.parse_insert(),
            Some(Token::Word(ref w)) if w.keyword == "CREATE" => self.parse_create_table(),
            Some(token) => Err(ParserError::Unsupported(token.to_string())),
            None => parser_err!("Expecting a statement, but found EOF"),
        }
    }

    /// Return the first non-whitespace token that has not yet been processed
    /// (or None if reached end-of-file)
    fn peek_token(&self) -> Option<Token> {
        self.tokens[self.index..]
            .iter()
            .find(|token| !matches!(token, Token::Whitespace(_)))
            .cloned()
    }

    /// Return the first non-whitespace token that has not yet been processed
    /// (or None if reached end-of-file) and mark it as processed. OK to call
    /// repeatedly after reaching EOF.
    fn next_token(&mut self) -> Option<Token> {
        while let Some(token) = self.tokens.get(self.index) {
            self.index += 1;
            if !matches!(token, Token::Whitespace(_)) {
                return Some(token.clone());
            }
        }
        None
    }

    /// Report unexpected token
    fn expected<T>(&self, expected: &str, found: Option<Token>) -> Result<T, ParserError> {
        parser_err!(format!(
            "Expected {}, found: {}",
            expected,
            found.map_or_else(|| "EOF".to_string(), |t| format!("{}", t))
        ))
    }

    /// Look for an expected keyword and consume it if it exists
    #[must_use]
    fn parse_keyword(&mut self, expected: &'static str) -> bool {
        // Run-time check that the string actually is a known keyword, so a
        // typo here cannot silently never match.
        assert!(KEYWORDS.contains(&expected));
        match self.peek_token() {
            Some(Token::Word(ref w)) if w.keyword == expected => {
                self.next_token();
                true
            }
            _ => false,
        }
    }

    /// Bail out if the current token is not an expected keyword, or consume it if it is
    fn expect_keyword(&mut self, expected: &'static str) -> Result<(), ParserError> {
        let token = self.peek_token();
        if self.parse_keyword(expected) {
            Ok(())
        } else {
            self.expected(expected, token)
        }
    }

    /// Consume the next token if it matches the expected token, otherwise return false
    #[must_use]
    fn consume_token(&mut self, expected: &Token) -> bool {
        match &self.peek_token() {
            Some(t) if *t == *expected => {
                self.next_token();
                true
            }
            _ => false,
        }
    }

    /// Bail out if the current token is not the expected token, or consume it if it is
    fn expect_token(&mut self, expected: &Token) -> Result<(), ParserError> {
        let token = self.peek_token();
        if self.consume_token(expected) {
            Ok(())
        } else {
            self.expected(&expected.to_string(), token)
        }
    }

    /// Parse a comma-separated list of 1+ items accepted by `F`
    fn parse_comma_separated<T, F>(&mut self, mut f: F) -> Result<Vec<T>, ParserError>
    where
        F: FnMut(&mut Parser) -> Result<T, ParserError>,
    {
        let mut values = vec![];
        loop {
            values.push(f(self)?);
            if !self.consume_token(&Token::Comma) {
                break;
            }
        }
        Ok(values)
    }

    /// Consume tokens until the next comma or closing paren of the current
    /// nesting level, leaving that terminator unconsumed.
    fn synchronize(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek_token() {
                None => return,
                Some(Token::Comma) | Some(Token::RParen) if depth == 0 => return,
                Some(Token::LParen) => {
                    depth += 1;
                    self.next_token();
                }
                Some(Token::RParen) => {
                    depth -= 1;
                    self.next_token();
                }
                Some(_) => {
                    self.next_token();
                }
            }
        }
    }

    /// Consume a balanced parenthesized group whose opening paren is already
    /// consumed.
    fn skip_parenthesized(&mut self) {
        let mut depth = 1usize;
        while depth > 0 {
            match self.next_token() {
                Some(Token::LParen) => depth += 1,
                Some(Token::RParen) => depth -= 1,
                Some(_) => {}
                None => return,
            }
        }
    }

    /// Consume tokens up to, but not including, the next statement terminator.
    fn recover_to_semicolon(&mut self) {
        while let Some(token) = self.peek_token() {
            if token == Token::SemiColon {
                return;
            }
            self.next_token();
        }
    }

    /// Compact one-line reconstruction of the given token range, for skip
    /// records.
    fn fragment(&self, from: usize, to: usize) -> String {
        let mut out = String::new();
        for token in &self.tokens[from..to] {
            if matches!(token, Token::Whitespace(_)) {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&token.to_string());
            if out.chars().count() > PREVIEW_CHARS {
                break;
            }
        }
        preview(&out)
    }

    /// Parse an INSERT statement, with the leading INSERT already consumed
    fn parse_insert(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword("INTO")?;
        let table = self.parse_table_name()?;
        debug!("parsing INSERT INTO `{}`", table);

        self.expect_token(&Token::LParen)?;
        let columns = self.parse_comma_separated(|parser| parser.parse_column_name())?;
        self.expect_token(&Token::RParen)?;

        self.expect_keyword("VALUES")?;
        let rows = self.parse_comma_separated(|parser| {
            parser.expect_token(&Token::LParen)?;
            let values = parser.parse_tuple()?;
            parser.expect_token(&Token::RParen)?;
            Ok(Row::new(&columns, values))
        })?;

        // anything between the VALUES list and the terminator makes the
        // whole statement unreliable
        match self.peek_token() {
            Some(Token::SemiColon) | None => Ok(Statement::Insert { table, rows }),
            token => self.expected("';' after the VALUES list", token),
        }
    }

    /// Parse the comma-separated values of one tuple, up to its closing paren
    fn parse_tuple(&mut self) -> Result<Vec<Value>, ParserError> {
        self.parse_comma_separated(|parser| parser.parse_cell())
    }

    /// Parse one value of a tuple. A token sequence that is not one of the
    /// literal forms poisons only this cell: it is consumed up to the next
    /// comma or closing paren and yields NULL.
    fn parse_cell(&mut self) -> Result<Value, ParserError> {
        let token = self.peek_token();
        let value = match token {
            Some(Token::Word(ref w)) if w.keyword == "NULL" => {
                self.next_token();
                Value::Null
            }
            Some(Token::Number(digits)) => {
                self.next_token();
                Value::from_number(&digits).unwrap_or(Value::Null)
            }
            Some(Token::Minus) | Some(Token::Plus) => {
                let negative = matches!(self.peek_token(), Some(Token::Minus));
                self.next_token();
                match self.peek_token() {
                    Some(Token::Number(digits)) => {
                        self.next_token();
                        let text = if negative {
                            format!("-{}", digits)
                        } else {
                            digits
                        };
                        Value::from_number(&text).unwrap_or(Value::Null)
                    }
                    _ => {
                        self.synchronize();
                        Value::Null
                    }
                }
            }
            Some(Token::SingleQuotedString(text)) | Some(Token::DoubleQuotedString(text)) => {
                self.next_token();
                Value::from_quoted(text)
            }
            Some(_) => {
                self.synchronize();
                Value::Null
            }
            None => return self.expected("a value", None),
        };

        // a matched literal must be followed by the tuple's own punctuation
        match self.peek_token() {
            Some(Token::Comma) | Some(Token::RParen) | None => Ok(value),
            Some(_) => {
                self.synchronize();
                Ok(Value::Null)
            }
        }
    }

    /// Parse a CREATE TABLE statement, with the leading CREATE already
    /// consumed. Index and constraint lines inside the body are reported as
    /// skipped without failing the table.
    fn parse_create_table(&mut self) -> Result<Statement, ParserError> {
        self.expect_keyword("TABLE")?;
        let table = self.parse_table_name()?;
        debug!("parsing CREATE TABLE `{}`", table);

        self.expect_token(&Token::LParen)?;
        let mut columns = Vec::new();
        let mut skipped = Vec::new();
        loop {
            match self.peek_token() {
                Some(Token::Word(word)) if word.quote_style == Some('`') => {
                    self.next_token();
                    let column = self.parse_column_definition(word.value)?;
                    debug!("parsed column definition: {}", column);
                    columns.push(column);
                }
                Some(_) => {
                    let start = self.index;
                    self.synchronize();
                    skipped.push(SkipRecord {
                        fragment: self.fragment(start, self.index),
                        reason: "not a column definition".to_string(),
                    });
                }
                None => return self.expected("')' to close the column list", None),
            }
            let comma = self.consume_token(&Token::Comma);
            if self.consume_token(&Token::RParen) {
                // allow a trailing comma, even though it's not in standard
                break;
            } else if !comma {
                let token = self.peek_token();
                return self.expected("',' or ')' after a definition", token);
            }
        }

        let engine = match self.parse_table_options()? {
            Some(engine) => engine,
            None => {
                return parser_err!(format!(
                    "CREATE TABLE `{}` carries no ENGINE table option",
                    table
                ))
            }
        };

        Ok(Statement::CreateTable {
            unit: MigrationUnit {
                table,
                columns,
                engine,
            },
            skipped,
        })
    }

    /// Parse one column definition, with the backtick-quoted name already
    /// consumed. Modifiers other than the recognized ones are consumed
    /// without effect.
    fn parse_column_definition(&mut self, name: String) -> Result<ColumnDescriptor, ParserError> {
        let sql_type = self.parse_column_type()?;
        let mut column = ColumnDescriptor::new(name, sql_type);
        loop {
            match self.peek_token() {
                None | Some(Token::Comma) | Some(Token::RParen) => break,
                _ => {}
            }
            if self.parse_keyword("UNSIGNED") {
                column.unsigned = true;
            } else if self.parse_keyword("NOT") {
                self.expect_keyword("NULL")?;
                column.nullable = false;
            } else if self.parse_keyword("NULL") {
                column.nullable = true;
            } else if self.parse_keyword("DEFAULT") {
                column.default = Some(self.parse_default_literal()?);
            } else if self.parse_keyword("COMMENT") {
                match self.next_token() {
                    Some(Token::SingleQuotedString(text)) => column.comment = Some(text),
                    token => return self.expected("a quoted string after COMMENT", token),
                }
            } else if self.consume_token(&Token::LParen) {
                // parenthesized part of a modifier we do not track
                self.skip_parenthesized();
            } else {
                // AUTO_INCREMENT, COLLATE and the rest do not survive the
                // conversion
                self.next_token();
            }
        }
        Ok(column)
    }

    /// Parse a column type, keeping any parenthesized arguments in their
    /// compact source spelling: `varchar(255)`, `decimal(8,2)`,
    /// `enum('a','b')`.
    fn parse_column_type(&mut self) -> Result<String, ParserError> {
        let mut sql_type = match self.next_token() {
            Some(Token::Word(word)) if word.quote_style.is_none() => word.value,
            token => return self.expected("a column type", token),
        };
        if self.consume_token(&Token::LParen) {
            sql_type.push('(');
            loop {
                match self.next_token() {
                    Some(Token::RParen) => break,
                    Some(token) => sql_type.push_str(&token.to_string()),
                    None => return self.expected("')' closing the column type", None),
                }
            }
            sql_type.push(')');
        }
        Ok(sql_type)
    }

    /// Parse the literal after DEFAULT, unquoted and verbatim
    fn parse_default_literal(&mut self) -> Result<String, ParserError> {
        match self.next_token() {
            Some(Token::SingleQuotedString(text)) => Ok(text),
            Some(Token::Number(digits)) => Ok(digits),
            Some(Token::Minus) => match self.next_token() {
                Some(Token::Number(digits)) => Ok(format!("-{}", digits)),
                token => self.expected("a number after '-'", token),
            },
            Some(Token::Word(word)) if word.quote_style.is_none() => Ok(word.value),
            token => self.expected("a DEFAULT literal", token),
        }
    }

    /// Scan the table options after the column list for `ENGINE=<name>`,
    /// consuming everything else up to the statement terminator unchecked.
    fn parse_table_options(&mut self) -> Result<Option<String>, ParserError> {
        let mut engine = None;
        loop {
            match self.peek_token() {
                Some(Token::SemiColon) | None => break,
                Some(Token::Word(ref word)) if word.keyword == "ENGINE" => {
                    self.next_token();
                    self.expect_token(&Token::Eq)?;
                    match self.next_token() {
                        Some(Token::Word(word)) => engine = Some(word.value),
                        Some(Token::SingleQuotedString(name)) => engine = Some(name),
                        token => return self.expected("a storage engine name", token),
                    }
                }
                _ => {
                    self.next_token();
                }
            }
        }
        Ok(engine)
    }

    /// Parse a backtick-quoted table name
    fn parse_table_name(&mut self) -> Result<String, ParserError> {
        match self.next_token() {
            Some(Token::Word(word)) if word.quote_style == Some('`') => Ok(word.value),
            token => self.expected("a backtick-quoted table name", token),
        }
    }

    /// Parse a column name from an INSERT column list, quoted or not
    fn parse_column_name(&mut self) -> Result<String, ParserError> {
        match self.next_token() {
            Some(Token::Word(word)) => Ok(word.value),
            token => self.expected("a column name", token),
        }
    }
}

const PREVIEW_CHARS: usize = 72;

/// First characters of `text`, flattened for a one-line diagnostic
fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(dump: &Dump, table: &str, row: usize) -> Vec<(String, Value)> {
        dump.tables
            .iter()
            .find(|t| t.name == table)
            .expect("table missing")
            .rows[row]
            .cells
            .clone()
    }

    fn cell(name: &str, value: Value) -> (String, Value) {
        (name.to_string(), value)
    }

    #[test]
    fn extracts_rows_from_an_insert_statement() {
        let dump = Parser::parse_dump(
            "INSERT INTO `users` (`id`, `name`, `balance`) VALUES (1,'Ann',-2.50),(2,'Bob',NULL);",
        );
        assert!(dump.skipped.is_empty());
        assert_eq!(dump.tables.len(), 1);
        assert_eq!(
            cells(&dump, "users", 0),
            vec![
                cell("id", Value::Integer(1)),
                cell("name", Value::String("Ann".to_string())),
                cell("balance", Value::Float(-2.5)),
            ]
        );
        assert_eq!(cells(&dump, "users", 1)[2], cell("balance", Value::Null));
    }

    #[test]
    fn merges_split_insert_blocks_for_one_table() {
        let dump = Parser::parse_dump(
            "INSERT INTO `logs` (`id`) VALUES (1),(2);\nINSERT INTO `logs` (`id`) VALUES (3);",
        );
        assert_eq!(dump.tables.len(), 1);
        assert_eq!(dump.tables[0].rows.len(), 3);
    }

    #[test]
    fn junk_cells_become_null_without_losing_the_row() {
        let dump =
            Parser::parse_dump("INSERT INTO `t` (`a`, `b`, `c`) VALUES (1, CURRENT_TIMESTAMP, 3);");
        assert_eq!(
            cells(&dump, "t", 0),
            vec![
                cell("a", Value::Integer(1)),
                cell("b", Value::Null),
                cell("c", Value::Integer(3)),
            ]
        );
    }

    #[test]
    fn a_literal_with_trailing_junk_poisons_only_its_cell() {
        let dump = Parser::parse_dump("INSERT INTO `t` (`a`, `b`) VALUES ('x' 'y', 5);");
        assert_eq!(
            cells(&dump, "t", 0),
            vec![cell("a", Value::Null), cell("b", Value::Integer(5))]
        );
    }

    #[test]
    fn mismatched_tuple_width_drops_the_unmatched_tail() {
        let dump = Parser::parse_dump("INSERT INTO `t` (`a`, `b`) VALUES (1),(1,2,3);");
        assert_eq!(cells(&dump, "t", 0), vec![cell("a", Value::Integer(1))]);
        assert_eq!(
            cells(&dump, "t", 1),
            vec![cell("a", Value::Integer(1)), cell("b", Value::Integer(2))]
        );
    }

    #[test]
    fn unsupported_statements_are_skipped_with_a_reason() {
        let dump = Parser::parse_dump(
            "DROP TABLE IF EXISTS `users`;\nINSERT INTO `users` (`id`) VALUES (1);",
        );
        assert_eq!(dump.skipped.len(), 1);
        assert!(dump.skipped[0].reason.contains("not supported"));
        assert!(dump.skipped[0].fragment.contains("DROP"));
        assert_eq!(dump.tables.len(), 1);
    }

    #[test]
    fn insert_without_a_column_list_is_skipped() {
        let dump = Parser::parse_dump("INSERT INTO `t` VALUES (1);");
        assert!(dump.tables.is_empty());
        assert_eq!(dump.skipped.len(), 1);
        assert!(dump.skipped[0].reason.contains("Expected"));
    }

    #[test]
    fn dump_noise_is_ignored_silently() {
        let dump = Parser::parse_dump(
            "-- MySQL dump 10.13\n/*!40101 SET NAMES utf8 */;\n\nINSERT INTO `t` (`a`) VALUES (1);\n",
        );
        assert!(dump.skipped.is_empty());
        assert_eq!(dump.tables.len(), 1);
    }

    #[test]
    fn create_table_yields_a_migration_unit() {
        let sql = "CREATE TABLE `users` (\n\
                   \x20 `id` bigint(20) unsigned NOT NULL AUTO_INCREMENT,\n\
                   \x20 `role` varchar(32) DEFAULT 'guest' COMMENT 'access level',\n\
                   \x20 `balance` decimal(8,2) NOT NULL DEFAULT 0.00,\n\
                   \x20 `created_at` timestamp NULL DEFAULT CURRENT_TIMESTAMP,\n\
                   \x20 PRIMARY KEY (`id`)\n\
                   ) ENGINE=InnoDB AUTO_INCREMENT=4 DEFAULT CHARSET=utf8mb4;";
        let dump = Parser::parse_dump(sql);
        assert_eq!(dump.migrations.len(), 1);

        let unit = &dump.migrations[0];
        assert_eq!(unit.table, "users");
        assert_eq!(unit.engine, "InnoDB");
        assert_eq!(unit.columns.len(), 4);

        let id = &unit.columns[0];
        assert_eq!(id.sql_type, "bigint(20)");
        assert!(id.unsigned);
        assert!(!id.nullable);

        let role = &unit.columns[1];
        assert_eq!(role.sql_type, "varchar(32)");
        assert_eq!(role.default.as_deref(), Some("guest"));
        assert_eq!(role.comment.as_deref(), Some("access level"));

        let balance = &unit.columns[2];
        assert_eq!(balance.default.as_deref(), Some("0.00"));
        assert!(!balance.nullable);

        let created = &unit.columns[3];
        assert_eq!(created.default_kind(), Some(DefaultKind::CurrentTimestamp));
        assert!(created.nullable);

        // the index line is reported, not fatal
        assert_eq!(dump.skipped.len(), 1);
        assert!(dump.skipped[0].fragment.contains("PRIMARY"));
    }

    #[test]
    fn enum_types_keep_their_variant_list() {
        let dump = Parser::parse_dump(
            "CREATE TABLE `t` (`state` enum('new','done') NOT NULL) ENGINE=InnoDB;",
        );
        assert_eq!(dump.migrations[0].columns[0].sql_type, "enum('new','done')");
    }

    #[test]
    fn create_without_an_engine_is_skipped_entirely() {
        let dump = Parser::parse_dump("CREATE TABLE `t` (`id` int(11)) DEFAULT CHARSET=utf8;");
        assert!(dump.migrations.is_empty());
        assert_eq!(dump.skipped.len(), 1);
        assert!(dump.skipped[0].reason.contains("ENGINE"));
    }

    #[test]
    fn a_scan_failure_keeps_the_statements_before_it() {
        let dump = Parser::parse_dump(
            "INSERT INTO `t` (`a`) VALUES (1);\nINSERT INTO `t` (`a`) VALUES ('unterminated);",
        );
        assert_eq!(dump.tables.len(), 1);
        assert_eq!(dump.tables[0].rows.len(), 1);
        assert_eq!(dump.skipped.len(), 2);
        assert!(dump
            .skipped
            .iter()
            .any(|record| record.reason.contains("line 2")));
    }

    #[test]
    fn column_definitions_reparse_to_the_same_descriptor() {
        let sql = "CREATE TABLE `t` (\
                   `a` varchar(16) NOT NULL DEFAULT 'x''y' COMMENT 'keep',\
                   `b` int(11) unsigned DEFAULT NULL,\
                   `c` varchar(8) DEFAULT '1e5',\
                   `d` varchar(8) DEFAULT '.5'\
                   ) ENGINE=MyISAM;";
        let first = Parser::parse_dump(sql);
        let unit = &first.migrations[0];

        let definitions: Vec<String> = unit.columns.iter().map(|c| c.to_string()).collect();
        let rebuilt = format!(
            "CREATE TABLE `t` ({}) ENGINE=MyISAM;",
            definitions.join(", ")
        );
        let second = Parser::parse_dump(&rebuilt);
        assert_eq!(second.migrations[0].columns, unit.columns);
    }
}
