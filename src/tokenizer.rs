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

//! Dump tokenizer
//!
//! The tokenizer (a.k.a. lexer) converts dump text into a sequence of tokens.
//!
//! The tokens then form the input for the parser, which builds the table and
//! schema model out of them.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// The keywords the dump grammar gives meaning to. Any other word is a plain
/// identifier or literal.
pub const KEYWORDS: &[&str] = &[
    "COMMENT", "CREATE", "DEFAULT", "ENGINE", "INSERT", "INTO", "NOT", "NULL", "TABLE",
    "UNSIGNED", "VALUES",
];

/// Dump token enumeration
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A keyword (like INSERT) or an optionally backtick-quoted identifier
    Word(Word),
    /// An unsigned numeric literal, digits and `.` only
    Number(String),
    /// Single quoted string: i.e: 'string', stored with escapes processed
    SingleQuotedString(String),
    /// Double quoted string: i.e: "string", stored with escapes processed
    DoubleQuotedString(String),
    /// Comma
    Comma,
    /// Whitespace (space, newline, comments)
    Whitespace(Whitespace),
    /// Equals sign `=`, used by table options such as `ENGINE=InnoDB`
    Eq,
    /// Plus operator `+`
    Plus,
    /// Minus operator `-`
    Minus,
    /// Left parenthesis `(`
    LParen,
    /// Right parenthesis `)`
    RParen,
    /// Period `.`
    Period,
    /// Statement terminator `;`
    SemiColon,
    /// A character that does not belong to the dump grammar
    Char(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Word(ref w) => write!(f, "{}", w),
            Token::Number(ref n) => f.write_str(n),
            Token::SingleQuotedString(ref s) => fmt_quoted(f, s, '\''),
            Token::DoubleQuotedString(ref s) => fmt_quoted(f, s, '"'),
            Token::Comma => f.write_str(","),
            Token::Whitespace(ws) => write!(f, "{}", ws),
            Token::Eq => f.write_str("="),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Period => f.write_str("."),
            Token::SemiColon => f.write_str(";"),
            Token::Char(ref c) => write!(f, "{}", c),
        }
    }
}

impl Token {
    pub fn make_keyword(keyword: &str) -> Self {
        Token::make_word(keyword, None)
    }

    pub fn make_word(word: &str, quote_style: Option<char>) -> Self {
        let word_uppercase = word.to_uppercase();
        let is_keyword = quote_style.is_none() && KEYWORDS.contains(&word_uppercase.as_str());
        Token::Word(Word {
            value: word.to_string(),
            quote_style,
            keyword: if is_keyword {
                word_uppercase
            } else {
                "".to_string()
            },
        })
    }
}

/// A keyword (like INSERT) or an optionally backtick-quoted identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// The value of the token, without the enclosing backticks
    pub value: String,
    /// `Some('`')` when the identifier was backtick-quoted in the source
    pub quote_style: Option<char>,
    /// If the word was not quoted and it matched one of the known keywords,
    /// this holds the uppercase keyword, otherwise empty
    pub keyword: String,
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.quote_style {
            Some(q) => write!(f, "{}{}{}", q, self.value, q),
            None => f.write_str(&self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Whitespace {
    Space,
    Newline,
    Tab,
    SingleLineComment(String),
    MultiLineComment(String),
}

impl fmt::Display for Whitespace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Whitespace::Space => f.write_str(" "),
            Whitespace::Newline => f.write_str("\n"),
            Whitespace::Tab => f.write_str("\t"),
            Whitespace::SingleLineComment(s) => write!(f, "--{}", s),
            Whitespace::MultiLineComment(s) => write!(f, "/*{}*/", s),
        }
    }
}

/// Tokenizer error, positioned at the character the scanner gave up on
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ScanError {
    pub message: String,
    pub line: u64,
    pub column: u64,
}

/// Dump tokenizer
pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    line: u64,
    col: u64,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given dump text
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the whole input up front
    pub fn tokenize(mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Get the next token or return None at end of input
    pub fn next_token(&mut self) -> Result<Option<Token>, ScanError> {
        match self.chars.peek() {
            Some(&ch) => match ch {
                ' ' => self.consume_and_return(Token::Whitespace(Whitespace::Space)),
                '\t' => self.consume_and_return(Token::Whitespace(Whitespace::Tab)),
                '\n' => self.consume_and_return(Token::Whitespace(Whitespace::Newline)),
                '\r' => {
                    // Emit a single Whitespace::Newline token for \r and \r\n
                    self.next_char();
                    if self.chars.peek() == Some(&'\n') {
                        self.next_char();
                    }
                    Ok(Some(Token::Whitespace(Whitespace::Newline)))
                }
                // identifier or keyword
                ch if is_identifier_start(ch) => {
                    self.next_char(); // consume the first char
                    let s = self.tokenize_word(ch);
                    Ok(Some(Token::make_word(&s, None)))
                }
                // string literals; the value is stored with escapes processed
                '\'' => {
                    let s = self.tokenize_quoted_string('\'')?;
                    Ok(Some(Token::SingleQuotedString(s)))
                }
                '"' => {
                    let s = self.tokenize_quoted_string('"')?;
                    Ok(Some(Token::DoubleQuotedString(s)))
                }
                // backtick-quoted identifier
                '`' => {
                    self.next_char(); // consume the opening backtick
                    let s = self.peeking_take_while(|ch| ch != '`');
                    match self.next_char() {
                        Some('`') => Ok(Some(Token::make_word(&s, Some('`')))),
                        _ => Err(self.error("expected closing ` before end of input")),
                    }
                }
                // numbers
                '0'..='9' => {
                    let s = self.peeking_take_while(|ch| matches!(ch, '0'..='9' | '.'));
                    Ok(Some(Token::Number(s)))
                }
                // punctuation
                '(' => self.consume_and_return(Token::LParen),
                ')' => self.consume_and_return(Token::RParen),
                ',' => self.consume_and_return(Token::Comma),
                ';' => self.consume_and_return(Token::SemiColon),
                '=' => self.consume_and_return(Token::Eq),
                '+' => self.consume_and_return(Token::Plus),
                '.' => self.consume_and_return(Token::Period),
                '-' => {
                    self.next_char(); // consume the '-'
                    match self.chars.peek() {
                        Some(&'-') => {
                            // second '-' starts a single-line comment
                            self.next_char();
                            let mut s = self.peeking_take_while(|ch| ch != '\n');
                            if let Some(ch) = self.next_char() {
                                s.push(ch);
                            }
                            Ok(Some(Token::Whitespace(Whitespace::SingleLineComment(s))))
                        }
                        // a regular '-' sign
                        _ => Ok(Some(Token::Minus)),
                    }
                }
                '/' => {
                    self.next_char(); // consume the '/'
                    match self.chars.peek() {
                        Some(&'*') => {
                            // the '*' starts a multi-line comment; mysqldump
                            // conditional statements (`/*!40101 ... */`) land
                            // here and never reach the parser
                            self.next_char();
                            self.tokenize_multiline_comment()
                        }
                        _ => Ok(Some(Token::Char('/'))),
                    }
                }
                other => self.consume_and_return(Token::Char(other)),
            },
            None => Ok(None),
        }
    }

    /// Tokenize an identifier or keyword, after the first char is already consumed.
    fn tokenize_word(&mut self, first_char: char) -> String {
        let mut s = first_char.to_string();
        s.push_str(&self.peeking_take_while(is_identifier_part));
        s
    }

    /// Read a quoted string literal, processing escapes into the characters
    /// they stand for. A doubled quote is the quote character itself; a
    /// backslash escapes the next character.
    fn tokenize_quoted_string(&mut self, quote: char) -> Result<String, ScanError> {
        let mut s = String::new();
        self.next_char(); // consume the opening quote
        loop {
            match self.chars.peek() {
                Some(&ch) if ch == quote => {
                    self.next_char();
                    if self.chars.peek() == Some(&quote) {
                        self.next_char();
                        s.push(quote);
                    } else {
                        return Ok(s);
                    }
                }
                Some(&'\\') => {
                    self.next_char();
                    match self.next_char() {
                        Some(escaped) => s.push(unescape(escaped)),
                        None => return Err(self.error("unterminated string literal")),
                    }
                }
                Some(&ch) => {
                    self.next_char();
                    s.push(ch);
                }
                None => return Err(self.error("unterminated string literal")),
            }
        }
    }

    fn tokenize_multiline_comment(&mut self) -> Result<Option<Token>, ScanError> {
        let mut s = String::new();
        let mut maybe_closing_comment = false;
        loop {
            match self.next_char() {
                Some(ch) => {
                    if maybe_closing_comment {
                        if ch == '/' {
                            break Ok(Some(Token::Whitespace(Whitespace::MultiLineComment(s))));
                        } else {
                            s.push('*');
                        }
                    }
                    maybe_closing_comment = ch == '*';
                    if !maybe_closing_comment {
                        s.push(ch);
                    }
                }
                None => break Err(self.error("unterminated multi-line comment")),
            }
        }
    }

    fn consume_and_return(&mut self, t: Token) -> Result<Option<Token>, ScanError> {
        self.next_char();
        Ok(Some(t))
    }

    /// Consume one character, keeping the line and column counters current.
    fn next_char(&mut self) -> Option<char> {
        let ch = self.chars.next();
        match ch {
            Some('\n') => {
                self.line += 1;
                self.col = 1;
            }
            Some(_) => self.col += 1,
            None => {}
        }
        ch
    }

    /// Read characters while `predicate` holds or until end of input. Returns
    /// the characters read and leaves the first non-matching char unconsumed.
    fn peeking_take_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(&ch) = self.chars.peek() {
            if predicate(ch) {
                self.next_char();
                s.push(ch);
            } else {
                break;
            }
        }
        s
    }

    fn error(&self, message: &str) -> ScanError {
        ScanError {
            message: message.to_string(),
            line: self.line,
            column: self.col,
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// The escapes mysqldump emits inside quoted strings.
fn unescape(escaped: char) -> char {
    match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

/// Re-quote a string value for display, escaping by doubling the quote.
fn fmt_quoted(f: &mut fmt::Formatter, s: &str, quote: char) -> fmt::Result {
    write!(f, "{}", quote)?;
    for ch in s.chars() {
        if ch == quote {
            write!(f, "{}{}", quote, quote)?;
        } else if ch == '\\' {
            f.write_str("\\\\")?;
        } else {
            write!(f, "{}", ch)?;
        }
    }
    write!(f, "{}", quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matches::assert_matches;

    fn tokenize(input: &str) -> Vec<Token> {
        Tokenizer::new(input).tokenize().expect("tokenize failed")
    }

    fn significant(input: &str) -> Vec<Token> {
        tokenize(input)
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(_)))
            .collect()
    }

    #[test]
    fn tokenizes_insert_fragment() {
        let tokens = significant("INSERT INTO `users` (`id`) VALUES (1);");
        assert_eq!(
            tokens,
            vec![
                Token::make_keyword("INSERT"),
                Token::make_keyword("INTO"),
                Token::make_word("users", Some('`')),
                Token::LParen,
                Token::make_word("id", Some('`')),
                Token::RParen,
                Token::make_keyword("VALUES"),
                Token::LParen,
                Token::Number("1".to_string()),
                Token::RParen,
                Token::SemiColon,
            ]
        );
    }

    #[test]
    fn keyword_detection_is_case_insensitive_and_skips_quoted_words() {
        match tokenize("insert").remove(0) {
            Token::Word(w) => {
                assert_eq!(w.keyword, "INSERT");
                assert_eq!(w.value, "insert");
            }
            other => panic!("expected a word, got {:?}", other),
        }
        match tokenize("`insert`").remove(0) {
            Token::Word(w) => assert_eq!(w.keyword, ""),
            other => panic!("expected a word, got {:?}", other),
        }
    }

    #[test]
    fn doubled_quote_does_not_terminate_string() {
        let tokens = tokenize("'it''s'");
        assert_eq!(tokens, vec![Token::SingleQuotedString("it's".to_string())]);
    }

    #[test]
    fn backslash_escapes_are_processed() {
        let tokens = tokenize(r"'a\'b\\c\nd'");
        assert_eq!(
            tokens,
            vec![Token::SingleQuotedString("a'b\\c\nd".to_string())]
        );
    }

    #[test]
    fn double_quoted_string_is_a_literal() {
        let tokens = tokenize(r#""say \"hi\"""#);
        assert_eq!(
            tokens,
            vec![Token::DoubleQuotedString("say \"hi\"".to_string())]
        );
    }

    #[test]
    fn json_braces_stay_inside_the_literal() {
        let tokens = tokenize(r#"'{"a": 1}'"#);
        assert_eq!(
            tokens,
            vec![Token::SingleQuotedString("{\"a\": 1}".to_string())]
        );
    }

    #[test]
    fn numbers_keep_their_decimal_point() {
        assert_eq!(
            significant("12.5, 42"),
            vec![
                Token::Number("12.5".to_string()),
                Token::Comma,
                Token::Number("42".to_string()),
            ]
        );
    }

    #[test]
    fn comments_become_whitespace() {
        let tokens = tokenize("-- header\n/*!40101 SET NAMES utf8 */;");
        assert_matches!(
            tokens[0],
            Token::Whitespace(Whitespace::SingleLineComment(_))
        );
        assert_matches!(
            tokens[1],
            Token::Whitespace(Whitespace::MultiLineComment(_))
        );
        assert_eq!(tokens[2], Token::SemiColon);
    }

    #[test]
    fn unterminated_string_reports_position() {
        let err = Tokenizer::new("INSERT 'oops").tokenize().unwrap_err();
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn display_round_trips_escaped_content() {
        let token = Token::SingleQuotedString("it's".to_string());
        assert_eq!(token.to_string(), "'it''s'");
        let word = Token::make_word("users", Some('`'));
        assert_eq!(word.to_string(), "`users`");
    }
}
