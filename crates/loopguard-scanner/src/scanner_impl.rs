//! Scanner implementation: turns source text into a stream of tokens.
//!
//! The scanner is pull-based: the parser calls `scan()` for the next token
//! and uses the `re_scan_*` methods where the same characters tokenize
//! differently depending on syntactic context (`>` in type arguments vs.
//! shift operators, `/` as division vs. a regular expression, `}` closing a
//! template substitution).

use crate::SyntaxKind;
use loopguard_common::{diagnostic_codes, format_message, get_message_template};

/// A lexical error with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanError {
    pub code: u32,
    pub start: u32,
    pub length: u32,
    pub message: String,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    preceding_line_break: bool,
    error_count: usize,
}

/// Tokenizer state over one source text.
pub struct ScannerState {
    text: String,
    /// Current offset (end of the current token once scanned)
    pos: usize,
    /// Start of the current token (after trivia)
    token_start: usize,
    token: SyntaxKind,
    /// Identifier name, cooked string contents, or raw literal text
    token_value: String,
    /// A line terminator appeared in the trivia before the current token
    preceding_line_break: bool,
    errors: Vec<ScanError>,
}

fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    ch == '$' || ch == '_' || ch == '\u{200C}' || ch == '\u{200D}' || ch.is_alphanumeric()
}

fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        ScannerState {
            text,
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            preceding_line_break: false,
            errors: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    pub fn token_pos(&self) -> u32 {
        self.token_start as u32
    }

    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.errors)
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            error_count: self.errors.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.errors.truncate(snapshot.error_count);
    }

    // =========================================================================
    // Character access
    // =========================================================================

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn byte_at(&self, pos: usize) -> u8 {
        self.text.as_bytes().get(pos).copied().unwrap_or(0)
    }

    fn error(&mut self, code: u32, start: usize, length: usize, args: &[&str]) {
        let template = get_message_template(code).unwrap_or("Unexpected token.");
        self.errors.push(ScanError {
            code,
            start: start as u32,
            length: length as u32,
            message: format_message(template, args),
        });
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Scan the next token, skipping whitespace and comments.
    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        self.token_value.clear();
        loop {
            self.token_start = self.pos;
            let Some(ch) = self.char_at(self.pos) else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };
            match ch {
                c if is_line_break(c) => {
                    self.preceding_line_break = true;
                    self.pos += c.len_utf8();
                }
                '/' if self.byte_at(self.pos + 1) == b'/' => self.skip_line_comment(),
                '/' if self.byte_at(self.pos + 1) == b'*' => self.skip_block_comment(),
                '#' if self.pos == 0 && self.byte_at(1) == b'!' => self.skip_line_comment(),
                c if c.is_whitespace() || c == '\u{FEFF}' => self.pos += c.len_utf8(),
                _ => {
                    self.token = self.scan_token(ch);
                    return self.token;
                }
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.char_at(self.pos) {
            if is_line_break(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn skip_block_comment(&mut self) {
        let body_start = self.pos + 2;
        match self.text.get(body_start..).and_then(|rest| rest.find("*/")) {
            Some(offset) => {
                let body = &self.text[body_start..body_start + offset];
                if body.chars().any(is_line_break) {
                    self.preceding_line_break = true;
                }
                self.pos = body_start + offset + 2;
            }
            None => {
                let start = self.pos;
                self.pos = self.text.len();
                self.error(diagnostic_codes::TOKEN_EXPECTED, start, 2, &["*/"]);
            }
        }
    }

    fn punct(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    fn scan_token(&mut self, ch: char) -> SyntaxKind {
        use SyntaxKind::*;
        let b1 = self.byte_at(self.pos + 1);
        let b2 = self.byte_at(self.pos + 2);
        match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => {
                self.pos += 1;
                self.scan_template_continuation(true)
            }
            '0'..='9' => self.scan_number(),
            '.' if b1.is_ascii_digit() => self.scan_number(),
            '.' if b1 == b'.' && b2 == b'.' => self.punct(3, DotDotDotToken),
            '.' => self.punct(1, DotToken),
            '{' => self.punct(1, OpenBraceToken),
            '}' => self.punct(1, CloseBraceToken),
            '(' => self.punct(1, OpenParenToken),
            ')' => self.punct(1, CloseParenToken),
            '[' => self.punct(1, OpenBracketToken),
            ']' => self.punct(1, CloseBracketToken),
            ';' => self.punct(1, SemicolonToken),
            ',' => self.punct(1, CommaToken),
            '~' => self.punct(1, TildeToken),
            '@' => self.punct(1, AtToken),
            ':' => self.punct(1, ColonToken),
            '?' => match (b1, b2) {
                (b'.', d) if !d.is_ascii_digit() => self.punct(2, QuestionDotToken),
                (b'?', b'=') => self.punct(3, QuestionQuestionEqualsToken),
                (b'?', _) => self.punct(2, QuestionQuestionToken),
                _ => self.punct(1, QuestionToken),
            },
            '<' => match (b1, b2) {
                (b'<', b'=') => self.punct(3, LessThanLessThanEqualsToken),
                (b'<', _) => self.punct(2, LessThanLessThanToken),
                (b'=', _) => self.punct(2, LessThanEqualsToken),
                _ => self.punct(1, LessThanToken),
            },
            // Always a single `>`; the parser re-scans in expression context
            '>' => self.punct(1, GreaterThanToken),
            '=' => match (b1, b2) {
                (b'=', b'=') => self.punct(3, EqualsEqualsEqualsToken),
                (b'=', _) => self.punct(2, EqualsEqualsToken),
                (b'>', _) => self.punct(2, EqualsGreaterThanToken),
                _ => self.punct(1, EqualsToken),
            },
            '!' => match (b1, b2) {
                (b'=', b'=') => self.punct(3, ExclamationEqualsEqualsToken),
                (b'=', _) => self.punct(2, ExclamationEqualsToken),
                _ => self.punct(1, ExclamationToken),
            },
            '+' => match b1 {
                b'+' => self.punct(2, PlusPlusToken),
                b'=' => self.punct(2, PlusEqualsToken),
                _ => self.punct(1, PlusToken),
            },
            '-' => match b1 {
                b'-' => self.punct(2, MinusMinusToken),
                b'=' => self.punct(2, MinusEqualsToken),
                _ => self.punct(1, MinusToken),
            },
            '*' => match (b1, b2) {
                (b'*', b'=') => self.punct(3, AsteriskAsteriskEqualsToken),
                (b'*', _) => self.punct(2, AsteriskAsteriskToken),
                (b'=', _) => self.punct(2, AsteriskEqualsToken),
                _ => self.punct(1, AsteriskToken),
            },
            '/' => match b1 {
                b'=' => self.punct(2, SlashEqualsToken),
                _ => self.punct(1, SlashToken),
            },
            '%' => match b1 {
                b'=' => self.punct(2, PercentEqualsToken),
                _ => self.punct(1, PercentToken),
            },
            '&' => match (b1, b2) {
                (b'&', b'=') => self.punct(3, AmpersandAmpersandEqualsToken),
                (b'&', _) => self.punct(2, AmpersandAmpersandToken),
                (b'=', _) => self.punct(2, AmpersandEqualsToken),
                _ => self.punct(1, AmpersandToken),
            },
            '|' => match (b1, b2) {
                (b'|', b'=') => self.punct(3, BarBarEqualsToken),
                (b'|', _) => self.punct(2, BarBarToken),
                (b'=', _) => self.punct(2, BarEqualsToken),
                _ => self.punct(1, BarToken),
            },
            '^' => match b1 {
                b'=' => self.punct(2, CaretEqualsToken),
                _ => self.punct(1, CaretToken),
            },
            '#' if self.char_at(self.pos + 1).is_some_and(is_identifier_start) => {
                self.pos += 1;
                self.scan_identifier_rest();
                PrivateIdentifier
            }
            c if is_identifier_start(c) => {
                self.scan_identifier_rest();
                SyntaxKind::keyword_from_text(&self.token_value).unwrap_or(Identifier)
            }
            c => {
                let start = self.pos;
                self.pos += c.len_utf8();
                self.error(
                    diagnostic_codes::INVALID_CHARACTER,
                    start,
                    c.len_utf8(),
                    &[],
                );
                Unknown
            }
        }
    }

    fn scan_identifier_rest(&mut self) {
        let start = self.pos;
        while let Some(ch) = self.char_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value = self.text[start..self.pos].to_string();
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.error(
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                    start,
                    self.pos - start,
                    &[],
                );
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\n' || ch == '\r' {
                self.error(
                    diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                    start,
                    self.pos - start,
                    &[],
                );
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                match self.char_at(self.pos) {
                    Some(escaped) => {
                        self.pos += escaped.len_utf8();
                        match escaped {
                            'n' => value.push('\n'),
                            't' => value.push('\t'),
                            'r' => value.push('\r'),
                            'b' => value.push('\u{8}'),
                            'f' => value.push('\u{c}'),
                            'v' => value.push('\u{b}'),
                            '0' => value.push('\0'),
                            // Line continuation
                            c if is_line_break(c) => {
                                if c == '\r' && self.byte_at(self.pos) == b'\n' {
                                    self.pos += 1;
                                }
                            }
                            other => value.push(other),
                        }
                    }
                    None => continue,
                }
                continue;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    /// Scan template text starting just after a backtick or a `}`.
    fn scan_template_continuation(&mut self, from_backtick: bool) -> SyntaxKind {
        let start = self.token_start;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.error(
                    diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
                    start,
                    self.pos - start,
                    &[],
                );
                self.token_value = value;
                return if from_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    self.token_value = value;
                    return if from_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.byte_at(self.pos + 1) == b'{' => {
                    self.pos += 2;
                    self.token_value = value;
                    return if from_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => {
                    value.push('\\');
                    self.pos += 1;
                    if let Some(escaped) = self.char_at(self.pos) {
                        value.push(escaped);
                        self.pos += escaped.len_utf8();
                    }
                }
                other => {
                    value.push(other);
                    self.pos += other.len_utf8();
                }
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let b1 = self.byte_at(self.pos + 1);
        if self.byte_at(self.pos) == b'0' && matches!(b1, b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
        {
            self.pos += 2;
            while self.byte_at(self.pos).is_ascii_alphanumeric() || self.byte_at(self.pos) == b'_'
            {
                if self.byte_at(self.pos) == b'n' {
                    break;
                }
                self.pos += 1;
            }
        } else {
            self.consume_decimal_digits();
            if self.byte_at(self.pos) == b'.' {
                self.pos += 1;
                self.consume_decimal_digits();
            }
            if matches!(self.byte_at(self.pos), b'e' | b'E') {
                let after = self.byte_at(self.pos + 1);
                let sign = matches!(after, b'+' | b'-');
                let digit_at = if sign { self.pos + 2 } else { self.pos + 1 };
                if self.byte_at(digit_at).is_ascii_digit() {
                    self.pos = digit_at;
                    self.consume_decimal_digits();
                }
            }
        }
        let kind = if self.byte_at(self.pos) == b'n' {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = self.text[start..self.pos].to_string();
        kind
    }

    fn consume_decimal_digits(&mut self) {
        while self.byte_at(self.pos).is_ascii_digit() || self.byte_at(self.pos) == b'_' {
            self.pos += 1;
        }
    }

    // =========================================================================
    // Re-scanning
    // =========================================================================

    /// Combine a `>` token with following `>`/`=` characters into the
    /// longest comparison/shift operator.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        use SyntaxKind::*;
        if self.token != GreaterThanToken {
            return self.token;
        }
        let b0 = self.byte_at(self.pos);
        let b1 = self.byte_at(self.pos + 1);
        let b2 = self.byte_at(self.pos + 2);
        self.token = match (b0, b1, b2) {
            (b'>', b'>', b'=') => self.punct(3, GreaterThanGreaterThanGreaterThanEqualsToken),
            (b'>', b'>', _) => self.punct(2, GreaterThanGreaterThanGreaterThanToken),
            (b'>', b'=', _) => self.punct(2, GreaterThanGreaterThanEqualsToken),
            (b'>', _, _) => self.punct(1, GreaterThanGreaterThanToken),
            (b'=', _, _) => self.punct(1, GreaterThanEqualsToken),
            _ => GreaterThanToken,
        };
        self.token
    }

    /// Re-scan a `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(
            self.token,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
        ) {
            return self.token;
        }
        let start = self.token_start;
        self.pos = start + 1;
        let mut in_class = false;
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.error(
                    diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                    start,
                    self.pos - start,
                    &[],
                );
                break;
            };
            if is_line_break(ch) {
                self.error(
                    diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                    start,
                    self.pos - start,
                    &[],
                );
                break;
            }
            self.pos += ch.len_utf8();
            match ch {
                '\\' => {
                    if let Some(escaped) = self.char_at(self.pos)
                        && !is_line_break(escaped)
                    {
                        self.pos += escaped.len_utf8();
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        while let Some(ch) = self.char_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value = self.text[start..self.pos].to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    /// Re-scan a `}` that closes a template substitution as the next
    /// template middle or tail.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.token = self.scan_template_continuation(false);
        self.token
    }
}
