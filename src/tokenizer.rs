//! The document tokenizer.
//!
//! Splits QJSON input into delimiter and string tokens, skipping
//! whitespace and comments between them. `next_token` is the only way
//! input is consumed; once it reports an error it keeps reporting the
//! same error, so the document builder never runs past a failure.

use crate::error::ErrorKind;
use crate::token::{Position, Token, TokenKind, TokenValue};
use crate::utf8;

/// A positioned scanner failure, converted into an `Error` token by
/// `next_token`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PosError {
    pub pos: Position,
    pub kind: ErrorKind,
}

pub(crate) struct Tokenizer<'a> {
    input: &'a [u8],
    pos: Position,
    token: Token<'a>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            input,
            pos: Position::default(),
            token: Token::default(),
        }
    }

    /// The most recent token produced by [`Tokenizer::next_token`].
    pub(crate) fn token(&self) -> Token<'a> {
        self.token
    }

    pub(crate) fn set_token(&mut self, token: Token<'a>) {
        self.token = token;
    }

    fn rest(&self) -> &'a [u8] {
        &self.input[self.pos.byte..]
    }

    fn pop_bytes(&mut self, n: usize) {
        self.pos.byte += n;
    }

    /// Pops a `\n` or `\r\n`, updating the line bookkeeping. A lone `\r`
    /// is left in place.
    fn pop_newline(&mut self) -> bool {
        let n = utf8::newline_len(self.rest());
        if n == 0 {
            return false;
        }
        self.pos.line_start = self.pos.byte + n;
        self.pos.line += 1;
        self.pop_bytes(n);
        true
    }

    /// Validated length of the character at the cursor.
    fn char_len(&self) -> Result<usize, PosError> {
        utf8::char_len(self.rest()).map_err(|kind| PosError {
            pos: self.pos,
            kind,
        })
    }

    fn skip_whitespace(&mut self) {
        loop {
            let n = utf8::whitespace_len(self.rest());
            if n == 0 {
                return;
            }
            self.pop_bytes(n);
        }
    }

    /// Pops everything through the next newline, or to end of input.
    fn skip_rest_of_line(&mut self) -> Result<(), PosError> {
        loop {
            if self.pop_newline() || self.rest().is_empty() {
                return Ok(());
            }
            let n = self.char_len()?;
            self.pop_bytes(n);
        }
    }

    /// Skips a `#...` or `//...` comment. Returns whether one was found.
    fn skip_line_comment(&mut self) -> Result<bool, PosError> {
        let p = self.rest();
        if p.first() == Some(&b'#') || (p.len() >= 2 && p[0] == b'/' && p[1] == b'/') {
            self.skip_rest_of_line()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Skips a `/*...*/` comment, which may span lines and contain raw
    /// control bytes. Returns whether one was found.
    fn skip_block_comment(&mut self) -> Result<bool, PosError> {
        let p = self.rest();
        if p.len() < 2 || p[0] != b'/' || p[1] != b'*' {
            return Ok(false);
        }
        let start = self.pos;
        self.pop_bytes(2);
        loop {
            let p = self.rest();
            if p.is_empty() {
                return Err(PosError {
                    pos: start,
                    kind: ErrorKind::UnclosedSlashStarComment,
                });
            }
            if p.len() >= 2 && p[0] == b'*' && p[1] == b'/' {
                self.pop_bytes(2);
                return Ok(true);
            }
            if self.pop_newline() {
                continue;
            }
            if p[0] < 0x20 {
                self.pop_bytes(1);
                continue;
            }
            let n = self.char_len()?;
            self.pop_bytes(n);
        }
    }

    /// Skips whitespace, comments and newlines up to the next token.
    fn skip_spaces(&mut self) -> Result<(), PosError> {
        while !self.rest().is_empty() {
            self.skip_whitespace();
            if self.skip_line_comment()? {
                continue;
            }
            if self.skip_block_comment()? {
                continue;
            }
            if !self.pop_newline() {
                break;
            }
        }
        Ok(())
    }

    /// Scans a quoted string. Only the quote character itself can be
    /// escaped; every other backslash is kept raw for the emitter.
    fn quoted_string(
        &mut self,
        quote: u8,
        unclosed: ErrorKind,
        newline_in: ErrorKind,
    ) -> Result<Option<&'a [u8]>, PosError> {
        let start = self.pos;
        if self.rest().first() != Some(&quote) {
            return Ok(None);
        }
        self.pop_bytes(1);
        loop {
            let p = self.rest();
            if p.is_empty() {
                return Err(PosError {
                    pos: start,
                    kind: unclosed,
                });
            }
            if p[0] == b'\\' && p.len() >= 2 && p[1] == quote {
                self.pop_bytes(2);
                continue;
            }
            if p[0] == quote {
                self.pop_bytes(1);
                return Ok(Some(&self.input[start.byte..self.pos.byte]));
            }
            if utf8::newline_len(p) != 0 {
                return Err(PosError {
                    pos: start,
                    kind: newline_in,
                });
            }
            let n = self.char_len()?;
            self.pop_bytes(n);
        }
    }

    /// Scans an unquoted string run. It ends at a structural delimiter,
    /// a newline, or a comment start; a lone `\r` and a `/` that does not
    /// open a comment are ordinary content. Trailing whitespace is
    /// excluded from the returned slice.
    fn quoteless_string(&mut self) -> Result<&'a [u8], PosError> {
        fn is_stop(b: u8) -> bool {
            matches!(
                b,
                b'\n' | b'\r' | b'#' | b',' | b'/' | b':' | b'[' | b']' | b'{' | b'}'
            )
        }
        let start = self.pos.byte;
        let mut end = start;
        loop {
            let p = self.rest();
            if p.is_empty() {
                break;
            }
            if utf8::whitespace_len(p) != 0 {
                self.skip_whitespace();
                continue;
            }
            if is_stop(p[0]) {
                let comment = p[0] == b'/' && p.len() >= 2 && (p[1] == b'/' || p[1] == b'*');
                if comment || utf8::newline_len(p) != 0 || (p[0] != b'\r' && p[0] != b'/') {
                    break;
                }
            }
            let n = self.char_len()?;
            self.pop_bytes(n);
            end = self.pos.byte;
        }
        Ok(&self.input[start..end])
    }

    /// Scans a backtick multiline string. The returned slice covers the
    /// whole construct from the start of the opening line (margin
    /// included) through the closing backtick, so the emitter can
    /// re-parse the header.
    fn multiline_string(&mut self) -> Result<Option<&'a [u8]>, PosError> {
        if self.rest().first() != Some(&b'`') {
            return Ok(None);
        }
        let line = &self.input[self.pos.line_start..self.pos.byte];
        let margin_end = self.pos.line_start + margin_len(line);
        if margin_end != self.pos.byte {
            return Err(PosError {
                pos: Position {
                    byte: margin_end,
                    line_start: self.pos.line_start,
                    line: self.pos.line,
                },
                kind: ErrorKind::MarginMustBeWhitespaceOnly,
            });
        }
        let margin = &self.input[self.pos.line_start..margin_end];
        let start = self.pos;
        self.pop_bytes(1);
        self.skip_whitespace();
        if self.rest().is_empty() {
            return Err(PosError {
                pos: start,
                kind: ErrorKind::MissingNewlineSpecifier,
            });
        }
        let n = newline_specifier_len(self.rest());
        if n == 0 {
            return Err(PosError {
                pos: start,
                kind: ErrorKind::InvalidNewlineSpecifier,
            });
        }
        self.pop_bytes(n);
        self.skip_whitespace();
        if !self.pop_newline() {
            if !self.skip_line_comment()? {
                return Err(PosError {
                    pos: start,
                    kind: ErrorKind::InvalidMultilineStart,
                });
            }
        }
        if self.rest().is_empty() {
            return Err(PosError {
                pos: start,
                kind: ErrorKind::UnclosedMultiline,
            });
        }
        let n = matching_margin_len(margin, self.rest());
        if n != margin.len() {
            return Err(self.margin_error(n));
        }
        self.pop_bytes(n);
        while !self.rest().is_empty() {
            if self.pop_newline() {
                let n = matching_margin_len(margin, self.rest());
                if n != margin.len() {
                    return Err(self.margin_error(n));
                }
                if n > 0 {
                    self.pop_bytes(n);
                }
                continue;
            }
            let p = self.rest();
            if p[0] < 0x20 {
                self.pop_bytes(1);
                continue;
            }
            if p[0] == b'`' {
                self.pop_bytes(1);
                let p = self.rest();
                if p.is_empty() || p[0] != b'\\' {
                    // reached the end of the multiline
                    return Ok(Some(&self.input[start.line_start..self.pos.byte]));
                }
                continue;
            }
            let n = self.char_len()?;
            self.pop_bytes(n);
        }
        Err(PosError {
            pos: start,
            kind: ErrorKind::UnclosedMultiline,
        })
    }

    fn margin_error(&self, matched: usize) -> PosError {
        PosError {
            pos: Position {
                byte: self.pos.byte + matched,
                line_start: self.pos.line_start,
                line: self.pos.line,
            },
            kind: ErrorKind::InvalidMarginChar,
        }
    }

    /// Pops a structural delimiter if one is at the cursor.
    fn delimiter(&mut self) -> Option<TokenKind> {
        let kind = match self.rest().first()? {
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'[' => TokenKind::OpenSquare,
            b']' => TokenKind::CloseSquare,
            b'{' => TokenKind::OpenBrace,
            b'}' => TokenKind::CloseBrace,
            _ => return None,
        };
        self.pop_bytes(1);
        Some(kind)
    }

    fn error_token(&mut self, err: PosError) {
        self.token = Token {
            kind: TokenKind::Error,
            pos: err.pos,
            value: TokenValue::Err(err.kind),
        };
    }

    /// Advances to the next token, or to an `Error` token on failure or
    /// end of input. Idempotent once an error has been reached.
    pub(crate) fn next_token(&mut self) {
        if self.token.kind == TokenKind::Error {
            return;
        }
        if let Err(err) = self.skip_spaces() {
            self.error_token(err);
            return;
        }
        let token_pos = self.pos;
        if self.rest().is_empty() {
            self.error_token(PosError {
                pos: self.pos,
                kind: ErrorKind::EndOfInput,
            });
            return;
        }
        if let Some(kind) = self.delimiter() {
            self.token = Token {
                kind,
                pos: token_pos,
                value: TokenValue::None,
            };
            return;
        }
        let double = self.quoted_string(
            b'"',
            ErrorKind::UnclosedDoubleQuoteString,
            ErrorKind::NewlineInDoubleQuoteString,
        );
        match double {
            Err(err) => return self.error_token(err),
            Ok(Some(s)) => {
                self.token = Token {
                    kind: TokenKind::DoubleQuoted,
                    pos: token_pos,
                    value: TokenValue::Bytes(s),
                };
                return;
            }
            Ok(None) => {}
        }
        let single = self.quoted_string(
            b'\'',
            ErrorKind::UnclosedSingleQuoteString,
            ErrorKind::NewlineInSingleQuoteString,
        );
        match single {
            Err(err) => return self.error_token(err),
            Ok(Some(s)) => {
                self.token = Token {
                    kind: TokenKind::SingleQuoted,
                    pos: token_pos,
                    value: TokenValue::Bytes(s),
                };
                return;
            }
            Ok(None) => {}
        }
        match self.multiline_string() {
            Err(err) => return self.error_token(err),
            Ok(Some(s)) => {
                self.token = Token {
                    kind: TokenKind::Multiline,
                    pos: token_pos,
                    value: TokenValue::Bytes(s),
                };
                return;
            }
            Ok(None) => {}
        }
        match self.quoteless_string() {
            Err(err) => self.error_token(err),
            Ok(s) => {
                self.token = Token {
                    kind: TokenKind::Quoteless,
                    pos: token_pos,
                    value: TokenValue::Bytes(s),
                };
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn pos(&self) -> Position {
        self.pos
    }

    #[cfg(test)]
    fn seek(&mut self, pos: Position) {
        self.pos = pos;
    }
}

/// Byte length of the whitespace prefix of `line`.
fn margin_len(line: &[u8]) -> usize {
    let mut n = 0;
    loop {
        let w = utf8::whitespace_len(&line[n..]);
        if w == 0 {
            return n;
        }
        n += w;
    }
}

/// Byte length of the `\n` (2) or `\r\n` (4) escape sequence opening a
/// multiline body, 0 if neither is present.
fn newline_specifier_len(p: &[u8]) -> usize {
    if p.first() == Some(&b'\\') {
        if p.len() >= 2 && p[1] == b'n' {
            return 2;
        }
        if p.len() >= 4 && p[1] == b'r' && p[2] == b'\\' && p[3] == b'n' {
            return 4;
        }
    }
    0
}

/// Number of leading bytes of `line` matching `margin`.
fn matching_margin_len(margin: &[u8], line: &[u8]) -> usize {
    let n = margin.len().min(line.len());
    for i in 0..n {
        if margin[i] != line[i] {
            return i;
        }
    }
    n
}
