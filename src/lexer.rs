use crate::token::{Located, Position, Token, TokenKind, KEYWORDS};

/// The Tartak tokenizer.
///
/// Tokens are scanned on demand, one per call to [`Tokenizer::next_token`].
/// The tokenizer is nothing more than a cursor over the source, so a clone is
/// a complete snapshot of its state; [`Tokenizer::peek`] relies on that.
#[derive(Clone)]
pub struct Tokenizer<'src> {
    src: &'src str,
    cursor: usize,
    current_lo: usize,
    pos: Position,
}

impl<'src> Tokenizer<'src> {
    pub fn new(src: &'src str) -> Tokenizer<'src> {
        Tokenizer {
            src,
            cursor: 0,
            current_lo: 0,
            pos: Position::START,
        }
    }

    /// Returns the position of the next unread character.
    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.cursor >= self.src.len()
    }

    /// Scans the next token, skipping any whitespace and comments before it.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, Located<Error>> {
        self.skip_trivia()?;
        let pos = self.pos;
        let Some(c) = self.mark_advance() else {
            return Ok(None);
        };
        let kind = self.scan_token_kind(c).map_err(|error| pos.wrap(error))?;
        Ok(Some(Token::new(kind, self.substr(), pos)))
    }

    /// Returns up to `n` upcoming tokens without consuming them.
    ///
    /// The result is shorter than `n` if the input ends, or if scanning fails,
    /// before `n` tokens are read. Errors are left for `next_token` to report.
    pub fn peek(&self, n: usize) -> Vec<Token> {
        let mut probe = self.clone();
        let mut tokens = Vec::with_capacity(n);
        while tokens.len() < n {
            match probe.next_token() {
                Ok(Some(token)) => tokens.push(token),
                Ok(None) | Err(_) => break,
            }
        }
        tokens
    }

    /// Consumes a single raw character, bypassing tokenization entirely.
    ///
    /// Used by the parser to read the literal text of template strings.
    pub fn next_char(&mut self) -> Option<char> {
        self.advance()
    }

    fn scan_token_kind(&mut self, c: char) -> Result<TokenKind, Error> {
        use TokenKind::*;
        let kind = match c {
            '#' => Hash,
            '?' => Question,
            ';' => Semicolon,
            ':' => Colon,
            '{' => LBrace,
            '}' => RBrace,
            '(' => LParen,
            ')' => RParen,
            '[' => LBracket,
            ']' => RBracket,
            ',' => Comma,
            '.' => Dot,
            '\\' => Backslash,
            '`' => Backtick,
            '=' => match self.peek_char() {
                Some('>') => self.advance_with(FatArrow),
                Some('=') => self.advance_with(EqEq),
                _ => Assign,
            },
            '-' => match self.peek_char() {
                Some('>') => self.advance_with(ThinArrow),
                _ => Minus,
            },
            '!' => match self.peek_char() {
                Some('=') => self.advance_with(BangEq),
                _ => Bang,
            },
            '&' => match self.peek_char() {
                Some('&') => self.advance_with(AndAnd),
                _ => Ampersand,
            },
            '|' => match self.peek_char() {
                Some('|') => self.advance_with(OrOr),
                _ => Pipe,
            },
            '*' => match self.peek_char() {
                Some('*') => self.advance_with(StarStar),
                _ => Star,
            },
            '<' => match self.peek_char() {
                Some('=') => self.advance_with(LessEq),
                _ => Less,
            },
            '>' => match self.peek_char() {
                Some('=') => self.advance_with(GreaterEq),
                _ => Greater,
            },
            '+' => Plus,
            '/' => Slash,
            '%' => Percent,
            '"' | '\'' => self.string(c)?,
            c if c.is_ascii_digit() => self.number(),
            c if is_word_char(c) => self.identifier_or_keyword(),
            c => return Err(Error::UnexpectedChar(c)),
        };
        Ok(kind)
    }

    /// Strings run up to the next matching quote. There are no escapes and
    /// line breaks are allowed.
    fn string(&mut self, quote: char) -> Result<TokenKind, Error> {
        loop {
            match self.advance() {
                Some(c) if c == quote => return Ok(TokenKind::String),
                Some(_) => (),
                None => return Err(Error::UnclosedString),
            }
        }
    }

    fn number(&mut self) -> TokenKind {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        TokenKind::Number
    }

    fn identifier_or_keyword(&mut self) -> TokenKind {
        while self.peek_char().is_some_and(is_word_char) {
            self.advance();
        }
        KEYWORDS
            .get(self.substr())
            .copied()
            .unwrap_or(TokenKind::Identifier)
    }

    fn skip_trivia(&mut self) -> Result<(), Located<Error>> {
        loop {
            match (self.peek_char(), self.peek_second_char()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => self.inline_comment(),
                (Some('/'), Some('*')) => self.multiline_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn inline_comment(&mut self) {
        while self.peek_char().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn multiline_comment(&mut self) -> Result<(), Located<Error>> {
        let start = self.pos;
        self.advance(); // `/`
        self.advance(); // `*`
        loop {
            match self.advance() {
                Some('*') if self.peek_char() == Some('/') => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => (),
                None => return Err(start.wrap(Error::UnclosedComment)),
            }
        }
    }
}

impl<'src> Tokenizer<'src> {
    /// Starts a new token "mark" and advances.
    fn mark_advance(&mut self) -> Option<char> {
        self.current_lo = self.cursor;
        self.advance()
    }

    /// Returns the next character and advances, keeping the position in sync.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.cursor += c.len_utf8();
        self.pos.advance(c);
        Some(c)
    }

    /// Advances and returns the provided value.
    fn advance_with<T>(&mut self, value: T) -> T {
        self.advance();
        value
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.cursor..].chars().next()
    }

    fn peek_second_char(&self) -> Option<char> {
        self.src[self.cursor..].chars().nth(1)
    }

    /// Returns the substring of the current marked bounds.
    fn substr(&self) -> &'src str {
        &self.src[self.current_lo..self.cursor]
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, Located<Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("unclosed string literal")]
    UnclosedString,
    #[error("unclosed block comment")]
    UnclosedComment,
}
