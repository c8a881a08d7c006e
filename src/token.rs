use std::fmt;

#[derive(Clone)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Token {
    pub kind: TokenKind,
    /// The matched source text. String tokens keep their quotes.
    pub value: Box<str>,
    /// Where the token starts.
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<Box<str>>, pos: Position) -> Token {
        Token {
            kind,
            value: value.into(),
            pos,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?}, {:?}, {})", self.kind, self.value, self.pos)
    }
}

/// A 1-based line and column pair.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const START: Position = Position { line: 1, column: 1 };

    pub fn new(line: u32, column: u32) -> Position {
        Position { line, column }
    }

    /// Moves the position past the given character.
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    pub fn wrap<T>(self, inner: T) -> Located<T> {
        Located { pos: self, inner }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({self})")
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A value tagged with the source position it refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Located<T> {
    pub pos: Position,
    pub inner: T,
}

impl<T> Located<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Located<U> {
        Located {
            pos: self.pos,
            inner: f(self.inner),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Located<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.inner)
    }
}

impl<T> std::error::Error for Located<T>
where
    T: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Let,
    Match,
    Infer,
    Extends,
    /// The `number` keyword.
    NumberKeyword,
    /// The `string` keyword.
    StringKeyword,
    Type,
    If,
    Then,
    Else,
    Export,
    Import,
    From,
    In,
    As,

    /// `#`
    Hash,
    /// `?`
    Question,
    Semicolon,
    Colon,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    /// `=>`
    FatArrow,
    /// `->`
    ThinArrow,
    /// `\`
    Backslash,
    /// `` ` ``, opens a template string.
    Backtick,

    /// `=`
    Assign,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Bang,
    Plus,
    Minus,
    Star,
    /// `**`
    StarStar,
    Slash,
    Percent,
    /// `|`
    Pipe,
    /// `&`
    Ampersand,
    Less,
    LessEq,
    Greater,
    GreaterEq,

    Identifier,
    Number,
    String,
}

pub static KEYWORDS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "let" => TokenKind::Let,
    "match" => TokenKind::Match,
    "infer" => TokenKind::Infer,
    "extends" => TokenKind::Extends,
    "number" => TokenKind::NumberKeyword,
    "string" => TokenKind::StringKeyword,
    "type" => TokenKind::Type,
    "if" => TokenKind::If,
    "then" => TokenKind::Then,
    "else" => TokenKind::Else,
    "export" => TokenKind::Export,
    "import" => TokenKind::Import,
    "from" => TokenKind::From,
    "in" => TokenKind::In,
    "as" => TokenKind::As,
};
