use crate::{
    ast::*,
    lexer::{self, Tokenizer},
    token::{Located, Position, Token, TokenKind},
};

type Result<T, E = SyntaxError> = std::result::Result<T, E>;

pub type SyntaxError = Located<Error>;

/// Statements starting with this identifier are assertions.
const ASSERT_EQUAL: &str = "AssertEqual";

pub fn parse_program(src: &str) -> Result<Program> {
    Parser::new(src)?.parse_program()
}

/// Parses a single expression, which must span the entire input.
pub fn parse_expr(src: &str) -> Result<Expr> {
    let mut p = Parser::new(src)?;
    let expr = p.parse_expr()?;
    if let Some((actual, pos)) = p.peek_token() {
        return Err(pos.wrap(Error::TrailingInput { actual }));
    }
    Ok(expr)
}

/// A recursive descent parser over a lazily scanned token stream.
///
/// The parser holds a single token of lookahead. Productions that need more
/// context (lambdas and mapped types) peek further through the tokenizer,
/// which never disturbs the stream.
struct Parser<'src> {
    tokenizer: Tokenizer<'src>,
    lookahead: Option<Token>,
}

impl Parser<'_> {
    fn parse_program(&mut self) -> Result<Program> {
        let mut body = Vec::with_capacity(8);
        while let Some((kind, pos)) = self.peek_token() {
            let item = match kind {
                TokenKind::Type | TokenKind::Export => {
                    TopLevel::Definition(self.parse_definition()?)
                }
                TokenKind::Hash => TopLevel::Section(self.parse_section()?),
                TokenKind::Import => TopLevel::Import(self.parse_import()?),
                actual => return Err(pos.wrap(Error::UnexpectedTopLevel { actual })),
            };
            body.push(item);
        }
        if body.is_empty() {
            return Err(Position::START.wrap(Error::EmptyProgram));
        }
        Ok(Program { body })
    }

    fn parse_definition(&mut self) -> Result<Definition> {
        let pos = self.current_pos();
        let exported = self.take(TokenKind::Export)?;
        self.consume(TokenKind::Type)?;
        let name = self.parse_ident()?;
        let params = if self.is(TokenKind::LParen) {
            self.parse_param_list()?
        } else {
            Vec::new()
        };
        self.consume(TokenKind::Assign)?;
        let body = self.parse_expr()?;
        self.take(TokenKind::Semicolon)?;
        Ok(Definition {
            name,
            params,
            body,
            exported,
            pos,
        })
    }

    fn parse_section(&mut self) -> Result<Section> {
        let pos = self.current_pos();
        self.consume(TokenKind::Hash)?;
        self.consume(TokenKind::LBracket)?;
        let name = self.parse_ident()?;
        self.consume(TokenKind::RBracket)?;
        let body = self.parse_block()?;
        Ok(Section { name, body, pos })
    }

    fn parse_import(&mut self) -> Result<ImportStatement> {
        let pos = self.current_pos();
        self.consume(TokenKind::Import)?;
        self.consume(TokenKind::LBrace)?;
        let symbols = self.parse_separated(TokenKind::Comma, Self::parse_ident)?;
        self.consume(TokenKind::RBrace)?;
        self.consume(TokenKind::From)?;
        let source = self.parse_string()?;
        self.take(TokenKind::Semicolon)?;
        Ok(ImportStatement {
            symbols,
            source,
            pos,
        })
    }

    fn parse_param_list(&mut self) -> Result<Vec<Param>> {
        self.consume(TokenKind::LParen)?;
        let params = self.parse_separated(TokenKind::Comma, Self::parse_param)?;
        self.consume(TokenKind::RParen)?;
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Param> {
        let pos = self.current_pos();
        let name = self.parse_ident()?;
        let bound = if self.take(TokenKind::Colon)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Param { name, bound, pos })
    }

    /// Parses `: { statement+ }`.
    fn parse_block(&mut self) -> Result<Vec<Statement>> {
        self.consume(TokenKind::Colon)?;
        self.consume(TokenKind::LBrace)?;
        let mut body = vec![self.parse_statement()?];
        while self.peek_kind().is_some_and(|kind| kind != TokenKind::RBrace) {
            body.push(self.parse_statement()?);
        }
        self.consume(TokenKind::RBrace)?;
        Ok(body)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        let pos = self.current_pos();
        let is_assertion = self
            .lookahead
            .as_ref()
            .is_some_and(|t| t.is(TokenKind::Identifier) && &*t.value == ASSERT_EQUAL);

        let kind = if is_assertion {
            self.advance()?;
            self.consume(TokenKind::LParen)?;
            let left = self.parse_expr()?;
            self.consume(TokenKind::Comma)?;
            let right = self.parse_expr()?;
            self.consume(TokenKind::RParen)?;
            StatementKind::AssertEqual { left, right }
        } else if self.take(TokenKind::Let)? {
            let name = self.parse_ident()?;
            self.consume(TokenKind::Assign)?;
            let value = self.parse_expr()?;
            StatementKind::VariableDeclaration { name, value }
        } else {
            StatementKind::Expression(self.parse_expr()?)
        };
        self.take(TokenKind::Semicolon)?;
        Ok(Statement { kind, pos })
    }

    fn parse_ident(&mut self) -> Result<Box<str>> {
        self.consume(TokenKind::Identifier).map(|token| token.value)
    }

    fn parse_string(&mut self) -> Result<Box<str>> {
        self.consume(TokenKind::String)
            .map(|token| strip_quotes(&token.value))
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr> {
        let mut lhs = self.parse_nud()?;

        while let Some(kind) = self.peek_kind() {
            let Some((lbp, rbp)) = Self::infix_binding_power(kind) else {
                // Not an infix operator
                break;
            };
            if lbp < min_bp {
                // Operator binds less tightly than the minimum required
                break;
            }
            let op_token = self.advance()?;
            lhs = self.parse_led(op_token, lhs, rbp)?;
        }

        Ok(lhs)
    }

    /// nud: Parses tokens that start an expression
    /// (prefix operators, literals, grouping)
    fn parse_nud(&mut self) -> Result<Expr> {
        let Some((kind, pos)) = self.peek_token() else {
            return Err(self.tokenizer.position().wrap(Error::UnexpectedEofInExpr));
        };

        // Template strings are read character by character, so the opening
        // backtick must stay the lookahead until `parse_template_string` runs.
        if kind == TokenKind::Backtick {
            return self.parse_template_string(pos);
        }
        if self.is_lambda() {
            return self.parse_lambda(pos);
        }
        if let Some(((), rbp)) = Self::prefix_binding_power(kind) {
            self.advance()?;
            let op = match kind {
                TokenKind::Minus => UnaryOperator::Negate,
                TokenKind::Plus => UnaryOperator::Plus,
                _ => UnaryOperator::Not,
            };
            let expr = self.parse_expr_bp(rbp)?;
            let kind = ExprKind::Unary {
                op,
                expr: Box::new(expr),
            };
            return Ok(Expr { kind, pos });
        }

        let kind = match kind {
            TokenKind::Identifier => ExprKind::Identifier(self.advance()?.value),
            TokenKind::Number => ExprKind::Number(self.advance()?.value),
            TokenKind::String => ExprKind::String(self.parse_string()?),
            TokenKind::NumberKeyword => {
                self.advance()?;
                ExprKind::NumberKeyword
            }
            TokenKind::StringKeyword => {
                self.advance()?;
                ExprKind::StringKeyword
            }

            // Grouping: ( expr )
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expr()?;
                self.consume(TokenKind::RParen)?;
                return Ok(expr);
            }

            // Tuple: [ expr, ... ]
            TokenKind::LBracket => {
                self.advance()?;
                let elements = if self.is(TokenKind::RBracket) {
                    Vec::new()
                } else {
                    self.parse_separated(TokenKind::Comma, Self::parse_expr)?
                };
                self.consume(TokenKind::RBracket)?;
                ExprKind::Tuple { elements }
            }

            TokenKind::LBrace => self.parse_object_or_mapped_type()?,

            // Block: :{ statement+ }
            TokenKind::Colon => ExprKind::Block {
                body: self.parse_block()?,
            },

            // Pattern variable: infer ID [extends expr]
            TokenKind::Infer => {
                self.advance()?;
                let name = self.parse_ident()?;
                let bound = if self.take(TokenKind::Extends)? {
                    Some(Box::new(self.parse_expr()?))
                } else {
                    None
                };
                ExprKind::InferredVariable { name, bound }
            }

            // Conditional: if expr then expr else expr
            TokenKind::If => {
                self.advance()?;
                let test = self.parse_expr()?;
                self.consume(TokenKind::Then)?;
                let consequent = self.parse_expr()?;
                self.consume(TokenKind::Else)?;
                let alternate = self.parse_expr()?;
                ExprKind::Conditional {
                    test: Box::new(test),
                    consequent: Box::new(consequent),
                    alternate: Box::new(alternate),
                }
            }

            // Match: match expr { arm, ... }
            TokenKind::Match => {
                self.advance()?;
                let scrutinee = self.parse_expr()?;
                self.consume(TokenKind::LBrace)?;
                let arms = self.parse_separated(TokenKind::Comma, Self::parse_match_arm)?;
                self.consume(TokenKind::RBrace)?;
                ExprKind::Match {
                    scrutinee: Box::new(scrutinee),
                    arms,
                }
            }

            token => return Err(pos.wrap(Error::UnexpectedTokenInExpr { token })),
        };

        Ok(Expr { kind, pos })
    }

    /// led: Parses tokens that follow a left-hand-side expression
    /// (infix/postfix operators)
    fn parse_led(&mut self, op_token: Token, lhs: Expr, rbp: u8) -> Result<Expr> {
        let pos = lhs.pos;
        let kind = match op_token.kind {
            // Assignment: target = expr
            TokenKind::Assign => {
                if !matches!(lhs.kind, ExprKind::Identifier(_) | ExprKind::Member { .. }) {
                    return Err(lhs.pos.wrap(Error::InvalidAssignmentTarget));
                }
                let value = self.parse_expr_bp(rbp)?;
                ExprKind::Assignment {
                    target: Box::new(lhs),
                    value: Box::new(value),
                }
            }

            kind @ (TokenKind::AndAnd | TokenKind::OrOr) => {
                let op = if kind == TokenKind::AndAnd {
                    LogicalOperator::And
                } else {
                    LogicalOperator::Or
                };
                let rhs = self.parse_expr_bp(rbp)?;
                ExprKind::Logical {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }
            }

            // Member: expr . ID
            TokenKind::Dot => {
                let name = self.parse_ident()?;
                ExprKind::Member {
                    object: Box::new(lhs),
                    property: Property::Named(name),
                }
            }

            // Computed member: expr [ expr ]
            TokenKind::LBracket => {
                let property = self.parse_expr()?;
                self.consume(TokenKind::RBracket)?;
                ExprKind::Member {
                    object: Box::new(lhs),
                    property: Property::Computed(Box::new(property)),
                }
            }

            // Call: expr ( [expr [, expr]*] )
            TokenKind::LParen => {
                let args = if self.is(TokenKind::RParen) {
                    Vec::new()
                } else {
                    self.parse_separated(TokenKind::Comma, Self::parse_expr)?
                };
                self.consume(TokenKind::RParen)?;
                ExprKind::Call {
                    callee: Box::new(lhs),
                    args,
                }
            }

            kind => {
                let Some(op) = Self::binary_operator(kind) else {
                    return Err(op_token.pos.wrap(Error::UnexpectedOperator { actual: kind }));
                };
                let rhs = self.parse_expr_bp(rbp)?;
                ExprKind::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }
            }
        };

        Ok(Expr { kind, pos })
    }

    fn parse_lambda(&mut self, pos: Position) -> Result<Expr> {
        let params = if !self.is(TokenKind::LParen) {
            vec![self.parse_param()?]
        } else if self.nth_is(1, TokenKind::RParen) {
            self.consume(TokenKind::LParen)?;
            self.consume(TokenKind::RParen)?;
            Vec::new()
        } else {
            self.parse_param_list()?
        };
        self.consume(TokenKind::FatArrow)?;
        let body = self.parse_expr()?;
        let kind = ExprKind::Lambda(Lambda {
            params,
            body: Box::new(body),
        });
        Ok(Expr { kind, pos })
    }

    fn parse_match_arm(&mut self) -> Result<MatchArm> {
        let pos = self.current_pos();
        let pattern = self.parse_expr()?;
        self.consume(TokenKind::ThinArrow)?;
        let expression = self.parse_expr()?;
        Ok(MatchArm {
            pattern,
            expression,
            pos,
        })
    }

    /// Parses a template string. On entry the lookahead is the opening
    /// backtick and the tokenizer sits right after it.
    fn parse_template_string(&mut self, pos: Position) -> Result<Expr> {
        let mut parts = Vec::new();
        let mut text = String::new();
        loop {
            match self.next_template_char(pos)? {
                '`' => break,
                '$' => match self.next_template_char(pos)? {
                    '{' => {
                        parts.push(TemplatePart::Text(std::mem::take(&mut text).into()));
                        self.lookahead = self.scan()?;
                        let expr = self.parse_expr()?;
                        // The closing brace is left unconsumed: what follows it
                        // is raw text again.
                        self.expect_current(TokenKind::RBrace)?;
                        parts.push(TemplatePart::Expr(expr));
                    }
                    '`' => {
                        text.push('$');
                        break;
                    }
                    c => {
                        text.push('$');
                        text.push(c);
                    }
                },
                c => text.push(c),
            }
        }
        parts.push(TemplatePart::Text(text.into()));
        self.lookahead = self.scan()?;

        let kind = ExprKind::TemplateString { parts };
        Ok(Expr { kind, pos })
    }

    fn next_template_char(&mut self, start: Position) -> Result<char> {
        self.tokenizer
            .next_char()
            .ok_or_else(|| start.wrap(Error::UnterminatedTemplate))
    }

    /// A brace starts a mapped type if an `in` shows up among the next few
    /// tokens, as in `{ [K in Keys]: ... }`. Otherwise it is an object literal.
    fn parse_object_or_mapped_type(&mut self) -> Result<ExprKind> {
        let is_mapped_type = self
            .tokenizer
            .peek(4)
            .iter()
            .any(|token| token.is(TokenKind::In));
        self.consume(TokenKind::LBrace)?;
        let kind = if is_mapped_type {
            self.parse_mapped_type()?
        } else {
            self.parse_object()?
        };
        self.consume(TokenKind::RBrace)?;
        Ok(kind)
    }

    fn parse_mapped_type(&mut self) -> Result<ExprKind> {
        self.consume(TokenKind::LBracket)?;
        let key = self.parse_ident()?;
        self.consume(TokenKind::In)?;
        let union = self.parse_expr()?;
        let alias = if self.take(TokenKind::As)? {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.consume(TokenKind::RBracket)?;
        let optional = self.take(TokenKind::Question)?;
        self.consume(TokenKind::Colon)?;
        let value = self.parse_expr()?;
        Ok(ExprKind::MappedType {
            key,
            union: Box::new(union),
            alias,
            optional,
            value: Box::new(value),
        })
    }

    /// Properties are separated by either `,` or `;`, with an optional
    /// trailing separator.
    fn parse_object(&mut self) -> Result<ExprKind> {
        let mut properties = Vec::new();
        while self.peek_kind().is_some_and(|kind| kind != TokenKind::RBrace) {
            properties.push(self.parse_object_property()?);
            if !(self.take(TokenKind::Comma)? || self.take(TokenKind::Semicolon)?) {
                break;
            }
        }
        Ok(ExprKind::Object { properties })
    }

    fn parse_object_property(&mut self) -> Result<ObjectProperty> {
        let pos = self.current_pos();
        let key = if self.take(TokenKind::LBracket)? {
            let key = self.parse_expr()?;
            self.consume(TokenKind::RBracket)?;
            PropertyKey::Computed(key)
        } else {
            PropertyKey::Named(self.parse_ident()?)
        };
        let optional = self.take(TokenKind::Question)?;
        self.consume(TokenKind::Colon)?;
        let value = self.parse_expr()?;
        Ok(ObjectProperty {
            key,
            optional,
            value,
            pos,
        })
    }

    /// Parses `item (separator item)*`.
    fn parse_separated<T>(
        &mut self,
        separator: TokenKind,
        mut parse_item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = vec![parse_item(self)?];
        while self.take(separator)? {
            items.push(parse_item(self)?);
        }
        Ok(items)
    }

    /// Checks the current token against the lambda shapes. Only identifiers
    /// and opening parentheses may start a lambda, so nothing else peeks.
    fn is_lambda(&self) -> bool {
        let Some(current) = &self.lookahead else {
            return false;
        };
        if !matches!(current.kind, TokenKind::Identifier | TokenKind::LParen) {
            return false;
        }
        let mut window = [None; 4];
        window[0] = Some(current.kind);
        for (slot, token) in window[1..].iter_mut().zip(self.tokenizer.peek(3)) {
            *slot = Some(token.kind);
        }
        LAMBDA_SHAPES
            .iter()
            .any(|shape| shape.iter().zip(window).all(|(s, kind)| s.matches(kind)))
    }

    fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8)> {
        let bp = match kind {
            // Assignment (right-associative)
            TokenKind::Assign => (2, 1),

            TokenKind::OrOr => (3, 4),
            TokenKind::AndAnd => (5, 6),

            TokenKind::EqEq | TokenKind::BangEq => (7, 8),

            TokenKind::Less | TokenKind::LessEq | TokenKind::Greater | TokenKind::GreaterEq => {
                (9, 10)
            }

            TokenKind::Plus | TokenKind::Minus => (11, 12),

            // Unions and intersections bind as tightly as multiplication.
            TokenKind::Star
            | TokenKind::StarStar
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Pipe
            | TokenKind::Ampersand => (13, 14),

            // Member access and calls
            TokenKind::Dot | TokenKind::LBracket | TokenKind::LParen => (17, 18),

            _ => return None,
        };
        Some(bp)
    }

    fn prefix_binding_power(kind: TokenKind) -> Option<((), u8)> {
        let bp = match kind {
            TokenKind::Minus | TokenKind::Plus | TokenKind::Bang => ((), 15),
            _ => return None,
        };
        Some(bp)
    }

    fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
        let op = match kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Sub,
            TokenKind::Star => BinaryOperator::Mul,
            TokenKind::Slash => BinaryOperator::Div,
            TokenKind::StarStar => BinaryOperator::Pow,
            TokenKind::Percent => BinaryOperator::Mod,
            TokenKind::Less => BinaryOperator::Lt,
            TokenKind::LessEq => BinaryOperator::Le,
            TokenKind::Greater => BinaryOperator::Gt,
            TokenKind::GreaterEq => BinaryOperator::Ge,
            TokenKind::EqEq => BinaryOperator::Eq,
            TokenKind::BangEq => BinaryOperator::NotEq,
            TokenKind::Pipe => BinaryOperator::Union,
            TokenKind::Ampersand => BinaryOperator::Intersection,
            _ => return None,
        };
        Some(op)
    }
}

impl<'src> Parser<'src> {
    fn new(src: &'src str) -> Result<Parser<'src>> {
        let mut p = Parser {
            tokenizer: Tokenizer::new(src),
            lookahead: None,
        };
        p.lookahead = p.scan()?;
        Ok(p)
    }

    /// Scans a fresh token from the tokenizer.
    fn scan(&mut self) -> Result<Option<Token>> {
        self.tokenizer
            .next_token()
            .map_err(|error| error.map(Error::Lexer))
    }

    /// Returns the kind and position of the current token.
    fn peek_token(&self) -> Option<(TokenKind, Position)> {
        self.lookahead.as_ref().map(|token| (token.kind, token.pos))
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.lookahead.as_ref().map(|token| token.kind)
    }

    /// The position of the current token, or of the end of input.
    fn current_pos(&self) -> Position {
        self.lookahead
            .as_ref()
            .map_or_else(|| self.tokenizer.position(), |token| token.pos)
    }

    /// Returns the current token and advances.
    fn advance(&mut self) -> Result<Token> {
        let next = self.scan()?;
        match std::mem::replace(&mut self.lookahead, next) {
            Some(token) => Ok(token),
            None => Err(self.tokenizer.position().wrap(Error::UnexpectedEofInExpr)),
        }
    }

    /// Checks whether the current token matches the given one.
    fn is(&self, expect: TokenKind) -> bool {
        self.peek_kind() == Some(expect)
    }

    /// Checks the kind of the token `n` places after the current one.
    fn nth_is(&self, n: usize, expect: TokenKind) -> bool {
        self.tokenizer
            .peek(n)
            .get(n - 1)
            .is_some_and(|token| token.is(expect))
    }

    /// Advances if the current token matches the provided one, returning true.
    /// If not, returns false and doesn't advance.
    fn take(&mut self, expect: TokenKind) -> Result<bool> {
        if self.is(expect) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Advances if the current token matches the provided one. If not, fails.
    fn consume(&mut self, expect: TokenKind) -> Result<Token> {
        self.expect_current(expect)?;
        self.advance()
    }

    /// Fails unless the current token matches the provided one. Doesn't
    /// advance.
    fn expect_current(&self, expected: TokenKind) -> Result<()> {
        match self.peek_token() {
            Some((actual, _)) if actual == expected => Ok(()),
            Some((actual, pos)) => Err(pos.wrap(Error::Unexpected { actual, expected })),
            None => Err(self
                .tokenizer
                .position()
                .wrap(Error::UnexpectedEof { expected })),
        }
    }
}

/// One slot of a lambda shape.
#[derive(Copy, Clone)]
enum Shape {
    Is(TokenKind),
    /// Any token, or the end of input.
    Any,
}

impl Shape {
    fn matches(self, kind: Option<TokenKind>) -> bool {
        match self {
            Shape::Is(expected) => kind == Some(expected),
            Shape::Any => true,
        }
    }
}

/// The token windows (current token plus three) that start a lambda.
const LAMBDA_SHAPES: [[Shape; 4]; 5] = {
    use Shape::*;
    use TokenKind::{Colon, Comma, FatArrow, Identifier, LParen, RParen};
    [
        // a => ...
        [Is(Identifier), Is(FatArrow), Any, Any],
        // () => ...
        [Is(LParen), Is(RParen), Is(FatArrow), Any],
        // (a) => ...
        [Is(LParen), Is(Identifier), Is(RParen), Is(FatArrow)],
        // (a: bound, ...) => ...
        [Is(LParen), Is(Identifier), Is(Colon), Any],
        // (a, ...) => ...
        [Is(LParen), Is(Identifier), Is(Comma), Any],
    ]
};

fn strip_quotes(raw: &str) -> Box<str> {
    debug_assert!(raw.len() >= 2);
    Box::from(&raw[1..raw.len() - 1])
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("expected {expected:?}, found {actual:?}")]
    Unexpected {
        actual: TokenKind,
        expected: TokenKind,
    },
    #[error("unexpected end of input, expected {expected:?}")]
    UnexpectedEof { expected: TokenKind },
    #[error("expected a definition, a section or an import, found {actual:?}")]
    UnexpectedTopLevel { actual: TokenKind },
    #[error("unexpected {token:?} in expression")]
    UnexpectedTokenInExpr { token: TokenKind },
    #[error("unexpected end of input in expression")]
    UnexpectedEofInExpr,
    #[error("unexpected operator {actual:?}")]
    UnexpectedOperator { actual: TokenKind },
    #[error("unexpected {actual:?} after expression")]
    TrailingInput { actual: TokenKind },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("unterminated template string")]
    UnterminatedTemplate,
    #[error("empty program")]
    EmptyProgram,
    #[error(transparent)]
    Lexer(#[from] lexer::Error),
}
