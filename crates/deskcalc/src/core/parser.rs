//! Tokenizer and recursive-descent parser for arithmetic expressions

use std::fmt;

use crate::core::{CalcError, CalcResult, Number, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(Number),
    /// Binary operator (also `+`/`-` in unary position)
    Operator(Operation),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => f.write_str(op.symbol()),
            Self::LeftParen => f.write_str("("),
            Self::RightParen => f.write_str(")"),
        }
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(Number),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: impl Into<Number>) -> Self {
        Self::Number(value.into())
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '+' => self.single(Token::Operator(Operation::Add)),
            '-' => self.single(Token::Operator(Operation::Subtract)),
            '/' => self.single(Token::Operator(Operation::Divide)),
            '*' => {
                self.advance();
                if self.current_char() == Some('*') {
                    self.advance();
                    Token::Operator(Operation::Power)
                } else {
                    Token::Operator(Operation::Multiply)
                }
            }
            '(' => self.single(Token::LeftParen),
            ')' => self.single(Token::RightParen),
            _ => {
                return Err(CalcError::malformed(format!("unexpected character '{ch}'")));
            }
        };

        Ok(Some(token))
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    // Greedy over digits and dots so "1.2.3" is one bad literal rather than
    // two numbers side by side.
    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        self.skip_mantissa();
        self.skip_exponent();
        Number::parse_literal(&self.input[start..self.pos]).map(Token::Number)
    }

    fn skip_mantissa(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() || ch == '.' {
                self.advance();
            } else {
                break;
            }
        }
    }

    // Results such as `1e+16` are fed back in as operands
    fn skip_exponent(&mut self) {
        let rest = &self.input[self.pos..];
        let mut chars = rest.chars();
        if !matches!(chars.next(), Some('e' | 'E')) {
            return;
        }
        let mut len = 1;
        let mut next = chars.next();
        if matches!(next, Some('+' | '-')) {
            len += 1;
            next = chars.next();
        }
        if !next.is_some_and(|c| c.is_ascii_digit()) {
            return;
        }
        len += rest[len..].chars().take_while(char::is_ascii_digit).count();
        for _ in 0..len {
            self.advance();
        }
    }
}

/// Deepest run of signs, parentheses and exponents accepted before parsing gives up
pub const MAX_NESTING: usize = 200;

/// Tallest expression tree accepted, counting every operator level
pub const MAX_DEPTH: usize = 1000;

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= ('+' | '-') unary | power
/// power      ::= primary ('**' unary)?
/// primary    ::= NUMBER | '(' expression ')'
/// ```
///
/// `**` binds tighter than a unary minus on its left, so `-3**2` is `-9`,
/// and is right-associative.
///
/// Input nested past [`MAX_NESTING`] or producing a tree taller than
/// [`MAX_DEPTH`] is a syntax error, so evaluation never runs out of stack.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nesting: usize,
}

/// A parsed node and the height of its tree
struct Subtree {
    node: AstNode,
    depth: usize,
}

impl Subtree {
    fn leaf(node: AstNode) -> Self {
        Self { node, depth: 1 }
    }
}

fn too_deep() -> CalcError {
    CalcError::syntax("expression nested too deeply")
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            nesting: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into a single AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        self.pos = 0;
        self.nesting = 0;
        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::syntax(format!(
                "unexpected '{token}' at token {}",
                self.pos
            )));
        }

        Ok(ast.node)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self) -> CalcResult<()> {
        if self.nesting >= MAX_NESTING {
            return Err(too_deep());
        }
        self.nesting += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    fn join(left: Subtree, op: Operation, right: Subtree) -> CalcResult<Subtree> {
        let depth = left.depth.max(right.depth) + 1;
        if depth > MAX_DEPTH {
            return Err(too_deep());
        }
        Ok(Subtree {
            node: AstNode::binary(left.node, op, right.node),
            depth,
        })
    }

    fn parse_expression(&mut self) -> CalcResult<Subtree> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = Self::join(left, op, right)?;
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<Subtree> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_unary()?;
            left = Self::join(left, op, right)?;
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<Subtree> {
        match self.current() {
            Some(Token::Operator(Operation::Subtract)) => {
                self.advance();
                let inner = self.nested(Self::parse_unary)?;
                if inner.depth >= MAX_DEPTH {
                    return Err(too_deep());
                }
                Ok(Subtree {
                    node: AstNode::negate(inner.node),
                    depth: inner.depth + 1,
                })
            }
            Some(Token::Operator(Operation::Add)) => {
                self.advance();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalcResult<Subtree> {
        let base = self.parse_primary()?;

        if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            self.advance();
            let exponent = self.nested(Self::parse_unary)?;
            return Self::join(base, Operation::Power, exponent);
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalcResult<Subtree> {
        let token = self
            .advance()
            .cloned()
            .ok_or_else(|| CalcError::syntax("unexpected end of expression"))?;

        match token {
            Token::Number(n) => Ok(Subtree::leaf(AstNode::Number(n))),
            Token::LeftParen => {
                let expr = self.nested(Self::parse_expression)?;
                match self.advance() {
                    Some(Token::RightParen) => Ok(expr),
                    Some(t) => Err(CalcError::syntax(format!("expected ')' but found '{t}'"))),
                    None => Err(CalcError::syntax("unclosed parenthesis")),
                }
            }
            other => Err(CalcError::syntax(format!("unexpected '{other}'"))),
        }
    }

    fn nested(&mut self, rule: fn(&mut Self) -> CalcResult<Subtree>) -> CalcResult<Subtree> {
        self.enter()?;
        let parsed = rule(self);
        self.leave();
        parsed
    }
}
