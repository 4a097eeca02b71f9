//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: top-level items, `int main()` and variable declarations
//! - `statements`: Parsing statements (if, while, for, cout, cin, ...)
//! - `expressions`: Parsing expressions with precedence climbing
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The parser also keeps a flat table of declared variable types. It is not a
//! scope checker: redeclarations are accepted and the latest one wins. The
//! resolved types are stored in the AST so rendering never needs it.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;

/// The token sequence does not match the grammar
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    /// Description of the construct the parser was looking for
    pub expected: String,
    /// Description of the token actually found
    pub found: String,
    pub location: SourceLocation,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at line {}, column {}: expected {}, found {}",
            self.location.line, self.location.column, self.expected, self.found
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Valid C++ that falls outside the supported subset
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedConstructError {
    pub construct: String,
    pub location: SourceLocation,
}

impl fmt::Display for UnsupportedConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported construct at line {}, column {}: {} is not supported",
            self.location.line, self.location.column, self.construct
        )
    }
}

impl std::error::Error for UnsupportedConstructError {}

/// Any failure while turning source text into a [`Program`]
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    Lex(LexError),
    Syntax(SyntaxError),
    Unsupported(UnsupportedConstructError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(e) => e.location,
            ParseError::Syntax(e) => e.location,
            ParseError::Unsupported(e) => e.location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(e) => e.fmt(f),
            ParseError::Syntax(e) => e.fmt(f),
            ParseError::Unsupported(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

impl From<UnsupportedConstructError> for ParseError {
    fn from(err: UnsupportedConstructError) -> Self {
        ParseError::Unsupported(err)
    }
}

/// Recursive descent parser for the C++ subset
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) symbols: FxHashMap<String, VarType>,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        tracing::debug!(tokens = tokens.len(), "tokenized source");
        Ok(Self::from_tokens(tokens))
    }

    /// Build a parser over an already tokenized source. An end-of-input token
    /// is appended if the sequence lacks one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            let location = tokens
                .last()
                .map_or(SourceLocation::new(1, 1), |t| t.location);
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }
        Self {
            tokens,
            position: 0,
            symbols: FxHashMap::default(),
        }
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        let token = self.peek();
        token.kind == TokenKind::Keyword && VarType::from_keyword(&token.lexeme).is_some()
    }

    pub(crate) fn check_symbol(&self, symbol: &str) -> bool {
        self.peek().is_symbol(symbol)
    }

    pub(crate) fn check_keyword(&self, keyword: &str) -> bool {
        self.peek().is_keyword(keyword)
    }

    pub(crate) fn match_symbol(&mut self, symbol: &str) -> bool {
        if self.check_symbol(symbol) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn match_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Error describing the current token as not being `expected`
    pub(crate) fn syntax_error(&self, expected: impl Into<String>) -> ParseError {
        ParseError::Syntax(SyntaxError {
            expected: expected.into(),
            found: self.peek().to_string(),
            location: self.current_location(),
        })
    }

    pub(crate) fn unsupported(
        &self,
        construct: impl Into<String>,
        location: SourceLocation,
    ) -> ParseError {
        ParseError::Unsupported(UnsupportedConstructError {
            construct: construct.into(),
            location,
        })
    }

    /// Reject an out-of-subset keyword or symbol at the current position, if
    /// there is one
    pub(crate) fn reject_unsupported(&self) -> Result<(), ParseError> {
        let token = self.peek();
        let construct = match token.kind {
            TokenKind::Keyword => match token.lexeme.as_str() {
                "class" | "struct" | "union" | "enum" | "typedef" => {
                    format!("user-defined type '{}'", token.lexeme)
                }
                "template" | "typename" => format!("template keyword '{}'", token.lexeme),
                "new" | "delete" | "nullptr" => {
                    format!("dynamic memory keyword '{}'", token.lexeme)
                }
                "void" => "function definition other than 'int main()'".to_string(),
                lexeme if is_supported_keyword(lexeme) => return Ok(()),
                lexeme => format!("keyword '{}'", lexeme),
            },
            TokenKind::Punctuation if token.lexeme == "[" => "arrays and indexing".to_string(),
            TokenKind::Operator if token.lexeme == "&" => "references and address-of".to_string(),
            TokenKind::Operator if token.lexeme == "|" => "bitwise operators".to_string(),
            _ => return Ok(()),
        };
        Err(self.unsupported(construct, token.location))
    }

    pub(crate) fn expect_symbol(&mut self, symbol: &str, context: &str) -> Result<(), ParseError> {
        if self.check_symbol(symbol) {
            self.advance();
            Ok(())
        } else {
            self.reject_unsupported()?;
            Err(self.syntax_error(format!("'{}' {}", symbol, context)))
        }
    }

    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        if self.peek().kind == TokenKind::Identifier {
            Ok(self.advance().lexeme.clone())
        } else {
            self.reject_unsupported()?;
            Err(self.syntax_error(format!("identifier {}", context)))
        }
    }

    pub(crate) fn expect_type(&mut self) -> Result<VarType, ParseError> {
        let token = self.peek();
        if token.kind == TokenKind::Keyword {
            if let Some(ty) = VarType::from_keyword(&token.lexeme) {
                self.advance();
                return Ok(ty);
            }
        }
        self.reject_unsupported()?;
        Err(self.syntax_error("type name"))
    }

    /// Record a declaration in the flat symbol table
    pub(crate) fn declare(&mut self, name: &str, ty: VarType) {
        self.symbols.insert(name.to_string(), ty);
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<VarType> {
        self.symbols.get(name).copied()
    }
}

fn is_supported_keyword(keyword: &str) -> bool {
    matches!(
        keyword,
        "int" | "float" | "double" | "char" | "bool" | "string" | "if" | "else" | "while"
            | "for" | "return" | "cout" | "cin" | "endl" | "true" | "false" | "using"
            | "namespace"
    )
}
