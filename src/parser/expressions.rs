//! Expression parsing implementation
//!
//! This module handles parsing of expressions using precedence climbing
//! for binary operators and recursive descent for unary and primary forms.
//!
//! # Supported Expressions
//!
//! - Literals: integers, floats, strings, characters, `true`/`false`
//! - Identifiers
//! - Binary operators: `* /`, `+ -`, `< > <= >= == !=`, `&&`, `||`
//! - Unary operators: `-`, `!` (and a no-op unary `+`)
//! - Parenthesized sub-expressions
//!
//! # Precedence
//!
//! Tiers from loosest to tightest, each left-associative:
//!
//! ```text
//! ||  <  &&  <  relational  <  + -  <  * /  <  unary
//! ```
//!
//! Calls, indexing, pointer operators and `++`/`--` inside an expression are
//! rejected as unsupported constructs.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

/// Binding strength of a binary operator token, `None` for anything that
/// ends an expression
fn binary_operator(lexeme: &str) -> Option<(BinOp, u8)> {
    let entry = match lexeme {
        "||" => (BinOp::Or, 1),
        "&&" => (BinOp::And, 2),
        "<" => (BinOp::Lt, 3),
        ">" => (BinOp::Gt, 3),
        "<=" => (BinOp::Le, 3),
        ">=" => (BinOp::Ge, 3),
        "==" => (BinOp::Eq, 3),
        "!=" => (BinOp::Ne, 3),
        "+" => (BinOp::Add, 4),
        "-" => (BinOp::Sub, 4),
        "*" => (BinOp::Mul, 5),
        "/" => (BinOp::Div, 5),
        _ => return None,
    };
    Some(entry)
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(1)
    }

    /// Precedence climbing over the binary operator table. Only operators
    /// binding at least as tightly as `min_precedence` are consumed here; the
    /// right operand is parsed one tier tighter, which makes every tier
    /// left-associative.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let token = self.peek();
            if token.kind != TokenKind::Operator {
                break;
            }
            if token.lexeme == "&" || token.lexeme == "|" {
                self.reject_unsupported()?;
            }
            let Some((op, precedence)) = binary_operator(&token.lexeme) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.advance();

            let right = self.parse_binary(precedence + 1)?;
            left = Self::make_binary(op, left, right);
        }

        Ok(left)
    }

    /// Build a binary node, resolving `/` between two integers to truncating
    /// integer division
    fn make_binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        let op = match op {
            BinOp::Div
                if left.static_type() == Some(VarType::Int)
                    && right.static_type() == Some(VarType::Int) =>
            {
                BinOp::IntDiv
            }
            other => other,
        };
        Expr::binary(op, left, right)
    }

    /// Parse unary (! - +)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        if self.match_symbol("!") {
            let operand = self.parse_unary()?;
            return Ok(Expr::unary(UnOp::Not, operand));
        }

        if self.match_symbol("-") {
            let operand = self.parse_unary()?;
            return Ok(Expr::unary(UnOp::Neg, operand));
        }

        if self.match_symbol("+") {
            // Unary plus: just return the operand
            return self.parse_unary();
        }

        if self.check_symbol("++") || self.check_symbol("--") {
            return Err(self.unsupported("'++'/'--' inside an expression", loc));
        }

        if self.check_symbol("*") {
            return Err(self.unsupported("pointer dereference", loc));
        }

        self.parse_postfix()
    }

    /// Parse a primary expression and reject any postfix form that follows it
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_primary()?;
        let loc = self.current_location();

        if self.check_symbol("(") {
            return Err(self.unsupported("function calls", loc));
        }
        if self.check_symbol("++") || self.check_symbol("--") {
            return Err(self.unsupported("'++'/'--' inside an expression", loc));
        }
        self.reject_unsupported()?;

        Ok(expr)
    }

    /// Parse primary (literals, variables, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::IntLiteral => {
                let value = parse_int_literal(&token.lexeme)
                    .ok_or_else(|| self.syntax_error("integer literal that fits in 64 bits"))?;
                self.advance();
                Ok(Expr::Int(value))
            }
            TokenKind::FloatLiteral => {
                self.advance();
                Ok(Expr::Float(token.lexeme))
            }
            TokenKind::StringLiteral => {
                self.advance();
                Ok(Expr::Str(strip_quotes(&token.lexeme)))
            }
            TokenKind::CharLiteral => {
                self.advance();
                Ok(Expr::Char(strip_quotes(&token.lexeme)))
            }
            TokenKind::Identifier => {
                self.advance();
                let ty = self.lookup(&token.lexeme);
                Ok(Expr::var(token.lexeme, ty))
            }
            TokenKind::Keyword if token.lexeme == "true" || token.lexeme == "false" => {
                self.advance();
                Ok(Expr::Bool(token.lexeme == "true"))
            }
            _ if token.is_symbol("(") => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_symbol(")", "after expression")?;
                Ok(expr)
            }
            _ => {
                self.reject_unsupported()?;
                Err(self.syntax_error("expression"))
            }
        }
    }
}

/// Decimal literal, or octal when written with a leading zero
fn parse_int_literal(lexeme: &str) -> Option<i64> {
    if lexeme.len() > 1 && lexeme.starts_with('0') {
        i64::from_str_radix(&lexeme[1..], 8).ok()
    } else {
        lexeme.parse().ok()
    }
}

fn strip_quotes(lexeme: &str) -> String {
    lexeme[1..lexeme.len() - 1].to_string()
}
