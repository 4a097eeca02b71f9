//! Statement parsing implementation
//!
//! This module handles parsing of all supported statement types:
//!
//! - Variable declarations: `int x = 42;`
//! - Assignments, including `+=`-style and `++`/`--` forms
//! - Control flow: `if`/`else`, `while`, counted `for`
//! - Stream I/O: `cout << ... ;` and `cin >> x;`
//! - Nested blocks, `return`, and bare expression statements
//!
//! # Grammar
//!
//! ```text
//! statement  ::= var_decl ";" | assignment ";" | if_stmt | while_stmt
//!              | for_stmt | cout_stmt | cin_stmt | return_stmt | block
//!              | expression ";"
//! for_stmt   ::= "for" "(" (var_decl | assignment) ";" expression ";"
//!                assignment ")" body
//! cout_stmt  ::= "cout" ("<<" (expression | "endl"))+ ";"
//! cin_stmt   ::= "cin" ">>" identifier ";"
//! assignment ::= identifier ("=" | "+=" | "-=" | "*=" | "/=") expression
//!              | identifier ("++" | "--") | ("++" | "--") identifier
//! ```
//!
//! Compound assignments and increments are desugared into plain
//! [`Stmt::Assign`] nodes here, so later stages only see one assignment form.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check_symbol("}") && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        // Keyword-driven dispatch
        if self.match_keyword("if") {
            return self.parse_if_statement();
        }

        if self.match_keyword("while") {
            return self.parse_while_statement();
        }

        if self.match_keyword("for") {
            return self.parse_for_statement();
        }

        if self.match_keyword("cout") {
            return self.parse_cout_statement();
        }

        if self.match_keyword("cin") {
            return self.parse_cin_statement();
        }

        if self.match_keyword("return") {
            return self.parse_return_statement(loc);
        }

        if self.match_symbol("{") {
            let statements = self.parse_block_statements()?;
            self.expect_symbol("}", "after block")?;
            return Ok(Stmt::Block(Block::new(statements)));
        }

        if self.is_type_keyword() {
            let decl = self.parse_variable_declaration()?;
            self.expect_symbol(";", "after variable declaration")?;
            return Ok(decl);
        }

        self.reject_unsupported()?;

        if self.starts_assignment() {
            let assign = self.parse_assignment("assignment")?;
            self.expect_symbol(";", "after assignment")?;
            return Ok(assign);
        }

        let keyword_led = self.peek().kind == TokenKind::Keyword
            && !self.check_keyword("true")
            && !self.check_keyword("false");
        if keyword_led {
            return Err(self.syntax_error("statement"));
        }

        // Otherwise, it's an expression statement
        let expr = self.parse_expression()?;
        self.expect_symbol(";", "after expression")?;
        Ok(Stmt::Expr(expr))
    }

    /// Two-token lookahead: `x =`, `x +=`, `x++`, `++x` ... start an
    /// assignment, anything else led by an identifier is an expression
    fn starts_assignment(&self) -> bool {
        if self.check_symbol("++") || self.check_symbol("--") {
            return true;
        }
        if self.peek().kind != TokenKind::Identifier {
            return false;
        }
        self.peek_ahead(1).is_some_and(|next| {
            ["=", "+=", "-=", "*=", "/=", "++", "--"]
                .iter()
                .any(|op| next.is_symbol(op))
        })
    }

    /// Parse an assignment-like statement without its terminator and desugar
    /// it into a plain assignment
    pub(crate) fn parse_assignment(&mut self, expected: &str) -> Result<Stmt, ParseError> {
        // Prefix increment / decrement
        for (symbol, op) in [("++", BinOp::Add), ("--", BinOp::Sub)] {
            if self.match_symbol(symbol) {
                let target = self.expect_identifier(&format!("after '{}'", symbol))?;
                return Ok(self.step_assignment(target, op, Expr::Int(1)));
            }
        }

        if self.peek().kind != TokenKind::Identifier {
            self.reject_unsupported()?;
            return Err(self.syntax_error(expected));
        }
        let target = self.advance().lexeme.clone();

        if self.match_symbol("=") {
            let value = self.parse_expression()?;
            return Ok(Stmt::Assign { target, value });
        }

        let compound = [
            ("+=", BinOp::Add),
            ("-=", BinOp::Sub),
            ("*=", BinOp::Mul),
            ("/=", BinOp::Div),
        ];
        for (symbol, op) in compound {
            if self.match_symbol(symbol) {
                let value = self.parse_expression()?;
                return Ok(self.step_assignment(target, op, value));
            }
        }

        for (symbol, op) in [("++", BinOp::Add), ("--", BinOp::Sub)] {
            if self.match_symbol(symbol) {
                return Ok(self.step_assignment(target, op, Expr::Int(1)));
            }
        }

        self.reject_unsupported()?;
        Err(self.syntax_error(format!("'=' after '{}'", target)))
    }

    /// `target op= value` as `target = target op value`
    fn step_assignment(&self, target: String, op: BinOp, value: Expr) -> Stmt {
        let current = Expr::var(target.clone(), self.lookup(&target));
        let value = match op {
            BinOp::Div
                if current.static_type() == Some(VarType::Int)
                    && value.static_type() == Some(VarType::Int) =>
            {
                Expr::binary(BinOp::IntDiv, current, value)
            }
            op => Expr::binary(op, current, value),
        };
        Stmt::Assign { target, value }
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_symbol("(", "after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_symbol(")", "after if condition")?;

        let then_block = self.parse_statement_or_block()?;

        let else_block = if self.match_keyword("else") {
            Some(self.parse_statement_or_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_block,
            else_block,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_symbol("(", "after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_symbol(")", "after while condition")?;

        let body = self.parse_statement_or_block()?;

        Ok(Stmt::While { condition, body })
    }

    /// Parse for statement. All three clauses are required.
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_symbol("(", "after 'for'")?;

        let init = if self.is_type_keyword() {
            self.parse_variable_declaration()?
        } else if self.check_symbol(";") {
            return Err(self.syntax_error("for-loop initializer"));
        } else {
            self.parse_assignment("for-loop initializer")?
        };
        self.expect_symbol(";", "after for-loop initializer")?;

        if self.check_symbol(";") {
            return Err(self.syntax_error("for-loop condition"));
        }
        let condition = self.parse_expression()?;
        self.expect_symbol(";", "after for-loop condition")?;

        if self.check_symbol(")") {
            return Err(self.syntax_error("for-loop increment"));
        }
        let increment = self.parse_assignment("for-loop increment")?;
        self.expect_symbol(")", "after for-loop clauses")?;

        let body = self.parse_statement_or_block()?;

        Ok(Stmt::For {
            init: Box::new(init),
            condition,
            increment: Box::new(increment),
            body,
        })
    }

    /// Parse the `<<` chain of a cout statement
    fn parse_cout_statement(&mut self) -> Result<Stmt, ParseError> {
        let mut items = Vec::new();

        if !self.check_symbol("<<") {
            return Err(self.syntax_error("'<<' after 'cout'"));
        }

        while self.match_symbol("<<") {
            if self.match_keyword("endl") {
                items.push(CoutItem::Endl);
            } else {
                items.push(CoutItem::Expr(self.parse_expression()?));
            }
        }

        self.expect_symbol(";", "after cout statement")?;

        Ok(Stmt::Cout { items })
    }

    /// Parse `>> target;` after `cin`
    fn parse_cin_statement(&mut self) -> Result<Stmt, ParseError> {
        self.expect_symbol(">>", "after 'cin'")?;
        let target = self.expect_identifier("after '>>'")?;

        if self.check_symbol(">>") {
            return Err(self.unsupported("chained 'cin' extraction", self.current_location()));
        }
        self.expect_symbol(";", "after cin statement")?;

        let ty = self.lookup(&target);
        Ok(Stmt::Cin { target, ty })
    }

    /// Parse return statement; `loc` is the keyword's position
    fn parse_return_statement(&mut self, loc: SourceLocation) -> Result<Stmt, ParseError> {
        let value = if self.check_symbol(";") {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect_symbol(";", "after return")?;

        Ok(Stmt::Return {
            value,
            location: loc,
        })
    }

    /// Parse statement or block (for if/while/for bodies)
    fn parse_statement_or_block(&mut self) -> Result<Block, ParseError> {
        if self.match_symbol("{") {
            let statements = self.parse_block_statements()?;
            self.expect_symbol("}", "after block")?;
            Ok(Block::new(statements))
        } else {
            // Single statement
            Ok(Block::new(vec![self.parse_statement()?]))
        }
    }
}
