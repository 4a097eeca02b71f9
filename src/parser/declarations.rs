//! Declaration parsing implementation
//!
//! This module handles parsing of top-level items and variable declarations:
//!
//! - `using namespace std;`
//! - Global variable declarations: `int x = 42;`
//! - The single entry point: `int main() { ... }`
//!
//! # Grammar
//!
//! ```text
//! program   ::= item* EOF
//! item      ::= "using" "namespace" "std" ";" | var_decl ";" | main_def
//! main_def  ::= "int" "main" "(" "void"? ")" "{" statement* "}"
//! var_decl  ::= type identifier ( "=" expression )?
//! type      ::= "int" | "float" | "double" | "char" | "bool" | "string"
//! ```
//!
//! Exactly one `main` is required. Its body is flattened into the program's
//! statement list in place, so global declarations before and after it keep
//! their source order.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse the entire program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();
        let mut seen_main = false;

        while !self.is_at_end() {
            if self.match_keyword("using") {
                self.parse_using_directive()?;
                continue;
            }

            let is_function = self.is_type_keyword()
                && self.peek_ahead(2).is_some_and(|t| t.is_symbol("("));
            if is_function {
                let loc = self.current_location();
                let body = self.parse_main_function()?;
                if seen_main {
                    return Err(self.unsupported("more than one 'main' definition", loc));
                }
                seen_main = true;
                program.statements.extend(body);
                continue;
            }

            if self.is_type_keyword() {
                let decl = self.parse_variable_declaration()?;
                self.expect_symbol(";", "after variable declaration")?;
                program.statements.push(decl);
                continue;
            }

            self.reject_unsupported()?;
            return Err(self.syntax_error("declaration or 'int main()'"));
        }

        if !seen_main {
            return Err(self.syntax_error("'int main()' function"));
        }

        tracing::debug!(statements = program.statements.len(), "parsed program");
        Ok(program)
    }

    /// Parse `namespace std;` after the `using` keyword
    fn parse_using_directive(&mut self) -> Result<(), ParseError> {
        if !self.match_keyword("namespace") {
            return Err(self.syntax_error("'namespace' after 'using'"));
        }
        let loc = self.current_location();
        let name = self.expect_identifier("after 'using namespace'")?;
        if name != "std" {
            return Err(self.unsupported(format!("namespace '{}'", name), loc));
        }
        self.expect_symbol(";", "after using directive")
    }

    /// Parse `int main() { ... }` and return its body statements
    fn parse_main_function(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let return_type = self.expect_type()?;
        let loc = self.current_location();
        let name = self.expect_identifier("for function name")?;

        if name != "main" {
            return Err(self.unsupported(format!("function definition '{}'", name), loc));
        }
        if return_type != VarType::Int {
            return Err(self.unsupported("'main' not returning int", loc));
        }

        self.expect_symbol("(", "after function name")?;
        self.match_keyword("void");
        if !self.check_symbol(")") {
            return Err(self.unsupported("parameters of 'main'", self.current_location()));
        }
        self.advance();
        self.expect_symbol("{", "before function body")?;

        let body = self.parse_block_statements()?;

        self.expect_symbol("}", "after function body")?;

        // A trailing `return` ends the program anyway; any other one would
        // need an early exit that the flattened output cannot express.
        let checked = match body.last() {
            Some(Stmt::Return { .. }) => &body[..body.len() - 1],
            _ => &body[..],
        };
        if let Some(location) = first_return(checked) {
            return Err(self.unsupported("'return' before the end of 'main'", location));
        }

        Ok(body)
    }

    /// Parse variable declaration: type name [= init]
    ///
    /// The terminating `;` is left to the caller so that `for` initializers
    /// can share this rule.
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let ty = self.expect_type()?;
        if self.check_symbol("*") || self.check_symbol("&") {
            return Err(self.unsupported("pointers and references", self.current_location()));
        }
        let name = self.expect_identifier("in variable declaration")?;

        let init = if self.match_symbol("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.declare(&name, ty);

        Ok(Stmt::VarDecl { ty, name, init })
    }
}

/// Location of the first `return` anywhere in `statements`
fn first_return(statements: &[Stmt]) -> Option<SourceLocation> {
    statements.iter().find_map(|stmt| match stmt {
        Stmt::Return { location, .. } => Some(*location),
        Stmt::If {
            then_block,
            else_block,
            ..
        } => first_return(&then_block.statements)
            .or_else(|| else_block.as_ref().and_then(|b| first_return(&b.statements))),
        Stmt::While { body, .. } | Stmt::For { body, .. } => first_return(&body.statements),
        Stmt::Block(block) => first_return(&block.statements),
        Stmt::VarDecl { .. }
        | Stmt::Assign { .. }
        | Stmt::Cout { .. }
        | Stmt::Cin { .. }
        | Stmt::Expr(_) => None,
    })
}
