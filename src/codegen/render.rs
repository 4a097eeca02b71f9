//! Node rendering rules
//!
//! Every statement renders to one or more complete Python lines without a
//! trailing newline; the caller joins sibling fragments with `\n`. A fragment
//! may be empty (a trailing `return`, an empty nested block), and empty
//! fragments are dropped when joining.
//!
//! Expressions are rendered with the fewest parentheses that keep the parsed
//! tree shape under Python's precedence rules. Two Python quirks need care:
//! `not` binds looser than comparisons, and comparisons chain, so a
//! comparison operand of a comparison is always parenthesized.

use std::borrow::Cow;

use super::loops;
use super::Indent;
use crate::parser::ast::*;

// Python binding strengths, loosest first
const PREC_OR: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_NOT: u8 = 3;
const PREC_COMPARE: u8 = 4;
const PREC_ADD: u8 = 5;
const PREC_MUL: u8 = 6;
const PREC_NEG: u8 = 7;
const PREC_ATOM: u8 = 8;

/// Identifiers that are valid in C++ but reserved or shadowing in the
/// generated Python
const PYTHON_RESERVED: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "def", "del", "elif",
    "except", "finally", "from", "global", "import", "in", "is", "lambda", "nonlocal", "not",
    "or", "pass", "raise", "try", "with", "yield", "print", "input", "range",
];

/// Python spelling of a source identifier. Reserved names get a `_` suffix,
/// and so does any reserved name already followed by underscores, so that
/// `print` and `print_` stay distinct (`print_` and `print__`).
pub fn python_name(name: &str) -> Cow<'_, str> {
    if PYTHON_RESERVED.contains(&name.trim_end_matches('_')) {
        Cow::Owned(format!("{}_", name))
    } else {
        Cow::Borrowed(name)
    }
}

fn binary_precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Or => PREC_OR,
        BinOp::And => PREC_AND,
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge | BinOp::Eq | BinOp::Ne => PREC_COMPARE,
        BinOp::Add | BinOp::Sub => PREC_ADD,
        BinOp::Mul | BinOp::Div => PREC_MUL,
        BinOp::IntDiv => PREC_ATOM,
    }
}

fn python_operator(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div | BinOp::IntDiv => "/",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::And => "and",
        BinOp::Or => "or",
    }
}

impl Expr {
    /// Render as a Python expression
    pub fn render(&self) -> String {
        match self {
            Expr::Int(value) => value.to_string(),
            Expr::Float(lexeme) => lexeme.clone(),
            Expr::Str(text) => format!("\"{}\"", text),
            Expr::Char(text) => format!("'{}'", text),
            Expr::Bool(true) => "True".to_string(),
            Expr::Bool(false) => "False".to_string(),
            Expr::Var { name, .. } => python_name(name).into_owned(),
            Expr::Unary { op: UnOp::Neg, operand } => {
                format!("-{}", operand.render_operand(PREC_NEG, false, false))
            }
            Expr::Unary { op: UnOp::Not, operand } => {
                format!("not {}", operand.render_operand(PREC_NOT, false, false))
            }
            Expr::Binary {
                op: BinOp::IntDiv,
                left,
                right,
            } => {
                // C truncates toward zero; `//` would floor
                format!(
                    "int({} / {})",
                    left.render_operand(PREC_MUL, false, false),
                    right.render_operand(PREC_MUL, true, false)
                )
            }
            Expr::Binary { op, left, right } => {
                let precedence = binary_precedence(*op);
                let compare = op.is_comparison();
                format!(
                    "{} {} {}",
                    left.render_operand(precedence, false, compare),
                    python_operator(*op),
                    right.render_operand(precedence, true, compare)
                )
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Unary { op: UnOp::Neg, .. } => PREC_NEG,
            Expr::Unary { op: UnOp::Not, .. } => PREC_NOT,
            Expr::Binary { op, .. } => binary_precedence(*op),
            Expr::Int(_)
            | Expr::Float(_)
            | Expr::Str(_)
            | Expr::Char(_)
            | Expr::Bool(_)
            | Expr::Var { .. } => PREC_ATOM,
        }
    }

    /// Render as the operand of an operator binding at `parent`
    fn render_operand(&self, parent: u8, right_side: bool, in_comparison: bool) -> String {
        let precedence = self.precedence();
        let chained_comparison =
            in_comparison && matches!(self, Expr::Binary { op, .. } if op.is_comparison());
        let needs_parens = precedence < parent
            || (right_side && precedence == parent)
            || chained_comparison;

        if needs_parens {
            format!("({})", self.render())
        } else {
            self.render()
        }
    }
}

/// Render `statements` at `indent`, dropping empty fragments
pub(crate) fn render_statements(statements: &[Stmt], indent: Indent) -> Vec<String> {
    statements
        .iter()
        .map(|stmt| stmt.render(indent))
        .filter(|text| !text.is_empty())
        .collect()
}

impl Block {
    /// Render as an indented Python suite; an empty suite becomes `pass`
    pub fn render(&self, indent: Indent) -> String {
        let lines = render_statements(&self.statements, indent);
        if lines.is_empty() {
            format!("{}pass", indent)
        } else {
            lines.join("\n")
        }
    }
}

impl Stmt {
    /// Render as Python lines at `indent`
    pub fn render(&self, indent: Indent) -> String {
        match self {
            Stmt::VarDecl { ty, name, init } => {
                let value = match init {
                    Some(expr) => render_initializer(*ty, expr),
                    None => default_value(*ty).to_string(),
                };
                format!("{}{} = {}", indent, python_name(name), value)
            }
            Stmt::Assign { target, value } => {
                format!("{}{} = {}", indent, python_name(target), value.render())
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => render_if("if", condition, then_block, else_block.as_ref(), indent),
            Stmt::While { condition, body } => {
                format!(
                    "{}while {}:\n{}",
                    indent,
                    condition.render(),
                    body.render(indent.deeper())
                )
            }
            Stmt::For {
                init,
                condition,
                increment,
                body,
            } => loops::render_for(init, condition, increment, body, indent),
            Stmt::Cout { items } => format!("{}{}", indent, render_print(items)),
            Stmt::Cin { target, ty } => {
                format!("{}{} = {}", indent, python_name(target), read_input(*ty))
            }
            // Only reachable as the last statement of `main`
            Stmt::Return { .. } => String::new(),
            Stmt::Block(block) => render_statements(&block.statements, indent).join("\n"),
            Stmt::Expr(expr) => format!("{}{}", indent, expr.render()),
        }
    }
}

impl Program {
    /// Render the whole program at top level, one statement after another
    pub fn render(&self, indent: Indent) -> String {
        render_statements(&self.statements, indent).join("\n")
    }
}

/// `if`/`elif`/`else` chain. An `else` holding nothing but another `if`
/// continues the chain as `elif`.
fn render_if(
    keyword: &str,
    condition: &Expr,
    then_block: &Block,
    else_block: Option<&Block>,
    indent: Indent,
) -> String {
    let mut out = format!(
        "{}{} {}:\n{}",
        indent,
        keyword,
        condition.render(),
        then_block.render(indent.deeper())
    );

    if let Some(else_block) = else_block {
        out.push('\n');
        match else_block.statements.as_slice() {
            [Stmt::If {
                condition,
                then_block,
                else_block,
            }] => out.push_str(&render_if(
                "elif",
                condition,
                then_block,
                else_block.as_ref(),
                indent,
            )),
            _ => {
                out.push_str(&format!(
                    "{}else:\n{}",
                    indent,
                    else_block.render(indent.deeper())
                ));
            }
        }
    }

    out
}

/// A floating initializer of an `int` variable is truncated like C does
fn render_initializer(ty: VarType, init: &Expr) -> String {
    let truncates = ty == VarType::Int && init.static_type().is_some_and(VarType::is_floating);
    if truncates {
        format!("int({})", init.render())
    } else {
        init.render()
    }
}

fn default_value(ty: VarType) -> &'static str {
    match ty {
        VarType::Int => "0",
        VarType::Float | VarType::Double => "0.0",
        VarType::String => "\"\"",
        VarType::Char => "''",
        VarType::Bool => "False",
    }
}

/// Python expression reading one line of input as `ty`
fn read_input(ty: Option<VarType>) -> &'static str {
    match ty {
        Some(VarType::Int) => "int(input())",
        Some(VarType::Float) | Some(VarType::Double) => "float(input())",
        Some(VarType::Char) => "input()[:1]",
        Some(VarType::Bool) => "input().strip().lower() in (\"1\", \"true\")",
        Some(VarType::String) | None => "input()",
    }
}

/// One `print` call for a `cout` chain. A trailing `endl` is the implicit
/// newline of `print`; any other `endl` is printed as `"\n"`.
fn render_print(items: &[CoutItem]) -> String {
    let (items, newline) = match items.split_last() {
        Some((CoutItem::Endl, rest)) => (rest, true),
        _ => (items, false),
    };

    let mut args: Vec<String> = items
        .iter()
        .map(|item| match item {
            CoutItem::Expr(expr) => expr.render(),
            CoutItem::Endl => "\"\\n\"".to_string(),
        })
        .collect();

    if args.len() > 1 {
        args.push("sep=\"\"".to_string());
    }
    if !newline {
        args.push("end=\"\"".to_string());
    }

    format!("print({})", args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;
    use std::num::NonZeroUsize;

    fn render_expr(source: &str) -> String {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_expression().unwrap().render()
    }

    fn render_body(body: &str) -> String {
        let source = format!("int main() {{\n{}\n}}", body);
        let program = Parser::new(&source).unwrap().parse_program().unwrap();
        program.render(Indent::default())
    }

    #[test]
    fn test_precedence_battery() {
        let cases = [
            ("a + b * c", "a + b * c"),
            ("(a + b) * c", "(a + b) * c"),
            ("a * (b + c)", "a * (b + c)"),
            ("a - (b - c)", "a - (b - c)"),
            ("a - b - c", "a - b - c"),
            ("-(a + b)", "-(a + b)"),
            ("-a * b", "-a * b"),
            ("a && b || c", "a and b or c"),
            ("a && (b || c)", "a and (b or c)"),
            ("!a && b", "not a and b"),
            ("!(a && b)", "not (a and b)"),
            ("!(a < b)", "not a < b"),
            ("!a < b", "(not a) < b"),
            ("a < b == c", "(a < b) == c"),
            ("a + 1 < b * 2", "a + 1 < b * 2"),
            ("(x < y) && (y < z)", "x < y and y < z"),
        ];
        for (source, expected) in cases {
            assert_eq!(render_expr(source), expected, "rendering {}", source);
        }
    }

    #[test]
    fn test_integer_division_truncates() {
        assert_eq!(render_expr("7 / 2"), "int(7 / 2)");
        assert_eq!(render_expr("-7 / 2 * 3"), "int(-7 / 2) * 3");
        assert_eq!(render_expr("8 / (2 * 2)"), "int(8 / (2 * 2))");
        assert_eq!(render_expr("7.5 / 2"), "7.5 / 2");
    }

    #[test]
    fn test_literals_and_names() {
        assert_eq!(render_expr(r#""tab\there""#), r#""tab\there""#);
        assert_eq!(render_expr("'q'"), "'q'");
        assert_eq!(render_expr("true || false"), "True or False");
        assert_eq!(render_expr("print + lambda"), "print_ + lambda_");
    }

    #[test]
    fn test_declarations() {
        assert_eq!(render_body("int a = 5;"), "a = 5");
        assert_eq!(
            render_body("int i; float f; double d; string s; char c; bool b;"),
            "i = 0\nf = 0.0\nd = 0.0\ns = \"\"\nc = ''\nb = False"
        );
        assert_eq!(render_body("int t = 2.9;"), "t = int(2.9)");
    }

    #[test]
    fn test_if_elif_else() {
        let body = "int x = 3;\nif (x < 0) { x = 0; } else if (x > 10) { x = 10; } else { }";
        assert_eq!(
            render_body(body),
            "x = 3\nif x < 0:\n    x = 0\nelif x > 10:\n    x = 10\nelse:\n    pass"
        );
    }

    #[test]
    fn test_nested_indentation() {
        let body = "int i = 0;\nwhile (i < 2) {\n  if (i == 1) cout << i << endl;\n  i++;\n}";
        assert_eq!(
            render_body(body),
            "i = 0\nwhile i < 2:\n    if i == 1:\n        print(i)\n    i = i + 1"
        );
    }

    #[test]
    fn test_cout() {
        assert_eq!(render_body(r#"cout << "x" << endl;"#), r#"print("x")"#);
        assert_eq!(
            render_body(r#"cout << "Enter a number: ";"#),
            r#"print("Enter a number: ", end="")"#
        );
        assert_eq!(
            render_body(r#"int a = 1; cout << "a=" << a << endl;"#),
            "a = 1\nprint(\"a=\", a, sep=\"\")"
        );
        assert_eq!(render_body("cout << endl;"), "print()");
        assert_eq!(
            render_body(r#"cout << "a" << endl << "b";"#),
            "print(\"a\", \"\\n\", \"b\", sep=\"\", end=\"\")"
        );
    }

    #[test]
    fn test_cin_conversions() {
        assert_eq!(
            render_body("int n; cin >> n; double d; cin >> d; string s; cin >> s; cin >> q;"),
            "n = 0\nn = int(input())\nd = 0.0\nd = float(input())\ns = \"\"\ns = input()\nq = input()"
        );
    }

    #[test]
    fn test_cin_char_and_bool() {
        assert_eq!(
            render_body("char c; cin >> c; bool flag; cin >> flag;"),
            "c = ''\nc = input()[:1]\nflag = False\nflag = input().strip().lower() in (\"1\", \"true\")"
        );
    }

    #[test]
    fn test_reserved_names_stay_distinct() {
        assert_eq!(
            render_body("int print = 1; int print_ = 2; cout << print << endl;"),
            "print_ = 1\nprint__ = 2\nprint(print_)"
        );
        assert_eq!(python_name("range__"), "range___");
        assert_eq!(python_name("total_"), "total_");
        assert_eq!(python_name("_"), "_");
    }

    #[test]
    fn test_trailing_return_and_empty_blocks_vanish() {
        assert_eq!(render_body("int a = 1; { } return 0;"), "a = 1");
    }

    #[test]
    fn test_indent_width() {
        let program = Parser::new("int main() { while (1) { cout << 1; } }")
            .unwrap()
            .parse_program()
            .unwrap();
        assert_eq!(
            program.render(Indent::new(NonZeroUsize::new(2).unwrap())),
            "while 1:\n  print(1, end=\"\")"
        );
    }
}
