// Integration tests for C++ to Python translation

use std::num::NonZeroUsize;

use cpptopy::parser::ast::SourceLocation;
use cpptopy::parser::ParseError;
use cpptopy::{translate, TranslateError, TranslatorConfig};
use pretty_assertions::assert_eq;

const SAMPLE: &str = include_str!("../demos/sample.cpp");

fn bare() -> TranslatorConfig {
    TranslatorConfig {
        emit_header: false,
        ..TranslatorConfig::default()
    }
}

fn parse_error(source: &str) -> ParseError {
    match translate(source, &TranslatorConfig::default()) {
        Err(TranslateError::Parse(e)) => e,
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_sample_program() {
    let output = translate(SAMPLE, &TranslatorConfig::default()).expect("Translation failed");

    let expected = r#"# Translated from C++ (subset) to Python
limit = 10
a = 5
b = 10
msg = "Hello"
print("Enter a number: ", end="")
n = 0
n = int(input())
for i in range(0, 3):
    print(msg, " ", i, sep="")
while a < limit:
    a = a + 2
if a < b:
    print("a is less")
elif a == b:
    print("a equals b")
else:
    print("a is greater")
average = (a + b) / 2.0
half = int(n / 2)
big = n > 100 and not half < 0
print("average: ", average, sep="")
print(half)
if big:
    print("big")
"#;
    assert_eq!(output, expected);
}

#[test]
fn test_translation_is_deterministic() {
    let first = translate(SAMPLE, &TranslatorConfig::default()).expect("Translation failed");
    let second = translate(SAMPLE, &TranslatorConfig::default()).expect("Translation failed");
    assert_eq!(first, second);
}

#[test]
fn test_layout_and_comments_do_not_matter() {
    let compact = "int main(){int x=1;while(x<4){x=x*2;}cout<<x<<endl;return 0;}";
    let spread = r#"
        // doubling
        int   main ( )
        {
            int x = 1;   /* start */
            while ( x < 4 )
            {
                x = x * 2;   // grow
            }
            cout << x
                 << endl;
            return 0;
        }
    "#;

    let expected = translate(compact, &bare()).expect("Translation failed");
    assert_eq!(translate(spread, &bare()).expect("Translation failed"), expected);
    assert_eq!(expected, "x = 1\nwhile x < 4:\n    x = x * 2\nprint(x)\n");
}

#[test]
fn test_declaration_with_initializer() {
    let output = translate("int main() { int a = 5; }", &bare()).expect("Translation failed");
    assert_eq!(output, "a = 5\n");
}

#[test]
fn test_if_else_with_output() {
    let source = r#"
        int main() {
            int a = 5;
            int b = 10;
            if (a < b) { cout << "x" << endl; } else { cout << "y" << endl; }
        }
    "#;
    let output = translate(source, &bare()).expect("Translation failed");
    assert_eq!(
        output,
        "a = 5\nb = 10\nif a < b:\n    print(\"x\")\nelse:\n    print(\"y\")\n"
    );
}

#[test]
fn test_array_indexing_is_unsupported() {
    let source = "int main() { int i; for (i = 0; i < 3; i = i + 1) { arr[i] = i; } }";
    match parse_error(source) {
        ParseError::Unsupported(e) => {
            assert_eq!(e.construct, "arrays and indexing");
            assert_eq!(e.location, SourceLocation::new(1, 56));
        }
        other => panic!("Expected unsupported construct, got {:?}", other),
    }
}

#[test]
fn test_unterminated_comment_points_at_its_start() {
    let source = "int main() {\n  int a = 1; /* never\n  closed\n}";
    match parse_error(source) {
        ParseError::Lex(e) => assert_eq!(e.location, SourceLocation::new(2, 14)),
        other => panic!("Expected lexer error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_declarations_translate_independently() {
    let output = translate("int main() { int a = 1; int a = 2; }", &bare())
        .expect("Translation failed");
    assert_eq!(output, "a = 1\na = 2\n");
}

#[test]
fn test_error_messages_carry_positions() {
    let err = translate("int main() {\n  int x = 5\n  int y;\n}", &bare()).unwrap_err();
    assert_eq!(err.location(), Some(SourceLocation::new(3, 3)));
    assert_eq!(
        err.to_string(),
        "Syntax error at line 3, column 3: expected ';' after variable declaration, found keyword 'int'"
    );
}

#[test]
fn test_custom_indent_width() {
    let config = TranslatorConfig {
        indent_width: NonZeroUsize::new(2).unwrap(),
        emit_header: false,
    };
    let source = "int main() { for (int i = 0; i < 2; i++) { if (i == 1) { cout << i; } } }";
    let output = translate(source, &config).expect("Translation failed");
    assert_eq!(
        output,
        "for i in range(0, 2):\n  if i == 1:\n    print(i, end=\"\")\n"
    );
}
