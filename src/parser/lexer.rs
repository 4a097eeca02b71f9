//! Lexer (tokenizer) for the C++ subset
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! `#include` and other preprocessor directives are silently skipped rather than
//! parsed, matching the translator's no-preprocessor policy.
//!
//! Keywords outside the supported subset (`class`, `template`, `switch`, ...)
//! and punctuation such as `[` are still tokenized so that the parser can
//! reject them with an unsupported-construct error at the right position.

use super::ast::SourceLocation;
use std::fmt;

/// Reserved words. An identifier spelled like one of these is always a keyword.
pub const KEYWORDS: &[&str] = &[
    // Types
    "int", "float", "double", "char", "bool", "string",
    // Control flow
    "if", "else", "while", "for", "return",
    // Stream I/O
    "cout", "cin", "endl",
    // Literals and program structure
    "true", "false", "using", "namespace",
    // Recognized but unsupported
    "class", "struct", "union", "enum", "template", "typename", "typedef",
    "switch", "case", "default", "do", "break", "continue", "goto", "new",
    "delete", "void", "const", "static", "unsigned", "signed", "long",
    "short", "auto", "public", "private", "protected", "virtual", "this",
    "operator", "sizeof", "nullptr",
];

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    Operator,
    Punctuation,
    Eof,
}

/// A classified lexeme with its source position.
///
/// `lexeme` is the exact matched text, quotes included for string and
/// character literals. The end-of-input token has an empty lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == keyword
    }

    /// True for an operator or punctuation token spelled `symbol`
    pub fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self.kind, TokenKind::Operator | TokenKind::Punctuation) && self.lexeme == symbol
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Keyword => write!(f, "keyword '{}'", self.lexeme),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntLiteral => write!(f, "int literal {}", self.lexeme),
            TokenKind::FloatLiteral => write!(f, "float literal {}", self.lexeme),
            TokenKind::StringLiteral => write!(f, "string literal {}", self.lexeme),
            TokenKind::CharLiteral => write!(f, "char literal {}", self.lexeme),
            TokenKind::Operator | TokenKind::Punctuation => write!(f, "'{}'", self.lexeme),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    /// The character that starts no valid token, if that is the failure
    pub character: Option<char>,
    pub location: SourceLocation,
}

impl LexError {
    fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        LexError {
            message: message.into(),
            character: None,
            location,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for the C++ subset
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
                break;
            }

            if self.peek() == Some('#') && self.at_line_start() {
                self.skip_preprocessor_directive();
                continue;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self
            .advance()
            .ok_or_else(|| LexError::new("Unexpected end of file", loc))?;

        match ch {
            '"' => self.string_literal(loc),
            '\'' => self.char_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            // Operators, longest spelling first
            '+' => Ok(self.operator(ch, &['+', '='], loc)),
            '-' => Ok(self.operator(ch, &['-', '='], loc)),
            '*' => Ok(self.operator(ch, &['='], loc)),
            '/' => Ok(self.operator(ch, &['='], loc)),
            '=' => Ok(self.operator(ch, &['='], loc)),
            '!' => Ok(self.operator(ch, &['='], loc)),
            '<' => Ok(self.operator(ch, &['=', '<'], loc)),
            '>' => Ok(self.operator(ch, &['=', '>'], loc)),
            '&' => Ok(self.operator(ch, &['&'], loc)),
            '|' => Ok(self.operator(ch, &['|'], loc)),

            '(' | ')' | '{' | '}' | '[' | ']' | ';' | ',' => {
                Ok(Token::new(TokenKind::Punctuation, ch.to_string(), loc))
            }

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                character: Some(ch),
                location: loc,
            }),
        }
    }

    /// Operator starting with `first`, extended by one of `seconds` when the
    /// next character allows a two-character spelling
    fn operator(&mut self, first: char, seconds: &[char], loc: SourceLocation) -> Token {
        let mut lexeme = first.to_string();
        if let Some(next) = self.peek() {
            if seconds.contains(&next) {
                self.advance();
                lexeme.push(next);
            }
        }
        Token::new(TokenKind::Operator, lexeme, loc)
    }

    /// Parse string literal. Characters are copied verbatim; a backslash only
    /// keeps the following character from closing the literal.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut lexeme = String::from('"');

        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
            lexeme.push(ch);

            if ch == '"' {
                return Ok(Token::new(TokenKind::StringLiteral, lexeme, loc));
            }
            if ch == '\\' {
                match self.peek() {
                    Some(escaped) if escaped != '\n' => {
                        self.advance();
                        lexeme.push(escaped);
                    }
                    _ => break,
                }
            }
        }

        Err(LexError::new("Unterminated string literal", loc))
    }

    /// Parse character literal: one character or one escape sequence
    fn char_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut lexeme = String::from('\'');

        match self.advance() {
            Some('\\') => {
                lexeme.push('\\');
                let escaped = self
                    .advance()
                    .ok_or_else(|| LexError::new("Unterminated character literal", loc))?;
                lexeme.push(escaped);
            }
            Some(ch) if ch != '\'' && ch != '\n' => lexeme.push(ch),
            _ => return Err(LexError::new("Empty or unterminated character literal", loc)),
        }

        if self.advance() != Some('\'') {
            return Err(LexError::new("Expected closing quote in character literal", loc));
        }
        lexeme.push('\'');

        Ok(Token::new(TokenKind::CharLiteral, lexeme, loc))
    }

    /// Parse numeric literal, starting at a digit or at a `.` followed by a
    /// digit. A decimal point makes it a float literal; an exponent is only
    /// accepted after the fractional part.
    fn number_literal(&mut self, first: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut lexeme = String::new();
        lexeme.push(first);
        self.take_digits(&mut lexeme);

        let mut kind = TokenKind::IntLiteral;
        if first == '.' {
            kind = TokenKind::FloatLiteral;
        } else if self.peek() == Some('.') {
            kind = TokenKind::FloatLiteral;
            self.advance();
            lexeme.push('.');
            self.take_digits(&mut lexeme);
        }

        if kind == TokenKind::FloatLiteral && matches!(self.peek(), Some('e') | Some('E')) {
            let digit_at = if matches!(self.peek_ahead(1), Some('+') | Some('-')) { 2 } else { 1 };
            if self.peek_ahead(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    if let Some(ch) = self.advance() {
                        lexeme.push(ch);
                    }
                }
                self.take_digits(&mut lexeme);
            }
        }

        if self.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '.') {
            return Err(LexError::new(
                format!("Invalid numeric literal: {}{}", lexeme, self.peek().unwrap_or_default()),
                loc,
            ));
        }

        Ok(Token::new(kind, lexeme, loc))
    }

    fn take_digits(&mut self, lexeme: &mut String) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            lexeme.push(ch);
            self.advance();
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if KEYWORDS.contains(&ident.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */). Block comments do not nest.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::new("Unterminated block comment", start_loc))
    }

    /// Whether only blanks precede the current position on its line
    fn at_line_start(&self) -> bool {
        self.input[..self.position]
            .iter()
            .rev()
            .take_while(|&&c| c != '\n')
            .all(|c| c.is_whitespace())
    }

    /// Skip preprocessor directive (#include, etc.)
    fn skip_preprocessor_directive(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lexemes(source: &str) -> Vec<String> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.lexeme)
            .collect()
    }

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("int main() { return 0; }");
        let tokens = lexer.tokenize().unwrap();

        assert!(tokens[0].is_keyword("int"));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "main");
        assert!(tokens[2].is_symbol("("));
        assert!(tokens[3].is_symbol(")"));
        assert!(tokens[4].is_symbol("{"));
        assert!(tokens[5].is_keyword("return"));
        assert_eq!(tokens[6].kind, TokenKind::IntLiteral);
        assert!(tokens[7].is_symbol(";"));
        assert!(tokens[8].is_symbol("}"));
        assert_eq!(tokens[9].kind, TokenKind::Eof);
    }

    #[test]
    fn test_every_token_kind() {
        assert_eq!(
            kinds(r#"while x 42 3.5 "hi" 'c' <= ;"#),
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::IntLiteral,
                TokenKind::FloatLiteral,
                TokenKind::StringLiteral,
                TokenKind::CharLiteral,
                TokenKind::Operator,
                TokenKind::Punctuation,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators_maximal_munch() {
        assert_eq!(
            lexemes("++ -- += -= == != && || << >> <= >= < > = ! *= /="),
            vec![
                "++", "--", "+=", "-=", "==", "!=", "&&", "||", "<<", ">>", "<=", ">=", "<",
                ">", "=", "!", "*=", "/=", ""
            ]
        );
        // `<<<` is `<<` then `<`
        assert_eq!(lexemes("a<<<b"), vec!["a", "<<", "<", "b", ""]);
    }

    #[test]
    fn test_keywords_are_reserved() {
        let tokens = Lexer::new("cout couts endl int_x").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].kind, TokenKind::Keyword);
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_numbers() {
        let tokens = Lexer::new("7 7.25 2. 1.5e3 6.0E-2").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[1].lexeme, "7.25");
        assert_eq!(tokens[2].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[2].lexeme, "2.");
        assert_eq!(tokens[3].lexeme, "1.5e3");
        assert_eq!(tokens[4].lexeme, "6.0E-2");

        let err = Lexer::new("int x = 10abc;").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 9));
    }

    #[test]
    fn test_comments() {
        let mut lexer = Lexer::new("int x; // comment\nint y; /* block\ncomment */ int z;");
        let tokens = lexer.tokenize().unwrap();

        assert!(tokens[0].is_keyword("int"));
        assert_eq!(tokens[1].lexeme, "x");
        assert!(tokens[2].is_symbol(";"));
        assert!(tokens[3].is_keyword("int"));
        assert_eq!(tokens[4].lexeme, "y");
        assert!(tokens[5].is_symbol(";"));
        assert!(tokens[6].is_keyword("int"));
        assert_eq!(tokens[7].lexeme, "z");
        assert_eq!(tokens[7].location, SourceLocation::new(3, 16));
    }

    #[test]
    fn test_block_comments_do_not_nest() {
        // The first `*/` closes the comment, leaving `*/` as tokens.
        assert_eq!(lexemes("/* a /* b */ */"), vec!["*", "/", ""]);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("int a;\n  /* never closed").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated block comment");
        assert_eq!(err.location, SourceLocation::new(2, 3));
    }

    #[test]
    fn test_string_literal_is_copied_verbatim() {
        let tokens = Lexer::new(r#""say \"hi\"\n""#).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, r#""say \"hi\"\n""#);
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new("x = \"abc\n;").tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("int a = 5;\nint b = a @ 2;").tokenize().unwrap_err();
        assert_eq!(err.character, Some('@'));
        assert_eq!(err.location, SourceLocation::new(2, 11));
        assert_eq!(
            err.to_string(),
            "Lexer error at line 2, column 11: Unexpected character: '@'"
        );
    }

    #[test]
    fn test_preprocessor_skip() {
        let mut lexer = Lexer::new("#include <iostream>\nint x;");
        let tokens = lexer.tokenize().unwrap();

        assert!(tokens[0].is_keyword("int"));
        assert_eq!(tokens[1].lexeme, "x");
    }

    #[test]
    fn test_directive_must_start_its_line() {
        let tokens = Lexer::new("int a;\n   #include <string>\nint b;").tokenize().unwrap();
        assert_eq!(tokens[3].lexeme, "int");
        assert_eq!(tokens[4].lexeme, "b");

        let err = Lexer::new("int x = 1; # junk\n").tokenize().unwrap_err();
        assert_eq!(err.character, Some('#'));
        assert_eq!(err.location, SourceLocation::new(1, 12));
    }

    #[test]
    fn test_leading_dot_float() {
        let tokens = Lexer::new("x = .5 + .25e1;").tokenize().unwrap();
        assert_eq!(tokens[2].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[2].lexeme, ".5");
        assert_eq!(tokens[4].lexeme, ".25e1");

        // A lone dot is still not a token
        let err = Lexer::new("x = .;").tokenize().unwrap_err();
        assert_eq!(err.character, Some('.'));
        assert!(Lexer::new("x = .5.;").tokenize().is_err());
    }

    #[test]
    fn test_char_literal_errors() {
        let err = Lexer::new("char c = '';").tokenize().unwrap_err();
        assert_eq!(err.message, "Empty or unterminated character literal");
        assert_eq!(err.location, SourceLocation::new(1, 10));

        let err = Lexer::new("char c = 'ab';").tokenize().unwrap_err();
        assert_eq!(err.message, "Expected closing quote in character literal");
        assert_eq!(err.location, SourceLocation::new(1, 10));

        let err = Lexer::new("char c = 'a").tokenize().unwrap_err();
        assert_eq!(err.message, "Expected closing quote in character literal");
        assert_eq!(err.location, SourceLocation::new(1, 10));

        let tokens = Lexer::new(r"'\n' 'x'").tokenize().unwrap();
        assert_eq!(tokens[0].lexeme, r"'\n'");
        assert_eq!(tokens[1].lexeme, "'x'");
    }
}
