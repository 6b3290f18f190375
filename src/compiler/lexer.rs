//! This lexer tokenizes the toy language.
//!
//! The lexer is a cursor over the source text that is pulled one token at
//! a time by the parser. Once the cursor reaches the end of the input every
//! further pull returns `EndOfInput`.
use std::fmt;

/// The historical upper bound on identifier and number length.
pub const LEGACY_TOKEN_LIMIT: usize = 99;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Identifier,
    IntegerLiteral,
    Equals,
    Plus,
    Semicolon,
    PrintKeyword,
    EndOfInput,
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TokenKind::*;
        let name = match self {
            Identifier     => "identifier",
            IntegerLiteral => "integer literal",
            Equals         => "`=`",
            Plus           => "`+`",
            Semicolon      => "`;`",
            PrintKeyword   => "`print`",
            EndOfInput     => "end of input",
            Unknown        => "unknown symbol",
        };
        write!(f, "{}", name)
    }
}

// Tokens carry the line they start on for diagnostics.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Token { kind, text: text.into(), line }
    }
}

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    max_len: Option<usize>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer::with_max_token_len(source, None)
    }

    /// Creates a lexer that keeps at most `max_len` characters of any
    /// identifier or number. The rest of the lexeme is still consumed.
    pub fn with_max_token_len(source: &'a str, max_len: Option<usize>) -> Self {
        Lexer { source, pos: 0, line: 1, max_len }
    }

    /// Byte offset of the cursor into the source.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Produces the next token, advancing the cursor past it.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let c = match self.peek() {
            Some(c) => c,
            None => return Token::new(TokenKind::EndOfInput, "", self.line),
        };
        let line = self.line;

        if c.is_ascii_alphabetic() {
            // Classify on the whole lexeme, truncation only affects the text.
            let lexeme = self.take_while(|c| c.is_ascii_alphanumeric());
            let kind = if lexeme == "print" {
                TokenKind::PrintKeyword
            } else {
                TokenKind::Identifier
            };
            return Token::new(kind, self.truncate(lexeme), line);
        }

        if c.is_ascii_digit() {
            let lexeme = self.take_while(|c| c.is_ascii_digit());
            return Token::new(TokenKind::IntegerLiteral, self.truncate(lexeme), line);
        }

        self.pos += c.len_utf8();
        let kind = match c {
            '=' => TokenKind::Equals,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            _   => TokenKind::Unknown,
        };
        Token::new(kind, c.to_string(), line)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '\n' => self.line += 1,
                ' ' | '\t' | '\x0B' | '\x0C' | '\r' => {},
                _ => break,
            }
            self.pos += 1;
        }
    }

    /// Greedily consumes characters matching `pred`.
    fn take_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }

        &self.source[start..self.pos]
    }

    // Lexemes are ASCII, so any byte index is a char boundary.
    fn truncate(&self, lexeme: &str) -> String {
        match self.max_len {
            Some(max) if lexeme.len() > max => lexeme[..max].to_owned(),
            _ => lexeme.to_owned(),
        }
    }
}

/// Collects every token of `source` up to and including the first
/// `EndOfInput`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    loop {
        let tok = lexer.next_token();
        let done = tok.kind == TokenKind::EndOfInput;
        tokens.push(tok);
        if done {
            break;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::TokenKind::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_assignment() {
        let v = vec![
            Token::new(Identifier, "x", 1),
            Token::new(Equals, "=", 1),
            Token::new(IntegerLiteral, "10", 1),
            Token::new(Plus, "+", 1),
            Token::new(IntegerLiteral, "5", 1),
            Token::new(Semicolon, ";", 1),
            Token::new(EndOfInput, "", 1),
        ];
        assert_eq!(tokenize("x = 10 + 5;"), v);
    }

    #[test]
    fn test_end_of_input_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, Identifier);
        for _ in 0..5 {
            assert_eq!(lexer.next_token().kind, EndOfInput);
        }
        assert_eq!(lexer.position(), 1);
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(kinds(""), vec![EndOfInput]);
        assert_eq!(kinds(" \t\r\n\x0B\x0C  \n"), vec![EndOfInput]);
    }

    #[test]
    fn test_print_keyword() {
        assert_eq!(kinds("print"), vec![PrintKeyword, EndOfInput]);
        // Keyword matching is exact and case-sensitive.
        assert_eq!(kinds("printx Print prin"), vec![Identifier, Identifier, Identifier, EndOfInput]);
        assert_eq!(kinds("print = 1 + 2;"), vec![PrintKeyword, Equals, IntegerLiteral, Plus, IntegerLiteral, Semicolon, EndOfInput]);
    }

    #[test]
    fn test_identifier_and_number_boundaries() {
        let toks = tokenize("abc123 123abc");
        assert_eq!(toks[0], Token::new(Identifier, "abc123", 1));
        assert_eq!(toks[1], Token::new(IntegerLiteral, "123", 1));
        assert_eq!(toks[2], Token::new(Identifier, "abc", 1));
        assert_eq!(toks[3].kind, EndOfInput);
    }

    #[test]
    fn test_unknown_symbols() {
        let toks = tokenize("@-_é");
        assert_eq!(toks[0], Token::new(Unknown, "@", 1));
        assert_eq!(toks[1], Token::new(Unknown, "-", 1));
        assert_eq!(toks[2], Token::new(Unknown, "_", 1));
        assert_eq!(toks[3], Token::new(Unknown, "é", 1));
        assert_eq!(toks[4].kind, EndOfInput);
    }

    #[test]
    fn test_line_numbers() {
        let toks = tokenize("x = 1 + 2;\n\nprint x;");
        assert_eq!(toks[5].line, 1);
        assert_eq!(toks[6], Token::new(PrintKeyword, "print", 3));
        assert_eq!(toks[7], Token::new(Identifier, "x", 3));
    }

    #[test]
    fn test_truncation() {
        let long = "a".repeat(150);
        let source = format!("{} 1", long);

        let mut lexer = Lexer::new(&source);
        assert_eq!(lexer.next_token().text, long);

        let mut lexer = Lexer::with_max_token_len(&source, Some(LEGACY_TOKEN_LIMIT));
        let tok = lexer.next_token();
        assert_eq!(tok.text.len(), LEGACY_TOKEN_LIMIT);
        assert_eq!(tok.kind, Identifier);
        // The rest of the lexeme is consumed, not re-lexed.
        assert_eq!(lexer.next_token(), Token::new(IntegerLiteral, "1", 1));
    }

    #[test]
    fn test_truncation_keeps_classification() {
        let mut lexer = Lexer::with_max_token_len("printer = 1 + 2;", Some(5));
        assert_eq!(lexer.next_token(), Token::new(Identifier, "print", 1));
        assert_eq!(lexer.next_token().kind, Equals);

        let mut lexer = Lexer::with_max_token_len("print x;", Some(3));
        assert_eq!(lexer.next_token(), Token::new(PrintKeyword, "pri", 1));
        assert_eq!(lexer.next_token(), Token::new(Identifier, "x", 1));

        let mut lexer = Lexer::with_max_token_len("123456", Some(2));
        assert_eq!(lexer.next_token(), Token::new(IntegerLiteral, "12", 1));
        assert_eq!(lexer.next_token().kind, EndOfInput);
    }

    #[test]
    fn test_position_is_monotone() {
        let source = "x=1+2; print @ y;";
        let mut lexer = Lexer::new(source);
        let mut last = 0;
        loop {
            let tok = lexer.next_token();
            assert!(lexer.position() >= last);
            assert!(lexer.position() <= source.len());
            last = lexer.position();
            if tok.kind == EndOfInput {
                break;
            }
        }
        assert_eq!(last, source.len());
    }
}
