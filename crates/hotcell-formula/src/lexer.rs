//! Formula tokenizer
//!
//! The whole input is tokenized before parsing starts, so an unrecognized
//! character anywhere in a formula is reported ahead of any syntax or
//! semantic problem.

use crate::error::{FormulaError, FormulaResult};
use hotcell_core::ErrorCode;

/// Token types
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(f64),
    String(String),
    Error(ErrorCode),

    // Identifiers and references
    Identifier(String), // Function or variable name
    CellRef(String),    // A1-style reference, text as written
    NamedRef(String),   // @name reference, including the '@'

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    Ampersand,
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    Colon,
    Comma,
    Semicolon,

    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
}

/// Tokenize a formula body
///
/// # Example
/// ```rust
/// use hotcell_formula::lexer::{tokenize, Token};
///
/// let tokens = tokenize("a1:@total").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::CellRef("a1".into()),
///         Token::Colon,
///         Token::NamedRef("@total".into()),
///     ]
/// );
/// assert!(tokenize("!A1").is_err());
/// ```
pub fn tokenize(input: &str) -> FormulaResult<Vec<Token>> {
    let mut lexer = Lexer { input, pos: 0 };
    let mut tokens = Vec::new();

    loop {
        lexer.skip_whitespace();
        if lexer.is_at_end() {
            break;
        }
        tokens.push(lexer.scan_token()?);
    }

    log::trace!("tokenized {:?} into {} tokens", input, tokens.len());
    Ok(tokens)
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn scan_token(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        let c = match self.peek_char() {
            Some(c) => c,
            None => return Err(self.error(start, "unexpected end of input")),
        };

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '^' => Some(Token::Caret),
            '%' => Some(Token::Percent),
            '&' => Some(Token::Ampersand),
            '=' => Some(Token::Equal),
            ':' => Some(Token::Colon),
            ',' => Some(Token::Comma),
            ';' => Some(Token::Semicolon),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            '{' => Some(Token::LeftBrace),
            '}' => Some(Token::RightBrace),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        if c == '<' {
            self.advance();
            return Ok(match self.peek_char() {
                Some('=') => {
                    self.advance();
                    Token::LessEqual
                }
                Some('>') => {
                    self.advance();
                    Token::NotEqual
                }
                _ => Token::LessThan,
            });
        }

        if c == '>' {
            self.advance();
            if self.peek_char() == Some('=') {
                self.advance();
                return Ok(Token::GreaterEqual);
            }
            return Ok(Token::GreaterThan);
        }

        if c == '"' || c == '\'' {
            return self.scan_string(c);
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if c == '#' {
            return self.scan_error_literal();
        }

        if c == '@' {
            return self.scan_named_ref();
        }

        if c.is_ascii_alphabetic() || c == '_' || c == '$' {
            return self.scan_identifier_or_ref();
        }

        Err(self.error(start, format!("unexpected character '{}'", c)))
    }

    fn scan_string(&mut self, quote: char) -> FormulaResult<Token> {
        let start = self.pos;
        self.advance(); // Skip opening quote

        let mut s = String::new();
        loop {
            match self.peek_char() {
                Some(c) if c == quote => {
                    // Doubled quote is an escaped quote
                    if self.peek_char_at(1) == Some(quote) {
                        s.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return Ok(Token::String(s));
                    }
                }
                Some(c) => {
                    s.push(c);
                    self.advance();
                }
                None => return Err(self.error(start, "unterminated string literal")),
            }
        }
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent only when digits follow, so `1E` is not swallowed
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            let sign = self.peek_char_at(1).map_or(0, |c| (c == '+' || c == '-') as usize);
            if self
                .peek_char_at(1 + sign)
                .map_or(false, |c| c.is_ascii_digit())
            {
                for _ in 0..=sign {
                    self.advance();
                }
                while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = &self.input[start..self.pos];
        text.parse()
            .map(Token::Number)
            .map_err(|_| self.error(start, format!("invalid number '{}'", text)))
    }

    fn scan_error_literal(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        self.advance(); // '#'
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '/')
        {
            self.advance();
        }
        if matches!(self.peek_char(), Some('!') | Some('?')) {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        ErrorCode::from_str(text)
            .map(Token::Error)
            .ok_or_else(|| self.error(start, format!("unknown error literal '{}'", text)))
    }

    fn scan_named_ref(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        self.advance(); // '@'

        let name_start = self.pos;
        while self.peek_char().map_or(false, is_name_char) {
            self.advance();
        }
        if self.pos == name_start {
            return Err(self.error(start, "'@' must be followed by a name"));
        }

        Ok(Token::NamedRef(self.input[start..self.pos].to_string()))
    }

    fn scan_identifier_or_ref(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self
            .peek_char()
            .map_or(false, |c| is_name_char(c) || c == '$' || c == '.')
        {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        let is_call = self.peek_non_space() == Some('(');

        // LOG10(100) is a function call, not a reference to cell LOG10
        if is_cell_reference(text) && !is_call {
            return Ok(Token::CellRef(text.to_string()));
        }
        if text.contains('$') {
            return Err(self.error(start, format!("invalid reference '{}'", text)));
        }

        Ok(Token::Identifier(text.to_string()))
    }

    // === Helper methods ===

    fn error(&self, position: usize, message: impl Into<String>) -> FormulaError {
        FormulaError::Lex {
            position,
            message: message.into(),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn peek_non_space(&self) -> Option<char> {
        self.input[self.pos..].chars().find(|c| !c.is_whitespace())
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Cell reference pattern: `[$]letters[$]digits`, any letter case
fn is_cell_reference(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    if bytes.get(i) == Some(&b'$') {
        i += 1;
    }

    let letter_start = i;
    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }
    if i == letter_start {
        return false;
    }

    if bytes.get(i) == Some(&b'$') {
        i += 1;
    }

    let digit_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digit_start {
        return false;
    }

    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_refs_any_case() {
        assert_eq!(tokenize("A1").unwrap(), vec![Token::CellRef("A1".into())]);
        assert_eq!(tokenize("a1").unwrap(), vec![Token::CellRef("a1".into())]);
        assert_eq!(tokenize("$b$12").unwrap(), vec![Token::CellRef("$b$12".into())]);
    }

    #[test]
    fn test_function_name_that_looks_like_a_cell() {
        assert_eq!(
            tokenize("LOG10 (1)").unwrap(),
            vec![
                Token::Identifier("LOG10".into()),
                Token::LeftParen,
                Token::Number(1.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_named_refs() {
        assert_eq!(
            tokenize("@named_cell").unwrap(),
            vec![Token::NamedRef("@named_cell".into())]
        );
        assert!(matches!(
            tokenize("@.named_cell"),
            Err(FormulaError::Lex { position: 0, .. })
        ));
        assert!(tokenize("@").is_err());
    }

    #[test]
    fn test_unknown_leading_character_fails() {
        assert!(tokenize("!named_cell1:@named_cell2").is_err());
        assert!(tokenize("1 + ~2").is_err());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tokenize("42").unwrap(), vec![Token::Number(42.0)]);
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("1e3").unwrap(), vec![Token::Number(1000.0)]);
        assert_eq!(tokenize("2.5E-1").unwrap(), vec![Token::Number(0.25)]);
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            tokenize("\"say \"\"hi\"\"\"").unwrap(),
            vec![Token::String("say \"hi\"".into())]
        );
        assert_eq!(tokenize("'it''s'").unwrap(), vec![Token::String("it's".into())]);
        assert!(tokenize("\"open").is_err());
    }

    #[test]
    fn test_error_literals() {
        assert_eq!(tokenize("#DIV/0!").unwrap(), vec![Token::Error(ErrorCode::Div0)]);
        assert_eq!(tokenize("#N/A").unwrap(), vec![Token::Error(ErrorCode::Na)]);
        assert_eq!(tokenize("#name?").unwrap(), vec![Token::Error(ErrorCode::Name)]);
        assert!(tokenize("#SPILL!").is_err());
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            tokenize("1<>2<=3>=4&5%").unwrap(),
            vec![
                Token::Number(1.0),
                Token::NotEqual,
                Token::Number(2.0),
                Token::LessEqual,
                Token::Number(3.0),
                Token::GreaterEqual,
                Token::Number(4.0),
                Token::Ampersand,
                Token::Number(5.0),
                Token::Percent,
            ]
        );
    }

    #[test]
    fn test_identifier_not_reference() {
        assert_eq!(
            tokenize("named-cell2").unwrap(),
            vec![
                Token::Identifier("named".into()),
                Token::Minus,
                Token::CellRef("cell2".into()),
            ]
        );
        assert!(tokenize("$foo").is_err());
    }
}
