use crate::error::CalcError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Int(i64),
    Float(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    DoubleSlash,
    Percent,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Eof,
}

impl Token {
    /// How the token reads in an error message.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Int(n) => format!("number {n}"),
            Token::Float(f) => format!("number {f}"),
            Token::Ident(name) => format!("name '{name}'"),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::DoubleStar => "'**'".into(),
            Token::Slash => "'/'".into(),
            Token::DoubleSlash => "'//'".into(),
            Token::Percent => "'%'".into(),
            Token::LParen => "'('".into(),
            Token::RParen => "')'".into(),
            Token::LBracket => "'['".into(),
            Token::RBracket => "']'".into(),
            Token::Comma => "','".into(),
            Token::Eof => "end of expression".into(),
        }
    }
}

pub(crate) struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn read_number(&mut self) -> Result<Token, CalcError> {
        let start = self.pos;
        let mut is_float = false;

        self.eat_digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let save = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                // `2e` or `2e+` is not a number; leave `e` for the identifier rules.
                self.pos = save;
            } else {
                is_float = true;
            }
        }

        let text: String = self.input[start..self.pos].iter().collect();
        if matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            return Err(CalcError::InvalidNumber(text));
        }

        if is_float {
            text.parse::<f64>()
                .map(Token::Float)
                .map_err(|_| CalcError::InvalidNumber(text))
        } else {
            // Literals beyond i64 are rejected rather than silently widened.
            text.parse::<i64>().map(Token::Int).map_err(|_| CalcError::Overflow)
        }
    }

    fn read_identifier(&mut self) -> Result<Token, CalcError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() {
                self.pos += 1;
            } else if c == '_' {
                return Err(CalcError::UnexpectedChar('_'));
            } else {
                break;
            }
        }
        Ok(Token::Ident(self.input[start..self.pos].iter().collect()))
    }

    pub(crate) fn next_token(&mut self) -> Result<Token, CalcError> {
        self.skip_whitespace();
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };

        if ch.is_ascii_digit() || (ch == '.' && matches!(self.peek_at(1), Some(d) if d.is_ascii_digit()))
        {
            return self.read_number();
        }
        if ch.is_ascii_alphabetic() {
            return self.read_identifier();
        }

        self.pos += 1;
        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if self.peek() == Some('*') => {
                self.pos += 1;
                Token::DoubleStar
            }
            '*' => Token::Star,
            '/' if self.peek() == Some('/') => {
                self.pos += 1;
                Token::DoubleSlash
            }
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            other => return Err(CalcError::UnexpectedChar(other)),
        };
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Result<Vec<Token>, CalcError> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token()?;
            if token == Token::Eof {
                return Ok(out);
            }
            out.push(token);
        }
    }

    #[test]
    fn numbers() {
        assert_eq!(
            tokens("12 3.5 .5 1e3 2E-2").unwrap(),
            vec![
                Token::Int(12),
                Token::Float(3.5),
                Token::Float(0.5),
                Token::Float(1000.0),
                Token::Float(0.02)
            ]
        );
    }

    #[test]
    fn compound_operators() {
        assert_eq!(
            tokens("2**3//4").unwrap(),
            vec![
                Token::Int(2),
                Token::DoubleStar,
                Token::Int(3),
                Token::DoubleSlash,
                Token::Int(4)
            ]
        );
    }

    #[test]
    fn rejects_quotes_dots_and_underscores() {
        assert_eq!(tokens("'a'"), Err(CalcError::UnexpectedChar('\'')));
        assert_eq!(tokens("x.y"), Err(CalcError::UnexpectedChar('.')));
        assert_eq!(tokens("__import__"), Err(CalcError::UnexpectedChar('_')));
        assert_eq!(tokens("a_b"), Err(CalcError::UnexpectedChar('_')));
        assert_eq!(tokens("1;2"), Err(CalcError::UnexpectedChar(';')));
    }

    #[test]
    fn number_glued_to_name_is_invalid() {
        assert!(matches!(tokens("2x"), Err(CalcError::InvalidNumber(_))));
    }

    #[test]
    fn huge_integer_literal_overflows() {
        assert_eq!(tokens("99999999999999999999"), Err(CalcError::Overflow));
    }
}
