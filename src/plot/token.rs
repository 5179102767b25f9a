//! Tokenizer for plot expressions.

use super::PlotError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    /// Identifier, possibly dotted (`np.sin`).
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `^` or `**`.
    Pow,
    LParen,
    RParen,
    Comma,
    Eof,
}

impl Token {
    /// Whether this token can only appear inside an arithmetic expression.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::Percent
                | Self::Pow
                | Self::LParen
                | Self::RParen
        )
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {}", n),
            Self::Ident(name) => format!("'{}'", name),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::Percent => "'%'".to_string(),
            Self::Pow => "'**'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::Comma => "','".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}

/// A token with the character offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

pub fn tokenize(input: &str) -> Result<Vec<Spanned>, PlotError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    loop {
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        if pos >= chars.len() {
            tokens.push(Spanned {
                token: Token::Eof,
                pos,
            });
            return Ok(tokens);
        }

        let start = pos;
        let token = match chars[pos] {
            '+' => single(&mut pos, Token::Plus),
            '-' => single(&mut pos, Token::Minus),
            '*' if chars.get(pos + 1) == Some(&'*') => {
                pos += 2;
                Token::Pow
            }
            '*' => single(&mut pos, Token::Star),
            '/' => single(&mut pos, Token::Slash),
            '%' => single(&mut pos, Token::Percent),
            '^' => single(&mut pos, Token::Pow),
            '(' => single(&mut pos, Token::LParen),
            ')' => single(&mut pos, Token::RParen),
            ',' => single(&mut pos, Token::Comma),
            c if c.is_ascii_digit() || c == '.' => read_number(&chars, &mut pos)?,
            c if c.is_ascii_alphabetic() || c == '_' => read_ident(&chars, &mut pos),
            ch => return Err(PlotError::UnexpectedChar { ch, pos }),
        };
        tokens.push(Spanned { token, pos: start });
    }
}

fn single(pos: &mut usize, token: Token) -> Token {
    *pos += 1;
    token
}

/// Read a number, including optional decimal point and scientific notation.
fn read_number(chars: &[char], pos: &mut usize) -> Result<Token, PlotError> {
    let start = *pos;
    skip_digits(chars, pos);
    if *pos < chars.len() && chars[*pos] == '.' {
        *pos += 1;
        skip_digits(chars, pos);
    }
    // Exponent only when followed by a digit, so `2e` stays a number then a name.
    if *pos < chars.len() && (chars[*pos] == 'e' || chars[*pos] == 'E') {
        let mut look = *pos + 1;
        if look < chars.len() && (chars[look] == '+' || chars[look] == '-') {
            look += 1;
        }
        if look < chars.len() && chars[look].is_ascii_digit() {
            *pos = look;
            skip_digits(chars, pos);
        }
    }

    let text: String = chars[start..*pos].iter().collect();
    text.parse()
        .map(Token::Number)
        .map_err(|_| PlotError::InvalidNumber(text))
}

fn skip_digits(chars: &[char], pos: &mut usize) {
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
}

fn read_ident(chars: &[char], pos: &mut usize) -> Token {
    let start = *pos;
    while *pos < chars.len()
        && (chars[*pos].is_ascii_alphanumeric() || chars[*pos] == '_' || chars[*pos] == '.')
    {
        *pos += 1;
    }
    Token::Ident(chars[start..*pos].iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("x**2 ^ 3 % 4"),
            vec![
                Token::Ident("x".into()),
                Token::Pow,
                Token::Number(2.0),
                Token::Pow,
                Token::Number(3.0),
                Token::Percent,
                Token::Number(4.0),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("1.5e-3")[0], Token::Number(0.0015));
        assert_eq!(kinds(".25")[0], Token::Number(0.25));
        assert_eq!(
            kinds("2e"),
            vec![Token::Number(2.0), Token::Ident("e".into()), Token::Eof]
        );
    }

    #[test]
    fn test_dotted_identifiers() {
        assert_eq!(kinds("np.sin")[0], Token::Ident("np.sin".into()));
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("1 +  x").unwrap();
        assert_eq!(tokens[1].pos, 2);
        assert_eq!(tokens[2].pos, 5);
    }

    #[test]
    fn test_rejects_unknown_characters() {
        assert!(matches!(
            tokenize("x; import os"),
            Err(PlotError::UnexpectedChar { ch: ';', pos: 1 })
        ));
        assert!(tokenize("x == 1").is_err());
        assert!(matches!(tokenize("."), Err(PlotError::InvalidNumber(_))));
    }
}
