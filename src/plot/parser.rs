//! Pratt parser producing the expression AST.
//!
//! Grammar (informal):
//!   expr   = prefix (BINOP prefix)*      precedence-driven
//!   prefix = ('-' | '+') prefix | atom
//!   atom   = NUMBER | NAME | NAME '(' args ')' | '(' expr ')'
//!
//! Exponentiation is right-associative and binds tighter than unary minus,
//! so `-x**2` is `-(x**2)` and `2**-1` is `2**(-1)`.
//!
//! Names are resolved while parsing: only `x`, the constants and the
//! whitelisted functions are accepted.

use super::{MAX_DEPTH, PlotError};
use super::token::{Spanned, Token, tokenize};

/// Binding power of unary minus: above `*`, below `**`.
const PREFIX_BP: u8 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    /// The bound variable `x`.
    Variable,
    Constant(Constant),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        func: Function,
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Whether the expression refers to `x` anywhere.
    pub fn has_variable(&self) -> bool {
        match self {
            Self::Variable => true,
            Self::Number(_) | Self::Constant(_) => false,
            Self::Neg(inner) => inner.has_variable(),
            Self::Binary { left, right, .. } => left.has_variable() || right.has_variable(),
            Self::Call { arg, .. } => arg.has_variable(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinOp {
    fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Plus => Some(Self::Add),
            Token::Minus => Some(Self::Sub),
            Token::Star => Some(Self::Mul),
            Token::Slash => Some(Self::Div),
            Token::Percent => Some(Self::Mod),
            Token::Pow => Some(Self::Pow),
            _ => None,
        }
    }

    /// Higher number = tighter binding.
    fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Mod => 2,
            Self::Pow => 4,
        }
    }

    fn is_right_assoc(&self) -> bool {
        matches!(self, Self::Pow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

/// Functions callable from an expression. Each takes one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Abs,
    Ln,
    Exp,
}

impl Function {
    fn lookup(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "sqrt" => Some(Self::Sqrt),
            "abs" | "fabs" => Some(Self::Abs),
            "ln" | "log" => Some(Self::Ln),
            "exp" => Some(Self::Exp),
            _ => None,
        }
    }
}

/// Strip the module prefixes commonly typed in front of function and constant names.
fn bare_name(name: &str) -> &str {
    name.strip_prefix("np.")
        .or_else(|| name.strip_prefix("math."))
        .unwrap_or(name)
}

pub fn parse(input: &str) -> Result<Expr, PlotError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let (expr, _) = parser.parse_expr(0)?;
    parser.expect(Token::Eof, "end of input")?;
    Ok(expr)
}

/// A parsed subtree together with its height.
type Parsed = (Expr, usize);

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Every nested subexpression passes through here, so `depth` bounds
    /// the parser's recursion.
    fn parse_expr(&mut self, min_bp: u8) -> Result<Parsed, PlotError> {
        if self.depth >= MAX_DEPTH {
            return Err(PlotError::TooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        let result = self.parse_binary(min_bp);
        self.depth -= 1;
        result
    }

    fn parse_binary(&mut self, min_bp: u8) -> Result<Parsed, PlotError> {
        let (mut left, mut height) = self.parse_prefix()?;

        while let Some(op) = BinOp::from_token(self.peek()) {
            let prec = op.precedence();
            if prec < min_bp {
                break;
            }
            self.advance();

            let next_bp = if op.is_right_assoc() { prec } else { prec + 1 };
            let (right, right_height) = self.parse_expr(next_bp)?;
            // Left-associative chains grow the tree without recursing.
            height = 1 + height.max(right_height);
            if height > MAX_DEPTH {
                return Err(PlotError::TooDeep { limit: MAX_DEPTH });
            }
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok((left, height))
    }

    fn parse_prefix(&mut self) -> Result<Parsed, PlotError> {
        match self.peek().clone() {
            Token::Minus => {
                self.advance();
                let (operand, height) = self.parse_expr(PREFIX_BP)?;
                Ok((Expr::Neg(Box::new(operand)), height + 1))
            }
            Token::Plus => {
                self.advance();
                self.parse_expr(PREFIX_BP)
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Result<Parsed, PlotError> {
        let spanned = self.current().clone();
        match spanned.token {
            Token::Number(n) => {
                self.advance();
                Ok((Expr::Number(n), 1))
            }
            Token::Ident(name) => {
                self.advance();
                let bare = bare_name(&name);
                if self.peek() == &Token::LParen {
                    self.advance();
                    let func = Function::lookup(bare)
                        .ok_or_else(|| PlotError::UnknownFunction(name.clone()))?;
                    let mut args = self.parse_args()?;
                    self.expect(Token::RParen, "')'")?;
                    let got = args.len();
                    match args.pop() {
                        Some((arg, height)) if got == 1 => Ok((
                            Expr::Call {
                                func,
                                arg: Box::new(arg),
                            },
                            height + 1,
                        )),
                        _ => Err(PlotError::Arity { name, got }),
                    }
                } else if bare == "x" {
                    Ok((Expr::Variable, 1))
                } else {
                    Constant::lookup(bare)
                        .map(|c| (Expr::Constant(c), 1))
                        .ok_or(PlotError::UnknownIdentifier(name))
                }
            }
            Token::LParen => {
                self.advance();
                let parsed = self.parse_expr(0)?;
                self.expect(Token::RParen, "')'")?;
                Ok(parsed)
            }
            token => Err(PlotError::UnexpectedToken {
                found: token.describe(),
                expected: "a number, name or '('".to_string(),
                pos: spanned.pos,
            }),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Parsed>, PlotError> {
        let mut args = Vec::new();
        if self.peek() == &Token::RParen {
            return Ok(args);
        }
        args.push(self.parse_expr(0)?);
        while self.peek() == &Token::Comma {
            self.advance();
            args.push(self.parse_expr(0)?);
        }
        Ok(args)
    }

    fn current(&self) -> &Spanned {
        // The token stream always ends with Eof, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self) -> &Token {
        &self.current().token
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), PlotError> {
        if self.peek() == &expected {
            self.advance();
            Ok(())
        } else {
            let current = self.current();
            Err(PlotError::UnexpectedToken {
                found: current.token.describe(),
                expected: what.to_string(),
                pos: current.pos,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Number(n))
    }

    fn bin(op: BinOp, left: Box<Expr>, right: Box<Expr>) -> Box<Expr> {
        Box::new(Expr::Binary { op, left, right })
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("1 + 2 * 3").unwrap(),
            *bin(BinOp::Add, num(1.0), bin(BinOp::Mul, num(2.0), num(3.0)))
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        assert_eq!(
            parse("8 - 4 - 2").unwrap(),
            *bin(BinOp::Sub, bin(BinOp::Sub, num(8.0), num(4.0)), num(2.0))
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            parse("2 ^ 3 ** 2").unwrap(),
            *bin(BinOp::Pow, num(2.0), bin(BinOp::Pow, num(3.0), num(2.0)))
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        assert_eq!(
            parse("-x**2").unwrap(),
            Expr::Neg(bin(BinOp::Pow, Box::new(Expr::Variable), num(2.0)))
        );
        assert_eq!(
            parse("2**-1").unwrap(),
            *bin(BinOp::Pow, num(2.0), Box::new(Expr::Neg(num(1.0))))
        );
    }

    #[test]
    fn test_unary_minus_binds_tighter_than_product() {
        assert_eq!(
            parse("-2 * 3").unwrap(),
            *bin(BinOp::Mul, Box::new(Expr::Neg(num(2.0))), num(3.0))
        );
    }

    #[test]
    fn test_calls_and_prefixed_names() {
        assert_eq!(
            parse("np.sin(x)").unwrap(),
            Expr::Call {
                func: Function::Sin,
                arg: Box::new(Expr::Variable)
            }
        );
        assert_eq!(parse("math.pi").unwrap(), Expr::Constant(Constant::Pi));
        assert_eq!(
            parse("log(e)").unwrap(),
            Expr::Call {
                func: Function::Ln,
                arg: Box::new(Expr::Constant(Constant::E))
            }
        );
    }

    #[test]
    fn test_rejects_names_outside_whitelist() {
        assert!(matches!(
            parse("__import__(x)"),
            Err(PlotError::UnknownFunction(_))
        ));
        assert!(matches!(parse("y + 1"), Err(PlotError::UnknownIdentifier(_))));
        assert!(matches!(
            parse("np.system(x)"),
            Err(PlotError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(matches!(parse("sin()"), Err(PlotError::Arity { got: 0, .. })));
        assert!(matches!(parse("sin(x, 2)"), Err(PlotError::Arity { got: 2, .. })));
    }

    #[test]
    fn test_rejects_malformed() {
        for input in ["", "1 +", "(x", "x)", "2 3", "* x"] {
            assert!(
                matches!(parse(input), Err(PlotError::UnexpectedToken { .. })),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let nested = |depth: usize| format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&nested(200)).unwrap(), Expr::Variable);
        assert!(matches!(
            parse(&nested(200_000)),
            Err(PlotError::TooDeep { limit: MAX_DEPTH })
        ));
    }

    #[test]
    fn test_unary_chain_is_bounded() {
        assert!(parse(&format!("{}x", "-".repeat(100))).is_ok());
        assert!(matches!(
            parse(&format!("{}x", "-".repeat(100_000))),
            Err(PlotError::TooDeep { .. })
        ));
        assert!(matches!(
            parse(&format!("2{}", " ** 2".repeat(10_000))),
            Err(PlotError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_long_operator_chain_is_bounded() {
        assert!(parse(&format!("x{}", " + 1".repeat(100))).is_ok());
        assert!(matches!(
            parse(&format!("x{}", " + 1".repeat(100_000))),
            Err(PlotError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_has_variable() {
        assert!(parse("1 + sin(x)").unwrap().has_variable());
        assert!(!parse("1 + sin(pi)").unwrap().has_variable());
    }
}
