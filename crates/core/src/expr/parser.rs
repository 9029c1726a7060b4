//! Tokenizer and recursive-descent parser for infix expressions
//!
//! Precedence, lowest first:
//! ```text
//! ?:            conditional (right associative)
//! || or
//! && and
//! == !=
//! < <= > >=
//! + -
//! * / %
//! - + ! not     prefix
//! ** ^          power (right associative)
//! x[i]          index
//! ```

/// A lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Punct(&'static str),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Punct(p) => write!(f, "{}", p),
        }
    }
}

/// Longest accepted input; bounds the size of the tree the evaluator walks
const MAX_TOKENS: usize = 1024;

/// Deepest allowed nesting of parentheses, brackets, prefix operators,
/// exponents and conditionals
const MAX_DEPTH: usize = 128;

/// Punctuation, longest first so `**` wins over `*`
const PUNCTUATION: &[&str] = &[
    "**", "==", "!=", "<=", ">=", "&&", "||", "+", "-", "*", "/", "%", "^", "<", ">", "!", "(",
    ")", "[", "]", ",", "?", ":",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Bool(bool),
    Var(String),
    Array(Vec<Expr>),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Index(Box<Expr>, Box<Expr>),
    Call(String, Vec<Expr>),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
}

/// Split source text into tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if tokens.len() >= MAX_TOKENS {
            return Err(format!("expression longer than {} tokens", MAX_TOKENS));
        }
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()))
        {
            let (value, next) = scan_number(&chars, i)?;
            tokens.push(Token::Number(value));
            i = next;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
            continue;
        }

        let rest: String = chars[i..chars.len().min(i + 2)].iter().collect();
        match PUNCTUATION.iter().find(|p| rest.starts_with(**p)) {
            Some(p) => {
                tokens.push(Token::Punct(*p));
                i += p.chars().count();
            }
            None => return Err(format!("unexpected character '{}'", c)),
        }
    }

    Ok(tokens)
}

/// Scan a numeric literal starting at `start`; returns the value and the
/// index just past it
fn scan_number(chars: &[char], start: usize) -> Result<(f64, usize), String> {
    let mut i = start;

    if chars[i] == '0' && matches!(chars.get(i + 1), Some('x') | Some('X')) {
        i += 2;
        let digits_start = i;
        while i < chars.len() && (chars[i].is_ascii_hexdigit() || chars[i] == '_') {
            i += 1;
        }
        let digits: String = chars[digits_start..i]
            .iter()
            .filter(|c| **c != '_')
            .collect();
        let value = u64::from_str_radix(&digits, 16)
            .map_err(|_| format!("invalid hex literal '0x{}'", digits))?;
        return Ok((value as f64, i));
    }

    let mut text = String::new();
    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '_') {
        if chars[i] != '_' {
            text.push(chars[i]);
        }
        i += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        text.push('.');
        i += 1;
        while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '_') {
            if chars[i] != '_' {
                text.push(chars[i]);
            }
            i += 1;
        }
    }
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        text.push('e');
        i += 1;
        if i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
            text.push(chars[i]);
            i += 1;
        }
        let exp_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            text.push(chars[i]);
            i += 1;
        }
        if i == exp_start {
            return Err(format!("malformed exponent in '{}'", text));
        }
    }
    // A number running straight into a name ("2x", "1e5foo") is not a literal
    if i < chars.len() && (chars[i].is_alphabetic() || chars[i] == '_') {
        return Err(format!("malformed number near '{}'", chars[i]));
    }

    let value = text
        .parse::<f64>()
        .map_err(|_| format!("invalid number '{}'", text))?;
    Ok((value, i))
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, String> {
        Ok(Parser {
            tokens: tokenize(source)?,
            pos: 0,
            depth: 0,
        })
    }

    /// Parse the whole input as a single expression
    pub fn parse(&mut self) -> Result<Expr, String> {
        if self.tokens.is_empty() {
            return Err("empty expression".to_string());
        }
        let expr = self.parse_conditional()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(format!("unexpected '{}'", token)),
        }
    }

    /// Every nested construct re-enters through here or `parse_unary`
    fn parse_conditional(&mut self) -> Result<Expr, String> {
        self.nested(Self::conditional)
    }

    fn conditional(&mut self) -> Result<Expr, String> {
        let cond = self.parse_or()?;
        if !self.consume("?") {
            return Ok(cond);
        }
        let then = self.parse_conditional()?;
        if !self.consume(":") {
            return Err("expected ':' in conditional".to_string());
        }
        let otherwise = self.parse_conditional()?;
        Ok(Expr::Conditional(
            Box::new(cond),
            Box::new(then),
            Box::new(otherwise),
        ))
    }

    fn parse_or(&mut self) -> Result<Expr, String> {
        let mut lhs = self.parse_and()?;
        while self.consume("||") || self.consume_keyword("or") {
            let rhs = self.parse_and()?;
            lhs = Expr::Binary(BinaryOp::Or, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, String> {
        let mut lhs = self.parse_equality()?;
        while self.consume("&&") || self.consume_keyword("and") {
            let rhs = self.parse_equality()?;
            lhs = Expr::Binary(BinaryOp::And, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_equality(&mut self) -> Result<Expr, String> {
        let mut lhs = self.parse_relational()?;
        loop {
            let op = if self.consume("==") {
                BinaryOp::Eq
            } else if self.consume("!=") {
                BinaryOp::Ne
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_relational()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_relational(&mut self) -> Result<Expr, String> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = if self.consume("<=") {
                BinaryOp::Le
            } else if self.consume(">=") {
                BinaryOp::Ge
            } else if self.consume("<") {
                BinaryOp::Lt
            } else if self.consume(">") {
                BinaryOp::Gt
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_additive()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_additive(&mut self) -> Result<Expr, String> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = if self.consume("+") {
                BinaryOp::Add
            } else if self.consume("-") {
                BinaryOp::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, String> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = if self.consume("*") {
                BinaryOp::Mul
            } else if self.consume("/") {
                BinaryOp::Div
            } else if self.consume("%") {
                BinaryOp::Rem
            } else {
                return Ok(lhs);
            };
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, String> {
        self.nested(Self::unary)
    }

    fn unary(&mut self) -> Result<Expr, String> {
        let op = if self.consume("-") {
            UnaryOp::Neg
        } else if self.consume("+") {
            UnaryOp::Plus
        } else if self.consume("!") || self.consume_keyword("not") {
            UnaryOp::Not
        } else {
            return self.parse_power();
        };
        let operand = self.parse_unary()?;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    fn parse_power(&mut self) -> Result<Expr, String> {
        let base = self.parse_postfix()?;
        if self.consume("**") || self.consume("^") {
            // Right associative; the exponent may carry its own sign
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary(
                BinaryOp::Pow,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> Result<Expr, String> {
        let mut expr = self.parse_primary()?;
        while self.consume("[") {
            let index = self.parse_conditional()?;
            if !self.consume("]") {
                return Err("expected ']' after index".to_string());
            }
            expr = Expr::Index(Box::new(expr), Box::new(index));
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, String> {
        let token = self
            .advance()
            .ok_or_else(|| "unexpected end of expression".to_string())?;

        match token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Ident(name) if name == "true" => Ok(Expr::Bool(true)),
            Token::Ident(name) if name == "false" => Ok(Expr::Bool(false)),
            Token::Ident(name) if matches!(name.as_str(), "and" | "or" | "not") => {
                Err(format!("unexpected '{}'", name))
            }
            Token::Ident(name) => {
                if self.consume("(") {
                    let args = self.parse_list(")")?;
                    Ok(Expr::Call(name, args))
                } else {
                    Ok(Expr::Var(name))
                }
            }
            Token::Punct("(") => {
                let inner = self.parse_conditional()?;
                if !self.consume(")") {
                    return Err("expected ')'".to_string());
                }
                Ok(inner)
            }
            Token::Punct("[") => Ok(Expr::Array(self.parse_list("]")?)),
            Token::Punct(p) => Err(format!("unexpected '{}'", p)),
        }
    }

    /// Expressions up to and including `close`
    ///
    /// Commas between items are optional since the shell strips them from
    /// input before it gets here.
    fn parse_list(&mut self, close: &str) -> Result<Vec<Expr>, String> {
        let mut items = Vec::new();
        loop {
            if self.consume(close) {
                return Ok(items);
            }
            if self.peek().is_none() {
                return Err(format!("expected '{}'", close));
            }
            items.push(self.parse_conditional()?);
            self.consume(",");
        }
    }

    /// Run `parse` one level deeper, failing past `MAX_DEPTH`
    fn nested(&mut self, parse: fn(&mut Self) -> Result<Expr, String>) -> Result<Expr, String> {
        if self.depth >= MAX_DEPTH {
            return Err("expression nested too deeply".to_string());
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn consume(&mut self, punct: &str) -> bool {
        if matches!(self.peek(), Some(Token::Punct(p)) if *p == punct) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn consume_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(s)) if s == keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

/// Parse source text into an expression tree
pub fn parse(source: &str) -> Result<Expr, String> {
    Parser::new(source)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Number(n))
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(
            tokenize("1_000 2.5e3 .5 0x1F").unwrap(),
            vec![
                Token::Number(1000.0),
                Token::Number(2500.0),
                Token::Number(0.5),
                Token::Number(31.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_rejects_malformed() {
        assert!(tokenize("1e").is_err());
        assert!(tokenize("2x").is_err());
        assert!(tokenize("3 $ 4").is_err());
    }

    #[test]
    fn test_tokenize_longest_punctuation() {
        assert_eq!(
            tokenize("2**3<=4").unwrap(),
            vec![
                Token::Number(2.0),
                Token::Punct("**"),
                Token::Number(3.0),
                Token::Punct("<="),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("2+3*4").unwrap(),
            Expr::Binary(
                BinaryOp::Add,
                num(2.0),
                Box::new(Expr::Binary(BinaryOp::Mul, num(3.0), num(4.0)))
            )
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            parse("2^3^2").unwrap(),
            Expr::Binary(
                BinaryOp::Pow,
                num(2.0),
                Box::new(Expr::Binary(BinaryOp::Pow, num(3.0), num(2.0)))
            )
        );
    }

    #[test]
    fn test_index_and_call() {
        assert_eq!(
            parse("max(s[0], 1)").unwrap(),
            Expr::Call(
                "max".to_string(),
                vec![
                    Expr::Index(Box::new(Expr::Var("s".to_string())), num(0.0)),
                    Expr::Number(1.0),
                ]
            )
        );
    }

    #[test]
    fn test_commas_optional_in_lists() {
        assert_eq!(parse("min(1 2)").unwrap(), parse("min(1, 2)").unwrap());
        assert_eq!(parse("[1 2 3]").unwrap(), parse("[1, 2, 3]").unwrap());
        assert!(parse("min(1 2").is_err());
    }

    #[test]
    fn test_conditional() {
        assert!(matches!(
            parse("1 < 2 ? 10 : 20").unwrap(),
            Expr::Conditional(..)
        ));
    }

    #[test]
    fn test_operator_tokens_do_not_parse() {
        for line in ["+", "-", "*", "/", "**", "^", "<<", ">>", "!", "++", "--", "%"] {
            assert!(parse(line).is_err(), "'{}' should not parse", line);
        }
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let parens = format!("{}1{}", "(".repeat(500), ")".repeat(500));
        assert_eq!(
            parse(&parens).unwrap_err(),
            "expression nested too deeply"
        );

        let negations = format!("{}1", "-".repeat(1000));
        assert_eq!(
            parse(&negations).unwrap_err(),
            "expression nested too deeply"
        );

        let powers = format!("2{}", "^2".repeat(400));
        assert!(parse(&powers).is_err());
    }

    #[test]
    fn test_moderate_nesting_accepted() {
        let parens = format!("{}1{}", "(".repeat(40), ")".repeat(40));
        assert_eq!(parse(&parens).unwrap(), Expr::Number(1.0));
    }

    #[test]
    fn test_token_limit() {
        let long = "1+".repeat(600) + "1";
        assert!(parse(&long).unwrap_err().contains("tokens"));
        assert!(tokenize(&"(".repeat(100_000)).is_err());
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        assert!(parse("2 3").is_err());
        assert!(parse("(1 + 2").is_err());
        assert!(parse("").is_err());
    }
}
