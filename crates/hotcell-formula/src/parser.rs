//! Formula parser
//!
//! A recursive descent parser over the token stream produced by
//! [`crate::lexer::tokenize`], with conventional operator precedence.

use crate::ast::{BinaryOperator, FormulaExpr, Reference, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::lexer::{tokenize, Token};
use crate::options::ParserOptions;

/// Parse a formula string into an AST using default options
///
/// # Example
/// ```rust
/// use hotcell_formula::parse_formula;
///
/// let ast = parse_formula("1+2").unwrap();
/// let ast = parse_formula("=SUM(A1:A10)").unwrap();
/// let ast = parse_formula("IF(@flag, \"Yes\", \"No\")").unwrap();
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    parse_formula_with(formula, &ParserOptions::default())
}

/// Parse a formula string into an AST
pub fn parse_formula_with(formula: &str, options: &ParserOptions) -> FormulaResult<FormulaExpr> {
    let mut body = formula.trim();
    if options.allow_leading_equals {
        body = body.strip_prefix('=').unwrap_or(body);
    }

    // Tokenize everything first: lexical errors win over syntax errors
    let tokens = tokenize(body)?;
    if tokens.is_empty() {
        return Err(FormulaError::Parse("Empty formula".into()));
    }

    let mut parser = FormulaParser::new(tokens, options.max_depth);
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if let Some(token) = parser.current_token() {
        return Err(FormulaError::Parse(format!(
            "Unexpected token after expression: {:?}",
            token
        )));
    }

    log::trace!("parsed {:?}", formula);
    Ok(expr)
}

/// Formula parser
struct FormulaParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl FormulaParser {
    fn new(tokens: Vec<Token>, max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    // === Helper methods ===

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn check(&self, expected: &Token) -> bool {
        self.current_token() == Some(expected)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.check(expected) {
            self.consume();
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {:?}, got {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    fn descend(&mut self) -> FormulaResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(FormulaError::DepthExceeded(self.max_depth));
        }
        Ok(())
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Comparison: =, <>, <, <=, >, >=
    // 2. Concatenation: &
    // 3. Addition/Subtraction: +, -
    // 4. Multiplication/Division: *, /
    // 5. Exponentiation: ^ (right associative)
    // 6. Unary: prefix -, +, postfix %
    // 7. Range: :
    // 8. Primary: literals, references, names, function calls, parentheses, arrays

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        self.descend()?;
        let expr = self.parse_comparison();
        self.depth -= 1;
        expr
    }

    fn parse_comparison(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_left_assoc(Self::parse_concatenation, |token| match token {
            Token::Equal => Some(BinaryOperator::Equal),
            Token::NotEqual => Some(BinaryOperator::NotEqual),
            Token::LessThan => Some(BinaryOperator::LessThan),
            Token::LessEqual => Some(BinaryOperator::LessEqual),
            Token::GreaterThan => Some(BinaryOperator::GreaterThan),
            Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
            _ => None,
        })
    }

    fn parse_concatenation(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_left_assoc(Self::parse_additive, |token| match token {
            Token::Ampersand => Some(BinaryOperator::Concat),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_left_assoc(Self::parse_multiplicative, |token| match token {
            Token::Plus => Some(BinaryOperator::Add),
            Token::Minus => Some(BinaryOperator::Subtract),
            _ => None,
        })
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_left_assoc(Self::parse_exponent, |token| match token {
            Token::Star => Some(BinaryOperator::Multiply),
            Token::Slash => Some(BinaryOperator::Divide),
            _ => None,
        })
    }

    /// One precedence level of left-associative operators.
    ///
    /// Every operator in the chain nests the tree one level deeper, so each
    /// one counts against the depth limit until the chain ends.
    fn parse_left_assoc(
        &mut self,
        operand: fn(&mut Self) -> FormulaResult<FormulaExpr>,
        operator: fn(&Token) -> Option<BinaryOperator>,
    ) -> FormulaResult<FormulaExpr> {
        let mut left = operand(self)?;
        let base = self.depth;

        while let Some(op) = self.current_token().and_then(operator) {
            self.consume();
            self.descend()?;
            let right = operand(self)?;
            left = binary(op, left, right);
        }

        self.depth = base;
        Ok(left)
    }

    fn parse_exponent(&mut self) -> FormulaResult<FormulaExpr> {
        let left = self.parse_unary()?;

        if self.check(&Token::Caret) {
            self.consume();
            self.descend()?;
            let right = self.parse_exponent(); // Right associative
            self.depth -= 1;
            return Ok(binary(BinaryOperator::Power, left, right?));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<FormulaExpr> {
        let op = match self.current_token() {
            Some(Token::Minus) => Some(UnaryOperator::Negate),
            Some(Token::Plus) => Some(UnaryOperator::Plus),
            _ => None,
        };

        if let Some(op) = op {
            self.consume();
            self.descend()?;
            let operand = self.parse_unary();
            self.depth -= 1;
            return Ok(FormulaExpr::UnaryOp {
                op,
                operand: Box::new(operand?),
            });
        }

        // Parse primary, then check for postfix percent
        let mut expr = self.parse_range()?;
        let base = self.depth;

        while self.check(&Token::Percent) {
            self.consume();
            self.descend()?;
            expr = FormulaExpr::UnaryOp {
                op: UnaryOperator::Percent,
                operand: Box::new(expr),
            };
        }

        self.depth = base;
        Ok(expr)
    }

    fn parse_range(&mut self) -> FormulaResult<FormulaExpr> {
        let left = self.parse_primary()?;

        if !self.check(&Token::Colon) {
            return Ok(left);
        }
        self.consume();
        let right = self.parse_primary()?;

        if let (FormulaExpr::Reference(start), FormulaExpr::Reference(end)) = (&left, &right) {
            if start.same_kind(end) {
                return Ok(FormulaExpr::Range {
                    start: start.clone(),
                    end: end.clone(),
                });
            }
        }

        // Syntactically fine, rejected at evaluation time
        Ok(binary(BinaryOperator::Range, left, right))
    }

    fn parse_primary(&mut self) -> FormulaResult<FormulaExpr> {
        let token = self
            .consume()
            .ok_or_else(|| FormulaError::Parse("Unexpected end of formula".into()))?;

        match token {
            Token::Number(n) => Ok(FormulaExpr::Number(n)),
            Token::String(s) => Ok(FormulaExpr::String(s)),
            Token::Error(e) => Ok(FormulaExpr::Error(e)),

            Token::LeftParen => {
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::LeftBrace => self.parse_array(),

            Token::CellRef(label) => Ok(FormulaExpr::Reference(Reference::Cell(label))),
            Token::NamedRef(label) => Ok(FormulaExpr::Reference(Reference::Named(label))),

            Token::Identifier(name) => {
                if self.check(&Token::LeftParen) {
                    self.parse_function_call(name)
                } else {
                    Ok(FormulaExpr::Name(name))
                }
            }

            other => Err(FormulaError::Parse(format!("Unexpected token: {:?}", other))),
        }
    }

    fn parse_array(&mut self) -> FormulaResult<FormulaExpr> {
        let mut rows = Vec::new();
        let mut current_row = Vec::new();

        if !self.check(&Token::RightBrace) {
            current_row.push(self.parse_expression()?);

            loop {
                match self.current_token() {
                    Some(Token::Comma) => {
                        self.consume();
                        current_row.push(self.parse_expression()?);
                    }
                    Some(Token::Semicolon) => {
                        self.consume();
                        rows.push(std::mem::take(&mut current_row));
                        current_row.push(self.parse_expression()?);
                    }
                    Some(Token::RightBrace) => break,
                    _ => {
                        return Err(FormulaError::Parse(
                            "Expected ',' ';' or '}' in array".into(),
                        ))
                    }
                }
            }
        }

        if !current_row.is_empty() {
            rows.push(current_row);
        }

        self.expect(&Token::RightBrace)?;
        Ok(FormulaExpr::Array(rows))
    }

    fn parse_function_call(&mut self, name: String) -> FormulaResult<FormulaExpr> {
        self.expect(&Token::LeftParen)?;

        let mut args = Vec::new();

        if !self.check(&Token::RightParen) {
            args.push(self.parse_expression()?);

            while self.check(&Token::Comma) {
                self.consume();
                args.push(self.parse_expression()?);
            }
        }

        self.expect(&Token::RightParen)?;

        Ok(FormulaExpr::Function {
            name: name.to_uppercase(),
            args,
        })
    }
}

fn binary(op: BinaryOperator, left: FormulaExpr, right: FormulaExpr) -> FormulaExpr {
    FormulaExpr::BinaryOp {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
