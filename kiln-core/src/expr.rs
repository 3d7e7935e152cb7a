//! Boolean wildcard match expressions over fully qualified names.
//!
//! Expressions combine wildcard patterns with `&&`, `||`, `!`, and
//! parentheses, with the usual precedence (`!` binds tightest, then `&&`,
//! then `||`). A pattern's `*` spans any run of characters, so `*Generator`
//! matches a name ending in `Generator` at any package depth.
//!
//! Compilation is the fail-fast point: a malformed expression is rejected
//! here, during configuration assembly, never at match time.

use thiserror::Error;

use crate::glob::wildcard_match;

/// A match expression failed to compile.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExprError {
    #[error("unbalanced parenthesis at offset {offset}")]
    UnbalancedParen { offset: usize },
    #[error("expected a pattern or group at offset {offset}")]
    ExpectedOperand { offset: usize },
    #[error("empty group at offset {offset}")]
    EmptyGroup { offset: usize },
    #[error("unexpected '{token}' at offset {offset}")]
    UnexpectedToken { token: String, offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Pattern(String),
    And,
    Or,
    Not,
    Open,
    Close,
}

#[derive(Debug, Clone)]
enum Ast {
    Any,
    Pattern(String),
    Not(Box<Ast>),
    And(Box<Ast>, Box<Ast>),
    Or(Box<Ast>, Box<Ast>),
}

impl Ast {
    fn eval(&self, name: &str) -> bool {
        match self {
            Ast::Any => true,
            Ast::Pattern(pattern) => wildcard_match(pattern, name),
            Ast::Not(inner) => !inner.eval(name),
            Ast::And(left, right) => left.eval(name) && right.eval(name),
            Ast::Or(left, right) => left.eval(name) || right.eval(name),
        }
    }
}

/// A compiled boolean wildcard expression.
#[derive(Debug, Clone)]
pub struct MatchExpr {
    source: String,
    ast: Ast,
}

impl MatchExpr {
    /// Compile an expression.
    ///
    /// The empty string and the single token `*` short-circuit to the
    /// always-true matcher without touching the parser.
    pub fn compile(expression: &str) -> Result<Self, ExprError> {
        let source = expression.to_string();
        let trimmed = expression.trim();
        if trimmed.is_empty() || trimmed == "*" {
            return Ok(Self {
                source,
                ast: Ast::Any,
            });
        }

        let tokens = tokenize(expression)?;
        let mut parser = Parser { tokens, pos: 0 };
        let ast = parser.expr()?;
        if let Some((token, offset)) = parser.peek() {
            return Err(ExprError::UnexpectedToken {
                token: describe(token),
                offset: *offset,
            });
        }
        Ok(Self { source, ast })
    }

    /// An always-true matcher.
    pub fn match_all() -> Self {
        Self {
            source: "*".to_string(),
            ast: Ast::Any,
        }
    }

    /// Test a fully qualified name against the expression.
    pub fn matches(&self, name: &str) -> bool {
        self.ast.eval(name)
    }

    /// The text this expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Display for MatchExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Pattern(p) => p.clone(),
        Token::And => "&&".to_string(),
        Token::Or => "||".to_string(),
        Token::Not => "!".to_string(),
        Token::Open => "(".to_string(),
        Token::Close => ")".to_string(),
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ExprError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push((Token::Open, i));
                i += 1;
            }
            ')' => {
                tokens.push((Token::Close, i));
                i += 1;
            }
            '!' => {
                tokens.push((Token::Not, i));
                i += 1;
            }
            '&' => {
                if chars.get(i + 1) == Some(&'&') {
                    tokens.push((Token::And, i));
                    i += 2;
                } else {
                    return Err(ExprError::UnexpectedToken {
                        token: "&".to_string(),
                        offset: i,
                    });
                }
            }
            '|' => {
                if chars.get(i + 1) == Some(&'|') {
                    tokens.push((Token::Or, i));
                    i += 2;
                } else {
                    return Err(ExprError::UnexpectedToken {
                        token: "|".to_string(),
                        offset: i,
                    });
                }
            }
            _ => {
                let start = i;
                while i < chars.len() && !is_delimiter(chars[i]) {
                    i += 1;
                }
                let pattern: String = chars[start..i].iter().collect();
                tokens.push((Token::Pattern(pattern), start));
            }
        }
    }

    Ok(tokens)
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '!' | '&' | '|')
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&(Token, usize)> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn end_offset(&self) -> usize {
        self.tokens
            .last()
            .map(|(token, offset)| offset + describe(token).len())
            .unwrap_or(0)
    }

    // expr := andExpr ('||' andExpr)*
    fn expr(&mut self) -> Result<Ast, ExprError> {
        let mut left = self.and_expr()?;
        while matches!(self.peek(), Some((Token::Or, _))) {
            self.bump();
            let right = self.and_expr()?;
            left = Ast::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // andExpr := unary ('&&' unary)*
    fn and_expr(&mut self) -> Result<Ast, ExprError> {
        let mut left = self.unary()?;
        while matches!(self.peek(), Some((Token::And, _))) {
            self.bump();
            let right = self.unary()?;
            left = Ast::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    // unary := '!' unary | '(' expr ')' | pattern
    fn unary(&mut self) -> Result<Ast, ExprError> {
        match self.bump() {
            Some((Token::Not, _)) => Ok(Ast::Not(Box::new(self.unary()?))),
            Some((Token::Open, open_offset)) => {
                if let Some((Token::Close, offset)) = self.peek() {
                    return Err(ExprError::EmptyGroup { offset: *offset });
                }
                let inner = self.expr()?;
                match self.bump() {
                    Some((Token::Close, _)) => Ok(inner),
                    _ => Err(ExprError::UnbalancedParen {
                        offset: open_offset,
                    }),
                }
            }
            Some((Token::Pattern(pattern), _)) => Ok(Ast::Pattern(pattern)),
            Some((token, offset)) => Err(ExprError::UnexpectedToken {
                token: describe(&token),
                offset,
            }),
            None => Err(ExprError::ExpectedOperand {
                offset: self.end_offset(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(expression: &str, name: &str) -> bool {
        MatchExpr::compile(expression).unwrap().matches(name)
    }

    #[test]
    fn test_empty_and_star_match_everything() {
        for expression in ["", "   ", "*"] {
            let expr = MatchExpr::compile(expression).unwrap();
            assert!(expr.matches("com.acme.Foo"), "expression {expression:?}");
            assert!(expr.matches("anything at all"));
        }
    }

    #[test]
    fn test_simple_pattern() {
        assert!(matches("com.acme.*", "com.acme.Foo"));
        assert!(!matches("com.acme.*", "com.other.Foo"));
        assert!(matches("*Generator", "com.acme.BeanGenerator"));
        assert!(!matches("*Generator", "com.acme.BeanGeneratorImpl"));
    }

    #[test]
    fn test_negation() {
        let expr = MatchExpr::compile("!(*Broken*)").unwrap();
        assert!(!expr.matches("com.x.SomethingBrokenHere"));
        assert!(!expr.matches("Broken"));
        assert!(expr.matches("com.x.Fine"));
    }

    #[test]
    fn test_and_or_precedence() {
        // A && B || C parses as (A && B) || C for every truth assignment.
        let left = MatchExpr::compile("*x* && *y* || *z*").unwrap();
        let right = MatchExpr::compile("(*x* && *y*) || *z*").unwrap();
        for name in ["", "x", "y", "z", "xy", "xz", "yz", "xyz"] {
            assert_eq!(left.matches(name), right.matches(name), "name {name:?}");
        }
    }

    #[test]
    fn test_de_morgan() {
        let negated_or = MatchExpr::compile("!(*x* || *y*)").unwrap();
        let and_of_negations = MatchExpr::compile("!*x* && !*y*").unwrap();
        for name in ["", "x", "y", "xy", "other"] {
            assert_eq!(
                negated_or.matches(name),
                and_of_negations.matches(name),
                "name {name:?}"
            );
        }
    }

    #[test]
    fn test_trigger_exclusion_scenario() {
        let expr = MatchExpr::compile("(*GenerateBean) && !(*Broken*)").unwrap();
        assert!(expr.matches("com.x.GenerateBean"));
        assert!(!expr.matches("com.x.GenerateBeanBroken"));
        assert!(!expr.matches("com.x.BrokenGenerateBean"));
    }

    #[test]
    fn test_unbalanced_parenthesis() {
        assert!(matches!(
            MatchExpr::compile("(a && b"),
            Err(ExprError::UnbalancedParen { .. })
        ));
        assert!(matches!(
            MatchExpr::compile("a)"),
            Err(ExprError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_missing_operand() {
        assert!(matches!(
            MatchExpr::compile("a &&"),
            Err(ExprError::ExpectedOperand { .. })
        ));
        assert!(matches!(
            MatchExpr::compile("|| b"),
            Err(ExprError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            MatchExpr::compile("!"),
            Err(ExprError::ExpectedOperand { .. })
        ));
    }

    #[test]
    fn test_empty_group() {
        assert!(matches!(
            MatchExpr::compile("()"),
            Err(ExprError::EmptyGroup { .. })
        ));
        assert!(matches!(
            MatchExpr::compile("a && ()"),
            Err(ExprError::EmptyGroup { .. })
        ));
    }

    #[test]
    fn test_single_ampersand_rejected() {
        assert!(matches!(
            MatchExpr::compile("a & b"),
            Err(ExprError::UnexpectedToken { .. })
        ));
    }
}
