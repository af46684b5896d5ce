//! The infix operator table and the expression loop.
//!
//! Every infix operator binds equally and folds left to right, so
//! `a OR b AND c` parses as `(a OR b) AND c`. Parentheses are the only way to
//! group.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    BetweenExpression, BinaryExpression, BinaryOperator, CastExpression, Expr, InExpression,
    InValues, SubqueryExpression,
};
use crate::lexer::{Keyword, TokenKind};
use crate::pool;

/// An infix operator recognized by the expression loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Infix {
    /// An operator that produces a [`BinaryExpression`].
    Binary(BinaryOperator),
    /// `[NOT] IN (...)`
    In { not: bool },
    /// `[NOT] BETWEEN low AND high`
    Between { not: bool },
    /// `IS [NOT]`; the `NOT` is read after the operator.
    Is,
    /// PostgreSQL `::type`.
    Cast,
}

/// Returns the infix operator starting at `current`, with the number of
/// tokens it spans.
///
/// Returns `None` if `current` does not continue an expression.
#[must_use]
pub(super) const fn infix_operator(current: &TokenKind, next: &TokenKind) -> Option<(Infix, usize)> {
    let op = match current {
        TokenKind::Assign | TokenKind::Eq => BinaryOperator::Eq,
        TokenKind::NotEq => BinaryOperator::NotEq,
        TokenKind::Lt => BinaryOperator::Lt,
        TokenKind::Gt => BinaryOperator::Gt,
        TokenKind::LtEq => BinaryOperator::LtEq,
        TokenKind::GtEq => BinaryOperator::GtEq,
        TokenKind::Plus => BinaryOperator::Plus,
        TokenKind::Minus => BinaryOperator::Minus,
        TokenKind::Star => BinaryOperator::Multiply,
        TokenKind::Slash => BinaryOperator::Divide,
        TokenKind::Percent => BinaryOperator::Modulo,
        TokenKind::Concat => BinaryOperator::Concat,
        TokenKind::Keyword(Keyword::And) => BinaryOperator::And,
        TokenKind::Keyword(Keyword::Or) => BinaryOperator::Or,
        TokenKind::Keyword(Keyword::Like) => BinaryOperator::Like,
        TokenKind::Keyword(Keyword::In) => return Some((Infix::In { not: false }, 1)),
        TokenKind::Keyword(Keyword::Between) => return Some((Infix::Between { not: false }, 1)),
        TokenKind::Keyword(Keyword::Is) => return Some((Infix::Is, 1)),
        TokenKind::DoubleColon => return Some((Infix::Cast, 1)),
        TokenKind::Keyword(Keyword::Not) => {
            return match next {
                TokenKind::Keyword(Keyword::Like) => {
                    Some((Infix::Binary(BinaryOperator::NotLike), 2))
                }
                TokenKind::Keyword(Keyword::In) => Some((Infix::In { not: true }, 2)),
                TokenKind::Keyword(Keyword::Between) => Some((Infix::Between { not: true }, 2)),
                _ => None,
            };
        }
        _ => return None,
    };
    Some((Infix::Binary(op), 1))
}

impl Parser<'_> {
    /// Parses an expression: a primary followed by any number of infix
    /// operators, each taking a primary as its right operand.
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_primary()?;
        while let Some((infix, width)) = infix_operator(&self.current.kind, &self.peek.kind) {
            for _ in 0..width {
                self.advance();
            }
            lhs = self.parse_infix(lhs, infix)?;
        }
        Ok(lhs)
    }

    fn parse_infix(&mut self, lhs: Expr, infix: Infix) -> Result<Expr, ParseError> {
        match infix {
            Infix::Binary(op) => self.parse_binary(lhs, op),
            Infix::Is => {
                let op = if self.consume_keyword(Keyword::Not) {
                    BinaryOperator::IsNot
                } else {
                    BinaryOperator::Is
                };
                self.parse_binary(lhs, op)
            }
            Infix::In { not } => self.parse_in(lhs, not),
            Infix::Between { not } => {
                let low = self.parse_primary()?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_primary()?;
                Ok(Expr::Between(BetweenExpression {
                    expr: Box::new(lhs),
                    not,
                    low: Box::new(low),
                    high: Box::new(high),
                }))
            }
            Infix::Cast => {
                let data_type = self.parse_data_type()?;
                Ok(Expr::Cast(CastExpression {
                    expr: Box::new(lhs),
                    data_type,
                }))
            }
        }
    }

    fn parse_binary(&mut self, left: Expr, op: BinaryOperator) -> Result<Expr, ParseError> {
        let mut node: Box<BinaryExpression> = pool::acquire();
        node.left = left;
        node.op = op;
        match self.parse_primary() {
            Ok(right) => {
                node.right = right;
                Ok(Expr::Binary(node))
            }
            Err(error) => {
                pool::release(node);
                Err(error)
            }
        }
    }

    fn parse_in(&mut self, lhs: Expr, not: bool) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let values = if self.check_keyword(Keyword::Select) {
            InValues::Subquery(SubqueryExpression {
                query: self.parse_subquery()?,
            })
        } else {
            InValues::List(self.parse_expression_list()?)
        };
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::In(InExpression {
            expr: Box::new(lhs),
            not,
            values,
        }))
    }
}
