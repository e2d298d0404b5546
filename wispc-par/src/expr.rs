//! Expression parsing: the generic binary-operator-chain routine behind
//! spec.md §4.2's fixed precedence tiers, prefix/suffix operators, and
//! primary expressions.
//!
//! `parse_binary_chain` is the one routine every arithmetic/comparison/
//! logical tier is built from, parameterized by a [`ChainMode`] and a
//! child-parser function pointer — grounded in `original_source`'s
//! `BinaryOpChain` enum and `ast_parse_binary_op_expr`, which drive the
//! same table with the same two chaining behaviors.

use crate::ast::{
    AstKind, AstNode, BinaryOp, BinaryOpKind, FieldAccess, FuncCall, InitList, InitListKind,
    SliceExpr, UnaryOp, UnaryOpKind,
};
use crate::error::ParseError;
use crate::Parser;
use wispc_lex::{TokenKind, TokenValue};

/// Whether a precedence tier accepts at most one operator (non-associative,
/// e.g. comparisons) or chains left-associatively for as many operators as
/// match (arithmetic, logical `and`/`or`).
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainMode {
    Once,
    Infinity,
}

type ChildParser<'a> = fn(&mut Parser<'a>) -> Result<AstNode, ParseError>;

impl<'a> Parser<'a> {
    /// The public expression entry point. Assignment is parsed as a
    /// dedicated right-associative production sitting above every
    /// precedence tier rather than as another tier, per spec.md's
    /// resolution of the operator table's inconsistent treatment of `=`
    /// and friends.
    pub(crate) fn parse_assignment_expr(&mut self) -> Result<AstNode, ParseError> {
        let lhs = self.parse_or_expr()?;
        let op = match self.peek_kind() {
            TokenKind::Eq => Some(BinaryOpKind::Assign),
            TokenKind::PlusEq => Some(BinaryOpKind::AssignAdd),
            TokenKind::MinusEq => Some(BinaryOpKind::AssignSub),
            TokenKind::StarEq => Some(BinaryOpKind::AssignMul),
            TokenKind::SlashEq => Some(BinaryOpKind::AssignDiv),
            TokenKind::PercentEq => Some(BinaryOpKind::AssignMod),
            TokenKind::ShlEq => Some(BinaryOpKind::AssignShl),
            TokenKind::ShrEq => Some(BinaryOpKind::AssignShr),
            TokenKind::AmpEq => Some(BinaryOpKind::AssignAnd),
            TokenKind::PipeEq => Some(BinaryOpKind::AssignOr),
            TokenKind::CaretEq => Some(BinaryOpKind::AssignXor),
            TokenKind::TildeEq => Some(BinaryOpKind::AssignBitNot),
            _ => None,
        };
        match op {
            Some(op) => {
                self.chomp();
                // Right-associative: the rhs is itself an assignment expr.
                let rhs = self.parse_assignment_expr()?;
                let span = lhs.span.merge(rhs.span);
                Ok(AstNode::new(
                    AstKind::BinaryOp(BinaryOp {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    }),
                    span,
                ))
            }
            None => Ok(lhs),
        }
    }

    fn parse_binary_chain(
        &mut self,
        child: ChildParser<'a>,
        ops: &[(TokenKind, BinaryOpKind)],
        mode: ChainMode,
    ) -> Result<AstNode, ParseError> {
        let mut lhs = child(self)?;
        loop {
            let matched = ops.iter().find(|(k, _)| *k == self.peek_kind()).copied();
            let Some((_, op)) = matched else { break };
            self.chomp();
            let rhs = child(self)?;
            let span = lhs.span.merge(rhs.span);
            lhs = AstNode::new(
                AstKind::BinaryOp(BinaryOp {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }),
                span,
            );
            if mode == ChainMode::Once {
                break;
            }
        }
        Ok(lhs)
    }

    // Tier 10: `or`.
    fn parse_or_expr(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_chain(
            Self::parse_and_expr,
            &[(TokenKind::Or, BinaryOpKind::BoolOr)],
            ChainMode::Infinity,
        )
    }

    // Tier 20: `and`.
    fn parse_and_expr(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_chain(
            Self::parse_comparison_expr,
            &[(TokenKind::And, BinaryOpKind::BoolAnd)],
            ChainMode::Infinity,
        )
    }

    // Tier 30: comparisons, non-associative (`a < b < c` is a parse error).
    fn parse_comparison_expr(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_chain(
            Self::parse_shift_expr,
            &[
                (TokenKind::EqEq, BinaryOpKind::CmpEq),
                (TokenKind::BangEq, BinaryOpKind::CmpNe),
                (TokenKind::Lt, BinaryOpKind::CmpLt),
                (TokenKind::Gt, BinaryOpKind::CmpGt),
                (TokenKind::LtEq, BinaryOpKind::CmpLe),
                (TokenKind::GtEq, BinaryOpKind::CmpGe),
            ],
            ChainMode::Once,
        )
    }

    // Tier 40: `<< >>`.
    fn parse_shift_expr(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_chain(
            Self::parse_additive_expr,
            &[(TokenKind::Shl, BinaryOpKind::Shl), (TokenKind::Shr, BinaryOpKind::Shr)],
            ChainMode::Infinity,
        )
    }

    // Tier 50: `+ -` (the assignment forms `+= -=` are not a tier; see
    // `parse_assignment_expr`).
    fn parse_additive_expr(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_chain(
            Self::parse_multiplicative_expr,
            &[(TokenKind::Plus, BinaryOpKind::Add), (TokenKind::Minus, BinaryOpKind::Sub)],
            ChainMode::Infinity,
        )
    }

    // Tier 60: `* / %`.
    fn parse_multiplicative_expr(&mut self) -> Result<AstNode, ParseError> {
        self.parse_binary_chain(
            Self::parse_unary_expr,
            &[
                (TokenKind::Star, BinaryOpKind::Mul),
                (TokenKind::Slash, BinaryOpKind::Div),
                (TokenKind::Percent, BinaryOpKind::Mod),
            ],
            ChainMode::Infinity,
        )
    }

    fn parse_unary_expr(&mut self) -> Result<AstNode, ParseError> {
        let start = self.current_span();
        let op = match self.peek_kind() {
            TokenKind::Bang => Some(UnaryOpKind::Not),
            TokenKind::Minus => Some(UnaryOpKind::Neg),
            TokenKind::Tilde => Some(UnaryOpKind::BitNot),
            TokenKind::Amp => Some(UnaryOpKind::AddrOf),
            TokenKind::Try => Some(UnaryOpKind::Try),
            _ => None,
        };
        match op {
            Some(op) => {
                self.chomp();
                let operand = self.parse_unary_expr()?;
                let span = start.merge(operand.span);
                Ok(AstNode::new(
                    AstKind::UnaryOp(UnaryOp {
                        op,
                        operand: Box::new(operand),
                    }),
                    span,
                ))
            }
            None => self.parse_suffix_expr(),
        }
    }

    pub(crate) fn parse_suffix_expr(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_primary_expr()?;
        loop {
            expr = match self.peek_kind() {
                TokenKind::LParen => self.parse_call_suffix(expr)?,
                TokenKind::LBracket => self.parse_slice_suffix(expr)?,
                TokenKind::Dot => self.parse_field_access_suffix(expr)?,
                _ => break,
            };
        }
        Ok(expr)
    }

    fn parse_call_suffix(&mut self, callee: AstNode) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if self.peek_kind() != TokenKind::RParen {
            args.push(self.parse_assignment_expr()?);
            while self.chomp_if(TokenKind::Comma).is_some() {
                if self.peek_kind() == TokenKind::RParen {
                    break;
                }
                args.push(self.parse_assignment_expr()?);
            }
        }
        let end = self.expect(TokenKind::RParen)?.span;
        let span = callee.span.merge(end);
        Ok(AstNode::new(
            AstKind::FuncCall(FuncCall {
                callee: Box::new(callee),
                args,
            }),
            span,
        ))
    }

    /// `a[i]` and `a[i:j]` share one node: a bare index is `SliceExpr`
    /// with `start` set and `end` left `None`.
    fn parse_slice_suffix(&mut self, array_ref: AstNode) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LBracket)?;
        let start = if self.peek_kind() == TokenKind::Colon {
            None
        } else {
            Some(Box::new(self.parse_assignment_expr()?))
        };
        let end = if self.chomp_if(TokenKind::Colon).is_some() {
            if self.peek_kind() == TokenKind::RBracket {
                None
            } else {
                Some(Box::new(self.parse_assignment_expr()?))
            }
        } else {
            None
        };
        let close = self.expect(TokenKind::RBracket)?.span;
        let span = array_ref.span.merge(close);
        Ok(AstNode::new(
            AstKind::SliceExpr(SliceExpr {
                array_ref: Box::new(array_ref),
                start,
                end,
            }),
            span,
        ))
    }

    fn parse_field_access_suffix(&mut self, target: AstNode) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Dot)?;
        let tok = self.expect(TokenKind::Identifier)?;
        let field = match tok.value {
            Some(TokenValue::Ident(sym)) => sym,
            _ => unreachable!("Identifier token must carry TokenValue::Ident"),
        };
        let span = target.span.merge(tok.span);
        Ok(AstNode::new(
            AstKind::FieldAccess(FieldAccess {
                target: Box::new(target),
                field,
            }),
            span,
        ))
    }

    fn parse_primary_expr(&mut self) -> Result<AstNode, ParseError> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::IntegerLiteral => {
                self.chomp();
                let value = match tok.value {
                    Some(TokenValue::Int(v)) => v,
                    _ => unreachable!("IntegerLiteral token must carry TokenValue::Int"),
                };
                Ok(AstNode::new(AstKind::IntLiteral(value), tok.span))
            }
            TokenKind::FloatLiteral => {
                self.chomp();
                let value = match tok.value {
                    Some(TokenValue::Float(v)) => v,
                    _ => unreachable!("FloatLiteral token must carry TokenValue::Float"),
                };
                Ok(AstNode::new(AstKind::FloatLiteral(value), tok.span))
            }
            TokenKind::StringLiteral => {
                self.chomp();
                let value = match tok.value {
                    Some(TokenValue::Str(sym)) => sym,
                    _ => unreachable!("StringLiteral token must carry TokenValue::Str"),
                };
                Ok(AstNode::new(AstKind::StringLiteral(value), tok.span))
            }
            TokenKind::CharLiteral => {
                self.chomp();
                let value = match tok.value {
                    Some(TokenValue::Char(c)) => c,
                    _ => unreachable!("CharLiteral token must carry TokenValue::Char"),
                };
                Ok(AstNode::new(AstKind::CharLiteral(value), tok.span))
            }
            TokenKind::True => {
                self.chomp();
                Ok(AstNode::new(AstKind::BoolLiteral(true), tok.span))
            }
            TokenKind::False => {
                self.chomp();
                Ok(AstNode::new(AstKind::BoolLiteral(false), tok.span))
            }
            TokenKind::Null => {
                self.chomp();
                Ok(AstNode::new(AstKind::NullLiteral, tok.span))
            }
            TokenKind::Unreachable => {
                self.chomp();
                Ok(AstNode::new(AstKind::Unreachable, tok.span))
            }
            TokenKind::Identifier => {
                self.chomp();
                let sym = match tok.value {
                    Some(TokenValue::Ident(sym)) => sym,
                    _ => unreachable!("Identifier token must carry TokenValue::Ident"),
                };
                Ok(AstNode::new(AstKind::Identifier(sym), tok.span))
            }
            TokenKind::LParen => {
                self.chomp();
                let inner = self.parse_assignment_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_array_init_list(),
            TokenKind::Dot if self.peek_kind_at(1) == TokenKind::LBrace => {
                self.parse_struct_init_list()
            }
            TokenKind::If => self.parse_if_expr(),
            TokenKind::Match => self.parse_match_expr(),
            TokenKind::Inline | TokenKind::Loop => self.parse_loop_stmt(None),
            TokenKind::While => self.parse_loop_while(None),
            TokenKind::Func => self.parse_func_prototype(false),
            _ => Err(self.error_unexpected()),
        }
    }

    fn parse_array_init_list(&mut self) -> Result<AstNode, ParseError> {
        let start = self.expect(TokenKind::LBracket)?.span;
        let mut entries = Vec::new();
        if self.peek_kind() != TokenKind::RBracket {
            entries.push(self.parse_assignment_expr()?);
            while self.chomp_if(TokenKind::Comma).is_some() {
                if self.peek_kind() == TokenKind::RBracket {
                    break;
                }
                entries.push(self.parse_assignment_expr()?);
            }
        }
        let end = self.expect(TokenKind::RBracket)?.span;
        Ok(AstNode::new(
            AstKind::InitList(InitList {
                kind: InitListKind::Array,
                entries,
            }),
            start.merge(end),
        ))
    }

    fn parse_struct_init_list(&mut self) -> Result<AstNode, ParseError> {
        let start = self.expect(TokenKind::Dot)?.span;
        self.expect(TokenKind::LBrace)?;
        let mut entries = Vec::new();
        if self.peek_kind() != TokenKind::RBrace {
            entries.push(self.parse_assignment_expr()?);
            while self.chomp_if(TokenKind::Comma).is_some() {
                if self.peek_kind() == TokenKind::RBrace {
                    break;
                }
                entries.push(self.parse_assignment_expr()?);
            }
        }
        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(AstNode::new(
            AstKind::InitList(InitList {
                kind: InitListKind::Struct,
                entries,
            }),
            start.merge(end),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wispc_util::{Handler, SourceMap};

    fn parse_expr(src: &str) -> AstNode {
        let mut map = SourceMap::new();
        let file = map.add_file("expr.wsp", src.to_string());
        let handler = Handler::new();
        let tokens = wispc_lex::lex(src, file, &handler).unwrap();
        let mut parser = Parser::new(tokens, file, &handler);
        parser.parse_assignment_expr().unwrap()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let ast = parse_expr("1 + 2 * 3");
        match ast.kind {
            AstKind::BinaryOp(BinaryOp { op: BinaryOpKind::Add, rhs, .. }) => {
                assert!(matches!(rhs.kind, AstKind::BinaryOp(BinaryOp { op: BinaryOpKind::Mul, .. })));
            }
            other => panic!("expected top-level Add, got {other:?}"),
        }
    }

    #[test]
    fn additive_chain_is_left_associative() {
        // (1 - 2) - 3, not 1 - (2 - 3)
        let ast = parse_expr("1 - 2 - 3");
        match ast.kind {
            AstKind::BinaryOp(BinaryOp { op: BinaryOpKind::Sub, lhs, .. }) => {
                assert!(matches!(lhs.kind, AstKind::BinaryOp(BinaryOp { op: BinaryOpKind::Sub, .. })));
            }
            other => panic!("expected top-level Sub, got {other:?}"),
        }
    }

    #[test]
    fn comparison_is_non_associative() {
        let mut map = SourceMap::new();
        let file = map.add_file("cmp.wsp", "1 < 2 < 3".to_string());
        let handler = Handler::new();
        let tokens = wispc_lex::lex("1 < 2 < 3", file, &handler).unwrap();
        let mut parser = Parser::new(tokens, file, &handler);
        // `1 < 2` parses as a complete comparison; the trailing `< 3` is
        // left for the caller (here, nothing) to reject as a syntax error.
        let ast = parser.parse_assignment_expr().unwrap();
        assert!(matches!(
            ast.kind,
            AstKind::BinaryOp(BinaryOp { op: BinaryOpKind::CmpLt, .. })
        ));
        assert_eq!(parser.peek_kind(), TokenKind::Lt);
    }

    #[test]
    fn assignment_is_right_associative() {
        let ast = parse_expr("a = b = 1");
        match ast.kind {
            AstKind::BinaryOp(BinaryOp { op: BinaryOpKind::Assign, rhs, .. }) => {
                assert!(matches!(rhs.kind, AstKind::BinaryOp(BinaryOp { op: BinaryOpKind::Assign, .. })));
            }
            other => panic!("expected top-level Assign, got {other:?}"),
        }
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let ast = parse_expr("a or b and c");
        match ast.kind {
            AstKind::BinaryOp(BinaryOp { op: BinaryOpKind::BoolOr, rhs, .. }) => {
                assert!(matches!(rhs.kind, AstKind::BinaryOp(BinaryOp { op: BinaryOpKind::BoolAnd, .. })));
            }
            other => panic!("expected top-level Or, got {other:?}"),
        }
    }

    #[test]
    fn field_access_and_call_chain() {
        let ast = parse_expr("obj.method(1, 2).field");
        assert!(matches!(ast.kind, AstKind::FieldAccess(_)));
    }

    #[test]
    fn indexing_and_slicing_share_slice_expr() {
        let index = parse_expr("a[0]");
        match index.kind {
            AstKind::SliceExpr(SliceExpr { start: Some(_), end: None, .. }) => {}
            other => panic!("expected bare index, got {other:?}"),
        }
        let slice = parse_expr("a[1:2]");
        match slice.kind {
            AstKind::SliceExpr(SliceExpr { start: Some(_), end: Some(_), .. }) => {}
            other => panic!("expected bounded slice, got {other:?}"),
        }
    }

    #[test]
    fn prefix_operators_parse() {
        let ast = parse_expr("!try -x");
        assert!(matches!(ast.kind, AstKind::UnaryOp(UnaryOp { op: UnaryOpKind::Not, .. })));
    }
}
