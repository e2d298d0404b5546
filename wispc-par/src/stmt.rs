//! Statements and control-flow expressions (spec.md §3.3 "Statements" and
//! "Control-flow"). `if`/`loop`/`while`/`in`/`match` all produce values, so
//! they are reachable both as statements and from `expr::parse_primary`.

use crate::ast::{
    AstKind, AstNode, Block, Branch, BranchKind, Defer, IfExpr, LoopC, LoopIn, LoopWhile,
    MatchBranch, MatchCase, MatchExpr, Return,
};
use crate::error::{ParseError, ParseErrorKind};
use crate::Parser;
use wispc_lex::{TokenKind, TokenValue};
use wispc_util::{DiagnosticCode, Symbol};

impl<'a> Parser<'a> {
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        self.parse_block_labeled(None)
    }

    fn parse_block_labeled(&mut self, label: Option<Symbol>) -> Result<AstNode, ParseError> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let mut statements = Vec::new();
        while self.peek_kind() != TokenKind::RBrace {
            if self.is_at_end() {
                return Err(self.error_expected(TokenKind::RBrace));
            }
            statements.push(self.parse_statement()?);
        }
        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(AstNode::new(
            AstKind::Block(Block { label, statements }),
            start.merge(end),
        ))
    }

    fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        match self.peek_kind() {
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => self.parse_branch(BranchKind::Break),
            TokenKind::Continue => self.parse_branch(BranchKind::Continue),
            TokenKind::Defer => self.parse_defer(),
            TokenKind::Mutable | TokenKind::Const => {
                let decl = self.parse_var_decl(false)?;
                self.expect(TokenKind::Semicolon)?;
                Ok(decl)
            }
            TokenKind::If => self.parse_if_expr(),
            TokenKind::Inline | TokenKind::Loop => self.parse_loop_stmt(None),
            TokenKind::While => self.parse_loop_while(None),
            TokenKind::In => Err(self.error_unexpected()),
            TokenKind::Match => self.parse_match_expr(),
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Identifier if self.peek_kind_at(1) == TokenKind::Colon => {
                self.parse_labeled_stmt()
            }
            _ => {
                let expr = self.parse_assignment_expr()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(expr)
            }
        }
    }

    /// `BlockLabel := Identifier ':'`, attached to the `Block` or
    /// `LoopStmt` that follows (`LabeledStmt := BlockLabel (Block |
    /// LoopStmt)`).
    fn parse_labeled_stmt(&mut self) -> Result<AstNode, ParseError> {
        let tok = self.expect(TokenKind::Identifier)?;
        let label = match tok.value {
            Some(TokenValue::Ident(sym)) => sym,
            _ => unreachable!("Identifier token must carry TokenValue::Ident"),
        };
        self.expect(TokenKind::Colon)?;
        match self.peek_kind() {
            TokenKind::LBrace => self.parse_block_labeled(Some(label)),
            TokenKind::Inline | TokenKind::Loop => self.parse_loop_stmt(Some(label)),
            TokenKind::While => self.parse_loop_while(Some(label)),
            _ => Err(self.error_unexpected()),
        }
    }

    fn parse_return(&mut self) -> Result<AstNode, ParseError> {
        let start = self.expect(TokenKind::Return)?.span;
        let expr = if self.peek_kind() == TokenKind::Semicolon {
            None
        } else {
            Some(Box::new(self.parse_assignment_expr()?))
        };
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(AstNode::new(AstKind::Return(Return { expr }), start.merge(end)))
    }

    fn parse_branch(&mut self, kind: BranchKind) -> Result<AstNode, ParseError> {
        let start = self.chomp().span;
        let label = if let Some(tok) = self.chomp_if(TokenKind::Identifier) {
            match tok.value {
                Some(TokenValue::Ident(sym)) => Some(sym),
                _ => unreachable!(),
            }
        } else {
            None
        };
        let expr = if self.peek_kind() == TokenKind::Semicolon {
            None
        } else {
            Some(Box::new(self.parse_assignment_expr()?))
        };
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(AstNode::new(
            AstKind::Branch(Branch { kind, label, expr }),
            start.merge(end),
        ))
    }

    fn parse_defer(&mut self) -> Result<AstNode, ParseError> {
        let start = self.expect(TokenKind::Defer)?.span;
        let expr = self.parse_assignment_expr()?;
        let end = self.expect(TokenKind::Semicolon)?.span;
        Ok(AstNode::new(
            AstKind::Defer(Defer {
                expr: Box::new(expr),
            }),
            start.merge(end),
        ))
    }

    pub(crate) fn parse_if_expr(&mut self) -> Result<AstNode, ParseError> {
        let start = self.expect(TokenKind::If)?.span;
        let condition = self.parse_assignment_expr()?;
        let then_block = self.parse_block()?;
        let mut span = start.merge(then_block.span);
        let else_node = if self.chomp_if(TokenKind::Else).is_some() {
            let node = if self.peek_kind() == TokenKind::If {
                self.parse_if_expr()?
            } else {
                self.parse_block()?
            };
            span = span.merge(node.span);
            Some(Box::new(node))
        } else {
            None
        };
        Ok(AstNode::new(
            AstKind::IfExpr(IfExpr {
                condition: Box::new(condition),
                then_block: Box::new(then_block),
                else_node,
            }),
            span,
        ))
    }

    /// `LoopStmt := 'inline'? (LoopC | LoopWhile | LoopIn)`, optionally
    /// preceded by a `BlockLabel` threaded in from `parse_labeled_stmt`.
    /// Dispatched on `Inline` as well as `Loop` so `inline while ...` and
    /// `inline loop (...)` are both reachable without first committing to
    /// a bare `loop` keyword.
    pub(crate) fn parse_loop_stmt(&mut self, label: Option<Symbol>) -> Result<AstNode, ParseError> {
        let start = self.current_span();
        let is_inline = self.chomp_if(TokenKind::Inline).is_some();

        if self.peek_kind() == TokenKind::While {
            return self.parse_loop_while_inner(start, is_inline, label);
        }

        self.expect(TokenKind::Loop)?;

        if self.peek_kind() == TokenKind::While {
            return self.parse_loop_while_inner(start, is_inline, label);
        }
        if self.peek_kind() == TokenKind::In {
            return self.parse_loop_in_inner(start, is_inline, label);
        }

        self.expect(TokenKind::LParen)?;
        let init = if self.peek_kind() == TokenKind::Semicolon {
            None
        } else if matches!(self.peek_kind(), TokenKind::Mutable | TokenKind::Const) {
            Some(Box::new(self.parse_var_decl(false)?))
        } else {
            Some(Box::new(self.parse_assignment_expr()?))
        };
        self.expect(TokenKind::Semicolon)?;
        let cond = if self.peek_kind() == TokenKind::Semicolon {
            None
        } else {
            Some(Box::new(self.parse_assignment_expr()?))
        };
        self.expect(TokenKind::Semicolon)?;
        let step = if self.peek_kind() == TokenKind::RParen {
            None
        } else {
            Some(Box::new(self.parse_assignment_expr()?))
        };
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(AstNode::new(
            AstKind::LoopC(LoopC {
                init,
                cond,
                step,
                body: Box::new(body),
                is_inline,
                label,
            }),
            span,
        ))
    }

    pub(crate) fn parse_loop_while(&mut self, label: Option<wispc_util::Symbol>) -> Result<AstNode, ParseError> {
        let start = self.current_span();
        self.parse_loop_while_inner(start, false, label)
    }

    fn parse_loop_while_inner(
        &mut self,
        start: wispc_util::Span,
        is_inline: bool,
        label: Option<wispc_util::Symbol>,
    ) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::While)?;
        let cond = self.parse_assignment_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(AstNode::new(
            AstKind::LoopWhile(LoopWhile {
                cond: Box::new(cond),
                body: Box::new(body),
                is_inline,
                label,
            }),
            span,
        ))
    }

    fn parse_loop_in_inner(
        &mut self,
        start: wispc_util::Span,
        is_inline: bool,
        label: Option<wispc_util::Symbol>,
    ) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::In)?;
        let pattern = self.parse_suffix_expr()?;
        self.expect(TokenKind::Colon)?;
        let iterable = self.parse_assignment_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(AstNode::new(
            AstKind::LoopIn(LoopIn {
                pattern: Box::new(pattern),
                iterable: Box::new(iterable),
                body: Box::new(body),
                is_inline,
                label,
            }),
            span,
        ))
    }

    pub(crate) fn parse_match_expr(&mut self) -> Result<AstNode, ParseError> {
        let start = self.expect(TokenKind::Match)?.span;
        let scrutinee = self.parse_assignment_expr()?;
        self.expect(TokenKind::LBrace)?;

        let mut branches = Vec::new();
        let mut saw_else = false;
        while self.peek_kind() != TokenKind::RBrace {
            let case = if self.chomp_if(TokenKind::Else).is_some() {
                if saw_else {
                    return Err(self.error_kind(
                        ParseErrorKind::DuplicateElseInMatch,
                        DiagnosticCode::DuplicateElseInMatch,
                    ));
                }
                saw_else = true;
                MatchCase::Else
            } else {
                self.expect(TokenKind::Case)?;
                let mut patterns = vec![self.parse_assignment_expr()?];
                while self.chomp_if(TokenKind::Comma).is_some() {
                    patterns.push(self.parse_assignment_expr()?);
                }
                MatchCase::Patterns(patterns)
            };

            if self.peek_kind() != TokenKind::Colon && self.peek_kind() != TokenKind::FatArrow {
                return Err(self.error_kind(
                    ParseErrorKind::MissingMatchSeparator,
                    DiagnosticCode::MissingMatchSeparator,
                ));
            }
            self.chomp();

            let body = self.parse_assignment_expr()?;
            self.expect(TokenKind::Semicolon)?;
            branches.push(MatchBranch {
                case,
                body: Box::new(body),
            });
        }
        let end = self.expect(TokenKind::RBrace)?.span;

        Ok(AstNode::new(
            AstKind::MatchExpr(MatchExpr {
                scrutinee: Box::new(scrutinee),
                branches,
            }),
            start.merge(end),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use wispc_util::{Handler, SourceMap};

    fn parse_unit(src: &str) -> Result<AstNode, ParseError> {
        let mut map = SourceMap::new();
        let file = map.add_file("stmt.wsp", src.to_string());
        let handler = Handler::new();
        let tokens = wispc_lex::lex(src, file, &handler).unwrap();
        crate::parse(tokens, file, &handler)
    }

    fn body_of(src: &str) -> Block {
        let ast = parse_unit(src).unwrap();
        match ast.kind {
            AstKind::TranslationUnit(mut items) => match items.remove(0).kind {
                AstKind::FuncDef(f) => match f.body.kind {
                    AstKind::Block(b) => b,
                    other => panic!("expected Block, got {other:?}"),
                },
                other => panic!("expected FuncDef, got {other:?}"),
            },
            other => panic!("expected TranslationUnit, got {other:?}"),
        }
    }

    #[test]
    fn if_else_chain() {
        let block = body_of(
            "func f() -> Int32 { if a { return 1; } else if b { return 2; } else { return 3; } }",
        );
        match &block.statements[0].kind {
            AstKind::IfExpr(if_expr) => {
                assert!(if_expr.has_else());
                match &if_expr.else_node.as_ref().unwrap().kind {
                    AstKind::IfExpr(inner) => assert!(inner.has_else()),
                    other => panic!("expected nested IfExpr, got {other:?}"),
                }
            }
            other => panic!("expected IfExpr, got {other:?}"),
        }
    }

    #[test]
    fn c_style_loop() {
        let block = body_of("func f() -> Int32 { loop (mutable Int32 i = 0; i < 10; i += 1) { } }");
        assert!(matches!(block.statements[0].kind, AstKind::LoopC(_)));
    }

    #[test]
    fn while_loop() {
        let block = body_of("func f() -> Int32 { while a { break; } }");
        assert!(matches!(block.statements[0].kind, AstKind::LoopWhile(_)));
    }

    #[test]
    fn match_with_single_else() {
        let block = body_of(
            "func f() -> Int32 { match x { case 1: return 1; else: return 0; } }",
        );
        match &block.statements[0].kind {
            AstKind::MatchExpr(m) => {
                assert_eq!(m.branches.len(), 2);
                assert!(matches!(m.branches[1].case, MatchCase::Else));
            }
            other => panic!("expected MatchExpr, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_else_in_match_is_fatal() {
        let err = parse_unit(
            "func f() -> Int32 { match x { else: return 1; else: return 0; } }",
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateElseInMatch);
    }

    #[test]
    fn missing_match_separator_is_fatal() {
        let err = parse_unit("func f() -> Int32 { match x { case 1 return 1; } }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingMatchSeparator);
    }

    #[test]
    fn defer_statement() {
        let block = body_of("func f() -> Int32 { defer cleanup(); return 0; }");
        assert!(matches!(block.statements[0].kind, AstKind::Defer(_)));
    }

    #[test]
    fn labeled_block() {
        let block = body_of("func f() -> Int32 { outer: { break outer; } }");
        match &block.statements[0].kind {
            AstKind::Block(inner) => assert!(inner.label.is_some()),
            other => panic!("expected labeled Block, got {other:?}"),
        }
    }

    #[test]
    fn labeled_while_loop() {
        let block = body_of("func f() -> Int32 { outer: while a { break outer; } }");
        match &block.statements[0].kind {
            AstKind::LoopWhile(loop_while) => assert!(loop_while.label.is_some()),
            other => panic!("expected labeled LoopWhile, got {other:?}"),
        }
    }

    #[test]
    fn labeled_c_loop() {
        let block = body_of("func f() -> Int32 { outer: loop (;;) { break outer; } }");
        match &block.statements[0].kind {
            AstKind::LoopC(loop_c) => assert!(loop_c.label.is_some()),
            other => panic!("expected labeled LoopC, got {other:?}"),
        }
    }

    #[test]
    fn inline_loop_sets_is_inline() {
        let block = body_of("func f() -> Int32 { inline loop (;;) { } }");
        match &block.statements[0].kind {
            AstKind::LoopC(loop_c) => assert!(loop_c.is_inline),
            other => panic!("expected LoopC, got {other:?}"),
        }
    }

    #[test]
    fn inline_while_sets_is_inline() {
        let block = body_of("func f() -> Int32 { inline while a { } }");
        match &block.statements[0].kind {
            AstKind::LoopWhile(loop_while) => assert!(loop_while.is_inline),
            other => panic!("expected LoopWhile, got {other:?}"),
        }
    }

    #[test]
    fn break_with_label_and_value() {
        let block = body_of("func f() -> Int32 { loop (;;) { break outer 1; } }");
        match &block.statements[0].kind {
            AstKind::LoopC(loop_c) => match &loop_c.body.kind {
                AstKind::Block(b) => match &b.statements[0].kind {
                    AstKind::Branch(branch) => {
                        assert_eq!(branch.kind, BranchKind::Break);
                        assert!(branch.label.is_some());
                        assert!(branch.expr.is_some());
                    }
                    other => panic!("expected Branch, got {other:?}"),
                },
                other => panic!("expected Block, got {other:?}"),
            },
            other => panic!("expected LoopC, got {other:?}"),
        }
    }
}
