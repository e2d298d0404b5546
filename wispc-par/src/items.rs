//! Top-level declarations: function prototypes/definitions and variable
//! declarations (spec.md §3.3 "Declarations").

use crate::ast::{AstKind, AstNode, FuncDef, FuncPrototype, ParamDecl, VarDecl};
use crate::error::{ParseError, ParseErrorKind};
use crate::Parser;
use wispc_lex::{TokenKind, TokenValue};
use wispc_util::DiagnosticCode;

impl<'a> Parser<'a> {
    pub(crate) fn parse_translation_unit(&mut self) -> Result<AstNode, ParseError> {
        let start = self.current_span();
        let mut items = Vec::new();
        while !self.is_at_end() {
            items.push(self.parse_top_level_decl()?);
        }
        let span = if let (Some(first), Some(last)) = (items.first(), items.last()) {
            first.span.merge(last.span)
        } else {
            start
        };
        Ok(AstNode::new(AstKind::TranslationUnit(items), span))
    }

    fn parse_top_level_decl(&mut self) -> Result<AstNode, ParseError> {
        let start = self.current_span();
        let is_export = self.chomp_if(TokenKind::Export).is_some();

        match self.peek_kind() {
            TokenKind::Func => self.parse_func_decl(start, is_export),
            TokenKind::Mutable | TokenKind::Const => {
                let decl = self.parse_var_decl(is_export)?;
                self.expect(TokenKind::Semicolon)?;
                Ok(decl)
            }
            _ => Err(self.error_unexpected()),
        }
    }

    fn parse_func_decl(&mut self, start: wispc_util::Span, is_export: bool) -> Result<AstNode, ParseError> {
        let proto = self.parse_func_prototype(true)?;
        let proto = match proto.kind {
            AstKind::FuncPrototype(mut p) => {
                p.is_export = is_export;
                AstNode::new(AstKind::FuncPrototype(p), proto.span)
            }
            other => AstNode::new(other, proto.span),
        };
        if self.peek_kind() == TokenKind::Semicolon {
            // Bare prototype declaration, no body.
            self.chomp();
            return Ok(proto);
        }
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(AstNode::new(
            AstKind::FuncDef(FuncDef {
                proto: Box::new(proto),
                body: Box::new(body),
            }),
            span,
        ))
    }

    /// `func name(params) -> ReturnType`. When `require_name` is false this
    /// also accepts the anonymous function-type form used inside
    /// `PrimaryTypeExpr` (e.g. a parameter typed as a function pointer).
    pub(crate) fn parse_func_prototype(&mut self, require_name: bool) -> Result<AstNode, ParseError> {
        let start = self.expect(TokenKind::Func)?.span;
        let name = if self.peek_kind() == TokenKind::Identifier {
            let tok = self.chomp();
            match tok.value {
                Some(TokenValue::Ident(sym)) => Some(sym),
                _ => unreachable!("Identifier token must carry TokenValue::Ident"),
            }
        } else if require_name {
            return Err(self.error_expected(TokenKind::Identifier));
        } else {
            None
        };

        self.expect(TokenKind::LParen)?;
        let (params, is_var_args) = self.parse_param_list()?;
        self.expect(TokenKind::RParen)?;

        if self.peek_kind() != TokenKind::Arrow {
            return Err(self.error_kind(
                ParseErrorKind::MissingReturnType,
                DiagnosticCode::MissingReturnType,
            ));
        }
        self.chomp();
        let return_type = self.parse_type_expr()?;
        let span = start.merge(return_type.span);

        Ok(AstNode::new(
            AstKind::FuncPrototype(FuncPrototype {
                name,
                params,
                return_type: Box::new(return_type),
                is_var_args,
                is_export: false,
            }),
            span,
        ))
    }

    /// Returns the parsed parameters and whether the last one was
    /// variadic (`... Type name`). A variadic parameter appearing before
    /// the end of the list is a fatal `VariadicNotLast` error.
    fn parse_param_list(&mut self) -> Result<(Vec<ParamDecl>, bool), ParseError> {
        let mut params = Vec::new();
        let mut saw_var_args = false;

        if self.peek_kind() == TokenKind::RParen {
            return Ok((params, false));
        }

        loop {
            if saw_var_args {
                return Err(self.error_kind(
                    ParseErrorKind::VariadicNotLast,
                    DiagnosticCode::VariadicNotLast,
                ));
            }

            let start = self.current_span();
            let is_var_args = self.chomp_if(TokenKind::DotDotDot).is_some();
            let type_expr = self.parse_type_expr()?;
            let name_tok = self.expect(TokenKind::Identifier)?;
            let name = match name_tok.value {
                Some(TokenValue::Ident(sym)) => sym,
                _ => unreachable!("Identifier token must carry TokenValue::Ident"),
            };
            let span = start.merge(name_tok.span);
            params.push(ParamDecl {
                name,
                type_expr: Box::new(type_expr),
                is_var_args,
                span,
            });
            saw_var_args = is_var_args;

            if self.chomp_if(TokenKind::Comma).is_none() {
                break;
            }
        }

        Ok((params, saw_var_args))
    }

    /// `[mutable|const] Type name [= init]`. `is_export` is threaded in
    /// from the caller since `export` may only precede the qualifier, not
    /// follow it.
    pub(crate) fn parse_var_decl(&mut self, is_export: bool) -> Result<AstNode, ParseError> {
        let start = self.current_span();
        let is_mutable = self.chomp_if(TokenKind::Mutable).is_some();
        let is_const = if !is_mutable {
            self.chomp_if(TokenKind::Const).is_some()
        } else {
            false
        };
        let other_qualifier = if is_mutable {
            TokenKind::Const
        } else {
            TokenKind::Mutable
        };
        if (is_mutable || is_const) && self.peek_kind() == other_qualifier {
            return Err(self.error_kind(
                ParseErrorKind::ConflictingQualifiers,
                DiagnosticCode::ConflictingQualifiers,
            ));
        }

        let type_expr = if self.peek_kind() == TokenKind::Identifier
            && self.peek_kind_at(1) == TokenKind::Identifier
        {
            Some(Box::new(self.parse_type_expr()?))
        } else {
            None
        };

        let name_tok = self.expect(TokenKind::Identifier)?;
        let name = match name_tok.value {
            Some(TokenValue::Ident(sym)) => sym,
            _ => unreachable!("Identifier token must carry TokenValue::Ident"),
        };

        let init = if self.chomp_if(TokenKind::Eq).is_some() {
            Some(Box::new(self.parse_assignment_expr()?))
        } else {
            None
        };

        let end_span = init
            .as_ref()
            .map(|i| i.span)
            .unwrap_or_else(|| type_expr.as_ref().map(|t| t.span).unwrap_or(name_tok.span));
        let span = start.merge(end_span);

        Ok(AstNode::new(
            AstKind::VarDecl(VarDecl {
                name,
                type_expr,
                init,
                is_export,
                is_mutable,
                is_const,
            }),
            span,
        ))
    }

    /// A type expression is, for this front end, just an identifier
    /// (`Int32`, `Str`, ...) or an anonymous function prototype
    /// (`func(Int32) -> Int32`) per `PrimaryTypeExpr` in `original_source`.
    pub(crate) fn parse_type_expr(&mut self) -> Result<AstNode, ParseError> {
        if self.peek_kind() == TokenKind::Func {
            return self.parse_func_prototype(false);
        }
        let tok = self.expect(TokenKind::Identifier)?;
        let name = match tok.value {
            Some(TokenValue::Ident(sym)) => sym,
            _ => unreachable!("Identifier token must carry TokenValue::Ident"),
        };
        Ok(AstNode::new(AstKind::Identifier(name), tok.span))
    }
}
