//! Programs, statements and variable declarations

use serde_json::Value;

use super::Walk;
use crate::error::Result;
use crate::estree::*;
use crate::kinds::SourceKind;
use crate::source::SourceNode;
use crate::span::Range;

impl Walk<'_> {
    pub(super) fn program(&mut self, src: &SourceNode<'_>, source_type: &'static str) -> Result<Node> {
        let range = self.range(src)?;
        let end = match self.config.source_len {
            Some(len) => range.end().max(len),
            None => range.end(),
        };
        Ok(Node::Program(Program {
            range: Range::new(range.start(), end),
            body: self.statement_list(src.array("body")?)?,
            source_type,
        }))
    }

    /// Statement list of a program, function body or module block.
    ///
    /// Leading string-literal expression statements form the directive
    /// prologue and carry their raw text, quotes stripped, as `directive`.
    pub(super) fn statement_list(&mut self, statements: &[Value]) -> Result<Vec<Node>> {
        let mut body = Vec::with_capacity(statements.len());
        let mut prologue = true;
        for value in statements {
            let statement = SourceNode::new(value)?;
            let directive = if prologue { directive_text(&statement)? } else { None };
            prologue = directive.is_some();
            match directive {
                Some(directive) => body.push(Node::ExpressionStatement(ExpressionStatement {
                    range: self.range(&statement)?,
                    expression: self.child(&statement, "expression")?,
                    directive: Some(directive),
                })),
                None => body.push(self.visit(&statement)?),
            }
        }
        Ok(body)
    }

    /// Body block of a function-like node, with directives
    pub(super) fn function_body(&mut self, src: &SourceNode<'_>, field: &str) -> Result<Option<Child>> {
        let Some(block) = src.opt_node(field)? else {
            return Ok(None);
        };
        if !block.is(SourceKind::BlockStatement) {
            return self.boxed(&block).map(Some);
        }
        Ok(Some(Box::new(Node::BlockStatement(Block {
            range: self.range(&block)?,
            body: self.statement_list(block.array("stmts")?)?,
        }))))
    }

    pub(super) fn block_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::BlockStatement(Block {
            range: self.range(src)?,
            body: self.children(src, "stmts")?,
        }))
    }

    pub(super) fn empty_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::EmptyStatement(Leaf {
            range: self.range(src)?,
        }))
    }

    pub(super) fn debugger_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::DebuggerStatement(Leaf {
            range: self.range(src)?,
        }))
    }

    pub(super) fn expression_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ExpressionStatement(ExpressionStatement {
            range: self.range(src)?,
            expression: self.child(src, "expression")?,
            directive: None,
        }))
    }

    pub(super) fn with_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::WithStatement(With {
            range: self.range(src)?,
            object: self.child(src, "object")?,
            body: self.child(src, "body")?,
        }))
    }

    pub(super) fn return_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ReturnStatement(OptArgument {
            range: self.range(src)?,
            argument: self.opt_child(src, "argument")?,
        }))
    }

    pub(super) fn labeled_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::LabeledStatement(Labeled {
            range: self.range(src)?,
            label: self.child(src, "label")?,
            body: self.child(src, "body")?,
        }))
    }

    pub(super) fn jump_statement(&mut self, src: &SourceNode<'_>, is_continue: bool) -> Result<Node> {
        let jump = Jump {
            range: self.range(src)?,
            label: self.opt_child(src, "label")?,
        };
        Ok(if is_continue {
            Node::ContinueStatement(jump)
        } else {
            Node::BreakStatement(jump)
        })
    }

    pub(super) fn if_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::IfStatement(If {
            range: self.range(src)?,
            test: self.child(src, "test")?,
            consequent: self.child(src, "consequent")?,
            alternate: self.opt_child(src, "alternate")?,
        }))
    }

    pub(super) fn switch_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::SwitchStatement(Switch {
            range: self.range(src)?,
            discriminant: self.child(src, "discriminant")?,
            cases: self.children(src, "cases")?,
        }))
    }

    pub(super) fn switch_case(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::SwitchCase(SwitchCase {
            range: self.range(src)?,
            test: self.opt_child(src, "test")?,
            consequent: self.children(src, "consequent")?,
        }))
    }

    pub(super) fn throw_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ThrowStatement(Argument {
            range: self.range(src)?,
            argument: self.child(src, "argument")?,
        }))
    }

    pub(super) fn try_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TryStatement(Try {
            range: self.range(src)?,
            block: self.child(src, "block")?,
            handler: self.opt_child(src, "handler")?,
            finalizer: self.opt_child(src, "finalizer")?,
        }))
    }

    pub(super) fn catch_clause(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::CatchClause(CatchClause {
            range: self.range(src)?,
            param: self.opt_child(src, "param")?,
            body: self.child(src, "body")?,
        }))
    }

    pub(super) fn while_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::WhileStatement(Loop {
            range: self.range(src)?,
            test: self.child(src, "test")?,
            body: self.child(src, "body")?,
        }))
    }

    pub(super) fn do_while_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::DoWhileStatement(Loop {
            range: self.range(src)?,
            test: self.child(src, "test")?,
            body: self.child(src, "body")?,
        }))
    }

    pub(super) fn for_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ForStatement(For {
            range: self.range(src)?,
            init: self.opt_child(src, "init")?,
            test: self.opt_child(src, "test")?,
            update: self.opt_child(src, "update")?,
            body: self.child(src, "body")?,
        }))
    }

    pub(super) fn for_in_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ForInStatement(ForIn {
            range: self.range(src)?,
            left: self.child(src, "left")?,
            right: self.child(src, "right")?,
            body: self.child(src, "body")?,
        }))
    }

    pub(super) fn for_of_statement(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        // `await` is a boolean in current SWC, the keyword span in older releases
        let is_await = match src.get("await") {
            Some(Value::Bool(flag)) => *flag,
            Some(_) => true,
            None => src.bool("isAwait")?,
        };
        Ok(Node::ForOfStatement(ForOf {
            range: self.range(src)?,
            left: self.child(src, "left")?,
            right: self.child(src, "right")?,
            body: self.child(src, "body")?,
            is_await,
        }))
    }

    pub(super) fn variable_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::VariableDeclaration(VariableDeclaration {
            range: self.range(src)?,
            declarations: self.children(src, "declarations")?,
            kind: src.str("kind")?.to_string(),
            declare: src.bool("declare")?,
        }))
    }

    pub(super) fn variable_declarator(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::VariableDeclarator(VariableDeclarator {
            range: self.range(src)?,
            id: self.child(src, "id")?,
            init: self.opt_child(src, "init")?,
            definite: src.bool("definite")?,
        }))
    }
}

/// Directive text of a prologue statement, if it is one
fn directive_text(statement: &SourceNode<'_>) -> Result<Option<String>> {
    if !statement.is(SourceKind::ExpressionStatement) {
        return Ok(None);
    }
    let expression = statement.node("expression")?;
    if !expression.is(SourceKind::StringLiteral) {
        return Ok(None);
    }
    let text = match expression.opt_str("raw")? {
        Some(raw) => strip_quotes(raw).to_string(),
        None => expression.str("value")?.to_string(),
    };
    Ok(Some(text))
}

fn strip_quotes(raw: &str) -> &str {
    let inner = raw.strip_prefix(['"', '\'']).unwrap_or(raw);
    inner.strip_suffix(['"', '\'']).unwrap_or(inner)
}
