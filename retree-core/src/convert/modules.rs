//! Imports, exports and TypeScript module-level forms

use super::Walk;
use crate::error::{Result, TranslateError};
use crate::estree::*;
use crate::kinds::SourceKind;
use crate::source::SourceNode;

fn kind_of(type_only: bool) -> &'static str {
    if type_only {
        "type"
    } else {
        "value"
    }
}

impl Walk<'_> {
    /// `with { type: "json" }` (or the older `assert`) as `ImportAttribute`s
    fn import_attributes(&mut self, src: &SourceNode<'_>) -> Result<Vec<Node>> {
        let Some(object) = src.opt_node(src.pick(&["with", "asserts"]))? else {
            return Ok(Vec::new());
        };
        let mut attributes = Vec::new();
        for value in object.array("properties")? {
            let entry = SourceNode::new(value)?;
            if !entry.is(SourceKind::KeyValueProperty) {
                return Err(TranslateError::shape(object.kind(), "properties", "key: value entries"));
            }
            let key = entry.node("key")?;
            let value = entry.node("value")?;
            attributes.push(Node::ImportAttribute(ImportAttribute {
                range: self.offsets.key_value(key.span()?, value.span()?),
                key: self.boxed(&key)?,
                value: self.boxed(&value)?,
            }));
        }
        Ok(attributes)
    }

    pub(super) fn import_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ImportDeclaration(ImportDeclaration {
            range: self.range(src)?,
            source: self.child(src, "source")?,
            specifiers: self.children(src, "specifiers")?,
            import_kind: kind_of(src.bool("typeOnly")?),
            assertions: self.import_attributes(src)?,
        }))
    }

    pub(super) fn import_default_specifier(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ImportDefaultSpecifier(LocalSpecifier {
            range: self.range(src)?,
            local: self.child(src, "local")?,
        }))
    }

    pub(super) fn import_namespace_specifier(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ImportNamespaceSpecifier(LocalSpecifier {
            range: self.range(src)?,
            local: self.child(src, "local")?,
        }))
    }

    /// `import { a }` has no `imported`; the local name doubles as it
    pub(super) fn import_specifier(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let local = self.child(src, "local")?;
        let imported = match self.opt_child(src, "imported")? {
            Some(imported) => imported,
            None => local.clone(),
        };
        Ok(Node::ImportSpecifier(ImportSpecifier {
            range: self.range(src)?,
            local,
            imported,
            import_kind: kind_of(src.bool("isTypeOnly")?),
        }))
    }

    /// `export <declaration>`
    pub(super) fn export_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let declaration = src.node("declaration")?;
        let type_only = declaration.is(SourceKind::TsInterfaceDeclaration)
            || declaration.is(SourceKind::TsTypeAliasDeclaration)
            || declaration.bool("declare")?;
        Ok(Node::ExportNamedDeclaration(ExportNamed {
            range: self.range(src)?,
            declaration: Some(self.boxed(&declaration)?),
            specifiers: Vec::new(),
            source: None,
            export_kind: kind_of(type_only),
            assertions: Vec::new(),
        }))
    }

    /// `export { a, b as c } [from "m"]`; a lone `* as ns` becomes an
    /// `ExportAllDeclaration`
    pub(super) fn export_named_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let range = self.range(src)?;
        let export_kind = kind_of(src.bool("typeOnly")?);
        let specifiers = src.array("specifiers")?;

        if let [only] = specifiers {
            let only = SourceNode::new(only)?;
            if only.is(SourceKind::ExportNamespaceSpecifier) {
                return Ok(Node::ExportAllDeclaration(ExportAll {
                    range,
                    source: self.child(src, "source")?,
                    exported: Some(self.child(&only, "name")?),
                    export_kind,
                    assertions: self.import_attributes(src)?,
                }));
            }
        }

        Ok(Node::ExportNamedDeclaration(ExportNamed {
            range,
            declaration: None,
            specifiers: self.nodes(specifiers)?,
            source: self.opt_child(src, "source")?,
            export_kind,
            assertions: self.import_attributes(src)?,
        }))
    }

    pub(super) fn export_specifier(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let local = self.child(src, "orig")?;
        let exported = match self.opt_child(src, "exported")? {
            Some(exported) => exported,
            None => local.clone(),
        };
        Ok(Node::ExportSpecifier(ExportSpecifier {
            range: self.range(src)?,
            local,
            exported,
            export_kind: kind_of(src.bool("isTypeOnly")?),
        }))
    }

    /// Only meaningful as the sole specifier; see `export_named_declaration`
    pub(super) fn export_namespace_specifier(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Err(TranslateError::unrepresentable(src.kind()))
    }

    /// `export default function / class / interface`
    pub(super) fn export_default_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        let declaration = match *self.child(src, "decl")? {
            Node::ClassExpression(class) => Node::ClassDeclaration(class),
            Node::FunctionExpression(function) if function.body.is_none() => {
                Node::TSDeclareFunction(function.into())
            }
            Node::FunctionExpression(function) => Node::FunctionDeclaration(function),
            other => other,
        };
        Ok(Node::ExportDefaultDeclaration(ExportDefault {
            range: self.range(src)?,
            declaration: Box::new(declaration),
            export_kind: "value",
        }))
    }

    pub(super) fn export_default_expression(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ExportDefaultDeclaration(ExportDefault {
            range: self.range(src)?,
            declaration: self.child(src, "expression")?,
            export_kind: "value",
        }))
    }

    pub(super) fn export_all_declaration(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::ExportAllDeclaration(ExportAll {
            range: self.range(src)?,
            source: self.child(src, "source")?,
            exported: None,
            export_kind: kind_of(src.bool("typeOnly")?),
            assertions: self.import_attributes(src)?,
        }))
    }

    /// `import x = require("m")` / `import x = A.B`
    pub(super) fn import_equals(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSImportEqualsDeclaration(ImportEquals {
            range: self.range(src)?,
            id: self.child(src, "id")?,
            module_reference: self.child(src, "moduleRef")?,
            import_kind: kind_of(src.bool("isTypeOnly")?),
            is_export: src.bool("isExport")?,
        }))
    }

    pub(super) fn external_module_reference(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSExternalModuleReference(ExpressionWrapper {
            range: self.range(src)?,
            expression: self.child(src, src.pick(&["expression", "expr"]))?,
        }))
    }

    /// `export = x`
    pub(super) fn export_assignment(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSExportAssignment(ExpressionWrapper {
            range: self.range(src)?,
            expression: self.child(src, src.pick(&["expression", "expr"]))?,
        }))
    }

    /// `export as namespace X`
    pub(super) fn namespace_export(&mut self, src: &SourceNode<'_>) -> Result<Node> {
        Ok(Node::TSNamespaceExportDeclaration(NamespaceExport {
            range: self.range(src)?,
            id: self.child(src, "id")?,
        }))
    }
}
