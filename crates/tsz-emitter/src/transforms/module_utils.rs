//! Predicates and builders shared by the CommonJS and ES module transforms.

use tsz_ast::factory;
use tsz_ast::expression::{ArrayLiteralExpression, ObjectLiteralExpression};
use tsz_ast::statement::{
    ArrayBindingElement, BindingElement, ExportDeclaration, ExternalModuleReference,
    ImportDeclaration, ImportEqualsDeclaration, ModuleReference, NamedExportBindings,
    NamedImportBindings,
};
use tsz_ast::utilities::{
    contains_default_reference, is_default_import, is_effective_external_module,
};
use tsz_ast::{
    BindingName, Expression, Identifier, ModifierFlags, NodeId, ObjectLiteralElement, SourceFile,
    Statement,
};
use tsz_common::path::rewrite_module_specifier_text;
use tsz_common::{CompilerOptions, JsxEmit, ModuleKind};

use crate::emit_context::EmitContext;
use crate::emit_flags::EmitFlags;

pub(crate) const EXTERNAL_HELPERS_MODULE_NAME: &str = "tslib";

// =============================================================================
// Interop helper selection
// =============================================================================

/// Whether importing `decl` under `esModuleInterop` goes through
/// `__importStar`: namespace imports, and named imports that mix `default`
/// with other names.
pub(crate) fn import_needs_import_star_helper(decl: &ImportDeclaration) -> bool {
    let named = match named_import_bindings(decl) {
        Some(NamedImportBindings::NamespaceImport(_)) => return true,
        Some(NamedImportBindings::NamedImports(named)) => named,
        None => return false,
    };
    let default_refs = named
        .elements
        .iter()
        .filter(|element| element.imported_name_text() == "default")
        .count();
    let total = named.elements.len();
    (default_refs > 0 && default_refs != total)
        || (total - default_refs != 0 && is_default_import(decl))
}

/// Whether importing `decl` under `esModuleInterop` goes through
/// `__importDefault`.
pub(crate) fn import_needs_import_default_helper(decl: &ImportDeclaration) -> bool {
    !import_needs_import_star_helper(decl)
        && (is_default_import(decl) || contains_default_reference(named_import_bindings(decl)))
}

/// `export * as ns from "m"` needs `__importStar`.
pub(crate) fn export_needs_import_star_helper(decl: &ExportDeclaration) -> bool {
    matches!(
        decl.export_clause,
        Some(NamedExportBindings::NamespaceExport(_))
    )
}

fn named_import_bindings(decl: &ImportDeclaration) -> Option<&NamedImportBindings> {
    decl.import_clause
        .as_ref()
        .and_then(|clause| clause.named_bindings.as_ref())
}

/// Whether `import()` calls in a file of `file_format` are lowered to
/// `require`. Node16..NodeNext and Preserve keep them: every supported
/// runtime understands dynamic import there.
pub(crate) fn should_transform_import_call(
    file_format: ModuleKind,
    options: &CompilerOptions,
) -> bool {
    let module_kind = options.emit_module_kind();
    if (ModuleKind::Node16..=ModuleKind::NodeNext).contains(&module_kind)
        || module_kind == ModuleKind::Preserve
    {
        return false;
    }
    file_format < ModuleKind::ES2015
}

// =============================================================================
// Expressions
// =============================================================================

/// Literals, keywords and identifiers: evaluating them twice is harmless.
pub(crate) fn is_simple_copiable_expression(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::StringLiteral(_)
            | Expression::NumericLiteral(_)
            | Expression::Keyword(_)
            | Expression::Identifier(_)
    )
}

/// A copiable expression whose value cannot change between evaluations.
pub(crate) fn is_simple_inlineable_expression(expression: &Expression) -> bool {
    !matches!(expression, Expression::Identifier(_)) && is_simple_copiable_expression(expression)
}

/// A fresh literal with the relative TS extension of `specifier` replaced by
/// its JS output extension; anything else comes back untouched.
pub(crate) fn rewrite_module_specifier(
    specifier: Expression,
    options: &CompilerOptions,
) -> Expression {
    match &specifier {
        Expression::StringLiteral(lit) => match rewrite_module_specifier_text(&lit.text, options) {
            Some(rewritten) => factory::create_string_literal(rewritten),
            None => specifier,
        },
        _ => specifier,
    }
}

/// The specifier argument of a dynamic `import()` or `require()`: literals are
/// rewritten in place, no-substitution templates are left alone, and any
/// other expression is routed through `__rewriteRelativeImportExtension` at
/// runtime.
pub(crate) fn rewrite_or_shim_module_specifier(
    ctx: &mut EmitContext,
    specifier: Expression,
    options: &CompilerOptions,
) -> Expression {
    match specifier {
        Expression::StringLiteral(_) => rewrite_module_specifier(specifier, options),
        Expression::Template(template) if template.spans.is_empty() => {
            Expression::Template(template)
        }
        specifier => ctx.create_rewrite_relative_import_extension_helper(
            specifier,
            options.jsx() == JsxEmit::Preserve,
        ),
    }
}

/// Whether `text` can be written as a property name after `.`.
pub(crate) fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
}

/// The assignment target equivalent of a binding name: `{ a, b: [c] = d }`
/// in a declaration becomes the same shape as an object/array literal, so
/// `var { a } = o` can be rewritten as `({ a } = o)`.
///
/// # Panics
///
/// Panics on an object binding element that binds a pattern without a
/// property name, which the parser never produces.
pub(crate) fn convert_binding_name_to_assignment_target(name: BindingName) -> Expression {
    match name {
        BindingName::Identifier(ident) => Expression::Identifier(ident),
        BindingName::ObjectBindingPattern(pattern) => {
            let properties = pattern
                .elements
                .into_iter()
                .map(convert_object_binding_element)
                .collect();
            Expression::ObjectLiteral(ObjectLiteralExpression {
                id: NodeId::fresh(),
                properties,
                multi_line: false,
            })
        }
        BindingName::ArrayBindingPattern(pattern) => {
            let elements = pattern
                .elements
                .into_iter()
                .map(|element| match element {
                    ArrayBindingElement::Omitted(omitted) => Expression::Omitted(omitted),
                    ArrayBindingElement::BindingElement(element) if element.dot_dot_dot => {
                        factory::create_spread(convert_binding_name_to_assignment_target(
                            element.name,
                        ))
                    }
                    ArrayBindingElement::BindingElement(element) => {
                        convert_binding_element_with_default(element.name, element.initializer)
                    }
                })
                .collect();
            Expression::ArrayLiteral(ArrayLiteralExpression {
                id: NodeId::fresh(),
                elements,
                multi_line: false,
            })
        }
    }
}

fn convert_object_binding_element(element: BindingElement) -> ObjectLiteralElement {
    let BindingElement {
        dot_dot_dot,
        property_name,
        name,
        initializer,
        ..
    } = element;
    if dot_dot_dot {
        return ObjectLiteralElement::SpreadAssignment(tsz_ast::expression::SpreadAssignment {
            id: NodeId::fresh(),
            expression: convert_binding_name_to_assignment_target(name),
        });
    }
    match (property_name, name) {
        (Some(property_name), name) => factory::create_property_assignment(
            property_name,
            convert_binding_element_with_default(name, initializer),
        ),
        (None, BindingName::Identifier(name)) => ObjectLiteralElement::ShorthandPropertyAssignment(
            tsz_ast::expression::ShorthandPropertyAssignment {
                id: NodeId::fresh(),
                name,
                object_assignment_initializer: initializer.map(Box::new),
            },
        ),
        (None, _) => panic!("object binding pattern element without a property name"),
    }
}

fn convert_binding_element_with_default(
    name: BindingName,
    initializer: Option<Expression>,
) -> Expression {
    let target = convert_binding_name_to_assignment_target(name);
    match initializer {
        Some(initializer) => factory::create_assignment(target, initializer),
        None => target,
    }
}

/// `"use strict";` at the front of `statements` unless a directive already
/// says so.
pub(crate) fn ensure_use_strict(statements: &mut Vec<Statement>) {
    let has_use_strict = statements
        .iter()
        .take_while(|statement| statement.is_prologue_directive())
        .any(|statement| {
            matches!(statement, Statement::Expression(stmt)
                if stmt.expression.as_string_literal().is_some_and(|lit| lit.text == "use strict"))
        });
    if !has_use_strict {
        statements.insert(
            0,
            factory::create_expression_statement(factory::create_string_literal("use strict")),
        );
    }
}

/// `import x = require("specifier")`, built with a struct literal since the
/// factory has no builder for synthetic `import =` declarations.
pub(crate) fn create_import_equals_require(name: Identifier, specifier: Expression) -> Statement {
    Statement::ImportEquals(ImportEqualsDeclaration {
        id: NodeId::fresh(),
        modifiers: ModifierFlags::empty(),
        is_type_only: false,
        name,
        module_reference: ModuleReference::External(ExternalModuleReference {
            id: NodeId::fresh(),
            expression: specifier,
        }),
    })
}

// =============================================================================
// External helpers
// =============================================================================

/// The statement importing runtime helpers from `tslib`, when `importHelpers`
/// is on and the file uses any unscoped helper.
///
/// CommonJS output gets `import tslib_1 = require("tslib")`, which the
/// CommonJS transform lowers to a `const`; ES module output gets
/// `import { __a, __b } from "tslib"` with collision-free local aliases.
/// `file_format` is the file's own module format when known.
pub(crate) fn create_external_helpers_import_declaration_if_needed(
    ctx: &mut EmitContext,
    file: &SourceFile,
    options: &CompilerOptions,
    file_format: Option<ModuleKind>,
) -> Option<Statement> {
    if !options.import_helpers() || !is_effective_external_module(file, options) {
        return None;
    }
    let module_kind = options.emit_module_kind();
    let helpers: Vec<_> = ctx
        .emit_helpers(file.id)
        .iter()
        .copied()
        .filter(|helper| !helper.scoped)
        .collect();

    let emits_es_module = module_kind.is_es_module()
        || file_format == Some(ModuleKind::ESNext)
        || (file_format.is_none() && module_kind == ModuleKind::Preserve);

    let declaration = if emits_es_module {
        let mut names: Vec<&'static str> = Vec::new();
        for helper in &helpers {
            if !helper.import_name.is_empty() && !names.contains(&helper.import_name) {
                names.push(helper.import_name);
            }
        }
        if names.is_empty() {
            return None;
        }
        names.sort_unstable();
        let specifiers = names
            .into_iter()
            .map(|name| {
                if ctx.is_unique_name(name) {
                    (None, factory::create_identifier(name))
                } else {
                    let alias = ctx.new_unique_name(name, false);
                    ctx.set_helper_alias(file.id, name, alias.text.clone());
                    (Some(factory::create_identifier(name)), alias)
                }
            })
            .collect();
        ctx.add_emit_flags(file.id, EmitFlags::EXTERNAL_HELPERS);
        factory::create_named_import_declaration(
            specifiers,
            factory::create_string_literal(EXTERNAL_HELPERS_MODULE_NAME),
        )
    } else {
        let name = match ctx.external_helpers_module_name(file.id) {
            Some(name) => name.clone(),
            None if !helpers.is_empty() => {
                let name = ctx.new_unique_name(EXTERNAL_HELPERS_MODULE_NAME, false);
                ctx.set_external_helpers_module_name(file.id, name.clone());
                name
            }
            None => return None,
        };
        create_import_equals_require(
            name,
            factory::create_string_literal(EXTERNAL_HELPERS_MODULE_NAME),
        )
    };
    ctx.add_emit_flags(
        declaration.id(),
        EmitFlags::NEVER_APPLY_IMPORT_HELPER | EmitFlags::CUSTOM_PROLOGUE,
    );
    Some(declaration)
}

/// Number of leading `"use strict"`-style directives.
pub(crate) fn count_prologue_directives(statements: &[Statement]) -> usize {
    statements
        .iter()
        .take_while(|statement| statement.is_prologue_directive())
        .count()
}
