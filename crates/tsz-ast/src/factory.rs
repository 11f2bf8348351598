//! Node construction helpers.
//!
//! Every builder allocates fresh [`NodeId`]s. Builders return the enclosing
//! sum type (`Expression`, `Statement`, ...) where that is what callers splice
//! into a tree; leaf structs are returned where callers need the concrete
//! node (identifiers, blocks, declarations).

use crate::expression::{
    ArrowFunction, BinaryExpression, BinaryOperator, CallExpression, ConciseBody,
    ConditionalExpression, ElementAccessExpression, Expression, FunctionExpression, Keyword,
    KeywordExpression, MetaProperty, MetaPropertyKeyword, ObjectLiteralElement,
    ObjectLiteralExpression, ParenthesizedExpression, PostfixUnaryExpression,
    PostfixUnaryOperator, PrefixUnaryExpression, PrefixUnaryOperator, PropertyAccessExpression,
    PropertyAssignment, SpreadElement, TemplateExpression, TemplateSpan,
};
use crate::node::{
    Identifier, ModifierFlags, ModuleExportName, NodeId, NumericLiteral, PropertyName,
    StringLiteral,
};
use crate::statement::{
    AccessorDeclaration, BindingName, Block, ExportDeclaration, ExportSpecifier,
    ExpressionStatement, ImportClause, ImportDeclaration, ImportSpecifier, NamedExportBindings,
    NamedExports, NamedImportBindings, NamedImports, NamespaceImport, ParameterDeclaration,
    ReturnStatement, Statement, VariableDeclaration, VariableDeclarationList, VariableKind,
    VariableStatement,
};

// =============================================================================
// Names and literals
// =============================================================================

#[must_use]
pub fn create_identifier(text: impl Into<String>) -> Identifier {
    Identifier {
        id: NodeId::fresh(),
        text: text.into(),
        generated: None,
    }
}

/// An identifier in expression position.
#[must_use]
pub fn create_identifier_expression(text: impl Into<String>) -> Expression {
    Expression::Identifier(create_identifier(text))
}

#[must_use]
pub fn create_string_literal_node(text: impl Into<String>) -> StringLiteral {
    StringLiteral {
        id: NodeId::fresh(),
        text: text.into(),
        single_quote: false,
    }
}

#[must_use]
pub fn create_string_literal(text: impl Into<String>) -> Expression {
    Expression::StringLiteral(create_string_literal_node(text))
}

#[must_use]
pub fn create_numeric_literal(text: impl Into<String>) -> Expression {
    Expression::NumericLiteral(NumericLiteral {
        id: NodeId::fresh(),
        text: text.into(),
    })
}

#[must_use]
pub fn create_keyword(keyword: Keyword) -> Expression {
    Expression::Keyword(KeywordExpression {
        id: NodeId::fresh(),
        keyword,
    })
}

#[must_use]
pub fn create_true() -> Expression {
    create_keyword(Keyword::True)
}

/// `void 0`
#[must_use]
pub fn create_void_zero() -> Expression {
    create_prefix(PrefixUnaryOperator::Void, create_numeric_literal("0"))
}

/// A template literal with substitutions. `head` and span literals are raw text.
#[must_use]
pub fn create_template(head: impl Into<String>, spans: Vec<(Expression, String)>) -> Expression {
    Expression::Template(Box::new(TemplateExpression {
        id: NodeId::fresh(),
        head: head.into(),
        spans: spans
            .into_iter()
            .map(|(expression, literal)| TemplateSpan {
                expression,
                literal,
            })
            .collect(),
    }))
}

/// `import.meta`
#[must_use]
pub fn create_import_meta() -> Expression {
    Expression::MetaProperty(MetaProperty {
        id: NodeId::fresh(),
        keyword: MetaPropertyKeyword::Import,
        name: create_identifier("meta"),
    })
}

// =============================================================================
// Expressions
// =============================================================================

/// `expression.name`
#[must_use]
pub fn create_property_access(expression: Expression, name: Identifier) -> Expression {
    Expression::PropertyAccess(PropertyAccessExpression {
        id: NodeId::fresh(),
        expression: Box::new(expression),
        question_dot: false,
        name,
    })
}

/// `expression["name"]`
#[must_use]
pub fn create_element_access(expression: Expression, argument: Expression) -> Expression {
    Expression::ElementAccess(ElementAccessExpression {
        id: NodeId::fresh(),
        expression: Box::new(expression),
        question_dot: false,
        argument: Box::new(argument),
    })
}

/// `expression.name` for identifier-shaped names, `expression["name"]` for
/// string-literal export names.
#[must_use]
pub fn create_member_access_for_export_name(
    expression: Expression,
    name: &ModuleExportName,
) -> Expression {
    match name {
        ModuleExportName::Identifier(ident) => create_property_access(expression, ident.clone()),
        ModuleExportName::StringLiteral(lit) => {
            create_element_access(expression, create_string_literal(lit.text.clone()))
        }
    }
}

#[must_use]
pub fn create_call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::Call(CallExpression {
        id: NodeId::fresh(),
        expression: Box::new(callee),
        question_dot: false,
        arguments,
    })
}

/// `require("specifier")`
#[must_use]
pub fn create_require_call(specifier: Expression) -> Expression {
    create_call(create_identifier_expression("require"), vec![specifier])
}

#[must_use]
pub fn create_binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    Expression::Binary(BinaryExpression {
        id: NodeId::fresh(),
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

/// `left = right`
#[must_use]
pub fn create_assignment(left: Expression, right: Expression) -> Expression {
    create_binary(left, BinaryOperator::Equals, right)
}

/// `left, right`
#[must_use]
pub fn create_comma(left: Expression, right: Expression) -> Expression {
    create_binary(left, BinaryOperator::Comma, right)
}

/// Join expressions with the comma operator, left-associated.
///
/// # Panics
///
/// Panics on an empty list.
#[must_use]
pub fn inline_expressions(expressions: Vec<Expression>) -> Expression {
    let mut iter = expressions.into_iter();
    let Some(first) = iter.next() else {
        panic!("Expected at least one expression to inline");
    };
    iter.fold(first, create_comma)
}

#[must_use]
pub fn create_parenthesized(expression: Expression) -> Expression {
    Expression::Parenthesized(ParenthesizedExpression {
        id: NodeId::fresh(),
        expression: Box::new(expression),
    })
}

#[must_use]
pub fn create_prefix(operator: PrefixUnaryOperator, operand: Expression) -> Expression {
    Expression::PrefixUnary(PrefixUnaryExpression {
        id: NodeId::fresh(),
        operator,
        operand: Box::new(operand),
    })
}

#[must_use]
pub fn create_postfix(operand: Expression, operator: PostfixUnaryOperator) -> Expression {
    Expression::PostfixUnary(PostfixUnaryExpression {
        id: NodeId::fresh(),
        operand: Box::new(operand),
        operator,
    })
}

#[must_use]
pub fn create_conditional(
    condition: Expression,
    when_true: Expression,
    when_false: Expression,
) -> Expression {
    Expression::Conditional(ConditionalExpression {
        id: NodeId::fresh(),
        condition: Box::new(condition),
        when_true: Box::new(when_true),
        when_false: Box::new(when_false),
    })
}

#[must_use]
pub fn create_spread(expression: Expression) -> Expression {
    Expression::Spread(SpreadElement {
        id: NodeId::fresh(),
        expression: Box::new(expression),
    })
}

#[must_use]
pub fn create_object_literal(properties: Vec<ObjectLiteralElement>, multi_line: bool) -> Expression {
    Expression::ObjectLiteral(ObjectLiteralExpression {
        id: NodeId::fresh(),
        properties,
        multi_line,
    })
}

#[must_use]
pub fn create_property_assignment(name: PropertyName, initializer: Expression) -> ObjectLiteralElement {
    ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
        id: NodeId::fresh(),
        name,
        initializer,
    })
}

/// `name: initializer` with an identifier name.
#[must_use]
pub fn create_named_property(name: &str, initializer: Expression) -> ObjectLiteralElement {
    create_property_assignment(PropertyName::Identifier(create_identifier(name)), initializer)
}

/// `set name(parameter) { body }` inside an object literal.
#[must_use]
pub fn create_set_accessor(
    name: PropertyName,
    parameter: Identifier,
    body: Block,
) -> ObjectLiteralElement {
    ObjectLiteralElement::SetAccessor(Box::new(AccessorDeclaration {
        id: NodeId::fresh(),
        modifiers: ModifierFlags::empty(),
        name,
        parameters: vec![create_parameter(parameter)],
        body: Some(body),
    }))
}

#[must_use]
pub fn create_parameter(name: Identifier) -> ParameterDeclaration {
    ParameterDeclaration {
        id: NodeId::fresh(),
        dot_dot_dot: false,
        name: BindingName::Identifier(name),
        initializer: None,
    }
}

/// `function (params) { body }`
#[must_use]
pub fn create_function_expression(parameters: Vec<ParameterDeclaration>, body: Block) -> Expression {
    Expression::Function(Box::new(FunctionExpression {
        id: NodeId::fresh(),
        modifiers: ModifierFlags::empty(),
        asterisk: false,
        name: None,
        parameters,
        body,
    }))
}

/// `(params) => body`
#[must_use]
pub fn create_arrow_function(parameters: Vec<ParameterDeclaration>, body: ConciseBody) -> Expression {
    Expression::Arrow(Box::new(ArrowFunction {
        id: NodeId::fresh(),
        modifiers: ModifierFlags::empty(),
        parameters,
        body,
    }))
}

// =============================================================================
// Statements
// =============================================================================

#[must_use]
pub fn create_expression_statement(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement {
        id: NodeId::fresh(),
        expression,
    })
}

#[must_use]
pub fn create_block(statements: Vec<Statement>, multi_line: bool) -> Block {
    Block {
        id: NodeId::fresh(),
        statements,
        multi_line,
    }
}

#[must_use]
pub fn create_return(expression: Option<Expression>) -> Statement {
    Statement::Return(ReturnStatement {
        id: NodeId::fresh(),
        expression,
    })
}

#[must_use]
pub fn create_variable_declaration(
    name: BindingName,
    initializer: Option<Expression>,
) -> VariableDeclaration {
    VariableDeclaration {
        id: NodeId::fresh(),
        name,
        initializer,
    }
}

#[must_use]
pub fn create_variable_declaration_list(
    kind: VariableKind,
    declarations: Vec<VariableDeclaration>,
) -> VariableDeclarationList {
    VariableDeclarationList {
        id: NodeId::fresh(),
        kind,
        declarations,
    }
}

#[must_use]
pub fn create_variable_statement(
    modifiers: ModifierFlags,
    declaration_list: VariableDeclarationList,
) -> Statement {
    Statement::Variable(VariableStatement {
        id: NodeId::fresh(),
        modifiers,
        declaration_list,
    })
}

/// `kind name = initializer;`
#[must_use]
pub fn create_simple_variable_statement(
    kind: VariableKind,
    name: Identifier,
    initializer: Option<Expression>,
) -> Statement {
    create_variable_statement(
        ModifierFlags::empty(),
        create_variable_declaration_list(
            kind,
            vec![create_variable_declaration(
                BindingName::Identifier(name),
                initializer,
            )],
        ),
    )
}

/// `import { name as alias, ... } from "specifier";`
#[must_use]
pub fn create_named_import_declaration(
    specifiers: Vec<(Option<Identifier>, Identifier)>,
    specifier: Expression,
) -> Statement {
    let elements = specifiers
        .into_iter()
        .map(|(property_name, name)| ImportSpecifier {
            id: NodeId::fresh(),
            is_type_only: false,
            property_name: property_name.map(ModuleExportName::Identifier),
            name,
        })
        .collect();
    create_import_declaration(
        Some(NamedImportBindings::NamedImports(NamedImports {
            id: NodeId::fresh(),
            elements,
        })),
        specifier,
    )
}

/// `import * as name from "specifier";`
#[must_use]
pub fn create_namespace_import_declaration(name: Identifier, specifier: Expression) -> Statement {
    create_import_declaration(
        Some(NamedImportBindings::NamespaceImport(NamespaceImport {
            id: NodeId::fresh(),
            name,
        })),
        specifier,
    )
}

fn create_import_declaration(
    named_bindings: Option<NamedImportBindings>,
    module_specifier: Expression,
) -> Statement {
    Statement::Import(ImportDeclaration {
        id: NodeId::fresh(),
        modifiers: ModifierFlags::empty(),
        import_clause: Some(ImportClause {
            id: NodeId::fresh(),
            is_type_only: false,
            name: None,
            named_bindings,
        }),
        module_specifier,
    })
}

/// `export { name as alias, ... };`, or `export {};` for an empty list.
#[must_use]
pub fn create_named_export_declaration(
    specifiers: Vec<(Option<ModuleExportName>, ModuleExportName)>,
) -> Statement {
    let elements = specifiers
        .into_iter()
        .map(|(property_name, name)| ExportSpecifier {
            id: NodeId::fresh(),
            is_type_only: false,
            property_name,
            name,
        })
        .collect();
    Statement::Export(ExportDeclaration {
        id: NodeId::fresh(),
        modifiers: ModifierFlags::empty(),
        is_type_only: false,
        export_clause: Some(NamedExportBindings::NamedExports(NamedExports {
            id: NodeId::fresh(),
            elements,
        })),
        module_specifier: None,
    })
}
