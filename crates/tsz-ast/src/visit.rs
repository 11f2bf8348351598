//! Read-only traversal.
//!
//! Implement the `visit_*` methods of interest and call the matching `walk_*`
//! function to continue into children. Every identifier in the tree, whether
//! a reference, a declaration name or a property name, reaches
//! [`Visit::visit_identifier`].

use crate::expression::{ConciseBody, Expression, ObjectLiteralElement, TemplateExpression};
use crate::node::{Identifier, ModuleExportName, PropertyName};
use crate::statement::{
    ArrayBindingElement, BindingName, Block, ClassElement, ForInitializer, ModuleReference,
    NamedExportBindings, NamedImportBindings, ParameterDeclaration, Statement,
    VariableDeclarationList,
};

pub trait Visit<'ast> {
    fn visit_statement(&mut self, node: &'ast Statement) {
        walk_statement(self, node);
    }

    fn visit_expression(&mut self, node: &'ast Expression) {
        walk_expression(self, node);
    }

    fn visit_identifier(&mut self, _node: &'ast Identifier) {}

    fn visit_block(&mut self, node: &'ast Block) {
        walk_block(self, node);
    }

    fn visit_binding_name(&mut self, node: &'ast BindingName) {
        walk_binding_name(self, node);
    }

    fn visit_property_name(&mut self, node: &'ast PropertyName) {
        walk_property_name(self, node);
    }

    fn visit_object_literal_element(&mut self, node: &'ast ObjectLiteralElement) {
        walk_object_literal_element(self, node);
    }

    fn visit_class_element(&mut self, node: &'ast ClassElement) {
        walk_class_element(self, node);
    }

    fn visit_parameter(&mut self, node: &'ast ParameterDeclaration) {
        walk_parameter(self, node);
    }
}

pub fn walk_statements<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, nodes: &'ast [Statement]) {
    for node in nodes {
        visitor.visit_statement(node);
    }
}

pub fn walk_block<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, node: &'ast Block) {
    walk_statements(visitor, &node.statements);
}

fn walk_module_export_name<'ast, V: Visit<'ast> + ?Sized>(
    visitor: &mut V,
    node: &'ast ModuleExportName,
) {
    if let ModuleExportName::Identifier(ident) = node {
        visitor.visit_identifier(ident);
    }
}

fn walk_variable_declaration_list<'ast, V: Visit<'ast> + ?Sized>(
    visitor: &mut V,
    node: &'ast VariableDeclarationList,
) {
    for declaration in &node.declarations {
        visitor.visit_binding_name(&declaration.name);
        if let Some(initializer) = &declaration.initializer {
            visitor.visit_expression(initializer);
        }
    }
}

fn walk_for_initializer<'ast, V: Visit<'ast> + ?Sized>(
    visitor: &mut V,
    node: &'ast ForInitializer,
) {
    match node {
        ForInitializer::VariableDeclarationList(list) => {
            walk_variable_declaration_list(visitor, list);
        }
        ForInitializer::Expression(expression) => visitor.visit_expression(expression),
    }
}

fn walk_function_like<'ast, V: Visit<'ast> + ?Sized>(
    visitor: &mut V,
    parameters: &'ast [ParameterDeclaration],
    body: Option<&'ast Block>,
) {
    for parameter in parameters {
        visitor.visit_parameter(parameter);
    }
    if let Some(body) = body {
        visitor.visit_block(body);
    }
}

fn walk_class_like<'ast, V: Visit<'ast> + ?Sized>(
    visitor: &mut V,
    name: Option<&'ast Identifier>,
    heritage: Option<&'ast Expression>,
    members: &'ast [ClassElement],
) {
    if let Some(name) = name {
        visitor.visit_identifier(name);
    }
    if let Some(heritage) = heritage {
        visitor.visit_expression(heritage);
    }
    for member in members {
        visitor.visit_class_element(member);
    }
}

pub fn walk_statement<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, node: &'ast Statement) {
    match node {
        Statement::Import(decl) => {
            if let Some(clause) = &decl.import_clause {
                if let Some(name) = &clause.name {
                    visitor.visit_identifier(name);
                }
                match &clause.named_bindings {
                    Some(NamedImportBindings::NamespaceImport(ns)) => {
                        visitor.visit_identifier(&ns.name);
                    }
                    Some(NamedImportBindings::NamedImports(named)) => {
                        for element in &named.elements {
                            if let Some(property_name) = &element.property_name {
                                walk_module_export_name(visitor, property_name);
                            }
                            visitor.visit_identifier(&element.name);
                        }
                    }
                    None => {}
                }
            }
            visitor.visit_expression(&decl.module_specifier);
        }
        Statement::ImportEquals(decl) => {
            visitor.visit_identifier(&decl.name);
            match &decl.module_reference {
                ModuleReference::External(reference) => {
                    visitor.visit_expression(&reference.expression);
                }
                ModuleReference::Entity(entity) => visitor.visit_expression(entity),
            }
        }
        Statement::Export(decl) => {
            match &decl.export_clause {
                Some(NamedExportBindings::NamespaceExport(ns)) => {
                    walk_module_export_name(visitor, &ns.name);
                }
                Some(NamedExportBindings::NamedExports(named)) => {
                    for element in &named.elements {
                        if let Some(property_name) = &element.property_name {
                            walk_module_export_name(visitor, property_name);
                        }
                        walk_module_export_name(visitor, &element.name);
                    }
                }
                None => {}
            }
            if let Some(specifier) = &decl.module_specifier {
                visitor.visit_expression(specifier);
            }
        }
        Statement::ExportAssignment(assignment) => visitor.visit_expression(&assignment.expression),
        Statement::Variable(stmt) => walk_variable_declaration_list(visitor, &stmt.declaration_list),
        Statement::Function(decl) => {
            if let Some(name) = &decl.name {
                visitor.visit_identifier(name);
            }
            walk_function_like(visitor, &decl.parameters, decl.body.as_ref());
        }
        Statement::Class(decl) => walk_class_like(
            visitor,
            decl.name.as_ref(),
            decl.heritage.as_deref(),
            &decl.members,
        ),
        Statement::Expression(stmt) => visitor.visit_expression(&stmt.expression),
        Statement::Block(block) => visitor.visit_block(block),
        Statement::Empty(_) | Statement::Debugger(_) => {}
        Statement::If(stmt) => {
            visitor.visit_expression(&stmt.expression);
            visitor.visit_statement(&stmt.then_statement);
            if let Some(else_statement) = &stmt.else_statement {
                visitor.visit_statement(else_statement);
            }
        }
        Statement::For(stmt) => {
            if let Some(initializer) = &stmt.initializer {
                walk_for_initializer(visitor, initializer);
            }
            if let Some(condition) = &stmt.condition {
                visitor.visit_expression(condition);
            }
            if let Some(incrementor) = &stmt.incrementor {
                visitor.visit_expression(incrementor);
            }
            visitor.visit_statement(&stmt.statement);
        }
        Statement::ForInOrOf(stmt) => {
            walk_for_initializer(visitor, &stmt.initializer);
            visitor.visit_expression(&stmt.expression);
            visitor.visit_statement(&stmt.statement);
        }
        Statement::While(stmt) => {
            visitor.visit_expression(&stmt.expression);
            visitor.visit_statement(&stmt.statement);
        }
        Statement::Do(stmt) => {
            visitor.visit_statement(&stmt.statement);
            visitor.visit_expression(&stmt.expression);
        }
        Statement::Labeled(stmt) => {
            visitor.visit_identifier(&stmt.label);
            visitor.visit_statement(&stmt.statement);
        }
        Statement::With(stmt) => {
            visitor.visit_expression(&stmt.expression);
            visitor.visit_statement(&stmt.statement);
        }
        Statement::Switch(stmt) => {
            visitor.visit_expression(&stmt.expression);
            for clause in &stmt.case_block.clauses {
                if let Some(expression) = &clause.expression {
                    visitor.visit_expression(expression);
                }
                walk_statements(visitor, &clause.statements);
            }
        }
        Statement::Try(stmt) => {
            visitor.visit_block(&stmt.try_block);
            if let Some(catch_clause) = &stmt.catch_clause {
                if let Some(variable) = &catch_clause.variable {
                    visitor.visit_binding_name(variable);
                }
                visitor.visit_block(&catch_clause.block);
            }
            if let Some(finally_block) = &stmt.finally_block {
                visitor.visit_block(finally_block);
            }
        }
        Statement::Return(stmt) => {
            if let Some(expression) = &stmt.expression {
                visitor.visit_expression(expression);
            }
        }
        Statement::Throw(stmt) => visitor.visit_expression(&stmt.expression),
        Statement::Break(stmt) | Statement::Continue(stmt) => {
            if let Some(label) = &stmt.label {
                visitor.visit_identifier(label);
            }
        }
    }
}

fn walk_template<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, node: &'ast TemplateExpression) {
    for span in &node.spans {
        visitor.visit_expression(&span.expression);
    }
}

pub fn walk_expression<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, node: &'ast Expression) {
    match node {
        Expression::Identifier(ident) => visitor.visit_identifier(ident),
        Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::RegularExpression(_)
        | Expression::Keyword(_)
        | Expression::Omitted(_) => {}
        Expression::Template(template) => walk_template(visitor, template),
        Expression::ArrayLiteral(array) => {
            for element in &array.elements {
                visitor.visit_expression(element);
            }
        }
        Expression::ObjectLiteral(object) => {
            for property in &object.properties {
                visitor.visit_object_literal_element(property);
            }
        }
        Expression::PropertyAccess(access) => {
            visitor.visit_expression(&access.expression);
            visitor.visit_identifier(&access.name);
        }
        Expression::ElementAccess(access) => {
            visitor.visit_expression(&access.expression);
            visitor.visit_expression(&access.argument);
        }
        Expression::Call(call) => {
            visitor.visit_expression(&call.expression);
            for argument in &call.arguments {
                visitor.visit_expression(argument);
            }
        }
        Expression::New(new) => {
            visitor.visit_expression(&new.expression);
            for argument in new.arguments.iter().flatten() {
                visitor.visit_expression(argument);
            }
        }
        Expression::TaggedTemplate(tagged) => {
            visitor.visit_expression(&tagged.tag);
            walk_template(visitor, &tagged.template);
        }
        Expression::Parenthesized(paren) => visitor.visit_expression(&paren.expression),
        Expression::Function(function) => {
            if let Some(name) = &function.name {
                visitor.visit_identifier(name);
            }
            walk_function_like(visitor, &function.parameters, Some(&function.body));
        }
        Expression::Arrow(arrow) => {
            for parameter in &arrow.parameters {
                visitor.visit_parameter(parameter);
            }
            match &arrow.body {
                ConciseBody::Block(block) => visitor.visit_block(block),
                ConciseBody::Expression(expression) => visitor.visit_expression(expression),
            }
        }
        Expression::Class(class) => walk_class_like(
            visitor,
            class.name.as_ref(),
            class.heritage.as_deref(),
            &class.members,
        ),
        Expression::PrefixUnary(unary) => visitor.visit_expression(&unary.operand),
        Expression::PostfixUnary(unary) => visitor.visit_expression(&unary.operand),
        Expression::Binary(binary) => {
            visitor.visit_expression(&binary.left);
            visitor.visit_expression(&binary.right);
        }
        Expression::Conditional(conditional) => {
            visitor.visit_expression(&conditional.condition);
            visitor.visit_expression(&conditional.when_true);
            visitor.visit_expression(&conditional.when_false);
        }
        Expression::Await(await_expr) => visitor.visit_expression(&await_expr.expression),
        Expression::Yield(yield_expr) => {
            if let Some(expression) = &yield_expr.expression {
                visitor.visit_expression(expression);
            }
        }
        Expression::Spread(spread) => visitor.visit_expression(&spread.expression),
        Expression::MetaProperty(meta) => visitor.visit_identifier(&meta.name),
    }
}

pub fn walk_binding_name<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, node: &'ast BindingName) {
    match node {
        BindingName::Identifier(ident) => visitor.visit_identifier(ident),
        BindingName::ObjectBindingPattern(pattern) => {
            for element in &pattern.elements {
                if let Some(property_name) = &element.property_name {
                    visitor.visit_property_name(property_name);
                }
                visitor.visit_binding_name(&element.name);
                if let Some(initializer) = &element.initializer {
                    visitor.visit_expression(initializer);
                }
            }
        }
        BindingName::ArrayBindingPattern(pattern) => {
            for element in &pattern.elements {
                if let ArrayBindingElement::BindingElement(element) = element {
                    visitor.visit_binding_name(&element.name);
                    if let Some(initializer) = &element.initializer {
                        visitor.visit_expression(initializer);
                    }
                }
            }
        }
    }
}

pub fn walk_property_name<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, node: &'ast PropertyName) {
    match node {
        PropertyName::Identifier(ident) => visitor.visit_identifier(ident),
        PropertyName::StringLiteral(_) | PropertyName::NumericLiteral(_) => {}
        PropertyName::Computed(computed) => visitor.visit_expression(&computed.expression),
    }
}

pub fn walk_object_literal_element<'ast, V: Visit<'ast> + ?Sized>(
    visitor: &mut V,
    node: &'ast ObjectLiteralElement,
) {
    match node {
        ObjectLiteralElement::PropertyAssignment(property) => {
            visitor.visit_property_name(&property.name);
            visitor.visit_expression(&property.initializer);
        }
        ObjectLiteralElement::ShorthandPropertyAssignment(shorthand) => {
            visitor.visit_identifier(&shorthand.name);
            if let Some(initializer) = &shorthand.object_assignment_initializer {
                visitor.visit_expression(initializer);
            }
        }
        ObjectLiteralElement::SpreadAssignment(spread) => {
            visitor.visit_expression(&spread.expression);
        }
        ObjectLiteralElement::Method(method) => {
            visitor.visit_property_name(&method.name);
            walk_function_like(visitor, &method.parameters, method.body.as_ref());
        }
        ObjectLiteralElement::GetAccessor(accessor) | ObjectLiteralElement::SetAccessor(accessor) => {
            visitor.visit_property_name(&accessor.name);
            walk_function_like(visitor, &accessor.parameters, accessor.body.as_ref());
        }
    }
}

pub fn walk_class_element<'ast, V: Visit<'ast> + ?Sized>(visitor: &mut V, node: &'ast ClassElement) {
    match node {
        ClassElement::Property(property) => {
            visitor.visit_property_name(&property.name);
            if let Some(initializer) = &property.initializer {
                visitor.visit_expression(initializer);
            }
        }
        ClassElement::Method(method) => {
            visitor.visit_property_name(&method.name);
            walk_function_like(visitor, &method.parameters, method.body.as_ref());
        }
        ClassElement::Constructor(constructor) => {
            walk_function_like(visitor, &constructor.parameters, constructor.body.as_ref());
        }
        ClassElement::GetAccessor(accessor) | ClassElement::SetAccessor(accessor) => {
            visitor.visit_property_name(&accessor.name);
            walk_function_like(visitor, &accessor.parameters, accessor.body.as_ref());
        }
        ClassElement::StaticBlock(block) => visitor.visit_block(&block.body),
    }
}

pub fn walk_parameter<'ast, V: Visit<'ast> + ?Sized>(
    visitor: &mut V,
    node: &'ast ParameterDeclaration,
) {
    visitor.visit_binding_name(&node.name);
    if let Some(initializer) = &node.initializer {
        visitor.visit_expression(initializer);
    }
}
