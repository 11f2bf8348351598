//! Per-node binding dispatch: scopes for control flow, references in
//! expressions.

use tsz_ast::visit::{self, Visit};
use tsz_ast::{ClassElement, Expression, ObjectLiteralElement, Statement};

use crate::state::{BinderState, ContainerKind};
use crate::symbols::{Declaration, DeclarationKind, symbol_flags};

impl BinderState {
    pub(crate) fn bind_statement(&mut self, node: &Statement) {
        match node {
            Statement::Function(function) => {
                self.bind_function_like(None, &function.parameters, function.body.as_ref());
            }
            Statement::Class(class) => {
                self.bind_class_like(None, class.heritage.as_deref(), &class.members);
            }
            Statement::Import(_) => {}
            Statement::Export(export) => self.bind_export_declaration(export),
            Statement::For(stmt) => {
                self.enter_scope(ContainerKind::Block);
                if let Some(tsz_ast::statement::ForInitializer::VariableDeclarationList(list)) =
                    &stmt.initializer
                    && list.kind.is_block_scoped()
                {
                    self.declare_loop_variables(list);
                }
                visit::walk_statement(self, node);
                self.exit_scope();
            }
            Statement::ForInOrOf(stmt) => {
                self.enter_scope(ContainerKind::Block);
                if let tsz_ast::statement::ForInitializer::VariableDeclarationList(list) =
                    &stmt.initializer
                    && list.kind.is_block_scoped()
                {
                    self.declare_loop_variables(list);
                }
                visit::walk_statement(self, node);
                self.exit_scope();
            }
            Statement::Switch(stmt) => {
                self.visit_expression(&stmt.expression);
                self.enter_scope(ContainerKind::Block);
                for clause in &stmt.case_block.clauses {
                    self.declare_block_scoped(&clause.statements, false);
                }
                for clause in &stmt.case_block.clauses {
                    if let Some(expression) = &clause.expression {
                        self.visit_expression(expression);
                    }
                    visit::walk_statements(self, &clause.statements);
                }
                self.exit_scope();
            }
            Statement::Try(stmt) => {
                self.visit_block(&stmt.try_block);
                if let Some(catch_clause) = &stmt.catch_clause {
                    self.enter_scope(ContainerKind::Block);
                    if let Some(variable) = &catch_clause.variable {
                        let mut names = Vec::new();
                        Self::collect_binding_identifiers(variable, catch_clause.id, &mut names);
                        for (name, declaring_node) in names {
                            self.declare_symbol(
                                name,
                                symbol_flags::BLOCK_SCOPED_VARIABLE,
                                Some(Declaration {
                                    id: declaring_node,
                                    kind: DeclarationKind::CatchVariable,
                                }),
                            );
                        }
                        self.visit_binding_name(variable);
                    }
                    self.visit_block(&catch_clause.block);
                    self.exit_scope();
                }
                if let Some(finally_block) = &stmt.finally_block {
                    self.visit_block(finally_block);
                }
            }
            _ => visit::walk_statement(self, node),
        }
    }

    fn declare_loop_variables(&mut self, list: &tsz_ast::statement::VariableDeclarationList) {
        for declaration in &list.declarations {
            let mut names = Vec::new();
            Self::collect_binding_identifiers(&declaration.name, declaration.id, &mut names);
            for (name, declaring_node) in names {
                self.declare_symbol(
                    name,
                    symbol_flags::BLOCK_SCOPED_VARIABLE,
                    Some(Declaration {
                        id: declaring_node,
                        kind: DeclarationKind::Variable,
                    }),
                );
            }
        }
    }

    pub(crate) fn bind_expression(&mut self, node: &Expression) {
        match node {
            Expression::Identifier(ident) => self.bind_reference(ident),
            Expression::Function(function) => {
                let name = function.name.as_ref().map(|name| (name, function.id));
                self.bind_function_like(name, &function.parameters, Some(&function.body));
            }
            Expression::Arrow(arrow) => self.bind_arrow_function(&arrow.parameters, &arrow.body),
            Expression::Class(class) => {
                let name = class.name.as_ref().map(|name| (name, class.id));
                self.bind_class_like(name, class.heritage.as_deref(), &class.members);
            }
            _ => visit::walk_expression(self, node),
        }
    }

    pub(crate) fn bind_object_literal_element(&mut self, node: &ObjectLiteralElement) {
        match node {
            ObjectLiteralElement::ShorthandPropertyAssignment(shorthand) => {
                self.bind_reference(&shorthand.name);
                if let Some(initializer) = &shorthand.object_assignment_initializer {
                    self.visit_expression(initializer);
                }
            }
            ObjectLiteralElement::Method(method) => {
                self.visit_property_name(&method.name);
                self.bind_function_like(None, &method.parameters, method.body.as_ref());
            }
            ObjectLiteralElement::GetAccessor(accessor)
            | ObjectLiteralElement::SetAccessor(accessor) => {
                self.visit_property_name(&accessor.name);
                self.bind_function_like(None, &accessor.parameters, accessor.body.as_ref());
            }
            ObjectLiteralElement::PropertyAssignment(_)
            | ObjectLiteralElement::SpreadAssignment(_) => {
                visit::walk_object_literal_element(self, node);
            }
        }
    }

    pub(crate) fn bind_class_element(&mut self, node: &ClassElement) {
        match node {
            ClassElement::Method(method) => {
                self.visit_property_name(&method.name);
                self.bind_function_like(None, &method.parameters, method.body.as_ref());
            }
            ClassElement::Constructor(constructor) => {
                self.bind_function_like(None, &constructor.parameters, constructor.body.as_ref());
            }
            ClassElement::GetAccessor(accessor) | ClassElement::SetAccessor(accessor) => {
                self.visit_property_name(&accessor.name);
                self.bind_function_like(None, &accessor.parameters, accessor.body.as_ref());
            }
            ClassElement::StaticBlock(block) => {
                self.bind_function_like(None, &[], Some(&block.body));
            }
            ClassElement::Property(_) => visit::walk_class_element(self, node),
        }
    }
}
