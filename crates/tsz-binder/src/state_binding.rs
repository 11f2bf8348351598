//! Declaration binding: `var` hoisting, block-scoped declarations and
//! function-like containers.

use tsz_ast::expression::ConciseBody;
use tsz_ast::statement::{
    ArrayBindingElement, ForInitializer, ParameterDeclaration, VariableDeclarationList,
    VariableStatement,
};
use tsz_ast::visit::{self, Visit};
use tsz_ast::{BindingName, Block, Identifier, ModifierFlags, NodeId, Statement};

use crate::state::{BinderState, ContainerKind};
use crate::symbols::{Declaration, DeclarationKind, symbol_flags};

impl BinderState {
    /// Collect the identifiers a binding name declares, each paired with the
    /// node that declares it: the variable declaration itself for a plain
    /// name, the binding element for names inside a pattern.
    pub(crate) fn collect_binding_identifiers<'a>(
        name: &'a BindingName,
        declaration: NodeId,
        out: &mut Vec<(&'a Identifier, NodeId)>,
    ) {
        match name {
            BindingName::Identifier(ident) => out.push((ident, declaration)),
            BindingName::ObjectBindingPattern(pattern) => {
                for element in &pattern.elements {
                    Self::collect_binding_identifiers(&element.name, element.id, out);
                }
            }
            BindingName::ArrayBindingPattern(pattern) => {
                for element in &pattern.elements {
                    if let ArrayBindingElement::BindingElement(element) = element {
                        Self::collect_binding_identifiers(&element.name, element.id, out);
                    }
                }
            }
        }
    }

    fn declare_variable_list(&mut self, list: &VariableDeclarationList, exported: bool) {
        let flags = if list.kind.is_block_scoped() {
            symbol_flags::BLOCK_SCOPED_VARIABLE
        } else {
            symbol_flags::FUNCTION_SCOPED_VARIABLE
        };
        let export_container = if exported && self.is_top_level() {
            self.file_id
        } else {
            None
        };

        for declaration in &list.declarations {
            let mut names = Vec::new();
            Self::collect_binding_identifiers(&declaration.name, declaration.id, &mut names);
            for (name, declaring_node) in names {
                let sym_id = self.declare_symbol(
                    name,
                    flags,
                    Some(Declaration {
                        id: declaring_node,
                        kind: DeclarationKind::Variable,
                    }),
                );
                if let Some(container) = export_container
                    && let Some(sym) = self.symbols.get_mut(sym_id)
                {
                    sym.flags |= symbol_flags::EXPORT_VALUE;
                    sym.export_container = Some(container);
                }
            }
        }
    }

    /// Declare the `var` declarations of a function-scope body, looking
    /// through nested blocks and control flow but not into nested functions,
    /// plus the function declarations directly in `statements`.
    pub(crate) fn declare_hoisted(&mut self, statements: &[Statement]) {
        for statement in statements {
            if let Statement::Function(function) = statement
                && let Some(name) = &function.name
            {
                self.declare_symbol(
                    name,
                    symbol_flags::FUNCTION,
                    Some(Declaration {
                        id: function.id,
                        kind: DeclarationKind::Function,
                    }),
                );
            }
            self.declare_hoisted_vars(statement, true);
        }
    }

    fn declare_hoisted_vars(&mut self, statement: &Statement, direct: bool) {
        match statement {
            Statement::Variable(VariableStatement {
                modifiers,
                declaration_list,
                ..
            }) if !declaration_list.kind.is_block_scoped() => {
                let exported = direct && modifiers.contains(ModifierFlags::EXPORT);
                self.declare_variable_list(declaration_list, exported);
            }
            Statement::Block(block) => self.declare_hoisted_in_list(&block.statements),
            Statement::If(stmt) => {
                self.declare_hoisted_vars(&stmt.then_statement, false);
                if let Some(else_statement) = &stmt.else_statement {
                    self.declare_hoisted_vars(else_statement, false);
                }
            }
            Statement::For(stmt) => {
                if let Some(ForInitializer::VariableDeclarationList(list)) = &stmt.initializer
                    && !list.kind.is_block_scoped()
                {
                    self.declare_variable_list(list, false);
                }
                self.declare_hoisted_vars(&stmt.statement, false);
            }
            Statement::ForInOrOf(stmt) => {
                if let ForInitializer::VariableDeclarationList(list) = &stmt.initializer
                    && !list.kind.is_block_scoped()
                {
                    self.declare_variable_list(list, false);
                }
                self.declare_hoisted_vars(&stmt.statement, false);
            }
            Statement::While(stmt) => self.declare_hoisted_vars(&stmt.statement, false),
            Statement::Do(stmt) => self.declare_hoisted_vars(&stmt.statement, false),
            Statement::Labeled(stmt) => self.declare_hoisted_vars(&stmt.statement, false),
            Statement::With(stmt) => self.declare_hoisted_vars(&stmt.statement, false),
            Statement::Switch(stmt) => {
                for clause in &stmt.case_block.clauses {
                    self.declare_hoisted_in_list(&clause.statements);
                }
            }
            Statement::Try(stmt) => {
                self.declare_hoisted_in_list(&stmt.try_block.statements);
                if let Some(catch_clause) = &stmt.catch_clause {
                    self.declare_hoisted_in_list(&catch_clause.block.statements);
                }
                if let Some(finally_block) = &stmt.finally_block {
                    self.declare_hoisted_in_list(&finally_block.statements);
                }
            }
            _ => {}
        }
    }

    fn declare_hoisted_in_list(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.declare_hoisted_vars(statement, false);
        }
    }

    /// Declare the `let`/`const`/`class` declarations directly in
    /// `statements`, and function declarations unless the enclosing
    /// function scope already hoisted them.
    pub(crate) fn declare_block_scoped(&mut self, statements: &[Statement], functions_hoisted: bool) {
        for statement in statements {
            match statement {
                Statement::Variable(stmt) if stmt.declaration_list.kind.is_block_scoped() => {
                    let exported = stmt.modifiers.contains(ModifierFlags::EXPORT);
                    self.declare_variable_list(&stmt.declaration_list, exported);
                }
                Statement::Class(class) => {
                    if let Some(name) = &class.name {
                        self.declare_symbol(
                            name,
                            symbol_flags::CLASS,
                            Some(Declaration {
                                id: class.id,
                                kind: DeclarationKind::Class,
                            }),
                        );
                    }
                }
                Statement::Function(function) if !functions_hoisted => {
                    if let Some(name) = &function.name {
                        self.declare_symbol(
                            name,
                            symbol_flags::FUNCTION,
                            Some(Declaration {
                                id: function.id,
                                kind: DeclarationKind::Function,
                            }),
                        );
                    }
                }
                _ => {}
            }
        }
    }

    fn declare_parameters(&mut self, parameters: &[ParameterDeclaration]) {
        for parameter in parameters {
            let mut names = Vec::new();
            Self::collect_binding_identifiers(&parameter.name, parameter.id, &mut names);
            for (name, declaring_node) in names {
                self.declare_symbol(
                    name,
                    symbol_flags::PARAMETER,
                    Some(Declaration {
                        id: declaring_node,
                        kind: DeclarationKind::Parameter,
                    }),
                );
            }
        }
    }

    /// Bind a function-like node. `name` is the name of a function
    /// expression, visible only inside its own body.
    pub(crate) fn bind_function_like(
        &mut self,
        name: Option<(&Identifier, NodeId)>,
        parameters: &[ParameterDeclaration],
        body: Option<&Block>,
    ) {
        self.enter_scope(ContainerKind::Function);
        if let Some((name, id)) = name {
            self.declare_symbol(
                name,
                symbol_flags::FUNCTION,
                Some(Declaration {
                    id,
                    kind: DeclarationKind::Function,
                }),
            );
        }
        self.declare_parameters(parameters);
        if let Some(body) = body {
            self.declare_hoisted(&body.statements);
            self.declare_block_scoped(&body.statements, true);
        }

        for parameter in parameters {
            visit::walk_parameter(self, parameter);
        }
        if let Some(body) = body {
            visit::walk_block(self, body);
        }
        self.exit_scope();
    }

    pub(crate) fn bind_arrow_function(&mut self, parameters: &[ParameterDeclaration], body: &ConciseBody) {
        match body {
            ConciseBody::Block(block) => self.bind_function_like(None, parameters, Some(block)),
            ConciseBody::Expression(expression) => {
                self.enter_scope(ContainerKind::Function);
                self.declare_parameters(parameters);
                for parameter in parameters {
                    visit::walk_parameter(self, parameter);
                }
                self.visit_expression(expression);
                self.exit_scope();
            }
        }
    }

    /// Bind a class. `name` is the name of a class expression, visible only
    /// inside the class body.
    pub(crate) fn bind_class_like(
        &mut self,
        name: Option<(&Identifier, NodeId)>,
        heritage: Option<&tsz_ast::Expression>,
        members: &[tsz_ast::ClassElement],
    ) {
        if let Some(heritage) = heritage {
            self.visit_expression(heritage);
        }
        self.enter_scope(ContainerKind::Block);
        if let Some((name, id)) = name {
            self.declare_symbol(
                name,
                symbol_flags::CLASS,
                Some(Declaration {
                    id,
                    kind: DeclarationKind::Class,
                }),
            );
        }
        for member in members {
            self.visit_class_element(member);
        }
        self.exit_scope();
    }
}
