use tsz_ast::statement::{
    ArrayBindingElement, BindingElement, CaseOrDefaultClause, ExportDeclaration, ForInOrOfKind,
    ForInitializer, ImportDeclaration, ImportEqualsDeclaration, ModuleReference,
    NamedExportBindings, NamedImportBindings, ParameterDeclaration, VariableDeclarationList,
};
use tsz_ast::{BindingName, Block, ClassElement, Expression, ModifierFlags, Statement};

use super::Printer;

impl Printer<'_> {
    // =========================================================================
    // Statements
    // =========================================================================

    /// Write one statement and end its line.
    pub(super) fn emit_statement(&mut self, statement: &Statement) {
        self.emit_statement_inline(statement);
        self.write_line();
    }

    /// Write one statement without a trailing newline, so single-line
    /// blocks can place several on a line.
    fn emit_statement_inline(&mut self, statement: &Statement) {
        match statement {
            Statement::Import(decl) => self.emit_import_declaration(decl),
            Statement::ImportEquals(decl) => self.emit_import_equals_declaration(decl),
            Statement::Export(decl) => self.emit_export_declaration(decl),
            Statement::ExportAssignment(assignment) => {
                self.write(if assignment.is_export_equals {
                    "export = "
                } else {
                    "export default "
                });
                self.emit_expression_at_assignment(&assignment.expression);
                self.write(";");
            }
            Statement::Variable(stmt) => {
                self.emit_modifiers(stmt.modifiers);
                self.emit_variable_declaration_list(&stmt.declaration_list);
                self.write(";");
            }
            Statement::Function(decl) => {
                self.emit_modifiers(decl.modifiers);
                self.write(if decl.asterisk { "function* " } else { "function " });
                if let Some(name) = &decl.name {
                    self.emit_identifier(name);
                }
                self.emit_parameters(&decl.parameters);
                match &decl.body {
                    Some(body) => {
                        self.write_space();
                        self.emit_function_body(body);
                    }
                    None => self.write(";"),
                }
            }
            Statement::Class(decl) => {
                self.emit_modifiers(decl.modifiers);
                self.write("class");
                if let Some(name) = &decl.name {
                    self.write_space();
                    self.emit_identifier(name);
                }
                self.emit_class_tail(decl.heritage.as_deref(), &decl.members);
            }
            Statement::Expression(stmt) => {
                if Self::starts_with_brace_or_declaration_keyword(&stmt.expression) {
                    self.write("(");
                    self.emit_expression(&stmt.expression);
                    self.write(")");
                } else {
                    self.emit_expression(&stmt.expression);
                }
                self.write(";");
            }
            Statement::Block(block) => self.emit_block(block),
            Statement::Empty(_) => self.write(";"),
            Statement::If(stmt) => {
                self.write("if (");
                self.emit_expression(&stmt.expression);
                self.write(")");
                self.emit_embedded_statement(&stmt.then_statement);
                if let Some(else_statement) = &stmt.else_statement {
                    self.write_line();
                    self.write("else");
                    if matches!(**else_statement, Statement::If(_)) {
                        self.write_space();
                        self.emit_statement_inline(else_statement);
                    } else {
                        self.emit_embedded_statement(else_statement);
                    }
                }
            }
            Statement::For(stmt) => {
                self.write("for (");
                if let Some(initializer) = &stmt.initializer {
                    self.emit_for_initializer(initializer);
                }
                self.write(";");
                if let Some(condition) = &stmt.condition {
                    self.write_space();
                    self.emit_expression(condition);
                }
                self.write(";");
                if let Some(incrementor) = &stmt.incrementor {
                    self.write_space();
                    self.emit_expression(incrementor);
                }
                self.write(")");
                self.emit_embedded_statement(&stmt.statement);
            }
            Statement::ForInOrOf(stmt) => {
                self.write(match stmt.loop_kind {
                    ForInOrOfKind::AwaitOf => "for await (",
                    ForInOrOfKind::In | ForInOrOfKind::Of => "for (",
                });
                self.emit_for_initializer(&stmt.initializer);
                self.write(match stmt.loop_kind {
                    ForInOrOfKind::In => " in ",
                    ForInOrOfKind::Of | ForInOrOfKind::AwaitOf => " of ",
                });
                self.emit_expression_at_assignment(&stmt.expression);
                self.write(")");
                self.emit_embedded_statement(&stmt.statement);
            }
            Statement::While(stmt) => {
                self.write("while (");
                self.emit_expression(&stmt.expression);
                self.write(")");
                self.emit_embedded_statement(&stmt.statement);
            }
            Statement::Do(stmt) => {
                self.write("do");
                self.emit_embedded_statement(&stmt.statement);
                if matches!(*stmt.statement, Statement::Block(_)) {
                    self.write_space();
                } else {
                    self.write_line();
                }
                self.write("while (");
                self.emit_expression(&stmt.expression);
                self.write(");");
            }
            Statement::Labeled(stmt) => {
                self.emit_identifier(&stmt.label);
                self.write(": ");
                self.emit_statement_inline(&stmt.statement);
            }
            Statement::With(stmt) => {
                self.write("with (");
                self.emit_expression(&stmt.expression);
                self.write(")");
                self.emit_embedded_statement(&stmt.statement);
            }
            Statement::Switch(stmt) => {
                self.write("switch (");
                self.emit_expression(&stmt.expression);
                self.write(") {");
                self.write_line();
                self.increase_indent();
                for clause in &stmt.case_block.clauses {
                    self.emit_case_clause(clause);
                }
                self.decrease_indent();
                self.write("}");
            }
            Statement::Try(stmt) => {
                self.write("try ");
                self.emit_block(&stmt.try_block);
                if let Some(catch_clause) = &stmt.catch_clause {
                    self.write_line();
                    self.write("catch ");
                    if let Some(variable) = &catch_clause.variable {
                        self.write("(");
                        self.emit_binding_name(variable);
                        self.write(") ");
                    }
                    self.emit_block(&catch_clause.block);
                }
                if let Some(finally_block) = &stmt.finally_block {
                    self.write_line();
                    self.write("finally ");
                    self.emit_block(finally_block);
                }
            }
            Statement::Return(stmt) => {
                self.write("return");
                if let Some(expression) = &stmt.expression {
                    self.write_space();
                    self.emit_expression(expression);
                }
                self.write(";");
            }
            Statement::Throw(stmt) => {
                self.write("throw ");
                self.emit_expression(&stmt.expression);
                self.write(";");
            }
            Statement::Break(stmt) | Statement::Continue(stmt) => {
                self.write(if matches!(statement, Statement::Break(_)) {
                    "break"
                } else {
                    "continue"
                });
                if let Some(label) = &stmt.label {
                    self.write_space();
                    self.emit_identifier(label);
                }
                self.write(";");
            }
            Statement::Debugger(_) => self.write("debugger;"),
        }
    }

    /// Body of `if`, loops and `with`: blocks stay on the header line,
    /// anything else goes on its own indented line.
    fn emit_embedded_statement(&mut self, statement: &Statement) {
        if let Statement::Block(block) = statement {
            self.write_space();
            self.emit_block(block);
        } else {
            self.write_line();
            self.increase_indent();
            self.emit_statement_inline(statement);
            self.decrease_indent();
        }
    }

    pub(super) fn emit_block(&mut self, block: &Block) {
        if !block.multi_line {
            self.write("{");
            for statement in &block.statements {
                self.write_space();
                self.emit_statement_inline(statement);
            }
            self.write(" }");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_statement_list(&block.statements);
        self.decrease_indent();
        self.write("}");
    }

    /// Empty function bodies print as `{ }`.
    pub(super) fn emit_function_body(&mut self, body: &Block) {
        if body.statements.is_empty() {
            self.write("{ }");
        } else {
            self.emit_block(body);
        }
    }

    fn emit_case_clause(&mut self, clause: &CaseOrDefaultClause) {
        match &clause.expression {
            Some(expression) => {
                self.write("case ");
                self.emit_expression(expression);
                self.write(":");
            }
            None => self.write("default:"),
        }
        if let [Statement::Block(block)] = clause.statements.as_slice() {
            self.write_space();
            self.emit_block(block);
            self.write_line();
            return;
        }
        self.write_line();
        self.increase_indent();
        self.emit_statement_list(&clause.statements);
        self.decrease_indent();
    }

    fn emit_for_initializer(&mut self, initializer: &ForInitializer) {
        match initializer {
            ForInitializer::VariableDeclarationList(list) => {
                self.emit_variable_declaration_list(list);
            }
            ForInitializer::Expression(expression) => self.emit_expression(expression),
        }
    }

    pub(super) fn emit_modifiers(&mut self, modifiers: ModifierFlags) {
        if modifiers.contains(ModifierFlags::EXPORT) {
            self.write("export ");
        }
        if modifiers.contains(ModifierFlags::DEFAULT) {
            self.write("default ");
        }
        if modifiers.contains(ModifierFlags::DECLARE) {
            self.write("declare ");
        }
        if modifiers.contains(ModifierFlags::STATIC) {
            self.write("static ");
        }
        if modifiers.contains(ModifierFlags::ASYNC) {
            self.write("async ");
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub(super) fn emit_variable_declaration_list(&mut self, list: &VariableDeclarationList) {
        self.write(list.kind.text());
        self.write_space();
        for (index, declaration) in list.declarations.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            self.emit_binding_name(&declaration.name);
            if let Some(initializer) = &declaration.initializer {
                self.write(" = ");
                self.emit_expression_at_assignment(initializer);
            }
        }
    }

    pub(super) fn emit_binding_name(&mut self, name: &BindingName) {
        match name {
            BindingName::Identifier(ident) => self.emit_identifier(ident),
            BindingName::ObjectBindingPattern(pattern) => {
                if pattern.elements.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (index, element) in pattern.elements.iter().enumerate() {
                    if index > 0 {
                        self.write(", ");
                    }
                    self.emit_binding_element(element);
                }
                self.write(" }");
            }
            BindingName::ArrayBindingPattern(pattern) => {
                self.write("[");
                for (index, element) in pattern.elements.iter().enumerate() {
                    if index > 0 {
                        self.write(", ");
                    }
                    match element {
                        ArrayBindingElement::Omitted(_) => {}
                        ArrayBindingElement::BindingElement(element) => {
                            self.emit_binding_element(element);
                        }
                    }
                }
                self.write("]");
            }
        }
    }

    fn emit_binding_element(&mut self, element: &BindingElement) {
        if element.dot_dot_dot {
            self.write("...");
        }
        if let Some(property_name) = &element.property_name {
            self.emit_property_name(property_name);
            self.write(": ");
        }
        self.emit_binding_name(&element.name);
        if let Some(initializer) = &element.initializer {
            self.write(" = ");
            self.emit_expression_at_assignment(initializer);
        }
    }

    pub(super) fn emit_parameters(&mut self, parameters: &[ParameterDeclaration]) {
        self.write("(");
        for (index, parameter) in parameters.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            if parameter.dot_dot_dot {
                self.write("...");
            }
            self.emit_binding_name(&parameter.name);
            if let Some(initializer) = &parameter.initializer {
                self.write(" = ");
                self.emit_expression_at_assignment(initializer);
            }
        }
        self.write(")");
    }

    pub(super) fn emit_class_tail(
        &mut self,
        heritage: Option<&Expression>,
        members: &[ClassElement],
    ) {
        if let Some(heritage) = heritage {
            self.write(" extends ");
            self.emit_heritage(heritage);
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();
        for member in members {
            self.emit_class_element(member);
            self.write_line();
        }
        self.decrease_indent();
        self.write("}");
    }

    fn emit_class_element(&mut self, member: &ClassElement) {
        match member {
            ClassElement::Property(property) => {
                self.emit_modifiers(property.modifiers);
                self.emit_property_name(&property.name);
                if let Some(initializer) = &property.initializer {
                    self.write(" = ");
                    self.emit_expression_at_assignment(initializer);
                }
                self.write(";");
            }
            ClassElement::Method(method) => {
                self.emit_modifiers(method.modifiers);
                if method.asterisk {
                    self.write("*");
                }
                self.emit_property_name(&method.name);
                self.emit_parameters(&method.parameters);
                self.emit_optional_body(method.body.as_ref());
            }
            ClassElement::Constructor(constructor) => {
                self.write("constructor");
                self.emit_parameters(&constructor.parameters);
                self.emit_optional_body(constructor.body.as_ref());
            }
            ClassElement::GetAccessor(accessor) | ClassElement::SetAccessor(accessor) => {
                self.emit_modifiers(accessor.modifiers);
                self.write(if matches!(member, ClassElement::GetAccessor(_)) {
                    "get "
                } else {
                    "set "
                });
                self.emit_property_name(&accessor.name);
                self.emit_parameters(&accessor.parameters);
                self.emit_optional_body(accessor.body.as_ref());
            }
            ClassElement::StaticBlock(block) => {
                self.write("static ");
                self.emit_function_body(&block.body);
            }
        }
    }

    pub(super) fn emit_optional_body(&mut self, body: Option<&Block>) {
        match body {
            Some(body) => {
                self.write_space();
                self.emit_function_body(body);
            }
            None => self.write(";"),
        }
    }

    // =========================================================================
    // Module syntax
    // =========================================================================

    fn emit_import_declaration(&mut self, decl: &ImportDeclaration) {
        self.write("import ");
        if let Some(clause) = &decl.import_clause {
            if clause.is_type_only {
                self.write("type ");
            }
            if let Some(name) = &clause.name {
                self.emit_identifier(name);
                if clause.named_bindings.is_some() {
                    self.write(", ");
                }
            }
            match &clause.named_bindings {
                Some(NamedImportBindings::NamespaceImport(namespace)) => {
                    self.write("* as ");
                    self.emit_identifier(&namespace.name);
                }
                Some(NamedImportBindings::NamedImports(named)) => {
                    self.write("{");
                    for (index, element) in named.elements.iter().enumerate() {
                        self.write(if index > 0 { ", " } else { " " });
                        if element.is_type_only {
                            self.write("type ");
                        }
                        if let Some(property_name) = &element.property_name {
                            self.emit_module_export_name(property_name);
                            self.write(" as ");
                        }
                        self.emit_identifier(&element.name);
                    }
                    self.write(if named.elements.is_empty() { "}" } else { " }" });
                }
                None => {}
            }
            self.write(" from ");
        }
        self.emit_expression(&decl.module_specifier);
        self.write(";");
    }

    fn emit_import_equals_declaration(&mut self, decl: &ImportEqualsDeclaration) {
        self.emit_modifiers(decl.modifiers);
        self.write("import ");
        self.emit_identifier(&decl.name);
        self.write(" = ");
        match &decl.module_reference {
            ModuleReference::External(reference) => {
                self.write("require(");
                self.emit_expression(&reference.expression);
                self.write(")");
            }
            ModuleReference::Entity(entity) => self.emit_expression(entity),
        }
        self.write(";");
    }

    fn emit_export_declaration(&mut self, decl: &ExportDeclaration) {
        self.write("export ");
        if decl.is_type_only {
            self.write("type ");
        }
        match &decl.export_clause {
            None => self.write("*"),
            Some(NamedExportBindings::NamespaceExport(namespace)) => {
                self.write("* as ");
                self.emit_module_export_name(&namespace.name);
            }
            Some(NamedExportBindings::NamedExports(named)) => {
                self.write("{");
                for (index, element) in named.elements.iter().enumerate() {
                    self.write(if index > 0 { ", " } else { " " });
                    if element.is_type_only {
                        self.write("type ");
                    }
                    if let Some(property_name) = &element.property_name {
                        self.emit_module_export_name(property_name);
                        self.write(" as ");
                    }
                    self.emit_module_export_name(&element.name);
                }
                self.write(if named.elements.is_empty() { "}" } else { " }" });
            }
        }
        if let Some(specifier) = &decl.module_specifier {
            self.write(" from ");
            self.emit_expression(specifier);
        }
        self.write(";");
    }
}
