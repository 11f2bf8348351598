//! Owning, rebuilding traversal.
//!
//! A `Fold` consumes a node and returns its replacement. Statement folds
//! return a list so a single statement can expand into several (or vanish).
//! The `fold_*_children` functions rebuild a node from its folded children
//! and are what the default methods call.

use smallvec::{SmallVec, smallvec};

use crate::expression::{
    ArrowFunction, ConciseBody, Expression, ObjectLiteralElement, TaggedTemplateExpression,
    TemplateExpression,
};
use crate::factory;
use crate::node::PropertyName;
use crate::statement::{
    ArrayBindingElement, BindingElement, BindingName, Block, CaseOrDefaultClause, ClassElement,
    ForInitializer, ModuleReference, ParameterDeclaration, Statement, VariableDeclaration,
    VariableDeclarationList,
};

pub type Statements = SmallVec<[Statement; 1]>;

pub trait Fold {
    fn fold_statement(&mut self, node: Statement) -> Statements {
        smallvec![fold_statement_children(self, node)]
    }

    fn fold_expression(&mut self, node: Expression) -> Expression {
        fold_expression_children(self, node)
    }

    fn fold_block(&mut self, node: Block) -> Block {
        fold_block_children(self, node)
    }

    fn fold_binding_name(&mut self, node: BindingName) -> BindingName {
        fold_binding_name_children(self, node)
    }

    fn fold_property_name(&mut self, node: PropertyName) -> PropertyName {
        fold_property_name_children(self, node)
    }

    fn fold_object_literal_element(&mut self, node: ObjectLiteralElement) -> ObjectLiteralElement {
        fold_object_literal_element_children(self, node)
    }

    fn fold_class_element(&mut self, node: ClassElement) -> ClassElement {
        fold_class_element_children(self, node)
    }

    /// Parameters and body of a function-like node, folded together so an
    /// implementation can scope per-function state around both.
    fn fold_function_parts(
        &mut self,
        parameters: Vec<ParameterDeclaration>,
        body: Option<Block>,
    ) -> (Vec<ParameterDeclaration>, Option<Block>) {
        let parameters = fold_parameters(self, parameters);
        let body = body.map(|body| self.fold_block(body));
        (parameters, body)
    }

    fn fold_arrow_parts(
        &mut self,
        parameters: Vec<ParameterDeclaration>,
        body: ConciseBody,
    ) -> (Vec<ParameterDeclaration>, ConciseBody) {
        let parameters = fold_parameters(self, parameters);
        let body = match body {
            ConciseBody::Block(block) => ConciseBody::Block(self.fold_block(block)),
            ConciseBody::Expression(expression) => {
                ConciseBody::Expression(Box::new(self.fold_expression(*expression)))
            }
        };
        (parameters, body)
    }
}

pub fn fold_statements<F: Fold + ?Sized>(folder: &mut F, nodes: Vec<Statement>) -> Vec<Statement> {
    nodes
        .into_iter()
        .flat_map(|node| folder.fold_statement(node))
        .collect()
}

/// Fold the body of a control-flow statement, which must stay a single
/// statement: several results are wrapped in a block, none becomes `{}`.
pub fn fold_embedded_statement<F: Fold + ?Sized>(
    folder: &mut F,
    node: Box<Statement>,
) -> Box<Statement> {
    let mut folded = folder.fold_statement(*node);
    if folded.len() == 1
        && let Some(single) = folded.pop()
    {
        return Box::new(single);
    }
    Box::new(Statement::Block(factory::create_block(
        folded.into_vec(),
        true,
    )))
}

pub fn fold_block_children<F: Fold + ?Sized>(folder: &mut F, mut node: Block) -> Block {
    node.statements = fold_statements(folder, node.statements);
    node
}

pub fn fold_parameters<F: Fold + ?Sized>(
    folder: &mut F,
    nodes: Vec<ParameterDeclaration>,
) -> Vec<ParameterDeclaration> {
    nodes
        .into_iter()
        .map(|mut parameter| {
            parameter.name = folder.fold_binding_name(parameter.name);
            parameter.initializer = parameter
                .initializer
                .map(|initializer| folder.fold_expression(initializer));
            parameter
        })
        .collect()
}

pub fn fold_variable_declaration<F: Fold + ?Sized>(
    folder: &mut F,
    mut node: VariableDeclaration,
) -> VariableDeclaration {
    node.name = folder.fold_binding_name(node.name);
    node.initializer = node
        .initializer
        .map(|initializer| folder.fold_expression(initializer));
    node
}

pub fn fold_variable_declaration_list<F: Fold + ?Sized>(
    folder: &mut F,
    mut node: VariableDeclarationList,
) -> VariableDeclarationList {
    node.declarations = node
        .declarations
        .into_iter()
        .map(|declaration| fold_variable_declaration(folder, declaration))
        .collect();
    node
}

pub fn fold_for_initializer<F: Fold + ?Sized>(
    folder: &mut F,
    node: ForInitializer,
) -> ForInitializer {
    match node {
        ForInitializer::VariableDeclarationList(list) => {
            ForInitializer::VariableDeclarationList(fold_variable_declaration_list(folder, list))
        }
        ForInitializer::Expression(expression) => {
            ForInitializer::Expression(folder.fold_expression(expression))
        }
    }
}

fn fold_class_members<F: Fold + ?Sized>(
    folder: &mut F,
    members: Vec<ClassElement>,
) -> Vec<ClassElement> {
    members
        .into_iter()
        .map(|member| folder.fold_class_element(member))
        .collect()
}

fn fold_case_clause<F: Fold + ?Sized>(
    folder: &mut F,
    mut clause: CaseOrDefaultClause,
) -> CaseOrDefaultClause {
    clause.expression = clause
        .expression
        .map(|expression| folder.fold_expression(expression));
    clause.statements = fold_statements(folder, clause.statements);
    clause
}

pub fn fold_statement_children<F: Fold + ?Sized>(folder: &mut F, node: Statement) -> Statement {
    match node {
        Statement::Import(mut decl) => {
            decl.module_specifier = folder.fold_expression(decl.module_specifier);
            Statement::Import(decl)
        }
        Statement::ImportEquals(mut decl) => {
            decl.module_reference = match decl.module_reference {
                ModuleReference::External(mut reference) => {
                    reference.expression = folder.fold_expression(reference.expression);
                    ModuleReference::External(reference)
                }
                entity @ ModuleReference::Entity(_) => entity,
            };
            Statement::ImportEquals(decl)
        }
        Statement::Export(mut decl) => {
            decl.module_specifier = decl
                .module_specifier
                .map(|specifier| folder.fold_expression(specifier));
            Statement::Export(decl)
        }
        Statement::ExportAssignment(mut assignment) => {
            assignment.expression = folder.fold_expression(assignment.expression);
            Statement::ExportAssignment(assignment)
        }
        Statement::Variable(mut stmt) => {
            stmt.declaration_list = fold_variable_declaration_list(folder, stmt.declaration_list);
            Statement::Variable(stmt)
        }
        Statement::Function(mut decl) => {
            let parameters = std::mem::take(&mut decl.parameters);
            let body = decl.body.take();
            (decl.parameters, decl.body) = folder.fold_function_parts(parameters, body);
            Statement::Function(decl)
        }
        Statement::Class(mut decl) => {
            decl.heritage = decl
                .heritage
                .map(|heritage| Box::new(folder.fold_expression(*heritage)));
            decl.members = fold_class_members(folder, std::mem::take(&mut decl.members));
            Statement::Class(decl)
        }
        Statement::Expression(mut stmt) => {
            stmt.expression = folder.fold_expression(stmt.expression);
            Statement::Expression(stmt)
        }
        Statement::Block(block) => Statement::Block(folder.fold_block(block)),
        node @ (Statement::Empty(_)
        | Statement::Debugger(_)
        | Statement::Break(_)
        | Statement::Continue(_)) => node,
        Statement::If(mut stmt) => {
            stmt.expression = folder.fold_expression(stmt.expression);
            stmt.then_statement = fold_embedded_statement(folder, stmt.then_statement);
            stmt.else_statement = stmt
                .else_statement
                .map(|else_statement| fold_embedded_statement(folder, else_statement));
            Statement::If(stmt)
        }
        Statement::For(mut stmt) => {
            stmt.initializer = stmt
                .initializer
                .map(|initializer| fold_for_initializer(folder, initializer));
            stmt.condition = stmt
                .condition
                .map(|condition| folder.fold_expression(condition));
            stmt.incrementor = stmt
                .incrementor
                .map(|incrementor| folder.fold_expression(incrementor));
            stmt.statement = fold_embedded_statement(folder, stmt.statement);
            Statement::For(stmt)
        }
        Statement::ForInOrOf(mut stmt) => {
            stmt.initializer = fold_for_initializer(folder, stmt.initializer);
            stmt.expression = folder.fold_expression(stmt.expression);
            stmt.statement = fold_embedded_statement(folder, stmt.statement);
            Statement::ForInOrOf(stmt)
        }
        Statement::While(mut stmt) => {
            stmt.expression = folder.fold_expression(stmt.expression);
            stmt.statement = fold_embedded_statement(folder, stmt.statement);
            Statement::While(stmt)
        }
        Statement::Do(mut stmt) => {
            stmt.statement = fold_embedded_statement(folder, stmt.statement);
            stmt.expression = folder.fold_expression(stmt.expression);
            Statement::Do(stmt)
        }
        Statement::Labeled(mut stmt) => {
            stmt.statement = fold_embedded_statement(folder, stmt.statement);
            Statement::Labeled(stmt)
        }
        Statement::With(mut stmt) => {
            stmt.expression = folder.fold_expression(stmt.expression);
            stmt.statement = fold_embedded_statement(folder, stmt.statement);
            Statement::With(stmt)
        }
        Statement::Switch(mut stmt) => {
            stmt.expression = folder.fold_expression(stmt.expression);
            stmt.case_block.clauses = std::mem::take(&mut stmt.case_block.clauses)
                .into_iter()
                .map(|clause| fold_case_clause(folder, clause))
                .collect();
            Statement::Switch(stmt)
        }
        Statement::Try(mut stmt) => {
            stmt.try_block = folder.fold_block(stmt.try_block);
            stmt.catch_clause = stmt.catch_clause.map(|mut clause| {
                clause.variable = clause
                    .variable
                    .map(|variable| folder.fold_binding_name(variable));
                clause.block = folder.fold_block(clause.block);
                clause
            });
            stmt.finally_block = stmt.finally_block.map(|block| folder.fold_block(block));
            Statement::Try(stmt)
        }
        Statement::Return(mut stmt) => {
            stmt.expression = stmt
                .expression
                .map(|expression| folder.fold_expression(expression));
            Statement::Return(stmt)
        }
        Statement::Throw(mut stmt) => {
            stmt.expression = folder.fold_expression(stmt.expression);
            Statement::Throw(stmt)
        }
    }
}

fn fold_template<F: Fold + ?Sized>(folder: &mut F, mut node: TemplateExpression) -> TemplateExpression {
    for span in &mut node.spans {
        let expression = std::mem::replace(&mut span.expression, factory::create_void_zero());
        span.expression = folder.fold_expression(expression);
    }
    node
}

fn fold_boxed<F: Fold + ?Sized>(folder: &mut F, node: Box<Expression>) -> Box<Expression> {
    Box::new(folder.fold_expression(*node))
}

fn fold_expressions<F: Fold + ?Sized>(folder: &mut F, nodes: Vec<Expression>) -> Vec<Expression> {
    nodes
        .into_iter()
        .map(|node| folder.fold_expression(node))
        .collect()
}

pub fn fold_expression_children<F: Fold + ?Sized>(folder: &mut F, node: Expression) -> Expression {
    match node {
        node @ (Expression::Identifier(_)
        | Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::RegularExpression(_)
        | Expression::Keyword(_)
        | Expression::Omitted(_)
        | Expression::MetaProperty(_)) => node,
        Expression::Template(template) => {
            Expression::Template(Box::new(fold_template(folder, *template)))
        }
        Expression::ArrayLiteral(mut array) => {
            array.elements = fold_expressions(folder, array.elements);
            Expression::ArrayLiteral(array)
        }
        Expression::ObjectLiteral(mut object) => {
            object.properties = object
                .properties
                .into_iter()
                .map(|property| folder.fold_object_literal_element(property))
                .collect();
            Expression::ObjectLiteral(object)
        }
        Expression::PropertyAccess(mut access) => {
            access.expression = fold_boxed(folder, access.expression);
            Expression::PropertyAccess(access)
        }
        Expression::ElementAccess(mut access) => {
            access.expression = fold_boxed(folder, access.expression);
            access.argument = fold_boxed(folder, access.argument);
            Expression::ElementAccess(access)
        }
        Expression::Call(mut call) => {
            call.expression = fold_boxed(folder, call.expression);
            call.arguments = fold_expressions(folder, call.arguments);
            Expression::Call(call)
        }
        Expression::New(mut new) => {
            new.expression = fold_boxed(folder, new.expression);
            new.arguments = new
                .arguments
                .map(|arguments| fold_expressions(folder, arguments));
            Expression::New(new)
        }
        Expression::TaggedTemplate(tagged) => {
            let TaggedTemplateExpression { id, tag, template } = *tagged;
            Expression::TaggedTemplate(Box::new(TaggedTemplateExpression {
                id,
                tag: folder.fold_expression(tag),
                template: fold_template(folder, template),
            }))
        }
        Expression::Parenthesized(mut paren) => {
            paren.expression = fold_boxed(folder, paren.expression);
            Expression::Parenthesized(paren)
        }
        Expression::Function(mut function) => {
            let parameters = std::mem::take(&mut function.parameters);
            let body = std::mem::replace(&mut function.body, factory::create_block(Vec::new(), false));
            let (parameters, body) = folder.fold_function_parts(parameters, Some(body));
            function.parameters = parameters;
            if let Some(body) = body {
                function.body = body;
            }
            Expression::Function(function)
        }
        Expression::Arrow(arrow) => {
            let arrow = *arrow;
            let (parameters, body) = folder.fold_arrow_parts(arrow.parameters, arrow.body);
            Expression::Arrow(Box::new(ArrowFunction {
                parameters,
                body,
                ..arrow
            }))
        }
        Expression::Class(mut class) => {
            class.heritage = class.heritage.map(|heritage| fold_boxed(folder, heritage));
            class.members = fold_class_members(folder, std::mem::take(&mut class.members));
            Expression::Class(class)
        }
        Expression::PrefixUnary(mut unary) => {
            unary.operand = fold_boxed(folder, unary.operand);
            Expression::PrefixUnary(unary)
        }
        Expression::PostfixUnary(mut unary) => {
            unary.operand = fold_boxed(folder, unary.operand);
            Expression::PostfixUnary(unary)
        }
        Expression::Binary(mut binary) => {
            binary.left = fold_boxed(folder, binary.left);
            binary.right = fold_boxed(folder, binary.right);
            Expression::Binary(binary)
        }
        Expression::Conditional(mut conditional) => {
            conditional.condition = fold_boxed(folder, conditional.condition);
            conditional.when_true = fold_boxed(folder, conditional.when_true);
            conditional.when_false = fold_boxed(folder, conditional.when_false);
            Expression::Conditional(conditional)
        }
        Expression::Await(mut await_expr) => {
            await_expr.expression = fold_boxed(folder, await_expr.expression);
            Expression::Await(await_expr)
        }
        Expression::Yield(mut yield_expr) => {
            yield_expr.expression = yield_expr
                .expression
                .map(|expression| fold_boxed(folder, expression));
            Expression::Yield(yield_expr)
        }
        Expression::Spread(mut spread) => {
            spread.expression = fold_boxed(folder, spread.expression);
            Expression::Spread(spread)
        }
    }
}

fn fold_binding_element<F: Fold + ?Sized>(folder: &mut F, mut node: BindingElement) -> BindingElement {
    node.property_name = node
        .property_name
        .map(|property_name| folder.fold_property_name(property_name));
    node.name = folder.fold_binding_name(node.name);
    node.initializer = node
        .initializer
        .map(|initializer| folder.fold_expression(initializer));
    node
}

pub fn fold_binding_name_children<F: Fold + ?Sized>(folder: &mut F, node: BindingName) -> BindingName {
    match node {
        node @ BindingName::Identifier(_) => node,
        BindingName::ObjectBindingPattern(mut pattern) => {
            pattern.elements = pattern
                .elements
                .into_iter()
                .map(|element| fold_binding_element(folder, element))
                .collect();
            BindingName::ObjectBindingPattern(pattern)
        }
        BindingName::ArrayBindingPattern(mut pattern) => {
            pattern.elements = pattern
                .elements
                .into_iter()
                .map(|element| match element {
                    ArrayBindingElement::BindingElement(element) => {
                        ArrayBindingElement::BindingElement(fold_binding_element(folder, element))
                    }
                    omitted @ ArrayBindingElement::Omitted(_) => omitted,
                })
                .collect();
            BindingName::ArrayBindingPattern(pattern)
        }
    }
}

pub fn fold_property_name_children<F: Fold + ?Sized>(
    folder: &mut F,
    node: PropertyName,
) -> PropertyName {
    match node {
        PropertyName::Computed(mut computed) => {
            computed.expression = fold_boxed(folder, computed.expression);
            PropertyName::Computed(computed)
        }
        node => node,
    }
}

pub fn fold_object_literal_element_children<F: Fold + ?Sized>(
    folder: &mut F,
    node: ObjectLiteralElement,
) -> ObjectLiteralElement {
    match node {
        ObjectLiteralElement::PropertyAssignment(mut property) => {
            property.name = folder.fold_property_name(property.name);
            property.initializer = folder.fold_expression(property.initializer);
            ObjectLiteralElement::PropertyAssignment(property)
        }
        ObjectLiteralElement::ShorthandPropertyAssignment(mut shorthand) => {
            shorthand.object_assignment_initializer = shorthand
                .object_assignment_initializer
                .map(|initializer| fold_boxed(folder, initializer));
            ObjectLiteralElement::ShorthandPropertyAssignment(shorthand)
        }
        ObjectLiteralElement::SpreadAssignment(mut spread) => {
            spread.expression = folder.fold_expression(spread.expression);
            ObjectLiteralElement::SpreadAssignment(spread)
        }
        ObjectLiteralElement::Method(mut method) => {
            method.name = folder.fold_property_name(method.name);
            let parameters = std::mem::take(&mut method.parameters);
            let body = method.body.take();
            (method.parameters, method.body) = folder.fold_function_parts(parameters, body);
            ObjectLiteralElement::Method(method)
        }
        ObjectLiteralElement::GetAccessor(mut accessor) => {
            accessor.name = folder.fold_property_name(accessor.name);
            let parameters = std::mem::take(&mut accessor.parameters);
            let body = accessor.body.take();
            (accessor.parameters, accessor.body) = folder.fold_function_parts(parameters, body);
            ObjectLiteralElement::GetAccessor(accessor)
        }
        ObjectLiteralElement::SetAccessor(mut accessor) => {
            accessor.name = folder.fold_property_name(accessor.name);
            let parameters = std::mem::take(&mut accessor.parameters);
            let body = accessor.body.take();
            (accessor.parameters, accessor.body) = folder.fold_function_parts(parameters, body);
            ObjectLiteralElement::SetAccessor(accessor)
        }
    }
}

pub fn fold_class_element_children<F: Fold + ?Sized>(folder: &mut F, node: ClassElement) -> ClassElement {
    match node {
        ClassElement::Property(mut property) => {
            property.name = folder.fold_property_name(property.name);
            property.initializer = property
                .initializer
                .map(|initializer| folder.fold_expression(initializer));
            ClassElement::Property(property)
        }
        ClassElement::Method(mut method) => {
            method.name = folder.fold_property_name(method.name);
            (method.parameters, method.body) =
                folder.fold_function_parts(method.parameters, method.body);
            ClassElement::Method(method)
        }
        ClassElement::Constructor(mut constructor) => {
            (constructor.parameters, constructor.body) =
                folder.fold_function_parts(constructor.parameters, constructor.body);
            ClassElement::Constructor(constructor)
        }
        ClassElement::GetAccessor(mut accessor) => {
            accessor.name = folder.fold_property_name(accessor.name);
            (accessor.parameters, accessor.body) =
                folder.fold_function_parts(accessor.parameters, accessor.body);
            ClassElement::GetAccessor(accessor)
        }
        ClassElement::SetAccessor(mut accessor) => {
            accessor.name = folder.fold_property_name(accessor.name);
            (accessor.parameters, accessor.body) =
                folder.fold_function_parts(accessor.parameters, accessor.body);
            ClassElement::SetAccessor(accessor)
        }
        ClassElement::StaticBlock(mut block) => {
            block.body = folder.fold_block(block.body);
            ClassElement::StaticBlock(block)
        }
    }
}
