//! Expression rewriting: references to imports and exports, assignments to
//! exported bindings, and `import()`.
//!
//! Most expressions only need their children visited. The interesting cases
//! are the ones that write to a binding published on `exports`: every write
//! must also update the export, so `x = 1` becomes `exports.x = x = 1` and
//! `x++` becomes `exports.x = (x++, x)`. Whether a result is discarded
//! decides if a postfix update needs a temporary to preserve its value.

use std::mem;

use rustc_hash::FxHashSet;
use smallvec::smallvec;
use tsz_ast::expression::{
    BinaryExpression, CallExpression, ConciseBody, PostfixUnaryExpression, PrefixUnaryExpression,
    PrefixUnaryOperator, ShorthandPropertyAssignment, TaggedTemplateExpression,
    TemplateExpression,
};
use tsz_ast::factory;
use tsz_ast::fold::{
    Fold, Statements, fold_embedded_statement, fold_expression_children,
    fold_object_literal_element_children, fold_statement_children, fold_variable_declaration_list,
};
use tsz_ast::statement::ForInitializer;
use tsz_ast::{
    BinaryOperator, Expression, Identifier, ModuleExportName, ObjectLiteralElement, PropertyName,
    Statement,
};
use tsz_binder::ImportBindingKind;
use tsz_common::{ModuleKind, ScriptTarget};

use super::ModuleTransform;
use crate::emit_flags::EmitFlags;
use crate::transforms::module_utils::{
    is_identifier_text, is_simple_inlineable_expression, rewrite_or_shim_module_specifier,
};

impl Fold for ModuleTransform<'_> {
    fn fold_statement(&mut self, node: Statement) -> Statements {
        match node {
            Statement::Expression(mut stmt) => {
                stmt.expression = self.visit_expression(stmt.expression, true);
                smallvec![Statement::Expression(stmt)]
            }
            Statement::For(mut stmt) => {
                stmt.initializer = stmt.initializer.map(|initializer| match initializer {
                    ForInitializer::Expression(expression) => {
                        ForInitializer::Expression(self.visit_expression(expression, true))
                    }
                    ForInitializer::VariableDeclarationList(list) => {
                        ForInitializer::VariableDeclarationList(fold_variable_declaration_list(
                            self, list,
                        ))
                    }
                });
                stmt.condition = stmt
                    .condition
                    .map(|condition| self.visit_expression(condition, false));
                stmt.incrementor = stmt
                    .incrementor
                    .map(|incrementor| self.visit_expression(incrementor, true));
                stmt.statement = fold_embedded_statement(self, stmt.statement);
                smallvec![Statement::For(stmt)]
            }
            node => smallvec![fold_statement_children(self, node)],
        }
    }

    fn fold_expression(&mut self, node: Expression) -> Expression {
        self.visit_expression(node, false)
    }

    fn fold_object_literal_element(&mut self, node: ObjectLiteralElement) -> ObjectLiteralElement {
        match node {
            ObjectLiteralElement::ShorthandPropertyAssignment(shorthand) => {
                self.visit_shorthand_property_assignment(shorthand)
            }
            node => fold_object_literal_element_children(self, node),
        }
    }
}

impl ModuleTransform<'_> {
    pub(super) fn visit_expression(&mut self, node: Expression, discarded: bool) -> Expression {
        match node {
            Expression::Identifier(ident) => self.visit_expression_identifier(ident),
            Expression::Binary(binary) => self.visit_binary_expression(binary, discarded),
            Expression::PrefixUnary(unary) => self.visit_prefix_unary_expression(unary),
            Expression::PostfixUnary(unary) => {
                self.visit_postfix_unary_expression(unary, discarded)
            }
            Expression::Parenthesized(mut paren) => {
                paren.expression = Box::new(self.visit_expression(*paren.expression, discarded));
                Expression::Parenthesized(paren)
            }
            Expression::Call(call) => self.visit_call_expression(call),
            Expression::TaggedTemplate(tagged) => self.visit_tagged_template_expression(*tagged),
            node => fold_expression_children(self, node),
        }
    }

    /// A reference as seen from CommonJS output.
    ///
    /// ```text
    /// export var a;             a      ->  exports.a
    /// import d from "m";        d      ->  m_1.default
    /// import { x } from "m";    x      ->  m_1.x
    /// ```
    pub(super) fn visit_expression_identifier(&mut self, ident: Identifier) -> Expression {
        if (ident.is_generated() && !ident.is_file_level_generated())
            || self
                .ctx
                .has_emit_flags(ident.id, EmitFlags::HELPER_NAME | EmitFlags::LOCAL_NAME)
        {
            return Expression::Identifier(ident);
        }
        if self.resolver.referenced_export_container(ident.id).is_some() {
            return factory::create_property_access(
                factory::create_identifier_expression("exports"),
                ident,
            );
        }
        let Some(binding) = self.resolver.referenced_import_declaration(ident.id) else {
            return Expression::Identifier(ident);
        };
        match binding.kind {
            ImportBindingKind::Default => {
                let module = Expression::Identifier(self.module_name(binding.import_declaration));
                factory::create_property_access(module, factory::create_identifier("default"))
            }
            ImportBindingKind::Named { name } => {
                let module = Expression::Identifier(self.module_name(binding.import_declaration));
                if is_identifier_text(&name) {
                    factory::create_property_access(module, factory::create_identifier(name))
                } else {
                    factory::create_element_access(module, factory::create_string_literal(name))
                }
            }
            // Bound directly by the rewritten import.
            ImportBindingKind::Namespace | ImportBindingKind::ImportEquals => {
                Expression::Identifier(ident)
            }
        }
    }

    /// Identifiers whose writes may need to update `exports`.
    fn is_rewritable_target(&self, ident: &Identifier) -> bool {
        (!ident.is_generated() || ident.is_file_level_generated())
            && !self.ctx.has_emit_flags(ident.id, EmitFlags::LOCAL_NAME)
    }

    /// Names `ident` is exported under, through its declaration or, for a
    /// file-level generated name, through `export { ... }` specifiers.
    fn get_exports(&self, ident: &Identifier) -> Vec<ModuleExportName> {
        if ident.is_generated() {
            if !ident.is_file_level_generated() {
                return Vec::new();
            }
            return self
                .info
                .export_specifiers_of(&ident.text)
                .iter()
                .map(|specifier| specifier.name.clone())
                .collect();
        }
        if let Some(binding) = self.resolver.referenced_import_declaration(ident.id) {
            return self.info.exported_bindings_of(binding.declaration).to_vec();
        }
        let mut seen = FxHashSet::default();
        let mut names = Vec::new();
        for declaration in self.resolver.referenced_value_declarations(ident.id) {
            for name in self.info.exported_bindings_of(declaration.id) {
                if seen.insert(name.id()) {
                    names.push(name.clone());
                }
            }
        }
        names
    }

    // =========================================================================
    // Assignments and updates
    // =========================================================================

    fn visit_binary_expression(&mut self, mut binary: BinaryExpression, discarded: bool) -> Expression {
        let operator = binary.operator;
        if operator == BinaryOperator::Equals
            && matches!(*binary.left, Expression::ObjectLiteral(_) | Expression::ArrayLiteral(_))
        {
            binary.left = Box::new(self.visit_assignment_pattern(*binary.left));
            binary.right = Box::new(self.visit_expression(*binary.right, false));
            return Expression::Binary(binary);
        }
        if operator.is_assignment() {
            let exports = match &*binary.left {
                Expression::Identifier(target) if self.is_rewritable_target(target) => {
                    self.get_exports(target)
                }
                _ => Vec::new(),
            };
            let mut expression = fold_expression_children(self, Expression::Binary(binary));
            for name in &exports {
                expression = self.create_export_expression(name, expression, false);
            }
            return expression;
        }
        if operator == BinaryOperator::Comma {
            binary.left = Box::new(self.visit_expression(*binary.left, true));
            binary.right = Box::new(self.visit_expression(*binary.right, discarded));
            return Expression::Binary(binary);
        }
        fold_expression_children(self, Expression::Binary(binary))
    }

    /// `++x` on an exported `x` becomes `exports.x = ++x`.
    fn visit_prefix_unary_expression(&mut self, mut unary: PrefixUnaryExpression) -> Expression {
        if unary.operator == PrefixUnaryOperator::Void {
            unary.operand = Box::new(self.visit_expression(*unary.operand, true));
            return Expression::PrefixUnary(unary);
        }
        let exports = match &*unary.operand {
            Expression::Identifier(operand)
                if unary.operator.is_update() && self.is_rewritable_target(operand) =>
            {
                self.get_exports(operand)
            }
            _ => Vec::new(),
        };
        let mut expression = fold_expression_children(self, Expression::PrefixUnary(unary));
        for name in &exports {
            expression = self.create_export_expression(name, expression, false);
        }
        expression
    }

    /// `x++` on an exported `x` becomes `exports.x = (x++, x)`. When the
    /// result is used, the old value is kept in a temporary:
    /// `(exports.x = (_a = x++, x), _a)`.
    fn visit_postfix_unary_expression(
        &mut self,
        unary: PostfixUnaryExpression,
        discarded: bool,
    ) -> Expression {
        let exports = match &*unary.operand {
            Expression::Identifier(operand) if self.is_rewritable_target(operand) => {
                self.get_exports(operand)
            }
            _ => Vec::new(),
        };
        if exports.is_empty() {
            return fold_expression_children(self, Expression::PostfixUnary(unary));
        }
        let operand = (*unary.operand).clone();
        let mut expression = fold_expression_children(self, Expression::PostfixUnary(unary));
        let mut temp = None;
        if !discarded {
            let name = self.ctx.new_temp_name();
            self.ctx.add_variable_declaration(name.clone());
            expression = factory::create_assignment(Expression::Identifier(name.clone()), expression);
            temp = Some(name);
        }
        expression = factory::create_comma(expression, operand);
        for name in &exports {
            expression = self.create_export_expression(name, expression, false);
        }
        if let Some(temp) = temp {
            expression = factory::create_comma(expression, Expression::Identifier(temp));
        }
        expression
    }

    // =========================================================================
    // Destructuring assignment targets
    // =========================================================================

    /// The left side of `({ a, b: [c] } = value)`, with every target that is
    /// an exported binding redirected so the export is updated too.
    fn visit_assignment_pattern(&mut self, node: Expression) -> Expression {
        match node {
            Expression::ObjectLiteral(mut object) => {
                object.properties = mem::take(&mut object.properties)
                    .into_iter()
                    .map(|property| self.visit_assignment_property(property))
                    .collect();
                Expression::ObjectLiteral(object)
            }
            Expression::ArrayLiteral(mut array) => {
                array.elements = mem::take(&mut array.elements)
                    .into_iter()
                    .map(|element| self.visit_assignment_pattern(element))
                    .collect();
                Expression::ArrayLiteral(array)
            }
            Expression::Spread(mut spread) => {
                spread.expression = Box::new(self.visit_destructuring_target(*spread.expression));
                Expression::Spread(spread)
            }
            node => self.visit_assignment_element(node),
        }
    }

    fn visit_assignment_property(&mut self, property: ObjectLiteralElement) -> ObjectLiteralElement {
        match property {
            ObjectLiteralElement::PropertyAssignment(mut assignment) => {
                assignment.name = self.fold_property_name(assignment.name);
                assignment.initializer = self.visit_assignment_pattern(assignment.initializer);
                ObjectLiteralElement::PropertyAssignment(assignment)
            }
            ObjectLiteralElement::ShorthandPropertyAssignment(shorthand) => {
                self.visit_shorthand_assignment_property(shorthand)
            }
            ObjectLiteralElement::SpreadAssignment(mut spread) => {
                spread.expression = self.visit_destructuring_target(spread.expression);
                ObjectLiteralElement::SpreadAssignment(spread)
            }
            property => fold_object_literal_element_children(self, property),
        }
    }

    /// `{ x } = o` with `x` exported becomes `{ x: <setter target> } = o`.
    fn visit_shorthand_assignment_property(
        &mut self,
        mut shorthand: ShorthandPropertyAssignment,
    ) -> ObjectLiteralElement {
        let target = self.visit_destructuring_target_leaf(Expression::Identifier(shorthand.name.clone()));
        let initializer = shorthand
            .object_assignment_initializer
            .take()
            .map(|initializer| self.visit_expression(*initializer, false));
        match target {
            Expression::Identifier(name) => {
                shorthand.name = name;
                shorthand.object_assignment_initializer = initializer.map(Box::new);
                ObjectLiteralElement::ShorthandPropertyAssignment(shorthand)
            }
            target => {
                let value = match initializer {
                    Some(initializer) => factory::create_assignment(target, initializer),
                    None => target,
                };
                factory::create_property_assignment(PropertyName::Identifier(shorthand.name), value)
            }
        }
    }

    /// An element of an assignment pattern, possibly with a default.
    fn visit_assignment_element(&mut self, node: Expression) -> Expression {
        match node {
            Expression::Binary(mut binary) if binary.operator == BinaryOperator::Equals => {
                binary.left = Box::new(self.visit_destructuring_target(*binary.left));
                binary.right = Box::new(self.visit_expression(*binary.right, false));
                Expression::Binary(binary)
            }
            node => self.visit_destructuring_target_leaf(node),
        }
    }

    pub(super) fn visit_destructuring_target(&mut self, node: Expression) -> Expression {
        match node {
            Expression::ObjectLiteral(_) | Expression::ArrayLiteral(_) => {
                self.visit_assignment_pattern(node)
            }
            node => self.visit_destructuring_target_leaf(node),
        }
    }

    /// A single assignment target. An exported binding cannot appear in a
    /// pattern as-is since its export would go stale, so it becomes the
    /// `value` property of an object whose setter writes both:
    ///
    /// ```text
    /// ({ x } = o)  ->  ({ x: { set value(value) { exports.x = x = value; } }.value } = o)
    /// ```
    fn visit_destructuring_target_leaf(&mut self, node: Expression) -> Expression {
        let Expression::Identifier(ident) = node else {
            return self.visit_expression(node, false);
        };
        if !self.is_rewritable_target(&ident) {
            return self.visit_expression(Expression::Identifier(ident), false);
        }
        let exports = self.get_exports(&ident);
        let mut expression = self.visit_expression_identifier(ident);
        if exports.is_empty() {
            return expression;
        }
        let value = self.ctx.new_unique_name("value", true);
        expression = factory::create_assignment(expression, Expression::Identifier(value.clone()));
        for name in &exports {
            expression = self.create_export_expression(name, expression, false);
        }
        let setter = factory::create_set_accessor(
            PropertyName::Identifier(factory::create_identifier("value")),
            value,
            factory::create_block(vec![factory::create_expression_statement(expression)], false),
        );
        factory::create_property_access(
            factory::create_object_literal(vec![setter], false),
            factory::create_identifier("value"),
        )
    }

    /// `{ x }` where `x` is an import becomes `{ x: m_1.x }`.
    fn visit_shorthand_property_assignment(
        &mut self,
        mut shorthand: ShorthandPropertyAssignment,
    ) -> ObjectLiteralElement {
        let initializer = shorthand
            .object_assignment_initializer
            .take()
            .map(|initializer| self.visit_expression(*initializer, false));
        match self.visit_expression_identifier(shorthand.name.clone()) {
            Expression::Identifier(_) => {
                shorthand.object_assignment_initializer = initializer.map(Box::new);
                ObjectLiteralElement::ShorthandPropertyAssignment(shorthand)
            }
            target => {
                let value = match initializer {
                    Some(initializer) => factory::create_assignment(target, initializer),
                    None => target,
                };
                factory::create_property_assignment(PropertyName::Identifier(shorthand.name), value)
            }
        }
    }

    // =========================================================================
    // Calls
    // =========================================================================

    fn visit_call_expression(&mut self, mut call: CallExpression) -> Expression {
        let needs_rewrite = self.options.rewrite_relative_import_extensions()
            && ((call.is_import_call() && !call.arguments.is_empty())
                || (self.is_js && call.is_require_call()));
        if call.is_import_call() && self.transform_import_calls {
            return self.visit_import_call_expression(call, needs_rewrite);
        }
        if needs_rewrite {
            call.expression = Box::new(self.visit_expression(*call.expression, false));
            let mut arguments = mem::take(&mut call.arguments).into_iter();
            // The specifier is rewritten as written, without visiting it.
            if let Some(first) = arguments.next() {
                call.arguments.push(self.rewrite_or_shim_specifier(first));
            }
            for argument in arguments {
                call.arguments.push(self.visit_expression(argument, false));
            }
            return Expression::Call(call);
        }
        if let Expression::Identifier(callee) = &*call.expression
            && !callee.is_generated()
            && !self.ctx.has_emit_flags(callee.id, EmitFlags::HELPER_NAME)
        {
            // import { f } from "m"; f();  ->  (0, m_1.f)();
            let callee = self.visit_expression(*call.expression, false);
            let indirect = !matches!(callee, Expression::Identifier(_));
            call.expression = Box::new(callee);
            call.arguments = mem::take(&mut call.arguments)
                .into_iter()
                .map(|argument| self.visit_expression(argument, false))
                .collect();
            if indirect {
                self.ctx.add_emit_flags(call.id, EmitFlags::INDIRECT_CALL);
            }
            return Expression::Call(call);
        }
        fold_expression_children(self, Expression::Call(call))
    }

    fn visit_tagged_template_expression(&mut self, mut tagged: TaggedTemplateExpression) -> Expression {
        let mut indirect = false;
        if let Expression::Identifier(tag) = &tagged.tag
            && !tag.is_generated()
            && !self.ctx.has_emit_flags(tag.id, EmitFlags::HELPER_NAME)
        {
            let tag = self.visit_expression(tagged.tag, false);
            indirect = !matches!(tag, Expression::Identifier(_));
            tagged.tag = tag;
        } else {
            tagged.tag = self.visit_expression(tagged.tag, false);
        }
        tagged.template = self.visit_template(tagged.template);
        if indirect {
            self.ctx.add_emit_flags(tagged.id, EmitFlags::INDIRECT_CALL);
        }
        Expression::TaggedTemplate(Box::new(tagged))
    }

    fn visit_template(&mut self, mut template: TemplateExpression) -> TemplateExpression {
        for span in &mut template.spans {
            let expression = mem::replace(&mut span.expression, factory::create_void_zero());
            span.expression = self.visit_expression(expression, false);
        }
        template
    }

    /// A relative `.ts` specifier literal is rewritten in place; anything
    /// computed goes through `__rewriteRelativeImportExtension` at runtime.
    fn rewrite_or_shim_specifier(&mut self, specifier: Expression) -> Expression {
        rewrite_or_shim_module_specifier(self.ctx, specifier, self.options)
    }

    /// `import(x)` as a promise of `require(x)`.
    fn visit_import_call_expression(&mut self, call: CallExpression, needs_rewrite: bool) -> Expression {
        if self.options.emit_module_kind() == ModuleKind::None
            && self.options.emit_script_target() >= ScriptTarget::ES2020
        {
            return fold_expression_children(self, Expression::Call(call));
        }
        let argument = call
            .arguments
            .into_iter()
            .next()
            .map(|argument| self.visit_expression(argument, false))
            .map(|argument| {
                if needs_rewrite {
                    self.rewrite_or_shim_specifier(argument)
                } else {
                    argument
                }
            });
        self.create_import_call_expression(argument)
    }

    /// ```text
    /// import("./m")  ->  Promise.resolve().then(() => require("./m"))
    /// import(name)   ->  Promise.resolve(`${name}`).then((s) => require(s))
    /// ```
    ///
    /// A computed specifier is stringified before the promise is created so
    /// it is evaluated at the call site; a literal stays inside `require` to
    /// remain statically analyzable.
    fn create_import_call_expression(&mut self, argument: Option<Expression>) -> Expression {
        let needs_sync_eval = argument
            .as_ref()
            .is_some_and(|argument| !is_simple_inlineable_expression(argument));

        let (resolve_arguments, require_arguments, parameters) = match argument {
            Some(argument) if needs_sync_eval => {
                let name = factory::create_identifier("s");
                (
                    vec![factory::create_template("", vec![(argument, String::new())])],
                    vec![Expression::Identifier(name.clone())],
                    vec![factory::create_parameter(name)],
                )
            }
            Some(argument) => (Vec::new(), vec![argument], Vec::new()),
            None => (Vec::new(), Vec::new(), Vec::new()),
        };

        let promise_resolve = factory::create_call(
            factory::create_property_access(
                factory::create_identifier_expression("Promise"),
                factory::create_identifier("resolve"),
            ),
            resolve_arguments,
        );
        let mut require =
            factory::create_call(factory::create_identifier_expression("require"), require_arguments);
        if self.options.es_module_interop() {
            require = self.ctx.create_import_star_helper(require);
        }
        let callback = factory::create_arrow_function(
            parameters,
            ConciseBody::Expression(Box::new(require)),
        );
        factory::create_call(
            factory::create_property_access(promise_resolve, factory::create_identifier("then")),
            vec![callback],
        )
    }
}
