use tsz_ast::expression::{
    ConciseBody, MetaPropertyKeyword, OperatorPrecedence, PrefixUnaryOperator, TemplateExpression,
};
use tsz_ast::{
    BinaryOperator, Expression, Identifier, ModuleExportName, ObjectLiteralElement, PropertyName,
    StringLiteral,
};

use super::Printer;
use crate::emit_flags::EmitFlags;

impl Printer<'_> {
    // =========================================================================
    // Expressions
    // =========================================================================

    /// Write `expression` in a position that accepts any expression.
    pub(super) fn emit_expression(&mut self, expression: &Expression) {
        self.emit_expression_at(expression, OperatorPrecedence::Comma);
    }

    /// Initializers, arguments and other positions that exclude the comma
    /// operator.
    pub(super) fn emit_expression_at_assignment(&mut self, expression: &Expression) {
        self.emit_expression_at(expression, OperatorPrecedence::Assignment);
    }

    /// Write `expression`, parenthesized when it binds looser than `minimum`.
    fn emit_expression_at(&mut self, expression: &Expression, minimum: OperatorPrecedence) {
        if expression_precedence(expression) < minimum {
            self.write("(");
            self.emit_expression_no_parens(expression);
            self.write(")");
        } else {
            self.emit_expression_no_parens(expression);
        }
    }

    fn emit_expression_no_parens(&mut self, expression: &Expression) {
        match expression {
            Expression::Identifier(ident) => self.emit_identifier(ident),
            Expression::StringLiteral(lit) => self.emit_string_literal(lit),
            Expression::NumericLiteral(lit) => self.write(&lit.text),
            Expression::RegularExpression(regex) => self.write(&regex.text),
            Expression::Template(template) => self.emit_template(template),
            Expression::Keyword(keyword) => self.write(keyword.keyword.text()),
            Expression::ArrayLiteral(array) => {
                self.emit_list_literal("[", &array.elements, array.multi_line, "]");
            }
            Expression::ObjectLiteral(object) => {
                self.emit_object_literal(&object.properties, object.multi_line);
            }
            Expression::PropertyAccess(access) => {
                self.emit_access_target(&access.expression);
                self.write(if access.question_dot { "?." } else { "." });
                self.emit_identifier(&access.name);
            }
            Expression::ElementAccess(access) => {
                self.emit_access_target(&access.expression);
                self.write(if access.question_dot { "?.[" } else { "[" });
                self.emit_expression(&access.argument);
                self.write("]");
            }
            Expression::Call(call) => {
                self.emit_callee(&call.expression, call.id);
                if call.question_dot {
                    self.write("?.");
                }
                self.emit_arguments(&call.arguments);
            }
            Expression::New(new) => {
                self.write("new ");
                self.emit_expression_at(&new.expression, OperatorPrecedence::Member);
                if let Some(arguments) = &new.arguments {
                    self.emit_arguments(arguments);
                }
            }
            Expression::TaggedTemplate(tagged) => {
                self.emit_callee(&tagged.tag, tagged.id);
                self.emit_template(&tagged.template);
            }
            Expression::Parenthesized(paren) => {
                self.write("(");
                self.emit_expression(&paren.expression);
                self.write(")");
            }
            Expression::Function(function) => {
                self.emit_modifiers(function.modifiers);
                self.write(if function.asterisk { "function*" } else { "function" });
                match &function.name {
                    Some(name) => {
                        self.write_space();
                        self.emit_identifier(name);
                    }
                    None => self.write_space(),
                }
                self.emit_parameters(&function.parameters);
                self.write_space();
                self.emit_function_body(&function.body);
            }
            Expression::Arrow(arrow) => {
                self.emit_modifiers(arrow.modifiers);
                match arrow.parameters.as_slice() {
                    [parameter]
                        if !parameter.dot_dot_dot
                            && parameter.initializer.is_none()
                            && parameter.name.as_identifier().is_some() =>
                    {
                        self.emit_binding_name(&parameter.name);
                    }
                    parameters => self.emit_parameters(parameters),
                }
                self.write(" => ");
                match &arrow.body {
                    ConciseBody::Block(block) => self.emit_function_body(block),
                    ConciseBody::Expression(body) => {
                        if starts_with_brace(body) {
                            self.write("(");
                            self.emit_expression(body);
                            self.write(")");
                        } else {
                            self.emit_expression_at_assignment(body);
                        }
                    }
                }
            }
            Expression::Class(class) => {
                self.write("class");
                if let Some(name) = &class.name {
                    self.write_space();
                    self.emit_identifier(name);
                }
                self.emit_class_tail(class.heritage.as_deref(), &class.members);
            }
            Expression::PrefixUnary(unary) => {
                self.write(unary.operator.text());
                if unary.operator.is_keyword() || needs_space_between(unary.operator, &unary.operand)
                {
                    self.write_space();
                }
                self.emit_expression_at(&unary.operand, OperatorPrecedence::Unary);
            }
            Expression::PostfixUnary(unary) => {
                self.emit_expression_at(&unary.operand, OperatorPrecedence::LeftHandSide);
                self.write(unary.operator.text());
            }
            Expression::Binary(binary) => {
                let precedence = binary.operator.precedence();
                self.emit_binary_operand(&binary.left, binary.operator, precedence, true);
                if binary.operator == BinaryOperator::Comma {
                    self.write(", ");
                } else {
                    self.write_space();
                    self.write(binary.operator.text());
                    self.write_space();
                }
                self.emit_binary_operand(&binary.right, binary.operator, precedence, false);
            }
            Expression::Conditional(conditional) => {
                self.emit_expression_at(&conditional.condition, OperatorPrecedence::Coalesce);
                self.write(" ? ");
                self.emit_expression_at_assignment(&conditional.when_true);
                self.write(" : ");
                self.emit_expression_at_assignment(&conditional.when_false);
            }
            Expression::Await(await_expr) => {
                self.write("await ");
                self.emit_expression_at(&await_expr.expression, OperatorPrecedence::Unary);
            }
            Expression::Yield(yield_expr) => {
                self.write(if yield_expr.asterisk { "yield*" } else { "yield" });
                if let Some(expression) = &yield_expr.expression {
                    self.write_space();
                    self.emit_expression_at_assignment(expression);
                }
            }
            Expression::Spread(spread) => {
                self.write("...");
                self.emit_expression_at_assignment(&spread.expression);
            }
            Expression::Omitted(_) => {}
            Expression::MetaProperty(meta) => {
                self.write(match meta.keyword {
                    MetaPropertyKeyword::New => "new.",
                    MetaPropertyKeyword::Import => "import.",
                });
                self.emit_identifier(&meta.name);
            }
        }
    }

    fn emit_binary_operand(
        &mut self,
        operand: &Expression,
        operator: BinaryOperator,
        precedence: OperatorPrecedence,
        is_left: bool,
    ) {
        let operand_precedence = expression_precedence(operand);
        let needs_parens = match operand_precedence.cmp(&precedence) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Greater => mixes_coalesce_with_logical(operator, operand),
            std::cmp::Ordering::Equal => {
                let same_operator = matches!(
                    operand,
                    Expression::Binary(inner) if inner.operator == operator
                );
                if operator.is_right_associative() {
                    is_left
                } else if is_left {
                    mixes_coalesce_with_logical(operator, operand)
                } else {
                    !(operator.is_associative() && same_operator)
                }
            }
        };
        if needs_parens {
            self.write("(");
            self.emit_expression_no_parens(operand);
            self.write(")");
        } else {
            self.emit_expression_no_parens(operand);
        }
    }

    /// The object of `.name` / `[index]`.
    fn emit_access_target(&mut self, target: &Expression) {
        let needs_parens = expression_precedence(target) < OperatorPrecedence::LeftHandSide
            || matches!(target, Expression::New(new) if new.arguments.is_none())
            || matches!(target, Expression::NumericLiteral(lit) if is_plain_integer(&lit.text));
        if needs_parens {
            self.write("(");
            self.emit_expression_no_parens(target);
            self.write(")");
        } else {
            self.emit_expression_no_parens(target);
        }
    }

    /// The callee of a call or tag of a tagged template; `(0, callee)` when
    /// the call was marked indirect.
    fn emit_callee(&mut self, callee: &Expression, call: tsz_ast::NodeId) {
        if self.has_flags(call, EmitFlags::INDIRECT_CALL) {
            self.write("(0, ");
            self.emit_expression_at_assignment(callee);
            self.write(")");
        } else {
            self.emit_access_target(callee);
        }
    }

    pub(super) fn emit_heritage(&mut self, heritage: &Expression) {
        self.emit_expression_at(heritage, OperatorPrecedence::LeftHandSide);
    }

    fn emit_arguments(&mut self, arguments: &[Expression]) {
        self.emit_list_literal("(", arguments, false, ")");
    }

    fn emit_list_literal(
        &mut self,
        open: &str,
        elements: &[Expression],
        multi_line: bool,
        close: &str,
    ) {
        self.write(open);
        if multi_line && !elements.is_empty() {
            self.write_line();
            self.increase_indent();
            for (index, element) in elements.iter().enumerate() {
                self.emit_expression_at(element, OperatorPrecedence::Spread);
                if index + 1 < elements.len() {
                    self.write(",");
                }
                self.write_line();
            }
            self.decrease_indent();
        } else {
            for (index, element) in elements.iter().enumerate() {
                if index > 0 {
                    self.write(", ");
                }
                self.emit_expression_at(element, OperatorPrecedence::Spread);
            }
        }
        self.write(close);
    }

    fn emit_object_literal(&mut self, properties: &[ObjectLiteralElement], multi_line: bool) {
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        if multi_line {
            self.write("{");
            self.write_line();
            self.increase_indent();
            for (index, property) in properties.iter().enumerate() {
                self.emit_object_literal_element(property);
                if index + 1 < properties.len() {
                    self.write(",");
                }
                self.write_line();
            }
            self.decrease_indent();
            self.write("}");
        } else {
            self.write("{ ");
            for (index, property) in properties.iter().enumerate() {
                if index > 0 {
                    self.write(", ");
                }
                self.emit_object_literal_element(property);
            }
            self.write(" }");
        }
    }

    fn emit_object_literal_element(&mut self, property: &ObjectLiteralElement) {
        match property {
            ObjectLiteralElement::PropertyAssignment(assignment) => {
                self.emit_property_name(&assignment.name);
                self.write(": ");
                self.emit_expression_at_assignment(&assignment.initializer);
            }
            ObjectLiteralElement::ShorthandPropertyAssignment(shorthand) => {
                self.emit_identifier(&shorthand.name);
                if let Some(initializer) = &shorthand.object_assignment_initializer {
                    self.write(" = ");
                    self.emit_expression_at_assignment(initializer);
                }
            }
            ObjectLiteralElement::SpreadAssignment(spread) => {
                self.write("...");
                self.emit_expression_at_assignment(&spread.expression);
            }
            ObjectLiteralElement::Method(method) => {
                self.emit_modifiers(method.modifiers);
                if method.asterisk {
                    self.write("*");
                }
                self.emit_property_name(&method.name);
                self.emit_parameters(&method.parameters);
                self.emit_optional_body(method.body.as_ref());
            }
            ObjectLiteralElement::GetAccessor(accessor)
            | ObjectLiteralElement::SetAccessor(accessor) => {
                self.write(if matches!(property, ObjectLiteralElement::GetAccessor(_)) {
                    "get "
                } else {
                    "set "
                });
                self.emit_property_name(&accessor.name);
                self.emit_parameters(&accessor.parameters);
                self.emit_optional_body(accessor.body.as_ref());
            }
        }
    }

    fn emit_template(&mut self, template: &TemplateExpression) {
        self.write("`");
        self.write(&template.head);
        for span in &template.spans {
            self.write("${");
            self.emit_expression(&span.expression);
            self.write("}");
            self.write(&span.literal);
        }
        self.write("`");
    }

    // =========================================================================
    // Names and literals
    // =========================================================================

    /// Helper names resolve to `tslib_1.__name` when helpers are imported,
    /// or to the local alias chosen for the file.
    pub(super) fn emit_identifier(&mut self, ident: &Identifier) {
        if self.has_flags(ident.id, EmitFlags::HELPER_NAME) {
            if let Some(module_name) = self.ctx.external_helpers_module_name(self.file) {
                let text = format!("{}.{}", module_name.text, ident.text);
                self.write(&text);
                return;
            }
            if let Some(alias) = self.ctx.helper_alias(self.file, &ident.text) {
                let alias = alias.to_string();
                self.write(&alias);
                return;
            }
        }
        self.write(&ident.text);
    }

    pub(super) fn emit_property_name(&mut self, name: &PropertyName) {
        match name {
            PropertyName::Identifier(ident) => self.emit_identifier(ident),
            PropertyName::StringLiteral(lit) => self.emit_string_literal(lit),
            PropertyName::NumericLiteral(lit) => self.write(&lit.text),
            PropertyName::Computed(computed) => {
                self.write("[");
                self.emit_expression_at_assignment(&computed.expression);
                self.write("]");
            }
        }
    }

    pub(super) fn emit_module_export_name(&mut self, name: &ModuleExportName) {
        match name {
            ModuleExportName::Identifier(ident) => self.emit_identifier(ident),
            ModuleExportName::StringLiteral(lit) => self.emit_string_literal(lit),
        }
    }

    fn emit_string_literal(&mut self, lit: &StringLiteral) {
        let quote = if lit.single_quote { '\'' } else { '"' };
        let text = escape_string(&lit.text, quote);
        self.write(&text);
    }

    /// Expression statements may not begin with `{`, `function` or `class`.
    pub(super) fn starts_with_brace_or_declaration_keyword(expression: &Expression) -> bool {
        matches!(
            leftmost_expression(expression),
            Expression::ObjectLiteral(_) | Expression::Function(_) | Expression::Class(_)
        )
    }
}

fn starts_with_brace(expression: &Expression) -> bool {
    matches!(leftmost_expression(expression), Expression::ObjectLiteral(_))
}

/// The expression whose first token starts `expression` when printed
/// without added parentheses.
fn leftmost_expression(expression: &Expression) -> &Expression {
    let mut current = expression;
    loop {
        current = match current {
            Expression::Binary(binary) => &binary.left,
            Expression::Call(call) => &call.expression,
            Expression::PropertyAccess(access) => &access.expression,
            Expression::ElementAccess(access) => &access.expression,
            Expression::TaggedTemplate(tagged) => &tagged.tag,
            Expression::PostfixUnary(unary) => &unary.operand,
            Expression::Conditional(conditional) => &conditional.condition,
            _ => return current,
        };
    }
}

fn expression_precedence(expression: &Expression) -> OperatorPrecedence {
    match expression {
        Expression::Binary(binary) => binary.operator.precedence(),
        Expression::Conditional(_) => OperatorPrecedence::Conditional,
        Expression::Arrow(_) => OperatorPrecedence::Assignment,
        Expression::Yield(_) => OperatorPrecedence::Yield,
        Expression::Spread(_) => OperatorPrecedence::Spread,
        Expression::PrefixUnary(_) | Expression::Await(_) => OperatorPrecedence::Unary,
        Expression::PostfixUnary(_) => OperatorPrecedence::Update,
        Expression::Call(_) | Expression::TaggedTemplate(_) => OperatorPrecedence::LeftHandSide,
        Expression::New(new) if new.arguments.is_none() => OperatorPrecedence::LeftHandSide,
        Expression::New(_) | Expression::PropertyAccess(_) | Expression::ElementAccess(_) => {
            OperatorPrecedence::Member
        }
        _ => OperatorPrecedence::Primary,
    }
}

/// `a ?? b || c` is a syntax error; either side must be parenthesized.
fn mixes_coalesce_with_logical(operator: BinaryOperator, operand: &Expression) -> bool {
    let Expression::Binary(inner) = operand else {
        return false;
    };
    let is_logical = |op: BinaryOperator| {
        matches!(op, BinaryOperator::BarBar | BinaryOperator::AmpersandAmpersand)
    };
    (operator == BinaryOperator::QuestionQuestion && is_logical(inner.operator))
        || (is_logical(operator) && inner.operator == BinaryOperator::QuestionQuestion)
}

/// `- -x` and `+ ++x` must not fuse into `--x` / `+++x`.
fn needs_space_between(operator: PrefixUnaryOperator, operand: &Expression) -> bool {
    let Expression::PrefixUnary(inner) = operand else {
        return false;
    };
    let sign = |op: PrefixUnaryOperator| match op {
        PrefixUnaryOperator::Plus | PrefixUnaryOperator::PlusPlus => Some('+'),
        PrefixUnaryOperator::Minus | PrefixUnaryOperator::MinusMinus => Some('-'),
        _ => None,
    };
    sign(operator).is_some() && sign(operator) == sign(inner.operator)
}

fn is_plain_integer(text: &str) -> bool {
    text.bytes().all(|byte| byte.is_ascii_digit())
}

fn escape_string(text: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{0008}' => escaped.push_str("\\b"),
            '\u{000B}' => escaped.push_str("\\v"),
            '\u{000C}' => escaped.push_str("\\f"),
            '\0' => escaped.push_str("\\0"),
            '\u{2028}' => escaped.push_str("\\u2028"),
            '\u{2029}' => escaped.push_str("\\u2029"),
            ch if ch == quote => {
                escaped.push('\\');
                escaped.push(ch);
            }
            ch if ch.is_control() => {
                escaped.push_str(&format!("\\u{:04X}", u32::from(ch)));
            }
            ch => escaped.push(ch),
        }
    }
    escaped.push(quote);
    escaped
}
