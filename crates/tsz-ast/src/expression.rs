//! Expression nodes.

use serde::{Deserialize, Serialize};

use crate::node::{Identifier, ModifierFlags, NodeId, NumericLiteral, PropertyName, StringLiteral};
use crate::statement::{Block, ClassElement, ParameterDeclaration};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Expression {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    NumericLiteral(NumericLiteral),
    RegularExpression(RegularExpressionLiteral),
    Template(Box<TemplateExpression>),
    Keyword(KeywordExpression),
    ArrayLiteral(ArrayLiteralExpression),
    ObjectLiteral(ObjectLiteralExpression),
    PropertyAccess(PropertyAccessExpression),
    ElementAccess(ElementAccessExpression),
    Call(CallExpression),
    New(NewExpression),
    TaggedTemplate(Box<TaggedTemplateExpression>),
    Parenthesized(ParenthesizedExpression),
    Function(Box<FunctionExpression>),
    Arrow(Box<ArrowFunction>),
    Class(Box<ClassExpression>),
    PrefixUnary(PrefixUnaryExpression),
    PostfixUnary(PostfixUnaryExpression),
    Binary(BinaryExpression),
    Conditional(ConditionalExpression),
    Await(AwaitExpression),
    Yield(YieldExpression),
    Spread(SpreadElement),
    Omitted(OmittedExpression),
    MetaProperty(MetaProperty),
}

impl Expression {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Identifier(node) => node.id,
            Self::StringLiteral(node) => node.id,
            Self::NumericLiteral(node) => node.id,
            Self::RegularExpression(node) => node.id,
            Self::Template(node) => node.id,
            Self::Keyword(node) => node.id,
            Self::ArrayLiteral(node) => node.id,
            Self::ObjectLiteral(node) => node.id,
            Self::PropertyAccess(node) => node.id,
            Self::ElementAccess(node) => node.id,
            Self::Call(node) => node.id,
            Self::New(node) => node.id,
            Self::TaggedTemplate(node) => node.id,
            Self::Parenthesized(node) => node.id,
            Self::Function(node) => node.id,
            Self::Arrow(node) => node.id,
            Self::Class(node) => node.id,
            Self::PrefixUnary(node) => node.id,
            Self::PostfixUnary(node) => node.id,
            Self::Binary(node) => node.id,
            Self::Conditional(node) => node.id,
            Self::Await(node) => node.id,
            Self::Yield(node) => node.id,
            Self::Spread(node) => node.id,
            Self::Omitted(node) => node.id,
            Self::MetaProperty(node) => node.id,
        }
    }

    #[must_use]
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_string_literal(&self) -> Option<&StringLiteral> {
        match self {
            Self::StringLiteral(lit) => Some(lit),
            _ => None,
        }
    }

    /// Strip any number of enclosing parentheses.
    #[must_use]
    pub fn skip_parentheses(&self) -> &Expression {
        let mut expression = self;
        while let Self::Parenthesized(paren) = expression {
            expression = &paren.expression;
        }
        expression
    }

    /// `import(...)`.
    #[must_use]
    pub fn is_import_call(&self) -> bool {
        matches!(self, Self::Call(call) if call.is_import_call())
    }

    /// A binary expression with `=` whose left side is an object or array
    /// literal.
    #[must_use]
    pub fn is_destructuring_assignment(&self) -> bool {
        match self {
            Self::Binary(binary) => {
                binary.operator == BinaryOperator::Equals
                    && matches!(
                        *binary.left,
                        Self::ObjectLiteral(_) | Self::ArrayLiteral(_)
                    )
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegularExpressionLiteral {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub text: String,
}

/// A template literal. `spans` is empty for a no-substitution template.
///
/// `head` and each span's `literal` hold raw source text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub head: String,
    #[serde(default)]
    pub spans: Vec<TemplateSpan>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateSpan {
    pub expression: Expression,
    pub literal: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    This,
    Super,
    Null,
    True,
    False,
    Import,
}

impl Keyword {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::This => "this",
            Self::Super => "super",
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
            Self::Import => "import",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeywordExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub keyword: Keyword,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayLiteralExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub elements: Vec<Expression>,
    #[serde(default)]
    pub multi_line: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectLiteralExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub properties: Vec<ObjectLiteralElement>,
    #[serde(default)]
    pub multi_line: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ObjectLiteralElement {
    PropertyAssignment(PropertyAssignment),
    ShorthandPropertyAssignment(ShorthandPropertyAssignment),
    SpreadAssignment(SpreadAssignment),
    Method(Box<crate::statement::MethodDeclaration>),
    GetAccessor(Box<crate::statement::AccessorDeclaration>),
    SetAccessor(Box<crate::statement::AccessorDeclaration>),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyAssignment {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub name: PropertyName,
    pub initializer: Expression,
}

/// `{ a }`, or `{ a = 1 }` inside a destructuring assignment target.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShorthandPropertyAssignment {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub name: Identifier,
    #[serde(default)]
    pub object_assignment_initializer: Option<Box<Expression>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpreadAssignment {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Expression,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyAccessExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Box<Expression>,
    #[serde(default)]
    pub question_dot: bool,
    pub name: Identifier,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementAccessExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Box<Expression>,
    #[serde(default)]
    pub question_dot: bool,
    pub argument: Box<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CallExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Box<Expression>,
    #[serde(default)]
    pub question_dot: bool,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

impl CallExpression {
    #[must_use]
    pub fn is_import_call(&self) -> bool {
        matches!(
            *self.expression,
            Expression::Keyword(KeywordExpression {
                keyword: Keyword::Import,
                ..
            })
        )
    }

    /// `require("x")` with exactly one string-literal argument.
    #[must_use]
    pub fn is_require_call(&self) -> bool {
        matches!(&*self.expression, Expression::Identifier(ident) if ident.text == "require")
            && self.arguments.len() == 1
            && matches!(self.arguments[0], Expression::StringLiteral(_))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Box<Expression>,
    #[serde(default)]
    pub arguments: Option<Vec<Expression>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TaggedTemplateExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub tag: Expression,
    pub template: TemplateExpression,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParenthesizedExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Box<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub asterisk: bool,
    #[serde(default)]
    pub name: Option<Identifier>,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    pub body: Block,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrowFunction {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    pub body: ConciseBody,
}

/// Untagged in JSON: a block is recognized by its `statements`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConciseBody {
    Block(Block),
    Expression(Box<Expression>),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub name: Option<Identifier>,
    #[serde(default)]
    pub heritage: Option<Box<Expression>>,
    #[serde(default)]
    pub members: Vec<ClassElement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrefixUnaryOperator {
    #[serde(rename = "++")]
    PlusPlus,
    #[serde(rename = "--")]
    MinusMinus,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "~")]
    Tilde,
    #[serde(rename = "!")]
    Exclamation,
    #[serde(rename = "typeof")]
    TypeOf,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl PrefixUnaryOperator {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Tilde => "~",
            Self::Exclamation => "!",
            Self::TypeOf => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
        }
    }

    #[must_use]
    pub const fn is_update(self) -> bool {
        matches!(self, Self::PlusPlus | Self::MinusMinus)
    }

    #[must_use]
    pub const fn is_keyword(self) -> bool {
        matches!(self, Self::TypeOf | Self::Void | Self::Delete)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PrefixUnaryExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub operator: PrefixUnaryOperator,
    pub operand: Box<Expression>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostfixUnaryOperator {
    #[serde(rename = "++")]
    PlusPlus,
    #[serde(rename = "--")]
    MinusMinus,
}

impl PostfixUnaryOperator {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostfixUnaryExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub operand: Box<Expression>,
    pub operator: PostfixUnaryOperator,
}

/// Binary operators, ordered loosely by precedence class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "+=")]
    PlusEquals,
    #[serde(rename = "-=")]
    MinusEquals,
    #[serde(rename = "*=")]
    AsteriskEquals,
    #[serde(rename = "**=")]
    AsteriskAsteriskEquals,
    #[serde(rename = "/=")]
    SlashEquals,
    #[serde(rename = "%=")]
    PercentEquals,
    #[serde(rename = "<<=")]
    LessThanLessThanEquals,
    #[serde(rename = ">>=")]
    GreaterThanGreaterThanEquals,
    #[serde(rename = ">>>=")]
    GreaterThanGreaterThanGreaterThanEquals,
    #[serde(rename = "&=")]
    AmpersandEquals,
    #[serde(rename = "|=")]
    BarEquals,
    #[serde(rename = "^=")]
    CaretEquals,
    #[serde(rename = "&&=")]
    AmpersandAmpersandEquals,
    #[serde(rename = "||=")]
    BarBarEquals,
    #[serde(rename = "??=")]
    QuestionQuestionEquals,
    #[serde(rename = "??")]
    QuestionQuestion,
    #[serde(rename = "||")]
    BarBar,
    #[serde(rename = "&&")]
    AmpersandAmpersand,
    #[serde(rename = "|")]
    Bar,
    #[serde(rename = "^")]
    Caret,
    #[serde(rename = "&")]
    Ampersand,
    #[serde(rename = "==")]
    EqualsEquals,
    #[serde(rename = "!=")]
    ExclamationEquals,
    #[serde(rename = "===")]
    EqualsEqualsEquals,
    #[serde(rename = "!==")]
    ExclamationEqualsEquals,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<=")]
    LessThanEquals,
    #[serde(rename = ">=")]
    GreaterThanEquals,
    #[serde(rename = "instanceof")]
    InstanceOf,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "<<")]
    LessThanLessThan,
    #[serde(rename = ">>")]
    GreaterThanGreaterThan,
    #[serde(rename = ">>>")]
    GreaterThanGreaterThanGreaterThan,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Asterisk,
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "**")]
    AsteriskAsterisk,
}

/// Operator precedence, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperatorPrecedence {
    Comma,
    Spread,
    Yield,
    Assignment,
    Conditional,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponentiation,
    Unary,
    Update,
    LeftHandSide,
    Member,
    Primary,
}

impl BinaryOperator {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Equals => "=",
            Self::PlusEquals => "+=",
            Self::MinusEquals => "-=",
            Self::AsteriskEquals => "*=",
            Self::AsteriskAsteriskEquals => "**=",
            Self::SlashEquals => "/=",
            Self::PercentEquals => "%=",
            Self::LessThanLessThanEquals => "<<=",
            Self::GreaterThanGreaterThanEquals => ">>=",
            Self::GreaterThanGreaterThanGreaterThanEquals => ">>>=",
            Self::AmpersandEquals => "&=",
            Self::BarEquals => "|=",
            Self::CaretEquals => "^=",
            Self::AmpersandAmpersandEquals => "&&=",
            Self::BarBarEquals => "||=",
            Self::QuestionQuestionEquals => "??=",
            Self::QuestionQuestion => "??",
            Self::BarBar => "||",
            Self::AmpersandAmpersand => "&&",
            Self::Bar => "|",
            Self::Caret => "^",
            Self::Ampersand => "&",
            Self::EqualsEquals => "==",
            Self::ExclamationEquals => "!=",
            Self::EqualsEqualsEquals => "===",
            Self::ExclamationEqualsEquals => "!==",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanEquals => "<=",
            Self::GreaterThanEquals => ">=",
            Self::InstanceOf => "instanceof",
            Self::In => "in",
            Self::LessThanLessThan => "<<",
            Self::GreaterThanGreaterThan => ">>",
            Self::GreaterThanGreaterThanGreaterThan => ">>>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::AsteriskAsterisk => "**",
        }
    }

    /// `=` and every compound assignment.
    #[must_use]
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::PlusEquals
                | Self::MinusEquals
                | Self::AsteriskEquals
                | Self::AsteriskAsteriskEquals
                | Self::SlashEquals
                | Self::PercentEquals
                | Self::LessThanLessThanEquals
                | Self::GreaterThanGreaterThanEquals
                | Self::GreaterThanGreaterThanGreaterThanEquals
                | Self::AmpersandEquals
                | Self::BarEquals
                | Self::CaretEquals
                | Self::AmpersandAmpersandEquals
                | Self::BarBarEquals
                | Self::QuestionQuestionEquals
        )
    }

    #[must_use]
    pub const fn precedence(self) -> OperatorPrecedence {
        match self {
            Self::Comma => OperatorPrecedence::Comma,
            Self::QuestionQuestion => OperatorPrecedence::Coalesce,
            Self::BarBar => OperatorPrecedence::LogicalOr,
            Self::AmpersandAmpersand => OperatorPrecedence::LogicalAnd,
            Self::Bar => OperatorPrecedence::BitwiseOr,
            Self::Caret => OperatorPrecedence::BitwiseXor,
            Self::Ampersand => OperatorPrecedence::BitwiseAnd,
            Self::EqualsEquals
            | Self::ExclamationEquals
            | Self::EqualsEqualsEquals
            | Self::ExclamationEqualsEquals => OperatorPrecedence::Equality,
            Self::LessThan
            | Self::GreaterThan
            | Self::LessThanEquals
            | Self::GreaterThanEquals
            | Self::InstanceOf
            | Self::In => OperatorPrecedence::Relational,
            Self::LessThanLessThan
            | Self::GreaterThanGreaterThan
            | Self::GreaterThanGreaterThanGreaterThan => OperatorPrecedence::Shift,
            Self::Plus | Self::Minus => OperatorPrecedence::Additive,
            Self::Asterisk | Self::Slash | Self::Percent => OperatorPrecedence::Multiplicative,
            Self::AsteriskAsterisk => OperatorPrecedence::Exponentiation,
            _ => OperatorPrecedence::Assignment,
        }
    }

    /// Operators where `a op (b op c)` equals `(a op b) op c`, so the right
    /// operand needs no parentheses when it uses the same operator.
    #[must_use]
    pub const fn is_associative(self) -> bool {
        matches!(
            self,
            Self::Comma | Self::Asterisk | Self::Bar | Self::Caret | Self::Ampersand
        )
    }

    /// Right-associative operators: assignments and `**`.
    #[must_use]
    pub const fn is_right_associative(self) -> bool {
        self.is_assignment() || matches!(self, Self::AsteriskAsterisk)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BinaryExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConditionalExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub condition: Box<Expression>,
    pub when_true: Box<Expression>,
    pub when_false: Box<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AwaitExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Box<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct YieldExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub asterisk: bool,
    #[serde(default)]
    pub expression: Option<Box<Expression>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpreadElement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Box<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OmittedExpression {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetaPropertyKeyword {
    New,
    Import,
}

/// `new.target` or `import.meta`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetaProperty {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub keyword: MetaPropertyKeyword,
    pub name: Identifier,
}
