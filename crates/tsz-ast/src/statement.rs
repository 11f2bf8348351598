//! Statement, declaration and binding-pattern nodes.

use serde::{Deserialize, Serialize};

use crate::expression::Expression;
use crate::node::{Identifier, ModifierFlags, ModuleExportName, NodeId, PropertyName};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Statement {
    Import(ImportDeclaration),
    ImportEquals(ImportEqualsDeclaration),
    Export(ExportDeclaration),
    ExportAssignment(ExportAssignment),
    Variable(VariableStatement),
    Function(Box<FunctionDeclaration>),
    Class(Box<ClassDeclaration>),
    Expression(ExpressionStatement),
    Block(Block),
    Empty(EmptyStatement),
    If(IfStatement),
    For(ForStatement),
    ForInOrOf(ForInOrOfStatement),
    While(WhileStatement),
    Do(DoStatement),
    Labeled(LabeledStatement),
    With(WithStatement),
    Switch(SwitchStatement),
    Try(TryStatement),
    Return(ReturnStatement),
    Throw(ThrowStatement),
    Break(JumpStatement),
    Continue(JumpStatement),
    Debugger(EmptyStatement),
}

impl Statement {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Import(node) => node.id,
            Self::ImportEquals(node) => node.id,
            Self::Export(node) => node.id,
            Self::ExportAssignment(node) => node.id,
            Self::Variable(node) => node.id,
            Self::Function(node) => node.id,
            Self::Class(node) => node.id,
            Self::Expression(node) => node.id,
            Self::Block(node) => node.id,
            Self::Empty(node) => node.id,
            Self::If(node) => node.id,
            Self::For(node) => node.id,
            Self::ForInOrOf(node) => node.id,
            Self::While(node) => node.id,
            Self::Do(node) => node.id,
            Self::Labeled(node) => node.id,
            Self::With(node) => node.id,
            Self::Switch(node) => node.id,
            Self::Try(node) => node.id,
            Self::Return(node) => node.id,
            Self::Throw(node) => node.id,
            Self::Break(node) => node.id,
            Self::Continue(node) => node.id,
            Self::Debugger(node) => node.id,
        }
    }

    /// Modifiers of declaration statements; empty for everything else.
    #[must_use]
    pub fn modifiers(&self) -> ModifierFlags {
        match self {
            Self::Import(node) => node.modifiers,
            Self::ImportEquals(node) => node.modifiers,
            Self::Export(node) => node.modifiers,
            Self::Variable(node) => node.modifiers,
            Self::Function(node) => node.modifiers,
            Self::Class(node) => node.modifiers,
            _ => ModifierFlags::empty(),
        }
    }

    #[must_use]
    pub fn has_export_modifier(&self) -> bool {
        self.modifiers().contains(ModifierFlags::EXPORT)
    }

    /// A directive such as `"use strict";`.
    #[must_use]
    pub fn is_prologue_directive(&self) -> bool {
        matches!(
            self,
            Self::Expression(ExpressionStatement {
                expression: Expression::StringLiteral(_),
                ..
            })
        )
    }
}

// =============================================================================
// Modules
// =============================================================================

/// `import d, { a as b } from "m";`, `import * as ns from "m";`, `import "m";`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub import_clause: Option<ImportClause>,
    pub module_specifier: Expression,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportClause {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub is_type_only: bool,
    /// The default import binding.
    #[serde(default)]
    pub name: Option<Identifier>,
    #[serde(default)]
    pub named_bindings: Option<NamedImportBindings>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NamedImportBindings {
    NamespaceImport(NamespaceImport),
    NamedImports(NamedImports),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamespaceImport {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub name: Identifier,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedImports {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub elements: Vec<ImportSpecifier>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportSpecifier {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub is_type_only: bool,
    #[serde(default)]
    pub property_name: Option<ModuleExportName>,
    pub name: Identifier,
}

impl ImportSpecifier {
    /// The name imported from the other module.
    #[must_use]
    pub fn imported_name_text(&self) -> &str {
        self.property_name
            .as_ref()
            .map_or(self.name.text.as_str(), ModuleExportName::text)
    }
}

/// `import x = require("m");` or `import x = N.y;`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportEqualsDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub is_type_only: bool,
    pub name: Identifier,
    pub module_reference: ModuleReference,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleReference {
    /// `require("m")`
    External(ExternalModuleReference),
    /// An entity name such as `N.y`.
    Entity(Box<Expression>),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExternalModuleReference {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Expression,
}

/// `export { a };`, `export { a as b } from "m";`, `export * from "m";`,
/// `export * as ns from "m";`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub is_type_only: bool,
    #[serde(default)]
    pub export_clause: Option<NamedExportBindings>,
    #[serde(default)]
    pub module_specifier: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NamedExportBindings {
    NamespaceExport(NamespaceExport),
    NamedExports(NamedExports),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamespaceExport {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub name: ModuleExportName,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedExports {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub elements: Vec<ExportSpecifier>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportSpecifier {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub is_type_only: bool,
    #[serde(default)]
    pub property_name: Option<ModuleExportName>,
    pub name: ModuleExportName,
}

impl ExportSpecifier {
    /// The local (or re-exported) name: `a` in `export { a as b }`.
    #[must_use]
    pub fn property_name_or_name(&self) -> &ModuleExportName {
        self.property_name.as_ref().unwrap_or(&self.name)
    }
}

/// `export default expr;` or `export = expr;`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportAssignment {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub is_export_equals: bool,
    pub expression: Expression,
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    pub declaration_list: VariableDeclarationList,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    Var,
    Let,
    Const,
}

impl VariableKind {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }

    #[must_use]
    pub const fn is_block_scoped(self) -> bool {
        !matches!(self, Self::Var)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclarationList {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclaration>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VariableDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub name: BindingName,
    #[serde(default)]
    pub initializer: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BindingName {
    Identifier(Identifier),
    ObjectBindingPattern(ObjectBindingPattern),
    ArrayBindingPattern(ArrayBindingPattern),
}

impl BindingName {
    #[must_use]
    pub fn id(&self) -> NodeId {
        match self {
            Self::Identifier(ident) => ident.id,
            Self::ObjectBindingPattern(pattern) => pattern.id,
            Self::ArrayBindingPattern(pattern) => pattern.id,
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
    pub fn is_binding_pattern(&self) -> bool {
        !matches!(self, Self::Identifier(_))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectBindingPattern {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub elements: Vec<BindingElement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrayBindingPattern {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub elements: Vec<ArrayBindingElement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ArrayBindingElement {
    /// A hole: the gap in `[, b]`.
    Omitted(crate::expression::OmittedExpression),
    BindingElement(BindingElement),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BindingElement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub dot_dot_dot: bool,
    #[serde(default)]
    pub property_name: Option<PropertyName>,
    pub name: BindingName,
    #[serde(default)]
    pub initializer: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub dot_dot_dot: bool,
    pub name: BindingName,
    #[serde(default)]
    pub initializer: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FunctionDeclaration {
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
    #[serde(default)]
    pub body: Option<Block>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub name: Option<Identifier>,
    #[serde(default)]
    pub heritage: Option<Box<Expression>>,
    #[serde(default)]
    pub members: Vec<ClassElement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClassElement {
    Property(PropertyDeclaration),
    Method(MethodDeclaration),
    Constructor(ConstructorDeclaration),
    GetAccessor(AccessorDeclaration),
    SetAccessor(AccessorDeclaration),
    StaticBlock(ClassStaticBlockDeclaration),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    pub name: PropertyName,
    #[serde(default)]
    pub initializer: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub asterisk: bool,
    pub name: PropertyName,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default)]
    pub body: Option<Block>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConstructorDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default)]
    pub body: Option<Block>,
}

/// A `get` or `set` accessor; which one is decided by the enclosing variant.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessorDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub modifiers: ModifierFlags,
    pub name: PropertyName,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default)]
    pub body: Option<Block>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassStaticBlockDeclaration {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub body: Block,
}

// =============================================================================
// Control flow
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpressionStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Expression,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub statements: Vec<Statement>,
    #[serde(default = "default_true")]
    pub multi_line: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmptyStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IfStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Expression,
    pub then_statement: Box<Statement>,
    #[serde(default)]
    pub else_statement: Option<Box<Statement>>,
}

/// Untagged in JSON: a declaration list is recognized by its `declarations`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForInitializer {
    VariableDeclarationList(VariableDeclarationList),
    Expression(Expression),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub initializer: Option<ForInitializer>,
    #[serde(default)]
    pub condition: Option<Expression>,
    #[serde(default)]
    pub incrementor: Option<Expression>,
    pub statement: Box<Statement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForInOrOfKind {
    In,
    Of,
    AwaitOf,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForInOrOfStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub loop_kind: ForInOrOfKind,
    pub initializer: ForInitializer,
    pub expression: Expression,
    pub statement: Box<Statement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WhileStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Expression,
    pub statement: Box<Statement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DoStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub statement: Box<Statement>,
    pub expression: Expression,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabeledStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub label: Identifier,
    pub statement: Box<Statement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WithStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Expression,
    pub statement: Box<Statement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SwitchStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Expression,
    pub case_block: CaseBlock,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseBlock {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub clauses: Vec<CaseOrDefaultClause>,
}

/// `case expr:` when `expression` is set, `default:` otherwise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaseOrDefaultClause {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub expression: Option<Expression>,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TryStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub try_block: Block,
    #[serde(default)]
    pub catch_clause: Option<CatchClause>,
    #[serde(default)]
    pub finally_block: Option<Block>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatchClause {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub variable: Option<BindingName>,
    pub block: Block,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub expression: Option<Expression>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThrowStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub expression: Expression,
}

/// `break` or `continue`, with an optional label.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JumpStatement {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    #[serde(default)]
    pub label: Option<Identifier>,
}
