use tsz_common::{CompilerOptions, ModuleKind};

use super::*;

fn file_with_identifiers(names: &[&str]) -> SourceFile {
    let statements = names
        .iter()
        .map(|name| factory::create_expression_statement(factory::create_identifier_expression(*name)))
        .collect();
    SourceFile::new(
        "main.ts",
        statements,
        &CompilerOptions::with_module(ModuleKind::CommonJS),
    )
}

fn import_names(helpers: &[&'static EmitHelper]) -> Vec<&'static str> {
    helpers.iter().map(|helper| helper.import_name).collect()
}

// =============================================================================
// Emit flags
// =============================================================================

#[test]
fn test_emit_flags_accumulate() {
    let mut ctx = EmitContext::new();
    let node = NodeId::fresh();
    assert_eq!(ctx.emit_flags(node), EmitFlags::empty());

    ctx.add_emit_flags(node, EmitFlags::INDIRECT_CALL);
    ctx.add_emit_flags(node, EmitFlags::NO_COMMENTS);
    assert!(ctx.has_emit_flags(node, EmitFlags::INDIRECT_CALL));
    assert!(ctx.has_emit_flags(node, EmitFlags::NO_COMMENTS));

    ctx.set_emit_flags(node, EmitFlags::HELPER_NAME);
    assert!(!ctx.has_emit_flags(node, EmitFlags::INDIRECT_CALL));
    assert!(ctx.has_emit_flags(node, EmitFlags::HELPER_NAME));
}

// =============================================================================
// Names
// =============================================================================

#[test]
fn test_temp_names_skip_loop_counter_letters() {
    let mut ctx = EmitContext::new();
    let names: Vec<String> = (0..10).map(|_| ctx.new_temp_name().text).collect();
    assert_eq!(names, ["_a", "_b", "_c", "_d", "_e", "_f", "_g", "_h", "_j", "_k"]);
}

#[test]
fn test_temp_names_avoid_file_identifiers() {
    let mut ctx = EmitContext::new();
    ctx.begin_file(&file_with_identifiers(&["_a", "_b"]));
    assert_eq!(ctx.new_temp_name().text, "_c");
}

#[test]
fn test_unique_names() {
    let mut ctx = EmitContext::new();
    ctx.begin_file(&file_with_identifiers(&["exports", "m_1"]));

    assert!(!ctx.is_unique_name("exports"));
    assert_eq!(ctx.new_unique_name("exports", true).text, "exports_1");
    assert_eq!(ctx.new_unique_name("m", false).text, "m_2");
    assert_eq!(ctx.new_unique_name("tslib", true).text, "tslib");
    assert_eq!(ctx.new_unique_name("tslib", true).text, "tslib_1");
    assert!(!ctx.is_unique_name("tslib_1"));
}

#[test]
fn test_trailing_underscore_base_is_not_doubled() {
    let mut ctx = EmitContext::new();
    assert_eq!(ctx.new_unique_name("ns_", false).text, "ns_1");
}

#[test]
fn test_file_level_names_are_marked() {
    let mut ctx = EmitContext::new();
    let name = ctx.new_file_level_unique_name("__require");
    assert_eq!(name.text, "__require");
    assert!(name.generated.is_some_and(|generated| generated.file_level));
}

#[test]
fn test_generated_name_for_node_is_stable() {
    let mut ctx = EmitContext::new();
    let first = NodeId::fresh();
    let second = NodeId::fresh();

    assert_eq!(ctx.new_generated_name_for_node(first, "m").text, "m_1");
    assert_eq!(ctx.new_generated_name_for_node(second, "m").text, "m_2");
    assert_eq!(ctx.new_generated_name_for_node(first, "m").text, "m_1");
}

#[test]
fn test_begin_file_forgets_previous_file() {
    let mut ctx = EmitContext::new();
    ctx.begin_file(&file_with_identifiers(&[]));
    assert_eq!(ctx.new_unique_name("m", false).text, "m_1");

    ctx.begin_file(&file_with_identifiers(&[]));
    assert_eq!(ctx.new_unique_name("m", false).text, "m_1");
    assert_eq!(ctx.new_temp_name().text, "_a");
}

// =============================================================================
// Variable environment
// =============================================================================

#[test]
fn test_variable_environment_collects_var_statement() {
    let mut ctx = EmitContext::new();
    ctx.start_variable_environment();
    ctx.add_variable_declaration(factory::create_identifier("_a"));
    ctx.add_variable_declaration(factory::create_identifier("_b"));

    let Some(Statement::Variable(statement)) = ctx.end_variable_environment() else {
        panic!("expected a variable statement");
    };
    assert_eq!(statement.declaration_list.kind, VariableKind::Var);
    assert_eq!(statement.declaration_list.declarations.len(), 2);
    assert!(ctx.has_emit_flags(statement.id, EmitFlags::CUSTOM_PROLOGUE));
}

#[test]
fn test_empty_environment_produces_nothing() {
    let mut ctx = EmitContext::new();
    ctx.start_variable_environment();
    assert!(ctx.end_variable_environment().is_none());
}

#[test]
fn test_nested_environments_are_independent() {
    let mut ctx = EmitContext::new();
    ctx.start_variable_environment();
    ctx.start_variable_environment();
    ctx.add_variable_declaration(factory::create_identifier("_a"));
    assert!(ctx.end_variable_environment().is_some());
    assert!(ctx.end_variable_environment().is_none());
}

#[test]
fn test_merged_declarations_follow_directives() {
    let mut ctx = EmitContext::new();
    let mut statements = vec![
        factory::create_expression_statement(factory::create_string_literal("use strict")),
        factory::create_expression_statement(factory::create_identifier_expression("x")),
    ];
    ctx.start_variable_environment();
    ctx.add_variable_declaration(factory::create_identifier("_a"));
    ctx.end_and_merge_variable_environment(&mut statements);

    assert_eq!(statements.len(), 3);
    assert!(matches!(statements[1], Statement::Variable(_)));
}

#[test]
#[should_panic(expected = "outside of a variable environment")]
fn test_declaration_outside_environment_panics() {
    let mut ctx = EmitContext::new();
    ctx.add_variable_declaration(factory::create_identifier("_a"));
}

// =============================================================================
// Helpers
// =============================================================================

#[test]
fn test_requesting_helper_records_dependencies_first() {
    let mut ctx = EmitContext::new();
    ctx.request_emit_helper(&IMPORT_STAR_HELPER);
    assert_eq!(
        import_names(&ctx.read_emit_helpers()),
        ["__createBinding", "__setModuleDefault", "__importStar"]
    );
}

#[test]
fn test_helper_requests_are_deduplicated_and_drained() {
    let mut ctx = EmitContext::new();
    ctx.request_emit_helper(&IMPORT_STAR_HELPER);
    ctx.request_emit_helper(&EXPORT_STAR_HELPER);
    ctx.request_emit_helper(&IMPORT_STAR_HELPER);
    assert_eq!(
        import_names(&ctx.read_emit_helpers()),
        ["__createBinding", "__setModuleDefault", "__importStar", "__exportStar"]
    );
    assert!(ctx.read_emit_helpers().is_empty());
}

#[test]
fn test_attached_helpers_are_deduplicated() {
    let mut ctx = EmitContext::new();
    let file = NodeId::fresh();
    ctx.add_emit_helpers(file, vec![&IMPORT_DEFAULT_HELPER]);
    ctx.add_emit_helpers(file, vec![&IMPORT_DEFAULT_HELPER, &EXPORT_STAR_HELPER]);
    assert_eq!(
        import_names(ctx.emit_helpers(file)),
        ["__importDefault", "__exportStar"]
    );
    assert!(ctx.emit_helpers(NodeId::fresh()).is_empty());
}

#[test]
fn test_helper_call_is_tagged_and_requested() {
    let mut ctx = EmitContext::new();
    let call = ctx.create_import_default_helper(factory::create_require_call(
        factory::create_string_literal("./m"),
    ));

    let Expression::Call(call) = call else {
        panic!("expected a call");
    };
    let Expression::Identifier(callee) = &*call.expression else {
        panic!("expected an identifier callee");
    };
    assert_eq!(callee.text, "__importDefault");
    assert!(ctx.has_emit_flags(callee.id, EmitFlags::HELPER_NAME));
    assert_eq!(import_names(&ctx.read_emit_helpers()), ["__importDefault"]);
}

#[test]
fn test_external_helpers_are_recorded_per_file() {
    let mut ctx = EmitContext::new();
    let file = NodeId::fresh();
    let other = NodeId::fresh();
    assert!(!ctx.has_recorded_external_helpers(file));

    ctx.set_external_helpers_module_name(file, factory::create_identifier("tslib_1"));
    ctx.add_emit_flags(other, EmitFlags::EXTERNAL_HELPERS);
    assert!(ctx.has_recorded_external_helpers(file));
    assert!(ctx.has_recorded_external_helpers(other));
    assert_eq!(
        ctx.external_helpers_module_name(file).map(|name| name.text.as_str()),
        Some("tslib_1")
    );
}

#[test]
fn test_helper_aliases_are_per_file() {
    let mut ctx = EmitContext::new();
    let file = NodeId::fresh();
    ctx.set_helper_alias(file, "__importStar", "__importStar_1".to_string());
    assert_eq!(ctx.helper_alias(file, "__importStar"), Some("__importStar_1"));
    assert_eq!(ctx.helper_alias(NodeId::fresh(), "__importStar"), None);
}
