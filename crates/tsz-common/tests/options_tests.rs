use super::*;

#[test]
fn emit_module_kind_prefers_explicit_module() {
    let options = CompilerOptions::with_module(ModuleKind::NodeNext);
    assert_eq!(options.emit_module_kind(), ModuleKind::NodeNext);
}

#[test]
fn emit_module_kind_follows_target_when_unset() {
    let es5 = CompilerOptions::default();
    assert_eq!(es5.emit_module_kind(), ModuleKind::CommonJS);

    let es2015 = CompilerOptions {
        target: Some(ScriptTarget::ES2015),
        ..CompilerOptions::default()
    };
    assert_eq!(es2015.emit_module_kind(), ModuleKind::ES2015);
}

#[test]
fn emit_script_target_defaults_by_module() {
    assert_eq!(
        CompilerOptions::with_module(ModuleKind::Node16).emit_script_target(),
        ScriptTarget::ES2022
    );
    assert_eq!(
        CompilerOptions::with_module(ModuleKind::NodeNext).emit_script_target(),
        ScriptTarget::ESNext
    );
    assert_eq!(
        CompilerOptions::with_module(ModuleKind::CommonJS).emit_script_target(),
        ScriptTarget::ES5
    );
}

#[test]
fn es_module_interop_defaults_on_for_node_and_preserve() {
    assert!(CompilerOptions::with_module(ModuleKind::Node16).es_module_interop());
    assert!(CompilerOptions::with_module(ModuleKind::Preserve).es_module_interop());
    assert!(!CompilerOptions::with_module(ModuleKind::CommonJS).es_module_interop());

    let disabled = CompilerOptions {
        es_module_interop: Some(false),
        ..CompilerOptions::with_module(ModuleKind::NodeNext)
    };
    assert!(!disabled.es_module_interop());
}

#[test]
fn always_strict_falls_back_to_strict() {
    let strict = CompilerOptions {
        strict: Some(true),
        ..CompilerOptions::default()
    };
    assert!(strict.always_strict());

    let overridden = CompilerOptions {
        strict: Some(true),
        always_strict: Some(false),
        ..CompilerOptions::default()
    };
    assert!(!overridden.always_strict());
}

#[test]
fn verbatim_module_syntax_implies_isolated_modules() {
    let options = CompilerOptions {
        verbatim_module_syntax: Some(true),
        ..CompilerOptions::default()
    };
    assert!(options.isolated_modules());
}

#[test]
fn module_kind_ordering_matches_numeric_values() {
    assert!(ModuleKind::ES2015 < ModuleKind::ESNext);
    assert!(ModuleKind::ESNext < ModuleKind::Node16);
    assert!(ModuleKind::NodeNext < ModuleKind::Preserve);
    assert!(ModuleKind::Node18.is_node_module());
    assert!(ModuleKind::ES2022.is_es_module());
    assert!(!ModuleKind::Node16.is_es_module());
}

#[test]
fn module_kind_deserializes_from_lowercase_names() {
    let kind: ModuleKind = serde_json::from_str("\"nodenext\"").unwrap();
    assert_eq!(kind, ModuleKind::NodeNext);
    let kind: ModuleKind = serde_json::from_str("\"commonjs\"").unwrap();
    assert_eq!(kind, ModuleKind::CommonJS);
}
