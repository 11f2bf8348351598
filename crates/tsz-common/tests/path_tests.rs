use super::*;
use crate::common::{JsxEmit, ModuleKind};
use crate::options::CompilerOptions;

fn rewriting() -> CompilerOptions {
    CompilerOptions {
        rewrite_relative_import_extensions: Some(true),
        ..CompilerOptions::with_module(ModuleKind::CommonJS)
    }
}

#[test]
fn relative_paths() {
    assert!(path_is_relative("./other"));
    assert!(path_is_relative("../other"));
    assert!(path_is_relative("."));
    assert!(path_is_relative(".."));
    assert!(!path_is_relative("other"));
    assert!(!path_is_relative(".other"));
    assert!(!path_is_relative("/abs/other"));
}

#[test]
fn declaration_file_names() {
    assert!(is_declaration_file_name("./a.d.ts"));
    assert!(is_declaration_file_name("./a.d.mts"));
    assert!(is_declaration_file_name("./styles.d.css.ts"));
    assert!(!is_declaration_file_name("./a.ts"));
    assert!(!is_declaration_file_name("./a.d.x.y.ts"));
}

#[test]
fn change_extension_replaces_longest_known_extension() {
    assert_eq!(change_extension("./a.ts", ".js"), "./a.js");
    assert_eq!(change_extension("./a.d.ts", ".js"), "./a.js");
    assert_eq!(change_extension("./a.b.mts", ".mjs"), "./a.b.mjs");
    assert_eq!(change_extension("./a", ".js"), "./a.js");
}

#[test]
fn output_extension_by_source_extension() {
    assert_eq!(output_extension("./a.ts", JsxEmit::None), ".js");
    assert_eq!(output_extension("./a.tsx", JsxEmit::None), ".js");
    assert_eq!(output_extension("./a.tsx", JsxEmit::Preserve), ".jsx");
    assert_eq!(output_extension("./a.mts", JsxEmit::None), ".mjs");
    assert_eq!(output_extension("./a.cts", JsxEmit::None), ".cjs");
    assert_eq!(output_extension("./a.json", JsxEmit::None), ".json");
}

#[test]
fn rewrite_module_specifier_only_for_relative_ts_files() {
    let options = rewriting();
    assert_eq!(
        rewrite_module_specifier_text("./other.ts", &options).as_deref(),
        Some("./other.js")
    );
    assert_eq!(
        rewrite_module_specifier_text("../lib/x.mts", &options).as_deref(),
        Some("../lib/x.mjs")
    );
    assert_eq!(rewrite_module_specifier_text("other.ts", &options), None);
    assert_eq!(rewrite_module_specifier_text("./other.d.ts", &options), None);
    assert_eq!(rewrite_module_specifier_text("./other.js", &options), None);

    let disabled = CompilerOptions::with_module(ModuleKind::CommonJS);
    assert_eq!(rewrite_module_specifier_text("./other.ts", &disabled), None);
}

#[test]
fn identifiers_from_module_names() {
    assert_eq!(make_identifier_from_module_name("other"), "other");
    assert_eq!(make_identifier_from_module_name("./_namespaces/ts.js"), "ts_js");
    assert_eq!(make_identifier_from_module_name("@scope/pkg-name"), "pkg_name");
    assert_eq!(make_identifier_from_module_name("./2d"), "_2d");
}
