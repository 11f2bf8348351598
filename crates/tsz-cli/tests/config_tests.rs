use std::path::{Path, PathBuf};

use super::config::{find_tsconfig, load_tsconfig, parse_tsconfig, resolve_compiler_options};
use tsz_common::{JsxEmit, ModuleDetectionKind, ModuleKind, ScriptTarget};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

#[test]
fn parses_jsonc_with_comments_and_trailing_commas() {
    let input = r#"
    {
      // line comment
      "compilerOptions": {
        "module": "nodenext", /* inline */
        "target": "es2022",
      },
      "files": ["a.json", "b.json",],
    }
    "#;

    let config = parse_tsconfig(input).expect("should parse JSONC");
    let options = config.compiler_options.expect("compilerOptions missing");
    assert_eq!(options.module.as_deref(), Some("nodenext"));
    assert_eq!(options.target.as_deref(), Some("es2022"));
    assert_eq!(
        config.files,
        Some(vec!["a.json".to_string(), "b.json".to_string()])
    );
}

#[test]
fn comment_markers_inside_strings_are_kept() {
    let input = r#"{ "compilerOptions": { "outDir": "dist//out/*x*/", }, }"#;
    let config = parse_tsconfig(input).expect("should parse");
    let options = config.compiler_options.expect("compilerOptions missing");
    assert_eq!(options.out_dir.as_deref(), Some("dist//out/*x*/"));
}

#[test]
fn commas_inside_strings_are_kept() {
    let input = r#"{ "files": ["a,]", "b"] }"#;
    let config = parse_tsconfig(input).expect("should parse");
    assert_eq!(config.files, Some(vec!["a,]".to_string(), "b".to_string()]));
}

#[test]
fn booleans_accept_strings() {
    let config = parse_tsconfig(
        r#"{ "compilerOptions": { "esModuleInterop": "yes", "importHelpers": "off", "strict": true } }"#,
    )
    .expect("should parse");
    let options = config.compiler_options.expect("compilerOptions missing");
    assert_eq!(options.es_module_interop, Some(true));
    assert_eq!(options.import_helpers, Some(false));
    assert_eq!(options.strict, Some(true));
}

#[test]
fn invalid_boolean_string_is_an_error() {
    let result = parse_tsconfig(r#"{ "compilerOptions": { "strict": "maybe" } }"#);
    assert!(result.is_err());
}

#[test]
fn resolves_option_values() {
    let config = parse_tsconfig(
        r#"{ "compilerOptions": {
            "module": "Node-Next",
            "target": "ES6",
            "jsx": "react-jsx",
            "moduleDetection": "force",
            "rewriteRelativeImportExtensions": true
        } }"#,
    )
    .expect("should parse");
    let resolved =
        resolve_compiler_options(config.compiler_options.as_ref()).expect("should resolve");

    assert_eq!(resolved.module, Some(ModuleKind::NodeNext));
    assert_eq!(resolved.target, Some(ScriptTarget::ES2015));
    assert_eq!(resolved.jsx, Some(JsxEmit::ReactJsx));
    assert_eq!(resolved.module_detection, Some(ModuleDetectionKind::Force));
    assert_eq!(resolved.rewrite_relative_import_extensions, Some(true));
    assert_eq!(resolved.es_module_interop, None);
}

#[test]
fn unknown_module_is_rejected() {
    let config = parse_tsconfig(r#"{ "compilerOptions": { "module": "webpack" } }"#)
        .expect("should parse");
    let error = resolve_compiler_options(config.compiler_options.as_ref())
        .expect_err("unknown module should fail");
    assert!(error.to_string().contains("webpack"));
}

#[test]
fn missing_compiler_options_resolve_to_defaults() {
    let resolved = resolve_compiler_options(None).expect("should resolve");
    assert_eq!(resolved, tsz_common::CompilerOptions::default());
}

#[test]
fn load_tsconfig_merges_extends() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(
        temp.path(),
        "tsconfig.base.json",
        r#"{
          "compilerOptions": { "module": "commonjs", "esModuleInterop": true, "target": "es2020" },
          "files": ["base.json"]
        }"#,
    );
    let child = write_file(
        temp.path(),
        "tsconfig.json",
        r#"{
          "extends": "./tsconfig.base",
          "compilerOptions": { "module": "esnext" }
        }"#,
    );

    let config = load_tsconfig(&child).expect("should load");
    assert!(config.extends.is_none());
    let options = config.compiler_options.expect("compilerOptions missing");
    assert_eq!(options.module.as_deref(), Some("esnext"));
    assert_eq!(options.target.as_deref(), Some("es2020"));
    assert_eq!(options.es_module_interop, Some(true));
    assert_eq!(config.files, Some(vec!["base.json".to_string()]));
}

#[test]
fn load_tsconfig_detects_extends_cycles() {
    let temp = tempfile::tempdir().expect("temp dir");
    let first = write_file(temp.path(), "a.json", r#"{ "extends": "./b.json" }"#);
    write_file(temp.path(), "b.json", r#"{ "extends": "./a.json" }"#);

    let error = load_tsconfig(&first).expect_err("cycle should fail");
    assert!(format!("{error:#}").contains("cycle"));
}

#[test]
fn load_tsconfig_reports_missing_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    let error = load_tsconfig(&temp.path().join("missing.json")).expect_err("should fail");
    assert!(error.to_string().contains("failed to read tsconfig"));
}

#[test]
fn find_tsconfig_looks_inside_directories() {
    let temp = tempfile::tempdir().expect("temp dir");
    assert_eq!(find_tsconfig(temp.path()), temp.path().join("tsconfig.json"));
    let file = temp.path().join("custom.json");
    assert_eq!(find_tsconfig(&file), file);
}
