use clap::Parser;
use std::path::{Path, PathBuf};

use super::args::CliArgs;
use super::driver::{
    collect_inputs, emit_files, emit_source_file, load_source_file, output_file_name,
    resolve_config,
};
use tsz_ast::SourceFile;
use tsz_common::{CompilerOptions, JsxEmit, ModuleKind};

const EXPORT_DEFAULT_ONE: &str = r#"{
  "file_name": "src/main.ts",
  "statements": [
    { "kind": "ExportAssignment", "expression": { "kind": "NumericLiteral", "text": "1" } }
  ]
}"#;

fn args(argv: &[&str]) -> CliArgs {
    let argv = std::iter::once("tsz-modules").chain(argv.iter().copied());
    CliArgs::try_parse_from(argv).expect("args should parse")
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test directory");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn cli_flags_override_tsconfig() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(
        temp.path(),
        "tsconfig.json",
        r#"{
          "compilerOptions": { "module": "commonjs", "outDir": "out" },
          "files": ["ast/main.json"]
        }"#,
    );

    let config = resolve_config(&args(&["--module", "esnext", "--importHelpers"]), temp.path())
        .expect("config should resolve");
    assert_eq!(config.options.module, Some(ModuleKind::ESNext));
    assert_eq!(config.options.import_helpers, Some(true));
    assert_eq!(config.options.es_module_interop, None);
    assert_eq!(config.out_dir, Some(temp.path().join("out")));
    assert_eq!(config.inputs, vec![temp.path().join("ast/main.json")]);
}

#[test]
fn explicit_project_and_files() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(
        temp.path(),
        "configs/tsconfig.json",
        r#"{ "compilerOptions": { "module": "node16" }, "files": ["ignored.json"] }"#,
    );

    let config = resolve_config(&args(&["-p", "configs", "a.json"]), temp.path())
        .expect("config should resolve");
    assert_eq!(config.options.module, Some(ModuleKind::Node16));
    assert_eq!(config.inputs, vec![temp.path().join("a.json")]);
    assert!(config.out_dir.is_none());
}

#[test]
fn no_inputs_is_an_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    let error = resolve_config(&args(&[]), temp.path()).expect_err("should fail");
    assert!(error.to_string().contains("no input files"));
}

// =============================================================================
// Inputs
// =============================================================================

#[test]
fn directories_expand_to_sorted_json_files() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "ast/b.json", "{}");
    write_file(temp.path(), "ast/nested/a.json", "{}");
    write_file(temp.path(), "ast/tsconfig.json", "{}");
    write_file(temp.path(), "ast/notes.txt", "");
    let single = temp.path().join("single.json");

    let inputs = collect_inputs(&[temp.path().join("ast"), single.clone()]).expect("walk");
    assert_eq!(
        inputs,
        vec![
            temp.path().join("ast/b.json"),
            temp.path().join("ast/nested/a.json"),
            single,
        ]
    );
}

#[test]
fn load_source_file_derives_module_indicators() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = write_file(temp.path(), "main.json", EXPORT_DEFAULT_ONE);
    let options = CompilerOptions::with_module(ModuleKind::CommonJS);

    let file = load_source_file(&path, &options).expect("should load");
    assert_eq!(file.file_name, "src/main.ts");
    assert!(file.external_module_indicator);
    assert!(!file.is_declaration_file);
}

#[test]
fn malformed_syntax_tree_names_the_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = write_file(temp.path(), "broken.json", r#"{ "file_name": "a.ts" }"#);
    let error = load_source_file(&path, &CompilerOptions::default()).expect_err("should fail");
    assert!(error.to_string().contains("broken.json"));
}

// =============================================================================
// Emit
// =============================================================================

#[test]
fn emit_source_file_uses_module_option() {
    let file: SourceFile = serde_json::from_str(EXPORT_DEFAULT_ONE).expect("valid tree");
    let mut cjs = file.clone();
    let options = CompilerOptions::with_module(ModuleKind::CommonJS);
    cjs.set_module_indicators(&options);
    assert!(emit_source_file(cjs, &options).ends_with("exports.default = 1;\n"));

    let mut esm = file;
    let options = CompilerOptions::with_module(ModuleKind::ESNext);
    esm.set_module_indicators(&options);
    assert_eq!(emit_source_file(esm, &options), "export default 1;\n");
}

#[test]
#[should_panic(expected = "import= for internal module references")]
fn entity_import_equals_aborts_emit() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = write_file(
        temp.path(),
        "main.json",
        r#"{
          "file_name": "main.ts",
          "statements": [
            { "kind": "ExportAssignment", "expression": { "kind": "NumericLiteral", "text": "1" } },
            {
              "kind": "ImportEquals",
              "name": { "kind": "Identifier", "text": "x" },
              "module_reference": { "entity": { "kind": "Identifier", "text": "N" } }
            }
          ]
        }"#,
    );
    let options = CompilerOptions::with_module(ModuleKind::CommonJS);
    let file = load_source_file(&path, &options).expect("the JSON shape is valid");
    let _ = emit_source_file(file, &options);
}

#[test]
fn declaration_files_produce_no_output() {
    let temp = tempfile::tempdir().expect("temp dir");
    let declaration = write_file(
        temp.path(),
        "types.json",
        r#"{ "file_name": "types.d.ts", "statements": [] }"#,
    );
    let main = write_file(temp.path(), "main.json", EXPORT_DEFAULT_ONE);

    let outputs = emit_files(
        &[declaration, main.clone()],
        &CompilerOptions::with_module(ModuleKind::ESNext),
    )
    .expect("emit");
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].input, main);
    assert_eq!(outputs[0].output_name, PathBuf::from("src/main.js"));
}

#[test]
fn output_names_follow_source_extensions() {
    let options = CompilerOptions::default();
    assert_eq!(output_file_name("a.ts", &options), PathBuf::from("a.js"));
    assert_eq!(output_file_name("lib/b.mts", &options), PathBuf::from("lib/b.mjs"));
    assert_eq!(output_file_name("c.cts", &options), PathBuf::from("c.cjs"));
    assert_eq!(output_file_name("/abs/d.ts", &options), PathBuf::from("d.js"));

    let preserve = CompilerOptions {
        jsx: Some(JsxEmit::Preserve),
        ..CompilerOptions::default()
    };
    assert_eq!(output_file_name("e.tsx", &preserve), PathBuf::from("e.jsx"));
}
