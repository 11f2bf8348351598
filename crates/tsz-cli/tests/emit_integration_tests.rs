//! End-to-end runs of the `tsz-modules` driver over JSON syntax trees on disk.

use clap::Parser;
use std::path::Path;

use tsz_cli::args::CliArgs;
use tsz_cli::driver;

const USE_STRICT_AND_MARKER: &str =
    "\"use strict\";\nObject.defineProperty(exports, \"__esModule\", { value: true });\n";

fn write_file(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test directory");
    }
    std::fs::write(path, contents).expect("failed to write test file");
}

fn run(cwd: &Path, argv: &[&str]) -> String {
    let argv = std::iter::once("tsz-modules").chain(argv.iter().copied());
    let args = CliArgs::try_parse_from(argv).expect("args should parse");
    let mut out = Vec::new();
    driver::run(&args, cwd, &mut out).expect("run should succeed");
    String::from_utf8(out).expect("output should be UTF-8")
}

/// `import { helper } from "./helper"; export const value = helper();`
fn import_and_export(file_name: &str) -> String {
    format!(
        r#"{{
  "file_name": "{file_name}",
  "statements": [
    {{
      "kind": "Import",
      "import_clause": {{
        "named_bindings": {{
          "kind": "NamedImports",
          "elements": [{{ "name": {{ "kind": "Identifier", "text": "helper" }} }}]
        }}
      }},
      "module_specifier": {{ "kind": "StringLiteral", "text": "./helper" }}
    }},
    {{
      "kind": "Variable",
      "modifiers": 1,
      "declaration_list": {{
        "kind": "const",
        "declarations": [{{
          "name": {{ "kind": "Identifier", "text": "value" }},
          "initializer": {{
            "kind": "Call",
            "expression": {{ "kind": "Identifier", "text": "helper" }},
            "arguments": []
          }}
        }}]
      }}
    }}
  ]
}}"#
    )
}

#[test]
fn emits_commonjs_to_stdout() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "main.json", &import_and_export("main.ts"));

    let output = run(temp.path(), &["--module", "commonjs", "main.json"]);
    assert_eq!(
        output,
        format!(
            "{USE_STRICT_AND_MARKER}exports.value = void 0;\nconst helper_1 = require(\"./helper\");\nexports.value = (0, helper_1.helper)();\n"
        )
    );
}

#[test]
fn emits_es_modules_unchanged() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "main.json", &import_and_export("main.ts"));

    let output = run(temp.path(), &["--module", "esnext", "main.json"]);
    assert_eq!(
        output,
        "import { helper } from \"./helper\";\nexport const value = helper();\n"
    );
}

#[test]
fn nodenext_picks_format_per_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "ast/a.json", &import_and_export("a.mts"));
    write_file(temp.path(), "ast/b.json", &import_and_export("b.cts"));

    let output = run(temp.path(), &["--module", "nodenext", "ast"]);
    assert!(output.starts_with("//// [a.mjs]\nimport { helper } from \"./helper\";\n"));
    let cjs = output.find("//// [b.cjs]\n").expect("b.cjs header");
    assert!(output[cjs..].contains("const helper_1 = require(\"./helper\");\n"));
}

#[test]
fn tsconfig_supplies_options_inputs_and_out_dir() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(
        temp.path(),
        "tsconfig.json",
        r#"{
          // emitted next to the sources
          "compilerOptions": { "module": "commonjs", "outDir": "dist", },
          "files": ["ast/main.json"],
        }"#,
    );
    write_file(temp.path(), "ast/main.json", &import_and_export("src/main.ts"));

    let output = run(temp.path(), &[]);
    assert!(output.is_empty());

    let written = std::fs::read_to_string(temp.path().join("dist/src/main.js"))
        .expect("output should be written");
    assert!(written.starts_with(USE_STRICT_AND_MARKER));
    assert!(written.ends_with("exports.value = (0, helper_1.helper)();\n"));
}

#[test]
fn show_config_prints_derived_options() {
    let temp = tempfile::tempdir().expect("temp dir");
    let output = run(temp.path(), &["--module", "node16", "--showConfig", "unused.json"]);

    let shown: serde_json::Value = serde_json::from_str(&output).expect("JSON output");
    assert_eq!(shown["compilerOptions"]["module"], "node16");
    assert_eq!(shown["compilerOptions"]["esModuleInterop"], true);
}

#[test]
fn list_files_only_prints_inputs() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "ast/one.json", "{}");

    let output = run(temp.path(), &["--listFilesOnly", "ast"]);
    assert_eq!(output.trim_end(), temp.path().join("ast/one.json").display().to_string());
}

#[test]
fn missing_input_is_reported() {
    let temp = tempfile::tempdir().expect("temp dir");
    let args = CliArgs::try_parse_from(["tsz-modules", "missing.json"]).expect("args");
    let error = driver::run(&args, temp.path(), &mut Vec::new()).expect_err("should fail");
    assert!(error.to_string().contains("missing.json"));
}
