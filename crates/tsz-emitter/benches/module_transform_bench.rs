//! Module transform benchmark
//!
//! Measures bind + transform + print throughput over synthetic modules for
//! each output format.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::sync::Arc;

use tsz_ast::{SourceFile, Statement};
use tsz_binder::BinderState;
use tsz_common::{CompilerOptions, ModuleKind};
use tsz_emitter::{EmitContext, TransformOptions, get_module_transformer, print_source_file};

fn ident(text: &str) -> Value {
    json!({ "kind": "Identifier", "text": text })
}

/// `count` repetitions of
/// `import { f_i } from "./dep_i"; export let v_i = f_i(); v_i++;`
fn generate_module(count: usize) -> Vec<Statement> {
    let mut statements = Vec::with_capacity(count * 3);
    for i in 0..count {
        let function = format!("f{i}");
        let variable = format!("v{i}");
        statements.push(json!({
            "kind": "Import",
            "import_clause": {
                "named_bindings": { "kind": "NamedImports", "elements": [{ "name": ident(&function) }] }
            },
            "module_specifier": { "kind": "StringLiteral", "text": format!("./dep{i}") }
        }));
        statements.push(json!({
            "kind": "Variable",
            "modifiers": 1,
            "declaration_list": {
                "kind": "let",
                "declarations": [{
                    "name": ident(&variable),
                    "initializer": { "kind": "Call", "expression": ident(&function), "arguments": [] }
                }]
            }
        }));
        statements.push(json!({
            "kind": "Expression",
            "expression": { "kind": "PostfixUnary", "operand": ident(&variable), "operator": "++" }
        }));
    }
    serde_json::from_value(Value::Array(statements)).expect("generated statements deserialize")
}

fn emit(file: &SourceFile, binder: &Arc<BinderState>, options: &CompilerOptions) -> String {
    let transform_options = TransformOptions::new(options.clone(), binder.clone());
    let factory = get_module_transformer(options);
    let mut transformer = factory(&transform_options);
    let mut ctx = EmitContext::new();
    let file = transformer.transform_source_file(&mut ctx, file.clone());
    print_source_file(&ctx, &file)
}

fn bench_module_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("module_transform");
    for count in [10, 100, 1000] {
        for module in [ModuleKind::CommonJS, ModuleKind::ESNext] {
            let options = CompilerOptions::with_module(module);
            let file = SourceFile::new("bench.ts", generate_module(count), &options);
            let mut binder = BinderState::new();
            binder.bind_source_file(&file);
            let binder = Arc::new(binder);

            group.throughput(Throughput::Elements(file.statements.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{module:?}"), count),
                &file,
                |b, file| b.iter(|| black_box(emit(file, &binder, &options))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_module_transforms);
criterion_main!(benches);
