//! Emit driver: resolve options, read JSON-encoded source files, run module
//! emit over them in parallel and write the JavaScript.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, debug_span};
use walkdir::WalkDir;

use tsz_ast::SourceFile;
use tsz_binder::BinderState;
use tsz_common::CompilerOptions;
use tsz_common::path::{EXTENSION_JSON, base_file_name, change_extension, output_extension};
use tsz_emitter::{EmitContext, TransformOptions, get_module_transformer, print_source_file};

use crate::args::CliArgs;
use crate::config::{find_tsconfig, load_tsconfig, resolve_compiler_options};

/// Options and inputs after merging `tsconfig.json` with the command line.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub options: CompilerOptions,
    pub out_dir: Option<PathBuf>,
    /// Files and directories as given; see [`collect_inputs`].
    pub inputs: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOutput {
    /// The JSON file the source was read from.
    pub input: PathBuf,
    /// Path of the JavaScript file, relative to the output directory.
    pub output_name: PathBuf,
    pub text: String,
}

/// Run the command line: emit every input, then write to `--outDir` or
/// print to `out`.
pub fn run(args: &CliArgs, cwd: &Path, out: &mut impl Write) -> Result<()> {
    let config = resolve_config(args, cwd)?;

    if args.show_config {
        let shown = show_config(&config.options);
        writeln!(out, "{}", serde_json::to_string_pretty(&shown)?)?;
        return Ok(());
    }

    let inputs = collect_inputs(&config.inputs)?;
    if args.list_files_only {
        for input in &inputs {
            writeln!(out, "{}", input.display())?;
        }
        return Ok(());
    }

    let outputs = emit_files(&inputs, &config.options)?;
    match &config.out_dir {
        Some(out_dir) => write_outputs(&outputs, out_dir),
        None => print_outputs(&outputs, out),
    }
}

pub fn resolve_config(args: &CliArgs, cwd: &Path) -> Result<ResolvedConfig> {
    let tsconfig_path = match &args.project {
        Some(project) => Some(find_tsconfig(&cwd.join(project))),
        None => Some(cwd.join("tsconfig.json")).filter(|path| path.is_file()),
    };

    let mut options = CompilerOptions::default();
    let mut out_dir = None;
    let mut inputs = Vec::new();

    if let Some(path) = &tsconfig_path {
        let tsconfig = load_tsconfig(path)?;
        let base_dir = path.parent().unwrap_or(cwd);
        options = resolve_compiler_options(tsconfig.compiler_options.as_ref())?;
        out_dir = tsconfig
            .compiler_options
            .as_ref()
            .and_then(|options| options.out_dir.as_deref())
            .map(|dir| base_dir.join(dir));
        inputs = tsconfig
            .files
            .unwrap_or_default()
            .iter()
            .map(|file| base_dir.join(file))
            .collect();
    }

    apply_cli_overrides(&mut options, args);
    if let Some(dir) = &args.out_dir {
        out_dir = Some(cwd.join(dir));
    }
    if !args.files.is_empty() {
        inputs = args.files.iter().map(|file| cwd.join(file)).collect();
    }
    if inputs.is_empty() {
        bail!("no input files: pass JSON-encoded source files or set \"files\" in tsconfig.json");
    }

    Ok(ResolvedConfig {
        options,
        out_dir,
        inputs,
    })
}

/// Flags given on the command line replace the `tsconfig.json` values.
fn apply_cli_overrides(options: &mut CompilerOptions, args: &CliArgs) {
    if let Some(target) = args.target {
        options.target = Some(target.to_script_target());
    }
    if let Some(module) = args.module {
        options.module = Some(module.to_module_kind());
    }
    if let Some(jsx) = args.jsx {
        options.jsx = Some(jsx.to_jsx_emit());
    }
    if let Some(detection) = args.module_detection {
        options.module_detection = Some(detection.to_module_detection_kind());
    }

    let flags = [
        (args.es_module_interop, &mut options.es_module_interop),
        (args.import_helpers, &mut options.import_helpers),
        (
            args.rewrite_relative_import_extensions,
            &mut options.rewrite_relative_import_extensions,
        ),
        (args.isolated_modules, &mut options.isolated_modules),
        (args.verbatim_module_syntax, &mut options.verbatim_module_syntax),
        (args.always_strict, &mut options.always_strict),
        (args.strict, &mut options.strict),
    ];
    for (set, option) in flags {
        if set {
            *option = Some(true);
        }
    }
}

fn show_config(options: &CompilerOptions) -> serde_json::Value {
    serde_json::json!({
        "compilerOptions": {
            "module": options.emit_module_kind(),
            "target": options.emit_script_target(),
            "esModuleInterop": options.es_module_interop(),
            "importHelpers": options.import_helpers(),
            "rewriteRelativeImportExtensions": options.rewrite_relative_import_extensions(),
            "isolatedModules": options.isolated_modules(),
            "alwaysStrict": options.always_strict(),
            "moduleDetection": options.module_detection(),
        }
    })
}

/// Expand directories into the `*.json` files beneath them, sorted by path.
/// `tsconfig.json` files found while walking are skipped.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
            let entry_path = entry.path();
            let is_json = entry_path
                .to_str()
                .is_some_and(|name| name.ends_with(EXTENSION_JSON));
            if entry.file_type().is_file()
                && is_json
                && entry.file_name() != "tsconfig.json"
            {
                found.push(entry_path.to_path_buf());
            }
        }
        found.sort();
        inputs.extend(found);
    }
    Ok(inputs)
}

/// Read one JSON-encoded [`SourceFile`] and derive its module indicators.
///
/// Only the JSON shape is checked here. A tree that deserializes but could
/// not come from a parser, such as `import x = N.y` in a module or an object
/// binding element that is neither named nor keyed, is accepted and later
/// makes [`emit_source_file`] panic.
pub fn load_source_file(path: &Path, options: &CompilerOptions) -> Result<SourceFile> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut file: SourceFile = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse syntax tree: {}", path.display()))?;
    file.set_module_indicators(options);
    Ok(file)
}

/// Bind `file`, run the module transform chosen for it and print the result.
///
/// # Panics
///
/// Panics on trees the module transforms do not accept: `import x = N.y`
/// (an entity-name reference, which namespace lowering would have removed)
/// and object binding elements without a property name whose name is a
/// pattern. [`emit_files`] does not catch the panic, so one such input
/// aborts the whole run.
#[must_use]
pub fn emit_source_file(file: SourceFile, options: &CompilerOptions) -> String {
    let _span = debug_span!("emit_source_file", file = %file.file_name).entered();

    let mut binder = BinderState::new();
    binder.bind_source_file(&file);
    let transform_options = TransformOptions::new(options.clone(), Arc::new(binder));
    let factory = get_module_transformer(options);
    let mut transformer = factory(&transform_options);

    let mut ctx = EmitContext::new();
    let file = transformer.transform_source_file(&mut ctx, file);
    print_source_file(&ctx, &file)
}

/// Emit every input in parallel. Declaration files produce no output.
///
/// # Panics
///
/// Panics when an input holds a tree [`emit_source_file`] rejects.
pub fn emit_files(inputs: &[PathBuf], options: &CompilerOptions) -> Result<Vec<EmitOutput>> {
    let outputs: Vec<Option<EmitOutput>> = inputs
        .par_iter()
        .map(|input| -> Result<Option<EmitOutput>> {
            let file = load_source_file(input, options)?;
            if file.is_declaration_file {
                debug!(file = %file.file_name, "skipping declaration file");
                return Ok(None);
            }
            let output_name = output_file_name(&file.file_name, options);
            let text = emit_source_file(file, options);
            Ok(Some(EmitOutput {
                input: input.clone(),
                output_name,
                text,
            }))
        })
        .collect::<Result<_>>()?;
    Ok(outputs.into_iter().flatten().collect())
}

/// `src/a.mts` -> `src/a.mjs`. Absolute source names keep only their base
/// name.
pub fn output_file_name(file_name: &str, options: &CompilerOptions) -> PathBuf {
    let relative = if Path::new(file_name).is_absolute() {
        base_file_name(file_name)
    } else {
        file_name
    };
    PathBuf::from(change_extension(
        relative,
        output_extension(file_name, options.jsx()),
    ))
}

fn write_outputs(outputs: &[EmitOutput], out_dir: &Path) -> Result<()> {
    for output in outputs {
        let path = out_dir.join(&output.output_name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &output.text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "wrote output");
    }
    Ok(())
}

/// A single output is printed as is; several are each preceded by a
/// `//// [name]` header.
fn print_outputs(outputs: &[EmitOutput], out: &mut impl Write) -> Result<()> {
    if let [output] = outputs {
        out.write_all(output.text.as_bytes())?;
        return Ok(());
    }
    for output in outputs {
        writeln!(out, "//// [{}]", output.output_name.display())?;
        out.write_all(output.text.as_bytes())?;
    }
    Ok(())
}
