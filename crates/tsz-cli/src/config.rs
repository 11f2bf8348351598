//! `tsconfig.json` loading.
//!
//! Files are read as JSONC (comments and trailing commas allowed), `extends`
//! chains are followed with the child's settings winning, and the string
//! values of `compilerOptions` are resolved into [`ResolvedCompilerOptions`].

use anyhow::{Context, Result, anyhow, bail};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use tsz_common::CompilerOptions as ResolvedCompilerOptions;
use tsz_common::{JsxEmit, ModuleDetectionKind, ModuleKind, ScriptTarget};

/// Accepts `true` as well as `"true"`, `"yes"`, `"1"` and `"on"` (and their
/// negations) for boolean options.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    let Some(value) = Option::<BoolOrString>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match value {
        BoolOrString::Bool(value) => Ok(Some(value)),
        BoolOrString::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{text}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

/// `compilerOptions` as written in the file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default)]
    pub jsx: Option<String>,
    #[serde(default)]
    pub module_detection: Option<String>,
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub es_module_interop: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub import_helpers: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub rewrite_relative_import_extensions: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub isolated_modules: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub verbatim_module_syntax: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub always_strict: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub strict: Option<bool>,
}

pub fn resolve_compiler_options(
    options: Option<&CompilerOptions>,
) -> Result<ResolvedCompilerOptions> {
    let mut resolved = ResolvedCompilerOptions::default();
    let Some(options) = options else {
        return Ok(resolved);
    };

    if let Some(target) = options.target.as_deref() {
        resolved.target = Some(parse_script_target(target)?);
    }
    if let Some(module) = options.module.as_deref() {
        resolved.module = Some(parse_module_kind(module)?);
    }
    if let Some(jsx) = options.jsx.as_deref() {
        resolved.jsx = Some(parse_jsx_emit(jsx)?);
    }
    if let Some(detection) = options.module_detection.as_deref() {
        resolved.module_detection = Some(parse_module_detection(detection)?);
    }

    resolved.es_module_interop = options.es_module_interop;
    resolved.import_helpers = options.import_helpers;
    resolved.rewrite_relative_import_extensions = options.rewrite_relative_import_extensions;
    resolved.isolated_modules = options.isolated_modules;
    resolved.verbatim_module_syntax = options.verbatim_module_syntax;
    resolved.always_strict = options.always_strict;
    resolved.strict = options.strict;

    Ok(resolved)
}

pub fn parse_tsconfig(source: &str) -> Result<TsConfig> {
    let json = strip_jsonc(source);
    serde_json::from_str(&json).context("failed to parse tsconfig JSON")
}

pub fn load_tsconfig(path: &Path) -> Result<TsConfig> {
    let mut visited = FxHashSet::default();
    load_tsconfig_inner(path, &mut visited)
}

/// `tsconfig.json` inside `path` when it is a directory, else `path` itself.
pub fn find_tsconfig(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join("tsconfig.json")
    } else {
        path.to_path_buf()
    }
}

fn load_tsconfig_inner(path: &Path, visited: &mut FxHashSet<PathBuf>) -> Result<TsConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("tsconfig extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tsconfig: {}", path.display()))?;
    let mut config = parse_tsconfig(&source)
        .with_context(|| format!("failed to parse tsconfig: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        let base = load_tsconfig_inner(&base_path, visited)?;
        config = merge_configs(base, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("tsconfig has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }
    Ok(if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    })
}

fn merge_configs(base: TsConfig, child: TsConfig) -> TsConfig {
    let compiler_options = match (base.compiler_options, child.compiler_options) {
        (Some(base), Some(child)) => Some(merge_compiler_options(base, child)),
        (base, child) => child.or(base),
    };
    TsConfig {
        extends: None,
        compiler_options,
        files: child.files.or(base.files),
    }
}

fn merge_compiler_options(base: CompilerOptions, child: CompilerOptions) -> CompilerOptions {
    CompilerOptions {
        target: child.target.or(base.target),
        module: child.module.or(base.module),
        jsx: child.jsx.or(base.jsx),
        module_detection: child.module_detection.or(base.module_detection),
        out_dir: child.out_dir.or(base.out_dir),
        es_module_interop: child.es_module_interop.or(base.es_module_interop),
        import_helpers: child.import_helpers.or(base.import_helpers),
        rewrite_relative_import_extensions: child
            .rewrite_relative_import_extensions
            .or(base.rewrite_relative_import_extensions),
        isolated_modules: child.isolated_modules.or(base.isolated_modules),
        verbatim_module_syntax: child.verbatim_module_syntax.or(base.verbatim_module_syntax),
        always_strict: child.always_strict.or(base.always_strict),
        strict: child.strict.or(base.strict),
    }
}

// =============================================================================
// Option values
// =============================================================================

fn parse_script_target(value: &str) -> Result<ScriptTarget> {
    let target = match normalize_option(value).as_str() {
        "es3" => ScriptTarget::ES3,
        "es5" => ScriptTarget::ES5,
        "es6" | "es2015" => ScriptTarget::ES2015,
        "es2016" => ScriptTarget::ES2016,
        "es2017" => ScriptTarget::ES2017,
        "es2018" => ScriptTarget::ES2018,
        "es2019" => ScriptTarget::ES2019,
        "es2020" => ScriptTarget::ES2020,
        "es2021" => ScriptTarget::ES2021,
        "es2022" => ScriptTarget::ES2022,
        "es2023" => ScriptTarget::ES2023,
        "es2024" => ScriptTarget::ES2024,
        "esnext" => ScriptTarget::ESNext,
        _ => bail!("unsupported compilerOptions.target '{value}'"),
    };
    Ok(target)
}

fn parse_module_kind(value: &str) -> Result<ModuleKind> {
    let module = match normalize_option(value).as_str() {
        "none" => ModuleKind::None,
        "commonjs" => ModuleKind::CommonJS,
        "amd" => ModuleKind::AMD,
        "umd" => ModuleKind::UMD,
        "system" => ModuleKind::System,
        "es6" | "es2015" => ModuleKind::ES2015,
        "es2020" => ModuleKind::ES2020,
        "es2022" => ModuleKind::ES2022,
        "esnext" => ModuleKind::ESNext,
        "node16" => ModuleKind::Node16,
        "node18" => ModuleKind::Node18,
        "nodenext" => ModuleKind::NodeNext,
        "preserve" => ModuleKind::Preserve,
        _ => bail!("unsupported compilerOptions.module '{value}'"),
    };
    Ok(module)
}

fn parse_jsx_emit(value: &str) -> Result<JsxEmit> {
    let jsx = match normalize_option(value).as_str() {
        "preserve" => JsxEmit::Preserve,
        "react" => JsxEmit::React,
        "reactnative" => JsxEmit::ReactNative,
        "reactjsx" => JsxEmit::ReactJsx,
        "reactjsxdev" => JsxEmit::ReactJsxDev,
        _ => bail!("unsupported compilerOptions.jsx '{value}'"),
    };
    Ok(jsx)
}

fn parse_module_detection(value: &str) -> Result<ModuleDetectionKind> {
    let detection = match normalize_option(value).as_str() {
        "auto" => ModuleDetectionKind::Auto,
        "legacy" => ModuleDetectionKind::Legacy,
        "force" => ModuleDetectionKind::Force,
        _ => bail!("unsupported compilerOptions.moduleDetection '{value}'"),
    };
    Ok(detection)
}

/// Lowercase, without `-`, `_` or whitespace: `"Node-Next"` -> `"nodenext"`.
fn normalize_option(value: &str) -> String {
    value
        .chars()
        .filter(|ch| *ch != '-' && *ch != '_' && !ch.is_whitespace())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

// =============================================================================
// JSONC
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    String { escaped: bool },
    LineComment,
    BlockComment,
}

/// Drop `//` and `/* */` comments and commas directly before `}` or `]`.
/// Newlines inside comments are kept so error positions still line up.
fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut state = Scan::Code;
    // Byte offset in `out` of a comma that may turn out to be trailing.
    let mut pending_comma: Option<usize> = None;

    while let Some(ch) = chars.next() {
        match state {
            Scan::LineComment => {
                if ch == '\n' {
                    state = Scan::Code;
                    out.push(ch);
                }
            }
            Scan::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = Scan::Code;
                } else if ch == '\n' {
                    out.push(ch);
                }
            }
            Scan::String { escaped } => {
                out.push(ch);
                state = match ch {
                    _ if escaped => Scan::String { escaped: false },
                    '\\' => Scan::String { escaped: true },
                    '"' => Scan::Code,
                    _ => state,
                };
            }
            Scan::Code => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = Scan::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Scan::BlockComment;
                }
                '}' | ']' => {
                    if let Some(index) = pending_comma.take() {
                        out.remove(index);
                    }
                    out.push(ch);
                }
                ',' => {
                    pending_comma = Some(out.len());
                    out.push(ch);
                }
                ch if ch.is_whitespace() => out.push(ch),
                _ => {
                    pending_comma = None;
                    if ch == '"' {
                        state = Scan::String { escaped: false };
                    }
                    out.push(ch);
                }
            },
        }
    }

    out
}
