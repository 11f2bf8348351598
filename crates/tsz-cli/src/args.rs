use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use tsz_common::{JsxEmit, ModuleDetectionKind, ModuleKind, ScriptTarget};

/// CLI arguments for the `tsz-modules` binary.
#[derive(Parser, Debug)]
#[command(
    name = "tsz-modules",
    version,
    about = "Rewrite JSON-encoded TypeScript syntax trees into CommonJS or ES module JavaScript"
)]
pub struct CliArgs {
    // ==================== Command-line Only Options ====================
    /// Path to tsconfig.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Print the resolved compiler options instead of emitting.
    #[arg(long = "showConfig", alias = "show-config")]
    pub show_config: bool,

    /// Print the names of the input files and stop.
    #[arg(long = "listFilesOnly", alias = "list-files-only")]
    pub list_files_only: bool,

    // ==================== Language and Environment ====================
    /// Set the JavaScript language version for emitted JavaScript.
    #[arg(short = 't', long, value_enum, ignore_case = true)]
    pub target: Option<Target>,

    /// Specify what module code is generated.
    #[arg(short = 'm', long, value_enum, ignore_case = true)]
    pub module: Option<Module>,

    /// Specify what JSX code is generated.
    #[arg(long, value_enum)]
    pub jsx: Option<Jsx>,

    /// Control what method is used to detect module-format JS files.
    #[arg(long = "moduleDetection", alias = "module-detection", value_enum)]
    pub module_detection: Option<ModuleDetection>,

    // ==================== Interop Constraints ====================
    /// Emit additional JavaScript to ease support for importing CommonJS modules.
    #[arg(long = "esModuleInterop", alias = "es-module-interop")]
    pub es_module_interop: bool,

    /// Ensure that each file can be safely transpiled without relying on other imports.
    #[arg(long = "isolatedModules", alias = "isolated-modules")]
    pub isolated_modules: bool,

    /// Do not transform or elide any imports or exports not marked as type-only.
    #[arg(long = "verbatimModuleSyntax", alias = "verbatim-module-syntax")]
    pub verbatim_module_syntax: bool,

    // ==================== Emit ====================
    /// Allow importing helper functions from tslib once per project.
    #[arg(long = "importHelpers", alias = "import-helpers")]
    pub import_helpers: bool,

    /// Rewrite '.ts', '.tsx', '.mts', and '.cts' file extensions in relative import paths.
    #[arg(
        long = "rewriteRelativeImportExtensions",
        alias = "rewrite-relative-import-extensions"
    )]
    pub rewrite_relative_import_extensions: bool,

    /// Ensure 'use strict' is always emitted.
    #[arg(long = "alwaysStrict", alias = "always-strict")]
    pub always_strict: bool,

    /// Enable all strict type-checking options.
    #[arg(long)]
    pub strict: bool,

    /// Specify an output folder for all emitted files.
    #[arg(long = "outDir", alias = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// JSON-encoded source files, or directories searched for `*.json` files.
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Target {
    Es3,
    Es5,
    #[value(alias = "es6")]
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    Es2023,
    Es2024,
    #[value(name = "esnext", alias = "es-next")]
    EsNext,
}

impl Target {
    pub fn to_script_target(self) -> ScriptTarget {
        match self {
            Target::Es3 => ScriptTarget::ES3,
            Target::Es5 => ScriptTarget::ES5,
            Target::Es2015 => ScriptTarget::ES2015,
            Target::Es2016 => ScriptTarget::ES2016,
            Target::Es2017 => ScriptTarget::ES2017,
            Target::Es2018 => ScriptTarget::ES2018,
            Target::Es2019 => ScriptTarget::ES2019,
            Target::Es2020 => ScriptTarget::ES2020,
            Target::Es2021 => ScriptTarget::ES2021,
            Target::Es2022 => ScriptTarget::ES2022,
            Target::Es2023 => ScriptTarget::ES2023,
            Target::Es2024 => ScriptTarget::ES2024,
            Target::EsNext => ScriptTarget::ESNext,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Module {
    None,
    #[value(name = "commonjs", alias = "common-js")]
    CommonJs,
    Amd,
    Umd,
    System,
    #[value(alias = "es6")]
    Es2015,
    Es2020,
    Es2022,
    #[value(name = "esnext", alias = "es-next")]
    EsNext,
    #[value(name = "node16", alias = "node-16")]
    Node16,
    #[value(name = "node18", alias = "node-18")]
    Node18,
    #[value(name = "nodenext", alias = "node-next")]
    NodeNext,
    /// Preserve the original module syntax.
    Preserve,
}

impl Module {
    pub fn to_module_kind(self) -> ModuleKind {
        match self {
            Module::None => ModuleKind::None,
            Module::CommonJs => ModuleKind::CommonJS,
            Module::Amd => ModuleKind::AMD,
            Module::Umd => ModuleKind::UMD,
            Module::System => ModuleKind::System,
            Module::Es2015 => ModuleKind::ES2015,
            Module::Es2020 => ModuleKind::ES2020,
            Module::Es2022 => ModuleKind::ES2022,
            Module::EsNext => ModuleKind::ESNext,
            Module::Node16 => ModuleKind::Node16,
            Module::Node18 => ModuleKind::Node18,
            Module::NodeNext => ModuleKind::NodeNext,
            Module::Preserve => ModuleKind::Preserve,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Jsx {
    /// Keep the JSX as part of the output.
    Preserve,
    React,
    #[value(name = "react-jsx")]
    ReactJsx,
    #[value(name = "react-jsxdev")]
    ReactJsxDev,
    #[value(name = "react-native")]
    ReactNative,
}

impl Jsx {
    pub fn to_jsx_emit(self) -> JsxEmit {
        match self {
            Jsx::Preserve => JsxEmit::Preserve,
            Jsx::React => JsxEmit::React,
            Jsx::ReactJsx => JsxEmit::ReactJsx,
            Jsx::ReactJsxDev => JsxEmit::ReactJsxDev,
            Jsx::ReactNative => JsxEmit::ReactNative,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ModuleDetection {
    /// Files with imports, exports, import.meta, or a module format are modules.
    Auto,
    /// Every non-declaration file is a module.
    Force,
    /// Only files with imports or exports are modules.
    Legacy,
}

impl ModuleDetection {
    pub fn to_module_detection_kind(self) -> ModuleDetectionKind {
        match self {
            ModuleDetection::Auto => ModuleDetectionKind::Auto,
            ModuleDetection::Force => ModuleDetectionKind::Force,
            ModuleDetection::Legacy => ModuleDetectionKind::Legacy,
        }
    }
}
