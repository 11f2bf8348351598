//! Resolved compiler options consumed by the module transforms.
//!
//! Boolean options are tri-state (`Option<bool>`): `None` means "not set",
//! which lets the derived getters apply TypeScript's defaults that depend on
//! other options (for example `esModuleInterop` defaulting to `true` under
//! `module: node16`).

use crate::common::{JsxEmit, ModuleDetectionKind, ModuleKind, ScriptTarget};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompilerOptions {
    pub module: Option<ModuleKind>,
    pub target: Option<ScriptTarget>,
    pub jsx: Option<JsxEmit>,
    pub module_detection: Option<ModuleDetectionKind>,
    pub es_module_interop: Option<bool>,
    pub import_helpers: Option<bool>,
    pub rewrite_relative_import_extensions: Option<bool>,
    pub isolated_modules: Option<bool>,
    pub verbatim_module_syntax: Option<bool>,
    pub always_strict: Option<bool>,
    pub strict: Option<bool>,
}

impl CompilerOptions {
    /// Options with only `module` set.
    #[must_use]
    pub fn with_module(module: ModuleKind) -> Self {
        Self {
            module: Some(module),
            ..Self::default()
        }
    }

    /// The module kind code is generated for.
    ///
    /// Falls back to ES2015 when the target supports it and CommonJS otherwise.
    #[must_use]
    pub fn emit_module_kind(&self) -> ModuleKind {
        if let Some(module) = self.module {
            return module;
        }
        if self.emit_script_target() >= ScriptTarget::ES2015 {
            ModuleKind::ES2015
        } else {
            ModuleKind::CommonJS
        }
    }

    #[must_use]
    pub fn emit_script_target(&self) -> ScriptTarget {
        if let Some(target) = self.target {
            return target;
        }
        match self.module {
            Some(ModuleKind::Node16 | ModuleKind::Node18) => ScriptTarget::ES2022,
            Some(ModuleKind::NodeNext) => ScriptTarget::ESNext,
            _ => ScriptTarget::ES5,
        }
    }

    #[must_use]
    pub fn es_module_interop(&self) -> bool {
        if let Some(value) = self.es_module_interop {
            return value;
        }
        matches!(
            self.emit_module_kind(),
            ModuleKind::Node16 | ModuleKind::Node18 | ModuleKind::NodeNext | ModuleKind::Preserve
        )
    }

    #[must_use]
    pub fn import_helpers(&self) -> bool {
        self.import_helpers.unwrap_or(false)
    }

    #[must_use]
    pub fn rewrite_relative_import_extensions(&self) -> bool {
        self.rewrite_relative_import_extensions.unwrap_or(false)
    }

    /// `isolatedModules`, implied by `verbatimModuleSyntax`.
    #[must_use]
    pub fn isolated_modules(&self) -> bool {
        self.isolated_modules
            .or(self.verbatim_module_syntax)
            .unwrap_or(false)
    }

    /// `alwaysStrict`, defaulting to the value of `strict`.
    #[must_use]
    pub fn always_strict(&self) -> bool {
        self.always_strict.or(self.strict).unwrap_or(false)
    }

    #[must_use]
    pub fn jsx(&self) -> JsxEmit {
        self.jsx.unwrap_or_default()
    }

    #[must_use]
    pub fn module_detection(&self) -> ModuleDetectionKind {
        self.module_detection.unwrap_or_default()
    }
}
