//! The root node of a parsed file and its module-ness signals.

use serde::{Deserialize, Serialize};
use tsz_common::path::{
    EXTENSION_CJS, EXTENSION_CTS, EXTENSION_JS, EXTENSION_JSX, EXTENSION_MJS, EXTENSION_MTS,
    EXTENSION_TS, EXTENSION_TSX, file_extension_is_one_of, is_declaration_file_name,
};
use tsz_common::{CompilerOptions, ModuleDetectionKind, ModuleKind, PackageJsonType, ScriptKind};

use crate::node::NodeId;
use crate::statement::Statement;
use crate::utilities;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceFile {
    #[serde(skip, default = "NodeId::fresh")]
    pub id: NodeId,
    pub file_name: String,
    pub statements: Vec<Statement>,
    #[serde(skip)]
    pub is_declaration_file: bool,
    #[serde(skip)]
    pub script_kind: ScriptKind,
    /// The format this file is emitted in when it overrides `module`: the
    /// format Node.js would load it as under `node16`..`nodenext`, otherwise
    /// only a format pinned by the extension or `package_json_type`.
    /// Derived unless given explicitly.
    #[serde(default)]
    pub implied_node_format: Option<ModuleKind>,
    /// `type` of the nearest `package.json`.
    #[serde(default)]
    pub package_json_type: Option<PackageJsonType>,
    /// The file is an ECMAScript module: it has import/export syntax,
    /// `import.meta`, or module detection forces it.
    #[serde(skip)]
    pub external_module_indicator: bool,
    /// A JavaScript file that uses `require`, `module` or `exports`.
    #[serde(skip)]
    pub common_js_module_indicator: bool,
}

impl SourceFile {
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        statements: Vec<Statement>,
        options: &CompilerOptions,
    ) -> Self {
        let mut file = Self {
            id: NodeId::fresh(),
            file_name: file_name.into(),
            statements,
            is_declaration_file: false,
            script_kind: ScriptKind::TS,
            implied_node_format: None,
            package_json_type: None,
            external_module_indicator: false,
            common_js_module_indicator: false,
        };
        file.set_module_indicators(options);
        file
    }

    /// Recompute everything derived from the file name and statements.
    ///
    /// Deserialized files must call this before being bound or transformed.
    pub fn set_module_indicators(&mut self, options: &CompilerOptions) {
        self.script_kind = ScriptKind::from_file_name(&self.file_name);
        self.is_declaration_file = is_declaration_file_name(&self.file_name);
        if self.implied_node_format.is_none() {
            self.implied_node_format = self.compute_implied_node_format(options);
        }

        self.external_module_indicator = match options.module_detection() {
            ModuleDetectionKind::Force => !self.is_declaration_file,
            ModuleDetectionKind::Legacy => utilities::is_file_probably_external_module(self),
            ModuleDetectionKind::Auto => {
                utilities::is_file_probably_external_module(self)
                    || self.is_forced_to_be_module_by_format()
            }
        };
        self.common_js_module_indicator =
            self.script_kind.is_js() && utilities::contains_common_js_usage(&self.statements);
    }

    /// Under `node16`..`nodenext` every TypeScript or JavaScript file gets a
    /// format. Under other module kinds a file keeps one only when its
    /// extension or an explicit `package.json` type pins it.
    fn compute_implied_node_format(&self, options: &CompilerOptions) -> Option<ModuleKind> {
        let name = self.file_name.as_str();
        let format = if file_extension_is_one_of(name, &[EXTENSION_MTS, EXTENSION_MJS]) {
            ModuleKind::ESNext
        } else if file_extension_is_one_of(name, &[EXTENSION_CTS, EXTENSION_CJS]) {
            ModuleKind::CommonJS
        } else if file_extension_is_one_of(
            name,
            &[EXTENSION_TS, EXTENSION_TSX, EXTENSION_JS, EXTENSION_JSX],
        ) {
            if self.package_json_type == Some(PackageJsonType::Module) {
                ModuleKind::ESNext
            } else {
                ModuleKind::CommonJS
            }
        } else {
            return None;
        };
        if options.emit_module_kind().is_node_module() {
            return Some(format);
        }
        let pinned = match format {
            ModuleKind::CommonJS => {
                self.package_json_type == Some(PackageJsonType::CommonJS)
                    || file_extension_is_one_of(name, &[EXTENSION_CJS, EXTENSION_CTS])
            }
            _ => {
                self.package_json_type == Some(PackageJsonType::Module)
                    || file_extension_is_one_of(name, &[EXTENSION_MJS, EXTENSION_MTS])
            }
        };
        pinned.then_some(format)
    }

    fn is_forced_to_be_module_by_format(&self) -> bool {
        !self.is_declaration_file
            && (self.implied_node_format == Some(ModuleKind::ESNext)
                || file_extension_is_one_of(
                    &self.file_name,
                    &[EXTENSION_CJS, EXTENSION_CTS, EXTENSION_MJS, EXTENSION_MTS],
                ))
    }

    #[must_use]
    pub fn is_js(&self) -> bool {
        self.script_kind.is_js()
    }
}
