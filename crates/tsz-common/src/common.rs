//! Shared compiler enums.
//!
//! The discriminants follow the values TypeScript uses in `tsconfig.json`
//! processing, so ordered comparisons such as `kind >= ModuleKind::ES2015`
//! or `ModuleKind::Node16..=ModuleKind::NodeNext` carry their usual meaning.

use serde::{Deserialize, Serialize};

/// Module code generation kind (`compilerOptions.module`).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u16)]
pub enum ModuleKind {
    #[default]
    None = 0,
    CommonJS = 1,
    AMD = 2,
    UMD = 3,
    System = 4,
    ES2015 = 5,
    ES2020 = 6,
    ES2022 = 7,
    ESNext = 99,
    Node16 = 100,
    Node18 = 101,
    NodeNext = 199,
    Preserve = 200,
}

impl ModuleKind {
    /// True for the Node.js hybrid formats whose output depends on each
    /// file's implied format.
    #[must_use]
    pub const fn is_node_module(self) -> bool {
        matches!(self, Self::Node16 | Self::Node18 | Self::NodeNext)
    }

    /// True for the native ECMAScript module formats.
    #[must_use]
    pub fn is_es_module(self) -> bool {
        self >= Self::ES2015 && self <= Self::ESNext
    }
}

/// ECMAScript language target (`compilerOptions.target`).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ScriptTarget {
    ES3 = 0,
    #[default]
    ES5 = 1,
    ES2015 = 2,
    ES2016 = 3,
    ES2017 = 4,
    ES2018 = 5,
    ES2019 = 6,
    ES2020 = 7,
    ES2021 = 8,
    ES2022 = 9,
    ES2023 = 10,
    ES2024 = 11,
    ESNext = 99,
}

impl ScriptTarget {
    #[must_use]
    pub fn supports_es2015(self) -> bool {
        self >= Self::ES2015
    }
}

/// JSX output mode (`compilerOptions.jsx`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JsxEmit {
    #[default]
    None,
    Preserve,
    React,
    ReactNative,
    ReactJsx,
    ReactJsxDev,
}

/// How a file is decided to be a module (`compilerOptions.moduleDetection`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleDetectionKind {
    #[default]
    Auto,
    Legacy,
    Force,
}

/// Source language of a file, derived from its extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    JS,
    JSX,
    #[default]
    TS,
    TSX,
    JSON,
}

impl ScriptKind {
    #[must_use]
    pub const fn is_js(self) -> bool {
        matches!(self, Self::JS | Self::JSX)
    }

    /// Infer the script kind from a file name, defaulting to TypeScript.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        if lower.ends_with(".js") || lower.ends_with(".mjs") || lower.ends_with(".cjs") {
            Self::JS
        } else if lower.ends_with(".jsx") {
            Self::JSX
        } else if lower.ends_with(".tsx") {
            Self::TSX
        } else if lower.ends_with(".json") {
            Self::JSON
        } else {
            Self::TS
        }
    }
}

/// The `type` field of the nearest `package.json`, which decides the implied
/// format of `.js`/`.ts` files under the Node.js module kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageJsonType {
    Module,
    CommonJS,
}
