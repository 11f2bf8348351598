//! File-name and module-specifier helpers.
//!
//! All extension checks are case-sensitive, matching how module specifiers
//! are compared at runtime.

use crate::common::JsxEmit;
use crate::options::CompilerOptions;

pub const EXTENSION_TS: &str = ".ts";
pub const EXTENSION_TSX: &str = ".tsx";
pub const EXTENSION_DTS: &str = ".d.ts";
pub const EXTENSION_MTS: &str = ".mts";
pub const EXTENSION_CTS: &str = ".cts";
pub const EXTENSION_JS: &str = ".js";
pub const EXTENSION_JSX: &str = ".jsx";
pub const EXTENSION_MJS: &str = ".mjs";
pub const EXTENSION_CJS: &str = ".cjs";
pub const EXTENSION_JSON: &str = ".json";

/// Extensions recognized when replacing a file extension, longest first so
/// that `.d.ts` wins over `.ts`.
const KNOWN_EXTENSIONS: &[&str] = &[
    ".d.mts",
    ".d.cts",
    EXTENSION_DTS,
    EXTENSION_JSON,
    EXTENSION_TSX,
    EXTENSION_JSX,
    EXTENSION_MTS,
    EXTENSION_CTS,
    EXTENSION_MJS,
    EXTENSION_CJS,
    EXTENSION_TS,
    EXTENSION_JS,
];

#[must_use]
pub fn file_extension_is(path: &str, extension: &str) -> bool {
    path.len() > extension.len() && path.ends_with(extension)
}

#[must_use]
pub fn file_extension_is_one_of(path: &str, extensions: &[&str]) -> bool {
    extensions.iter().any(|ext| file_extension_is(path, ext))
}

/// `./x`, `../x`, `.` and `..`.
#[must_use]
pub fn path_is_relative(path: &str) -> bool {
    let rest = if let Some(rest) = path.strip_prefix("..") {
        rest
    } else if let Some(rest) = path.strip_prefix('.') {
        rest
    } else {
        return false;
    };
    rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\')
}

/// `.d.ts`, `.d.mts`, `.d.cts` and arbitrary-extension declarations such as
/// `styles.d.css.ts`.
#[must_use]
pub fn is_declaration_file_name(file_name: &str) -> bool {
    if file_extension_is_one_of(file_name, &[EXTENSION_DTS, ".d.mts", ".d.cts"]) {
        return true;
    }
    let base = base_file_name(file_name);
    let Some(stem) = base.strip_suffix(EXTENSION_TS) else {
        return false;
    };
    match stem.rfind(".d.") {
        Some(index) => {
            let ext = &stem[index + 3..];
            !ext.is_empty() && !ext.contains('.')
        }
        None => false,
    }
}

#[must_use]
pub fn has_ts_file_extension(file_name: &str) -> bool {
    file_extension_is_one_of(
        file_name,
        &[EXTENSION_TS, EXTENSION_TSX, EXTENSION_MTS, EXTENSION_CTS],
    )
}

#[must_use]
pub fn has_js_file_extension(file_name: &str) -> bool {
    file_extension_is_one_of(
        file_name,
        &[EXTENSION_JS, EXTENSION_JSX, EXTENSION_MJS, EXTENSION_CJS],
    )
}

/// The last path component, ignoring a trailing separator.
#[must_use]
pub fn base_file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    }
}

/// Replace a known extension of `path` with `extension`. Paths without a
/// known extension get `extension` appended.
#[must_use]
pub fn change_extension(path: &str, extension: &str) -> String {
    let stem = KNOWN_EXTENSIONS
        .iter()
        .find(|ext| file_extension_is(path, ext))
        .map_or(path, |ext| &path[..path.len() - ext.len()]);
    let mut result = String::with_capacity(stem.len() + extension.len());
    result.push_str(stem);
    result.push_str(extension);
    result
}

/// The JavaScript extension a source file with this name is emitted to.
#[must_use]
pub fn output_extension(file_name: &str, jsx: JsxEmit) -> &'static str {
    if file_extension_is(file_name, EXTENSION_JSON) {
        EXTENSION_JSON
    } else if jsx == JsxEmit::Preserve
        && file_extension_is_one_of(file_name, &[EXTENSION_JSX, EXTENSION_TSX])
    {
        EXTENSION_JSX
    } else if file_extension_is_one_of(file_name, &[EXTENSION_MTS, EXTENSION_MJS]) {
        EXTENSION_MJS
    } else if file_extension_is_one_of(file_name, &[EXTENSION_CTS, EXTENSION_CJS]) {
        EXTENSION_CJS
    } else {
        EXTENSION_JS
    }
}

/// Whether a module specifier names a relative TypeScript source file that
/// `rewriteRelativeImportExtensions` should point at its JavaScript output.
#[must_use]
pub fn should_rewrite_module_specifier(specifier: &str, options: &CompilerOptions) -> bool {
    options.rewrite_relative_import_extensions()
        && path_is_relative(specifier)
        && !is_declaration_file_name(specifier)
        && has_ts_file_extension(specifier)
}

/// The rewritten specifier, or `None` when it should be left alone.
#[must_use]
pub fn rewrite_module_specifier_text(specifier: &str, options: &CompilerOptions) -> Option<String> {
    if !should_rewrite_module_specifier(specifier, options) {
        return None;
    }
    let updated = change_extension(specifier, output_extension(specifier, options.jsx()));
    (updated != specifier).then_some(updated)
}

/// Derive a valid identifier from a module name: the base name with a
/// leading digit prefixed by `_` and every non-word character replaced by
/// `_` (`./_namespaces/ts.js` becomes `ts_js`).
#[must_use]
pub fn make_identifier_from_module_name(module_name: &str) -> String {
    let base = base_file_name(module_name);
    let mut result = String::with_capacity(base.len() + 1);
    if base.starts_with(|ch: char| ch.is_ascii_digit()) {
        result.push('_');
    }
    result.extend(base.chars().map(|ch| {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            ch
        } else {
            '_'
        }
    }));
    result
}

#[cfg(test)]
#[path = "../tests/path_tests.rs"]
mod tests;
