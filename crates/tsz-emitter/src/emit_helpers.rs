//! Runtime helpers injected into CommonJS and ESM output.
//!
//! The texts are the exact helper bodies `tslib` ships, so output that
//! inlines them and output that imports them from `tslib` behave the same.

use std::cmp::Ordering;

/// A named runtime helper.
#[derive(Debug, PartialEq, Eq)]
pub struct EmitHelper {
    /// Unique key, also the helper's binding name.
    pub name: &'static str,
    /// The export name in `tslib`.
    pub import_name: &'static str,
    /// Scoped helpers are printed where used; unscoped ones once per file.
    pub scoped: bool,
    pub text: &'static str,
    /// Lower values are printed first; `None` sorts last.
    pub priority: Option<u32>,
    pub dependencies: &'static [&'static EmitHelper],
}

pub const CREATE_BINDING_HELPER: EmitHelper = EmitHelper {
    name: "typescript:commonjscreatebinding",
    import_name: "__createBinding",
    scoped: false,
    priority: Some(1),
    dependencies: &[],
    text: r#"var __createBinding = (this && this.__createBinding) || (Object.create ? (function(o, m, k, k2) {
    if (k2 === undefined) k2 = k;
    var desc = Object.getOwnPropertyDescriptor(m, k);
    if (!desc || ("get" in desc ? !m.__esModule : desc.writable || desc.configurable)) {
      desc = { enumerable: true, get: function() { return m[k]; } };
    }
    Object.defineProperty(o, k2, desc);
}) : (function(o, m, k, k2) {
    if (k2 === undefined) k2 = k;
    o[k2] = m[k];
}));"#,
};

pub const SET_MODULE_DEFAULT_HELPER: EmitHelper = EmitHelper {
    name: "typescript:commonjscreatevalue",
    import_name: "__setModuleDefault",
    scoped: false,
    priority: Some(1),
    dependencies: &[],
    text: r#"var __setModuleDefault = (this && this.__setModuleDefault) || (Object.create ? (function(o, v) {
    Object.defineProperty(o, "default", { enumerable: true, value: v });
}) : function(o, v) {
    o["default"] = v;
});"#,
};

pub const IMPORT_STAR_HELPER: EmitHelper = EmitHelper {
    name: "typescript:commonjsimportstar",
    import_name: "__importStar",
    scoped: false,
    priority: Some(2),
    dependencies: &[&CREATE_BINDING_HELPER, &SET_MODULE_DEFAULT_HELPER],
    text: r#"var __importStar = (this && this.__importStar) || (function () {
    var ownKeys = function(o) {
        ownKeys = Object.getOwnPropertyNames || function (o) {
            var ar = [];
            for (var k in o) if (Object.prototype.hasOwnProperty.call(o, k)) ar[ar.length] = k;
            return ar;
        };
        return ownKeys(o);
    };
    return function (mod) {
        if (mod && mod.__esModule) return mod;
        var result = {};
        if (mod != null) for (var k = ownKeys(mod), i = 0; i < k.length; i++) if (k[i] !== "default") __createBinding(result, mod, k[i]);
        __setModuleDefault(result, mod);
        return result;
    };
})();"#,
};

pub const IMPORT_DEFAULT_HELPER: EmitHelper = EmitHelper {
    name: "typescript:commonjsimportdefault",
    import_name: "__importDefault",
    scoped: false,
    priority: None,
    dependencies: &[],
    text: r#"var __importDefault = (this && this.__importDefault) || function (mod) {
    return (mod && mod.__esModule) ? mod : { "default": mod };
};"#,
};

pub const EXPORT_STAR_HELPER: EmitHelper = EmitHelper {
    name: "typescript:export-star",
    import_name: "__exportStar",
    scoped: false,
    priority: Some(2),
    dependencies: &[&CREATE_BINDING_HELPER],
    text: r#"var __exportStar = (this && this.__exportStar) || function(m, exports) {
    for (var p in m) if (p !== "default" && !Object.prototype.hasOwnProperty.call(exports, p)) __createBinding(exports, m, p);
};"#,
};

pub const REWRITE_RELATIVE_IMPORT_EXTENSION_HELPER: EmitHelper = EmitHelper {
    name: "typescript:rewriteRelativeImportExtensions",
    import_name: "__rewriteRelativeImportExtension",
    scoped: false,
    priority: None,
    dependencies: &[],
    text: r#"var __rewriteRelativeImportExtension = (this && this.__rewriteRelativeImportExtension) || function (path, preserveJsx) {
    if (typeof path === "string" && /^\.\.?\//.test(path)) {
        return path.replace(/\.(tsx)$|((?:\.d)?)((?:\.[^./]+?)?)\.([cm]?)ts$/i, function (m, tsx, d, ext, cm) {
            return tsx ? preserveJsx ? ".jsx" : ".js" : d && (!ext || !cm) ? m : (d + ext + "." + cm.toLowerCase() + "js");
        });
    }
    return path;
};"#,
};

/// Print order of unscoped helpers: by priority, unprioritized last.
#[must_use]
pub fn compare_emit_helpers(a: &EmitHelper, b: &EmitHelper) -> Ordering {
    match (a.priority, b.priority) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort into print order.
pub fn sort_emit_helpers(helpers: &mut [&'static EmitHelper]) {
    helpers.sort_by(|a, b| compare_emit_helpers(a, b));
}
