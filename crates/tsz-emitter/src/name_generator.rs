//! Collision-free name generation for one source file.

use rustc_hash::{FxHashMap, FxHashSet};
use tsz_ast::{GeneratedName, GeneratedNameKind, Identifier, NodeId};
use tsz_common::limits::MAX_UNIQUE_NAME_SUFFIX;

/// Hands out identifiers that clash neither with names written in the
/// source file nor with each other.
#[derive(Debug, Default)]
pub struct NameGenerator {
    /// Identifier texts appearing in the current file.
    reserved: FxHashSet<String>,
    generated: FxHashSet<String>,
    /// Node-derived names, so every request for the same node agrees.
    node_names: FxHashMap<NodeId, String>,
    temp_count: u32,
}

impl NameGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything and reserve `reserved` for the next file.
    pub fn reset(&mut self, reserved: FxHashSet<String>) {
        self.reserved = reserved;
        self.generated.clear();
        self.node_names.clear();
        self.temp_count = 0;
    }

    /// Whether `text` is free: not written in the file and not generated.
    #[must_use]
    pub fn is_unique_name(&self, text: &str) -> bool {
        !self.reserved.contains(text) && !self.generated.contains(text)
    }

    /// `base` itself when `optimistic` and free, otherwise the first free
    /// `base_1`, `base_2`, ...
    pub fn new_unique_name(&mut self, base: &str, optimistic: bool) -> Identifier {
        let text = self.make_unique_name(base, optimistic);
        generated_identifier(text, GeneratedNameKind::Unique)
    }

    /// An optimistic unique name for a declaration a transform adds at the
    /// top of the file.
    pub fn new_file_level_unique_name(&mut self, base: &str) -> Identifier {
        let mut name = self.new_unique_name(base, true);
        if let Some(generated) = &mut name.generated {
            generated.file_level = true;
        }
        name
    }

    /// `_a`, `_b`, ... skipping `_i` and `_n`, then `_0`, `_1`, ...
    pub fn new_temp_name(&mut self) -> Identifier {
        loop {
            let count = self.temp_count;
            self.temp_count += 1;
            // `_i` and `_n` read like loop counters in output.
            if count == 8 || count == 13 {
                continue;
            }
            let text = match char::from_u32(u32::from(b'a') + count) {
                Some(letter) if count < 26 => format!("_{letter}"),
                _ => format!("_{}", count - 26),
            };
            if self.is_unique_name(&text) {
                self.generated.insert(text.clone());
                return generated_identifier(text, GeneratedNameKind::Temp);
            }
            if count >= MAX_UNIQUE_NAME_SUFFIX {
                panic!("temporary name space exhausted");
            }
        }
    }

    /// A name derived from `base` for `node`, always suffixed (`other_1`).
    /// Repeated requests for the same node return the same text.
    pub fn new_generated_name_for_node(&mut self, node: NodeId, base: &str) -> Identifier {
        let text = match self.node_names.get(&node) {
            Some(text) => text.clone(),
            None => {
                let text = self.make_unique_name(base, false);
                self.node_names.insert(node, text.clone());
                text
            }
        };
        generated_identifier(text, GeneratedNameKind::Node)
    }

    fn make_unique_name(&mut self, base: &str, optimistic: bool) -> String {
        if optimistic && self.is_unique_name(base) {
            self.generated.insert(base.to_string());
            return base.to_string();
        }
        let separator = if base.ends_with('_') { "" } else { "_" };
        for suffix in 1..MAX_UNIQUE_NAME_SUFFIX {
            let candidate = format!("{base}{separator}{suffix}");
            if self.is_unique_name(&candidate) {
                self.generated.insert(candidate.clone());
                return candidate;
            }
        }
        panic!("could not make a unique name from '{base}'");
    }
}

fn generated_identifier(text: String, kind: GeneratedNameKind) -> Identifier {
    Identifier {
        id: NodeId::fresh(),
        text,
        generated: Some(GeneratedName {
            kind,
            file_level: false,
        }),
    }
}
