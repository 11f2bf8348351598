//! Centralized limits used by the module transforms.
//!
//! # Categories
//!
//! - **Emit shape**: bounds on generated expression size
//! - **Name generation**: bounds on unique-name probing

// =============================================================================
// Emit Shape
// =============================================================================

/// Maximum number of export names initialized by one `exports.a = exports.b = void 0;`
/// statement.
///
/// Longer chains are split so that no generated assignment grows without
/// bound; a file exporting 120 names gets three initialization statements.
pub const EXPORT_INITIALIZER_CHUNK_SIZE: usize = 50;

// =============================================================================
// Name Generation
// =============================================================================

/// Upper bound on the numeric suffix tried when making a name unique.
///
/// Reaching it means the reserved-name set is corrupt; name generation
/// panics instead of looping forever.
pub const MAX_UNIQUE_NAME_SUFFIX: u32 = 1_000_000;
