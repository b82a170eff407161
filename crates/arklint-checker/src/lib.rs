//! Type-compatibility checker for the ArkTS language subset.
//!
//! This crate answers, per AST node, whether a type or expression usage is
//! allowed under the restricted language: nominal-vs-structural
//! assignability, object-literal validity, dynamic (interop) origin,
//! sendable classification, and the exact source range to highlight for a
//! violation.
//!
//! Layout:
//! - `session` - per-run checking session and symbol resolution
//! - `classify` - pure type classification predicates
//! - `stdtypes` - standard-library recognizers (global-scope gated)
//! - `library` - library/dynamic-origin classification
//! - `sendable` - sendable/shareable classification
//! - `structural` - structural compatibility engine
//! - `dynamics` - tri-state dynamic origin classifier
//! - `highlight` - fault highlight ranges
//! - `enums` - enum initializer validation
//! - `names` - replacement-name generation
//! - `config` - consumed options and well-known names
//!
//! All queries are total: they answer a definite verdict and degrade to the
//! conservative answer ("not related", "not found") on malformed input
//! rather than failing.

pub mod classify;
pub mod config;
pub mod dynamics;
pub mod enums;
pub mod highlight;
pub mod library;
pub mod names;
pub mod sendable;
pub mod session;
pub mod stdtypes;
pub mod structural;

pub use config::{IgnoreMatcher, LinterOptions};
pub use dynamics::DynamicVerdict;
pub use highlight::{highlight_range, record_fault, HighlightHandler};
pub use names::{identifier_name_from_string, NameGenerator};
pub use session::{CheckSession, TypePredicate};

pub use arklint_common::{FaultId, FaultRecord};
