//! Common types and utilities for the arklint checker.
//!
//! This crate provides foundational types used across all arklint crates:
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`)
//! - Position/line-map types for source locations
//! - Fault records (`FaultId`, `FaultRecord`)

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position/LineMap types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Fault records reported by the checker
pub mod faults;
pub use faults::{FaultId, FaultRecord};
