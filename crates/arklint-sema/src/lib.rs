//! Semantic model consumed by the arklint checker.
//!
//! This crate holds the externally-supplied side of the checker's world:
//! - `ast` - read-only node arena with parent links
//! - `files` - source-file registry (extensions drive interop classification)
//! - `symbols` - canonical declaration symbols with flags and aliases
//! - `types` - interned type table with flag sets and structure
//! - `model` - the `SemanticModel` query facade
//! - `builder` - programmatic model assembly
//! - `fixtures` - higher-level scenario assembly on top of the builder
//!
//! The checker never mutates anything in here; resolution maps are wired
//! once by the host (or a test) and then only queried.

pub mod ast;
pub mod builder;
pub mod files;
pub mod fixtures;
pub mod model;
pub mod symbols;
pub mod types;

pub use ast::{
    BinaryOp, CommentKind, CommentRange, HeritageClause, HeritageToken, ModifierFlags, NodeArena,
    NodeId, NodeKind, NodeOrComment, TypeKeyword, UnaryOp, VarDeclKind,
};
pub use builder::ModelBuilder;
pub use files::{FileId, FileRegistry, SourceFileInfo};
pub use model::{ConstantValue, SemanticModel};
pub use symbols::{SymbolFlags, SymbolId, SymbolTable};
pub use types::{
    CallSignature, ObjectFlags, TypeData, TypeFlags, TypeId, TypeRow, TypeTable,
};
