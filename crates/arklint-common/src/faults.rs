//! Fault records reported by the checker.
//!
//! A fault identifies one detected rule violation together with the source
//! range to highlight. The range is computed by the checker's highlight
//! layer; rendering (message text, severity presentation) belongs to the
//! surrounding linter and is not modeled here.

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// Kinds of rule violations the checker can raise.
///
/// Only kinds that the checker detects or that carry a dedicated highlight
/// strategy are listed; the default highlight for any other kind is the
/// offending node's full span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultId {
    VarDeclaration,
    CatchWithUnsupportedType,
    ForInStatement,
    WithStatement,
    DeleteOperator,
    TypeQuery,
    InstanceofUnsupported,
    ConstAssertion,
    LimitedReturnTypeInference,
    LocalFunction,
    FunctionBind,
    FunctionApplyCall,
    DeclWithDuplicateName,
    ObjectLiteralNoContextType,
    ClassExpression,
    MultipleStaticBlocks,
    ParameterProperties,
    SendableDefiniteAssignment,
    ObjectTypeLiteral,
    StructuralIdentity,
    ObjectLiteralProperty,
    UnsupportedObjectLiteralKey,
    SendableClassInheritance,
    SendableCapturedVars,
    EnumMemberNonConstInit,
    EsObjectType,
    IntersectionType,
    UnsupportedType,
}

/// One detected violation: the fault kind plus the exact source range to
/// underline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultRecord {
    pub fault_id: FaultId,
    pub range: Span,
}

impl FaultRecord {
    pub const fn new(fault_id: FaultId, range: Span) -> Self {
        Self { fault_id, range }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_record_serializes_to_json() {
        let record = FaultRecord::new(FaultId::VarDeclaration, Span::new(0, 3));
        let json = serde_json::to_string(&record).expect("serialize");
        assert!(json.contains("VarDeclaration"));
        let back: FaultRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }
}
