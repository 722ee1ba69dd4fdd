//! Data model shared by every stage of the speech pipeline.

pub mod diagnostic;
pub mod domain;
pub mod expression;
pub mod linearize;
pub mod node;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use domain::{
    AlgorithmsTopic, CalculusTopic, CombinatoricsTopic, ComplexTopic, DomainContext,
    LinearAlgebraTopic, LogicTopic, ManifoldTopic, MeasureTopic, NumberTheoryTopic,
    NumericalTopic, OdeTopic, RealAnalysisTopic, SetTheoryTopic, StatisticsTopic, Subcontext,
    TopologyTopic,
};
pub use expression::{AudienceLevel, Expression, UnknownName};
pub use linearize::{collapse_whitespace, linearize};
pub use node::StructuralNode;
