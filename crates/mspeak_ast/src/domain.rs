//! Mathematical domains and their finer-grained topics.
//!
//! `DomainContext` is a closed set: adding a domain means adding a variant
//! here, a detector, a topic enum and a rule table, and the exhaustive
//! matches below make the compiler point at every place that needs it.

use crate::expression::UnknownName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DomainContext {
    #[default]
    General,
    Calculus,
    Topology,
    ComplexAnalysis,
    NumericalAnalysis,
    RealAnalysis,
    MeasureTheory,
    Combinatorics,
    Algorithms,
    Manifolds,
    Ode,
    SetTheory,
    Logic,
    LinearAlgebra,
    Statistics,
    NumberTheory,
}

impl DomainContext {
    pub const ALL: [DomainContext; 16] = [
        DomainContext::General,
        DomainContext::Calculus,
        DomainContext::Topology,
        DomainContext::ComplexAnalysis,
        DomainContext::NumericalAnalysis,
        DomainContext::RealAnalysis,
        DomainContext::MeasureTheory,
        DomainContext::Combinatorics,
        DomainContext::Algorithms,
        DomainContext::Manifolds,
        DomainContext::Ode,
        DomainContext::SetTheory,
        DomainContext::Logic,
        DomainContext::LinearAlgebra,
        DomainContext::Statistics,
        DomainContext::NumberTheory,
    ];

    /// Stable name used in configuration, CLI flags and cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainContext::General => "general",
            DomainContext::Calculus => "calculus",
            DomainContext::Topology => "topology",
            DomainContext::ComplexAnalysis => "complex_analysis",
            DomainContext::NumericalAnalysis => "numerical_analysis",
            DomainContext::RealAnalysis => "real_analysis",
            DomainContext::MeasureTheory => "measure_theory",
            DomainContext::Combinatorics => "combinatorics",
            DomainContext::Algorithms => "algorithms",
            DomainContext::Manifolds => "manifolds",
            DomainContext::Ode => "ode",
            DomainContext::SetTheory => "set_theory",
            DomainContext::Logic => "logic",
            DomainContext::LinearAlgebra => "linear_algebra",
            DomainContext::Statistics => "statistics",
            DomainContext::NumberTheory => "number_theory",
        }
    }

    /// Index into `ALL`, used for array-backed per-domain tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn is_general(&self) -> bool {
        matches!(self, DomainContext::General)
    }
}

impl fmt::Display for DomainContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainContext {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let alias = match normalized.as_str() {
            "complex" => "complex_analysis",
            "numerical" => "numerical_analysis",
            "real" | "analysis" => "real_analysis",
            "measure" => "measure_theory",
            "sets" => "set_theory",
            "linalg" | "linear" => "linear_algebra",
            "stats" | "probability" => "statistics",
            "odes" | "differential_equations" => "ode",
            other => other,
        };
        DomainContext::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == alias)
            .ok_or_else(|| UnknownName {
                what: "domain",
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Per-domain topics
// =============================================================================

macro_rules! topic_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:expr),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

topic_enum!(CalculusTopic {
    MultipleIntegrals => "multiple_integrals",
    VectorCalculus => "vector_calculus",
    PartialDerivatives => "partial_derivatives",
    Integrals => "integrals",
    Derivatives => "derivatives",
    Limits => "limits",
    Series => "series",
    General => "general",
});

topic_enum!(
    /// Complex-analysis topics in detection order.
    ComplexTopic {
        Residues => "residues",
        Integration => "integration",
        Holomorphic => "holomorphic",
        Conformal => "conformal",
        Series => "series",
        Basic => "basic",
        General => "general",
    }
);

topic_enum!(TopologyTopic {
    Homotopy => "homotopy",
    Compactness => "compactness",
    Connectedness => "connectedness",
    ClosureInterior => "closure_interior",
    Continuity => "continuity",
    OpenClosed => "open_closed",
    General => "general",
});

topic_enum!(RealAnalysisTopic {
    EpsilonDelta => "epsilon_delta",
    Bounds => "bounds",
    Sequences => "sequences",
    Series => "series",
    Continuity => "continuity",
    General => "general",
});

topic_enum!(MeasureTopic {
    Integration => "integration",
    SigmaAlgebras => "sigma_algebras",
    Convergence => "convergence",
    Measures => "measures",
    General => "general",
});

topic_enum!(NumericalTopic {
    RootFinding => "root_finding",
    OdeSolvers => "ode_solvers",
    Quadrature => "quadrature",
    Interpolation => "interpolation",
    ErrorAnalysis => "error_analysis",
    General => "general",
});

topic_enum!(CombinatoricsTopic {
    Binomial => "binomial",
    Permutations => "permutations",
    Recurrences => "recurrences",
    Counting => "counting",
    General => "general",
});

topic_enum!(AlgorithmsTopic {
    Asymptotic => "asymptotic",
    Recurrences => "recurrences",
    Logarithmic => "logarithmic",
    General => "general",
});

topic_enum!(ManifoldTopic {
    Connections => "connections",
    DifferentialForms => "differential_forms",
    TangentSpaces => "tangent_spaces",
    General => "general",
});

topic_enum!(OdeTopic {
    InitialValue => "initial_value",
    Systems => "systems",
    SecondOrder => "second_order",
    FirstOrder => "first_order",
    General => "general",
});

topic_enum!(SetTheoryTopic {
    SetBuilder => "set_builder",
    Cardinality => "cardinality",
    Operations => "operations",
    Membership => "membership",
    General => "general",
});

topic_enum!(LogicTopic {
    Entailment => "entailment",
    Quantifiers => "quantifiers",
    Connectives => "connectives",
    General => "general",
});

topic_enum!(LinearAlgebraTopic {
    Eigen => "eigen",
    Determinants => "determinants",
    InnerProducts => "inner_products",
    Matrices => "matrices",
    VectorSpaces => "vector_spaces",
    General => "general",
});

topic_enum!(StatisticsTopic {
    HypothesisTesting => "hypothesis_testing",
    Distributions => "distributions",
    Expectation => "expectation",
    Estimation => "estimation",
    Probability => "probability",
    General => "general",
});

topic_enum!(NumberTheoryTopic {
    Congruences => "congruences",
    Divisibility => "divisibility",
    Primes => "primes",
    General => "general",
});

/// Finer topic inside a detected domain.
///
/// Each variant carries the topic enum of its own domain, so a subcontext can
/// never disagree with the domain it was detected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subcontext {
    #[default]
    General,
    Calculus(CalculusTopic),
    Topology(TopologyTopic),
    ComplexAnalysis(ComplexTopic),
    NumericalAnalysis(NumericalTopic),
    RealAnalysis(RealAnalysisTopic),
    MeasureTheory(MeasureTopic),
    Combinatorics(CombinatoricsTopic),
    Algorithms(AlgorithmsTopic),
    Manifolds(ManifoldTopic),
    Ode(OdeTopic),
    SetTheory(SetTheoryTopic),
    Logic(LogicTopic),
    LinearAlgebra(LinearAlgebraTopic),
    Statistics(StatisticsTopic),
    NumberTheory(NumberTheoryTopic),
}

impl Subcontext {
    /// The domain this subcontext belongs to.
    pub fn domain(&self) -> DomainContext {
        match self {
            Subcontext::General => DomainContext::General,
            Subcontext::Calculus(_) => DomainContext::Calculus,
            Subcontext::Topology(_) => DomainContext::Topology,
            Subcontext::ComplexAnalysis(_) => DomainContext::ComplexAnalysis,
            Subcontext::NumericalAnalysis(_) => DomainContext::NumericalAnalysis,
            Subcontext::RealAnalysis(_) => DomainContext::RealAnalysis,
            Subcontext::MeasureTheory(_) => DomainContext::MeasureTheory,
            Subcontext::Combinatorics(_) => DomainContext::Combinatorics,
            Subcontext::Algorithms(_) => DomainContext::Algorithms,
            Subcontext::Manifolds(_) => DomainContext::Manifolds,
            Subcontext::Ode(_) => DomainContext::Ode,
            Subcontext::SetTheory(_) => DomainContext::SetTheory,
            Subcontext::Logic(_) => DomainContext::Logic,
            Subcontext::LinearAlgebra(_) => DomainContext::LinearAlgebra,
            Subcontext::Statistics(_) => DomainContext::Statistics,
            Subcontext::NumberTheory(_) => DomainContext::NumberTheory,
        }
    }

    pub fn topic(&self) -> &'static str {
        match self {
            Subcontext::General => "general",
            Subcontext::Calculus(t) => t.as_str(),
            Subcontext::Topology(t) => t.as_str(),
            Subcontext::ComplexAnalysis(t) => t.as_str(),
            Subcontext::NumericalAnalysis(t) => t.as_str(),
            Subcontext::RealAnalysis(t) => t.as_str(),
            Subcontext::MeasureTheory(t) => t.as_str(),
            Subcontext::Combinatorics(t) => t.as_str(),
            Subcontext::Algorithms(t) => t.as_str(),
            Subcontext::Manifolds(t) => t.as_str(),
            Subcontext::Ode(t) => t.as_str(),
            Subcontext::SetTheory(t) => t.as_str(),
            Subcontext::Logic(t) => t.as_str(),
            Subcontext::LinearAlgebra(t) => t.as_str(),
            Subcontext::Statistics(t) => t.as_str(),
            Subcontext::NumberTheory(t) => t.as_str(),
        }
    }
}

impl fmt::Display for Subcontext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain(), self.topic())
    }
}
