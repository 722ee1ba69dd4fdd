//! Domain and subcontext detection, and the rule set that follows from it.
//!
//! Both levels are ordered batteries: the first detector that matches wins.
//! Overlapping detectors are resolved purely by their position in the
//! tables below, so moving an entry changes behavior.

use mspeak_ast::{
    AlgorithmsTopic, CalculusTopic, CombinatoricsTopic, ComplexTopic, DomainContext,
    LinearAlgebraTopic, LogicTopic, ManifoldTopic, MeasureTopic, NumberTheoryTopic,
    NumericalTopic, OdeTopic, RealAnalysisTopic, SetTheoryTopic, StatisticsTopic,
    StructuralNode, Subcontext, TopologyTopic,
};
use mspeak_session::ContextMemory;
use regex::Regex;

use crate::features::Features;
use crate::macros::static_regex;
use crate::repository::{OrderedRuleSet, RuleRepository};

/// Domain, subcontext and rule set chosen for one expression.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub domain: DomainContext,
    pub subcontext: Subcontext,
    pub rules: OrderedRuleSet<'a>,
}

type Detector = fn(&Features) -> bool;

pub fn select_rules<'a>(
    tree: &StructuralNode,
    hint: Option<DomainContext>,
    memory: &ContextMemory,
    repository: &'a RuleRepository,
) -> Selection<'a> {
    let features = Features::from_tree(tree);
    let domain = match hint {
        Some(domain) => domain,
        None => detect_domain(&features).unwrap_or_else(|| {
            memory.current_topic().unwrap_or(DomainContext::General)
        }),
    };
    let subcontext = detect_subcontext(domain, &features);
    tracing::debug!(
        domain = domain.as_str(),
        subcontext = subcontext.topic(),
        hinted = hint.is_some(),
        "rules selected"
    );
    Selection {
        domain,
        subcontext,
        rules: repository.ordered_for(domain),
    }
}

/// First matching domain detector, `None` when nothing matched.
pub fn detect_domain(features: &Features) -> Option<DomainContext> {
    DOMAIN_BATTERY
        .iter()
        .find(|(_, detect)| detect(features))
        .map(|(domain, _)| *domain)
}

pub fn detect_subcontext(domain: DomainContext, f: &Features) -> Subcontext {
    match domain {
        DomainContext::General => Subcontext::General,
        DomainContext::Calculus => {
            Subcontext::Calculus(first(f, CALCULUS_TOPICS, CalculusTopic::General))
        }
        DomainContext::Topology => {
            Subcontext::Topology(first(f, TOPOLOGY_TOPICS, TopologyTopic::General))
        }
        DomainContext::ComplexAnalysis => {
            Subcontext::ComplexAnalysis(first(f, COMPLEX_TOPICS, ComplexTopic::General))
        }
        DomainContext::NumericalAnalysis => {
            Subcontext::NumericalAnalysis(first(f, NUMERICAL_TOPICS, NumericalTopic::General))
        }
        DomainContext::RealAnalysis => Subcontext::RealAnalysis(first(
            f,
            REAL_ANALYSIS_TOPICS,
            RealAnalysisTopic::General,
        )),
        DomainContext::MeasureTheory => {
            Subcontext::MeasureTheory(first(f, MEASURE_TOPICS, MeasureTopic::General))
        }
        DomainContext::Combinatorics => Subcontext::Combinatorics(first(
            f,
            COMBINATORICS_TOPICS,
            CombinatoricsTopic::General,
        )),
        DomainContext::Algorithms => {
            Subcontext::Algorithms(first(f, ALGORITHMS_TOPICS, AlgorithmsTopic::General))
        }
        DomainContext::Manifolds => {
            Subcontext::Manifolds(first(f, MANIFOLD_TOPICS, ManifoldTopic::General))
        }
        DomainContext::Ode => Subcontext::Ode(first(f, ODE_TOPICS, OdeTopic::General)),
        DomainContext::SetTheory => {
            Subcontext::SetTheory(first(f, SET_THEORY_TOPICS, SetTheoryTopic::General))
        }
        DomainContext::Logic => Subcontext::Logic(first(f, LOGIC_TOPICS, LogicTopic::General)),
        DomainContext::LinearAlgebra => Subcontext::LinearAlgebra(first(
            f,
            LINEAR_ALGEBRA_TOPICS,
            LinearAlgebraTopic::General,
        )),
        DomainContext::Statistics => {
            Subcontext::Statistics(first(f, STATISTICS_TOPICS, StatisticsTopic::General))
        }
        DomainContext::NumberTheory => Subcontext::NumberTheory(first(
            f,
            NUMBER_THEORY_TOPICS,
            NumberTheoryTopic::General,
        )),
    }
}

fn first<T: Copy>(features: &Features, battery: &[(T, Detector)], fallback: T) -> T {
    battery
        .iter()
        .find(|(_, detect)| detect(features))
        .map_or(fallback, |(topic, _)| *topic)
}

fn matches(re: &Regex, f: &Features) -> bool {
    re.is_match(f.text())
}

static_regex!(RE_DIFF_EQUATION, r"[a-z]'|\\frac\{d\^?\{?\d?\}?[a-z]\}\{d|\\dot\{");
static_regex!(RE_SEQUENCE_LIMIT, r"n\s*\\to\s*\\infty");
static_regex!(RE_FACTORIAL, r"[A-Za-z0-9})]!");
static_regex!(RE_ASYMPTOTIC, r"(?:\bO|\\Theta|\\Omega)\s*\(");
static_regex!(RE_PROBABILITY, r"(?:\bP|\\Pr)\s*\(|\bE\s*\[|\\mathbb\{E\}");
static_regex!(RE_MATRIX_OP, r"\b[A-Z]\^\{(?:-1|T)\}|\\lambda\s*I\b");
static_regex!(RE_ORDER_H, r"\bO\s*\(\s*h\b");
static_regex!(RE_ITERATE, r"[a-z]_\{n\s*\+\s*1\}");
static_regex!(RE_INITIAL_VALUE, r"[a-z]\s*\(\s*0\s*\)\s*=");
static_regex!(RE_RECURRENCE, r"[a-z]_\{n\s*-\s*1\}|\bT\s*\(\s*n\s*/");
static_regex!(RE_CARDINALITY, r"\|\s*[A-Z][^|]*\|");

const TOPOLOGY_WORDS: &[&str] = &[
    "topology", "topological", "compact", "connected", "homeomorphic", "homeomorphism",
    "homotopy", "homotopic", "hausdorff", "neighborhood", "neighbourhood", "closure",
    "interior", "boundary",
];

// Detection order for domains. Each detector only sees the expression
// itself; the session topic is consulted after the whole battery misses.
static DOMAIN_BATTERY: &[(DomainContext, Detector)] = &[
    (DomainContext::ComplexAnalysis, |f| {
        f.has_any_command(&["oint", "Res", "Re", "Im", "Arg"])
            || f.contains(r"\mathbb{C}")
            || f.has_any_word(&["holomorphic", "meromorphic", "residue", "conformal", "analytic"])
    }),
    (DomainContext::MeasureTheory, |f| {
        f.contains(r"d\mu") || f.contains(r"d\nu")
            || f.has_any_word(&["measure", "measurable", "lebesgue", "borel", "everywhere", "ae"])
            || f.contains(r"\sigma-")
    }),
    (DomainContext::Topology, |f| {
        f.has_any_word(TOPOLOGY_WORDS)
            || f.contains(r"\pi_{1}(")
            || f.contains(r"\operatorname{int}")
            || f.contains(r"\mathring")
    }),
    (DomainContext::Manifolds, |f| {
        f.contains("T_{p}") || f.contains("T^{*}") || f.contains(r"\nabla_{")
            || f.contains(r"\Gamma^{")
            || f.has_any_word(&["manifold", "tangent", "cotangent", "chart", "diffeomorphism"])
    }),
    (DomainContext::Ode, |f| {
        (f.contains("=") && matches(&RE_DIFF_EQUATION, f))
            || f.has_any_word(&["ode", "ivp", "wronskian"])
            || f.has_command("Wronskian")
    }),
    (DomainContext::NumericalAnalysis, |f| {
        matches(&RE_ORDER_H, f)
            || matches(&RE_ITERATE, f)
            || f.contains(r"\epsilon_{mach")
            || f.has_any_word(&[
                "newton", "euler", "iteration", "tolerance", "quadrature", "interpolation",
                "discretization",
            ])
    }),
    (DomainContext::RealAnalysis, |f| {
        (f.has_any_command(&["varepsilon", "epsilon"]) && f.has_command("delta"))
            || f.has_any_command(&["limsup", "liminf", "sup", "inf"])
            || (f.has_command("lim") && matches(&RE_SEQUENCE_LIMIT, f))
            || f.has_any_word(&["converges", "uniformly", "cauchy", "supremum", "infimum"])
    }),
    (DomainContext::Calculus, |f| {
        f.has_any_command(&["int", "iint", "iiint", "lim", "partial", "nabla"])
            || f.contains(r"\frac{d")
            || (f.has_any_command(&["sum", "prod"]) && f.has_command("infty"))
    }),
    (DomainContext::Combinatorics, |f| {
        f.has_any_command(&["binom", "choose", "dbinom", "tbinom"])
            || matches(&RE_FACTORIAL, f)
            || f.has_any_word(&["permutations", "combinations", "arrangements"])
    }),
    (DomainContext::Algorithms, |f| {
        matches(&RE_ASYMPTOTIC, f)
            || f.has_any_word(&["algorithm", "runtime", "complexity"])
    }),
    (DomainContext::Statistics, |f| {
        f.has_any_command(&["Pr", "Var", "Cov"])
            || matches(&RE_PROBABILITY, f)
            || f.has_any_word(&["probability", "variance", "expected", "distribution", "hypothesis", "iid"])
    }),
    (DomainContext::LinearAlgebra, |f| {
        f.has_any_command(&["det", "langle", "otimes", "dagger"])
            || f.has_any_environment(&["matrix", "pmatrix", "bmatrix", "vmatrix"])
            || matches(&RE_MATRIX_OP, f)
            || f.has_any_word(&["eigenvalue", "eigenvector", "matrix", "basis", "span", "kernel"])
    }),
    (DomainContext::Logic, |f| {
        f.has_any_command(&[
            "forall", "exists", "nexists", "land", "lor", "neg", "vdash", "models",
            "Rightarrow", "Leftrightarrow", "top", "bot",
        ])
    }),
    (DomainContext::SetTheory, |f| {
        f.has_any_command(&[
            "in", "notin", "subset", "subseteq", "cup", "cap", "setminus", "emptyset",
            "varnothing", "aleph", "wp",
        ])
    }),
    (DomainContext::NumberTheory, |f| {
        f.has_any_command(&["pmod", "bmod", "mod", "mid", "nmid", "gcd", "lcm", "equiv"])
            || f.has_any_word(&["prime", "divides", "congruent"])
    }),
];

static CALCULUS_TOPICS: &[(CalculusTopic, Detector)] = &[
    (CalculusTopic::MultipleIntegrals, |f| {
        f.has_any_command(&["iint", "iiint", "oiint"])
    }),
    (CalculusTopic::VectorCalculus, |f| f.has_command("nabla")),
    (CalculusTopic::PartialDerivatives, |f| f.has_command("partial")),
    (CalculusTopic::Integrals, |f| f.has_any_command(&["int", "oint"])),
    (CalculusTopic::Derivatives, |f| {
        f.contains(r"\frac{d") || matches(&RE_DIFF_EQUATION, f)
    }),
    (CalculusTopic::Limits, |f| f.has_command("lim")),
    (CalculusTopic::Series, |f| f.has_any_command(&["sum", "prod"])),
];

static COMPLEX_TOPICS: &[(ComplexTopic, Detector)] = &[
    (ComplexTopic::Residues, |f| {
        f.contains(r"\Res") || f.contains("{Res}")
            || f.has_any_word(&["residue", "residues", "pole"])
    }),
    (ComplexTopic::Integration, |f| f.has_any_command(&["oint", "int"])),
    (ComplexTopic::Holomorphic, |f| {
        f.has_any_word(&["holomorphic", "analytic", "meromorphic"]) || f.has_command("partial")
    }),
    (ComplexTopic::Conformal, |f| f.has_any_word(&["conformal", "mobius"])),
    (ComplexTopic::Series, |f| {
        f.has_command("sum") || f.has_any_word(&["laurent", "taylor"])
    }),
    (ComplexTopic::Basic, |f| {
        f.has_any_command(&["Re", "Im", "Arg", "overline", "bar"])
            || f.contains(r"\mathbb{C}")
            || f.contains("|z|")
    }),
];

static TOPOLOGY_TOPICS: &[(TopologyTopic, Detector)] = &[
    (TopologyTopic::Homotopy, |f| {
        f.contains(r"\pi_{") || f.has_command("simeq")
            || f.has_any_word(&["homotopy", "homotopic"])
    }),
    (TopologyTopic::Compactness, |f| {
        f.has_any_word(&["compact", "cover", "subcover"])
    }),
    (TopologyTopic::Connectedness, |f| {
        f.has_any_word(&["connected", "path"])
    }),
    (TopologyTopic::ClosureInterior, |f| {
        f.has_any_command(&["overline", "mathring", "partial"])
            || f.contains(r"\operatorname{int}")
            || f.has_any_word(&["closure", "interior", "boundary"])
    }),
    (TopologyTopic::Continuity, |f| {
        f.has_any_word(&["continuous", "homeomorphism", "homeomorphic"]) || f.contains("^{-1}(")
    }),
    (TopologyTopic::OpenClosed, |f| f.has_any_word(&["open", "closed"])),
];

static REAL_ANALYSIS_TOPICS: &[(RealAnalysisTopic, Detector)] = &[
    (RealAnalysisTopic::EpsilonDelta, |f| {
        f.has_any_command(&["varepsilon", "epsilon"]) && f.has_command("delta")
    }),
    (RealAnalysisTopic::Bounds, |f| {
        f.has_any_command(&["sup", "inf", "limsup", "liminf"])
            || f.has_any_word(&["bounded", "supremum", "infimum"])
    }),
    (RealAnalysisTopic::Sequences, |f| {
        matches(&RE_SEQUENCE_LIMIT, f) || f.has_any_word(&["sequence", "cauchy"])
    }),
    (RealAnalysisTopic::Series, |f| f.has_command("sum")),
    (RealAnalysisTopic::Continuity, |f| {
        f.has_any_word(&["continuous", "uniformly", "continuity"])
    }),
];

static MEASURE_TOPICS: &[(MeasureTopic, Detector)] = &[
    (MeasureTopic::Integration, |f| f.has_command("int")),
    (MeasureTopic::SigmaAlgebras, |f| {
        f.contains(r"\sigma-") || f.contains(r"\mathcal{F}") || f.contains(r"\mathcal{B}")
            || f.has_any_word(&["algebra", "measurable", "borel", "filtration"])
    }),
    (MeasureTopic::Convergence, |f| {
        f.has_any_word(&["everywhere", "ae", "converges", "convergence"])
    }),
    (MeasureTopic::Measures, |f| {
        f.has_any_command(&["mu", "nu", "lambda"]) || f.has_word("measure")
    }),
];

static NUMERICAL_TOPICS: &[(NumericalTopic, Detector)] = &[
    (NumericalTopic::RootFinding, |f| {
        f.has_any_word(&["newton", "bisection", "root", "secant"])
            || (matches(&RE_ITERATE, f) && f.contains("'"))
    }),
    (NumericalTopic::OdeSolvers, |f| {
        f.has_any_word(&["euler", "runge", "kutta", "stiff"]) || f.contains("y_{n+1}")
    }),
    (NumericalTopic::Quadrature, |f| {
        f.has_any_word(&["quadrature", "trapezoid", "trapezoidal", "simpson"])
            || f.has_command("int")
    }),
    (NumericalTopic::Interpolation, |f| {
        f.has_any_word(&["interpolation", "interpolant", "lagrange", "spline"])
    }),
    (NumericalTopic::ErrorAnalysis, |f| {
        matches(&RE_ORDER_H, f) || f.contains(r"\epsilon_{mach") || f.has_command("kappa")
            || f.has_any_word(&["error", "tolerance"])
    }),
];

static COMBINATORICS_TOPICS: &[(CombinatoricsTopic, Detector)] = &[
    (CombinatoricsTopic::Binomial, |f| {
        f.has_any_command(&["binom", "choose", "dbinom", "tbinom"])
    }),
    (CombinatoricsTopic::Permutations, |f| {
        f.has_any_word(&["permutation", "permutations", "arrangements"])
            || matches(&RE_FACTORIAL, f)
    }),
    (CombinatoricsTopic::Recurrences, |f| {
        matches(&RE_RECURRENCE, f) || f.has_word("recurrence")
    }),
    (CombinatoricsTopic::Counting, |f| {
        matches(&RE_CARDINALITY, f) || f.has_any_word(&["ways", "count", "pigeonhole"])
    }),
];

static ALGORITHMS_TOPICS: &[(AlgorithmsTopic, Detector)] = &[
    (AlgorithmsTopic::Asymptotic, |f| matches(&RE_ASYMPTOTIC, f)),
    (AlgorithmsTopic::Recurrences, |f| matches(&RE_RECURRENCE, f)),
    (AlgorithmsTopic::Logarithmic, |f| f.has_any_command(&["log", "lg", "ln"])),
];

static MANIFOLD_TOPICS: &[(ManifoldTopic, Detector)] = &[
    (ManifoldTopic::Connections, |f| {
        f.contains(r"\nabla_{") || f.contains(r"\Gamma^{") || f.has_word("connection")
    }),
    (ManifoldTopic::DifferentialForms, |f| {
        f.has_command("wedge") || f.has_any_word(&["form", "forms"])
    }),
    (ManifoldTopic::TangentSpaces, |f| {
        f.contains("T_{p}") || f.contains("T^{*}") || f.has_any_word(&["tangent", "cotangent"])
    }),
];

static ODE_TOPICS: &[(OdeTopic, Detector)] = &[
    (OdeTopic::InitialValue, |f| matches(&RE_INITIAL_VALUE, f)),
    (OdeTopic::Systems, |f| {
        f.has_command("mathbf") || f.has_any_environment(&["pmatrix", "bmatrix", "cases"])
            || f.has_word("system")
    }),
    (OdeTopic::SecondOrder, |f| f.contains("''") || f.contains("d^{2}")),
    (OdeTopic::FirstOrder, |f| matches(&RE_DIFF_EQUATION, f)),
];

static SET_THEORY_TOPICS: &[(SetTheoryTopic, Detector)] = &[
    (SetTheoryTopic::SetBuilder, |f| {
        f.contains(r"\{") && (f.has_command("mid") || f.contains("|") || f.contains(":"))
    }),
    (SetTheoryTopic::Cardinality, |f| {
        f.has_command("aleph") || matches(&RE_CARDINALITY, f)
            || f.has_any_word(&["cardinality", "countable", "uncountable"])
    }),
    (SetTheoryTopic::Operations, |f| {
        f.has_any_command(&["cup", "cap", "setminus", "times", "complement", "wp"])
    }),
    (SetTheoryTopic::Membership, |f| {
        f.has_any_command(&["in", "notin", "subset", "subseteq"])
    }),
];

static LOGIC_TOPICS: &[(LogicTopic, Detector)] = &[
    (LogicTopic::Entailment, |f| f.has_any_command(&["vdash", "models"])),
    (LogicTopic::Quantifiers, |f| {
        f.has_any_command(&["forall", "exists", "nexists"])
    }),
    (LogicTopic::Connectives, |f| {
        f.has_any_command(&[
            "land", "lor", "neg", "wedge", "vee", "Rightarrow", "Leftrightarrow", "rightarrow",
        ])
    }),
];

static LINEAR_ALGEBRA_TOPICS: &[(LinearAlgebraTopic, Detector)] = &[
    (LinearAlgebraTopic::Eigen, |f| {
        f.has_any_word(&["eigenvalue", "eigenvector", "eigenvalues", "eigenvectors"])
            || f.contains(r"\lambda I")
    }),
    (LinearAlgebraTopic::Determinants, |f| {
        f.has_command("det") || f.has_environment("vmatrix")
    }),
    (LinearAlgebraTopic::InnerProducts, |f| {
        f.has_command("langle") || f.has_any_word(&["orthogonal", "orthonormal", "norm"])
    }),
    (LinearAlgebraTopic::Matrices, |f| {
        f.has_any_environment(&["matrix", "pmatrix", "bmatrix"]) || matches(&RE_MATRIX_OP, f)
            || f.has_word("matrix")
    }),
    (LinearAlgebraTopic::VectorSpaces, |f| {
        f.contains(r"\mathbb{R}^{") || f.has_any_word(&["span", "basis", "dimension", "subspace"])
    }),
];

static STATISTICS_TOPICS: &[(StatisticsTopic, Detector)] = &[
    (StatisticsTopic::HypothesisTesting, |f| {
        f.contains("H_{0}") || f.has_any_word(&["hypothesis", "test", "significance"])
    }),
    (StatisticsTopic::Distributions, |f| {
        f.has_command("sim") || f.contains(r"\mathcal{N}")
            || f.has_any_word(&["distribution", "distributed", "normal"])
    }),
    (StatisticsTopic::Expectation, |f| {
        f.has_any_command(&["Var", "Cov"]) || f.contains(r"\mathbb{E}") || f.contains("E[")
    }),
    (StatisticsTopic::Estimation, |f| {
        f.has_command("hat") || f.has_any_word(&["estimator", "estimate", "mle"])
    }),
    (StatisticsTopic::Probability, |f| matches(&RE_PROBABILITY, f)),
];

static NUMBER_THEORY_TOPICS: &[(NumberTheoryTopic, Detector)] = &[
    (NumberTheoryTopic::Congruences, |f| {
        f.has_any_command(&["pmod", "bmod", "mod", "equiv"])
    }),
    (NumberTheoryTopic::Divisibility, |f| {
        f.has_any_command(&["mid", "nmid", "gcd", "lcm"]) || f.has_word("divides")
    }),
    (NumberTheoryTopic::Primes, |f| {
        f.has_any_word(&["prime", "primes"]) || f.has_any_command(&["phi", "varphi"])
    }),
];

#[cfg(test)]
mod tests {
    use super::*;
    use mspeak_guard::{check, GuardConfig};
    use mspeak_parser::{parse, ParseOptions};

    fn tree(latex: &str) -> StructuralNode {
        let input = check(latex, &GuardConfig::default()).unwrap();
        parse(&input, &ParseOptions::default()).unwrap().tree
    }

    fn detect(latex: &str) -> (DomainContext, Subcontext) {
        let repo = RuleRepository::from_patterns(Vec::new());
        let memory = ContextMemory::new();
        let s = select_rules(&tree(latex), None, &memory, &repo);
        (s.domain, s.subcontext)
    }

    #[test]
    fn plain_arithmetic_is_general() {
        assert_eq!(detect(r"\frac{1}{2}"), (DomainContext::General, Subcontext::General));
    }

    #[test]
    fn contour_integrals_are_complex_analysis() {
        assert_eq!(
            detect(r"\oint_{C} f(z)\,dz = 2\pi i \sum \operatorname{Res}(f, z_k)"),
            (
                DomainContext::ComplexAnalysis,
                Subcontext::ComplexAnalysis(ComplexTopic::Residues)
            )
        );
        assert_eq!(
            detect(r"\oint_{C} \frac{dz}{z}"),
            (
                DomainContext::ComplexAnalysis,
                Subcontext::ComplexAnalysis(ComplexTopic::Integration)
            )
        );
    }

    #[test]
    fn integrals_are_calculus() {
        assert_eq!(
            detect(r"\int_0^1 x^2 dx"),
            (DomainContext::Calculus, Subcontext::Calculus(CalculusTopic::Integrals))
        );
        assert_eq!(
            detect(r"\iint_D f\,dA"),
            (
                DomainContext::Calculus,
                Subcontext::Calculus(CalculusTopic::MultipleIntegrals)
            )
        );
    }

    #[test]
    fn earlier_battery_entries_win() {
        // Both quantifiers and membership are present; logic comes first.
        assert_eq!(
            detect(r"\forall x \in A, x \geq 0").0,
            DomainContext::Logic
        );
        assert_eq!(detect(r"x \in A \cup B").0, DomainContext::SetTheory);
        // An epsilon-delta statement mentions limits but is real analysis.
        assert_eq!(
            detect(r"\forall \varepsilon > 0 \exists \delta > 0"),
            (
                DomainContext::RealAnalysis,
                Subcontext::RealAnalysis(RealAnalysisTopic::EpsilonDelta)
            )
        );
    }

    #[test]
    fn differential_equations_need_an_equation() {
        assert_eq!(
            detect(r"y'' + y = 0, y(0) = 1"),
            (DomainContext::Ode, Subcontext::Ode(OdeTopic::InitialValue))
        );
        assert_ne!(detect(r"\frac{dy}{dx}").0, DomainContext::Ode);
    }

    #[test]
    fn hint_is_trusted() {
        let repo = RuleRepository::from_patterns(Vec::new());
        let memory = ContextMemory::new();
        let s = select_rules(
            &tree(r"\int_0^1 x\,dx"),
            Some(DomainContext::Statistics),
            &memory,
            &repo,
        );
        assert_eq!(s.domain, DomainContext::Statistics);
        assert_eq!(s.subcontext, Subcontext::Statistics(StatisticsTopic::General));
    }

    #[test]
    fn session_topic_is_the_fallback() {
        let repo = RuleRepository::from_patterns(Vec::new());
        let mut memory = ContextMemory::new();
        memory.set_topic(DomainContext::Topology);
        let s = select_rules(&tree("x + y"), None, &memory, &repo);
        assert_eq!(s.domain, DomainContext::Topology);
        let s = select_rules(&tree(r"\int f"), None, &memory, &repo);
        assert_eq!(s.domain, DomainContext::Calculus);
    }

    #[test]
    fn every_subcontext_belongs_to_its_domain() {
        let f = Features::default();
        for domain in DomainContext::ALL {
            assert_eq!(detect_subcontext(domain, &f).domain(), domain);
        }
    }
}
