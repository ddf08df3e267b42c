//! Common Antimony sources for tests.

pub const SIMPLE_REACTION: &str = "S1 -> S2; k1*S1\n";

pub const DEFINED_REACTION: &str = "k1 = 0.1\nS1 -> S2; k1*S1\n";

pub const MODEL_WITH_PARAMETERS: &str = r#"model M
  species S1 = 10, S2
  k1 = 0.5
  J1: S1 -> S2; k1*S1
end
"#;

pub const TWO_MODELS: &str = r#"model A
  kf = 1
  X -> Y; kf*X
end
model B
  Y -> X; kf*Y
end
"#;

pub const FUNCTION_AND_MODULE: &str = r#"function hill(s, n)
  s^n / (1 + s^n)
end
model Cell(S, k)
  compartment c = 1
  species S in c
  kdeg = 0.1
  S -> ; kdeg*S
end
"#;

pub const ANNOTATED: &str = r#"species glucose = 5
glucose identity "http://identifiers.org/chebi/CHEBI:17234"
glucose biological_entity_is "http://identifiers.org/go/GO:0005575"
"#;

pub const BROKEN_LINES: &str = "S1 -> -> S2 -> ->\nk = 1\nA ->\nB -> C; k\n";

/// Every fixture, for properties that should hold on any input
pub const ALL: &[&str] = &[
    SIMPLE_REACTION,
    DEFINED_REACTION,
    MODEL_WITH_PARAMETERS,
    TWO_MODELS,
    FUNCTION_AND_MODULE,
    ANNOTATED,
    BROKEN_LINES,
];
