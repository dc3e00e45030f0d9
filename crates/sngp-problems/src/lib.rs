//! Benchmark fitness providers.
//!
//! Each problem supplies an exhaustive (or sampled) table of test cases and a
//! scoring rule; the search engine only sees them through `FitnessProvider`.

pub mod cases;
pub mod multiplexer;
pub mod parity;
pub mod regression;
pub mod truth_table;

pub use cases::TestCases;
pub use multiplexer::Multiplexer;
pub use parity::EvenParity;
pub use regression::SymbolicRegression;
pub use truth_table::TruthTable;

use serde::{Deserialize, Serialize};
use sngp_core::{Error, Result};
use sngp_graph::FitnessProvider;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Largest supported parity width (2^16 test cases)
pub const MAX_PARITY_INPUTS: usize = 16;

/// Problem catalog selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    Multiplexer,
    EvenParity { inputs: usize },
    SymbolicRegression,
}

impl ProblemKind {
    /// Instantiate the provider for this problem
    pub fn build(&self) -> Result<Box<dyn FitnessProvider>> {
        debug!(problem = %self, "Building fitness provider");
        match *self {
            ProblemKind::Multiplexer => Ok(Box::new(Multiplexer::new())),
            ProblemKind::EvenParity { inputs } => {
                if inputs == 0 || inputs > MAX_PARITY_INPUTS {
                    return Err(Error::Config(format!(
                        "even parity needs 1..={} inputs, got {}",
                        MAX_PARITY_INPUTS, inputs
                    )));
                }
                Ok(Box::new(EvenParity::new(inputs)))
            }
            ProblemKind::SymbolicRegression => Ok(Box::new(SymbolicRegression::new())),
        }
    }
}

impl Default for ProblemKind {
    fn default() -> Self {
        ProblemKind::Multiplexer
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemKind::Multiplexer => write!(f, "multiplexer"),
            ProblemKind::EvenParity { inputs } => write!(f, "even-parity-{}", inputs),
            ProblemKind::SymbolicRegression => write!(f, "symbolic-regression"),
        }
    }
}

impl FromStr for ProblemKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.to_ascii_lowercase();
        match name.as_str() {
            "multiplexer" | "mux" | "mux6" => return Ok(ProblemKind::Multiplexer),
            "symbolic-regression" | "regression" => return Ok(ProblemKind::SymbolicRegression),
            _ => {}
        }

        let width = name
            .strip_prefix("even-parity-")
            .or_else(|| name.strip_prefix("parity"));
        match width.map(str::parse::<usize>) {
            Some(Ok(inputs)) => Ok(ProblemKind::EvenParity { inputs }),
            _ => Err(Error::UnknownProblem(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_problem_kind() {
        assert_eq!("multiplexer".parse::<ProblemKind>().unwrap(), ProblemKind::Multiplexer);
        assert_eq!(
            "even-parity-5".parse::<ProblemKind>().unwrap(),
            ProblemKind::EvenParity { inputs: 5 }
        );
        assert_eq!(
            "parity4".parse::<ProblemKind>().unwrap(),
            ProblemKind::EvenParity { inputs: 4 }
        );
        assert_eq!(
            "Regression".parse::<ProblemKind>().unwrap(),
            ProblemKind::SymbolicRegression
        );
        assert!(matches!(
            "tsp".parse::<ProblemKind>(),
            Err(Error::UnknownProblem(_))
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [
            ProblemKind::Multiplexer,
            ProblemKind::EvenParity { inputs: 7 },
            ProblemKind::SymbolicRegression,
        ] {
            assert_eq!(kind.to_string().parse::<ProblemKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_build() {
        let provider = ProblemKind::EvenParity { inputs: 3 }.build().unwrap();
        assert_eq!(provider.num_inputs(), 3);
        assert_eq!(provider.num_test_cases(), 8);
        assert!(ProblemKind::EvenParity { inputs: 0 }.build().is_err());
        assert!(ProblemKind::EvenParity { inputs: 17 }.build().is_err());
    }

    #[test]
    fn test_serde_config_form() {
        let kind: ProblemKind = serde_json::from_str(r#"{"even-parity":{"inputs":6}}"#).unwrap();
        assert_eq!(kind, ProblemKind::EvenParity { inputs: 6 });
        let kind: ProblemKind = serde_json::from_str(r#""multiplexer""#).unwrap();
        assert_eq!(kind, ProblemKind::Multiplexer);
    }
}
