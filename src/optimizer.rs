//! The common optimizer interface and algorithm selection.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cost::TourCostModel;
use crate::error::OptimizeError;
use crate::matrix::MatrixPair;
use crate::models::Constraints;

/// The search strategies a request can name.
///
/// Parsed once from the request's algorithm string; dispatch is a `match`
/// on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    #[serde(rename = "GENETIC_ALGORITHM")]
    Genetic,
    SimulatedAnnealing,
    TabuSearch,
    Greedy,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Genetic,
        Algorithm::SimulatedAnnealing,
        Algorithm::TabuSearch,
        Algorithm::Greedy,
    ];

    /// Wire name, e.g. `GENETIC_ALGORITHM`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Genetic => "GENETIC_ALGORITHM",
            Algorithm::SimulatedAnnealing => "SIMULATED_ANNEALING",
            Algorithm::TabuSearch => "TABU_SEARCH",
            Algorithm::Greedy => "GREEDY",
        }
    }

    /// Case-insensitive lookup of a known name.
    pub fn parse(name: &str) -> Option<Algorithm> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(name))
    }

    /// Like [`parse`](Self::parse), but unknown names select the genetic
    /// algorithm.
    ///
    /// ```
    /// use lastmile_routing::Algorithm;
    ///
    /// assert_eq!(Algorithm::from_name("tabu_search"), Algorithm::TabuSearch);
    /// assert_eq!(Algorithm::from_name("FOO"), Algorithm::Genetic);
    /// ```
    pub fn from_name(name: &str) -> Algorithm {
        Self::parse(name).unwrap_or(Algorithm::Genetic)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error of [`Algorithm::from_str`]: the name matches no algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm: {}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// One request's search space: the stop count, its matrices and constraints.
#[derive(Debug, Clone, Copy)]
pub struct RoutingProblem<'a> {
    matrices: &'a MatrixPair,
    constraints: Constraints,
}

impl<'a> RoutingProblem<'a> {
    /// Fails if the matrices do not cover exactly `stops` locations.
    pub fn new(
        stops: usize,
        matrices: &'a MatrixPair,
        constraints: Constraints,
    ) -> Result<Self, OptimizeError> {
        if matrices.distances.size() != stops || matrices.times.size() != stops {
            return Err(OptimizeError::MatrixSizeMismatch {
                stops,
                matrix: matrices.distances.size().min(matrices.times.size()),
            });
        }
        Ok(Self {
            matrices,
            constraints,
        })
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.matrices.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn matrices(&self) -> &'a MatrixPair {
        self.matrices
    }

    pub fn cost_model(&self) -> TourCostModel<'a> {
        TourCostModel::new(&self.matrices.distances, &self.matrices.times, self.constraints)
    }
}

/// What a single optimizer run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Best tour found; a permutation of `0..n`.
    pub tour: Vec<usize>,
    pub iterations: usize,
    /// Fitness reported for `tour`, higher is better.
    pub fitness: f64,
    /// Best-so-far cost after each iteration (non-increasing).
    pub cost_history: Vec<f64>,
}

/// A tour search strategy.
///
/// Implementations own no state between runs; the generator is supplied by
/// the caller so that runs are reproducible under a fixed seed.
pub trait Optimizer {
    fn algorithm(&self) -> Algorithm;

    fn optimize<R: Rng>(
        &self,
        problem: &RoutingProblem<'_>,
        rng: &mut R,
    ) -> Result<RunOutcome, OptimizeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DistanceMatrix, TimeMatrix};

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Algorithm::parse("genetic_algorithm"), Some(Algorithm::Genetic));
        assert_eq!(Algorithm::parse("Simulated_Annealing"), Some(Algorithm::SimulatedAnnealing));
        assert_eq!(Algorithm::parse(" GREEDY "), Some(Algorithm::Greedy));
        assert_eq!(Algorithm::parse("FOO"), None);
    }

    #[test]
    fn test_unknown_defaults_to_genetic() {
        assert_eq!(Algorithm::from_name("FOO"), Algorithm::Genetic);
        assert_eq!(Algorithm::from_name(""), Algorithm::Genetic);
        assert!("FOO".parse::<Algorithm>().is_err());
        assert_eq!("tabu_search".parse::<Algorithm>(), Ok(Algorithm::TabuSearch));
    }

    #[test]
    fn test_wire_names_round_trip() {
        for algorithm in Algorithm::ALL {
            let json = serde_json::to_string(&algorithm).expect("serializable");
            assert_eq!(json, format!("\"{}\"", algorithm.as_str()));
            let back: Algorithm = serde_json::from_str(&json).expect("deserializable");
            assert_eq!(back, algorithm);
        }
    }

    #[test]
    fn test_problem_rejects_size_mismatch() {
        let pair = MatrixPair {
            distances: DistanceMatrix::filled(3, 1.0),
            times: TimeMatrix::filled(3, 1),
            degraded: false,
        };
        assert!(RoutingProblem::new(3, &pair, Constraints::default()).is_ok());
        let err = RoutingProblem::new(4, &pair, Constraints::default()).unwrap_err();
        assert_eq!(err, OptimizeError::MatrixSizeMismatch { stops: 4, matrix: 3 });
    }
}
