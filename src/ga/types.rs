//! Population members.

use crate::cost::{PenaltyScale, TourCostModel};

/// A tour in the GA population together with its cached score.
///
/// Freshly built candidates carry the worst possible score until
/// [`evaluate`](Candidate::evaluate) runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub tour: Vec<usize>,
    /// `1 / (1 + cost)`; higher is better.
    pub fitness: f64,
    /// Penalized path cost on the fitness weights.
    pub cost: f64,
}

impl Candidate {
    pub fn new(tour: Vec<usize>) -> Self {
        Self {
            tour,
            fitness: f64::NEG_INFINITY,
            cost: f64::INFINITY,
        }
    }

    pub fn evaluate(&mut self, model: &TourCostModel<'_>) {
        let cost = model.evaluate(&self.tour, PenaltyScale::FITNESS);
        self.fitness = cost.fitness();
        self.cost = cost.penalized_cost;
    }
}

/// Highest-fitness candidate; the earliest one wins ties.
pub(crate) fn fittest(population: &[Candidate]) -> Option<&Candidate> {
    population
        .iter()
        .reduce(|best, c| if c.fitness > best.fitness { c } else { best })
}

/// Population variance of the fitness values.
pub(crate) fn fitness_variance(population: &[Candidate]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    let n = population.len() as f64;
    let mean = population.iter().map(|c| c.fitness).sum::<f64>() / n;
    population
        .iter()
        .map(|c| (c.fitness - mean).powi(2))
        .sum::<f64>()
        / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DistanceMatrix, TimeMatrix};
    use crate::models::Constraints;

    fn scored(fitness: f64) -> Candidate {
        Candidate {
            tour: vec![0],
            fitness,
            cost: 1.0 / fitness - 1.0,
        }
    }

    #[test]
    fn test_evaluate() {
        let dm = DistanceMatrix::filled(3, 2.0);
        let tm = TimeMatrix::filled(3, 4);
        let model = TourCostModel::new(&dm, &tm, Constraints::default());
        let mut c = Candidate::new(vec![2, 0, 1]);
        c.evaluate(&model);
        assert!((c.cost - 4.0).abs() < 1e-12);
        assert!((c.fitness - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_fittest_first_wins_ties() {
        let mut pop = vec![scored(0.1), scored(0.5), scored(0.5)];
        pop[1].tour = vec![1];
        let best = fittest(&pop).expect("non-empty");
        assert_eq!(best.tour, vec![1]);
        assert!(fittest(&[]).is_none());
    }

    #[test]
    fn test_fitness_variance() {
        assert_eq!(fitness_variance(&[scored(0.5), scored(0.5)]), 0.0);
        let v = fitness_variance(&[scored(0.2), scored(0.4)]);
        assert!((v - 0.01).abs() < 1e-12, "expected 0.01, got {v}");
    }
}
