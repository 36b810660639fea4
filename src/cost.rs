//! Path cost of a tour under soft constraints.
//!
//! A tour is scored as an open path: the leg from the last stop back to the
//! start is not counted. Constraint violations add a penalty proportional to
//! the excess; the weights differ between the fitness-based optimizers
//! (greedy, GA) and the cost-based ones (SA, tabu).

use crate::matrix::{DistanceMatrix, TimeMatrix};
use crate::models::Constraints;

/// Penalty weights applied to constraint excess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyScale {
    /// Added per kilometer over `max_distance_km`.
    pub distance_weight: f64,
    /// Added per minute over `max_duration_hours`.
    pub duration_weight: f64,
}

impl PenaltyScale {
    /// Weights used by greedy and the genetic algorithm.
    pub const FITNESS: PenaltyScale = PenaltyScale {
        distance_weight: 0.1,
        duration_weight: 0.01,
    };

    /// Weights used by simulated annealing and tabu search.
    pub const COST: PenaltyScale = PenaltyScale {
        distance_weight: 10.0,
        duration_weight: 0.1,
    };
}

/// Totals of one tour evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourCost {
    pub total_distance: f64,
    pub total_time: u32,
    /// Distance plus constraint penalties.
    pub penalized_cost: f64,
}

impl TourCost {
    /// `1 / (1 + penalized_cost)`; higher is better.
    pub fn fitness(&self) -> f64 {
        1.0 / (1.0 + self.penalized_cost)
    }
}

/// Scores tours against one request's matrices and constraints.
#[derive(Debug, Clone, Copy)]
pub struct TourCostModel<'a> {
    distances: &'a DistanceMatrix,
    times: &'a TimeMatrix,
    constraints: Constraints,
}

impl<'a> TourCostModel<'a> {
    pub fn new(
        distances: &'a DistanceMatrix,
        times: &'a TimeMatrix,
        constraints: Constraints,
    ) -> Self {
        Self {
            distances,
            times,
            constraints,
        }
    }

    /// Sums consecutive legs of `tour` and applies the constraint penalties.
    pub fn evaluate(&self, tour: &[usize], scale: PenaltyScale) -> TourCost {
        let mut total_distance = 0.0;
        let mut total_time: u32 = 0;
        for leg in tour.windows(2) {
            total_distance += self.distances.get(leg[0], leg[1]);
            total_time = total_time.saturating_add(self.times.get(leg[0], leg[1]));
        }

        let mut penalized_cost = total_distance;
        if let Some(max_km) = self.constraints.max_distance_km {
            if total_distance > max_km {
                penalized_cost += (total_distance - max_km) * scale.distance_weight;
            }
        }
        if let Some(max_minutes) = self.constraints.max_duration_minutes() {
            if total_time > max_minutes {
                penalized_cost += f64::from(total_time - max_minutes) * scale.duration_weight;
            }
        }

        TourCost {
            total_distance,
            total_time,
            penalized_cost,
        }
    }

    /// Penalized cost on the [`PenaltyScale::COST`] weights.
    pub fn cost(&self, tour: &[usize]) -> f64 {
        self.evaluate(tour, PenaltyScale::COST).penalized_cost
    }

    /// Fitness on the [`PenaltyScale::FITNESS`] weights.
    pub fn fitness(&self, tour: &[usize]) -> f64 {
        self.evaluate(tour, PenaltyScale::FITNESS).fitness()
    }
}
