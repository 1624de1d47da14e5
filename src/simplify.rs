//! Lowest-error-first greedy polyline simplification.
//!
//! Every interior point carries the error the polyline would have if that
//! point were dropped, measured over all original points between its
//! present neighbors. The cheapest point is removed while its error stays
//! below the tolerance, and only the two neighbors whose gap grew get
//! rescored.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::deviation::ErrorMetric;
use crate::geometry::Point;
use crate::neighborhood::{find_neighborhood, wrap_points, WorkingPoint};

/// How the next candidate for removal is picked. Both give the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Min-heap keyed by deviation with lazy invalidation of stale entries.
    #[default]
    Heap,
    /// Linear scan over every remaining interior point on each step.
    Scan,
}

/// Why a run stopped removing points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// Fewer than three points, nothing is removable.
    TooShort,
    /// Only the two anchors are left.
    FullyReduced,
    /// The cheapest remaining point is not below the tolerance.
    ToleranceReached,
    /// The step budget ran out.
    StepLimit,
}

/// Settings for one run: removal tolerance, optional step budget, metric
/// and selection strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifyOptions {
    pub tolerance: f64,
    pub max_steps: Option<usize>,
    pub metric: ErrorMetric,
    pub selection: Selection,
}

impl SimplifyOptions {
    pub fn new(tolerance: f64) -> Self {
        SimplifyOptions {
            tolerance,
            max_steps: None,
            metric: ErrorMetric::default(),
            selection: Selection::default(),
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_metric(mut self, metric: ErrorMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplification {
    /// Surviving points in original order.
    pub points: Vec<Point>,
    /// Original indices of the surviving points.
    pub kept: Vec<usize>,
    /// Number of points removed.
    pub steps: usize,
    pub stop: StopReason,
}

/// Simplifies `sequence` with the maximum deviation metric and no step limit.
///
/// Points whose deviation is strictly below `tolerance` are removed, lowest
/// first. The first and last points are always kept, and inputs shorter than
/// three points are returned unchanged.
pub fn simplify(sequence: &[Point], tolerance: f64) -> Vec<Point> {
    simplify_with(sequence, &SimplifyOptions::new(tolerance)).points
}

/// Original indices of the points that survive simplification.
pub fn simplify_indices(sequence: &[Point], options: &SimplifyOptions) -> Vec<usize> {
    simplify_with(sequence, options).kept
}

/// Simplifies `sequence` under `options`, reporting the survivors, the number
/// of removals and why the run stopped.
pub fn simplify_with(sequence: &[Point], options: &SimplifyOptions) -> Simplification {
    if sequence.len() < 3 {
        return Simplification {
            points: sequence.to_vec(),
            kept: (0..sequence.len()).collect(),
            steps: 0,
            stop: StopReason::TooShort,
        };
    }

    debug!(
        "simplifying {} points, tolerance {}, metric {:?}, selection {:?}",
        sequence.len(), options.tolerance, options.metric, options.selection
    );

    let mut run = Run::new(sequence, options);
    let stop = match options.selection {
        Selection::Scan => run.reduce_by_scan(),
        Selection::Heap => run.reduce_by_heap(),
    };

    let result = run.finish(stop);
    debug!(
        "kept {} of {} points after {} steps ({:?})",
        result.points.len(), sequence.len(), result.steps, result.stop
    );
    result
}

/// Working state of one simplification run.
struct Run<'a> {
    sequence: &'a [Point],
    points: Vec<WorkingPoint>,
    tolerance: f64,
    max_steps: Option<usize>,
    metric: ErrorMetric,
    steps: usize,
}

impl<'a> Run<'a> {
    fn new(sequence: &'a [Point], options: &SimplifyOptions) -> Self {
        let mut run = Run {
            sequence,
            points: wrap_points(sequence),
            tolerance: options.tolerance,
            max_steps: options.max_steps,
            metric: options.metric,
            steps: 0,
        };

        for i in 1..run.points.len() - 1 {
            run.rescore(i);
        }
        run
    }

    fn is_interior(&self, i: usize) -> bool {
        i > 0 && i + 1 < self.points.len()
    }

    fn budget_exhausted(&self) -> bool {
        self.max_steps.map_or(false, |max| self.steps >= max)
    }

    fn is_removable(&self, deviation: f64) -> bool {
        deviation < self.tolerance
    }

    /// Recomputes the deviation of point `i` against its present neighbors.
    fn rescore(&mut self, i: usize) {
        let deviation = match find_neighborhood(&self.points, i) {
            (Some(left), Some(right)) => {
                self.metric.evaluate(self.sequence, &self.points[left], &self.points[right])
            }
            _ => None,
        };
        self.points[i].deviation = deviation;
    }

    /// Marks `i` removed and rescores the interior neighbors that now span
    /// its gap. Returns the rescored neighbors.
    fn remove(&mut self, i: usize) -> Vec<usize> {
        trace!(
            "removing point {} ({}, {}) with deviation {:?}",
            i, self.points[i].x, self.points[i].y, self.points[i].deviation
        );
        self.points[i].removed = true;
        self.steps += 1;

        let (left, right) = find_neighborhood(&self.points, i);
        let mut rescored = Vec::with_capacity(2);
        for neighbor in [left, right].into_iter().flatten() {
            if self.is_interior(neighbor) {
                self.rescore(neighbor);
                rescored.push(neighbor);
            }
        }
        rescored
    }

    fn reduce_by_scan(&mut self) -> StopReason {
        loop {
            if self.budget_exhausted() {
                return StopReason::StepLimit;
            }

            let last = self.points.len() - 1;
            let candidate = self.points[1..last]
                .iter()
                .filter(|p| !p.removed)
                .map(|p| (p.index, p.deviation.unwrap_or(f64::INFINITY)))
                .min_by(|a, b| a.1.total_cmp(&b.1));

            let Some((index, deviation)) = candidate else {
                return StopReason::FullyReduced;
            };
            if !self.is_removable(deviation) {
                return StopReason::ToleranceReached;
            }
            self.remove(index);
        }
    }

    fn reduce_by_heap(&mut self) -> StopReason {
        let mut generation = vec![0u32; self.points.len()];
        let mut heap = BinaryHeap::with_capacity(self.points.len());
        for p in &self.points[1..self.points.len() - 1] {
            heap.push(Candidate::new(p, 0));
        }

        loop {
            if self.budget_exhausted() {
                return StopReason::StepLimit;
            }

            let Some(entry) = heap.pop() else {
                return StopReason::FullyReduced;
            };
            if self.points[entry.index].removed || generation[entry.index] != entry.generation {
                continue;
            }
            if !self.is_removable(entry.deviation) {
                return StopReason::ToleranceReached;
            }

            for neighbor in self.remove(entry.index) {
                generation[neighbor] += 1;
                heap.push(Candidate::new(&self.points[neighbor], generation[neighbor]));
            }
        }
    }

    fn finish(self, stop: StopReason) -> Simplification {
        let kept: Vec<usize> = self.points.iter()
            .filter(|p| !p.removed)
            .map(|p| p.index)
            .collect();
        let points = kept.iter().map(|&i| self.points[i].point()).collect();

        Simplification {
            points,
            kept,
            steps: self.steps,
            stop,
        }
    }
}

/// Heap entry. Ordered so that `BinaryHeap` pops the lowest deviation
/// first, and the lowest original index among equal deviations.
struct Candidate {
    deviation: f64,
    index: usize,
    generation: u32,
}

impl Candidate {
    fn new(point: &WorkingPoint, generation: u32) -> Self {
        Candidate {
            deviation: point.deviation.unwrap_or(f64::INFINITY),
            index: point.index,
            generation,
        }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other.deviation.total_cmp(&self.deviation)
            .then_with(|| other.index.cmp(&self.index))
    }
}
