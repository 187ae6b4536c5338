use tracing::{debug, info, trace};

use crate::error::Result;
use crate::geometry::{influence_of, ControlPoint, CubicBezier, Influence, Polygon};
use crate::math::Point2;
use crate::operations::collision::{CollisionReport, ScanCollisions};

use super::{HeuristicScore, PlannerConfig, MIN_SEARCH_RADIUS};

/// Why a search stopped without reaching a collision-free curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallCause {
    /// The collision count stayed the same for `stagnation_limit` iterations.
    Stagnation,
    /// The search radius decayed below [`MIN_SEARCH_RADIUS`].
    RadiusFloor,
}

/// Terminal state of a search. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The curve no longer collides with any obstacle.
    Converged,
    /// The iteration budget ran out.
    Exhausted,
    /// The search stopped making progress.
    Stalled(StallCause),
}

impl Termination {
    /// Returns whether the search ended collision-free.
    #[must_use]
    pub fn is_converged(self) -> bool {
        self == Self::Converged
    }
}

/// Outcome of a planning request.
///
/// The curve is best effort: unless `termination` is `Converged` it may still
/// collide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanningResult {
    /// The final curve.
    pub spline: CubicBezier,
    /// How the search ended.
    pub termination: Termination,
    /// Collision runs on the final curve.
    pub collisions: usize,
    /// Collision runs on the curve the search started from.
    pub initial_collisions: usize,
    /// Iterations performed.
    pub iterations: usize,
    /// Iterations that relocated a control point.
    pub moves: usize,
}

/// Plans a collision-free cubic Bezier between two fixed main points.
///
/// Runs a local search that relocates one control point per iteration,
/// alternating between the two, and keeps a candidate only when its
/// [`HeuristicScore`] beats the current placement.
///
/// # Algorithm
///
/// 1. **Init**: start from the straight-line curve and focus on the control
///    point that dominates most collisions (ties pick `P2`).
/// 2. **Search**: score the focused point where it stands and at every
///    candidate from the [`SearchStrategy`](super::SearchStrategy); move it to
///    the best candidate if that candidate is strictly better.
/// 3. Switch focus. Once both control points have had a turn, multiply the
///    search radius by `radius_decay`.
/// 4. Stop when the curve is collision-free, the iteration budget runs out,
///    the collision count stagnates, or the radius falls below the floor.
#[derive(Debug)]
pub struct PathOptimizer<'a> {
    config: PlannerConfig,
    obstacles: &'a [Polygon],
}

impl<'a> PathOptimizer<'a> {
    /// Creates an optimizer over `obstacles`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`PlannerConfig::validate`].
    pub fn new(config: PlannerConfig, obstacles: &'a [Polygon]) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, obstacles })
    }

    /// Returns the planner configuration.
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans from the straight-line curve between `start` and `end`.
    #[must_use]
    pub fn execute(&self, start: Point2, end: Point2) -> PlanningResult {
        self.execute_from(CubicBezier::straight(start, end))
    }

    /// Plans starting from an existing curve without resetting its control points.
    #[must_use]
    pub fn execute_from(&self, spline: CubicBezier) -> PlanningResult {
        self.search(spline).run()
    }

    /// Starts a search that can be advanced one iteration at a time.
    #[must_use]
    pub fn search(&self, spline: CubicBezier) -> PathSearch<'_> {
        PathSearch::new(&self.config, self.obstacles, spline)
    }
}

/// Working state of a single planning run.
///
/// Owns the curve being optimized. Candidates are scored on copies; only a
/// winning candidate is written back.
#[derive(Debug)]
pub struct PathSearch<'a> {
    config: &'a PlannerConfig,
    obstacles: &'a [Polygon],
    spline: CubicBezier,
    report: CollisionReport,
    focus: ControlPoint,
    initial_focus: ControlPoint,
    radius: f64,
    iterations: usize,
    moves: usize,
    stagnant: usize,
    initial_collisions: usize,
    termination: Option<Termination>,
}

impl<'a> PathSearch<'a> {
    fn new(config: &'a PlannerConfig, obstacles: &'a [Polygon], spline: CubicBezier) -> Self {
        let report = scan(config, obstacles, &spline);
        let focus = dominant_control(&report);
        let termination = report.is_empty().then_some(Termination::Converged);
        debug!(
            collisions = report.len(),
            ?focus,
            "starting path search"
        );
        Self {
            config,
            obstacles,
            spline,
            initial_collisions: report.len(),
            report,
            focus,
            initial_focus: focus,
            radius: config.search_radius,
            iterations: 0,
            moves: 0,
            stagnant: 0,
            termination,
        }
    }

    /// The curve as it currently stands.
    #[must_use]
    pub fn spline(&self) -> &CubicBezier {
        &self.spline
    }

    /// Collision report of the current curve.
    #[must_use]
    pub fn report(&self) -> &CollisionReport {
        &self.report
    }

    /// The control point the next iteration will move.
    #[must_use]
    pub fn focus(&self) -> ControlPoint {
        self.focus
    }

    /// Current radius of the candidate circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Iterations performed so far.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Runs one search iteration.
    ///
    /// Returns the terminal state once the search has ended; further calls
    /// keep returning it without doing any work.
    pub fn step(&mut self) -> Option<Termination> {
        if self.termination.is_none() {
            self.termination = self.check_guards();
        }
        if self.termination.is_some() {
            return self.termination;
        }

        self.iterations += 1;
        let moved = self.relocate_focus();

        self.focus = self.focus.other();
        if self.focus == self.initial_focus {
            self.radius *= self.config.radius_decay;
        }

        let previous = self.report.len();
        self.report = scan(self.config, self.obstacles, &self.spline);
        if self.report.len() == previous {
            self.stagnant += 1;
        } else {
            self.stagnant = 0;
        }
        debug!(
            iteration = self.iterations,
            moved,
            collisions = self.report.len(),
            radius = self.radius,
            "search iteration"
        );

        if self.report.is_empty() {
            self.termination = Some(Termination::Converged);
        }
        self.termination
    }

    /// Steps until a terminal state is reached.
    #[must_use]
    pub fn run(mut self) -> PlanningResult {
        let termination = loop {
            if let Some(termination) = self.step() {
                break termination;
            }
        };
        info!(
            ?termination,
            iterations = self.iterations,
            moves = self.moves,
            collisions = self.report.len(),
            initial_collisions = self.initial_collisions,
            "path search finished"
        );
        PlanningResult {
            spline: self.spline,
            termination,
            collisions: self.report.len(),
            initial_collisions: self.initial_collisions,
            iterations: self.iterations,
            moves: self.moves,
        }
    }

    fn check_guards(&self) -> Option<Termination> {
        if self.iterations >= self.config.max_iterations {
            Some(Termination::Exhausted)
        } else if self.stagnant >= self.config.stagnation_limit {
            Some(Termination::Stalled(StallCause::Stagnation))
        } else if self.radius < MIN_SEARCH_RADIUS {
            Some(Termination::Stalled(StallCause::RadiusFloor))
        } else {
            None
        }
    }

    /// Moves the focused control point to the best candidate if it beats the
    /// current placement. Returns whether it moved.
    fn relocate_focus(&mut self) -> bool {
        let focus = self.focus;
        let current =
            HeuristicScore::from_report(&self.spline, focus, &self.report, self.config.resolution);
        let candidates = self.config.strategy.candidates(
            &self.spline.control(focus),
            self.radius,
            self.config.candidates,
        );

        let best = candidates
            .into_iter()
            .map(|position| {
                let trial = self.spline.with_control(focus, position);
                let score = HeuristicScore::evaluate(&trial, focus, self.obstacles, self.config);
                (score, position)
            })
            .min_by(|a, b| a.0.cmp(&b.0));

        match best {
            Some((score, position)) if score < current => {
                self.spline.set_control(focus, position);
                self.moves += 1;
                true
            }
            Some((score, _)) => {
                trace!(?focus, ?score, ?current, "no candidate improves the focus");
                false
            }
            None => false,
        }
    }
}

fn scan(config: &PlannerConfig, obstacles: &[Polygon], spline: &CubicBezier) -> CollisionReport {
    ScanCollisions::new(spline, obstacles, config.resolution, config.half_width).execute()
}

/// Picks the control point that dominates more collision runs; ties pick `P2`.
fn dominant_control(report: &CollisionReport) -> ControlPoint {
    let (mut p1, mut p2) = (0_usize, 0_usize);
    for t in report.parameters() {
        match influence_of(t) {
            Influence::P1 => p1 += 1,
            Influence::P2 => p2 += 1,
            Influence::Both => {}
        }
    }
    if p1 > p2 {
        ControlPoint::P1
    } else {
        ControlPoint::P2
    }
}
