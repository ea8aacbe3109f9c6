//! Owns every animated value of a chart and advances them per frame.

use std::time::Duration;

use crate::data::FitParameters;
use crate::scale::ScreenPoint;

use super::spring::SpringConfig;
use super::value::AnimatedValue;

/// How the point set changed during a retarget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetargetSummary {
    /// Indices that received a fresh, snapped-in value.
    pub added: usize,
    /// Trailing indices whose values were dropped.
    pub removed: usize,
}

/// One animated screen position per point index plus the fit line.
///
/// Points are keyed by their index in the dataset. When the dataset grows,
/// the new indices start settled on their target (no fly-in from the origin);
/// when it shrinks, the trailing values are discarded on the same retarget.
#[derive(Debug, Clone)]
pub struct Scheduler {
    spring: SpringConfig,
    points: Vec<AnimatedValue<ScreenPoint>>,
    line: Option<AnimatedValue<FitParameters>>,
}

impl Scheduler {
    pub fn new(spring: SpringConfig) -> Self {
        Self {
            spring,
            points: Vec::new(),
            line: None,
        }
    }

    pub fn spring(&self) -> &SpringConfig {
        &self.spring
    }

    pub fn set_spring(&mut self, spring: SpringConfig) {
        self.spring = spring;
    }

    /// Retarget every value from one render pass's targets.
    ///
    /// All values move to the new targets together so no frame mixes targets
    /// from two different passes.
    pub fn retarget(
        &mut self,
        targets: &[ScreenPoint],
        fit: FitParameters,
        immediate: bool,
    ) -> RetargetSummary {
        let mut summary = RetargetSummary::default();
        summary.removed = self.truncate(targets.len());
        for (value, target) in self.points.iter_mut().zip(targets) {
            value.retarget(*target, immediate);
        }
        let known = self.points.len();
        if targets.len() > known {
            summary.added = targets.len() - known;
            self.points
                .extend(targets[known..].iter().map(|t| AnimatedValue::settled_at(*t)));
        }
        match &mut self.line {
            Some(line) => line.retarget(fit, immediate),
            None => self.line = Some(AnimatedValue::settled_at(fit)),
        }
        summary
    }

    /// Advance all moving values by `dt`. Returns `true` while anything moves.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let spring = self.spring;
        let mut active = false;
        for value in &mut self.points {
            active |= value.advance(dt, &spring);
        }
        if let Some(line) = &mut self.line {
            active |= line.advance(dt, &spring);
        }
        active
    }

    pub fn is_settled(&self) -> bool {
        self.points.iter().all(AnimatedValue::is_settled)
            && self.line.as_ref().map_or(true, AnimatedValue::is_settled)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Current position of point `index`.
    pub fn point(&self, index: usize) -> Option<ScreenPoint> {
        self.points.get(index).map(AnimatedValue::current)
    }

    /// Current positions, in index order.
    pub fn points(&self) -> impl Iterator<Item = ScreenPoint> + '_ {
        self.points.iter().map(AnimatedValue::current)
    }

    /// Current fit line, once a retarget has happened.
    pub fn line(&self) -> Option<FitParameters> {
        self.line.as_ref().map(AnimatedValue::current)
    }

    /// Forget points at `len` and beyond. Returns how many were dropped.
    pub fn truncate(&mut self, len: usize) -> usize {
        let removed = self.points.len().saturating_sub(len);
        self.points.truncate(len);
        removed
    }

    /// Drop everything (the view went away).
    pub fn clear(&mut self) {
        self.points.clear();
        self.line = None;
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SpringConfig::default())
    }
}
