//! Types used in configuration structures
use super::{Grid, print_scene};
use crate::{Error, surface::Phase};
use serde::{Deserialize, Serialize};

/// Thread pool to use for multithreaded evaluation
///
/// Most users will use the global Rayon pool, but it's possible to provide your
/// own as well.
pub enum ThreadPool {
    /// User-provided pool
    Custom(rayon::ThreadPool),
    /// Global Rayon pool
    Global,
}

impl ThreadPool {
    /// Runs a function across the thread pool
    pub fn run<F: FnOnce() -> V + Send, V: Send>(&self, f: F) -> V {
        match self {
            ThreadPool::Custom(p) => p.install(f),
            ThreadPool::Global => f(),
        }
    }

    /// Returns the number of threads in the pool
    pub fn thread_count(&self) -> usize {
        match self {
            ThreadPool::Custom(p) => p.current_num_threads(),
            ThreadPool::Global => rayon::current_num_threads(),
        }
    }
}

/// Evenly spaced samples along one surface parameter
///
/// A range with `count` steps produces `count + 1` samples, including both
/// endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    /// First sample
    pub min: f64,
    /// Last sample
    pub max: f64,
    /// Number of steps between `min` and `max`
    pub count: usize,
}

impl SampleRange {
    /// Builds a new sample range
    pub fn new(min: f64, max: f64, count: usize) -> Self {
        Self { min, max, count }
    }

    /// Returns the number of samples, i.e. `count + 1`
    pub fn points(&self) -> usize {
        self.count + 1
    }

    /// Returns the spacing between samples
    pub fn step(&self) -> f64 {
        (self.max - self.min) / self.count as f64
    }

    /// Returns the value of sample `i`
    pub fn value(&self, i: usize) -> f64 {
        self.min + i as f64 * self.step()
    }
}

impl Default for SampleRange {
    fn default() -> Self {
        Self::new(0.0, 1.0, 12)
    }
}

/// Start times of each phase on the main `[0, 1]` timeline
///
/// Phases run back-to-back: each one ends where the next begins, and the
/// last ([`Phase::UnCorrugate`]) ends at `1`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseSchedule {
    corr_start: f64,
    push_start: f64,
    twist_start: f64,
    unpush_start: f64,
    uncorr_start: f64,
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self {
            corr_start: 0.00,
            push_start: 0.10,
            twist_start: 0.23,
            unpush_start: 0.60,
            uncorr_start: 0.93,
        }
    }
}

impl PhaseSchedule {
    /// Builds a new schedule from its five start times
    ///
    /// Returns an error unless `0 ≤ corr_start < push_start < twist_start <
    /// unpush_start < uncorr_start < 1`.
    pub fn new(
        corr_start: f64,
        push_start: f64,
        twist_start: f64,
        unpush_start: f64,
        uncorr_start: f64,
    ) -> Result<Self, Error> {
        let out = Self {
            corr_start,
            push_start,
            twist_start,
            unpush_start,
            uncorr_start,
        };
        let t = out.thresholds();
        // Written so that NaN fails the check
        let ordered = t.windows(2).all(|w| w[0] < w[1]);
        if ordered && t[0] >= 0.0 && t[4] < 1.0 {
            Ok(out)
        } else {
            Err(Error::UnorderedSchedule(t))
        }
    }

    /// Returns the five start times in timeline order
    pub fn thresholds(&self) -> [f64; 5] {
        [
            self.corr_start,
            self.push_start,
            self.twist_start,
            self.unpush_start,
            self.uncorr_start,
        ]
    }

    /// Returns the `[start, end)` interval of a phase
    ///
    /// [`Phase::BendIn`] is not part of the timeline and returns `None`.
    pub fn span(&self, phase: Phase) -> Option<(f64, f64)> {
        let out = match phase {
            Phase::BendIn => return None,
            Phase::Corrugate => (self.corr_start, self.push_start),
            Phase::PushThrough => (self.push_start, self.twist_start),
            Phase::Twist => (self.twist_start, self.unpush_start),
            Phase::UnPush => (self.unpush_start, self.uncorr_start),
            Phase::UnCorrugate => (self.uncorr_start, 1.0),
        };
        Some(out)
    }

    /// Finds the phase active at `time`, along with its local time in `[0, 1]`
    ///
    /// Returns `None` if `time` is before the first phase begins.
    pub fn locate(&self, time: f64) -> Option<(Phase, f64)> {
        [
            Phase::UnCorrugate,
            Phase::UnPush,
            Phase::Twist,
            Phase::PushThrough,
            Phase::Corrugate,
        ]
        .into_iter()
        .find_map(|phase| {
            let (start, end) = self.span(phase)?;
            (time >= start).then(|| (phase, (time - start) / (end - start)))
        })
    }
}

/// Settings for evaluating the eversion onto a grid
pub struct GeometryConfig<'a> {
    /// Position on the main timeline, in `[0, 1]`
    pub time: f64,

    /// Number of strips in a full revolution
    ///
    /// If this is too small, the eversion pinches.
    pub num_strips: u32,

    /// Latitude samples; `[0, 1]` runs from the north pole to the equator,
    /// `[0, 2]` from pole to pole
    pub u: SampleRange,

    /// Longitude samples; `[0, 1]` covers a single strip
    pub v: SampleRange,

    /// If set to a value `≥ 0`, ignore `time` and evaluate [`Phase::BendIn`] at
    /// this local time; negative values are ignored
    pub bend_time: Option<f64>,

    /// Phase boundaries on the main timeline
    pub schedule: PhaseSchedule,

    /// Thread pool to use for evaluation
    ///
    /// If this is `None`, then evaluation is done in a single thread;
    /// otherwise, the provided pool is used.
    pub threads: Option<&'a ThreadPool>,
}

impl Default for GeometryConfig<'_> {
    fn default() -> Self {
        Self {
            time: 0.0,
            num_strips: 8,
            u: SampleRange::default(),
            v: SampleRange::default(),
            bend_time: None,
            schedule: PhaseSchedule::default(),
            threads: Some(&ThreadPool::Global),
        }
    }
}

impl GeometryConfig<'_> {
    /// Builds a grid of the right size for this configuration
    pub fn grid(&self) -> Grid {
        Grid::for_ranges(&self.u, &self.v)
    }

    /// Selects the active phase, without evaluating anything
    pub fn phase(&self) -> Option<(Phase, f64)> {
        match self.bend_time {
            Some(t) if t >= 0.0 => Some((Phase::BendIn, t)),
            _ => self.schedule.locate(self.time),
        }
    }

    /// Evaluates the surface into `grid`
    ///
    /// Returns the phase that was evaluated and its local time.  If `time` is
    /// before the start of the first phase (and there's no bend time), the
    /// grid is left untouched and this returns `Ok(None)`.
    pub fn run(&self, grid: &mut Grid) -> Result<Option<(Phase, f64)>, Error> {
        if self.num_strips == 0 {
            return Err(Error::BadStripCount);
        }
        if self.u.count > 0 && self.v.count > 0 {
            grid.check_size(&self.u, &self.v)?;
        }
        let Some((phase, t)) = self.phase() else {
            log::debug!(
                "time {} is before the first phase; grid is unchanged",
                self.time
            );
            return Ok(None);
        };
        log::debug!("evaluating {phase} at local time {t}");
        print_scene(
            phase.function(),
            &self.u,
            &self.v,
            t,
            grid,
            self.num_strips,
            self.threads,
        )?;
        Ok(Some((phase, t)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sample_range() {
        let r = SampleRange::new(0.0, 2.0, 8);
        assert_eq!(r.points(), 9);
        assert_eq!(r.step(), 0.25);
        assert_eq!(r.value(0), 0.0);
        assert_eq!(r.value(8), 2.0);
    }

    #[test]
    fn schedule_validation() {
        assert!(PhaseSchedule::new(0.0, 0.1, 0.23, 0.6, 0.93).is_ok());
        assert_eq!(
            PhaseSchedule::new(0.0, 0.1, 0.23, 0.6, 0.93).unwrap(),
            PhaseSchedule::default()
        );
        for bad in [
            [0.0, 0.1, 0.1, 0.6, 0.93],
            [0.0, 0.3, 0.2, 0.6, 0.93],
            [-0.1, 0.1, 0.23, 0.6, 0.93],
            [0.0, 0.1, 0.23, 0.6, 1.0],
            [0.0, f64::NAN, 0.23, 0.6, 0.93],
        ] {
            let r = PhaseSchedule::new(bad[0], bad[1], bad[2], bad[3], bad[4]);
            assert!(matches!(r, Err(Error::UnorderedSchedule(..))), "{bad:?}");
        }
    }

    #[test]
    fn locate() {
        let s = PhaseSchedule::default();
        let (p, t) = s.locate(0.05).unwrap();
        assert_eq!(p, Phase::Corrugate);
        assert_relative_eq!(t, 0.5, epsilon = 1e-12);

        assert_eq!(s.locate(0.0), Some((Phase::Corrugate, 0.0)));
        assert_eq!(s.locate(0.10), Some((Phase::PushThrough, 0.0)));
        assert_eq!(s.locate(0.23).unwrap().0, Phase::Twist);
        assert_eq!(s.locate(0.60).unwrap().0, Phase::UnPush);
        assert_eq!(s.locate(1.0), Some((Phase::UnCorrugate, 1.0)));

        let s = PhaseSchedule::new(0.2, 0.3, 0.4, 0.5, 0.6).unwrap();
        assert_eq!(s.locate(0.1), None);
        assert_eq!(s.span(Phase::BendIn), None);
    }

    #[test]
    fn bend_time_overrides_timeline() {
        let cfg = GeometryConfig {
            time: 0.5,
            bend_time: Some(0.25),
            ..Default::default()
        };
        assert_eq!(cfg.phase(), Some((Phase::BendIn, 0.25)));
    }

    #[test]
    fn negative_bend_time_is_ignored() {
        for bend_time in [-1.0, -1e-9, f64::NAN] {
            let cfg = GeometryConfig {
                time: 0.5,
                bend_time: Some(bend_time),
                threads: None,
                ..Default::default()
            };
            let (phase, t) = cfg.phase().unwrap();
            assert_eq!(phase, Phase::Twist, "bend time {bend_time}");
            assert_relative_eq!(t, 0.27 / 0.37, epsilon = 1e-12);

            let mut grid = cfg.grid();
            assert_eq!(cfg.run(&mut grid).unwrap(), Some((phase, t)));
        }

        let cfg = GeometryConfig {
            bend_time: Some(0.0),
            ..Default::default()
        };
        assert_eq!(cfg.phase(), Some((Phase::BendIn, 0.0)));
    }

    #[test]
    fn run_leaves_grid_before_first_phase() {
        let cfg = GeometryConfig {
            time: 0.1,
            schedule: PhaseSchedule::new(0.2, 0.3, 0.4, 0.5, 0.6).unwrap(),
            threads: None,
            ..Default::default()
        };
        let mut grid = cfg.grid();
        grid[(3, 3)].vertex = [5.0; 3];
        assert!(cfg.run(&mut grid).unwrap().is_none());
        assert_eq!(grid[(3, 3)].vertex, [5.0; 3]);
    }

    #[test]
    fn run_checks_arguments() {
        let cfg = GeometryConfig {
            num_strips: 0,
            ..Default::default()
        };
        let mut grid = cfg.grid();
        assert!(matches!(cfg.run(&mut grid), Err(Error::BadStripCount)));

        let cfg = GeometryConfig::default();
        let mut grid = Grid::new(13, 12);
        assert!(matches!(
            cfg.run(&mut grid),
            Err(Error::BadGridSize(13, 12, 13, 13))
        ));
    }
}
