//! Display state of the everting sphere
use super::{Layout, Mesh, MeshStyle};
use crate::{
    Error,
    eval::{GeometryConfig, Grid, PhaseSchedule, SampleRange, ThreadPool},
    surface::Phase,
};
use serde::{Deserialize, Serialize};

/// Number of hemispheres in a full sphere
const HEMISPHERES: u32 = 2;

/// The sphere being everted, along with how much of it to show
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    time: f64,
    num_strips: u32,
    hemispheres: u32,
    strips_to_display: u32,

    /// Latitude patches per hemisphere (at least 2 are used)
    pub lat_patches: usize,
    /// Longitude patches per strip (at least 2 are used)
    pub long_patches: usize,
    /// Only compute half of each strip
    pub half_strips: bool,
    /// If set to a value `≥ 0`, show the bend-in at this local time instead of
    /// the eversion
    pub bend_time: Option<f64>,
    /// Phase boundaries on the main timeline
    pub schedule: PhaseSchedule,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            time: 0.0,
            num_strips: 8,
            hemispheres: HEMISPHERES,
            strips_to_display: 8,
            lat_patches: 12,
            long_patches: 12,
            half_strips: false,
            bend_time: None,
            schedule: PhaseSchedule::default(),
        }
    }
}

impl Sphere {
    /// Current position on the timeline, in `[0, 1]`
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Sets the time, clamping to `[0, 1]`
    pub fn set_time(&mut self, t: f64) {
        self.time = t.clamp(0.0, 1.0);
    }

    /// Steps forward in time, unless already at the end
    pub fn increment_time(&mut self, delta: f64) {
        if self.time < 1.0 {
            self.set_time(self.time + delta);
        }
    }

    /// Steps backward in time, unless already at the start
    pub fn decrement_time(&mut self, delta: f64) {
        if self.time > 0.0 {
            self.set_time(self.time - delta);
        }
    }

    /// Number of strips in a full revolution
    pub fn num_strips(&self) -> u32 {
        self.num_strips
    }

    /// Sets the number of strips (at least 1), displaying all of them
    pub fn set_num_strips(&mut self, n: u32) {
        self.num_strips = n.max(1);
        self.strips_to_display = self.num_strips;
    }

    /// Adds a strip, which is also displayed
    pub fn increment_strips(&mut self) {
        self.num_strips += 1;
        self.strips_to_display += 1;
    }

    /// Removes a strip, keeping at least one
    pub fn decrement_strips(&mut self) {
        if self.num_strips > 1 {
            self.num_strips -= 1;
            self.strips_to_display = (self.strips_to_display - 1).max(1);
        }
    }

    /// Number of strips shown per hemisphere
    pub fn strips_to_display(&self) -> u32 {
        self.strips_to_display
    }

    /// Sets the number of strips shown, clamped to `1..=num_strips`
    pub fn set_strips_to_display(&mut self, n: u32) {
        self.strips_to_display = n.clamp(1, self.num_strips);
    }

    /// Number of hemispheres shown (1 or 2)
    pub fn hemispheres(&self) -> u32 {
        self.hemispheres
    }

    /// Switches between showing one and both hemispheres
    pub fn toggle_hemispheres(&mut self) {
        self.hemispheres = if self.hemispheres == HEMISPHERES {
            1
        } else {
            self.hemispheres + 1
        };
    }

    /// Builds the evaluation settings for the fundamental patch
    pub fn config<'a>(
        &self,
        threads: Option<&'a ThreadPool>,
    ) -> GeometryConfig<'a> {
        let v_max = if self.half_strips { 0.5 } else { 1.0 };
        GeometryConfig {
            time: self.time,
            num_strips: self.num_strips,
            u: SampleRange::new(0.0, 1.0, self.lat_patches.max(2)),
            v: SampleRange::new(0.0, v_max, self.long_patches.max(2)),
            bend_time: self.bend_time,
            schedule: self.schedule,
            threads,
        }
    }

    /// Evaluates one strip of one hemisphere, from the north pole to the
    /// equator
    ///
    /// Also returns the phase that was evaluated, if any.
    pub fn grid(
        &self,
        threads: Option<&ThreadPool>,
    ) -> Result<(Grid, Option<(Phase, f64)>), Error> {
        let cfg = self.config(threads);
        let mut grid = cfg.grid();
        let phase = cfg.run(&mut grid)?;
        Ok((grid, phase))
    }

    /// Stitches an evaluated patch into the displayed part of the sphere
    pub fn assemble(&self, grid: &Grid, style: MeshStyle) -> Mesh {
        let layout = Layout {
            hemispheres: self.hemispheres as usize,
            strips: self.strips_to_display as usize,
            num_strips: self.num_strips,
        };
        layout.build(grid, style)
    }

    /// Evaluates and meshes the displayed part of the sphere
    pub fn mesh(
        &self,
        style: MeshStyle,
        threads: Option<&ThreadPool>,
    ) -> Result<Mesh, Error> {
        let (grid, _phase) = self.grid(threads)?;
        Ok(self.assemble(&grid, style))
    }
}

/// Ping-pong animation of the eversion
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Time step per frame
    pub delta: f64,
    /// Whether the animation is currently running backwards
    pub backwards: bool,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            delta: 1.0 / 256.0,
            backwards: false,
        }
    }
}

impl Animation {
    /// Advances the sphere by one frame
    ///
    /// On reaching either end of the timeline, the next call reverses the
    /// direction instead of stepping.
    pub fn advance(&mut self, sphere: &mut Sphere) {
        if self.backwards {
            if sphere.time() == 0.0 {
                self.backwards = false;
            } else {
                sphere.decrement_time(self.delta);
            }
        } else if sphere.time() == 1.0 {
            self.backwards = true;
        } else {
            sphere.increment_time(self.delta);
        }
    }
}
