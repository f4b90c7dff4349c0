//! Motion requests and the tool height state machine.

use crate::driver::{ArcSupport, Driver, Instruction};
use gcanvas_core::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

const POSITION_EPSILON: f64 = 1e-9;

/// Native arc request: end point plus the center offset from the start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcMove {
    pub to: Point,
    pub i: f64,
    pub j: f64,
}

/// Motion collaborator used by the motion translator.
///
/// `rapid` and `linear` take planar targets: only X and Y of the point are used,
/// tool height is owned by `retract`/`plunge`.
pub trait MotionEmitter {
    /// Lift the tool to the safe travel height.
    fn retract(&mut self);
    /// Enter the material at the cutting depth.
    fn plunge(&mut self);
    fn rapid(&mut self, to: Point);
    fn linear(&mut self, to: Point);
    fn arc_cw(&mut self, arc: ArcMove);
    fn arc_ccw(&mut self, arc: ArcMove);
    fn supports_arc_cw(&self) -> bool;
    fn supports_arc_ccw(&self) -> bool;
    /// Live tool position, including Z.
    fn position(&self) -> Point;

    /// Sets the height used by the next `plunge`. Emitters with a fixed cutting
    /// height may ignore it.
    fn set_cut_z(&mut self, _cut_z: f64) {}
}

/// Heights used when expanding retract and plunge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSettings {
    /// Travel height above the stock top (Z = 0).
    pub safe_z: f64,
    /// Cutting height; negative values are below the stock top.
    pub cut_z: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            safe_z: 5.0,
            cut_z: -0.25,
        }
    }
}

/// Stock [`MotionEmitter`] forwarding resolved instructions to a [`Driver`].
///
/// The tool starts retracted above the origin. Requests that would not move the tool
/// produce no instruction, and a rapid requested while the tool is engaged retracts
/// first so rapids only ever happen at travel height.
#[derive(Debug, Clone)]
pub struct Motion<D: Driver> {
    driver: D,
    settings: MotionSettings,
    position: Point,
}

impl<D: Driver> Motion<D> {
    pub fn new(driver: D, settings: MotionSettings) -> Self {
        Self {
            driver,
            position: Point::new_3d(0.0, 0.0, settings.safe_z),
            settings,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn settings(&self) -> MotionSettings {
        self.settings
    }

    /// Takes effect on the next retract or plunge.
    pub fn set_settings(&mut self, settings: MotionSettings) {
        self.settings = settings;
    }

    pub fn is_engaged(&self) -> bool {
        self.position.z < self.settings.safe_z - POSITION_EPSILON
    }

    fn arc_support(&self) -> ArcSupport {
        self.driver.arc_support()
    }

    fn emit(&mut self, instruction: Instruction) {
        self.position = instruction.target();
        self.driver.emit(instruction);
    }

    fn planar_target(&self, to: Point) -> Point {
        Point::new_3d(to.x, to.y, self.position.z)
    }
}

impl<D: Driver> MotionEmitter for Motion<D> {
    fn retract(&mut self) {
        if (self.position.z - self.settings.safe_z).abs() <= POSITION_EPSILON {
            return;
        }
        let to = self.position.with_z(self.settings.safe_z);
        self.emit(Instruction::Rapid { to });
    }

    fn plunge(&mut self) {
        if (self.position.z - self.settings.cut_z).abs() <= POSITION_EPSILON {
            return;
        }
        let to = self.position.with_z(self.settings.cut_z);
        self.emit(Instruction::Linear { to });
    }

    fn rapid(&mut self, to: Point) {
        if self.is_engaged() {
            debug!("Rapid requested while engaged; retracting first");
            self.retract();
        }
        if self.position.same_xy(&to, POSITION_EPSILON) {
            return;
        }
        let to = self.planar_target(to);
        self.emit(Instruction::Rapid { to });
    }

    fn linear(&mut self, to: Point) {
        if self.position.same_xy(&to, POSITION_EPSILON) {
            return;
        }
        let to = self.planar_target(to);
        self.emit(Instruction::Linear { to });
    }

    fn arc_cw(&mut self, arc: ArcMove) {
        let to = self.planar_target(arc.to);
        self.emit(Instruction::ArcCw {
            to,
            i: arc.i,
            j: arc.j,
        });
    }

    fn arc_ccw(&mut self, arc: ArcMove) {
        let to = self.planar_target(arc.to);
        self.emit(Instruction::ArcCcw {
            to,
            i: arc.i,
            j: arc.j,
        });
    }

    fn supports_arc_cw(&self) -> bool {
        self.arc_support().cw
    }

    fn supports_arc_ccw(&self) -> bool {
        self.arc_support().ccw
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_cut_z(&mut self, cut_z: f64) {
        self.settings.cut_z = cut_z;
    }
}
