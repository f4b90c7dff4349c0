//! Machine instruction drivers.
//!
//! A [`Driver`] receives fully resolved [`Instruction`]s (absolute XYZ targets) and
//! turns them into whatever the machine understands. Text dialects live outside this
//! workspace; [`RecordingDriver`] keeps the instructions in memory for inspection,
//! tests and JSON export.

use gcanvas_core::Point;
use serde::{Deserialize, Serialize};

/// Native circular interpolation a driver can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArcSupport {
    /// Clockwise arcs (G2-style).
    pub cw: bool,
    /// Counter-clockwise arcs (G3-style).
    pub ccw: bool,
}

impl ArcSupport {
    pub const NONE: ArcSupport = ArcSupport {
        cw: false,
        ccw: false,
    };
    pub const BOTH: ArcSupport = ArcSupport { cw: true, ccw: true };
}

/// A single resolved machine motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Instruction {
    /// Non-cutting repositioning.
    Rapid { to: Point },
    /// Straight cut at feed rate.
    Linear { to: Point },
    /// Clockwise arc; `i`/`j` locate the center relative to the start point.
    ArcCw { to: Point, i: f64, j: f64 },
    /// Counter-clockwise arc; `i`/`j` locate the center relative to the start point.
    ArcCcw { to: Point, i: f64, j: f64 },
}

impl Instruction {
    /// The position the tool ends up at.
    pub fn target(&self) -> Point {
        match self {
            Instruction::Rapid { to }
            | Instruction::Linear { to }
            | Instruction::ArcCw { to, .. }
            | Instruction::ArcCcw { to, .. } => *to,
        }
    }

    pub fn is_rapid(&self) -> bool {
        matches!(self, Instruction::Rapid { .. })
    }

    pub fn is_arc(&self) -> bool {
        matches!(self, Instruction::ArcCw { .. } | Instruction::ArcCcw { .. })
    }
}

/// Consumer of resolved machine instructions.
pub trait Driver {
    fn emit(&mut self, instruction: Instruction);

    /// Arc directions this driver executes natively.
    fn arc_support(&self) -> ArcSupport {
        ArcSupport::NONE
    }
}

/// Driver that records every instruction in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    arc_support: ArcSupport,
    instructions: Vec<Instruction>,
}

impl RecordingDriver {
    pub fn new(arc_support: ArcSupport) -> Self {
        Self {
            arc_support,
            instructions: Vec::new(),
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn take_instructions(&mut self) -> Vec<Instruction> {
        std::mem::take(&mut self.instructions)
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Pretty JSON array of the recorded instructions.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.instructions)
    }
}

impl Driver for RecordingDriver {
    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    fn arc_support(&self) -> ArcSupport {
        self.arc_support
    }
}
