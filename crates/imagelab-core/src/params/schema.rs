//! Static parameter schema for each operation.
//!
//! The configuration collaborator reads this table to build its controls
//! (name, domain, default); the engine reads it to validate a
//! [`super::ParameterSet`].

use serde::Serialize;

use crate::operation::Operation;

/// Value domain and default of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamKind {
    /// Integer slider; out-of-range values are clamped.
    Int { min: i64, max: i64, default: i64 },
    /// Floating slider; out-of-range values are clamped.
    Float { min: f64, max: f64, default: f64 },
    /// Closed set of labels; unknown labels are rejected.
    Choice {
        options: &'static [&'static str],
        default: &'static str,
    },
}

/// One named parameter of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
}

impl ParamSpec {
    /// Labels accepted by a choice parameter; empty for numeric ones.
    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            ParamKind::Choice { options, .. } => options,
            _ => &[],
        }
    }

    /// Clamp an integer into this parameter's domain. Non-integer specs
    /// pass the value through.
    pub(crate) fn clamp_int(&self, value: i64) -> i64 {
        match self.kind {
            ParamKind::Int { min, max, .. } => value.clamp(min, max),
            _ => value,
        }
    }

    /// Clamp a float into this parameter's domain; NaN falls back to the default.
    pub(crate) fn clamp_float(&self, value: f64) -> f64 {
        match self.kind {
            ParamKind::Float { min, max, default } => {
                if value.is_nan() {
                    default
                } else {
                    value.clamp(min, max)
                }
            }
            _ => value,
        }
    }
}

pub const THRESHOLD: ParamSpec = ParamSpec {
    name: "threshold",
    kind: ParamKind::Int {
        min: 0,
        max: 255,
        default: 128,
    },
};

pub const BRIGHTNESS: ParamSpec = ParamSpec {
    name: "brightness",
    kind: ParamKind::Int {
        min: -100,
        max: 100,
        default: 0,
    },
};

pub const CONTRAST: ParamSpec = ParamSpec {
    name: "contrast",
    kind: ParamKind::Float {
        min: 0.1,
        max: 3.0,
        default: 1.0,
    },
};

pub const LOGIC_OPERATION: ParamSpec = ParamSpec {
    name: "operation",
    kind: ParamKind::Choice {
        options: &["AND", "OR", "XOR", "NOT"],
        default: "AND",
    },
};

pub const KERNEL_SIZE: ParamSpec = ParamSpec {
    name: "kernel_size",
    kind: ParamKind::Int {
        min: 1,
        max: 15,
        default: 3,
    },
};

pub const ITERATIONS: ParamSpec = ParamSpec {
    name: "iterations",
    kind: ParamKind::Int {
        min: 1,
        max: 10,
        default: 1,
    },
};

pub const EDGE_METHOD: ParamSpec = ParamSpec {
    name: "method",
    kind: ParamKind::Choice {
        options: &["Canny", "Sobel"],
        default: "Canny",
    },
};

pub const CANNY_THRESHOLD1: ParamSpec = ParamSpec {
    name: "threshold1",
    kind: ParamKind::Int {
        min: 0,
        max: 500,
        default: 100,
    },
};

pub const CANNY_THRESHOLD2: ParamSpec = ParamSpec {
    name: "threshold2",
    kind: ParamKind::Int {
        min: 0,
        max: 500,
        default: 200,
    },
};

pub const TRANSFORM: ParamSpec = ParamSpec {
    name: "transform",
    kind: ParamKind::Choice {
        options: &[
            "Rotate90",
            "Rotate180",
            "Rotate270",
            "FlipHorizontal",
            "FlipVertical",
        ],
        default: "Rotate90",
    },
};

/// Parameters declared by `operation`, in display order.
pub fn schema(operation: Operation) -> &'static [ParamSpec] {
    match operation {
        Operation::Grayscale | Operation::Histogram | Operation::Negative => &[],
        Operation::Threshold => &[THRESHOLD],
        Operation::BrightnessContrast => &[BRIGHTNESS, CONTRAST],
        Operation::Logical => &[LOGIC_OPERATION],
        Operation::Dilation => &[KERNEL_SIZE, ITERATIONS],
        Operation::EdgeDetection => &[EDGE_METHOD, CANNY_THRESHOLD1, CANNY_THRESHOLD2],
        Operation::RotateFlip => &[TRANSFORM],
    }
}
