//! Operation identifiers and their resolved, typed form.
//!
//! [`Operation`] is the closed set of identifiers a caller selects from.
//! [`Transform`] pairs an operation with its validated parameters; resolving
//! one from a [`ParameterSet`] is the only place parameter policy lives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::edges::EdgeMethod;
use crate::error::EngineError;
use crate::mask::LogicOp;
use crate::params::schema::{
    schema, BRIGHTNESS, CANNY_THRESHOLD1, CANNY_THRESHOLD2, CONTRAST, EDGE_METHOD, ITERATIONS,
    KERNEL_SIZE, LOGIC_OPERATION, THRESHOLD, TRANSFORM,
};
use crate::params::{normalize_label, ParameterSet};
use crate::transform::Orientation;

/// The operations offered by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Grayscale,
    Threshold,
    BrightnessContrast,
    Logical,
    Histogram,
    Dilation,
    EdgeDetection,
    RotateFlip,
    Negative,
}

impl Operation {
    /// Every operation, in menu order.
    pub const ALL: [Operation; 9] = [
        Operation::Grayscale,
        Operation::Threshold,
        Operation::BrightnessContrast,
        Operation::Logical,
        Operation::Histogram,
        Operation::Dilation,
        Operation::EdgeDetection,
        Operation::RotateFlip,
        Operation::Negative,
    ];

    /// Human-readable label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Grayscale => "Grayscale",
            Operation::Threshold => "Threshold (Binary)",
            Operation::BrightnessContrast => "Brightness/Contrast",
            Operation::Logical => "Logical Operation",
            Operation::Histogram => "Histogram",
            Operation::Dilation => "Dilation",
            Operation::EdgeDetection => "Edge Detection",
            Operation::RotateFlip => "Rotation/Flip",
            Operation::Negative => "Negative",
        }
    }

    /// Whether the operation yields a histogram rather than an image.
    pub fn produces_histogram(self) -> bool {
        self == Operation::Histogram
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_label(s);
        let op = match key.as_str() {
            "grayscale" | "grey" | "gray" => Operation::Grayscale,
            "threshold" | "threshold(binary)" | "binary" => Operation::Threshold,
            "brightnesscontrast" | "brightness/contrast" => Operation::BrightnessContrast,
            "logical" | "logicaloperation" => Operation::Logical,
            "histogram" => Operation::Histogram,
            "dilation" | "dilate" => Operation::Dilation,
            "edgedetection" | "edges" => Operation::EdgeDetection,
            "rotateflip" | "rotation/flip" => Operation::RotateFlip,
            "negative" | "invert" => Operation::Negative,
            _ => {
                return Err(EngineError::invalid_parameter(
                    "operation",
                    format!("unknown operation '{}'", s),
                ))
            }
        };
        Ok(op)
    }
}

/// An operation together with its resolved parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Grayscale,
    Threshold {
        threshold: u8,
    },
    BrightnessContrast {
        brightness: i32,
        contrast: f64,
    },
    Logical {
        op: LogicOp,
    },
    Histogram,
    Dilation {
        kernel_size: u32,
        iterations: u32,
    },
    EdgeDetection(EdgeMethod),
    RotateFlip(Orientation),
    Negative,
}

impl Transform {
    /// Validate `params` against the schema of `operation`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidParameter` for unknown names, values of
    /// the wrong kind, non-finite numbers and unknown enumerated labels.
    /// Numeric values outside their domain are clamped instead.
    pub fn resolve(operation: Operation, params: &ParameterSet) -> Result<Self, EngineError> {
        params.check_names(schema(operation))?;

        let transform = match operation {
            Operation::Grayscale => Transform::Grayscale,
            Operation::Threshold => Transform::Threshold {
                threshold: params.int(&THRESHOLD)? as u8,
            },
            Operation::BrightnessContrast => Transform::BrightnessContrast {
                brightness: params.int(&BRIGHTNESS)? as i32,
                contrast: params.float(&CONTRAST)?,
            },
            Operation::Logical => Transform::Logical {
                op: params.choice(&LOGIC_OPERATION)?,
            },
            Operation::Histogram => Transform::Histogram,
            Operation::Dilation => Transform::Dilation {
                kernel_size: params.int(&KERNEL_SIZE)? as u32,
                iterations: params.int(&ITERATIONS)? as u32,
            },
            Operation::EdgeDetection => {
                let method = match params.choice::<EdgeKind>(&EDGE_METHOD)? {
                    EdgeKind::Canny => {
                        let t1 = params.int(&CANNY_THRESHOLD1)? as u16;
                        let t2 = params.int(&CANNY_THRESHOLD2)? as u16;
                        EdgeMethod::canny(t1, t2)
                    }
                    EdgeKind::Sobel => EdgeMethod::Sobel,
                };
                Transform::EdgeDetection(method)
            }
            Operation::RotateFlip => Transform::RotateFlip(params.choice(&TRANSFORM)?),
            Operation::Negative => Transform::Negative,
        };
        Ok(transform)
    }

    /// Copy of this transform with every numeric field pulled into the
    /// domain its parameter declares, and Canny thresholds ordered.
    ///
    /// A transform built by [`Transform::resolve`] is already in range; this
    /// covers values constructed directly.
    pub(crate) fn clamped(self) -> Self {
        match self {
            Transform::BrightnessContrast {
                brightness,
                contrast,
            } => Transform::BrightnessContrast {
                brightness: BRIGHTNESS.clamp_int(brightness as i64) as i32,
                contrast: CONTRAST.clamp_float(contrast),
            },
            Transform::Dilation {
                kernel_size,
                iterations,
            } => Transform::Dilation {
                kernel_size: KERNEL_SIZE.clamp_int(kernel_size as i64) as u32,
                iterations: ITERATIONS.clamp_int(iterations as i64) as u32,
            },
            Transform::EdgeDetection(EdgeMethod::Canny(t)) => {
                Transform::EdgeDetection(EdgeMethod::canny(
                    CANNY_THRESHOLD1.clamp_int(t.low() as i64) as u16,
                    CANNY_THRESHOLD2.clamp_int(t.high() as i64) as u16,
                ))
            }
            other => other,
        }
    }

    /// The identifier this transform was resolved from.
    pub fn operation(&self) -> Operation {
        match self {
            Transform::Grayscale => Operation::Grayscale,
            Transform::Threshold { .. } => Operation::Threshold,
            Transform::BrightnessContrast { .. } => Operation::BrightnessContrast,
            Transform::Logical { .. } => Operation::Logical,
            Transform::Histogram => Operation::Histogram,
            Transform::Dilation { .. } => Operation::Dilation,
            Transform::EdgeDetection(_) => Operation::EdgeDetection,
            Transform::RotateFlip(_) => Operation::RotateFlip,
            Transform::Negative => Operation::Negative,
        }
    }
}

/// Label-only view of the `method` choice; thresholds are resolved separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeKind {
    Canny,
    Sobel,
}

impl FromStr for EdgeKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "canny" => Ok(EdgeKind::Canny),
            "sobel" => Ok(EdgeKind::Sobel),
            _ => Err(()),
        }
    }
}
