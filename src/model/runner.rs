//! Two-frame model invocation
//!
//! The model takes a list of two batched NHWC tensors and returns one
//! batched tensor. The runner owns the batching and the handling of inputs
//! that do not have the shape the model was exported with.

use log::{debug, info, warn};
use ndarray::{s, Array3, Array4, Axis};
use serde::{Deserialize, Serialize};

use crate::errors::{SrError, SrResult};
use crate::raster::FloatArray;

/// A pre-trained multi-frame super-resolution model
pub trait SuperResolutionModel {
    /// Run the model on a list of `(batch, height, width, channels)` inputs
    fn predict(&self, inputs: &[Array4<f32>]) -> SrResult<Array4<f32>>;

    /// Human-readable model description
    fn describe(&self) -> String {
        "super-resolution model".to_string()
    }
}

/// Handling of inputs whose shape differs from the expected one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapePolicy {
    /// Refuse to run
    Strict,
    /// Crop or zero-pad to the expected shape and carry on
    Coerce,
}

/// Invokes a model on an image pair
#[derive(Debug, Clone, Copy)]
pub struct InferenceRunner {
    expected: (usize, usize, usize),
    policy: ShapePolicy,
}

impl InferenceRunner {
    /// Runner for square `size x size x 3` inputs
    pub fn new(size: usize, policy: ShapePolicy) -> Self {
        InferenceRunner { expected: (size, size, 3), policy }
    }

    /// Run `model` on two normalized images and return the single output
    ///
    /// Inputs must already be scaled to [0, 1].
    pub fn run(&self, model: &dyn SuperResolutionModel, first: &FloatArray, second: &FloatArray) -> SrResult<FloatArray> {
        let first = self.conform(first)?;
        let second = self.conform(second)?;

        let batch = [first.insert_axis(Axis(0)), second.insert_axis(Axis(0))];
        debug!("Invoking {} with inputs {:?} and {:?}", model.describe(), batch[0].dim(), batch[1].dim());

        let output = model.predict(&batch)?;
        if output.len_of(Axis(0)) == 0 {
            return Err(SrError::Inference("model returned an empty batch".to_string()));
        }

        let result = output.index_axis(Axis(0), 0).to_owned();
        info!("Model produced output of shape {:?}", result.dim());
        Ok(result)
    }

    fn conform(&self, input: &FloatArray) -> SrResult<FloatArray> {
        let actual = input.dim();
        if actual == self.expected {
            return Ok(input.clone());
        }

        match self.policy {
            ShapePolicy::Strict => Err(SrError::ShapeMismatch { actual, expected: self.expected }),
            ShapePolicy::Coerce => {
                warn!("Input images have unexpected shape: {:?}, coercing to {:?}", actual, self.expected);
                Ok(crop_or_pad(input, self.expected))
            }
        }
    }
}

/// Copy the overlapping top-left window of `input` into a zeroed array
fn crop_or_pad(input: &FloatArray, shape: (usize, usize, usize)) -> FloatArray {
    let (h, w, c) = input.dim();
    let (eh, ew, ec) = shape;
    let (ch, cw, cc) = (h.min(eh), w.min(ew), c.min(ec));

    let mut out = Array3::<f32>::zeros(shape);
    out.slice_mut(s![..ch, ..cw, ..cc]).assign(&input.slice(s![..ch, ..cw, ..cc]));
    out
}
