//! ONNX-backed generator model
//!
//! Loads an ONNX export of the super-resolution generator with tract. The
//! graph is specialized for two `[1, size, size, 3]` float inputs at load
//! time, so each call only runs the optimized plan.

use std::path::Path;

use log::info;
use ndarray::Array4;
use tract_onnx::prelude::*;

use super::runner::SuperResolutionModel;
use crate::errors::{SrError, SrResult};

type Plan = Box<dyn Fn(TVec<TValue>) -> TractResult<TVec<TValue>>>;

/// Generator network loaded from an `.onnx` file
pub struct OnnxModel {
    plan: Plan,
    name: String,
}

impl OnnxModel {
    /// Load and optimize the model for `size x size` RGB inputs
    pub fn load<P: AsRef<Path>>(path: P, size: usize) -> SrResult<Self> {
        let path = path.as_ref();
        let load_error = |reason: String| SrError::ModelLoad { path: path.display().to_string(), reason };

        if !path.exists() {
            return Err(load_error("Model file not found".to_string()));
        }

        let input_fact = || InferenceFact::dt_shape(f32::datum_type(), tvec!(1, size, size, 3));
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| m.with_input_fact(0, input_fact()))
            .and_then(|m| m.with_input_fact(1, input_fact()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| load_error(e.to_string()))?;

        info!("Model loaded successfully from {}", path.display());

        Ok(OnnxModel {
            plan: Box::new(move |inputs| plan.run(inputs)),
            name: path.display().to_string(),
        })
    }
}

impl SuperResolutionModel for OnnxModel {
    fn predict(&self, inputs: &[Array4<f32>]) -> SrResult<Array4<f32>> {
        let inference_error = |e: TractError| SrError::Inference(e.to_string());

        let mut tensors: TVec<TValue> = tvec!();
        for input in inputs {
            let data: Vec<f32> = input.iter().copied().collect();
            let tensor = Tensor::from_shape::<f32>(input.shape(), &data).map_err(inference_error)?;
            tensors.push(tensor.into());
        }

        let outputs = (self.plan)(tensors).map_err(inference_error)?;
        let first = outputs.first()
            .ok_or_else(|| SrError::Inference("model produced no outputs".to_string()))?;
        let view = first.to_array_view::<f32>().map_err(inference_error)?;

        let shape = view.shape().to_vec();
        if shape.len() != 4 {
            return Err(SrError::Inference(format!("expected a 4-D output, got shape {:?}", shape)));
        }

        let data: Vec<f32> = view.iter().copied().collect();
        Array4::from_shape_vec((shape[0], shape[1], shape[2], shape[3]), data)
            .map_err(|e| SrError::Inference(e.to_string()))
    }

    fn describe(&self) -> String {
        format!("ONNX model {}", self.name)
    }
}
