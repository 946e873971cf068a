//! Super-resolution model loading and invocation

mod runner;
mod onnx;
#[cfg(test)]
mod tests;

pub use self::runner::{InferenceRunner, ShapePolicy, SuperResolutionModel};
pub use self::onnx::OnnxModel;
