//! Tests for the inference runner

use std::cell::RefCell;

use ndarray::{Array3, Array4, Axis};

use crate::errors::{SrError, SrResult};
use crate::model::{InferenceRunner, OnnxModel, ShapePolicy, SuperResolutionModel};

/// Upsamples the first input by pixel repetition and records input shapes
struct RepeatModel {
    factor: usize,
    seen: RefCell<Vec<Vec<usize>>>,
}

impl SuperResolutionModel for RepeatModel {
    fn predict(&self, inputs: &[Array4<f32>]) -> SrResult<Array4<f32>> {
        self.seen.borrow_mut().extend(inputs.iter().map(|i| i.shape().to_vec()));
        let (b, h, w, c) = inputs[0].dim();
        let f = self.factor;
        Ok(Array4::from_shape_fn((b, h * f, w * f, c), |(n, y, x, ch)| inputs[0][[n, y / f, x / f, ch]]))
    }
}

struct FailingModel;

impl SuperResolutionModel for FailingModel {
    fn predict(&self, _inputs: &[Array4<f32>]) -> SrResult<Array4<f32>> {
        Err(SrError::Inference("graph execution failed".to_string()))
    }
}

struct EmptyBatchModel;

impl SuperResolutionModel for EmptyBatchModel {
    fn predict(&self, _inputs: &[Array4<f32>]) -> SrResult<Array4<f32>> {
        Ok(Array4::zeros((0, 4, 4, 3)))
    }
}

fn repeat_model() -> RepeatModel {
    RepeatModel { factor: 2, seen: RefCell::new(Vec::new()) }
}

#[test]
fn test_runner_batches_both_inputs() {
    let model = repeat_model();
    let runner = InferenceRunner::new(64, ShapePolicy::Strict);
    let zeros = Array3::<f32>::zeros((64, 64, 3));

    let output = runner.run(&model, &zeros, &zeros).unwrap();

    assert_eq!(output.dim(), (128, 128, 3));
    assert!(output.iter().all(|&v| v == 0.0));
    assert_eq!(*model.seen.borrow(), vec![vec![1, 64, 64, 3], vec![1, 64, 64, 3]]);
}

#[test]
fn test_runner_returns_first_batch_entry() {
    let model = repeat_model();
    let runner = InferenceRunner::new(4, ShapePolicy::Strict);
    let first = Array3::from_shape_fn((4, 4, 3), |(y, x, c)| (y * 16 + x * 4 + c) as f32 / 64.0);
    let second = Array3::<f32>::ones((4, 4, 3));

    let output = runner.run(&model, &first, &second).unwrap();

    assert_eq!(output[[0, 0, 0]], first[[0, 0, 0]]);
    assert_eq!(output[[7, 7, 2]], first[[3, 3, 2]]);
}

#[test]
fn test_strict_policy_rejects_mismatched_shape() {
    let model = repeat_model();
    let runner = InferenceRunner::new(64, ShapePolicy::Strict);
    let good = Array3::<f32>::zeros((64, 64, 3));
    let bad = Array3::<f32>::zeros((60, 64, 3));

    match runner.run(&model, &good, &bad) {
        Err(SrError::ShapeMismatch { actual, expected }) => {
            assert_eq!(actual, (60, 64, 3));
            assert_eq!(expected, (64, 64, 3));
        }
        other => panic!("expected ShapeMismatch, got {:?}", other.map(|a| a.dim())),
    }
    assert!(model.seen.borrow().is_empty());
}

#[test]
fn test_coerce_policy_crops_and_pads() {
    let model = repeat_model();
    let runner = InferenceRunner::new(4, ShapePolicy::Coerce);
    // Too tall, too narrow, extra channel
    let odd = Array3::from_elem((6, 2, 4), 0.5f32);
    let good = Array3::<f32>::zeros((4, 4, 3));

    let output = runner.run(&model, &odd, &good).unwrap();

    assert_eq!(*model.seen.borrow(), vec![vec![1, 4, 4, 3], vec![1, 4, 4, 3]]);
    // Columns 0..2 came from the input, 2..4 are padding
    let frame = output.index_axis(Axis(2), 0);
    assert_eq!(frame[[0, 0]], 0.5);
    assert_eq!(frame[[0, 7]], 0.0);
}

#[test]
fn test_model_failure_propagates() {
    let runner = InferenceRunner::new(64, ShapePolicy::Coerce);
    let zeros = Array3::<f32>::zeros((64, 64, 3));
    let err = runner.run(&FailingModel, &zeros, &zeros).unwrap_err();
    assert!(matches!(err, SrError::Inference(_)));
}

#[test]
fn test_empty_batch_is_an_error() {
    let runner = InferenceRunner::new(4, ShapePolicy::Coerce);
    let zeros = Array3::<f32>::zeros((4, 4, 3));
    assert!(runner.run(&EmptyBatchModel, &zeros, &zeros).is_err());
}

#[test]
fn test_missing_model_file_is_fatal() {
    let err = OnnxModel::load("does/not/exist.onnx", 64).err().unwrap();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("Model file not found"));
}

#[test]
fn test_unreadable_model_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.onnx");
    std::fs::write(&path, b"not a protobuf").unwrap();

    let err = OnnxModel::load(&path, 64).err().unwrap();
    assert!(matches!(err, SrError::ModelLoad { .. }));
}
