//! # adhere-predict
//!
//! The serving side of the predictor: a non-blocking prediction service, a
//! debounced per-key retrain trigger, and the `AdherenceEngine` facade the
//! host application talks to.
//!
//! The core ordering guarantee lives here: reads never block on writes.
//! `predict` is a store read plus pure math; fitting always happens on the
//! blocking pool, and a prediction against a stale model is served
//! immediately while the retrain proceeds in the background.

pub mod trigger;

mod engine;
mod service;

pub use engine::AdherenceEngine;
pub use service::PredictionService;
pub use trigger::{Phase, RetrainTrigger};
