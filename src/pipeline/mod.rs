// src/pipeline/mod.rs

//! The two-stage map conversion pipeline.
//!
//! Each run resets, stages, runs and harvests SLFiledataADTConverter and then
//! the MTXP adder, in that order. The stages never overlap.

pub mod runner;
pub mod stage;

pub use runner::{Pipeline, RunSummary, StageReport};
pub use stage::{
    ConverterStage, HarvestRule, InputRule, Stage, FRENCH_CONVERTER_NAME, MTXP_CONVERTER_NAME,
};
