//! Orchestration on top of the per-resource assignment engines.

pub mod offboarding;
