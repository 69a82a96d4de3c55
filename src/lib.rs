// THEORY:
// This file is the main entry point for the `chroma_regions` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (an upload front end, a batch
// runner, tests).
//
// The primary goal is to export the `AnalysisPipeline` and its associated data
// structures (`ClassificationConfig`, `AnalysisReport`, etc.) as the clean,
// high-level interface for the entire engine, with `ParallelPipeline` as the
// concurrency shell for batch workloads. The internal stages (`core_modules`)
// stay encapsulated behind those two surfaces.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;
