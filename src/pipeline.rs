// THEORY:
// The `pipeline` module is the top-level API for the analysis engine. It
// composes the three stages — classification, spatial grouping, geometry
// measurement — into a single deterministic run over one image, and aggregates
// the per-region measurements into the flattened per-category report the
// presentation layer consumes.
//
// Determinism is the contract: identical buffer and config always produce a
// bit-identical report, because every stage is a pure function and the labeler
// enumerates regions in a fixed row-major order. A run either fully succeeds
// or fails atomically — no partial report ever escapes.

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core_modules::classifier::{self, ClassifiedGrid};
use crate::core_modules::geometry::{MeasuredRegion, measure_region};
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::region_labeler::region_labeler;
use crate::error::AnalysisResult;

// Re-export key data structures for the public API.
pub use crate::core_modules::classifier::{Category, ClassificationConfig, HueRange};
pub use crate::core_modules::geometry::RegionGeometry;
pub use crate::core_modules::region::{Point, Region};
pub use crate::error::AnalysisError;

/// The primary output of the engine for a single image: per-category totals,
/// flattened into the two-category view the presentation layer renders.
/// Additional categories would aggregate the same way; this struct is the
/// current external contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Total pixel area across all red regions.
    pub red_area: u64,
    /// Total boundary edge count across all red regions.
    pub red_perimeter: u64,
    /// Number of discrete red regions.
    pub red_region_count: u64,
    /// Total pixel area across all blue regions.
    pub blue_area: u64,
    /// Total boundary edge count across all blue regions.
    pub blue_perimeter: u64,
    /// Number of discrete blue regions.
    pub blue_region_count: u64,
}

/// A report plus the per-region measurements behind it, for callers that need
/// more than the aggregated totals.
#[derive(Debug, Clone)]
pub struct AnalysisDetail {
    pub report: AnalysisReport,
    /// Every labeled region with its geometry, in deterministic labeling order.
    pub regions: Vec<MeasuredRegion>,
}

/// The main, top-level struct for the analysis engine.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    config: ClassificationConfig,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        // The documented default config is always valid.
        Self {
            config: ClassificationConfig::default(),
        }
    }
}

impl AnalysisPipeline {
    /// Builds a pipeline, validating the config before any pixel work.
    pub fn new(config: ClassificationConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    /// Analyzes one image and returns the aggregated per-category report.
    ///
    /// Input validation happens when the `PixelBuffer` is constructed — a
    /// buffer that exists is already structurally valid, so the only failure
    /// paths here are the ones the caller opts into (cancellation).
    pub fn analyze(&self, buffer: &PixelBuffer) -> AnalysisResult<AnalysisReport> {
        Ok(self.analyze_detailed(buffer)?.report)
    }

    /// Analyzes one image and returns the report together with every measured
    /// region.
    pub fn analyze_detailed(&self, buffer: &PixelBuffer) -> AnalysisResult<AnalysisDetail> {
        // Stage 1: Classification.
        let grid = classifier::classify(buffer, &self.config);
        Ok(self.measure_and_aggregate(grid))
    }

    /// Cancellation-aware variant of [`analyze`](Self::analyze). The flag is
    /// polled at classification-row and stage granularity, never mid-pixel.
    /// Cancellation discards the run whole.
    pub fn analyze_with_cancel(
        &self,
        buffer: &PixelBuffer,
        cancel: &AtomicBool,
    ) -> AnalysisResult<AnalysisReport> {
        // Stage 1: Classification, polled per row.
        let grid = classifier::classify_with_cancel(buffer, &self.config, cancel)?;

        // One more poll before the label pass; labeling and measurement then
        // run to completion.
        if cancel.load(Ordering::Relaxed) {
            return Err(AnalysisError::Cancelled);
        }
        Ok(self.measure_and_aggregate(grid).report)
    }

    fn measure_and_aggregate(&self, grid: ClassifiedGrid) -> AnalysisDetail {
        // Stage 2: Spatial grouping.
        let regions = region_labeler::label_regions(&grid);
        debug!(
            "labeled {} regions in {}x{} grid",
            regions.len(),
            grid.width(),
            grid.height()
        );

        // Stage 3: Geometry measurement and per-category aggregation. Regions
        // of different categories never combine.
        let mut report = AnalysisReport::default();
        let mut measured = Vec::with_capacity(regions.len());
        for region in regions {
            let geometry = measure_region(&region);
            match region.category {
                Category::Red => {
                    report.red_area += geometry.area;
                    report.red_perimeter += geometry.perimeter;
                    report.red_region_count += 1;
                }
                Category::Blue => {
                    report.blue_area += geometry.area;
                    report.blue_perimeter += geometry.perimeter;
                    report.blue_region_count += 1;
                }
                // The labeler never seeds a region from a None cell.
                Category::None => {}
            }
            measured.push(MeasuredRegion { region, geometry });
        }

        debug!(
            "report: red {}px/{} edges across {} regions, blue {}px/{} edges across {} regions",
            report.red_area,
            report.red_perimeter,
            report.red_region_count,
            report.blue_area,
            report.blue_perimeter,
            report.blue_region_count
        );

        AnalysisDetail {
            report,
            regions: measured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    fn buffer_from_cells(width: u32, height: u32, cells: &[[u8; 4]]) -> PixelBuffer {
        let bytes: Vec<u8> = cells.iter().flatten().copied().collect();
        PixelBuffer::from_raw(width, height, &bytes).expect("valid test buffer")
    }

    #[test]
    fn all_black_image_reports_zero_everywhere() {
        let buffer = buffer_from_cells(3, 3, &[BLACK; 9]);
        let report = AnalysisPipeline::default()
            .analyze(&buffer)
            .expect("analysis succeeds");
        assert_eq!(report, AnalysisReport::default());
    }

    #[test]
    fn isolated_red_pixel_reports_area_one_perimeter_four() {
        let buffer = buffer_from_cells(
            3,
            3,
            &[
                BLACK, BLACK, BLACK, //
                BLACK, RED, BLACK, //
                BLACK, BLACK, BLACK,
            ],
        );
        let report = AnalysisPipeline::default()
            .analyze(&buffer)
            .expect("analysis succeeds");
        assert_eq!(report.red_area, 1);
        assert_eq!(report.red_perimeter, 4);
        assert_eq!(report.red_region_count, 1);
        assert_eq!(report.blue_area, 0);
    }

    #[test]
    fn category_totals_are_sums_of_member_regions() {
        let buffer = buffer_from_cells(
            4,
            3,
            &[
                RED, BLACK, BLUE, BLUE, //
                RED, BLACK, BLACK, BLUE, //
                BLACK, RED, BLACK, BLACK,
            ],
        );
        let detail = AnalysisPipeline::default()
            .analyze_detailed(&buffer)
            .expect("analysis succeeds");

        let (mut red_area, mut red_perimeter) = (0u64, 0u64);
        let (mut blue_area, mut blue_perimeter) = (0u64, 0u64);
        for measured in &detail.regions {
            match measured.region.category {
                Category::Red => {
                    red_area += measured.geometry.area;
                    red_perimeter += measured.geometry.perimeter;
                }
                Category::Blue => {
                    blue_area += measured.geometry.area;
                    blue_perimeter += measured.geometry.perimeter;
                }
                Category::None => unreachable!("labeler never emits None regions"),
            }
        }

        assert_eq!(detail.report.red_area, red_area);
        assert_eq!(detail.report.red_perimeter, red_perimeter);
        assert_eq!(detail.report.blue_area, blue_area);
        assert_eq!(detail.report.blue_perimeter, blue_perimeter);
        assert_eq!(detail.report.red_region_count, 2);
        assert_eq!(detail.report.blue_region_count, 1);
    }

    #[test]
    fn repeated_analysis_is_bit_identical() {
        let buffer = buffer_from_cells(
            4,
            2,
            &[
                RED, RED, BLACK, BLUE, //
                BLACK, RED, BLUE, BLUE,
            ],
        );
        let pipeline = AnalysisPipeline::default();
        let first = pipeline.analyze(&buffer).expect("analysis succeeds");
        let second = pipeline.analyze(&buffer).expect("analysis succeeds");
        assert_eq!(first, second);
    }

    #[test]
    fn invalid_config_is_rejected_before_any_pixel_work() {
        let config = ClassificationConfig {
            red_hue: HueRange::new(10.0, 380.0),
            ..ClassificationConfig::default()
        };
        assert!(matches!(
            AnalysisPipeline::new(config),
            Err(AnalysisError::UnsupportedConfig(_))
        ));
    }

    #[test]
    fn pre_set_cancellation_flag_yields_cancelled() {
        let buffer = buffer_from_cells(2, 2, &[RED, RED, RED, RED]);
        let cancel = AtomicBool::new(true);
        let result = AnalysisPipeline::default().analyze_with_cancel(&buffer, &cancel);
        assert_eq!(result.unwrap_err(), AnalysisError::Cancelled);
    }

    #[test]
    fn unset_cancellation_flag_changes_nothing() {
        let buffer = buffer_from_cells(2, 2, &[RED, BLUE, BLACK, RED]);
        let pipeline = AnalysisPipeline::default();
        let cancel = AtomicBool::new(false);
        let with_flag = pipeline
            .analyze_with_cancel(&buffer, &cancel)
            .expect("analysis succeeds");
        let without_flag = pipeline.analyze(&buffer).expect("analysis succeeds");
        assert_eq!(with_flag, without_flag);
    }
}
