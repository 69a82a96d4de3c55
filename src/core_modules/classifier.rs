// THEORY:
// The `classifier` is the first analysis stage. It maps every pixel of a
// `PixelBuffer` to exactly one `Category` (Red, Blue, or None) using a pure
// hue/saturation/value rule, producing an immutable `ClassifiedGrid` for the
// region labeler.
//
// Key architectural principles:
// 1.  **Hue-based, not RGB-threshold**: a naive "red channel high" rule
//     misclassifies shadows and highlights. Classifying on the hue angle with
//     saturation and value floors is robust to lighting variation and matches
//     the intuitive meaning of "a red region."
// 2.  **Mutual exclusivity by construction**: the rule assigns one category per
//     pixel — red is tested first, blue second — so spatially identical regions
//     of different categories cannot exist. The default hue ranges are disjoint;
//     if a caller configures overlapping ranges, red still wins deterministically.
// 3.  **No spatial dependency**: each cell's category is a function of its own
//     pixel and the config. Neighboring pixels never influence the decision;
//     all spatial reasoning happens later, in the region labeler.
// 4.  **Undefined hue is None**: at zero chroma the hue angle does not exist,
//     so gray pixels can never be Red or Blue regardless of the thresholds.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::core_modules::pixel::pixel::{CHROMA_EPSILON, Hue, Pixel};
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::error::{AnalysisError, AnalysisResult};

const DEFAULT_RED_HUE_MIN: f32 = 345.0;
const DEFAULT_RED_HUE_MAX: f32 = 15.0;
const DEFAULT_BLUE_HUE_MIN: f32 = 200.0;
const DEFAULT_BLUE_HUE_MAX: f32 = 250.0;
const DEFAULT_MIN_SATURATION: f32 = 0.35;
const DEFAULT_MIN_VALUE: f32 = 0.2;

/// The classification assigned to a single grid cell. Exactly one per pixel,
/// determined purely from its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Red,
    Blue,
    None,
}

/// An inclusive hue interval in degrees on the [0, 360) color wheel.
///
/// When `min_degrees > max_degrees` the range wraps through 0° — the default
/// red range 345°–15° is exactly such a range. A range with `min == max` is an
/// empty span and is rejected at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HueRange {
    /// Lower bound in degrees, inclusive.
    pub min_degrees: f32,
    /// Upper bound in degrees, inclusive.
    pub max_degrees: f32,
}

impl HueRange {
    pub fn new(min_degrees: f32, max_degrees: f32) -> Self {
        Self {
            min_degrees,
            max_degrees,
        }
    }

    /// Whether a hue angle falls inside this range, honoring wrap-around.
    pub fn contains(&self, hue: Hue) -> bool {
        if self.min_degrees <= self.max_degrees {
            hue >= self.min_degrees && hue <= self.max_degrees
        } else {
            hue >= self.min_degrees || hue <= self.max_degrees
        }
    }

    fn validate(&self, label: &str) -> AnalysisResult<()> {
        for bound in [self.min_degrees, self.max_degrees] {
            if !(0.0..360.0).contains(&bound) || !bound.is_finite() {
                return Err(AnalysisError::UnsupportedConfig(format!(
                    "{label} hue bound {bound} is outside [0, 360)"
                )));
            }
        }
        if self.min_degrees == self.max_degrees {
            return Err(AnalysisError::UnsupportedConfig(format!(
                "{label} hue range is an empty span at {} degrees",
                self.min_degrees
            )));
        }
        Ok(())
    }
}

/// Tunable parameters for the classification stage.
///
/// Loadable from JSON (see [`ClassificationConfig::from_json_file`]) so the
/// same thresholds can be reproduced across runs and environments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Hue interval labeled Red. Wraps through 0° by default (345°–15°).
    pub red_hue: HueRange,
    /// Hue interval labeled Blue (200°–250° by default).
    pub blue_hue: HueRange,
    /// Minimum HSV saturation, 0.0–1.0. Pixels below it are washed out and
    /// classified None.
    pub min_saturation: f32,
    /// Minimum HSV value, 0.0–1.0. Pixels below it are too dark to trust and
    /// classified None.
    pub min_value: f32,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            red_hue: HueRange::new(DEFAULT_RED_HUE_MIN, DEFAULT_RED_HUE_MAX),
            blue_hue: HueRange::new(DEFAULT_BLUE_HUE_MIN, DEFAULT_BLUE_HUE_MAX),
            min_saturation: DEFAULT_MIN_SATURATION,
            min_value: DEFAULT_MIN_VALUE,
        }
    }
}

impl ClassificationConfig {
    /// Checks every parameter before any pixel work happens. A config that
    /// fails here is rejected whole; there is no partial acceptance.
    pub fn validate(&self) -> AnalysisResult<()> {
        self.red_hue.validate("red")?;
        self.blue_hue.validate("blue")?;
        for (label, threshold) in [
            ("min_saturation", self.min_saturation),
            ("min_value", self.min_value),
        ] {
            if !(0.0..=1.0).contains(&threshold) || !threshold.is_finite() {
                return Err(AnalysisError::UnsupportedConfig(format!(
                    "{label} {threshold} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Loads and validates a config from a JSON file.
    pub fn from_json_file(path: &Path) -> AnalysisResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::UnsupportedConfig(format!(
                "failed to read config {}: {e}",
                path.display()
            ))
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            AnalysisError::UnsupportedConfig(format!(
                "failed to parse config {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// The category for a single pixel under this config.
    pub fn classify_pixel(&self, pixel: &Pixel) -> Category {
        // Hue is undefined for achromatic pixels; they can never carry a category.
        if pixel.chroma() <= CHROMA_EPSILON {
            return Category::None;
        }
        if pixel.saturation_hsv() < self.min_saturation || pixel.value_hsv() < self.min_value {
            return Category::None;
        }

        let hue = pixel.hue();
        if self.red_hue.contains(hue) {
            Category::Red
        } else if self.blue_hue.contains(hue) {
            Category::Blue
        } else {
            Category::None
        }
    }
}

/// The classified counterpart of a `PixelBuffer`: one `Category` per cell,
/// same dimensions, row-major, never mutated after creation.
#[derive(Debug, Clone)]
pub struct ClassifiedGrid {
    width: u32,
    height: u32,
    cells: Vec<Category>,
}

impl ClassifiedGrid {
    /// Assembles a grid from pre-classified cells. Used by in-crate tests to
    /// exercise the spatial stages without going through a pixel buffer.
    #[cfg(test)]
    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<Category>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn category_at(&self, x: u32, y: u32) -> Category {
        self.cells[(y * self.width + x) as usize]
    }
}

/// Classifies every pixel of the buffer. Pure: identical buffer and config
/// always produce an identical grid.
pub fn classify(buffer: &PixelBuffer, config: &ClassificationConfig) -> ClassifiedGrid {
    let mut cells = Vec::with_capacity(buffer.width() as usize * buffer.height() as usize);
    for pixel in buffer.pixels() {
        cells.push(config.classify_pixel(pixel));
    }
    ClassifiedGrid {
        width: buffer.width(),
        height: buffer.height(),
        cells,
    }
}

/// Row-cancellable variant of [`classify`]. The flag is polled once per image
/// row, never mid-pixel; on cancellation the partial grid is dropped whole.
pub fn classify_with_cancel(
    buffer: &PixelBuffer,
    config: &ClassificationConfig,
    cancel: &AtomicBool,
) -> AnalysisResult<ClassifiedGrid> {
    let mut cells = Vec::with_capacity(buffer.width() as usize * buffer.height() as usize);
    for y in 0..buffer.height() {
        if cancel.load(Ordering::Relaxed) {
            return Err(AnalysisError::Cancelled);
        }
        for x in 0..buffer.width() {
            cells.push(config.classify_pixel(buffer.pixel_at(x, y)));
        }
    }
    Ok(ClassifiedGrid {
        width: buffer.width(),
        height: buffer.height(),
        cells,
    })
}
