// THEORY:
// The `Pixel` module is the most fundamental unit of the analysis engine. It is a
// "dumb" data container for a single RGBA pixel plus the small set of single-pixel
// heuristics the hue classifier consumes: chroma, hue, HSV saturation and HSV value.
// Anything that needs a second pixel or a neighborhood belongs in higher layers
// (`classifier`, `region_labeler`) — a `Pixel` never reads neighbors.
//
// Key architectural principles:
// 1.  **Single-pixel scope**: Every heuristic here is a pure function of this
//     pixel's own channels. The classifier builds its per-cell decision from
//     these values alone, which is what makes classification embarrassingly
//     parallel and the whole run deterministic.
// 2.  **Cached normalized channels**: The constructor pre-computes the 0..1
//     channel forms once, so the hue/saturation/value triple for a pixel costs
//     a handful of comparisons and one division — no repeated `/ 255.0` in the
//     hot per-pixel loop.
// 3.  **Hue is undefined at zero chroma**: Gray pixels have no meaningful hue
//     angle. `hue()` returns 0.0 in that case by convention, and callers that
//     care (the classifier) must gate on `chroma()` first.

pub mod pixel {
    pub type Byte = u8;
    pub type Channel = Byte;
    pub type NormalizedChannel = f32;
    pub type Hue = f32;
    pub type SaturationHSV = f32;
    pub type ValueHSV = f32;
    pub type Chroma = f32;

    /// Below this chroma a pixel is treated as achromatic and its hue as undefined.
    pub const CHROMA_EPSILON: Chroma = 1e-6;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255). Carried through,
        /// never used by the color heuristics.
        pub alpha: Channel,
        /// The red channel scaled to 0.0-1.0, cached at construction.
        pub red_normalized: NormalizedChannel,
        /// The green channel scaled to 0.0-1.0, cached at construction.
        pub green_normalized: NormalizedChannel,
        /// The blue channel scaled to 0.0-1.0, cached at construction.
        pub blue_normalized: NormalizedChannel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
                red_normalized: red as NormalizedChannel / 255.0f32,
                green_normalized: green as NormalizedChannel / 255.0f32,
                blue_normalized: blue as NormalizedChannel / 255.0f32,
            }
        }

        #[inline]
        fn max_channel(&self) -> NormalizedChannel {
            self.red_normalized
                .max(self.green_normalized.max(self.blue_normalized))
        }

        #[inline]
        fn min_channel(&self) -> NormalizedChannel {
            self.red_normalized
                .min(self.green_normalized.min(self.blue_normalized))
        }

        /// Chroma (C): color purity = max(R,G,B) - min(R,G,B).
        /// - Zero for perfect grays; higher values are more vivid.
        pub fn chroma(&self) -> Chroma {
            self.max_channel() - self.min_channel()
        }

        /// Hue angle in degrees [0, 360).
        ///
        /// - Sector-based hexcone formula over the normalized sRGB channels.
        /// - Returns 0.0 for achromatic pixels (chroma below `CHROMA_EPSILON`);
        ///   gate on `chroma()` where that distinction matters.
        pub fn hue(&self) -> Hue {
            let maximum_channel = self.max_channel();
            let chroma = maximum_channel - self.min_channel();

            if chroma <= CHROMA_EPSILON {
                return 0.0;
            }

            let inverse_chroma = 1.0 / chroma;

            let (base_difference, sector_offset) = if maximum_channel == self.red_normalized {
                (self.green_normalized - self.blue_normalized, 0.0)
            } else if maximum_channel == self.green_normalized {
                (self.blue_normalized - self.red_normalized, 2.0)
            } else {
                (self.red_normalized - self.green_normalized, 4.0)
            };

            let mut hue_degrees = (base_difference * inverse_chroma + sector_offset) * 60.0;
            if hue_degrees < 0.0 {
                hue_degrees += 360.0;
            }
            hue_degrees
        }

        /// HSV Value (V): brightness defined as max(R, G, B), in 0.0-1.0.
        pub fn value_hsv(&self) -> ValueHSV {
            self.max_channel()
        }

        /// Saturation (HSV): S = chroma / value, in 0.0-1.0.
        /// - Drops to zero near black even when the channel ratios carry a hue.
        pub fn saturation_hsv(&self) -> SaturationHSV {
            let maximum_channel = self.max_channel();
            if maximum_channel <= CHROMA_EPSILON {
                return 0.0;
            }
            self.chroma() / maximum_channel
        }
    }
}

// -----------------------------------------------------------------------------
// Glossary: Single-Pixel Color Terms
//
// - Hue: Angle on the color wheel (0°-360°) naming the "color family"
//   (red ≈ 0°/360°, green ≈ 120°, blue ≈ 240°). Computed from relative
//   differences between channels; undefined when all channels are equal.
//
// - Chroma: Color purity = max(R,G,B) − min(R,G,B). Zero means perfectly gray.
//
// - Value (HSV): Brightness defined as the maximum of the RGB channels. High
//   Value means the pixel is bright regardless of colorfulness.
//
// - Saturation (HSV): Chroma divided by Value. Distance from gray relative to
//   brightness; zero for grays and for pure black.
