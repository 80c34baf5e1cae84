//! Default chart styling: feature layer styles, figure typography, and
//! colormaps.
//!
//! Styling is carried in explicit values handed to the chart layer rather
//! than process-wide defaults, so two charts in one process can be styled
//! independently.

use plotters::style::RGBColor;

/// Default WSRA scatter marker radius in pixels.
pub const DEFAULT_WSRA_MARKER_SIZE: i32 = 5;

/// Ocean background fill.
#[derive(Debug, Clone)]
pub struct OceanStyle {
    pub color: RGBColor,
}

impl Default for OceanStyle {
    fn default() -> Self {
        OceanStyle {
            color: RGBColor(0xff, 0xff, 0xff),
        }
    }
}

/// Land polygon fill.
#[derive(Debug, Clone)]
pub struct LandStyle {
    pub color: RGBColor,
    pub alpha: f64,
}

impl Default for LandStyle {
    fn default() -> Self {
        LandStyle {
            color: RGBColor(0xf5, 0xf5, 0xf5), // whitesmoke
            alpha: 0.4,
        }
    }
}

/// Coastline stroke.
#[derive(Debug, Clone)]
pub struct CoastStyle {
    pub edge_color: RGBColor,
    pub line_width: u32,
}

impl Default for CoastStyle {
    fn default() -> Self {
        CoastStyle {
            edge_color: RGBColor(0x80, 0x80, 0x80), // grey
            line_width: 1,
        }
    }
}

/// Figure-wide typography, passed to chart construction instead of mutating
/// global state.
#[derive(Debug, Clone)]
pub struct FigureStyle {
    pub font_family: String,
    pub font_size: u32,
}

impl Default for FigureStyle {
    fn default() -> Self {
        FigureStyle {
            font_family: "sans-serif".to_string(),
            font_size: 12,
        }
    }
}

/// Discrete colormap for Saffir-Simpson intensity codes.
///
/// Seven YlOrRd bins over the fixed range [-1.5, 5.5], so the integer codes
/// -1..=5 each sit at the center of a bin.
#[derive(Clone, Copy)]
pub struct IntensityColormap {
    gradient: colorous::Gradient,
    bins: usize,
    vmin: f64,
    vmax: f64,
}

impl Default for IntensityColormap {
    fn default() -> Self {
        IntensityColormap {
            gradient: colorous::YELLOW_ORANGE_RED,
            bins: 7,
            vmin: -1.5,
            vmax: 5.5,
        }
    }
}

impl IntensityColormap {
    pub fn color_for(&self, value: f64) -> RGBColor {
        let t = ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0);
        let bin = ((t * self.bins as f64) as usize).min(self.bins - 1);
        let c = self
            .gradient
            .eval_continuous(bin as f64 / (self.bins - 1) as f64);
        RGBColor(c.r, c.g, c.b)
    }
}

/// Continuous colormap for scalar-colored WSRA observations.
#[derive(Clone, Copy)]
pub struct TrackColormap {
    gradient: colorous::Gradient,
    vmin: f64,
    vmax: f64,
}

impl Default for TrackColormap {
    fn default() -> Self {
        TrackColormap {
            gradient: colorous::VIRIDIS,
            vmin: 0.0,
            vmax: 1.0,
        }
    }
}

impl TrackColormap {
    pub fn with_range(vmin: f64, vmax: f64) -> Self {
        TrackColormap {
            vmin,
            vmax,
            ..Default::default()
        }
    }

    /// Fit the colormap range to the given values. An empty or constant input
    /// keeps a non-degenerate range.
    pub fn fitted(values: impl IntoIterator<Item = f64>) -> Self {
        let mut vmin = f64::INFINITY;
        let mut vmax = f64::NEG_INFINITY;
        for v in values {
            vmin = vmin.min(v);
            vmax = vmax.max(v);
        }
        if !vmin.is_finite() || !vmax.is_finite() || vmin == vmax {
            return Self::default();
        }
        Self::with_range(vmin, vmax)
    }

    pub fn color_for(&self, value: f64) -> RGBColor {
        let t = ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0);
        let c = self.gradient.eval_continuous(t);
        RGBColor(c.r, c.g, c.b)
    }
}
