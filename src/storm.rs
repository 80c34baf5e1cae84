//! Storm identity, intensity categories, and wind radii.
//!
//! The set of storms with WSRA deployments is closed, so storm identity is an
//! enum rather than a stringly-keyed table. Unknown names fail with a typed
//! error at parse time instead of a lookup panic deep inside a plot call.

use std::str::FromStr;

use plotters::style::RGBColor;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/// A storm with WSRA observation coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Storm {
    Earl,
    Fiona,
    Ian,
    Julia,
    Idalia,
    Lee,
}

impl Storm {
    /// Parse a canonical lowercase storm name, e.g. `"fiona"`.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_str(name.trim().to_lowercase().as_str())
            .map_err(|_| Error::UnknownStorm(name.to_string()))
    }

    /// Default track color for this storm.
    pub fn color(&self) -> RGBColor {
        match self {
            Storm::Earl => RGBColor(0x66, 0x33, 0x99),   // rebeccapurple
            Storm::Fiona => RGBColor(0xda, 0x70, 0xd6),  // orchid
            Storm::Ian => RGBColor(0x46, 0x82, 0xb4),    // steelblue
            Storm::Julia => RGBColor(0x00, 0x80, 0x80),  // teal
            Storm::Idalia => RGBColor(0x8f, 0xbc, 0x8f), // darkseagreen
            Storm::Lee => RGBColor(0x5f, 0x9e, 0xa0),    // cadetblue
        }
    }

    /// Default legend label, including the season year.
    pub fn label(&self) -> &'static str {
        match self {
            Storm::Earl => "Earl (2022)",
            Storm::Fiona => "Fiona (2022)",
            Storm::Ian => "Ian (2022)",
            Storm::Julia => "Julia (2022)",
            Storm::Idalia => "Idalia (2023)",
            Storm::Lee => "Lee (2023)",
        }
    }
}

/// Saffir-Simpson intensity category, extended below hurricane strength with
/// tropical depression (-1) and tropical storm (0) codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum SaffirSimpson {
    TropicalDepression,
    TropicalStorm,
    Category1,
    Category2,
    Category3,
    Category4,
    Category5,
}

impl SaffirSimpson {
    /// Numeric intensity code as used in best-track data.
    pub fn code(&self) -> i8 {
        match self {
            SaffirSimpson::TropicalDepression => -1,
            SaffirSimpson::TropicalStorm => 0,
            SaffirSimpson::Category1 => 1,
            SaffirSimpson::Category2 => 2,
            SaffirSimpson::Category3 => 3,
            SaffirSimpson::Category4 => 4,
            SaffirSimpson::Category5 => 5,
        }
    }

    /// Short label drawn on best-track point markers.
    pub fn label(&self) -> &'static str {
        match self {
            SaffirSimpson::TropicalDepression => "TD",
            SaffirSimpson::TropicalStorm => "TS",
            SaffirSimpson::Category1 => "1",
            SaffirSimpson::Category2 => "2",
            SaffirSimpson::Category3 => "3",
            SaffirSimpson::Category4 => "4",
            SaffirSimpson::Category5 => "5",
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            -1 => Ok(SaffirSimpson::TropicalDepression),
            0 => Ok(SaffirSimpson::TropicalStorm),
            1 => Ok(SaffirSimpson::Category1),
            2 => Ok(SaffirSimpson::Category2),
            3 => Ok(SaffirSimpson::Category3),
            4 => Ok(SaffirSimpson::Category4),
            5 => Ok(SaffirSimpson::Category5),
            other => Err(Error::UnknownIntensity(other)),
        }
    }

    /// Categorize a 1-minute sustained wind speed in knots.
    pub fn from_wind_speed(knots: f64) -> Self {
        match knots {
            k if k < 34.0 => SaffirSimpson::TropicalDepression,
            k if k < 64.0 => SaffirSimpson::TropicalStorm,
            k if k < 83.0 => SaffirSimpson::Category1,
            k if k < 96.0 => SaffirSimpson::Category2,
            k if k < 113.0 => SaffirSimpson::Category3,
            k if k < 137.0 => SaffirSimpson::Category4,
            _ => SaffirSimpson::Category5,
        }
    }
}

/// Wind-radius thresholds carried by best-track wind swath polygons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum WindRadius {
    R34,
    R50,
    R64,
}

impl WindRadius {
    /// Back-to-front draw order: strongest winds first so the widest, lightest
    /// swath lands on top.
    pub const DRAW_ORDER: [WindRadius; 3] = [WindRadius::R64, WindRadius::R50, WindRadius::R34];

    pub fn knots(&self) -> f64 {
        match self {
            WindRadius::R34 => 34.0,
            WindRadius::R50 => 50.0,
            WindRadius::R64 => 64.0,
        }
    }

    /// Exact-match lookup from the RADII field of a wind-swath record.
    pub fn from_knots(knots: f64) -> Option<Self> {
        if knots == 34.0 {
            Some(WindRadius::R34)
        } else if knots == 50.0 {
            Some(WindRadius::R50)
        } else if knots == 64.0 {
            Some(WindRadius::R64)
        } else {
            None
        }
    }

    /// Swath fill color, darkest for the strongest winds.
    pub fn fill_color(&self) -> RGBColor {
        match self {
            WindRadius::R34 => RGBColor(0xd3, 0xd3, 0xd3), // lightgrey
            WindRadius::R50 => RGBColor(0xa9, 0xa9, 0xa9), // darkgrey
            WindRadius::R64 => RGBColor(0x69, 0x69, 0x69), // dimgrey
        }
    }
}
