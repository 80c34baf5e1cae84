//! Geospatial record types for WSRA observation tracks and best tracks.

use geo::{Coord, LineString, MultiPolygon, Point, Rect};
use serde::Deserialize;

use crate::storm::{SaffirSimpson, Storm, WindRadius};

/// One WSRA observation: position plus an optional scalar (e.g. mean square
/// slope) used for per-point coloring.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub value: Option<f64>,
}

/// An ordered WSRA observation track for one storm.
#[derive(Debug, Clone)]
pub struct WsraTrack {
    pub storm: Storm,
    pub points: Vec<TrackPoint>,
}

impl WsraTrack {
    pub fn new(storm: Storm, points: Vec<TrackPoint>) -> Self {
        WsraTrack { storm, points }
    }

    /// Scalar values for points that carry one.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().filter_map(|p| p.value)
    }
}

/// A best-track fix: position and intensity at one synoptic time.
#[derive(Debug, Clone)]
pub struct BestTrackPoint {
    pub position: Point<f64>,
    pub intensity: SaffirSimpson,
}

/// Wind swath polygon tagged with its wind-radius threshold.
#[derive(Debug, Clone)]
pub struct WindSwath {
    pub radius: WindRadius,
    pub polygon: MultiPolygon<f64>,
}

/// A storm's official reconstructed track: point fixes, the connecting path,
/// and wind-swath polygons per radius threshold.
#[derive(Debug, Clone)]
pub struct BestTrack {
    pub points: Vec<BestTrackPoint>,
    pub path: LineString<f64>,
    pub wind_swaths: Vec<WindSwath>,
}

impl BestTrack {
    /// Swaths at exactly the given radius threshold. An empty result is not
    /// an error; the corresponding layer just has nothing to draw.
    pub fn swaths_at(&self, radius: WindRadius) -> impl Iterator<Item = &WindSwath> {
        self.wind_swaths.iter().filter(move |s| s.radius == radius)
    }
}

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Extent {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Extent {
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Self {
        Extent {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Pixel dimensions for a figure of the given width with equal aspect:
    /// one degree of longitude and one degree of latitude get the same number
    /// of pixels.
    pub fn figure_size(&self, width: u32) -> (u32, u32) {
        let height = (width as f64 * self.lat_span() / self.lon_span()).round() as u32;
        (width, height.max(1))
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.lon_min,
                y: self.lat_min,
            },
            Coord {
                x: self.lon_max,
                y: self.lat_max,
            },
        )
    }
}
