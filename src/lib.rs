//! Chart utilities for WSRA hurricane observation tracks.
//!
//! This crate renders Wide Swath Radar Altimeter (WSRA) observation tracks
//! against NHC best-track storm paths: a typed TOML configuration layer, an
//! explicit cross-stage variable store, storm identity and styling tables,
//! geospatial track records, and a plotters-based chart layer with
//! project-default styling.

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod store;
pub mod storm;
pub mod style;
pub mod track;

pub use chart::{plot_base_chart, GeoChart, TrackPlotOptions};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use features::LandFeatures;
pub use store::VariableStore;
pub use storm::{SaffirSimpson, Storm, WindRadius};
pub use style::{CoastStyle, FigureStyle, IntensityColormap, LandStyle, OceanStyle};
pub use track::{BestTrack, BestTrackPoint, Extent, TrackPoint, WindSwath, WsraTrack};
