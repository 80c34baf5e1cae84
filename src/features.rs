//! Base-map feature geometry.
//!
//! Land polygons (Natural Earth or similar) are loaded from a GeoJSON
//! FeatureCollection and drawn as the land fill and coastline stroke of the
//! base chart. The ocean is the chart background, so no ocean geometry is
//! needed.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geo::bounding_rect::BoundingRect;
use geo::intersects::Intersects;
use geo::MultiPolygon;
use geojson::{GeoJson, Value};
use tracing::info;

use crate::error::{Error, Result};
use crate::track::Extent;

#[derive(Debug, Clone, Default)]
pub struct LandFeatures {
    pub polygons: Vec<MultiPolygon<f64>>,
}

impl LandFeatures {
    /// Load land polygons from a GeoJSON FeatureCollection. Non-polygon
    /// features are skipped.
    pub fn from_geojson(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let geojson = GeoJson::from_reader(reader)
            .map_err(|e| Error::Geometry(format!("failed to parse {:?}: {e}", path)))?;

        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => {
                return Err(Error::Geometry(format!(
                    "{:?} must be a FeatureCollection",
                    path
                )))
            }
        };

        let mut polygons = Vec::new();
        for feature in collection.features {
            let Some(geom) = feature.geometry else {
                continue;
            };
            match geom.value {
                Value::Polygon(_) | Value::MultiPolygon(_) => {
                    let geo_geom: geo::Geometry<f64> = geom
                        .value
                        .try_into()
                        .map_err(|e| Error::Geometry(format!("invalid geometry: {e:?}")))?;
                    match geo_geom {
                        geo::Geometry::Polygon(p) => polygons.push(MultiPolygon::new(vec![p])),
                        geo::Geometry::MultiPolygon(mp) => polygons.push(mp),
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        info!(count = polygons.len(), path = %path.display(), "loaded land features");
        Ok(LandFeatures { polygons })
    }

    /// Keep only polygons whose bounding box intersects the chart extent.
    /// Cheap pre-filter so a global land file does not slow down a basin
    /// chart.
    pub fn clipped_to(&self, extent: &Extent) -> LandFeatures {
        let rect = extent.to_rect();
        let polygons = self
            .polygons
            .iter()
            .filter(|mp| {
                mp.bounding_rect()
                    .map(|bbox| bbox.intersects(&rect))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        LandFeatures { polygons }
    }
}
