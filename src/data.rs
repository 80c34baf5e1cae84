//! Loaders for WSRA observation CSVs and best-track GeoJSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use geojson::{FeatureCollection, GeoJson, Value};
use tracing::info;

use crate::error::{Error, Result};
use crate::storm::{SaffirSimpson, Storm, WindRadius};
use crate::track::{BestTrack, BestTrackPoint, TrackPoint, WindSwath, WsraTrack};

/// Load one storm's WSRA observations from a CSV with `longitude` and
/// `latitude` columns. When `value_column` is given, that column's values are
/// attached per point for colormap-driven coloring. Rows with unparsable
/// coordinates are skipped.
pub fn load_wsra_track(path: &Path, storm: Storm, value_column: Option<&str>) -> Result<WsraTrack> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().from_reader(file);
    let headers = rdr.headers()?.clone();

    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
                path: path.to_path_buf(),
            })
    };

    let lon_idx = column("longitude")?;
    let lat_idx = column("latitude")?;
    let value_idx = value_column.map(|name| column(name)).transpose()?;

    let mut points = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let lon: Option<f64> = record.get(lon_idx).and_then(|s| s.trim().parse().ok());
        let lat: Option<f64> = record.get(lat_idx).and_then(|s| s.trim().parse().ok());
        let (Some(longitude), Some(latitude)) = (lon, lat) else {
            continue;
        };
        let value = value_idx
            .and_then(|idx| record.get(idx))
            .and_then(|s| s.trim().parse().ok());
        points.push(TrackPoint {
            longitude,
            latitude,
            value,
        });
    }

    info!(storm = %storm, points = points.len(), path = %path.display(), "loaded WSRA track");
    Ok(WsraTrack::new(storm, points))
}

/// Load a best track from three GeoJSON files: point fixes carrying a
/// `saffir_simpson_int` property, the connecting path, and wind-swath
/// polygons carrying a `RADII` property. Swath rows whose radius is not one
/// of 34/50/64 kt are skipped; they are never drawn.
pub fn load_best_track(
    points_path: &Path,
    path_path: &Path,
    windswath_path: &Path,
) -> Result<BestTrack> {
    let points = load_best_track_points(points_path)?;
    let path = load_best_track_path(path_path)?;
    let wind_swaths = load_wind_swaths(windswath_path)?;

    info!(
        points = points.len(),
        swaths = wind_swaths.len(),
        "loaded best track"
    );
    Ok(BestTrack {
        points,
        path,
        wind_swaths,
    })
}

fn read_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let geojson = GeoJson::from_reader(reader)
        .map_err(|e| Error::Geometry(format!("failed to parse {:?}: {e}", path)))?;
    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        _ => Err(Error::Geometry(format!(
            "{:?} must be a FeatureCollection",
            path
        ))),
    }
}

fn load_best_track_points(path: &Path) -> Result<Vec<BestTrackPoint>> {
    let collection = read_feature_collection(path)?;
    let mut points = Vec::new();
    for feature in collection.features {
        let Some(geom) = &feature.geometry else {
            continue;
        };
        let Value::Point(coords) = &geom.value else {
            continue;
        };
        let code = feature
            .property("saffir_simpson_int")
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f.round() as i64)))
            .ok_or_else(|| {
                Error::Geometry(format!(
                    "best-track point in {:?} has no saffir_simpson_int property",
                    path
                ))
            })?;
        points.push(BestTrackPoint {
            position: geo::Point::new(coords[0], coords[1]),
            intensity: SaffirSimpson::from_code(code)?,
        });
    }
    Ok(points)
}

fn load_best_track_path(path: &Path) -> Result<geo::LineString<f64>> {
    let collection = read_feature_collection(path)?;
    for feature in collection.features {
        let Some(geom) = feature.geometry else {
            continue;
        };
        if let Value::LineString(_) = geom.value {
            let geo_geom: geo::Geometry<f64> = geom
                .value
                .try_into()
                .map_err(|e| Error::Geometry(format!("invalid path geometry: {e:?}")))?;
            if let geo::Geometry::LineString(line) = geo_geom {
                return Ok(line);
            }
        }
    }
    Err(Error::Geometry(format!(
        "{:?} contains no LineString feature",
        path
    )))
}

fn load_wind_swaths(path: &Path) -> Result<Vec<WindSwath>> {
    let collection = read_feature_collection(path)?;
    let mut swaths = Vec::new();
    for feature in collection.features {
        let Some(radius) = feature
            .property("RADII")
            .and_then(|v| v.as_f64())
            .and_then(WindRadius::from_knots)
        else {
            continue;
        };
        let Some(geom) = feature.geometry else {
            continue;
        };
        match geom.value {
            Value::Polygon(_) | Value::MultiPolygon(_) => {
                let geo_geom: geo::Geometry<f64> = geom
                    .value
                    .try_into()
                    .map_err(|e| Error::Geometry(format!("invalid swath geometry: {e:?}")))?;
                let polygon = match geo_geom {
                    geo::Geometry::Polygon(p) => geo::MultiPolygon::new(vec![p]),
                    geo::Geometry::MultiPolygon(mp) => mp,
                    _ => continue,
                };
                swaths.push(WindSwath { radius, polygon });
            }
            _ => {}
        }
    }
    Ok(swaths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const WSRA_CSV: &str = "\
time,longitude,latitude,mean_square_slope
2022-09-28T12:00:00,-75.0,24.5,0.021
2022-09-28T12:05:00,-74.9,24.6,0.023
2022-09-28T12:10:00,bad,24.7,0.025
2022-09-28T12:15:00,-74.7,24.8,
";

    #[test]
    fn loads_wsra_csv_with_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wsra.csv");
        fs::write(&path, WSRA_CSV).unwrap();

        let track =
            load_wsra_track(&path, Storm::Ian, Some("mean_square_slope")).unwrap();
        assert_eq!(track.storm, Storm::Ian);
        // The row with an unparsable longitude is skipped.
        assert_eq!(track.points.len(), 3);
        assert_eq!(track.points[0].value, Some(0.021));
        // A blank value cell parses to None, not an error.
        assert_eq!(track.points[2].value, None);
    }

    #[test]
    fn loads_wsra_csv_without_value_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wsra.csv");
        fs::write(&path, WSRA_CSV).unwrap();

        let track = load_wsra_track(&path, Storm::Ian, None).unwrap();
        assert!(track.points.iter().all(|p| p.value.is_none()));
    }

    #[test]
    fn missing_column_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wsra.csv");
        fs::write(&path, "lon,lat\n-75.0,24.5\n").unwrap();

        match load_wsra_track(&path, Storm::Ian, None) {
            Err(Error::MissingColumn { column, .. }) => assert_eq!(column, "longitude"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    fn write_best_track_fixtures(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf, std::path::PathBuf) {
        let pts = dir.join("pts.geojson");
        fs::write(
            &pts,
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {"saffir_simpson_int": 0},
                        "geometry": {"type": "Point", "coordinates": [-75.0, 24.0]}
                    },
                    {
                        "type": "Feature",
                        "properties": {"saffir_simpson_int": 4},
                        "geometry": {"type": "Point", "coordinates": [-76.0, 26.0]}
                    }
                ]
            }"#,
        )
        .unwrap();

        let lin = dir.join("lin.geojson");
        fs::write(
            &lin,
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {},
                        "geometry": {
                            "type": "LineString",
                            "coordinates": [[-75.0, 24.0], [-76.0, 26.0]]
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        let swath = dir.join("windswath.geojson");
        fs::write(
            &swath,
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {"RADII": 34.0},
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[-78.0, 22.0], [-72.0, 22.0], [-72.0, 28.0], [-78.0, 28.0], [-78.0, 22.0]]]
                        }
                    },
                    {
                        "type": "Feature",
                        "properties": {"RADII": 64.0},
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[-76.0, 23.0], [-74.0, 23.0], [-74.0, 25.0], [-76.0, 25.0], [-76.0, 23.0]]]
                        }
                    },
                    {
                        "type": "Feature",
                        "properties": {"RADII": 45.0},
                        "geometry": {
                            "type": "Polygon",
                            "coordinates": [[[-76.0, 23.0], [-74.0, 23.0], [-74.0, 25.0], [-76.0, 25.0], [-76.0, 23.0]]]
                        }
                    }
                ]
            }"#,
        )
        .unwrap();

        (pts, lin, swath)
    }

    #[test]
    fn loads_best_track_files() {
        let dir = tempfile::tempdir().unwrap();
        let (pts, lin, swath) = write_best_track_fixtures(dir.path());

        let best = load_best_track(&pts, &lin, &swath).unwrap();
        assert_eq!(best.points.len(), 2);
        assert_eq!(best.points[1].intensity, SaffirSimpson::Category4);
        assert_eq!(best.path.coords().count(), 2);
        // The 45 kt row is not one of the drawable thresholds.
        assert_eq!(best.wind_swaths.len(), 2);
        assert_eq!(best.swaths_at(WindRadius::R34).count(), 1);
        assert_eq!(best.swaths_at(WindRadius::R50).count(), 0);
        assert_eq!(best.swaths_at(WindRadius::R64).count(), 1);
    }

    #[test]
    fn bad_intensity_code_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pts = dir.path().join("pts.geojson");
        fs::write(
            &pts,
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": {"saffir_simpson_int": 9},
                        "geometry": {"type": "Point", "coordinates": [-75.0, 24.0]}
                    }
                ]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            load_best_track_points(&pts),
            Err(Error::UnknownIntensity(9))
        ));
    }

    #[test]
    fn path_file_without_linestring_fails() {
        let dir = tempfile::tempdir().unwrap();
        let lin = dir.path().join("lin.geojson");
        fs::write(
            &lin,
            r#"{"type": "FeatureCollection", "features": []}"#,
        )
        .unwrap();
        assert!(matches!(
            load_best_track_path(&lin),
            Err(Error::Geometry(_))
        ));
    }
}
