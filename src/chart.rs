//! Chart construction: base map, WSRA observation tracks, and best tracks.
//!
//! A [`GeoChart`] wraps a plotters `ChartContext` over plain lon/lat
//! coordinates. [`plot_base_chart`] builds one from a drawing area, then the
//! track methods layer observation and best-track data on top of it. Each
//! method draws immediately; the draw order of the calls is the z-order of
//! the chart.

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::debug;

use crate::error::{Error, Result};
use crate::features::LandFeatures;
use crate::storm::WindRadius;
use crate::style::{
    CoastStyle, FigureStyle, IntensityColormap, LandStyle, OceanStyle, TrackColormap,
    DEFAULT_WSRA_MARKER_SIZE,
};
use crate::track::{BestTrack, Extent, WsraTrack};

/// Wind swath fill transparency.
const SWATH_ALPHA: f64 = 0.3;
/// Best-track point marker radius in pixels.
const BEST_TRACK_MARKER_SIZE: i32 = 8;
/// Font size for the intensity label centered on each best-track marker.
const INTENSITY_LABEL_SIZE: f64 = 9.0;

fn render_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}

fn font_for(style: &FigureStyle, size: f64) -> FontDesc<'_> {
    FontDesc::new(
        FontFamily::Name(style.font_family.as_str()),
        size,
        FontStyle::Normal,
    )
}

/// Styles for the static base-chart layers, overridable per layer.
#[derive(Debug, Clone, Default)]
pub struct BaseChartStyle {
    pub ocean: OceanStyle,
    pub land: LandStyle,
    pub coast: CoastStyle,
    pub figure: FigureStyle,
}

/// Per-call overrides for [`GeoChart::plot_wsra_track`]; unset fields fall
/// back to the storm's defaults.
#[derive(Clone, Default)]
pub struct TrackPlotOptions {
    pub color: Option<RGBColor>,
    pub marker_size: Option<i32>,
    pub label: Option<String>,
    /// Color each marker by its scalar value instead of the storm color.
    pub color_by_value: bool,
    /// Colormap for value coloring; fitted to the track's values if unset.
    pub colormap: Option<TrackColormap>,
}

/// A geographic chart under construction.
pub struct GeoChart<'a, DB: DrawingBackend> {
    chart: ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    figure: FigureStyle,
    extent: Extent,
}

fn format_lon(lon: &f64) -> String {
    if *lon < 0.0 {
        format!("{:.0}°W", -lon)
    } else {
        format!("{:.0}°E", lon)
    }
}

fn format_lat(lat: &f64) -> String {
    if *lat < 0.0 {
        format!("{:.0}°S", -lat)
    } else {
        format!("{:.0}°N", lat)
    }
}

/// Build the base chart: coordinate range fixed to `extent`, ocean background,
/// land fill, coastline stroke, and gridlines with labels along the top and
/// right edges. The returned chart is ready for track layers.
///
/// Equal aspect is the caller's responsibility via [`Extent::figure_size`]
/// when creating the drawing area.
pub fn plot_base_chart<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    extent: &Extent,
    land: &LandFeatures,
    style: &BaseChartStyle,
) -> Result<GeoChart<'a, DB>> {
    root.fill(&style.ocean.color).map_err(render_err)?;

    let mut chart = ChartBuilder::on(root)
        .margin(8)
        .set_label_area_size(LabelAreaPosition::Top, 28)
        .set_label_area_size(LabelAreaPosition::Right, 44)
        .build_cartesian_2d(
            extent.lon_min..extent.lon_max,
            extent.lat_min..extent.lat_max,
        )
        .map_err(render_err)?;

    let label_font = font_for(&style.figure, style.figure.font_size as f64);
    chart
        .configure_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(&RGBColor(0xb0, 0xb0, 0xb0).mix(0.4))
        .x_label_formatter(&format_lon)
        .y_label_formatter(&format_lat)
        .label_style(label_font)
        .draw()
        .map_err(render_err)?;

    let land_fill = style.land.color.mix(style.land.alpha).filled();
    let coast_stroke = style
        .coast
        .edge_color
        .stroke_width(style.coast.line_width);

    for multi in &land.polygons {
        for polygon in &multi.0 {
            let exterior: Vec<(f64, f64)> =
                polygon.exterior().coords().map(|c| (c.x, c.y)).collect();
            chart
                .draw_series(std::iter::once(Polygon::new(exterior.clone(), land_fill)))
                .map_err(render_err)?;
            chart
                .draw_series(std::iter::once(PathElement::new(exterior, coast_stroke)))
                .map_err(render_err)?;
            for interior in polygon.interiors() {
                let ring: Vec<(f64, f64)> = interior.coords().map(|c| (c.x, c.y)).collect();
                chart
                    .draw_series(std::iter::once(PathElement::new(ring, coast_stroke)))
                    .map_err(render_err)?;
            }
        }
    }

    debug!(
        polygons = land.polygons.len(),
        ?extent,
        "base chart prepared"
    );

    Ok(GeoChart {
        chart,
        figure: style.figure.clone(),
        extent: *extent,
    })
}

impl<'a, DB: DrawingBackend + 'a> GeoChart<'a, DB> {
    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// Scatter one storm's WSRA observations. Marker color, size, and legend
    /// label default from the track's storm unless overridden in `options`.
    pub fn plot_wsra_track(
        &mut self,
        track: &WsraTrack,
        options: &TrackPlotOptions,
    ) -> Result<()> {
        let storm_color = options.color.unwrap_or_else(|| track.storm.color());
        let size = options.marker_size.unwrap_or(DEFAULT_WSRA_MARKER_SIZE);
        let label = options
            .label
            .clone()
            .unwrap_or_else(|| track.storm.label().to_string());

        debug!(storm = %track.storm, points = track.points.len(), "plotting WSRA track");

        let series = if options.color_by_value {
            let cmap = options
                .colormap
                .unwrap_or_else(|| TrackColormap::fitted(track.values()));
            self.chart
                .draw_series(track.points.iter().map(|p| {
                    let color = p.value.map(|v| cmap.color_for(v)).unwrap_or(storm_color);
                    Circle::new((p.longitude, p.latitude), size, color.filled())
                }))
                .map_err(render_err)?
        } else {
            self.chart
                .draw_series(
                    track.points.iter().map(|p| {
                        Circle::new((p.longitude, p.latitude), size, storm_color.filled())
                    }),
                )
                .map_err(render_err)?
        };
        series
            .label(label)
            .legend(move |(x, y)| Circle::new((x, y), 3, storm_color.filled()));

        Ok(())
    }

    /// Draw a best track, back to front: connecting path, wind swaths
    /// (64 kt darkest, then 50 kt, then 34 kt, each semi-transparent),
    /// intensity-colored point markers, and a centered category label per
    /// point. Radii with no swath records draw nothing.
    pub fn plot_best_track(
        &mut self,
        best: &BestTrack,
        cmap: &IntensityColormap,
    ) -> Result<()> {
        debug!(
            points = best.points.len(),
            swaths = best.wind_swaths.len(),
            "plotting best track"
        );

        let path: Vec<(f64, f64)> = best.path.coords().map(|c| (c.x, c.y)).collect();
        self.chart
            .draw_series(std::iter::once(PathElement::new(path, BLACK.stroke_width(1))))
            .map_err(render_err)?;

        for radius in WindRadius::DRAW_ORDER {
            let fill = radius.fill_color().mix(SWATH_ALPHA).filled();
            for swath in best.swaths_at(radius) {
                for polygon in &swath.polygon.0 {
                    let exterior: Vec<(f64, f64)> =
                        polygon.exterior().coords().map(|c| (c.x, c.y)).collect();
                    self.chart
                        .draw_series(std::iter::once(Polygon::new(exterior, fill)))
                        .map_err(render_err)?;
                }
            }
        }

        self.chart
            .draw_series(best.points.iter().map(|p| {
                let color = cmap.color_for(p.intensity.code() as f64);
                Circle::new(
                    (p.position.x(), p.position.y()),
                    BEST_TRACK_MARKER_SIZE,
                    color.filled(),
                )
            }))
            .map_err(render_err)?;
        self.chart
            .draw_series(best.points.iter().map(|p| {
                Circle::new(
                    (p.position.x(), p.position.y()),
                    BEST_TRACK_MARKER_SIZE,
                    BLACK.stroke_width(1),
                )
            }))
            .map_err(render_err)?;

        let label_style = font_for(&self.figure, INTENSITY_LABEL_SIZE)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        self.chart
            .draw_series(best.points.iter().map(|p| {
                Text::new(
                    p.intensity.label().to_string(),
                    (p.position.x(), p.position.y()),
                    label_style.clone(),
                )
            }))
            .map_err(render_err)?;

        Ok(())
    }

    /// Draw the accumulated legend. Call once, after all track layers; the
    /// caller still owns presenting the drawing area.
    pub fn finish(mut self) -> Result<()> {
        self.chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerLeft)
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK.mix(0.3))
            .label_font(font_for(&self.figure, self.figure.font_size as f64))
            .draw()
            .map_err(render_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storm::{SaffirSimpson, Storm};
    use crate::track::{BestTrackPoint, TrackPoint, WindSwath};
    use geo::{polygon, LineString, MultiPolygon, Point};

    fn extent() -> Extent {
        Extent::new(-85.0, -60.0, 15.0, 45.0)
    }

    fn land() -> LandFeatures {
        LandFeatures {
            polygons: vec![MultiPolygon::new(vec![polygon![
                (x: -80.0, y: 25.0),
                (x: -79.0, y: 25.0),
                (x: -79.0, y: 26.0),
                (x: -80.0, y: 26.0),
            ]])],
        }
    }

    fn wsra_track(storm: Storm) -> WsraTrack {
        WsraTrack::new(
            storm,
            vec![
                TrackPoint {
                    longitude: -75.0,
                    latitude: 25.0,
                    value: Some(0.01),
                },
                TrackPoint {
                    longitude: -74.5,
                    latitude: 25.5,
                    value: Some(0.03),
                },
            ],
        )
    }

    fn best_track(radii: &[WindRadius]) -> BestTrack {
        BestTrack {
            points: vec![
                BestTrackPoint {
                    position: Point::new(-75.0, 24.0),
                    intensity: SaffirSimpson::TropicalStorm,
                },
                BestTrackPoint {
                    position: Point::new(-76.0, 26.0),
                    intensity: SaffirSimpson::Category4,
                },
            ],
            path: LineString::from(vec![(-75.0, 24.0), (-76.0, 26.0)]),
            wind_swaths: radii
                .iter()
                .map(|&radius| WindSwath {
                    radius,
                    polygon: MultiPolygon::new(vec![polygon![
                        (x: -77.0, y: 23.0),
                        (x: -73.0, y: 23.0),
                        (x: -73.0, y: 27.0),
                        (x: -77.0, y: 27.0),
                    ]]),
                })
                .collect(),
        }
    }

    #[test]
    fn base_chart_renders_land_polygon() {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (600, 720)).into_drawing_area();
            plot_base_chart(&root, &extent(), &land(), &BaseChartStyle::default()).unwrap();
            root.present().unwrap();
        }
        assert!(buf.contains("<svg"));
        assert!(buf.contains("<polygon"));
    }

    #[test]
    fn wsra_track_uses_storm_defaults() {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (600, 720)).into_drawing_area();
            let mut chart =
                plot_base_chart(&root, &extent(), &land(), &BaseChartStyle::default()).unwrap();
            chart
                .plot_wsra_track(&wsra_track(Storm::Earl), &TrackPlotOptions::default())
                .unwrap();
            chart.finish().unwrap();
            root.present().unwrap();
        }
        // Default color is Earl's rebeccapurple; the legend carries the
        // default label.
        assert!(buf.to_lowercase().contains("#663399"));
        assert!(buf.contains("Earl (2022)"));
    }

    #[test]
    fn wsra_track_overrides_win() {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (600, 720)).into_drawing_area();
            let mut chart =
                plot_base_chart(&root, &extent(), &land(), &BaseChartStyle::default()).unwrap();
            let options = TrackPlotOptions {
                color: Some(RGBColor(0x11, 0x22, 0x33)),
                label: Some("custom".to_string()),
                ..Default::default()
            };
            chart.plot_wsra_track(&wsra_track(Storm::Earl), &options).unwrap();
            chart.finish().unwrap();
            root.present().unwrap();
        }
        assert!(buf.to_lowercase().contains("#112233"));
        assert!(buf.contains("custom"));
        assert!(!buf.contains("Earl (2022)"));
    }

    #[test]
    fn best_track_renders_all_layers() {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (600, 720)).into_drawing_area();
            let mut chart =
                plot_base_chart(&root, &extent(), &land(), &BaseChartStyle::default()).unwrap();
            chart
                .plot_best_track(
                    &best_track(&[WindRadius::R34, WindRadius::R50, WindRadius::R64]),
                    &IntensityColormap::default(),
                )
                .unwrap();
            root.present().unwrap();
        }
        assert!(buf.contains("<polygon"));
        assert!(buf.contains("TS"));
    }

    #[test]
    fn best_track_tolerates_missing_radius_layer() {
        // No 50 kt records: that layer is empty but the call succeeds.
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (600, 720)).into_drawing_area();
            let mut chart =
                plot_base_chart(&root, &extent(), &land(), &BaseChartStyle::default()).unwrap();
            chart
                .plot_best_track(
                    &best_track(&[WindRadius::R34, WindRadius::R64]),
                    &IntensityColormap::default(),
                )
                .unwrap();
            root.present().unwrap();
        }
        assert!(buf.contains("<svg"));
    }

    #[test]
    fn value_coloring_renders_markers() {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (600, 720)).into_drawing_area();
            let mut chart =
                plot_base_chart(&root, &extent(), &land(), &BaseChartStyle::default()).unwrap();
            let options = TrackPlotOptions {
                color_by_value: true,
                ..Default::default()
            };
            chart.plot_wsra_track(&wsra_track(Storm::Fiona), &options).unwrap();
            chart.finish().unwrap();
            root.present().unwrap();
        }
        assert!(buf.contains("<circle"));
    }
}
