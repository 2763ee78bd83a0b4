//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use surveymap::config::ConfigFile;
use surveymap::geometry::{AreaMeasurement, BoundingBox, GeoPoint, PolygonRing};
use surveymap::provider::MapStyle;

use crate::error::CliError;

/// Base map style selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum StyleArg {
    /// Road map with labels
    Road,
    /// Satellite imagery with road labels
    Satellite,
}

impl From<StyleArg> for MapStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Road => MapStyle::Road,
            StyleArg::Satellite => MapStyle::Satellite,
        }
    }
}

/// Resolve style: CLI > config.
pub fn resolve_style(cli: Option<StyleArg>, config: &ConfigFile) -> MapStyle {
    cli.map(MapStyle::from).unwrap_or(config.provider.style)
}

/// Parse `N,S,E,W`.
pub fn parse_bbox(s: &str) -> Result<BoundingBox, CliError> {
    let values = parse_numbers(s, 4, "--bbox expects N,S,E,W")?;
    BoundingBox::new(values[0], values[1], values[2], values[3])
        .map_err(|e| CliError::InvalidInput(e.to_string()))
}

/// Parse `lon,lat` as one point.
pub fn parse_point(s: &str) -> Result<GeoPoint, CliError> {
    let values = parse_numbers(s, 2, "points are written lon,lat")?;
    Ok(GeoPoint::new(values[0], values[1]))
}

/// Parse `lon,lat;lon,lat;...`.
pub fn parse_points(s: &str) -> Result<Vec<GeoPoint>, CliError> {
    s.split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(parse_point)
        .collect()
}

fn parse_numbers(s: &str, expected: usize, usage: &str) -> Result<Vec<f64>, CliError> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::InvalidInput(format!("'{}': {} ({})", s, usage, e)))?;

    if values.len() != expected {
        return Err(CliError::InvalidInput(format!("'{}': {}", s, usage)));
    }
    Ok(values)
}

/// Shape from either `--bbox` or `--polygon`.
pub fn shape_from_args(bbox: Option<&str>, polygon: Option<&str>) -> Result<PolygonRing, CliError> {
    match (bbox, polygon) {
        (Some(bbox), None) => Ok(PolygonRing::from_bbox(&parse_bbox(bbox)?)),
        (None, Some(polygon)) => Ok(PolygonRing::new(parse_points(polygon)?)),
        _ => Err(CliError::InvalidInput(
            "pass exactly one of --bbox or --polygon".to_string(),
        )),
    }
}

/// Print an area in every supported unit.
pub fn print_area(area: &AreaMeasurement) {
    println!("  Area:       {:.2} m²", area.square_meters());
    println!("              {:.2} ft²", area.square_feet());
    println!("              {:.4} ha", area.hectares());
    println!("              {:.4} acres", area.acres());
}
