//! Area and distance commands - survey measurements without any network.

use surveymap::geometry::{label_position, measure_area, path_length, PathMeasurement};

use super::common::{parse_points, print_area, shape_from_args};
use crate::error::CliError;

/// Run the area command.
pub fn run_area(bbox: Option<&str>, polygon: Option<&str>) -> Result<(), CliError> {
    let ring = shape_from_args(bbox, polygon)?;
    if ring.len() < 3 {
        return Err(CliError::InvalidInput(format!(
            "a polygon needs at least 3 points, got {}",
            ring.len()
        )));
    }

    println!("Polygon ({} points)", ring.len());
    print_area(&measure_area(&ring));
    if let Some(label) = label_position(&ring) {
        println!("  Label at:   {:.6}, {:.6}", label.lon, label.lat);
    }
    Ok(())
}

/// Run the distance command.
pub fn run_distance(path: &str) -> Result<(), CliError> {
    let points = parse_points(path)?;
    if points.len() < 2 {
        return Err(CliError::InvalidInput(
            "a path needs at least 2 points".to_string(),
        ));
    }

    print_path(&path_length(&points));
    Ok(())
}

fn print_path(measurement: &PathMeasurement) {
    for (i, segment) in measurement.segments.iter().enumerate() {
        let mid = segment.midpoint();
        println!(
            "  Segment {}: {:.2} m ({:.2} ft) at {:.6}, {:.6}",
            i + 1,
            segment.distance.meters(),
            segment.distance.feet(),
            mid.lon,
            mid.lat
        );
    }

    let total = &measurement.total;
    println!();
    println!("  Total:      {:.2} m", total.meters());
    println!("              {:.3} km", total.kilometers());
    println!("              {:.2} ft", total.feet());
    println!("              {:.4} miles", total.miles());
}
