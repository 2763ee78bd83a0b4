//! Area and distance unit conversions used by survey readouts.

/// Square feet per square metre.
pub const SQ_FEET_PER_SQ_METER: f64 = 10.7639;
/// Square metres per hectare.
pub const SQ_METERS_PER_HECTARE: f64 = 10_000.0;
/// Acres per square metre.
pub const ACRES_PER_SQ_METER: f64 = 0.000247105;

/// Feet per metre.
pub const FEET_PER_METER: f64 = 3.28084;
/// Miles per metre.
pub const MILES_PER_METER: f64 = 0.000621371;

/// An area in square metres with conversions to survey units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AreaMeasurement {
    square_meters: f64,
}

impl AreaMeasurement {
    pub fn from_square_meters(square_meters: f64) -> Self {
        Self { square_meters }
    }

    pub fn square_meters(&self) -> f64 {
        self.square_meters
    }

    pub fn square_feet(&self) -> f64 {
        self.square_meters * SQ_FEET_PER_SQ_METER
    }

    pub fn hectares(&self) -> f64 {
        self.square_meters / SQ_METERS_PER_HECTARE
    }

    pub fn acres(&self) -> f64 {
        self.square_meters * ACRES_PER_SQ_METER
    }
}

/// A distance in metres with conversions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistanceMeasurement {
    meters: f64,
}

impl DistanceMeasurement {
    pub fn from_meters(meters: f64) -> Self {
        Self { meters }
    }

    pub fn meters(&self) -> f64 {
        self.meters
    }

    pub fn kilometers(&self) -> f64 {
        self.meters / 1000.0
    }

    pub fn feet(&self) -> f64 {
        self.meters * FEET_PER_METER
    }

    pub fn miles(&self) -> f64 {
        self.meters * MILES_PER_METER
    }
}
