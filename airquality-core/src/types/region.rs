/// A point in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `"lat,lon"` form used by APIs that take a single coordinates parameter
    pub fn to_coordinates_param(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Rectangular area given by its north-west and south-east corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north_west: GeoPoint,
    pub south_east: GeoPoint,
}

/// Clairton, PA (U.S. Steel Clairton Works, Mon Valley)
pub const CLAIRTON_PA: GeoPoint = GeoPoint::new(40.2923, -79.8817);

/// Approximate box around Clairton used for sensor queries
pub const CLAIRTON_BOUNDS: BoundingBox = BoundingBox {
    north_west: GeoPoint::new(40.35, -79.95),
    south_east: GeoPoint::new(40.25, -79.80),
};

/// Search radius around Clairton in miles (AirNow)
pub const CLAIRTON_RADIUS_MILES: u32 = 25;

/// Search radius around Clairton in metres (OpenAQ)
pub const CLAIRTON_RADIUS_METRES: u32 = 25_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_param() {
        assert_eq!(CLAIRTON_PA.to_coordinates_param(), "40.2923,-79.8817");
    }
}
