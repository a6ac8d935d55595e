//! Distance weighting
//!
//! Uses an equirectangular (flat-earth) approximation, which is accurate
//! enough over a single city. The longitude term is scaled by the cosine of
//! the user's latitude.

use crate::domain::location::Location;
use crate::domain::types::{Coordinates, User};

/// Kilometres per degree of longitude at the equator
const KM_PER_DEG_LON: f64 = 111.320;

/// Kilometres per degree of latitude
const KM_PER_DEG_LAT: f64 = 110.574;

/// Approximate distance in km from `origin` to `target`
pub fn distance_km(origin: Coordinates, target: Coordinates) -> f64 {
    let d_ew = KM_PER_DEG_LON
        * (target.longitude - origin.longitude)
        * origin.latitude.to_radians().cos();
    let d_ns = KM_PER_DEG_LAT * (target.latitude - origin.latitude);
    (d_ew * d_ew + d_ns * d_ns).sqrt()
}

/// Maps distance to a weight in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceWeighting {
    /// Distance at which the weight drops to 0.5
    half_weight_km: f64,
}

impl Default for DistanceWeighting {
    fn default() -> Self {
        Self { half_weight_km: 5.0 }
    }
}

impl DistanceWeighting {
    pub fn new(half_weight_km: f64) -> Self {
        Self { half_weight_km }
    }

    #[inline]
    pub fn half_weight_km(&self) -> f64 {
        self.half_weight_km
    }

    /// `1 - d / (h + d)`: 1 at the user's position, 0.5 at `h` km
    #[inline]
    pub fn weight_for_km(&self, distance_km: f64) -> f64 {
        1.0 - distance_km / (self.half_weight_km + distance_km)
    }

    pub fn weight(&self, location: &Location, user: &User) -> f64 {
        self.weight_for_km(distance_km(user.coordinates, location.coordinates))
    }
}
