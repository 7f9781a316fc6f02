use serde::{Deserialize, Serialize};
use tickworld_common::{SimError, SimResult};

use crate::vector::Vector;

/// Extents of an axis-aligned box, in metres. Not a position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Volume {
    x: f64,
    y: f64,
    z: f64,
}

impl Volume {
    pub const ZERO: Volume = Volume {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a volume, rejecting negative or NaN extents.
    pub fn new(x: f64, y: f64, z: f64) -> SimResult<Self> {
        Ok(Self {
            x: SimError::check_non_negative("volume.x", x)?,
            y: SimError::check_non_negative("volume.y", y)?,
            z: SimError::check_non_negative("volume.z", z)?,
        })
    }

    /// A cube with side `side`.
    pub fn cube(side: f64) -> SimResult<Self> {
        Self::new(side, side, side)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Enclosed volume in cubic metres.
    pub fn cubic_metres(&self) -> f64 {
        self.x * self.y * self.z
    }

    pub fn with_x(&self, x: f64) -> SimResult<Self> {
        Self::new(x, self.y, self.z)
    }

    pub fn with_y(&self, y: f64) -> SimResult<Self> {
        Self::new(self.x, y, self.z)
    }

    pub fn with_z(&self, z: f64) -> SimResult<Self> {
        Self::new(self.x, self.y, z)
    }

    pub fn cross_section_xy(&self) -> f64 {
        self.x * self.y
    }

    pub fn cross_section_xz(&self) -> f64 {
        self.x * self.z
    }

    pub fn cross_section_yz(&self) -> f64 {
        self.y * self.z
    }

    /// Area of the box's silhouette seen along `direction`.
    ///
    /// This is the area of the box projected onto the plane perpendicular to
    /// the unit direction `d`: `|dx|·y·z + |dy|·x·z + |dz|·x·y`. Axis-aligned
    /// directions reduce to the area of a single face. A zero direction has
    /// no silhouette and yields 0.
    pub fn cross_section(&self, direction: Vector) -> f64 {
        let Some(d) = direction.normalized() else {
            return 0.0;
        };
        let mut area = 0.0;
        // Skip zero components so infinite extents on other axes do not turn
        // into NaN.
        if d.x() != 0.0 {
            area += d.x().abs() * self.cross_section_yz();
        }
        if d.y() != 0.0 {
            area += d.y().abs() * self.cross_section_xz();
        }
        if d.z() != 0.0 {
            area += d.z().abs() * self.cross_section_xy();
        }
        area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Volume {
        Volume::new(x, y, z).unwrap()
    }

    #[test]
    fn rejects_negative_extents() {
        assert!(matches!(
            Volume::new(1.0, -0.1, 1.0),
            Err(SimError::Negative {
                quantity: "volume.y",
                ..
            })
        ));
        assert!(Volume::new(f64::NAN, 1.0, 1.0).is_err());
        assert!(v(1.0, 1.0, 1.0).with_z(-1.0).is_err());
    }

    #[test]
    fn axis_aligned_cross_sections_are_face_areas() {
        let vol = v(2.0, 3.0, 4.0);
        assert_eq!(vol.cross_section(Vector::new(1.0, 0.0, 0.0)), 12.0);
        assert_eq!(vol.cross_section(Vector::new(-5.0, 0.0, 0.0)), 12.0);
        assert_eq!(vol.cross_section(Vector::new(0.0, 1.0, 0.0)), 8.0);
        assert_eq!(vol.cross_section(Vector::new(0.0, 0.0, -2.0)), 6.0);
    }

    #[test]
    fn diagonal_cross_section_projects_the_box() {
        // Unit cube seen along (1,1,0): the silhouette is a sqrt(2) x 1 rectangle.
        let cube = v(1.0, 1.0, 1.0);
        let area = cube.cross_section(Vector::new(1.0, 1.0, 0.0));
        assert!((area - 2f64.sqrt()).abs() < 1e-12);

        // Unit cube seen along its space diagonal: a regular hexagon of area sqrt(3).
        let area = cube.cross_section(Vector::new(-1.0, -1.0, -1.0));
        assert!((area - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn zero_direction_has_no_cross_section() {
        assert_eq!(v(2.0, 3.0, 4.0).cross_section(Vector::ZERO), 0.0);
    }

    #[test]
    fn infinite_extents_stay_finite_along_the_other_axis() {
        let ground = v(f64::MAX, 20_000.0, f64::MAX);
        let area = ground.cross_section(Vector::new(1.0, 0.0, 0.0));
        assert!(!area.is_nan());
    }

    #[test]
    fn cubic_metres_multiplies_extents() {
        assert_eq!(v(2.0, 3.0, 4.0).cubic_metres(), 24.0);
    }
}
