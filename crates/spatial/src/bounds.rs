use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::face::Axis;
use crate::location::Location;
use crate::vector::Vector;
use crate::volume::Volume;

/// Axis-aligned bounding box derived from a center location and extents.
///
/// Bounds are closed: a point on a face is contained, and two boxes sharing
/// a face overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    center: Location,
    extents: Volume,
}

impl BoundingBox {
    pub fn new(center: Location, extents: Volume) -> Self {
        Self { center, extents }
    }

    pub fn center(&self) -> Location {
        self.center
    }

    pub fn extents(&self) -> Volume {
        self.extents
    }

    fn half(&self) -> DVec3 {
        DVec3::new(self.extents.x(), self.extents.y(), self.extents.z()) / 2.0
    }

    pub fn min(&self) -> DVec3 {
        self.center.position() - self.half()
    }

    pub fn max(&self) -> DVec3 {
        self.center.position() + self.half()
    }

    pub fn min_x(&self) -> f64 {
        self.min().x
    }

    pub fn max_x(&self) -> f64 {
        self.max().x
    }

    pub fn min_y(&self) -> f64 {
        self.min().y
    }

    pub fn max_y(&self) -> f64 {
        self.max().y
    }

    pub fn min_z(&self) -> f64 {
        self.min().z
    }

    pub fn max_z(&self) -> f64 {
        self.max().z
    }

    /// The eight corners, all combinations of min/max per axis.
    pub fn corners(&self) -> [DVec3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            DVec3::new(hi.x, hi.y, hi.z),
            DVec3::new(hi.x, hi.y, lo.z),
            DVec3::new(hi.x, lo.y, hi.z),
            DVec3::new(hi.x, lo.y, lo.z),
            DVec3::new(lo.x, hi.y, hi.z),
            DVec3::new(lo.x, hi.y, lo.z),
            DVec3::new(lo.x, lo.y, hi.z),
            DVec3::new(lo.x, lo.y, lo.z),
        ]
    }

    /// Whether `point` lies within the closed bounds on all three axes.
    pub fn contains(&self, point: DVec3) -> bool {
        let (lo, hi) = (self.min(), self.max());
        (lo.x..=hi.x).contains(&point.x)
            && (lo.y..=hi.y).contains(&point.y)
            && (lo.z..=hi.z).contains(&point.z)
    }

    /// Containment on the horizontal plane only (x and z).
    pub fn contains_ignore_y(&self, point: DVec3) -> bool {
        let (lo, hi) = (self.min(), self.max());
        (lo.x..=hi.x).contains(&point.x) && (lo.z..=hi.z).contains(&point.z)
    }

    /// Whether every corner of `other` lies inside this box.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.corners().iter().all(|c| self.contains(*c))
    }

    /// Whether the two boxes intersect.
    ///
    /// Exact test for axis-aligned boxes: the closed intervals must intersect
    /// on every axis. Unlike testing whether a corner of one box lies inside
    /// the other, this also catches boxes that cross face-first with no
    /// corner inside each other.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        let (a_lo, a_hi) = (self.min(), self.max());
        let (b_lo, b_hi) = (other.min(), other.max());
        a_lo.x <= b_hi.x
            && b_lo.x <= a_hi.x
            && a_lo.y <= b_hi.y
            && b_lo.y <= a_hi.y
            && a_lo.z <= b_hi.z
            && b_lo.z <= a_hi.z
    }

    /// Whether this box rests on `support`: its horizontal center lies over
    /// the support's footprint and its bottom is not above the support's top.
    pub fn is_standing_on(&self, support: &BoundingBox) -> bool {
        support.contains_ignore_y(self.center.position()) && self.min_y() <= support.max_y()
    }

    /// Per-axis distance one box has to move to stop overlapping the other.
    /// Negative components mean the boxes are apart on that axis.
    pub fn penetration(&self, other: &BoundingBox) -> DVec3 {
        (self.max() - other.min()).min(other.max() - self.min())
    }

    /// The axis the two boxes touch along: the one with the shallowest
    /// penetration. Ties go to the earlier axis in X, Y, Z order.
    pub fn contact_axis(&self, other: &BoundingBox) -> Axis {
        let depth = self.penetration(other);
        Axis::ALL
            .into_iter()
            .fold(Axis::X, |best, axis| {
                if axis.of(depth) < best.of(depth) { axis } else { best }
            })
    }

    pub fn translated(&self, displacement: Vector) -> Self {
        Self {
            center: self.center.plus_vector(displacement),
            extents: self.extents,
        }
    }
}
