use nalgebra::{Point3, Vector3};

use super::Ray;

/// Directions with a smaller component are treated as parallel to that slab
const PARALLEL_EPSILON: f32 = 1e-4;

/// Slack for points computed by marching, which may land a rounding error off the faces
const CONTAINS_EPSILON: f32 = 1e-4;

/// Axis aligned box
/// Faces belong to the box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

/// Where a ray enters a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the entry, never negative
    pub t_entry: f32,
    /// Ray parameter of the exit
    pub t_exit: f32,
    /// Point where marching starts, the ray origin if it is already inside
    pub entry: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    pub fn from_position_dims(position: Point3<f32>, dimensions: Vector3<f32>) -> BoundBox {
        BoundBox {
            lower: position,
            upper: position + dimensions,
        }
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn center(&self) -> Point3<f32> {
        self.lower + self.dims() * 0.5
    }

    /// Faces count as inside, with a small tolerance
    pub fn contains(&self, pos: &Point3<f32>) -> bool {
        (0..3).all(|axis| {
            pos[axis] >= self.lower[axis] - CONTAINS_EPSILON
                && pos[axis] <= self.upper[axis] + CONTAINS_EPSILON
        })
    }

    /// Slab test.
    ///
    /// Returns `None` if the ray misses the box or the box is behind the ray.
    /// Ray starting inside the box gets `t_entry == 0` and starts at its origin.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (low, high) = (self.lower[axis], self.upper[axis]);

            if dir.abs() > PARALLEL_EPSILON {
                let mut t0 = (low - origin) / dir;
                let mut t1 = (high - origin) / dir;
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }

                t_near = f32::max(t_near, t0);
                t_far = f32::min(t_far, t1);

                if t_near > t_far || t1 < 0.0 {
                    return None;
                }
            } else if origin < low || origin > high {
                // parallel to the slab and outside of it
                return None;
            }
        }

        // whole box is behind the origin
        if t_far < 0.0 {
            return None;
        }

        let t_entry = f32::max(t_near, 0.0);
        let entry = if t_entry == 0.0 {
            ray.origin
        } else {
            ray.point_from_t(t_entry)
        };

        Some(Intersection {
            t_entry,
            t_exit: t_far,
            entry,
        })
    }
}

#[cfg(test)]
mod test {

    use approx::assert_relative_eq;
    use nalgebra::{point, vector};

    use super::*;

    fn volume_box() -> BoundBox {
        // W = 10, H = 20, D = 30
        BoundBox::new(point![0.0, 0.0, 0.0], point![10.0, 20.0, 30.0])
    }

    #[test]
    fn entry_on_face() {
        let bbox = volume_box();
        let ray = Ray::new(point![-1.0, 10.0, 15.0], vector![1.0, 0.0, 0.0]);

        let int = bbox.intersect(&ray).expect("ray should hit");

        assert_relative_eq!(int.t_entry, 1.0);
        assert_relative_eq!(int.t_exit, 11.0);
        assert_eq!(int.entry, point![0.0, 10.0, 15.0]);
    }

    #[test]
    fn pointing_away() {
        let bbox = volume_box();
        let ray = Ray::new(point![-1.0, 10.0, 15.0], vector![-1.0, 0.0, 0.0]);

        assert!(bbox.intersect(&ray).is_none());
    }

    #[test]
    fn parallel_outside_slab() {
        let bbox = volume_box();
        // travels along x, but y is above the box
        let ray = Ray::new(point![-1.0, 25.0, 15.0], vector![1.0, 0.0, 0.0]);

        assert!(bbox.intersect(&ray).is_none());
    }

    #[test]
    fn missing_diagonal() {
        let bbox = volume_box();
        let ray = Ray::new(point![-5.0, 0.0, 40.0], vector![1.0, 0.0, 1.0]);

        assert!(bbox.intersect(&ray).is_none());
    }

    #[test]
    fn origin_inside() {
        let bbox = volume_box();
        let origin = point![5.0, 5.0, 5.0];
        let ray = Ray::new(origin, vector![0.0, 1.0, 1.0]);

        let int = bbox.intersect(&ray).expect("ray should hit");

        assert_eq!(int.t_entry, 0.0);
        assert_eq!(int.entry, origin);
        assert!(int.t_exit > 0.0);
    }

    #[test]
    fn box_behind_origin() {
        let bbox = volume_box();
        let ray = Ray::new(point![5.0, 10.0, 40.0], vector![0.0, 0.0, 1.0]);

        assert!(bbox.intersect(&ray).is_none());
    }

    #[test]
    fn contains_faces() {
        let bbox = volume_box();

        assert!(bbox.contains(&point![0.0, 0.0, 0.0]));
        assert!(bbox.contains(&point![10.0, 20.0, 30.0]));
        assert!(bbox.contains(&point![5.0, 20.0, 0.0]));
        assert!(!bbox.contains(&point![5.0, 20.1, 0.0]));
        assert!(!bbox.contains(&point![-0.1, 1.0, 1.0]));
    }

    #[test]
    fn center_and_dims() {
        let bbox = BoundBox::from_position_dims(point![1.0, 1.0, 1.0], vector![2.0, 4.0, 6.0]);

        assert_eq!(bbox.dims(), vector![2.0, 4.0, 6.0]);
        assert_eq!(bbox.center(), point![2.0, 3.0, 4.0]);
    }
}
