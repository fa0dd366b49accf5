use nalgebra::{Point3, Vector3};

/// Ray cast from the image plane.
/// Main usecase is getting the entry point into the volume ([`super::BoundBox::intersect`]),
/// then marching from it in steps.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Construct new ray using `origin` and `direction`.
    /// `direction` gets normalized.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Returns point `t` units far from ray origin in ray direction
    pub fn point_from_t(&self, t: f32) -> Point3<f32> {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;

    #[test]
    fn direction_normalized() {
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 3.0, 4.0]);
        assert_eq!(ray.direction, vector![0.0, 0.6, 0.8]);
        assert_eq!(ray.point_from_t(5.0), point![0.0, 3.0, 4.0]);
    }
}
