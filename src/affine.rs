//! Conversions between volume spaces and `nalgebra` affine matrices.
//!
//! Only available with the `nalgebra_affine` feature.

use crate::space::VolumeSpace;
use nalgebra::{Matrix3, Matrix4, Scalar, Vector3};

/// 3x3 affine (rotation, scale and shear) of a volume.
pub type Affine3 = Matrix3<f32>;
/// 4x4 voxel-to-world affine of a volume.
pub type Affine4 = Matrix4<f32>;

/// Separate a 4x4 affine into its 3x3 affine and translation components.
pub fn get_affine_and_translation<T: Scalar>(affine: &Matrix4<T>) -> (Matrix3<T>, Vector3<T>) {
    let translation = Vector3::<T>::new(
        affine[12].clone(),
        affine[13].clone(),
        affine[14].clone(),
    );
    let affine = affine.fixed_view::<3, 3>(0, 0).into_owned();
    (affine, translation)
}

impl VolumeSpace {
    /// Create a volume space from its dimensions and a 4x4 voxel-to-world
    /// affine. The last row of the affine is ignored.
    pub fn from_affine(dims: [i64; 3], affine: &Affine4) -> Self {
        let (linear, translation) = get_affine_and_translation(affine);
        let mut sform = [[0.0; 4]; 3];
        for (r, row) in sform.iter_mut().enumerate() {
            for (c, value) in row[..3].iter_mut().enumerate() {
                *value = linear[(r, c)];
            }
            row[3] = translation[r];
        }
        VolumeSpace::new(dims, sform)
    }

    /// The 4x4 voxel-to-world affine of this space.
    #[rustfmt::skip]
    pub fn affine(&self) -> Affine4 {
        let [x, y, z] = self.sform;
        Affine4::new(
            x[0], x[1], x[2], x[3],
            y[0], y[1], y[2], y[3],
            z[0], z[1], z[2], z[3],
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{get_affine_and_translation, Affine3, Affine4};
    use crate::space::VolumeSpace;
    use nalgebra::Vector3;

    #[test]
    #[rustfmt::skip]
    fn split_affine() {
        let affine = Affine4::new(
            2.0, 0.0, 0.0, -90.0,
            0.0, 3.0, 0.0, -126.0,
            0.0, 0.0, 4.0, -72.0,
            0.0, 0.0, 0.0, 1.0,
        );
        let (linear, translation) = get_affine_and_translation(&affine);
        assert_eq!(linear, Affine3::from_diagonal(&Vector3::new(2.0, 3.0, 4.0)));
        assert_eq!(translation, Vector3::new(-90.0, -126.0, -72.0));

        let space = VolumeSpace::from_affine([10, 10, 10], &affine);
        assert_eq!(space.sform[1], [0.0, 3.0, 0.0, -126.0]);
        assert_eq!(space.affine(), affine);
    }

    #[test]
    #[rustfmt::skip]
    fn from_affine_ignores_last_row() {
        let affine = Affine4::new(
            -1.5, 0.0,  0.0, 30.0,
             0.0, 2.0,  0.0, -8.5,
             0.0, 0.0,  3.0,  4.0,
             7.0, 7.0,  7.0,  7.0,
        );
        let space = VolumeSpace::from_affine([4, 5, 6], &affine);
        assert_eq!(space.sform, [
            [-1.5, 0.0, 0.0, 30.0],
            [ 0.0, 2.0, 0.0, -8.5],
            [ 0.0, 0.0, 3.0,  4.0],
        ]);
        let geometry = space.plumb().unwrap();
        assert_eq!(geometry.center_origin(), [30.0, -8.5, 4.0]);
        assert_eq!(geometry.spacing(), [-1.5, 2.0, 3.0]);
    }
}
