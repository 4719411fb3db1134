//! Rigid-body transforms applied to the coordinate columns of a structure file.

pub mod error;
pub mod rottrans;
pub mod xyz;

pub use error::TransformError;
pub use rottrans::{CoordinateStyle, RotTrans, rottrans, rottrans_from_matrix};
pub use xyz::{coordinate_fields, update_xyz, update_xyz_from_file};
