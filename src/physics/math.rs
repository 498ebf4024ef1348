//! Scalar and vector types shared by the physics core

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities and accelerations
pub type Vector = bevy::math::DVec2;

/// Square root through `libm` so results match bit for bit across targets
#[inline]
pub fn sqrt(value: Scalar) -> Scalar {
    libm::sqrt(value)
}

/// Euclidean length computed with [`sqrt`]
#[inline]
pub fn length(vector: Vector) -> Scalar {
    sqrt(vector.length_squared())
}
