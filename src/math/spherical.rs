use glam::DVec3;
use std::ops::{Add, Mul, Sub};

/// Spherical coordinates relative to an explicit origin.
///
/// `azimuth` is measured in the XY plane from +X, `polar` from +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoord {
    pub radius: f64,
    pub azimuth: f64,
    pub polar: f64,
}

impl SphericalCoord {
    pub const fn new(radius: f64, azimuth: f64, polar: f64) -> Self {
        Self { radius, azimuth, polar }
    }
}

impl Add for SphericalCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.radius + rhs.radius, self.azimuth + rhs.azimuth, self.polar + rhs.polar)
    }
}

impl Sub for SphericalCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.radius - rhs.radius, self.azimuth - rhs.azimuth, self.polar - rhs.polar)
    }
}

impl Mul<f64> for SphericalCoord {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.radius * rhs, self.azimuth * rhs, self.polar * rhs)
    }
}

/// Cartesian position to spherical coordinates around `origin`.
///
/// Not guarded: a zero radius or a point on the polar axis yields NaN.
/// The azimuth sign flips at `y == 0`, where `y >= 0` maps into `[0, π]`.
pub fn to_spherical(pos: DVec3, origin: DVec3) -> SphericalCoord {
    let d = pos - origin;
    let radius = d.length();
    let polar = (d.z / radius).acos();
    let sign = if d.y < 0.0 { -1.0 } else { 1.0 };
    let azimuth = sign * (d.x / (d.x * d.x + d.y * d.y).sqrt()).acos();
    SphericalCoord::new(radius, azimuth, polar)
}

/// Inverse of [`to_spherical`]
pub fn from_spherical(coord: SphericalCoord, origin: DVec3) -> DVec3 {
    let (sin_polar, cos_polar) = coord.polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = coord.azimuth.sin_cos();
    origin
        + DVec3::new(
            coord.radius * sin_polar * cos_azimuth,
            coord.radius * sin_polar * sin_azimuth,
            coord.radius * cos_polar,
        )
}

/// Component-wise linear interpolation.
///
/// With `clamp_ratio` the ratio is clamped to `[0, 1]` first, which lets a
/// caller scale the ratio past 1 to finish a blend early.
pub fn lerp<T>(v0: T, v1: T, ratio: f64, clamp_ratio: bool) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    let ratio = if clamp_ratio { ratio.clamp(0.0, 1.0) } else { ratio };
    v0 + (v1 - v0) * ratio
}

/// Ease-in-ease-out profile mapping linear progress in `[0, 1]` onto `[0, 1]`
pub fn ease_in_out(progress: f64) -> f64 {
    (1.0 - (std::f64::consts::PI * progress).cos()) / 2.0
}
