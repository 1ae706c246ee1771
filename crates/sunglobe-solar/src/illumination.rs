//! Day/night illumination: sun direction, terminator blend, and the uniform
//! state handed to the globe material.
//!
//! The globe material receives two scalars, the effective sun angle in
//! radians and the sun latitude in degrees, and rebuilds the sun direction
//! per fragment. [`IlluminationState`] is the CPU-side mirror of those
//! uniforms; [`illumination_factor`] is the same blend the fragment stage
//! applies.

use bytemuck::{Pod, Zeroable};
use glam::DVec3;

use crate::position::{SunPosition, normalize_longitude};

/// Half width of the soft terminator band in units of `dot(normal, sun)`.
pub const TERMINATOR_HALF_WIDTH: f64 = 0.2;

/// Unit vector toward the sun for a latitude (degrees) and azimuthal angle
/// (radians).
///
/// `x = cos(lat)cos(angle)`, `y = sin(lat)`, `z = cos(lat)sin(angle)`.
pub fn sun_direction(latitude_deg: f64, angle_rad: f64) -> DVec3 {
    let lat = latitude_deg.to_radians();
    DVec3::new(
        lat.cos() * angle_rad.cos(),
        lat.sin(),
        lat.cos() * angle_rad.sin(),
    )
}

/// Sun longitude plus the globe's current yaw, in radians.
///
/// Keeps the terminator fixed in world space while the viewer spins the globe.
pub fn effective_sun_angle(sun_longitude_deg: f64, azimuth_rad: f64) -> f64 {
    sun_longitude_deg.to_radians() + azimuth_rad
}

/// Invert [`sun_direction`] with zero azimuth back into a sun position.
pub fn direction_to_sun_position(direction: DVec3) -> SunPosition {
    let latitude = direction.y.clamp(-1.0, 1.0).asin().to_degrees();
    let longitude = direction.z.atan2(direction.x).to_degrees();
    SunPosition {
        latitude,
        longitude: normalize_longitude(longitude),
    }
}

/// Cubic Hermite interpolation between `edge0` and `edge1`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Day/night blend factor for a surface normal: 0 = full night, 1 = full day.
///
/// Neither vector is normalized here; callers pass unit vectors.
pub fn illumination_factor(sun_direction: DVec3, surface_normal: DVec3) -> f64 {
    illumination_factor_with_band(sun_direction, surface_normal, TERMINATOR_HALF_WIDTH)
}

/// [`illumination_factor`] with a custom terminator half width.
pub fn illumination_factor_with_band(
    sun_direction: DVec3,
    surface_normal: DVec3,
    half_width: f64,
) -> f64 {
    let intensity = surface_normal.dot(sun_direction);
    smoothstep(-half_width, half_width, intensity)
}

/// Mix night and day colors by the illumination factor.
pub fn blend_day_night(night: DVec3, day: DVec3, factor: f64) -> DVec3 {
    night.lerp(day, factor)
}

/// The two material uniforms that drive the day/night shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IlluminationState {
    /// Effective sun angle in radians (sun longitude plus globe yaw).
    pub sun_angle: f64,
    /// Sun latitude in degrees.
    pub sun_latitude: f64,
}

impl IlluminationState {
    /// Combine a sun position with the globe's azimuthal rotation.
    pub fn from_sun(sun: SunPosition, azimuth_rad: f64) -> Self {
        Self {
            sun_angle: effective_sun_angle(sun.longitude, azimuth_rad),
            sun_latitude: sun.latitude,
        }
    }

    /// World-space unit vector toward the sun.
    pub fn sun_direction(&self) -> DVec3 {
        sun_direction(self.sun_latitude, self.sun_angle)
    }

    /// Blend factor for a world-space surface normal.
    pub fn illumination_at(&self, surface_normal: DVec3) -> f64 {
        illumination_factor(self.sun_direction(), surface_normal)
    }

    /// Build the GPU-side uniform.
    pub fn to_uniform(&self) -> IlluminationUniform {
        IlluminationUniform {
            sun_angle: self.sun_angle as f32,
            sun_latitude: self.sun_latitude as f32,
            _padding: [0.0; 2],
        }
    }
}

/// GPU-side representation, 16 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct IlluminationUniform {
    /// Effective sun angle in radians.
    pub sun_angle: f32,
    /// Sun latitude in degrees.
    pub sun_latitude: f32,
    _padding: [f32; 2],
}
