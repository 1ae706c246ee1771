//! CPU-side mirror of the globe's day/night material.
//!
//! Holds the texture references and the two sun uniforms. The tracker
//! writes new uniforms through [`IlluminationSink`]; the renderer reads
//! them back with [`GlobeMaterial::uniform`].

use glam::DVec3;
use sunglobe_config::{GlobeConfig, SunConfig};
use sunglobe_solar::{
    IlluminationSink, IlluminationState, IlluminationUniform, blend_day_night,
    illumination_factor_with_band,
};

/// Surface textures blended by the terminator.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobeTextures {
    /// Daytime imagery.
    pub day: String,
    /// Night lights.
    pub night: String,
    /// Relief bump map.
    pub bump: String,
}

/// The globe material's sun uniforms and textures.
#[derive(Clone, Debug)]
pub struct GlobeMaterial {
    textures: GlobeTextures,
    terminator_half_width: f64,
    state: IlluminationState,
    revision: u64,
}

impl GlobeMaterial {
    /// Create a material with the sun at the origin of both uniforms.
    pub fn new(globe: &GlobeConfig, sun: &SunConfig) -> Self {
        Self {
            textures: GlobeTextures {
                day: globe.day_texture_url.clone(),
                night: globe.night_texture_url.clone(),
                bump: globe.bump_texture_url.clone(),
            },
            terminator_half_width: sun.terminator_half_width,
            state: IlluminationState {
                sun_angle: 0.0,
                sun_latitude: 0.0,
            },
            revision: 0,
        }
    }

    /// Current sun uniforms.
    pub fn state(&self) -> IlluminationState {
        self.state
    }

    /// Uniform buffer contents.
    pub fn uniform(&self) -> IlluminationUniform {
        self.state.to_uniform()
    }

    /// Number of uniform writes so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Texture references.
    pub fn textures(&self) -> &GlobeTextures {
        &self.textures
    }

    /// Day/night factor for a world-space surface normal.
    pub fn illumination_at(&self, surface_normal: DVec3) -> f64 {
        illumination_factor_with_band(
            self.state.sun_direction(),
            surface_normal,
            self.terminator_half_width,
        )
    }

    /// Color a surface sample the way the fragment stage does.
    pub fn shade(&self, surface_normal: DVec3, day: DVec3, night: DVec3) -> DVec3 {
        blend_day_night(night, day, self.illumination_at(surface_normal))
    }
}

impl IlluminationSink for GlobeMaterial {
    fn apply(&mut self, state: IlluminationState) {
        self.state = state;
        self.revision += 1;
    }
}
