//! Point-light data structures.
//!
//! The light array is owned by application logic and handed to the culler
//! once per frame. It is order-stable: tile light lists store indices into
//! it, and the external shading pass resolves them against the same array.

use cgmath::Point3;
use static_assertions::const_assert_eq;

use crate::constants::MAX_LIGHTS;

/// One point light. `radius` is the world-space influence radius used by
/// the tile culler's sphere test.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub color: [f32; 3],
    pub radius: f32,
}

/// Bounded, order-stable set of at most [`MAX_LIGHTS`] lights. Pushes past
/// capacity are dropped silently; truncation is a soft limit, not an
/// error.
#[derive(Debug, Clone, Default)]
pub struct LightSet {
    lights: Vec<PointLight>,
}

impl LightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a light, keeping insertion order. Returns the light's index,
    /// or `None` when the set is already full.
    pub fn push(&mut self, light: PointLight) -> Option<usize> {
        if self.lights.len() >= MAX_LIGHTS {
            log::debug!("[Lights] Set full at {} lights, dropping push", MAX_LIGHTS);
            return None;
        }
        self.lights.push(light);
        Some(self.lights.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn get(&self, index: usize) -> Option<&PointLight> {
        self.lights.get(index)
    }

    pub fn as_slice(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Build the GPU uniform mirror. Unused slots stay zeroed.
    pub fn to_uniform(&self) -> LightsUniform {
        let mut uniform: LightsUniform = bytemuck::Zeroable::zeroed();
        uniform.num_lights = self.lights.len() as u32;
        for (slot, light) in uniform.lights.iter_mut().zip(&self.lights) {
            *slot = GpuLight::from(light);
        }
        uniform
    }
}

/// One light as the shading pass sees it
/// Must match shader layout exactly
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuLight {
    /// Position (xyz) and influence radius (w)
    pub position_radius: [f32; 4],

    /// Color (rgb), w unused
    pub color: [f32; 4],
}

impl From<&PointLight> for GpuLight {
    fn from(light: &PointLight) -> Self {
        Self {
            position_radius: [light.position.x, light.position.y, light.position.z, light.radius],
            color: [light.color[0], light.color[1], light.color[2], 0.0],
        }
    }
}

/// Uniform buffer mirror of the whole light array
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub num_lights: u32,
    pub _pad: [u32; 3],
    pub lights: [GpuLight; MAX_LIGHTS],
}

const_assert_eq!(std::mem::size_of::<GpuLight>(), 32);
const_assert_eq!(std::mem::size_of::<LightsUniform>(), 16 + 32 * MAX_LIGHTS);
