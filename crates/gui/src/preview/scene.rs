//! Scene description for the product preview: one box, three lights.

use glam::{Mat4, Vec3};

use crate::state::form::BlockDimensions;
use crate::viewport::mesh::{self, MeshData};

/// Uniform light from every direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Parallel light shining from `position` towards the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Unit vector pointing from the scene towards the light
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

/// Box sizes along X, Y and Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl BoxGeometry {
    /// Order length runs along X, height along Y, width along Z
    pub fn from_block(dims: &BlockDimensions) -> Self {
        Self {
            width: dims.length,
            height: dims.height,
            depth: dims.width,
        }
    }
}

/// Brushed aluminum look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMaterial {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for BlockMaterial {
    fn default() -> Self {
        Self {
            color: mesh::rgb(0xc0c0c0),
            roughness: 0.25,
            metalness: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewScene {
    pub background: [f32; 3],
    pub ambient: AmbientLight,
    pub key_light: DirectionalLight,
    pub fill_light: DirectionalLight,
    pub geometry: BoxGeometry,
    pub material: BlockMaterial,
    /// Block rotation around Y (radians)
    pub rotation_y: f32,
}

impl PreviewScene {
    pub fn for_block(dims: &BlockDimensions, background: [u8; 3]) -> Self {
        let white = [1.0, 1.0, 1.0];
        Self {
            background: background.map(|c| c as f32 / 255.0),
            ambient: AmbientLight {
                color: white,
                intensity: 0.5,
            },
            key_light: DirectionalLight {
                color: white,
                intensity: 0.8,
                position: Vec3::new(5.0, 5.0, 5.0),
            },
            fill_light: DirectionalLight {
                color: white,
                intensity: 0.4,
                position: Vec3::new(-5.0, 3.0, -5.0),
            },
            geometry: BoxGeometry::from_block(dims),
            material: BlockMaterial::default(),
            rotation_y: 0.0,
        }
    }

    /// Triangle mesh for the block
    pub fn mesh(&self) -> MeshData {
        mesh::cuboid(
            self.geometry.width as f32,
            self.geometry.height as f32,
            self.geometry.depth as f32,
            self.material.color,
        )
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}
