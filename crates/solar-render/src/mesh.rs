//! Procedural unit meshes. Instances scale them to each body's radius.

use std::f32::consts::{PI, TAU};

use crate::buffer::{VertexPosition, VertexPositionNormal};

/// Unit sphere with its poles on the Z axis, the axis bodies spin about.
///
/// `slices` divide the equator and `stacks` divide pole to pole. Each ring
/// repeats its first vertex at the seam. Triangles wind counter-clockwise seen
/// from outside.
pub fn uv_sphere(slices: u32, stacks: u32) -> (Vec<VertexPositionNormal>, Vec<u32>) {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let ring = slices + 1;

    let mut vertices = Vec::with_capacity((ring * (stacks + 1)) as usize);
    for stack in 0..=stacks {
        let phi = PI * stack as f32 / stacks as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();
        for slice in 0..=slices {
            let theta = TAU * slice as f32 / slices as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            let p = [sin_phi * cos_theta, sin_phi * sin_theta, cos_phi];
            vertices.push(VertexPositionNormal {
                position: p,
                normal: p,
            });
        }
    }

    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = stack * ring + slice;
            let b = a + ring;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    (vertices, indices)
}

/// Unit circle in the XY plane as a closed line strip: `segments + 1`
/// vertices, the last repeating the first. Empty for zero segments.
pub fn orbit_circle(segments: u32) -> Vec<VertexPosition> {
    if segments == 0 {
        return Vec::new();
    }
    (0..=segments)
        .map(|i| {
            let angle = TAU * (i % segments) as f32 / segments as f32;
            VertexPosition {
                position: [angle.cos(), angle.sin(), 0.0],
            }
        })
        .collect()
}
