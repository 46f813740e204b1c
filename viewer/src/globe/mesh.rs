use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct SphereVertex {
    pub pos_unit: [f32; 3],
    pub uv: [f32; 2],
}

pub struct SphereMesh {
    pub vertex_buf: wgpu::Buffer,
    pub index_buf: wgpu::Buffer,
    pub index_count: u32,
}

/// Build a unit-radius UV sphere with equirectangular texture coordinates.
/// The display radius is applied per-level in the shader, so subdivision
/// changes never rebuild this mesh.
pub fn build_sphere_mesh(device: &wgpu::Device, rings: u32, segments: u32) -> SphereMesh {
    let mut verts: Vec<SphereVertex> = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let theta = v * std::f32::consts::PI;
        let (sin_t, cos_t) = theta.sin_cos();
        for seg in 0..=segments {
            let u = seg as f32 / segments as f32;
            let phi = u * std::f32::consts::TAU;
            let (sin_p, cos_p) = phi.sin_cos();
            verts.push(SphereVertex {
                pos_unit: [sin_t * cos_p, cos_t, sin_t * sin_p],
                uv: [1.0 - u, v],
            });
        }
    }

    let stride = segments + 1;
    let mut indices: Vec<u32> = Vec::with_capacity((rings * segments * 6) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            // Two triangles per quad; the polar rows degenerate harmlessly.
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("globe vertices"),
        contents: bytemuck::cast_slice(&verts),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("globe indices"),
        contents: bytemuck::cast_slice(&indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    SphereMesh { vertex_buf, index_buf, index_count: indices.len() as u32 }
}
