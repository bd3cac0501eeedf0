//! Vertex, index and per-instance buffers.

use std::marker::PhantomData;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// Static geometry: a vertex buffer with an optional index buffer.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<(wgpu::Buffer, wgpu::IndexFormat)>,
    /// Index count for indexed meshes, vertex count otherwise.
    pub element_count: u32,
}

impl MeshBuffer {
    /// Bind geometry at vertex slot 0 and draw `instances`.
    pub fn draw_instanced(&self, render_pass: &mut wgpu::RenderPass<'_>, instances: Range<u32>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some((buffer, format)) => {
                render_pass.set_index_buffer(buffer.slice(..), *format);
                render_pass.draw_indexed(0..self.element_count, 0, instances);
            }
            None => render_pass.draw(0..self.element_count, instances),
        }
    }
}

/// Index data that can be either u16 or u32 format.
pub enum IndexData<'a> {
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl IndexData<'_> {
    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            IndexData::U16(data) => data.len() as u32,
            IndexData::U32(data) => data.len() as u32,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexData::U16(data) => bytemuck::cast_slice(data),
            IndexData::U32(data) => bytemuck::cast_slice(data),
        }
    }
}

/// Creates static mesh buffers on one device.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Indexed triangle mesh.
    pub fn create_mesh<V: Pod>(&self, label: &str, vertices: &[V], indices: IndexData) -> MeshBuffer {
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}-indices")),
                contents: indices.as_bytes(),
                usage: wgpu::BufferUsages::INDEX,
            });

        MeshBuffer {
            vertex_buffer: self.create_vertex_buffer(label, vertices),
            index_buffer: Some((index_buffer, indices.format())),
            element_count: indices.count(),
        }
    }

    /// Non-indexed mesh, drawn in vertex order (line strips).
    pub fn create_strip<V: Pod>(&self, label: &str, vertices: &[V]) -> MeshBuffer {
        MeshBuffer {
            vertex_buffer: self.create_vertex_buffer(label, vertices),
            index_buffer: None,
            element_count: vertices.len() as u32,
        }
    }

    fn create_vertex_buffer<V: Pod>(&self, label: &str, vertices: &[V]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}-vertices")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
    }
}

/// Per-instance vertex buffer rewritten every frame. Grows to the next power
/// of two when a frame needs more room; never shrinks.
pub struct InstanceBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
    label: &'static str,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Self::allocate(device, label, capacity),
            capacity,
            len: 0,
            label,
            _marker: PhantomData,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<T>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the buffer contents with `instances`.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[T]) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::debug!("Grew {} to {} instances", self.label, self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
        self.len = instances.len() as u32;
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Position-only vertex, used for orbit rings.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPosition {
    pub position: [f32; 3],
}

impl VertexPosition {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<VertexPosition>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }],
    };
}

/// Position and normal, used for sphere meshes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexPositionNormal {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl VertexPositionNormal {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<VertexPositionNormal>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
        ],
    };
}
