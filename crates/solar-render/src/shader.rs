//! The renderer's WGSL modules, compiled once per device.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::body_pipeline::BODY_SHADER_SOURCE;
use crate::ring_pipeline::RING_SHADER_SOURCE;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader '{name}' has not been compiled")]
    NotLoaded { name: &'static str },
}

/// The shaders the scene renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Ring,
    Body,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 2] = [ShaderKind::Ring, ShaderKind::Body];

    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Ring => "ring",
            ShaderKind::Body => "body",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            ShaderKind::Ring => RING_SHADER_SOURCE,
            ShaderKind::Body => BODY_SHADER_SOURCE,
        }
    }
}

#[derive(Default)]
pub struct ShaderLibrary {
    modules: HashMap<ShaderKind, Arc<wgpu::ShaderModule>>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library with every [`ShaderKind`] compiled.
    pub fn compile_all(device: &wgpu::Device) -> Self {
        let mut library = Self::new();
        for kind in ShaderKind::ALL {
            library.compile(device, kind);
        }
        library
    }

    /// Compile `kind`, replacing an earlier module. WGSL validation errors go
    /// to the device's uncaptured error handler.
    pub fn compile(&mut self, device: &wgpu::Device, kind: ShaderKind) -> Arc<wgpu::ShaderModule> {
        let module = Arc::new(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(kind.name()),
            source: wgpu::ShaderSource::Wgsl(kind.source().into()),
        }));
        log::debug!("Compiled {} shader", kind.name());
        self.modules.insert(kind, Arc::clone(&module));
        module
    }

    pub fn get(&self, kind: ShaderKind) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        self.modules
            .get(&kind)
            .cloned()
            .ok_or(ShaderError::NotLoaded { name: kind.name() })
    }

    pub fn contains(&self, kind: ShaderKind) -> bool {
        self.modules.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
