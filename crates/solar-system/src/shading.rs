//! Surface and light descriptions for the three body variants.
//!
//! The values mirror classic fixed-function lighting: a material is a set of
//! ambient, diffuse and specular reflectance coefficients plus an emissive
//! color and a shininess exponent; a point light carries a homogeneous
//! position and three intensity terms.

/// Reflectance coefficients shared by every lit body.
///
/// The emissive term is not stored here: it always equals the body's own
/// color and is filled in by [`Material::with_emission`] at draw time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// Specular exponent. Higher is glossier.
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.0, 0.0, 0.5, 1.0],
            diffuse: [0.0, 0.0, 0.5, 1.0],
            specular: [0.0, 0.0, 1.0, 1.0],
            shininess: 90.0,
        }
    }
}

impl Material {
    /// Resolve the full material state for a body of the given color.
    pub fn with_emission(&self, emission: [f32; 4]) -> MaterialParams {
        MaterialParams {
            ambient: self.ambient,
            diffuse: self.diffuse,
            specular: self.specular,
            emission,
            shininess: self.shininess,
        }
    }
}

/// Fully resolved material state, as configured right before a sphere draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialParams {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    pub shininess: f32,
}

/// The single positional light of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    /// Homogeneous world position. `w == 0` would make the light directional.
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0, 1.0],
            ambient: [0.0, 0.0, 0.0, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl PointLight {
    /// True when the light sits at a finite position rather than at infinity.
    pub fn is_positional(&self) -> bool {
        self.position[3] != 0.0
    }
}

/// Capability tier of a body. Each tier draws everything the previous one
/// does, after its own setup step.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum BodyKind {
    /// Orbit ring plus a flat-colored sphere.
    #[default]
    Plain,
    /// Configures a reflectance material before the plain draw.
    Material(Material),
    /// Configures the scene light, then draws as a material body.
    LightEmitting { material: Material, light: PointLight },
}

impl BodyKind {
    /// A material body with the standard coefficients.
    pub fn lit() -> Self {
        Self::Material(Material::default())
    }

    /// A light-emitting body with the standard material and light.
    pub fn radiant() -> Self {
        Self::LightEmitting {
            material: Material::default(),
            light: PointLight::default(),
        }
    }

    /// The material this tier configures, if any.
    pub fn material(&self) -> Option<&Material> {
        match self {
            Self::Plain => None,
            Self::Material(material) | Self::LightEmitting { material, .. } => Some(material),
        }
    }

    /// The light this tier configures, if any.
    pub fn light(&self) -> Option<&PointLight> {
        match self {
            Self::LightEmitting { light, .. } => Some(light),
            _ => None,
        }
    }
}
