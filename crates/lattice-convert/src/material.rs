//! Material mapper between native materials and portable records

use std::sync::Arc;

use lattice_core::{Color, PackedColor};
use lattice_mesh::RenderMaterial;
use lattice_native::{
    NativeMaterial, ShaderRegistry, STANDARD_SHADER, SUPPORTED_SHADERS, TRANSPARENT_SHADER,
};
use tracing::warn;
use uuid::Uuid;

use crate::import::{sanitize_file_name, Importer};

/// Map a native material to a portable render material record.
///
/// Transparent-family shaders keep their opacity in the diffuse alpha
/// channel, so it is moved into the record's `opacity` and the exported
/// diffuse is forced opaque. Unknown shaders still convert, with a warning.
pub fn material_to_portable(material: &NativeMaterial) -> RenderMaterial {
    let shader_name = material.shader.name();
    if !SUPPORTED_SHADERS.contains(&shader_name) {
        warn!(
            "Shader \"{}\" is not explicitly supported, the converted material may be incorrect",
            shader_name
        );
    }

    let mut color = material.color;
    let mut opacity = 1.0;
    if shader_name.to_lowercase().contains("transparent") {
        opacity = f64::from(color.a);
        color = color.with_alpha(1.0);
    }

    let emissive = if material.emission_enabled {
        PackedColor::from(material.emission)
    } else {
        PackedColor::OPAQUE_BLACK
    };

    let name = if material.name.trim().is_empty() {
        let id = Uuid::new_v4().simple().to_string();
        format!("material-{}", &id[..8])
    } else {
        material.name.replace("(Instance)", "").trim_end().to_string()
    };

    RenderMaterial {
        id: Uuid::new_v4().simple().to_string(),
        name,
        diffuse: PackedColor::from(color),
        opacity,
        metalness: material.metallic.map_or(0.0, f64::from),
        roughness: material.glossiness.map_or(1.0, |glossiness| 1.0 - f64::from(glossiness)),
        emissive,
    }
}

/// Cache key for a material record: the name with path separators replaced,
/// or an id-derived fallback when the name is blank
pub(crate) fn material_cache_key(record: &RenderMaterial) -> String {
    if record.name.trim().is_empty() {
        format!("material-{}", record.id)
    } else {
        record.name.replace('/', "-")
    }
}

impl<S: ShaderRegistry> Importer<'_, S> {
    /// Map a portable record to a native material, reusing cached instances
    /// by name key.
    ///
    /// `None` yields a fresh default standard material that deliberately
    /// stays out of the cache, so meshes without a material never share one.
    pub fn material_to_native(&mut self, record: Option<&RenderMaterial>) -> Arc<NativeMaterial> {
        let Some(record) = record else {
            let shader = self.shaders.find(STANDARD_SHADER);
            return Arc::new(NativeMaterial::new(STANDARD_SHADER, shader));
        };

        let key = material_cache_key(record);
        if let Some(cached) = self.cache.material(&key) {
            return cached;
        }

        let shader = if record.is_transparent() {
            self.shaders.find(TRANSPARENT_SHADER)
        } else {
            self.shaders.find(STANDARD_SHADER)
        };

        let material = NativeMaterial {
            name: key.clone(),
            shader,
            color: Color::from(record.diffuse).with_alpha(record.opacity as f32),
            metallic: Some(record.metalness as f32),
            glossiness: Some(1.0 - record.roughness as f32),
            emission: Color::from(record.emissive),
            emission_enabled: record.is_emissive(),
        };

        if let Some(sink) = self.sink.as_deref_mut() {
            sink.persist_material(&material, &sanitize_file_name(&key));
        }

        let material = Arc::new(material);
        self.cache.insert_material(key, material.clone());
        material
    }
}
