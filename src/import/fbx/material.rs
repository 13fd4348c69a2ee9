//! Material resolution and session caching.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use super::graph::MaterialRecord;
use crate::import::error::ImportError;
use crate::scene::{Material, TextureRef};

/// Specular power value the native SDK uses to mean "not defined"
const SPECULAR_POWER_ABSENT: f64 = -1.0;

/// Resolves material records into shared [`Material`] instances.
///
/// One resolver lives for exactly one import session. The first time a
/// material name is seen its properties are converted and cached; every
/// later node with the same name gets the same shared instance without any
/// property work being repeated.
pub(crate) struct MaterialResolver {
    cache: HashMap<String, Arc<Material>>,
}

impl MaterialResolver {
    pub(crate) fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Resolves a record to its shared material, constructing it on first use
    pub(crate) fn resolve(&mut self, record: &MaterialRecord) -> Result<Arc<Material>, ImportError> {
        if let Some(material) = self.cache.get(&record.name) {
            return Ok(Arc::clone(material));
        }

        debug!("building material [{}]", record.name);
        let material = Arc::new(build_material(record)?);
        self.cache.insert(record.name.clone(), Arc::clone(&material));
        Ok(material)
    }

    /// Hands the session cache over to the scene root
    pub(crate) fn into_cache(self) -> HashMap<String, Arc<Material>> {
        self.cache
    }
}

fn build_material(record: &MaterialRecord) -> Result<Material, ImportError> {
    let mut material = Material::named(&record.name);

    // Each property is independently optional; absent ones stay absent.
    material.diffuse_color = record.diffuse.map(opaque_color);
    material.specular_color = record.specular.map(opaque_color);
    if record.specular_power != SPECULAR_POWER_ABSENT {
        material.specular_power = Some(record.specular_power as f32);
    }

    material.diffuse_map = texture_ref(&record.diffuse_map)?;
    material.specular_map = texture_ref(&record.specular_map)?;
    material.bump_map = texture_ref(&record.bump_map)?;
    material.self_illumination_map = texture_ref(&record.self_illumination_map)?;

    Ok(material)
}

/// Drops the source opacity channel. Transparency does not render usefully
/// downstream, so alpha is pinned to 1.
fn opaque_color(rgbo: [f64; 4]) -> [f32; 4] {
    [rgbo[0] as f32, rgbo[1] as f32, rgbo[2] as f32, 1.0]
}

fn texture_ref(path: &Option<String>) -> Result<Option<TextureRef>, ImportError> {
    match path {
        None => Ok(None),
        Some(raw) => match TextureRef::from_map_path(raw) {
            Some(texture) => Ok(Some(texture)),
            None => Err(ImportError::InvalidTexturePath { path: raw.clone() }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> MaterialRecord {
        MaterialRecord {
            name: name.to_string(),
            diffuse: None,
            specular: None,
            specular_power: SPECULAR_POWER_ABSENT,
            diffuse_map: None,
            specular_map: None,
            bump_map: None,
            self_illumination_map: None,
        }
    }

    #[test]
    fn test_same_name_resolves_to_shared_instance() {
        let mut resolver = MaterialResolver::new();
        let first = resolver.resolve(&record("Red")).unwrap();
        let second = resolver.resolve(&record("Red")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.into_cache().len(), 1);
    }

    #[test]
    fn test_cache_hit_ignores_differing_record() {
        // Once a name is cached, later records under that name are not
        // re-read; the first definition wins for the session.
        let mut resolver = MaterialResolver::new();
        let first = resolver.resolve(&record("Red")).unwrap();
        let mut altered = record("Red");
        altered.diffuse = Some([1.0, 0.0, 0.0, 0.5]);
        let second = resolver.resolve(&altered).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(second.diffuse_color.is_none());
    }

    #[test]
    fn test_alpha_forced_opaque() {
        let mut r = record("Glass");
        r.diffuse = Some([0.2, 0.4, 0.6, 0.1]);
        r.specular = Some([1.0, 1.0, 1.0, 0.0]);
        let mut resolver = MaterialResolver::new();
        let material = resolver.resolve(&r).unwrap();
        assert_eq!(material.diffuse_color, Some([0.2, 0.4, 0.6, 1.0]));
        assert_eq!(material.specular_color, Some([1.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_specular_power_sentinel() {
        let mut resolver = MaterialResolver::new();
        assert!(resolver.resolve(&record("Dull")).unwrap().specular_power.is_none());

        let mut shiny = record("Shiny");
        shiny.specular_power = 64.0;
        assert_eq!(resolver.resolve(&shiny).unwrap().specular_power, Some(64.0));

        // Zero is a defined power, not an absent one
        let mut flat = record("Flat");
        flat.specular_power = 0.0;
        assert_eq!(resolver.resolve(&flat).unwrap().specular_power, Some(0.0));
    }

    #[test]
    fn test_texture_maps_resolved_independently() {
        let mut r = record("Wood");
        r.diffuse_map = Some("/textures/wood_diffuse.png".to_string());
        r.bump_map = Some("/textures/wood_bump.png".to_string());
        let mut resolver = MaterialResolver::new();
        let material = resolver.resolve(&r).unwrap();
        assert!(material.diffuse_map.is_some());
        assert!(material.bump_map.is_some());
        assert!(material.specular_map.is_none());
        assert!(material.self_illumination_map.is_none());
    }

    #[test]
    fn test_unusable_map_path_is_fatal() {
        let mut r = record("Broken");
        r.specular_map = Some(String::new());
        let mut resolver = MaterialResolver::new();
        let err = resolver.resolve(&r).unwrap_err();
        assert!(matches!(err, ImportError::InvalidTexturePath { .. }));
    }
}
