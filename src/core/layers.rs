use crate::error::InitError;

use vulkanalia::prelude::v1_0::*;
use anyhow::Result;
use log::*;

/// The single meta-layer bundling every validation check.
pub const PREFERRED_VALIDATION_LAYERS: &[vk::ExtensionName] = &[
    vk::ExtensionName::from_bytes(b"VK_LAYER_LUNARG_standard_validation"),
];

/// Older loaders ship the checks as separate per-feature layers,
/// all of which have to be present.
pub const LEGACY_VALIDATION_LAYERS: &[vk::ExtensionName] = &[
    vk::ExtensionName::from_bytes(b"VK_LAYER_GOOGLE_threading"),
    vk::ExtensionName::from_bytes(b"VK_LAYER_LUNARG_parameter_validation"),
    vk::ExtensionName::from_bytes(b"VK_LAYER_LUNARG_object_tracker"),
    vk::ExtensionName::from_bytes(b"VK_LAYER_LUNARG_image"),
    vk::ExtensionName::from_bytes(b"VK_LAYER_LUNARG_core_validation"),
    vk::ExtensionName::from_bytes(b"VK_LAYER_LUNARG_swapchain"),
    vk::ExtensionName::from_bytes(b"VK_LAYER_GOOGLE_unique_objects"),
];

/// Validation layer sets, in order of preference.
pub const VALIDATION_LAYER_SETS: &[&[vk::ExtensionName]] = &[
    PREFERRED_VALIDATION_LAYERS,
    LEGACY_VALIDATION_LAYERS,
];

/// Returns the first name of `required` that is not in
/// `available`, if any.
pub fn find_missing_layer<'a>(
    required: &'a [vk::ExtensionName],
    available: &[vk::ExtensionName],
) -> Option<&'a vk::ExtensionName> {
    required.iter().find(|name| !available.contains(name))
}

/// Picks the first validation layer set whose layers are all
/// available.
pub fn select_validation_layers(
    available: &[vk::ExtensionName],
) -> Result<Vec<vk::ExtensionName>, InitError> {
    for set in VALIDATION_LAYER_SETS {
        match find_missing_layer(set, available) {
            Some(missing) => warn!("Cannot find layer: {}", missing),
            None => return Ok(set.to_vec()),
        }
    }

    Err(InitError::MissingValidationLayers)
}

/// Queries the loader for its instance layers and selects the
/// validation layers to enable.
pub unsafe fn get_validation_layers(entry: &Entry) -> Result<Vec<vk::ExtensionName>> {
    // Validation layers are optional components hooking into
    // the Vulkan calls to check for misuse of the API. They are
    // provided by the loader installation (the SDK, usually),
    // so we first list what the loader can offer...
    let available = entry
        .enumerate_instance_layer_properties()
        .map_err(InitError::driver("vkEnumerateInstanceLayerProperties"))?
        .iter()
        .map(|l| l.layer_name)
        .collect::<Vec<_>>();

    debug!("{} instance layers available.", available.len());

    // ...then settle on the first complete set we know about.
    // Without any of them we refuse to go on, since validation
    // was explicitly asked for.
    let layers = select_validation_layers(&available)?;
    for layer in &layers {
        info!("Enabling validation layer {}.", layer);
    }

    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&[u8]]) -> Vec<vk::ExtensionName> {
        list.iter().map(|n| vk::ExtensionName::from_bytes(n)).collect()
    }

    #[test]
    fn preferred_layer_wins_when_present() {
        let mut available = LEGACY_VALIDATION_LAYERS.to_vec();
        available.push(PREFERRED_VALIDATION_LAYERS[0]);

        let layers = select_validation_layers(&available).unwrap();
        assert_eq!(layers, PREFERRED_VALIDATION_LAYERS);
    }

    #[test]
    fn legacy_set_is_used_as_fallback() {
        let mut available = names(&[b"VK_LAYER_KHRONOS_validation"]);
        available.extend_from_slice(LEGACY_VALIDATION_LAYERS);

        let layers = select_validation_layers(&available).unwrap();
        assert_eq!(layers, LEGACY_VALIDATION_LAYERS);
        assert_eq!(layers.len(), 7);
    }

    #[test]
    fn partial_legacy_set_is_not_enough() {
        let available = &LEGACY_VALIDATION_LAYERS[..6];
        assert!(matches!(
            select_validation_layers(available),
            Err(InitError::MissingValidationLayers)
        ));
    }

    #[test]
    fn no_layers_at_all_fails() {
        assert!(matches!(
            select_validation_layers(&[]),
            Err(InitError::MissingValidationLayers)
        ));
    }

    #[test]
    fn missing_layer_is_the_first_absent_one() {
        let available = names(&[b"VK_LAYER_GOOGLE_threading", b"VK_LAYER_LUNARG_image"]);
        let missing = find_missing_layer(LEGACY_VALIDATION_LAYERS, &available);
        assert_eq!(missing, Some(&LEGACY_VALIDATION_LAYERS[1]));
    }

    #[test]
    fn names_match_exactly() {
        let available = names(&[b"VK_LAYER_LUNARG_standard_validation_v2"]);
        assert!(find_missing_layer(PREFERRED_VALIDATION_LAYERS, &available).is_some());
    }
}
