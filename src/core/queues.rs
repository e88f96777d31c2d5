use crate::error::InitError;

use vulkanalia::prelude::v1_0::*;
use anyhow::Result;
use log::*;

/// Queue families exposed by a physical device.
#[derive(Clone, Debug, Default)]
pub struct QueueFamilies {
    pub properties: Vec<vk::QueueFamilyProperties>,
}

impl QueueFamilies {
    pub fn new(properties: Vec<vk::QueueFamilyProperties>) -> Result<Self, InitError> {
        if properties.is_empty() {
            return Err(InitError::NoQueueFamilies);
        }

        Ok(Self { properties })
    }

    pub unsafe fn get(
        instance: &Instance,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Self> {
        // Almost every operation in Vulkan requires commands to
        // be submitted to a queue. Queues originate from
        // different families, and each family only allows a
        // subset of commands (graphics, compute, transfer...).
        // Nothing is submitted yet, so the list is only kept
        // around for when logical devices get created.
        let families = Self::new(
            instance.get_physical_device_queue_family_properties(physical_device),
        )?;

        for (index, family) in families.properties.iter().enumerate() {
            debug!(
                "Queue family {}: {} queue(s), {:?}.",
                index, family.queue_count, family.queue_flags,
            );
        }

        Ok(families)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Index of the first family supporting graphics operations.
    pub fn graphics_index(&self) -> Option<u32> {
        self.properties
            .iter()
            .position(|p| p.queue_flags.contains(vk::QueueFlags::GRAPHICS))
            .map(|i| i as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(flags: vk::QueueFlags) -> vk::QueueFamilyProperties {
        vk::QueueFamilyProperties {
            queue_flags: flags,
            queue_count: 1,
            ..Default::default()
        }
    }

    #[test]
    fn empty_family_list_is_rejected() {
        assert!(matches!(QueueFamilies::new(Vec::new()), Err(InitError::NoQueueFamilies)));
    }

    #[test]
    fn graphics_family_is_the_first_capable_one() {
        let families = QueueFamilies::new(vec![
            family(vk::QueueFlags::TRANSFER),
            family(vk::QueueFlags::COMPUTE | vk::QueueFlags::GRAPHICS),
            family(vk::QueueFlags::GRAPHICS),
        ])
        .unwrap();

        assert_eq!(families.len(), 3);
        assert_eq!(families.graphics_index(), Some(1));
    }

    #[test]
    fn compute_only_device_has_no_graphics_family() {
        let families = QueueFamilies::new(vec![family(vk::QueueFlags::COMPUTE)]).unwrap();
        assert_eq!(families.graphics_index(), None);
    }
}
