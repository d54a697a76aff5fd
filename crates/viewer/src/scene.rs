//! The displayed galaxy: at most one point-cloud object per family.

use engine_core::Transform;
use hecs::{Entity, World};
use procgen::{Family, PointBuffer};
use renderer::PointMaterial;
use std::collections::HashMap;

/// A generated point cloud installed in the scene.
#[derive(Debug)]
pub struct PointCloud {
    pub family: Family,
    /// Stable name, the same across replacements.
    pub name: &'static str,
    pub buffer: PointBuffer,
    pub material: PointMaterial,
    /// Increases every time any object is installed; a new value means new points.
    pub generation: u64,
}

/// Scene graph for the galaxy. Objects live in a `hecs::World` as
/// `(PointCloud, Transform)`; `slots` maps each family to its live entity.
pub struct GalaxyScene {
    world: World,
    slots: HashMap<Family, Entity>,
    next_generation: u64,
}

impl Default for GalaxyScene {
    fn default() -> Self {
        Self::new()
    }
}

impl GalaxyScene {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            slots: HashMap::new(),
            next_generation: 1,
        }
    }

    /// Install a new object for `family`, despawning the previous one first.
    /// Returns the new object's generation.
    pub fn replace(
        &mut self,
        family: Family,
        buffer: PointBuffer,
        material: PointMaterial,
        transform: Transform,
    ) -> u64 {
        self.remove(family);

        let generation = self.next_generation;
        self.next_generation += 1;
        let entity = self.world.spawn((
            PointCloud {
                family,
                name: family.name(),
                buffer,
                material,
                generation,
            },
            transform,
        ));
        self.slots.insert(family, entity);
        generation
    }

    /// Despawn `family`'s object. Returns whether one existed.
    pub fn remove(&mut self, family: Family) -> bool {
        match self.slots.remove(&family) {
            Some(entity) => {
                self.world.despawn(entity).ok();
                true
            }
            None => false,
        }
    }

    /// Borrow `family`'s object.
    pub fn get(&self, family: Family) -> Option<hecs::Ref<'_, PointCloud>> {
        let entity = *self.slots.get(&family)?;
        self.world.get::<&PointCloud>(entity).ok()
    }

    pub fn generation(&self, family: Family) -> Option<u64> {
        self.get(family).map(|cloud| cloud.generation)
    }

    /// Current transform of `family`'s object.
    pub fn transform(&self, family: Family) -> Option<Transform> {
        let entity = *self.slots.get(&family)?;
        self.world.get::<&Transform>(entity).ok().map(|t| *t)
    }

    /// Set the absolute Y rotation of `family`'s object, if present.
    pub fn set_rotation_y(&mut self, family: Family, angle: f32) {
        if let Some(&entity) = self.slots.get(&family) {
            if let Ok(mut transform) = self.world.get::<&mut Transform>(entity) {
                transform.set_rotation_y(angle);
            }
        }
    }

    /// Number of live objects of `family` in the world.
    pub fn count(&self, family: Family) -> usize {
        self.world
            .query::<&PointCloud>()
            .iter()
            .filter(|(_, cloud)| cloud.family == family)
            .count()
    }

    /// Total number of objects in the scene.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(points: usize) -> PointBuffer {
        PointBuffer {
            positions: vec![[0.0; 3]; points],
            colors: None,
        }
    }

    #[test]
    fn repeated_replacement_keeps_one_object_per_family() {
        let mut scene = GalaxyScene::new();
        for i in 0..10 {
            scene.replace(Family::Spiral, buffer(i), PointMaterial::default(), Transform::default());
        }
        scene.replace(Family::Core, buffer(3), PointMaterial::default(), Transform::default());

        assert_eq!(scene.count(Family::Spiral), 1);
        assert_eq!(scene.count(Family::Core), 1);
        assert_eq!(scene.count(Family::Burst), 0);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(Family::Spiral).map(|c| c.buffer.len()), Some(9));
    }

    #[test]
    fn generation_increases_on_every_replacement() {
        let mut scene = GalaxyScene::new();
        let first = scene.replace(Family::Burst, buffer(1), PointMaterial::default(), Transform::default());
        let other = scene.replace(Family::Core, buffer(1), PointMaterial::default(), Transform::default());
        let second = scene.replace(Family::Burst, buffer(1), PointMaterial::default(), Transform::default());
        assert!(first < other && other < second);
        assert_eq!(scene.generation(Family::Burst), Some(second));
    }

    #[test]
    fn name_is_stable_across_replacements() {
        let mut scene = GalaxyScene::new();
        scene.replace(Family::Core, buffer(1), PointMaterial::default(), Transform::default());
        scene.replace(Family::Core, buffer(2), PointMaterial::default(), Transform::default());
        assert_eq!(scene.get(Family::Core).map(|c| c.name), Some("galaxyCore"));
    }

    #[test]
    fn rotation_and_removal() {
        let mut scene = GalaxyScene::new();
        scene.replace(Family::Spiral, buffer(1), PointMaterial::default(), Transform::from_uniform_scale(2.0));
        scene.set_rotation_y(Family::Spiral, -0.5);
        let transform = scene.transform(Family::Spiral).unwrap();
        assert_eq!(transform.scale, glam::Vec3::splat(2.0));
        assert!((transform.rotation.to_euler(glam::EulerRot::YXZ).0 + 0.5).abs() < 1e-5);

        // No-op on a missing family
        scene.set_rotation_y(Family::Burst, 1.0);
        assert!(scene.remove(Family::Spiral));
        assert!(!scene.remove(Family::Spiral));
        assert!(scene.is_empty());
        assert!(scene.transform(Family::Spiral).is_none());
    }
}
