use bevy_ecs::prelude::{Entity, Resource};

/// Paint order computed by the animation system: `(z, entity)` pairs sorted
/// ascending by `z`. Both render passes read it without re-sorting.
#[derive(Resource, Debug, Default, Clone)]
pub struct RenderOrder {
    pub entries: Vec<(f32, Entity)>,
}

impl RenderOrder {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
