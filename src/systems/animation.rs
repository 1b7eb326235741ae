//! Animation and paint-order system.
//!
//! [`animation`] runs once per step, before any render pass of that step:
//!
//! 1. Every sprite entity that also carries an [`Animation`] advances its frame
//!    timer by the step delta, draining every frame boundary crossed, and
//!    shows the resulting frame.
//! 2. The `(z, entity)` pairs of all sprites are rebuilt into [`RenderOrder`]
//!    and sorted ascending by `z`.
//!
//! The sort is stable, so sprites with equal `z` keep the query's iteration
//! order from one step to the next. A NaN depth key sorts as `0.0`.
//!
//! # Related
//!
//! - [`crate::systems::render::render_sprites`] – consumes the order in two passes

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::sprite::Sprite;
use crate::components::transform::Transform;
use crate::resources::renderorder::RenderOrder;
use crate::resources::worldtime::WorldTime;

/// Advance animations and rebuild the depth-sorted paint order.
pub fn animation(
    mut query: Query<(Entity, &mut Sprite, Option<&mut Animation>), With<Transform>>,
    time: Res<WorldTime>,
    mut order: ResMut<RenderOrder>,
) {
    order.entries.clear();

    for (entity, mut sprite, maybe_animation) in query.iter_mut() {
        if let Some(mut animation) = maybe_animation {
            sprite.texture = animation.advance(time.delta);
        }

        let z = if sprite.z.is_nan() { 0.0 } else { sprite.z };
        order.entries.push((z, entity));
    }

    order.entries.sort_by(|a, b| a.0.total_cmp(&b.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::texturestore::TextureId;

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(animation);
        schedule.run(world);
    }

    fn make_world(delta: f32) -> World {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta,
            ..WorldTime::default()
        });
        world.init_resource::<RenderOrder>();
        world
    }

    #[test]
    fn test_sprite_without_animation_keeps_texture() {
        let mut world = make_world(1.0);
        let e = world
            .spawn((Transform::default(), Sprite::new(TextureId(7), 0.0)))
            .id();
        run(&mut world);
        assert_eq!(world.get::<Sprite>(e).unwrap().texture, TextureId(7));
        assert_eq!(world.resource::<RenderOrder>().len(), 1);
    }

    #[test]
    fn test_animation_writes_sprite_texture() {
        let mut world = make_world(0.35);
        let frames = vec![TextureId(10), TextureId(11), TextureId(12), TextureId(13)];
        let e = world
            .spawn((
                Transform::default(),
                Sprite::new(TextureId(10), 0.0),
                Animation::new(frames, 0.1).unwrap(),
            ))
            .id();
        run(&mut world);
        assert_eq!(world.get::<Sprite>(e).unwrap().texture, TextureId(13));
        assert_eq!(world.get::<Animation>(e).unwrap().frame_index(), 3);
    }

    #[test]
    fn test_order_sorted_by_z() {
        let mut world = make_world(0.0);
        for z in [3.0, -1.0, 0.5, -7.25, 2.0] {
            world.spawn((Transform::default(), Sprite::new(TextureId(0), z)));
        }
        run(&mut world);
        let order = world.resource::<RenderOrder>();
        let zs: Vec<f32> = order.entries.iter().map(|(z, _)| *z).collect();
        assert_eq!(zs, vec![-7.25, -1.0, 0.5, 2.0, 3.0]);
    }

    #[test]
    fn test_equal_z_keeps_spawn_order_across_runs() {
        let mut world = make_world(0.0);
        let mut spawned = Vec::new();
        for z in [1.0, 1.0, -2.0, 1.0, 1.0, -2.0] {
            let e = world
                .spawn((Transform::default(), Sprite::new(TextureId(0), z)))
                .id();
            spawned.push((z, e));
        }

        run(&mut world);
        let first = world.resource::<RenderOrder>().entries.clone();
        run(&mut world);
        let second = world.resource::<RenderOrder>().entries.clone();

        let mut expected: Vec<(f32, Entity)> =
            spawned.iter().copied().filter(|(z, _)| *z < 0.0).collect();
        expected.extend(spawned.iter().copied().filter(|(z, _)| *z >= 0.0));
        assert_eq!(first, expected);
        assert_eq!(second, first);
    }

    #[test]
    fn test_order_shrinks_when_entities_despawn() {
        let mut world = make_world(0.0);
        let a = world
            .spawn((Transform::default(), Sprite::new(TextureId(0), 1.0)))
            .id();
        world.spawn((Transform::default(), Sprite::new(TextureId(0), 2.0)));
        run(&mut world);
        assert_eq!(world.resource::<RenderOrder>().len(), 2);
        world.despawn(a);
        run(&mut world);
        assert_eq!(world.resource::<RenderOrder>().len(), 1);
    }

    #[test]
    fn test_sprite_without_transform_is_not_ordered() {
        let mut world = make_world(0.0);
        world.spawn(Sprite::new(TextureId(0), 1.0));
        run(&mut world);
        assert!(world.resource::<RenderOrder>().is_empty());
    }
}
