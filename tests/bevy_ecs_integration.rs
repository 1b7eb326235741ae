//! Bevy ECS Integration Tests
//!
//! These tests pin down the bevy_ecs behavior the simulation relies on, so a
//! bevy_ecs upgrade that changes it fails here first.
//!
//! # Test Categories
//!
//! 1. **World & Resources** - Resource insertion, retrieval, mutability
//! 2. **Query Patterns** - Optional components, filters, single-entity access
//! 3. **Schedules** - Chained ordering, single-threaded executor, generic systems
//!
//! # Usage
//!
//! ```sh
//! cargo test --test bevy_ecs_integration
//! ```

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use bevy_ecs::system::SystemState;

// =============================================================================
// Test Components and Resources
// =============================================================================

#[derive(Component, Debug, Clone, PartialEq)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
struct Frames(u32);

/// Marker component used like the player agent
#[derive(Component, Debug, Clone)]
struct Player;

#[derive(Resource, Debug, Default)]
struct Log(Vec<&'static str>);

#[derive(Resource, Debug, Default)]
struct Counter(i32);

trait Source: Resource {
    fn value(&self) -> i32;
}

#[derive(Resource)]
struct Fixed(i32);

impl Source for Fixed {
    fn value(&self) -> i32 {
        self.0
    }
}

// =============================================================================
// CATEGORY 1: World & Resource Tests
// =============================================================================

#[test]
fn world_resource_mut_persists() {
    let mut world = World::new();
    world.insert_resource(Counter(1));

    world.resource_mut::<Counter>().0 += 2;

    assert_eq!(world.resource::<Counter>().0, 3);
}

#[test]
fn world_insert_resource_replaces() {
    let mut world = World::new();
    world.insert_resource(Counter(1));
    world.insert_resource(Counter(7));

    assert_eq!(world.resource::<Counter>().0, 7);
}

#[test]
fn world_get_missing_resource_is_none() {
    let world = World::new();
    assert!(world.get_resource::<Counter>().is_none());
}

#[test]
fn world_get_component_mut() {
    let mut world = World::new();
    let entity = world.spawn(Position { x: 1.0, y: 2.0 }).id();

    if let Some(mut pos) = world.get_mut::<Position>(entity) {
        pos.x = 5.0;
    }

    assert_eq!(world.get::<Position>(entity), Some(&Position { x: 5.0, y: 2.0 }));
}

// =============================================================================
// CATEGORY 2: Query Pattern Tests
// =============================================================================

#[test]
fn query_optional_mut_component() {
    let mut world = World::new();
    let animated = world.spawn((Position { x: 0.0, y: 0.0 }, Frames(0))).id();
    let still = world.spawn(Position { x: 1.0, y: 0.0 }).id();

    let mut state =
        SystemState::<Query<(Entity, &Position, Option<&mut Frames>)>>::new(&mut world);
    let mut query = state.get_mut(&mut world);

    let mut visited = Vec::new();
    for (entity, _pos, frames) in query.iter_mut() {
        if let Some(mut frames) = frames {
            frames.0 += 1;
        }
        visited.push(entity);
    }

    assert_eq!(visited.len(), 2);
    assert!(visited.contains(&animated) && visited.contains(&still));
    assert_eq!(world.get::<Frames>(animated), Some(&Frames(1)));
    assert!(world.get::<Frames>(still).is_none());
}

#[test]
fn query_single_mut_errors_on_zero_and_many() {
    let mut world = World::new();

    let mut state = SystemState::<Query<&mut Position, With<Player>>>::new(&mut world);
    assert!(state.get_mut(&mut world).single_mut().is_err());

    world.spawn((Position { x: 0.0, y: 0.0 }, Player));
    let mut state = SystemState::<Query<&mut Position, With<Player>>>::new(&mut world);
    assert!(state.get_mut(&mut world).single_mut().is_ok());

    world.spawn((Position { x: 1.0, y: 0.0 }, Player));
    let mut state = SystemState::<Query<&mut Position, With<Player>>>::new(&mut world);
    assert!(state.get_mut(&mut world).single_mut().is_err());
}

#[test]
fn query_filtered_on_world() {
    let mut world = World::new();
    world.spawn((Position { x: 1.0, y: 1.0 }, Player));
    world.spawn(Position { x: 2.0, y: 2.0 });

    let mut query = world.query_filtered::<&Position, With<Player>>();
    let found: Vec<f32> = query.iter(&world).map(|p| p.x).collect();

    assert_eq!(found, vec![1.0]);
}

#[test]
fn query_iteration_order_is_repeatable() {
    let mut world = World::new();
    for i in 0..8 {
        world.spawn(Frames(i));
    }

    let mut query = world.query::<&Frames>();
    let first: Vec<u32> = query.iter(&world).map(|f| f.0).collect();
    let second: Vec<u32> = query.iter(&world).map(|f| f.0).collect();

    assert_eq!(first, second);
}

// =============================================================================
// CATEGORY 3: Schedule Tests
// =============================================================================

fn first(mut log: ResMut<Log>) {
    log.0.push("first");
}

fn second(mut log: ResMut<Log>) {
    log.0.push("second");
}

fn third(mut log: ResMut<Log>) {
    log.0.push("third");
}

#[test]
fn schedule_chain_runs_in_order() {
    let mut world = World::new();
    world.init_resource::<Log>();

    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((first, second, third).chain());

    schedule.run(&mut world);
    schedule.run(&mut world);

    assert_eq!(
        world.resource::<Log>().0,
        vec!["first", "second", "third", "first", "second", "third"]
    );
}

fn add_source<S: Source>(source: Res<S>, mut counter: ResMut<Counter>) {
    counter.0 += source.value();
}

#[test]
fn schedule_generic_system_over_resource_trait() {
    let mut world = World::new();
    world.insert_resource(Fixed(4));
    world.init_resource::<Counter>();

    let mut schedule = Schedule::default();
    schedule.add_systems(add_source::<Fixed>);
    schedule.run(&mut world);
    schedule.run(&mut world);

    assert_eq!(world.resource::<Counter>().0, 8);
}

#[test]
fn schedule_sees_resource_replaced_between_runs() {
    let mut world = World::new();
    world.insert_resource(Fixed(1));
    world.init_resource::<Counter>();

    let mut schedule = Schedule::default();
    schedule.add_systems(add_source::<Fixed>);
    schedule.run(&mut world);
    world.insert_resource(Fixed(10));
    schedule.run(&mut world);

    assert_eq!(world.resource::<Counter>().0, 11);
}
