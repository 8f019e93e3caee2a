use std::time::Duration;

use glam::Vec2;
use maze_chase_core::{
    Collider, Command, EnemyId, EnemySpawn, Event, LevelId, LevelLayout, MoveInput, PickupId,
    PickupKind, PickupSpawn, PlayerSpawn,
};
use maze_chase_system_pursuit::{AgentMode, Pursuit};
use maze_chase_world::{self as world, query, World};

const HOMES: [Vec2; 3] = [
    Vec2::new(10.0, 10.0),
    Vec2::new(-10.0, 10.0),
    Vec2::new(0.0, -10.0),
];

fn level_with_three_enemies(player: Option<PlayerSpawn>) -> LevelLayout {
    LevelLayout {
        player,
        pickups: vec![
            PickupSpawn {
                position: Vec2::new(1.0, 0.0),
                kind: PickupKind::Power,
            },
            PickupSpawn {
                position: Vec2::new(2.0, 0.0),
                kind: PickupKind::Ordinary,
            },
        ],
        enemies: HOMES
            .iter()
            .map(|home| EnemySpawn {
                position: *home * 0.5,
                home: *home,
            })
            .collect(),
    }
}

fn load(world: &mut World, pursuit: &mut Pursuit, layout: LevelLayout) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::LoadLevel {
            level: LevelId::new(1),
            layout,
        },
        &mut events,
    );
    let player = query::player(world);
    let mut commands = Vec::new();
    pursuit.handle(&events, player.as_ref(), &mut commands);
    assert!(commands.is_empty(), "loading must not retarget enemies");
}

fn run_tick(
    world: &mut World,
    pursuit: &mut Pursuit,
    input: MoveInput,
    collisions: &[Collider],
) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            dt: Duration::from_millis(100),
            input,
        },
        &mut events,
    );
    for collider in collisions {
        world::apply(
            world,
            Command::Collide {
                collider: *collider,
            },
            &mut events,
        );
    }

    let player = query::player(world);
    let mut commands = Vec::new();
    pursuit.handle(&events, player.as_ref(), &mut commands);
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn destinations(world: &World) -> Vec<Option<Vec2>> {
    query::enemy_view(world)
        .iter()
        .map(|enemy| enemy.destination)
        .collect()
}

#[test]
fn every_agent_pursues_the_player_position() {
    let mut world = World::new();
    let mut pursuit = Pursuit::new();
    load(
        &mut world,
        &mut pursuit,
        level_with_three_enemies(Some(PlayerSpawn::new(Vec2::ZERO, 10.0))),
    );

    let _ = run_tick(&mut world, &mut pursuit, MoveInput::new(0.0, 1.0), &[]);

    let player = query::player(&world).expect("player present");
    assert_eq!(player.position, Vec2::new(0.0, 1.0));
    assert_eq!(destinations(&world), vec![Some(player.position); 3]);
    for agent in pursuit.agents() {
        assert_eq!(agent.mode(&player), AgentMode::Pursuing);
    }
}

#[test]
fn every_agent_retreats_home_while_empowered() {
    let mut world = World::new();
    let mut pursuit = Pursuit::new();
    load(
        &mut world,
        &mut pursuit,
        level_with_three_enemies(Some(PlayerSpawn::new(Vec2::ZERO, 10.0))),
    );

    let _ = run_tick(
        &mut world,
        &mut pursuit,
        MoveInput::default(),
        &[Collider::Pickup(PickupId::new(0))],
    );

    let expected: Vec<_> = HOMES.iter().copied().map(Some).collect();
    assert_eq!(destinations(&world), expected);
}

#[test]
fn agents_react_within_the_tick_of_the_collision() {
    let mut world = World::new();
    let mut pursuit = Pursuit::new();
    load(
        &mut world,
        &mut pursuit,
        level_with_three_enemies(Some(PlayerSpawn::new(Vec2::ZERO, 10.0))),
    );
    let _ = run_tick(&mut world, &mut pursuit, MoveInput::default(), &[]);
    assert_eq!(destinations(&world), vec![Some(Vec2::ZERO); 3]);

    let events = run_tick(
        &mut world,
        &mut pursuit,
        MoveInput::default(),
        &[Collider::Pickup(PickupId::new(0))],
    );

    let retargeted: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::EnemyRetargeted { enemy, destination } => Some((*enemy, *destination)),
            _ => None,
        })
        .collect();
    assert_eq!(
        retargeted,
        vec![
            (EnemyId::new(0), HOMES[0]),
            (EnemyId::new(1), HOMES[1]),
            (EnemyId::new(2), HOMES[2]),
        ],
    );
}

#[test]
fn agents_resume_pursuit_after_empowerment_expires() {
    let mut world = World::new();
    let mut pursuit = Pursuit::new();
    load(
        &mut world,
        &mut pursuit,
        level_with_three_enemies(Some(PlayerSpawn {
            position: Vec2::ZERO,
            move_speed: 10.0,
            empowerment_duration: Duration::from_millis(300),
        })),
    );
    let _ = run_tick(
        &mut world,
        &mut pursuit,
        MoveInput::default(),
        &[Collider::Pickup(PickupId::new(0))],
    );
    assert_eq!(destinations(&world)[0], Some(HOMES[0]));

    for _ in 0..3 {
        let _ = run_tick(&mut world, &mut pursuit, MoveInput::default(), &[]);
    }

    assert!(!query::player(&world).expect("player present").empowered);
    assert_eq!(destinations(&world), vec![Some(Vec2::ZERO); 3]);
}

#[test]
fn agents_stay_inert_without_a_player() {
    let mut world = World::new();
    let mut pursuit = Pursuit::new();
    load(&mut world, &mut pursuit, level_with_three_enemies(None));

    let events = run_tick(&mut world, &mut pursuit, MoveInput::default(), &[]);

    assert!(pursuit.agents().is_empty());
    assert_eq!(
        pursuit.inert(),
        &[EnemyId::new(0), EnemyId::new(1), EnemyId::new(2)]
    );
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::EnemyRetargeted { .. })));
    assert_eq!(destinations(&world), vec![None; 3]);
}

#[test]
fn reloading_rebinds_agents() {
    let mut world = World::new();
    let mut pursuit = Pursuit::new();
    load(&mut world, &mut pursuit, level_with_three_enemies(None));
    assert_eq!(pursuit.inert().len(), 3);

    load(
        &mut world,
        &mut pursuit,
        level_with_three_enemies(Some(PlayerSpawn::new(Vec2::ZERO, 1.0))),
    );

    assert!(pursuit.inert().is_empty());
    assert_eq!(pursuit.agents().len(), 3);
    let homes: Vec<_> = pursuit.agents().iter().map(|agent| agent.home()).collect();
    assert_eq!(homes, HOMES.to_vec());
}
