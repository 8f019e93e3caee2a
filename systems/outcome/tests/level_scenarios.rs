use std::time::Duration;

use glam::Vec2;
use maze_chase_core::{
    Collider, Command, EnemyId, EnemySpawn, Event, LevelId, LevelLayout, MoveInput, Outcome,
    PickupId, PickupKind, PickupSpawn, PlayerSpawn, SceneId, SceneTransitions,
};
use maze_chase_system_outcome::{OutcomeRouter, VictoryRoutes};
use maze_chase_system_pursuit::Pursuit;
use maze_chase_world::{self as world, query, World};

const DEFEAT_SCENE: SceneId = SceneId::new(5);
const LEVEL_ONE: LevelId = LevelId::new(1);
const LEVEL_TWO: LevelId = LevelId::new(2);

#[derive(Default)]
struct RecordingScenes {
    requests: Vec<SceneId>,
}

impl SceneTransitions for RecordingScenes {
    fn request_scene_change(&mut self, scene: SceneId) {
        self.requests.push(scene);
    }
}

struct Session {
    world: World,
    pursuit: Pursuit,
    router: OutcomeRouter,
    scenes: RecordingScenes,
}

impl Session {
    fn start(level: LevelId, layout: LevelLayout) -> Self {
        let mut session = Self {
            world: World::new(),
            pursuit: Pursuit::new(),
            router: OutcomeRouter::new(
                VictoryRoutes::new(SceneId::new(4))
                    .with_route(LEVEL_ONE, SceneId::new(4))
                    .with_route(LEVEL_TWO, SceneId::new(6)),
                DEFEAT_SCENE,
            ),
            scenes: RecordingScenes::default(),
        };
        let mut events = Vec::new();
        world::apply(
            &mut session.world,
            Command::LoadLevel { level, layout },
            &mut events,
        );
        let _ = session.dispatch(events);
        session
    }

    fn tick(&mut self, collisions: &[Collider]) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(
            &mut self.world,
            Command::Tick {
                dt: Duration::from_millis(16),
                input: MoveInput::default(),
            },
            &mut events,
        );
        for collider in collisions {
            world::apply(
                &mut self.world,
                Command::Collide {
                    collider: *collider,
                },
                &mut events,
            );
        }
        self.dispatch(events)
    }

    fn dispatch(&mut self, mut events: Vec<Event>) -> Vec<Event> {
        let player = query::player(&self.world);
        let mut commands = Vec::new();
        self.pursuit.handle(&events, player.as_ref(), &mut commands);
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        self.router.handle(&events, &mut self.scenes);
        events
    }
}

fn pickup(x: f32, kind: PickupKind) -> PickupSpawn {
    PickupSpawn {
        position: Vec2::new(x, 0.0),
        kind,
    }
}

fn arcade_layout() -> LevelLayout {
    LevelLayout {
        player: Some(PlayerSpawn::new(Vec2::ZERO, 6.0)),
        pickups: vec![
            pickup(1.0, PickupKind::Ordinary),
            pickup(2.0, PickupKind::Ordinary),
            pickup(3.0, PickupKind::Ordinary),
            pickup(4.0, PickupKind::Power),
        ],
        enemies: vec![
            EnemySpawn {
                position: Vec2::new(5.0, 5.0),
                home: Vec2::new(8.0, 8.0),
            },
            EnemySpawn {
                position: Vec2::new(-5.0, 5.0),
                home: Vec2::new(-8.0, 8.0),
            },
        ],
    }
}

#[test]
fn power_pickup_protects_player_until_board_is_cleared() {
    let mut session = Session::start(LEVEL_TWO, arcade_layout());
    assert_eq!(query::pickup_registry(&session.world).remaining(), 4);

    let _ = session.tick(&[Collider::Pickup(PickupId::new(3))]);
    let player = query::player(&session.world).expect("player present");
    assert!(player.empowered);
    assert_eq!(query::pickup_registry(&session.world).remaining(), 3);

    let events = session.tick(&[Collider::Enemy(EnemyId::new(0))]);
    assert!(events.contains(&Event::EnemyRepelled {
        enemy: EnemyId::new(0),
    }));
    assert_eq!(query::outcome(&session.world), Outcome::Ongoing);
    for enemy in query::enemy_view(&session.world).iter() {
        assert_eq!(enemy.destination, Some(enemy.home));
    }

    let _ = session.tick(&[
        Collider::Pickup(PickupId::new(0)),
        Collider::Pickup(PickupId::new(1)),
    ]);
    assert!(session.scenes.requests.is_empty());
    let _ = session.tick(&[Collider::Pickup(PickupId::new(2))]);

    assert_eq!(query::pickup_registry(&session.world).remaining(), 0);
    assert_eq!(query::outcome(&session.world), Outcome::Victory);
    assert_eq!(session.scenes.requests, vec![SceneId::new(6)]);
}

#[test]
fn victory_is_routed_exactly_once() {
    let mut session = Session::start(LEVEL_ONE, arcade_layout());

    let _ = session.tick(&[
        Collider::Pickup(PickupId::new(0)),
        Collider::Pickup(PickupId::new(1)),
        Collider::Pickup(PickupId::new(2)),
        Collider::Pickup(PickupId::new(3)),
        Collider::Pickup(PickupId::new(3)),
    ]);
    for _ in 0..5 {
        let _ = session.tick(&[
            Collider::Pickup(PickupId::new(0)),
            Collider::Enemy(EnemyId::new(1)),
        ]);
    }

    assert_eq!(session.scenes.requests, vec![SceneId::new(4)]);
    assert_eq!(query::outcome(&session.world), Outcome::Victory);
}

#[test]
fn vulnerable_contact_routes_to_defeat_once() {
    let mut session = Session::start(LEVEL_ONE, arcade_layout());

    let events = session.tick(&[
        Collider::Enemy(EnemyId::new(0)),
        Collider::Enemy(EnemyId::new(1)),
    ]);
    let _ = session.tick(&[Collider::Enemy(EnemyId::new(0))]);

    let decided = events
        .iter()
        .filter(|event| matches!(event, Event::OutcomeDecided { .. }))
        .count();
    assert_eq!(decided, 1);
    assert_eq!(session.scenes.requests, vec![DEFEAT_SCENE]);
    let player = query::player(&session.world).expect("player present");
    assert_eq!(player.outcome, Outcome::Defeat);
    assert!(!player.active);
}

#[test]
fn empowered_contact_leaves_outcome_untouched() {
    let mut session = Session::start(LEVEL_ONE, arcade_layout());
    let _ = session.tick(&[Collider::Pickup(PickupId::new(3))]);

    let _ = session.tick(&[
        Collider::Enemy(EnemyId::new(0)),
        Collider::Enemy(EnemyId::new(1)),
    ]);

    assert_eq!(query::outcome(&session.world), Outcome::Ongoing);
    assert!(session.scenes.requests.is_empty());
}

#[test]
fn unmapped_level_routes_to_fallback_victory() {
    let layout = LevelLayout {
        player: Some(PlayerSpawn::new(Vec2::ZERO, 1.0)),
        pickups: vec![pickup(1.0, PickupKind::Ordinary)],
        enemies: Vec::new(),
    };
    let mut session = Session::start(LevelId::new(8), layout);

    let _ = session.tick(&[Collider::Pickup(PickupId::new(0))]);

    assert_eq!(session.scenes.requests, vec![SceneId::new(4)]);
}

#[test]
fn scripted_session_replays_identically() {
    fn replay() -> (Vec<Event>, Vec<SceneId>) {
        let mut session = Session::start(LEVEL_TWO, arcade_layout());
        let mut log = Vec::new();
        let script: [&[Collider]; 6] = [
            &[],
            &[Collider::Pickup(PickupId::new(3))],
            &[Collider::Enemy(EnemyId::new(1))],
            &[Collider::Pickup(PickupId::new(0))],
            &[Collider::Pickup(PickupId::new(1)), Collider::Pickup(PickupId::new(2))],
            &[Collider::Enemy(EnemyId::new(0))],
        ];
        for collisions in script {
            log.extend(session.tick(collisions));
        }
        (log, session.scenes.requests)
    }

    let first = replay();
    let second = replay();

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.1, vec![SceneId::new(6)]);
}
