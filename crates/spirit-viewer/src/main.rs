//! Spirit Flight Viewer - Bevy-based rendering surface for the mini-game
//!
//! Controls:
//!   Space / Enter   start, or play again after game over
//!   Left drag       steer the spirit guide
//!   Arrow keys      steer without a mouse
//!   Ctrl+S / Ctrl+L save / load the session to save.bin
//!
//! An optional first argument names a JSON tuning file.

use std::collections::{HashMap, HashSet};

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use spirit_core::components::Vec3 as SimVec3;
use spirit_core::config::load_config;
use spirit_core::prelude::{GameSession, SessionState};

const SAVE_PATH: &str = "save.bin";
/// Keyboard steering, in drag pixels per second
const KEY_DRAG_RATE: f32 = 200.0;

fn main() {
    let session = std::env::args()
        .nth(1)
        .and_then(|path| match load_config(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Failed to load tuning from {}: {}", path, e);
                None
            }
        })
        .and_then(|config| GameSession::with_config(config).ok())
        .unwrap_or_default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Spirit Flight".to_string(),
                resolution: (1280.0, 720.0).into(),
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(SessionWrapper(session))
        .insert_resource(SceneIndex::default())
        .insert_resource(ClearColor(Color::srgb_u8(0x1e, 0x1b, 0x4b)))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 400.0,
        })
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                handle_menu_keys,
                steer_player,
                save_load,
                update_session,
                sync_scene,
                update_hud,
            )
                .chain(),
        )
        .run();
}

#[derive(Resource)]
struct SessionWrapper(GameSession);

/// Mesh and material handles shared by every obstacle and orb.
#[derive(Resource)]
struct SceneAssets {
    obstacle_mesh: Handle<Mesh>,
    obstacle_material: Handle<StandardMaterial>,
    orb_mesh: Handle<Mesh>,
    orb_material: Handle<StandardMaterial>,
}

/// Bevy entities standing in for session ids.
#[derive(Resource, Default)]
struct SceneIndex {
    player: Option<Entity>,
    obstacles: HashMap<u32, Entity>,
    orbs: HashMap<u32, Entity>,
}

#[derive(Component)]
struct HudText;

fn to_bevy(v: SimVec3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut index: ResMut<SceneIndex>,
) {
    let spirit = Color::srgb_u8(0x9c, 0x88, 0xff);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 75f32.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 2.0, 5.0),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Spirit guide with its trail
    let player = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(0.7))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: spirit,
                emissive: LinearRgba::from(spirit) * 0.3,
                ..default()
            })),
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cone {
                    radius: 0.5,
                    height: 2.0,
                })),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: spirit.with_alpha(0.6),
                    alpha_mode: AlphaMode::Blend,
                    emissive: LinearRgba::from(spirit) * 0.3,
                    ..default()
                })),
                Transform::from_xyz(0.0, 0.0, 0.5),
            ));
        })
        .id();
    index.player = Some(player);

    // Distant mountains
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(100.0, 10.0, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb_u8(0x6c, 0x5c, 0xe7))),
        Transform::from_xyz(0.0, -5.0, -30.0),
    ));

    let orb = Color::srgb_u8(0xff, 0xea, 0xa7);
    commands.insert_resource(SceneAssets {
        obstacle_mesh: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        obstacle_material: materials.add(Color::srgb_u8(0xe8, 0x43, 0x93)),
        orb_mesh: meshes.add(Sphere::new(0.5)),
        orb_material: materials.add(StandardMaterial {
            base_color: orb,
            emissive: LinearRgba::from(orb) * 0.5,
            ..default()
        }),
    });

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            ..default()
        },
        HudText,
    ));

    info!("Spirit Flight ready, press Space to start");
}

fn handle_menu_keys(keyboard: Res<ButtonInput<KeyCode>>, mut sim: ResMut<SessionWrapper>) {
    if !(keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::Enter)) {
        return;
    }

    let result = match sim.0.state() {
        SessionState::Idle => sim.0.start(),
        SessionState::Over => sim.0.restart(),
        SessionState::Running => return,
    };
    if let Err(e) = result {
        warn!("Could not begin a round: {}", e);
    }
}

fn steer_player(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_events: EventReader<MouseMotion>,
    mut sim: ResMut<SessionWrapper>,
) {
    // Mouse drag; screen y grows downwards
    if mouse_buttons.pressed(MouseButton::Left) {
        for motion in motion_events.read() {
            sim.0.push_drag(motion.delta.x, -motion.delta.y);
        }
    } else {
        motion_events.clear();
    }

    let step = KEY_DRAG_RATE * time.delta_secs();
    let mut dx = 0.0;
    let mut dy = 0.0;
    if keyboard.pressed(KeyCode::ArrowLeft) {
        dx -= step;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        dx += step;
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        dy += step;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        dy -= step;
    }
    if dx != 0.0 || dy != 0.0 {
        sim.0.push_drag(dx, dy);
    }
}

fn save_load(keyboard: Res<ButtonInput<KeyCode>>, mut sim: ResMut<SessionWrapper>) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }

    // Save with S key
    if keyboard.just_pressed(KeyCode::KeyS) {
        match std::fs::File::create(SAVE_PATH) {
            Ok(file) => match sim.0.save(std::io::BufWriter::new(file)) {
                Ok(()) => info!("Saved session to {}", SAVE_PATH),
                Err(e) => warn!("Failed to save: {}", e),
            },
            Err(e) => warn!("Failed to create save file: {}", e),
        }
    }

    // Load with L key
    if keyboard.just_pressed(KeyCode::KeyL) {
        match std::fs::File::open(SAVE_PATH) {
            Ok(file) => match sim.0.load(std::io::BufReader::new(file)) {
                Ok(()) => info!("Loaded session from {}", SAVE_PATH),
                Err(e) => warn!("Failed to load: {}", e),
            },
            Err(e) => warn!("Failed to open save file: {}", e),
        }
    }
}

fn update_session(time: Res<Time>, mut sim: ResMut<SessionWrapper>) {
    let report = sim.0.tick(time.delta_secs());
    if report.obstacles_spawned > 0 {
        info!("{} obstacles in the sky", sim.0.obstacle_count());
    }
}

/// Mirror the session's scene description onto Bevy entities.
fn sync_scene(
    mut commands: Commands,
    sim: Res<SessionWrapper>,
    assets: Res<SceneAssets>,
    mut index: ResMut<SceneIndex>,
    mut objects: Query<(&mut Transform, &mut Visibility), Without<Camera3d>>,
    mut camera: Query<(&mut Transform, &mut Projection), With<Camera3d>>,
) {
    let frame = sim.0.scene();

    if let Ok((mut transform, mut projection)) = camera.get_single_mut() {
        transform.translation = to_bevy(frame.camera.position);
        if let Projection::Perspective(perspective) = &mut *projection {
            perspective.fov = frame.camera.fov_degrees.to_radians();
        }
    }

    if let Some((mut transform, _)) = index.player.and_then(|e| objects.get_mut(e).ok()) {
        transform.translation = to_bevy(frame.player);
    }

    // Obstacles: update in place, spawn new ids, drop ids a restart removed
    let mut live = HashSet::new();
    for view in &frame.obstacles {
        live.insert(view.id);
        let transform = Transform::from_translation(to_bevy(view.position))
            .with_scale(Vec3::splat(view.scale));
        match index.obstacles.get(&view.id) {
            Some(&entity) => {
                if let Ok((mut t, _)) = objects.get_mut(entity) {
                    *t = transform;
                }
            }
            None => {
                let entity = commands
                    .spawn((
                        Mesh3d(assets.obstacle_mesh.clone()),
                        MeshMaterial3d(assets.obstacle_material.clone()),
                        transform,
                    ))
                    .id();
                index.obstacles.insert(view.id, entity);
            }
        }
    }
    index.obstacles.retain(|id, entity| {
        let keep = live.contains(id);
        if !keep {
            commands.entity(*entity).despawn();
        }
        keep
    });

    // Orbs: collected ones are simply hidden until they recycle
    let visible: HashSet<u32> = frame.collectibles.iter().map(|c| c.id).collect();
    for view in &frame.collectibles {
        if !index.orbs.contains_key(&view.id) {
            let entity = commands
                .spawn((
                    Mesh3d(assets.orb_mesh.clone()),
                    MeshMaterial3d(assets.orb_material.clone()),
                    Transform::from_translation(to_bevy(view.position)),
                    Visibility::Visible,
                ))
                .id();
            index.orbs.insert(view.id, entity);
        }
    }
    for view in &frame.collectibles {
        if let Some((mut t, _)) = index.orbs.get(&view.id).and_then(|&e| objects.get_mut(e).ok())
        {
            t.translation = to_bevy(view.position);
        }
    }
    for (id, &entity) in &index.orbs {
        if let Ok((_, mut visibility)) = objects.get_mut(entity) {
            *visibility = if visible.contains(id) {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
        }
    }
}

fn update_hud(sim: Res<SessionWrapper>, mut hud: Query<&mut Text, With<HudText>>) {
    let message = match sim.0.state() {
        SessionState::Idle => "Spirit Flight\n\
             Help your Spirit Guide collect magical orbs while avoiding obstacles!\n\
             [Space] Start Game"
            .to_string(),
        SessionState::Running => format!("Score: {}", sim.0.score()),
        SessionState::Over => format!(
            "Game Over\nFinal Score: {}\n[Space] Play Again",
            sim.0.score()
        ),
    };

    for mut text in &mut hud {
        if **text != message {
            **text = message.clone();
        }
    }
}
