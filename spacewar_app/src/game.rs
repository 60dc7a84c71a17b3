//! Space War demo game: a ship with a mounted turret, a drifting asteroid field and missiles

use rand::Rng;
use spacewar_engine::events::MouseEvent;
use spacewar_engine::input::BindingParseError;
use spacewar_engine::prelude::*;

// Playfield
const FIELD_RADIUS: f32 = 40.0;
const ASTEROID_COUNT: usize = 12;
const ASTEROID_MAX_SPEED: f32 = 3.0;

// Ship and weapons
const SHIP_SPEED: f32 = 8.0;
const MISSILE_SPEED: f32 = 25.0;
const MISSILE_LIFETIME: f32 = 2.0; // seconds

const SHIP_MESH: MeshId = MeshId(1);
const TURRET_MESH: MeshId = MeshId(2);
const ROCK_MESH: MeshId = MeshId(3);
const MISSILE_MESH: MeshId = MeshId(4);
const HULL_MATERIAL: MaterialId = MaterialId(1);
const ROCK_MATERIAL: MaterialId = MaterialId(2);
const GLOW_MATERIAL: MaterialId = MaterialId(3);

/// Key bindings for the game
#[derive(Debug, Clone, Copy)]
pub struct Controls {
    pub fire: KeyBinding,
    pub reset: KeyBinding,
    pub quit: KeyBinding,
}

impl Controls {
    pub fn parse(fire: &str, reset: &str, quit: &str) -> Result<Self, BindingParseError> {
        Ok(Self {
            fire: fire.parse()?,
            reset: reset.parse()?,
            quit: quit.parse()?,
        })
    }
}

struct Missile {
    node: NodeId,
    age: f32,
}

/// Swallows cursor motion so the game only sees clicks
struct MotionTrace;

impl EventHandler for MotionTrace {
    fn on_event(&mut self, event: &InputEvent) -> bool {
        if let InputEvent::MouseMoved { x, y } = event {
            log::trace!("Cursor at ({x}, {y})");
        }
        true
    }
}

pub struct SpaceWar {
    controls: Controls,
    rock: SharedRenderable,
    missile: SharedRenderable,
    ship: Option<NodeId>,
    turret: Option<NodeId>,
    asteroids: Vec<NodeId>,
    missiles: Vec<Missile>,
    shots_fired: u32,
}

impl SpaceWar {
    pub fn new(controls: Controls) -> Self {
        Self {
            controls,
            rock: Renderable::new("asteroid", ROCK_MESH, ROCK_MATERIAL).shared(),
            missile: Renderable::new("missile", MISSILE_MESH, GLOW_MATERIAL)
                .with_tint([1.0, 0.6, 0.2, 1.0])
                .with_layer(1)
                .shared(),
            ship: None,
            turret: None,
            asteroids: Vec::new(),
            missiles: Vec::new(),
            shots_fired: 0,
        }
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn asteroid_count(&self) -> usize {
        self.asteroids.len()
    }

    pub fn missiles_in_flight(&self) -> usize {
        self.missiles.len()
    }

    fn spawn_asteroid(
        &mut self,
        scene: &mut SceneGraph,
        position: Vec3,
    ) -> Result<NodeId, SceneError> {
        let mut rng = rand::thread_rng();
        let velocity = Vec3::new(
            rng.gen_range(-ASTEROID_MAX_SPEED..ASTEROID_MAX_SPEED),
            rng.gen_range(-ASTEROID_MAX_SPEED..ASTEROID_MAX_SPEED),
            0.0,
        );
        let size = rng.gen_range(0.5..2.0);

        let local = Transform::from_position(position).with_scale(Vec3::repeat(size));
        let node = scene.create_node_with(local);
        scene.set_velocity(node, velocity)?;
        scene.set_renderable(node, self.rock.clone())?;
        self.asteroids.push(node);
        Ok(node)
    }

    fn spawn_field(&mut self, scene: &mut SceneGraph) -> Result<(), SceneError> {
        let mut rng = rand::thread_rng();
        for _ in 0..ASTEROID_COUNT {
            let position = Vec3::new(
                rng.gen_range(-FIELD_RADIUS..FIELD_RADIUS),
                rng.gen_range(-FIELD_RADIUS..FIELD_RADIUS),
                0.0,
            );
            self.spawn_asteroid(scene, position)?;
        }
        Ok(())
    }

    fn reset_field(&mut self, scene: &mut SceneGraph) -> Result<(), SceneError> {
        let released: usize = self.asteroids.drain(..).map(|id| scene.release(id)).sum();
        log::info!("Field reset, released {released} asteroid node(s)");
        self.spawn_field(scene)
    }

    /// Launch a missile from the turret muzzle along its aim
    fn fire(&mut self, scene: &mut SceneGraph) -> Result<(), SceneError> {
        let Some(turret) = self.turret else {
            return Ok(());
        };
        let world = scene
            .world_transform(turret)
            .ok_or(SceneError::NodeNotFound(turret))?;

        let origin = Vec3::new(world[(0, 3)], world[(1, 3)], world[(2, 3)]);
        let heading = world
            .transform_vector(&Vec3::y())
            .try_normalize(1.0e-6)
            .unwrap_or_else(Vec3::y);

        let node = scene.create_node_with(Transform::from_position(origin));
        scene.set_velocity(node, heading * MISSILE_SPEED)?;
        scene.set_renderable(node, self.missile.clone())?;
        self.missiles.push(Missile { node, age: 0.0 });
        self.shots_fired += 1;
        Ok(())
    }

    fn steer(&self, engine: &mut Engine) -> Result<(), SceneError> {
        let Some(ship) = self.ship else {
            return Ok(());
        };
        let input = engine.input();
        let held = |key: KeyCode| f32::from(u8::from(input.is_key_down(key)));
        let thrust = Vec3::new(
            held(KeyCode::Right) - held(KeyCode::Left),
            held(KeyCode::Up) - held(KeyCode::Down),
            0.0,
        );
        engine.scene_mut().set_velocity(ship, thrust * SHIP_SPEED)
    }

    /// Point the turret at the cursor
    fn aim(&self, engine: &mut Engine) -> Result<(), SceneError> {
        let Some(turret) = self.turret else {
            return Ok(());
        };
        let (width, height) = engine
            .input()
            .surface()
            .unwrap_or((engine.config().window.width, engine.config().window.height));
        let (x, y) = engine.input().cursor();
        let dx = x as f32 - width as f32 / 2.0;
        let dy = height as f32 / 2.0 - y as f32;
        if dx == 0.0 && dy == 0.0 {
            return Ok(());
        }

        let yaw = (-dx).atan2(dy);
        let mount = Vec3::new(0.0, 0.8, 0.0);
        let rotation = Quat::from_axis_angle(&Vec3::z_axis(), yaw);
        engine
            .scene_mut()
            .set_local_transform(turret, Transform::from_position_rotation(mount, rotation))
    }

    /// Wrap asteroids that drift off the field back to the opposite edge
    fn wrap_asteroids(&self, scene: &mut SceneGraph) -> Result<(), SceneError> {
        for &id in &self.asteroids {
            let Some(mut local) = scene.node(id).map(|node| *node.local_transform()) else {
                continue;
            };
            let mut wrapped = false;
            for axis in 0..2 {
                if local.position[axis].abs() > FIELD_RADIUS {
                    local.position[axis] = -local.position[axis].signum() * FIELD_RADIUS;
                    wrapped = true;
                }
            }
            if wrapped {
                scene.set_local_transform(id, local)?;
            }
        }
        Ok(())
    }

    fn screen_to_field(engine: &Engine, x: i32, y: i32) -> Vec3 {
        let (width, height) = engine
            .input()
            .surface()
            .unwrap_or((engine.config().window.width, engine.config().window.height));
        let u = x as f32 / width.max(1) as f32 * 2.0 - 1.0;
        let v = 1.0 - y as f32 / height.max(1) as f32 * 2.0;
        Vec3::new(u * FIELD_RADIUS, v * FIELD_RADIUS, 0.0)
    }
}

impl Application for SpaceWar {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Building the Space War scene");

        let scene = engine.scene_mut();
        let ship = scene.create_node();
        let turret = scene.create_child(ship, Transform::from_position(Vec3::new(0.0, 0.8, 0.0)))?;
        self.ship = Some(ship);
        self.turret = Some(turret);
        self.spawn_field(scene)?;

        // Hull meshes arrive from a loader thread and attach on a later tick
        let sender = engine.renderable_sender();
        std::thread::spawn(move || {
            let hull = Renderable::new("ship", SHIP_MESH, HULL_MATERIAL).shared();
            let gun = Renderable::new("turret", TURRET_MESH, HULL_MATERIAL)
                .with_tint([0.7, 0.7, 0.8, 1.0])
                .shared();
            for (node, renderable) in [(ship, hull), (turret, gun)] {
                if let Err(e) = sender.send(node, renderable) {
                    log::warn!("Loader finished after shutdown: {e}");
                }
            }
        });

        engine
            .events_mut()
            .register_handler(EventKind::MouseMoved, Box::new(MotionTrace));

        log::info!(
            "Controls: fire {}, reset {}, quit {}",
            self.controls.fire,
            self.controls.reset,
            self.controls.quit
        );
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        self.steer(engine)?;
        self.aim(engine)?;

        let scene = engine.scene_mut();
        self.wrap_asteroids(scene)?;
        self.missiles.retain_mut(|missile| {
            missile.age += delta_time;
            if missile.age < MISSILE_LIFETIME {
                return true;
            }
            scene.release(missile.node);
            false
        });
        Ok(())
    }

    fn handle_event(&mut self, engine: &mut Engine, event: &InputEvent) -> Result<(), AppError> {
        match event {
            InputEvent::Keyboard(key) if self.controls.quit.matches(key) => engine.quit(),
            InputEvent::Keyboard(key) if self.controls.fire.matches(key) => {
                self.fire(engine.scene_mut())?;
            }
            InputEvent::Keyboard(key) if self.controls.reset.matches(key) => {
                self.reset_field(engine.scene_mut())?;
            }
            InputEvent::Mouse(MouseEvent {
                x,
                y,
                button: MouseButton::Left,
                pressed: true,
            }) => {
                let position = Self::screen_to_field(engine, *x, *y);
                self.spawn_asteroid(engine.scene_mut(), position)?;
            }
            InputEvent::Resize { width, height } => {
                log::info!("Surface resized to {width}x{height}");
            }
            InputEvent::CloseRequested => log::info!("Close requested"),
            _ => {}
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Space War over: {} frames, {} shots, {} nodes, {} draws in the last frame",
            engine.frame_count(),
            self.shots_fired,
            engine.scene().len(),
            engine.last_frame_stats().draw_calls
        );
    }
}
