use std::cell::RefCell;
use std::rc::Rc;

use ember_common::keys::scancode;
use ember_common::{Action, Scancode};
use ember_input::{InputRouter, key_binding};
use ember_render::FlyCamera;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("movement scancode {0:?} is already bound on this window")]
    BindingTaken(Scancode),
}

/// Movement tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// World units per second.
    pub velocity: f32,
    /// Seconds per tick of the driver firing the router's bindings.
    pub tick_delta: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            velocity: 5.0,
            tick_delta: 1.0 / 60.0,
        }
    }
}

/// First-person movement controller owning the camera.
///
/// W/S walk along the ground plane, A/D strafe, Space and Left Control fly
/// up and down. Movement happens once per tick while a key is held.
#[derive(Debug)]
pub struct Player {
    camera: FlyCamera,
    config: PlayerConfig,
}

impl Player {
    pub const MOVEMENT_SCANCODES: [Scancode; 6] = [
        scancode::W,
        scancode::A,
        scancode::S,
        scancode::D,
        scancode::SPACE,
        scancode::LEFT_CONTROL,
    ];

    /// Create a player and bind its movement keys on `router`.
    ///
    /// Nothing is bound if any movement scancode is already taken. The
    /// bindings hold the player weakly and unbind themselves once it is
    /// dropped.
    pub fn spawn(
        router: &InputRouter,
        camera: FlyCamera,
        config: PlayerConfig,
    ) -> Result<Rc<RefCell<Player>>, PlayerError> {
        if let Some(taken) = Self::MOVEMENT_SCANCODES
            .into_iter()
            .find(|sc| router.bindings().is_bound(*sc))
        {
            return Err(PlayerError::BindingTaken(taken));
        }

        let player = Rc::new(RefCell::new(Player { camera, config }));
        let weak = Rc::downgrade(&player);
        let binding = key_binding(move |sc, action| match weak.upgrade() {
            Some(player) => {
                player.borrow_mut().step(sc, action);
                false
            }
            None => true,
        });
        for sc in Self::MOVEMENT_SCANCODES {
            router.add_key_callback(sc, binding.clone(), false);
        }
        tracing::debug!(window = router.handle().0, "player movement bound");
        Ok(player)
    }

    /// Apply one tick of movement for a held `scancode`.
    pub fn step(&mut self, scancode: Scancode, action: Action) {
        if action.is_release() {
            return;
        }
        let direction = match scancode {
            scancode::W => self.camera.horizontal_front(),
            scancode::S => -self.camera.horizontal_front(),
            scancode::A => -self.camera.right(),
            scancode::D => self.camera.right(),
            scancode::SPACE => self.camera.world_up,
            scancode::LEFT_CONTROL => -self.camera.world_up,
            _ => return,
        };
        self.camera
            .translate(direction * self.config.velocity * self.config.tick_delta);
    }

    pub fn position(&self) -> Vec3 {
        self.camera.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.camera.position = position;
    }

    pub fn velocity(&self) -> f32 {
        self.config.velocity
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.config.velocity = velocity;
    }

    pub fn config(&self) -> PlayerConfig {
        self.config
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_common::WindowHandle;
    use ember_input::RouterRegistry;

    fn config() -> PlayerConfig {
        PlayerConfig {
            velocity: 2.0,
            tick_delta: 0.5,
        }
    }

    #[test]
    fn step_moves_one_tick_along_each_axis() {
        let mut player = Player {
            camera: FlyCamera::default(),
            config: config(),
        };
        player.step(scancode::W, Action::Press);
        assert!((player.position() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        player.step(scancode::D, Action::Repeat);
        assert!((player.position() - Vec3::new(1.0, 0.0, -1.0)).length() < 1e-5);
        player.step(scancode::SPACE, Action::Press);
        player.step(scancode::LEFT_CONTROL, Action::Press);
        assert!((player.position() - Vec3::new(1.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn release_and_foreign_scancodes_do_not_move() {
        let mut player = Player {
            camera: FlyCamera::default(),
            config: config(),
        };
        player.step(scancode::W, Action::Release);
        player.step(scancode::Q, Action::Press);
        assert_eq!(player.position(), Vec3::ZERO);
    }

    #[test]
    fn walking_ignores_pitch() {
        let mut camera = FlyCamera::default();
        camera.pitch = 45.0_f32.to_radians();
        let mut player = Player {
            camera,
            config: config(),
        };
        player.step(scancode::W, Action::Press);
        assert_eq!(player.position().y, 0.0);
        assert!((player.position().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn spawn_binds_all_movement_scancodes() {
        let registry = RouterRegistry::new();
        let router = registry.attach(WindowHandle(1));
        let _player = Player::spawn(&router, FlyCamera::default(), config()).unwrap();
        assert!(Player::MOVEMENT_SCANCODES
            .iter()
            .all(|sc| router.bindings().is_bound(*sc)));
    }

    #[test]
    fn spawn_fails_without_binding_anything_when_a_key_is_taken() {
        let registry = RouterRegistry::new();
        let router = registry.attach(WindowHandle(1));
        router.add_key_callback(scancode::SPACE, key_binding(|_, _| false), false);

        let err = Player::spawn(&router, FlyCamera::default(), config()).unwrap_err();
        assert!(matches!(err, PlayerError::BindingTaken(sc) if sc == scancode::SPACE));
        assert!(!router.bindings().is_bound(scancode::W));
    }
}
