//! The controlled player entity.

use hopline_config::PlayerConfig;
use hopline_math::Vec2;

use crate::object::{Body, GameObject};
use crate::surface::{Color, Surface};

/// Vertical contact state.
///
/// Derived from the collision flag: the player is `Landed` for every frame
/// in which it rests on a block from above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    Airborne,
    Landed,
}

#[derive(Clone, Debug)]
pub struct Player {
    body: Body,
    is_colliding: bool,
    jump_count: u32,
    max_jumps: u32,
    collected: u32,
    gravity: f32,
    jump_speed: f32,
    run_speed: f32,
    max_fall_speed: f32,
}

impl Player {
    pub fn new(position: Vec2, config: &PlayerConfig) -> Self {
        Self {
            body: Body::new(position, Vec2::new(config.width, config.height)),
            is_colliding: false,
            jump_count: config.max_jumps,
            max_jumps: config.max_jumps,
            collected: 0,
            gravity: config.gravity,
            jump_speed: config.jump_speed,
            run_speed: config.run_speed,
            max_fall_speed: config.max_fall_speed,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn height(&self) -> f32 {
        self.body.size.y
    }

    /// True iff the player rested on a block from above during the last
    /// collision pass.
    pub fn is_colliding(&self) -> bool {
        self.is_colliding
    }

    pub(crate) fn set_colliding(&mut self, colliding: bool) {
        self.is_colliding = colliding;
    }

    pub fn contact(&self) -> Contact {
        if self.is_colliding {
            Contact::Landed
        } else {
            Contact::Airborne
        }
    }

    /// Jumps left before the next landing.
    pub fn jump_count(&self) -> u32 {
        self.jump_count
    }

    pub fn reset_jump_count(&mut self) {
        self.jump_count = self.max_jumps;
    }

    pub fn collected_count(&self) -> u32 {
        self.collected
    }

    pub fn collect(&mut self) {
        self.collected += 1;
    }

    /// Start a jump if one is left. Returns whether the player jumped.
    pub fn jump(&mut self) -> bool {
        if self.jump_count == 0 {
            return false;
        }
        self.jump_count -= 1;
        self.body.velocity.y = -self.jump_speed;
        self.is_colliding = false;
        true
    }

    /// Set horizontal speed as a multiple of the configured run speed
    /// (`1.0` runs right, `0.0` stops).
    pub fn run(&mut self, factor: f32) {
        self.body.velocity.x = self.run_speed * factor;
    }

    /// Stand on a surface whose top edge is at `top`: snap the feet onto it,
    /// stop vertical motion and restore all jumps.
    pub fn land_on(&mut self, top: f32) {
        self.body.position.y = top - self.body.size.y;
        self.body.velocity.y = 0.0;
        self.reset_jump_count();
    }
}

impl GameObject for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Gravity first, then integration, so a landing that zeroed the
    /// velocity still pulls the player back into contact next frame.
    fn update(&mut self, delta: f32) {
        let vy = self.body.velocity.y + self.gravity * delta;
        self.body.velocity.y = vy.min(self.max_fall_speed);
        self.body.integrate(delta);
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_rect(self.bounds(), Color::PLAYER);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Vec2::ZERO, &PlayerConfig::default())
    }

    #[test]
    fn test_new_player_has_all_jumps() {
        let p = player();
        assert_eq!(p.jump_count(), 2);
        assert_eq!(p.collected_count(), 0);
        assert_eq!(p.contact(), Contact::Airborne);
    }

    #[test]
    fn test_jump_consumes_count() {
        let mut p = player();
        assert!(p.jump());
        assert_eq!(p.velocity().y, -900.0);
        assert!(p.jump());
        assert!(!p.jump());
        assert_eq!(p.jump_count(), 0);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let mut p = player();
        p.set_colliding(true);
        assert_eq!(p.contact(), Contact::Landed);
        p.jump();
        assert_eq!(p.contact(), Contact::Airborne);
    }

    #[test]
    fn test_land_on_snaps_and_resets() {
        let mut p = player();
        p.jump();
        p.jump();
        p.body_mut().velocity.y = 250.0;
        p.land_on(16.0);
        assert_eq!(p.position().y, -16.0);
        assert_eq!(p.velocity().y, 0.0);
        assert_eq!(p.jump_count(), 2);
    }

    #[test]
    fn test_gravity_is_clamped() {
        let mut p = player();
        p.update(10.0);
        assert_eq!(p.velocity().y, 1500.0);
        assert_eq!(p.position().y, 15_000.0);
    }

    #[test]
    fn test_run_sets_horizontal_speed() {
        let mut p = player();
        p.run(1.0);
        p.update(0.5);
        assert_eq!(p.position().x, 150.0);
    }

    #[test]
    fn test_collect_counts() {
        let mut p = player();
        p.collect();
        p.collect();
        assert_eq!(p.collected_count(), 2);
    }
}
