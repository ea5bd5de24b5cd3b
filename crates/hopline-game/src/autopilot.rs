//! Scripted input for headless runs: run right, jump over gaps.

use hopline_math::Rect;
use hopline_scene::{Contact, GameObject, Player, Scene};

/// Slack when comparing the player's feet with a platform top.
const FOOTING_TOLERANCE: f32 = 4.0;

pub struct Autopilot {
    /// How far past the player's leading edge to look for ground.
    lookahead: f32,
    jumps: u32,
}

impl Autopilot {
    pub fn new(lookahead: f32) -> Self {
        Self {
            lookahead,
            jumps: 0,
        }
    }

    /// Jumps issued so far.
    pub fn jumps(&self) -> u32 {
        self.jumps
    }

    /// Keep the player running and jump when the ground ahead ends. While
    /// falling with nothing below, spend the spare jump.
    pub fn steer(&mut self, scene: &mut Scene) {
        let jump = should_jump(scene, scene.player(), self.lookahead);
        let player = scene.player_mut();
        player.run(1.0);
        if jump && player.jump() {
            self.jumps += 1;
        }
    }
}

fn should_jump(scene: &Scene, player: &Player, lookahead: f32) -> bool {
    let bounds = player.bounds();
    match player.contact() {
        Contact::Landed => {
            let probe = bounds.right + lookahead;
            !blocks(scene).any(|b| {
                covers(&b, probe) && (b.top - bounds.bottom).abs() <= FOOTING_TOLERANCE
            })
        }
        Contact::Airborne => {
            let probe = bounds.center().x + lookahead;
            player.velocity().y > 0.0
                && player.jump_count() > 0
                && !blocks(scene)
                    .any(|b| covers(&b, probe) && b.top >= bounds.bottom - FOOTING_TOLERANCE)
        }
    }
}

fn blocks(scene: &Scene) -> impl Iterator<Item = Rect> + '_ {
    scene
        .objects()
        .filter(|(_, object)| object.as_block().is_some())
        .map(|(_, object)| object.bounds())
}

fn covers(rect: &Rect, x: f32) -> bool {
    rect.left <= x && x <= rect.right
}
