//! Solid platforms.

use hopline_config::BlockConfig;
use hopline_math::Vec2;

use crate::object::{Body, GameObject};
use crate::surface::{Color, Surface};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Crumble {
    Intact,
    /// Ends when either the time or the frame allowance runs out, so a
    /// stalled clock still removes the block.
    Scheduled { remaining: f32, frames_left: u32 },
    Destroyed,
}

/// A platform the player lands on. Destructible blocks crumble a short
/// while after the first landing; the scene removes them once
/// [`Block::is_destroyed`] reports true.
#[derive(Clone, Debug)]
pub struct Block {
    body: Body,
    destructible: bool,
    crumble: Crumble,
    crumble_seconds: f32,
    crumble_frame_limit: u32,
}

impl Block {
    pub fn solid(position: Vec2, size: Vec2) -> Self {
        Self {
            body: Body::new(position, size),
            destructible: false,
            crumble: Crumble::Intact,
            crumble_seconds: 0.0,
            crumble_frame_limit: 1,
        }
    }

    pub fn destructible(position: Vec2, size: Vec2, config: &BlockConfig) -> Self {
        Self {
            destructible: true,
            crumble_seconds: config.crumble_seconds,
            crumble_frame_limit: config.crumble_frame_limit.max(1),
            ..Self::solid(position, size)
        }
    }

    pub fn is_destructible(&self) -> bool {
        self.destructible
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.crumble, Crumble::Scheduled { .. })
    }

    pub fn is_destroyed(&self) -> bool {
        self.crumble == Crumble::Destroyed
    }

    /// Start the crumble countdown. Only the first call on a destructible
    /// block has any effect; returns whether this call started it.
    pub fn schedule_destruct(&mut self) -> bool {
        if !self.destructible || self.crumble != Crumble::Intact {
            return false;
        }
        self.crumble = Crumble::Scheduled {
            remaining: self.crumble_seconds,
            frames_left: self.crumble_frame_limit,
        };
        true
    }
}

impl GameObject for Block {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta: f32) {
        self.body.integrate(delta);
        if let Crumble::Scheduled {
            remaining,
            frames_left,
        } = self.crumble
        {
            let remaining = remaining - delta;
            let frames_left = frames_left.saturating_sub(1);
            self.crumble = if remaining <= 0.0 || frames_left == 0 {
                Crumble::Destroyed
            } else {
                Crumble::Scheduled {
                    remaining,
                    frames_left,
                }
            };
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        let color = match self.crumble {
            Crumble::Intact => Color::BLOCK,
            _ => Color::CRUMBLING,
        };
        surface.fill_rect(self.bounds(), color);
    }
}
