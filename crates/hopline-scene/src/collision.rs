//! Player-versus-block contact rules and the downward sweep.

use hopline_config::SweepPolicy;
use hopline_math::Rect;

/// How a player overlapping a block relates to it this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockContact {
    /// Moving up through the block from below. Ignored.
    Rising,
    /// The overlap does not reach the player's feet. Ignored.
    Side,
    /// Feet inside the block and either barely in or not previously
    /// resting: snap onto the top.
    Landing,
    /// Deeply embedded while already resting. Left alone, and does not keep
    /// the player flagged as colliding, so the next frame lands afresh.
    Resting,
}

impl BlockContact {
    /// True only for a new collision, the one contact that flags the player
    /// as colliding this frame.
    pub fn is_new_collision(self) -> bool {
        self == BlockContact::Landing
    }
}

/// Classify an overlap between the player (`player`, the rectangle that was
/// tested) and a block, given the overlap region `hit`.
///
/// `was_colliding` is the player's flag from the previous frame.
pub fn classify_block_contact(
    velocity_y: f32,
    was_colliding: bool,
    player: Rect,
    hit: Rect,
    landing_threshold: f32,
) -> BlockContact {
    if velocity_y < 0.0 {
        return BlockContact::Rising;
    }
    if hit.bottom != player.bottom {
        return BlockContact::Side;
    }
    let near_top = hit.height() < landing_threshold;
    if near_top || !was_colliding {
        BlockContact::Landing
    } else {
        BlockContact::Resting
    }
}

/// Upward extension of the player's rectangle that covers the distance
/// fallen this frame, so a fast fall does not tunnel through a thin block.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sweep {
    policy: SweepPolicy,
    carried: f32,
}

impl Sweep {
    pub fn new(policy: SweepPolicy) -> Self {
        Self {
            policy,
            carried: 0.0,
        }
    }

    pub fn policy(&self) -> SweepPolicy {
        self.policy
    }

    /// Extension for a frame in which the player moved with `velocity_y`
    /// for `delta` seconds. Rising or still frames add nothing.
    ///
    /// `PerFrame` returns this frame's fall only. `Accumulate` adds it to
    /// every previous frame's fall and never resets.
    pub fn advance(&mut self, velocity_y: f32, delta: f32) -> f32 {
        let fall = if velocity_y > 0.0 {
            velocity_y * delta
        } else {
            0.0
        };
        match self.policy {
            SweepPolicy::PerFrame => fall,
            SweepPolicy::Accumulate => {
                self.carried += fall;
                self.carried
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopline_math::Vec2;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_origin_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_rising_is_ignored() {
        let player = rect(0.0, 0.0, 32.0, 32.0);
        let hit = rect(0.0, 28.0, 32.0, 4.0);
        assert_eq!(
            classify_block_contact(-10.0, false, player, hit, 16.0),
            BlockContact::Rising
        );
    }

    #[test]
    fn test_head_bump_is_side_contact() {
        // Block overlaps the top of the player only.
        let player = rect(0.0, 0.0, 32.0, 32.0);
        let block = rect(0.0, -10.0, 64.0, 20.0);
        let hit = player.intersect(&block).unwrap();
        assert_eq!(
            classify_block_contact(5.0, false, player, hit, 16.0),
            BlockContact::Side
        );
    }

    #[test]
    fn test_near_top_lands_even_when_resting() {
        let player = rect(0.0, -8.0, 32.0, 32.0);
        let block = rect(0.0, 16.0, 64.0, 8.0);
        let hit = player.intersect(&block).unwrap();
        assert_eq!(hit, rect(0.0, 16.0, 32.0, 8.0));
        for was in [false, true] {
            assert_eq!(
                classify_block_contact(0.0, was, player, hit, 16.0),
                BlockContact::Landing
            );
        }
    }

    #[test]
    fn test_deep_overlap() {
        let player = rect(0.0, 0.0, 32.0, 32.0);
        let block = rect(0.0, 10.0, 64.0, 40.0);
        let hit = player.intersect(&block).unwrap();
        assert_eq!(hit.height(), 22.0);
        assert_eq!(
            classify_block_contact(0.0, true, player, hit, 16.0),
            BlockContact::Resting
        );
        assert_eq!(
            classify_block_contact(0.0, false, player, hit, 16.0),
            BlockContact::Landing
        );
    }

    #[test]
    fn test_only_landing_is_new_collision() {
        assert!(BlockContact::Landing.is_new_collision());
        assert!(!BlockContact::Resting.is_new_collision());
        assert!(!BlockContact::Side.is_new_collision());
        assert!(!BlockContact::Rising.is_new_collision());
    }

    #[test]
    fn test_per_frame_sweep_resets() {
        let mut sweep = Sweep::new(SweepPolicy::PerFrame);
        assert_eq!(sweep.advance(100.0, 0.5), 50.0);
        assert_eq!(sweep.advance(100.0, 0.25), 25.0);
        assert_eq!(sweep.advance(-100.0, 0.25), 0.0);
    }

    #[test]
    fn test_accumulate_sweep_grows() {
        let mut sweep = Sweep::new(SweepPolicy::Accumulate);
        assert_eq!(sweep.advance(100.0, 0.5), 50.0);
        assert_eq!(sweep.advance(-100.0, 0.5), 50.0);
        assert_eq!(sweep.advance(100.0, 0.25), 75.0);
    }
}
