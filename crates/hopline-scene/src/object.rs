//! The object model: shared kinematic state, the [`GameObject`] capability
//! trait, and the closed [`SceneObject`] union the scene stores.
//!
//! Collision policy is decided by matching on the [`SceneObject`] variant, not
//! by comparing category strings. [`Tag`] exists for logs and queries.

use std::fmt;

use hopline_math::{Rect, Vec2};

use crate::block::Block;
use crate::camera::Camera;
use crate::pickup::{Collectable, Hazard};
use crate::player::Player;
use crate::score::ScoreLabel;
use crate::surface::Surface;

/// Position, velocity and size shared by every object. Units are world
/// pixels and pixels per second.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Body {
    /// Top-left corner.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Width and height, both non-negative.
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x >= 0.0 && size.y >= 0.0, "negative size {size:?}");
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Current bounds, derived from position and size on every call.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Advance position by `velocity * delta`.
    pub fn integrate(&mut self, delta: f32) {
        self.position += self.velocity * delta;
    }
}

/// Per-frame behavior every scene object provides.
pub trait GameObject {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Advance internal state by `delta` seconds. Defaults to integrating
    /// velocity.
    fn update(&mut self, delta: f32) {
        self.body_mut().integrate(delta);
    }

    /// Draw at the current position. The surface already carries the
    /// camera's view transform.
    fn render(&self, surface: &mut dyn Surface);

    fn bounds(&self) -> Rect {
        self.body().bounds()
    }
}

/// Category label of a scene object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Player,
    Camera,
    Block,
    Collectable,
    /// Touching it ends the run. Never culled.
    Death,
    Score,
    /// Scenery supplied by the host; never collides.
    Prop,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Player => "player",
            Tag::Camera => "camera",
            Tag::Block => "block",
            Tag::Collectable => "collectable",
            Tag::Death => "death",
            Tag::Score => "score",
            Tag::Prop => "prop",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a scene can hold.
pub enum SceneObject {
    Player(Player),
    Camera(Camera),
    Block(Block),
    Collectable(Collectable),
    Hazard(Hazard),
    Score(ScoreLabel),
    Prop(Box<dyn GameObject>),
}

impl SceneObject {
    pub fn tag(&self) -> Tag {
        match self {
            SceneObject::Player(_) => Tag::Player,
            SceneObject::Camera(_) => Tag::Camera,
            SceneObject::Block(_) => Tag::Block,
            SceneObject::Collectable(_) => Tag::Collectable,
            SceneObject::Hazard(_) => Tag::Death,
            SceneObject::Score(_) => Tag::Score,
            SceneObject::Prop(_) => Tag::Prop,
        }
    }

    pub fn as_object(&self) -> &dyn GameObject {
        match self {
            SceneObject::Player(p) => p,
            SceneObject::Camera(c) => c,
            SceneObject::Block(b) => b,
            SceneObject::Collectable(c) => c,
            SceneObject::Hazard(h) => h,
            SceneObject::Score(s) => s,
            SceneObject::Prop(p) => p.as_ref(),
        }
    }

    pub fn as_object_mut(&mut self) -> &mut dyn GameObject {
        match self {
            SceneObject::Player(p) => p,
            SceneObject::Camera(c) => c,
            SceneObject::Block(b) => b,
            SceneObject::Collectable(c) => c,
            SceneObject::Hazard(h) => h,
            SceneObject::Score(s) => s,
            SceneObject::Prop(p) => p.as_mut(),
        }
    }

    pub fn body(&self) -> &Body {
        self.as_object().body()
    }

    pub fn position(&self) -> Vec2 {
        self.body().position
    }

    pub fn bounds(&self) -> Rect {
        self.as_object().bounds()
    }

    pub fn update(&mut self, delta: f32) {
        self.as_object_mut().update(delta);
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        self.as_object().render(surface);
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            SceneObject::Block(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            SceneObject::Player(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Debug for SceneObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bounds = self.bounds();
        write!(
            f,
            "{}({:.1}, {:.1}, {:.1}x{:.1})",
            self.tag(),
            bounds.left,
            bounds.top,
            bounds.width(),
            bounds.height()
        )
    }
}

impl From<Player> for SceneObject {
    fn from(player: Player) -> Self {
        SceneObject::Player(player)
    }
}

impl From<Camera> for SceneObject {
    fn from(camera: Camera) -> Self {
        SceneObject::Camera(camera)
    }
}

impl From<Block> for SceneObject {
    fn from(block: Block) -> Self {
        SceneObject::Block(block)
    }
}

impl From<Collectable> for SceneObject {
    fn from(collectable: Collectable) -> Self {
        SceneObject::Collectable(collectable)
    }
}

impl From<Hazard> for SceneObject {
    fn from(hazard: Hazard) -> Self {
        SceneObject::Hazard(hazard)
    }
}

impl From<ScoreLabel> for SceneObject {
    fn from(score: ScoreLabel) -> Self {
        SceneObject::Score(score)
    }
}

impl From<Box<dyn GameObject>> for SceneObject {
    fn from(prop: Box<dyn GameObject>) -> Self {
        SceneObject::Prop(prop)
    }
}
