//! Scene update loop for a 2D side-scrolling platformer.
//!
//! A [`Scene`] owns the world's objects and drives one frame per
//! [`Scene::render`] call: update, player collision, drawing through a
//! [`Surface`], deferred add/remove and culling of objects left far behind
//! the camera.

mod arena;
mod block;
mod camera;
mod clock;
mod collision;
mod log;
mod object;
mod pickup;
mod player;
mod scene;
mod score;
mod surface;

pub use arena::ObjectId;
pub use block::Block;
pub use camera::Camera;
pub use clock::{Clock, ManualClock, SystemClock};
pub use collision::{BlockContact, Sweep, classify_block_contact};
pub use log::{
    COLLISION_TARGET, Channel, MemoryLog, POPULATION_TARGET, SceneLog, Timestamp, TracingLog,
};
pub use object::{Body, GameObject, SceneObject, Tag};
pub use pickup::{Collectable, Hazard};
pub use player::{Contact, Player};
pub use scene::Scene;
pub use score::ScoreLabel;
pub use surface::{Color, DrawCommand, RecordingSurface, Surface};
