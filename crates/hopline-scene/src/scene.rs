//! The per-frame scene driver.
//!
//! A [`Scene`] owns every object, runs one frame per [`Scene::render`] call
//! and is the only place the object collection changes. Structural changes
//! requested while a frame is running go through the pending-add and
//! pending-remove queues and are applied at fixed points later in the frame.

use hopline_config::SceneConfig;
use hopline_math::Vec2;

use crate::arena::{ObjectArena, ObjectId};
use crate::camera::Camera;
use crate::clock::Clock;
use crate::collision::{BlockContact, Sweep, classify_block_contact};
use crate::log::{FrameLog, SceneLog};
use crate::object::{GameObject, SceneObject, Tag};
use crate::player::Player;
use crate::score::ScoreLabel;
use crate::surface::Surface;

/// Orchestrates update, collision, drawing and population for one level.
///
/// The player, camera and score label must be registered with
/// [`set_player`](Self::set_player), [`set_camera`](Self::set_camera) and
/// [`set_score`](Self::set_score) before the first frame.
pub struct Scene {
    config: SceneConfig,
    clock: Box<dyn Clock>,
    log: FrameLog,
    arena: ObjectArena,
    /// The main collection. Drives update, collision and draw order.
    order: Vec<ObjectId>,
    /// Already stored in the arena, appended to `order` at the flush.
    pending_add: Vec<ObjectId>,
    pending_remove: Vec<ObjectId>,
    player: Option<ObjectId>,
    camera: Option<ObjectId>,
    score: Option<ObjectId>,
    sweep: Sweep,
    last_frame_millis: u64,
    frame_count: u64,
    game_over: bool,
}

impl Scene {
    pub fn new(config: SceneConfig, clock: Box<dyn Clock>, log: Box<dyn SceneLog>) -> Self {
        let sweep = Sweep::new(config.sweep_policy);
        Self {
            config,
            clock,
            log: FrameLog::new(log),
            arena: ObjectArena::new(),
            order: Vec::new(),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            player: None,
            camera: None,
            score: None,
            sweep,
            last_frame_millis: 0,
            frame_count: 0,
            game_over: false,
        }
    }

    /// Insert an object into the main collection immediately.
    ///
    /// Must not be called while a frame is running; game code reacting to
    /// the simulation uses [`delayed_add_object`](Self::delayed_add_object).
    pub fn add_object(&mut self, object: impl Into<SceneObject>) -> ObjectId {
        let object = object.into();
        let tag = object.tag();
        let id = self.arena.insert(object);
        self.order.push(id);
        self.log.population(format_args!("added {tag} {id}"));
        id
    }

    /// Register the player. A second call replaces the handle; the earlier
    /// player stays in the collection as an ordinary object.
    pub fn set_player(&mut self, player: Player) -> ObjectId {
        let id = self.add_object(player);
        self.player = Some(id);
        id
    }

    pub fn set_camera(&mut self, camera: Camera) -> ObjectId {
        let id = self.add_object(camera);
        self.camera = Some(id);
        id
    }

    pub fn set_score(&mut self, score: ScoreLabel) -> ObjectId {
        let id = self.add_object(score);
        self.score = Some(id);
        id
    }

    /// Queue an object to join the collection at the end of the current (or
    /// next) frame. It is not updated, collided or drawn until then.
    pub fn delayed_add_object(&mut self, object: impl Into<SceneObject>) -> ObjectId {
        let id = self.arena.insert(object.into());
        self.pending_add.push(id);
        id
    }

    /// Queue an object for removal at the next flush. Requests are not
    /// deduplicated; a repeated request finds nothing and does nothing.
    pub fn delayed_remove_object(&mut self, id: ObjectId) {
        self.pending_remove.push(id);
    }

    /// Run one frame: read the clock, update, collide, draw, flush the
    /// queues and cull.
    ///
    /// # Panics
    ///
    /// If the player, camera or score label has not been set.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        let now = self.clock.now_millis();
        if self.last_frame_millis == 0 {
            self.last_frame_millis = now;
        }
        let delta = now.saturating_sub(self.last_frame_millis) as f32 / 1000.0;
        self.last_frame_millis = now;
        self.frame_count += 1;
        self.log.set_frame_time(now);

        self.update_objects(delta);
        self.track_camera();
        self.resolve_collisions(delta);
        self.sync_score();
        self.draw(surface);
        self.flush_removals();
        self.flush_additions();
        self.draw_score(surface);
        self.cull();
    }

    /// Score label text.
    pub fn score(&self) -> String {
        self.score_label().score()
    }

    pub fn score_label(&self) -> &ScoreLabel {
        let id = self.score_id();
        match self.arena.get(id) {
            Some(SceneObject::Score(label)) => label,
            _ => panic!("score label {id} is no longer in the scene"),
        }
    }

    pub fn player(&self) -> &Player {
        let id = self.player_id();
        match self.arena.get(id) {
            Some(SceneObject::Player(player)) => player,
            _ => panic!("player {id} is no longer in the scene"),
        }
    }

    pub fn player_mut(&mut self) -> &mut Player {
        let id = self.player_id();
        match self.arena.get_mut(id) {
            Some(SceneObject::Player(player)) => player,
            _ => panic!("player {id} is no longer in the scene"),
        }
    }

    pub fn camera(&self) -> &Camera {
        let id = self.camera_id();
        match self.arena.get(id) {
            Some(SceneObject::Camera(camera)) => camera,
            _ => panic!("camera {id} is no longer in the scene"),
        }
    }

    /// Number of objects in the main collection, excluding pending adds.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids of the main collection in draw order.
    pub fn ids(&self) -> &[ObjectId] {
        &self.order
    }

    /// Objects of the main collection in draw order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.arena.get(id).map(|object| (id, object)))
    }

    /// Look up an object, including one still waiting in the add queue.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.arena.get(id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn GameObject> {
        self.arena.get_mut(id).map(SceneObject::as_object_mut)
    }

    /// True if `id` is in the main collection.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.arena.is_alive(id) && !self.pending_add.contains(&id)
    }

    pub fn pending_add_len(&self) -> usize {
        self.pending_add.len()
    }

    pub fn pending_remove_len(&self) -> usize {
        self.pending_remove.len()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_frame_millis(&self) -> u64 {
        self.last_frame_millis
    }

    /// World x of the camera's tracked position.
    pub fn scroll_x(&self) -> f32 {
        self.camera().position().x
    }

    /// Screen size the camera was built with.
    pub fn viewport(&self) -> Vec2 {
        self.camera().viewport()
    }

    /// Set once the player touches a hazard. The scene keeps simulating.
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn player_id(&self) -> ObjectId {
        self.player
            .unwrap_or_else(|| panic!("no player set: call Scene::set_player before rendering"))
    }

    fn camera_id(&self) -> ObjectId {
        self.camera
            .unwrap_or_else(|| panic!("no camera set: call Scene::set_camera before rendering"))
    }

    fn score_id(&self) -> ObjectId {
        self.score
            .unwrap_or_else(|| panic!("no score label set: call Scene::set_score before rendering"))
    }

    fn update_objects(&mut self, delta: f32) {
        for &id in &self.order {
            let Some(object) = self.arena.get_mut(id) else {
                continue;
            };
            object.update(delta);
            if let SceneObject::Block(block) = object
                && block.is_destroyed()
            {
                self.pending_remove.push(id);
                self.log.population(format_args!("block {id} crumbled"));
            }
        }
    }

    fn track_camera(&mut self) {
        let target = self.player().position();
        let id = self.camera_id();
        match self.arena.get_mut(id) {
            Some(SceneObject::Camera(camera)) => camera.track(target),
            _ => panic!("camera {id} is no longer in the scene"),
        }
    }

    fn resolve_collisions(&mut self, delta: f32) {
        let player_id = self.player_id();
        let mut taken = self
            .arena
            .take(player_id)
            .unwrap_or_else(|| panic!("player {player_id} is no longer in the scene"));
        let SceneObject::Player(player) = &mut taken else {
            unreachable!("player handle {player_id} does not hold a player");
        };

        // The player's own slot is checked out, so the scan below skips it.
        let extension = self.sweep.advance(player.velocity().y, delta);
        let player_bounds = player.bounds().extend_top(extension);
        let was_colliding = player.is_colliding();
        let mut colliding = false;

        for &id in &self.order {
            let Some(object) = self.arena.get_mut(id) else {
                continue;
            };
            let Some(hit) = player_bounds.intersect(&object.bounds()) else {
                continue;
            };
            match object {
                SceneObject::Block(block) => {
                    let contact = classify_block_contact(
                        player.velocity().y,
                        was_colliding,
                        player_bounds,
                        hit,
                        self.config.landing_threshold,
                    );
                    colliding |= contact.is_new_collision();
                    if contact == BlockContact::Landing {
                        let top = block.bounds().top;
                        player.land_on(top);
                        self.log.collision(format_args!(
                            "landed on block {id}, top {top:.1}, overlap {:.1}",
                            hit.height()
                        ));
                        if block.schedule_destruct() {
                            self.log
                                .collision(format_args!("block {id} scheduled to crumble"));
                        }
                    } else {
                        self.log
                            .collision(format_args!("{contact:?} contact with block {id}"));
                    }
                }
                SceneObject::Collectable(_) => {
                    player.collect();
                    self.pending_remove.push(id);
                    self.log.collision(format_args!(
                        "collected {id}, total {}",
                        player.collected_count()
                    ));
                }
                SceneObject::Hazard(_) => {
                    self.game_over = true;
                    self.log.collision(format_args!("touched hazard {id}"));
                }
                _ => {}
            }
        }

        player.set_colliding(colliding);
        self.arena.put_back(player_id, taken);
    }

    fn sync_score(&mut self) {
        let player = self.player();
        let (collected, x) = (player.collected_count(), player.position().x);
        let id = self.score_id();
        match self.arena.get_mut(id) {
            Some(SceneObject::Score(label)) => label.record(collected, x),
            _ => panic!("score label {id} is no longer in the scene"),
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.set_transform(self.camera().view_transform());
        for (id, object) in self.objects() {
            if Some(id) != self.score {
                object.render(surface);
            }
        }
    }

    fn draw_score(&self, surface: &mut dyn Surface) {
        self.score_label().render(surface);
    }

    fn flush_removals(&mut self) {
        for id in std::mem::take(&mut self.pending_remove) {
            match self.order.iter().position(|&entry| entry == id) {
                Some(index) => {
                    self.order.remove(index);
                    if let Some(object) = self.arena.remove(id) {
                        self.log
                            .population(format_args!("removed {} {id}", object.tag()));
                    }
                    self.forget_handle(id);
                }
                None => self
                    .log
                    .population(format_args!("remove {id}: not in the scene")),
            }
        }
    }

    fn flush_additions(&mut self) {
        for id in std::mem::take(&mut self.pending_add) {
            if let Some(object) = self.arena.get(id) {
                self.log
                    .population(format_args!("spawned {} {id}", object.tag()));
                self.order.push(id);
            }
        }
    }

    /// Drop everything that fell more than `cull_distance` behind the
    /// camera, except hazards and the registered player, camera and score.
    fn cull(&mut self) {
        let limit = self.camera().position().x - self.config.cull_distance;
        let keep = [self.player, self.camera, self.score];
        let before = self.order.len();
        self.order.retain(|&id| {
            let Some(object) = self.arena.get(id) else {
                return true;
            };
            if object.tag() == Tag::Death || keep.contains(&Some(id)) {
                return true;
            }
            if object.position().x >= limit {
                return true;
            }
            let tag = object.tag();
            self.arena.remove(id);
            self.log.population(format_args!("culled {tag} {id}"));
            false
        });
        debug_assert_eq!(self.arena.len(), self.order.len() + self.pending_add.len());
        let culled = before - self.order.len();
        if culled > 0 {
            self.log.population(format_args!(
                "culled {culled} behind x={limit:.1}, {} left",
                self.order.len()
            ));
        }
    }

    fn forget_handle(&mut self, id: ObjectId) {
        for handle in [&mut self.player, &mut self.camera, &mut self.score] {
            if *handle == Some(id) {
                *handle = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;
    use crate::clock::ManualClock;
    use crate::log::{Channel, MemoryLog};
    use crate::object::Body;
    use crate::pickup::{Collectable, Hazard};
    use crate::surface::{Color, RecordingSurface};
    use hopline_config::{BlockConfig, PlayerConfig, SweepPolicy};
    use hopline_math::Rect;

    struct Marker {
        body: Body,
    }

    impl GameObject for Marker {
        fn body(&self) -> &Body {
            &self.body
        }

        fn body_mut(&mut self) -> &mut Body {
            &mut self.body
        }

        fn render(&self, surface: &mut dyn Surface) {
            surface.fill_rect(self.bounds(), Color::WHITE);
        }
    }

    fn marker(x: f32, y: f32) -> SceneObject {
        SceneObject::Prop(Box::new(Marker {
            body: Body::new(Vec2::new(x, y), Vec2::new(4.0, 4.0)),
        }))
    }

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_origin_size(Vec2::new(x, y), Vec2::new(w, h))
    }

    struct Harness {
        scene: Scene,
        clock: ManualClock,
        log: MemoryLog,
        surface: RecordingSurface,
    }

    impl Harness {
        fn new() -> Self {
            Self::with(SceneConfig::default(), PlayerConfig::default())
        }

        fn with(config: SceneConfig, player: PlayerConfig) -> Self {
            let clock = ManualClock::starting_at(1_000);
            let log = MemoryLog::new();
            let mut scene = Scene::new(config, Box::new(clock.clone()), Box::new(log.clone()));
            scene.set_camera(Camera::new(
                Vec2::ZERO,
                Vec2::new(960.0, 540.0),
                Vec2::new(0.3, 0.5),
            ));
            scene.set_player(Player::new(Vec2::new(0.0, -8.0), &player));
            scene.set_score(ScoreLabel::new(Vec2::new(16.0, 16.0), 50));
            Self {
                scene,
                clock,
                log,
                surface: RecordingSurface::new(),
            }
        }

        fn frame(&mut self) {
            self.surface.clear();
            self.scene.render(&mut self.surface);
        }

        fn frame_after(&mut self, millis: u64) {
            self.clock.advance(millis);
            self.frame();
        }

        fn place_player(&mut self, x: f32, y: f32) {
            self.scene.player_mut().body_mut().position = Vec2::new(x, y);
        }
    }

    #[test]
    fn test_landing_scenario() {
        let mut h = Harness::new();
        h.scene.add_object(Block::solid(Vec2::new(0.0, 16.0), Vec2::new(64.0, 8.0)));
        h.scene.player_mut().jump();
        h.scene.player_mut().body_mut().velocity.y = 0.0;
        assert_eq!(h.scene.player().jump_count(), 1);

        h.frame();

        let player = h.scene.player();
        assert_eq!(player.position().y, -16.0);
        assert_eq!(player.velocity().y, 0.0);
        assert_eq!(player.jump_count(), 2);
        assert!(player.is_colliding());
        assert_eq!(player.contact(), crate::player::Contact::Landed);
    }

    #[test]
    fn test_near_top_landing_snaps_while_already_resting() {
        let mut h = Harness::new();
        h.scene.add_object(Block::solid(Vec2::new(0.0, 16.0), Vec2::new(64.0, 8.0)));
        h.frame();
        assert!(h.scene.player().is_colliding());

        h.place_player(0.0, -10.0);
        h.frame();
        assert_eq!(h.scene.player().position().y, -16.0);
        assert!(h.scene.player().is_colliding());
    }

    #[test]
    fn test_deep_overlap_while_resting_changes_nothing() {
        let mut h = Harness::new();
        h.scene.add_object(Block::solid(Vec2::new(0.0, 16.0), Vec2::new(64.0, 40.0)));
        h.frame();
        assert!(h.scene.player().is_colliding());

        // Clock not advanced: delta stays zero.
        h.place_player(0.0, 4.0);
        h.scene.player_mut().body_mut().velocity.y = 5.0;
        h.frame();
        let player = h.scene.player();
        assert_eq!(player.position().y, 4.0);
        assert_eq!(player.velocity().y, 5.0);
        assert!(!player.is_colliding());

        // No longer flagged, so the same overlap now counts as a landing.
        h.frame();
        let player = h.scene.player();
        assert_eq!(player.position().y, -16.0);
        assert!(player.is_colliding());
    }

    #[test]
    fn test_frame_hitch_into_thick_block_resnaps() {
        let mut h = Harness::new();
        h.scene.add_object(Block::solid(Vec2::new(0.0, 16.0), Vec2::new(64.0, 200.0)));
        h.frame();
        assert_eq!(h.scene.player().position().y, -16.0);

        // A long frame drops the feet deep into the block.
        h.frame_after(100);
        assert!(h.scene.player().position().y > 0.0);
        assert!(!h.scene.player().is_colliding());

        h.frame_after(16);
        let player = h.scene.player();
        assert_eq!(player.position().y, -16.0);
        assert_eq!(player.velocity().y, 0.0);
        assert!(player.is_colliding());
    }

    #[test]
    fn test_deep_overlap_lands_when_not_resting() {
        let mut h = Harness::new();
        h.scene.add_object(Block::solid(Vec2::new(0.0, 16.0), Vec2::new(64.0, 40.0)));
        h.place_player(0.0, 4.0);
        h.frame();
        assert_eq!(h.scene.player().position().y, -16.0);
    }

    #[test]
    fn test_rising_player_passes_through() {
        let mut h = Harness::new();
        h.scene.add_object(Block::solid(Vec2::new(0.0, 16.0), Vec2::new(64.0, 8.0)));
        h.scene.player_mut().body_mut().velocity.y = -100.0;
        h.frame();
        let player = h.scene.player();
        assert_eq!(player.position().y, -8.0);
        assert!(!player.is_colliding());
    }

    #[test]
    fn test_side_contact_is_ignored() {
        let mut h = Harness::new();
        // Feet below the block: the overlap stops short of the player's bottom.
        h.scene.add_object(Block::solid(Vec2::new(-60.0, 0.0), Vec2::new(64.0, 8.0)));
        h.frame();
        assert_eq!(h.scene.player().position().y, -8.0);
        assert!(!h.scene.player().is_colliding());
    }

    #[test]
    fn test_leaving_the_block_clears_colliding() {
        let mut h = Harness::new();
        h.scene.add_object(Block::solid(Vec2::new(0.0, 16.0), Vec2::new(64.0, 8.0)));
        h.frame();
        assert!(h.scene.player().is_colliding());

        h.place_player(200.0, -16.0);
        h.frame();
        assert!(!h.scene.player().is_colliding());
    }

    #[test]
    fn test_collectable_counts_once_and_leaves_at_flush() {
        let mut h = Harness::new();
        let coin = h.scene.add_object(Collectable::new(Vec2::new(8.0, 0.0), Vec2::new(8.0, 8.0)));

        h.frame();
        assert_eq!(h.scene.player().collected_count(), 1);
        assert!(!h.scene.contains(coin));
        assert_eq!(h.scene.pending_remove_len(), 0);
        // Still drawn in the frame it was collected.
        assert!(h.surface.rects().contains(&rect(8.0, 0.0, 8.0, 8.0)));

        h.frame();
        assert_eq!(h.scene.player().collected_count(), 1);
        assert!(!h.surface.rects().contains(&rect(8.0, 0.0, 8.0, 8.0)));
    }

    #[test]
    fn test_hazard_ends_game_but_scan_continues() {
        let mut h = Harness::new();
        let hazard = h.scene.add_object(Hazard::new(Vec2::new(0.0, 0.0), Vec2::new(8.0, 8.0)));
        h.scene.add_object(Collectable::new(Vec2::new(8.0, 0.0), Vec2::new(8.0, 8.0)));

        h.frame();
        assert!(h.scene.is_game_over());
        assert!(h.scene.contains(hazard));
        assert_eq!(h.scene.player().collected_count(), 1);

        h.frame();
        assert!(h.scene.is_game_over());
        assert_eq!(h.scene.frame_count(), 2);
    }

    #[test]
    fn test_render_order_is_insertion_order() {
        let mut h = Harness::new();
        h.scene.add_object(marker(300.0, 0.0));
        h.scene.add_object(marker(100.0, 0.0));
        h.scene.add_object(marker(200.0, 0.0));

        h.frame();
        let xs: Vec<f32> = h.surface.rects().iter().map(|r| r.left).collect();
        assert_eq!(xs, vec![0.0, 300.0, 100.0, 200.0]);
        assert_eq!(h.surface.texts(), vec!["Score: 0"]);
        assert_eq!(h.scene.len(), 6);
    }

    #[test]
    fn test_score_label_draws_last_in_screen_space() {
        let mut h = Harness::new();
        h.scene.add_object(marker(100.0, 0.0));
        h.scene.delayed_add_object(marker(200.0, 0.0));
        h.frame();

        match h.surface.commands.last() {
            Some(crate::surface::DrawCommand::Text { text, position, .. }) => {
                assert_eq!(text, "Score: 0");
                assert_eq!(*position, Vec2::new(16.0, 16.0));
            }
            other => panic!("expected score text last, got {other:?}"),
        }
    }

    #[test]
    fn test_delayed_add_joins_after_draw() {
        let mut h = Harness::new();
        let late = h.scene.delayed_add_object(marker(50.0, 0.0));
        assert!(!h.scene.contains(late));
        assert!(h.scene.get(late).is_some());
        assert_eq!(h.scene.pending_add_len(), 1);

        h.frame();
        assert!(h.scene.contains(late));
        assert_eq!(h.scene.ids().last(), Some(&late));
        assert_eq!(h.scene.pending_add_len(), 0);
        assert!(!h.surface.rects().contains(&rect(50.0, 0.0, 4.0, 4.0)));

        h.frame();
        assert!(h.surface.rects().contains(&rect(50.0, 0.0, 4.0, 4.0)));
    }

    #[test]
    fn test_delayed_adds_keep_enqueue_order() {
        let mut h = Harness::new();
        let a = h.scene.delayed_add_object(marker(1.0, 0.0));
        let b = h.scene.delayed_add_object(marker(2.0, 0.0));
        h.frame();
        assert_eq!(&h.scene.ids()[3..], &[a, b]);
    }

    #[test]
    fn test_duplicate_remove_is_logged_noop() {
        let mut h = Harness::new();
        let id = h.scene.add_object(marker(10.0, 0.0));
        h.scene.delayed_remove_object(id);
        h.scene.delayed_remove_object(id);
        assert_eq!(h.scene.pending_remove_len(), 2);

        h.frame();
        assert!(!h.scene.contains(id));
        assert_eq!(h.scene.len(), 3);
        let lines = h.log.lines(Channel::Population);
        assert!(lines.iter().any(|l| l.ends_with(&format!("removed prop {id}"))));
        assert!(lines.iter().any(|l| l.ends_with(&format!("remove {id}: not in the scene"))));
    }

    #[test]
    fn test_stale_id_does_not_alias_new_object() {
        let mut h = Harness::new();
        let old = h.scene.add_object(marker(10.0, 0.0));
        h.scene.delayed_remove_object(old);
        h.frame();
        let new = h.scene.add_object(marker(20.0, 0.0));
        assert_eq!(old.index(), new.index());
        assert!(h.scene.get(old).is_none());

        h.scene.delayed_remove_object(old);
        h.frame();
        assert!(h.scene.contains(new));
    }

    #[test]
    fn test_pending_removal_still_updates_that_frame() {
        let mut h = Harness::new();
        let id = h.scene.add_object(SceneObject::Prop(Box::new(Marker {
            body: Body::new(Vec2::new(100.0, 0.0), Vec2::new(4.0, 4.0))
                .with_velocity(Vec2::new(100.0, 0.0)),
        })));
        h.frame();
        h.scene.delayed_remove_object(id);

        h.frame_after(100);
        assert!(h.surface.rects().contains(&rect(110.0, 0.0, 4.0, 4.0)));
        assert!(!h.scene.contains(id));
    }

    #[test]
    fn test_culling_spares_hazards() {
        let mut h = Harness::new();
        let far_block = h.scene.add_object(Block::solid(Vec2::new(1000.0, 600.0), Vec2::new(64.0, 8.0)));
        let near_block = h.scene.add_object(Block::solid(Vec2::new(2500.0, 600.0), Vec2::new(64.0, 8.0)));
        let far_hazard = h.scene.add_object(Hazard::new(Vec2::new(1000.0, 700.0), Vec2::new(64.0, 8.0)));
        h.place_player(5000.0, -8.0);

        h.frame();
        assert_eq!(h.scene.scroll_x(), 5000.0);
        assert!(!h.scene.contains(far_block));
        assert!(h.scene.contains(near_block));
        assert!(h.scene.contains(far_hazard));
        assert!(h.log.lines(Channel::Population).iter().any(|l| l.contains("culled block")));
    }

    #[test]
    fn test_cull_boundary_is_strict() {
        let mut h = Harness::new();
        let at_limit = h.scene.add_object(Block::solid(Vec2::new(2000.0, 600.0), Vec2::new(64.0, 8.0)));
        let past_limit = h.scene.add_object(Block::solid(Vec2::new(1999.9, 600.0), Vec2::new(64.0, 8.0)));
        h.place_player(5000.0, -8.0);

        h.frame();
        assert_eq!(h.scene.camera().position().x, 5000.0);
        assert!(h.scene.contains(at_limit));
        assert!(!h.scene.contains(past_limit));
    }

    #[test]
    fn test_privileged_objects_are_never_culled() {
        let mut h = Harness::new();
        h.place_player(-8000.0, -8.0);
        h.scene.add_object(marker(4000.0, 0.0));
        h.frame();
        // Camera stays at x=0; the player is far behind it.
        assert_eq!(h.scene.scroll_x(), 0.0);
        assert_eq!(h.scene.len(), 4);
        assert_eq!(h.scene.player().position().x, -8000.0);
    }

    #[test]
    fn test_first_frame_has_zero_delta() {
        let mut h = Harness::new();
        h.clock.set(5_000_000);
        h.scene.player_mut().run(1.0);
        h.frame();
        assert_eq!(h.scene.player().position(), Vec2::new(0.0, -8.0));
        assert_eq!(h.scene.last_frame_millis(), 5_000_000);

        h.frame_after(100);
        assert_eq!(h.scene.player().position().x, 30.0);
        assert_eq!(h.scene.last_frame_millis(), 5_000_100);
    }

    #[test]
    fn test_clock_going_backwards_is_zero_delta() {
        let mut h = Harness::new();
        h.scene.player_mut().run(1.0);
        h.frame();
        h.clock.set(500);
        h.frame();
        assert_eq!(h.scene.player().position().x, 0.0);
    }

    fn falling_harness(policy: SweepPolicy) -> Harness {
        let config = SceneConfig {
            sweep_policy: policy,
            ..SceneConfig::default()
        };
        let player = PlayerConfig {
            gravity: 0.0,
            ..PlayerConfig::default()
        };
        let mut h = Harness::with(config, player);
        h.place_player(0.0, 0.0);
        h.scene.player_mut().body_mut().velocity.y = 100.0;
        h.frame();
        // Falls 10px: comparison rect spans y 0..42 under either policy.
        h.frame_after(100);
        assert_eq!(h.scene.player().position().y, 10.0);
        h
    }

    #[test]
    fn test_per_frame_sweep_covers_only_this_frame() {
        let mut h = falling_harness(SweepPolicy::PerFrame);
        h.scene.add_object(Collectable::new(Vec2::new(0.0, 2.0), Vec2::new(8.0, 6.0)));
        // y 20: rect spans 10..52 and misses the coin at 2..8.
        h.frame_after(100);
        assert_eq!(h.scene.player().collected_count(), 0);
    }

    #[test]
    fn test_accumulated_sweep_keeps_growing() {
        let mut h = falling_harness(SweepPolicy::Accumulate);
        h.scene.add_object(Collectable::new(Vec2::new(0.0, 2.0), Vec2::new(8.0, 6.0)));
        // y 20: carried extension of 20 reaches back to y 0.
        h.frame_after(100);
        assert_eq!(h.scene.player().collected_count(), 1);
    }

    #[test]
    fn test_sweep_catches_coin_passed_during_fall() {
        let mut h = falling_harness(SweepPolicy::PerFrame);
        h.scene.add_object(Collectable::new(Vec2::new(0.0, 12.0), Vec2::new(8.0, 6.0)));
        h.frame_after(100);
        assert_eq!(h.scene.player().collected_count(), 1);
    }

    #[test]
    fn test_destructible_block_crumbles_after_landing() {
        let mut h = Harness::new();
        let config = BlockConfig {
            crumble_seconds: 0.1,
            ..BlockConfig::default()
        };
        let block = h.scene.add_object(Block::destructible(
            Vec2::new(0.0, 16.0),
            Vec2::new(64.0, 8.0),
            &config,
        ));
        h.frame();
        assert!(h.scene.get(block).and_then(SceneObject::as_block).is_some_and(Block::is_scheduled));

        h.frame_after(50);
        assert!(h.scene.contains(block));
        h.frame_after(60);
        assert!(!h.scene.contains(block));
        let lines = h.log.lines(Channel::Population);
        assert!(lines.iter().any(|l| l.ends_with(&format!("block {block} crumbled"))));
    }

    #[test]
    fn test_crumbling_block_leaves_on_stalled_clock() {
        let mut h = Harness::new();
        let config = BlockConfig {
            crumble_seconds: 10.0,
            crumble_frame_limit: 3,
        };
        let block = h.scene.add_object(Block::destructible(
            Vec2::new(0.0, 16.0),
            Vec2::new(64.0, 8.0),
            &config,
        ));
        // Clock never advances after the landing frame.
        h.frame();
        h.frame();
        h.frame();
        assert!(h.scene.contains(block));
        h.frame();
        assert!(!h.scene.contains(block));
    }

    #[test]
    fn test_camera_follows_player_forward_only() {
        let mut h = Harness::new();
        h.place_player(400.0, -8.0);
        h.frame();
        assert_eq!(h.scene.scroll_x(), 400.0);
        h.place_player(100.0, -8.0);
        h.frame();
        assert_eq!(h.scene.scroll_x(), 400.0);
        assert!(h.scene.camera().visible_rect().left < 400.0);
    }

    #[test]
    fn test_score_tracks_collected_and_distance() {
        let mut h = Harness::new();
        h.scene.add_object(Collectable::new(Vec2::new(1000.0, 0.0), Vec2::new(8.0, 8.0)));
        h.place_player(1000.0, -8.0);
        h.frame();
        assert_eq!(h.scene.score(), "Score: 150");
    }

    #[test]
    fn test_second_player_replaces_handle() {
        let mut h = Harness::new();
        let first = h.scene.ids()[1];
        let second = h.scene.set_player(Player::new(Vec2::new(64.0, 0.0), &PlayerConfig::default()));
        assert_ne!(first, second);
        assert!(h.scene.contains(first));
        assert_eq!(h.scene.player().position().x, 64.0);
        h.frame();
        assert_eq!(h.scene.get(first).map(SceneObject::tag), Some(Tag::Player));
    }

    #[test]
    fn test_get_mut_moves_objects() {
        let mut h = Harness::new();
        let id = h.scene.add_object(marker(0.0, 0.0));
        if let Some(object) = h.scene.get_mut(id) {
            object.body_mut().position.x = 42.0;
        }
        assert_eq!(h.scene.get(id).map(SceneObject::position), Some(Vec2::new(42.0, 0.0)));
    }

    #[test]
    fn test_log_lines_carry_frame_stamp() {
        let mut h = Harness::new();
        h.scene.add_object(Block::solid(Vec2::new(0.0, 16.0), Vec2::new(64.0, 8.0)));
        h.frame();
        let lines = h.log.lines(Channel::Collision);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("00:01.000 landed on block"));
    }

    #[test]
    #[should_panic(expected = "no player set")]
    fn test_render_without_player_panics() {
        let clock = ManualClock::starting_at(1_000);
        let mut scene = Scene::new(
            SceneConfig::default(),
            Box::new(clock),
            Box::new(MemoryLog::new()),
        );
        scene.set_camera(Camera::new(Vec2::ZERO, Vec2::ONE, Vec2::ZERO));
        scene.set_score(ScoreLabel::new(Vec2::ZERO, 1));
        scene.render(&mut RecordingSurface::new());
    }

    #[test]
    #[should_panic(expected = "no camera set")]
    fn test_render_without_camera_panics() {
        let clock = ManualClock::starting_at(1_000);
        let mut scene = Scene::new(
            SceneConfig::default(),
            Box::new(clock),
            Box::new(MemoryLog::new()),
        );
        scene.set_player(Player::new(Vec2::ZERO, &PlayerConfig::default()));
        scene.set_score(ScoreLabel::new(Vec2::ZERO, 1));
        scene.render(&mut RecordingSurface::new());
    }

    #[test]
    #[should_panic(expected = "no score label set")]
    fn test_score_without_label_panics() {
        let scene = Scene::new(
            SceneConfig::default(),
            Box::new(ManualClock::default()),
            Box::new(MemoryLog::new()),
        );
        let _ = scene.score();
    }
}
