//! Generational storage for scene objects.
//!
//! Every object the scene owns lives in one slot of an [`ObjectArena`] and is
//! referred to by an [`ObjectId`]: the slot index plus the slot's generation.
//! When an object is dropped its slot is recycled with a bumped generation, so
//! a stale id held by game code can never alias the newcomer.

use std::fmt;

use crate::object::SceneObject;

/// Handle to an object owned by a [`Scene`](crate::Scene).
///
/// Ids compare by identity: two distinct objects with identical contents
/// still have different ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    index: u32,
    generation: u32,
}

impl ObjectId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

struct Slot {
    generation: u32,
    /// `None` while the slot is free, or while its object is checked out.
    object: Option<SceneObject>,
    alive: bool,
}

/// Slot storage with free-list reuse.
#[derive(Default)]
pub(crate) struct ObjectArena {
    slots: Vec<Slot>,
    /// Freed slot indices, reused LIFO.
    free: Vec<u32>,
    alive: usize,
}

impl ObjectArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Store an object and return its handle.
    pub(crate) fn insert(&mut self, object: SceneObject) -> ObjectId {
        self.alive += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            slot.alive = true;
            ObjectId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                object: Some(object),
                alive: true,
            });
            ObjectId {
                index,
                generation: 0,
            }
        }
    }

    fn slot(&self, id: ObjectId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.alive && slot.generation == id.generation)
    }

    fn slot_mut(&mut self, id: ObjectId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.alive && slot.generation == id.generation)
    }

    pub(crate) fn is_alive(&self, id: ObjectId) -> bool {
        self.slot(id).is_some()
    }

    pub(crate) fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.slot(id).and_then(|slot| slot.object.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.slot_mut(id).and_then(|slot| slot.object.as_mut())
    }

    /// Drop the object and recycle its slot. Returns the object if the id
    /// was still alive.
    pub(crate) fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let slot = self.slot_mut(id)?;
        let object = slot.object.take();
        slot.alive = false;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.alive -= 1;
        object
    }

    /// Temporarily move an object out of its slot without freeing it, so it
    /// can be mutated alongside the rest of the arena. Lookups of `id` return
    /// `None` until [`put_back`](Self::put_back) is called.
    pub(crate) fn take(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.slot_mut(id).and_then(|slot| slot.object.take())
    }

    pub(crate) fn put_back(&mut self, id: ObjectId, object: SceneObject) {
        let slot = self
            .slot_mut(id)
            .unwrap_or_else(|| panic!("object {id} was freed while checked out"));
        debug_assert!(slot.object.is_none(), "slot {id} is already occupied");
        slot.object = Some(object);
    }

    /// Number of live objects.
    pub(crate) fn len(&self) -> usize {
        self.alive
    }
}
