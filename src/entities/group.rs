use std::fmt;
use std::marker::PhantomData;

use super::entity::Entity;

/// Result of visiting a member during [`EntityGroup::for_each_live`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Keep,
    Destroy,
}

/// Typed handle to a member of an `EntityGroup<K>`.
///
/// Ids are never reused, so a handle to a destroyed entity stays dead forever.
pub struct EntityRef<K> {
    id: u64,
    _kind: PhantomData<fn() -> K>,
}

impl<K> EntityRef<K> {
    fn new(id: u64) -> Self {
        Self {
            id,
            _kind: PhantomData,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl<K> Clone for EntityRef<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for EntityRef<K> {}

impl<K> PartialEq for EntityRef<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K> Eq for EntityRef<K> {}

impl<K> fmt::Debug for EntityRef<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityRef({})", self.id)
    }
}

#[derive(Debug, Clone)]
struct Member {
    id: u64,
    entity: Entity,
}

/// Owning collection of same-kind entities with an optional capacity.
///
/// Members stay in insertion order and ids grow monotonically, so lookups
/// are a binary search over the member list.
#[derive(Debug, Clone)]
pub struct EntityGroup<K> {
    members: Vec<Member>,
    capacity: Option<usize>,
    next_id: u64,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Default for EntityGroup<K> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<K> EntityGroup<K> {
    pub fn unbounded() -> Self {
        Self {
            members: Vec::new(),
            capacity: None,
            next_id: 0,
            _kind: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            capacity: Some(capacity),
            ..Self::unbounded()
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.live_count() >= capacity)
    }

    /// Adds a live entity at `(x, y)` moving at `(vx, vy)` with the given body size.
    /// Returns `None` when the group is at capacity.
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        width: f32,
        height: f32,
    ) -> Option<EntityRef<K>> {
        self.insert(Entity::new(x, y, width, height).with_velocity(vx, vy))
    }

    /// Takes ownership of a prepared entity. Same capacity rule as [`spawn`](Self::spawn).
    pub fn insert(&mut self, mut entity: Entity) -> Option<EntityRef<K>> {
        if self.is_full() {
            return None;
        }

        entity.alive = true;
        let id = self.next_id;
        self.next_id += 1;
        self.members.push(Member { id, entity });
        Some(EntityRef::new(id))
    }

    /// Destroys the referenced entity. Returns `false` if it was already gone.
    pub fn destroy(&mut self, entity_ref: EntityRef<K>) -> bool {
        match self.position(entity_ref) {
            Some(idx) => {
                self.members.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn is_alive(&self, entity_ref: EntityRef<K>) -> bool {
        self.get(entity_ref).is_some()
    }

    pub fn get(&self, entity_ref: EntityRef<K>) -> Option<&Entity> {
        self.position(entity_ref).map(|idx| &self.members[idx].entity)
    }

    pub fn get_mut(&mut self, entity_ref: EntityRef<K>) -> Option<&mut Entity> {
        self.position(entity_ref)
            .map(move |idx| &mut self.members[idx].entity)
    }

    pub fn live_count(&self) -> usize {
        self.members.iter().filter(|m| m.entity.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    /// Live members in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntityRef<K>, &Entity)> {
        self.members
            .iter()
            .filter(|m| m.entity.alive)
            .map(|m| (EntityRef::new(m.id), &m.entity))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.members
            .iter_mut()
            .map(|m| &mut m.entity)
            .filter(|e| e.alive)
    }

    /// Visits live members in insertion order. Members the visitor asks to
    /// destroy are marked dead at once and dropped after the traversal.
    pub fn for_each_live<F>(&mut self, mut visit: F)
    where
        F: FnMut(EntityRef<K>, &mut Entity) -> Visit,
    {
        for member in self.members.iter_mut().filter(|m| m.entity.alive) {
            if visit(EntityRef::new(member.id), &mut member.entity) == Visit::Destroy {
                member.entity.alive = false;
            }
        }
        self.members.retain(|m| m.entity.alive);
    }

    fn position(&self, entity_ref: EntityRef<K>) -> Option<usize> {
        self.members
            .binary_search_by_key(&entity_ref.id, |m| m.id)
            .ok()
            .filter(|&idx| self.members[idx].entity.alive)
    }
}
