//! Free-list slot allocator producing stable integer handles.
//!
//! Handles are indices into a growable slot vector. Destroyed handles go back
//! on the free list and are handed out again by later creates (most recently
//! freed first). When the free list runs dry the capacity doubles, unless a
//! hard cap is configured, in which case creation fails instead.

#[cfg(test)]
#[path = "slots_test.rs"]
mod slots_test;

/// Error returned by [`EntitySlots`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    /// The handle lies outside `[0, capacity)`.
    #[error("handle {handle} out of range (capacity {capacity})")]
    OutOfRange { handle: usize, capacity: usize },
    /// The handle is in range but its slot is empty.
    #[error("handle {0} is not live")]
    NotLive(usize),
    /// Growing would exceed the configured maximum slot count.
    #[error("entity capacity exceeded (max {max})")]
    CapacityExceeded { max: usize },
}

/// Slot storage for entities of one kind.
#[derive(Debug, Clone)]
pub struct EntitySlots<T> {
    slots: Vec<Option<T>>,
    // Popped from the back; kept so the lowest fresh handle comes out first.
    free: Vec<usize>,
    living: usize,
    max_capacity: Option<usize>,
}

impl<T> EntitySlots<T> {
    /// Create storage with `initial_capacity` free slots and unbounded growth.
    #[must_use]
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_limit(initial_capacity, None)
    }

    /// Create storage that refuses to grow beyond `max_capacity` slots.
    #[must_use]
    pub fn with_limit(initial_capacity: usize, max_capacity: Option<usize>) -> Self {
        let initial = max_capacity.map_or(initial_capacity, |max| initial_capacity.min(max));
        let mut slots = Self { slots: Vec::new(), free: Vec::new(), living: 0, max_capacity };
        slots.grow_to(initial);
        slots
    }

    /// Store `entity` in a free slot and return its handle.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::CapacityExceeded`] when every slot is live and the
    /// configured maximum forbids growing.
    pub fn create(&mut self, entity: T) -> Result<usize, SlotError> {
        if self.free.is_empty() {
            self.grow()?;
        }
        let Some(handle) = self.free.pop() else {
            return Err(SlotError::CapacityExceeded { max: self.max_capacity.unwrap_or(self.slots.len()) });
        };
        self.slots[handle] = Some(entity);
        self.living += 1;
        Ok(handle)
    }

    /// Remove the entity at `handle`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::OutOfRange`] for handles outside the slot vector and
    /// [`SlotError::NotLive`] for empty slots.
    pub fn destroy(&mut self, handle: usize) -> Result<T, SlotError> {
        let capacity = self.slots.len();
        let slot = self.slots.get_mut(handle).ok_or(SlotError::OutOfRange { handle, capacity })?;
        let entity = slot.take().ok_or(SlotError::NotLive(handle))?;
        self.free.push(handle);
        self.living -= 1;
        Ok(entity)
    }

    /// The entity at `handle`, or `None` for out-of-range or dead handles.
    #[must_use]
    pub fn get(&self, handle: usize) -> Option<&T> {
        self.slots.get(handle).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, handle: usize) -> Option<&mut T> {
        self.slots.get_mut(handle).and_then(Option::as_mut)
    }

    /// Live entities in ascending handle order.
    pub fn living(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Live entities with their handles, in ascending handle order.
    pub fn living_with_index(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|entity| (index, entity)))
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.living
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.living == 0
    }

    /// Total number of slots, live or free.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn grow(&mut self) -> Result<(), SlotError> {
        let current = self.slots.len();
        let mut target = (current * 2).max(1);
        if let Some(max) = self.max_capacity {
            if current >= max {
                return Err(SlotError::CapacityExceeded { max });
            }
            target = target.min(max);
        }
        self.grow_to(target);
        Ok(())
    }

    fn grow_to(&mut self, target: usize) {
        let current = self.slots.len();
        if target <= current {
            return;
        }
        self.slots.resize_with(target, || None);
        self.free.extend((current..target).rev());
    }
}
