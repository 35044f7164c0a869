use std::fmt;

use glam::Vec3;

use crate::api::types::{InteractableId, OverlayHandle};
use crate::core::collision::Aabb;
use crate::core::proximity::Interactable;

/// What the scene description says about an interactable before it loads.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub label: String,
    pub trigger_radius: f32,
    pub overlay: Option<OverlayHandle>,
    /// Whether a reported bounding box should block the player.
    pub collides: bool,
}

/// Load state of one declared interactable.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Declared, content still loading.
    Pending,
    /// Content arrived; takes part in every frame.
    Ready(Interactable),
    /// Content failed to load; permanently absent.
    Failed,
}

/// Coarse slot state, for reporting to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No interactable was declared with this id.
    UnknownInteractable(InteractableId),
    /// The slot was already marked ready or failed.
    AlreadyResolved(InteractableId),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::UnknownInteractable(id) => write!(f, "unknown interactable {}", id.0),
            LoadError::AlreadyResolved(id) => write!(f, "interactable {} already resolved", id.0),
        }
    }
}

impl std::error::Error for LoadError {}

struct Entry {
    declaration: Declaration,
    slot: Slot,
}

/// Interactables in declaration order. Ids are indices into this list, and
/// the order is also the order obstacles are resolved in.
pub struct InteractableRegistry {
    entries: Vec<Entry>,
}

impl InteractableRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(16),
        }
    }

    /// Declare an interactable. It stays pending until the host reports on it.
    pub fn declare(&mut self, declaration: Declaration) -> InteractableId {
        let id = InteractableId(self.entries.len() as u32);
        self.entries.push(Entry {
            declaration,
            slot: Slot::Pending,
        });
        id
    }

    fn entry_mut(&mut self, id: InteractableId) -> Result<&mut Entry, LoadError> {
        let entry = self
            .entries
            .get_mut(id.0 as usize)
            .ok_or(LoadError::UnknownInteractable(id))?;
        if entry.slot != Slot::Pending {
            return Err(LoadError::AlreadyResolved(id));
        }
        Ok(entry)
    }

    /// The host finished loading this interactable's content.
    pub fn mark_ready(&mut self, id: InteractableId, anchor: Vec3, bounds: Option<Aabb>) -> Result<(), LoadError> {
        let entry = self.entry_mut(id)?;
        let declaration = &entry.declaration;
        let mut interactable = Interactable::new(id, declaration.label.clone(), anchor, declaration.trigger_radius);
        if let Some(bounds) = bounds.filter(|_| declaration.collides) {
            interactable = interactable.with_bounds(bounds);
        }
        if let Some(handle) = declaration.overlay {
            interactable = interactable.with_overlay(handle);
        }
        entry.slot = Slot::Ready(interactable);
        Ok(())
    }

    /// The host gave up loading this interactable. It never comes back.
    pub fn mark_failed(&mut self, id: InteractableId) -> Result<(), LoadError> {
        self.entry_mut(id)?.slot = Slot::Failed;
        Ok(())
    }

    pub fn status(&self, id: InteractableId) -> Option<SlotStatus> {
        self.entries.get(id.0 as usize).map(|e| match e.slot {
            Slot::Pending => SlotStatus::Pending,
            Slot::Ready(_) => SlotStatus::Ready,
            Slot::Failed => SlotStatus::Failed,
        })
    }

    pub fn declaration(&self, id: InteractableId) -> Option<&Declaration> {
        self.entries.get(id.0 as usize).map(|e| &e.declaration)
    }

    /// A ready interactable by id.
    pub fn get(&self, id: InteractableId) -> Option<&Interactable> {
        match &self.entries.get(id.0 as usize)?.slot {
            Slot::Ready(interactable) => Some(interactable),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: InteractableId) -> Option<&mut Interactable> {
        match &mut self.entries.get_mut(id.0 as usize)?.slot {
            Slot::Ready(interactable) => Some(interactable),
            _ => None,
        }
    }

    /// Find a declared interactable by label.
    pub fn find_by_label(&self, label: &str) -> Option<InteractableId> {
        self.entries
            .iter()
            .position(|e| e.declaration.label == label)
            .map(|idx| InteractableId(idx as u32))
    }

    /// Ready interactables in declaration order.
    pub fn iter_ready(&self) -> impl Iterator<Item = &Interactable> {
        self.entries.iter().filter_map(|e| match &e.slot {
            Slot::Ready(interactable) => Some(interactable),
            _ => None,
        })
    }

    pub fn iter_ready_mut(&mut self) -> impl Iterator<Item = &mut Interactable> {
        self.entries.iter_mut().filter_map(|e| match &mut e.slot {
            Slot::Ready(interactable) => Some(interactable),
            _ => None,
        })
    }

    /// Obstacle boxes of ready, colliding interactables, in declaration order.
    pub fn obstacles(&self) -> impl Iterator<Item = &Aabb> {
        self.iter_ready().filter_map(|i| i.bounds.as_ref())
    }

    /// Number of declared interactables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ready_count(&self) -> usize {
        self.iter_ready().count()
    }

    /// Drop every declaration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for InteractableRegistry {
    fn default() -> Self {
        Self::new()
    }
}
