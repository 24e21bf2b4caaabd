//! Free-list pool of grid states.
//!
//! The search creates and discards states at a high rate; slots are reused
//! so the cell arrays and worklist buffers are allocated once and then
//! recycled. States are addressed by stable indices, never by pointer.

use super::GridState;

pub type NodeId = usize;

#[derive(Default)]
pub struct Arena {
    slots: Vec<GridState>,
    free: Vec<NodeId>,
}

impl Arena {
    pub fn new() -> Self {
        Arena::default()
    }

    /// Copy `proto` into a recycled slot (or a fresh one) and return its id.
    /// `proto` must not itself live in this arena.
    pub fn alloc_from(&mut self, proto: &GridState) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id].clone_from(proto);
                id
            }
            None => {
                self.slots.push(proto.clone());
                self.slots.len() - 1
            }
        }
    }

    /// Move a state out for expansion; its slot is immediately reusable.
    pub fn take(&mut self, id: NodeId) -> GridState {
        let state = std::mem::take(&mut self.slots[id]);
        self.free.push(id);
        state
    }

    /// Return a slot to the free list without reading it.
    pub fn release(&mut self, id: NodeId) {
        self.free.push(id);
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &GridState {
        &self.slots[id]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut GridState {
        &mut self.slots[id]
    }

    /// Slots ever allocated, reclaimed or not.
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Slots currently holding a live state.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{FREE, GRID};

    #[test]
    fn slots_are_recycled() {
        let mut arena = Arena::new();
        let proto = GridState::seed();
        let a = arena.alloc_from(&proto);
        let b = arena.alloc_from(&proto);
        assert_ne!(a, b);
        assert_eq!(arena.allocated(), 2);

        let taken = arena.take(a);
        assert_eq!(taken.cell((GRID + 1) as i32), FREE);
        assert_eq!(arena.live(), 1);

        // The freed slot is handed out again before any new one.
        let c = arena.alloc_from(&proto);
        assert_eq!(c, a);
        assert_eq!(arena.allocated(), 2);
    }
}
