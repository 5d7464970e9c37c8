use crate::types::Vertex;

/// A fixed-capacity sparse vertex set with O(1) reset.
///
/// Membership is tracked by a per-vertex generation stamp: `clear` just bumps
/// the current generation, and the stamp array is refilled only when the
/// generation counter wraps. The engines keep one per worker to collect
/// candidate hubs; insertion order is preserved.
#[derive(Debug, Clone)]
pub struct LookupSet {
    generation: u16,
    stamps: Vec<u16>,
    storage: Vec<Vertex>,
}

impl LookupSet {
    /// Creates an empty set for vertices in `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            generation: 1,
            stamps: vec![0; capacity],
            storage: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn is_marked(&self, v: Vertex) -> bool {
        self.stamps[v as usize] == self.generation
    }

    #[inline(always)]
    pub fn mark(&mut self, v: Vertex) {
        self.stamps[v as usize] = self.generation;
    }

    /// Appends `v` to the storage unless it is already marked.
    #[inline(always)]
    pub fn add(&mut self, v: Vertex) {
        if !self.is_marked(v) {
            self.mark(v);
            self.storage.push(v);
        }
    }

    /// The inserted vertices, in insertion order.
    pub fn storage(&self) -> &[Vertex] {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Empties the set in O(1), refilling the stamp array only when the
    /// generation counter wraps.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.generation = match self.generation.checked_add(1) {
            Some(generation) => generation,
            None => {
                self.stamps.fill(0);
                1
            }
        };
    }
}
