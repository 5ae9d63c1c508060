//! Fixed-capacity trail history
//!
//! A ring buffer: `head` indexes the most recent point and every push writes
//! one slot, so pushing is O(1) regardless of the visible length. Reading
//! walks backwards from `head`, giving most-recent-first order.
//!
//! Every push lands in the ring even while the visible length is shorter than
//! the capacity, so when the visible length grows again the newly revealed
//! points are real history, in order, never leftovers from an earlier layout.

/// Fixed-capacity, most-recent-first position history
pub struct TrailBuffer {
    slots: Vec<[f32; 3]>,
    /// Slot holding the most recent point
    head: usize,
    /// Number of slots written at least once
    filled: usize,
    /// Visible length requested by the last push, already clamped to capacity
    active: usize,
    /// Render copy of the visible points, most recent first
    ordered: Vec<[f32; 3]>,
}

impl TrailBuffer {
    pub const DEFAULT_CAPACITY: usize = 120;

    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![[0.0; 3]; capacity],
            head: 0,
            filled: 0,
            active: 0,
            ordered: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Record `position` as the newest point and set the visible length.
    ///
    /// `active_len` above capacity is clamped to capacity.
    pub fn push(&mut self, position: [f32; 3], active_len: usize) {
        let capacity = self.capacity();
        self.active = active_len.min(capacity);
        if capacity == 0 {
            return;
        }
        self.head = if self.filled == 0 {
            0
        } else {
            (self.head + 1) % capacity
        };
        self.slots[self.head] = position;
        self.filled = (self.filled + 1).min(capacity);
    }

    /// Change the visible length without recording a point.
    pub fn set_active_len(&mut self, active_len: usize) {
        self.active = active_len.min(self.capacity());
    }

    /// Number of visible points: never more than capacity or the points recorded.
    pub fn len(&self) -> usize {
        self.active.min(self.filled)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visible point `i`, where 0 is the most recent.
    pub fn get(&self, i: usize) -> Option<[f32; 3]> {
        if i >= self.len() {
            return None;
        }
        let capacity = self.capacity();
        Some(self.slots[(self.head + capacity - i) % capacity])
    }

    /// Visible points, most recent first
    pub fn iter(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Copy the visible points into a contiguous most-recent-first array.
    ///
    /// The returned slice length is the draw range the renderer must respect.
    pub fn ordered(&mut self) -> &[[f32; 3]] {
        self.ordered.clear();
        let len = self.len();
        let capacity = self.capacity();
        for i in 0..len {
            self.ordered.push(self.slots[(self.head + capacity - i) % capacity]);
        }
        &self.ordered
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
