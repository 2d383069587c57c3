//! Bounded per-body position history for the viewer
//!
//! `TrailSet` keeps a capped FIFO of past positions per body, appended once
//! per completed step. Purely a rendering aid; the integrator never reads it.

use std::collections::VecDeque;

use super::states::{NVec2, System};

pub struct TrailSet {
    trails: Vec<VecDeque<NVec2>>, // one FIFO per body, same ordering as System::bodies
    cap: usize,                   // maximum retained positions per body
}

impl TrailSet {
    /// One empty trail per body, each bounded to `cap` entries
    pub fn new(n_bodies: usize, cap: usize) -> Self {
        Self {
            trails: (0..n_bodies)
                .map(|_| VecDeque::with_capacity(cap))
                .collect(),
            cap,
        }
    }

    /// Append the latest position of every body, evicting the oldest entry
    /// of any trail already at capacity
    pub fn record(&mut self, sys: &System) {
        if self.cap == 0 {
            return;
        }
        for (trail, x) in self.trails.iter_mut().zip(sys.positions()) {
            if trail.len() == self.cap {
                trail.pop_front();
            }
            trail.push_back(x);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &VecDeque<NVec2>> {
        self.trails.iter()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }
}
