//! Code related to the playback of computed snapshots.

use bincode::{Decode, Encode};

use crate::State;

#[derive(Clone, Debug, Encode, Decode)]
pub struct SnapShot {
    pub time: f32,
    pub step: usize,
    // To save memory, we store the snapshots as f32; we only need f64 precision
    // during the integration.
    pub posits: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 3]>,
}

impl SnapShot {
    pub fn new(state: &State) -> Self {
        Self {
            time: state.time_elapsed() as f32,
            step: state.steps(),
            posits: state
                .positions_view()
                .map(|(x, y)| [x as f32, y as f32])
                .collect(),
            colors: state
                .colors_view()
                .map(|(r, g, b)| [r as f32, g as f32, b as f32])
                .collect(),
        }
    }
}
