// Messages between the UI loop and the network actor.
use crate::model::{Passage, PassageRequest};

#[derive(Debug)]
pub enum Action {
    /// Load a passage. `generation` identifies the request so late replies
    /// for older requests can be ignored.
    Fetch {
        generation: u64,
        request: PassageRequest,
        primary: String,
        secondary: Option<String>,
    },
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    PassageLoaded { generation: u64, passage: Passage },
    FetchFailed { generation: u64, message: String },
}

impl AppEvent {
    pub fn generation(&self) -> u64 {
        match self {
            AppEvent::PassageLoaded { generation, .. } | AppEvent::FetchFailed { generation, .. } => {
                *generation
            }
        }
    }
}
