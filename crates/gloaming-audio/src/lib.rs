pub mod channel;
pub mod effects;
pub mod mixer;

#[cfg(target_arch = "wasm32")]
pub mod bridge;

pub use channel::ChannelState;
pub use effects::{AudioEffect, TrackId};
pub use mixer::{AmbienceMixer, PageActivity, Readiness};
