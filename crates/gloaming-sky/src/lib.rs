pub mod edges;
pub mod engine;
pub mod moon;
pub mod projection;
pub mod session;
pub mod theme;
pub mod tween;

pub use engine::{Engine, FrameUpdate, TickReport};
pub use session::{RenderFrame, SkySession, TickOutcome};
pub use tween::BodyFrame;
