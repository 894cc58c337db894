//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Clock readings passed in, never read
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod error;
pub mod knife;
pub mod snapshot;
pub mod spider;
pub mod state;
pub mod tick;

pub use body::RigidBody;
pub use collision::{HitboxShape, Rect, Size, knife_hits_spider, spider_hits_butterfly};
pub use error::SimError;
pub use knife::apply_tether;
pub use snapshot::{DebugHitboxes, Snapshot};
pub use state::{
    Butterfly, Direction, GameOutcome, GameState, Knife, Spider, SpiderRemains, SpiderState,
    TickEvents,
};
pub use tick::{InputSource, TickInput, tick};
