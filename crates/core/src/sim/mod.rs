//! Minigame surface.
//!
//! This module wraps the pipeline in the text-in/text-out shape the game uses:
//! 1. **Minigame:** `PipelineMinigame` turns state transitions into status text.
//! 2. **Host:** `MinigameHost` is the controller's optional slot for the running
//!    minigame, with the knowledge gate and the `simulate <action>` dispatcher.

/// Knowledge-gated host and action dispatch.
pub mod host;
/// Text-producing minigame wrapper.
pub mod minigame;

pub use host::{Knowledge, MinigameHost, PlayerContext, SimAction};
pub use minigame::PipelineMinigame;
