/// Knowledge gate and action dispatch.
pub mod host;
/// Text output of the minigame.
pub mod minigame;
