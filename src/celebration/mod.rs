//! Festive overlay: a full-screen field of flowers, grass blades, pollen and
//! stars bursting out of clicks, view changes and the opening greeting.

pub mod draw;
pub mod engine;
pub mod particle;
pub mod patterns;

pub use engine::CelebrationEngine;
pub use particle::{KindProfile, Particle, ParticleKind};
pub use patterns::{AppView, BurstOrigin, BurstRequest, Corner};
