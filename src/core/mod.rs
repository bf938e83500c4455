//! Core - math primitives and safety macros shared by every system
//!
//! `utils` must stay first: it exports `fast!` / `debug_assert_finite!`.

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;

pub mod vec2;

pub use vec2::{Aabb, Vec2};
