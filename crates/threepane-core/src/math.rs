/// Mathematical operations using SIMD-accelerated `glam` types.
///
/// This module re-exports the [`glam`] crate. The toolkit only exercises the
/// 2D surface ([`Vec2`] for pointer positions, drag deltas, and widget
/// sizes), but the full crate is available for downstream users.
///
/// # Examples
///
/// ```
/// use threepane_core::math::Vec2;
///
/// let press = Vec2::new(120.0, 40.0);
/// let release = Vec2::new(180.0, 44.0);
/// let displacement = (release - press).length();
/// assert!(displacement > 50.0);
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::*;
