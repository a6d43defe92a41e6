//! Ring geometry for drawing the grid
//!
//! Spoke `s` covers the angular wedge from `s * π/3` to `(s + 1) * π/3`.
//! A slot at depth `d` is the band between radii
//! `hex_size + d * block_size` and `hex_size + (d + 1) * block_size`.
//! Depth may be fractional so falling blocks can be placed mid-slide.

use std::f32::consts::{FRAC_PI_3, TAU};

use glam::Vec2;

use crate::consts::SPOKES;
use crate::settings::Settings;
use crate::{normalize_angle, polar_to_cartesian};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    pub hex_size: f32,
    pub block_size: f32,
}

impl RingLayout {
    pub fn new(hex_size: f32, block_size: f32) -> Self {
        Self {
            hex_size,
            block_size,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.hex_size, settings.block_size)
    }

    /// Angle of the leading edge of a spoke
    #[inline]
    pub fn spoke_angle(&self, spoke: usize) -> f32 {
        spoke as f32 * FRAC_PI_3
    }

    /// Inner radius of a slot band
    #[inline]
    pub fn inner_radius(&self, depth: f32) -> f32 {
        self.hex_size + depth * self.block_size
    }

    /// Quad corners: inner-leading, outer-leading, outer-trailing, inner-trailing
    pub fn slot_corners(&self, spoke: usize, depth: f32) -> [Vec2; 4] {
        let a1 = self.spoke_angle(spoke);
        let a2 = self.spoke_angle(spoke + 1);
        let r_in = self.inner_radius(depth);
        let r_out = self.inner_radius(depth + 1.0);
        [
            polar_to_cartesian(r_in, a1),
            polar_to_cartesian(r_out, a1),
            polar_to_cartesian(r_out, a2),
            polar_to_cartesian(r_in, a2),
        ]
    }

    /// Center of a slot quad
    pub fn block_center(&self, spoke: usize, depth: f32) -> Vec2 {
        let corners = self.slot_corners(spoke, depth);
        corners.iter().copied().sum::<Vec2>() / 4.0
    }

    /// Central hexagon, one vertex per spoke boundary
    pub fn hex_vertices(&self) -> [Vec2; SPOKES] {
        std::array::from_fn(|k| polar_to_cartesian(self.hex_size, self.spoke_angle(k)))
    }

    /// Spoke under a point, accounting for the current rotation offset
    pub fn spoke_at(&self, point: Vec2, rotation_offset: f32) -> usize {
        let theta = normalize_angle(point.y.atan2(point.x) + rotation_offset).rem_euclid(TAU);
        ((theta / FRAC_PI_3) as usize).min(SPOKES - 1)
    }
}

/// Apply the cosmetic rotation offset (clockwise for positive offsets)
#[inline]
pub fn rotate_point(p: Vec2, offset: f32) -> Vec2 {
    let (sin, cos) = offset.sin_cos();
    Vec2::new(p.x * cos + p.y * sin, p.y * cos - p.x * sin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BLOCK_SIZE, HEX_SIZE};

    fn layout() -> RingLayout {
        RingLayout::new(HEX_SIZE, BLOCK_SIZE)
    }

    #[test]
    fn test_slot_band_radii() {
        let l = layout();
        let [inner, outer, ..] = l.slot_corners(0, 2.0);
        assert!((inner.length() - (HEX_SIZE + 2.0 * BLOCK_SIZE)).abs() < 1e-5);
        assert!((outer.length() - (HEX_SIZE + 3.0 * BLOCK_SIZE)).abs() < 1e-5);
    }

    #[test]
    fn test_layout_from_default_settings() {
        assert_eq!(RingLayout::from_settings(&Settings::default()), layout());
    }

    #[test]
    fn test_hex_vertices_on_circle() {
        for v in layout().hex_vertices() {
            assert!((v.length() - HEX_SIZE).abs() < 1e-5);
        }
    }

    #[test]
    fn test_spoke_at_matches_centers() {
        let l = layout();
        for spoke in 0..SPOKES {
            let c = l.block_center(spoke, 3.0);
            assert_eq!(l.spoke_at(c, 0.0), spoke);
        }
    }

    #[test]
    fn test_rotation_offset_maps_back() {
        let l = layout();
        let offset = 0.4;
        let drawn = rotate_point(l.block_center(2, 1.0), offset);
        assert_eq!(l.spoke_at(drawn, offset), 2);
    }

    #[test]
    fn test_rotate_point_quarter_turn() {
        let p = rotate_point(Vec2::new(1.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!((p - Vec2::new(0.0, -1.0)).length() < 1e-5);
    }
}
