//! Vector and rectangle math.
//!
//! Coordinates are y-up: a rectangle's `min` is its bottom-left corner and
//! `max` its top-right corner. Nothing normalizes a [`Rect`]; an inverted
//! rectangle (max below min) stays inverted and callers must not rely on
//! any particular ordering.
//!
//! # Example
//!
//! ```
//! use trellis_core::geometry::{Align, Rect, vec2};
//!
//! let label = Rect::from_size(40.0, 10.0);
//! let button = Rect::new(0.0, 0.0, 100.0, 30.0);
//!
//! // Center point the label needs so it sits flush left inside the button.
//! let center = label.align_to_rect(button, Align::Left);
//! assert_eq!(center, vec2(20.0, 15.0));
//! ```

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point or displacement on a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Shorthand for [`Vec2::new`].
#[inline]
pub const fn vec2(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn len(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Both components halved.
    #[inline]
    pub fn half(self) -> Self {
        Self::new(self.x / 2.0, self.y / 2.0)
    }

    /// Empty rectangle located at this point.
    #[inline]
    pub const fn to_rect(self) -> Rect {
        Rect { min: self, max: self }
    }

    /// Returns true if both components are zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// An axis-aligned rectangle described by two corners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a rectangle from corner coordinates.
    #[inline]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            min: Vec2::new(x1, y1),
            max: Vec2::new(x2, y2),
        }
    }

    /// Creates a rectangle of the given size with `min` at the origin.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Creates a rectangle from its bottom-left corner and size.
    #[inline]
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        vec2(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Grows the rectangle by `d` on every side. Negative `d` shrinks it.
    #[inline]
    pub fn expanded(&self, d: f32) -> Self {
        self.extended(d, d, d, d)
    }

    /// Grows each side by its own distance. Negative distances shrink.
    #[inline]
    pub fn extended(&self, left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self::new(
            self.min.x - left,
            self.min.y - bottom,
            self.max.x + right,
            self.max.y + top,
        )
    }

    /// Translates both corners by `delta`.
    #[inline]
    pub fn moved(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Same size, centered on `center`.
    #[inline]
    pub fn with_center(&self, center: Vec2) -> Self {
        self.moved(center - self.center())
    }

    /// Returns true if `p` lies inside the rectangle or on its border.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Center point at which this rectangle sits aligned inside `dst`.
    ///
    /// Only the size of `self` matters. Edge alignments push the rectangle
    /// flush against the matching edges of `dst`; the rest of the axes stay
    /// centered.
    pub fn align_to_rect(&self, dst: Rect, align: Align) -> Vec2 {
        let mut center = dst.center();
        let dx = (dst.width() - self.width()) / 2.0;
        let dy = (dst.height() - self.height()) / 2.0;
        center.x += dx * align.horizontal();
        center.y += dy * align.vertical();
        center
    }

    /// Center point at which this rectangle sits aligned to the point `dst`.
    ///
    /// [`Align::Left`] puts the rectangle's left edge on the point,
    /// [`Align::Top`] its top edge, and so on.
    #[inline]
    pub fn align_to_point(&self, dst: Vec2, align: Align) -> Vec2 {
        self.align_to_rect(dst.to_rect(), align)
    }

    /// This rectangle moved so it sits aligned inside `dst`.
    #[inline]
    pub fn aligned_in(&self, dst: Rect, align: Align) -> Self {
        self.with_center(self.align_to_rect(dst, align))
    }
}

/// Alignment of a rectangle relative to another rectangle or a point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Centered.
    #[default]
    Default,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Explicitly centered.
    Center,
}

impl Align {
    /// -1 for left, 1 for right, 0 otherwise.
    fn horizontal(self) -> f32 {
        match self {
            Self::Left | Self::TopLeft | Self::BottomLeft => -1.0,
            Self::Right | Self::TopRight | Self::BottomRight => 1.0,
            _ => 0.0,
        }
    }

    /// 1 for top, -1 for bottom, 0 otherwise (y-up).
    fn vertical(self) -> f32 {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => 1.0,
            Self::Bottom | Self::BottomLeft | Self::BottomRight => -1.0,
            _ => 0.0,
        }
    }
}

static_assertions::assert_impl_all!(Vec2: Send, Sync, Copy);
static_assertions::assert_impl_all!(Rect: Send, Sync, Copy);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_arithmetic() {
        let a = vec2(3.0, 4.0);
        let b = vec2(1.0, 1.0);
        assert_eq!(a + b, vec2(4.0, 5.0));
        assert_eq!(a - b, vec2(2.0, 3.0));
        assert_eq!(a.len(), 5.0);
        assert_eq!(a.half(), vec2(1.5, 2.0));
        assert_eq!(-b, vec2(-1.0, -1.0));
    }

    #[test]
    fn test_rect_derived_values() {
        let r = Rect::new(10.0, 20.0, 50.0, 40.0);
        assert_eq!(r.width(), 40.0);
        assert_eq!(r.height(), 20.0);
        assert_eq!(r.size(), vec2(40.0, 20.0));
        assert_eq!(r.center(), vec2(30.0, 30.0));
    }

    #[test]
    fn test_inverted_rect_is_kept() {
        let r = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(r.width(), -10.0);
        assert!(!r.contains(vec2(5.0, 5.0)));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = Rect::from_size(10.0, 10.0);
        assert!(r.contains(vec2(0.0, 0.0)));
        assert!(r.contains(vec2(10.0, 10.0)));
        assert!(!r.contains(vec2(10.1, 5.0)));
    }

    #[test]
    fn test_expanded_and_extended() {
        let r = Rect::from_size(10.0, 10.0);
        assert_eq!(r.expanded(2.0), Rect::new(-2.0, -2.0, 12.0, 12.0));
        assert_eq!(r.expanded(-1.0), Rect::new(1.0, 1.0, 9.0, 9.0));
        assert_eq!(
            r.extended(1.0, 2.0, 3.0, 4.0),
            Rect::new(-1.0, -2.0, 13.0, 14.0)
        );
    }

    #[test]
    fn test_with_center() {
        let r = Rect::from_size(4.0, 2.0).with_center(vec2(10.0, 10.0));
        assert_eq!(r, Rect::new(8.0, 9.0, 12.0, 11.0));
    }

    #[test]
    fn test_align_to_rect() {
        let small = Rect::from_size(20.0, 10.0);
        let dst = Rect::new(0.0, 0.0, 100.0, 50.0);

        assert_eq!(small.align_to_rect(dst, Align::Center), vec2(50.0, 25.0));
        assert_eq!(small.align_to_rect(dst, Align::Default), vec2(50.0, 25.0));
        assert_eq!(small.align_to_rect(dst, Align::Left), vec2(10.0, 25.0));
        assert_eq!(small.align_to_rect(dst, Align::Right), vec2(90.0, 25.0));
        assert_eq!(small.align_to_rect(dst, Align::Top), vec2(50.0, 45.0));
        assert_eq!(small.align_to_rect(dst, Align::BottomRight), vec2(90.0, 5.0));
    }

    #[test]
    fn test_align_to_point() {
        let r = Rect::from_size(10.0, 4.0);
        assert_eq!(r.align_to_point(vec2(0.0, 0.0), Align::TopLeft), vec2(5.0, -2.0));
        assert_eq!(
            r.aligned_in(Rect::from_size(30.0, 30.0), Align::BottomLeft),
            Rect::new(0.0, 0.0, 10.0, 4.0)
        );
    }

    #[test]
    fn test_rect_serde() {
        let r = Rect::new(0.0, 0.0, 500.0, 400.0);
        let json = serde_json::to_string(&r).unwrap();
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
