//! Plane geometry primitives shared by the simulation and render code.
//!
//! [`Vector2`] and [`Rectangle`] mirror the layout of the raylib types of the
//! same name so that the optional raylib backend can convert them field by
//! field. Rectangles are stored as top-left corner plus size, in world units.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rotate the vector about the origin by `radians`.
    pub fn rotated(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            x: cos * self.x - sin * self.y,
            y: sin * self.x + cos * self.y,
        }
    }

    pub fn scale_by(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    fn mul(self, rhs: f32) -> Vector2 {
        self.scale_by(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// The same rectangle moved by `offset`.
    pub fn translated(&self, offset: Vector2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

/// Strict overlap test: rectangles that only share an edge do not intersect.
pub fn intersects(a: &Rectangle, b: &Rectangle) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Smallest axis-aligned box containing `rectangle` rotated by `rotation`
/// radians about its own center.
pub fn rotated_aabb(rectangle: &Rectangle, rotation: f32) -> Rectangle {
    let half_size = Vector2::new(rectangle.width * 0.5, rectangle.height * 0.5);
    let center = rectangle.center();

    let mut lower = center;
    let mut upper = center;

    for sx in [-1.0f32, 1.0] {
        for sy in [-1.0f32, 1.0] {
            let corner = Vector2::new(half_size.x * sx, half_size.y * sy).rotated(rotation);
            let point = center + corner;

            lower.x = lower.x.min(point.x);
            lower.y = lower.y.min(point.y);
            upper.x = upper.x.max(point.x);
            upper.y = upper.y.max(point.y);
        }
    }

    Rectangle::new(lower.x, lower.y, upper.x - lower.x, upper.y - lower.y)
}

/// [`rotated_aabb`] of `rectangle` after scaling its size by `scale`, keeping
/// the top-left corner (the draw origin) in place.
pub fn rotated_scaled_aabb(rectangle: &Rectangle, rotation: f32, scale: f32) -> Rectangle {
    let scaled = Rectangle::new(
        rectangle.x,
        rectangle.y,
        rectangle.width * scale,
        rectangle.height * scale,
    );
    rotated_aabb(&scaled, rotation)
}
