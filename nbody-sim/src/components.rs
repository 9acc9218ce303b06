// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Vector state carried by each particle
//!
//! Position and velocity use double precision: positions accumulate over many
//! steps and single precision visibly drifts. Color is display-only and stays
//! in `f32`.

/// 3D position in world space
///
/// # Examples
///
/// ```
/// use nbody_sim::components::Position;
///
/// let pos = Position::new(1.0, 2.0, 3.0);
/// assert_eq!(pos.x(), 1.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f64,
    y: f64,
    z: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    /// Position at the origin
    pub fn zero() -> Self {
        Position::new(0.0, 0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Get the z coordinate
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Set the x coordinate
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Set the y coordinate
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Set the z coordinate
    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    /// Check if all coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Get the position as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Create a position from an array
    pub fn from_array(arr: [f64; 3]) -> Self {
        Position::new(arr[0], arr[1], arr[2])
    }
}

/// 3D velocity, in position units per time unit
///
/// ```
/// use nbody_sim::components::Velocity;
///
/// let vel = Velocity::new(3.0, 4.0, 0.0);
/// assert_eq!(vel.magnitude(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    dx: f64,
    dy: f64,
    dz: f64,
}

impl Velocity {
    /// Create a new velocity with the given components
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Velocity { dx, dy, dz }
    }

    /// Zero velocity (at rest)
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0, 0.0)
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Get the z component
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Set the x component
    pub fn set_dx(&mut self, dx: f64) {
        self.dx = dx;
    }

    /// Set the y component
    pub fn set_dy(&mut self, dy: f64) {
        self.dy = dy;
    }

    /// Set the z component
    pub fn set_dz(&mut self, dz: f64) {
        self.dz = dz;
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.dz.is_finite()
    }

    /// Speed
    pub fn magnitude(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy + self.dz * self.dz).sqrt()
    }

    /// Get the velocity as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.dx, self.dy, self.dz]
    }

    /// Create a velocity from an array
    pub fn from_array(arr: [f64; 3]) -> Self {
        Velocity::new(arr[0], arr[1], arr[2])
    }
}

/// RGB display color, each channel in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Create a color from its channels
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    /// Opaque white
    pub fn white() -> Self {
        Color::new(1.0, 1.0, 1.0)
    }

    /// Get the color as an array
    pub fn as_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::white()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_accessors() {
        let mut pos = Position::new(1.0, 2.0, 3.0);
        assert_eq!(pos.as_array(), [1.0, 2.0, 3.0]);
        pos.set_x(-1.0);
        pos.set_y(-2.0);
        pos.set_z(-3.0);
        assert_eq!(pos, Position::from_array([-1.0, -2.0, -3.0]));
    }

    #[test]
    fn test_position_validation() {
        assert!(Position::zero().is_valid());
        assert!(!Position::new(f64::NAN, 0.0, 0.0).is_valid());
        assert!(!Position::new(0.0, f64::INFINITY, 0.0).is_valid());
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(1.0, 0.0, 0.0);
        let b = Position::new(1.0, 3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_velocity_accessors() {
        let mut vel = Velocity::zero();
        vel.set_dx(1.0);
        vel.set_dy(2.0);
        vel.set_dz(2.0);
        assert_eq!(vel.magnitude(), 3.0);
        assert_eq!(Velocity::from_array(vel.as_array()), vel);
    }

    #[test]
    fn test_velocity_validation() {
        assert!(Velocity::new(1.0, -1.0, 0.5).is_valid());
        assert!(!Velocity::new(0.0, 0.0, f64::NEG_INFINITY).is_valid());
    }

    #[test]
    fn test_color_default_is_white() {
        assert_eq!(Color::default().as_array(), [1.0, 1.0, 1.0]);
    }
}
