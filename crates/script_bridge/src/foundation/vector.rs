//! Variable-length vector kernel used by scripts
//!
//! Scripts do their geometry with [`Vector`], a heap-backed vector whose
//! length is fixed at construction. Binary operators between vectors of
//! different lengths never fail: they work over the shared prefix
//! `min(len(a), len(b))` and pass the remaining components through.
//!
//! - `a + b`, `a - b`: the result has the longer operand's length and the
//!   longer operand's tail is copied unchanged.
//! - `a * b`, [`Vector::checked_div`], [`Vector::floor_div`]: the result starts
//!   as a copy of `a`; extra components of `b` are ignored.
//!
//! [`Vector::strict_add`] and [`Vector::strict_sub`] reject mismatched
//! lengths instead. Zero checks use exact float comparison.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use nalgebra::DVector;
use thiserror::Error;

use super::math::Vec3;

/// Errors raised by vector kernel operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// Operand shapes do not satisfy the operation's precondition
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A divisor component or scalar was exactly zero
    #[error("Division by zero")]
    DivideByZero,
}

/// Ordered, fixed-length sequence of `f32` components
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: DVector<f32>,
}

impl Vector {
    /// Create a vector from any list of components
    pub fn new(components: impl Into<Vec<f32>>) -> Self {
        Self {
            data: DVector::from_vec(components.into()),
        }
    }

    /// Create a zero vector of the given length
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            data: DVector::zeros(len),
        }
    }

    /// Number of components
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector has no components
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Component at `index`, if in range
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.data.get(index).copied()
    }

    /// Components as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        self.data.as_slice()
    }

    /// Iterate over the components
    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.data.iter()
    }

    /// Euclidean norm
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        self.data.norm()
    }

    /// Copy of this vector scaled to unit magnitude
    ///
    /// # Errors
    /// [`VectorError::InvalidArgument`] when the magnitude is zero.
    pub fn normalize(&self) -> Result<Self, VectorError> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(VectorError::InvalidArgument(
                "cannot normalize a zero vector".to_string(),
            ));
        }
        self.div_scalar(magnitude)
    }

    /// Elementwise product over the shared prefix
    #[must_use]
    pub fn mul_elementwise(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for i in 0..self.shared_len(other) {
            result[i] *= other[i];
        }
        result
    }

    /// Every component multiplied by `scalar`
    #[must_use]
    pub fn scale(&self, scalar: f32) -> Self {
        Self {
            data: &self.data * scalar,
        }
    }

    /// Elementwise division over the shared prefix
    ///
    /// # Errors
    /// [`VectorError::DivideByZero`] if any divisor component in the shared
    /// prefix is zero.
    pub fn checked_div(&self, other: &Self) -> Result<Self, VectorError> {
        let mut result = self.clone();
        for i in 0..self.shared_len(other) {
            if other[i] == 0.0 {
                return Err(VectorError::DivideByZero);
            }
            result[i] /= other[i];
        }
        Ok(result)
    }

    /// Every component divided by `scalar`
    ///
    /// # Errors
    /// [`VectorError::DivideByZero`] if `scalar` is zero.
    pub fn div_scalar(&self, scalar: f32) -> Result<Self, VectorError> {
        if scalar == 0.0 {
            return Err(VectorError::DivideByZero);
        }
        Ok(Self {
            data: &self.data / scalar,
        })
    }

    /// Elementwise flooring division over the shared prefix
    ///
    /// # Errors
    /// [`VectorError::DivideByZero`] if any divisor component in the shared
    /// prefix is zero.
    pub fn floor_div(&self, other: &Self) -> Result<Self, VectorError> {
        let mut result = self.clone();
        for i in 0..self.shared_len(other) {
            if other[i] == 0.0 {
                return Err(VectorError::DivideByZero);
            }
            result[i] = (result[i] / other[i]).floor();
        }
        Ok(result)
    }

    /// Addition that rejects mismatched lengths
    ///
    /// # Errors
    /// [`VectorError::InvalidArgument`] when the lengths differ.
    pub fn strict_add(&self, other: &Self) -> Result<Self, VectorError> {
        self.require_same_len(other, "strict_add")?;
        Ok(self + other)
    }

    /// Subtraction that rejects mismatched lengths
    ///
    /// # Errors
    /// [`VectorError::InvalidArgument`] when the lengths differ.
    pub fn strict_sub(&self, other: &Self) -> Result<Self, VectorError> {
        self.require_same_len(other, "strict_sub")?;
        Ok(self - other)
    }

    /// Convert a 3-component vector into the engine's `Vec3`
    ///
    /// # Errors
    /// [`VectorError::InvalidArgument`] unless the vector has exactly 3 components.
    pub fn to_vec3(&self) -> Result<Vec3, VectorError> {
        match self.as_slice() {
            [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
            _ => Err(VectorError::InvalidArgument(format!(
                "expected 3 components, got {}",
                self.len()
            ))),
        }
    }

    fn shared_len(&self, other: &Self) -> usize {
        self.len().min(other.len())
    }

    fn require_same_len(&self, other: &Self, operation: &str) -> Result<(), VectorError> {
        if self.len() == other.len() {
            Ok(())
        } else {
            Err(VectorError::InvalidArgument(format!(
                "{operation} requires equal lengths, got {} and {}",
                self.len(),
                other.len()
            )))
        }
    }

    fn zip_longest(&self, other: &Self, op: impl Fn(f32, f32) -> f32) -> Self {
        let mut result = if self.len() >= other.len() {
            self.clone()
        } else {
            other.clone()
        };
        for i in 0..self.shared_len(other) {
            result[i] = op(self[i], other[i]);
        }
        result
    }
}

/// Scalar 2D cross product (signed parallelogram area)
///
/// # Errors
/// [`VectorError::InvalidArgument`] unless both vectors have 2 components.
pub fn cross2(a: &Vector, b: &Vector) -> Result<f32, VectorError> {
    match (a.as_slice(), b.as_slice()) {
        ([ax, ay], [bx, by]) => Ok(ax * by - ay * bx),
        _ => Err(VectorError::InvalidArgument(
            "both vectors must have 2 components".to_string(),
        )),
    }
}

/// 3D cross product
///
/// # Errors
/// [`VectorError::InvalidArgument`] unless both vectors have 3 components.
pub fn cross(a: &Vector, b: &Vector) -> Result<Vector, VectorError> {
    match (a.as_slice(), b.as_slice()) {
        ([ax, ay, az], [bx, by, bz]) => Ok(Vector::new([
            ay * bz - az * by,
            az * bx - ax * bz,
            ax * by - ay * bx,
        ])),
        _ => Err(VectorError::InvalidArgument(
            "both vectors must have 3 components".to_string(),
        )),
    }
}

/// Dot product
///
/// # Errors
/// [`VectorError::InvalidArgument`] when the lengths differ.
pub fn dot(a: &Vector, b: &Vector) -> Result<f32, VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::InvalidArgument(
            "both vectors must have the same size".to_string(),
        ));
    }
    Ok(a.data.dot(&b.data))
}

/// Unit-length copy of `vector`
///
/// # Errors
/// [`VectorError::InvalidArgument`] on a zero vector.
pub fn normalize(vector: &Vector) -> Result<Vector, VectorError> {
    vector.normalize()
}

/// Magnitude of `b - a`
#[must_use]
pub fn distance(a: &Vector, b: &Vector) -> f32 {
    (b - a).magnitude()
}

impl Index<usize> for Vector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.data[index]
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, other: &Vector) -> Vector {
        self.zip_longest(other, |a, b| a + b)
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, other: &Vector) -> Vector {
        self.zip_longest(other, |a, b| a - b)
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self - &other
    }
}

impl Mul for &Vector {
    type Output = Vector;

    fn mul(self, other: &Vector) -> Vector {
        self.mul_elementwise(other)
    }
}

impl Mul<f32> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: f32) -> Vector {
        self.scale(scalar)
    }
}

impl Mul<f32> for Vector {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        self.scale(scalar)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector { data: -&self.data }
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}

impl From<Vec<f32>> for Vector {
    fn from(components: Vec<f32>) -> Self {
        Self::new(components)
    }
}

impl<const N: usize> From<[f32; N]> for Vector {
    fn from(components: [f32; N]) -> Self {
        Self::new(components)
    }
}

impl From<Vec3> for Vector {
    fn from(v: Vec3) -> Self {
        Self::new([v.x, v.y, v.z])
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, component) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{component:?}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vector_eq(actual: &Vector, expected: &[f32]) {
        assert_eq!(actual.len(), expected.len(), "length mismatch: {actual}");
        for (a, e) in actual.iter().zip(expected) {
            assert_relative_eq!(*a, *e, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_add_then_sub_restores_operand() {
        let a = Vector::new([1.5, -2.0, 3.25, 8.0]);
        let b = Vector::new([0.5, 4.0, -1.0, 2.0]);
        let restored = &(&a + &b) - &b;
        assert_vector_eq(&restored, a.as_slice());
    }

    #[test]
    fn test_add_preserves_longer_tail() {
        let short = Vector::new([1.0, 1.0]);
        let long = Vector::new([10.0, 20.0, 30.0, 40.0]);

        assert_vector_eq(&(&short + &long), &[11.0, 21.0, 30.0, 40.0]);
        assert_vector_eq(&(&long + &short), &[11.0, 21.0, 30.0, 40.0]);
    }

    #[test]
    fn test_sub_preserves_longer_tail_unchanged() {
        let short = Vector::new([1.0]);
        let long = Vector::new([5.0, 6.0, 7.0]);

        assert_vector_eq(&(&long - &short), &[4.0, 6.0, 7.0]);
        assert_vector_eq(&(&short - &long), &[-4.0, 6.0, 7.0]);
    }

    #[test]
    fn test_operators_do_not_mutate_operands() {
        let a = Vector::new([1.0, 2.0, 3.0]);
        let b = Vector::new([4.0, 5.0, 6.0]);
        let _ = &a + &b;
        let _ = &a * &b;
        let _ = &a * 2.0;
        assert_vector_eq(&a, &[1.0, 2.0, 3.0]);
        assert_vector_eq(&b, &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_mul_over_shared_prefix_keeps_left_tail() {
        let a = Vector::new([2.0, 3.0, 4.0]);
        let b = Vector::new([5.0, 10.0]);
        assert_vector_eq(&(&a * &b), &[10.0, 30.0, 4.0]);
        assert_vector_eq(&(&b * &a), &[10.0, 30.0]);
        assert_vector_eq(&(&a * 0.5), &[1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_division_by_zero_is_rejected() {
        let a = Vector::new([1.0, 2.0, 3.0]);
        let with_zero = Vector::new([1.0, 0.0, 1.0]);

        assert_eq!(a.checked_div(&with_zero), Err(VectorError::DivideByZero));
        assert_eq!(a.div_scalar(0.0), Err(VectorError::DivideByZero));
        assert_eq!(a.floor_div(&with_zero), Err(VectorError::DivideByZero));
    }

    #[test]
    fn test_zero_outside_shared_prefix_is_ignored() {
        let a = Vector::new([4.0, 9.0]);
        let b = Vector::new([2.0, 3.0, 0.0]);
        let quotient = a.checked_div(&b).expect("prefix has no zero");
        assert_vector_eq(&quotient, &[2.0, 3.0]);
    }

    #[test]
    fn test_div_then_mul_restores_prefix() {
        let a = Vector::new([3.0, -7.5, 12.0]);
        let b = Vector::new([1.5, 2.5, -4.0]);
        let restored = &a.checked_div(&b).expect("non-zero divisor") * &b;
        assert_vector_eq(&restored, a.as_slice());
    }

    #[test]
    fn test_floor_div_floors_each_component() {
        let a = Vector::new([7.0, -7.0, 9.5]);
        let b = Vector::new([2.0, 2.0, 3.0]);
        assert_vector_eq(&a.floor_div(&b).expect("non-zero divisor"), &[3.0, -4.0, 3.0]);
    }

    #[test]
    fn test_normalize_produces_unit_magnitude() {
        let v = Vector::new([3.0, 4.0, 12.0]);
        assert_relative_eq!(v.magnitude(), 13.0, epsilon = 1e-5);
        assert_relative_eq!(normalize(&v).expect("non-zero").magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_is_invalid() {
        let zero = Vector::zeros(3);
        assert!(matches!(zero.normalize(), Err(VectorError::InvalidArgument(_))));
    }

    #[test]
    fn test_cross_is_anti_commutative() {
        let a = Vector::new([1.0, 2.0, 3.0]);
        let b = Vector::new([-4.0, 0.5, 2.0]);
        let ab = cross(&a, &b).expect("3-vectors");
        let ba = cross(&b, &a).expect("3-vectors");
        assert_vector_eq(&ab, (-&ba).as_slice());
    }

    #[test]
    fn test_cross_matches_right_handed_axes() {
        let x = Vector::new([1.0, 0.0, 0.0]);
        let y = Vector::new([0.0, 1.0, 0.0]);
        assert_vector_eq(&cross(&x, &y).expect("3-vectors"), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_cross_requires_three_components() {
        let a = Vector::new([1.0, 2.0]);
        let b = Vector::new([1.0, 2.0, 3.0]);
        assert!(matches!(cross(&a, &b), Err(VectorError::InvalidArgument(_))));
        assert!(matches!(cross(&b, &a), Err(VectorError::InvalidArgument(_))));
    }

    #[test]
    fn test_cross2_signed_area() {
        let a = Vector::new([1.0, 0.0]);
        let b = Vector::new([0.0, 2.0]);
        assert_eq!(cross2(&a, &b), Ok(2.0));
        assert_eq!(cross2(&b, &a), Ok(-2.0));
        assert!(cross2(&a, &Vector::new([1.0, 2.0, 3.0])).is_err());
    }

    #[test]
    fn test_dot_requires_equal_lengths() {
        let a = Vector::new([1.0, 2.0, 3.0]);
        let b = Vector::new([4.0, 5.0, 6.0]);
        assert_eq!(dot(&a, &b), Ok(32.0));
        assert!(matches!(
            dot(&a, &Vector::new([1.0, 2.0])),
            Err(VectorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_distance_is_magnitude_of_difference() {
        let a = Vector::new([1.0, 1.0, 1.0]);
        let b = Vector::new([4.0, 5.0, 1.0]);
        assert_relative_eq!(distance(&a, &b), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_strict_variants_reject_length_mismatch() {
        let a = Vector::new([1.0, 2.0, 3.0]);
        let b = Vector::new([1.0, 2.0]);
        assert!(a.strict_add(&b).is_err());
        assert!(a.strict_sub(&b).is_err());
        assert_vector_eq(&a.strict_add(&a).expect("same length"), &[2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_indexed_assignment_mutates_in_place() {
        let mut v = Vector::zeros(3);
        v[1] = 0.47;
        assert_eq!(v.get(1), Some(0.47));
        assert_eq!(v.get(3), None);
        assert_eq!(v.to_string(), "[0.0, 0.47, 0.0]");
    }

    #[test]
    fn test_vec3_conversion_requires_three_components() {
        let v = Vector::new([1.0, 2.0, 3.0]);
        assert_eq!(v.to_vec3(), Ok(Vec3::new(1.0, 2.0, 3.0)));
        assert!(Vector::new([1.0, 2.0]).to_vec3().is_err());
        assert_eq!(Vector::from(Vec3::new(1.0, 2.0, 3.0)), v);
    }
}
