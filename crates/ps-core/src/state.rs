//! Fixed-length real state vector.
//!
//! A `State` is the value every plant differentiates and every integrator
//! advances. Arithmetic always produces a new `State`; nothing here mutates a
//! vector that has already been handed out.

use core::fmt;
use core::ops::{Add, Index, Mul};

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Ordered sequence of real scalars describing a system at one instant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct State(Vec<Real>);

impl State {
    pub fn new(values: Vec<Real>) -> Self {
        Self(values)
    }

    /// All-zero state of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self(vec![0.0; n])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.0
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Real> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<Real> {
        self.0.get(index).copied()
    }

    pub fn into_vec(self) -> Vec<Real> {
        self.0
    }

    /// Check that this state has exactly `expected` components.
    pub fn ensure_len(&self, expected: usize, what: &'static str) -> CoreResult<()> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(CoreError::DimensionMismatch {
                what,
                expected,
                actual: self.len(),
            })
        }
    }

    /// Element-wise sum, failing on a length mismatch.
    pub fn try_add(&self, other: &State) -> CoreResult<State> {
        other.ensure_len(self.len(), "state addition")?;
        Ok(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }

    /// `self + k * other`, failing on a length mismatch.
    ///
    /// This is the single update shape used by explicit stepping rules.
    pub fn add_scaled(&self, other: &State, k: Real) -> CoreResult<State> {
        other.ensure_len(self.len(), "scaled state addition")?;
        Ok(self
            .0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a + k * b)
            .collect())
    }

    /// Multiply every component by `k`.
    pub fn scale(&self, k: Real) -> State {
        self.0.iter().map(|v| v * k).collect()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Largest absolute component, or 0 for an empty state. NaN propagates.
    pub fn max_abs(&self) -> Real {
        self.0.iter().fold(0.0, |acc: Real, v| {
            if v.is_nan() || acc.is_nan() {
                Real::NAN
            } else {
                acc.max(v.abs())
            }
        })
    }
}

impl From<Vec<Real>> for State {
    fn from(values: Vec<Real>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[Real; N]> for State {
    fn from(values: [Real; N]) -> Self {
        Self(values.to_vec())
    }
}

impl FromIterator<Real> for State {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[Real]> for State {
    fn as_ref(&self) -> &[Real] {
        &self.0
    }
}

impl Index<usize> for State {
    type Output = Real;

    fn index(&self, index: usize) -> &Real {
        &self.0[index]
    }
}

/// Operator form of [`State::try_add`].
///
/// # Panics
///
/// Panics if the lengths differ. Mixing dimensions is a programming error.
impl Add<&State> for &State {
    type Output = State;

    fn add(self, rhs: &State) -> State {
        assert_eq!(
            self.len(),
            rhs.len(),
            "cannot add states of different lengths"
        );
        self.0.iter().zip(&rhs.0).map(|(a, b)| a + b).collect()
    }
}

impl Mul<Real> for &State {
    type Output = State;

    fn mul(self, rhs: Real) -> State {
        self.scale(rhs)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v:.6e}")?;
        }
        write!(f, "]")
    }
}
