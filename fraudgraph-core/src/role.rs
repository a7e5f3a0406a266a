//! Role categories and per-role weight mappings.
//!
//! [`Role`] is shared by the ground-truth `true_state` and the working
//! `state` label. [`RoleWeights`] carries one `f64` per role and doubles as a
//! target distribution (for role sampling) and as a belief vector (for the
//! per-node prior).

use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distributions::{Distribution, Standard},
};

use crate::error::DistributionError;

/// Absolute tolerance applied when checking that weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

const ONE_THIRD: f64 = 1.0 / 3.0;

/// Category assigned to every actor in the synthesized network.
///
/// # Examples
/// ```
/// use fraudgraph_core::Role;
///
/// let role: Role = "Accomplice".parse().expect("known role");
/// assert_eq!(role, Role::Accomplice);
/// assert_eq!(role.to_string(), "Accomplice");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Role {
    /// Actor committing fraud.
    Fraud,
    /// Actor colluding with fraudulent actors.
    Accomplice,
    /// Actor not involved in fraud.
    Honest,
}

impl Role {
    /// All roles in canonical sampling order.
    pub const ALL: [Self; 3] = [Self::Fraud, Self::Accomplice, Self::Honest];

    /// Returns the interchange spelling of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fraud => "Fraud",
            Self::Accomplice => "Accomplice",
            Self::Honest => "Honest",
        }
    }

    /// Position of the role within [`Role::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Fraud => 0,
            Self::Accomplice => 1,
            Self::Honest => 2,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform draw over the three roles.
impl Distribution<Role> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Role {
        match rng.gen_range(0..3_u8) {
            0 => Role::Fraud,
            1 => Role::Accomplice,
            _ => Role::Honest,
        }
    }
}

/// Error returned when a string does not name a [`Role`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown role `{0}`; expected Fraud, Accomplice or Honest")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "Fraud" => Ok(Self::Fraud),
            "Accomplice" => Ok(Self::Accomplice),
            "Honest" => Ok(Self::Honest),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// One weight per [`Role`].
///
/// Used both as a categorical distribution over roles and as a belief
/// vector. Construction is unchecked; call [`RoleWeights::validate`] before
/// treating the weights as a probability simplex.
///
/// The [`Display`](fmt::Display) form matches the interchange format:
///
/// ```
/// use fraudgraph_core::RoleWeights;
///
/// let weights = RoleWeights::new(0.1, 0.2, 0.7);
/// assert_eq!(weights.to_string(), "{'Fraud': 0.1, 'Accomplice': 0.2, 'Honest': 0.7}");
/// let parsed: RoleWeights = weights.to_string().parse().expect("round trip");
/// assert_eq!(parsed, weights);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoleWeights {
    /// Weight for [`Role::Fraud`].
    pub fraud: f64,
    /// Weight for [`Role::Accomplice`].
    pub accomplice: f64,
    /// Weight for [`Role::Honest`].
    pub honest: f64,
}

impl RoleWeights {
    /// Creates a weight mapping from explicit values.
    #[must_use]
    pub const fn new(fraud: f64, accomplice: f64, honest: f64) -> Self {
        Self {
            fraud,
            accomplice,
            honest,
        }
    }

    /// Equal weight on every role.
    #[must_use]
    pub const fn uniform() -> Self {
        Self::new(ONE_THIRD, ONE_THIRD, ONE_THIRD)
    }

    /// Default target distribution of ground-truth roles.
    #[must_use]
    pub const fn default_state_distribution() -> Self {
        Self::new(0.1, 0.2, 0.7)
    }

    /// Builds weights from `(role, weight)` pairs, requiring each role
    /// exactly once.
    ///
    /// # Errors
    /// Returns [`DistributionError::DuplicateRole`] when a role repeats and
    /// [`DistributionError::MissingRole`] when one is absent.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = (Role, f64)>,
    {
        let mut slots: [Option<f64>; 3] = [None; 3];
        for (role, weight) in pairs {
            let Some(slot) = slots.get_mut(role.index()) else {
                continue;
            };
            if slot.replace(weight).is_some() {
                return Err(DistributionError::DuplicateRole { role });
            }
        }
        let take = |role: Role| {
            slots
                .get(role.index())
                .copied()
                .flatten()
                .ok_or(DistributionError::MissingRole { role })
        };
        Ok(Self::new(
            take(Role::Fraud)?,
            take(Role::Accomplice)?,
            take(Role::Honest)?,
        ))
    }

    /// Returns the weight attached to `role`.
    #[must_use]
    pub const fn get(&self, role: Role) -> f64 {
        match role {
            Role::Fraud => self.fraud,
            Role::Accomplice => self.accomplice,
            Role::Honest => self.honest,
        }
    }

    /// Weights in [`Role::ALL`] order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 3] {
        [self.fraud, self.accomplice, self.honest]
    }

    /// Sum of all weights.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "belief mass is a floating-point sum"
    )]
    pub fn sum(&self) -> f64 {
        self.fraud + self.accomplice + self.honest
    }

    /// Checks that the weights form a probability simplex.
    ///
    /// # Errors
    /// Returns [`DistributionError::NonFinite`] or
    /// [`DistributionError::Negative`] for the first offending role, and
    /// [`DistributionError::SumMismatch`] when the total is not within
    /// [`WEIGHT_SUM_TOLERANCE`] of one.
    #[expect(
        clippy::float_arithmetic,
        reason = "tolerance check compares floating-point sums"
    )]
    pub fn validate(&self) -> Result<(), DistributionError> {
        for role in Role::ALL {
            let value = self.get(role);
            if !value.is_finite() {
                return Err(DistributionError::NonFinite { role });
            }
            if value < 0.0 {
                return Err(DistributionError::Negative { role, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DistributionError::SumMismatch { sum });
        }
        Ok(())
    }
}

impl fmt::Display for RoleWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, role) in Role::ALL.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{role}': ")?;
            write_float(f, self.get(*role))?;
        }
        f.write_str("}")
    }
}

// Integral values keep a trailing `.0` so the text reads as a float literal.
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 {
        write!(f, "{value:.1}")
    } else {
        write!(f, "{value}")
    }
}

impl FromStr for RoleWeights {
    type Err = DistributionError;

    /// Parses either `Fraud=0.1,Accomplice=0.2,Honest=0.7` or the
    /// dictionary form produced by [`Display`](fmt::Display).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &'static str| DistributionError::Malformed {
            input: raw.to_owned(),
            reason,
        };
        let trimmed = raw.trim();
        let body = match (trimmed.strip_prefix('{'), trimmed.ends_with('}')) {
            (Some(rest), true) => rest.strip_suffix('}').unwrap_or(rest),
            (None, false) => trimmed,
            _ => return Err(malformed("unbalanced braces")),
        };
        if body.trim().is_empty() {
            return Err(malformed("no entries"));
        }

        let mut pairs = Vec::with_capacity(3);
        for entry in body.split(',') {
            let (key, value) = entry
                .split_once(':')
                .or_else(|| entry.split_once('='))
                .ok_or_else(|| malformed("entries must be `role=weight` or `'role': weight`"))?;
            let role = key
                .trim()
                .trim_matches(|c| c == '\'' || c == '"')
                .parse::<Role>()
                .map_err(|_| malformed("unknown role name"))?;
            let weight = value
                .trim()
                .parse::<f64>()
                .map_err(|_| malformed("weight is not a number"))?;
            pairs.push((role, weight));
        }
        Self::from_pairs(pairs)
    }
}
