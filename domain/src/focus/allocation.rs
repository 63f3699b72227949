//! Training-focus categories and a session's allocation across them.

use crate::core::error::TransitionError;
use serde::{Deserialize, Serialize};

/// The seven fixed training-focus categories, in allocation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusCategory {
    AttackPositional,
    DefensePositional,
    TransitionOffense,
    TransitionDefense,
    AttackTechnical,
    DefenseTechnical,
    Physical,
}

impl FocusCategory {
    pub const COUNT: usize = 7;

    pub const ALL: [FocusCategory; Self::COUNT] = [
        FocusCategory::AttackPositional,
        FocusCategory::DefensePositional,
        FocusCategory::TransitionOffense,
        FocusCategory::TransitionDefense,
        FocusCategory::AttackTechnical,
        FocusCategory::DefenseTechnical,
        FocusCategory::Physical,
    ];

    pub fn index(&self) -> usize {
        match self {
            FocusCategory::AttackPositional => 0,
            FocusCategory::DefensePositional => 1,
            FocusCategory::TransitionOffense => 2,
            FocusCategory::TransitionDefense => 3,
            FocusCategory::AttackTechnical => 4,
            FocusCategory::DefenseTechnical => 5,
            FocusCategory::Physical => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FocusCategory::AttackPositional => "attack_positional",
            FocusCategory::DefensePositional => "defense_positional",
            FocusCategory::TransitionOffense => "transition_offense",
            FocusCategory::TransitionDefense => "transition_defense",
            FocusCategory::AttackTechnical => "attack_technical",
            FocusCategory::DefenseTechnical => "defense_technical",
            FocusCategory::Physical => "physical",
        }
    }
}

impl std::fmt::Display for FocusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentages per focus category.
///
/// Values are non-negative by construction. Their sum is not bounded here;
/// see [`validate_focus`](super::report::validate_focus) for the soft ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusAllocation([u32; FocusCategory::COUNT]);

impl FocusAllocation {
    pub fn new(values: [u32; FocusCategory::COUNT]) -> Self {
        Self(values)
    }

    /// Build from raw, untrusted numbers (form input, imports).
    pub fn try_from_values(values: &[i64]) -> Result<Self, TransitionError> {
        if values.len() != FocusCategory::COUNT {
            return Err(TransitionError::invalid_input(format!(
                "focus allocation needs {} values, got {}",
                FocusCategory::COUNT,
                values.len()
            )));
        }

        let mut out = [0u32; FocusCategory::COUNT];
        for (category, (slot, raw)) in FocusCategory::ALL
            .iter()
            .zip(out.iter_mut().zip(values.iter()))
        {
            *slot = u32::try_from(*raw).map_err(|_| {
                TransitionError::invalid_input(format!(
                    "focus value for {} must be a non-negative integer, got {}",
                    category, raw
                ))
            })?;
        }

        Ok(Self(out))
    }

    pub fn get(&self, category: FocusCategory) -> u32 {
        self.0[category.index()]
    }

    pub fn set(&mut self, category: FocusCategory, value: u32) {
        self.0[category.index()] = value;
    }

    pub fn with(mut self, category: FocusCategory, value: u32) -> Self {
        self.set(category, value);
        self
    }

    pub fn values(&self) -> &[u32; FocusCategory::COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (FocusCategory, u32)> + '_ {
        FocusCategory::ALL.iter().map(|c| (*c, self.get(*c)))
    }

    /// Sum of all categories, widened so it cannot overflow.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|v| u64::from(*v)).sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0)
    }
}

impl From<[u32; FocusCategory::COUNT]> for FocusAllocation {
    fn from(values: [u32; FocusCategory::COUNT]) -> Self {
        Self::new(values)
    }
}
