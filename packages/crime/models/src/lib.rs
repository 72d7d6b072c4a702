#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crime category column definitions.
//!
//! The source dataset reports ten crime categories per state, district and
//! year. Every part of the dashboard refers to those columns through
//! [`CrimeCategory`] rather than by free-form column names, and to "any
//! numeric column" through [`NumericColumn`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Number of declared crime categories.
pub const CATEGORY_COUNT: usize = 10;

/// Header text of the derived total column.
pub const TOTAL_CRIME_COLUMN: &str = "Total Crime";

/// One of the ten crime categories reported by the dataset.
///
/// The string form of each variant is the exact CSV header used by the
/// source file. Parsing is ASCII case-insensitive.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum CrimeCategory {
    /// Murder.
    #[serde(rename = "Murder")]
    #[strum(serialize = "Murder")]
    Murder,
    /// Assault on women.
    #[serde(rename = "Assault on women")]
    #[strum(serialize = "Assault on women")]
    AssaultOnWomen,
    /// Kidnapping and abduction.
    #[serde(rename = "Kidnapping and Abduction")]
    #[strum(serialize = "Kidnapping and Abduction")]
    KidnappingAndAbduction,
    /// Dacoity (armed gang robbery).
    #[serde(rename = "Dacoity")]
    #[strum(serialize = "Dacoity")]
    Dacoity,
    /// Robbery.
    #[serde(rename = "Robbery")]
    #[strum(serialize = "Robbery")]
    Robbery,
    /// Arson.
    #[serde(rename = "Arson")]
    #[strum(serialize = "Arson")]
    Arson,
    /// Hurt.
    #[serde(rename = "Hurt")]
    #[strum(serialize = "Hurt")]
    Hurt,
    /// Offences under the Prevention of Atrocities Act.
    #[serde(rename = "Prevention of atrocities (POA) Act")]
    #[strum(serialize = "Prevention of atrocities (POA) Act")]
    PreventionOfAtrocitiesAct,
    /// Offences under the Protection of Civil Rights Act.
    #[serde(rename = "Protection of Civil Rights (PCR) Act")]
    #[strum(serialize = "Protection of Civil Rights (PCR) Act")]
    ProtectionOfCivilRightsAct,
    /// Other crimes against Scheduled Castes.
    #[serde(rename = "Other Crimes Against SCs")]
    #[strum(serialize = "Other Crimes Against SCs")]
    OtherCrimesAgainstScs,
}

impl CrimeCategory {
    /// Position of this category in the declared column order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns all categories in declared column order.
    #[must_use]
    pub const fn all() -> &'static [Self; CATEGORY_COUNT] {
        &[
            Self::Murder,
            Self::AssaultOnWomen,
            Self::KidnappingAndAbduction,
            Self::Dacoity,
            Self::Robbery,
            Self::Arson,
            Self::Hurt,
            Self::PreventionOfAtrocitiesAct,
            Self::ProtectionOfCivilRightsAct,
            Self::OtherCrimesAgainstScs,
        ]
    }

    /// The two special-act categories tracked as a separate trend.
    #[must_use]
    pub const fn special_acts() -> &'static [Self] {
        &[
            Self::PreventionOfAtrocitiesAct,
            Self::ProtectionOfCivilRightsAct,
        ]
    }
}

/// A numeric column that can be selected at runtime (range filters,
/// column pickers).
///
/// Either one of the declared [`CrimeCategory`] columns or the derived
/// [`TOTAL_CRIME_COLUMN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NumericColumn {
    /// A raw category count.
    Category(CrimeCategory),
    /// The derived per-row total of all categories.
    TotalCrime,
}

impl NumericColumn {
    /// Returns every selectable numeric column: the categories in declared
    /// order followed by the derived total.
    #[must_use]
    pub fn all() -> Vec<Self> {
        CrimeCategory::all()
            .iter()
            .copied()
            .map(Self::Category)
            .chain(std::iter::once(Self::TotalCrime))
            .collect()
    }

    /// Header text for this column.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Category(category) => category.into(),
            Self::TotalCrime => TOTAL_CRIME_COLUMN,
        }
    }
}

impl std::fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<CrimeCategory> for NumericColumn {
    fn from(category: CrimeCategory) -> Self {
        Self::Category(category)
    }
}

/// Error returned when a column name does not match any numeric column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumnError {
    /// The name that failed to match.
    pub name: String,
}

impl std::fmt::Display for UnknownColumnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown numeric column '{}'", self.name)
    }
}

impl std::error::Error for UnknownColumnError {}

impl FromStr for NumericColumn {
    type Err = UnknownColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(TOTAL_CRIME_COLUMN)
            || trimmed.eq_ignore_ascii_case("Total Crimes")
        {
            return Ok(Self::TotalCrime);
        }
        CrimeCategory::from_str(trimmed)
            .map(Self::Category)
            .map_err(|_| UnknownColumnError {
                name: trimmed.to_string(),
            })
    }
}

impl TryFrom<String> for NumericColumn {
    type Error = UnknownColumnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NumericColumn> for String {
    fn from(column: NumericColumn) -> Self {
        column.name().to_string()
    }
}
