//! Grade buckets and the fixed grade-points table.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One grade symbol as it appears on a transcript.
///
/// Variant order is display (transcript) order, so sorted maps keyed by
/// `GradeBucketKey` iterate in the order a chart shows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeBucketKey {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "P")]
    Pass,
    #[serde(rename = "NP")]
    NoPass,
    #[serde(rename = "W")]
    Withdrawn,
}

impl GradeBucketKey {
    /// All 16 buckets in display order.
    pub const ALL: [GradeBucketKey; 16] = [
        GradeBucketKey::APlus,
        GradeBucketKey::A,
        GradeBucketKey::AMinus,
        GradeBucketKey::BPlus,
        GradeBucketKey::B,
        GradeBucketKey::BMinus,
        GradeBucketKey::CPlus,
        GradeBucketKey::C,
        GradeBucketKey::CMinus,
        GradeBucketKey::DPlus,
        GradeBucketKey::D,
        GradeBucketKey::DMinus,
        GradeBucketKey::F,
        GradeBucketKey::Pass,
        GradeBucketKey::NoPass,
        GradeBucketKey::Withdrawn,
    ];

    /// The 13 letter grades, i.e. every bucket that carries grade points.
    pub const LETTERS: [GradeBucketKey; 13] = [
        GradeBucketKey::APlus,
        GradeBucketKey::A,
        GradeBucketKey::AMinus,
        GradeBucketKey::BPlus,
        GradeBucketKey::B,
        GradeBucketKey::BMinus,
        GradeBucketKey::CPlus,
        GradeBucketKey::C,
        GradeBucketKey::CMinus,
        GradeBucketKey::DPlus,
        GradeBucketKey::D,
        GradeBucketKey::DMinus,
        GradeBucketKey::F,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GradeBucketKey::APlus => "A+",
            GradeBucketKey::A => "A",
            GradeBucketKey::AMinus => "A-",
            GradeBucketKey::BPlus => "B+",
            GradeBucketKey::B => "B",
            GradeBucketKey::BMinus => "B-",
            GradeBucketKey::CPlus => "C+",
            GradeBucketKey::C => "C",
            GradeBucketKey::CMinus => "C-",
            GradeBucketKey::DPlus => "D+",
            GradeBucketKey::D => "D",
            GradeBucketKey::DMinus => "D-",
            GradeBucketKey::F => "F",
            GradeBucketKey::Pass => "P",
            GradeBucketKey::NoPass => "NP",
            GradeBucketKey::Withdrawn => "W",
        }
    }

    /// Grade points for this bucket.
    ///
    /// | Grade | Points | Grade | Points |
    /// |-------|--------|-------|--------|
    /// | A+    | 4.0    | C     | 2.0    |
    /// | A     | 4.0    | C-    | 1.7    |
    /// | A-    | 3.7    | D+    | 1.3    |
    /// | B+    | 3.3    | D     | 1.0    |
    /// | B     | 3.0    | D-    | 0.7    |
    /// | B-    | 2.7    | F     | 0.0    |
    /// | C+    | 2.3    |       |        |
    ///
    /// `P`, `NP` and `W` have no entry and never count toward a GPA.
    pub fn points(self) -> Option<f64> {
        match self {
            GradeBucketKey::APlus | GradeBucketKey::A => Some(4.0),
            GradeBucketKey::AMinus => Some(3.7),
            GradeBucketKey::BPlus => Some(3.3),
            GradeBucketKey::B => Some(3.0),
            GradeBucketKey::BMinus => Some(2.7),
            GradeBucketKey::CPlus => Some(2.3),
            GradeBucketKey::C => Some(2.0),
            GradeBucketKey::CMinus => Some(1.7),
            GradeBucketKey::DPlus => Some(1.3),
            GradeBucketKey::D => Some(1.0),
            GradeBucketKey::DMinus => Some(0.7),
            GradeBucketKey::F => Some(0.0),
            GradeBucketKey::Pass | GradeBucketKey::NoPass | GradeBucketKey::Withdrawn => None,
        }
    }
}

impl fmt::Display for GradeBucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeBucketKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match GradeBucketKey::ALL.iter().find(|k| k.as_str() == s) {
            Some(key) => Ok(*key),
            None => bail!("unknown grade bucket '{s}'"),
        }
    }
}

/// Converts an average GPA into the letter grade it rounds down to.
///
/// Returns the highest letter whose points do not exceed `gpa`. `A` is
/// preferred over `A+` since both carry 4.0.
pub fn letter_for_gpa(gpa: f64) -> GradeBucketKey {
    match gpa {
        g if g >= 4.0 => GradeBucketKey::A,
        g if g >= 3.7 => GradeBucketKey::AMinus,
        g if g >= 3.3 => GradeBucketKey::BPlus,
        g if g >= 3.0 => GradeBucketKey::B,
        g if g >= 2.7 => GradeBucketKey::BMinus,
        g if g >= 2.3 => GradeBucketKey::CPlus,
        g if g >= 2.0 => GradeBucketKey::C,
        g if g >= 1.7 => GradeBucketKey::CMinus,
        g if g >= 1.3 => GradeBucketKey::DPlus,
        g if g >= 1.0 => GradeBucketKey::D,
        g if g >= 0.7 => GradeBucketKey::DMinus,
        _ => GradeBucketKey::F,
    }
}
