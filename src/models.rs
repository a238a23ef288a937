//! Domain model for maintenance inspection sheets.
//!
//! An [`Installation`] owns an ordered list of [`Activity`] entries, each with
//! its own required cadence ([`Frequency`]). Clients are stored alongside
//! installations in the same aggregate but are only associated with an
//! installation transiently, at generation time.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Rejected frequency count: zero, or a year count whose month-equivalent
/// does not fit in `u32`. A zero cadence would make the
/// inclusive-divisibility filter divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid frequency: count {0} has no positive month-equivalent")]
pub struct InvalidFrequency(pub u32);

/// Unit of a maintenance cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyUnit {
    Month,
    Year,
}

/// A maintenance cadence, expressed in months or years.
///
/// Two frequencies are the same bucket for filtering and grouping purposes
/// iff their [`in_months`](Frequency::in_months) values match: 12 months and
/// 1 year are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFrequency", into = "RawFrequency")]
pub struct Frequency {
    unit: FrequencyUnit,
    count: u32,
}

/// Unvalidated wire shape; all construction funnels through [`Frequency::new`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawFrequency {
    unit: FrequencyUnit,
    count: u32,
}

impl TryFrom<RawFrequency> for Frequency {
    type Error = InvalidFrequency;

    fn try_from(raw: RawFrequency) -> Result<Self, Self::Error> {
        Frequency::new(raw.unit, raw.count)
    }
}

impl From<Frequency> for RawFrequency {
    fn from(f: Frequency) -> Self {
        RawFrequency {
            unit: f.unit,
            count: f.count,
        }
    }
}

impl Frequency {
    /// Create a frequency, rejecting a zero count and a year count whose
    /// month-equivalent overflows `u32`.
    pub fn new(unit: FrequencyUnit, count: u32) -> Result<Self, InvalidFrequency> {
        if count == 0 {
            return Err(InvalidFrequency(count));
        }
        if matches!(unit, FrequencyUnit::Year) && count.checked_mul(12).is_none() {
            return Err(InvalidFrequency(count));
        }
        Ok(Self { unit, count })
    }

    /// Shorthand for a cadence of `count` months.
    pub fn months(count: u32) -> Result<Self, InvalidFrequency> {
        Self::new(FrequencyUnit::Month, count)
    }

    /// Shorthand for a cadence of `count` years.
    pub fn years(count: u32) -> Result<Self, InvalidFrequency> {
        Self::new(FrequencyUnit::Year, count)
    }

    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Month-equivalent value used for inclusive-frequency comparisons.
    /// Year counts are bounded at construction, so the multiply cannot
    /// overflow.
    pub fn in_months(&self) -> u32 {
        match self.unit {
            FrequencyUnit::Month => self.count,
            FrequencyUnit::Year => self.count * 12,
        }
    }

    /// Human-readable label, e.g. "1 Mese", "6 Mesi", "1 Anno", "2 Anni".
    pub fn label(&self) -> String {
        match self.unit {
            FrequencyUnit::Month => {
                format!("{} {}", self.count, if self.count == 1 { "Mese" } else { "Mesi" })
            }
            FrequencyUnit::Year => {
                format!("{} {}", self.count, if self.count == 1 { "Anno" } else { "Anni" })
            }
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    /// Parse a short cadence spelling such as `"12m"` or `"1a"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((last_idx, unit_ch)) = trimmed.char_indices().last() else {
            return Err("empty frequency, use e.g. 12m or 1a".to_string());
        };
        let digits = &trimmed[..last_idx];
        let unit = match unit_ch {
            'm' | 'M' => FrequencyUnit::Month,
            'a' | 'A' | 'y' | 'Y' => FrequencyUnit::Year,
            _ => return Err(format!("unknown frequency unit in '{trimmed}', use e.g. 12m or 1a")),
        };
        let count: u32 = digits
            .parse()
            .map_err(|_| format!("invalid frequency count in '{trimmed}'"))?;
        Frequency::new(unit, count).map_err(|e| e.to_string())
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// A single maintenance task belonging to one installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Sequence identifier, unique within the installation. Not necessarily
    /// contiguous or stored in order; used for stable sorting.
    pub sequence: u32,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub frequency: Frequency,
}

/// Display-only reference to an applicable regulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regulation {
    pub code: String,
    pub description: String,
}

/// A physical plant subject to periodic maintenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    /// Stable business key, e.g. "GE", "CT". Unique within the store.
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub preamble: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub regulations: Vec<Regulation>,
}

/// The commissioning party named on a generated sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: None,
            tax_id: None,
        }
    }
}

/// Whole-file aggregate persisted by the JSON store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceDb {
    #[serde(default)]
    pub installations: Vec<Installation>,
    #[serde(default)]
    pub clients: Vec<Client>,
}
