//! The stat catalog and the shapes its results take.
//!
//! [`Stat::ALL`] fixes both the set of computed stats and their order in the
//! report. Each variant knows its display metadata and how to compute itself
//! for one participant of a [`ValidatedSeries`].

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::calculators;
use super::series::{ParticipantIndex, ValidatedSeries};
use crate::replay::{Conversion, RatioField, RatioValue, Stock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    OpeningsPerKill,
    DamagePerOpening,
    NeutralWins,
    KillMoves,
    NeutralOpenerMoves,
    EarlyKills,
    LateDeaths,
    SelfDestructs,
    InputsPerMinute,
    AvgKillPercent,
    HighDamagePunishes,
    DamageDone,
    NeutralWinCoords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Number,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BetterDirection {
    Higher,
    Lower,
}

/// Display metadata of a stat
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDefinition {
    pub id: Stat,
    pub name: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub better_direction: Option<BetterDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_rounding: Option<usize>,
}

impl StatDefinition {
    const fn number(
        id: Stat,
        name: &'static str,
        better_direction: BetterDirection,
        recommended_rounding: usize,
    ) -> Self {
        Self {
            id,
            name,
            value_type: Some(ValueType::Number),
            better_direction: Some(better_direction),
            recommended_rounding: Some(recommended_rounding),
        }
    }

    const fn text(id: Stat, name: &'static str) -> Self {
        Self {
            id,
            name,
            value_type: Some(ValueType::Text),
            better_direction: None,
            recommended_rounding: None,
        }
    }
}

/// Text shown when a stat has no value
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed-point text for `value`; exact halfway cases round away from zero
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_finite() && is_halfway(value.abs(), decimals) {
        let above = f64::from_bits(value.abs().to_bits() + 1);
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}{:.*}", sign, decimals, above);
    }
    format!("{:.*}", decimals, value)
}

/// Whether `magnitude` lies exactly between two values with `decimals` digits
fn is_halfway(magnitude: f64, decimals: usize) -> bool {
    let digits = decimals + 1;
    terminates_within(magnitude, digits) && format!("{:.*}", digits, magnitude).ends_with('5')
}

/// Whether the exact decimal expansion of `magnitude` has at most `digits`
/// fractional digits
fn terminates_within(magnitude: f64, digits: usize) -> bool {
    let bits = magnitude.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };

    // magnitude * 10^digits == mantissa * 5^digits * 2^(exponent + digits)
    let scale = exponent + digits as i64;
    mantissa == 0 || scale >= 0 || i64::from(mantissa.trailing_zeros()) >= -scale
}

/// The short form every summary reads. Text stats carry no `number`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleValue {
    pub text: String,
    pub number: Option<f64>,
    numeric: bool,
}

impl SimpleValue {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            number: None,
            numeric: false,
        }
    }

    pub fn number(number: f64, decimals: usize) -> Self {
        Self {
            text: format_fixed(number, decimals),
            number: Some(number),
            numeric: true,
        }
    }

    /// Numeric value that could not be computed
    pub fn not_available() -> Self {
        Self {
            text: NOT_AVAILABLE.to_string(),
            number: None,
            numeric: true,
        }
    }
}

impl Serialize for SimpleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SimpleValue", 1 + usize::from(self.numeric))?;
        state.serialize_field("text", &self.text)?;
        if self.numeric {
            state.serialize_field("number", &self.number)?;
        }
        state.end()
    }
}

/// A move with how often it occurred
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCount {
    pub count: usize,
    pub id: u16,
    pub name: &'static str,
    pub short_name: &'static str,
}

/// Where a participant stood when a punish started
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeutralWinCoord {
    pub x: f64,
    pub y: f64,
    pub id: u16,
    pub name: &'static str,
    pub short_name: &'static str,
    pub stage_id: Option<u16>,
    pub opening_type: String,
    pub game_id: String,
    /// Set only for Zelda/Sheik players: whether Zelda was out at the time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_zelda: Option<bool>,
}

/// Full detail of a computed stat
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResult {
    Ratio(RatioValue),
    Moves(Vec<MoveCount>),
    Stocks(Vec<Stock>),
    Punishes(Vec<Conversion>),
    Count(i64),
    Coords(BTreeMap<String, Vec<NeutralWinCoord>>),
}

/// One stat computed for one participant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatOutcome {
    pub result: StatResult,
    /// Absent only for stats without a displayable value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple: Option<SimpleValue>,
}

impl Stat {
    /// Every stat, in report order
    pub const ALL: [Stat; 13] = [
        Stat::OpeningsPerKill,
        Stat::DamagePerOpening,
        Stat::NeutralWins,
        Stat::KillMoves,
        Stat::NeutralOpenerMoves,
        Stat::EarlyKills,
        Stat::LateDeaths,
        Stat::SelfDestructs,
        Stat::InputsPerMinute,
        Stat::AvgKillPercent,
        Stat::HighDamagePunishes,
        Stat::DamageDone,
        Stat::NeutralWinCoords,
    ];

    pub fn definition(self) -> StatDefinition {
        use BetterDirection::{Higher, Lower};

        match self {
            Stat::OpeningsPerKill => StatDefinition::number(self, "Openings / Kill", Lower, 1),
            Stat::DamagePerOpening => StatDefinition::number(self, "Damage / Opening", Higher, 1),
            Stat::NeutralWins => StatDefinition::number(self, "Neutral Wins", Higher, 0),
            Stat::KillMoves => StatDefinition::text(self, "Most Common Kill Move"),
            Stat::NeutralOpenerMoves => StatDefinition::text(self, "Most Common Neutral Opener"),
            Stat::EarlyKills => StatDefinition::number(self, "Earliest Kill", Lower, 1),
            Stat::LateDeaths => StatDefinition::number(self, "Latest Death", Higher, 1),
            Stat::SelfDestructs => StatDefinition::number(self, "Total Self-Destructs", Lower, 0),
            Stat::InputsPerMinute => StatDefinition::number(self, "Inputs / Minute", Higher, 1),
            Stat::AvgKillPercent => StatDefinition::number(self, "Average Kill Percent", Lower, 1),
            Stat::HighDamagePunishes => {
                StatDefinition::number(self, "Highest Damage Punish", Higher, 1)
            }
            Stat::DamageDone => StatDefinition::number(self, "Total Damage Done", Higher, 1),
            Stat::NeutralWinCoords => StatDefinition {
                id: self,
                name: "Neutral Win Coordinates",
                value_type: None,
                better_direction: None,
                recommended_rounding: None,
            },
        }
    }

    /// Compute this stat with `participant` as the reference player
    pub fn calculate(self, series: &ValidatedSeries, participant: ParticipantIndex) -> StatOutcome {
        use calculators::RatioDisplay::{Count, Ratio};

        match self {
            Stat::OpeningsPerKill => {
                calculators::overall_ratio(series, participant, RatioField::OpeningsPerKill, 1, Ratio)
            }
            Stat::DamagePerOpening => {
                calculators::overall_ratio(series, participant, RatioField::DamagePerOpening, 1, Ratio)
            }
            Stat::NeutralWins => {
                calculators::overall_ratio(series, participant, RatioField::NeutralWinRatio, 0, Count)
            }
            Stat::KillMoves => calculators::kill_moves(series, participant),
            Stat::NeutralOpenerMoves => calculators::neutral_opener_moves(series, participant),
            Stat::EarlyKills => calculators::early_kills(series, participant),
            Stat::LateDeaths => calculators::late_deaths(series, participant),
            Stat::SelfDestructs => calculators::self_destructs(series, participant),
            Stat::InputsPerMinute => {
                calculators::overall_ratio(series, participant, RatioField::InputsPerMinute, 1, Ratio)
            }
            Stat::AvgKillPercent => calculators::avg_kill_percent(series, participant),
            Stat::HighDamagePunishes => calculators::high_damage_punishes(series, participant),
            Stat::DamageDone => {
                calculators::overall_ratio(series, participant, RatioField::DamagePerOpening, 1, Count)
            }
            Stat::NeutralWinCoords => calculators::neutral_win_coords(series, participant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_ids() {
        let ids: Vec<String> = Stat::ALL
            .iter()
            .map(|s| serde_json::to_value(s).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids[0], "openingsPerKill");
        assert_eq!(ids[3], "killMoves");
        assert_eq!(ids[12], "neutralWinCoords");
    }

    #[test]
    fn test_definition_serialization() {
        let def = serde_json::to_value(Stat::SelfDestructs.definition()).unwrap();
        assert_eq!(def["id"], "selfDestructs");
        assert_eq!(def["type"], "number");
        assert_eq!(def["betterDirection"], "lower");
        assert_eq!(def["recommendedRounding"], 0);

        let coords = serde_json::to_value(Stat::NeutralWinCoords.definition()).unwrap();
        assert!(coords.get("type").is_none());
    }

    #[test]
    fn test_simple_number_formatting() {
        assert_eq!(SimpleValue::number(12.345, 1).text, "12.3");
        assert_eq!(SimpleValue::number(7.0, 0).text, "7");
        assert_eq!(SimpleValue::not_available().number, None);
    }

    #[test]
    fn test_exact_halves_round_away_from_zero() {
        assert_eq!(SimpleValue::number(45.25, 1).text, "45.3");
        assert_eq!(SimpleValue::number(2.5, 0).text, "3");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(-2.5, 0), "-3");
        assert_eq!(format_fixed(60.75, 1), "60.8");
        // Not an exact half once stored: 1.005 is slightly below
        assert_eq!(format_fixed(1.005, 2), "1.00");
        assert_eq!(format_fixed(45.24, 1), "45.2");
        assert_eq!(format_fixed(7.0, 1), "7.0");
    }

    #[test]
    fn test_text_values_have_no_number() {
        let text = serde_json::to_value(SimpleValue::text("fair (2)")).unwrap();
        assert_eq!(text, serde_json::json!({ "text": "fair (2)" }));

        let missing = serde_json::to_value(SimpleValue::not_available()).unwrap();
        assert_eq!(missing, serde_json::json!({ "text": "N/A", "number": null }));

        let number = serde_json::to_value(SimpleValue::number(3.0, 0)).unwrap();
        assert_eq!(number, serde_json::json!({ "text": "3", "number": 3.0 }));
    }
}
