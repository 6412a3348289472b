//! Typed view of a decoded replay record.
//!
//! Field names follow the JSON the replay decoder emits (camelCase). Every
//! derived-stat category is optional; the accessors on [`MatchRecord`] turn a
//! missing category into an empty slice so callers never special-case it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Frame number as stored by the decoder (negative during the countdown)
pub type FrameNumber = i32;

/// One decoded game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    pub settings: GameSettings,
    #[serde(default)]
    pub frames: BTreeMap<FrameNumber, Frame>,
    #[serde(default)]
    pub stats: Option<DerivedStats>,
    #[serde(default)]
    pub latest_frame: Option<Frame>,
    #[serde(default)]
    pub game_end: Option<GameEnd>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    #[serde(default)]
    pub stage_id: Option<u16>,
    #[serde(default)]
    pub players: Vec<PlayerSettings>,
}

/// A participant slot in one game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettings {
    pub player_index: u8,
    pub port: u8,
    pub character_id: u8,
    #[serde(default)]
    pub character_color: u8,
    #[serde(default)]
    pub nametag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub frame: Option<FrameNumber>,
    /// Keyed by slot index
    #[serde(default, deserialize_with = "slots::deserialize")]
    pub players: BTreeMap<u8, PlayerFrame>,
}

/// Per-frame player data arrives either as an object keyed by slot index or
/// as an array indexed by slot with `null` for empty slots.
mod slots {
    use std::collections::BTreeMap;
    use std::fmt;

    use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};

    use super::PlayerFrame;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<u8, PlayerFrame>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SlotsVisitor)
    }

    struct SlotsVisitor;

    impl<'de> Visitor<'de> for SlotsVisitor {
        type Value = BTreeMap<u8, PlayerFrame>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("player frames keyed or indexed by slot")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(BTreeMap::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut slots = BTreeMap::new();
            while let Some((index, frame)) = map.next_entry::<u8, Option<PlayerFrame>>()? {
                if let Some(frame) = frame {
                    slots.insert(index, frame);
                }
            }
            Ok(slots)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut slots = BTreeMap::new();
            let mut index: usize = 0;
            while let Some(frame) = seq.next_element::<Option<PlayerFrame>>()? {
                if let Some(frame) = frame {
                    let slot = u8::try_from(index).map_err(|_| {
                        <A::Error as de::Error>::custom(format!("slot index {} out of range", index))
                    })?;
                    slots.insert(slot, frame);
                }
                index += 1;
            }
            Ok(slots)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerFrame {
    #[serde(default)]
    pub pre: Option<PreFrameUpdate>,
    #[serde(default)]
    pub post: Option<PostFrameUpdate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreFrameUpdate {
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub action_state_id: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFrameUpdate {
    pub internal_character_id: Option<u8>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub action_state_id: Option<u16>,
    pub stocks_remaining: Option<u8>,
    pub percent: Option<f64>,
}

/// Precomputed analytics supplied by the decoder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    #[serde(default)]
    pub overall: Option<Vec<OverallStats>>,
    #[serde(default)]
    pub conversions: Option<Vec<Conversion>>,
    #[serde(default)]
    pub stocks: Option<Vec<Stock>>,
    #[serde(default)]
    pub last_frame: Option<FrameNumber>,
}

/// A count/total pair with the decoder's precomputed ratio
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioValue {
    #[serde(default)]
    pub count: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub player_index: u8,
    #[serde(default)]
    pub inputs_per_minute: Option<RatioValue>,
    #[serde(default)]
    pub openings_per_kill: Option<RatioValue>,
    #[serde(default)]
    pub damage_per_opening: Option<RatioValue>,
    #[serde(default)]
    pub neutral_win_ratio: Option<RatioValue>,
    #[serde(default)]
    pub counter_hit_ratio: Option<RatioValue>,
    #[serde(default)]
    pub beneficial_trade_ratio: Option<RatioValue>,
}

/// Which per-game ratio an aggregate metric reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioField {
    InputsPerMinute,
    OpeningsPerKill,
    DamagePerOpening,
    NeutralWinRatio,
}

impl OverallStats {
    pub fn ratio(&self, field: RatioField) -> Option<RatioValue> {
        match field {
            RatioField::InputsPerMinute => self.inputs_per_minute,
            RatioField::OpeningsPerKill => self.openings_per_kill,
            RatioField::DamagePerOpening => self.damage_per_opening,
            RatioField::NeutralWinRatio => self.neutral_win_ratio,
        }
    }
}

/// A punish: consecutive hits landed by `player_index` on the opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub player_index: u8,
    #[serde(default)]
    pub opening_type: String,
    #[serde(default)]
    pub moves: Vec<Move>,
    #[serde(default)]
    pub start_frame: FrameNumber,
    #[serde(default)]
    pub end_frame: Option<FrameNumber>,
    #[serde(default)]
    pub start_percent: f64,
    #[serde(default)]
    pub current_percent: f64,
    #[serde(default)]
    pub end_percent: Option<f64>,
    #[serde(default)]
    pub did_kill: bool,
}

impl Conversion {
    pub fn is_neutral_win(&self) -> bool {
        self.opening_type == "neutral-win"
    }

    /// Damage dealt over the whole punish; `None` while it never ended
    pub fn damage_done(&self) -> Option<f64> {
        self.end_percent.map(|end| end - self.start_percent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    #[serde(default)]
    pub player_index: u8,
    pub frame: FrameNumber,
    pub move_id: u16,
    #[serde(default)]
    pub hit_count: u32,
    #[serde(default)]
    pub damage: f64,
}

/// One life of `player_index`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub player_index: u8,
    #[serde(default)]
    pub start_frame: FrameNumber,
    #[serde(default)]
    pub end_frame: Option<FrameNumber>,
    #[serde(default)]
    pub start_percent: f64,
    #[serde(default)]
    pub current_percent: f64,
    #[serde(default)]
    pub end_percent: Option<f64>,
    #[serde(default)]
    pub count: u8,
    #[serde(default)]
    pub death_animation: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEnd {
    #[serde(default)]
    pub game_end_method: Option<u8>,
    #[serde(default)]
    pub lras_initiator_index: Option<i8>,
}

/// How a game terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEndMethod {
    Unresolved,
    Time,
    Game,
    Resolved,
    NoContest,
    Unknown(u8),
}

impl From<u8> for GameEndMethod {
    fn from(value: u8) -> Self {
        match value {
            0 => GameEndMethod::Unresolved,
            1 => GameEndMethod::Time,
            2 => GameEndMethod::Game,
            3 => GameEndMethod::Resolved,
            7 => GameEndMethod::NoContest,
            other => GameEndMethod::Unknown(other),
        }
    }
}

impl GameEnd {
    pub fn method(&self) -> Option<GameEndMethod> {
        self.game_end_method.map(GameEndMethod::from)
    }
}

impl MatchRecord {
    /// Port sequence in slot order, e.g. `[1, 2]`
    pub fn ports(&self) -> Vec<u8> {
        self.settings.players.iter().map(|p| p.port).collect()
    }

    pub fn player_count(&self) -> usize {
        self.settings.players.len()
    }

    /// Identifier used to group per-game data: start time, else file path
    pub fn game_id(&self) -> String {
        match self.start_at() {
            Some(start) => start.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            None => self.file_path.clone(),
        }
    }

    pub fn start_at(&self) -> Option<DateTime<Utc>> {
        self.metadata.as_ref().and_then(|m| m.start_at)
    }

    pub fn overall(&self) -> &[OverallStats] {
        self.stats
            .as_ref()
            .and_then(|s| s.overall.as_deref())
            .unwrap_or_default()
    }

    pub fn conversions(&self) -> &[Conversion] {
        self.stats
            .as_ref()
            .and_then(|s| s.conversions.as_deref())
            .unwrap_or_default()
    }

    pub fn stocks(&self) -> &[Stock] {
        self.stats
            .as_ref()
            .and_then(|s| s.stocks.as_deref())
            .unwrap_or_default()
    }

    pub fn overall_for(&self, player_index: u8) -> Option<&OverallStats> {
        self.overall().iter().find(|o| o.player_index == player_index)
    }

    pub fn player(&self, player_index: u8) -> Option<&PlayerSettings> {
        self.settings
            .players
            .iter()
            .find(|p| p.player_index == player_index)
    }

    /// Game length in frames, clamped at zero
    pub fn frame_count(&self) -> FrameNumber {
        self.stats
            .as_ref()
            .and_then(|s| s.last_frame)
            .or_else(|| self.latest_frame.as_ref().and_then(|f| f.frame))
            .unwrap_or(0)
            .max(0)
    }

    /// Stocks remaining for a slot at the last recorded frame
    pub fn final_stocks(&self, player_index: u8) -> Option<u8> {
        self.latest_frame
            .as_ref()?
            .players
            .get(&player_index)?
            .post
            .as_ref()?
            .stocks_remaining
    }
}
