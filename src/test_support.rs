//! JSON-backed builders for match records used across unit tests.

use serde_json::{json, Value};

use crate::replay::MatchRecord;

pub struct GameBuilder {
    value: Value,
}

impl GameBuilder {
    pub fn new(file_path: &str) -> Self {
        Self {
            value: json!({
                "filePath": file_path,
                "settings": { "stageId": 31, "players": [] },
            }),
        }
    }

    /// Two-player game on the given ports; slot `i` gets player index `i`
    pub fn singles(file_path: &str, ports: [u8; 2]) -> Self {
        Self::new(file_path).player(0, ports[0], 2).player(1, ports[1], 20)
    }

    pub fn player(mut self, player_index: u8, port: u8, character_id: u8) -> Self {
        if let Some(players) = self.value["settings"]["players"].as_array_mut() {
            players.push(json!({
                "playerIndex": player_index,
                "port": port,
                "characterId": character_id,
                "characterColor": 0,
            }));
        }
        self
    }

    pub fn start_at(mut self, timestamp: &str) -> Self {
        self.value["metadata"] = json!({ "startAt": timestamp });
        self
    }

    pub fn stage(mut self, stage_id: u16) -> Self {
        self.value["settings"]["stageId"] = json!(stage_id);
        self
    }

    pub fn overall(mut self, overall: Value) -> Self {
        self.value["stats"]["overall"] = overall;
        self
    }

    pub fn conversions(mut self, conversions: Vec<Value>) -> Self {
        self.value["stats"]["conversions"] = Value::Array(conversions);
        self
    }

    pub fn stocks(mut self, stocks: Vec<Value>) -> Self {
        self.value["stats"]["stocks"] = Value::Array(stocks);
        self
    }

    pub fn last_frame(mut self, frame: i32) -> Self {
        self.value["stats"]["lastFrame"] = json!(frame);
        self
    }

    pub fn frame(mut self, frame: i32, players: Value) -> Self {
        self.value["frames"][frame.to_string()] = json!({ "frame": frame, "players": players });
        self
    }

    /// Final stock counts per slot index
    pub fn final_stocks(mut self, stocks: &[(u8, u8)]) -> Self {
        let mut players = serde_json::Map::new();
        for (index, remaining) in stocks {
            players.insert(
                index.to_string(),
                json!({ "post": { "stocksRemaining": remaining } }),
            );
        }
        self.value["latestFrame"] = json!({ "players": players });
        self
    }

    pub fn game_end(mut self, method: u8, lras_initiator: Option<i8>) -> Self {
        self.value["gameEnd"] = json!({
            "gameEndMethod": method,
            "lrasInitiatorIndex": lras_initiator,
        });
        self
    }

    pub fn build(self) -> MatchRecord {
        serde_json::from_value(self.value).expect("fixture must deserialize")
    }
}

/// Punish by `player_index`; each move lands on frame 100 + its position
pub fn conversion(
    player_index: u8,
    opening_type: &str,
    move_ids: &[u16],
    start_percent: f64,
    end_percent: Option<f64>,
    did_kill: bool,
) -> Value {
    let moves: Vec<Value> = move_ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let frame = 100 + i as i32;
            json!({ "playerIndex": player_index, "frame": frame, "moveId": id, "hitCount": 1, "damage": 10.0 })
        })
        .collect();
    let end_frame = end_percent.map(|_| 100 + move_ids.len() as i32);

    json!({
        "playerIndex": player_index,
        "openingType": opening_type,
        "moves": moves,
        "startFrame": 100,
        "endFrame": end_frame,
        "startPercent": start_percent,
        "currentPercent": end_percent.unwrap_or(start_percent),
        "endPercent": end_percent,
        "didKill": did_kill,
    })
}

pub fn stock(player_index: u8, end_percent: Option<f64>) -> Value {
    json!({
        "playerIndex": player_index,
        "startFrame": 0,
        "startPercent": 0.0,
        "currentPercent": end_percent.unwrap_or(0.0),
        "endPercent": end_percent,
        "count": 4,
    })
}

pub fn ratio(count: f64, total: f64) -> Value {
    let ratio = if total != 0.0 { Some(count / total) } else { None };
    json!({ "count": count, "total": total, "ratio": ratio })
}

/// `overall` entry carrying the same ratio for every field
pub fn overall_entry(player_index: u8, count: f64, total: f64) -> Value {
    let value = ratio(count, total);
    json!({
        "playerIndex": player_index,
        "inputsPerMinute": value,
        "openingsPerKill": value,
        "damagePerOpening": value,
        "neutralWinRatio": value,
    })
}
