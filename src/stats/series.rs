//! Selection of the games that form one head-to-head set.
//!
//! A folder of replays can mix opponents, doubles games, or the same two
//! players swapped between ports. Only games that share one port sequence
//! can be aggregated per slot, so the largest such group is kept.

use crate::replay::MatchRecord;

/// Index of a participant within the set's canonical port pairing (0 or 1)
pub type ParticipantIndex = usize;

#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    #[error("There were no valid games found to compute stats from")]
    NoValidGames,
}

/// Why a game was left out of the set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    /// Not a two-player game
    NotSingles { player_count: usize },
    /// Port sequence differs from the selected set
    PortMismatch { ports: String },
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::NotSingles { player_count } => {
                write!(f, "not a singles game ({} players)", player_count)
            }
            ExclusionReason::PortMismatch { ports } => {
                write!(f, "player ports differ ({})", ports)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExcludedGame {
    pub file_path: String,
    pub reason: ExclusionReason,
}

/// Games between the same two ports, in input order
#[derive(Debug, Clone)]
pub struct ValidatedSeries {
    games: Vec<MatchRecord>,
    ports: [u8; 2],
}

impl ValidatedSeries {
    pub fn games(&self) -> &[MatchRecord] {
        &self.games
    }

    /// Canonical port pairing, in slot order of every game
    pub fn ports(&self) -> [u8; 2] {
        self.ports
    }

    pub fn port_of(&self, participant: ParticipantIndex) -> u8 {
        self.ports[participant]
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    /// Slot index of `participant` and of the opponent within `game`
    pub fn slots(&self, game: &MatchRecord, participant: ParticipantIndex) -> (u8, u8) {
        let players = &game.settings.players;
        (
            players[participant].player_index,
            players[1 - participant].player_index,
        )
    }
}

/// Outcome of series selection
#[derive(Debug, Clone)]
pub struct SeriesSelection {
    pub series: ValidatedSeries,
    pub excluded: Vec<ExcludedGame>,
}

/// Port key in slot order, e.g. `"1-2"`
pub fn port_key(game: &MatchRecord) -> String {
    game.ports()
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Keep the largest group of two-player games sharing one port sequence
pub fn select_series(games: Vec<MatchRecord>) -> Result<SeriesSelection, SeriesError> {
    let mut excluded = Vec::new();

    let (singles, others): (Vec<MatchRecord>, Vec<MatchRecord>) =
        games.into_iter().partition(|g| g.player_count() == 2);

    excluded.extend(others.into_iter().map(|game| ExcludedGame {
        reason: ExclusionReason::NotSingles {
            player_count: game.player_count(),
        },
        file_path: game.file_path,
    }));

    // Groups in first-encounter order so ties resolve deterministically
    let mut groups: Vec<(String, Vec<MatchRecord>)> = Vec::new();
    for game in singles {
        let key = port_key(&game);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(game),
            None => groups.push((key, vec![game])),
        }
    }

    let mut selected_idx = None;
    for (idx, (_, members)) in groups.iter().enumerate() {
        let best = selected_idx.map_or(0, |i: usize| groups[i].1.len());
        if members.len() > best {
            selected_idx = Some(idx);
        }
    }

    let selected_idx = selected_idx.ok_or(SeriesError::NoValidGames)?;
    let (_, selected) = groups.remove(selected_idx);

    for (key, members) in groups {
        for game in members {
            excluded.push(ExcludedGame {
                file_path: game.file_path,
                reason: ExclusionReason::PortMismatch { ports: key.clone() },
            });
        }
    }

    for game in &excluded {
        log::warn!("Excluded {}: {}", game.file_path, game.reason);
    }

    let first = selected.first().ok_or(SeriesError::NoValidGames)?;
    let ports = [
        first.settings.players[0].port,
        first.settings.players[1].port,
    ];

    log::info!("Including {} games for stat calculation...", selected.len());

    Ok(SeriesSelection {
        series: ValidatedSeries {
            games: selected,
            ports,
        },
        excluded,
    })
}
