//! Display names for stage, character, costume and move identifiers.

/// Full and short display name of an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveName {
    pub name: &'static str,
    pub short_name: &'static str,
}

const UNKNOWN_MOVE: MoveName = MoveName {
    name: "Unknown Move",
    short_name: "unknown",
};

pub fn move_name(move_id: u16) -> MoveName {
    let (name, short_name) = match move_id {
        1 => ("Miscellaneous", "misc"),
        2 | 3 | 4 => ("Jab", "jab"),
        5 => ("Rapid Jabs", "rapid-jabs"),
        6 => ("Dash Attack", "dash"),
        7 => ("Forward Tilt", "ftilt"),
        8 => ("Up Tilt", "utilt"),
        9 => ("Down Tilt", "dtilt"),
        10 => ("Forward Smash", "fsmash"),
        11 => ("Up Smash", "usmash"),
        12 => ("Down Smash", "dsmash"),
        13 => ("Neutral Air", "nair"),
        14 => ("Forward Air", "fair"),
        15 => ("Back Air", "bair"),
        16 => ("Up Air", "uair"),
        17 => ("Down Air", "dair"),
        18 => ("Neutral B", "neutral-b"),
        19 => ("Side B", "side-b"),
        20 => ("Up B", "up-b"),
        21 => ("Down B", "down-b"),
        50 => ("Getup Attack", "getup"),
        51 => ("Getup Attack (Slow)", "getup-slow"),
        52 => ("Grab Pummel", "pummel"),
        53 => ("Forward Throw", "fthrow"),
        54 => ("Back Throw", "bthrow"),
        55 => ("Up Throw", "uthrow"),
        56 => ("Down Throw", "dthrow"),
        61 => ("Edge Attack (Slow)", "edge-slow"),
        62 => ("Edge Attack", "edge"),
        _ => return UNKNOWN_MOVE,
    };
    MoveName { name, short_name }
}

pub fn stage_name(stage_id: u16) -> &'static str {
    match stage_id {
        2 => "Fountain of Dreams",
        3 => "Pokémon Stadium",
        4 => "Princess Peach's Castle",
        5 => "Kongo Jungle",
        6 => "Brinstar",
        7 => "Corneria",
        8 => "Yoshi's Story",
        9 => "Onett",
        10 => "Mute City",
        11 => "Rainbow Cruise",
        12 => "Jungle Japes",
        13 => "Great Bay",
        14 => "Hyrule Temple",
        15 => "Brinstar Depths",
        16 => "Yoshi's Island",
        17 => "Green Greens",
        18 => "Fourside",
        19 => "Mushroom Kingdom I",
        20 => "Mushroom Kingdom II",
        22 => "Venom",
        23 => "Poké Floats",
        24 => "Big Blue",
        25 => "Icicle Mountain",
        26 => "Icetop",
        27 => "Flat Zone",
        28 => "Dream Land N64",
        29 => "Yoshi's Island N64",
        30 => "Kongo Jungle N64",
        31 => "Battlefield",
        32 => "Final Destination",
        _ => "Unknown Stage",
    }
}

/// External character ids (the ones shown on the character select screen)
pub mod character {
    pub const ZELDA: u8 = 18;
    pub const SHEIK: u8 = 19;
    /// In-game (internal) id of Sheik, used to tell the transformations apart
    pub const SHEIK_INTERNAL: u8 = 7;
}

/// Character name and its costume list, indexed by external character id
const CHARACTERS: [(&str, &[&str]); 26] = [
    ("Captain Falcon", &["Default", "Black", "Red", "White", "Green", "Blue"]),
    ("Donkey Kong", &["Default", "Black", "Red", "Blue", "Green"]),
    ("Fox", &["Default", "Red", "Blue", "Green"]),
    ("Mr. Game & Watch", &["Default", "Red", "Blue", "Green"]),
    ("Kirby", &["Default", "Yellow", "Blue", "Red", "Green", "White"]),
    ("Bowser", &["Default", "Red", "Blue", "Black"]),
    ("Link", &["Default", "Red", "Blue", "Black", "White"]),
    ("Luigi", &["Default", "White", "Blue", "Red"]),
    ("Mario", &["Default", "Yellow", "Black", "Blue", "Green"]),
    ("Marth", &["Default", "Red", "Green", "Black", "White"]),
    ("Mewtwo", &["Default", "Red", "Blue", "Green"]),
    ("Ness", &["Default", "Yellow", "Blue", "Green"]),
    ("Peach", &["Default", "Daisy", "White", "Blue", "Green"]),
    ("Pikachu", &["Default", "Red", "Party Hat", "Cowboy Hat"]),
    ("Ice Climbers", &["Default", "Green", "Orange", "Red"]),
    ("Jigglypuff", &["Default", "Red", "Blue", "Headband", "Crown"]),
    ("Samus", &["Default", "Pink", "Black", "Green", "Purple"]),
    ("Yoshi", &["Default", "Red", "Blue", "Yellow", "Pink", "Cyan"]),
    ("Zelda", &["Default", "Red", "Blue", "Green", "White"]),
    ("Sheik", &["Default", "Red", "Blue", "Green", "White"]),
    ("Falco", &["Default", "Red", "Blue", "Green"]),
    ("Young Link", &["Default", "Red", "Blue", "White", "Black"]),
    ("Dr. Mario", &["Default", "Red", "Blue", "Green", "Black"]),
    ("Roy", &["Default", "Red", "Blue", "Green", "Yellow"]),
    ("Pichu", &["Default", "Red", "Blue", "Green"]),
    ("Ganondorf", &["Default", "Red", "Blue", "Green", "Purple"]),
];

pub fn character_name(character_id: u8) -> &'static str {
    CHARACTERS
        .get(usize::from(character_id))
        .map(|(name, _)| *name)
        .unwrap_or("Unknown Character")
}

pub fn character_color_name(character_id: u8, color: u8) -> &'static str {
    CHARACTERS
        .get(usize::from(character_id))
        .and_then(|(_, colors)| colors.get(usize::from(color)))
        .copied()
        .unwrap_or("Default")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_names() {
        assert_eq!(move_name(14).short_name, "fair");
        assert_eq!(move_name(3).name, "Jab");
        assert_eq!(move_name(999), UNKNOWN_MOVE);
    }

    #[test]
    fn test_character_lookup() {
        assert_eq!(character_name(2), "Fox");
        assert_eq!(character_name(character::SHEIK), "Sheik");
        assert_eq!(character_color_name(2, 1), "Red");
        assert_eq!(character_color_name(2, 9), "Default");
        assert_eq!(character_name(200), "Unknown Character");
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(stage_name(31), "Battlefield");
        assert_eq!(stage_name(0), "Unknown Stage");
    }
}
