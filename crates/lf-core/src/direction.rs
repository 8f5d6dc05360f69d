//! Movement directions and their spoken forms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a movement edge between locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// North.
    North,
    /// Northeast.
    Northeast,
    /// East.
    East,
    /// Southeast.
    Southeast,
    /// South.
    South,
    /// Southwest.
    Southwest,
    /// West.
    West,
    /// Northwest.
    Northwest,
    /// Up.
    Up,
    /// Down.
    Down,
    /// In.
    In,
    /// Out.
    Out,
}

impl Direction {
    /// Every direction, in compass order followed by the vertical and in/out pairs.
    pub const ALL: [Direction; 12] = [
        Self::North,
        Self::Northeast,
        Self::East,
        Self::Southeast,
        Self::South,
        Self::Southwest,
        Self::West,
        Self::Northwest,
        Self::Up,
        Self::Down,
        Self::In,
        Self::Out,
    ];

    /// Parse a direction from a single token or a short phrase.
    ///
    /// Accepts compass abbreviations, nautical synonyms (fore, aft, port,
    /// starboard), and the hyphenated and spaced diagonal forms.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .split(|c: char| c == '-' || c.is_whitespace())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>()
            .join("");
        match normalized.as_str() {
            "n" | "north" | "fore" | "forward" => Some(Self::North),
            "s" | "south" | "aft" => Some(Self::South),
            "e" | "east" | "starboard" => Some(Self::East),
            "w" | "west" | "port" => Some(Self::West),
            "ne" | "northeast" => Some(Self::Northeast),
            "nw" | "northwest" => Some(Self::Northwest),
            "se" | "southeast" => Some(Self::Southeast),
            "sw" | "southwest" => Some(Self::Southwest),
            "u" | "up" | "climb" | "climbup" => Some(Self::Up),
            "d" | "down" | "climbdown" => Some(Self::Down),
            "in" | "enter" | "inside" => Some(Self::In),
            "out" | "exit" | "outside" | "leave" => Some(Self::Out),
            _ => None,
        }
    }

    /// Get the display name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::East => "east",
            Self::Southeast => "southeast",
            Self::South => "south",
            Self::Southwest => "southwest",
            Self::West => "west",
            Self::Northwest => "northwest",
            Self::Up => "up",
            Self::Down => "down",
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// The direction that leads back the way you came.
    pub fn opposite(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::Northeast => Self::Southwest,
            Self::East => Self::West,
            Self::Southeast => Self::Northwest,
            Self::South => Self::North,
            Self::Southwest => Self::Northeast,
            Self::West => Self::East,
            Self::Northwest => Self::Southeast,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
