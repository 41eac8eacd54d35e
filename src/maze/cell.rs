use crossterm::style::{Color, Stylize};

use std::fmt;

/// Terrain of a single grid cell. Everything except `Wall` can be walked
/// on, at the cost returned by [`Terrain::cost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Wall,
    Grass,
    Mud,
    Water,
}

impl Terrain {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Cost of stepping onto a cell of this terrain. `None` for walls,
    /// which cannot be entered at all.
    pub fn cost(self) -> Option<u32> {
        match self {
            Terrain::Wall => None,
            Terrain::Grass => Some(1),
            Terrain::Mud => Some(5),
            Terrain::Water => Some(10),
        }
    }

    pub fn is_passable(self) -> bool {
        self != Terrain::Wall
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Terrain::Wall => "🏠".with(Color::White),
            Terrain::Grass => "🟩".with(Color::Green),
            Terrain::Mud => "🟫".with(Color::DarkYellow),
            Terrain::Water => "🟦".with(Color::Blue),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Terrain::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_costs() {
        assert_eq!(Terrain::Wall.cost(), None);
        assert_eq!(Terrain::Grass.cost(), Some(1));
        assert_eq!(Terrain::Mud.cost(), Some(5));
        assert_eq!(Terrain::Water.cost(), Some(10));
    }

    #[test]
    fn test_only_walls_are_impassable() {
        assert!(!Terrain::Wall.is_passable());
        assert!(Terrain::Grass.is_passable());
        assert!(Terrain::Mud.is_passable());
        assert!(Terrain::Water.is_passable());
    }
}
