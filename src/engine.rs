//! Core board model for the Sigmar's Garden puzzle.
//!
//! This module defines the fundamental components:
//! - `Tile`: the marble kinds that can occupy a board cell.
//! - `Board`: the fixed 11x11 hex board with cell queries used by the solver.
//! - `Marble`: a (position, kind) pair derived from a non-empty cell.
//! - `neighbors`: the row-parity hex topology.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// Represents the kind of marble occupying a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// An unoccupied cell.
    Empty,
    /// Pairs with any elemental marble (or another Salt).
    Salt,
    Air,
    Fire,
    Water,
    Earth,
    /// Pairs with the currently pending metal.
    Quicksilver,
    Lead,
    Tin,
    Iron,
    Copper,
    Silver,
    Gold,
    /// Pairs with Mors.
    Vitae,
    /// Pairs with Vitae.
    Mors,
}

/// The mandatory metal consumption order. A metal is only playable while no
/// earlier metal in this sequence remains on the board.
pub const METAL_SEQUENCE: [Tile; 6] = [
    Tile::Lead,
    Tile::Tin,
    Tile::Iron,
    Tile::Copper,
    Tile::Silver,
    Tile::Gold,
];

/// The four elemental kinds.
pub const ELEMENTALS: [Tile; 4] = [Tile::Air, Tile::Fire, Tile::Water, Tile::Earth];

/// Exact marble counts of a legitimate starting board (55 marbles total).
pub const STARTING_COUNTS: [(Tile, usize); 14] = [
    (Tile::Salt, 4),
    (Tile::Air, 8),
    (Tile::Fire, 8),
    (Tile::Water, 8),
    (Tile::Earth, 8),
    (Tile::Quicksilver, 5),
    (Tile::Lead, 1),
    (Tile::Tin, 1),
    (Tile::Iron, 1),
    (Tile::Copper, 1),
    (Tile::Silver, 1),
    (Tile::Gold, 1),
    (Tile::Vitae, 4),
    (Tile::Mors, 4),
];

impl Tile {
    /// Position of this kind in the metal sequence, or `None` for non-metals.
    pub fn metal_rank(&self) -> Option<usize> {
        METAL_SEQUENCE.iter().position(|m| m == self)
    }

    /// Whether this kind is one of the six metals.
    pub fn is_metal(&self) -> bool {
        self.metal_rank().is_some()
    }

    /// Whether this kind is one of the four elementals.
    pub fn is_elemental(&self) -> bool {
        ELEMENTALS.contains(self)
    }

    /// Whether this kind takes part in elemental pairing (an elemental or Salt).
    pub fn is_elemental_compatible(&self) -> bool {
        *self == Tile::Salt || self.is_elemental()
    }

    /// Converts the tile to its character representation.
    ///
    /// Used for text display and board file parsing.
    ///
    /// # Examples
    ///
    /// ```
    /// use sigmar_solver::engine::Tile;
    /// assert_eq!(Tile::Gold.to_char(), 'G');
    /// assert_eq!(Tile::Empty.to_char(), '.');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Salt => 'S',
            Tile::Air => 'A',
            Tile::Fire => 'F',
            Tile::Water => 'W',
            Tile::Earth => 'E',
            Tile::Quicksilver => 'Q',
            Tile::Lead => 'L',
            Tile::Tin => 'T',
            Tile::Iron => 'I',
            Tile::Copper => 'C',
            Tile::Silver => 'R',
            Tile::Gold => 'G',
            Tile::Vitae => 'V',
            Tile::Mors => 'M',
        }
    }

    /// Parses a tile from its character representation.
    pub fn from_char(c: char) -> Option<Tile> {
        match c {
            '.' => Some(Tile::Empty),
            'S' => Some(Tile::Salt),
            'A' => Some(Tile::Air),
            'F' => Some(Tile::Fire),
            'W' => Some(Tile::Water),
            'E' => Some(Tile::Earth),
            'Q' => Some(Tile::Quicksilver),
            'L' => Some(Tile::Lead),
            'T' => Some(Tile::Tin),
            'I' => Some(Tile::Iron),
            'C' => Some(Tile::Copper),
            'R' => Some(Tile::Silver),
            'G' => Some(Tile::Gold),
            'V' => Some(Tile::Vitae),
            'M' => Some(Tile::Mors),
            _ => None,
        }
    }
}

/// Number of cells in both width and height of the board grid.
pub const BOARD_SIZE: usize = 11;

/// Grid coordinates that lie outside the playable hexagon. They always read
/// as `Tile::Empty` and count as free neighbors.
pub const DEAD_SPOTS: [(usize, usize); 30] = [
    // Top-left corner
    (0, 0),
    (1, 0),
    (2, 0),
    (0, 1),
    (1, 1),
    (0, 2),
    (1, 2),
    (0, 3),
    (0, 4),
    // Bottom-left corner
    (0, 6),
    (0, 7),
    (0, 8),
    (1, 8),
    (0, 9),
    (1, 9),
    (0, 10),
    (1, 10),
    (2, 10),
    // Top-right corner
    (9, 0),
    (10, 0),
    (9, 1),
    (10, 1),
    (10, 2),
    (10, 3),
    // Bottom-right corner
    (10, 7),
    (10, 8),
    (9, 9),
    (10, 9),
    (9, 10),
    (10, 10),
];

/// Determines whether the given coordinates name a playable cell: inside the
/// grid and not a dead spot.
pub fn is_valid_coordinate(x: isize, y: isize) -> bool {
    x >= 0
        && y >= 0
        && x < BOARD_SIZE as isize
        && y < BOARD_SIZE as isize
        && !DEAD_SPOTS.contains(&(x as usize, y as usize))
}

/// Returns the 6 hex neighbors of `(x, y)` in a fixed ring order, so that
/// each entry is adjacent to the next (and the last to the first).
///
/// The horizontal offsets of the diagonal neighbors depend on the parity of
/// the row. Results may fall outside the grid.
pub fn neighbors(x: usize, y: usize) -> [(isize, isize); 6] {
    let (x, y) = (x as isize, y as isize);
    if y % 2 == 0 {
        [
            (x - 1, y),
            (x - 1, y - 1),
            (x, y - 1),
            (x + 1, y),
            (x, y + 1),
            (x - 1, y + 1),
        ]
    } else {
        [
            (x - 1, y),
            (x, y - 1),
            (x + 1, y - 1),
            (x + 1, y),
            (x + 1, y + 1),
            (x, y + 1),
        ]
    }
}

/// Represents a marble at a given spot on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Marble {
    /// X coordinate of the marble on the board.
    pub x: usize,
    /// Y coordinate of the marble on the board.
    pub y: usize,
    /// Kind of the marble.
    pub kind: Tile,
}

impl Marble {
    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

/// The game board: a fixed 11x11 grid of `Tile`s addressed by `(x, y)`.
///
/// A `Board` is value-like; the solver clones it at every search step so no
/// instance is ever shared across branches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Tile; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a board with every cell set to `Tile::Empty`.
    pub fn new_empty() -> Self {
        Board {
            grid: [[Tile::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates a board from a predefined grid, indexed `grid[x][y]`.
    pub fn from_grid(grid: [[Tile; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board { grid }
    }

    /// Creates a starting board with the exact occupancy counts of
    /// `STARTING_COUNTS`, placed on random playable cells.
    ///
    /// The same seed always produces the same board. The result is a
    /// legitimate starting configuration but is not guaranteed solvable.
    pub fn new_random_with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut open: Vec<(usize, usize)> = Vec::new();
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                if is_valid_coordinate(x as isize, y as isize) {
                    open.push((x, y));
                }
            }
        }
        open.shuffle(&mut rng);

        let mut board = Board::new_empty();
        let mut spots = open.into_iter();
        for (kind, count) in STARTING_COUNTS {
            for _ in 0..count {
                let (x, y) = spots
                    .next()
                    .expect("playable area is larger than the starting marble count");
                board.grid[x][y] = kind;
            }
        }
        board
    }

    /// Returns the tile at `(x, y)`. Dead spots always read as `Tile::Empty`
    /// regardless of the stored value.
    ///
    /// # Panics
    /// Panics if `x` or `y` are outside the grid.
    pub fn get_tile(&self, x: usize, y: usize) -> Tile {
        if DEAD_SPOTS.contains(&(x, y)) {
            return Tile::Empty;
        }
        self.grid[x][y]
    }

    /// Sets the tile at `(x, y)`.
    ///
    /// # Panics
    /// Panics if `x` or `y` are outside the grid.
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) {
        self.grid[x][y] = tile;
    }

    /// Lazily yields the coordinates of every cell holding the given kind,
    /// in scan order (x outer, y inner).
    pub fn find_tiles_of_kind(&self, kind: Tile) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|x| (0..BOARD_SIZE).map(move |y| (x, y)))
            .filter(move |&(x, y)| self.get_tile(x, y) == kind)
    }

    /// Returns the number of marbles remaining on the board.
    pub fn remaining_marble_count(&self) -> usize {
        let mut count = 0;
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                if self.get_tile(x, y) != Tile::Empty {
                    count += 1;
                }
            }
        }
        count
    }

    /// Whether every cell of the board is empty.
    pub fn is_cleared(&self) -> bool {
        self.remaining_marble_count() == 0
    }

    /// Returns the earliest metal in the consumption sequence that still has
    /// an occurrence on the board, or `None` when no metals remain.
    pub fn first_pending_metal(&self) -> Option<Tile> {
        METAL_SEQUENCE
            .into_iter()
            .find(|&metal| self.find_tiles_of_kind(metal).next().is_some())
    }
}

impl fmt::Display for Board {
    /// Formats the board as 11 rows of tile characters, row `y` per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                write!(f, "{}", self.get_tile(x, y).to_char())?;
            }
            if y < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
