use crate::engine::{is_valid_coordinate, Board, Tile, BOARD_SIZE, STARTING_COUNTS};

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row: row `y` of the board, character `x` giving
/// the tile at `(x, y)`. Missing rows and short rows are filled with
/// `Tile::Empty`. Valid characters are the ones produced by
/// [`Tile::to_char`]:
///
/// - `.`: Empty
/// - `S`: Salt, `A`: Air, `F`: Fire, `W`: Water, `E`: Earth
/// - `Q`: Quicksilver
/// - `L`: Lead, `T`: Tin, `I`: Iron, `C`: Copper, `R`: Silver, `G`: Gold
/// - `V`: Vitae, `M`: Mors
///
/// # Errors
/// Returns `Err` if more than `BOARD_SIZE` rows are given, a row is longer
/// than `BOARD_SIZE` characters, an unrecognized character appears, or a
/// marble is placed on a dead spot.
///
/// # Examples
/// ```
/// use sigmar_solver::utils::board_from_str_array;
/// use sigmar_solver::engine::Tile;
///
/// let board = board_from_str_array(&[
///     "...G.......",
///     "..Q........",
/// ]).unwrap();
/// assert_eq!(board.get_tile(3, 0), Tile::Gold);
/// assert_eq!(board.get_tile(2, 1), Tile::Quicksilver);
/// assert_eq!(board.get_tile(5, 5), Tile::Empty);
///
/// assert!(board_from_str_array(&["..X"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, String> {
    if s.len() > BOARD_SIZE {
        return Err(format!(
            "Invalid number of rows. Expected at most {}, found {}",
            BOARD_SIZE,
            s.len()
        ));
    }

    let mut board = Board::new_empty();

    for (y, row_str) in s.iter().enumerate() {
        if row_str.chars().count() > BOARD_SIZE {
            return Err(format!(
                "Row {} is too long. Expected at most {} characters, found {}",
                y,
                BOARD_SIZE,
                row_str.chars().count()
            ));
        }

        for (x, tile_char) in row_str.chars().enumerate() {
            let tile = Tile::from_char(tile_char).ok_or_else(|| {
                format!(
                    "Unrecognized character '{}' in row {} col {}",
                    tile_char, y, x
                )
            })?;
            if tile != Tile::Empty && !is_valid_coordinate(x as isize, y as isize) {
                return Err(format!(
                    "Marble '{}' placed on dead spot ({}, {})",
                    tile_char, x, y
                ));
            }
            board.set_tile(x, y, tile);
        }
    }
    Ok(board)
}

/// Checks that the board holds the exact marble counts of a legitimate
/// starting configuration (`STARTING_COUNTS`).
///
/// This is the acquisition side's validation duty: the solver core assumes
/// it receives a well-formed board and does not re-validate.
pub fn validate_starting_board(board: &Board) -> Result<(), String> {
    for (kind, expected) in STARTING_COUNTS {
        let found = board.find_tiles_of_kind(kind).count();
        if found != expected {
            return Err(format!(
                "Expected {} {:?} marbles, found {}",
                expected, kind, found
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&[
            "...LTICRG..",
            "..Q........",
            "...........",
            ".....V.....",
        ])
        .unwrap();
        assert_eq!(board.get_tile(3, 0), Tile::Lead);
        assert_eq!(board.get_tile(4, 0), Tile::Tin);
        assert_eq!(board.get_tile(5, 0), Tile::Iron);
        assert_eq!(board.get_tile(6, 0), Tile::Copper);
        assert_eq!(board.get_tile(7, 0), Tile::Silver);
        assert_eq!(board.get_tile(8, 0), Tile::Gold);
        assert_eq!(board.get_tile(2, 1), Tile::Quicksilver);
        assert_eq!(board.get_tile(5, 3), Tile::Vitae);
        assert_eq!(board.get_tile(5, 5), Tile::Empty);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let result = board_from_str_array(&["...X"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unrecognized character 'X'"));
    }

    #[test]
    fn test_board_from_str_array_marble_on_dead_spot() {
        // (0, 0) is outside the playable hexagon.
        let result = board_from_str_array(&["G"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("dead spot"));

        // An explicit Empty on a dead spot is fine.
        assert!(board_from_str_array(&["..........."]).is_ok());
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let too_long_row = "A".repeat(BOARD_SIZE + 1);
        let result = board_from_str_array(&[too_long_row.as_str()]);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Row 0 is too long"));
    }

    #[test]
    fn test_board_from_str_array_too_many_rows() {
        let rows = vec!["..........."; BOARD_SIZE + 1];
        let result = board_from_str_array(&rows);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid number of rows"));
    }

    #[test]
    fn test_board_from_str_array_partial_rows_and_cols() {
        let board = board_from_str_array(&[
            "...A",
            "..Q",
        ])
        .unwrap();
        assert_eq!(board.get_tile(3, 0), Tile::Air);
        assert_eq!(board.get_tile(4, 0), Tile::Empty);
        assert_eq!(board.get_tile(2, 1), Tile::Quicksilver);
        assert_eq!(board.get_tile(3, 1), Tile::Empty);
        assert_eq!(board.get_tile(2, 2), Tile::Empty);
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board = board_from_str_array(&[]).unwrap();
        assert!(board.is_cleared());
    }

    #[test]
    fn test_validate_starting_board() {
        let board = Board::new_random_with_seed(3);
        assert!(validate_starting_board(&board).is_ok());

        let mut short_board = board.clone();
        let (x, y) = short_board.find_tiles_of_kind(Tile::Gold).next().unwrap();
        short_board.set_tile(x, y, Tile::Empty);
        let err = validate_starting_board(&short_board).unwrap_err();
        assert!(err.contains("Gold"));

        assert!(validate_starting_board(&Board::new_empty()).is_err());
    }
}
