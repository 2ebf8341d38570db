use sweepwise_core::{Board, Tile};

use crate::{ColorClass, ColorTable, Frame, Rect, Rgb, TileLayout, VisionError};

/// Background of revealed tiles. Not present in the default table.
const OPENED_BACKGROUND: Rgb = Rgb::new(229, 194, 159);

const MARK_SIZE: usize = 5;

/// Paints a board the way the game would show it.
///
/// Unrevealed tiles (covered, pending and flagged) get the covered
/// background, revealed ones a neutral background. Flags and numbers add a
/// small centered mark in their class color. Reading the result back with
/// the same table yields the board again, with pending tiles read as covered.
///
/// # Errors
///
/// Returns [`VisionError::MissingColor`] if the table has no color for a
/// class the board needs.
pub fn render_board(
    board: &Board,
    layout: &TileLayout,
    table: &ColorTable,
) -> Result<Frame, VisionError> {
    let color_of = |class: ColorClass, tile: Tile| {
        table
            .representative(class)
            .ok_or(VisionError::MissingColor { tile })
    };

    let mut frame = Frame::filled(layout.width(), layout.height(), OPENED_BACKGROUND);
    for (pos, tile) in board.iter() {
        let rect = layout.tile_rect(pos);
        let (background, mark) = match tile {
            Tile::Covered | Tile::Pending => (color_of(ColorClass::Covered, tile)?, None),
            Tile::Flagged => (
                color_of(ColorClass::Covered, tile)?,
                Some(color_of(ColorClass::Flag, tile)?),
            ),
            Tile::Number(n) => (
                OPENED_BACKGROUND,
                Some(color_of(ColorClass::Number(n), tile)?),
            ),
            Tile::OpenedUnknown => (OPENED_BACKGROUND, None),
        };
        frame.fill_rect(rect, background);
        if let Some(mark) = mark {
            frame.fill_rect(mark_rect(rect), mark);
        }
    }
    Ok(frame)
}

fn mark_rect(tile: Rect) -> Rect {
    let width = MARK_SIZE.min(tile.width);
    let height = MARK_SIZE.min(tile.height);
    let (cx, cy) = tile.center();
    Rect::new(
        (cx - width / 2).max(tile.x),
        (cy - height / 2).max(tile.y),
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use sweepwise_core::Dimensions;

    use super::*;
    use crate::{Perception, ScanConfig};

    #[test]
    fn test_frame_size_follows_layout() {
        let board = Board::new(Dimensions::new(2, 3));
        let layout = TileLayout::new(board.dims(), 10, 12).unwrap();
        let frame = render_board(&board, &layout, &ColorTable::default()).unwrap();
        assert_eq!((frame.width(), frame.height()), (30, 24));
    }

    #[test]
    fn test_mark_is_centered() {
        assert_eq!(mark_rect(Rect::new(30, 0, 30, 30)), Rect::new(43, 13, 5, 5));
        assert_eq!(mark_rect(Rect::new(0, 0, 3, 3)), Rect::new(0, 0, 3, 3));
    }

    #[test]
    fn test_missing_color() {
        let board: Board = "7_".parse().unwrap();
        let layout = TileLayout::new(board.dims(), 10, 10).unwrap();
        let err = render_board(&board, &layout, &ColorTable::default()).unwrap_err();
        assert_eq!(err, VisionError::MissingColor { tile: Tile::Number(7) });
    }

    #[test]
    fn test_pending_reads_back_as_covered() {
        let board: Board = "P1".parse().unwrap();
        let layout = TileLayout::new(board.dims(), 30, 30).unwrap();
        let frame = render_board(&board, &layout, &ColorTable::default()).unwrap();
        let read = Perception::new(layout, ColorTable::default(), ScanConfig::default())
            .read(&frame)
            .unwrap();
        assert_eq!(read, "_1".parse::<Board>().unwrap());
    }

    #[test]
    fn test_custom_table() {
        let table: ColorTable = [
            (Rgb::new(0, 0, 0), ColorClass::Covered),
            (Rgb::new(1, 1, 1), ColorClass::Number(7)),
        ]
        .into_iter()
        .collect();
        let board: Board = "7_".parse().unwrap();
        let layout = TileLayout::new(board.dims(), 9, 9).unwrap();
        let frame = render_board(&board, &layout, &table).unwrap();
        let read = Perception::new(layout, table, ScanConfig::default())
            .read(&frame)
            .unwrap();
        assert_eq!(read, board);
    }
}
