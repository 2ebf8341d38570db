//! Color-table classification of a single tile.

use std::collections::HashMap;

use sweepwise_core::Tile;

use crate::{Frame, Rect, Rgb};

/// What a known pixel color means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum ColorClass {
    /// Part of a flag.
    Flag,
    /// Part of a number glyph.
    Number(u8),
    /// Part of an unrevealed tile's background.
    Covered,
}

impl ColorClass {
    fn tile(self) -> Tile {
        match self {
            ColorClass::Flag => Tile::Flagged,
            ColorClass::Number(n) => Tile::Number(n),
            ColorClass::Covered => Tile::Covered,
        }
    }
}

/// An exact-match lookup from pixel colors to [`ColorClass`]es.
///
/// The default table describes the palette of the browser game the bot was
/// built for: two shades of green for covered tiles and one or two shades per
/// number.
///
/// # Examples
///
/// ```
/// use sweepwise_vision::{ColorClass, ColorTable, Rgb};
///
/// let table = ColorTable::default();
/// assert_eq!(table.get(Rgb::new(0, 108, 202)), Some(ColorClass::Number(1)));
/// assert_eq!(table.get(Rgb::new(0, 108, 203)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<(Rgb, ColorClass)>,
    lookup: HashMap<Rgb, ColorClass>,
}

impl ColorTable {
    /// Creates an empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Maps a color to a class, replacing any previous mapping of that color.
    pub fn insert(&mut self, color: Rgb, class: ColorClass) {
        if self.lookup.insert(color, class).is_some() {
            self.entries.retain(|&(c, _)| c != color);
        }
        self.entries.push((color, class));
    }

    /// Returns the class of an exact color.
    #[must_use]
    pub fn get(&self, color: Rgb) -> Option<ColorClass> {
        self.lookup.get(&color).copied()
    }

    /// Returns the first color inserted for a class.
    #[must_use]
    pub fn representative(&self, class: ColorClass) -> Option<Rgb> {
        self.entries
            .iter()
            .find_map(|&(color, c)| (c == class).then_some(color))
    }

    /// Returns every mapping in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Rgb, ColorClass)> + '_ {
        self.entries.iter().copied()
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        [
            ((231, 45, 23), ColorClass::Flag),
            ((0, 108, 202), ColorClass::Number(1)),
            ((74, 140, 70), ColorClass::Number(2)),
            ((98, 145, 83), ColorClass::Number(2)),
            ((210, 57, 56), ColorClass::Number(3)),
            ((209, 42, 45), ColorClass::Number(3)),
            ((113, 33, 150), ColorClass::Number(4)),
            ((242, 159, 79), ColorClass::Number(5)),
            ((220, 167, 118), ColorClass::Number(5)),
            ((61, 156, 153), ColorClass::Number(6)),
            ((159, 208, 78), ColorClass::Covered),
            ((151, 202, 71), ColorClass::Covered),
        ]
        .into_iter()
        .map(|(rgb, class)| (Rgb::from(rgb), class))
        .collect()
    }
}

impl FromIterator<(Rgb, ColorClass)> for ColorTable {
    fn from_iter<T: IntoIterator<Item = (Rgb, ColorClass)>>(iter: T) -> Self {
        let mut table = Self::empty();
        for (color, class) in iter {
            table.insert(color, class);
        }
        table
    }
}

/// Parameters of the per-tile pixel scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Side of the square window scanned at the middle of each tile.
    ///
    /// Windows larger than the tile are clamped to it.
    pub scan_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { scan_size: 25 }
    }
}

impl ScanConfig {
    /// Returns the scan window inside a tile rectangle.
    #[must_use]
    pub fn window(&self, tile: Rect) -> Rect {
        let width = self.scan_size.min(tile.width);
        let height = self.scan_size.min(tile.height);
        Rect::new(
            tile.x + (tile.width - width) / 2,
            tile.y + (tile.height - height) / 2,
            width,
            height,
        )
    }
}

/// Classifies the tile occupying `rect` in `frame`.
///
/// The scan window is walked column by column. The first pixel whose color
/// maps to a flag or a number decides the tile. If no such pixel exists and
/// every scanned pixel is a covered color, the tile is covered; otherwise it
/// is an opened tile whose content is unknown (blank tiles included).
#[must_use]
pub fn classify(frame: &Frame, rect: Rect, table: &ColorTable, scan: &ScanConfig) -> Tile {
    let window = scan.window(rect);
    let mut all_covered = true;
    for x in window.x..window.x + window.width {
        for y in window.y..window.y + window.height {
            match frame.get(x, y).and_then(|px| table.get(px)) {
                Some(ColorClass::Covered) => {}
                Some(class) => return class.tile(),
                None => all_covered = false,
            }
        }
    }
    if all_covered && window.width > 0 && window.height > 0 {
        Tile::Covered
    } else {
        Tile::OpenedUnknown
    }
}
