//! The scene grid.

use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    config::Markers,
    error::{SceneError, SceneResult},
    square::{Frame, ItemSquare, Square, SquareState},
};

/// A bounded grid of what an observer perceives.
///
/// Squares are addressed by `(col, row)` with the origin at the top-left,
/// columns growing rightward and rows growing downward. Every square starts
/// [`SquareState::Blind`]; placement only ever replaces or extends a square's
/// state, so a square never returns to blind once touched.
///
/// ```text
///        col 0   1   2   3   4
/// row 0    ?   ?   d   ?   ?        ? = blind
/// row 1    ?   .   c   .   ?        . = empty
/// row 2    a   .   .   b   .
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scene {
    name: String,
    width: i32,
    height: i32,
    markers: Markers,
    /// Row-major, `width * height` entries.
    squares: Vec<SquareState>,
}

impl Scene {
    /// Create an all-blind scene using the default markers.
    ///
    /// Zero-sized scenes are allowed and simply have no squares.
    pub fn new(name: impl Into<String>, width: i32, height: i32) -> SceneResult<Self> {
        Self::with_markers(name, width, height, Markers::default())
    }

    /// Create an all-blind scene with its own reserved identifiers.
    pub fn with_markers(
        name: impl Into<String>,
        width: i32,
        height: i32,
        markers: Markers,
    ) -> SceneResult<Self> {
        if width < 0 || height < 0 {
            return Err(SceneError::InvalidDimension { width, height });
        }
        markers.validate()?;

        let too_large = || SceneError::TooLarge { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(too_large)?;
        let mut squares = Vec::new();
        squares.try_reserve_exact(len).map_err(|_| too_large())?;
        squares.resize(len, SquareState::Blind);

        let name = name.into();
        debug!(name = %name, width, height, "created scene");

        Ok(Self {
            name,
            width,
            height,
            markers,
            squares,
        })
    }

    /// Get the scene name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the width in columns.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Get the height in rows.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Reserved identifiers in force for this scene.
    #[must_use]
    pub const fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Check if `(col, row)` lies on the grid.
    #[must_use]
    pub const fn contains(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.width && row >= 0 && row < self.height
    }

    fn index(&self, col: i32, row: i32) -> SceneResult<usize> {
        if self.contains(col, row) {
            Ok(row as usize * self.width as usize + col as usize)
        } else {
            Err(self.out_of_bounds(col, row))
        }
    }

    const fn out_of_bounds(&self, col: i32, row: i32) -> SceneError {
        SceneError::OutOfBounds {
            col,
            row,
            width: self.width,
            height: self.height,
        }
    }

    /// Get the state of one square.
    pub fn square(&self, col: i32, row: i32) -> SceneResult<&SquareState> {
        let index = self.index(col, row)?;
        Ok(&self.squares[index])
    }

    /// Iterate squares in raster order: rows top to bottom, columns left to right.
    pub fn squares(&self) -> impl Iterator<Item = (Square, &SquareState)> + '_ {
        let width = self.width.max(1) as usize;
        self.squares.iter().enumerate().map(move |(index, state)| {
            let square = Square::new((index % width) as i32, (index / width) as i32);
            (square, state)
        })
    }

    /// Place `item` on a square.
    ///
    /// The empty marker replaces whatever the square held. Any other item
    /// replaces a blind or empty square, or joins the occupants of an
    /// occupied one (duplicates included).
    pub fn place_item(&mut self, col: i32, row: i32, item: &str) -> SceneResult<()> {
        let index = self.index(col, row)?;
        if item == self.markers.blind {
            return Err(SceneError::ReservedIdentifier(item.to_owned()));
        }

        let state = &mut self.squares[index];
        if item == self.markers.empty {
            trace!(col, row, "square emptied");
            *state = SquareState::Empty;
            return Ok(());
        }

        match state {
            SquareState::Occupied(items) => {
                trace!(col, row, item, cohabitants = items.len(), "item joins square");
                items.push(item.to_owned());
            }
            SquareState::Blind | SquareState::Empty => {
                trace!(col, row, item, "square occupied");
                *state = SquareState::occupied(item);
            }
        }

        Ok(())
    }

    /// Place one character per column along `row`.
    ///
    /// The skip character leaves its square untouched, so blind squares stay
    /// blind. Every other character is placed as a one-character item. The
    /// whole row is checked before anything is placed.
    pub fn place_row(&mut self, row: i32, chars: &str) -> SceneResult<()> {
        if !(0..self.height).contains(&row) {
            return Err(self.out_of_bounds(0, row));
        }
        if chars.chars().count() > self.width as usize {
            return Err(self.out_of_bounds(self.width, row));
        }

        let skip = self.markers.skip;
        if let Some(reserved) = chars
            .chars()
            .filter(|&ch| ch != skip)
            .map(String::from)
            .find(|item| *item == self.markers.blind)
        {
            return Err(SceneError::ReservedIdentifier(reserved));
        }

        let mut buf = [0; 4];
        for (col, ch) in chars.chars().enumerate() {
            if ch == skip {
                continue;
            }
            self.place_item(col as i32, row, ch.encode_utf8(&mut buf))?;
        }

        Ok(())
    }

    /// Find the first square, in raster order, holding the self marker.
    #[must_use]
    pub fn locate_self(&self) -> Option<Square> {
        self.squares()
            .find(|(_, state)| state.holds(&self.markers.self_id))
            .map(|(square, _)| square)
    }

    /// Origin that coordinates are reported against.
    ///
    /// Derived on every read since placement can move the self marker.
    fn origin(&self, frame: Frame) -> Square {
        match frame {
            Frame::Absolute => Square::ORIGIN,
            Frame::SelfRelative => self.locate_self().unwrap_or(Square::ORIGIN),
        }
    }

    /// Every square, as one triple per occupant.
    ///
    /// Blind squares report the blind marker and empty squares the empty marker.
    #[must_use]
    pub fn read_all(&self, frame: Frame) -> Vec<ItemSquare> {
        let origin = self.origin(frame);
        let mut out = Vec::with_capacity(self.squares.len());

        for (square, state) in self.squares() {
            let at = square.relative_to(origin);
            match state {
                SquareState::Blind => {
                    out.push(ItemSquare::new(&self.markers.blind, at.col, at.row));
                }
                SquareState::Empty => {
                    out.push(ItemSquare::new(&self.markers.empty, at.col, at.row));
                }
                SquareState::Occupied(items) => {
                    out.extend(items.iter().map(|item| ItemSquare::new(item, at.col, at.row)));
                }
            }
        }

        out
    }

    /// All items in the scene, the self marker included.
    #[must_use]
    pub fn list_items(&self, frame: Frame) -> Vec<ItemSquare> {
        let origin = self.origin(frame);
        self.squares()
            .flat_map(|(square, state)| {
                let at = square.relative_to(origin);
                state
                    .items()
                    .iter()
                    .map(move |item| ItemSquare::new(item, at.col, at.row))
            })
            .collect()
    }

    /// Items within `col_radius` columns and `row_radius` rows of a center square.
    ///
    /// The window is clipped to the grid; the center itself may lie off it.
    #[must_use]
    pub fn items_in_scope(
        &self,
        col: i32,
        row: i32,
        col_radius: i32,
        row_radius: i32,
        frame: Frame,
    ) -> Vec<ItemSquare> {
        let origin = self.origin(frame);
        let col_lo = col.saturating_sub(col_radius).max(0);
        let col_hi = col.saturating_add(col_radius).min(self.width - 1);
        let row_lo = row.saturating_sub(row_radius).max(0);
        let row_hi = row.saturating_add(row_radius).min(self.height - 1);

        let mut out = Vec::new();
        for r in row_lo..=row_hi {
            for c in col_lo..=col_hi {
                let Ok(state) = self.square(c, r) else {
                    continue;
                };
                let at = Square::new(c, r).relative_to(origin);
                out.extend(
                    state
                        .items()
                        .iter()
                        .map(|item| ItemSquare::new(item, at.col, at.row)),
                );
            }
        }

        out
    }

    /// Items on one square.
    ///
    /// The self marker is only reported when `include_self` is set.
    pub fn items_on_square(
        &self,
        col: i32,
        row: i32,
        frame: Frame,
        include_self: bool,
    ) -> SceneResult<Vec<ItemSquare>> {
        let state = self.square(col, row)?;
        let at = Square::new(col, row).relative_to(self.origin(frame));

        Ok(state
            .items()
            .iter()
            .filter(|item| include_self || **item != self.markers.self_id)
            .map(|item| ItemSquare::new(item, at.col, at.row))
            .collect())
    }

    /// Check if a square was never looked at.
    pub fn is_blind(&self, col: i32, row: i32) -> SceneResult<bool> {
        Ok(self.square(col, row)?.is_blind())
    }

    /// Check if a square was seen and found vacant.
    pub fn is_empty(&self, col: i32, row: i32) -> SceneResult<bool> {
        Ok(self.square(col, row)?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cone() -> Scene {
        let mut scene = Scene::new("test", 5, 3).unwrap();
        scene.place_row(0, "  d  ").unwrap();
        scene.place_row(1, " .c. ").unwrap();
        scene.place_row(2, "a..b.").unwrap();
        scene
    }

    #[test]
    fn test_new_scene_is_blind() {
        let scene = Scene::new("test", 2, 2).unwrap();

        assert_eq!(scene.squares().count(), 4);
        assert!(scene.squares().all(|(_, state)| state.is_blind()));
        assert_eq!(
            scene.read_all(Frame::SelfRelative),
            vec![
                ItemSquare::new("null", 0, 0),
                ItemSquare::new("null", 1, 0),
                ItemSquare::new("null", 0, 1),
                ItemSquare::new("null", 1, 1),
            ]
        );
    }

    #[test]
    fn test_degenerate_dimensions() {
        let scene = Scene::new("flat", 0, 3).unwrap();
        assert_eq!(scene.squares().count(), 0);
        assert!(scene.read_all(Frame::Absolute).is_empty());
        assert!(scene.items_in_scope(0, 0, 2, 2, Frame::Absolute).is_empty());
        assert!(scene.locate_self().is_none());

        assert!(matches!(
            Scene::new("bad", -1, 3),
            Err(SceneError::InvalidDimension { width: -1, height: 3 })
        ));
    }

    #[test]
    fn test_oversized_dimensions() {
        assert!(matches!(
            Scene::new("big", i32::MAX, i32::MAX),
            Err(SceneError::TooLarge {
                width: i32::MAX,
                height: i32::MAX,
            })
        ));
    }

    #[test]
    fn test_scene_json() {
        let mut scene = Scene::new("s", 2, 1).unwrap();
        scene.place_item(0, 0, "a").unwrap();
        scene.place_item(0, 0, "SELF").unwrap();

        insta::assert_snapshot!(
            serde_json::to_string(&scene).unwrap(),
            @r#"{"name":"s","width":2,"height":1,"markers":{"blind":"null","empty":".","self_id":"SELF","skip":" "},"squares":[{"Occupied":["a","SELF"]},"Blind"]}"#
        );
    }

    #[test]
    fn test_squares_raster_order() {
        let scene = Scene::new("test", 3, 2).unwrap();
        let order: Vec<_> = scene.squares().map(|(square, _)| square).collect();

        assert_eq!(
            order,
            vec![
                Square::new(0, 0),
                Square::new(1, 0),
                Square::new(2, 0),
                Square::new(0, 1),
                Square::new(1, 1),
                Square::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_empty_marker_replaces_any_state() {
        let mut scene = Scene::new("test", 3, 1).unwrap();
        scene.place_item(1, 0, "a").unwrap();
        scene.place_item(1, 0, "b").unwrap();
        scene.place_item(2, 0, ".").unwrap();

        for col in 0..3 {
            scene.place_item(col, 0, ".").unwrap();
            scene.place_item(col, 0, ".").unwrap();
            assert_eq!(scene.square(col, 0).unwrap(), &SquareState::Empty);
        }
    }

    #[test]
    fn test_item_replaces_empty_and_joins_occupied() {
        let mut scene = Scene::new("test", 2, 1).unwrap();
        scene.place_item(0, 0, ".").unwrap();
        scene.place_item(0, 0, "e").unwrap();
        assert_eq!(scene.square(0, 0).unwrap().items(), ["e"]);

        scene.place_item(0, 0, "c").unwrap();
        scene.place_item(0, 0, "e").unwrap();
        assert_eq!(scene.square(0, 0).unwrap().items(), ["e", "c", "e"]);
    }

    #[test]
    fn test_blind_marker_not_placeable() {
        let mut scene = Scene::new("test", 2, 1).unwrap();
        assert!(matches!(
            scene.place_item(0, 0, "null"),
            Err(SceneError::ReservedIdentifier(_))
        ));
        assert!(scene.is_blind(0, 0).unwrap());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut scene = cone();

        for (col, row) in [(-1, 0), (5, 0), (0, -1), (0, 3)] {
            assert!(matches!(
                scene.place_item(col, row, "x"),
                Err(SceneError::OutOfBounds { .. })
            ));
            assert!(scene.is_blind(col, row).is_err());
            assert!(scene.is_empty(col, row).is_err());
            assert!(scene.items_on_square(col, row, Frame::Absolute, true).is_err());
        }
    }

    #[test]
    fn test_place_row_skip_leaves_state() {
        let mut scene = cone();
        let before = scene.clone();

        scene.place_row(1, "     ").unwrap();
        assert_eq!(scene, before);

        scene.place_row(0, "x").unwrap();
        assert_eq!(scene.square(0, 0).unwrap().items(), ["x"]);
        assert!(scene.is_blind(1, 0).unwrap());
    }

    #[test]
    fn test_place_row_rejects_before_mutating() {
        let mut scene = cone();
        let before = scene.clone();

        assert!(matches!(
            scene.place_row(0, "abcdef"),
            Err(SceneError::OutOfBounds { .. })
        ));
        assert!(matches!(
            scene.place_row(3, "a"),
            Err(SceneError::OutOfBounds { .. })
        ));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_place_row_single_char_blind_marker() {
        let markers = Markers {
            blind: "?".to_owned(),
            ..Markers::default()
        };
        let mut scene = Scene::with_markers("test", 3, 1, markers).unwrap();
        let before = scene.clone();

        assert!(matches!(
            scene.place_row(0, "a?b"),
            Err(SceneError::ReservedIdentifier(_))
        ));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_items_on_square_filters_self() {
        let mut scene = Scene::new("test", 3, 3).unwrap();
        scene.place_item(1, 1, "SELF").unwrap();
        scene.place_item(1, 1, "c").unwrap();

        assert_eq!(
            scene.items_on_square(1, 1, Frame::SelfRelative, false).unwrap(),
            vec![ItemSquare::new("c", 0, 0)]
        );
        assert_eq!(
            scene.items_on_square(1, 1, Frame::Absolute, true).unwrap(),
            vec![ItemSquare::new("SELF", 1, 1), ItemSquare::new("c", 1, 1)]
        );
    }

    #[test]
    fn test_self_relative_tracks_moves() {
        let mut scene = Scene::new("test", 3, 3).unwrap();
        scene.place_item(0, 0, "a").unwrap();
        scene.place_item(1, 1, "SELF").unwrap();
        assert_eq!(
            scene.list_items(Frame::SelfRelative)[0],
            ItemSquare::new("a", -1, -1)
        );

        scene.place_item(1, 1, ".").unwrap();
        scene.place_item(2, 2, "SELF").unwrap();
        assert_eq!(
            scene.list_items(Frame::SelfRelative)[0],
            ItemSquare::new("a", -2, -2)
        );

        scene.place_item(2, 2, ".").unwrap();
        assert_eq!(scene.locate_self(), None);
        assert_eq!(
            scene.list_items(Frame::SelfRelative)[0],
            ItemSquare::new("a", 0, 0)
        );
    }

    #[test]
    fn test_custom_self_marker() {
        let markers = Markers {
            self_id: "@".to_owned(),
            ..Markers::default()
        };
        let mut scene = Scene::with_markers("test", 3, 1, markers).unwrap();
        scene.place_row(0, "a@b").unwrap();

        assert_eq!(scene.locate_self(), Some(Square::new(1, 0)));
        assert_eq!(
            scene.list_items(Frame::SelfRelative),
            vec![
                ItemSquare::new("a", -1, 0),
                ItemSquare::new("@", 0, 0),
                ItemSquare::new("b", 1, 0),
            ]
        );
    }

    #[test]
    fn test_scope_clipping() {
        let scene = cone();

        assert_eq!(
            scene.items_in_scope(0, 0, 1, 1, Frame::Absolute),
            Vec::<ItemSquare>::new()
        );
        assert_eq!(
            scene.items_in_scope(4, 2, 1, 0, Frame::Absolute),
            vec![ItemSquare::new("b", 3, 2)]
        );
        assert_eq!(
            scene.items_in_scope(10, 10, 100, 100, Frame::Absolute),
            scene.list_items(Frame::Absolute)
        );
        assert!(scene.items_in_scope(2, 1, -1, 0, Frame::Absolute).is_empty());
        assert_eq!(
            scene.items_in_scope(i32::MAX, i32::MAX, i32::MAX, i32::MAX, Frame::Absolute),
            scene.list_items(Frame::Absolute)
        );
    }
}
