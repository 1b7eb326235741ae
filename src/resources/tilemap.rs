//! Tile grid, tile classification and the collision oracle.
//!
//! The grid is a dense `width × height` array of [`TileId`]s. Tile `(tx, ty)`
//! covers the world square `[tx, tx + 1) × [ty, ty + 1)`; rows grow downward.
//! Reads outside the grid return [`TileId::Empty`].
//!
//! Systems never look at tiles directly. They ask the [`TileOracle`] how far
//! a box has to move to stop overlapping tiles, with a caller-supplied
//! classifier deciding which tiles block and how. The same primitive serves
//! two purposes: blocking (walls, platforms) and ledge detection, where the
//! patrol system classifies *empty* tiles as solid.
//!
//! Fall-through platforms are handled by a no-collide mask: a masked tile that
//! a query classifies as [`CollisionType::DownOnly`] is skipped until
//! [`TileOracle::update_no_collide`] releases it. Solid tiles ignore the mask.

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::{Rectangle, Vector2, intersects};
use crate::resources::texturestore::{TextureId, TextureStore};

/// Deepest a box may sink into a down-only tile and still be pushed back on
/// top of it. Deeper overlaps mean the box came from below or the side.
pub const DOWN_ONLY_TOLERANCE: f32 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileId {
    #[default]
    Empty,
    WallTop,
    WallMid,
    Crate,
}

impl TileId {
    pub fn is_wall(self) -> bool {
        matches!(self, TileId::WallTop | TileId::WallMid)
    }

    /// Texture name used when registering tile art.
    pub fn name(self) -> &'static str {
        match self {
            TileId::Empty => "empty",
            TileId::WallTop => "wall_top",
            TileId::WallMid => "wall_mid",
            TileId::Crate => "crate",
        }
    }
}

/// How a classified tile blocks a query box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Blocks from every side.
    Full,
    /// One-way platform: blocks only a box landing on it from above.
    DownOnly,
    None,
}

/// Collision queries and the fall-through mask, as consumed by the patrol and
/// agent systems.
pub trait TileOracle {
    /// Correction that moves `query` out of every blocking tile. Zero when
    /// nothing blocks.
    fn collision_offset(
        &self,
        query: &Rectangle,
        classify: &dyn Fn(TileId) -> CollisionType,
    ) -> Vector2;

    /// Disable collision for the tiles around the world point `(x, y)`.
    fn set_no_collide(&mut self, x: f32, y: f32);

    /// Re-enable every disabled tile that touches neither `hull` nor `region`.
    fn update_no_collide(&mut self, hull: &Rectangle, region: &Rectangle);
}

/// Wall tiles block fully, everything else is open.
pub fn classify_walls(id: TileId) -> CollisionType {
    if id.is_wall() {
        CollisionType::Full
    } else {
        CollisionType::None
    }
}

/// Inverted classifier for ledge sensors: empty tiles are "solid", so a sensor
/// hanging over a gap gets pushed back exactly like one touching a wall.
pub fn classify_gaps(id: TileId) -> CollisionType {
    if id == TileId::Empty {
        CollisionType::Full
    } else {
        CollisionType::None
    }
}

/// Player hull classifier: walls are solid, crates are one-way platforms.
pub fn classify_agent(id: TileId) -> CollisionType {
    match id {
        TileId::WallTop | TileId::WallMid => CollisionType::Full,
        TileId::Crate => CollisionType::DownOnly,
        TileId::Empty => CollisionType::None,
    }
}

/// Grid of tiles plus the no-collide mask.
#[derive(Resource, Debug, Clone, Default)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<TileId>,
    no_collide: FxHashSet<(i32, i32)>,
}

impl TileMap {
    /// An all-empty map.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileId::Empty; width * height],
            no_collide: FxHashSet::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, tx: i32, ty: i32) -> Option<usize> {
        if tx < 0 || ty < 0 {
            return None;
        }
        let (tx, ty) = (tx as usize, ty as usize);
        if tx >= self.width || ty >= self.height {
            return None;
        }
        Some(ty * self.width + tx)
    }

    pub fn get(&self, tx: i32, ty: i32) -> TileId {
        self.index(tx, ty)
            .map(|i| self.tiles[i])
            .unwrap_or(TileId::Empty)
    }

    /// Set a tile. Writes outside the grid are ignored.
    pub fn set(&mut self, tx: i32, ty: i32, id: TileId) {
        if let Some(i) = self.index(tx, ty) {
            self.tiles[i] = id;
        }
    }

    /// Tile coordinates containing the world point `(x, y)`.
    pub fn tile_at(x: f32, y: f32) -> (i32, i32) {
        (x.floor() as i32, y.floor() as i32)
    }

    pub fn is_no_collide(&self, tx: i32, ty: i32) -> bool {
        self.no_collide.contains(&(tx, ty))
    }

    pub fn no_collide_count(&self) -> usize {
        self.no_collide.len()
    }

    /// Iterate `(tx, ty, id)` for every tile in the grid.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, TileId)> + '_ {
        self.tiles.iter().enumerate().map(move |(i, id)| {
            ((i % self.width) as i32, (i / self.width) as i32, *id)
        })
    }

    /// Coordinates of every tile square strictly overlapping `rect`.
    fn overlapping_tiles(rect: &Rectangle) -> SmallVec<[(i32, i32); 16]> {
        let mut out = SmallVec::new();
        if !(rect.width > 0.0 && rect.height > 0.0) {
            return out;
        }
        let x0 = rect.x.floor() as i32;
        let y0 = rect.y.floor() as i32;
        let x1 = rect.right().ceil() as i32;
        let y1 = rect.bottom().ceil() as i32;
        for ty in y0..y1 {
            for tx in x0..x1 {
                if intersects(rect, &tile_rect(tx, ty)) {
                    out.push((tx, ty));
                }
            }
        }
        out
    }
}

fn tile_rect(tx: i32, ty: i32) -> Rectangle {
    Rectangle::new(tx as f32, ty as f32, 1.0, 1.0)
}

/// Shortest push that separates `query` from `tile`, along the axis of least
/// penetration and away from the tile center. Ties resolve vertically.
fn min_translation(query: &Rectangle, tile: &Rectangle) -> Vector2 {
    let overlap_x = query.right().min(tile.right()) - query.x.max(tile.x);
    let overlap_y = query.bottom().min(tile.bottom()) - query.y.max(tile.y);
    let qc = query.center();
    let tc = tile.center();

    if overlap_x < overlap_y {
        let dir = if qc.x < tc.x { -1.0 } else { 1.0 };
        Vector2::new(dir * overlap_x, 0.0)
    } else {
        let dir = if qc.y < tc.y { -1.0 } else { 1.0 };
        Vector2::new(0.0, dir * overlap_y)
    }
}

impl TileOracle for TileMap {
    fn collision_offset(
        &self,
        query: &Rectangle,
        classify: &dyn Fn(TileId) -> CollisionType,
    ) -> Vector2 {
        // Strongest push in each direction, so tiles sharing an edge under
        // the same box do not add up.
        let mut neg = Vector2::zero();
        let mut pos = Vector2::zero();

        for (tx, ty) in Self::overlapping_tiles(query) {
            let tile = tile_rect(tx, ty);
            let push = match classify(self.get(tx, ty)) {
                CollisionType::None => continue,
                CollisionType::Full => min_translation(query, &tile),
                CollisionType::DownOnly => {
                    if self.is_no_collide(tx, ty) {
                        continue;
                    }
                    let depth = query.bottom() - tile.y;
                    if depth > 0.0 && depth <= DOWN_ONLY_TOLERANCE {
                        Vector2::new(0.0, -depth)
                    } else {
                        continue;
                    }
                }
            };
            neg.x = neg.x.min(push.x);
            neg.y = neg.y.min(push.y);
            pos.x = pos.x.max(push.x);
            pos.y = pos.y.max(push.y);
        }

        neg + pos
    }

    fn set_no_collide(&mut self, x: f32, y: f32) {
        let (tx, ty) = Self::tile_at(x, y);
        // Hull center down to one row below the feet
        for row in ty..=ty + 2 {
            for col in tx - 1..=tx + 1 {
                self.no_collide.insert((col, row));
            }
        }
    }

    fn update_no_collide(&mut self, hull: &Rectangle, region: &Rectangle) {
        let before = self.no_collide.len();
        self.no_collide.retain(|&(tx, ty)| {
            let tile = tile_rect(tx, ty);
            intersects(&tile, hull) || intersects(&tile, region)
        });
        let released = before - self.no_collide.len();
        if released > 0 {
            debug!("Re-enabled collision on {} tiles", released);
        }
    }
}

/// Textures used to draw each tile kind.
#[derive(Resource, Debug, Default, Clone)]
pub struct TileSet {
    pub textures: FxHashMap<TileId, TextureId>,
}

impl TileSet {
    /// Tile art size in pixels.
    pub const TILE_PIXELS: u32 = 128;

    /// Register one texture per non-empty tile kind.
    pub fn register(store: &mut TextureStore) -> Self {
        let mut textures = FxHashMap::default();
        for id in [TileId::WallTop, TileId::WallMid, TileId::Crate] {
            let path = format!("assets/kenney/Ground/{}.png", id.name());
            textures.insert(id, store.register(path, Self::TILE_PIXELS, Self::TILE_PIXELS));
        }
        Self { textures }
    }

    pub fn get(&self, id: TileId) -> Option<TextureId> {
        self.textures.get(&id).copied()
    }
}

/// On-disk level description: one string per tile row, top row first.
///
/// Glyphs: `.` empty, `^` wall top, `#` wall, `=` crate, `A` agent spawn,
/// `M` patrol mob spawn. Spawn glyphs leave an empty tile behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    pub rows: Vec<String>,
}

/// Parsed level: tiles plus spawn points (tile coordinates).
#[derive(Debug, Clone)]
pub struct Level {
    pub map: TileMap,
    pub agent_spawn: (i32, i32),
    pub mob_spawns: Vec<(i32, i32)>,
}

impl Level {
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, String> {
        let height = rows.len();
        if height == 0 {
            return Err("Level has no rows".to_string());
        }
        let width = rows[0].as_ref().chars().count();
        if width == 0 {
            return Err("Level rows are empty".to_string());
        }

        let mut map = TileMap::new(width, height);
        let mut agent_spawn = None;
        let mut mob_spawns = Vec::new();

        for (ty, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(format!(
                    "Level row {} has {} tiles, expected {}",
                    ty,
                    row.chars().count(),
                    width
                ));
            }
            for (tx, glyph) in row.chars().enumerate() {
                let (tx, ty) = (tx as i32, ty as i32);
                let id = match glyph {
                    '.' => TileId::Empty,
                    '^' => TileId::WallTop,
                    '#' => TileId::WallMid,
                    '=' => TileId::Crate,
                    'A' => {
                        if agent_spawn.replace((tx, ty)).is_some() {
                            return Err("Level has more than one agent spawn".to_string());
                        }
                        TileId::Empty
                    }
                    'M' => {
                        mob_spawns.push((tx, ty));
                        TileId::Empty
                    }
                    other => {
                        return Err(format!(
                            "Unknown level glyph {:?} at ({}, {})",
                            other, tx, ty
                        ));
                    }
                };
                map.set(tx, ty, id);
            }
        }

        let agent_spawn = agent_spawn.ok_or_else(|| "Level has no agent spawn".to_string())?;

        Ok(Self {
            map,
            agent_spawn,
            mob_spawns,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let file: LevelFile =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse level JSON: {}", e))?;
        Self::from_rows(&file.rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read level {}: {}", path.display(), e))?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn map(rows: &[&str]) -> TileMap {
        let mut padded: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
        // Spawn is irrelevant here; put it in a corner that tests keep empty.
        padded[0].replace_range(0..1, "A");
        Level::from_rows(&padded).unwrap().map
    }

    #[test]
    fn test_out_of_range_reads_empty() {
        let m = TileMap::new(2, 2);
        assert_eq!(m.get(-1, 0), TileId::Empty);
        assert_eq!(m.get(5, 5), TileId::Empty);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        let m = map(&["....", "....", "####"]);
        let box_ = Rectangle::new(1.0, 0.5, 1.0, 1.5);
        // Touching the floor edge is not an overlap.
        assert_eq!(m.collision_offset(&box_, &classify_walls), Vector2::zero());
    }

    #[test]
    fn test_floor_pushes_up_once_for_two_tiles() {
        let m = map(&["....", "....", "####"]);
        let box_ = Rectangle::new(0.5, 0.7, 1.0, 1.5);
        let off = m.collision_offset(&box_, &classify_walls);
        assert!(approx_eq(off.x, 0.0));
        assert!(approx_eq(off.y, -0.2));
    }

    #[test]
    fn test_wall_pushes_sideways() {
        let m = map(&["...#", "...#", "...#"]);
        let box_ = Rectangle::new(2.1, 0.5, 1.0, 1.0);
        let off = m.collision_offset(&box_, &classify_walls);
        assert!(approx_eq(off.x, -0.1));
        assert!(approx_eq(off.y, 0.0));
    }

    #[test]
    fn test_crate_blocks_from_above_only() {
        let m = map(&["....", "....", ".==."]);
        let landing = Rectangle::new(1.0, 0.2, 1.0, 2.0);
        let off = m.collision_offset(&landing, &classify_agent);
        assert!(approx_eq(off.y, -0.2));

        // Deep overlap: the box is passing up through the platform.
        let rising = Rectangle::new(1.0, 1.7, 1.0, 2.0);
        assert_eq!(
            m.collision_offset(&rising, &classify_agent),
            Vector2::zero()
        );
    }

    #[test]
    fn test_crate_is_not_a_wall() {
        let m = map(&["....", "....", ".==."]);
        let box_ = Rectangle::new(1.0, 1.5, 1.0, 1.0);
        assert_eq!(m.collision_offset(&box_, &classify_walls), Vector2::zero());
    }

    #[test]
    fn test_gap_classifier_detects_ledge() {
        let m = map(&["....", "##.."]);
        // Sensor reaching 0.2 into the gap at column 2.
        let sensor = Rectangle::new(1.2, 1.1, 1.0, 0.8);
        let off = m.collision_offset(&sensor, &classify_gaps);
        assert!(approx_eq(off.x, -0.2));
    }

    #[test]
    fn test_set_no_collide_disables_tiles() {
        let mut m = map(&["....", "....", ".==."]);
        m.set_no_collide(1.5, 2.2);
        assert!(m.is_no_collide(1, 2));
        assert!(m.is_no_collide(2, 2));
        let landing = Rectangle::new(1.0, 0.2, 1.0, 2.0);
        assert_eq!(
            m.collision_offset(&landing, &classify_agent),
            Vector2::zero()
        );
    }

    #[test]
    fn test_no_collide_does_not_affect_walls() {
        let mut m = map(&["....", "....", "####"]);
        m.set_no_collide(1.5, 1.5);
        assert!(m.is_no_collide(1, 2));
        let box_ = Rectangle::new(1.0, 0.2, 1.0, 2.0);
        let off = m.collision_offset(&box_, &classify_agent);
        assert!(approx_eq(off.y, -0.2));
    }

    #[test]
    fn test_update_no_collide_releases_far_tiles() {
        let mut m = TileMap::new(64, 64);
        m.set_no_collide(2.5, 2.5);
        m.set_no_collide(40.5, 40.5);
        assert_eq!(m.no_collide_count(), 18);

        let hull = Rectangle::new(2.0, 1.0, 1.0, 2.0);
        let region = Rectangle::new(-6.0, -6.0, 16.0, 16.0);
        m.update_no_collide(&hull, &region);
        assert_eq!(m.no_collide_count(), 9);
        assert!(m.is_no_collide(2, 2));
        assert!(!m.is_no_collide(40, 40));
    }

    #[test]
    fn test_level_parse_spawns() {
        let level = Level::from_rows(&["A..M", "^^^^", "####"]).unwrap();
        assert_eq!(level.agent_spawn, (0, 0));
        assert_eq!(level.mob_spawns, vec![(3, 0)]);
        assert_eq!(level.map.get(0, 0), TileId::Empty);
        assert_eq!(level.map.get(2, 1), TileId::WallTop);
        assert_eq!(level.map.get(2, 2), TileId::WallMid);
    }

    #[test]
    fn test_level_parse_errors() {
        assert!(Level::from_rows::<&str>(&[]).is_err());
        assert!(Level::from_rows(&["....", "###"]).is_err());
        assert!(Level::from_rows(&["....", "####"]).is_err());
        assert!(Level::from_rows(&["A.A.", "####"]).is_err());
        assert!(Level::from_rows(&["A.x.", "####"]).is_err());
    }

    #[test]
    fn test_level_from_json() {
        let level = Level::from_json_str("{ \"rows\": [\"A.=.\", \"####\"] }").unwrap();
        assert_eq!(level.map.width(), 4);
        assert_eq!(level.map.get(2, 0), TileId::Crate);
        assert!(Level::from_json_str("{ \"rows\": 3 }").is_err());
    }
}
