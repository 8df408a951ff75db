//! Authoritative coordinate ↔ cell mapping.
//!
//! The grid owns two arenas: a row-major array of [`Cell`]s and a map of
//! [`MapObject`]s keyed by [`ObjectId`]. A cell stores its occupant's id; an
//! object stores its cell's index. Both sides are only ever rewritten together
//! inside [`Grid::place_object`] and [`Grid::move_object`], so for every placed
//! object `grid.cell(object.coordinates()).occupant() == object.id()`.
mod error;

use std::collections::BTreeMap;

pub use error::GridError;

use crate::snapshot::{ObjectSnapshot, SnapshotError};
use crate::state::{Coordinates, MapObject, ObjectBody, ObjectId, ObjectKind, UnplacedObject};

/// One grid position. Always holds exactly one occupant, possibly `Empty`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    coordinates: Coordinates,
    occupant: ObjectId,
}

impl Cell {
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn occupant(&self) -> ObjectId {
        self.occupant
    }
}

/// Point-in-time occupancy of one cell, for renderers and statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellView {
    pub coordinates: Coordinates,
    pub object: ObjectId,
    pub kind: ObjectKind,
    pub transparent: bool,
}

/// Rectangular excerpt of the grid, clamped to its bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapPart {
    /// Top-left corner of the excerpt in grid coordinates.
    pub origin: Coordinates,
    pub width: u32,
    pub height: u32,
    /// Row-major cells of the excerpt.
    pub cells: Vec<CellView>,
}

impl MapPart {
    /// Looks up a cell by absolute grid coordinates.
    pub fn get(&self, coordinates: Coordinates) -> Option<&CellView> {
        let x = coordinates.x.checked_sub(self.origin.x)?;
        let y = coordinates.y.checked_sub(self.origin.y)?;
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    objects: BTreeMap<ObjectId, MapObject>,
    next_object_id: u32,
}

impl Grid {
    /// Creates a grid whose perimeter is lined with border blocks and whose
    /// interior is empty.
    ///
    /// Initial occupants get ids `0..area` in row-major order, so the border
    /// ids depend on the dimensions alone. Dimension limits are enforced by
    /// the builder, not here.
    pub fn new(width: u32, height: u32) -> Self {
        let area = width as usize * height as usize;
        let mut cells = Vec::with_capacity(area);
        let mut objects = BTreeMap::new();

        for y in 0..height {
            for x in 0..width {
                let index = cells.len();
                let coordinates = Coordinates::new(x, y);
                let id = ObjectId(index as u32);
                let body = if on_border(width, height, coordinates) {
                    ObjectBody::BorderBlock
                } else {
                    ObjectBody::Empty
                };
                objects.insert(id, MapObject::new(id, index, coordinates, body));
                cells.push(Cell {
                    coordinates,
                    occupant: id,
                });
            }
        }

        Self {
            width,
            height,
            cells,
            objects,
            next_object_id: area as u32,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    pub fn contains(&self, coordinates: Coordinates) -> bool {
        coordinates.x < self.width && coordinates.y < self.height
    }

    pub fn is_border(&self, coordinates: Coordinates) -> bool {
        self.contains(coordinates) && on_border(self.width, self.height, coordinates)
    }

    /// Bounds-checked cell lookup.
    pub fn cell(&self, coordinates: Coordinates) -> Result<&Cell, GridError> {
        let index = self.index_of(coordinates)?;
        Ok(&self.cells[index])
    }

    /// Row-major iterator over every cell.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn object(&self, id: ObjectId) -> Option<&MapObject> {
        self.objects.get(&id)
    }

    /// The cell an object is bound to, found through its back-reference.
    pub fn cell_of(&self, id: ObjectId) -> Option<&Cell> {
        let object = self.objects.get(&id)?;
        self.cells
            .get(object.cell_index())
            .filter(|cell| cell.occupant == id)
    }

    pub(crate) fn object_mut(&mut self, id: ObjectId) -> Option<&mut MapObject> {
        self.objects.get_mut(&id)
    }

    /// The object occupying `coordinates`.
    pub fn occupant(&self, coordinates: Coordinates) -> Result<&MapObject, GridError> {
        let index = self.index_of(coordinates)?;
        self.occupant_at(index)
    }

    /// Whether line-of-sight passes through `coordinates`. False off-grid.
    pub fn is_transparent_at(&self, coordinates: Coordinates) -> bool {
        self.occupant(coordinates)
            .map(MapObject::is_transparent)
            .unwrap_or(false)
    }

    pub fn is_empty_at(&self, coordinates: Coordinates) -> Result<bool, GridError> {
        Ok(self.occupant(coordinates)?.kind().is_empty())
    }

    /// Coordinates of every cell holding an empty occupant, row-major.
    pub fn free_cells(&self) -> Vec<Coordinates> {
        self.cells
            .iter()
            .filter(|cell| {
                self.objects
                    .get(&cell.occupant)
                    .is_some_and(|object| object.kind().is_empty())
            })
            .map(Cell::coordinates)
            .collect()
    }

    pub fn cell_view(&self, coordinates: Coordinates) -> Result<CellView, GridError> {
        let object = self.occupant(coordinates)?;
        Ok(view_of(object))
    }

    /// Occupancy of every cell, row-major.
    pub fn cell_views(&self) -> impl Iterator<Item = CellView> + '_ {
        self.cells
            .iter()
            .filter_map(|cell| self.objects.get(&cell.occupant))
            .map(view_of)
    }

    /// Binds an unplaced object to the empty cell at `coordinates`.
    ///
    /// The displaced empty occupant is discarded and the object receives a
    /// fresh id.
    pub fn place_object(
        &mut self,
        object: UnplacedObject,
        coordinates: Coordinates,
    ) -> Result<ObjectId, GridError> {
        let index = self.index_of(coordinates)?;
        let current = self.occupant_at(index)?;
        if !current.kind().is_empty() {
            return Err(GridError::Occupied {
                coordinates,
                occupant: current.id(),
                kind: current.kind(),
            });
        }
        let discarded = current.id();

        let id = self.allocate_id()?;
        self.objects.remove(&discarded);
        self.objects
            .insert(id, MapObject::new(id, index, coordinates, object.into_body()));
        self.cells[index].occupant = id;

        Ok(id)
    }

    /// Transfers the occupant of `from` into the empty cell `to`.
    ///
    /// `from` receives a freshly constructed empty occupant. Agents record the
    /// entered cell in their traveled path. Returns the updated target cell.
    pub fn move_object(&mut self, from: Coordinates, to: Coordinates) -> Result<&Cell, GridError> {
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;

        let mover = self.occupant_at(from_index)?;
        if mover.kind().is_empty() {
            return Err(GridError::NothingToMove { coordinates: from });
        }
        if mover.kind() == ObjectKind::BorderBlock {
            return Err(GridError::Immovable {
                coordinates: from,
                kind: ObjectKind::BorderBlock,
            });
        }
        let mover_id = mover.id();

        let target = self.occupant_at(to_index)?;
        if !target.kind().is_empty() {
            return Err(GridError::Occupied {
                coordinates: to,
                occupant: target.id(),
                kind: target.kind(),
            });
        }
        let discarded = target.id();

        let filler = self.allocate_id()?;
        self.objects.remove(&discarded);
        self.objects.insert(
            filler,
            MapObject::new(filler, from_index, from, ObjectBody::Empty),
        );
        self.cells[from_index].occupant = filler;
        self.cells[to_index].occupant = mover_id;

        if let Some(mover) = self.objects.get_mut(&mover_id) {
            mover.rebind(to_index, to);
            if let Some(agent) = mover.agent_mut() {
                agent.record_traveled(to);
            }
        }

        Ok(&self.cells[to_index])
    }

    /// Cells within the square (Chebyshev) neighbourhood of `center`, clamped
    /// to the grid.
    pub fn cut_out_part_of_the_map(
        &self,
        center: Coordinates,
        radius: u32,
    ) -> Result<MapPart, GridError> {
        self.index_of(center)?;

        let min_x = center.x.saturating_sub(radius);
        let min_y = center.y.saturating_sub(radius);
        let max_x = center.x.saturating_add(radius).min(self.width - 1);
        let max_y = center.y.saturating_add(radius).min(self.height - 1);

        let mut cells =
            Vec::with_capacity(((max_x - min_x + 1) * (max_y - min_y + 1)) as usize);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                cells.push(self.cell_view(Coordinates::new(x, y))?);
            }
        }

        Ok(MapPart {
            origin: Coordinates::new(min_x, min_y),
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
            cells,
        })
    }

    /// Non-border occupants, row-major, for snapshots.
    pub(crate) fn interior_objects(&self) -> Vec<ObjectSnapshot> {
        self.cells
            .iter()
            .filter(|cell| !on_border(self.width, self.height, cell.coordinates))
            .filter_map(|cell| self.objects.get(&cell.occupant))
            .map(|object| ObjectSnapshot {
                id: object.id(),
                coordinates: object.coordinates(),
                body: object.body().clone(),
            })
            .collect()
    }

    pub(crate) fn next_object_id(&self) -> u32 {
        self.next_object_id
    }

    /// Rebuilds a grid from persisted interior occupants.
    ///
    /// The border is regenerated from the dimensions; every interior cell must
    /// be supplied exactly once.
    pub(crate) fn restore(
        width: u32,
        height: u32,
        next_object_id: u32,
        objects: Vec<ObjectSnapshot>,
    ) -> Result<Self, SnapshotError> {
        let mut grid = Self::new(width, height);

        let interior: Vec<usize> = grid
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !on_border(width, height, cell.coordinates))
            .map(|(index, _)| index)
            .collect();
        for &index in &interior {
            let id = grid.cells[index].occupant;
            grid.objects.remove(&id);
        }

        let mut restored = vec![false; grid.cells.len()];
        let mut next_free = next_object_id.max(grid.area());

        for ObjectSnapshot {
            id,
            coordinates,
            body,
        } in objects
        {
            let index = grid
                .index_of(coordinates)
                .map_err(|_| SnapshotError::CellOutOfBounds { coordinates })?;
            if on_border(width, height, coordinates) {
                return Err(SnapshotError::BorderCell { coordinates });
            }
            if matches!(body, ObjectBody::BorderBlock) {
                return Err(SnapshotError::UnexpectedBorderBlock { coordinates });
            }
            if restored[index] {
                return Err(SnapshotError::DuplicateCell { coordinates });
            }
            if grid.objects.contains_key(&id) {
                return Err(SnapshotError::DuplicateObject { id });
            }

            restored[index] = true;
            next_free = next_free.max(id.0.saturating_add(1));
            grid.objects
                .insert(id, MapObject::new(id, index, coordinates, body));
            grid.cells[index].occupant = id;
        }

        if let Some(&index) = interior.iter().find(|&&index| !restored[index]) {
            return Err(SnapshotError::MissingCell {
                coordinates: grid.cells[index].coordinates,
            });
        }

        grid.next_object_id = next_free;
        Ok(grid)
    }

    fn index_of(&self, coordinates: Coordinates) -> Result<usize, GridError> {
        if !self.contains(coordinates) {
            return Err(GridError::OutOfBounds {
                coordinates,
                width: self.width,
                height: self.height,
            });
        }
        Ok(coordinates.y as usize * self.width as usize + coordinates.x as usize)
    }

    fn occupant_at(&self, index: usize) -> Result<&MapObject, GridError> {
        let cell = &self.cells[index];
        self.objects
            .get(&cell.occupant)
            .ok_or(GridError::MissingObject {
                id: cell.occupant,
                coordinates: cell.coordinates,
            })
    }

    fn allocate_id(&mut self) -> Result<ObjectId, GridError> {
        let id = ObjectId(self.next_object_id);
        self.next_object_id = self
            .next_object_id
            .checked_add(1)
            .ok_or(GridError::IdsExhausted)?;
        Ok(id)
    }
}

fn on_border(width: u32, height: u32, coordinates: Coordinates) -> bool {
    coordinates.x == 0
        || coordinates.y == 0
        || coordinates.x + 1 == width
        || coordinates.y + 1 == height
}

fn view_of(object: &MapObject) -> CellView {
    CellView {
        coordinates: object.coordinates(),
        object: object.id(),
        kind: object.kind(),
        transparent: object.is_transparent(),
    }
}
