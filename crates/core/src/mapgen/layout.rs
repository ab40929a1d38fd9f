//! Room stamping onto the all-wall grid.
//!
//! Rooms are allowed to overlap and are never connected by corridors;
//! pre-merged and fully disconnected floor areas are both legitimate
//! outputs. Walkability is enforced per step at play time, not here.

use crate::types::TileKind;

use super::seed::random_usize;

const MIN_ROOMS: usize = 5;
const MAX_ROOMS: usize = 9;
const MIN_ROOM_SIDE: usize = 5;
const MAX_ROOM_SIDE: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    pub(super) x: usize,
    pub(super) y: usize,
    pub(super) width: usize,
    pub(super) height: usize,
}

pub(super) fn build_rooms(map_seed: u64, width: usize, height: usize) -> Vec<RoomRect> {
    let room_count = random_usize(map_seed, 1, MIN_ROOMS, MAX_ROOMS);
    let mut rooms = Vec::with_capacity(room_count);

    for room_index in 0..room_count as u64 {
        let room_width = random_usize(map_seed, room_index * 4 + 2, MIN_ROOM_SIDE, MAX_ROOM_SIDE);
        let room_height = random_usize(map_seed, room_index * 4 + 3, MIN_ROOM_SIDE, MAX_ROOM_SIDE);
        if room_width + 2 >= width || room_height + 2 >= height {
            continue;
        }

        // Offsets keep the outermost ring solid wall on every side.
        let x = random_usize(map_seed, room_index * 4 + 4, 1, width - room_width - 2);
        let y = random_usize(map_seed, room_index * 4 + 5, 1, height - room_height - 2);
        rooms.push(RoomRect { x, y, width: room_width, height: room_height });
    }

    rooms
}

pub(super) fn carve_room(tiles: &mut [TileKind], width: usize, room: &RoomRect) {
    for y in room.y..room.y + room.height {
        for x in room.x..room.x + room.width {
            tiles[y * width + x] = TileKind::Floor;
        }
    }
}
