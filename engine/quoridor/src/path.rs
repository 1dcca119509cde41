//! Grid connectivity: wall-to-edge blocking predicates and breadth-first
//! reachability over the cell graph.
//!
//! # Slot-to-edge mapping
//!
//! A vertical wall at slot `(x, y)` blocks the east-west edges
//! `(x,y)-(x+1,y)` and `(x,y+1)-(x+1,y+1)`. A horizontal wall at slot
//! `(x, y)` blocks the north-south edges `(x,y)-(x,y+1)` and
//! `(x+1,y)-(x+1,y+1)`. Every legality rule in the crate goes through
//! [`blocked_north`] / [`blocked_east`] (and their mirror uses with offset
//! coordinates), so the mapping is fixed in exactly one place.

use std::collections::VecDeque;

/// A borrowed view of both wall grids, each `(n-1)×(n-1)` in row-major
/// `x * (n-1) + y` order.
#[derive(Debug, Clone, Copy)]
pub struct Walls<'a> {
    pub vertical: &'a [bool],
    pub horizontal: &'a [bool],
    /// Side length of the wall-slot grid, `n - 1`.
    pub size: usize,
}

impl<'a> Walls<'a> {
    #[inline]
    fn v(&self, x: isize, y: isize) -> bool {
        self.vertical[x as usize * self.size + y as usize]
    }

    #[inline]
    fn h(&self, x: isize, y: isize) -> bool {
        self.horizontal[x as usize * self.size + y as usize]
    }
}

/// Whether the step from cell `(x, y)` to `(x, y+1)` is blocked, either by
/// the board edge or by a horizontal wall spanning that edge.
///
/// Coordinates are signed so callers can probe from offset positions (e.g.
/// jump checks from the opponent's cell) without their own bounds handling.
#[inline]
pub fn blocked_north(walls: Walls<'_>, x: isize, y: isize) -> bool {
    let size = walls.size as isize;
    if y >= size || y < 0 {
        return true;
    }
    (x < size && x >= 0 && walls.h(x, y)) || (x > 0 && x <= size && walls.h(x - 1, y))
}

/// Whether the step from cell `(x, y)` to `(x+1, y)` is blocked, either by
/// the board edge or by a vertical wall spanning that edge.
#[inline]
pub fn blocked_east(walls: Walls<'_>, x: isize, y: isize) -> bool {
    let size = walls.size as isize;
    if x >= size || x < 0 {
        return true;
    }
    (y < size && y >= 0 && walls.v(x, y)) || (y > 0 && y <= size && walls.v(x, y - 1))
}

/// Breadth-first reachability: can the pawn at `start` reach any cell in
/// `goal_row`?
///
/// Pure query, no side effects. Called twice (once per player) for every
/// candidate wall placement that survives the cheap structural checks.
pub fn has_path(start: (usize, usize), goal_row: usize, walls: Walls<'_>) -> bool {
    let n = walls.size + 1;
    if start.1 == goal_row {
        return true;
    }

    let mut visited = vec![false; n * n];
    let mut queue = VecDeque::with_capacity(n * 2);
    visited[start.0 * n + start.1] = true;
    queue.push_back(start);

    while let Some((x, y)) = queue.pop_front() {
        let (ix, iy) = (x as isize, y as isize);
        let mut neighbors = [(0usize, 0usize); 4];
        let mut count = 0;
        if !blocked_north(walls, ix, iy) {
            neighbors[count] = (x, y + 1);
            count += 1;
        }
        if !blocked_north(walls, ix, iy - 1) {
            neighbors[count] = (x, y - 1);
            count += 1;
        }
        if !blocked_east(walls, ix, iy) {
            neighbors[count] = (x + 1, y);
            count += 1;
        }
        if !blocked_east(walls, ix - 1, iy) {
            neighbors[count] = (x - 1, y);
            count += 1;
        }

        for &(nx, ny) in &neighbors[..count] {
            if ny == goal_row {
                return true;
            }
            if !visited[nx * n + ny] {
                visited[nx * n + ny] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    false
}

/// Distance from every cell to the nearest cell of `goal_row`, ignoring the
/// pawns. Unreachable cells get `u32::MAX`.
///
/// Used by heuristic players to walk the shortest path; not on the legality
/// hot path.
pub fn shortest_distances(goal_row: usize, walls: Walls<'_>) -> Vec<u32> {
    let n = walls.size + 1;
    let mut dist = vec![u32::MAX; n * n];
    let mut queue = VecDeque::with_capacity(n * 2);

    for x in 0..n {
        dist[x * n + goal_row] = 0;
        queue.push_back((x, goal_row));
    }

    while let Some((x, y)) = queue.pop_front() {
        let d = dist[x * n + y];
        let (ix, iy) = (x as isize, y as isize);
        let mut neighbors = [(0usize, 0usize); 4];
        let mut count = 0;
        if !blocked_north(walls, ix, iy) {
            neighbors[count] = (x, y + 1);
            count += 1;
        }
        if !blocked_north(walls, ix, iy - 1) {
            neighbors[count] = (x, y - 1);
            count += 1;
        }
        if !blocked_east(walls, ix, iy) {
            neighbors[count] = (x + 1, y);
            count += 1;
        }
        if !blocked_east(walls, ix - 1, iy) {
            neighbors[count] = (x - 1, y);
            count += 1;
        }

        for &(nx, ny) in &neighbors[..count] {
            if dist[nx * n + ny] == u32::MAX {
                dist[nx * n + ny] = d + 1;
                queue.push_back((nx, ny));
            }
        }
    }

    dist
}
