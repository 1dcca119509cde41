//! Board state and rule engine: legal-action generation, action application,
//! terminal detection, and canonicalization.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::actions::{self, Action, Orientation, PawnMove};
use crate::error::RuleError;
use crate::path::{blocked_east, blocked_north, has_path, Walls};
use crate::zobrist::ZobristKeys;

/// One of the two players. Red moves first and plays toward row `n-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }
}

/// Outcome of a position from one player's point of view.
///
/// At most one terminal condition holds at a time: a goal-row arrival is
/// checked before the draw flag, so a win is never misreported as a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    Win,
    Loss,
    Draw,
}

/// Complete Quoridor position.
///
/// The struct is a value: [`Board::apply_action`] and [`Board::canonical`]
/// return new boards and never mutate the receiver, so canonical and raw
/// views of the same position can coexist without aliasing surprises.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    n: usize,
    red_position: (usize, usize),
    blue_position: (usize, usize),
    red_goal_row: usize,
    blue_goal_row: usize,
    /// Wall grids, `(n-1)×(n-1)` row-major `x*(n-1)+y`. Segments are only
    /// ever set, never cleared.
    v_walls: Vec<bool>,
    h_walls: Vec<bool>,
    red_walls_remaining: u8,
    blue_walls_remaining: u8,
    /// Occurrence count per position fingerprint, fed by `apply_action`.
    history: HashMap<u64, u32>,
    draw: bool,
    is_flipped: bool,
    keys: Arc<ZobristKeys>,
}

impl Board {
    /// Initial position for an `n×n` board: pawns centered on their home
    /// rows, no walls placed, `(n+1)²/10` walls per player.
    pub fn new(n: usize) -> Board {
        assert!(n >= 3, "board side must be at least 3, got {n}");

        let midpoint_red = n / 2 + 1 - n % 2;
        let midpoint_blue = n / 2 - 1 + n % 2;
        let slots = (n - 1) * (n - 1);
        let max_walls = ((n + 1) * (n + 1) / 10) as u8;

        Board {
            n,
            red_position: (midpoint_red, 0),
            blue_position: (midpoint_blue, n - 1),
            red_goal_row: n - 1,
            blue_goal_row: 0,
            v_walls: vec![false; slots],
            h_walls: vec![false; slots],
            red_walls_remaining: max_walls,
            blue_walls_remaining: max_walls,
            history: HashMap::new(),
            draw: false,
            is_flipped: false,
            keys: Arc::new(ZobristKeys::new(n)),
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn action_size(&self) -> usize {
        actions::action_size(self.n)
    }

    #[inline]
    pub fn position(&self, player: Player) -> (usize, usize) {
        match player {
            Player::Red => self.red_position,
            Player::Blue => self.blue_position,
        }
    }

    #[inline]
    pub fn goal_row(&self, player: Player) -> usize {
        match player {
            Player::Red => self.red_goal_row,
            Player::Blue => self.blue_goal_row,
        }
    }

    #[inline]
    pub fn walls_remaining(&self, player: Player) -> u8 {
        match player {
            Player::Red => self.red_walls_remaining,
            Player::Blue => self.blue_walls_remaining,
        }
    }

    /// Whether this state is stored in the flipped (player-Blue-relative)
    /// orientation.
    #[inline]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    #[inline]
    pub fn wall_at(&self, orientation: Orientation, x: usize, y: usize) -> bool {
        let slot = x * (self.n - 1) + y;
        match orientation {
            Orientation::Vertical => self.v_walls[slot],
            Orientation::Horizontal => self.h_walls[slot],
        }
    }

    /// Borrowed view of both wall grids for the connectivity predicates.
    #[inline]
    pub fn walls(&self) -> Walls<'_> {
        Walls {
            vertical: &self.v_walls,
            horizontal: &self.h_walls,
            size: self.n - 1,
        }
    }

    /// How many times the current position has already occurred.
    pub fn repetition_count(&self) -> u32 {
        self.history.get(&self.fingerprint()).copied().unwrap_or(0)
    }

    /// Stable 64-bit summary of (positions, walls, draw flag). Equal for two
    /// states exactly when those features are equal; independent of the path
    /// that produced the state.
    pub fn fingerprint(&self) -> u64 {
        let mut hash = self.keys.red_cell(self.red_position.0, self.red_position.1)
            ^ self.keys.blue_cell(self.blue_position.0, self.blue_position.1);
        for (slot, &set) in self.v_walls.iter().enumerate() {
            if set {
                hash ^= self.keys.v_wall(slot);
            }
        }
        for (slot, &set) in self.h_walls.iter().enumerate() {
            if set {
                hash ^= self.keys.h_wall(slot);
            }
        }
        if self.draw {
            hash ^= self.keys.draw_flag();
        }
        hash
    }

    /// Outcome of the position from `player`'s point of view. Goal arrivals
    /// take precedence over the draw flag.
    pub fn game_result(&self, player: Player) -> GameResult {
        if self.red_position.1 == self.red_goal_row {
            return if player == Player::Red {
                GameResult::Win
            } else {
                GameResult::Loss
            };
        }
        if self.blue_position.1 == self.blue_goal_row {
            return if player == Player::Blue {
                GameResult::Win
            } else {
                GameResult::Loss
            };
        }
        if self.draw {
            return GameResult::Draw;
        }
        GameResult::Ongoing
    }

    /// The state expressed from `player`'s point of view: identity for Red,
    /// a 180° rotation with swapped roles for Blue. Pure; the receiver is
    /// untouched.
    pub fn canonical(&self, player: Player) -> Board {
        match player {
            Player::Red => self.clone(),
            Player::Blue => self.flipped(),
        }
    }

    fn flipped(&self) -> Board {
        let last = self.n - 1;
        let s = self.n - 1;
        let rotate = |grid: &[bool]| -> Vec<bool> {
            let mut out = vec![false; s * s];
            for x in 0..s {
                for y in 0..s {
                    out[x * s + y] = grid[(s - 1 - x) * s + (s - 1 - y)];
                }
            }
            out
        };

        Board {
            n: self.n,
            red_position: (last - self.blue_position.0, last - self.blue_position.1),
            blue_position: (last - self.red_position.0, last - self.red_position.1),
            red_goal_row: last - self.blue_goal_row,
            blue_goal_row: last - self.red_goal_row,
            v_walls: rotate(&self.v_walls),
            h_walls: rotate(&self.h_walls),
            red_walls_remaining: self.blue_walls_remaining,
            blue_walls_remaining: self.red_walls_remaining,
            history: self.history.clone(),
            draw: self.draw,
            is_flipped: !self.is_flipped,
            keys: Arc::clone(&self.keys),
        }
    }

    /// Legality bits for every action, expressed in `player`'s canonical
    /// frame (so the vector lines up with the indices `apply_action`
    /// accepts from that player).
    pub fn valid_actions(&self, player: Player) -> Vec<bool> {
        match player {
            Player::Red => self.valid_actions_canonical(),
            Player::Blue => self.flipped().valid_actions_canonical(),
        }
    }

    fn valid_actions_canonical(&self) -> Vec<bool> {
        let mut valids = vec![false; self.action_size()];
        let pawn = self.pawn_actions(Player::Red);
        valids[..actions::PAWN_ACTIONS].copy_from_slice(&pawn);

        if self.red_walls_remaining > 0 {
            let s = self.n - 1;
            for x in 0..s {
                for y in 0..s {
                    if self.wall_is_legal(Player::Red, Orientation::Vertical, x, y) {
                        valids[actions::PAWN_ACTIONS + x * s + y] = true;
                    }
                    if self.wall_is_legal(Player::Red, Orientation::Horizontal, x, y) {
                        valids[actions::PAWN_ACTIONS + s * s + x * s + y] = true;
                    }
                }
            }
        }
        valids
    }

    /// Pawn-move legality bits for `mover`, in the board's own frame.
    ///
    /// Implements the standard step/jump/diagonal-side-step rule: a straight
    /// jump needs the opponent adjacent and the far edge open; the two
    /// diagonal side-steps open up only when the straight jump is blocked by
    /// a wall or the board edge.
    fn pawn_actions(&self, mover: Player) -> [bool; actions::PAWN_ACTIONS] {
        let w = self.walls();
        let (pos, opp) = match mover {
            Player::Red => (self.red_position, self.blue_position),
            Player::Blue => (self.blue_position, self.red_position),
        };
        let (px, py) = (pos.0 as isize, pos.1 as isize);
        let (ox, oy) = (opp.0 as isize, opp.1 as isize);

        let mut bits = [false; actions::PAWN_ACTIONS];
        let mut set = |m: PawnMove| bits[m.index()] = true;

        // North
        if !blocked_north(w, px, py) {
            if (px, py + 1) != (ox, oy) {
                set(PawnMove::North);
            } else if !blocked_north(w, px, py + 1) {
                set(PawnMove::JumpNorth);
            } else {
                if !blocked_east(w, px, py + 1) {
                    set(PawnMove::JumpNorthEast);
                }
                if !blocked_east(w, px - 1, py + 1) {
                    set(PawnMove::JumpNorthWest);
                }
            }
        }

        // South
        if !blocked_north(w, px, py - 1) {
            if (px, py - 1) != (ox, oy) {
                set(PawnMove::South);
            } else if !blocked_north(w, px, py - 2) {
                set(PawnMove::JumpSouth);
            } else {
                if !blocked_east(w, px, py - 1) {
                    set(PawnMove::JumpSouthEast);
                }
                if !blocked_east(w, px - 1, py - 1) {
                    set(PawnMove::JumpSouthWest);
                }
            }
        }

        // East
        if !blocked_east(w, px, py) {
            if (px + 1, py) != (ox, oy) {
                set(PawnMove::East);
            } else if !blocked_east(w, px + 1, py) {
                set(PawnMove::JumpEast);
            } else {
                if !blocked_north(w, px + 1, py) {
                    set(PawnMove::JumpNorthEast);
                }
                if !blocked_north(w, px + 1, py - 1) {
                    set(PawnMove::JumpSouthEast);
                }
            }
        }

        // West
        if !blocked_east(w, px - 1, py) {
            if (px - 1, py) != (ox, oy) {
                set(PawnMove::West);
            } else if !blocked_east(w, px - 2, py) {
                set(PawnMove::JumpWest);
            } else {
                if !blocked_north(w, px - 1, py) {
                    set(PawnMove::JumpNorthWest);
                }
                if !blocked_north(w, px - 1, py - 1) {
                    set(PawnMove::JumpSouthWest);
                }
            }
        }

        bits
    }

    /// Structural wall legality: the slot is free in both orientations and
    /// no same-orientation wall occupies the adjacent slot along the wall's
    /// own axis (which would double-cover an already blocked edge).
    fn wall_structurally_free(&self, orientation: Orientation, x: usize, y: usize) -> bool {
        let s = self.n - 1;
        let slot = x * s + y;
        match orientation {
            Orientation::Vertical => {
                !self.v_walls[slot]
                    && !self.h_walls[slot]
                    && (y + 1 >= s || !self.v_walls[x * s + y + 1])
                    && (y == 0 || !self.v_walls[x * s + y - 1])
            }
            Orientation::Horizontal => {
                !self.h_walls[slot]
                    && !self.v_walls[slot]
                    && (x + 1 >= s || !self.h_walls[(x + 1) * s + y])
                    && (x == 0 || !self.h_walls[(x - 1) * s + y])
            }
        }
    }

    /// Number of contact zones (two ends plus the middle) where the
    /// candidate wall would touch a border or an existing wall. A wall with
    /// fewer than two contacts cannot close off any region, so the path
    /// check can be skipped for it.
    fn wall_contact_count(&self, orientation: Orientation, x: usize, y: usize) -> u32 {
        let s = self.n - 1;
        let v = |x: usize, y: usize| self.v_walls[x * s + y];
        let h = |x: usize, y: usize| self.h_walls[x * s + y];
        let mut contacts = 0;

        match orientation {
            Orientation::Vertical => {
                if y + 1 >= s
                    || h(x, y + 1)
                    || (x > 0 && h(x - 1, y + 1))
                    || (x + 1 < s && h(x + 1, y + 1))
                    || (y + 2 < s && v(x, y + 2))
                {
                    contacts += 1;
                }
                if y == 0
                    || h(x, y - 1)
                    || (x > 0 && h(x - 1, y - 1))
                    || (x + 1 < s && h(x + 1, y - 1))
                    || (y >= 2 && v(x, y - 2))
                {
                    contacts += 1;
                }
                if (x > 0 && h(x - 1, y)) || (x + 1 < s && h(x + 1, y)) {
                    contacts += 1;
                }
            }
            Orientation::Horizontal => {
                if x + 1 >= s
                    || v(x + 1, y)
                    || (y > 0 && v(x + 1, y - 1))
                    || (y + 1 < s && v(x + 1, y + 1))
                    || (x + 2 < s && h(x + 2, y))
                {
                    contacts += 1;
                }
                if x == 0
                    || v(x - 1, y)
                    || (y > 0 && v(x - 1, y - 1))
                    || (y + 1 < s && v(x - 1, y + 1))
                    || (x >= 2 && h(x - 2, y))
                {
                    contacts += 1;
                }
                if (y > 0 && v(x, y - 1)) || (y + 1 < s && v(x, y + 1)) {
                    contacts += 1;
                }
            }
        }

        contacts
    }

    /// Would both pawns still reach their goal rows with this wall placed?
    fn wall_keeps_paths(&self, orientation: Orientation, x: usize, y: usize) -> bool {
        let s = self.n - 1;
        let mut v = self.v_walls.clone();
        let mut h = self.h_walls.clone();
        match orientation {
            Orientation::Vertical => v[x * s + y] = true,
            Orientation::Horizontal => h[x * s + y] = true,
        }
        let walls = Walls {
            vertical: &v,
            horizontal: &h,
            size: s,
        };
        has_path(self.red_position, self.red_goal_row, walls)
            && has_path(self.blue_position, self.blue_goal_row, walls)
    }

    fn wall_is_legal(&self, mover: Player, orientation: Orientation, x: usize, y: usize) -> bool {
        self.walls_remaining(mover) > 0
            && self.wall_structurally_free(orientation, x, y)
            && (self.wall_contact_count(orientation, x, y) < 2
                || self.wall_keeps_paths(orientation, x, y))
    }

    /// Apply `action_index` (expressed in `player`'s canonical frame) and
    /// return the successor state.
    ///
    /// Rejects out-of-range indices and actions whose legality bit is zero
    /// before producing any successor; on success records the resulting
    /// fingerprint into the repetition history and raises the draw flag once
    /// a fingerprint's count exceeds 2.
    pub fn apply_action(&self, player: Player, action_index: usize) -> Result<Board, RuleError> {
        let size = self.action_size();
        if action_index >= size {
            return Err(RuleError::InvalidActionIndex {
                index: action_index,
                action_size: size,
            });
        }

        // Blue chooses in its flipped frame; map back to this board's frame.
        let raw = match player {
            Player::Red => action_index,
            Player::Blue => actions::flip_index(action_index, self.n)?,
        };

        let mut next = self.clone();
        match Action::decode(raw, self.n)? {
            Action::Move(mv) => {
                if !self.pawn_actions(player)[raw] {
                    return Err(RuleError::IllegalAction {
                        index: action_index,
                    });
                }
                let (dx, dy) = mv.delta();
                let pos = match player {
                    Player::Red => &mut next.red_position,
                    Player::Blue => &mut next.blue_position,
                };
                pos.0 = (pos.0 as isize + dx) as usize;
                pos.1 = (pos.1 as isize + dy) as usize;
            }
            Action::Wall { orientation, x, y } => {
                if !self.wall_is_legal(player, orientation, x, y) {
                    return Err(RuleError::IllegalAction {
                        index: action_index,
                    });
                }
                let slot = x * (self.n - 1) + y;
                match orientation {
                    Orientation::Vertical => next.v_walls[slot] = true,
                    Orientation::Horizontal => next.h_walls[slot] = true,
                }
                match player {
                    Player::Red => next.red_walls_remaining -= 1,
                    Player::Blue => next.blue_walls_remaining -= 1,
                }
            }
        }

        let fingerprint = next.fingerprint();
        let count = next.history.entry(fingerprint).or_insert(0);
        *count += 1;
        if *count > 2 {
            next.draw = true;
            debug!(fingerprint, "position repeated a third time, flagging draw");
        }

        Ok(next)
    }
}
