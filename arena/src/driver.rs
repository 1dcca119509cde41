//! Game and series drivers.

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use quoridor::{Board, GameResult, Player};
use tracing::debug;

use crate::agents::Agent;

/// Series outcome from the first agent's perspective.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

/// Play one game, `red` moving first. Returns the outcome from `red`'s
/// perspective.
///
/// Each agent sees the canonical board for its turn; the chosen action's
/// legality bit is verified before applying, and an illegal choice is a hard
/// error rather than a skipped turn.
pub fn play_game(red: &mut dyn Agent, blue: &mut dyn Agent, board_size: usize) -> Result<GameResult> {
    let mut board = Board::new(board_size);
    let mut mover = Player::Red;
    let mut plies = 0u32;

    loop {
        let result = board.game_result(Player::Red);
        if result != GameResult::Ongoing {
            debug!(plies, ?result, "game over");
            return Ok(result);
        }

        let canonical = board.canonical(mover);
        let agent: &mut dyn Agent = match mover {
            Player::Red => &mut *red,
            Player::Blue => &mut *blue,
        };
        let action = agent.choose_action(&canonical)?;

        let valids = board.valid_actions(mover);
        if action >= valids.len() || !valids[action] {
            bail!(
                "agent '{}' chose illegal action {} as {:?}",
                agent.name(),
                action,
                mover
            );
        }

        board = board.apply_action(mover, action)?;
        mover = mover.opponent();
        plies += 1;
    }
}

/// Play `games` games, swapping colors halfway so neither agent keeps the
/// first-move advantage. Returns the tally from `one`'s perspective.
pub fn play_series(
    one: &mut dyn Agent,
    two: &mut dyn Agent,
    board_size: usize,
    games: u32,
) -> Result<Tally> {
    let bar = ProgressBar::new(games as u64);
    bar.set_style(ProgressStyle::with_template(
        "{pos}/{len} games [{bar:40}] {elapsed}",
    )?);

    let mut tally = Tally::default();
    let swap_at = games / 2;
    for game in 0..games {
        let swapped = game >= swap_at;
        let result = if swapped {
            invert(play_game(two, one, board_size)?)
        } else {
            play_game(one, two, board_size)?
        };
        match result {
            GameResult::Win => tally.wins += 1,
            GameResult::Loss => tally.losses += 1,
            GameResult::Draw | GameResult::Ongoing => tally.draws += 1,
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(tally)
}

fn invert(result: GameResult) -> GameResult {
    match result {
        GameResult::Win => GameResult::Loss,
        GameResult::Loss => GameResult::Win,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{GreedyAgent, RandomAgent};

    #[test]
    fn test_random_game_terminates() {
        let mut red = RandomAgent::new(1);
        let mut blue = RandomAgent::new(2);
        let result = play_game(&mut red, &mut blue, 3).unwrap();
        assert_ne!(result, GameResult::Ongoing);
    }

    #[test]
    fn test_series_tally_adds_up() {
        let mut one = RandomAgent::new(3);
        let mut two = RandomAgent::new(4);
        let tally = play_series(&mut one, &mut two, 3, 4).unwrap();
        assert_eq!(tally.wins + tally.losses + tally.draws, 4);
    }

    #[test]
    fn test_greedy_beats_random_majority() {
        let mut greedy = GreedyAgent::new();
        let mut random = RandomAgent::new(5);
        let tally = play_series(&mut greedy, &mut random, 5, 10).unwrap();
        assert!(
            tally.wins > tally.losses,
            "greedy should beat random: {tally:?}"
        );
    }
}
