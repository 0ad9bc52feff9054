pub mod board;
pub mod cell;
pub mod error;
pub mod game;
pub mod interaction;

pub use board::{Board, BoardSize};
pub use cell::{Cell, Point};
pub use error::{GameError, Result};
pub use game::{Action, GameState, Outcome};
pub use interaction::HumanAgent;

/// Source of moves for [`game_loop`].
pub trait Agent {
    /// The next move to play, or `None` to stop playing.
    fn generate_move(&mut self, game: &GameState) -> Option<Action>;
}

pub fn new_game(width: usize, height: usize, num_mines: usize, seed: Option<u64>) -> Result<GameState> {
    GameState::new(width, height, num_mines, seed)
}

pub fn on_reveal(mut state: GameState, row: i32, col: i32) -> GameState {
    state.reveal(row, col);
    state
}

pub fn on_toggle_flag(mut state: GameState, row: i32, col: i32) -> GameState {
    state.toggle_flag(row, col);
    state
}

/// Feeds moves from `agent` into `game` one at a time until the game ends or
/// the agent gives up.
pub fn game_loop<A: Agent + ?Sized>(game: &mut GameState, agent: &mut A) -> Outcome {
    while !game.is_finished() {
        match agent.generate_move(game) {
            Some(action) => {
                game.apply(action);
            }
            None => break,
        }
    }
    game.outcome()
}

#[cfg(test)]
mod loop_tests {
    use super::*;
    use std::collections::VecDeque;

    struct ScriptedAgent {
        moves: VecDeque<Action>,
    }

    impl ScriptedAgent {
        fn new(moves: &[Action]) -> Self {
            ScriptedAgent { moves: moves.iter().copied().collect() }
        }
    }

    impl Agent for ScriptedAgent {
        fn generate_move(&mut self, _game: &GameState) -> Option<Action> {
            self.moves.pop_front()
        }
    }

    fn game() -> GameState {
        GameState::from_board(Board::with_mines(3, 3, &[Point(1, 1)]).unwrap())
    }

    #[test]
    fn stops_on_win() {
        let mut game = game();
        let mut agent = ScriptedAgent::new(&[
            Action::Reveal(0, 0),
            Action::ToggleFlag(1, 1),
            Action::Reveal(2, 2),
        ]);

        assert_eq!(game_loop(&mut game, &mut agent), Outcome::Won);
        assert_eq!(agent.moves.len(), 1);
    }

    #[test]
    fn stops_on_loss() {
        let mut game = game();
        let mut agent = ScriptedAgent::new(&[Action::Reveal(1, 1), Action::ToggleFlag(0, 0)]);

        assert_eq!(game_loop(&mut game, &mut agent), Outcome::Lost);
        assert_eq!(agent.moves.len(), 1);
        assert_eq!(game.flags_placed(), 0);
    }

    #[test]
    fn stops_when_agent_gives_up() {
        let mut game = game();
        let mut agent = ScriptedAgent::new(&[Action::Reveal(-1, 0), Action::Reveal(0, 2)]);

        assert_eq!(game_loop(&mut game, &mut agent), Outcome::InProgress);
        assert!(game.cell_at(0, 2).unwrap().is_revealed());
    }

    #[test]
    fn functional_api_threads_state() {
        let state = new_game(3, 3, 0, Some(7)).unwrap();
        let state = on_toggle_flag(state, 0, 0);
        assert_eq!(state.flags_placed(), 1);
        let state = on_reveal(state, 0, 0);
        assert!(!state.cell_at(0, 0).unwrap().is_revealed());
        let state = on_toggle_flag(state, 0, 0);
        // no mines and no flags satisfies the flag condition
        assert_eq!(state.outcome(), Outcome::Won);

        let state = new_game(3, 3, 0, Some(7)).unwrap();
        let state = on_reveal(state, 2, 2);
        assert_eq!(state.board().unrevealed_count(), 0);
        assert_eq!(state.outcome(), Outcome::InProgress);
    }
}
