//! Game module - the concurrent control loop
//!
//! [`play`] spawns one logic thread that is the sole mutator of the grid,
//! the pieces, and the session state. It multiplexes two inputs: the
//! driver's command channel and a gravity ticker derived from the current
//! falling speed. Both boundary channels are rendezvous channels, so the
//! engine blocks on every event until the driver has consumed it; nothing
//! is ever dropped or reordered, and a slow driver simply slows the game.
//!
//! Shutdown: `Quit`, closing the command channel, or the spawn cell being
//! occupied after a renewal all end the loop the same way, with a final
//! [`Event::Finished`] followed by the event channel closing.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam::channel::{bounded, tick, Receiver, SendError, Sender};
use crossbeam::select;

use crate::core::{Grid, Piece, Randomizer};
use crate::engine::config::Config;
use crate::engine::events::Event;
use crate::types::Command;

/// Start a game session on its own logic thread.
///
/// The grid may be pre-filled; the engine takes ownership and mutates no
/// other copy. Returns the event stream, or a configuration error if `config`
/// is invalid (in which case the loop never starts).
///
/// The first event is always [`Event::Renewed`] with the initial piece, sent
/// before any command is processed, so a driver has a valid board to render
/// from the very beginning.
pub fn play(
    grid: Grid,
    randomizer: Box<dyn Randomizer + Send>,
    config: Config,
    commands: Receiver<Command>,
) -> Result<Receiver<Event>> {
    config.validate()?;

    let (events_tx, events_rx) = bounded(0);
    let game = Game::new(grid, randomizer, config, events_tx);
    thread::spawn(move || game.run(commands));

    Ok(events_rx)
}

struct Game {
    grid: Grid,
    current: Piece,
    next: Piece,
    level: u32,
    total_removed: u32,
    paused: bool,
    waiting: bool,
    speed: f64,
    ticker: Receiver<Instant>,
    config: Config,
    rng: Box<dyn Randomizer + Send>,
    events: Sender<Event>,
}

fn fall_interval(speed: f64) -> Duration {
    Duration::from_secs_f64(1.0 / speed)
}

impl Game {
    fn new(
        grid: Grid,
        mut randomizer: Box<dyn Randomizer + Send>,
        config: Config,
        events: Sender<Event>,
    ) -> Self {
        let next = Piece::new(randomizer.as_mut());
        let speed = config.initial_speed;

        Self {
            grid,
            current: Piece::default(),
            next,
            level: 1,
            total_removed: 0,
            paused: false,
            waiting: false,
            speed,
            ticker: tick(fall_interval(speed)),
            config,
            rng: randomizer,
            events,
        }
    }

    /// The control loop. Returning drops the event sender, which closes the
    /// stream; an error from any send means the driver dropped the receiver,
    /// and the loop exits quietly.
    fn run(mut self, commands: Receiver<Command>) {
        if self.renew().is_err() {
            return;
        }

        loop {
            let ticker = self.ticker.clone();
            select! {
                recv(commands) -> msg => match msg {
                    Ok(Command::Quit) | Err(_) => {
                        let _ = self.events.send(Event::Finished);
                        return;
                    }
                    Ok(command) => {
                        if self.execute(command).is_err() {
                            return;
                        }
                    }
                },
                recv(ticker) -> _ => {
                    if self.paused || self.waiting {
                        continue;
                    }
                    if self.current.move_down(&self.grid) {
                        if self.send_updated().is_err() {
                            return;
                        }
                        continue;
                    }
                    if self.resolve_cascades().is_err() || self.renew().is_err() {
                        return;
                    }
                    if self.is_over() {
                        let _ = self.events.send(Event::Finished);
                        return;
                    }
                }
            }
        }
    }

    /// Apply one command and acknowledge it with an update event. Movement
    /// and rotation are no-ops while paused or waiting, but the event is
    /// still sent so the driver sees every command reflected.
    fn execute(&mut self, command: Command) -> Result<(), SendError<Event>> {
        match command {
            Command::TogglePause => self.paused = !self.paused,
            Command::ToggleWait => self.waiting = !self.waiting,
            _ if self.paused || self.waiting => {}
            Command::MoveLeft => self.current.move_left(&self.grid),
            Command::MoveRight => self.current.move_right(&self.grid),
            Command::MoveDown => {
                self.current.move_down(&self.grid);
            }
            Command::Rotate => self.current.rotate(),
            // Quit never reaches here; the loop handles it directly.
            Command::Quit => {}
        }
        self.send_updated()
    }

    /// Lock the current piece and resolve the full combo cascade: mark,
    /// report, settle, and mark again until no line remains. Each pass is a
    /// separate scoring event with an incrementing combo index, and each may
    /// cross the level-up threshold.
    fn resolve_cascades(&mut self) -> Result<(), SendError<Event>> {
        self.grid.consolidate(&self.current);

        let mut combo = 1;
        let mut removed = self.grid.mark_lines_to_remove() as u32;
        while removed > 0 {
            self.total_removed += removed;
            if self.config.tiles_per_level > 0
                && self.total_removed / self.config.tiles_per_level > self.level - 1
            {
                self.level += 1;
                self.speed_up();
            }
            self.events.send(Event::Scored {
                grid: self.grid.clone(),
                combo,
                removed,
                level: self.level,
            })?;
            combo += 1;
            self.grid.settle();
            removed = self.grid.mark_lines_to_remove() as u32;
        }
        Ok(())
    }

    /// Raise the falling speed by one increment, capped at the configured
    /// maximum, and replace the gravity ticker accordingly.
    fn speed_up(&mut self) {
        let speed = (self.speed + self.config.speed_increment).min(self.config.max_speed);
        if speed > self.speed {
            self.speed = speed;
            self.ticker = tick(fall_interval(speed));
        }
    }

    /// Promote the next piece to current at the spawn column and pre-draw a
    /// fresh next piece.
    fn renew(&mut self) -> Result<(), SendError<Event>> {
        self.current.reset_from(&self.next, self.spawn_column());
        self.next.randomize(self.rng.as_mut());

        self.events.send(Event::Renewed {
            grid: self.grid.clone(),
            piece: self.current,
            next_tiles: self.next.tiles,
        })
    }

    fn send_updated(&self) -> Result<(), SendError<Event>> {
        self.events.send(Event::Updated {
            piece: self.current,
            paused: self.paused,
        })
    }

    fn spawn_column(&self) -> i32 {
        (self.grid.width() / 2) as i32
    }

    /// The game is over when the spawn cell is already occupied.
    fn is_over(&self) -> bool {
        !self.grid.is_empty(self.spawn_column(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceRandomizer;
    use crate::types::Cell;

    // A game wired to a buffered event channel, so cascade resolution can be
    // driven synchronously without a consumer thread.
    fn game_with(grid: Grid, config: Config) -> (Game, Receiver<Event>) {
        let (tx, rx) = bounded(64);
        let rng = Box::new(SequenceRandomizer::new(vec![0, 1, 2, 3, 4, 5]));
        (Game::new(grid, rng, config, tx), rx)
    }

    fn bottom_row(grid: &mut Grid, colors: [u8; 6]) {
        let y = grid.height() as i32 - 1;
        for (x, color) in colors.into_iter().enumerate() {
            if color > 0 {
                grid.set(x as i32, y, Cell::Tile(color));
            }
        }
    }

    #[test]
    fn level_up_raises_speed_and_respects_the_cap() {
        let mut grid = Grid::new(6, 13);
        bottom_row(&mut grid, [0, 0, 0, 0, 1, 1]);

        let config = Config {
            tiles_per_level: 1,
            initial_speed: 1.0,
            speed_increment: 2.0,
            max_speed: 2.5,
        };
        let (mut game, events) = game_with(grid, config);
        game.current = Piece {
            tiles: [1, 1, 1],
            x: 3,
            y: 12,
        };

        game.resolve_cascades().unwrap();

        // Horizontal triple at the bottom plus the piece's own vertical line
        assert!(game.total_removed >= 3);
        assert_eq!(game.level, 2);
        assert_eq!(game.speed, 2.5);

        match events.try_recv().unwrap() {
            Event::Scored { level, combo, .. } => {
                assert_eq!(level, 2);
                assert_eq!(combo, 1);
            }
            other => panic!("expected Scored, got {:?}", other),
        }
    }

    #[test]
    fn speed_stops_rising_at_the_cap() {
        let (mut game, _events) = game_with(
            Grid::new(6, 13),
            Config {
                initial_speed: 2.5,
                speed_increment: 1.0,
                max_speed: 2.5,
                ..Config::default()
            },
        );

        game.speed_up();
        assert_eq!(game.speed, 2.5);
    }

    #[test]
    fn zero_tiles_per_level_disables_leveling() {
        let mut grid = Grid::new(6, 13);
        bottom_row(&mut grid, [0, 0, 0, 0, 2, 2]);

        let config = Config {
            tiles_per_level: 0,
            ..Config::default()
        };
        let (mut game, _events) = game_with(grid, config);
        game.current = Piece {
            tiles: [2, 5, 6],
            x: 3,
            y: 12,
        };

        game.resolve_cascades().unwrap();

        assert_eq!(game.total_removed, 3);
        assert_eq!(game.level, 1);
        assert_eq!(game.speed, game.config.initial_speed);
    }

    #[test]
    fn cascade_emits_one_scored_event_per_pass() {
        // Locking [1,2,3] at column 3 onto [0,2,2,0,1,1] clears the 1s
        // first, then the settled 2s; two passes, combos 1 and 2.
        let mut grid = Grid::new(6, 3);
        bottom_row(&mut grid, [0, 2, 2, 0, 1, 1]);

        let (mut game, events) = game_with(grid, Config::default());
        game.current = Piece {
            tiles: [1, 2, 3],
            x: 3,
            y: 2,
        };

        game.resolve_cascades().unwrap();

        let combos: Vec<u32> = events
            .try_iter()
            .map(|event| match event {
                Event::Scored { combo, removed, .. } => {
                    assert_eq!(removed, 3);
                    combo
                }
                other => panic!("expected Scored, got {:?}", other),
            })
            .collect();
        assert_eq!(combos, vec![1, 2]);
        assert_eq!(game.total_removed, 6);
    }

    #[test]
    fn lock_without_match_emits_nothing() {
        let (mut game, events) = game_with(Grid::new(6, 13), Config::default());
        game.current = Piece {
            tiles: [1, 2, 3],
            x: 3,
            y: 12,
        };

        game.resolve_cascades().unwrap();

        assert!(events.try_recv().is_err());
        assert_eq!(game.total_removed, 0);
        assert_eq!(game.grid.cell(3, 12), Some(Cell::Tile(1)));
    }
}
