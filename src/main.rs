use std::{
    cell::Cell,
    io::{self, Read, Write},
    os::fd::AsRawFd,
    rc::Rc,
};

use aho_corasick::AhoCorasick;
use clap::Parser;
use lib_2048::{Board, Direction, GameEngine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod ai;
mod render;

// Pattern order matches `Direction::ALL`; the last pattern quits.
const KEYS: [&[u8]; 5] = [b"\x1b[A", b"\x1b[B", b"\x1b[C", b"\x1b[D", b"q"];
const QUIT_KEY: usize = 4;

#[derive(Parser)]
#[command(name = "tiles-2048")]
#[command(about = "Sliding-tile merge puzzle in the terminal")]
struct Cli {
    /// Seed for tile placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Let a random player make the moves
    #[arg(short, long)]
    random: bool,
    /// Stop the random player after this many moves
    #[arg(long, requires = "random")]
    moves: Option<u32>,
}

fn status(engine: &GameEngine<impl Rng>) -> String {
    format!(
        "Tiles: {:<3} Last move: {:?}",
        engine.board().tile_count(),
        engine.last_direction()
    )
}

/// Sets the returned flag whenever the engine reports a change.
fn watch(engine: &mut GameEngine<impl Rng>) -> Rc<Cell<bool>> {
    let dirty = Rc::new(Cell::new(false));

    engine.subscribe({
        let dirty = Rc::clone(&dirty);
        move |_, _| dirty.set(true)
    });

    dirty
}

fn play_interactive(
    out: &mut (impl AsRawFd + Write),
    input: &mut impl Read,
    engine: &mut GameEngine<impl Rng>,
) -> io::Result<()> {
    let dirty = watch(engine);
    let mut shown = engine.board().clone();

    let mut buf = [0u8; 128];

    let input_searcher =
        AhoCorasick::new(KEYS).map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let mut buf_len = 0;

    let terminal = render::setup_terminal(out)?;
    render::draw_board(out, &shown, &status(engine))?;

    'game: loop {
        let read = input.read(&mut buf[buf_len..])?;
        if read == 0 {
            break;
        }
        buf_len += read;

        let keys: Vec<usize> = input_searcher
            .find_iter(&buf[..buf_len])
            .map(|m| m.pattern().as_usize())
            .collect();

        for key in keys {
            if key == QUIT_KEY {
                break 'game;
            }

            engine.move_tiles(Direction::ALL[key]);

            if dirty.replace(false) {
                let board: &Board = engine.board();
                render::redraw_board(out, &shown, board, &status(engine))?;
                shown = board.clone();
            }
        }

        buf_len = match &buf[..buf_len] {
            [.., 0x1b, b'['] => {
                buf[..2].copy_from_slice(b"\x1b[");
                2
            }
            [.., 0x1b] => {
                buf[0] = 0x1b;
                1
            }
            _ => 0,
        }
    }

    render::restore_terminal(out, &terminal)?;
    out.write_all(b"Bye\n")
}

fn play_random(
    out: &mut impl Write,
    engine: &mut GameEngine<impl Rng>,
    ai: &mut ai::RandomAi<impl Rng>,
    limit: Option<u32>,
) -> io::Result<()> {
    let dirty = watch(engine);
    let mut shown = engine.board().clone();
    let mut turns = 0;

    render::draw_board(out, &shown, &status(engine))?;

    while limit.map_or(true, |limit| turns < limit) {
        let Some(outcome) = ai.play_turn(engine) else {
            break;
        };
        turns += 1;

        if dirty.replace(false) {
            render::redraw_board(out, &shown, engine.board(), &status(engine))?;
            shown = engine.board().clone();
        }

        debug!(turn = turns, direction = ?outcome.direction, "random move");
    }

    info!(turns, tiles = engine.board().tile_count(), "random game finished");
    writeln!(out, "Stopped after {turns} moves")
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut seed_rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut engine = GameEngine::new(ChaCha8Rng::seed_from_u64(seed_rng.gen()));
    info!(seed = ?cli.seed, "new game");

    let mut stdout = io::stdout().lock();

    if cli.random {
        let mut ai = ai::RandomAi::new(ChaCha8Rng::seed_from_u64(seed_rng.gen()));

        play_random(&mut stdout, &mut engine, &mut ai, cli.moves)
    } else {
        let mut stdin = io::stdin().lock();

        play_interactive(&mut stdout, &mut stdin, &mut engine)
    }
}
