use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use rand::Rng;
use zapador_core::{
    CellCount, Coord, Coord2, GameConfig, MineField, MineFieldGenerator,
    RandomMineFieldGenerator, RevealOutcome,
};

use crate::view::render_board;

mod view;

/// Terminal minesweeper: dig up every safe cell without hitting a mine.
#[derive(Debug, Parser)]
#[command(name = "zapador", version, about)]
struct Args {
    /// Board dimension, the grid is SIZE x SIZE
    #[arg(long, default_value_t = 10)]
    size: Coord,

    /// Number of mines buried in the board
    #[arg(long, default_value_t = 10)]
    mines: CellCount,

    /// Seed for the mine layout, drawn randomly when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let config = GameConfig::new(args.size, args.mines)?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("mine layout seed: {}", seed);

    let field = RandomMineFieldGenerator::new(seed).generate(config);
    play(field)
}

fn play(mut field: MineField) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut hit_mine = false;

    while !field.is_cleared() {
        print!("{}", render_board(&field));

        let Some(line) = prompt_for_move(&mut input)? else {
            // stdin closed, player walked away from the board
            println!();
            return Ok(());
        };

        let Some(coords) = parse_move(&line) else {
            println!("Could not read that as `row, col`. Try again.");
            continue;
        };

        match field.reveal(coords) {
            Ok(RevealOutcome::Cleared) => {}
            Ok(RevealOutcome::HitMine) => {
                hit_mine = true;
                break;
            }
            Err(error) => println!("{error}. Try again."),
        }
    }

    if hit_mine {
        field.reveal_all();
        print!("{}", render_board(&field));
        println!("Boom. You dug up a mine, game over.");
    } else {
        print!("{}", render_board(&field));
        println!("Every safe cell revealed, you win!");
    }
    Ok(())
}

fn prompt_for_move(input: &mut impl BufRead) -> anyhow::Result<Option<String>> {
    print!("Where to dig? (row, col): ");
    io::stdout().flush().context("flushing the prompt")?;

    let mut line = String::new();
    if input.read_line(&mut line).context("reading a move")? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Parses a move typed as `row, col`, tolerating surrounding whitespace.
fn parse_move(line: &str) -> Option<Coord2> {
    let (row, col) = line.split_once(',')?;
    let row = row.trim().parse().ok()?;
    let col = col.trim().parse().ok()?;
    Some((row, col))
}
