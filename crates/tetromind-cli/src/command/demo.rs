use std::{path::PathBuf, thread, time::Duration};

use rand::Rng as _;

use tetromind_engine::{BagSeed, PlayStats, Playfield};
use tetromind_evaluator::search::MoveSearch;

use crate::{model, render};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DemoArg {
    /// Seed for the piece sequence. Random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum pieces to play
    #[arg(long, default_value_t = 200)]
    turn_limit: usize,
    /// Score placements with one-piece lookahead
    #[arg(long)]
    lookahead: bool,
    /// Weights model JSON file (built-in weights when omitted)
    #[arg(long)]
    model: Option<PathBuf>,
    /// Delay between pieces in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,
}

pub(crate) fn run(arg: &DemoArg) -> anyhow::Result<()> {
    let weights = model::load_weights(arg.model.as_ref())?;
    let search = MoveSearch::new(weights);
    let seed = BagSeed::from_u64(arg.seed.unwrap_or_else(|| rand::rng().random()));
    let mut field = Playfield::with_seed(seed);
    let mut stats = PlayStats::new();

    println!("Seed: {}", serde_json::to_string(&seed)?);
    for turn in 0..arg.turn_limit {
        let kind = field.current_piece();
        let shape = kind.spawn_shape();
        let chosen = if arg.lookahead {
            let next = field.next_piece().spawn_shape();
            search.select_best_move_with_lookahead(field.board(), &shape, &next)
        } else {
            search.select_best_move(field.board(), &shape)
        };
        let Some(chosen) = chosen else {
            println!("No legal placement for {} piece. Game over.", kind.as_char());
            break;
        };

        let (cleared, result) = field.complete_drop(chosen.rotation, chosen.col, chosen.row);
        stats.complete_piece_drop(cleared);

        println!(
            "turn {turn:4}  piece {}  col {:2}  row {:2}  rot {}  lines {:4}  score {:6}",
            kind.as_char(),
            chosen.col,
            chosen.row,
            chosen.rotation,
            stats.total_cleared_lines(),
            stats.score(),
        );
        println!("{}", render::render_board(field.board()));

        if result.is_err() {
            println!("The stack reached the top. Game over.");
            break;
        }
        if arg.delay_ms > 0 {
            thread::sleep(Duration::from_millis(arg.delay_ms));
        }
    }

    println!(
        "Finished: {} pieces, {} lines, score {}",
        stats.completed_pieces(),
        stats.total_cleared_lines(),
        stats.score(),
    );
    Ok(())
}
