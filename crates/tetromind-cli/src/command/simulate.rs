use std::path::PathBuf;

use rand::Rng as _;

use tetromind_engine::{BagSeed, PlayStats, Playfield};
use tetromind_evaluator::search::MoveSearch;

use crate::{
    model::{self, GameRecord},
    util::Output,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Base seed; game i plays with seed + i. Random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum pieces per game
    #[arg(long, default_value_t = 2000)]
    turn_limit: usize,
    /// Score placements with one-piece lookahead
    #[arg(long)]
    lookahead: bool,
    /// Weights model JSON file (built-in weights when omitted)
    #[arg(long)]
    model: Option<PathBuf>,
    /// Write per-game records to this JSON file
    #[arg(long)]
    record: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let weights = model::load_weights(arg.model.as_ref())?;
    let search = MoveSearch::new(weights);
    let base_seed = arg.seed.unwrap_or_else(|| rand::rng().random());

    let mut records = Vec::with_capacity(arg.games);
    for i in 0..arg.games {
        let offset = u64::try_from(i).unwrap();
        let seed = BagSeed::from_u64(base_seed.wrapping_add(offset));
        let mut field = Playfield::with_seed(seed);
        let stats = if arg.lookahead {
            play_with_lookahead(&search, &mut field, arg.turn_limit)
        } else {
            search.play_session(&mut field, arg.turn_limit)
        };

        eprintln!(
            "game {i:3}: pieces {:5}  lines {:5}  score {:7}  level {:3}",
            stats.completed_pieces(),
            stats.total_cleared_lines(),
            stats.score(),
            stats.level(),
        );
        records.push(GameRecord {
            seed,
            stats,
            final_board: field.board().clone(),
        });
    }

    report_summary(&records, arg.turn_limit);
    if let Some(path) = &arg.record {
        Output::save_json(&records, Some(path.clone()))?;
        eprintln!("Records written to {}", path.display());
    }
    Ok(())
}

/// Session loop scoring every placement with the next piece taken into
/// account. Slower than the greedy loop, usually stronger.
fn play_with_lookahead(
    search: &MoveSearch,
    field: &mut Playfield,
    turn_limit: usize,
) -> PlayStats {
    let mut stats = PlayStats::new();
    for _ in 0..turn_limit {
        let shape = field.current_piece().spawn_shape();
        let next = field.next_piece().spawn_shape();
        let Some(chosen) = search.select_best_move_with_lookahead(field.board(), &shape, &next)
        else {
            break;
        };
        let (cleared, result) = field.complete_drop(chosen.rotation, chosen.col, chosen.row);
        stats.complete_piece_drop(cleared);
        if result.is_err() {
            break;
        }
    }
    stats
}

#[expect(clippy::cast_precision_loss)]
fn report_summary(records: &[GameRecord], turn_limit: usize) {
    if records.is_empty() {
        return;
    }
    let games = records.len() as f32;
    let mean_lines = records
        .iter()
        .map(|r| r.stats.total_cleared_lines() as f32)
        .sum::<f32>()
        / games;
    let mean_score = records.iter().map(|r| r.stats.score() as f32).sum::<f32>() / games;
    let max_lines = records
        .iter()
        .map(|r| r.stats.total_cleared_lines())
        .max()
        .unwrap_or(0);
    let survived = records
        .iter()
        .filter(|r| r.stats.completed_pieces() >= turn_limit)
        .count();

    eprintln!();
    eprintln!("Summary over {} games:", records.len());
    eprintln!("  Mean lines: {mean_lines:.1}");
    eprintln!("  Max lines:  {max_lines}");
    eprintln!("  Mean score: {mean_score:.0}");
    eprintln!("  Survived to turn limit: {survived}/{}", records.len());
}
