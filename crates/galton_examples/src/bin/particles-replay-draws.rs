use galton::prelude::*;
use galton_examples::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let board = Board::try_new(Distribution::Pareto.board_spec())?;
    let rule = BranchRule::polya(1.0, 3.0)?;

    // Record the draws a seeded generator hands out, one per row.
    let mut source = RngDraws::new(StdRng::seed_from_u64(2025));
    let recorded: Vec<f64> = (0..board.rows())
        .map(|_| source.next_draw())
        .collect::<Result<_>>()?;

    // Replaying those draws reproduces the particle exactly.
    let mut replay = ScriptedDraws::new(recorded.clone());
    let trajectory = simulate(&board, &rule, &mut replay)?;
    let mut again = ScriptedDraws::new(recorded);
    assert_eq!(trajectory, simulate(&board, &rule, &mut again)?);

    for (row, (outcome, point)) in trajectory
        .outcomes
        .iter()
        .zip(&trajectory.path[1..])
        .enumerate()
    {
        let p = rule.branch_probability(row as u32, point_column(&trajectory, row));
        tracing::info!(
            "row {row:>2} | p {p:.3} | {outcome:?} -> ({:.3}, {:.3})",
            point.x,
            point.y
        );
    }

    // Run a small batch and log each landing as it happens.
    let mut sink = FnSink::new(|event: BatchEvent| {
        if let BatchEvent::ParticleLanded { index, bin, slot, .. } = event {
            tracing::info!("particle {index} landed in bin {bin} at slot {slot}");
        }
    });
    let config = BatchConfig::new(10).with_seed(7);
    let result = run_batch_with_events(&board, &rule, &config, &mut sink)?;
    tracing::info!("final counts {:?}", result.occupancy.counts());

    Ok(())
}

/// Increments taken before decision `row`.
fn point_column(trajectory: &Trajectory, row: usize) -> u32 {
    trajectory.outcomes[..row]
        .iter()
        .filter(|o| **o == Branch::Increment)
        .count() as u32
}
