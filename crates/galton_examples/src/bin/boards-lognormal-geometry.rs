use galton::prelude::*;
use galton_examples::{init_tracing, render_batch_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Same fair coin as the normal board; only the peg spacing is exponential.
    let scenario = Distribution::Lognormal.scenario().with_particle_count(400);
    let (board, result) = scenario.run()?;

    for (bin, x) in (0..=board.rows()).map(|b| (b, board.bin_center(b).x)) {
        tracing::info!(
            "bin {bin:>2} | x {x:>7.3} | count {}",
            result.occupancy.count(bin)
        );
    }

    let rc = RenderConfig::fit_board(&board, (1200, 900))
        .with_ball_color([131, 193, 103])
        .with_paths([40, 70, 50]);
    render_batch_to_png(
        &board,
        &scenario.rule,
        &result,
        &rc,
        "boards-lognormal-geometry.png",
    )?;

    Ok(())
}
