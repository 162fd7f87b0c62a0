use galton::prelude::*;
use galton_examples::{init_tracing, render_batch_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Polya urn pegs: every increment makes the next one likelier.
    let scenario = Distribution::Pareto.scenario();
    let (board, result) = scenario.run()?;

    let hist = result.histogram();
    let exact = scenario.rule.terminal_distribution(board.rows());
    tracing::info!(
        "{} balls | mode bin {:?} | total variation vs beta-binomial {:.4}",
        hist.total(),
        hist.mode(),
        hist.total_variation(&exact)
    );

    let rc = RenderConfig::fit_board(&board, (1200, 900)).with_ball_color([252, 98, 85]);
    render_batch_to_png(&board, &scenario.rule, &result, &rc, "boards-pareto-polya.png")?;

    Ok(())
}
