use galton::prelude::*;
use galton_examples::{init_tracing, render_batch_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Fair coin on an evenly spaced board: the stacks trace a binomial bell.
    let board = Board::try_new(BoardSpec::additive(12, 0.35))?;
    let rule = BranchRule::FairCoin;
    let config = BatchConfig::new(400).with_seed(42);

    let runner = BatchRunner::try_new(&board, &rule)?;
    let result = runner.run(&config)?;

    let rc = RenderConfig::fit_board(&board, (900, 1000)).with_paths([45, 60, 80]);
    let out = "boards-normal-basic.png";
    render_batch_to_png(&board, &rule, &result, &rc, out)?;

    let hist = result.histogram();
    tracing::info!(
        "Wrote {out} | mean {:.3} (expected 6) | variance {:.3} (expected 3).",
        hist.mean(),
        hist.variance()
    );

    Ok(())
}
