use galton::prelude::*;
use galton_examples::{init_tracing, render_histogram_to_png};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let particles = 20_000;
    for distribution in Distribution::ALL {
        let scenario = distribution.scenario().with_particle_count(particles);
        let (board, result) = scenario.run()?;
        let hist = result.histogram();
        let exact = terminal_distribution(&scenario.rule, board.rows());

        tracing::info!(
            "{:<9} | mean {:>6.3} | variance {:>6.3} | TV distance {:.4}",
            distribution.name(),
            hist.mean(),
            hist.variance(),
            hist.total_variation(&exact)
        );

        let out = format!("histograms-{}.png", distribution.name());
        render_histogram_to_png(
            &hist,
            Some(exact.as_slice()),
            (650, 400),
            [88, 196, 221],
            &out,
        )?;
    }

    Ok(())
}
