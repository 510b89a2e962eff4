//! Renders the Newton fractal of a polynomial as ASCII art.
//!
//! Roots are given on the command line, e.g.
//! `cargo run --example ascii_fractal -- 1 "-0.5 + i0.866" "-0.5 - i0.866"`.
//! Without arguments the cube roots of unity are used.

use anyhow::Context;
use newton_fractal::{Complex, NewtonFractal, Scheduler, Viewport};

const WIDTH: usize = 78;
const HEIGHT: usize = 32;
const PALETTE: &[u8] = b" #*o+x%@=~";

fn main() -> anyhow::Result<()> {
    simple_logger::init_with_level(log::Level::Info)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let roots = if args.is_empty() {
        Complex::ONE.root(3)?
    } else {
        args.iter()
            .map(|s| s.parse::<Complex>())
            .collect::<Result<Vec<_>, _>>()
            .context("could not read roots")?
    };

    let fractal = NewtonFractal::from_roots(&roots)?;
    println!("{}", fractal.rooted());

    let viewport = Viewport::new(-2.0, 2.0, -1.5, 1.5, WIDTH, HEIGHT, 0)?;
    let scheduler = Scheduler::new()?;
    let image = scheduler.produce(&fractal, &viewport)?;

    for row in image.indices.chunks(image.width) {
        let line: String = row
            .iter()
            .map(|&i| char::from(PALETTE[usize::from(i) % PALETTE.len()]))
            .collect();
        println!("{line}");
    }
    scheduler.shutdown();
    Ok(())
}
