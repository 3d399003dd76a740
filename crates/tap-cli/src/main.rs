//! tap-sue — stochastic user equilibrium assignment from TNTP inputs.
//!
//! ```text
//! tap-sue <linkFile> <tripsFile> <theta> <lambda>
//! ```
//!
//! Loads the network, runs the MSA solver, and writes the assigned flows to
//! `flows.csv` in the working directory.  Exits non-zero on any fatal error.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use tap_core::Verbosity;
use tap_solver::{solve, InitStats, MsaSettings, SolveObserver, SolveOutcome};
use tap_tntp::{load_network, write_flows_path};

/// How chatty the run is.  Lower it to `Verbosity::Low` for iteration lines
/// only, or `Verbosity::None` for a silent run.
const VERBOSITY: Verbosity = Verbosity::Full;

const OUTPUT_FILE: &str = "flows.csv";

// ── Progress printer ──────────────────────────────────────────────────────────

/// Threshold printer over the solver's observer hooks.
struct ProgressPrinter {
    verbosity: Verbosity,
}

impl ProgressPrinter {
    fn say(&self, level: Verbosity, message: impl AsRef<str>) {
        if self.verbosity.admits(level) {
            println!("{}", message.as_ref());
        }
    }
}

impl SolveObserver for ProgressPrinter {
    fn on_init(&mut self, stats: &InitStats) {
        self.say(
            Verbosity::Medium,
            format!("{} bush links, {} paths", stats.num_bush_links, stats.num_bush_paths),
        );
        self.say(
            Verbosity::Low,
            format!("Initialization done in {:.3} s.", stats.elapsed.as_secs_f64()),
        );
    }

    fn on_iteration(&mut self, iteration: u32, flow_diff: f64, elapsed: Duration) {
        self.say(
            Verbosity::Low,
            format!(
                "Iteration {iteration}: flow diff {flow_diff:.3}, time {:.3}",
                elapsed.as_secs_f64()
            ),
        );
    }

    fn on_end(&mut self, outcome: &SolveOutcome) {
        let verdict = if outcome.converged {
            "Converged"
        } else {
            "Stopped at a cap"
        };
        self.say(
            Verbosity::Medium,
            format!(
                "{verdict} after {} iterations, flow diff {:.6}.",
                outcome.iterations, outcome.flow_diff
            ),
        );
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 4 {
        bail!("usage: tap-sue <linkFile> <tripsFile> <theta> <lambda>");
    }
    let theta: f64 = args[2]
        .parse()
        .with_context(|| format!("theta must be a number, got {:?}", args[2]))?;
    let lambda: f64 = args[3]
        .parse()
        .with_context(|| format!("lambda must be a number, got {:?}", args[3]))?;

    let loaded = load_network(Path::new(&args[0]), Path::new(&args[1]))
        .with_context(|| format!("loading {} and {}", args[0], args[1]))?;
    let mut printer = ProgressPrinter { verbosity: VERBOSITY };
    for warning in &loaded.warnings {
        printer.say(Verbosity::Medium, format!("warning: {warning}"));
    }

    let mut network = loaded.network;
    printer.say(
        Verbosity::Medium,
        format!(
            "Network: {} nodes, {} arcs, {} zones, total demand {}.",
            network.num_nodes,
            network.num_arcs(),
            network.num_zones,
            network.total_demand()
        ),
    );

    solve(&mut network, &MsaSettings::new(theta, lambda), &mut printer)
        .context("assignment failed")?;

    write_flows_path(&network, Path::new(OUTPUT_FILE))
        .with_context(|| format!("writing {OUTPUT_FILE}"))?;
    printer.say(Verbosity::Low, format!("Wrote {OUTPUT_FILE}."));
    Ok(())
}
