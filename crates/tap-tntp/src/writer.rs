//! CSV flow output.

use std::io::Write;
use std::path::Path;

use csv::Writer;

use tap_network::Network;

use crate::error::TntpResult;

/// Write one CSV row per arc — id, 1-based tail and head, assigned flow,
/// and final cost — to `writer`.
pub fn write_flows<W: Write>(network: &Network, writer: W) -> TntpResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(["arc", "tail", "head", "flow", "cost"])?;
    for (ij, arc) in network.arcs.iter().enumerate() {
        csv.write_record(&[
            ij.to_string(),
            (arc.tail.0 + 1).to_string(),
            (arc.head.0 + 1).to_string(),
            arc.flow.to_string(),
            arc.cost.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Like [`write_flows`] but creates (or truncates) the file at `path`.
pub fn write_flows_path(network: &Network, path: &Path) -> TntpResult<()> {
    write_flows(network, std::fs::File::create(path)?)
}
