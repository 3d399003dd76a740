//! TNTP network loader.
//!
//! # File format
//!
//! Both inputs open with a metadata header of `<TAG> value` lines closed by
//! `<END OF METADATA>`; `~` starts a comment and blank lines are skipped
//! everywhere.
//!
//! The links file then carries one row per arc with ten whitespace-separated
//! fields (a trailing `;` is tolerated):
//!
//! ```text
//! ~ tail head capacity length fftime alpha beta speed toll type
//!   1    2    25900.2  6      6      0.15  4    0     0    1 ;
//! ```
//!
//! The trips file groups demand by origin:
//!
//! ```text
//! Origin  1
//!     2 :  100.0;   3 :  250.0;
//! ```
//!
//! Node and zone numbers are 1-based in the files and converted on load.
//! Factor metadata in the trips file overrides the links-file values, and
//! both feed each arc's fixed cost at build time.
//!
//! # Warnings
//!
//! Recoverable oddities (unknown metadata tags, negative lengths or tolls)
//! don't fail the load; they come back as strings in [`TntpLoad::warnings`]
//! for the caller's sink to print or drop.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tap_core::NodeId;
use tap_network::{ArcInput, Network, NetworkBuilder};

use crate::error::{FileKind, TntpError, TntpResult};

// ── Public API ────────────────────────────────────────────────────────────────

/// A parsed network plus any non-fatal diagnostics collected on the way.
pub struct TntpLoad {
    pub network:  Network,
    pub warnings: Vec<String>,
}

/// Load a network from TNTP link and trips files on disk.
pub fn load_network(link_path: &Path, trips_path: &Path) -> TntpResult<TntpLoad> {
    let links = std::fs::File::open(link_path)?;
    let trips = std::fs::File::open(trips_path)?;
    load_network_readers(links, trips)
}

/// Like [`load_network`] but accepts any `Read` sources.
///
/// Useful for testing (pass `&[u8]` or a `Cursor`) or loading from network
/// streams.
pub fn load_network_readers<L: Read, T: Read>(links: L, trips: T) -> TntpResult<TntpLoad> {
    let mut warnings = Vec::new();
    let link_data = parse_link_file(BufReader::new(links), &mut warnings)?;
    let trip_data = parse_trips_file(BufReader::new(trips), &link_data, &mut warnings)?;

    let mut builder = NetworkBuilder::new(link_data.num_nodes, link_data.num_zones);
    builder
        .first_through_node(link_data.first_through_node)
        .distance_factor(trip_data.distance_factor)
        .toll_factor(trip_data.toll_factor);
    for row in link_data.rows {
        builder.add_arc(row);
    }
    for (origin, dest, demand) in trip_data.demand {
        builder.set_demand(origin, dest, demand);
    }

    Ok(TntpLoad {
        network: builder.build()?,
        warnings,
    })
}

// ── Links file ────────────────────────────────────────────────────────────────

struct LinkData {
    num_zones: usize,
    num_nodes: usize,
    first_through_node: usize,
    distance_factor: f64,
    toll_factor: f64,
    rows: Vec<ArcInput>,
}

fn parse_link_file<R: BufRead>(reader: R, warnings: &mut Vec<String>) -> TntpResult<LinkData> {
    const FILE: FileKind = FileKind::Links;

    let mut num_zones = None;
    let mut num_nodes = None;
    let mut num_arcs = None;
    let mut first_through_node = None;
    let mut distance_factor = None;
    let mut toll_factor = None;

    let mut lines = reader.lines().enumerate();

    // ── Metadata header ───────────────────────────────────────────────────
    loop {
        let (n, raw) = next_line(&mut lines, FILE, "metadata")?;
        let Some((tag, value)) = metadata_line(&raw, FILE, n)? else {
            continue;
        };
        match tag.as_str() {
            "NUMBER OF ZONES" => num_zones = Some(int_field(&value, FILE, n)?),
            "NUMBER OF NODES" => num_nodes = Some(int_field(&value, FILE, n)?),
            "NUMBER OF LINKS" => num_arcs = Some(int_field(&value, FILE, n)?),
            "FIRST THRU NODE" => {
                first_through_node = Some(int_field::<i64>(&value, FILE, n)?)
            }
            "DISTANCE FACTOR" => distance_factor = Some(num_field(&value, FILE, n)?),
            "TOLL FACTOR" => toll_factor = Some(num_field(&value, FILE, n)?),
            "END OF METADATA" => break,
            other => warnings.push(format!(
                "ignoring unknown metadata tag <{other}> in the links file"
            )),
        }
    }

    let num_zones: usize = num_zones.ok_or(TntpError::MissingMetadata {
        file: FILE,
        tag:  "NUMBER OF ZONES",
    })?;
    let num_nodes: usize = num_nodes.ok_or(TntpError::MissingMetadata {
        file: FILE,
        tag:  "NUMBER OF NODES",
    })?;
    let num_arcs: usize = num_arcs.ok_or(TntpError::MissingMetadata {
        file: FILE,
        tag:  "NUMBER OF LINKS",
    })?;
    let first_through_node = match first_through_node {
        Some(v) => (v - 1).max(0) as usize,
        None => {
            warnings.push(
                "links file has no first through node, defaulting to node 1".to_string(),
            );
            0
        }
    };

    // ── Link rows ─────────────────────────────────────────────────────────
    let mut rows = Vec::with_capacity(num_arcs);
    while rows.len() < num_arcs {
        let (n, raw) = next_line(&mut lines, FILE, "link data")?;
        let Some(data) = data_line(&raw) else { continue };
        rows.push(parse_link_row(data, num_nodes, n, warnings)?);
    }

    Ok(LinkData {
        num_zones,
        num_nodes,
        first_through_node,
        distance_factor: distance_factor.unwrap_or(0.0),
        toll_factor: toll_factor.unwrap_or(0.0),
        rows,
    })
}

fn parse_link_row(
    data: &str,
    num_nodes: usize,
    line: usize,
    warnings: &mut Vec<String>,
) -> TntpResult<ArcInput> {
    const FILE: FileKind = FileKind::Links;

    let fields: Vec<&str> = data
        .split_whitespace()
        .map(|t| t.trim_end_matches(';'))
        .filter(|t| !t.is_empty())
        .collect();
    if fields.len() < 10 {
        return Err(TntpError::Parse {
            file:    FILE,
            line,
            message: format!("expected 10 link fields, found {}", fields.len()),
        });
    }

    let tail: usize = int_field(fields[0], FILE, line)?;
    let head: usize = int_field(fields[1], FILE, line)?;
    let capacity = num_field(fields[2], FILE, line)?;
    let length = num_field(fields[3], FILE, line)?;
    let free_flow_time = num_field(fields[4], FILE, line)?;
    let alpha = num_field(fields[5], FILE, line)?;
    let beta = num_field(fields[6], FILE, line)?;
    let speed_limit = num_field(fields[7], FILE, line)?;
    let toll = num_field(fields[8], FILE, line)?;
    let link_type: i32 = int_field(fields[9], FILE, line)?;

    for (name, node) in [("tail", tail), ("head", head)] {
        if node < 1 || node > num_nodes {
            return Err(TntpError::Parse {
                file:    FILE,
                line,
                message: format!("arc {name} {node} out of range 1..={num_nodes}"),
            });
        }
    }
    if capacity <= 0.0 {
        return Err(TntpError::Parse {
            file:    FILE,
            line,
            message: format!("non-positive capacity {capacity}"),
        });
    }
    for (name, value) in [("free-flow time", free_flow_time), ("alpha", alpha), ("beta", beta)] {
        if value < 0.0 {
            return Err(TntpError::Parse {
                file:    FILE,
                line,
                message: format!("negative {name} {value}"),
            });
        }
    }
    for (name, value) in [("length", length), ("speed limit", speed_limit), ("toll", toll)] {
        if value < 0.0 {
            warnings.push(format!("links file line {line}: negative {name} {value}"));
        }
    }

    Ok(ArcInput {
        tail: NodeId((tail - 1) as u32),
        head: NodeId((head - 1) as u32),
        capacity,
        length,
        free_flow_time,
        alpha,
        beta,
        speed_limit,
        toll,
        link_type,
    })
}

// ── Trips file ────────────────────────────────────────────────────────────────

struct TripData {
    distance_factor: f64,
    toll_factor: f64,
    demand: Vec<(NodeId, NodeId, f64)>,
}

fn parse_trips_file<R: BufRead>(
    reader: R,
    links: &LinkData,
    warnings: &mut Vec<String>,
) -> TntpResult<TripData> {
    const FILE: FileKind = FileKind::Trips;

    let mut distance_factor = links.distance_factor;
    let mut toll_factor = links.toll_factor;

    let mut lines = reader.lines().enumerate();

    // ── Metadata header ───────────────────────────────────────────────────
    loop {
        let (n, raw) = next_line(&mut lines, FILE, "metadata")?;
        let Some((tag, value)) = metadata_line(&raw, FILE, n)? else {
            continue;
        };
        match tag.as_str() {
            "NUMBER OF ZONES" => {
                let zones: usize = int_field(&value, FILE, n)?;
                if zones != links.num_zones {
                    return Err(TntpError::ZoneMismatch {
                        links: links.num_zones,
                        trips: zones,
                    });
                }
            }
            // Recognized but unused: the demand matrix is the ground truth.
            "TOTAL OD FLOW" => {}
            "DISTANCE FACTOR" => distance_factor = num_field(&value, FILE, n)?,
            "TOLL FACTOR" => toll_factor = num_field(&value, FILE, n)?,
            "END OF METADATA" => break,
            other => warnings.push(format!(
                "ignoring unknown metadata tag <{other}> in the trips file"
            )),
        }
    }

    // ── Demand blocks ─────────────────────────────────────────────────────
    let mut demand = Vec::new();
    let mut origin: Option<NodeId> = None;

    for (i, raw) in lines {
        let n = i + 1;
        let raw = raw?;
        let Some(data) = data_line(&raw) else { continue };

        if let Some(rest) = data.strip_prefix("Origin") {
            let zone: usize = int_field(rest.trim(), FILE, n)?;
            if zone < 1 || zone > links.num_zones {
                return Err(TntpError::Parse {
                    file:    FILE,
                    line:    n,
                    message: format!("origin {zone} out of range 1..={}", links.num_zones),
                });
            }
            origin = Some(NodeId((zone - 1) as u32));
            continue;
        }

        let Some(origin) = origin else {
            return Err(TntpError::Parse {
                file:    FILE,
                line:    n,
                message: "demand entry before any Origin header".to_string(),
            });
        };
        for pair in data.split(';') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let Some((dest, value)) = pair.split_once(':') else {
                return Err(TntpError::Parse {
                    file:    FILE,
                    line:    n,
                    message: format!("expected `destination : demand`, found {pair:?}"),
                });
            };
            let dest: usize = int_field(dest.trim(), FILE, n)?;
            let value: f64 = num_field(value.trim(), FILE, n)?;
            if dest < 1 || dest > links.num_zones {
                return Err(TntpError::Parse {
                    file:    FILE,
                    line:    n,
                    message: format!("destination {dest} out of range 1..={}", links.num_zones),
                });
            }
            if value < 0.0 {
                return Err(TntpError::Parse {
                    file:    FILE,
                    line:    n,
                    message: format!("negative demand {value} from origin {origin}"),
                });
            }
            demand.push((origin, NodeId((dest - 1) as u32), value));
        }
    }

    Ok(TripData {
        distance_factor,
        toll_factor,
        demand,
    })
}

// ── Line helpers ──────────────────────────────────────────────────────────────

type NumberedLines<R> = std::iter::Enumerate<std::io::Lines<R>>;

/// Pull the next raw line (1-based numbering), failing on EOF with a message
/// naming the section that was cut short.
fn next_line<R: BufRead>(
    lines: &mut NumberedLines<R>,
    file: FileKind,
    section: &str,
) -> TntpResult<(usize, String)> {
    match lines.next() {
        Some((i, line)) => Ok((i + 1, line?)),
        None => Err(TntpError::Parse {
            file,
            line:    0,
            message: format!("file ended before {section} complete"),
        }),
    }
}

/// Classify a header line: `None` for blanks and comments, `Some((TAG,
/// value))` for a metadata entry.  The tag is uppercased; an unclosed tag is
/// fatal.
fn metadata_line(raw: &str, file: FileKind, line: usize) -> TntpResult<Option<(String, String)>> {
    let Some(open) = raw.find(['<', '~']) else {
        return Ok(None);
    };
    if raw.as_bytes()[open] == b'~' {
        return Ok(None);
    }
    let rest = &raw[open + 1..];
    let Some(close) = rest.find('>') else {
        return Err(TntpError::Parse {
            file,
            line,
            message: format!("metadata tag not closed: {raw:?}"),
        });
    };
    let tag = rest[..close].to_uppercase();
    let mut value = &rest[close + 1..];
    if let Some(tilde) = value.find('~') {
        value = &value[..tilde];
    }
    Ok(Some((tag, value.trim().to_string())))
}

/// Trim a body line; `None` for blanks and comments.
fn data_line(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('~') {
        None
    } else {
        Some(trimmed)
    }
}

fn int_field<T: std::str::FromStr>(s: &str, file: FileKind, line: usize) -> TntpResult<T> {
    s.trim().parse().map_err(|_| TntpError::Parse {
        file,
        line,
        message: format!("expected an integer, found {s:?}"),
    })
}

fn num_field(s: &str, file: FileKind, line: usize) -> TntpResult<f64> {
    s.trim().parse().map_err(|_| TntpError::Parse {
        file,
        line,
        message: format!("expected a number, found {s:?}"),
    })
}
