//! Unit tests for tap-tntp: parsing from in-memory strings, writing through
//! temp files.

#[cfg(test)]
mod helpers {
    use crate::{load_network_readers, TntpLoad};

    pub const LINKS: &str = "\
<NUMBER OF ZONES> 2
<NUMBER OF NODES> 4
<NUMBER OF LINKS> 4
<FIRST THRU NODE> 3
<END OF METADATA>
~ tail head capacity length fftime alpha beta speed toll type
1 3 100 1 1 0.15 4 0 0 1 ;
3 2 100 1 1 0.15 4 0 0 1 ;

1 4 100 1 1 0.15 4 0 0 1 ;
~ a comment between rows
4 2 100 1 1 0.15 4 0 0 1 ;
";

    pub const TRIPS: &str = "\
<NUMBER OF ZONES> 2
<TOTAL OD FLOW> 80
<END OF METADATA>
Origin 1
  2 : 80.0;
Origin 2
";

    pub fn load(links: &str, trips: &str) -> crate::TntpResult<TntpLoad> {
        load_network_readers(links.as_bytes(), trips.as_bytes())
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use tap_core::NodeId;
    use tap_network::CostFn;

    use crate::{FileKind, TntpError};
    use super::helpers::{load, LINKS, TRIPS};

    #[test]
    fn loads_the_diamond() {
        let loaded = load(LINKS, TRIPS).unwrap();
        let net = &loaded.network;

        assert_eq!(net.num_nodes, 4);
        assert_eq!(net.num_arcs(), 4);
        assert_eq!(net.num_zones, 2);
        assert_eq!(net.first_through_node, 2);
        assert_eq!(net.demand(NodeId(0), NodeId(1)), 80.0);
        assert_eq!(net.demand(NodeId(1), NodeId(0)), 0.0);
        assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);

        // 1-based file ids became 0-based node ids.
        assert_eq!(net.arcs[0].tail, NodeId(0));
        assert_eq!(net.arcs[0].head, NodeId(2));
        assert_eq!(net.arcs[3].head, NodeId(1));
        // beta = 4 picked the quartic evaluator.
        assert!(net.arcs.iter().all(|a| a.cost_fn == CostFn::Quartic));
        assert!(net.arcs.iter().all(|a| a.flow == 0.0));
    }

    #[test]
    fn trips_factors_override_link_factors() {
        let links = LINKS.replace(
            "<END OF METADATA>",
            "<DISTANCE FACTOR> 2\n<TOLL FACTOR> 3\n<END OF METADATA>",
        );
        let trips = TRIPS.replace("<END OF METADATA>", "<TOLL FACTOR> 0.5\n<END OF METADATA>");
        let net = load(&links, &trips).unwrap().network;

        assert_eq!(net.distance_factor, 2.0);
        assert_eq!(net.toll_factor, 0.5);
        // fixed = 2 * length(1) + 0.5 * toll(0) = 2
        assert_eq!(net.arcs[0].fixed_cost, 2.0);
    }

    #[test]
    fn unknown_tags_warn_but_load() {
        let links = LINKS.replace("<END OF METADATA>", "<FRICTION> 9\n<END OF METADATA>");
        let loaded = load(&links, TRIPS).unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("FRICTION"));
    }

    #[test]
    fn missing_first_through_node_defaults_with_warning() {
        let links = LINKS.replace("<FIRST THRU NODE> 3\n", "");
        let loaded = load(&links, TRIPS).unwrap();
        assert_eq!(loaded.network.first_through_node, 0);
        assert!(loaded.warnings.iter().any(|w| w.contains("first through node")));
    }

    #[test]
    fn missing_zone_count_is_fatal() {
        let links = LINKS.replace("<NUMBER OF ZONES> 2\n", "");
        assert!(matches!(
            load(&links, TRIPS),
            Err(TntpError::MissingMetadata { file: FileKind::Links, tag: "NUMBER OF ZONES" })
        ));
    }

    #[test]
    fn zone_count_mismatch_is_fatal() {
        let trips = TRIPS.replace("<NUMBER OF ZONES> 2", "<NUMBER OF ZONES> 3");
        assert!(matches!(
            load(LINKS, &trips),
            Err(TntpError::ZoneMismatch { links: 2, trips: 3 })
        ));
    }

    #[test]
    fn short_link_row_is_fatal() {
        // Nine fields on the first data row.
        let links = LINKS.replace("1 3 100 1 1 0.15 4 0 0 1 ;", "1 3 100 1 1 0.15 4 0 0 ;");
        assert!(matches!(
            load(&links, TRIPS),
            Err(TntpError::Parse { file: FileKind::Links, .. })
        ));
    }

    #[test]
    fn out_of_range_endpoint_is_fatal() {
        let links = LINKS.replace("4 2 100", "9 2 100");
        assert!(matches!(
            load(&links, TRIPS),
            Err(TntpError::Parse { file: FileKind::Links, .. })
        ));
    }

    #[test]
    fn truncated_link_section_is_fatal() {
        let links = LINKS.replace("4 2 100 1 1 0.15 4 0 0 1 ;\n", "");
        assert!(matches!(
            load(&links, TRIPS),
            Err(TntpError::Parse { file: FileKind::Links, .. })
        ));
    }

    #[test]
    fn negative_length_warns_but_loads() {
        let links = LINKS.replace("3 2 100 1 1", "3 2 100 -1 1");
        let loaded = load(&links, TRIPS).unwrap();
        assert!(loaded.warnings.iter().any(|w| w.contains("negative length")));
        assert_eq!(loaded.network.arcs[1].length, -1.0);
    }

    #[test]
    fn negative_demand_is_fatal() {
        let trips = TRIPS.replace("2 : 80.0;", "2 : -5.0;");
        assert!(matches!(
            load(LINKS, &trips),
            Err(TntpError::Parse { file: FileKind::Trips, .. })
        ));
    }

    #[test]
    fn demand_before_origin_header_is_fatal() {
        let trips = "\
<NUMBER OF ZONES> 2
<END OF METADATA>
2 : 80.0;
";
        assert!(matches!(
            load(LINKS, trips),
            Err(TntpError::Parse { file: FileKind::Trips, .. })
        ));
    }

    #[test]
    fn unclosed_metadata_tag_is_fatal() {
        let links = LINKS.replace("<NUMBER OF NODES> 4", "<NUMBER OF NODES 4");
        assert!(matches!(
            load(&links, TRIPS),
            Err(TntpError::Parse { file: FileKind::Links, .. })
        ));
    }

    #[test]
    fn multiple_pairs_on_one_line() {
        let links = LINKS.replace("<NUMBER OF ZONES> 2", "<NUMBER OF ZONES> 4");
        // Zones 1..=4 exist but only zones 1 and 2 get demand rows; zone ids
        // up to 4 are still valid destinations.
        let trips = "\
<NUMBER OF ZONES> 4
<END OF METADATA>
Origin 1
  2 : 10.0;  3 : 20.0;  4 : 30.0;
";
        let net = load(&links, trips).unwrap().network;
        assert_eq!(net.demand(NodeId(0), NodeId(1)), 10.0);
        assert_eq!(net.demand(NodeId(0), NodeId(2)), 20.0);
        assert_eq!(net.demand(NodeId(0), NodeId(3)), 30.0);
        assert_eq!(net.total_demand(), 60.0);
    }
}

// ── Writer ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod writer {
    use crate::{write_flows, write_flows_path};
    use super::helpers::{load, LINKS, TRIPS};

    #[test]
    fn header_and_one_row_per_arc() {
        let mut net = load(LINKS, TRIPS).unwrap().network;
        net.arcs[0].flow = 12.5;

        let mut out = Vec::new();
        write_flows(&net, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + net.num_arcs());
        assert_eq!(lines[0], "arc,tail,head,flow,cost");
        // Node ids go back out 1-based.
        assert!(lines[1].starts_with("0,1,3,12.5,"));
    }

    #[test]
    fn round_trips_through_a_file() {
        let net = load(LINKS, TRIPS).unwrap().network;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flows.csv");

        write_flows_path(&net, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1 + net.num_arcs());
    }
}
