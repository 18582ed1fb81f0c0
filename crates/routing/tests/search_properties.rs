//! Property tests for the itinerary search over randomly generated networks.

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{UnLocode, VoyageNumber};
use proptest::prelude::*;
use routing::{RouteSpecification, ScheduleGraph, SearchConfig, TransitEdge, Voyage};

const CODES: [&str; 5] = ["USNYC", "NLRTM", "DEHAM", "CNSHA", "SESTO"];

fn loc(index: usize) -> UnLocode {
    UnLocode::new(CODES[index]).unwrap()
}

fn t(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

/// A single-hop voyage: (from, to, departure hour, duration hours).
type Hop = (usize, usize, i64, i64);

fn hop_strategy() -> impl Strategy<Value = Hop> {
    (0..CODES.len(), 1..CODES.len(), 0i64..100, 1i64..30)
        .prop_map(|(from, offset, dep, dur)| (from, (from + offset) % CODES.len(), dep, dur))
}

fn network_strategy() -> impl Strategy<Value = Vec<Hop>> {
    prop::collection::vec(hop_strategy(), 0..14)
}

fn build_voyages(hops: &[Hop]) -> Vec<Voyage> {
    hops.iter()
        .enumerate()
        .map(|(i, (from, to, dep, dur))| {
            Voyage::builder(VoyageNumber::new(format!("V{i:03}")).unwrap(), loc(*from))
                .add_movement(loc(*to), t(*dep), t(dep + dur))
                .build()
                .unwrap()
        })
        .collect()
}

/// Counts satisfying simple paths by exhaustive enumeration.
fn reference_count(
    edges: &[TransitEdge],
    at: &UnLocode,
    ready_after: Option<DateTime<Utc>>,
    spec: &RouteSpecification,
    visited: &mut Vec<UnLocode>,
    remaining: usize,
) -> usize {
    if remaining == 0 {
        return 0;
    }
    let mut count = 0;
    for edge in edges {
        if &edge.from != at
            || ready_after.is_some_and(|r| edge.departure <= r)
            || edge.arrival > spec.arrival_deadline()
            || visited.contains(&edge.to)
        {
            continue;
        }
        if &edge.to == spec.destination() {
            count += 1;
        } else {
            visited.push(edge.to.clone());
            count += reference_count(
                edges,
                &edge.to,
                Some(edge.arrival),
                spec,
                visited,
                remaining - 1,
            );
            visited.pop();
        }
    }
    count
}

fn unbounded() -> SearchConfig {
    SearchConfig::new(None, usize::MAX, usize::MAX)
}

proptest! {
    #[test]
    fn every_path_is_feasible(
        hops in network_strategy(),
        origin in 0..CODES.len(),
        offset in 1..CODES.len(),
        deadline in 0i64..150,
    ) {
        let destination = (origin + offset) % CODES.len();
        let voyages = build_voyages(&hops);
        let graph = ScheduleGraph::from_voyages(&voyages);
        let spec = RouteSpecification::new(loc(origin), loc(destination), t(deadline)).unwrap();

        let outcome = graph.find_paths(&spec, &unbounded());

        for path in &outcome.paths {
            prop_assert!(!path.is_empty());
            prop_assert_eq!(path.origin(), spec.origin());
            prop_assert_eq!(path.destination(), spec.destination());
            prop_assert!(path.final_arrival() <= spec.arrival_deadline());

            let mut seen = vec![path.origin().clone()];
            for pair in path.edges().windows(2) {
                prop_assert_eq!(&pair[0].to, &pair[1].from);
                prop_assert!(pair[1].departure > pair[0].arrival);
            }
            for edge in path.edges() {
                prop_assert!(!seen.contains(&edge.to), "location revisited: {}", edge.to);
                seen.push(edge.to.clone());
            }
        }
    }

    #[test]
    fn results_are_ordered_by_arrival_then_legs(
        hops in network_strategy(),
        origin in 0..CODES.len(),
        offset in 1..CODES.len(),
    ) {
        let destination = (origin + offset) % CODES.len();
        let voyages = build_voyages(&hops);
        let graph = ScheduleGraph::from_voyages(&voyages);
        let spec = RouteSpecification::new(loc(origin), loc(destination), t(500)).unwrap();

        let outcome = graph.find_paths(&spec, &unbounded());

        for pair in outcome.paths.windows(2) {
            let a = (pair[0].final_arrival(), pair[0].len());
            let b = (pair[1].final_arrival(), pair[1].len());
            prop_assert!(a <= b, "not ordered: {:?} before {:?}", a, b);
        }
    }

    #[test]
    fn finds_exactly_the_satisfying_simple_paths(
        hops in network_strategy(),
        origin in 0..CODES.len(),
        offset in 1..CODES.len(),
        deadline in 0i64..150,
    ) {
        let destination = (origin + offset) % CODES.len();
        let voyages = build_voyages(&hops);
        let graph = ScheduleGraph::from_voyages(&voyages);
        let spec = RouteSpecification::new(loc(origin), loc(destination), t(deadline)).unwrap();

        let outcome = graph.find_paths(&spec, &unbounded());

        let edges: Vec<TransitEdge> = voyages.iter().flat_map(|v| v.transit_edges()).collect();
        let max_legs = unbounded().effective_max_legs(graph.location_count());
        let expected = reference_count(
            &edges,
            spec.origin(),
            None,
            &spec,
            &mut vec![spec.origin().clone()],
            max_legs,
        );

        prop_assert_eq!(outcome.candidates_found, expected);
        prop_assert_eq!(outcome.paths.len(), expected);
        prop_assert!(!outcome.truncated);
    }

    #[test]
    fn max_results_keeps_the_best_prefix(
        hops in network_strategy(),
        origin in 0..CODES.len(),
        offset in 1..CODES.len(),
        limit in 0usize..4,
    ) {
        let destination = (origin + offset) % CODES.len();
        let voyages = build_voyages(&hops);
        let graph = ScheduleGraph::from_voyages(&voyages);
        let spec = RouteSpecification::new(loc(origin), loc(destination), t(500)).unwrap();

        let all = graph.find_paths(&spec, &unbounded());
        let limited = graph.find_paths(&spec, &SearchConfig::new(None, limit, usize::MAX));

        prop_assert_eq!(limited.candidates_found, all.candidates_found);
        prop_assert!(limited.paths.len() <= limit);
        prop_assert_eq!(&limited.paths[..], &all.paths[..limited.paths.len()]);
    }

    #[test]
    fn max_legs_bounds_path_length(
        hops in network_strategy(),
        origin in 0..CODES.len(),
        offset in 1..CODES.len(),
        max_legs in 1usize..4,
    ) {
        let destination = (origin + offset) % CODES.len();
        let voyages = build_voyages(&hops);
        let graph = ScheduleGraph::from_voyages(&voyages);
        let spec = RouteSpecification::new(loc(origin), loc(destination), t(500)).unwrap();

        let outcome = graph.find_paths(
            &spec,
            &SearchConfig::new(Some(max_legs), usize::MAX, usize::MAX),
        );

        for path in &outcome.paths {
            prop_assert!(path.len() <= max_legs);
        }
    }
}
