//! Itinerary search over the time-expanded schedule graph.
//!
//! The search is a depth-first enumeration of simple paths starting at the
//! origin. A hop may follow the previous one only if it departs from the
//! previous arrival location strictly after the previous arrival time. Hops
//! arriving after the deadline are pruned immediately: times only increase
//! along a path, so nothing beyond them can meet the deadline either.
//!
//! Termination is guaranteed by three bounds: no location is visited twice on
//! one path, the path length is capped by [`SearchConfig::effective_max_legs`],
//! and the total number of tried hops is capped by `max_expansions`.
//!
//! States `(location, ready time, remaining legs)` that were fully explored
//! without reaching the destination, and whose outcome did not depend on the
//! locations already on the path, are remembered and skipped when reached
//! again through a different prefix.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use common::UnLocode;

use crate::{RouteSpecification, SearchConfig, TransitEdge, TransitPath, Voyage};

/// Result of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Paths satisfying the route specification, ordered and truncated to
    /// `max_results`.
    pub paths: Vec<TransitPath>,

    /// How many satisfying paths were found before truncation.
    pub candidates_found: usize,

    /// How many hops were tried.
    pub expansions: usize,

    /// True if the expansion budget ran out before the search finished.
    pub truncated: bool,
}

/// Frozen snapshot of every scheduled hop, indexed by departure location.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGraph {
    departures: HashMap<UnLocode, Vec<TransitEdge>>,
    location_count: usize,
    edge_count: usize,
}

impl ScheduleGraph {
    /// Builds the graph from a set of voyages.
    pub fn from_voyages<'a>(voyages: impl IntoIterator<Item = &'a Voyage>) -> Self {
        let mut departures: HashMap<UnLocode, Vec<TransitEdge>> = HashMap::new();
        let mut locations = HashSet::new();
        let mut edge_count = 0;

        for voyage in voyages {
            for edge in voyage.transit_edges() {
                locations.insert(edge.from.clone());
                locations.insert(edge.to.clone());
                departures.entry(edge.from.clone()).or_default().push(edge);
                edge_count += 1;
            }
        }

        // Departure order lets `departures_after` binary-search; the remaining
        // keys only make iteration order deterministic.
        for edges in departures.values_mut() {
            edges.sort_by(|a, b| {
                a.departure
                    .cmp(&b.departure)
                    .then(a.arrival.cmp(&b.arrival))
                    .then_with(|| a.voyage_number.cmp(&b.voyage_number))
                    .then_with(|| a.to.cmp(&b.to))
            });
        }

        Self {
            departures,
            location_count: locations.len(),
            edge_count,
        }
    }

    /// Returns the number of distinct locations touched by any hop.
    pub fn location_count(&self) -> usize {
        self.location_count
    }

    /// Returns the total number of hops.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the graph has no hops.
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Returns the hops leaving `location` strictly after `after`, in
    /// departure order. With `None`, returns every hop leaving `location`.
    pub fn departures_after(
        &self,
        location: &UnLocode,
        after: Option<DateTime<Utc>>,
    ) -> &[TransitEdge] {
        let edges = self.departures.get(location).map_or(&[][..], Vec::as_slice);
        match after {
            None => edges,
            Some(t) => {
                let start = edges.partition_point(|e| e.departure <= t);
                &edges[start..]
            }
        }
    }

    /// Finds every path satisfying `spec` within the configured bounds.
    ///
    /// Paths are ordered by final arrival, then number of legs, then voyage
    /// numbers, then departure time. An empty result means no route exists.
    pub fn find_paths(&self, spec: &RouteSpecification, config: &SearchConfig) -> SearchOutcome {
        let max_legs = config.effective_max_legs(self.location_count);
        if max_legs == 0 || self.is_empty() {
            return SearchOutcome {
                paths: Vec::new(),
                candidates_found: 0,
                expansions: 0,
                truncated: false,
            };
        }

        let mut search = Search {
            graph: self,
            destination: spec.destination(),
            deadline: spec.arrival_deadline(),
            max_legs,
            max_expansions: config.max_expansions,
            expansions: 0,
            truncated: false,
            path: Vec::with_capacity(max_legs),
            visited: HashSet::from([spec.origin().clone()]),
            dead_ends: HashSet::new(),
            found: Vec::new(),
        };
        search.explore(spec.origin(), None);

        let Search {
            mut found,
            expansions,
            truncated,
            ..
        } = search;

        found.sort_by(|a, b| {
            a.final_arrival()
                .cmp(&b.final_arrival())
                .then(a.len().cmp(&b.len()))
                .then_with(|| a.voyage_numbers().cmp(b.voyage_numbers()))
                .then_with(|| a.departure().cmp(&b.departure()))
        });
        let candidates_found = found.len();
        found.truncate(config.max_results);

        SearchOutcome {
            paths: found,
            candidates_found,
            expansions,
            truncated,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Exploration {
    reached_destination: bool,
    depended_on_path: bool,
}

struct Search<'g> {
    graph: &'g ScheduleGraph,
    destination: &'g UnLocode,
    deadline: DateTime<Utc>,
    max_legs: usize,
    max_expansions: usize,
    expansions: usize,
    truncated: bool,
    path: Vec<&'g TransitEdge>,
    visited: HashSet<UnLocode>,
    dead_ends: HashSet<(UnLocode, Option<DateTime<Utc>>, usize)>,
    found: Vec<TransitPath>,
}

impl<'g> Search<'g> {
    fn explore(&mut self, at: &UnLocode, ready_after: Option<DateTime<Utc>>) -> Exploration {
        let remaining = self.max_legs - self.path.len();
        let key = (at.clone(), ready_after, remaining);
        if self.dead_ends.contains(&key) {
            return Exploration::default();
        }

        let graph = self.graph;
        let mut outcome = Exploration::default();

        for edge in graph.departures_after(at, ready_after) {
            if edge.arrival > self.deadline {
                continue;
            }
            if self.visited.contains(&edge.to) {
                outcome.depended_on_path = true;
                continue;
            }
            if self.expansions >= self.max_expansions {
                self.truncated = true;
                outcome.depended_on_path = true;
                break;
            }
            self.expansions += 1;

            self.path.push(edge);
            if edge.to == *self.destination {
                let edges = self.path.iter().map(|e| (*e).clone()).collect();
                self.found.push(TransitPath::new(edges));
                outcome.reached_destination = true;
            } else if self.path.len() < self.max_legs {
                self.visited.insert(edge.to.clone());
                let child = self.explore(&edge.to, Some(edge.arrival));
                self.visited.remove(&edge.to);
                outcome.reached_destination |= child.reached_destination;
                outcome.depended_on_path |= child.depended_on_path;
            }
            self.path.pop();
        }

        if !outcome.reached_destination && !outcome.depended_on_path {
            self.dead_ends.insert(key);
        }
        outcome
    }
}
