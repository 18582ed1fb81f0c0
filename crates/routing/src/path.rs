//! Search input and output records.
//!
//! These are the routing context's own vocabulary. Other contexts translate
//! to and from them at their boundary.

use chrono::{DateTime, Utc};
use common::{UnLocode, VoyageNumber};
use serde::Serialize;

use crate::RoutingError;

/// What a route must achieve: where from, where to, and by when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSpecification {
    origin: UnLocode,
    destination: UnLocode,
    arrival_deadline: DateTime<Utc>,
}

impl RouteSpecification {
    /// Creates a route specification. Origin and destination must differ.
    pub fn new(
        origin: UnLocode,
        destination: UnLocode,
        arrival_deadline: DateTime<Utc>,
    ) -> Result<Self, RoutingError> {
        if origin == destination {
            return Err(RoutingError::SameOriginAndDestination(origin));
        }
        Ok(Self {
            origin,
            destination,
            arrival_deadline,
        })
    }

    /// Returns the origin.
    pub fn origin(&self) -> &UnLocode {
        &self.origin
    }

    /// Returns the destination.
    pub fn destination(&self) -> &UnLocode {
        &self.destination
    }

    /// Returns the latest acceptable arrival.
    pub fn arrival_deadline(&self) -> DateTime<Utc> {
        self.arrival_deadline
    }
}

/// One scheduled hop as seen by the search, tagged with its voyage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TransitEdge {
    pub voyage_number: VoyageNumber,
    pub from: UnLocode,
    pub to: UnLocode,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

/// A connected chain of hops found by the search. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitPath {
    edges: Vec<TransitEdge>,
}

impl TransitPath {
    pub(crate) fn new(edges: Vec<TransitEdge>) -> Self {
        debug_assert!(!edges.is_empty());
        Self { edges }
    }

    /// Returns the hops in travel order.
    pub fn edges(&self) -> &[TransitEdge] {
        &self.edges
    }

    /// Consumes the path, returning its hops.
    pub fn into_edges(self) -> Vec<TransitEdge> {
        self.edges
    }

    /// Returns the number of hops.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the path has no hops.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns where the path starts.
    pub fn origin(&self) -> &UnLocode {
        &self.edges[0].from
    }

    /// Returns where the path ends.
    pub fn destination(&self) -> &UnLocode {
        &self.edges[self.edges.len() - 1].to
    }

    /// Returns when the path leaves its origin.
    pub fn departure(&self) -> DateTime<Utc> {
        self.edges[0].departure
    }

    /// Returns when the path reaches its destination.
    pub fn final_arrival(&self) -> DateTime<Utc> {
        self.edges[self.edges.len() - 1].arrival
    }

    /// Returns the voyage numbers in travel order.
    pub fn voyage_numbers(&self) -> impl Iterator<Item = &VoyageNumber> {
        self.edges.iter().map(|e| &e.voyage_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn loc(code: &str) -> UnLocode {
        UnLocode::new(code).unwrap()
    }

    #[test]
    fn specification_rejects_identical_endpoints() {
        let result = RouteSpecification::new(loc("USNYC"), loc("USNYC"), Utc::now());
        assert!(matches!(
            result,
            Err(RoutingError::SameOriginAndDestination(_))
        ));
    }

    #[test]
    fn path_accessors() {
        let t0 = Utc::now();
        let path = TransitPath::new(vec![
            TransitEdge {
                voyage_number: VoyageNumber::new("V1").unwrap(),
                from: loc("USNYC"),
                to: loc("NLRTM"),
                departure: t0,
                arrival: t0 + Duration::hours(5),
            },
            TransitEdge {
                voyage_number: VoyageNumber::new("V2").unwrap(),
                from: loc("NLRTM"),
                to: loc("DEHAM"),
                departure: t0 + Duration::hours(6),
                arrival: t0 + Duration::hours(9),
            },
        ]);

        assert_eq!(path.len(), 2);
        assert_eq!(path.origin(), &loc("USNYC"));
        assert_eq!(path.destination(), &loc("DEHAM"));
        assert_eq!(path.departure(), t0);
        assert_eq!(path.final_arrival(), t0 + Duration::hours(9));
        let voyages: Vec<_> = path.voyage_numbers().map(|v| v.as_str()).collect();
        assert_eq!(voyages, vec!["V1", "V2"]);
    }
}
