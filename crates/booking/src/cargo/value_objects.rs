//! Value objects for cargo routing.

use chrono::{DateTime, Utc};
use common::{UnLocode, VoyageNumber};
use serde::Serialize;

use super::CargoError;

/// What the customer asked for: where from, where to, and by when.
///
/// Immutable once the cargo is booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSpecification {
    origin: UnLocode,
    destination: UnLocode,
    arrival_deadline: DateTime<Utc>,
}

impl RouteSpecification {
    /// Creates a route specification.
    ///
    /// Origin and destination must differ and the deadline must be after `now`.
    pub fn new(
        origin: UnLocode,
        destination: UnLocode,
        arrival_deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, CargoError> {
        if origin == destination {
            return Err(CargoError::SameOriginAndDestination { location: origin });
        }
        if arrival_deadline <= now {
            return Err(CargoError::DeadlineNotInFuture {
                deadline: arrival_deadline,
            });
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

/// One booked segment of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    voyage_number: VoyageNumber,
    load_location: UnLocode,
    unload_location: UnLocode,
    load_time: DateTime<Utc>,
    unload_time: DateTime<Utc>,
}

impl Leg {
    /// Creates a leg, checking that it moves and takes time.
    pub fn new(
        voyage_number: VoyageNumber,
        load_location: UnLocode,
        unload_location: UnLocode,
        load_time: DateTime<Utc>,
        unload_time: DateTime<Utc>,
    ) -> Result<Self, CargoError> {
        if load_location == unload_location {
            return Err(CargoError::LegSameLocation {
                location: load_location,
            });
        }
        if unload_time <= load_time {
            return Err(CargoError::LegUnloadNotAfterLoad {
                load_time,
                unload_time,
            });
        }
        Ok(Self {
            voyage_number,
            load_location,
            unload_location,
            load_time,
            unload_time,
        })
    }

    pub fn voyage_number(&self) -> &VoyageNumber {
        &self.voyage_number
    }

    pub fn load_location(&self) -> &UnLocode {
        &self.load_location
    }

    pub fn unload_location(&self) -> &UnLocode {
        &self.unload_location
    }

    pub fn load_time(&self) -> DateTime<Utc> {
        self.load_time
    }

    pub fn unload_time(&self) -> DateTime<Utc> {
        self.unload_time
    }
}

/// An ordered, connected, non-empty sequence of legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    legs: Vec<Leg>,
}

impl Itinerary {
    /// Creates an itinerary.
    ///
    /// Each leg must load where the previous one unloaded, strictly after it
    /// unloaded.
    pub fn new(legs: Vec<Leg>) -> Result<Self, CargoError> {
        if legs.is_empty() {
            return Err(CargoError::EmptyItinerary);
        }
        for (index, pair) in legs.windows(2).enumerate() {
            let (previous, next) = (&pair[0], &pair[1]);
            if previous.unload_location != next.load_location {
                return Err(CargoError::DisconnectedLegs {
                    index: index + 1,
                    expected: previous.unload_location.clone(),
                    found: next.load_location.clone(),
                });
            }
            if next.load_time <= previous.unload_time {
                return Err(CargoError::NoTransshipmentTime {
                    index: index + 1,
                    previous_unload: previous.unload_time,
                    load_time: next.load_time,
                });
            }
        }
        Ok(Self { legs })
    }

    /// Returns the legs in travel order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Returns the first leg.
    pub fn first_leg(&self) -> &Leg {
        &self.legs[0]
    }

    /// Returns the last leg.
    pub fn last_leg(&self) -> &Leg {
        &self.legs[self.legs.len() - 1]
    }

    /// Returns when the cargo first departs.
    pub fn first_departure(&self) -> DateTime<Utc> {
        self.first_leg().load_time
    }

    /// Returns when the cargo finally arrives.
    pub fn final_arrival(&self) -> DateTime<Utc> {
        self.last_leg().unload_time
    }

    /// Returns true if this itinerary starts at the route specification's origin,
    /// ends at its destination and arrives no later than its deadline.
    pub fn satisfies(&self, spec: &RouteSpecification) -> bool {
        self.first_leg().load_location == spec.origin
            && self.last_leg().unload_location == spec.destination
            && self.final_arrival() <= spec.arrival_deadline
    }

    /// Returns true if a LOAD at `location` onto `voyage` is planned.
    pub fn plans_load(&self, location: &UnLocode, voyage: &VoyageNumber) -> bool {
        self.legs
            .iter()
            .any(|leg| leg.load_location == *location && leg.voyage_number == *voyage)
    }

    /// Returns true if an UNLOAD at `location` from `voyage` is planned.
    pub fn plans_unload(&self, location: &UnLocode, voyage: &VoyageNumber) -> bool {
        self.legs
            .iter()
            .any(|leg| leg.unload_location == *location && leg.voyage_number == *voyage)
    }

    /// Returns true if the itinerary passes through `location` at all.
    pub fn calls_at(&self, location: &UnLocode) -> bool {
        self.legs
            .iter()
            .any(|leg| leg.load_location == *location || leg.unload_location == *location)
    }
}
