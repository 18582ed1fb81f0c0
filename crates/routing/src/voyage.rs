//! Voyages and their schedules.
//!
//! All invariants are checked at construction. Once built, a voyage is never
//! modified, so a search can treat the voyage set as a frozen snapshot.

use chrono::{DateTime, Utc};
use common::{UnLocode, VoyageNumber};
use serde::Serialize;

use crate::{RoutingError, TransitEdge};

/// One scheduled hop of a voyage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarrierMovement {
    departure_location: UnLocode,
    arrival_location: UnLocode,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
}

impl CarrierMovement {
    /// Creates a carrier movement.
    ///
    /// Fails if both locations are equal or if the arrival is not strictly
    /// after the departure.
    pub fn new(
        departure_location: UnLocode,
        arrival_location: UnLocode,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
    ) -> Result<Self, RoutingError> {
        if departure_location == arrival_location {
            return Err(RoutingError::SameLocation {
                location: departure_location,
            });
        }
        if arrival_time <= departure_time {
            return Err(RoutingError::ArrivalNotAfterDeparture {
                departure: departure_time,
                arrival: arrival_time,
            });
        }
        Ok(Self {
            departure_location,
            arrival_location,
            departure_time,
            arrival_time,
        })
    }

    /// Returns where the movement starts.
    pub fn departure_location(&self) -> &UnLocode {
        &self.departure_location
    }

    /// Returns where the movement ends.
    pub fn arrival_location(&self) -> &UnLocode {
        &self.arrival_location
    }

    /// Returns when the movement starts.
    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure_time
    }

    /// Returns when the movement ends.
    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.arrival_time
    }
}

/// Ordered, connected sequence of carrier movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    movements: Vec<CarrierMovement>,
}

impl Schedule {
    /// Creates a schedule.
    ///
    /// Each movement must depart from the previous movement's arrival location,
    /// strictly after the previous arrival time.
    pub fn new(movements: Vec<CarrierMovement>) -> Result<Self, RoutingError> {
        if movements.is_empty() {
            return Err(RoutingError::EmptySchedule);
        }

        for (index, pair) in movements.windows(2).enumerate() {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.departure_location != previous.arrival_location {
                return Err(RoutingError::DisconnectedSchedule {
                    index: index + 1,
                    expected: previous.arrival_location.clone(),
                    found: next.departure_location.clone(),
                });
            }
            if next.departure_time <= previous.arrival_time {
                return Err(RoutingError::NoTransshipmentTime {
                    index: index + 1,
                    previous_arrival: previous.arrival_time,
                    departure: next.departure_time,
                });
            }
        }

        Ok(Self { movements })
    }

    /// Returns the movements in order.
    pub fn movements(&self) -> &[CarrierMovement] {
        &self.movements
    }

    /// Returns the first movement. A schedule is never empty.
    pub fn first(&self) -> &CarrierMovement {
        &self.movements[0]
    }

    /// Returns the last movement. A schedule is never empty.
    pub fn last(&self) -> &CarrierMovement {
        &self.movements[self.movements.len() - 1]
    }
}

/// A voyage: identity plus exactly one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voyage {
    number: VoyageNumber,
    schedule: Schedule,
}

impl Voyage {
    /// Creates a voyage from an already validated schedule.
    pub fn new(number: VoyageNumber, schedule: Schedule) -> Self {
        Self { number, schedule }
    }

    /// Starts building a voyage that leaves from `departure_location`.
    pub fn builder(number: VoyageNumber, departure_location: UnLocode) -> VoyageBuilder {
        VoyageBuilder {
            number,
            next_departure_location: departure_location,
            movements: Vec::new(),
            error: None,
        }
    }

    /// Returns the voyage number.
    pub fn number(&self) -> &VoyageNumber {
        &self.number
    }

    /// Returns the schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns every movement as a search hop tagged with this voyage's number.
    pub fn transit_edges(&self) -> impl Iterator<Item = TransitEdge> + '_ {
        self.schedule
            .movements()
            .iter()
            .map(|movement| TransitEdge {
                voyage_number: self.number.clone(),
                from: movement.departure_location.clone(),
                to: movement.arrival_location.clone(),
                departure: movement.departure_time,
                arrival: movement.arrival_time,
            })
    }
}

/// Builds a voyage movement by movement, chaining locations.
#[derive(Debug)]
pub struct VoyageBuilder {
    number: VoyageNumber,
    next_departure_location: UnLocode,
    movements: Vec<CarrierMovement>,
    error: Option<RoutingError>,
}

impl VoyageBuilder {
    /// Appends a movement from the current location to `arrival_location`.
    ///
    /// The first invalid movement is remembered and reported by [`build`](Self::build).
    pub fn add_movement(
        mut self,
        arrival_location: UnLocode,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        match CarrierMovement::new(
            self.next_departure_location.clone(),
            arrival_location.clone(),
            departure_time,
            arrival_time,
        ) {
            Ok(movement) => {
                self.movements.push(movement);
                self.next_departure_location = arrival_location;
            }
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Validates the schedule and builds the voyage.
    pub fn build(self) -> Result<Voyage, RoutingError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let schedule = Schedule::new(self.movements)?;
        Ok(Voyage::new(self.number, schedule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn loc(code: &str) -> UnLocode {
        UnLocode::new(code).unwrap()
    }

    fn t(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
    }

    #[test]
    fn carrier_movement_rejects_same_location() {
        let result = CarrierMovement::new(loc("USNYC"), loc("USNYC"), t(0), t(1));
        assert!(matches!(result, Err(RoutingError::SameLocation { .. })));
    }

    #[test]
    fn carrier_movement_rejects_zero_duration() {
        let result = CarrierMovement::new(loc("USNYC"), loc("DEHAM"), t(1), t(1));
        assert!(matches!(
            result,
            Err(RoutingError::ArrivalNotAfterDeparture { .. })
        ));
    }

    #[test]
    fn schedule_rejects_empty() {
        assert_eq!(Schedule::new(vec![]), Err(RoutingError::EmptySchedule));
    }

    #[test]
    fn schedule_rejects_gap_in_locations() {
        let movements = vec![
            CarrierMovement::new(loc("USNYC"), loc("NLRTM"), t(0), t(10)).unwrap(),
            CarrierMovement::new(loc("DEHAM"), loc("SESTO"), t(12), t(20)).unwrap(),
        ];
        let result = Schedule::new(movements);
        assert!(matches!(
            result,
            Err(RoutingError::DisconnectedSchedule { index: 1, .. })
        ));
    }

    #[test]
    fn schedule_rejects_zero_transshipment_time() {
        let movements = vec![
            CarrierMovement::new(loc("USNYC"), loc("NLRTM"), t(0), t(10)).unwrap(),
            CarrierMovement::new(loc("NLRTM"), loc("DEHAM"), t(10), t(20)).unwrap(),
        ];
        let result = Schedule::new(movements);
        assert!(matches!(
            result,
            Err(RoutingError::NoTransshipmentTime { index: 1, .. })
        ));
    }

    #[test]
    fn builder_chains_locations() {
        let voyage = Voyage::builder(VoyageNumber::new("V100").unwrap(), loc("USNYC"))
            .add_movement(loc("NLRTM"), t(0), t(100))
            .add_movement(loc("DEHAM"), t(110), t(130))
            .build()
            .unwrap();

        assert_eq!(voyage.schedule().movements().len(), 2);
        assert_eq!(voyage.schedule().first().departure_location(), &loc("USNYC"));
        assert_eq!(voyage.schedule().last().arrival_location(), &loc("DEHAM"));

        let edges: Vec<_> = voyage.transit_edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].voyage_number.as_str(), "V100");
        assert_eq!(edges[1].from, loc("NLRTM"));
    }

    #[test]
    fn builder_reports_first_invalid_movement() {
        let result = Voyage::builder(VoyageNumber::new("V100").unwrap(), loc("USNYC"))
            .add_movement(loc("USNYC"), t(0), t(10))
            .add_movement(loc("DEHAM"), t(5), t(1))
            .build();
        assert!(matches!(result, Err(RoutingError::SameLocation { .. })));
    }

    #[test]
    fn builder_rejects_overlapping_movements() {
        let result = Voyage::builder(VoyageNumber::new("V100").unwrap(), loc("USNYC"))
            .add_movement(loc("NLRTM"), t(0), t(10))
            .add_movement(loc("DEHAM"), t(9), t(20))
            .build();
        assert!(matches!(
            result,
            Err(RoutingError::NoTransshipmentTime { .. })
        ));
    }
}
