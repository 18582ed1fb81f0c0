//! Delivery progress snapshot.

use chrono::{DateTime, Utc};
use common::{UnLocode, VoyageNumber};
use serde::Serialize;

use super::{
    HandlingSummary, HandlingType, Itinerary, RouteSpecification, RoutingStatus, TransportStatus,
};

/// Where a cargo is and whether it is on plan, as of `calculated_at`.
///
/// A delivery is never edited; every recomputation produces a whole new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    transport_status: TransportStatus,
    routing_status: RoutingStatus,
    last_known_location: Option<UnLocode>,
    current_voyage: Option<VoyageNumber>,
    unloaded_at_destination: bool,
    last_handled_at: Option<DateTime<Utc>>,
    calculated_at: DateTime<Utc>,
}

impl Delivery {
    /// Delivery of a freshly booked cargo.
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            transport_status: TransportStatus::NotReceived,
            routing_status: RoutingStatus::NotRouted,
            last_known_location: None,
            current_voyage: None,
            unloaded_at_destination: false,
            last_handled_at: None,
            calculated_at: now,
        }
    }

    /// Derives a new delivery from the latest handling summary.
    ///
    /// Summaries completed at or before the last one `previous` applied are
    /// skipped, so a redelivered or late event never rolls progress back.
    /// Among the rest, only the latest decides status; earlier ones are
    /// consulted solely for the unloaded-at-destination flag when the latest
    /// event is not a movement. Returns `None` if nothing is left to apply.
    pub fn derive(
        spec: &RouteSpecification,
        itinerary: Option<&Itinerary>,
        previous: &Delivery,
        summaries: &[HandlingSummary],
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let fresh: Vec<&HandlingSummary> = summaries
            .iter()
            .filter(|s| previous.last_handled_at.is_none_or(|at| s.completed_at > at))
            .collect();
        let (latest, earlier) = fresh.split_last()?;

        let transport_status = match latest.handling_type {
            HandlingType::Receive | HandlingType::Unload => TransportStatus::InPort,
            HandlingType::Load => TransportStatus::OnboardCarrier,
            HandlingType::Claim => TransportStatus::Claimed,
            HandlingType::Customs => TransportStatus::Unknown,
        };

        let routing_status = match itinerary {
            None => RoutingStatus::NotRouted,
            Some(itinerary) if on_plan(itinerary, latest) => RoutingStatus::Routed,
            Some(_) => RoutingStatus::Misdirected,
        };

        // The most recent movement decides the flag; LOAD clears it.
        let unloaded_at_destination = std::iter::once(latest)
            .chain(earlier.iter().rev())
            .find(|s| matches!(s.handling_type, HandlingType::Load | HandlingType::Unload))
            .map_or(previous.unloaded_at_destination, |s| {
                s.handling_type == HandlingType::Unload && s.location == *spec.destination()
            });

        let current_voyage = match transport_status {
            TransportStatus::OnboardCarrier => latest.voyage_number.clone(),
            _ => None,
        };

        let last_handled_at = fresh.iter().map(|s| s.completed_at).max();

        Some(Self {
            transport_status,
            routing_status,
            last_known_location: Some(latest.location.clone()),
            current_voyage,
            unloaded_at_destination,
            last_handled_at,
            calculated_at: now,
        })
    }

    /// Returns a copy with a different routing status, recalculated at `now`.
    pub(crate) fn rerouted(&self, routing_status: RoutingStatus, now: DateTime<Utc>) -> Self {
        Self {
            routing_status,
            calculated_at: now,
            ..self.clone()
        }
    }

    /// Returns true if both snapshots describe the same state, ignoring when
    /// they were calculated.
    pub fn same_state_as(&self, other: &Delivery) -> bool {
        self.transport_status == other.transport_status
            && self.routing_status == other.routing_status
            && self.last_known_location == other.last_known_location
            && self.current_voyage == other.current_voyage
            && self.unloaded_at_destination == other.unloaded_at_destination
            && self.last_handled_at == other.last_handled_at
    }

    pub fn transport_status(&self) -> TransportStatus {
        self.transport_status
    }

    pub fn routing_status(&self) -> RoutingStatus {
        self.routing_status
    }

    pub fn last_known_location(&self) -> Option<&UnLocode> {
        self.last_known_location.as_ref()
    }

    pub fn current_voyage(&self) -> Option<&VoyageNumber> {
        self.current_voyage.as_ref()
    }

    pub fn is_unloaded_at_destination(&self) -> bool {
        self.unloaded_at_destination
    }

    /// Completion time of the newest handling summary applied so far.
    pub fn last_handled_at(&self) -> Option<DateTime<Utc>> {
        self.last_handled_at
    }

    pub fn calculated_at(&self) -> DateTime<Utc> {
        self.calculated_at
    }

    /// Claimed after being unloaded at the destination.
    pub fn is_delivered(&self) -> bool {
        self.transport_status == TransportStatus::Claimed && self.unloaded_at_destination
    }

    pub fn is_misdirected(&self) -> bool {
        self.routing_status == RoutingStatus::Misdirected
    }
}

/// LOAD and UNLOAD must match a leg's location and voyage. Events that carry no
/// voyage are on plan wherever the itinerary calls.
fn on_plan(itinerary: &Itinerary, summary: &HandlingSummary) -> bool {
    match (summary.handling_type, &summary.voyage_number) {
        (HandlingType::Load, Some(voyage)) => itinerary.plans_load(&summary.location, voyage),
        (HandlingType::Unload, Some(voyage)) => itinerary.plans_unload(&summary.location, voyage),
        (HandlingType::Load | HandlingType::Unload, None) => false,
        (HandlingType::Receive, _) => itinerary.first_leg().load_location() == &summary.location,
        (HandlingType::Claim, _) => itinerary.last_leg().unload_location() == &summary.location,
        (HandlingType::Customs, _) => itinerary.calls_at(&summary.location),
    }
}
