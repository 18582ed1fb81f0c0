//! Integration tests for the routing service.
//!
//! These tests register a small transatlantic network through the service
//! and query it the way the booking context does.

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::{ErrorKind, UnLocode, VoyageNumber};
use routing::{
    InMemoryLocationRepository, InMemoryVoyageRepository, Location, RouteSpecification,
    RoutingError, RoutingPort, RoutingService, SearchConfig, Voyage,
};

type Service = RoutingService<InMemoryVoyageRepository, InMemoryLocationRepository>;

fn loc(code: &str) -> UnLocode {
    UnLocode::new(code).unwrap()
}

fn t(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

async fn create_service(config: SearchConfig) -> Service {
    let service = RoutingService::new(
        InMemoryVoyageRepository::new(),
        InMemoryLocationRepository::new(),
        config,
    );
    for (code, name, country) in [
        ("USNYC", "New York", "United States"),
        ("NLRTM", "Rotterdam", "Netherlands"),
        ("DEHAM", "Hamburg", "Germany"),
        ("SESTO", "Stockholm", "Sweden"),
    ] {
        service
            .register_location(Location::new(loc(code), name, country))
            .await
            .unwrap();
    }

    let voyages = [
        Voyage::builder(VoyageNumber::new("0100S").unwrap(), loc("USNYC"))
            .add_movement(loc("NLRTM"), t(0), t(160))
            .add_movement(loc("DEHAM"), t(170), t(190))
            .build()
            .unwrap(),
        Voyage::builder(VoyageNumber::new("0200T").unwrap(), loc("NLRTM"))
            .add_movement(loc("SESTO"), t(200), t(260))
            .build()
            .unwrap(),
        Voyage::builder(VoyageNumber::new("0300A").unwrap(), loc("DEHAM"))
            .add_movement(loc("SESTO"), t(195), t(230))
            .build()
            .unwrap(),
    ];
    for voyage in voyages {
        service.register_voyage(voyage).await.unwrap();
    }
    service
}

mod network_management {
    use super::*;

    #[tokio::test]
    async fn lists_registered_locations_and_voyages() {
        let service = create_service(SearchConfig::default()).await;

        let locations = service.list_locations().await.unwrap();
        assert_eq!(locations.len(), 4);
        assert_eq!(locations[0].code(), &loc("DEHAM"));

        let voyages = service.list_voyages().await.unwrap();
        let numbers: Vec<_> = voyages.iter().map(|v| v.number().as_str()).collect();
        assert_eq!(numbers, vec!["0100S", "0200T", "0300A"]);
    }

    #[tokio::test]
    async fn re_registering_a_voyage_replaces_its_schedule() {
        let service = create_service(SearchConfig::default()).await;
        let replacement = Voyage::builder(VoyageNumber::new("0300A").unwrap(), loc("DEHAM"))
            .add_movement(loc("SESTO"), t(400), t(450))
            .build()
            .unwrap();

        service.register_voyage(replacement).await.unwrap();

        let voyages = service.list_voyages().await.unwrap();
        assert_eq!(voyages.len(), 3);
        let updated = voyages
            .iter()
            .find(|v| v.number().as_str() == "0300A")
            .unwrap();
        assert_eq!(updated.schedule().first().departure_time(), t(400));
    }

    #[tokio::test]
    async fn unknown_location_is_a_not_found_error() {
        let service = create_service(SearchConfig::default()).await;
        let voyage = Voyage::builder(VoyageNumber::new("0999X").unwrap(), loc("USNYC"))
            .add_movement(loc("JPTYO"), t(0), t(10))
            .build()
            .unwrap();

        let err = service.register_voyage(voyage).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

mod itinerary_search {
    use super::*;

    #[tokio::test]
    async fn multi_leg_voyage_splits_into_one_edge_per_movement() {
        let service = create_service(SearchConfig::default()).await;
        let spec = RouteSpecification::new(loc("USNYC"), loc("DEHAM"), t(500)).unwrap();

        let paths = service.find_optimal_itineraries(&spec).await.unwrap();

        assert_eq!(paths.len(), 1);
        let edges = paths[0].edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].to, loc("NLRTM"));
        assert_eq!(edges[1].from, loc("NLRTM"));
        assert!(edges.iter().all(|e| e.voyage_number.as_str() == "0100S"));
    }

    #[tokio::test]
    async fn earliest_arrival_comes_first() {
        let service = create_service(SearchConfig::default()).await;
        let spec = RouteSpecification::new(loc("USNYC"), loc("SESTO"), t(500)).unwrap();

        let paths = service.find_optimal_itineraries(&spec).await.unwrap();

        // Via Hamburg arrives at 230, via Rotterdam at 260.
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].final_arrival(), t(230));
        assert_eq!(paths[1].final_arrival(), t(260));
        assert_eq!(paths[1].len(), 2);
    }

    #[tokio::test]
    async fn deadline_excludes_late_paths() {
        let service = create_service(SearchConfig::default()).await;
        let spec = RouteSpecification::new(loc("USNYC"), loc("SESTO"), t(230)).unwrap();

        let paths = service.find_optimal_itineraries(&spec).await.unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].final_arrival(), t(230));
    }

    #[tokio::test]
    async fn max_legs_limits_transshipments() {
        let service = create_service(SearchConfig::new(Some(2), 10, 1000)).await;
        let spec = RouteSpecification::new(loc("USNYC"), loc("SESTO"), t(500)).unwrap();

        let paths = service.find_optimal_itineraries(&spec).await.unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].final_arrival(), t(260));
    }

    #[tokio::test]
    async fn no_route_backwards_in_time() {
        let service = create_service(SearchConfig::default()).await;
        let spec = RouteSpecification::new(loc("SESTO"), loc("USNYC"), t(1000)).unwrap();

        let paths = service.find_optimal_itineraries(&spec).await.unwrap();
        assert!(paths.is_empty());
    }

    #[tokio::test]
    async fn identical_endpoints_are_rejected() {
        let result = RouteSpecification::new(loc("USNYC"), loc("USNYC"), t(10));
        assert!(matches!(
            result,
            Err(RoutingError::SameOriginAndDestination(_))
        ));
    }
}
