//! Demo transport network registered at startup.

use chrono::{DateTime, Duration, Utc};
use common::{UnLocode, VoyageNumber};
use routing::{
    Location, LocationRepository, RoutingError, RoutingService, Voyage, VoyageRepository,
};

const LOCATIONS: [(&str, &str, &str); 9] = [
    ("USNYC", "New York", "United States"),
    ("USCHI", "Chicago", "United States"),
    ("NLRTM", "Rotterdam", "Netherlands"),
    ("DEHAM", "Hamburg", "Germany"),
    ("SESTO", "Stockholm", "Sweden"),
    ("FIHEL", "Helsinki", "Finland"),
    ("CNSHA", "Shanghai", "China"),
    ("HKHKG", "Hong Kong", "China"),
    ("JPTYO", "Tokyo", "Japan"),
];

/// Voyage number, first departure location, then (arrival, departs after,
/// arrives after) per movement, in hours from seeding time.
type VoyagePlan = (&'static str, &'static str, &'static [(&'static str, i64, i64)]);

const VOYAGES: [VoyagePlan; 6] = [
    ("0100S", "USNYC", &[("NLRTM", 48, 216), ("DEHAM", 240, 264)]),
    ("0200T", "NLRTM", &[("SESTO", 240, 312)]),
    ("0300A", "CNSHA", &[("HKHKG", 72, 120), ("USNYC", 144, 480)]),
    ("0400S", "DEHAM", &[("SESTO", 288, 336), ("FIHEL", 360, 384)]),
    ("0500S", "JPTYO", &[("CNSHA", 24, 60)]),
    ("0600A", "USCHI", &[("USNYC", 12, 36)]),
];

/// Registers the demo locations and voyages, scheduled relative to `now`.
pub async fn seed_demo_network<V, L>(
    routing: &RoutingService<V, L>,
    now: DateTime<Utc>,
) -> Result<(), RoutingError>
where
    V: VoyageRepository,
    L: LocationRepository,
{
    for (code, name, country) in LOCATIONS {
        routing
            .register_location(Location::new(UnLocode::new(code)?, name, country))
            .await?;
    }

    for (number, start, movements) in VOYAGES {
        let mut builder = Voyage::builder(VoyageNumber::new(number)?, UnLocode::new(start)?);
        for (arrival, departs, arrives) in movements {
            builder = builder.add_movement(
                UnLocode::new(arrival)?,
                now + Duration::hours(*departs),
                now + Duration::hours(*arrives),
            );
        }
        routing.register_voyage(builder.build()?).await?;
    }

    tracing::info!(
        locations = LOCATIONS.len(),
        voyages = VOYAGES.len(),
        "demo network seeded"
    );
    Ok(())
}
