//! Common test utilities and fixture helpers.
//!
//! Integration tests build small synthetic networks with [`NetworkBuilder`]
//! or load the OpenFlights sample under `docs/fixtures`.

use std::path::PathBuf;

use flightnet_lib::{Airport, EngineConfig, FlightEngine, Network, RouteRecord};

/// Path to fixtures directory used by tests (OpenFlights sample files).
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Engine over the OpenFlights sample with default configuration.
#[allow(dead_code)]
pub fn fixture_engine() -> FlightEngine {
    FlightEngine::load(&fixtures_dir(), EngineConfig::default()).expect("fixture dataset loads")
}

/// Airport at the given position with generated descriptive fields.
pub fn airport(iata: &str, country: &str, latitude: f64, longitude: f64) -> Airport {
    Airport {
        iata: iata.to_string(),
        name: format!("{iata} International"),
        city: format!("{iata} City"),
        country: country.to_string(),
        latitude,
        longitude,
        altitude: 0.0,
    }
}

/// Fluent builder for synthetic networks.
#[allow(dead_code)]
#[derive(Default)]
pub struct NetworkBuilder {
    airports: Vec<Airport>,
    routes: Vec<RouteRecord>,
    config: EngineConfig,
}

#[allow(dead_code)]
impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an airport in the default country "Testland".
    pub fn airport(self, iata: &str, latitude: f64, longitude: f64) -> Self {
        self.airport_in(iata, "Testland", latitude, longitude)
    }

    pub fn airport_in(mut self, iata: &str, country: &str, latitude: f64, longitude: f64) -> Self {
        self.airports.push(airport(iata, country, latitude, longitude));
        self
    }

    pub fn route(mut self, from: &str, to: &str) -> Self {
        self.routes.push(RouteRecord::new(from, to, "TS"));
        self
    }

    pub fn route_by(mut self, from: &str, to: &str, airline: &str) -> Self {
        self.routes.push(RouteRecord::new(from, to, airline));
        self
    }

    /// Add routes in both directions.
    pub fn both_ways(self, a: &str, b: &str) -> Self {
        self.route(a, b).route(b, a)
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Network {
        Network::build(self.airports, &self.routes, &self.config)
    }

    pub fn engine(self) -> FlightEngine {
        let config = self.config.clone();
        FlightEngine::new(self.build(), config).expect("valid engine config")
    }
}

/// AAA(0,0) -> BBB(0,1) -> CCC(0,2) plus the direct AAA -> CCC route.
#[allow(dead_code)]
pub fn line_with_shortcut() -> NetworkBuilder {
    NetworkBuilder::new()
        .airport("AAA", 0.0, 0.0)
        .airport("BBB", 0.0, 1.0)
        .airport("CCC", 0.0, 2.0)
        .route("AAA", "BBB")
        .route("BBB", "CCC")
        .route("AAA", "CCC")
}
