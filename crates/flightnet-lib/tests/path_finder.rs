mod common;

use flightnet_lib::path::SimplePaths;
use flightnet_lib::{
    k_shortest_simple_paths, path_metrics, shortest_path, shortest_path_with_stop_limit, CostType,
    EngineConfig, Error, PathLimits,
};

use common::{fixture_engine, line_with_shortcut, NetworkBuilder};

#[test]
fn fixture_prefers_connection_via_heathrow() {
    let engine = fixture_engine();
    let route = engine
        .find_route("MAN", "JFK", CostType::Time, None)
        .unwrap()
        .expect("route exists");

    assert_eq!(route.path, ["MAN", "LHR", "JFK"]);
    assert_eq!(route.stops, 1);
    assert_eq!(route.segments.len(), 2);
    assert_eq!(route.total_transfer_time, 1.5);
    assert!((route.total_time - (route.total_flight_time + 1.5)).abs() < 0.011);
}

#[test]
fn stop_limit_validates_the_optimum_only() {
    let engine = fixture_engine();
    let best = engine
        .find_route("LHR", "LAX", CostType::Time, None)
        .unwrap()
        .unwrap();
    assert_eq!(best.path, ["LHR", "BOS", "ORD", "LAX"]);

    // LHR-JFK-LAX has one stop, but it is not the optimum, so nothing is
    // returned under a one-stop limit.
    assert!(engine
        .find_route("LHR", "LAX", CostType::Time, Some(1))
        .unwrap()
        .is_none());
    assert!(engine
        .find_route("LHR", "LAX", CostType::Time, Some(2))
        .unwrap()
        .is_some());
}

#[test]
fn distance_and_cost_selectors_agree() {
    // Both are proportional to distance, so they pick the same path.
    let network = fixture_engine().network().clone();
    let by_distance = shortest_path(&network, "CDG", "NRT", CostType::Distance).unwrap();
    let by_cost = shortest_path(&network, "CDG", "NRT", CostType::Cost).unwrap();
    assert_eq!(by_distance, by_cost);
}

#[test]
fn removing_the_middle_of_a_line_leaves_the_shortcut() {
    let network = line_with_shortcut().build();
    let reduced = network.remove_nodes(&["BBB"]);
    let path = shortest_path(&reduced, "AAA", "CCC", CostType::Time).unwrap();
    assert_eq!(path.airports(), ["AAA", "CCC"]);
    assert_eq!(path.stops(), 0);
}

#[test]
fn alternatives_are_ordered_and_simple() {
    let engine = fixture_engine();
    let routes = engine
        .find_alternative_routes("MAN", "JFK", CostType::Time, 5)
        .unwrap();

    assert_eq!(routes.len(), 5);
    assert_eq!(routes[0].path, ["MAN", "LHR", "JFK"]);
    for pair in routes.windows(2) {
        assert!(pair[0].total_flight_time <= pair[1].total_flight_time);
        assert_ne!(pair[0].path, pair[1].path);
    }
    for route in &routes {
        assert!(route.stops <= engine.config().max_stops);
        let mut seen = route.path.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), route.path.len(), "{:?} repeats", route.path);
    }
}

#[test]
fn max_stops_caps_alternatives() {
    let network = fixture_engine().network().clone();
    let limits = PathLimits {
        max_stops: 1,
        scan_limit: 1000,
    };
    let paths = k_shortest_simple_paths(&network, "MAN", "JFK", CostType::Time, 10, limits);
    let routes: Vec<Vec<String>> = paths.into_iter().map(|p| p.into_airports()).collect();
    assert_eq!(
        routes,
        vec![
            vec!["MAN".to_string(), "LHR".to_string(), "JFK".to_string()],
            vec!["MAN".to_string(), "AMS".to_string(), "JFK".to_string()],
        ]
    );
}

#[test]
fn scan_limit_bounds_enumeration() {
    let network = fixture_engine().network().clone();
    let limits = PathLimits {
        max_stops: 0,
        scan_limit: 3,
    };
    // No direct MAN-JFK flight exists, so the scan gives up after three
    // rejected candidates.
    let paths = k_shortest_simple_paths(&network, "MAN", "JFK", CostType::Time, 5, limits);
    assert!(paths.is_empty());
}

#[test]
fn lazy_enumerator_yields_nondecreasing_weights() {
    let network = fixture_engine().network().clone();
    let weights: Vec<f64> = SimplePaths::new(&network, "CDG", "LAX", CostType::Distance)
        .expect("known endpoints")
        .take(8)
        .map(|(_, weight)| weight)
        .collect();
    assert_eq!(weights.len(), 8);
    assert!(weights.windows(2).all(|w| w[0] <= w[1] + 1e-9));
}

#[test]
fn unreachable_and_invalid_queries() {
    let network = NetworkBuilder::new()
        .airport("AAA", 0.0, 0.0)
        .airport("BBB", 0.0, 1.0)
        .airport("ISO", 5.0, 5.0)
        .route("AAA", "BBB")
        .build();

    assert!(shortest_path(&network, "AAA", "ISO", CostType::Time).is_none());
    assert!(shortest_path_with_stop_limit(&network, "AAA", "ISO", CostType::Time, 3).is_none());
    assert!(
        k_shortest_simple_paths(&network, "AAA", "ISO", CostType::Time, 3, PathLimits::default())
            .is_empty()
    );
    assert!(shortest_path(&network, "AAA", "nope", CostType::Time).is_none());

    let engine = NetworkBuilder::new()
        .airport("AAA", 0.0, 0.0)
        .airport("BBB", 0.0, 1.0)
        .route("AAA", "BBB")
        .engine();
    assert!(matches!(
        engine.find_alternative_routes("AAA", "AAA", CostType::Time, 3),
        Err(Error::SameEndpoints { .. })
    ));
    assert!(engine
        .find_alternative_routes("AAA", "XXX", CostType::Time, 3)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn metrics_match_leg_sums() {
    let network = fixture_engine().network().clone();
    let config = EngineConfig::default();
    let path = shortest_path(&network, "MAN", "NRT", CostType::Time).unwrap();
    let result = path_metrics(&network, &path, &config).unwrap();

    let legs: f64 = result.segments.iter().map(|s| s.distance).sum();
    assert!((legs - result.total_distance).abs() < 0.01 * result.segments.len() as f64);
    assert_eq!(
        result.total_transfer_time,
        (result.stops as f64 * config.default_transfer_hours() * 100.0).round() / 100.0
    );
    assert_eq!(result.path.first().map(String::as_str), Some("MAN"));
    assert_eq!(result.path.last().map(String::as_str), Some("NRT"));
}
