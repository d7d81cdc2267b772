use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hub_route_planner::domain::{
    airline_rules::{AirlineRule, AirlineRuleSet},
    city_catalog::{City, CityCatalog},
    route_graph::RouteGraph,
    route_search::{RouteOutcome, shortest_path},
};

const HUBS: [(&str, &str); 3] = [("Hub Air", "Hub-A"), ("Bay Air", "Hub-B"), ("Cape Air", "Hub-C")];
const SEEDS: [u64; 6] = [1, 7, 42, 99, 1234, 2024];
const EPSILON: f64 = 1e-6;

/// Random network: three hubs, `cities` spokes, each airline excluding roughly a quarter of the spokes.
fn random_network(seed: u64, cities: usize) -> (CityCatalog, AirlineRuleSet) {
    let mut rng = StdRng::seed_from_u64(seed);
    let names: Vec<String> = HUBS.iter().map(|(_, hub)| hub.to_string()).chain((0..cities).map(|i| format!("City-{:03}", i))).collect();

    let catalog_cities: Vec<City> = names
        .iter()
        .map(|name| {
            let mut city = City::new(name.clone(), "Testland", rng.random_range(-60.0..60.0), rng.random_range(-180.0..180.0));
            for (_, hub) in HUBS {
                let distance = if name == hub { 0.0 } else { (rng.random_range(50.0..9000.0_f64) * 100.0).round() / 100.0 };
                city = city.with_hub_distance(hub, distance);
            }
            city
        })
        .collect();

    let rules: Vec<AirlineRule> = HUBS
        .iter()
        .map(|(airline, hub)| {
            let excluded: Vec<String> = names.iter().skip(HUBS.len()).filter(|_| rng.random_bool(0.25)).cloned().collect();
            AirlineRule::new(*airline, *hub, excluded)
        })
        .collect();

    (CityCatalog::new(catalog_cities), AirlineRuleSet::new(rules).expect("three distinct airlines"))
}

fn selections() -> Vec<Vec<&'static str>> {
    vec![vec!["Hub Air"], vec!["Bay Air"], vec!["Cape Air"], vec!["Hub Air", "Cape Air"], vec!["Hub Air", "Bay Air", "Cape Air"]]
}

#[test]
fn test_every_edge_passes_airline_admission() {
    for seed in SEEDS {
        let (catalog, rules) = random_network(seed, 30);
        for selection in selections() {
            let graph = RouteGraph::build(&catalog, &rules, &selection).unwrap();

            for (source, edge) in graph.edges() {
                let rule = rules.rule(&edge.airline).unwrap();
                let hub = catalog.index_of(&rule.hub).unwrap();
                let (source_name, target_name) = (graph.city_name(source).unwrap(), graph.city_name(edge.target).unwrap());

                assert!(selection.iter().any(|s| *s == edge.airline.as_str()), "edge of unselected airline {}", edge.airline);
                assert_ne!(source, edge.target, "self loop at {}", source_name);
                assert!(source == hub || edge.target == hub, "leg {} -> {} does not touch {}", source_name, target_name, rule.hub);
                assert!(!rule.excluded_cities().contains(source_name) || source == hub);
                assert!(!rule.excluded_cities().contains(target_name) || edge.target == hub);
            }
        }
    }
}

#[test]
fn test_graph_build_is_idempotent() {
    for seed in SEEDS {
        let (catalog, rules) = random_network(seed, 25);
        let first = RouteGraph::build(&catalog, &rules, &["Hub Air", "Bay Air"]).unwrap();
        let second = RouteGraph::build(&catalog, &rules, &["Bay Air", "Hub Air"]).unwrap();

        let first_edges: Vec<_> = first.edges().collect();
        let second_edges: Vec<_> = second.edges().collect();
        assert_eq!(first_edges, second_edges);
    }
}

#[test]
fn test_total_distance_equals_sum_of_legs() {
    for seed in SEEDS {
        let (catalog, rules) = random_network(seed, 20);
        let graph = RouteGraph::build(&catalog, &rules, &["Hub Air", "Cape Air"]).unwrap();

        for source in catalog.cities().iter().take(8) {
            for target in catalog.cities() {
                let RouteOutcome::Found(path) = shortest_path(&graph, &source.name, &target.name).unwrap() else {
                    continue;
                };

                let sum: f64 = path.legs.iter().map(|leg| leg.distance_km).fold(0.0, |acc, d| acc + d);
                assert_eq!(path.total_distance_km, sum);
                assert_eq!(path.stops.len(), path.legs.len() + 1);
                assert_eq!(path.stops.first().map(|s| s.city.as_str()), Some(source.name.as_str()));
                assert_eq!(path.stops.last().map(|s| s.city.as_str()), Some(target.name.as_str()));

                for (leg, stop) in path.legs.iter().zip(path.stops.iter().skip(1)) {
                    assert_eq!(stop.airline.as_ref(), Some(&leg.airline));
                }
            }
        }
    }
}

#[test]
fn test_standard_search_is_never_longer() {
    for seed in SEEDS {
        let (catalog, rules) = random_network(seed, 20);
        let standard = RouteGraph::build_all(&catalog, &rules).unwrap();

        for selection in selections() {
            let constrained = RouteGraph::build(&catalog, &rules, &selection).unwrap();

            for source in catalog.cities().iter().step_by(3) {
                for target in catalog.cities().iter().step_by(2) {
                    let restricted = shortest_path(&constrained, &source.name, &target.name).unwrap();
                    let full = shortest_path(&standard, &source.name, &target.name).unwrap();

                    if let Some(restricted_km) = restricted.distance_km() {
                        let full_km = full.distance_km().expect("standard network is a superset");
                        assert!(full_km <= restricted_km + EPSILON, "{} -> {}: {} > {}", source.name, target.name, full_km, restricted_km);
                    }
                }
            }
        }
    }
}

#[test]
fn test_search_is_symmetric() {
    for seed in SEEDS {
        let (catalog, rules) = random_network(seed, 20);
        let graph = RouteGraph::build(&catalog, &rules, &["Bay Air", "Cape Air"]).unwrap();

        for source in catalog.cities() {
            for target in catalog.cities() {
                let there = shortest_path(&graph, &source.name, &target.name).unwrap();
                let back = shortest_path(&graph, &target.name, &source.name).unwrap();

                match (there.distance_km(), back.distance_km()) {
                    (Some(a), Some(b)) => assert!((a - b).abs() < EPSILON, "{} <-> {}: {} vs {}", source.name, target.name, a, b),
                    (None, None) => {}
                    other => panic!("asymmetric reachability {} <-> {}: {:?}", source.name, target.name, other),
                }
            }
        }
    }
}
