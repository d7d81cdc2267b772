use bimap::BiHashMap;

use crate::domain::airline_rules::AirlineRuleSet;
use crate::domain::city_catalog::CityCatalog;
use crate::domain::ids::AirlineId;
use crate::error::{Error, Result};

/// One direction of a flight leg between a hub and a city.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Index of the city this edge leads to.
    pub target: usize,

    /// Leg length in km, the city's precomputed distance to the hub.
    pub distance_km: f64,

    /// Airline flying this leg.
    pub airline: AirlineId,
}

/// Airline-aware flight network.
///
/// The graph is built fresh for one airline selection and never mutated afterwards.
/// Every leg connects the hub of a selected airline with a city that airline
/// serves, and is stored in both directions with the same weight. Two airlines
/// sharing a hub produce parallel edges, each tagged with its own airline.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    /// `adjacency[i]` lists the outgoing edges of the city with index `i`.
    adjacency: Vec<Vec<Edge>>,

    /// Bijection between city names and vertex indices.
    cities: BiHashMap<String, usize>,

    /// The airline selection this graph was built for, sorted.
    airlines: Vec<AirlineId>,
}

impl RouteGraph {
    /// Builds the graph for airlines given by name.
    ///
    /// Fails with `NoAirlineSelected` on an empty selection, `UnknownAirline` for
    /// a name missing from `rules` and `HubNotFound` if a hub is not in `catalog`.
    pub fn build<S: AsRef<str>>(catalog: &CityCatalog, rules: &AirlineRuleSet, airlines: &[S]) -> Result<Self> {
        if airlines.is_empty() {
            return Err(Error::NoAirlineSelected);
        }
        let selection = rules.resolve(airlines)?;
        Self::build_for(catalog, rules, &selection)
    }

    /// Builds the standard network: every airline known to `rules`.
    pub fn build_all(catalog: &CityCatalog, rules: &AirlineRuleSet) -> Result<Self> {
        Self::build_for(catalog, rules, &rules.airlines())
    }

    /// Builds the graph for already resolved airline ids.
    pub fn build_for(catalog: &CityCatalog, rules: &AirlineRuleSet, airlines: &[AirlineId]) -> Result<Self> {
        if airlines.is_empty() {
            return Err(Error::NoAirlineSelected);
        }

        let mut selection = airlines.to_vec();
        selection.sort();
        selection.dedup();

        let cities: BiHashMap<String, usize> = catalog.cities().iter().enumerate().map(|(i, c)| (c.name.clone(), i)).collect();
        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); catalog.len()];

        for airline in &selection {
            let rule = rules.rule(airline)?;
            let hub_index = catalog
                .index_of(&rule.hub)
                .ok_or_else(|| Error::HubNotFound { airline: airline.to_string(), hub: rule.hub.clone() })?;

            let mut legs = 0;
            for (city_index, city) in catalog.cities().iter().enumerate() {
                if city_index == hub_index || !rule.serves(&city.name) {
                    continue;
                }

                let distance_km = catalog.hub_distance_by_index(city_index, hub_index);
                adjacency[hub_index].push(Edge { target: city_index, distance_km, airline: airline.clone() });
                adjacency[city_index].push(Edge { target: hub_index, distance_km, airline: airline.clone() });
                legs += 1;
            }

            log::debug!("Airline {} ({}): {} legs admitted.", airline, rule.hub, legs);
        }

        let graph = RouteGraph { adjacency, cities, airlines: selection };
        log::debug!("Route graph built: {} cities, {} legs, airlines {:?}.", graph.city_count(), graph.leg_count(), graph.airlines);
        Ok(graph)
    }

    pub fn city_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected legs, parallel legs counted separately.
    pub fn leg_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn airlines(&self) -> &[AirlineId] {
        &self.airlines
    }

    pub fn index_of(&self, city: &str) -> Option<usize> {
        self.cities.get_by_left(city).copied()
    }

    pub fn city_name(&self, index: usize) -> Option<&str> {
        self.cities.get_by_right(&index).map(String::as_str)
    }

    pub fn edges_from(&self, index: usize) -> &[Edge] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All directed edges as `(source index, edge)` pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, &Edge)> {
        self.adjacency.iter().enumerate().flat_map(|(source, edges)| edges.iter().map(move |e| (source, e)))
    }
}
