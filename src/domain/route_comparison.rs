use serde::Serialize;

use crate::domain::airline_rules::AirlineRuleSet;
use crate::domain::city_catalog::CityCatalog;
use crate::domain::ids::AirlineId;
use crate::domain::route_graph::RouteGraph;
use crate::domain::route_search::{RouteOutcome, shortest_path};
use crate::error::{Error, Result};

/// Airline-aware result next to the standard (all airlines) result for the same trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteComparison {
    pub selected_airlines: Vec<AirlineId>,
    pub constrained: RouteOutcome,
    pub standard: RouteOutcome,
}

impl RouteComparison {
    /// `standard - constrained` in km, when both searches found a route.
    pub fn distance_difference_km(&self) -> Option<f64> {
        Some(self.standard.distance_km()? - self.constrained.distance_km()?)
    }

    /// One line describing how the two distances relate, rounded to 2 decimals.
    pub fn summary(&self) -> Option<String> {
        let diff = (self.distance_difference_km()? * 100.0).round() / 100.0;
        let line = if diff < 0.0 {
            format!("Standard (all airlines) is {:.2} km shorter.", diff.abs())
        } else if diff > 0.0 {
            format!("Airline-aware is {:.2} km shorter (restricting airlines).", diff)
        } else {
            "Same distance.".to_string()
        };
        Some(line)
    }
}

/// Entry point for route queries against one catalog and rule set.
///
/// Every query builds its own [`RouteGraph`], so a planner can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct RoutePlanner<'a> {
    catalog: &'a CityCatalog,
    rules: &'a AirlineRuleSet,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(catalog: &'a CityCatalog, rules: &'a AirlineRuleSet) -> Self {
        Self { catalog, rules }
    }

    pub fn catalog(&self) -> &'a CityCatalog {
        self.catalog
    }

    pub fn rules(&self) -> &'a AirlineRuleSet {
        self.rules
    }

    /// Shortest route using only the `airlines` selection.
    pub fn plan<S: AsRef<str>>(&self, airlines: &[S], source: &str, destination: &str) -> Result<RouteOutcome> {
        let graph = RouteGraph::build(self.catalog, self.rules, airlines)?;
        shortest_path(&graph, source, destination)
    }

    /// Shortest route over the network of every known airline.
    pub fn plan_standard(&self, source: &str, destination: &str) -> Result<RouteOutcome> {
        let graph = RouteGraph::build_all(self.catalog, self.rules)?;
        shortest_path(&graph, source, destination)
    }

    /// Runs [`RoutePlanner::plan`] and [`RoutePlanner::plan_standard`] and returns both outcomes as they are.
    pub fn compare<S: AsRef<str>>(&self, airlines: &[S], source: &str, destination: &str) -> Result<RouteComparison> {
        if airlines.is_empty() {
            return Err(Error::NoAirlineSelected);
        }
        let selected_airlines = self.rules.resolve(airlines)?;

        let constrained = shortest_path(&RouteGraph::build_for(self.catalog, self.rules, &selected_airlines)?, source, destination)?;
        let standard = self.plan_standard(source, destination)?;

        log::debug!(
            "Compared {} -> {}: selected {:?} = {:?} km, standard = {:?} km.",
            source,
            destination,
            selected_airlines,
            constrained.distance_km(),
            standard.distance_km()
        );

        Ok(RouteComparison { selected_airlines, constrained, standard })
    }
}

/// Free-function form of [`RoutePlanner::compare`].
pub fn compare<S: AsRef<str>>(
    catalog: &CityCatalog,
    rules: &AirlineRuleSet,
    selected_airlines: &[S],
    source: &str,
    destination: &str,
) -> Result<RouteComparison> {
    RoutePlanner::new(catalog, rules).compare(selected_airlines, source, destination)
}
