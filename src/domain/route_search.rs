use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::domain::ids::AirlineId;
use crate::domain::route_graph::RouteGraph;
use crate::error::{Error, Result};

/// Message shown to users when the selected airlines cannot connect two cities.
pub const NO_ROUTE_MESSAGE: &str = "No feasible route with selected airlines.";

/// A city on a path and the airline that flew into it (`None` for the source).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStop {
    pub city: String,
    pub airline: Option<AirlineId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub from: String,
    pub to: String,
    pub airline: AirlineId,
    pub distance_km: f64,
}

/// Shortest path from source to destination, both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub stops: Vec<PathStop>,
    pub legs: Vec<Leg>,

    /// Sum of `legs[..].distance_km`, accumulated from the source.
    pub total_distance_km: f64,
}

impl PathResult {
    pub fn cities(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.city.as_str()).collect()
    }

    /// Renders the path as `A -> B -> C`.
    pub fn route_string(&self) -> String {
        self.cities().join(" -> ")
    }
}

/// Outcome of a search that got valid input.
///
/// `NoRoute` is a regular answer, not an error: it means the graph holds both
/// cities but no chain of legs connects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(PathResult),
    NoRoute,
}

impl RouteOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&PathResult> {
        match self {
            RouteOutcome::Found(path) => Some(path),
            RouteOutcome::NoRoute => None,
        }
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.path().map(|p| p.total_distance_km)
    }
}

/// Frontier entry ordered by distance, then by insertion sequence so that equal
/// distances pop in discovery order.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    distance: f64,
    sequence: u64,
    vertex: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance).then(self.sequence.cmp(&other.sequence))
    }
}

/// Predecessor link: the vertex we came from and the edge used, as an index into its adjacency list.
#[derive(Debug, Clone, Copy)]
struct Predecessor {
    vertex: usize,
    edge: usize,
}

/// Runs the label-setting (Dijkstra) search from `source` to `destination`.
///
/// Fails with `UnknownCity` if either name is not a vertex of `graph`. Among
/// equally short candidates the first discovered predecessor is kept, so the
/// returned path is deterministic for a given graph.
pub fn shortest_path(graph: &RouteGraph, source: &str, destination: &str) -> Result<RouteOutcome> {
    let src = graph.index_of(source).ok_or_else(|| Error::UnknownCity(source.to_string()))?;
    let dst = graph.index_of(destination).ok_or_else(|| Error::UnknownCity(destination.to_string()))?;

    let n = graph.city_count();
    let mut distance = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<Predecessor>> = vec![None; n];
    let mut settled = vec![false; n];

    let mut sequence: u64 = 0;
    let mut frontier = BinaryHeap::new();
    distance[src] = 0.0;
    frontier.push(Reverse(FrontierEntry { distance: 0.0, sequence, vertex: src }));

    let mut reached = false;
    while let Some(Reverse(FrontierEntry { distance: d, vertex: u, .. })) = frontier.pop() {
        if settled[u] {
            continue;
        }
        settled[u] = true;

        if u == dst {
            reached = true;
            break;
        }

        for (edge_index, edge) in graph.edges_from(u).iter().enumerate() {
            let v = edge.target;
            if settled[v] {
                continue;
            }

            let candidate = d + edge.distance_km;
            if candidate < distance[v] {
                distance[v] = candidate;
                predecessor[v] = Some(Predecessor { vertex: u, edge: edge_index });
                sequence += 1;
                frontier.push(Reverse(FrontierEntry { distance: candidate, sequence, vertex: v }));
            }
        }
    }

    if !reached {
        log::debug!("No route {} -> {} with airlines {:?}.", source, destination, graph.airlines());
        return Ok(RouteOutcome::NoRoute);
    }

    let path = reconstruct_path(graph, &predecessor, src, dst);
    log::debug!("Route {} -> {}: {} ({:.2} km).", source, destination, path.route_string(), path.total_distance_km);
    Ok(RouteOutcome::Found(path))
}

fn reconstruct_path(graph: &RouteGraph, predecessor: &[Option<Predecessor>], src: usize, dst: usize) -> PathResult {
    let mut hops: Vec<(usize, Option<Predecessor>)> = Vec::new();
    let mut current = dst;
    loop {
        let link = predecessor[current];
        hops.push((current, link));
        match link {
            Some(p) if current != src => current = p.vertex,
            _ => break,
        }
    }
    hops.reverse();

    let name = |i: usize| graph.city_name(i).unwrap_or_default().to_string();

    let mut stops = Vec::with_capacity(hops.len());
    let mut legs = Vec::with_capacity(hops.len().saturating_sub(1));
    let mut total_distance_km = 0.0;

    for (vertex, link) in hops {
        match link.filter(|_| vertex != src) {
            Some(p) => {
                let edge = &graph.edges_from(p.vertex)[p.edge];
                total_distance_km += edge.distance_km;
                legs.push(Leg { from: name(p.vertex), to: name(vertex), airline: edge.airline.clone(), distance_km: edge.distance_km });
                stops.push(PathStop { city: name(vertex), airline: Some(edge.airline.clone()) });
            }
            None => stops.push(PathStop { city: name(vertex), airline: None }),
        }
    }

    PathResult { stops, legs, total_distance_km }
}
