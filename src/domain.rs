pub mod airline_rules;
pub mod city_catalog;
pub mod ids;
pub mod route_comparison;
pub mod route_graph;
pub mod route_search;
