use crate::domain::airline_rules::AirlineRuleSet;
use crate::domain::city_catalog::CityCatalog;
use crate::error::Result;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads the city table and the airline rules a planner works on.
///
/// Without `rules_path` the built-in rule set is used.
pub fn load_network(data_path: &str, rules_path: Option<&str>) -> Result<(CityCatalog, AirlineRuleSet)> {
    let catalog = CityCatalog::from_csv_file(data_path)?;
    log::info!("City catalog loaded from '{}'.", data_path);

    let rules = match rules_path {
        Some(path) => AirlineRuleSet::from_json_file(path)?,
        None => AirlineRuleSet::builtin(),
    };
    log::info!("Airline rule set ready: {:?}.", rules.airlines());

    Ok((catalog, rules))
}
