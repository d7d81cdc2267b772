use std::collections::{BTreeMap, HashMap, HashSet};

use crate::api::city_dto::CityRecordDto;
use crate::error::Result;
use crate::loader::parser::parse_city_csv;

/// Mean Earth radius used for great-circle distances, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A city of the flight network with its precomputed distances to the hubs.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Distance in km to each hub, keyed by the hub's city name.
    pub hub_distances: BTreeMap<String, f64>,
}

impl City {
    pub fn new(name: impl Into<String>, country: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), country: country.into(), latitude, longitude, hub_distances: BTreeMap::new() }
    }

    /// Builder-style helper to attach a precomputed hub distance.
    pub fn with_hub_distance(mut self, hub: impl Into<String>, distance_km: f64) -> Self {
        self.hub_distances.insert(hub.into(), distance_km);
        self
    }

    pub fn distance_to_hub(&self, hub: &str) -> Option<f64> {
        self.hub_distances.get(hub).copied()
    }
}

/// Great-circle distance between two coordinates, rounded to two decimals like the city tables.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (lat1.to_radians(), lon1.to_radians(), lat2.to_radians(), lon2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();
    (EARTH_RADIUS_KM * c * 100.0).round() / 100.0
}

/// Read-only table of all cities known to the network.
///
/// City names are unique keys; the position of a city in [`CityCatalog::cities`]
/// is its index everywhere else in the crate.
#[derive(Debug, Clone, Default)]
pub struct CityCatalog {
    cities: Vec<City>,
    index: HashMap<String, usize>,
}

impl CityCatalog {
    /// Builds a catalog from already validated cities. A repeated name keeps its first record.
    pub fn new(cities: Vec<City>) -> Self {
        let mut catalog = CityCatalog::default();

        for city in cities {
            if catalog.index.contains_key(&city.name) {
                log::warn!("Duplicate city '{}' ({}) dropped, keeping the first record.", city.name, city.country);
                continue;
            }
            catalog.index.insert(city.name.clone(), catalog.cities.len());
            catalog.cities.push(city);
        }

        catalog
    }

    /// Cleans raw table rows into a catalog.
    ///
    /// Rows without a city name or usable coordinates are dropped, as are exact
    /// `(City, Country)` duplicates. Negative distances are treated as missing.
    pub fn from_records(records: Vec<CityRecordDto>) -> Self {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut cities = Vec::with_capacity(records.len());

        for record in records {
            let (Some(latitude), Some(longitude)) = (record.latitude, record.longitude) else {
                log::warn!("City row '{}' dropped: latitude/longitude missing or invalid.", record.city);
                continue;
            };
            if record.city.is_empty() {
                log::warn!("City row without a name dropped.");
                continue;
            }
            if !seen.insert((record.city.clone(), record.country.clone())) {
                continue;
            }

            let mut city = City::new(record.city, record.country, latitude, longitude);
            for (hub, distance) in record.hub_distances {
                match distance {
                    Some(d) if d >= 0.0 => {
                        city.hub_distances.insert(hub, d);
                    }
                    Some(d) => log::warn!("Negative distance {} from '{}' to hub '{}' ignored.", d, city.name, hub),
                    None => {}
                }
            }
            cities.push(city);
        }

        let catalog = Self::new(cities);
        log::info!("City catalog ready with {} cities.", catalog.len());
        catalog
    }

    /// Loads and cleans a CSV city table.
    pub fn from_csv_file(file_path: &str) -> Result<Self> {
        let records = parse_city_csv(file_path)?;
        Ok(Self::from_records(records))
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.index_of(name).map(|i| &self.cities[i])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Distance in km between the city at `city_index` and the hub at `hub_index`.
    ///
    /// Uses the precomputed table value when present and falls back to the
    /// great-circle distance between both coordinates otherwise.
    pub fn hub_distance_by_index(&self, city_index: usize, hub_index: usize) -> f64 {
        if city_index == hub_index {
            return 0.0;
        }
        let city = &self.cities[city_index];
        let hub = &self.cities[hub_index];

        city.distance_to_hub(&hub.name).unwrap_or_else(|| {
            let distance = haversine_km(city.latitude, city.longitude, hub.latitude, hub.longitude);
            log::debug!("No table distance {} -> {}, using great-circle {} km.", city.name, hub.name, distance);
            distance
        })
    }

    /// Name based variant of [`CityCatalog::hub_distance_by_index`]; `None` if either city is unknown.
    pub fn hub_distance(&self, city: &str, hub: &str) -> Option<f64> {
        Some(self.hub_distance_by_index(self.index_of(city)?, self.index_of(hub)?))
    }
}
