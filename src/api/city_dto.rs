use std::collections::BTreeMap;

/// One cleaned row of the city table.
///
/// Coordinates and distances are `None` when the cell was empty or not a number.
/// `hub_distances` is keyed by hub city name, taken from the `Distance to <Hub>` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecordDto {
    pub city: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub hub_distances: BTreeMap<String, Option<f64>>,
}
