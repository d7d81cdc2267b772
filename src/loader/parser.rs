use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::io;

use crate::api::city_dto::CityRecordDto;
use crate::error::{Error, Result};

pub const CITY_COLUMN: &str = "City";
pub const COUNTRY_COLUMN: &str = "Country";
pub const LATITUDE_COLUMN: &str = "Latitude";
pub const LONGITUDE_COLUMN: &str = "Longitude";

/// Prefix of the per-hub distance columns, e.g. `Distance to Doha`.
pub const HUB_DISTANCE_PREFIX: &str = "Distance to ";

const REQUIRED_COLUMNS: [&str; 4] = [CITY_COLUMN, COUNTRY_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN];

/// Parses a JSON file into a given type `T`.
///
/// Errors are automatically converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path)?;

    let parsed_data: T = serde_json::from_str(&data)?;

    Ok(parsed_data)
}

/// Reads the city table from a CSV file on disk.
pub fn parse_city_csv(file_path: &str) -> Result<Vec<CityRecordDto>> {
    let file = fs::File::open(file_path)?;
    let records = read_city_table(file)?;
    log::info!("Read {} city rows from '{}'.", records.len(), file_path);
    Ok(records)
}

/// Reads a city table from any CSV source.
///
/// Header names are trimmed before matching. `City`, `Country`, `Latitude` and
/// `Longitude` are mandatory; every `Distance to <Hub>` column becomes one entry
/// of [`CityRecordDto::hub_distances`]. Other columns are ignored. Cells are
/// trimmed, and numeric cells that fail to parse are kept as `None` so the
/// catalog can decide what to do with them.
pub fn read_city_table<R: io::Read>(reader: R) -> Result<Vec<CityRecordDto>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).flexible(true).from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let missing: Vec<String> = REQUIRED_COLUMNS.iter().filter(|c| !headers.iter().any(|h| h == *c)).map(|c| c.to_string()).collect();
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }

    let column = |name: &str| headers.iter().position(|h| h == name).ok_or_else(|| Error::MissingColumns(vec![name.to_string()]));
    let city_col = column(CITY_COLUMN)?;
    let country_col = column(COUNTRY_COLUMN)?;
    let lat_col = column(LATITUDE_COLUMN)?;
    let lon_col = column(LONGITUDE_COLUMN)?;

    let hub_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| h.strip_prefix(HUB_DISTANCE_PREFIX).map(|hub| (i, hub.trim().to_string())))
        .filter(|(_, hub)| !hub.is_empty())
        .collect();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let text = |i: usize| row.get(i).unwrap_or("").trim().to_string();
        let number = |i: usize| parse_number(row.get(i).unwrap_or(""));

        let hub_distances: BTreeMap<String, Option<f64>> = hub_cols.iter().map(|(i, hub)| (hub.clone(), number(*i))).collect();

        records.push(CityRecordDto {
            city: text(city_col),
            country: text(country_col),
            latitude: number(lat_col),
            longitude: number(lon_col),
            hub_distances,
        });
    }

    Ok(records)
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
