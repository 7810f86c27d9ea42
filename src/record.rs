use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{collector::TripFields, geo_location::Location, weather::WeatherReading};

/// Placeholder written wherever a value could not be fetched.
/// A blank cell would shift the next row's "first empty row" calculation.
pub const SENTINEL: &str = "null";

/// A single spreadsheet value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn sentinel() -> Self {
        Cell::Text(SENTINEL.to_string())
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Cell::Text(s) if s == SENTINEL)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// Number of columns in a trip row.
pub const COLUMN_COUNT: usize = 14;

/// Worksheet columns in the order a trip row is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Time,
    Location,
    GroundTemp,
    CloudCover,
    AirPressure,
    WindDirection,
    WindSpeed,
    FishSpecies,
    FishSize,
    WaterClarity,
    LureType,
    LureColour,
    RetrievalSpeed,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Date,
        Column::Time,
        Column::Location,
        Column::GroundTemp,
        Column::CloudCover,
        Column::AirPressure,
        Column::WindDirection,
        Column::WindSpeed,
        Column::FishSpecies,
        Column::FishSize,
        Column::WaterClarity,
        Column::LureType,
        Column::LureColour,
        Column::RetrievalSpeed,
    ];

    /// Header text of the column in the worksheet.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Time => "time",
            Column::Location => "location",
            Column::GroundTemp => "ground_temp",
            Column::CloudCover => "cloud_cover",
            Column::AirPressure => "air_pressure",
            Column::WindDirection => "wind_direction",
            Column::WindSpeed => "wind_speed",
            Column::FishSpecies => "fish_species",
            Column::FishSize => "fish_size",
            Column::WaterClarity => "water_clarity",
            Column::LureType => "lure_type",
            Column::LureColour => "lure_colour",
            Column::RetrievalSpeed => "retrieval_speed",
        }
    }
}

/// Enrichment gathered after the prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxData {
    pub location: Location,
    pub weather: WeatherReading,
}

/// One complete trip row. Built once, never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    cells: [Cell; COLUMN_COUNT],
}

impl TripRecord {
    /// Merges the prompted fields, the enrichment and a single timestamp
    /// capture into a row laid out as [`Column::ALL`].
    pub fn assemble(fields: TripFields, aux: AuxData, now: NaiveDateTime) -> Self {
        let location = aux.location.city.map(Cell::Text).unwrap_or_else(Cell::sentinel);
        let weather = aux.weather;

        TripRecord {
            cells: [
                Cell::Text(now.format("%Y-%m-%d").to_string()),
                Cell::Text(now.format("%H:%M:%S").to_string()),
                location,
                weather.temperature,
                weather.cloud_cover,
                weather.pressure,
                weather.wind_direction,
                weather.wind_speed,
                Cell::Text(fields.species),
                Cell::Number(fields.size),
                Cell::Text(fields.water_clarity),
                Cell::Text(fields.lure_type.as_str().to_string()),
                Cell::Text(fields.lure_colour),
                Cell::Text(fields.retrieval_speed),
            ],
        }
    }

    pub fn get(&self, column: Column) -> &Cell {
        &self.cells[column as usize]
    }

    pub fn values(&self) -> &[Cell] {
        &self.cells
    }

    /// Columns paired with their values, in row order.
    pub fn cells(&self) -> impl Iterator<Item = (Column, &Cell)> {
        Column::ALL.into_iter().zip(self.cells.iter())
    }

    /// Two-column listing shown to the angler before the write.
    pub fn summary(&self) -> String {
        self.cells()
            .map(|(column, cell)| format!("{:<16}{}", column.name(), cell))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
