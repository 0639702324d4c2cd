use chrono::{DateTime, Utc};
use serde::{de::Visitor, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PinStoreError;

/// Marker color (closed set, stored lowercase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl PinColor {
    pub const ALL: [PinColor; 6] = [
        PinColor::Red,
        PinColor::Blue,
        PinColor::Green,
        PinColor::Yellow,
        PinColor::Purple,
        PinColor::Orange,
    ];

    /// Wire/storage name
    pub fn as_str(self) -> &'static str {
        match self {
            PinColor::Red => "red",
            PinColor::Blue => "blue",
            PinColor::Green => "green",
            PinColor::Yellow => "yellow",
            PinColor::Purple => "purple",
            PinColor::Orange => "orange",
        }
    }

    /// Display name used when the user has no override
    pub fn default_label(self) -> &'static str {
        match self {
            PinColor::Red => "Red",
            PinColor::Blue => "Blue",
            PinColor::Green => "Green",
            PinColor::Yellow => "Yellow",
            PinColor::Purple => "Purple",
            PinColor::Orange => "Orange",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            PinColor::Red => "#EF4444",
            PinColor::Blue => "#3B82F6",
            PinColor::Green => "#22C55E",
            PinColor::Yellow => "#EAB308",
            PinColor::Purple => "#A855F7",
            PinColor::Orange => "#F97316",
        }
    }

    /// Lenient decoding for nullable wire values: anything unknown is red
    pub fn from_wire(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for PinColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PinColor::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown pin color: {}", s))
    }
}

impl fmt::Display for PinColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Latitude in [-90, 90], longitude in [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// A saved map marker
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub color: PinColor,
}

impl Pin {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// "37.8000, -122.4000"
    pub fn coordinates_label(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// "January 5, 2024"
    pub fn created_label(&self) -> String {
        self.created_at.format("%B %-d, %Y").to_string()
    }
}

/// Row as returned by the datastore
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PinRow {
    #[serde(deserialize_with = "deserialize_row_id")]
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row sent on insert; id and created_at are assigned server-side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPinRow {
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub image_url: Option<String>,
    pub color: PinColor,
}

impl TryFrom<PinRow> for Pin {
    type Error = PinStoreError;

    fn try_from(row: PinRow) -> Result<Self, Self::Error> {
        if row.id.trim().is_empty() {
            return Err(PinStoreError::InvalidRow("missing id".to_string()));
        }
        if !Coordinates::new(row.latitude, row.longitude).is_valid() {
            return Err(PinStoreError::InvalidRow(format!(
                "pin {} has coordinates out of range ({}, {})",
                row.id, row.latitude, row.longitude
            )));
        }
        if row.description.trim().is_empty() {
            return Err(PinStoreError::InvalidRow(format!("pin {} has an empty description", row.id)));
        }

        Ok(Pin {
            color: PinColor::from_wire(row.color.as_deref()),
            image_url: row.image_url.filter(|url| !url.trim().is_empty()),
            id: row.id,
            latitude: row.latitude,
            longitude: row.longitude,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

/// Pin about to be created
#[derive(Debug, Clone, PartialEq)]
pub struct PinCandidate {
    pub coordinates: Coordinates,
    pub description: String,
    pub image_url: Option<String>,
    pub color: Option<PinColor>,
}

impl PinCandidate {
    /// Required-field guard: trimmed description non-empty, coordinates in range
    pub fn is_submittable(&self) -> bool {
        !self.description.trim().is_empty() && self.coordinates.is_valid()
    }

    /// Build the insert row, or `None` when the guard fails
    pub fn to_row(&self) -> Option<NewPinRow> {
        if !self.is_submittable() {
            return None;
        }
        Some(NewPinRow {
            latitude: self.coordinates.latitude,
            longitude: self.coordinates.longitude,
            description: self.description.trim().to_string(),
            image_url: self
                .image_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            color: self.color.unwrap_or_default(),
        })
    }
}

/// Accepts both uuid/text ids and bigint ids
fn deserialize_row_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct RowIdVisitor;

    impl<'de> Visitor<'de> for RowIdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("string or integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(RowIdVisitor)
}

/// Newest first; ties keep their incoming order
pub fn sort_newest_first(pins: &mut [Pin]) {
    pins.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
