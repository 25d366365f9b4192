use chrono::{DateTime, Utc};
use reqwest::multipart::Part;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of building being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PropertyCategory {
    Apartment,
    #[serde(rename = "Independent House")]
    IndependentHouse,
    PentHouse,
}

impl PropertyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Apartment => "Apartment",
            PropertyCategory::IndependentHouse => "Independent House",
            PropertyCategory::PentHouse => "PentHouse",
        }
    }
}

/// Furnishing state of the property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Furnishing {
    Furnished,
    #[serde(rename = "Semi-Furnished")]
    SemiFurnished,
    #[serde(rename = "Un-Furnished")]
    UnFurnished,
}

impl Furnishing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Furnishing::Furnished => "Furnished",
            Furnishing::SemiFurnished => "Semi-Furnished",
            Furnishing::UnFurnished => "Un-Furnished",
        }
    }
}

/// Whether the listing is for sale or for rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ListingType {
    Sales,
    Rental,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Sales => "Sales",
            ListingType::Rental => "Rental",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NearbyPlace {
    School,
    Hospital,
    Park,
    Garden,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Amenity {
    Bed,
    Parking,
    #[serde(rename = "Wi-Fi")]
    WiFi,
    #[serde(rename = "Swimming Pool")]
    SwimmingPool,
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(PropertyCategory, Furnishing, ListingType);

/// GeoJSON point; coordinates are `[longitude, latitude]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(serialize_with = "serialize_coordinates")]
    pub coordinates: [f64; 2],
}

/// Whole-number coordinates are written without a fraction (`[0,0]`, not `[0.0,0.0]`)
fn serialize_coordinates<S>(coordinates: &[f64; 2], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeTuple;

    let mut tuple = serializer.serialize_tuple(2)?;
    for value in coordinates {
        if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
            tuple.serialize_element(&(*value as i64))?;
        } else {
            tuple.serialize_element(value)?;
        }
    }
    tuple.end()
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// An image picked for upload, held in memory until submission
#[derive(Clone, PartialEq)]
pub struct ImageAttachment {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Multipart file part; unknown types go out as `application/octet-stream`
    pub fn into_part(self) -> reqwest::Result<Part> {
        let mime = self
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Part::bytes(self.bytes).file_name(self.name).mime_str(&mime)
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}

/// Owner summary embedded in listing responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: Option<bool>,
    pub profile_photo: Option<String>,
}

/// Property listing as stored by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub property_type: Option<String>,
    #[serde(rename = "BHK", default)]
    pub bhk: serde_json::Value,
    pub furnishing: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub nearby_places: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(rename = "type")]
    pub listing_type: Option<String>,
    #[serde(default)]
    pub square_feet: u64,
    #[serde(default)]
    pub rent: f64,
    #[serde(default)]
    pub deposit: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub images: Vec<String>,
    pub owner: Option<Owner>,
    #[serde(default)]
    pub is_admin_approved: bool,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_wire_labels() {
        assert_eq!(
            serde_json::to_string(&PropertyCategory::IndependentHouse).unwrap(),
            "\"Independent House\""
        );
        assert_eq!(serde_json::to_string(&Amenity::WiFi).unwrap(), "\"Wi-Fi\"");
        assert_eq!(Furnishing::UnFurnished.to_string(), "Un-Furnished");
    }

    #[test]
    fn geo_point_serializes_as_geojson() {
        let point = GeoPoint::new(77.5, 12.9);
        assert_eq!(
            serde_json::to_string(&point).unwrap(),
            r#"{"type":"Point","coordinates":[77.5,12.9]}"#
        );
        assert_eq!(GeoPoint::default().coordinates, [0.0, 0.0]);
    }

    #[test]
    fn whole_coordinates_are_written_without_fraction() {
        assert_eq!(
            serde_json::to_string(&GeoPoint::default()).unwrap(),
            r#"{"type":"Point","coordinates":[0,0]}"#
        );
        assert_eq!(
            serde_json::to_string(&GeoPoint::new(77.0, -12.25)).unwrap(),
            r#"{"type":"Point","coordinates":[77,-12.25]}"#
        );

        let back: GeoPoint = serde_json::from_str(r#"{"type":"Point","coordinates":[0,0]}"#).unwrap();
        assert_eq!(back, GeoPoint::default());
    }

    #[test]
    fn property_parses_server_record() {
        let raw = serde_json::json!({
            "_id": "66f1",
            "title": "Sunny Flat",
            "propertyType": "Apartment",
            "BHK": "2",
            "furnishing": "Furnished",
            "address": "12 Main St",
            "type": "Rental",
            "squareFeet": 850,
            "rent": 15000,
            "deposit": 30000,
            "price": 15000,
            "description": "Bright 2BHK",
            "isAdminApproved": false,
            "isActive": false,
            "createdAt": "2024-10-01T10:00:00Z",
            "updatedAt": "2024-10-01T10:00:00Z"
        });

        let property: Property = serde_json::from_value(raw).unwrap();
        assert_eq!(property.id, "66f1");
        assert_eq!(property.listing_type.as_deref(), Some("Rental"));
        assert_eq!(property.square_feet, 850);
        assert!(property.nearby_places.is_empty());
        assert!(property.created_at.is_some());
    }

    #[test]
    fn property_keeps_decimal_amounts() {
        let property: Property = serde_json::from_value(serde_json::json!({
            "_id": "66f2",
            "type": "Sales",
            "deposit": 100,
            "price": 2500.75
        }))
        .unwrap();

        assert_eq!(property.price, 2500.75);
        assert_eq!(property.deposit, 100.0);
        assert_eq!(property.rent, 0.0);
    }
}
