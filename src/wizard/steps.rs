//! Per-step form state. Each form is seeded from the current draft when the
//! step is entered and turned into a [`DraftPatch`] when the user moves on.

use super::draft::{Draft, DraftPatch};
use crate::models::{
    Amenity, Furnishing, GeoPoint, ImageAttachment, ListingType, NearbyPlace, PropertyCategory,
};
use serde::Deserialize;
use std::collections::BTreeSet;

/// Property basics: category, size, furnishing, address and tags
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step1Form {
    pub property_type: Option<PropertyCategory>,
    #[serde(rename = "BHK")]
    pub bhk: u32,
    pub furnishing: Option<Furnishing>,
    pub address: String,
    pub nearby_places: BTreeSet<NearbyPlace>,
    pub amenities: BTreeSet<Amenity>,
}

impl Step1Form {
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            property_type: draft.property_type,
            bhk: draft.bhk,
            furnishing: draft.furnishing,
            address: draft.address.clone(),
            nearby_places: draft.nearby_places.clone(),
            amenities: draft.amenities.clone(),
        }
    }

    /// Add the place if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_place(&mut self, place: NearbyPlace) -> bool {
        toggle(&mut self.nearby_places, place)
    }

    /// Add the amenity if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_amenity(&mut self, amenity: Amenity) -> bool {
        toggle(&mut self.amenities, amenity)
    }

    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            property_type: self.property_type,
            bhk: Some(self.bhk),
            furnishing: self.furnishing,
            address: Some(self.address),
            nearby_places: Some(self.nearby_places),
            amenities: Some(self.amenities),
            ..Default::default()
        }
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

/// Image selection, in the order the user added them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step2Form {
    pub images: Vec<ImageAttachment>,
}

impl Step2Form {
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            images: draft.images.clone(),
        }
    }

    pub fn add_images(&mut self, images: impl IntoIterator<Item = ImageAttachment>) {
        self.images.extend(images);
    }

    /// Remove one image, keeping the others in their original order
    pub fn remove_image(&mut self, index: usize) -> Option<ImageAttachment> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            images: Some(self.images),
            ..Default::default()
        }
    }
}

/// Listing details: pricing, description and location
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step3Form {
    pub title: String,
    pub square_feet: u32,
    #[serde(rename = "type")]
    pub listing_type: Option<ListingType>,
    pub rent: f64,
    pub deposit: f64,
    pub price: f64,
    pub description: String,
    pub location: GeoPoint,
}

impl Step3Form {
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            title: draft.title.clone(),
            square_feet: draft.square_feet,
            listing_type: draft.listing_type,
            rent: draft.rent,
            deposit: draft.deposit,
            price: draft.price,
            description: draft.description.clone(),
            location: draft.location.clone(),
        }
    }

    pub fn set_coordinates(&mut self, longitude: f64, latitude: f64) {
        self.location = GeoPoint::new(longitude, latitude);
    }

    pub fn into_patch(self) -> DraftPatch {
        DraftPatch {
            title: Some(self.title),
            square_feet: Some(self.square_feet),
            listing_type: self.listing_type,
            rent: Some(self.rent),
            deposit: Some(self.deposit),
            price: Some(self.price),
            description: Some(self.description),
            location: Some(self.location),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn place() -> impl Strategy<Value = NearbyPlace> {
        prop_oneof![
            Just(NearbyPlace::School),
            Just(NearbyPlace::Hospital),
            Just(NearbyPlace::Park),
            Just(NearbyPlace::Garden),
        ]
    }

    fn amenity() -> impl Strategy<Value = Amenity> {
        prop_oneof![
            Just(Amenity::Bed),
            Just(Amenity::Parking),
            Just(Amenity::WiFi),
            Just(Amenity::SwimmingPool),
        ]
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut form = Step1Form::default();
        assert!(form.toggle_place(NearbyPlace::School));
        assert!(form.nearby_places.contains(&NearbyPlace::School));
        assert!(!form.toggle_place(NearbyPlace::School));
        assert!(form.nearby_places.is_empty());
    }

    #[test]
    fn step1_form_is_seeded_from_draft() {
        let mut draft = Draft::default();
        draft.address = "12 Main St".to_string();
        draft.amenities.insert(Amenity::WiFi);

        let form = Step1Form::from_draft(&draft);
        assert_eq!(form.address, "12 Main St");
        assert!(form.amenities.contains(&Amenity::WiFi));
    }

    #[test]
    fn remove_image_out_of_range_is_none() {
        let mut form = Step2Form::default();
        form.add_images([ImageAttachment::new("a.jpg", vec![1])]);
        assert!(form.remove_image(3).is_none());
        assert_eq!(form.images.len(), 1);
    }

    #[test]
    fn step3_form_deserializes_wire_names() {
        let form: Step3Form = serde_json::from_value(serde_json::json!({
            "title": "Sunny Flat",
            "squareFeet": 850,
            "type": "Rental",
            "price": 15000,
            "description": "Bright 2BHK",
            "location": { "type": "Point", "coordinates": [77.5, 12.9] }
        }))
        .unwrap();

        assert_eq!(form.listing_type, Some(ListingType::Rental));
        assert_eq!(form.square_feet, 850);
        assert_eq!(form.rent, 0.0);
        assert_eq!(form.location.latitude(), 12.9);
    }

    #[test]
    fn step3_form_accepts_decimal_amounts() {
        let form: Step3Form = serde_json::from_value(serde_json::json!({
            "squareFeet": 1200,
            "type": "Sales",
            "deposit": 2500.75,
            "price": 1499999.5,
            "description": "Corner plot"
        }))
        .unwrap();

        assert_eq!(form.price, 1499999.5);
        assert_eq!(form.deposit, 2500.75);
        assert_eq!(form.into_patch().price, Some(1499999.5));
    }

    proptest! {
        #[test]
        fn double_toggle_restores_tag_sets(
            initial_places in proptest::collection::btree_set(place(), 0..4),
            initial_amenities in proptest::collection::btree_set(amenity(), 0..4),
            p in place(),
            a in amenity(),
        ) {
            let mut form = Step1Form {
                nearby_places: initial_places.clone(),
                amenities: initial_amenities.clone(),
                ..Default::default()
            };
            form.toggle_place(p);
            form.toggle_place(p);
            form.toggle_amenity(a);
            form.toggle_amenity(a);
            prop_assert_eq!(form.nearby_places, initial_places);
            prop_assert_eq!(form.amenities, initial_amenities);
        }

        #[test]
        fn removing_an_image_keeps_relative_order(count in 1usize..8, index in 0usize..8) {
            let mut form = Step2Form::default();
            form.add_images((0..count).map(|i| ImageAttachment::new(format!("img{}.png", i), vec![i as u8])));
            let mut expected: Vec<String> = form.images.iter().map(|img| img.name.clone()).collect();
            if index < expected.len() {
                expected.remove(index);
            }

            form.remove_image(index);
            let names: Vec<String> = form.images.iter().map(|img| img.name.clone()).collect();
            prop_assert_eq!(names, expected);
        }
    }
}
