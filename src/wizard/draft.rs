use crate::models::{
    Amenity, Furnishing, GeoPoint, ImageAttachment, ListingType, NearbyPlace, PropertyCategory,
};
use std::collections::BTreeSet;

/// Everything collected for one property submission across all three steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    // Step 1
    pub property_type: Option<PropertyCategory>,
    /// Bedroom count, 0 is a studio
    pub bhk: u32,
    pub furnishing: Option<Furnishing>,
    pub address: String,
    pub nearby_places: BTreeSet<NearbyPlace>,
    pub amenities: BTreeSet<Amenity>,

    // Step 2
    pub images: Vec<ImageAttachment>,

    // Step 3
    pub title: String,
    pub square_feet: u32,
    pub listing_type: Option<ListingType>,
    pub rent: f64,
    pub deposit: f64,
    pub price: f64,
    pub description: String,
    pub location: GeoPoint,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        *self == Draft::default()
    }

    /// Overwrite every field the patch carries, keep the rest
    pub fn apply(&mut self, patch: DraftPatch) {
        let DraftPatch {
            property_type,
            bhk,
            furnishing,
            address,
            nearby_places,
            amenities,
            images,
            title,
            square_feet,
            listing_type,
            rent,
            deposit,
            price,
            description,
            location,
        } = patch;

        if let Some(v) = property_type {
            self.property_type = Some(v);
        }
        if let Some(v) = bhk {
            self.bhk = v;
        }
        if let Some(v) = furnishing {
            self.furnishing = Some(v);
        }
        if let Some(v) = address {
            self.address = v;
        }
        if let Some(v) = nearby_places {
            self.nearby_places = v;
        }
        if let Some(v) = amenities {
            self.amenities = v;
        }
        if let Some(v) = images {
            self.images = v;
        }
        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = square_feet {
            self.square_feet = v;
        }
        if let Some(v) = listing_type {
            self.listing_type = Some(v);
        }
        if let Some(v) = rent {
            self.rent = v;
        }
        if let Some(v) = deposit {
            self.deposit = v;
        }
        if let Some(v) = price {
            self.price = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = location {
            self.location = v;
        }
    }
}

/// Partial draft produced by a single step. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftPatch {
    pub property_type: Option<PropertyCategory>,
    pub bhk: Option<u32>,
    pub furnishing: Option<Furnishing>,
    pub address: Option<String>,
    pub nearby_places: Option<BTreeSet<NearbyPlace>>,
    pub amenities: Option<BTreeSet<Amenity>>,
    pub images: Option<Vec<ImageAttachment>>,
    pub title: Option<String>,
    pub square_feet: Option<u32>,
    pub listing_type: Option<ListingType>,
    pub rent: Option<f64>,
    pub deposit: Option<f64>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub location: Option<GeoPoint>,
}

/// Holds the single in-memory draft of the active wizard session
#[derive(Debug, Default)]
pub struct DraftStore {
    draft: Draft,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn merge(&mut self, patch: DraftPatch) -> &Draft {
        self.draft.apply(patch);
        &self.draft
    }

    pub fn reset(&mut self) {
        self.draft = Draft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_fields_the_patch_does_not_carry() {
        let mut store = DraftStore::new();
        store.merge(DraftPatch {
            address: Some("12 Main St".to_string()),
            bhk: Some(2),
            ..Default::default()
        });
        let draft = store.merge(DraftPatch {
            price: Some(15000.0),
            ..Default::default()
        });

        assert_eq!(draft.address, "12 Main St");
        assert_eq!(draft.bhk, 2);
        assert_eq!(draft.price, 15000.0);
    }

    #[test]
    fn later_patch_wins_on_conflict() {
        let mut store = DraftStore::new();
        store.merge(DraftPatch {
            title: Some("First".to_string()),
            ..Default::default()
        });
        store.merge(DraftPatch {
            title: Some("Second".to_string()),
            ..Default::default()
        });
        assert_eq!(store.draft().title, "Second");
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut store = DraftStore::new();
        store.merge(DraftPatch {
            rent: Some(100.0),
            ..Default::default()
        });
        let before = store.draft().clone();
        store.merge(DraftPatch::default());
        assert_eq!(*store.draft(), before);
    }

    #[test]
    fn reset_restores_empty_draft() {
        let mut store = DraftStore::new();
        store.merge(DraftPatch {
            description: Some("Bright".to_string()),
            images: Some(vec![ImageAttachment::new("a.png", vec![1, 2])]),
            ..Default::default()
        });
        assert!(!store.draft().is_empty());

        store.reset();
        assert!(store.draft().is_empty());
        assert_eq!(store.draft().location.coordinates, [0.0, 0.0]);
    }
}
