use crate::error::SubmissionError;
use crate::models::ImageAttachment;
use crate::wizard::Draft;
use reqwest::multipart::Form;

/// Multipart field name shared by every image part
pub const IMAGE_FIELD: &str = "propertyImages";

/// Multipart field name carrying the GeoJSON location
pub const LOCATION_FIELD: &str = "location";

/// Create-property request body, kept inspectable until it is turned into a form
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    fields: Vec<(&'static str, String)>,
    images: Vec<ImageAttachment>,
}

impl SubmissionPayload {
    /// Text fields in the order they will be sent, location included
    pub fn fields(&self) -> &[(&'static str, String)] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn images(&self) -> &[ImageAttachment] {
        &self.images
    }

    pub fn into_form(self) -> Result<Form, SubmissionError> {
        let mut form = Form::new();

        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        for image in self.images {
            let part = image
                .into_part()
                .map_err(|e| SubmissionError::Encode(e.to_string()))?;
            form = form.part(IMAGE_FIELD, part);
        }

        Ok(form)
    }
}

/// Turns a completed draft into the create-property payload
pub struct SubmissionBuilder;

impl SubmissionBuilder {
    // Tag sets (nearbyPlaces, amenities) are deliberately not forwarded.
    pub fn build(draft: &Draft) -> Result<SubmissionPayload, SubmissionError> {
        let fields = vec![
            ("propertyType", enum_text(draft.property_type.map(|v| v.as_str()))),
            ("BHK", draft.bhk.to_string()),
            ("furnishing", enum_text(draft.furnishing.map(|v| v.as_str()))),
            ("address", draft.address.clone()),
            ("squareFeet", draft.square_feet.to_string()),
            ("type", enum_text(draft.listing_type.map(|v| v.as_str()))),
            ("rent", draft.rent.to_string()),
            ("deposit", draft.deposit.to_string()),
            ("price", draft.price.to_string()),
            ("description", draft.description.clone()),
            ("title", draft.title.clone()),
            (LOCATION_FIELD, serde_json::to_string(&draft.location)?),
        ];

        Ok(SubmissionPayload {
            fields,
            images: draft.images.clone(),
        })
    }
}

fn enum_text(value: Option<&'static str>) -> String {
    value.unwrap_or_default().to_string()
}
