//! JSON description of a listing, used by the command-line uploader to fill
//! in the three wizard steps without a UI.
//!
//! ```json
//! {
//!   "step1": { "propertyType": "Apartment", "BHK": 2, "furnishing": "Furnished",
//!              "address": "12 Main St", "nearbyPlaces": ["School"], "amenities": ["Wi-Fi"] },
//!   "images": ["photos/front.jpg", "photos/kitchen.png"],
//!   "step3": { "title": "Sunny Flat", "squareFeet": 850, "type": "Rental", "rent": 15000,
//!              "deposit": 30000, "price": 15000, "description": "Bright 2BHK",
//!              "location": { "type": "Point", "coordinates": [77.5, 12.9] } }
//! }
//! ```

use crate::models::ImageAttachment;
use crate::wizard::{Step1Form, Step2Form, Step3Form};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    step1: Step1Form,
    #[serde(default)]
    images: Vec<PathBuf>,
    #[serde(default)]
    step3: Step3Form,
}

/// All three steps, with images already read into memory
#[derive(Debug)]
pub struct Manifest {
    pub step1: Step1Form,
    pub step2: Step2Form,
    pub step3: Step3Form,
}

impl Manifest {
    /// Read a manifest; image paths are resolved against the manifest's directory
    pub async fn load(path: impl AsRef<Path>) -> Result<Manifest> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        let manifest: RawManifest = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let mut step2 = Step2Form::default();
        for image in &manifest.images {
            step2.add_images([load_image(&base.join(image)).await?]);
        }

        Ok(Manifest {
            step1: manifest.step1,
            step2,
            step3: manifest.step3,
        })
    }
}

/// Read one image from disk, guessing its content type from the extension
pub async fn load_image(path: &Path) -> Result<ImageAttachment> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    debug!("Loaded {} ({:.2} KB)", name, bytes.len() as f64 / 1024.0);

    let attachment = ImageAttachment::new(name, bytes);
    Ok(match guess_mime(path) {
        Some(mime) => attachment.with_content_type(mime),
        None => attachment,
    })
}

fn guess_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
