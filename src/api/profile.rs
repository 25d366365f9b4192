use super::client::{ensure_success, ApiClient};
use crate::models::{ImageAttachment, Property};
use crate::submission::CredentialProvider;
use anyhow::{Context, Result};
use reqwest::multipart::Form;
use reqwest::Response;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// The signed-in user as returned by `GET /auth/detail`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(alias = "userEmail")]
    pub email: Option<String>,
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// New name and optional photo for `PUT /auth/edit-profile`
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub profile_photo: Option<ImageAttachment>,
}

#[derive(Deserialize)]
struct WishlistResponse {
    #[serde(default)]
    wishlist: Vec<Property>,
}

#[derive(Deserialize)]
struct OwnListingsResponse {
    #[serde(default)]
    properties: Vec<Property>,
}

/// Calls made on behalf of the signed-in user: profile, wishlist and own listings
pub struct ProfileClient {
    api: ApiClient,
    credentials: Arc<dyn CredentialProvider>,
}

impl ProfileClient {
    pub fn new(api: ApiClient, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self { api, credentials }
    }

    fn token(&self) -> Result<String> {
        self.credentials
            .bearer_token()
            .context("User not authenticated")
    }

    async fn get(&self, path: &str, action: &str) -> Result<Response> {
        let token = self.token()?;
        let response = self
            .api
            .http()
            .get(self.api.url(path))
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("Failed to {}", action))?;

        ensure_success(response, action).await
    }

    pub async fn detail(&self) -> Result<UserProfile> {
        self.get("/auth/detail", "fetch profile")
            .await?
            .json()
            .await
            .context("Failed to parse profile")
    }

    /// Sent as multipart so the photo can ride along with the names
    pub async fn edit_profile(&self, update: ProfileUpdate) -> Result<()> {
        let token = self.token()?;

        let mut form = Form::new()
            .text("firstName", update.first_name)
            .text("lastName", update.last_name);
        if let Some(photo) = update.profile_photo {
            let part = photo.into_part().context("Invalid profile photo")?;
            form = form.part("profilePhoto", part);
        }

        let response = self
            .api
            .http()
            .put(self.api.url("/auth/edit-profile"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .context("Failed to reach edit-profile endpoint")?;

        ensure_success(response, "update profile").await?;
        info!("Profile updated");
        Ok(())
    }

    pub async fn wishlist(&self) -> Result<Vec<Property>> {
        let body: WishlistResponse = self
            .get("/auth/getwishlist", "fetch wishlist")
            .await?
            .json()
            .await
            .context("Failed to parse wishlist")?;
        Ok(body.wishlist)
    }

    pub async fn add_to_wishlist(&self, property_id: &str) -> Result<()> {
        self.wishlist_action("/auth/addtowishlist", property_id, "add to wishlist")
            .await?;
        info!("❤️ Saved {}", property_id);
        Ok(())
    }

    pub async fn remove_from_wishlist(&self, property_id: &str) -> Result<()> {
        self.wishlist_action("/auth/removefromwishlist", property_id, "remove from wishlist")
            .await?;
        info!("Removed {} from wishlist", property_id);
        Ok(())
    }

    // The id travels in the query string; the body is an empty object.
    async fn wishlist_action(&self, path: &str, property_id: &str, action: &str) -> Result<()> {
        let token = self.token()?;
        let response = self
            .api
            .http()
            .post(self.api.url(path))
            .bearer_auth(token)
            .query(&[("propertyId", property_id)])
            .json(&serde_json::json!({}))
            .send()
            .await
            .with_context(|| format!("Failed to {}", action))?;

        ensure_success(response, action).await?;
        Ok(())
    }

    /// Listings the signed-in user has uploaded, approved or not
    pub async fn my_properties(&self) -> Result<Vec<Property>> {
        let body: OwnListingsResponse = self
            .get("/properties/user/allproperty", "fetch your properties")
            .await?
            .json()
            .await
            .context("Failed to parse your properties")?;
        Ok(body.properties)
    }
}
