use super::client::{ensure_success, ApiClient};
use crate::models::Property;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Mutually exclusive listing filters offered by the browse page
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListingFilter {
    #[default]
    All,
    Rental,
    Sales,
    PriceRange { min: u64, max: u64 },
    Nearby { latitude: f64, longitude: f64, radius: f64 },
}

impl ListingFilter {
    fn path(&self) -> &'static str {
        match self {
            ListingFilter::All => "/properties",
            ListingFilter::Rental => "/properties/user/rental",
            ListingFilter::Sales => "/properties/user/sales",
            ListingFilter::PriceRange { .. } => "/properties/user/price-filter",
            ListingFilter::Nearby { .. } => "/properties/user/nearby",
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            ListingFilter::PriceRange { min, max } => {
                vec![("minPrice", min.to_string()), ("maxPrice", max.to_string())]
            }
            ListingFilter::Nearby {
                latitude,
                longitude,
                radius,
            } => vec![
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("radius", radius.to_string()),
            ],
            _ => Vec::new(),
        }
    }
}

/// List endpoints answer with either a bare array or `{ "properties": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListingResponse {
    Bare(Vec<Property>),
    Wrapped { properties: Vec<Property> },
}

impl From<ListingResponse> for Vec<Property> {
    fn from(response: ListingResponse) -> Self {
        match response {
            ListingResponse::Bare(properties) => properties,
            ListingResponse::Wrapped { properties } => properties,
        }
    }
}

/// Current browse results and the filter that produced them
pub struct ListingView {
    api: ApiClient,
    filter: ListingFilter,
    results: Vec<Property>,
}

impl ListingView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            filter: ListingFilter::All,
            results: Vec::new(),
        }
    }

    pub fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    pub fn results(&self) -> &[Property] {
        &self.results
    }

    /// Fetch with `filter` and replace the result set. On failure the previous results stay.
    pub async fn apply(&mut self, filter: ListingFilter) -> Result<&[Property]> {
        match fetch_listings(&self.api, &filter).await {
            Ok(properties) => {
                info!("Loaded {} properties for {:?}", properties.len(), filter);
                self.results = properties;
                self.filter = filter;
                Ok(self.results.as_slice())
            }
            Err(e) => {
                warn!("Keeping previous results, fetch failed: {:#}", e);
                Err(e)
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<&[Property]> {
        self.apply(self.filter.clone()).await
    }
}

pub async fn fetch_listings(api: &ApiClient, filter: &ListingFilter) -> Result<Vec<Property>> {
    let url = api.url(filter.path());
    debug!("Fetching URL: {}", url);

    let response = api
        .http()
        .get(&url)
        .query(&filter.query())
        .send()
        .await
        .context("Failed to fetch properties")?;

    let response = ensure_success(response, "fetch properties").await?;
    let listing: ListingResponse = response
        .json()
        .await
        .context("Failed to parse property list")?;

    Ok(listing.into())
}

/// Single property detail
pub async fn fetch_property(api: &ApiClient, id: &str) -> Result<Property> {
    let url = api.url(&format!("/properties/{}", id));
    debug!("Fetching URL: {}", url);

    let response = api
        .http()
        .get(&url)
        .send()
        .await
        .context("Failed to fetch property")?;

    let response = ensure_success(response, "fetch property").await?;
    response
        .json()
        .await
        .context("Failed to parse property detail")
}
