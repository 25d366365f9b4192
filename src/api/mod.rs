pub mod admin;
pub mod auth;
pub mod client;
pub mod listings;
pub mod profile;

pub use admin::{AdminClient, DashboardStats, PendingPage};
pub use auth::{AuthClient, NewAccount};
pub use client::ApiClient;
pub use listings::{fetch_listings, fetch_property, ListingFilter, ListingView};
pub use profile::{ProfileClient, ProfileUpdate, UserProfile};
