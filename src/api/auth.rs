use super::client::{ensure_success, ApiClient};
use crate::submission::{CredentialProvider, FileTokenStore};
use anyhow::{Context, Result};
use reqwest::Response;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    user_email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Sign-up details for `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "userEmail")]
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailRequest<'a> {
    user_email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtpRequest<'a> {
    user_email: &'a str,
    otp_code: &'a str,
}

// The reset endpoint takes `email`, unlike the rest of /auth.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetRequest<'a> {
    email: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

/// Account calls against `/auth`, persisting the issued token locally
pub struct AuthClient {
    api: ApiClient,
    store: FileTokenStore,
}

impl AuthClient {
    pub fn new(api: ApiClient, store: FileTokenStore) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &FileTokenStore {
        &self.store
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B, action: &str) -> Result<Response> {
        let response = self
            .api
            .http()
            .post(self.api.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", path))?;

        ensure_success(response, action).await
    }

    /// `POST /auth/login`; the token is written to the store on success
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .post(
                "/auth/login",
                &LoginRequest {
                    user_email: email,
                    password,
                },
                "log in",
            )
            .await?;

        let body: LoginResponse = response
            .json()
            .await
            .context("Login response had no token")?;

        self.store.save(&body.token)?;
        info!("Signed in as {}", email);
        Ok(())
    }

    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        info!("Signed out");
        Ok(())
    }

    /// `POST /auth/register`. The account stays unverified until [`Self::verify_email`].
    pub async fn register(&self, account: &NewAccount) -> Result<()> {
        self.post("/auth/register", account, "register").await?;
        info!("📧 Registered {}, verification code sent", account.email);
        Ok(())
    }

    pub async fn verify_email(&self, email: &str, code: &str) -> Result<()> {
        let body = OtpRequest {
            user_email: email,
            otp_code: code,
        };
        self.post("/auth/verify-email", &body, "verify email").await?;
        info!("Verified {}", email);
        Ok(())
    }

    pub async fn resend_verification(&self, email: &str) -> Result<()> {
        let body = EmailRequest { user_email: email };
        self.post("/auth/resend-verification-email", &body, "resend verification code")
            .await?;
        Ok(())
    }

    /// First step of a password reset: mail a one-time code
    pub async fn send_reset_code(&self, email: &str) -> Result<()> {
        let body = EmailRequest { user_email: email };
        self.post("/auth/forgot-password/send-otp", &body, "send reset code")
            .await?;
        info!("📧 Reset code sent to {}", email);
        Ok(())
    }

    pub async fn verify_reset_code(&self, email: &str, code: &str) -> Result<()> {
        let body = OtpRequest {
            user_email: email,
            otp_code: code,
        };
        self.post("/auth/forgot-password/verify-otp", &body, "verify reset code")
            .await?;
        Ok(())
    }

    /// Last step of a password reset, after the code was verified
    pub async fn reset_password(&self, email: &str, new_password: &str) -> Result<()> {
        let body = ResetRequest {
            email,
            new_password,
        };
        self.post("/auth/forgot-password", &body, "reset password").await?;
        info!("Password reset for {}", email);
        Ok(())
    }

    /// `POST /auth/change-password` as the signed-in user
    pub async fn change_password(&self, current_password: &str, new_password: &str) -> Result<()> {
        let token = self
            .store
            .bearer_token()
            .context("User not authenticated")?;

        let response = self
            .api
            .http()
            .post(self.api.url("/auth/change-password"))
            .bearer_auth(token)
            .json(&ChangePasswordRequest {
                current_password,
                new_password,
            })
            .send()
            .await
            .context("Failed to reach change-password endpoint")?;

        ensure_success(response, "change password").await?;
        info!("Password updated");
        Ok(())
    }
}
