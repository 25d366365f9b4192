use anyhow::{bail, Context, Result};
use property_upload::api::{
    fetch_property, AdminClient, ApiClient, AuthClient, ListingFilter, ListingView, NewAccount,
    ProfileClient, ProfileUpdate,
};
use property_upload::manifest::{load_image, Manifest};
use property_upload::models::Property;
use property_upload::submission::{FileTokenStore, SubmissionGateway};
use property_upload::wizard::{Outcome, WizardSession};
use property_upload::{Config, WizardError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage:
  property-upload register <first-name> <last-name> <email> <password>
  property-upload verify <email> <code>
  property-upload resend-code <email>
  property-upload login <email> <password>
  property-upload logout
  property-upload forgot-password <email>
  property-upload reset-password <email> <code> <new-password>
  property-upload change-password <current> <new>
  property-upload profile
  property-upload edit-profile <first-name> <last-name> [photo]
  property-upload upload <listing.json>
  property-upload list [all | rental | sales | price <min> <max> | nearby <lat> <lon> <radius>]
  property-upload show <property-id>
  property-upload mine
  property-upload wishlist [add <property-id> | remove <property-id>]
  property-upload pending [page]
  property-upload approve <property-id>
  property-upload dashboard";

#[derive(Debug, PartialEq)]
enum Command {
    Register(NewAccount),
    Verify { email: String, code: String },
    ResendCode { email: String },
    Login { email: String, password: String },
    Logout,
    ForgotPassword { email: String },
    ResetPassword { email: String, code: String, password: String },
    ChangePassword { current: String, new: String },
    Profile,
    EditProfile { first_name: String, last_name: String, photo: Option<PathBuf> },
    Upload { manifest: PathBuf },
    List(ListingFilter),
    Show { id: String },
    Mine,
    Wishlist,
    Save { id: String },
    Unsave { id: String },
    Pending { page: u32 },
    Approve { id: String },
    Dashboard,
}

impl Command {
    fn parse(args: &[&str]) -> Result<Command> {
        Ok(match args {
            ["register", first, last, email, password] => Command::Register(NewAccount {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            }),
            ["verify", email, code] => Command::Verify {
                email: email.to_string(),
                code: code.to_string(),
            },
            ["resend-code", email] => Command::ResendCode { email: email.to_string() },
            ["login", email, password] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ["logout"] => Command::Logout,
            ["forgot-password", email] => Command::ForgotPassword { email: email.to_string() },
            ["reset-password", email, code, password] => Command::ResetPassword {
                email: email.to_string(),
                code: code.to_string(),
                password: password.to_string(),
            },
            ["change-password", current, new] => Command::ChangePassword {
                current: current.to_string(),
                new: new.to_string(),
            },
            ["profile"] => Command::Profile,
            ["edit-profile", first, last, rest @ ..] => Command::EditProfile {
                first_name: first.to_string(),
                last_name: last.to_string(),
                photo: match rest {
                    [] => None,
                    [photo] => Some(PathBuf::from(*photo)),
                    _ => bail!("{}", USAGE),
                },
            },
            ["upload", manifest] => Command::Upload { manifest: PathBuf::from(*manifest) },
            ["list", rest @ ..] => Command::List(parse_filter(rest)?),
            ["show", id] => Command::Show { id: id.to_string() },
            ["mine"] => Command::Mine,
            ["wishlist"] => Command::Wishlist,
            ["wishlist", "add", id] => Command::Save { id: id.to_string() },
            ["wishlist", "remove", id] => Command::Unsave { id: id.to_string() },
            ["pending"] => Command::Pending { page: 1 },
            ["pending", page] => Command::Pending {
                page: page.parse().context("page must be a number")?,
            },
            ["approve", id] => Command::Approve { id: id.to_string() },
            ["dashboard"] => Command::Dashboard,
            _ => bail!("{}", USAGE),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let command = Command::parse(&args)?;

    let config = Config::init()?;
    let api = ApiClient::from_config(&config)?;
    let store = FileTokenStore::new(config.token_path.clone());

    match command {
        Command::Register(account) => AuthClient::new(api, store).register(&account).await,
        Command::Verify { email, code } => AuthClient::new(api, store).verify_email(&email, &code).await,
        Command::ResendCode { email } => AuthClient::new(api, store).resend_verification(&email).await,
        Command::Login { email, password } => AuthClient::new(api, store).login(&email, &password).await,
        Command::Logout => AuthClient::new(api, store).logout(),
        Command::ForgotPassword { email } => AuthClient::new(api, store).send_reset_code(&email).await,
        Command::ResetPassword { email, code, password } => {
            let auth = AuthClient::new(api, store);
            auth.verify_reset_code(&email, &code).await?;
            auth.reset_password(&email, &password).await
        }
        Command::ChangePassword { current, new } => {
            AuthClient::new(api, store).change_password(&current, &new).await
        }
        Command::Profile => {
            let user = ProfileClient::new(api, Arc::new(store)).detail().await?;
            println!("{}", user.full_name());
            if let Some(email) = &user.email {
                println!("{}", email);
            }
            Ok(())
        }
        Command::EditProfile { first_name, last_name, photo } => {
            let profile_photo = match photo {
                Some(path) => Some(load_image(&path).await?),
                None => None,
            };
            ProfileClient::new(api, Arc::new(store))
                .edit_profile(ProfileUpdate {
                    first_name,
                    last_name,
                    profile_photo,
                })
                .await
        }
        Command::Upload { manifest } => upload(&config, api, store, &manifest).await,
        Command::List(filter) => list(api, filter).await,
        Command::Show { id } => {
            let property = fetch_property(&api, &id).await?;
            print_properties(std::slice::from_ref(&property));
            println!("{}", property.description);
            Ok(())
        }
        Command::Mine => {
            let properties = ProfileClient::new(api, Arc::new(store)).my_properties().await?;
            info!("✅ You have {} properties", properties.len());
            print_properties(&properties);
            Ok(())
        }
        Command::Wishlist => {
            let properties = ProfileClient::new(api, Arc::new(store)).wishlist().await?;
            info!("❤️ {} saved properties", properties.len());
            print_properties(&properties);
            Ok(())
        }
        Command::Save { id } => ProfileClient::new(api, Arc::new(store)).add_to_wishlist(&id).await,
        Command::Unsave { id } => {
            ProfileClient::new(api, Arc::new(store))
                .remove_from_wishlist(&id)
                .await
        }
        Command::Pending { page } => pending(api, store, page).await,
        Command::Approve { id } => AdminClient::new(api, Arc::new(store)).approve(&id).await,
        Command::Dashboard => {
            let stats = AdminClient::new(api, Arc::new(store)).dashboard().await?;
            println!("Pending:  {}", stats.pending_count);
            println!("Approved: {}", stats.approved_count);
            Ok(())
        }
    }
}

async fn upload(config: &Config, api: ApiClient, store: FileTokenStore, path: &Path) -> Result<()> {
    info!("🏠 Uploading listing from {}", path.display());
    let manifest = Manifest::load(path).await?;

    let gateway = SubmissionGateway::new(api, Arc::new(store));
    let mut session = WizardSession::new(gateway, config.validation_policy);

    for patch in [
        manifest.step1.into_patch(),
        manifest.step2.into_patch(),
        manifest.step3.into_patch(),
    ] {
        match session.next(patch).await {
            Ok(Outcome::Moved(step)) => info!("Moved to {}", step),
            Ok(Outcome::Submitted(body)) => {
                info!("🎉 Congratulations! Your property has been sent for verification");
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            Err(WizardError::Submission(e)) => {
                error!("{}", e.user_message());
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn parse_filter(args: &[&str]) -> Result<ListingFilter> {
    let number = |raw: &str, name: &str| -> Result<f64> {
        raw.parse::<f64>()
            .with_context(|| format!("{} must be a number, got '{}'", name, raw))
    };

    Ok(match args {
        [] | ["all"] => ListingFilter::All,
        ["rental"] => ListingFilter::Rental,
        ["sales"] => ListingFilter::Sales,
        ["price", min, max] => ListingFilter::PriceRange {
            min: min.parse().context("min must be a whole number")?,
            max: max.parse().context("max must be a whole number")?,
        },
        ["nearby", lat, lon, radius] => ListingFilter::Nearby {
            latitude: number(*lat, "latitude")?,
            longitude: number(*lon, "longitude")?,
            radius: number(*radius, "radius")?,
        },
        _ => bail!("{}", USAGE),
    })
}

async fn list(api: ApiClient, filter: ListingFilter) -> Result<()> {
    let mut view = ListingView::new(api);
    let properties = view.apply(filter).await?;

    info!("\n✅ Found {} properties\n", properties.len());
    print_properties(properties);
    Ok(())
}

async fn pending(api: ApiClient, store: FileTokenStore, page: u32) -> Result<()> {
    let admin = AdminClient::new(api, Arc::new(store));
    let pending = admin.pending(page, 10).await?;

    info!("Page {} of {}", page, pending.total_pages);
    print_properties(&pending.properties);
    Ok(())
}

fn print_properties(properties: &[Property]) {
    for (i, property) in properties.iter().enumerate() {
        println!("{}. {} ({})", i + 1, property.title, property.address);
        println!(
            "   {} · {} sq ft · price {} · rent {}",
            property.listing_type.as_deref().unwrap_or("-"),
            property.square_feet,
            property.price,
            property.rent
        );
        println!("   ID: {}", property.id);
        if !property.is_admin_approved {
            println!("   Awaiting approval");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_is_an_error() {
        let err = Command::parse(&["frobnicate"]).unwrap_err();
        assert!(err.to_string().contains("Usage:"));

        assert!(Command::parse(&[]).is_err());
        assert!(Command::parse(&["login", "only-email"]).is_err());
    }

    #[test]
    fn parses_wishlist_subcommands() {
        assert_eq!(Command::parse(&["wishlist"]).unwrap(), Command::Wishlist);
        assert_eq!(
            Command::parse(&["wishlist", "add", "5"]).unwrap(),
            Command::Save { id: "5".to_string() }
        );
        assert!(Command::parse(&["wishlist", "drop", "5"]).is_err());
    }

    #[test]
    fn parses_listing_filters() {
        assert_eq!(
            Command::parse(&["list", "price", "500", "2000"]).unwrap(),
            Command::List(ListingFilter::PriceRange { min: 500, max: 2000 })
        );
        assert_eq!(Command::parse(&["list"]).unwrap(), Command::List(ListingFilter::All));
        assert!(Command::parse(&["list", "nearby", "north", "77.5", "5"]).is_err());
    }

    #[test]
    fn pending_page_defaults_to_one() {
        assert_eq!(Command::parse(&["pending"]).unwrap(), Command::Pending { page: 1 });
        assert_eq!(Command::parse(&["pending", "3"]).unwrap(), Command::Pending { page: 3 });
        assert!(Command::parse(&["pending", "last"]).is_err());
    }

    #[test]
    fn edit_profile_photo_is_optional() {
        match Command::parse(&["edit-profile", "Asha", "Rao", "me.png"]).unwrap() {
            Command::EditProfile { photo, .. } => assert_eq!(photo, Some(PathBuf::from("me.png"))),
            other => panic!("unexpected {:?}", other),
        }
    }
}
