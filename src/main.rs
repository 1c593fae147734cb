mod actions;
mod aggregate;
mod api;
mod backend;
mod cli_messages;
mod config;
mod consts;
mod logging;
mod models;
mod network;
mod pretty;
mod render;
mod session;
mod views;

use crate::api::{ApiError, HttpTransport};
use crate::backend::Transition;
use crate::config::{Config, get_app_dir, get_config_path};
use crate::consts::dashboard_consts::{MAX_RATING, STORAGE_FILE};
use crate::models::{NewReview, ResourceRef, ReviewUpdate, Role};
use crate::network::{AuthenticatedIssuer, ConsoleNavigator, Navigator};
use crate::pretty::handle_cmd_error;
use crate::session::{FileStorage, SessionStore};
use crate::views::owner::ServiceQuery;
use clap::{Parser, Subcommand};
use log::debug;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line dashboards for the pet-sitting marketplace
struct Args {
    /// Backend base URL. Overrides NANNY_API_URL and the config file.
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Log requests and aggregation details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session.
    Login {
        #[arg(long, value_name = "EMAIL")]
        email: String,

        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Clear the stored session.
    Logout,
    /// Persist the backend URL given with --api-url, or show the current one.
    Configure,
    /// Admin dashboard
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Owner dashboard
    #[command(subcommand)]
    Owner(OwnerCommand),
    /// Sitter dashboard
    #[command(subcommand)]
    Sitter(SitterCommand),
}

#[derive(Subcommand)]
enum AdminCommand {
    /// User and sitter totals with the most recent registrations.
    Overview,
    /// Sitter applications awaiting moderation.
    Pending,
    /// All registered users.
    Users,
    /// Sitters with their profile and rating.
    Sitters,
    /// Full card for one sitter.
    Sitter { id: ResourceRef },
    /// Approve a pending sitter.
    Approve { id: ResourceRef },
    /// Reject a pending sitter.
    Reject { id: ResourceRef },
    /// Delete a user account.
    DeleteUser { id: ResourceRef },
}

#[derive(Subcommand)]
enum OwnerCommand {
    /// Pet and booking counts with the most recent bookings.
    Overview,
    /// Your pets.
    Pets,
    /// Your bookings and what you can do with them.
    Bookings,
    /// Completed bookings with their reviews.
    Reviews,
    /// Search services by type and location.
    Search {
        /// walking, boarding, home-care or all
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },
    /// Cancel a pending booking.
    Cancel { id: ResourceRef },
    /// Review a completed booking.
    Review {
        booking: ResourceRef,

        #[arg(long)]
        sitter: ResourceRef,

        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=MAX_RATING as i64))]
        rating: i64,

        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Change an existing review.
    EditReview {
        id: ResourceRef,

        #[arg(long, value_parser = clap::value_parser!(i64).range(1..=MAX_RATING as i64))]
        rating: i64,

        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Delete a review.
    DeleteReview { id: ResourceRef },
}

#[derive(Subcommand)]
enum SitterCommand {
    /// Services, bookings, rating and pending requests.
    Overview,
    /// Your bookings and what you can do with them.
    Bookings,
    /// Reviews left for you.
    Reviews,
    /// Your profile and moderation status.
    Profile,
    /// Accept a pending booking.
    Confirm { id: ResourceRef },
    /// Decline a pending booking.
    Cancel { id: ResourceRef },
    /// Mark a confirmed booking as done.
    Complete { id: ResourceRef },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    let config_path = get_config_path()?;
    let storage = Arc::new(FileStorage::new(get_app_dir()?.join(STORAGE_FILE)));
    let store = SessionStore::new(storage);
    let navigator: Arc<dyn Navigator> = Arc::new(ConsoleNavigator);

    match args.command {
        Command::Configure => configure(args.api_url, &config_path),
        Command::Logout => {
            store.clear()?;
            print_cmd_success!("Logged out.", "");
            Ok(())
        }
        Command::Login { email, password } => {
            let api_url = Config::resolve_api_url(args.api_url, &config_path);
            let transport = HttpTransport::new(api_url)?;
            let session = backend::login(&transport, &email, &password)
                .await
                .map_err(|e| handle_cmd_error!(e, "Login failed"))?;
            store.save(&session)?;
            print_cmd_success!(
                "Logged in.",
                "{} ({}) as {}",
                session.full_name,
                session.email,
                session.role
            );
            Ok(())
        }
        Command::Admin(command) => {
            let api_url = Config::resolve_api_url(args.api_url, &config_path);
            let issuer = open_dashboard(api_url, store, navigator, Role::Admin)?;
            run_admin(&issuer, command)
                .await
                .map_err(|e| handle_cmd_error!(e, "Admin command failed"))?;
            Ok(())
        }
        Command::Owner(command) => {
            let api_url = Config::resolve_api_url(args.api_url, &config_path);
            let issuer = open_dashboard(api_url, store, navigator, Role::Owner)?;
            run_owner(&issuer, command)
                .await
                .map_err(|e| handle_cmd_error!(e, "Owner command failed"))?;
            Ok(())
        }
        Command::Sitter(command) => {
            let api_url = Config::resolve_api_url(args.api_url, &config_path);
            let issuer = open_dashboard(api_url, store, navigator, Role::Sitter)?;
            run_sitter(&issuer, command)
                .await
                .map_err(|e| handle_cmd_error!(e, "Sitter command failed"))?;
            Ok(())
        }
    }
}

fn configure(api_url: Option<String>, config_path: &Path) -> Result<(), Box<dyn Error>> {
    match api_url {
        Some(url) => {
            Config::new(url.clone())
                .save(config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Configuration saved.", "API URL: {}", url);
        }
        None => {
            let current = Config::resolve_api_url(None, config_path);
            print_cmd_info!("Current API URL:", "{}", current);
        }
    }
    Ok(())
}

/// Runs the session guard and builds the issuer for one view.
fn open_dashboard(
    api_url: String,
    store: SessionStore,
    navigator: Arc<dyn Navigator>,
    role: Role,
) -> Result<AuthenticatedIssuer, Box<dyn Error>> {
    let session = match session::enter(&store, role, navigator.as_ref()) {
        Ok(session) => session,
        Err(denied) => {
            print_cmd_error!(&denied.to_string());
            std::process::exit(1);
        }
    };
    debug!("Opening {} dashboard for user {}", role, session.user_id);
    let transport = HttpTransport::new(api_url)?;
    Ok(AuthenticatedIssuer::new(
        Arc::new(transport),
        session,
        store,
        navigator,
    ))
}

async fn run_admin(issuer: &AuthenticatedIssuer, command: AdminCommand) -> Result<(), ApiError> {
    use views::admin;
    let output = match command {
        AdminCommand::Overview => render::admin_overview(&admin::overview(issuer).await?),
        AdminCommand::Pending => render::moderation_queue(&admin::moderation_queue(issuer).await?),
        AdminCommand::Users => render::users(&admin::users(issuer).await?),
        AdminCommand::Sitters => render::sitter_roster(&admin::sitter_roster(issuer).await?),
        AdminCommand::Sitter { id } => {
            render::sitter_detail(&admin::sitter_detail(issuer, id).await?)
        }
        AdminCommand::Approve { id } => {
            backend::approve_sitter(issuer, id).await?;
            print_cmd_success!("Sitter approved.", "#{}", id);
            return Ok(());
        }
        AdminCommand::Reject { id } => {
            backend::reject_sitter(issuer, id).await?;
            print_cmd_success!("Sitter rejected.", "#{}", id);
            return Ok(());
        }
        AdminCommand::DeleteUser { id } => {
            backend::delete_user(issuer, id).await?;
            print_cmd_success!("User deleted.", "#{}", id);
            return Ok(());
        }
    };
    print!("{}", output);
    Ok(())
}

async fn run_owner(issuer: &AuthenticatedIssuer, command: OwnerCommand) -> Result<(), ApiError> {
    use views::owner;
    let output = match command {
        OwnerCommand::Overview => render::owner_overview(&owner::overview(issuer).await?),
        OwnerCommand::Pets => render::pets(&owner::pets(issuer).await?),
        OwnerCommand::Bookings => render::owner_bookings(&owner::bookings(issuer).await?),
        OwnerCommand::Reviews => render::owner_reviews(&owner::reviews(issuer).await?),
        OwnerCommand::Search { kind, location } => {
            let query = ServiceQuery { kind, location };
            render::service_hits(&owner::search_services(issuer, &query).await?)
        }
        OwnerCommand::Cancel { id } => {
            backend::transition_booking(issuer, id, Transition::Cancel).await?;
            print_cmd_success!("Booking cancelled.", "#{}", id);
            return Ok(());
        }
        OwnerCommand::Review {
            booking,
            sitter,
            rating,
            comment,
        } => {
            let review = NewReview {
                booking_id: booking,
                sitter_id: sitter,
                rating,
                comment,
            };
            backend::create_review(issuer, &review).await?;
            print_cmd_success!("Review saved.", "booking #{}", booking);
            return Ok(());
        }
        OwnerCommand::EditReview {
            id,
            rating,
            comment,
        } => {
            backend::update_review(issuer, id, &ReviewUpdate { rating, comment }).await?;
            print_cmd_success!("Review updated.", "#{}", id);
            return Ok(());
        }
        OwnerCommand::DeleteReview { id } => {
            backend::delete_review(issuer, id).await?;
            print_cmd_success!("Review deleted.", "#{}", id);
            return Ok(());
        }
    };
    print!("{}", output);
    Ok(())
}

async fn run_sitter(issuer: &AuthenticatedIssuer, command: SitterCommand) -> Result<(), ApiError> {
    use views::sitter;
    let (id, transition) = match command {
        SitterCommand::Overview => {
            print!("{}", render::sitter_overview(&sitter::overview(issuer).await?));
            return Ok(());
        }
        SitterCommand::Bookings => {
            print!("{}", render::bookings(&sitter::bookings(issuer).await?));
            return Ok(());
        }
        SitterCommand::Reviews => {
            print!("{}", render::sitter_reviews(&sitter::reviews(issuer).await?));
            return Ok(());
        }
        SitterCommand::Profile => {
            print!("{}", render::sitter_profile(&sitter::profile(issuer).await?));
            return Ok(());
        }
        SitterCommand::Confirm { id } => (id, Transition::Confirm),
        SitterCommand::Cancel { id } => (id, Transition::Cancel),
        SitterCommand::Complete { id } => (id, Transition::Complete),
    };

    backend::transition_booking(issuer, id, transition).await?;
    print_cmd_success!("Booking updated.", "#{} {}", id, transition);
    Ok(())
}
