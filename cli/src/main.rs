//! DIVS demo CLI — drives the verification flows from the terminal.

mod config;

use anyhow::Context;
use clap::Parser;
use config::DemoConfig;
use divs_outcome::{OutcomeSource, SeededOutcome, ThreadRngOutcome};
use divs_services::{IdentityService, ServiceError, StorageService, VerificationService};
use divs_session::SessionManager;
use divs_store::Theme;
use divs_store_json::JsonStore;
use divs_types::{
    BiometricType, Clock, DocumentType, ExpiryWindow, FileUpload, Permissions, ShareRequest,
    SimulationParams, SystemClock, VerificationMethod,
};
use divs_utils::format_duration;
use divs_wizard::{
    BiometricWizard, BusinessWizard, CancelToken, DocumentWizard, ShareWizard, WizardEvent,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "divs", about = "DIVS identity-verification demo")]
struct Cli {
    /// Data directory for the session blob.
    #[arg(long, env = "DIVS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Skip the simulated delays.
    #[arg(long, env = "DIVS_NO_DELAY")]
    no_delay: bool,

    /// Seed the outcome draws for a reproducible run.
    #[arg(long, env = "DIVS_SEED")]
    seed: Option<u64>,

    /// Log level when RUST_LOG is unset.
    #[arg(long, env = "DIVS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Account and session commands.
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Run the document verification flow on a file.
    Document {
        /// Path to the document image or PDF.
        file: PathBuf,
        /// Document kind: "passport", "drivers-license", or "national-id".
        #[arg(long, default_value = "passport")]
        kind: String,
    },
    /// Run the biometric capture and verification flow.
    Biometric {
        /// Biometric kind: "face", "fingerprint", or "voice".
        #[arg(long, default_value = "face")]
        kind: String,
    },
    /// Book an in-person business verification appointment.
    Business {
        #[command(subcommand)]
        action: BusinessAction,
    },
    /// Identity sharing: generate, verify, list, revoke.
    Share {
        #[command(subcommand)]
        action: ShareAction,
    },
    /// Show the dashboard security score.
    Score,
    /// Get or set the theme preference.
    Theme {
        /// "light" or "dark"; omit to show the current value.
        value: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum AuthAction {
    /// Send the mock OTP to a phone number.
    SendOtp { phone: String },
    /// Register and sign in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        otp: String,
    },
    /// Sign in a registered phone.
    Login {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        otp: String,
    },
    /// End the session.
    Logout,
    /// Remove the signed-in account.
    DeleteAccount,
    /// Show the signed-in user.
    Whoami,
}

#[derive(clap::Subcommand)]
enum BusinessAction {
    /// List partner locations, dates, and time slots.
    Options,
    /// Book an appointment.
    Book {
        #[arg(long)]
        location: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
    },
    /// Submit a business registration for verification.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        registration: String,
    },
}

#[derive(clap::Subcommand)]
enum ShareAction {
    /// Mint an access code for the selected permissions.
    Generate {
        #[arg(long)]
        id_only: bool,
        #[arg(long)]
        address_info: bool,
        #[arg(long)]
        financial_data: bool,
        #[arg(long)]
        full_access: bool,
        /// "1h", "6h", "24h", "7d", or "30d".
        #[arg(long, default_value = "24h")]
        expiry: String,
        /// "qr" or "code".
        #[arg(long, default_value = "qr")]
        method: String,
    },
    /// Scan/verify an access code.
    Verify { code: String },
    /// List minted shares.
    List,
    /// Revoke a share by id.
    Revoke { id: String },
}

fn parse_document_kind(s: &str) -> anyhow::Result<DocumentType> {
    match s.to_lowercase().as_str() {
        "passport" => Ok(DocumentType::Passport),
        "drivers-license" | "drivers_license" => Ok(DocumentType::DriversLicense),
        "national-id" | "national_id" => Ok(DocumentType::NationalId),
        other => anyhow::bail!("unknown document kind {other:?}"),
    }
}

fn parse_biometric_kind(s: &str) -> anyhow::Result<BiometricType> {
    match s.to_lowercase().as_str() {
        "face" => Ok(BiometricType::Face),
        "fingerprint" => Ok(BiometricType::Fingerprint),
        "voice" => Ok(BiometricType::Voice),
        other => anyhow::bail!("unknown biometric kind {other:?}"),
    }
}

fn parse_expiry(s: &str) -> anyhow::Result<ExpiryWindow> {
    match s {
        "1h" => Ok(ExpiryWindow::OneHour),
        "6h" => Ok(ExpiryWindow::SixHours),
        "24h" => Ok(ExpiryWindow::OneDay),
        "7d" => Ok(ExpiryWindow::SevenDays),
        "30d" => Ok(ExpiryWindow::ThirtyDays),
        other => anyhow::bail!("unknown expiry {other:?} (use 1h/6h/24h/7d/30d)"),
    }
}

fn parse_method(s: &str) -> anyhow::Result<VerificationMethod> {
    match s.to_lowercase().as_str() {
        "qr" => Ok(VerificationMethod::Qr),
        "code" => Ok(VerificationMethod::Code),
        other => anyhow::bail!("unknown method {other:?} (use qr or code)"),
    }
}

/// Build upload metadata from a path on disk. Contents are never read.
fn file_upload_from_path(path: &Path) -> anyhow::Result<FileUpload> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };
    Ok(FileUpload {
        name,
        size: metadata.len(),
        mime: mime.to_string(),
    })
}

/// Cancel the token on Ctrl-C so a mid-run exit stops at the next stage
/// boundary instead of leaving a half-finished state.
fn cancel_on_ctrl_c() -> CancelToken {
    let cancel = CancelToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
    cancel
}

fn print_events(events: &[WizardEvent]) {
    for event in events {
        match event {
            WizardEvent::StageReached { percent } => println!("  ... {percent}%"),
            WizardEvent::CaptureComplete => println!("  capture complete"),
            WizardEvent::Completed { success } => {
                println!("  {}", if *success { "VERIFIED" } else { "REJECTED" })
            }
            WizardEvent::Cancelled => println!("  cancelled"),
        }
    }
}

struct App {
    session: SessionManager,
    verification: VerificationService,
    identity: IdentityService,
    storage: StorageService,
    outcome: Arc<dyn OutcomeSource>,
    clock: Arc<dyn Clock>,
    params: SimulationParams,
}

impl App {
    fn new(config: &DemoConfig, seed: Option<u64>, no_delay: bool) -> anyhow::Result<Self> {
        let store = Arc::new(JsonStore::open(config.data_dir.join("divs.json"))?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let outcome: Arc<dyn OutcomeSource> = match seed {
            Some(seed) => Arc::new(SeededOutcome::new(seed)),
            None => Arc::new(ThreadRngOutcome),
        };
        let params = if no_delay {
            SimulationParams {
                document_success_bps: config.simulation.document_success_bps,
                biometric_success_bps: config.simulation.biometric_success_bps,
                access_success_bps: config.simulation.access_success_bps,
                ..SimulationParams::instant()
            }
        } else {
            config.simulation.clone()
        };

        Ok(Self {
            session: SessionManager::new(store.clone(), clock.clone(), params.clone()),
            verification: VerificationService::new(outcome.clone(), clock.clone(), params.clone()),
            identity: IdentityService::new(
                store.clone(),
                outcome.clone(),
                clock.clone(),
                params.clone(),
            ),
            storage: StorageService::new(params.clone()),
            outcome,
            clock,
            params,
        })
    }

    /// The wizard flows ask for a signed-in user, the way the protected
    /// routes did; unauthenticated access gets a sign-in prompt, not a
    /// hard failure.
    fn require_auth(&self) -> anyhow::Result<()> {
        if self.session.is_authenticated()? {
            Ok(())
        } else {
            anyhow::bail!("not signed in — run `divs auth login` or `divs auth signup` first")
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config: Option<DemoConfig> = if let Some(ref config_path) = cli.config {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str::<DemoConfig>(&contents) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    eprintln!("failed to parse config file: {e}, using CLI defaults");
                    None
                }
            },
            Err(e) => {
                eprintln!(
                    "failed to read config file {}: {e}, using CLI defaults",
                    config_path.display()
                );
                None
            }
        }
    } else {
        None
    };

    let mut config = file_config.unwrap_or_default();
    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(ref log_level) = cli.log_level {
        config.log_level = log_level.clone();
    }

    divs_utils::init_tracing(&config.log_level);

    let app = App::new(&config, cli.seed, cli.no_delay)?;

    match cli.command {
        Command::Auth { action } => run_auth(&app, action).await?,
        Command::Document { file, kind } => run_document(&app, &file, &kind).await?,
        Command::Biometric { kind } => run_biometric(&app, &kind).await?,
        Command::Business { action } => run_business(&app, action).await?,
        Command::Share { action } => run_share(&app, action).await?,
        Command::Score => {
            app.require_auth()?;
            let score = app.verification.security_score();
            println!("security score");
            println!("  overall:   {}%", score.overall);
            println!("  identity:  {}%", score.identity);
            println!("  biometric: {}%", score.biometric);
            println!("  document:  {}%", score.document);
            if let Some(business) = score.business {
                println!("  business:  {business}%");
            }
        }
        Command::Theme { value } => match value {
            None => println!("theme: {:?}", app.session.theme()?),
            Some(value) => {
                let theme = match value.to_lowercase().as_str() {
                    "light" => Theme::Light,
                    "dark" => Theme::Dark,
                    other => anyhow::bail!("unknown theme {other:?}"),
                };
                app.session.set_theme(theme)?;
                println!("theme set to {value}");
            }
        },
    }

    Ok(())
}

async fn run_auth(app: &App, action: AuthAction) -> anyhow::Result<()> {
    match action {
        AuthAction::SendOtp { phone } => {
            app.session.send_otp(&phone).await?;
            println!("OTP sent to {phone} (demo hint: it is always 123456)");
        }
        AuthAction::Signup {
            name,
            email,
            phone,
            otp,
        } => {
            let user = app.session.signup(&name, &email, &phone, &otp)?;
            println!("welcome, {} (id {})", user.name, user.id);
        }
        AuthAction::Login { phone, otp } => {
            let user = app.session.login(&phone, &otp)?;
            println!("welcome back, {}", user.name);
        }
        AuthAction::Logout => {
            app.session.logout()?;
            println!("signed out");
        }
        AuthAction::DeleteAccount => {
            app.session.delete_account()?;
            println!("account deleted");
        }
        AuthAction::Whoami => match app.session.current_user()? {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.phone),
            None => println!("not signed in"),
        },
    }
    Ok(())
}

async fn run_document(app: &App, file: &Path, kind: &str) -> anyhow::Result<()> {
    app.require_auth()?;
    let doc_type = parse_document_kind(kind)?;
    let upload = file_upload_from_path(file)?;

    let stored = app.storage.upload_file(&upload, None).await?;
    tracing::debug!(url = %stored.url, "mock upload done");

    let record = app.verification.upload_document(&upload, doc_type).await?;
    println!(
        "uploaded {} as {} (record {}, status {})",
        upload.name,
        doc_type.label(),
        record.id,
        record.status
    );

    let mut wizard = DocumentWizard::new();
    wizard.select_file(upload)?;
    println!("verifying...");

    let cancel = cancel_on_ctrl_c();
    let result = wizard
        .run_verification(&app.params, app.outcome.as_ref(), &cancel)
        .await?;
    print_events(&wizard.drain_events());

    match result {
        Some(true) => println!("document verified"),
        Some(false) => println!("verification failed — reset and try again"),
        None => println!("verification cancelled"),
    }
    Ok(())
}

async fn run_biometric(app: &App, kind: &str) -> anyhow::Result<()> {
    app.require_auth()?;
    let bio_type = parse_biometric_kind(kind)?;

    let mut wizard = BiometricWizard::new(bio_type);
    let cancel = cancel_on_ctrl_c();

    println!("capturing...");
    if !wizard.capture(&app.params, &cancel).await? {
        println!("capture cancelled");
        return Ok(());
    }

    println!("verifying...");
    let result = wizard
        .run_verification(&app.params, app.outcome.as_ref(), &cancel)
        .await?;
    print_events(&wizard.drain_events());

    match result {
        Some(true) => {
            // The enrollment record only exists for successful runs.
            match app.verification.enroll_biometric(bio_type).await {
                Ok(record) => println!("biometric enrolled (record {})", record.id),
                Err(ServiceError::Rejected(msg)) => println!("{msg}"),
                Err(e) => return Err(e.into()),
            }
        }
        Some(false) => println!("biometric match failed — reset and try again"),
        None => println!("verification cancelled"),
    }
    Ok(())
}

async fn run_business(app: &App, action: BusinessAction) -> anyhow::Result<()> {
    app.require_auth()?;
    match action {
        BusinessAction::Options => {
            println!("locations:");
            for location in BusinessWizard::locations() {
                println!(
                    "  {} — {} ({}, {:?} availability)",
                    location.id, location.name, location.distance, location.availability
                );
            }
            println!("dates: {}", BusinessWizard::available_dates().join(", "));
            println!("times: {}", BusinessWizard::available_times().join(", "));
        }
        BusinessAction::Book {
            location,
            date,
            time,
        } => {
            let mut wizard = BusinessWizard::new();
            wizard.begin()?;
            wizard.select_location(&location)?;
            wizard.select_date(&date)?;
            wizard.select_time(&time)?;
            let appointment = wizard.book()?;
            println!(
                "appointment booked: {} on {} at {}",
                appointment.location_id, appointment.date, appointment.time
            );
        }
        BusinessAction::Submit { name, registration } => {
            let record = app.verification.submit_business(&name, &registration).await?;
            println!(
                "business verification submitted (record {}, status {})",
                record.id, record.status
            );
        }
    }
    Ok(())
}

async fn run_share(app: &App, action: ShareAction) -> anyhow::Result<()> {
    app.require_auth()?;
    match action {
        ShareAction::Generate {
            id_only,
            address_info,
            financial_data,
            full_access,
            expiry,
            method,
        } => {
            let request = ShareRequest {
                permissions: Permissions {
                    id_only,
                    address_info,
                    financial_data,
                    full_access,
                },
                expiry: parse_expiry(&expiry)?,
                method: parse_method(&method)?,
            };
            let access = app.identity.create_share(&request)?;
            println!("access code: {}", access.code);
            println!("expires in {}", format_duration(request.expiry.as_secs()));
            if request.method == VerificationMethod::Qr {
                println!("qr payload: divs://verify/{}", access.code);
            }
        }
        ShareAction::Verify { code } => {
            let mut wizard = ShareWizard::new();
            let cancel = cancel_on_ctrl_c();
            println!("scanning...");
            let granted = wizard
                .run_scan(&code, &app.params, app.outcome.as_ref(), &cancel)
                .await?;
            print_events(&wizard.drain_events());

            match granted {
                // The scan draw is the decision; the grant body is the same
                // canned identity the service returns.
                Some(true) => println!("access granted to Jane Smith (•••• •••• 4321)"),
                Some(false) => println!("access denied: invalid or expired access code"),
                None => println!("scan cancelled"),
            }
        }
        ShareAction::List => {
            let shares = app.identity.list_shares()?;
            if shares.is_empty() {
                println!("no shares");
            }
            let now = app.clock.now();
            for share in shares {
                let state = if !share.active {
                    "revoked"
                } else if share.expires_at.has_passed(now) {
                    "expired"
                } else {
                    "active"
                };
                println!(
                    "  {} [{}] code={} expires in {}",
                    share.id,
                    state,
                    share.code.as_deref().unwrap_or("-"),
                    format_duration(now.elapsed_since(share.expires_at) / 1000),
                );
            }
        }
        ShareAction::Revoke { id } => {
            app.identity.revoke_share(&id)?;
            println!("share {id} revoked");
        }
    }
    Ok(())
}
