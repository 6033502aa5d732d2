use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use portdesk::model::crew::CrewChangeForm;
use portdesk::model::feedback::{FeedbackFilter, FeedbackForm, FeedbackKind, FeedbackStatus, Priority};
use portdesk::model::pic::{PicForm, PicType};
use portdesk::model::spares::SparesItem;
use portdesk::model::user::{User, UserForm};
use portdesk::model::vendor::{VendorCompanyInfo, VendorPicDraft};
use portdesk::screens::crew::CrewChangeEditor;
use portdesk::screens::feedback::FeedbackScreen;
use portdesk::screens::pic::PicScreen;
use portdesk::screens::port_call::PortCallScreen;
use portdesk::screens::spares::ShipSparesEditor;
use portdesk::screens::users::UsersScreen;
use portdesk::screens::vendor::{VendorScreen, VendorWizard};
use portdesk::screens::vessels::VesselScreen;
use portdesk::screens::{Flow, ToastLevel, Toasts};
use portdesk::{ApiClient, ApiError, ClientConfig, ConfigError, FileStore, Session, StoreError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("session required: run `portdesk session set-token`")]
    SessionRequired,
    #[error("operation failed")]
    Failed,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "portdesk", about = "Port-call administration CLI")]
struct Cli {
    #[arg(long, env = "PORTDESK_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "PORTDESK_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Print JSON instead of tab-separated lines.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Session(SessionCommand),
    Pcs(PcsCommand),
    Pic(PicCommand),
    Vendor(VendorCommand),
    Crew(CrewCommand),
    Spares(SparesCommand),
    Feedback(FeedbackCommand),
    User(UserCommand),
    Vessel(VesselCommand),
}

#[derive(Args, Debug)]
struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Subcommand, Debug)]
enum SessionSubcommand {
    SetToken { token: String },
    /// Cache the signed-in user's profile (JSON).
    SetUser { data: String },
    Clear,
    Show,
}

#[derive(Args, Debug)]
struct PcsCommand {
    #[command(subcommand)]
    command: PcsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PcsSubcommand {
    List {
        job_id: String,
        #[arg(long, default_value = "")]
        search: String,
    },
    Create {
        job_id: String,
        #[arg(long)]
        service: String,
        #[arg(long)]
        vendor: String,
    },
    Delete {
        job_id: String,
        id: String,
    },
    /// Mark services complete whose task headers are all done.
    Rollup {
        job_id: String,
    },
    Stats {
        job_id: String,
    },
}

#[derive(Args, Debug)]
struct PicCommand {
    #[command(subcommand)]
    command: PicSubcommand,
}

#[derive(Subcommand, Debug)]
enum PicSubcommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long = "type", value_parser = parse_pic_type)]
        kind: Option<PicType>,
    },
    Create {
        data: String,
    },
    Update {
        pic_id: String,
        data: String,
    },
    Delete {
        #[arg(value_parser = parse_pic_type)]
        kind: PicType,
        pic_id: String,
    },
}

#[derive(Args, Debug)]
struct VendorCommand {
    #[command(subcommand)]
    command: VendorSubcommand,
}

#[derive(Subcommand, Debug)]
enum VendorSubcommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<String>,
    },
    Delete {
        vendor_id: String,
    },
    Wizard(WizardCommand),
}

#[derive(Args, Debug)]
struct WizardCommand {
    #[command(subcommand)]
    command: WizardSubcommand,
}

#[derive(Subcommand, Debug)]
enum WizardSubcommand {
    Show,
    SetInfo {
        data: String,
    },
    AddDoc {
        path: PathBuf,
        #[arg(long)]
        name: Option<String>,
    },
    RemoveDoc {
        key: String,
    },
    AddPic {
        data: String,
    },
    RemovePic {
        index: usize,
    },
    Submit,
    Discard,
}

#[derive(Args, Debug)]
struct CrewCommand {
    #[command(subcommand)]
    command: CrewSubcommand,
}

#[derive(Subcommand, Debug)]
enum CrewSubcommand {
    List { job_id: String },
    Save { job_id: String, data: String },
    Delete { job_id: String, id: String },
}

#[derive(Args, Debug)]
struct SparesCommand {
    #[command(subcommand)]
    command: SparesSubcommand,
}

#[derive(Subcommand, Debug)]
enum SparesSubcommand {
    List { job_id: String },
    /// Save editor rows (JSON array); rows without `id` are created.
    Save { job_id: String, data: String },
    Delete { job_id: String, id: String },
}

#[derive(Args, Debug)]
struct FeedbackCommand {
    #[command(subcommand)]
    command: FeedbackSubcommand,
}

#[derive(Subcommand, Debug)]
enum FeedbackSubcommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    Stats,
    Create {
        data: String,
    },
    Status {
        id: String,
        status: String,
    },
    Delete {
        id: String,
    },
    Respond {
        id: String,
        message: String,
    },
    Responses {
        id: String,
    },
}

#[derive(Args, Debug)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    Create {
        data: String,
    },
    Toggle {
        id: String,
    },
}

#[derive(Args, Debug)]
struct VesselCommand {
    #[command(subcommand)]
    command: VesselSubcommand,
}

#[derive(Subcommand, Debug)]
enum VesselSubcommand {
    Expiring {
        file: PathBuf,
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Only expired and soon-to-expire certificates.
        #[arg(long, default_value_t = false)]
        attention: bool,
    },
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: Option<String>,
    state_dir: PathBuf,
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = CliContext {
        base_url: cli.base_url,
        state_dir: cli.state_dir.unwrap_or_else(portdesk::config::default_state_dir),
        json: cli.json,
    };

    let result = match cli.command {
        Command::Session(session) => run_session(&ctx, session),
        Command::Pcs(pcs) => run_pcs(&ctx, pcs).await,
        Command::Pic(pic) => run_pic(&ctx, pic).await,
        Command::Vendor(vendor) => run_vendor(&ctx, vendor).await,
        Command::Crew(crew) => run_crew(&ctx, crew).await,
        Command::Spares(spares) => run_spares(&ctx, spares).await,
        Command::Feedback(feedback) => run_feedback(&ctx, feedback).await,
        Command::User(user) => run_user(&ctx, user).await,
        Command::Vessel(vessel) => run_vessel(&ctx, vessel),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Wiring
// =============================================================================

fn open_session(ctx: &CliContext) -> Result<Session, CliError> {
    let store = FileStore::open(&ctx.state_dir)?;
    Ok(Session::new(Arc::new(store)))
}

fn api_client(ctx: &CliContext) -> Result<ApiClient, CliError> {
    let mut config = ClientConfig::from_env_with_base_url(ctx.base_url.as_deref())?;
    config.state_dir.clone_from(&ctx.state_dir);
    tracing::debug!(base_url = %config.base_url, "api client ready");
    let session = open_session(ctx)?;
    Ok(ApiClient::from_config(&config, session)?)
}

/// Print pending toasts and turn a redirect into the session error.
fn settle<T>(toasts: &mut Toasts, flow: Flow<T>) -> Result<T, CliError> {
    for toast in toasts.drain() {
        let mark = match toast.level {
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✗",
            ToastLevel::Info => "•",
        };
        eprintln!("{mark} {}", toast.message);
    }
    flow.map_err(|_| CliError::SessionRequired)
}

fn succeeded(ok: bool) -> Result<(), CliError> {
    if ok { Ok(()) } else { Err(CliError::Failed) }
}

fn parse_json<T: DeserializeOwned>(data: &str) -> Result<T, CliError> {
    Ok(serde_json::from_str(data)?)
}

fn parse_pic_type(raw: &str) -> Result<PicType, String> {
    PicType::parse(raw).ok_or_else(|| format!("expected `vendor` or `customer`, got `{raw}`"))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn emit<T: Serialize>(ctx: &CliContext, rows: &[T], line: impl Fn(&T) -> String) -> Result<(), CliError> {
    if ctx.json {
        return print_json(&serde_json::to_value(rows)?);
    }
    for row in rows {
        println!("{}", line(row));
    }
    Ok(())
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

// =============================================================================
// session
// =============================================================================

fn run_session(ctx: &CliContext, session: SessionCommand) -> Result<(), CliError> {
    let store = open_session(ctx)?;
    match session.command {
        SessionSubcommand::SetToken { token } => {
            store.set_token(&token)?;
            eprintln!("✓ token saved");
        }
        SessionSubcommand::SetUser { data } => {
            let user: User = parse_json(&data)?;
            store.set_current_user(&user)?;
            eprintln!("✓ user saved");
        }
        SessionSubcommand::Clear => {
            store.clear()?;
            eprintln!("✓ session cleared");
        }
        SessionSubcommand::Show => {
            let token = store.token()?;
            let user = store.current_user()?;
            if ctx.json {
                print_json(&serde_json::json!({ "signed_in": token.is_some(), "user": user }))?;
            } else {
                println!("signed in: {}", if token.is_some() { "yes" } else { "no" });
                if let Some(user) = user {
                    println!("user: {} <{}> ({})", user.name, user.email, or_dash(user.role.as_deref()));
                }
            }
        }
    }
    Ok(())
}

// =============================================================================
// pcs
// =============================================================================

async fn run_pcs(ctx: &CliContext, pcs: PcsCommand) -> Result<(), CliError> {
    let api = api_client(ctx)?;
    match pcs.command {
        PcsSubcommand::List { job_id, search } => {
            let mut screen = PortCallScreen::new(api, job_id);
            let flow = screen.load().await;
            settle(&mut screen.toasts, flow)?;
            emit(ctx, &screen.filtered(&search), |p| {
                format!(
                    "{}\t{}\t{}\t{}",
                    p.id,
                    p.service_name,
                    p.vendor_name,
                    if p.status { "completed" } else { "pending" }
                )
            })
        }
        PcsSubcommand::Create { job_id, service, vendor } => {
            let mut screen = PortCallScreen::new(api, job_id);
            let flow = screen.load().await;
            settle(&mut screen.toasts, flow)?;
            let flow = screen.create_service(&service, &vendor).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        PcsSubcommand::Delete { job_id, id } => {
            let mut screen = PortCallScreen::new(api, job_id);
            let flow = screen.delete_service(&id).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        PcsSubcommand::Rollup { job_id } => {
            let mut screen = PortCallScreen::new(api, job_id);
            let flow = screen.load().await;
            settle(&mut screen.toasts, flow)?;
            let flow = screen.roll_up_statuses().await;
            let flipped = settle(&mut screen.toasts, flow)?;
            emit(ctx, &flipped, String::clone)
        }
        PcsSubcommand::Stats { job_id } => {
            let mut screen = PortCallScreen::new(api, job_id);
            let flow = screen.load().await;
            settle(&mut screen.toasts, flow)?;
            let stats = screen.completion_stats();
            if ctx.json {
                return print_json(&serde_json::to_value(stats)?);
            }
            println!(
                "total {}\tcompleted {}\tpending {}\t{}%",
                stats.total, stats.completed, stats.pending, stats.percent
            );
            Ok(())
        }
    }
}

// =============================================================================
// pic
// =============================================================================

async fn run_pic(ctx: &CliContext, pic: PicCommand) -> Result<(), CliError> {
    let mut screen = PicScreen::new(api_client(ctx)?);
    match pic.command {
        PicSubcommand::List { search, kind } => {
            let flow = screen.load().await;
            settle(&mut screen.toasts, flow)?;
            emit(ctx, &screen.filtered(&search, kind), |p| {
                format!("{}\t{}\t{}\t{}\t{}", p.pic_type().as_str(), p.pic_id, p.full_name(), p.email, p.phone)
            })
        }
        PicSubcommand::Create { data } => {
            let form: PicForm = parse_json(&data)?;
            let flow = screen.create(&form).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        PicSubcommand::Update { pic_id, data } => {
            let form: PicForm = parse_json(&data)?;
            let flow = screen.update(&pic_id, &form).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        PicSubcommand::Delete { kind, pic_id } => {
            let flow = screen.delete(kind, &pic_id).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
    }
}

// =============================================================================
// vendor
// =============================================================================

async fn run_vendor(ctx: &CliContext, vendor: VendorCommand) -> Result<(), CliError> {
    let api = api_client(ctx)?;
    match vendor.command {
        VendorSubcommand::List { search, status } => {
            let mut screen = VendorScreen::new(api);
            let flow = screen.load().await;
            settle(&mut screen.toasts, flow)?;
            emit(ctx, &screen.filtered(&search, status.as_deref()), |v| {
                format!("{}\t{}\t{}\t{}", v.vendor_id, v.name, or_dash(v.status.as_deref()), v.services.join(", "))
            })
        }
        VendorSubcommand::Delete { vendor_id } => {
            let mut screen = VendorScreen::new(api);
            let flow = screen.delete(&vendor_id).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        VendorSubcommand::Wizard(wizard) => run_wizard(ctx, api, wizard).await,
    }
}

async fn run_wizard(ctx: &CliContext, api: ApiClient, wizard: WizardCommand) -> Result<(), CliError> {
    let mut screen = VendorWizard::new(api);
    screen.open();
    match wizard.command {
        WizardSubcommand::Show => {
            if ctx.json {
                return print_json(&serde_json::to_value(screen.draft())?);
            }
            let draft = screen.draft();
            println!("company: {}", or_dash(Some(&draft.info.name)));
            for doc in &draft.documents {
                println!("document {}\t{}", doc.key, doc.name);
            }
            for (index, pic) in draft.pics.iter().enumerate() {
                println!("pic {index}\t{} {}", pic.first_name, pic.last_name);
            }
            Ok(())
        }
        WizardSubcommand::SetInfo { data } => {
            screen.set_info(parse_json::<VendorCompanyInfo>(&data)?);
            Ok(())
        }
        WizardSubcommand::AddDoc { path, name } => {
            let key = screen.add_document(std::path::absolute(&path)?, name);
            println!("{key}");
            Ok(())
        }
        WizardSubcommand::RemoveDoc { key } => succeeded(screen.remove_document(&key)),
        WizardSubcommand::AddPic { data } => {
            screen.add_pic(parse_json::<VendorPicDraft>(&data)?);
            Ok(())
        }
        WizardSubcommand::RemovePic { index } => succeeded(screen.remove_pic(index)),
        WizardSubcommand::Submit => {
            let flow = screen.submit().await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        WizardSubcommand::Discard => {
            screen.close();
            Ok(())
        }
    }
}

// =============================================================================
// crew / spares
// =============================================================================

async fn run_crew(ctx: &CliContext, crew: CrewCommand) -> Result<(), CliError> {
    let api = api_client(ctx)?;
    match crew.command {
        CrewSubcommand::List { job_id } => {
            let mut editor = CrewChangeEditor::new(api, job_id);
            let flow = editor.load().await;
            succeeded(settle(&mut editor.toasts, flow)?)?;
            emit(ctx, &editor.forms(), |f| {
                format!(
                    "{}\t{}\t{}\t{} crew\t{} flights",
                    or_dash(f.id.as_deref()),
                    f.kind.as_api(),
                    f.crew_name,
                    f.crew_list.len(),
                    f.crew_flights.len()
                )
            })
        }
        CrewSubcommand::Save { job_id, data } => {
            let form: CrewChangeForm = parse_json(&data)?;
            let mut editor = CrewChangeEditor::new(api, job_id);
            let flow = editor.save(&form).await;
            succeeded(settle(&mut editor.toasts, flow)?)
        }
        CrewSubcommand::Delete { job_id, id } => {
            let mut editor = CrewChangeEditor::new(api, job_id);
            let flow = editor.delete(&id).await;
            succeeded(settle(&mut editor.toasts, flow)?)
        }
    }
}

async fn run_spares(ctx: &CliContext, spares: SparesCommand) -> Result<(), CliError> {
    let api = api_client(ctx)?;
    match spares.command {
        SparesSubcommand::List { job_id } => {
            let mut editor = ShipSparesEditor::new(api, job_id);
            let flow = editor.load().await;
            succeeded(settle(&mut editor.toasts, flow)?)?;
            emit(ctx, editor.items.items(), |s| {
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    or_dash(s.id.as_deref()),
                    s.item_name,
                    s.awb_number,
                    s.pcs,
                    s.weight,
                    s.airline_flight
                )
            })
        }
        SparesSubcommand::Save { job_id, data } => {
            let rows: Vec<SparesItem> = parse_json(&data)?;
            let mut editor = ShipSparesEditor::new(api, job_id);
            let flow = editor.save(&rows).await;
            succeeded(settle(&mut editor.toasts, flow)?)
        }
        SparesSubcommand::Delete { job_id, id } => {
            let mut editor = ShipSparesEditor::new(api, job_id);
            let flow = editor.delete(&id).await;
            succeeded(settle(&mut editor.toasts, flow)?)
        }
    }
}

// =============================================================================
// feedback
// =============================================================================

async fn run_feedback(ctx: &CliContext, feedback: FeedbackCommand) -> Result<(), CliError> {
    let mut screen = FeedbackScreen::new(api_client(ctx)?);
    match feedback.command {
        FeedbackSubcommand::List { search, kind, status, priority } => {
            let flow = screen.load().await;
            succeeded(settle(&mut screen.toasts, flow)?)?;
            let filter = FeedbackFilter {
                search,
                kind: kind.as_deref().map(FeedbackKind::parse),
                status: status.as_deref().map(FeedbackStatus::parse),
                priority: priority.as_deref().map(Priority::parse),
            };
            emit(ctx, &screen.filtered(&filter), |f| {
                format!("{}\t{}\t{}\t{}\t{}", f.id, f.kind, f.priority, f.status, f.title)
            })
        }
        FeedbackSubcommand::Stats => {
            let flow = screen.load().await;
            succeeded(settle(&mut screen.toasts, flow)?)?;
            let stats = screen.stats();
            if ctx.json {
                return print_json(&serde_json::to_value(stats)?);
            }
            println!(
                "total {}\topen {}\tin progress {}\tresolved {}\tcomplaints {}\tfeedback {}",
                stats.total, stats.open, stats.in_progress, stats.resolved, stats.complaints, stats.feedback
            );
            Ok(())
        }
        FeedbackSubcommand::Create { data } => {
            let form: FeedbackForm = parse_json(&data)?;
            let flow = screen.create(&form).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        FeedbackSubcommand::Status { id, status } => {
            let flow = screen.set_status(&id, FeedbackStatus::parse(&status)).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        FeedbackSubcommand::Delete { id } => {
            let flow = screen.delete(&id).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        FeedbackSubcommand::Respond { id, message } => {
            let flow = screen.add_response(&id, &message).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        FeedbackSubcommand::Responses { id } => {
            let flow = screen.load_responses(&id).await;
            succeeded(settle(&mut screen.toasts, flow)?)?;
            emit(ctx, screen.responses.items(), |r| {
                format!("{}\t{}\t{}", r.id, or_dash(r.responded_by.as_deref()), r.message)
            })
        }
    }
}

// =============================================================================
// user / vessel
// =============================================================================

async fn run_user(ctx: &CliContext, user: UserCommand) -> Result<(), CliError> {
    let mut screen = UsersScreen::new(api_client(ctx)?);
    match user.command {
        UserSubcommand::List { search } => {
            let flow = screen.load().await;
            succeeded(settle(&mut screen.toasts, flow)?)?;
            emit(ctx, &screen.filtered(&search), |u| {
                format!("{}\t{}\t{}\t{}\t{}", u.id, u.name, u.email, or_dash(u.role.as_deref()), u.status_label())
            })
        }
        UserSubcommand::Create { data } => {
            let form: UserForm = parse_json(&data)?;
            let flow = screen.create(&form).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
        UserSubcommand::Toggle { id } => {
            let flow = screen.load().await;
            settle(&mut screen.toasts, flow)?;
            let flow = screen.toggle_status(&id).await;
            succeeded(settle(&mut screen.toasts, flow)?)
        }
    }
}

fn run_vessel(ctx: &CliContext, vessel: VesselCommand) -> Result<(), CliError> {
    match vessel.command {
        VesselSubcommand::Expiring { file, today, attention } => {
            let screen = VesselScreen::from_file(&file)?;
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let rows = if attention { screen.needing_attention(today) } else { screen.expiring(today) };
            emit(ctx, &rows, |row| {
                let state = match row.status {
                    portdesk::model::vessel::SscecStatus::Valid { days_left } => format!("valid ({days_left}d)"),
                    portdesk::model::vessel::SscecStatus::ExpiringSoon { days_left } => {
                        format!("expiring in {days_left}d")
                    }
                    portdesk::model::vessel::SscecStatus::Expired { days_ago } => format!("expired {days_ago}d ago"),
                };
                format!(
                    "{}\t{}\t{}\t{state}",
                    row.vessel.name,
                    or_dash(row.vessel.imo_number.as_deref()),
                    row.vessel.sscec_expiry
                )
            })
        }
    }
}
