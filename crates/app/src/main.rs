use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::Clock;
use exam_core::model::ExamId;
use page::{ExamDocument, InMemoryDocument, PageSeed};
use services::{ExamClientConfig, ExamGateway, HttpExamClient};
use tokio::runtime::Handle;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as log_fmt};
use ui::vm::ExamPage;
use ui::{App, ExamContext};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidExamId { raw: String },
    MissingPage,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidExamId { raw } => write!(f, "invalid --exam-id value: {raw}"),
            ArgsError::MissingPage => write!(f, "no exam page given (--page or EXAM_PAGE_FILE)"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- --page <page.json> [--exam-id <id>] [--base-url <url>]");
    eprintln!();
    eprintln!("The page file holds the server-rendered exam state (questions, choices,");
    eprintln!("time remaining or deadline, anti-forgery token).");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_PAGE_FILE, EXAM_ID, EXAM_BASE_URL, RUST_LOG");
}

struct Args {
    page_file: PathBuf,
    exam_id: Option<ExamId>,
    base_url: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut page_file = std::env::var("EXAM_PAGE_FILE").ok().map(PathBuf::from);
        let mut exam_id = std::env::var("EXAM_ID")
            .ok()
            .and_then(|value| value.parse::<ExamId>().ok());
        let mut base_url = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--page" => page_file = Some(PathBuf::from(require_value(args, "--page")?)),
                "--exam-id" => {
                    let value = require_value(args, "--exam-id")?;
                    let parsed = value
                        .parse::<ExamId>()
                        .map_err(|_| ArgsError::InvalidExamId { raw: value.clone() })?;
                    exam_id = Some(parsed);
                }
                "--base-url" => base_url = Some(require_value(args, "--base-url")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            page_file: page_file.ok_or(ArgsError::MissingPage)?,
            exam_id,
            base_url,
        })
    }
}

/// Sends the final form to the server whenever the page submits it.
fn wire_final_submission(
    document: &InMemoryDocument,
    exam_id: ExamId,
    client: Arc<HttpExamClient>,
    runtime: Handle,
) {
    let csrf_token = document.csrf_token();
    document.set_on_submit(move || {
        let client = Arc::clone(&client);
        let csrf_token = csrf_token.clone();
        runtime.spawn(async move {
            match client.submit_exam(exam_id, csrf_token.as_deref()).await {
                Ok(()) => info!(%exam_id, "exam submitted"),
                Err(err) => error!(%exam_id, error = %err, "final submission failed"),
            }
        });
    });
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let raw = std::fs::read_to_string(&args.page_file)?;
    let seed: PageSeed = serde_json::from_str(&raw)?;
    let exam_id = args.exam_id.unwrap_or(seed.exam_id);
    let remaining = seed.remaining_seconds(&Clock::default());
    let current_question = seed.current_question_id();

    let config = match args.base_url.as_deref() {
        Some(url) => ExamClientConfig::new(url)?,
        None => ExamClientConfig::from_env()?,
    };
    info!(%exam_id, base_url = %config.base_url, remaining, "loading exam page");
    let client = Arc::new(HttpExamClient::new(config));

    let document = seed.into_document();
    wire_final_submission(&document, exam_id, Arc::clone(&client), Handle::current());

    let gateway: Arc<dyn ExamGateway> = client;
    let page = Arc::new(ExamPage::load(
        exam_id,
        remaining,
        current_question,
        Arc::new(document.clone()),
        gateway,
    ));
    let context = ExamContext::new(Arc::clone(&page), document);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Exam")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);

    if let Some(prompt) = page.before_unload() {
        warn!(%exam_id, remaining = page.timer().map_or(0, |t| t.remaining_seconds()), "{prompt}");
    }
    page.teardown();
    Ok(())
}

#[tokio::main]
async fn main() {
    log_fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(2);
    }
}
