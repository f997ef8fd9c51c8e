// billsync CLI - reconcile the bill tracking sheet with Legistar

mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use billsync_config::{resolve_token, Settings, LEGISTAR_TOKEN_ENV, SHEETS_TOKEN_ENV};
use billsync_enrich::EnrichedMatter;
use billsync_legistar::LegistarClient;
use billsync_sheets::{resolve_columns, sheet_name, SheetsClient};

use exit_codes::{
    enrich_exit_code, sheet_exit_code, EXIT_LEGISTAR_NOT_AUTH, EXIT_SHEET_NOT_AUTH,
    EXIT_SUCCESS, EXIT_USAGE,
};

#[derive(Parser)]
#[command(name = "billsync")]
#[command(about = "Reconcile a bill tracking sheet with the Legistar API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read file numbers from the sheet, enrich from Legistar, write back
    #[command(after_help = "\
Examples:
  billsync sync
  billsync sync --year 2024 --spreadsheet-id 1AbC...
  LEGISTAR_API_TOKEN=... SHEETS_ACCESS_TOKEN=... billsync sync -q")]
    Sync {
        /// Spreadsheet ID (default: config file)
        #[arg(long)]
        spreadsheet_id: Option<String>,

        /// Session year, selects the "Introductions {year}" tab (default: config file)
        #[arg(long)]
        year: Option<String>,

        /// Legistar API token (default: LEGISTAR_API_TOKEN env)
        #[arg(long)]
        legistar_token: Option<String>,

        /// Sheets access token (default: SHEETS_ACCESS_TOKEN env)
        #[arg(long)]
        sheets_token: Option<String>,

        /// Config file path (default: ~/.config/billsync/config.json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Suppress progress on stderr
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Enrich the given file numbers and print them (no sheet access)
    #[command(after_help = "\
Examples:
  billsync show 'Int 0026-2024'
  billsync show 'Int 0026-2024' 'Int 0005-2024'")]
    Show {
        /// File numbers to look up (e.g. "Int 0026-2024")
        #[arg(required = true)]
        files: Vec<String>,

        /// Legistar API token (default: LEGISTAR_API_TOKEN env)
        #[arg(long)]
        legistar_token: Option<String>,

        /// Config file path (default: ~/.config/billsync/config.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sync {
            spreadsheet_id,
            year,
            legistar_token,
            sheets_token,
            config,
            quiet,
        } => cmd_sync(spreadsheet_id, year, legistar_token, sheets_token, config, quiet),
        Commands::Show { files, legistar_token, config } => {
            cmd_show(files, legistar_token, config)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

// ── Commands ────────────────────────────────────────────────────────

fn cmd_sync(
    spreadsheet_id: Option<String>,
    year: Option<String>,
    legistar_token: Option<String>,
    sheets_token: Option<String>,
    config: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = load_settings(config)?;
    let show_progress = !quiet && atty::is(atty::Stream::Stderr);

    let spreadsheet_id = require_setting(spreadsheet_id, &settings.spreadsheet_id, "spreadsheet ID")?;
    let year = require_setting(year, &settings.year, "year")?;

    let legistar = legistar_client(legistar_token, &settings)?;
    let sheets = sheets_client(sheets_token, spreadsheet_id, &settings)?;

    let sheet = sheet_name(&year);
    let headers = sheets.read_header_row(&sheet).map_err(CliError::sheet)?;
    let columns = resolve_columns(&headers).map_err(CliError::sheet)?;

    let files = sheets.read_file_column(&columns, &sheet).map_err(CliError::sheet)?;
    if files.is_empty() {
        eprintln!("warning: no file numbers found in '{}'", sheet);
        return Ok(());
    }

    if show_progress {
        eprintln!("Resolving {} file numbers from Legistar...", files.len());
    }

    let enriched = billsync_enrich::resolve(&legistar, &files, settings.quorum_threshold)
        .map_err(CliError::enrich)?;

    if show_progress {
        eprintln!("Writing {} enriched matters back to '{}'...", enriched.len(), sheet);
    }

    let report = sheets
        .upload_enriched(&columns, &sheet, &enriched)
        .map_err(CliError::sheet)?;

    if show_progress {
        eprintln!(
            "Done: {} cells updated across {} columns.",
            report.updated_cells, report.columns,
        );
    }

    Ok(())
}

fn cmd_show(
    files: Vec<String>,
    legistar_token: Option<String>,
    config: Option<PathBuf>,
) -> Result<(), CliError> {
    let settings = load_settings(config)?;
    let legistar = legistar_client(legistar_token, &settings)?;

    let enriched = billsync_enrich::resolve(&legistar, &files, settings.quorum_threshold)
        .map_err(CliError::enrich)?;

    for matter in &enriched {
        print_matter(matter);
    }

    Ok(())
}

fn print_matter(matter: &EnrichedMatter) {
    println!("Matter File:               {}", matter.file());
    println!("Matter Name:               {}", matter.name());
    println!("Matter Summary:            {}", matter.summary());
    println!(
        "Prime Sponsor:             {}",
        matter.prime_sponsor.as_deref().unwrap_or("(none)")
    );
    println!("Sponsor Count:             {}", matter.sponsor_count);
    println!(
        "Co-Sponsors:               {}",
        matter.sponsor_names.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    println!("Co-Sponsors Still Needed:  {}", matter.sponsors_remaining_needed);
    println!("Related Bills:             {}", matter.related_bills.join(", "));
    println!("{}", "-".repeat(50));
}

// ── Wiring helpers ──────────────────────────────────────────────────

fn load_settings(config: Option<PathBuf>) -> Result<Settings, CliError> {
    let path = match config.or_else(Settings::default_path) {
        Some(path) => path,
        None => return Ok(Settings::default()),
    };
    Settings::load(&path).map_err(|e| CliError {
        code: EXIT_USAGE,
        message: e.to_string(),
        hint: None,
    })
}

fn require_setting(flag: Option<String>, configured: &str, what: &str) -> Result<String, CliError> {
    if let Some(value) = flag {
        let value = value.trim().to_string();
        if !value.is_empty() {
            return Ok(value);
        }
    }
    if !configured.trim().is_empty() {
        return Ok(configured.trim().to_string());
    }
    Err(CliError {
        code: EXIT_USAGE,
        message: format!("no {} configured", what),
        hint: Some("pass the flag or set it in ~/.config/billsync/config.json".to_string()),
    })
}

fn legistar_client(flag: Option<String>, settings: &Settings) -> Result<LegistarClient, CliError> {
    let token = resolve_token(flag.as_deref(), LEGISTAR_TOKEN_ENV).ok_or_else(|| CliError {
        code: EXIT_LEGISTAR_NOT_AUTH,
        message: "missing Legistar API token".to_string(),
        hint: Some(format!("pass --legistar-token or set {}", LEGISTAR_TOKEN_ENV)),
    })?;

    Ok(match settings.legistar_base {
        Some(ref base) => LegistarClient::with_base_url(token, base.clone()),
        None => LegistarClient::new(token),
    })
}

fn sheets_client(
    flag: Option<String>,
    spreadsheet_id: String,
    settings: &Settings,
) -> Result<SheetsClient, CliError> {
    let token = resolve_token(flag.as_deref(), SHEETS_TOKEN_ENV).ok_or_else(|| CliError {
        code: EXIT_SHEET_NOT_AUTH,
        message: "missing Sheets access token".to_string(),
        hint: Some(format!("pass --sheets-token or set {}", SHEETS_TOKEN_ENV)),
    })?;

    Ok(match settings.sheets_base {
        Some(ref base) => SheetsClient::with_base_url(token, spreadsheet_id, base.clone()),
        None => SheetsClient::new(token, spreadsheet_id),
    })
}

// ── Error type ──────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn enrich(err: billsync_enrich::EnrichError) -> Self {
        let hint = match &err {
            billsync_enrich::EnrichError::Incomplete(_) => {
                Some("check the File # column for typos or matters not yet in Legistar".to_string())
            }
            billsync_enrich::EnrichError::Source(billsync_legistar::LegistarError::MissingToken) => {
                Some(format!("set {}", LEGISTAR_TOKEN_ENV))
            }
            _ => None,
        };
        Self { code: enrich_exit_code(&err), message: err.to_string(), hint }
    }

    fn sheet(err: billsync_sheets::SheetError) -> Self {
        let hint = match &err {
            billsync_sheets::SheetError::MissingColumns(_) => {
                Some("header text must sit on row 2, directly above the data".to_string())
            }
            billsync_sheets::SheetError::Http(401 | 403, _) => {
                Some("the Sheets access token may be expired".to_string())
            }
            _ => None,
        };
        Self { code: sheet_exit_code(&err), message: err.to_string(), hint }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
