use anyhow::{Context, Result};
use lectio::cli::{self, Command};
use lectio::client::BibleClient;
use lectio::config::Config;
use lectio::context::{AppContext, SharedContext, StandardContext};
use lectio::controller::ReadingController;
use lectio::model::{PassageRequest, date_key};
use lectio::storage::LocalStorage;
use std::io::Read;
use std::sync::Arc;

// Same catalogs as the library; the locale itself is process-wide.
rust_i18n::i18n!("locales", fallback = "en");

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let binary = args
        .first()
        .and_then(|a| std::path::Path::new(a).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("lectio")
        .to_string();

    let parsed = match cli::parse_args(args.get(1..).unwrap_or_default()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Try '{} --help'.", binary);
            std::process::exit(2);
        }
    };

    let ctx: SharedContext = Arc::new(StandardContext::new(parsed.root.clone()));

    // A broken config is reported instead of silently replaced.
    let config = match Config::load_or_init(ctx.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration:\n{}", e);
            std::process::exit(1);
        }
    };

    lectio::locale::init(config.locale.as_deref());

    if let Err(e) = lectio::logging::init(ctx.as_ref(), &config.log_level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    install_panic_hook(ctx.as_ref());

    match parsed.command {
        Command::Help => {
            cli::print_help(&binary);
            Ok(())
        }
        Command::Tui => lectio::tui::run(ctx, config).await,
        Command::ProgressExport => {
            let controller = controller_for(ctx, &config)?;
            println!("{}", controller.export_progress());
            Ok(())
        }
        Command::ProgressImport(source) => {
            let payload = if source == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                buf
            } else {
                LocalStorage::read_locked(std::path::Path::new(&source))?
                    .with_context(|| format!("No such file: {}", source))?
            };
            let mut controller = controller_for(ctx, &config)?;
            let added = controller.import_progress(&payload)?;
            println!("{}", rust_i18n::t!("import_done", count = added.to_string()));
            Ok(())
        }
        Command::Plan(key) => {
            let controller = controller_for(ctx, &config)?;
            let key = key.unwrap_or_else(|| date_key(chrono::Local::now().date_naive()));
            let plan = controller.active_plan(&key);
            if plan.is_empty() {
                println!("{}", rust_i18n::t!("no_plan_today"));
            }
            for item in plan {
                let mark = if controller.is_done(&item.id) { "x" } else { " " };
                println!("[{}] {}", mark, item.label);
            }
            Ok(())
        }
        Command::Read(reference) => {
            let request = PassageRequest::parse(&reference)
                .with_context(|| format!("Not a passage reference: '{}'", reference))?;
            let client = BibleClient::new(&config)?;
            let controller = ReadingController::new(ctx, client.versions());
            let settings = &controller.settings;
            let passage = client
                .fetch_passage(
                    &request,
                    &settings.primary_version,
                    settings.secondary_version.as_deref(),
                )
                .await?;

            println!("{}", passage.data.reference);
            println!();
            for (verse, parallel) in passage.rows() {
                println!("{:>3} {}", verse.verse, verse.text);
                if let Some(text) = parallel {
                    println!("    {}", text);
                }
            }
            Ok(())
        }
    }
}

/// Settings only need the version list, which is static per provider.
fn controller_for(ctx: SharedContext, config: &Config) -> Result<ReadingController> {
    let client = BibleClient::new(config)?;
    Ok(ReadingController::new(ctx, client.versions()))
}

fn install_panic_hook(ctx: &dyn AppContext) {
    let log_path = ctx.get_log_path();
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        // Leave the alternate screen so the message is readable.
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        if let Some(path) = &log_path
            && let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));
}
