use album_catalog::app::counter::CounterViewModel;
use album_catalog::utils::error::{CatalogError, ErrorSeverity};
use album_catalog::utils::{logger, validation::Validate};
use album_catalog::{
    AlbumLoader, CliConfig, CollectionChange, Command, ConsoleFailureHandler, UiDispatcher,
};
use clap::Parser;

fn exit_code(error: &CatalogError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report_and_exit(error: CatalogError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());

    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(exit_code(&error));
}

fn run_counter(actions: &[String]) -> Result<(), CatalogError> {
    let mut counter = CounterViewModel::new();
    counter.subscribe(|value| println!("🔢 {}", value));

    for action in actions {
        counter.execute(action)?;
    }

    println!("Final value: {}", counter.value());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::info!("Starting album-catalog");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(Command::Counter { actions }) = &config.command {
        if let Err(e) = run_counter(actions) {
            report_and_exit(e);
        }
        return Ok(());
    }

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => report_and_exit(e),
    };

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        report_and_exit(e);
    }

    let dispatcher = match UiDispatcher::start() {
        Ok(dispatcher) => dispatcher,
        Err(e) => report_and_exit(e),
    };
    let handle = dispatcher.handle();

    // 畫面端：每加入一張專輯就印一行
    handle
        .subscribe(|change| match change {
            CollectionChange::Added { index, album } => println!(
                "{:>4}. {} - {} ({}, {}) [{}]",
                index + 1,
                album.title,
                album.creator,
                album.year,
                album.category,
                album.cover_ref
            ),
            CollectionChange::Reset => println!("(collection cleared)"),
        })
        .await?;

    let report = AlbumLoader::from_config(&settings, handle, ConsoleFailureHandler)
        .run()
        .await;

    tracing::info!(
        "Loader finished in {:?}: {} fetched, {} published",
        report.state,
        report.fetched,
        report.published
    );
    tracing::debug!("Elapsed: {} ms", report.elapsed().num_milliseconds());

    dispatcher.shutdown();

    match report.error {
        None => {
            println!("✅ Loaded {} albums", report.published);
            Ok(())
        }
        Some(e) => {
            // 使用者訊息已由 failure handler 顯示
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    }
}
