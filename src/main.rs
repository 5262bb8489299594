use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc;

use collection_picker::async_task::{self, Task, TaskResult};
use collection_picker::catalog::Catalog;
use collection_picker::cli::{Cli, Commands, PickerArgs};
use collection_picker::error::Result;
use collection_picker::event::{self, EventOutcome};
use collection_picker::main_lib;
use collection_picker::model::PickerValue;
use collection_picker::picker::Picker;
use collection_picker::sample::sample_catalog;
use collection_picker::screenshot;
use collection_picker::theme::Theme;
use collection_picker::ui;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger only if COLLECTION_PICKER_LOG environment variable is set
    if let Ok(log_file) = std::env::var("COLLECTION_PICKER_LOG") {
        let target = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(target)))
            .filter_level(log::LevelFilter::Debug)
            .init();

        log::info!("Collection picker starting up");
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run {
        picker: PickerArgs::default(),
    }) {
        Commands::Run { picker } => {
            if let Some(value) = run_interactive(&picker).await? {
                println!("{}", serde_json::to_string(&value)?);
            }
            Ok(())
        }
        Commands::Screenshot {
            picker,
            output,
            width,
            height,
        } => {
            let catalog = load_catalog(&picker)?;
            screenshot::generate_screenshot(&catalog, picker.to_config()?, output.as_deref(), width, height)
        }
    }
}

fn load_catalog(args: &PickerArgs) -> Result<Catalog> {
    match &args.catalog {
        Some(path) => Catalog::load_from_file(path),
        None => {
            log::info!("No catalog given, using the demo catalog");
            Ok(sample_catalog())
        }
    }
}

/// Run the picker until the user picks a value or quits.
async fn run_interactive(args: &PickerArgs) -> Result<Option<PickerValue>> {
    let config = args.to_config()?;
    let catalog = Arc::new(load_catalog(args)?);
    let entity = config.entity;
    let mut picker = Picker::new(config);
    let theme = Theme::default();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup async task channels
    let (task_sender, task_receiver) = mpsc::channel::<Task>(32);
    let (result_sender, mut result_receiver) = mpsc::channel::<TaskResult>(32);

    // Start background worker
    let worker_handle = tokio::spawn(async_task::run_worker(
        task_receiver,
        result_sender,
        catalog.clone(),
        catalog,
    ));

    // Load initial data
    log::info!("📤 main: Sending LoadCollections task");
    if let Err(e) = task_sender.send(Task::LoadCollections { entity }).await {
        log::error!("📤 main: Failed to send LoadCollections task: {}", e);
        picker.status_message = format!("Failed to load collections: {}", e);
    }
    main_lib::dispatch_search(&mut picker, &task_sender);

    // Main application loop
    let tick_rate = Duration::from_millis(100);
    let mut picked = None;
    let loop_result: Result<()> = async {
        loop {
            terminal.draw(|f| ui::draw(f, &picker, &theme))?;

            if crossterm::event::poll(tick_rate)? {
                let event = crossterm::event::read()?;
                match event::handle_event(event, &mut picker, &task_sender) {
                    Ok(EventOutcome::Selected(value)) => {
                        picked = Some(value);
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => picker.status_message = format!("Error handling event: {}", e),
                }
            }

            // Handle async task results
            while let Ok(result) = result_receiver.try_recv() {
                main_lib::handle_task_result(&mut picker, result);
            }

            if picker.should_quit {
                break;
            }
        }
        Ok(())
    }
    .await;

    // Cleanup
    worker_handle.abort();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    loop_result?;
    Ok(picked)
}
