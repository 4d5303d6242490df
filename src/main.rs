use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tagsieve::bench;
use tagsieve::engine::{SearchEngine, Session};
use tagsieve::error::EngineError;
use tagsieve::events::{Event, EventBus, Topic};
use tagsieve::index::{self, DataIndex};
use tagsieve::output::EventPrinter;
use tagsieve::utils::{self, AppConfig};
use termcolor::{ColorChoice, StandardStream};

#[derive(Parser)]
#[command(name = "tagsieve")]
#[command(about = "Faceted tag filtering with live, incrementally streamed results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the one in the app data directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply filters to a collection and print every event they produce
    Run {
        /// Item file (JSON array, or object with a `recipes` array)
        file: PathBuf,

        /// Free-text query
        #[arg(short, long)]
        query: Option<String>,

        /// Ingredient tag to select (repeatable)
        #[arg(short, long = "ingredient")]
        ingredients: Vec<String>,

        /// Appliance tag to select (repeatable)
        #[arg(short, long = "appliance")]
        appliances: Vec<String>,

        /// Utensil tag to select (repeatable)
        #[arg(short, long = "utensil")]
        utensils: Vec<String>,

        /// JSON-lines file of inbound events, applied after the flags
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Override the partial batch size
        #[arg(long)]
        batch_size: Option<usize>,

        /// Never emit partial batches
        #[arg(long)]
        no_streaming: bool,
    },
    /// Show collection statistics
    Facets {
        /// Item file
        file: PathBuf,
    },
    /// Time free-text searches
    Bench {
        /// Item file
        file: PathBuf,

        /// Queries to time (defaults to "", cho, chocolat, chosssss)
        inputs: Vec<String>,

        /// Searches per input
        #[arg(short = 'n', long, default_value_t = 1000)]
        iterations: u32,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
    /// Show the configuration file location and effective settings
    Config {
        /// Write the effective settings to the configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Run {
            file,
            query,
            ingredients,
            appliances,
            utensils,
            script,
            json,
            no_color,
            batch_size,
            no_streaming,
        } => {
            let mut engine_config = config.engine;
            if let Some(size) = batch_size {
                engine_config.partial_batch_size = size;
            }
            if no_streaming {
                engine_config.streaming = false;
            }

            let index = DataIndex::build(index::load_items(&file)?)?;
            let color = if no_color || json {
                ColorChoice::Never
            } else {
                ColorChoice::Auto
            };
            let printer = Rc::new(RefCell::new(EventPrinter::new(
                StandardStream::stdout(color),
                &index,
                json,
            )));

            let bus = EventBus::new();
            for topic in Topic::OUTPUTS {
                let printer = Rc::clone(&printer);
                bus.subscribe(topic, move |event| {
                    if let Err(err) = printer.borrow_mut().print(event) {
                        log::error!("Failed to print event: {}", err);
                    }
                });
            }

            let session = Session::attach(SearchEngine::from_index(index, engine_config), &bus);

            let mut events = Vec::new();
            if let Some(query) = query {
                events.push(Event::text_search(query));
            }
            for (facet, tags) in [
                ("ingredients", ingredients),
                ("appliances", appliances),
                ("utensils", utensils),
            ] {
                events.extend(tags.into_iter().map(|tag| Event::add_tag(facet, tag)));
            }
            for event in &events {
                apply(&session, event, "flags");
            }

            if let Some(script) = script {
                run_script(&session, &script)?;
            }
        }
        Commands::Facets { file } => {
            let index = DataIndex::build(index::load_items(&file)?)?;
            index::stats::show_stats(&index);
        }
        Commands::Bench {
            file,
            inputs,
            iterations,
            no_progress,
        } => {
            let mut engine = SearchEngine::with_config(index::load_items(&file)?, config.engine)?;
            let inputs = if inputs.is_empty() {
                bench::DEFAULT_INPUTS.iter().map(|s| s.to_string()).collect()
            } else {
                inputs
            };

            println!(
                "Timing {} search(es) per input over {} items",
                iterations,
                engine.index().len()
            );
            let rows = bench::bench_text_search(&mut engine, &inputs, iterations, !no_progress);
            bench::print_bench_table(&rows);
        }
        Commands::Config { init } => {
            let path = match cli.config {
                Some(path) => path,
                None => utils::get_config_path()?,
            };
            println!("Config file: {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);

            if init {
                config.save_to(&path)?;
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

/// Apply one inbound event, reporting events the engine refuses
fn apply(session: &Session, event: &Event, origin: &str) {
    match session.dispatch(event) {
        Ok(()) => {}
        // Already reported by the engine
        Err(EngineError::UnknownFacet(_)) => {}
        Err(err) => log::warn!("Skipped {} event from {}: {}", event.topic(), origin, err),
    }
}

/// Apply every event of a JSON-lines script; blank lines and `#` comments are skipped
fn run_script(session: &Session, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;

    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event: Event = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: invalid event", path.display(), line_no + 1))?;
        apply(session, &event, &format!("line {}", line_no + 1));
    }

    Ok(())
}
