//! Typing lesson generator
//!
//! Reads a character list (one lesson per line) and an optional dictionary,
//! and writes progressive touch-typing lessons as a KTouch course or plain text.

mod cli;
mod config;
mod input;
mod lesson;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;

use cli::{Args, Display};
use config::{ConfigOverrides, GenerationConfig, Origin};
use input::{Dictionary, LessonSpec};
use lesson::LessonGenerator;
use output::default_file_name;

fn init_logger(level: LevelFilter) {
    let mut logger_builder = env_logger::Builder::from_default_env();
    logger_builder.filter_level(level);
    logger_builder.init();
}

/// Defaults, then the JSON config file, then command-line flags
fn base_config(args: &Args) -> Result<GenerationConfig> {
    let mut config = GenerationConfig::default();

    if let Some(path) = &args.config {
        let file = ConfigOverrides::from_json_file(path)?;
        config = config.with_overrides(&file);
        config.validate(&Origin::File(path.clone()))?;
    }

    config = config.with_overrides(&args.overrides());
    config.validate(&Origin::CommandLine)?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    if args.previous_numbers_fraction.is_some() {
        warn!("--previous-numbers-fraction has no effect; use --include-previous-numbers");
    }
    let base = base_config(args)?;

    let spec = LessonSpec::load(&args.charslist)?;
    if let Some(number) = args.lesson_number {
        spec.check_lesson_number(number)?;
    }
    let configs = spec
        .resolve(&base)
        .with_context(|| format!("invalid options in {}", args.charslist.display()))?;
    let run_config = spec.run_config(&base);
    debug!(
        "run configuration: {}",
        serde_json::to_string(&run_config).unwrap_or_default()
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let dictionary = match &args.dictionary {
        Some(path) => Dictionary::load(path)?.prepare(
            run_config.max_dictionary_words,
            run_config.shuffle_dict,
            &mut rng,
        ),
        None => Dictionary::empty(),
    };
    if dictionary.is_empty() {
        info!("{} lessons, no dictionary words", spec.lessons.len());
    } else {
        info!(
            "{} lessons, {} dictionary words",
            spec.lessons.len(),
            dictionary.len()
        );
    }

    let display = Display::new(args.quiet);
    let total = spec.lessons.len();
    let mut display_error = None;
    let lessons = LessonGenerator::new(&dictionary).generate(
        &spec,
        &configs,
        args.lesson_number,
        &mut rng,
        |number, chars| {
            if let Err(e) = display.show_lesson(number, total, chars) {
                display_error.get_or_insert(e);
            }
        },
    );
    if let Some(e) = display_error {
        return Err(e).context("cannot write progress");
    }

    let format = args.format();
    let document = format.render(&lessons, &args.title_prefix, &mut rng);
    let path = match &args.output {
        Some(path) => path.clone(),
        None => {
            let single = args.lesson_number.and(lessons.first());
            PathBuf::from(default_file_name(format, single))
        }
    };
    fs::write(&path, document).with_context(|| format!("cannot write {}", path.display()))?;
    info!("wrote {}", path.display());

    display.show_summary(&lessons, &path)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level);
    run(&args)
}
