use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use scriptcue::cli::{Cli, Commands, ConfigAction};
use scriptcue::config::Config;
use scriptcue::correction::station::{CorrectionOutcome, CorrectionStation};
use scriptcue::output::{format_alignment_summary, format_cue_diff};
use scriptcue::pipeline::{SubtitlePipeline, build_corrector};
use scriptcue::srt;
use scriptcue::transcript::Transcript;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .format_target(false)
        .init();
    log::debug!("scriptcue {}", scriptcue::version_string());

    match cli.command {
        Commands::Prompt {
            script,
            limit,
            language,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(limit) = limit {
                config.prompt.limit = limit;
            }
            if let Some(language) = language {
                config.prompt.language = language;
            }
            handle_prompt(&config, &script, cli.quiet)?;
        }
        Commands::Subtitles {
            transcript,
            script,
            max_chars,
            no_align,
            output,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(max_chars) = max_chars {
                config.segmenter.char_budget = max_chars;
            }
            if no_align {
                config.alignment.enabled = false;
            }
            config.validate()?;
            handle_subtitles(
                &config,
                &transcript,
                script.as_deref(),
                output.as_deref(),
                cli.quiet,
            )?;
        }
        Commands::Align {
            srt,
            script,
            output,
        } => {
            let config = load_config(cli.config.as_deref())?;
            handle_align(&config, &srt, &script, output.as_deref(), cli.quiet)?;
        }
        Commands::Correct {
            srt,
            command,
            output,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let command = command.or(config.correction.command.clone());
            handle_correct(
                &config,
                &srt,
                command.as_deref(),
                output.as_deref(),
                cli.quiet,
            )?;
        }
        Commands::Config { action } => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "scriptcue",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/scriptcue/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        Config::load_or_default(&Config::default_path())?
    };

    Ok(config.with_env_overrides())
}

fn read_text(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} {}", path.display()))
}

/// Write to `output`, or stdout when none is given.
fn write_output(output: Option<&Path>, contents: &str, quiet: bool) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !quiet {
                eprintln!("{} {}", "Wrote".green(), path.display());
            }
        }
        None => print!("{contents}"),
    }
    Ok(())
}

fn handle_prompt(config: &Config, script_path: &Path, quiet: bool) -> Result<()> {
    let script = read_text(script_path, "script")?;
    let pipeline = SubtitlePipeline::from_config(config);

    match pipeline.prompt_for(&script) {
        Some(prompt) => println!("{prompt}"),
        None => {
            if !quiet {
                eprintln!(
                    "{}",
                    format!("No prompt terms found in {}", script_path.display()).yellow()
                );
            }
        }
    }
    Ok(())
}

fn handle_subtitles(
    config: &Config,
    transcript_path: &Path,
    script_path: Option<&Path>,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let transcript = Transcript::load(transcript_path)
        .with_context(|| format!("Failed to load transcript {}", transcript_path.display()))?;
    let script = script_path
        .map(|path| read_text(path, "script"))
        .transpose()?;

    let pipeline = SubtitlePipeline::from_config(config);
    let result = pipeline.run(&transcript, script.as_deref());

    if !quiet {
        eprintln!(
            "{} {} cues",
            "Generated".green(),
            result.cues.len().to_string().bold()
        );
        if let Some(summary) = &result.alignment {
            eprintln!("  {}", format_alignment_summary(summary).dimmed());
        } else if script.is_some() {
            eprintln!("  {}", "alignment disabled".dimmed());
        }
    }

    write_output(output, &srt::render(&result.cues), quiet)
}

fn handle_align(
    config: &Config,
    srt_path: &Path,
    script_path: &Path,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let mut cues = srt::parse(&read_text(srt_path, "SRT file")?)
        .with_context(|| format!("Failed to parse {}", srt_path.display()))?;
    let script = read_text(script_path, "script")?;

    let pipeline = SubtitlePipeline::from_config(config);
    match pipeline.align(&mut cues, &script) {
        Some(summary) => {
            if !quiet {
                eprintln!("{}", format_alignment_summary(&summary).green());
            }
        }
        None => {
            if !quiet {
                eprintln!(
                    "{}",
                    format!("{} has no sentences, cues left as is", script_path.display())
                        .yellow()
                );
            }
        }
    }

    write_output(output, &srt::render(&cues), quiet)
}

fn handle_correct(
    config: &Config,
    srt_path: &Path,
    command: Option<&str>,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let cues = srt::parse(&read_text(srt_path, "SRT file")?)
        .with_context(|| format!("Failed to parse {}", srt_path.display()))?;

    let mut station = CorrectionStation::new(build_corrector(command));
    if command.is_none() && !quiet {
        eprintln!(
            "{}",
            "No correction command configured, output is normalized only".yellow()
        );
    }

    let pipeline = SubtitlePipeline::from_config(config);
    let outcome = pipeline.correct(&cues, &mut station);
    if !quiet {
        match &outcome {
            CorrectionOutcome::Corrected { diffs, .. } => {
                let color = std::io::stderr().is_terminal();
                eprintln!(
                    "{} changed {} of {} cues",
                    station.corrector_name().bold(),
                    diffs.len(),
                    cues.len()
                );
                for diff in diffs {
                    eprintln!("  {}", format_cue_diff(diff, color));
                }
            }
            CorrectionOutcome::Fallback { reason } => {
                eprintln!(
                    "{}",
                    format!("Correction skipped, keeping original cues: {reason}").yellow()
                );
            }
        }
    }

    let corrected = outcome.into_cues(&cues);
    write_output(output, &srt::render(&corrected), quiet)
}

fn handle_config_command(action: ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    let config_path = custom_path
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load_or_default(&config_path)?.with_env_overrides();
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    config_path.display()
                );
            }
            if let Some(parent) = config_path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(&config_path, Config::default().to_toml()?)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            println!("{} {}", "Created".green(), config_path.display());
        }
    }

    Ok(())
}
