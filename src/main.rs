mod cli;

use downmixer::{config, report};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, DownmixArgs, JobArgs};
use dm_av::{apply_decision, ffmpeg_args, ApplyOptions, FfprobeProber, ToolRegistry};
use dm_downmix::Decision;
use dm_probe::{JsonProber, ProbeData, Prober};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "downmixer=debug,dm_downmix=debug,dm_av=debug,dm_probe=debug".to_string()
        } else {
            "downmixer=info,dm_downmix=info,dm_av=info,dm_probe=warn".to_string()
        }
    });

    // Logs go to stderr so `--json` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e
                .downcast_ref::<dm_core::Error>()
                .map(dm_core::Error::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Plan {
            input,
            probe_json,
            job,
            downmix,
            json,
        } => plan_file(
            input.as_deref(),
            probe_json.as_deref(),
            cli.config.as_deref(),
            &job,
            &downmix,
            json,
        ),
        Commands::Run {
            input,
            job,
            downmix,
            dry_run,
            backup,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_file(
                &input,
                cli.config.as_deref(),
                &job,
                &downmix,
                dry_run,
                backup,
            ))
        }
        Commands::Probe { file, json } => probe_file(&file, cli.config.as_deref(), json),
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("downmixer {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_params(config_path: Option<&Path>, overrides: &DownmixArgs) -> Result<config::Config> {
    let mut config = config::load_config_or_default(config_path)?;
    overrides.apply(&mut config.downmix);
    tracing::debug!("downmix params: {:?}", config.downmix);
    Ok(config)
}

fn ffprobe(config: &config::Config) -> Result<FfprobeProber> {
    let registry = ToolRegistry::discover(&config.tools);
    Ok(FfprobeProber::from_tool(registry.require("ffprobe")?))
}

fn print_decision(decision: &Decision, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(decision)?);
    } else {
        print!("{}", report::decision_summary(decision));
    }
    Ok(())
}

fn plan_file(
    input: Option<&Path>,
    probe_json: Option<&Path>,
    config_path: Option<&Path>,
    job: &JobArgs,
    overrides: &DownmixArgs,
    json: bool,
) -> Result<()> {
    let config = load_params(config_path, overrides)?;

    let probe: ProbeData = match (probe_json, input) {
        (Some(path), _) => JsonProber::new()
            .probe(path)
            .with_context(|| format!("Failed to load probe document {:?}", path))?,
        (None, Some(path)) => {
            if !path.exists() {
                anyhow::bail!("Input file does not exist: {:?}", path);
            }
            ffprobe(&config)?.probe(path)?
        }
        (None, None) => anyhow::bail!("either an input file or --probe-json is required"),
    };

    let decision = dm_downmix::plan(&probe, &job.resolve(), &config.downmix);
    print_decision(&decision, json)
}

async fn run_file(
    input: &Path,
    config_path: Option<&Path>,
    job: &JobArgs,
    overrides: &DownmixArgs,
    dry_run: bool,
    backup: Option<String>,
) -> Result<()> {
    let config = load_params(config_path, overrides)?;

    if !input.exists() {
        anyhow::bail!("Input file does not exist: {:?}", input);
    }

    tracing::info!("Processing file: {:?}", input);
    let registry = ToolRegistry::discover(&config.tools);
    let prober = FfprobeProber::from_tool(registry.require("ffprobe")?);
    let probe = prober.probe_async(input).await?;

    let decision = dm_downmix::plan(&probe, &job.resolve(), &config.downmix);
    print!("{}", report::decision_summary(&decision));

    if !decision.process_file {
        return Ok(());
    }

    if dry_run {
        if let Some(command) = decision.command() {
            let output = PathBuf::from("<output>");
            println!(
                "\n[DRY RUN] Would execute: ffmpeg {}",
                ffmpeg_args(input, &output, &command).join(" ")
            );
        }
        return Ok(());
    }

    let options = ApplyOptions { backup_ext: backup };
    if let Some(path) = apply_decision(input, &decision, &registry, &options).await? {
        println!("\nProcessing complete: {}", path.display());
    }
    Ok(())
}

fn probe_file(file: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let probe = ffprobe(&config)?.probe(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&probe)?);
    } else {
        print!("{}", report::probe_summary(&probe));
    }
    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = ToolRegistry::discover(&config.tools).check_all();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);
        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }
        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }
        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg to run downmixes.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    let warnings = config::validate_config(&config);
    if warnings.is_empty() {
        println!("✓ Configuration is valid");
    } else {
        println!("Configuration loaded with {} warning(s):", warnings.len());
        for warning in &warnings {
            println!("  ! {warning}");
        }
    }

    let d = &config.downmix;
    println!(
        "  Downmix: FL/FR={} FC={} BL/BR={} codec={}",
        d.base, d.speech, d.rear, d.codec
    );
    println!("  Remove stereo tracks: {}", d.remove_stereo_tracks);
    println!("  Tool timeout: {}s", config.tools.timeout_secs);

    Ok(())
}
