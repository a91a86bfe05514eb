//! The `lumos enhance` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, ValueEnum};
use lumos_core::codec;
use lumos_core::{
    Config, CpuPipeline, EnhancementController, EnhancementRequest, EnhancementResult, Telemetry,
    WaitStatus,
};

/// Arguments for the `enhance` command.
#[derive(Args, Debug)]
pub struct EnhanceArgs {
    /// PPM (P3) image to enhance
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (defaults to <input stem>_lumos_<scale>x.ppm next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Upscale factor: 2, 4 or 8 (defaults to [enhance].scale_factor)
    #[arg(short, long)]
    pub scale: Option<u32>,

    /// Apply a 3x3 box blur before upscaling
    #[arg(long)]
    pub denoise: bool,

    /// Preset name recorded with the run (defaults to [enhance].preset)
    #[arg(long)]
    pub preset: Option<String>,

    /// Append telemetry to this file instead of the configured log
    #[arg(long, env = "LUMOS_LOG_FILE", conflicts_with = "no_telemetry")]
    pub log_file: Option<PathBuf>,

    /// Keep telemetry in memory only
    #[arg(long)]
    pub no_telemetry: bool,

    /// Give up waiting after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Result format on stdout
    #[arg(short, long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

/// How the run result is printed.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// One summary line
    #[default]
    Human,
    /// The full result as JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Execute the enhance command.
pub async fn execute(args: EnhanceArgs, config: &Config) -> anyhow::Result<()> {
    let telemetry = Arc::new(build_telemetry(&args, config));
    match telemetry.log_path() {
        Some(path) => tracing::debug!("Telemetry log: {}", path.display()),
        None => tracing::debug!("Telemetry kept in memory only"),
    }
    let controller = EnhancementController::new(Arc::new(CpuPipeline::new()), telemetry);

    if !codec::is_supported_input(&args.input) {
        tracing::warn!(
            "{:?} does not have a .{} extension; decoding anyway",
            args.input,
            codec::PPM_EXTENSION
        );
    }
    controller.track_input_selected(&args.input);

    let request = build_request(&args, config);
    tracing::info!(
        "Enhancing {:?} at {}x{}",
        request.input_path,
        request.scale_factor,
        if request.denoise { " with denoise" } else { "" }
    );

    let mut handle = controller.run_async(request);
    let result = match args.timeout {
        Some(secs) => match handle.wait_timeout(Duration::from_secs(secs)).await {
            WaitStatus::Ready => handle.take_result()?,
            WaitStatus::TimedOut => {
                anyhow::bail!("Enhancement did not finish within {secs}s")
            }
        },
        None => handle.wait().await?,
    };

    report(&result, args.format)
}

/// Fill unset arguments from the `[enhance]` config section.
fn build_request(args: &EnhanceArgs, config: &Config) -> EnhancementRequest {
    let scale_factor = args.scale.unwrap_or(config.enhance.scale_factor);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| codec::derive_output_path(&args.input, scale_factor));

    EnhancementRequest::new(&args.input, output)
        .with_scale_factor(scale_factor)
        .with_denoise(args.denoise || config.enhance.denoise)
        .with_preset(
            args.preset
                .clone()
                .unwrap_or_else(|| config.enhance.preset.clone()),
        )
}

fn build_telemetry(args: &EnhanceArgs, config: &Config) -> Telemetry {
    if args.no_telemetry {
        return Telemetry::in_memory();
    }
    if let Some(path) = &args.log_file {
        let path_str = path.to_string_lossy();
        return Telemetry::new(shellexpand::tilde(&path_str).into_owned());
    }
    match config.telemetry_log_path() {
        Some(path) => Telemetry::new(path),
        None => Telemetry::in_memory(),
    }
}

fn report(result: &EnhancementResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Human if result.ok => {
            let m = &result.metrics;
            println!(
                "Enhanced {}x{} -> {}x{} in {} ms: {}",
                m.input_width,
                m.input_height,
                m.output_width,
                m.output_height,
                m.duration_ms,
                result.output_path.display()
            );
        }
        OutputFormat::Human => {}
    }

    if !result.ok {
        anyhow::bail!(
            "Enhancement failed during {} ({}): {}",
            result.error.stage,
            result.error.kind,
            result.error.message
        );
    }
    Ok(())
}
