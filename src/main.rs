//! CLI entry point for param-interp

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use param_interp::{Interpolator, InterpolatorConfig, ParamFrame};

#[derive(Parser)]
#[command(name = "param-interp")]
#[command(version)]
#[command(about = "Substitute {{expr}} placeholders in templates", long_about = None)]
struct Cli {
    /// Interpolator configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpolate an HTML template, marking failed placeholders inline
    Html {
        #[command(flatten)]
        source: TemplateSource,

        #[command(flatten)]
        frames: FrameArgs,
    },

    /// Interpolate a plain-text template, failing if any placeholder fails
    #[command(alias = "u")]
    Unicode {
        #[command(flatten)]
        source: TemplateSource,

        #[command(flatten)]
        frames: FrameArgs,
    },

    /// List the parameters a template references
    Params {
        #[command(flatten)]
        source: TemplateSource,
    },
}

#[derive(Args)]
struct TemplateSource {
    /// Template text
    template: Option<String>,

    /// Read the template from a file instead
    #[arg(short, long, conflicts_with = "template")]
    file: Option<PathBuf>,
}

impl TemplateSource {
    fn read(&self) -> Result<String> {
        match (&self.template, &self.file) {
            (Some(template), _) => Ok(template.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read template {:?}", path)),
            (None, None) => bail!("Provide a template or --file"),
        }
    }
}

#[derive(Args)]
struct FrameArgs {
    /// Parameter frame file (JSON or YAML), outermost scope first; repeatable
    #[arg(short, long = "params")]
    params: Vec<PathBuf>,

    /// Parameter assignment name=value, collected into a final frame; repeatable
    #[arg(short, long = "set")]
    set: Vec<String>,
}

impl FrameArgs {
    fn load(&self) -> Result<Vec<ParamFrame>> {
        let mut frames = self
            .params
            .iter()
            .map(ParamFrame::load)
            .collect::<Result<Vec<_>>>()?;

        if !self.set.is_empty() {
            frames.push(ParamFrame::from_assignments(self.set.as_slice())?);
        }

        Ok(frames)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "param_interp=debug,info"
    } else {
        "param_interp=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => InterpolatorConfig::load(path)?,
        None => InterpolatorConfig::default(),
    };
    let interpolator = Interpolator::new(config);

    match cli.command {
        Commands::Html { source, frames } => {
            let template = source.read()?;
            let frames = frames.load()?;
            tracing::debug!("Interpolating HTML with {} frame(s)", frames.len());
            println!("{}", interpolator.process_html(&template, &frames));
        }

        Commands::Unicode { source, frames } => {
            let template = source.read()?;
            let frames = frames.load()?;
            tracing::debug!("Interpolating unicode with {} frame(s)", frames.len());
            let output = interpolator.try_process_unicode(&template, &frames)?;
            println!("{}", output);
        }

        Commands::Params { source } => {
            let template = source.read()?;
            for name in interpolator.get_params_from_string(&template) {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
