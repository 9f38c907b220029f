use anyhow::{Context, Result};
use clap::Args;
use squat_coach_engine::SquatAnalysisEngine;
use std::path::{Path, PathBuf};

use crate::config::{Config, OutputFormat};
use crate::frames::{self, FrameFormat};
use crate::ui;

#[derive(Args)]
pub struct ReplayCommand {
    /// Frame file to replay (`-` reads stdin)
    file: PathBuf,

    /// Input layout of the frame file
    #[arg(short, long, value_enum, default_value = "auto")]
    format: FrameFormat,

    /// Output format (overrides the config file)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Only print the end-of-session summary
    #[arg(long)]
    summary_only: bool,

    /// Reset the session after every N frames
    #[arg(long, value_name = "N")]
    reset_every: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl ReplayCommand {
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let config = Config::load(config_path)?;
        let output = self.output.unwrap_or(config.output.format);
        let color = config.output.color && !self.no_color;

        let mut engine = SquatAnalysisEngine::with_config(config.engine)
            .context("Failed to build analysis engine")?;
        let frames = frames::load_frames(&self.file, self.format)?;

        tracing::info!(frames = frames.len(), file = %self.file.display(), "replaying session");

        for (idx, frame) in frames.iter().enumerate() {
            if let Some(n) = self.reset_every.filter(|n| *n > 0) {
                if idx > 0 && idx % n == 0 {
                    self.print_summary(&engine, output, color)?;
                    engine.reset();
                }
            }

            let snapshot = engine.process_frame(frame);
            if self.summary_only {
                continue;
            }

            match output {
                OutputFormat::Text => println!("{}", ui::format_snapshot(&snapshot, color)),
                OutputFormat::Json => println!("{}", serde_json::to_string(&snapshot)?),
            }
        }

        self.print_summary(&engine, output, color)
    }

    fn print_summary(
        &self,
        engine: &SquatAnalysisEngine,
        output: OutputFormat,
        color: bool,
    ) -> Result<()> {
        let summary = engine.summary();
        match output {
            OutputFormat::Text => {
                if !self.summary_only {
                    println!();
                }
                println!("{}", ui::format_summary(&summary, color));
            }
            OutputFormat::Json => {
                let value = serde_json::json!({ "summary": summary });
                println!("{}", serde_json::to_string(&value)?);
            }
        }
        Ok(())
    }
}
