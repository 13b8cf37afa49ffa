use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

const EXAMPLE_DOCUMENT: &str = r##"{
  "keyframes": {
    "pulse": {
      "from": { "opacity": 1 },
      "to": { "opacity": 0.6 }
    }
  },
  "styles": {
    "button": {
      "$displayName": "Button",
      "padding": "8px 16px",
      "background": "#3366FF",
      "color": "white",
      "border": "none",
      "borderRadius": 4,
      "cursor": "pointer",
      "&:hover": { "background": "#2952CC" },
      "@media (max-width: 600px)": { "width": "100%" }
    }
  },
  "css": {
    "body": { "margin": 0 }
  }
}
"##;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Source directory
    #[arg(short, long, default_value = "styles")]
    pub src_dir: String,

    /// Output directory
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Freestyle project...".bright_blue().bold()
    );

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("button.json");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_DOCUMENT)?;
        println!("  {} Created button.json", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        out_dir: Some(args.out_dir.clone().unwrap_or_else(|| "dist".to_string())),
        production: false,
    };

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/button.json", args.src_dir);
    println!("  2. Run: freestyle compile");
    println!("  3. Check output in {}/", config.out_dir.as_deref().unwrap_or("dist"));

    Ok(())
}
