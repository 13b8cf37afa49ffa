use crate::config::{Config, DEFAULT_CONFIG_NAME};
use crate::document::{ClassMap, StyleDocument};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use freestyle_core::{create, Sheet, SheetOptions};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

pub const STYLESHEET_NAME: &str = "styles.css";
pub const CLASS_MAP_NAME: &str = "classes.json";

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Style document or directory to compile (defaults to the config's srcDir)
    pub path: Option<String>,

    /// Output the stylesheet to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Drop display names and selector escaping
    #[arg(long)]
    pub production: bool,
}

/// Result of compiling a set of documents into one sheet
pub struct Compilation {
    pub sheet: Sheet,

    /// Class maps keyed by document path relative to the compiled root
    pub classes: ClassMap,

    pub errors: Vec<(PathBuf, anyhow::Error)>,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let root = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_src_dir(cwd),
    };

    if !root.exists() {
        return Err(anyhow!("Source path does not exist: {}", root.display()));
    }

    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let production = args.production || config.production || SheetOptions::from_env().production;
    let options = SheetOptions { production };

    status(&args, "🔨 Compiling style documents...".bright_blue().bold().to_string());

    let files = find_style_files(&root, &out_dir);
    if files.is_empty() {
        status(&args, "⚠️  No style documents found".yellow().to_string());
        return Ok(());
    }

    status(&args, format!("Found {} files", files.len()));

    let compilation = compile_files(&files, &root, options);

    for (file, err) in &compilation.errors {
        eprintln!(
            "  {} {} - {}",
            "✗".red(),
            relative_name(file, &root),
            format!("{:#}", err).red()
        );
    }

    if !compilation.errors.is_empty() {
        return Err(anyhow!(
            "{} of {} files failed to compile",
            compilation.errors.len(),
            files.len()
        ));
    }

    let css = compilation.sheet.to_css();

    if args.stdout {
        println!("{}", css);
        return Ok(());
    }

    let (css_path, classes_path) = write_outputs(&out_dir, &css, &compilation.classes)?;

    println!("  {} {}", "✓".green(), css_path.display());
    println!("  {} {}", "✓".green(), classes_path.display());
    println!();
    println!(
        "{} Compiled {} files into {} rules",
        "✅".green(),
        files.len(),
        compilation.sheet.cache().len()
    );

    Ok(())
}

/// Register every document into one fresh sheet
///
/// A document that fails is recorded and skipped; registrations from the
/// documents before it are kept.
pub fn compile_files(files: &[PathBuf], root: &Path, options: SheetOptions) -> Compilation {
    let mut compilation = Compilation {
        sheet: create(options),
        classes: ClassMap::new(),
        errors: Vec::new(),
    };

    for file in files {
        debug!(path = %file.display(), "Compiling style document");

        let result = StyleDocument::load(file).and_then(|doc| {
            let mut staged = create(options);
            let classes = doc.register(&mut staged)?;
            Ok((staged, classes))
        });

        match result {
            Ok((staged, classes)) => {
                compilation.sheet.merge(&staged);
                compilation
                    .classes
                    .insert(relative_name(file, root), Value::Object(classes));
            }
            Err(err) => compilation.errors.push((file.clone(), err)),
        }
    }

    compilation
}

pub fn write_outputs(out_dir: &Path, css: &str, classes: &ClassMap) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let css_path = out_dir.join(STYLESHEET_NAME);
    fs::write(&css_path, css)?;

    let classes_path = out_dir.join(CLASS_MAP_NAME);
    fs::write(&classes_path, serde_json::to_string_pretty(classes)?)?;

    Ok((css_path, classes_path))
}

/// Collect `.json` documents under `root`, sorted by path
///
/// The config file and anything inside `out_dir` are skipped.
pub fn find_style_files(root: &Path, out_dir: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .filter(|path| path.file_name().and_then(|s| s.to_str()) != Some(DEFAULT_CONFIG_NAME))
        .filter(|path| !path.starts_with(out_dir))
        .collect();

    files.sort();
    files
}

/// `buttons/primary.json` under `root` becomes `buttons/primary`
fn relative_name(file: &Path, root: &Path) -> String {
    let relative = if root.is_file() {
        file.file_name().map(Path::new).unwrap_or(file)
    } else {
        file.strip_prefix(root).unwrap_or(file)
    };

    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn status(args: &CompileArgs, line: String) {
    if args.stdout {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
}
