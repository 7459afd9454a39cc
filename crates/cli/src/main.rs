//! CLI tool for collecting poems from text, DOCX and image files.

use anyhow::{Context, Result};
use clap::Parser;
use notebook_core::{Event, Notebook, PoemFormatter, TextNormalizer, Theme, ThemeStore};
use notebook_intake::{ExtractOptions, Intake};
use notebook_ocr::{default_engine, OcrConfig, OcrService};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Collect poems from text, DOCX and image files into a themed notebook.
#[derive(Parser, Debug)]
#[command(name = "poetic-notebook")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input files (.txt, .docx or images), at most 15
    input: Vec<PathBuf>,

    /// A poem typed by hand, added before the uploaded ones
    #[arg(short, long)]
    draft: Option<String>,

    /// Write the notebook to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the notebook (theme, poems, warnings) as JSON
    #[arg(long)]
    json: bool,

    /// Preset theme to use
    #[arg(short, long, conflicts_with = "background")]
    theme: Option<String>,

    /// Custom theme background colour (#rrggbb)
    #[arg(long, requires = "text_color", requires = "font")]
    background: Option<String>,

    /// Custom theme text colour (#rrggbb)
    #[arg(long, requires = "background")]
    text_color: Option<String>,

    /// Custom theme font (e.g. "Lora")
    #[arg(long, requires = "background")]
    font: Option<String>,

    /// JSON file with extra theme presets
    #[arg(long)]
    themes_file: Option<PathBuf>,

    /// List the available theme presets and exit
    #[arg(long)]
    list_themes: bool,

    /// OCR language code(s), e.g. "eng" or "eng+fra"
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Signature printed under each poem
    #[arg(short, long, default_value = notebook_core::DEFAULT_SIGNATURE)]
    signature: String,

    /// Keep the line breaks of extracted poems
    #[arg(short, long)]
    keep_line_breaks: bool,

    /// Title poems after their file names
    #[arg(long)]
    filename_titles: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let themes = load_themes(args.themes_file.as_deref())?;

    if args.list_themes {
        print!("{}", list_themes(&themes));
        return Ok(());
    }

    let notebook = Notebook::with_themes(themes).with_signature(args.signature.clone());
    let notebook = apply_theme(notebook, &args)?;
    let notebook = match &args.draft {
        Some(draft) => notebook
            .update(Event::EditDraft(draft.clone()))
            .update(Event::SubmitDraft),
        None => notebook,
    };

    let intake = build_intake(&args);
    let mut notebook = intake.ingest_paths(notebook, args.input.clone()).await;

    if args.verbose {
        eprintln!("Collected {} poems", notebook.poems.len());
    }

    let output = render(&notebook, args.json)?;

    for warning in notebook.drain_warnings() {
        eprintln!("warning: {}", warning);
    }

    match &args.output {
        Some(path) => {
            write_output(path, &output)?;
            if args.verbose {
                eprintln!("Written to: {}", path.display());
            }
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Built-in presets plus any from a themes file.
fn load_themes(themes_file: Option<&Path>) -> Result<ThemeStore> {
    let mut themes = ThemeStore::new();

    if let Some(path) = themes_file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let count = themes
            .load_json(&json)
            .with_context(|| format!("Failed to load themes from {}", path.display()))?;
        log::info!("Loaded {} theme presets from {}", count, path.display());
    }

    Ok(themes)
}

/// One line per preset: name, then its values.
fn list_themes(themes: &ThemeStore) -> String {
    themes
        .iter()
        .map(|(name, theme)| {
            format!(
                "{}\t{}\t{}\t{}\n",
                name, theme.background, theme.text_color, theme.font
            )
        })
        .collect()
}

/// Select the preset or custom theme asked for on the command line.
fn apply_theme(notebook: Notebook, args: &Args) -> Result<Notebook> {
    if let (Some(background), Some(text_color), Some(font)) =
        (&args.background, &args.text_color, &args.font)
    {
        let theme = Theme::custom(background, text_color, font)?;
        return Ok(notebook.update(Event::ApplyCustomTheme(theme)));
    }

    match &args.theme {
        Some(name) => {
            notebook.themes().require(name)?;
            Ok(notebook.update(Event::SelectTheme(name.clone())))
        }
        None => Ok(notebook),
    }
}

/// Intake configured from the command line, with OCR when it's available.
fn build_intake(args: &Args) -> Intake {
    let options = ExtractOptions {
        normalizer: TextNormalizer::new().with_preserve_line_breaks(args.keep_line_breaks),
        title_from_filename: args.filename_titles,
        signature: args.signature.clone(),
    };
    let intake = Intake::new(options);

    let config = OcrConfig::default().with_language(args.lang.clone());
    match default_engine(&config) {
        Ok(engine) => intake.with_ocr(OcrService::new(engine, config)),
        Err(e) => {
            log::debug!("OCR disabled: {}", e);
            intake
        }
    }
}

/// Render the notebook as plain text or JSON.
fn render(notebook: &Notebook, json: bool) -> Result<String> {
    if json {
        let mut text =
            serde_json::to_string_pretty(notebook).context("Failed to serialize notebook")?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(PoemFormatter::new().format_with_newline(&notebook.poems))
    }
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
