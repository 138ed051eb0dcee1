//! unword CLI - Word to structured HTML conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unword::batch::{convert_batch_with_progress, html_path};
use unword::{
    parse_file_with_options, read_source_file, scan_folder, write_report, BatchOptions,
    DocumentOutcome, JsonFormat, ParseOptions, RenderOptions, ReportLayout,
};

/// Default report file name for folder conversion.
const DEFAULT_REPORT: &str = "html_dokument.xlsx";

#[derive(Parser)]
#[command(name = "unword")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert Word documents to structured HTML", long_about = None)]
struct Cli {
    /// Input .docx file or folder of .docx files
    #[arg(value_name = "PATH")]
    input: Option<PathBuf>,

    #[command(flatten)]
    parse: ParseArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Word document to HTML
    Html {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit a standalone page instead of a fragment
        #[arg(long)]
        full_page: bool,

        /// Page language of the standalone page
        #[arg(long, env = "UNWORD_LANG", default_value = unword::render::DEFAULT_LANG)]
        lang: String,

        /// HTML-escape text content
        #[arg(long)]
        escape: bool,
    },

    /// Convert a Word document to JSON
    Json {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the information as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a folder of Word documents into a spreadsheet report
    Batch {
        /// Folder containing .docx files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Report file
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_REPORT)]
        output: PathBuf,

        /// Report column layout
        #[arg(long, value_enum, default_value = "summary")]
        layout: LayoutArg,

        /// Write <name>.html next to each document
        #[arg(long)]
        html_files: bool,

        /// Standalone pages instead of fragments
        #[arg(long)]
        full_page: bool,

        /// Page language of standalone pages
        #[arg(long, env = "UNWORD_LANG", default_value = unword::render::DEFAULT_LANG)]
        lang: String,

        /// Convert documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show version information
    Version,
}

/// Parsing options, accepted before or after any subcommand.
#[derive(Args, Clone)]
struct ParseArgs {
    /// Paragraph that ends the preamble
    #[arg(long, env = "UNWORD_KEYWORD_MARKER", global = true)]
    keyword_marker: Option<String>,

    /// Phrase that ends content extraction
    #[arg(long, env = "UNWORD_TERMINATOR", global = true)]
    terminator: Option<String>,

    /// Capture Title / Meta Description values from the preamble
    #[arg(long, global = true)]
    capture_meta: bool,

    /// Fail on malformed document XML instead of keeping what was read
    #[arg(long, global = true)]
    strict: bool,
}

impl ParseArgs {
    fn to_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new();
        if !self.strict {
            options = options.lenient();
        }
        if self.capture_meta {
            options = options.capture_metadata();
        }
        if let Some(ref marker) = self.keyword_marker {
            options = options.with_keyword_marker(marker.clone());
        }
        if let Some(ref phrase) = self.terminator {
            options = options.with_terminator(phrase.clone());
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// File, title, lead preview, sections and HTML
    Summary,
    /// Key, Name, Slug, Description (HTML), MetaTitle, MetaDescription
    Import,
}

impl From<LayoutArg> for ReportLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Summary => ReportLayout::Summary,
            LayoutArg::Import => ReportLayout::Import,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let parse = cli.parse.to_options();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            full_page,
            lang,
            escape,
        }) => {
            let mut render = RenderOptions::new().with_lang(lang).with_escaping(escape);
            if full_page {
                render = render.full_page();
            }
            cmd_html(&input, output.as_deref(), &parse, &render)
        }
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &parse),
        Some(Commands::Info { input, json }) => cmd_info(&input, json, &parse),
        Some(Commands::Batch {
            input,
            output,
            layout,
            html_files,
            full_page,
            lang,
            sequential,
        }) => {
            let mut render = RenderOptions::new().with_lang(lang);
            if full_page {
                render = render.full_page();
            }
            let mut options = BatchOptions::new()
                .with_parse_options(parse)
                .with_render_options(render)
                .with_layout(layout.into())
                .with_html_files(html_files);
            if sequential {
                options = options.sequential();
            }
            cmd_batch(&input, &output, &options)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: a file prints HTML, a folder becomes a report
            if let Some(input) = cli.input {
                if input.is_dir() {
                    let options = BatchOptions::new()
                        .with_parse_options(parse)
                        .with_render_options(RenderOptions::new().full_page())
                        .with_html_files(true);
                    cmd_batch(&input, Path::new(DEFAULT_REPORT), &options)
                } else {
                    cmd_html(&input, None, &parse, &RenderOptions::default())
                }
            } else {
                println!("{}", "Usage: unword <PATH>".yellow());
                println!("       unword --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    parse: &ParseOptions,
    render: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, parse.clone())?;
    let html = unword::render::to_html(&doc, render)?;

    if let Some(path) = output {
        fs::write(path, &html)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", html);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    parse: &ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, parse.clone())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unword::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(
    input: &Path,
    json: bool,
    parse: &ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = unword::detect_format_from_path(input)?;
    let source = read_source_file(input)?;
    let doc = unword::parse_structure(&source.paragraphs, &source.numbering, parse);
    let stats = doc.stats();

    if json {
        let value = serde_json::json!({
            "file": input.display().to_string(),
            "parts": format.entry_count,
            "main_part": format.main_part,
            "metadata": source.metadata,
            "paragraphs": source.paragraph_count(),
            "title": doc.title,
            "sections": doc.section_titles(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Main part".bold(), format.main_part);
    println!(
        "{}: {}",
        "Numbering".bold(),
        if format.has_numbering { "Yes" } else { "No" }
    );

    if let Some(ref title) = source.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = source.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref editor) = source.metadata.last_modified_by {
        println!("{}: {}", "Last modified by".bold(), editor);
    }
    if let Some(ref created) = source.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = source.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Paragraphs".bold(), source.paragraph_count());
    println!("{}: {}", "H1".bold(), doc.title);
    if let Some(ref meta_title) = doc.meta.title {
        println!("{}: {}", "Meta title".bold(), meta_title);
    }
    if let Some(ref description) = doc.meta.description {
        println!("{}: {}", "Meta description".bold(), description);
    }
    println!("{}: {}", "Sections".bold(), stats.section_count);
    for title in doc.section_titles() {
        println!("  {} {}", "•".dimmed(), title);
    }
    println!("{}: {}", "Subheadings".bold(), stats.subheading_count);
    println!("{}: {}", "Numbered items".bold(), stats.numbered_item_count);
    println!("{}: {}", "Bullet items".bold(), stats.bullet_item_count);
    println!("{}: {}", "Paragraphs in sections".bold(), stats.paragraph_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    options: &BatchOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = scan_folder(input)?;
    log::debug!("Found {} documents in {}", files.len(), input.display());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let report = convert_batch_with_progress(&files, options, |outcome: &DocumentOutcome| {
        pb.set_message(outcome.name.clone());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(_) if options.write_html => {
                let html_name = html_path(&outcome.path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                println!("{} {} → {}", "✓".green(), outcome.name, html_name);
            }
            Ok(_) => println!("{} {}", "✓".green(), outcome.name),
            Err(e) => println!("{} {}: {}", "✗".red(), outcome.name, e),
        }
    }

    write_report(&report, options.layout, output)?;

    println!();
    println!("{} {}", "Report saved to".green().bold(), output.display());
    println!(
        "  {} {} converted, {} failed",
        "└─".dimmed(),
        report.succeeded(),
        report.failed()
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unword".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Word to structured HTML conversion tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unword".dimmed());
    println!("License: MIT");
}
