//! unnotion CLI - Notion block rendering tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unnotion::render::{self, RenderStats};
use unnotion::{
    parse_file_with_options, parse_files, ErrorMode, JsonFormat, Page, ParseOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "unnotion")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render Notion block JSON to HTML, Markdown, text, and JSON", long_about = None)]
struct Cli {
    /// Input block JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Fail on the first invalid block instead of skipping it
    #[arg(long, global = true, env = "UNNOTION_STRICT")]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert block JSON to all formats (HTML, Markdown, text, JSON)
    Convert {
        /// Input block JSON files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Convert block JSON to HTML
    Html {
        /// Input block JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit block ids as element ids
        #[arg(long)]
        ids: bool,

        /// Wrap the output in a container element
        #[arg(long)]
        wrap: bool,

        /// Omit placeholders for unsupported blocks
        #[arg(long)]
        hide_unsupported: bool,
    },

    /// Convert block JSON to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input block JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Page title for the frontmatter
        #[arg(long)]
        title: Option<String>,

        /// Unordered list marker
        #[arg(long, default_value = "-")]
        list_marker: char,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Do not escape Markdown special characters
        #[arg(long)]
        no_escape: bool,
    },

    /// Convert block JSON to plain text
    Text {
        /// Input block JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert block JSON to a JSON display tree
    Json {
        /// Input block JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show page information
    Info {
        /// Input block JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let parse_options = ParseOptions::new().with_error_mode(if cli.strict {
        ErrorMode::Strict
    } else {
        ErrorMode::Lenient
    });

    let result = match cli.command {
        Some(Commands::Convert { inputs, output }) => {
            cmd_convert(&inputs, output.as_deref(), &parse_options)
        }
        Some(Commands::Html {
            input,
            output,
            ids,
            wrap,
            hide_unsupported,
        }) => {
            let render_options = RenderOptions::new()
                .with_block_ids(ids)
                .with_wrapper(wrap)
                .with_unsupported(!hide_unsupported);
            cmd_html(&input, output.as_deref(), &parse_options, &render_options)
        }
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            title,
            list_marker,
            max_heading,
            no_escape,
        }) => {
            let render_options = RenderOptions::new()
                .with_frontmatter(frontmatter)
                .with_list_marker(list_marker)
                .with_max_heading(max_heading)
                .with_escaping(!no_escape);
            cmd_markdown(
                &input,
                output.as_deref(),
                title,
                &parse_options,
                &render_options,
            )
        }
        Some(Commands::Text { input, output }) => {
            cmd_text(&input, output.as_deref(), &parse_options)
        }
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &parse_options),
        Some(Commands::Info { input, json }) => cmd_info(&input, json, &parse_options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&[input], cli.output.as_deref(), &parse_options)
            } else {
                println!("{}", "Usage: unnotion <FILE> [OUTPUT]".yellow());
                println!("       unnotion --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn emit(output: Option<&Path>, content: &str) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(inputs: &[PathBuf], output: Option<&Path>, options: &ParseOptions) -> CmdResult {
    let output_root = output.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing...");
    log::debug!("Parsing {} inputs into {}", inputs.len(), output_root.display());
    let pages = parse_files(inputs, options);

    let render_options = RenderOptions::new().with_frontmatter(true);
    let mut written = Vec::new();
    let mut failures = 0usize;

    for (input, page) in inputs.iter().zip(pages) {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        pb.set_message(format!("Rendering {}", stem));

        let page = match page {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", input.display(), e);
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
                failures += 1;
                pb.inc(1);
                continue;
            }
        };

        let output_dir = output_root.join(format!("{}_output", stem));
        fs::create_dir_all(&output_dir)?;

        fs::write(
            output_dir.join("page.html"),
            render::to_html(&page, &render_options),
        )?;
        fs::write(
            output_dir.join("page.md"),
            render::to_markdown(&page, &render_options),
        )?;
        fs::write(output_dir.join("page.txt"), render::to_text(&page))?;
        fs::write(
            output_dir.join("page.json"),
            render::to_json(&page, JsonFormat::Pretty)?,
        )?;

        log::info!("Wrote {} blocks to {}", page.block_count(), output_dir.display());
        written.push(output_dir);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output directories:".green().bold());
    for (i, dir) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), dir.display());
    }

    if failures > 0 {
        return Err(format!("{} of {} inputs failed", failures, inputs.len()).into());
    }

    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> CmdResult {
    let page = parse_file_with_options(input, parse_options.clone())?;
    emit(output, &render::to_html(&page, render_options))
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    title: Option<String>,
    parse_options: &ParseOptions,
    render_options: &RenderOptions,
) -> CmdResult {
    let mut page = parse_file_with_options(input, parse_options.clone())?;
    if title.is_some() {
        page.metadata.title = title;
    }
    emit(output, &render::to_markdown(&page, render_options))
}

fn cmd_text(input: &Path, output: Option<&Path>, options: &ParseOptions) -> CmdResult {
    let page = parse_file_with_options(input, options.clone())?;
    emit(output, &render::to_text(&page))
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: &ParseOptions,
) -> CmdResult {
    let page = parse_file_with_options(input, options.clone())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    emit(output, &render::to_json(&page, format)?)
}

fn cmd_info(input: &Path, as_json: bool, options: &ParseOptions) -> CmdResult {
    let shape = unnotion::detect_format_from_path(input)?;
    let page: Page = parse_file_with_options(input, options.clone())?;
    let stats = RenderStats::from_nodes(&render::build(&page.blocks));

    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Input".bold(), shape);
    println!("{}: {}", "Records".bold(), page.metadata.block_count);
    println!("{}: {}", "Partial".bold(), page.metadata.partial_count);
    println!(
        "{}: {}",
        "Truncated".bold(),
        if page.metadata.has_more { "Yes" } else { "No" }
    );
    if let Some(ref cursor) = page.metadata.next_cursor {
        println!("{}: {}", "Next cursor".bold(), cursor);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    println!("{}: {}", "Unsupported".bold(), stats.unsupported_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unnotion".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Notion block rendering tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unnotion".dimmed());
    println!("License: MIT");
}
