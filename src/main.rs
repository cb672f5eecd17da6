use clap::{Parser, Subcommand};
use mdsite::{example, pipeline};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Static site generator for markdown file trees")]
#[command(long_about = "\
Static site generator for markdown file trees

Your filesystem is the data source. Every .md file under --source renders
to an HTML page at the same relative path (keeping its literal file name),
every other file is mirrored unchanged, and each directory gets an
index.html listing its pages and subdirectories.

Content structure:

  content/
  ├── README.md              # Seeds the root index page
  ├── getting-started.md     # Rendered page, listed on the root index
  ├── style.css              # Mirrored as-is (hard link when possible)
  └── guides/                # Listed as a category on the root index
      ├── README.md          # Seeds guides/index.html
      ├── anchors.md         # Rendered, listed on the guides index
      └── index.html         # If present in the source: kept, never overwritten

Hidden files and directories (dot-prefixed) are skipped. Templates are
Tera files loaded from --templates/*.html; every page renders through
default.html.

Run 'mdsite init' to scaffold example content and a default template.")]
#[command(version)]
struct Cli {
    /// Source directory with markdown content
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Destination directory for the rendered site
    #[arg(long, default_value = "output", global = true)]
    output: PathBuf,

    /// Directory with .html Tera templates
    #[arg(long, default_value = "templates", global = true)]
    templates: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site: convert documents, mirror assets, write indexes
    Build,
    /// Scaffold example content and a default template (never overwrites)
    Init,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let args = pipeline::BuildArgs {
                source: cli.source,
                output: cli.output,
                templates: cli.templates,
            };
            let stats = pipeline::build(&args)?;
            println!(
                "==> Rendered {} pages, mirrored {} files, wrote {} indexes → {}",
                stats.pages_rendered,
                stats.files_mirrored,
                stats.indexes_written,
                args.output.display()
            );
        }
        Command::Init => {
            example::generate(&cli.source, &cli.templates)?;
            println!(
                "==> Example content written to {} (templates in {})",
                cli.source.display(),
                cli.templates.display()
            );
        }
    }

    Ok(())
}
