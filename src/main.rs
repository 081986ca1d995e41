use clap::{Parser, Subcommand};
use clinic_atlas::{config, generate, ingest, load, logging, output, patch};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "clinic-atlas")]
#[command(about = "Static site generator for a sleep apnea surgery directory")]
#[command(long_about = "\
Static site generator for a sleep apnea surgery directory

Research exports are normalized into JSON data files, and every page of the
directory is rendered from those files into a static site.

Project layout:

  ./
  ├── config.toml                          # Site config (optional)
  ├── research/                            # Research exports (ingest input)
  │   ├── research_medical_centers.csv
  │   ├── research_independent_clinics.csv
  │   ├── research_faqs.csv
  │   └── research_clinical_studies.csv
  ├── api/                                 # Normalized data (ingest output)
  │   ├── clinics.json                     # Providers and locations read this
  │   ├── faqs.json                        # Blog and FAQ read this
  │   └── ...
  ├── locations/<state>/<city>/            # Generated location hierarchy
  ├── <procedure>-cost-guide/              # Generated cost guides
  ├── blog/                                # Generated blog
  └── faq/                                 # Generated FAQ

Run 'clinic-atlas gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Project root (holds config.toml); relative paths below resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Normalized JSON data directory
    #[arg(long, default_value = "api", global = true)]
    data: PathBuf,

    /// Research CSV directory
    #[arg(long, default_value = "research", global = true)]
    research: PathBuf,

    /// Site output directory
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize research CSVs into JSON data files
    Ingest,
    /// Render one page per provider
    Providers,
    /// Render the state list, state pages and city pages
    Locations,
    /// Render the blog index and posts
    Blog,
    /// Render the FAQ page
    Faq,
    /// Render one cost guide per procedure
    CostGuides,
    /// Run every page generator: locations → providers → cost guides → blog → FAQ
    Build,
    /// Replace navigation and footer in existing HTML files
    PatchLayout {
        /// Directory to patch (defaults to --output)
        dir: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.root)?;
    let data_dir = resolve(&cli.root, &cli.data);
    let output_dir = resolve(&cli.root, &cli.output);

    match cli.command {
        Command::Ingest => {
            let research_dir = resolve(&cli.root, &cli.research);
            let summary = ingest::ingest(&research_dir, &data_dir, &site_config)?;
            output::print_ingest_output(&summary, &data_dir);
        }
        Command::Providers => {
            let report = generate::generate_providers(&data_dir, &output_dir, &site_config)?;
            output::print_generate_output(&report);
        }
        Command::Locations => {
            let report = generate::generate_locations(&data_dir, &output_dir, &site_config)?;
            output::print_generate_output(&report);
        }
        Command::Blog => {
            let report = generate::generate_blog(&data_dir, &output_dir, &site_config)?;
            output::print_generate_output(&report);
        }
        Command::Faq => {
            let report = generate::generate_faq(&data_dir, &output_dir, &site_config)?;
            output::print_generate_output(&report);
        }
        Command::CostGuides => {
            let report = generate::generate_cost_guides(&output_dir, &site_config)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Building {}", output_dir.display());
            let reports = generate::generate_all(&data_dir, &output_dir, &site_config)?;
            output::print_build_output(&reports, &output_dir);
        }
        Command::PatchLayout { dir } => {
            let dir = dir.map_or_else(|| output_dir.clone(), |d| resolve(&cli.root, &d));
            let procedures = load::bundled_procedures()?;
            let patcher = patch::LayoutPatcher::new(&site_config, &procedures)?;
            let report = patcher.run(&dir)?;
            output::print_patch_output(&report, &dir);
        }
        // Printed before config load.
        Command::GenConfig => {}
    }

    Ok(())
}

/// Relative paths resolve against `--root`; absolute paths stay as given.
fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
