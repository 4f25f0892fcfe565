use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use xlribbon::cli;
use xlribbon::config::ConfigOverrides;
use xlribbon::error::RibbonResult;

#[derive(Parser)]
#[command(name = "xlribbon")]
#[command(about = "Excel ribbon custom UI and VBA callbacks from a YAML model.")]
#[command(long_about = "xlribbon - Excel ribbon custom UI from a YAML model

Describe tabs, groups and controls in YAML, route their callbacks to VBA
macros, and let xlribbon write the customUI.xml, generate VBA stubs for
every getter/setter you leave unset, and package everything into an .xlam.

COMMANDS:
  build      - Package the ribbon into an add-in (.xlam)
  xml        - Write customUI.xml
  macros     - Print or write the generated VBA module
  check      - Validate model, router and images
  callbacks  - List callbacks and their handlers
  init       - Create a starter project file

EXAMPLES:
  xlribbon init ribbon.yaml
  xlribbon check ribbon.yaml
  xlribbon build ribbon.yaml --input template.xlam
  xlribbon macros ribbon.yaml --write build/")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Settings that override the project file's `config:` section
#[derive(Args)]
struct ConfigArgs {
    /// Directory containing {image}.png files
    #[arg(long, env = "XLRIBBON_IMAGE_DIR")]
    image_dir: Option<PathBuf>,

    /// VBA module that receives the generated macros
    #[arg(long, env = "XLRIBBON_MODULE")]
    module: Option<String>,

    /// Output directory for packaged add-ins and macro modules
    #[arg(long, env = "XLRIBBON_BUILD_DIR")]
    build_dir: Option<PathBuf>,

    /// Write module-qualified names (module.id_attribute) into auto-bound attributes
    #[arg(long)]
    qualify: bool,

    /// Router file (.yaml or .json) replacing the project's router section
    #[arg(long)]
    router: Option<PathBuf>,
}

impl ConfigArgs {
    fn split(self) -> (ConfigOverrides, Option<PathBuf>) {
        let overrides = ConfigOverrides {
            module_name: self.module,
            image_dir: self.image_dir,
            build_dir: self.build_dir,
            qualify_bindings: self.qualify,
        };
        (overrides, self.router)
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Package the ribbon into an Excel add-in.

Copies every entry of the input package unchanged and writes:
  customUI/customUI.xml                 - rendered ribbon
  customUI/_rels/customUI.xml.rels      - image relationships
  customUI/customImages/{image}.png     - image assets

The package's _rels/.rels and [Content_Types].xml are patched when they
do not yet reference the custom UI / png images.

The generated VBA module is written as {build_dir}/{module}.bas. If that
fails, the code is printed so it can be pasted into the VBA editor.")]
    /// Package the ribbon into an add-in (.xlam)
    Build {
        /// Path to the YAML project file
        model: PathBuf,

        /// Existing add-in or template package to rewrite
        #[arg(short, long)]
        input: PathBuf,

        /// Output package (default: {build_dir}/{input file name})
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Show verbose build steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write customUI.xml (refuses to overwrite)
    Xml {
        /// Path to the YAML project file
        model: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print or write the generated VBA macros
    Macros {
        /// Path to the YAML project file
        model: PathBuf,

        /// Write {module}.bas into this directory instead of printing
        #[arg(short, long)]
        write: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Validate model, router and images
    Check {
        /// Path to the YAML project file
        model: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// List callbacks and the handlers they are routed to
    Callbacks {
        /// Path to the YAML project file
        model: PathBuf,

        /// Router file (.yaml or .json) replacing the project's router section
        #[arg(long)]
        router: Option<PathBuf>,
    },

    /// Create a starter project file
    Init {
        /// Where to write the project (default: ribbon.yaml)
        #[arg(default_value = "ribbon.yaml")]
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "xlribbon=debug" } else { "xlribbon=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> RibbonResult<()> {
    let cli = Cli::parse();
    let verbose = matches!(
        cli.command,
        Commands::Build { verbose: true, .. } | Commands::Xml { verbose: true, .. }
    );
    init_tracing(verbose);

    match cli.command {
        Commands::Build {
            model,
            input,
            output,
            config,
            verbose,
        } => {
            let (overrides, router) = config.split();
            cli::build(model, input, output, router, overrides, verbose)
        }

        Commands::Xml {
            model,
            dir,
            config,
            verbose,
        } => {
            let (overrides, router) = config.split();
            cli::xml(model, dir, router, overrides, verbose)
        }

        Commands::Macros {
            model,
            write,
            config,
        } => {
            let (overrides, router) = config.split();
            cli::macros(model, write, router, overrides)
        }

        Commands::Check { model, config } => {
            let (overrides, router) = config.split();
            cli::check(model, router, overrides)
        }

        Commands::Callbacks { model, router } => cli::callbacks(model, router),

        Commands::Init { path } => cli::init(path),
    }
}
