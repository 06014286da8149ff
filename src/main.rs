use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rulebook::bundle::RulesBundle;
use rulebook::collection::Collection;
use rulebook::commands::{self, GenerateOptions, SelectionInput};
use rulebook::config::{get_config_path, Config};
use rulebook::{output, tree_render};
use rulebook_core::models::OutputTarget;
use rulebook_core::StrategyKind;

#[derive(Parser)]
#[command(name = "rulebook")]
#[command(about = "Generate AI coding rules for the technologies a project uses")]
struct Cli {
    /// Taxonomy JSON file (overrides config; default is the built-in catalog)
    #[arg(long, global = true)]
    taxonomy: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SelectionArgs {
    /// Saved collection JSON to use as the baseline selection
    #[arg(short, long)]
    collection: Option<PathBuf>,

    /// Selection as a URL or query string (`libraries=a,b`)
    #[arg(short, long)]
    query: Option<String>,

    /// Library ids to select, comma-separated
    #[arg(short, long, value_delimiter = ',')]
    libraries: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the taxonomy as a tree, marking selected entries
    List {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Only list libraries matching this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Generate rules documents for a selection
    Generate {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Project name substituted into the rules
        #[arg(long)]
        name: Option<String>,

        /// Project description substituted into the rules
        #[arg(long)]
        description: Option<String>,

        /// single-file or multi-file
        #[arg(long)]
        strategy: Option<StrategyKind>,

        /// generic, cursor, copilot or windsurf
        #[arg(long)]
        target: Option<OutputTarget>,

        /// Project root to write into
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print documents instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Fail if any placeholder is left unresolved
        #[arg(long)]
        strict: bool,
    },
    /// Print the URL query for a set of libraries
    Encode {
        /// Library ids
        libraries: Vec<String>,
    },
    /// Print the libraries encoded in a URL or query string
    Decode { query: String },
    /// Compare a selection with a saved collection
    Status {
        /// Saved collection JSON
        #[arg(short, long)]
        collection: PathBuf,

        /// Current selection as a URL or query string
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show the effective configuration, optionally saving it
    Config {
        /// Write the effective configuration to the user config file
        #[arg(long)]
        save: bool,
    },
    /// Render every library into a flat JSON bundle
    Export {
        /// Bundle file to write
        #[arg(short, long)]
        out: PathBuf,

        #[arg(long)]
        target: Option<OutputTarget>,
    },
}

/// Initialize tracing with output to stderr (when stdout carries results) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "rulebook=info,rulebook_core=info".into()),
    );

    if use_stderr {
        // Generated markdown goes to stdout, keep it clean
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn selection_input(args: SelectionArgs) -> anyhow::Result<SelectionInput> {
    let collection = args
        .collection
        .as_deref()
        .map(Collection::read_from)
        .transpose()?;
    Ok(SelectionInput {
        collection,
        query: args.query,
        libraries: args.libraries,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let writes_files = matches!(
        cli.command,
        Commands::Generate { stdout: false, .. }
            | Commands::Export { .. }
            | Commands::Config { save: true }
    );
    init_tracing(!writes_files);

    let mut config = Config::load();
    if let Some(path) = cli.taxonomy {
        config.taxonomy_path = Some(path);
    }
    let load_taxonomy = || commands::load_taxonomy(config.taxonomy_path.as_deref());

    match cli.command {
        Commands::List { selection, search } => {
            let taxonomy = load_taxonomy()?;
            let input = selection_input(selection)?;
            let store = commands::build_store(taxonomy.clone(), &input)?;
            match search {
                Some(text) => {
                    for library in taxonomy.search(&text) {
                        let marker = if store.is_library_selected(library.id.as_str()) {
                            '●'
                        } else {
                            '○'
                        };
                        println!("{} {} ({})", marker, library.name, library.id);
                    }
                }
                None => {
                    let tree = tree_render::taxonomy_tree(&store)?;
                    print!("{}", tree_render::render_tree(&tree));
                }
            }
        }
        Commands::Generate {
            selection,
            name,
            description,
            strategy,
            target,
            out,
            stdout,
            strict,
        } => {
            let input = selection_input(selection)?;
            let store = commands::build_store(load_taxonomy()?, &input)?;
            let options = GenerateOptions {
                project: commands::project_context(name, description, input.collection.as_ref()),
                strategy: strategy.unwrap_or(config.strategy),
                target: target.unwrap_or(config.target),
                strict_placeholders: strict || config.strict_placeholders,
            };
            let contents = commands::generate(&store, &options)?;

            if stdout {
                print!("{}", output::render_stdout(&contents));
            } else {
                let root = out.unwrap_or(config.output_dir);
                let written =
                    output::write_rules(&root, options.target, options.strategy, &contents)?;
                for path in written {
                    tracing::info!("Wrote {}", path.display());
                }
            }
        }
        Commands::Encode { libraries } => {
            println!("{}", commands::encode(&*load_taxonomy()?, &libraries)?);
        }
        Commands::Decode { query } => {
            for id in commands::decode(&*load_taxonomy()?, &query) {
                println!("{}", id);
            }
        }
        Commands::Status { collection, query } => {
            let input = SelectionInput {
                collection: Some(Collection::read_from(&collection)?),
                query,
                libraries: Vec::new(),
            };
            let store = commands::build_store(load_taxonomy()?, &input)?;
            print!("{}", commands::status_report(&store));
        }
        Commands::Export { out, target } => {
            let bundle = RulesBundle::build(&*load_taxonomy()?, target.unwrap_or(config.target))?;
            bundle.write_to(&out)?;
            tracing::info!("Exported {} rules to {}", bundle.len(), out.display());
        }
        Commands::Config { save } => {
            if save {
                let path = get_config_path()?;
                config.save(&path)?;
                tracing::info!("Saved config to {}", path.display());
            }
            print!("{}", commands::render_config(&config)?);
        }
    }

    Ok(())
}
