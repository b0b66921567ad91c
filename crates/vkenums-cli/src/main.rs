use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing::{debug, info};
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vkenums_core::GenOptions;

#[derive(Parser)]
#[command(name = "vkenums", version, about = "Vulkan registry enum-class generator")]
struct Cli {
    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate enum declarations from a registry XML file
    Generate {
        /// Path to vk.xml
        #[arg(long)]
        xml: PathBuf,
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
        /// Output syntax
        #[arg(long, default_value = "cpp", value_parser = ["cpp", "json"])]
        format: String,
        /// Wrap the generated header in a namespace
        #[arg(long)]
        namespace: Option<String>,
        /// Only these extensions (plus their requirements) are generated
        #[arg(long, value_delimiter = ',', conflicts_with = "exclude")]
        include: Vec<String>,
        /// All extensions except these and their dependents
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Replacement for the Vk type-name prefix
        #[arg(long)]
        name_prefix_replacement: Option<String>,
        /// Strip trailing extension tags from type names
        #[arg(long, default_value_t = false)]
        name_remove_postfix: bool,
        /// Prefix inserted in front of every value name
        #[arg(long)]
        value_prefix_replacement: Option<String>,
        /// Prepended to value names that would start with a digit
        #[arg(long)]
        value_number_prefix: Option<String>,
        /// Strip the repeated TYPENAME_ portion from value names
        #[arg(long, default_value_t = false)]
        remove_structure_names: bool,
        /// Delete underscores from value names
        #[arg(long, default_value_t = false)]
        remove_underscores: bool,
        /// Lowercase value names
        #[arg(long, default_value_t = false)]
        tolower: bool,
        /// Capitalize word starts in value names
        #[arg(long, default_value_t = false)]
        capitalize_start: bool,
        /// Strip trailing tags from values of extension enums
        #[arg(long, default_value_t = false)]
        value_remove_postfix: bool,
        /// Strip trailing tags from values of core enums
        #[arg(long, default_value_t = false)]
        value_remove_postfix_core_types: bool,
    },

    /// Dump JSON schemas for the declaration records
    Schema {
        #[arg(long, default_value = "")]
        out_dir: PathBuf,
    },
}

trait Runnable {
    fn run(self, use_color: bool) -> Result<()>;
}

impl Runnable for Commands {
    fn run(self, use_color: bool) -> Result<()> {
        match self {
            Commands::Generate {
                xml,
                out,
                format,
                namespace,
                include,
                exclude,
                name_prefix_replacement,
                name_remove_postfix,
                value_prefix_replacement,
                value_number_prefix,
                remove_structure_names,
                remove_underscores,
                tolower,
                capitalize_start,
                value_remove_postfix,
                value_remove_postfix_core_types,
            } => {
                debug!("Generate args: xml={:?} out={:?} format={}", xml, out, format);
                let cfg = vkenums_config::load_config().unwrap_or_default();
                let names_cfg = cfg.names.unwrap_or_default();
                let values_cfg = cfg.values.unwrap_or_default();
                let output_cfg = cfg.output.unwrap_or_default();

                // CLI flags win over config file entries.
                let options = GenOptions {
                    namespace: namespace.or(cfg.namespace),
                    include_extensions: if include.is_empty() {
                        cfg.include.unwrap_or_default()
                    } else {
                        include
                    },
                    exclude_extensions: if exclude.is_empty() {
                        cfg.exclude.unwrap_or_default()
                    } else {
                        exclude
                    },
                    name_prefix_replacement: name_prefix_replacement
                        .or(names_cfg.prefix_replacement)
                        .unwrap_or_default(),
                    name_remove_postfix: name_remove_postfix
                        || names_cfg.remove_postfix.unwrap_or(false),
                    value_prefix_replacement: value_prefix_replacement
                        .or(values_cfg.prefix_replacement)
                        .unwrap_or_default(),
                    number_prefix: value_number_prefix
                        .or(values_cfg.number_prefix)
                        .unwrap_or_default(),
                    remove_structure_names: remove_structure_names
                        || values_cfg.remove_structure_names.unwrap_or(false),
                    remove_underscores: remove_underscores
                        || values_cfg.remove_underscores.unwrap_or(false),
                    to_lower: tolower || values_cfg.tolower.unwrap_or(false),
                    capitalize_start: capitalize_start
                        || values_cfg.capitalize_start.unwrap_or(false),
                    value_remove_postfix: value_remove_postfix
                        || values_cfg.remove_postfix.unwrap_or(false),
                    value_remove_postfix_core_types: value_remove_postfix_core_types
                        || values_cfg.remove_postfix_core_types.unwrap_or(false),
                    tag_names: Vec::new(),
                };

                let xml_text = std::fs::read_to_string(&xml)?;
                let doc = vkenums_parsers_xml::parse_registry(&xml_text)?;
                let decls = vkenums_services::generate(&doc, &options)?;
                info!("generated {} enum declarations", decls.len());

                // The config file format only applies while the flag is at
                // its default.
                let format = if format == "cpp" {
                    output_cfg.format.unwrap_or(format)
                } else {
                    format
                };
                let out = out.or(output_cfg.out.map(PathBuf::from));
                match out {
                    Some(path) => {
                        let file = std::fs::File::create(&path)?;
                        write_output(file, &decls, &format, &options)?;
                        let note = format!("{} declarations written to {}", decls.len(), path.display());
                        if use_color {
                            use owo_colors::OwoColorize;
                            println!("{} {}", "✔".green(), note);
                        } else {
                            println!("✔ {}", note);
                        }
                    }
                    None => {
                        let stdout = std::io::stdout();
                        let lock = stdout.lock();
                        write_output(lock, &decls, &format, &options)?;
                    }
                }
                Ok(())
            }

            Commands::Schema { out_dir } => {
                let out_dir = if out_dir.as_os_str().is_empty() {
                    PathBuf::from("./docs/schemas")
                } else {
                    out_dir
                };
                std::fs::create_dir_all(&out_dir)?;
                macro_rules! dump {
                    ($ty:ty, $name:literal) => {{
                        let schema = schemars::schema_for!($ty);
                        let path = out_dir.join($name);
                        let f = std::fs::File::create(&path)?;
                        serde_json::to_writer_pretty(f, &schema)?;
                    }};
                }
                dump!(vkenums_domain::EnumDecl, "enum_decl.schema.json");
                dump!(vkenums_domain::ValueRecord, "value_record.schema.json");
                println!("✔ schemas written to {}", out_dir.display());
                Ok(())
            }
        }
    }
}

fn write_output(
    mut w: impl std::io::Write,
    decls: &[vkenums_domain::EnumDecl],
    format: &str,
    options: &GenOptions,
) -> Result<()> {
    match format {
        "json" => {
            serde_json::to_writer_pretty(&mut w, decls)?;
            writeln!(w)?;
        }
        _ => vkenums_emit_cpp::write_header(w, decls, options.namespace.as_deref())?,
    }
    Ok(())
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = rolling::daily("logs", "vkenums.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

fn main() -> Result<()> {
    color_eyre::install()?;
    // Keep the guard alive so buffered file-log lines are flushed on exit.
    let _log_guard = init_tracing();

    let cli = Cli::parse();

    let use_color = !cli.no_color
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();

    cli.cmd.run(use_color)
}
