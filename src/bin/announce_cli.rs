//! Announce CLI - build, check and compile announcement documents
//!
//! Commands: new, compile, check, themes, widgets, apply-theme, add-widget, library
//! Outputs JSON to stdout
//! Returns 2 when a document fails its checks

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use announce_core::{
    compile,
    hashing::content_hash,
    storage::{self, HtmlExport, LIBRARY_FILENAME},
    AnnounceError, Compiler, EmailConfig, TemplateRegistry,
};

#[derive(Parser)]
#[command(name = "announce-cli")]
#[command(about = "Announce CLI - widget documents to inline-styled email HTML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory of extra theme/widget preset JSON files
    #[arg(short, long, default_value = "templates")]
    presets_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter document
    New {
        #[arg(short, long, default_value = "config.json")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Compile a document to HTML
    Compile {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = storage::EXPORT_FILENAME)]
        output: PathBuf,

        /// Refuse documents with validation errors
        #[arg(long)]
        strict: bool,
    },

    /// Validate a document without compiling
    Check {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List theme presets
    Themes,

    /// List widget presets
    Widgets,

    /// Replace a document's theme with a preset
    ApplyTheme {
        #[arg(short, long)]
        input: PathBuf,

        /// Theme preset ID
        #[arg(short, long)]
        theme: String,

        /// Defaults to overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Append a widget built from a preset to a section
    AddWidget {
        #[arg(short, long)]
        input: PathBuf,

        /// Section ID
        #[arg(short, long)]
        section: String,

        /// Widget preset ID
        #[arg(short, long)]
        template: String,
    },

    /// Manage saved document templates
    Library {
        #[arg(short, long, default_value = LIBRARY_FILENAME)]
        library: PathBuf,

        #[command(subcommand)]
        command: LibraryCommands,
    },
}

#[derive(Subcommand)]
enum LibraryCommands {
    List,
    Save {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    Load {
        #[arg(long)]
        id: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
    Import {
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => println!("{}", json!({ "success": false, "error": e.to_string() })),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            print_json(&json!({
                "success": false,
                "error": e.to_string(),
            }));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> announce_core::Result<ExitCode> {
    let registry = TemplateRegistry::load_from_dir(&cli.presets_dir)?;

    match cli.command {
        Commands::New { output, force } => {
            if output.exists() && !force {
                return Err(AnnounceError::Io {
                    path: output,
                    source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file exists (use --force)"),
                });
            }
            storage::save_config(&output, &EmailConfig::default())?;
            print_json(&json!({ "success": true, "output": output }));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Compile { input, output, strict } => {
            let config = storage::load_config(&input)?;
            let compiler = Compiler::new();

            let (html, manifest) = if strict {
                match compiler.compile_document(&config) {
                    Ok(compiled) => {
                        let manifest = serde_json::to_value(&compiled)?;
                        (compiled.html, manifest)
                    }
                    Err(e) => {
                        print_json(&json!({ "success": false, "error": e.to_string() }));
                        return Ok(ExitCode::from(2));
                    }
                }
            } else {
                let html = compile(&config);
                let manifest = json!({
                    "content_hash": content_hash(&html),
                    "validation": compiler.check(&config),
                });
                (html, manifest)
            };

            let written = write_html(&output, html)?;
            print_json(&json!({
                "success": true,
                "output": written,
                "document": manifest,
            }));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { input } => {
            let config = storage::load_config(&input)?;
            let result = Compiler::new().check(&config);
            print_json(&result);
            if result.valid {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(2))
            }
        }

        Commands::Themes => {
            print_json(&registry.themes());
            Ok(ExitCode::SUCCESS)
        }

        Commands::Widgets => {
            let widgets: Vec<_> = registry
                .widgets()
                .iter()
                .map(|w| json!({
                    "id": w.id,
                    "name": w.name,
                    "description": w.description,
                    "type": w.widget_type().map(|t| t.as_str()),
                    "label": w.widget_type().map(|t| t.label()),
                }))
                .collect();
            print_json(&widgets);
            Ok(ExitCode::SUCCESS)
        }

        Commands::ApplyTheme { input, theme, output } => {
            let config = storage::load_config(&input)?;
            let themed = registry.apply_theme(&theme, &config)?;
            let output = output.unwrap_or(input);
            storage::save_config(&output, &themed)?;
            print_json(&json!({ "success": true, "output": output, "theme": theme }));
            Ok(ExitCode::SUCCESS)
        }

        Commands::AddWidget { input, section, template } => {
            let mut config = storage::load_config(&input)?;
            let widget = registry.instantiate_widget(&template)?;
            let target = config
                .section_mut(&section)
                .ok_or_else(|| AnnounceError::InvalidDocument(format!("no section with id '{}'", section)))?;
            let widget_id = target.push_widget(widget).id.clone();
            storage::save_config(&input, &config)?;
            print_json(&json!({ "success": true, "widget_id": widget_id }));
            Ok(ExitCode::SUCCESS)
        }

        Commands::Library { library, command } => run_library(&library, command),
    }
}

fn run_library(path: &Path, command: LibraryCommands) -> announce_core::Result<ExitCode> {
    let mut library = storage::load_library(path)?;

    match command {
        LibraryCommands::List => {
            let entries: Vec<_> = library
                .templates()
                .iter()
                .map(|t| json!({
                    "id": t.id,
                    "name": t.name,
                    "description": t.description,
                    "created_at": t.created_at,
                    "sections": t.config.sections.len(),
                }))
                .collect();
            print_json(&entries);
        }
        LibraryCommands::Save { input, name, description } => {
            let config = storage::load_config(&input)?;
            let id = library.save(&name, &description, &config)?.id.clone();
            storage::save_library(path, &library)?;
            print_json(&json!({ "success": true, "id": id }));
        }
        LibraryCommands::Load { id, output } => {
            let config = library.load(&id)?;
            storage::save_config(&output, &config)?;
            print_json(&json!({ "success": true, "output": output }));
        }
        LibraryCommands::Delete { id } => {
            let deleted = library.delete(&id);
            if deleted {
                storage::save_library(path, &library)?;
            }
            print_json(&json!({ "success": deleted, "id": id }));
        }
        LibraryCommands::Export { output } => {
            let json = library.export_json()?;
            std::fs::write(&output, json).map_err(|source| AnnounceError::Io {
                path: output.clone(),
                source,
            })?;
            print_json(&json!({ "success": true, "output": output, "count": library.len() }));
        }
        LibraryCommands::Import { file } => {
            let json = std::fs::read_to_string(&file).map_err(|source| AnnounceError::Io {
                path: file.clone(),
                source,
            })?;
            let count = library.import_json(&json)?;
            storage::save_library(path, &library)?;
            print_json(&json!({ "success": true, "imported": count }));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Write compiled HTML; a directory target gets the standard export filename.
fn write_html(output: &Path, html: String) -> announce_core::Result<PathBuf> {
    let export = HtmlExport::new(html);
    if output.is_dir() {
        return export.write_to(output);
    }
    std::fs::write(output, &export.body).map_err(|source| AnnounceError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(output.to_path_buf())
}
