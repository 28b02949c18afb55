//! Contract Studio Command Line Interface
//!
//! # Usage
//!
//! ```bash
//! # Load the demo blueprints and contracts
//! contract-studio seed
//!
//! # Browse
//! contract-studio blueprints
//! contract-studio contracts
//! contract-studio show contract-offer-jane
//!
//! # Render the document body
//! contract-studio render contract-offer-jane
//!
//! # Lifecycle
//! contract-studio advance contract-offer-bob --by hr@example.com
//! contract-studio revoke contract-nda-startupx --reason "Deal fell through"
//!
//! # Create from a blueprint (keys are field ids or labels)
//! contract-studio create --blueprint bp-nda --name "NDA with Initech" \
//!     --set "Disclosing Party=My Company Inc." --set nda-non-solicit=true
//!
//! # Define a new blueprint
//! contract-studio new-blueprint --name Lease \
//!     --field text:Tenant:required --field date:Start \
//!     --template "Tenant: {{Tenant}} from {{Start}}"
//! ```

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use contract_studio::{
    config::ENV_DATA_DIR,
    logging,
    templates::find_field,
    types::{Blueprint, Contract, ContractStatus, FieldType, FieldValue, ValueMap},
    workflow::{available_actions, StatusProgress, StepState},
    BlueprintDraft, ContractRepository, ContractService, FieldPatch, StoreBackend, StudioConfig,
};

#[derive(Parser)]
#[command(name = "contract-studio")]
#[command(version = "0.1.0")]
#[command(about = "Author contract blueprints and track contracts through approval")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// YAML configuration file (environment variables are used otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for the file store
    #[arg(long, global = true, env = ENV_DATA_DIR)]
    data_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace stored data with the demo blueprints and contracts
    Seed,

    /// List blueprints
    Blueprints,

    /// List contracts
    Contracts {
        /// Only contracts in this status
        #[arg(long)]
        status: Option<ContractStatus>,
    },

    /// Show one contract with its field values and progress
    Show { id: String },

    /// Print the rendered document for a contract
    Render { id: String },

    /// Move a contract to the next status
    Advance {
        id: String,
        /// Who performed the action
        #[arg(long)]
        by: Option<String>,
    },

    /// Revoke a contract
    Revoke {
        id: String,
        #[arg(long)]
        by: Option<String>,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Create a contract from a blueprint
    Create {
        /// Blueprint id
        #[arg(long)]
        blueprint: String,

        /// Contract name
        #[arg(long)]
        name: String,

        /// Field value as key=value; key is a field id or label.
        /// `true` / `false` are stored as checkbox flags.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        values: Vec<String>,
    },

    /// Define and save a new blueprint
    NewBlueprint {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Field as type:label[:required]; placed top to bottom
        #[arg(long = "field", value_name = "TYPE:LABEL[:required]")]
        fields: Vec<String>,

        /// Document template with {{label}} or {{id}} placeholders
        #[arg(long, conflicts_with = "template_file")]
        template: Option<String>,

        /// Read the document template from a file
        #[arg(long)]
        template_file: Option<PathBuf>,
    },
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => return report(cli.format, &e),
    };
    logging::init(&config.log_filter);
    tracing::debug!(?config, "configuration loaded");

    let service = ContractService::new(ContractRepository::new(config.open_store()));
    if config.store == StoreBackend::Memory {
        tracing::warn!("memory store selected; changes are discarded on exit");
    }

    let result = match cli.command {
        Commands::Seed => cmd_seed(&service, cli.format).await,
        Commands::Blueprints => cmd_blueprints(&service, cli.format).await,
        Commands::Contracts { status } => cmd_contracts(&service, status, cli.format).await,
        Commands::Show { id } => cmd_show(&service, &id, cli.format).await,
        Commands::Render { id } => cmd_render(&service, &id, cli.format).await,
        Commands::Advance { id, by } => {
            let contract = service.advance(&id, by.as_deref()).await;
            print_status_change(contract.map_err(Into::into), cli.format)
        }
        Commands::Revoke { id, by, reason } => {
            let contract = service.revoke(&id, by.as_deref(), reason.as_deref()).await;
            print_status_change(contract.map_err(Into::into), cli.format)
        }
        Commands::Create {
            blueprint,
            name,
            values,
        } => cmd_create(&service, &blueprint, &name, &values, cli.format).await,
        Commands::NewBlueprint {
            name,
            description,
            fields,
            template,
            template_file,
        } => {
            cmd_new_blueprint(
                &service,
                NewBlueprintArgs {
                    name,
                    description,
                    fields,
                    template,
                    template_file,
                },
                cli.format,
            )
            .await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(cli.format, &e),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<StudioConfig> {
    let mut config = match &cli.config {
        Some(path) => StudioConfig::from_yaml_file(path)?,
        None => StudioConfig::from_env()?,
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn report(format: OutputFormat, error: &anyhow::Error) -> ExitCode {
    if format == OutputFormat::Json {
        println!("{}", serde_json::json!({ "error": format!("{error:#}") }));
    } else {
        eprintln!("{}: {:#}", "error".red().bold(), error);
    }
    ExitCode::FAILURE
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

async fn cmd_seed(service: &ContractService, format: OutputFormat) -> anyhow::Result<()> {
    let (blueprints, contracts) = service.repository().seed_demo().await?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "blueprints": blueprints,
            "contracts": contracts,
        })),
        OutputFormat::Pretty => {
            println!(
                "{} Seeded {} blueprint(s) and {} contract(s)",
                "OK".green(),
                blueprints,
                contracts
            );
            Ok(())
        }
    }
}

async fn cmd_blueprints(service: &ContractService, format: OutputFormat) -> anyhow::Result<()> {
    let blueprints = service.repository().list_blueprints().await?;

    if format == OutputFormat::Json {
        return print_json(&blueprints);
    }
    if blueprints.is_empty() {
        println!("No blueprints yet. Run `contract-studio seed` for demo data.");
        return Ok(());
    }
    for blueprint in &blueprints {
        println!(
            "{}  {} ({} fields)",
            blueprint.id.dimmed(),
            blueprint.name.bold(),
            blueprint.fields.len()
        );
        if let Some(description) = &blueprint.description {
            println!("    {}", description);
        }
        // Top-to-bottom as placed on the canvas
        for field in blueprint.fields_in_layout_order() {
            let marker = if field.required { "*".red().to_string() } else { " ".to_string() };
            println!("    {} {} [{}]", marker, field.label, field.field_type.to_string().dimmed());
        }
    }
    Ok(())
}

async fn cmd_contracts(
    service: &ContractService,
    status: Option<ContractStatus>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut contracts = service.repository().list_contracts().await?;
    if let Some(status) = status {
        contracts.retain(|c| c.status == status);
    }

    if format == OutputFormat::Json {
        return print_json(&contracts);
    }
    if contracts.is_empty() {
        println!("No contracts found.");
        return Ok(());
    }
    for contract in &contracts {
        println!(
            "{}  {:<10} {}  [{}]  {}",
            contract.id.dimmed(),
            status_badge(contract.status),
            contract.name.bold(),
            contract.blueprint_name,
            contract.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

async fn cmd_show(service: &ContractService, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    let contract = service.contract(id).await?;
    let rows = service.field_rows(id).await?;
    let progress = StatusProgress::for_status(contract.status);

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "contract": contract,
            "fields": rows,
            "progress": progress,
            "actions": available_actions(contract.status),
        }));
    }

    println!("{}", contract.name.bold());
    println!("  Blueprint: {}", contract.blueprint_name);
    println!("  Status:    {}", status_badge(contract.status));
    println!(
        "  Created:   {}",
        contract.created_at.format("%Y-%m-%d %H:%M")
    );

    let stepper: Vec<String> = progress
        .steps
        .iter()
        .map(|step| {
            let label = format!("{}. {}", step.number, step.status);
            match (step.state, step.current) {
                (_, true) => label.bold().to_string(),
                (StepState::Completed, false) => label.green().to_string(),
                (StepState::Pending, false) => label.dimmed().to_string(),
            }
        })
        .collect();
    println!("\n  {}", stepper.join(" > "));
    if progress.revoked {
        println!("  {}", "This contract has been revoked.".red());
    }

    println!("\n  {}", "Field Data".underline());
    for row in &rows {
        println!("  {:<28} {}", row.label, row.value);
    }

    print_history(&contract);

    let actions: Vec<String> = available_actions(contract.status)
        .into_iter()
        .map(|a| a.to_string())
        .collect();
    if !actions.is_empty() {
        println!("\n  Available actions: {}", actions.join(", "));
    }
    Ok(())
}

fn print_history(contract: &Contract) {
    if contract.history.is_empty() {
        return;
    }
    println!("\n  {}", "History".underline());
    for entry in &contract.history {
        let mut line = format!(
            "  {}  {} -> {}",
            entry.transitioned_at.format("%Y-%m-%d %H:%M"),
            entry.from,
            entry.to
        );
        if let Some(by) = &entry.transitioned_by {
            line.push_str(&format!(" by {by}"));
        }
        if let Some(reason) = &entry.reason {
            line.push_str(&format!(" ({reason})"));
        }
        println!("{line}");
    }
}

async fn cmd_render(service: &ContractService, id: &str, format: OutputFormat) -> anyhow::Result<()> {
    let document = service.render(id).await?;

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "contractId": document.contract.id,
            "body": document.body,
            "unresolved": document.unresolved,
        }));
    }

    match &document.body {
        Some(body) => println!("{body}"),
        None => println!("{}", "No document template available.".dimmed()),
    }
    if !document.unresolved.is_empty() {
        eprintln!(
            "{}: {} placeholder(s) left blank: {}",
            "note".yellow(),
            document.unresolved.len(),
            document.unresolved.join(", ")
        );
    }
    Ok(())
}

fn print_status_change(
    contract: anyhow::Result<Contract>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let contract = contract?;
    if format == OutputFormat::Json {
        return print_json(&contract);
    }
    let from = contract
        .history
        .last()
        .map(|t| t.from.to_string())
        .unwrap_or_default();
    println!(
        "{} {}: {} -> {}",
        "OK".green(),
        contract.name.bold(),
        from,
        status_badge(contract.status)
    );
    Ok(())
}

async fn cmd_create(
    service: &ContractService,
    blueprint_id: &str,
    name: &str,
    assignments: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let blueprint = service.blueprint(blueprint_id).await?;
    let values = parse_assignments(&blueprint, assignments)?;
    let contract = service.create_contract(blueprint_id, name, values).await?;

    if format == OutputFormat::Json {
        return print_json(&contract);
    }
    println!(
        "{} Created {} ({})",
        "OK".green(),
        contract.name.bold(),
        contract.id.dimmed()
    );
    Ok(())
}

/// `key=value` pairs keyed by field id; keys may also name a field label
fn parse_assignments(blueprint: &Blueprint, assignments: &[String]) -> anyhow::Result<ValueMap> {
    let mut values = ValueMap::new();
    for assignment in assignments {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got `{assignment}`"))?;
        let field = find_field(&blueprint.fields, key.trim())
            .ok_or_else(|| anyhow!("blueprint `{}` has no field `{}`", blueprint.name, key.trim()))?;

        let value = match raw {
            "true" => FieldValue::Flag(true),
            "false" => FieldValue::Flag(false),
            text => FieldValue::text(text),
        };
        values.insert(field.id.clone(), value);
    }
    Ok(values)
}

struct NewBlueprintArgs {
    name: String,
    description: Option<String>,
    fields: Vec<String>,
    template: Option<String>,
    template_file: Option<PathBuf>,
}

async fn cmd_new_blueprint(
    service: &ContractService,
    args: NewBlueprintArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut draft = BlueprintDraft::new(args.name);
    draft.description = args.description;

    for field_arg in &args.fields {
        let mut parts = field_arg.splitn(3, ':');
        let field_type: FieldType = parts
            .next()
            .unwrap_or_default()
            .parse()
            .with_context(|| format!("invalid field `{field_arg}`"))?;
        let label = parts
            .next()
            .filter(|l| !l.trim().is_empty())
            .ok_or_else(|| anyhow!("field `{field_arg}` needs a label"))?;
        let required = match parts.next() {
            None => false,
            Some("required") => true,
            Some(other) => bail!("unknown field flag `{other}` in `{field_arg}`"),
        };

        let id = draft.add_field(field_type);
        draft.update_field(
            &id,
            FieldPatch {
                label: Some(label.trim().to_string()),
                required: Some(required),
                ..Default::default()
            },
        )?;
    }

    if let Some(path) = &args.template_file {
        let template = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        draft.set_content_template(template);
    } else if let Some(template) = args.template {
        draft.set_content_template(template);
    }

    let blueprint = service.save_draft(draft).await?;

    if format == OutputFormat::Json {
        return print_json(&blueprint);
    }
    println!(
        "{} Saved blueprint {} ({})",
        "OK".green(),
        blueprint.name.bold(),
        blueprint.id.dimmed()
    );
    Ok(())
}

fn status_badge(status: ContractStatus) -> String {
    let label = status.as_str();
    match status {
        ContractStatus::Created => label.normal(),
        ContractStatus::Approved => label.cyan(),
        ContractStatus::Sent => label.blue(),
        ContractStatus::Signed => label.green(),
        ContractStatus::Locked => label.bright_black(),
        ContractStatus::Revoked => label.red(),
    }
    .to_string()
}
