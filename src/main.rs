use anyhow::{Context, Result};
use packline::cli::commands::{PlanCommand, RunCommand, VersionCommand};
use packline::cli::output::*;
use packline::cli::{Cli, Command};
use packline::core::{BuildConfig, BuildContext, ProjectLayout};
use packline::execution::{standard_graph, ExecutionEngine, RunEvent};
use packline::tools::{GitCli, Toolchain, VersionProvider};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_goal(cmd).await?,
        Command::Plan(cmd) => show_plan(cmd)?,
        Command::Version(cmd) => show_version(cmd).await?,
    }

    Ok(())
}

async fn run_goal(cmd: &RunCommand) -> Result<()> {
    let config = BuildConfig::resolve(cmd.config.overrides())?;
    let root = cmd
        .config
        .root
        .canonicalize()
        .with_context(|| format!("Invalid repository root: {}", cmd.config.root.display()))?;
    let layout = ProjectLayout::new(root, &config.package)?;

    println!(
        "{} Building {} ({}) from {}",
        INFO,
        style(&config.package).bold(),
        style(config.configuration).cyan(),
        style(layout.root.display()).dim()
    );

    let toolchain = Toolchain::dotnet(layout.root.clone());
    let ctx = BuildContext {
        config,
        layout,
        toolchain,
    };

    let graph = standard_graph().context("Invalid standard step set")?;
    let plan = match graph.plan(&cmd.goal) {
        Ok(plan) => plan,
        Err(e) => {
            println!("{} {}", CROSS, style(&e).red());
            std::process::exit(1);
        }
    };

    let mut engine = ExecutionEngine::new(graph);

    // Progress bar across the plan, event lines above it
    let progress = create_progress_bar(plan.len());
    let bar = progress.clone();
    engine.add_event_handler(move |event| {
        bar.println(format_run_event(&event));
        match &event {
            RunEvent::StepStarted { step } => bar.set_message(step.clone()),
            RunEvent::StepCompleted { .. } => bar.inc(1),
            _ => {}
        }
    });

    println!();
    let result = engine.run(&cmd.goal, &ctx).await;

    match result {
        Ok(report) => {
            progress.finish_and_clear();
            println!(
                "\n{} Goal {} completed {} ({} steps)",
                CHECK,
                style(&report.goal).bold(),
                style("successfully").green(),
                report.steps.len()
            );
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Ok(())
        }
        Err(e) => {
            progress.finish_and_clear();
            println!(
                "\n{} Goal {} {}",
                CROSS,
                style(&cmd.goal).bold(),
                style("failed").red()
            );
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn show_plan(cmd: &PlanCommand) -> Result<()> {
    let graph = standard_graph().context("Invalid standard step set")?;

    match graph.plan(&cmd.goal) {
        Ok(plan) => {
            if cmd.json {
                let data = serde_json::json!({
                    "goal": cmd.goal,
                    "steps": plan.steps(),
                });
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!(
                    "{} Execution plan for {}:",
                    INFO,
                    style(&cmd.goal).bold()
                );
                println!("{}", format_plan(&plan));
            }
            Ok(())
        }
        Err(e) => {
            println!("{} {}", CROSS, style(&e).red());
            std::process::exit(1);
        }
    }
}

async fn show_version(cmd: &VersionCommand) -> Result<()> {
    let root = cmd
        .root
        .canonicalize()
        .with_context(|| format!("Invalid repository root: {}", cmd.root.display()))?;

    let provider = GitCli::new(root);
    let metadata = provider
        .current()
        .await
        .context("Failed to read version metadata")?;
    let package_version = metadata.package_version();

    if cmd.json {
        let data = serde_json::json!({
            "metadata": metadata,
            "package_version": package_version,
        });
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        println!("{} Version metadata", INFO);
        println!("  Base version: {}", style(&metadata.sem_ver).bold());
        println!(
            "  Commits since version source: {}",
            style(&metadata.commits_since_version_source).cyan()
        );
        println!(
            "  Package version: {}",
            style(&package_version).green()
        );
    }

    Ok(())
}
