use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;

use tracing::info;

use hem_lca::adapters::database::{DatabaseSnapshot, InMemoryActivityDatabase};
use hem_lca::adapters::progress::{NoopProgressObserver, TracingProgressObserver};
use hem_lca::adapters::run_file::RunFile;
use hem_lca::adapters::solver::InMemoryLcaSolver;
use hem_lca::application::{RunHemAnalysisCommand, RunHemAnalysisHandler};
use hem_lca::config::{AppConfig, LoggingConfig, ValidationError};
use hem_lca::domain::classification::ClassificationTree;
use hem_lca::domain::results::{ContributionGroup, ResultsAggregator};
use hem_lca::ports::ProgressObserver;

fn init_tracing(config: &LoggingConfig) -> Result<(), ValidationError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(io::stderr);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging)?;

    let run = &config.run;
    let snapshot_path = run
        .snapshot_path
        .as_ref()
        .ok_or(ValidationError::MissingRequired("run.snapshot_path"))?;
    let run_file_path = run
        .run_file
        .as_ref()
        .ok_or(ValidationError::MissingRequired("run.run_file"))?;

    let snapshot = DatabaseSnapshot::load(snapshot_path)?;
    let run_file = RunFile::load(run_file_path)?;
    info!(
        activities = snapshot.activities.len(),
        exchanges = snapshot.exchanges.len(),
        scenarios = run_file.scenarios.len(),
        "Inputs loaded"
    );

    let tree = ClassificationTree::build(&snapshot.classification_tree)?;
    let mut solver = InMemoryLcaSolver::from_snapshot(&snapshot)?;
    let database = Arc::new(InMemoryActivityDatabase::from_snapshot(&snapshot));
    let observer: Arc<dyn ProgressObserver> = if run.progress {
        Arc::new(TracingProgressObserver::new())
    } else {
        Arc::new(NoopProgressObserver)
    };

    let handler = RunHemAnalysisHandler::new(database, Arc::new(tree), observer)
        .with_aggregator(ResultsAggregator::new(
            run.contribution_top_n,
            ContributionGroup::Location,
        ))
        .with_progress_interval(run.progress_interval());

    let result = handler.handle(
        RunHemAnalysisCommand {
            functional_unit: run_file.functional_unit,
            amount: run_file.amount,
            methods: run_file.methods,
            scenarios: run_file.scenarios,
            classification_system: run.classification_system.clone(),
            assign_other: run.assign_other,
        },
        &mut solver,
    )?;

    let report = serde_json::to_string_pretty(&result.report())?;
    match &run.output_path {
        Some(path) => {
            fs::write(path, report)?;
            info!(path = %path.display(), run_id = %result.run_id, "Report written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
