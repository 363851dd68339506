use std::sync::Arc;

use expert_advisor::adapters::{
    load_catalog, load_knowledge_base, ConsoleFrontend, ConsoleOutcome, InMemorySharedState, RuleEngine,
    TerminalPresenter,
};
use expert_advisor::application::{ConsultationRuntime, RuntimeSettings};
use expert_advisor::config::{AppConfig, LoggingConfig};

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let catalog = load_catalog(&config.knowledge.askables_path).await?;
    let knowledge = load_knowledge_base(&config.knowledge.rules_path).await?;
    knowledge.check_askables(&catalog)?;

    let settings = RuntimeSettings {
        welcome_text: config.session.welcome_text.clone(),
        broker: config.session.broker_config(),
    };
    let (runtime, mut controller) = ConsultationRuntime::start(
        Arc::new(InMemorySharedState::new()),
        Arc::new(catalog),
        Arc::new(RuleEngine::new(knowledge)),
        settings,
        TerminalPresenter::new(std::io::stdout()),
    )?;

    let mut console = ConsoleFrontend::new(tokio::io::BufReader::new(tokio::io::stdin()));
    match console.run(&mut controller).await? {
        ConsoleOutcome::Finished => {
            let report = runtime.join().await?;
            tracing::info!(
                run_id = %report.run_id,
                questions = report.questions_asked,
                reminders = report.results.reminders.len(),
                conclusions = report.results.conclusions.len(),
                "Consultation finished"
            );
        }
        ConsoleOutcome::InputClosed => runtime.shutdown().await,
    }
    Ok(())
}
