use anyhow::{Context, Result};
use command_queue::{Envelope, QueueServices};
use email_dispatcher::types::Environment;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env = Environment::from_env();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(env.tracing_level()).into())
        .from_env_lossy();

    // Use JSON format for staging/production, regular format for development
    if env.json_logs() {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    info!("Starting Email Dispatcher in {:?} environment", env);

    let services = QueueServices::new(env.queue_connection_string());
    let message = Envelope::new(env.send_email_command());

    let message_id = services
        .communicator()
        .send(&message)
        .await
        .with_context(|| format!("Failed to send email command to '{}'", message.route()))?;

    info!(message_id = %message_id, route = message.route(), "✅ Email command queued");

    Ok(())
}
