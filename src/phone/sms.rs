use async_trait::async_trait;
use tracing::info;

/// Out-of-band delivery for one-time codes. The real gateway sits behind
/// this trait so the service never couples to a specific SMS provider.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send_code(&self, phone_number: &str, code: &str) -> anyhow::Result<()>;
}

/// Logs the dispatch instead of sending. Used until a provider gateway is
/// wired up; the code itself stays out of the logs.
#[derive(Clone, Default)]
pub struct LogSmsGateway;

#[async_trait]
impl SmsGateway for LogSmsGateway {
    async fn send_code(&self, phone_number: &str, _code: &str) -> anyhow::Result<()> {
        info!(phone_number = %phone_number, "verification code dispatched");
        Ok(())
    }
}
