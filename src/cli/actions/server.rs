use crate::api::{self, AppConfig};
use crate::cli::actions::Action;
use anyhow::{anyhow, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            session_ttl,
            secure_cookies,
        } => {
            let parsed = Url::parse(&dsn)?;

            if !matches!(parsed.scheme(), "postgres" | "postgresql") {
                return Err(anyhow!("unsupported DSN scheme: {}", parsed.scheme()));
            }

            let config = AppConfig::new()
                .with_session_ttl_seconds(session_ttl)
                .with_secure_cookies(secure_cookies);

            api::serve(port, dsn, config).await?;
        }
    }

    Ok(())
}
