//! Token command - Mints a session token for local use.

use uuid::Uuid;

use crate::cli::args::TokenArgs;
use crate::config::Config;
use crate::domain::CurrentUser;
use crate::errors::{AppError, AppResult};
use crate::services::{JwtSessions, SessionService};

/// Execute the token command
pub async fn execute(args: TokenArgs, config: Config) -> AppResult<()> {
    let config = config.require_jwt_secret()?;
    let user = CurrentUser::new(args.user_id.unwrap_or_else(Uuid::new_v4), args.email);
    let token = JwtSessions::new(config).issue_token(&user)?;

    tracing::info!(user_id = %user.id, expires_in = token.expires_in, "Session token issued");
    let body =
        serde_json::to_string_pretty(&token).map_err(|e| AppError::internal(e.to_string()))?;
    println!("{}", body);

    Ok(())
}
