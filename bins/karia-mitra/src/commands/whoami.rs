//! Whoami command

use crate::context::AppContext;
use crate::OutputFormat;
use anyhow::Result;
use karia_cli::output::Status;
use tracing::debug;

/// Resolve the user behind a token, or sign in with email and password
pub async fn run(
    ctx: &AppContext,
    token: Option<String>,
    email: Option<String>,
    password: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let session = ctx.session(None)?;
    let changes = session.subscribe();

    let user = match (token, email) {
        (_, Some(email)) => {
            let password = password.ok_or_else(|| {
                karia_core::Error::validation("--email needs a password")
                    .with_suggestion("Set KARIA_PASSWORD or pass --password")
            })?;
            session.sign_in(&email, &password).await
        }
        (Some(token), None) => session.restore(token).await,
        (None, None) => return Err(karia_core::Error::not_signed_in().into()),
    }
    .map_err(karia_core::Error::from)?;

    if changes.has_changed().unwrap_or(false) {
        debug!(user_id = %user.id, "Auth state published");
    }
    session.close();

    if format == OutputFormat::Json {
        return super::print_json(&user);
    }

    Status::success(&format!("Signed in as {}", user.display_name()));
    if let Some(ref email) = user.email {
        println!("  email:   {email}");
    }
    if let Some(ref phone) = user.phone {
        println!("  phone:   {phone}");
    }
    if let Some(created) = user.created_at {
        println!("  member since {}", created.format("%d %b %Y"));
    }
    Ok(())
}
