//! Sign-in, sign-up and sign-out commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::{CommandContext, GlobalOptions};
use crate::client::AuthApi;
use crate::client::models::{Role, SignupRequest, UserProfile};
use crate::error::Result;
use crate::events::AppEvent;

fn prompt_email(email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Email")
            .interact_text()?),
    }
}

fn prompt_password(password: Option<String>, confirm: bool) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let theme = ColorfulTheme::default();
    let mut prompt = Password::with_theme(&theme).with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

fn welcome(user: &UserProfile) {
    println!(
        "{} Signed in as {} ({})",
        "✓".green(),
        user.display_name().bold(),
        user.role
    );
    println!("  → Run {} to see your dashboard", "skillbridge open /dashboard".cyan());
}

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let email = prompt_email(email)?;
    let password = prompt_password(password, false)?;

    let user = ctx.client.login(&email, &password).await?;
    welcome(&user);
    Ok(())
}

/// Run the signup command
pub async fn signup(
    opts: &GlobalOptions,
    request: SignupRequest,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let request = SignupRequest {
        password: prompt_password(password, true)?,
        ..request
    };

    match ctx.client.signup(&request).await? {
        Some(user) => welcome(&user),
        None => {
            println!("{} Account created", "✓".green());
            println!(
                "  → Run {} to sign in",
                format!("skillbridge login --email {}", request.email).cyan()
            );
        }
    }
    Ok(())
}

/// Run the google-login command
pub async fn google_login(opts: &GlobalOptions, google_token: &str, role: Role) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let user = ctx.client.google_oauth(google_token, role).await?;
    welcome(&user);
    Ok(())
}

/// Run the logout command
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let was_signed_in = ctx.session.get_token().is_some();

    ctx.session.logout()?;
    ctx.client.events().publish(AppEvent::SessionEnded);

    if was_signed_in {
        println!("{} Signed out", "✓".green());
    } else {
        println!("{} No active session", "○".dimmed());
    }
    Ok(())
}
