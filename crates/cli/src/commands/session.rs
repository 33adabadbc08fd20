//! Sign-in commands.

use std::io::Write;

use secrecy::SecretString;
use threadline_storefront::auth::{LoginForm, RegisterForm};

use crate::context::Context;
use crate::error::Result;
use crate::output;

fn password_or_prompt(password: Option<String>, label: &str) -> Result<SecretString> {
    Ok(match password {
        Some(password) => SecretString::from(password),
        None => output::secret(label)?,
    })
}

/// Sign in and save the session.
///
/// # Errors
///
/// Returns error if the credentials are rejected.
pub async fn login(ctx: &Context, email: String, password: Option<String>) -> Result<()> {
    let form = LoginForm {
        email,
        password: password_or_prompt(password, "Password")?,
    };
    let user = ctx.auth().login(&form).await?;
    writeln!(std::io::stdout().lock(), "Signed in as {} <{}>", user.name, user.email)?;
    Ok(())
}

/// Create an account and sign in.
///
/// # Errors
///
/// Returns error if the form is invalid or registration is rejected.
pub async fn register(
    ctx: &Context,
    name: String,
    email: String,
    phone: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password, "Password")?;
    let confirm_password = output::secret("Confirm password")?;
    let form = RegisterForm {
        name,
        email,
        phone: phone.unwrap_or_default(),
        password,
        confirm_password,
    };
    let user = ctx.auth().register(&form).await?;
    writeln!(std::io::stdout().lock(), "Welcome, {}!", user.name)?;
    Ok(())
}

/// Forget the saved session.
///
/// # Errors
///
/// Returns error if the state files cannot be written.
pub async fn logout(ctx: &Context) -> Result<()> {
    ctx.auth().logout().await?;
    writeln!(std::io::stdout().lock(), "Signed out")?;
    Ok(())
}

/// Show who is signed in, checking the token with the backend.
///
/// # Errors
///
/// Returns error if the backend fails for a reason other than an expired
/// token.
pub async fn whoami(ctx: &Context) -> Result<()> {
    let user = ctx.auth().restore().await?;
    let mut out = std::io::stdout().lock();
    match user {
        Some(user) => writeln!(out, "{} <{}> ({})", user.name, user.email, user.role)?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}
