use anyhow::anyhow;
use stockdesk_api_models::LoginForm;
use stockdesk_ui::AuthStore;

use crate::cli::{LoginArgs, OutputFormat};
use crate::client::{CliContext, CliError, CliResult};
use crate::output::print_json;

pub(crate) async fn handle_login(ctx: &CliContext, args: LoginArgs) -> CliResult<()> {
    let password = match args.password {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")
            .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")))?,
    };
    let form = LoginForm {
        email: args.email.trim().to_string(),
        password,
        remember: true,
    };

    let mut auth = AuthStore::new(ctx.app.api.clone());
    ctx.settle(auth.login(&form).await)?;
    if let Some(user) = auth.user() {
        println!("Signed in as {} <{}>", user.full_name, user.email);
    }
    Ok(())
}

pub(crate) async fn handle_logout(ctx: &CliContext) -> CliResult<()> {
    AuthStore::new(ctx.app.api.clone()).logout().await;
    println!("Signed out");
    Ok(())
}

pub(crate) fn handle_whoami(ctx: &CliContext) -> CliResult<()> {
    ctx.require_session()?;
    let user = ctx
        .app
        .session
        .user()
        .ok_or_else(|| CliError::validation("session carries no user"))?;
    match ctx.output {
        OutputFormat::Json => print_json(&user),
        OutputFormat::Table => {
            println!("{} <{}>", user.full_name, user.email);
            if !user.role_name.is_empty() {
                println!("role: {}", user.role_name);
            }
            Ok(())
        }
    }
}
