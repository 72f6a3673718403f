//! Login, logout and whoami.

use banca_core::{Role, User};

use crate::cli::LoginArgs;
use crate::error::CliError;
use crate::output;

use super::{App, util};

fn user_detail(user: &User, logged_in: Option<String>, color: bool) -> String {
    let mut pairs = vec![
        ("Name", output::bold(&user.name, color)),
        ("Username", user.username.clone()),
        ("Role", user.role.to_string()),
        ("Status", output::paint_user_status(user.status, color)),
    ];
    if user.role == Role::Seller {
        pairs.push(("Commission", output::percent(user.commission_rate)));
        if let Some(limit) = user.bet_limit {
            pairs.push(("Bet limit", output::money(limit)));
        }
    }
    if let Some(at) = logged_in {
        pairs.push(("Logged in", at));
    }
    output::detail(&pairs)
}

pub fn login(args: LoginArgs, app: &mut App) -> Result<(), CliError> {
    let password = util::password_or_prompt(args.password, "Password: ")?;
    let user = app.shop.login(&args.username, &password)?;
    app.note(&format!("Logged in as {} ({})", user.name, user.role));
    Ok(())
}

pub fn logout(app: &mut App) -> Result<(), CliError> {
    let was = app.shop.current_user().map(|u| u.username.clone());
    app.shop.logout();
    match was {
        Some(username) => app.note(&format!("Logged out {username}")),
        None => app.note("No active session"),
    }
    Ok(())
}

pub fn whoami(app: &App) -> Result<(), CliError> {
    let user = app.shop.current_user().ok_or(CliError::NotLoggedIn)?;
    let logged_in = app.shop.session().login_time().map(output::local_time);
    let out = output::render_single(
        app.format,
        user,
        |u| user_detail(u, logged_in.clone(), app.color),
        |u| u.username.clone(),
    );
    app.print(&out);
    Ok(())
}
