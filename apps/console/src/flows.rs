//! Terminal walkthroughs of the panel: each command drives the controller
//! through the same actions a click sequence in the browser would.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use shared::domain::{ActionName, UserRecord};
use user_panel::{display::describe_user, ViewController};

pub fn list(
    panel: &mut ViewController,
    sort: Option<&str>,
    reverse: bool,
    timeout: Duration,
) -> Result<()> {
    panel.init();
    settle(panel, timeout)?;

    if let Some(column) = sort {
        panel.sort_table(column);
        if reverse {
            panel.sort_table(column);
        }
    }

    print_list(panel);
    Ok(())
}

pub fn add(
    panel: &mut ViewController,
    name: String,
    email: String,
    role: Option<String>,
    timeout: Duration,
) -> Result<()> {
    if let Some(role) = &role {
        ensure_known_role(panel, role)?;
    }

    panel.dispatch(ActionName::Add, None);
    let draft = panel
        .current_mut()
        .context("add panel did not prepare a draft user")?;
    draft.name = name;
    draft.email = email;
    if let Some(role) = role {
        draft.role = role;
    }

    panel.dispatch(ActionName::ConfirmAdd, None);
    println!("{}", panel.display_heading());
    panel.submit_add_user()?;
    finish_submit(panel, timeout)
}

pub fn edit(
    panel: &mut ViewController,
    email: &str,
    name: Option<String>,
    role: Option<String>,
    timeout: Duration,
) -> Result<()> {
    if let Some(role) = &role {
        ensure_known_role(panel, role)?;
    }

    panel.dispatch(ActionName::Edit, None);
    settle(panel, timeout)?;
    let mut user = find_user(panel, email)?;
    if let Some(name) = name {
        user.name = name;
    }
    if let Some(role) = role {
        user.role = role;
    }

    panel.dispatch(ActionName::ConfirmEdit, Some(user));
    println!("{}", panel.display_heading());
    panel.submit_edit_user()?;
    finish_submit(panel, timeout)
}

pub fn remove(panel: &mut ViewController, email: &str, timeout: Duration) -> Result<()> {
    panel.dispatch(ActionName::Remove, None);
    settle(panel, timeout)?;
    let user = find_user(panel, email)?;

    panel.dispatch(ActionName::ConfirmRemove, Some(user));
    println!("{}", panel.display_heading());
    panel.submit_remove_user()?;
    finish_submit(panel, timeout)
}

fn settle(panel: &mut ViewController, timeout: Duration) -> Result<()> {
    if !panel.settle(timeout) {
        bail!(
            "timed out after {}s waiting for the user API",
            timeout.as_secs()
        );
    }
    Ok(())
}

/// A successful submit returns the panel to the view list; a failed one
/// leaves it on the confirm step.
fn finish_submit(panel: &mut ViewController, timeout: Duration) -> Result<()> {
    settle(panel, timeout)?;
    if panel.state().name().is_confirm() {
        bail!("{} failed", panel.display_heading());
    }
    print_list(panel);
    Ok(())
}

fn find_user(panel: &ViewController, email: &str) -> Result<UserRecord> {
    let wanted = email.trim();
    panel
        .user_list()
        .iter()
        .find(|user| user.email.eq_ignore_ascii_case(wanted))
        .cloned()
        .with_context(|| format!("no user with email '{wanted}'"))
}

fn ensure_known_role(panel: &ViewController, role: &str) -> Result<()> {
    if panel.role_list().iter().any(|known| known == role) {
        return Ok(());
    }
    bail!(
        "unknown role '{role}'; expected one of: {}",
        panel.role_list().join(", ")
    )
}

fn print_list(panel: &ViewController) {
    println!("== {} ==", panel.display_title());
    if panel.user_list().is_empty() {
        println!("(no users)");
        return;
    }
    for user in panel.user_list() {
        let role = if user.role.is_empty() { "-" } else { user.role.as_str() };
        println!("{:<40} {role}", describe_user(user));
    }
}
