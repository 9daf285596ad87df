use strongbox_core::RotationReport;

use crate::app::AppContext;
use crate::errors::CliError;
use crate::helpers::{prompt_new_passphrase, prompt_passphrase};
use crate::output;

pub fn handle_rotate(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.store()?;
    if !store.is_initialized() {
        return Err(CliError::not_found(
            format!("No password directory at {}", store.directory().display()),
            "Hint: Run `strongbox init` or `strongbox create <name>` first.",
        )
        .into());
    }

    let interactive = ctx.interactive();
    let passphrase = prompt_passphrase(interactive)?;
    let new_passphrase = prompt_new_passphrase(interactive)?;

    let report = store.rotate_passwords(&passphrase, &new_passphrase)?;
    print_report(ctx, &report);

    if !report.is_complete() {
        return Err(incomplete_rotation(&report).into());
    }
    Ok(())
}

fn incomplete_rotation(report: &RotationReport) -> CliError {
    let failed: Vec<&str> = report.failed.iter().map(|f| f.name.as_str()).collect();
    if report.unrestored.is_empty() {
        return CliError::integrity(
            format!(
                "Rotation aborted: could not replace {}. The directory still uses the old passphrase.",
                failed.join(", ")
            ),
            "Hint: Fix access to that file and run `strongbox rotate` again.",
        );
    }
    let unrestored: Vec<&str> = report.unrestored.iter().map(|f| f.name.as_str()).collect();
    CliError::integrity(
        format!(
            "Rotation aborted: could not replace {}, and {} could not be restored. \
             The directory still uses the old passphrase, except those entries.",
            failed.join(", "),
            unrestored.join(", ")
        ),
        "Hint: Those entries now need the new passphrase. Copy them out of the directory before retrying.",
    )
}

fn print_report(ctx: &AppContext, report: &RotationReport) {
    for failure in &report.failed {
        output::failure(&format!("  failed: {} ({})", failure.name, failure.reason));
    }
    for failure in &report.unrestored {
        output::failure(&format!("  not restored: {} ({})", failure.name, failure.reason));
    }
    if ctx.quiet() {
        return;
    }
    for name in &report.skipped {
        output::warning(&format!("Skipped non-entry file {}", name));
    }
    if !report.rolled_back.is_empty() {
        output::warning(&format!(
            "Restored {} entry file(s) to the old passphrase.",
            report.rolled_back.len()
        ));
    }
    if report.is_complete() {
        output::success(&format!(
            "Rotated {} password(s) to the new passphrase.",
            report.rotated.len()
        ));
    }
}
