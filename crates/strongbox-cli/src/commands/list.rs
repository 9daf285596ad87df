use crate::app::AppContext;
use crate::cli::ListArgs;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let names = store.list_passwords()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    if names.is_empty() && !ctx.quiet() {
        eprintln!("No passwords stored in {}", store.directory().display());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
