use zeroize::Zeroizing;

use crate::app::AppContext;
use crate::cli::CreateArgs;
use crate::output;

pub fn handle_create(ctx: &AppContext, args: &CreateArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let length = args.length.unwrap_or(ctx.settings().default_length);
    let replacing = store.contains(&args.name)?;

    let passphrase = ctx.passphrase(&store)?;
    let password = Zeroizing::new(store.create_password(&passphrase, &args.name, length)?);

    if !ctx.quiet() {
        if replacing {
            output::warning(&format!("Replaced the existing password for {}.", args.name));
        }
        output::success(&format!("Password for {} saved.", args.name));
    }
    println!("{}", password.as_str());
    Ok(())
}
