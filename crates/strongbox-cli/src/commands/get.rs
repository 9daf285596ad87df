use zeroize::Zeroizing;

use crate::app::AppContext;
use crate::cli::GetArgs;

pub fn handle_get(ctx: &AppContext, args: &GetArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let passphrase = ctx.passphrase(&store)?;
    let password = Zeroizing::new(store.read_password(&passphrase, &args.name)?);
    println!("{}", password.as_str());
    Ok(())
}
