use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Catalog { action } => commands::catalog::handle(&action, ctx, flags),
        Commands::Names(args) => commands::names::handle(&args, ctx, flags),
        Commands::Resolve(args) => commands::resolve::handle(&args, ctx, flags),
        Commands::Census(args) => commands::census::handle(&args, ctx, flags),
        Commands::Infostat(args) => commands::infostat::handle(&args, ctx, flags),
        Commands::Institutions => commands::institutions::handle(ctx, flags),
    }
}
