use infobg_names::{Normalizer, fold};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NamesArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct NameResponse<'a> {
    raw: &'a str,
    folded: String,
    canonical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<u8>,
    aliased: bool,
}

/// Handle `infobg names`.
pub fn handle(args: &NamesArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let normalizer = Normalizer::new(&ctx.aliases);
    let folded = fold(&args.label);
    let (kind, canonical) = if args.settlement {
        normalizer.settlement(&args.label)
    } else {
        (None, normalizer.area(&args.label))
    };
    let bare = infobg_names::label::strip_kind_prefix(&folded).1;
    let aliased = canonical != if args.settlement { bare } else { folded.as_str() };

    output(
        &NameResponse {
            raw: &args.label,
            folded,
            canonical,
            kind: kind.map(|kind| kind.code()),
            aliased,
        },
        flags.format,
    )
}
