//! `acctest services`

use super::CommandContext;

/// One `key<TAB>display name` line per catalog entry, in catalog order
#[must_use]
pub fn execute_services(ctx: &CommandContext) -> String {
    ctx.settings
        .services()
        .iter()
        .map(|service| format!("{}\t{}\n", service.key, service.display_name))
        .collect()
}
