mod cache;
mod table;

pub use cache::{CacheState, cache_state, load_list_table};
pub use table::{ListEntry, ListTable};

use crate::mail::Message;

/// Canonical list promoted to the front of fetched tables, so kernel mail
/// cross-posted to several lists links into the lkml archive.
pub const PREFERRED_LIST: &str = "linux-kernel.vger.kernel.org";

/// Resolve a public archive link for `message` against `table`.
///
/// Needs a `Message-ID` and a `To`/`Cc` recipient matching one of the
/// table's lists; otherwise yields nothing. The link is the entry's
/// archive URL with the bare message-id (angle brackets stripped)
/// appended.
pub fn resolve_link(message: &Message, table: &ListTable) -> Option<String> {
    let message_id = message.get("Message-ID")?;
    let to = message.get("To").unwrap_or_default();
    let cc = message.get("Cc").unwrap_or_default();
    let recipients = format!("{to} {cc}");

    let entry = table.lookup(&recipients)?;
    let bare_id = message_id
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>');
    Some(format!("{}{}", entry.url, bare_id))
}
