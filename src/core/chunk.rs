use crate::core::model::chunk::Chunk;
use std::collections::BTreeMap;

/// Group chunk contents by the page they were extracted from.
///
/// Each page maps to the blank line separated join of its chunks' text,
/// preserving the order in which the chunks were received. Chunks without
/// grounding are assigned to page 0. The resulting map iterates in
/// ascending page order.
pub fn group_by_page(chunks: &[Chunk]) -> BTreeMap<u32, String> {
    let mut pages: BTreeMap<u32, Vec<&str>> = BTreeMap::new();

    for chunk in chunks {
        let page = chunk.page().unwrap_or(0);
        pages.entry(page).or_default().push(&chunk.text);
    }

    pages
        .into_iter()
        .map(|(page, texts)| (page, texts.join("\n\n")))
        .collect()
}
