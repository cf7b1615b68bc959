use super::describe;
use crate::output::{self, Marker};
use media_server_api::{endpoints, BaseItem, RequestChannel};
use std::fmt::Display;

/// Step 9: trickplay metadata on the first few video items. Never fatal.
pub async fn trickplay<C>(channel: &C, user_id: &str) -> Marker
where
    C: RequestChannel + ?Sized,
{
    output::step(9, "Trickplay test");

    let items = match endpoints::items_with_trickplay(channel, user_id).await {
        Ok(items) => items,
        Err(e) => {
            output::fail(&format!("Could not fetch items: {}", describe(&e)));
            return Marker::Fail;
        }
    };
    if items.is_empty() {
        output::skip("No video items found to check trickplay data.");
        return Marker::Skip;
    }

    let lines = trickplay_lines(&items);
    if lines.is_empty() {
        output::info(&format!("No trickplay data found in the first {} items.", items.len()));
        output::note("(Enable trickplay generation in Jellyfin 10.9+ server settings)");
        return Marker::Info;
    }

    for line in &lines {
        output::ok(line);
    }
    Marker::Ok
}

/// One line per source and width of the first item carrying trickplay data.
fn trickplay_lines(items: &[BaseItem]) -> Vec<String> {
    let Some(item) = items
        .iter()
        .find(|item| item.trickplay.as_ref().is_some_and(|t| !t.is_empty()))
    else {
        return Vec::new();
    };

    let name = item.name.as_deref().unwrap_or("Unknown");
    item.trickplay
        .iter()
        .flatten()
        .flat_map(|(_source, widths)| widths.iter())
        .map(|(width, meta)| {
            format!(
                "'{name}' has trickplay: {width}px, tiles={}x{}, count={}, interval={}ms",
                or_unknown(meta.tile_width),
                or_unknown(meta.tile_height),
                or_unknown(meta.thumbnail_count),
                or_unknown(meta.interval),
            )
        })
        .collect()
}

fn or_unknown<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}
