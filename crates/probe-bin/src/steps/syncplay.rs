use super::{describe, describe_with_body};
use crate::output::{self, Marker};
use media_server_api::{endpoints, RequestChannel};

/// Step 8: list, create and leave a SyncPlay group. Never fatal.
pub async fn syncplay<C>(channel: &C) -> Marker
where
    C: RequestChannel + ?Sized,
{
    output::step(8, "SyncPlay test");

    let groups = match endpoints::syncplay_list(channel).await {
        Ok(groups) => groups,
        Err(e) => {
            output::skip(&format!("SyncPlay List returned {} (may not be supported)", describe(&e)));
            return Marker::Skip;
        }
    };
    output::ok(&format!("{} existing SyncPlay group(s) found.", groups.len()));

    if let Err(e) = endpoints::syncplay_new(channel, endpoints::SYNCPLAY_GROUP_NAME).await {
        output::fail(&format!("Create group returned {}", describe_with_body(&e)));
        return Marker::Fail;
    }
    output::ok("Created test SyncPlay group.");

    match endpoints::syncplay_leave(channel).await {
        Ok(()) => {
            output::ok("Left the group successfully.");
            Marker::Ok
        }
        Err(e) => {
            output::warn(&format!("Leave returned {}", describe(&e)));
            Marker::Warn
        }
    }
}
