use crate::output::{self, Marker};
use media_server_api::{endpoints, ApiError, ClientCapabilities, RequestChannel};
use probe_config_and_utils::ServerAddress;

/// Step 4: register playback capabilities. Never fatal.
pub async fn post_capabilities<C>(channel: &C, address: &ServerAddress) -> Marker
where
    C: RequestChannel + ?Sized,
{
    output::step(
        4,
        &format!("Posting capabilities: POST {}", address.api_url(endpoints::CAPABILITIES_PATH)),
    );

    match endpoints::post_capabilities(channel, &ClientCapabilities::orsay()).await {
        Ok(()) => {
            output::ok("Capabilities registered (SupportsMediaControl=true).");
            Marker::Ok
        }
        Err(ApiError::Status { status, body }) => {
            output::fail(&format!("HTTP {status}: {body}"));
            Marker::Fail
        }
        Err(e) => {
            output::fail(&e.to_string());
            Marker::Fail
        }
    }
}
