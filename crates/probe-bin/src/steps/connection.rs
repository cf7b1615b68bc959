use crate::output;
use crate::ProbeFailure;
use media_server_api::{endpoints, PublicSystemInfo, RequestChannel};
use probe_config_and_utils::ServerAddress;

/// Step 1: the unauthenticated public info call the TV uses to recognize a
/// server.
pub async fn check_connection<C>(channel: &C, address: &ServerAddress) -> Result<PublicSystemInfo, ProbeFailure>
where
    C: RequestChannel + ?Sized,
{
    output::step(
        1,
        &format!("Testing connection: GET {}", address.api_url(endpoints::PUBLIC_INFO_PATH)),
    );

    match endpoints::fetch_public_info(channel).await {
        Ok(info) => {
            output::ok("Server recognized!");
            output::row("Server Name", or_na(&info.server_name));
            output::row("Server ID", or_na(&info.id));
            output::row("Version", or_na(&info.version));
            output::row("Local Addr", or_na(&info.local_address));
            Ok(info)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Public info failed");
            output::fail(&super::describe(&e));
            if not_responding(e.status()) {
                output::note("Server is not responding (the TV shows: 'Your Jellyfin server is not responding.')");
            }
            Err(ProbeFailure::Connectivity(e.to_string()))
        }
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

/// No answer at all, or a server-side error.
fn not_responding(status: Option<u16>) -> bool {
    status.map_or(true, |s| s >= 500)
}
