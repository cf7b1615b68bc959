use super::describe;
use crate::output::{self, Marker};
use media_server_api::{endpoints, RequestChannel};
use probe_config_and_utils::{mask_secret, ServerAddress};

/// Step 7: Quick Connect pairing. Never fatal.
pub async fn quick_connect<C>(channel: &C, address: &ServerAddress) -> Marker
where
    C: RequestChannel + ?Sized,
{
    output::step(
        7,
        &format!(
            "Quick Connect test: GET {}",
            address.api_url(endpoints::QUICK_CONNECT_ENABLED_PATH)
        ),
    );

    let enabled = match endpoints::quick_connect_enabled(channel).await {
        Ok(enabled) => enabled,
        Err(e) => {
            output::skip(&format!("{} (Quick Connect endpoint not available)", describe(&e)));
            return Marker::Skip;
        }
    };
    output::note(&format!("Quick Connect enabled: {enabled}"));
    if !enabled {
        output::skip("Quick Connect is disabled on this server.");
        return Marker::Skip;
    }

    let result = match endpoints::quick_connect_initiate(channel).await {
        Ok(result) => result,
        Err(e) => {
            output::fail(&format!("Initiate returned {}", describe(&e)));
            return Marker::Fail;
        }
    };

    let code = result.code_text();
    output::ok(&format!("Code: {}", code.as_deref().unwrap_or("None")));
    let secret = result.secret.as_deref().map(mask_secret);
    output::row("Secret", secret.as_deref().unwrap_or("None"));

    let marker = code_marker(code.as_deref());
    match marker {
        Marker::Ok => output::ok(&format!(
            "Quick Connect code format is valid ({} digits).",
            code.as_deref().map_or(0, |c| c.chars().count())
        )),
        _ => output::warn(&format!(
            "Quick Connect code format unexpected: {}",
            code.as_deref().unwrap_or("None")
        )),
    }
    marker
}

/// The TV shows the code for the user to type; four characters is the
/// shortest usable one.
fn code_marker(code: Option<&str>) -> Marker {
    match code {
        Some(c) if c.chars().count() >= 4 => Marker::Ok,
        _ => Marker::Warn,
    }
}
