//! `tuyasl search`: discover devices with the persisted token.

use tabled::Tabled;

use tuyasl_config::Config;
use tuyasl_core::{DeviceRecord, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Alias")]
    alias: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "Online")]
    online: String,
    #[tabled(rename = "Power")]
    power: String,
}

fn to_row(device: &DeviceRecord, color: bool) -> DeviceRow {
    DeviceRow {
        alias: device.alias.clone(),
        device_type: device.device_type.clone(),
        online: output::state_cell(Some(device.online), "online", "offline", color),
        power: output::state_cell(device.on_off, "on", "off", color),
    }
}

pub async fn handle(cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let session = Session::new(cfg.session_options()?)?;
    let count = session.search(&cfg.search_config()).await?;
    tracing::info!(count, "devices discovered");

    let devices = session.devices_snapshot();
    let color = output::should_color(&global.color);
    let out = output::render_list(&global.output, devices.as_slice(), |d| to_row(d, color))?;
    output::print_output(&out);
    Ok(())
}
