//! `tuyasl region <code>`: offline region lookup.

use serde::Serialize;

use tuyasl_core::{Region, resolve_region};

use crate::cli::{GlobalOpts, RegionArgs};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct RegionInfo<'a> {
    country_code: &'a str,
    region: Region,
    endpoint: String,
}

pub fn handle(args: &RegionArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let region = resolve_region(&args.country_code);
    let info = RegionInfo {
        country_code: &args.country_code,
        region,
        endpoint: region.base_url(),
    };

    let out = output::render_single(&global.output, &info, |i| {
        format!("{}\t{}", i.region, i.endpoint)
    })?;
    output::print_output(&out);
    Ok(())
}
