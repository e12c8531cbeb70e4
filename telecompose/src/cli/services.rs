use std::{io::Write, path::PathBuf};

use clap::Args;
use snafu::ResultExt;
use telecompose::{compose::ComposeDocument, normalize::NormalizedService};

use crate::{
    cli::{Error, error},
    ui::table::{ServiceRow, ServiceRowExt},
};

#[derive(Args, Clone)]
pub struct ServicesCommand {
    #[arg(value_name = "MANIFEST", help = "Path to the docker-compose manifest")]
    pub manifest: PathBuf,
}

impl ServicesCommand {
    pub fn run(self) -> Result<i32, Error> {
        let document = ComposeDocument::load(&self.manifest)?;
        let rows = document
            .service_names()
            .map(|name| -> Result<ServiceRow, Error> {
                let spec = document.service(name)?;
                let service = NormalizedService::from_spec(&spec, document.manifest_dir())?;
                Ok(ServiceRow { name: name.to_string(), image: service.image, ports: service.ports })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut table = rows.render_table();
        table.push('\n');
        std::io::stdout().write_all(table.as_bytes()).context(error::WriteStdoutSnafu)?;

        Ok(0)
    }
}
