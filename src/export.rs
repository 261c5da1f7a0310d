//! The export pipeline: look up a zone, page through its record sets, and build
//! the template.

use std::io::{self, Write as _};
use std::pin::pin;

use camino::Utf8Path;
use futures::TryStreamExt as _;

use crate::client::{HostedZoneApi, record_sets};
use crate::error::ExportError;
use crate::template::{ExportOptions, Template, TemplateBuilder};

/// Exports hosted zones through a [`HostedZoneApi`].
#[derive(Debug, Clone)]
pub struct Exporter<A> {
    api: A,
    options: ExportOptions,
}

impl<A> Exporter<A> {
    pub fn new(api: A, options: ExportOptions) -> Self {
        Self { api, options }
    }
}

impl<A> Exporter<A>
where
    A: HostedZoneApi + Sync,
{
    /// Build the template for a hosted zone.
    ///
    /// # Errors
    ///
    /// Any API error is returned as is; nothing is retried, and no partial template
    /// is produced.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn template(&self, zone_id: &str) -> Result<Template, ExportError> {
        let zone = self.api.get_hosted_zone(zone_id).await?;
        tracing::debug!(zone = zone.name(), id = zone.id(), "found hosted zone");

        let mut builder = TemplateBuilder::new(&zone, &self.options);
        let mut rsets = pin!(record_sets(&self.api, zone.id()));
        while let Some(rset) = rsets.try_next().await? {
            builder.push(rset)?;
        }

        Ok(builder.finish())
    }

    /// Build the template for a hosted zone and render it as YAML.
    pub async fn render(&self, zone_id: &str) -> Result<String, ExportError> {
        let template = self.template(zone_id).await?;
        Ok(template.to_yaml()?)
    }
}

/// Write a rendered template to `path`, or to standard output.
pub fn write_template(path: Option<&Utf8Path>, rendered: &str) -> Result<(), ExportError> {
    match path {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(%path, "wrote template");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
