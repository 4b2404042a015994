use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use serde::Serialize;

use crate::{
    command::Command,
    error::AppResult,
    format::ImageFormat,
    ports::{incoming::convert::ConvertImageUseCase, outgoing::image_store::DynImageStorePort},
};

use super::{edits::apply_region_edits, registry::SharedCodecRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub input_format: ImageFormat,
    pub output_format: ImageFormat,
    pub input_dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
    pub bytes_written: usize,
}

pub struct ConversionServiceDeps {
    pub registry: SharedCodecRegistry,
    pub store: DynImageStorePort,
}

pub struct ConversionService {
    registry: SharedCodecRegistry,
    store: DynImageStorePort,
}

impl ConversionService {
    #[must_use]
    pub fn new(deps: ConversionServiceDeps) -> Arc<Self> {
        Arc::new(Self {
            registry: deps.registry,
            store: deps.store,
        })
    }

    #[instrument(skip(self, command), fields(
        input = %command.input.path.display(),
        output = %command.output.path.display(),
    ))]
    fn convert_impl(&self, command: &Command) -> AppResult<ConversionSummary> {
        let data = self.store.read(&command.input.path)?;
        let source = self.registry.decode(&data, command.input.format)?;
        let input_dimensions = (source.width(), source.height());
        debug!(
            "Loaded {}x{} {} image",
            input_dimensions.0, input_dimensions.1, command.input.format
        );

        let edited = apply_region_edits(source, command.crop, command.paste)?;

        if let Some(stamp) = &command.stamp {
            warn!(
                "Text stamping is not supported, skipping stamp {:?} at ({}, {})",
                stamp.message, stamp.row, stamp.col
            );
        }

        let encoded = self.registry.encode(&edited, command.output.format)?;
        self.store.write(&command.output.path, &encoded)?;

        info!(
            "Wrote {}x{} {} image ({} bytes)",
            edited.width(),
            edited.height(),
            command.output.format,
            encoded.len()
        );

        Ok(ConversionSummary {
            input_format: command.input.format,
            output_format: command.output.format,
            input_dimensions,
            output_dimensions: (edited.width(), edited.height()),
            bytes_written: encoded.len(),
        })
    }
}

impl ConvertImageUseCase for ConversionService {
    fn convert(&self, command: &Command) -> AppResult<ConversionSummary> {
        self.convert_impl(command)
    }
}
