use std::sync::Arc;

use sbu_adapters::outgoing::{
    filesystem::image_store_fs::{FsImageStore, FsImageStoreConfig},
    text_codec::{TextCodecConfig, indexed_sbu::IndexedSbuCodec, plain_ppm::PlainPpmCodec},
};
use sbu_application::{
    config::CodecLimits,
    convert::{
        registry::{CodecRegistry, SharedCodecRegistry},
        service::{ConversionService, ConversionServiceDeps},
    },
    error::AppResult,
    format::ImageFormat,
    infrastructure_config::Config,
    ports::{
        incoming::convert::ConvertImageUseCase,
        outgoing::{image_codec::DynImageCodecPort, image_store::DynImageStorePort},
    },
};
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub convert_service: Arc<dyn ConvertImageUseCase>,
}

impl AppState {
    pub fn new(config: &Config) -> AppResult<Self> {
        let limits = CodecLimits::from(&config.limits);

        let registry = Self::create_codec_registry(limits)?;
        let store = Self::create_image_store(limits);

        let convert_service: Arc<dyn ConvertImageUseCase> =
            ConversionService::new(ConversionServiceDeps { registry, store });

        Ok(Self { convert_service })
    }

    fn create_codec_registry(limits: CodecLimits) -> AppResult<SharedCodecRegistry> {
        let codec_config = TextCodecConfig { limits };
        let plain: DynImageCodecPort = Arc::new(PlainPpmCodec::new(codec_config));
        let indexed: DynImageCodecPort = Arc::new(IndexedSbuCodec::new(codec_config));

        let registry = CodecRegistry::new().with_codec(plain).with_codec(indexed);

        for format in ImageFormat::ALL {
            registry.codec(format)?;
        }
        debug!("Codec registry ready: {:?}", registry.formats());

        Ok(Arc::new(registry))
    }

    fn create_image_store(limits: CodecLimits) -> DynImageStorePort {
        Arc::new(FsImageStore::new(FsImageStoreConfig { limits }))
    }
}
