pub mod indexed_sbu;
pub mod plain_ppm;
pub mod tokens;

use sbu_application::config::CodecLimits;

#[derive(Debug, Copy, Clone, Default)]
pub struct TextCodecConfig {
    pub limits: CodecLimits,
}
