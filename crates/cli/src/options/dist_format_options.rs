use clap::ValueEnum;
use kitforge_core::DistributionFormat;

/// Archive format of `kitforge dist`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistFormatOptions {
    #[value(name = "tar-gz")]
    TarGz,
    #[value(name = "zip")]
    Zip,
}

impl From<DistFormatOptions> for DistributionFormat {
    fn from(value: DistFormatOptions) -> Self {
        match value {
            DistFormatOptions::TarGz => Self::TarGz,
            DistFormatOptions::Zip => Self::Zip,
        }
    }
}
