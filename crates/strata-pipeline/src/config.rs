use std::path::PathBuf;

use strata_imgproc::color::Quantization;
use strata_imgproc::morphology::StructuringElement;

/// Configuration shared by every participant of a pipeline run.
///
/// Every participant must hold an identical configuration.
///
/// # Examples
///
/// ```
/// use strata_imgproc::morphology::StructuringElement;
/// use strata_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default()
///     .with_root(1)
///     .with_kernel(StructuringElement::full(11).unwrap());
///
/// assert_eq!(config.root, 1);
/// assert_eq!(config.channel, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Rank of the coordinator, which owns the source and the result.
    pub root: usize,
    /// Index of the converted channel to dilate, 0 is luma.
    pub channel: usize,
    /// The structuring element of the dilation.
    pub kernel: StructuringElement,
    /// How converted components are narrowed to 8 bits.
    pub quantization: Quantization,
    /// Where the coordinator writes the result, if anywhere.
    pub output: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: 0,
            channel: 0,
            kernel: StructuringElement::star5x5(),
            quantization: Quantization::default(),
            output: None,
        }
    }
}

impl PipelineConfig {
    /// Set the coordinator rank.
    pub fn with_root(mut self, root: usize) -> Self {
        self.root = root;
        self
    }

    /// Set the channel to dilate.
    pub fn with_channel(mut self, channel: usize) -> Self {
        self.channel = channel;
        self
    }

    /// Set the structuring element.
    pub fn with_kernel(mut self, kernel: StructuringElement) -> Self {
        self.kernel = kernel;
        self
    }

    /// Set the quantization mode of the colour conversions.
    pub fn with_quantization(mut self, quantization: Quantization) -> Self {
        self.quantization = quantization;
        self
    }

    /// Set the output path written by the coordinator.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}
