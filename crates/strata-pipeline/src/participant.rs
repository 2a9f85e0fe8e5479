use std::time::Instant;

use strata_comm::Communicator;
use strata_image::{ops::merge_channels, Image, ImageError, ImageMetadata, ImageSize};
use strata_imgproc::{
    color::{rgb_from_ycbcr, ycbcr_from_rgb},
    morphology::dilate_partition,
    partition::PartitionPlan,
    pixels,
};
use strata_io::functional::write_image;

use crate::{config::PipelineConfig, error::PipelineError, viewer::ImageViewer};

/// Channels of the converted image.
const CONVERTED_CHANNELS: usize = 3;

/// One participant of the pipeline.
///
/// Every participant of the group runs the same phases in the same order; only the coordinator
/// owns the source image and the result. Each phase is delimited by barriers, so no participant
/// starts a phase before the whole group has finished the previous one.
pub struct Participant<'a, M: Communicator> {
    comm: &'a M,
    config: &'a PipelineConfig,
}

impl<'a, M: Communicator> Participant<'a, M> {
    /// Create the participant driven through `comm`.
    pub fn new(comm: &'a M, config: &'a PipelineConfig) -> Self {
        Self { comm, config }
    }

    /// Zero-based rank of this participant.
    pub fn rank(&self) -> usize {
        self.comm.rank()
    }

    /// Number of participants in the group.
    pub fn group_size(&self) -> usize {
        self.comm.size()
    }

    /// Whether this participant owns the source image and the result.
    pub fn is_coordinator(&self) -> bool {
        self.comm.is_root(self.config.root)
    }

    fn plan(&self, meta: &ImageMetadata) -> Result<PartitionPlan, PipelineError> {
        Ok(PartitionPlan::new(meta.rows, self.group_size())?)
    }

    fn block_size(&self, meta: &ImageMetadata, plan: &PartitionPlan) -> ImageSize {
        ImageSize {
            width: meta.cols,
            height: plan.rows_per_partition(),
        }
    }

    /// Run every phase of the pipeline.
    ///
    /// # Arguments
    ///
    /// * `source` - The image to process on the coordinator; ignored elsewhere.
    /// * `viewer` - Display used by the coordinator.
    ///
    /// # Returns
    ///
    /// The processed RGB image on the coordinator, `None` on every other participant.
    pub fn run<const C: usize, V: ImageViewer>(
        &self,
        source: Option<Image<u8, C>>,
        viewer: &V,
    ) -> Result<Option<Image<u8, 3>>, PipelineError> {
        if self.config.channel >= CONVERTED_CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(
                self.config.channel,
                CONVERTED_CHANNELS,
            )
            .into());
        }

        let source = if self.is_coordinator() { source } else { None };
        let total = Instant::now();

        if let Some(src) = &source {
            viewer.show("Original RGB", src);
        }
        let meta = self.load_and_broadcast_metadata(source.as_ref())?;

        let start = Instant::now();
        let ycbcr = self.convert_color_space_distributed(&meta, source.as_ref())?;
        log::info!(
            "RGB to YCbCr: rank {}: {}ms",
            self.rank(),
            start.elapsed().as_millis()
        );

        let start = Instant::now();
        let merged = self.distribute_channel_and_dilate(&meta, ycbcr)?;
        log::info!(
            "Dilation: rank {}: {}ms",
            self.rank(),
            start.elapsed().as_millis()
        );

        let start = Instant::now();
        let result = self.convert_color_space_back(&meta, merged)?;
        log::info!(
            "YCbCr to RGB: rank {}: {}ms",
            self.rank(),
            start.elapsed().as_millis()
        );

        if self.is_coordinator() {
            log::info!("Total: {}ms", total.elapsed().as_millis());
        }

        self.finalize(result, viewer)
    }

    /// Phase 1: share the source's metadata with every participant.
    ///
    /// The coordinator describes `source`; every participant returns the same record. A
    /// coordinator without a source broadcasts an all-zero record, so the whole group fails
    /// here together.
    ///
    /// # Errors
    ///
    /// * [`PipelineError::MissingSource`] on a coordinator without a source.
    /// * [`PipelineError::Validation`] on the other participants when the record is empty.
    /// * [`PipelineError::MetadataMismatch`] if the source does not have `C` channels.
    pub fn load_and_broadcast_metadata<const C: usize>(
        &self,
        source: Option<&Image<u8, C>>,
    ) -> Result<ImageMetadata, PipelineError> {
        let mut words = [0u64; ImageMetadata::WORDS];
        let source = source.filter(|_| self.is_coordinator());
        if let Some(src) = source {
            words = ImageMetadata::from_image(src).to_words();
        }

        self.comm.barrier()?;
        self.comm.broadcast(&mut words, self.config.root)?;
        self.comm.barrier()?;

        if self.is_coordinator() && source.is_none() {
            return Err(PipelineError::MissingSource(self.rank()));
        }

        let meta = ImageMetadata::from_words(words)?;
        if meta.channels != C {
            return Err(PipelineError::MetadataMismatch {
                expected: C,
                got: meta.channels,
            });
        }

        log::debug!(
            "rank {}: metadata {}x{} with {} channels",
            self.rank(),
            meta.cols,
            meta.rows,
            meta.channels
        );
        Ok(meta)
    }

    /// Phase 2: convert the source to YCbCr, one block of rows per participant.
    ///
    /// The coordinator's result starts as the first three channels of the source, so rows
    /// that no participant owns keep their source values.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Validation`] if the source has fewer than three channels; every
    /// participant raises it at the same point.
    pub fn convert_color_space_distributed<const C: usize>(
        &self,
        meta: &ImageMetadata,
        source: Option<&Image<u8, C>>,
    ) -> Result<Option<Image<u8, 3>>, PipelineError> {
        let plan = self.plan(meta)?;
        let block_size = self.block_size(meta, &plan);
        let root = self.config.root;

        if self.is_coordinator() && !plan.uncovered_rows().is_empty() {
            log::warn!(
                "{} rows are not divisible by {} participants; rows {:?} are left unprocessed",
                meta.rows,
                self.group_size(),
                plan.uncovered_rows()
            );
        }

        let mut block = Image::<u8, C>::from_size_val(block_size, 0)?;
        let send = if self.is_coordinator() {
            source.map(|s| s.as_slice())
        } else {
            None
        };
        self.comm.scatter(send, block.as_slice_mut(), root)?;
        self.comm.barrier()?;

        let mut converted = Image::<u8, 3>::from_size_val(block_size, 0)?;
        ycbcr_from_rgb(&block, &mut converted, self.config.quantization)?;
        self.comm.barrier()?;

        let mut result = match source {
            Some(src) if self.is_coordinator() => Some(leading_channels(src)?),
            _ => None,
        };
        self.comm.gather(
            converted.as_slice(),
            result.as_mut().map(|r| r.as_slice_mut()),
            root,
        )?;
        self.comm.barrier()?;

        Ok(result)
    }

    /// Phase 3: dilate one channel of the converted image.
    ///
    /// The coordinator splits `ycbcr` and broadcasts the configured channel in full; every
    /// participant dilates its own rows and the rows are gathered back into that channel, which
    /// the coordinator merges with the untouched channels.
    pub fn distribute_channel_and_dilate(
        &self,
        meta: &ImageMetadata,
        ycbcr: Option<Image<u8, 3>>,
    ) -> Result<Option<Image<u8, 3>>, PipelineError> {
        let plan = self.plan(meta)?;
        let root = self.config.root;
        let channel = self.config.channel;

        let mut planes = match ycbcr {
            Some(img) if self.is_coordinator() => Some(img.split_channels()?),
            _ => None,
        };
        let mut full = match &planes {
            Some(p) => p[channel].clone(),
            None => Image::<u8, 1>::from_size_val(meta.size(), 0)?,
        };
        self.comm.barrier()?;

        self.comm.broadcast(full.as_slice_mut(), root)?;

        let part = dilate_partition(&full, &self.config.kernel, &plan, self.rank())?;
        self.comm.barrier()?;

        self.comm.gather(
            part.as_slice(),
            planes.as_mut().map(|p| p[channel].as_slice_mut()),
            root,
        )?;
        self.comm.barrier()?;

        match planes {
            Some(planes) => {
                let planes: [Image<u8, 1>; CONVERTED_CHANNELS] =
                    planes.try_into().map_err(|p: Vec<_>| {
                        ImageError::NotEnoughChannels(p.len(), CONVERTED_CHANNELS)
                    })?;
                Ok(Some(merge_channels(&planes)?))
            }
            None => Ok(None),
        }
    }

    /// Phase 4: convert back to RGB, one block of rows per participant.
    ///
    /// The coordinator's result starts as `merged`. Rows that no participant owns were never
    /// converted in phase 2, so they still hold the source's RGB samples and come out unchanged.
    pub fn convert_color_space_back(
        &self,
        meta: &ImageMetadata,
        mut merged: Option<Image<u8, 3>>,
    ) -> Result<Option<Image<u8, 3>>, PipelineError> {
        let plan = self.plan(meta)?;
        let block_size = self.block_size(meta, &plan);
        let root = self.config.root;

        if !self.is_coordinator() {
            merged = None;
        }

        let mut block = Image::<u8, 3>::from_size_val(block_size, 0)?;
        self.comm.scatter(
            merged.as_ref().map(|m| m.as_slice()),
            block.as_slice_mut(),
            root,
        )?;
        self.comm.barrier()?;

        let mut converted = Image::<u8, 3>::from_size_val(block_size, 0)?;
        rgb_from_ycbcr(&block, &mut converted, self.config.quantization)?;
        self.comm.barrier()?;

        self.comm.gather(
            converted.as_slice(),
            merged.as_mut().map(|m| m.as_slice_mut()),
            root,
        )?;
        self.comm.barrier()?;

        Ok(merged)
    }

    /// Phase 5: show and persist the result on the coordinator.
    ///
    /// Needs no further synchronization; other participants return immediately.
    pub fn finalize<V: ImageViewer>(
        &self,
        result: Option<Image<u8, 3>>,
        viewer: &V,
    ) -> Result<Option<Image<u8, 3>>, PipelineError> {
        let Some(result) = result.filter(|_| self.is_coordinator()) else {
            return Ok(None);
        };

        viewer.show("Final Image", &result);
        if let Some(path) = &self.config.output {
            write_image(path, &result)?;
            log::info!("wrote {}", path.display());
        }
        viewer.wait_for_input();
        viewer.close_all();

        Ok(Some(result))
    }
}

/// Copy the first (up to) three channels of `src`.
fn leading_channels<const C: usize>(src: &Image<u8, C>) -> Result<Image<u8, 3>, ImageError> {
    let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    pixels::iter_rows(src, &mut dst, |s, d| {
        d.iter_mut().zip(s).for_each(|(d, s)| *d = *s);
    });
    Ok(dst)
}
