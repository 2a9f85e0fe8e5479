use std::ops::Range;

use super::{MorphologyError, StructuringElement};
use crate::partition::PartitionPlan;
use strata_image::{Image, ImageError, ImageSize};

/// Dilate a single-channel image restricted to the rows owned by `rank`.
///
/// Each output pixel `(i, j)`, with `i` in the participant's absolute row range, is the maximum
/// of the input samples under the active cells of `kernel` centered at `(i, j)`. Samples are
/// read from the whole input, so rows owned by neighboring participants contribute near
/// partition seams. Positions outside the image are skipped, not padded; a pixel with no
/// sampled position is `T::default()`.
///
/// # Arguments
///
/// * `src` - The full single-channel image.
/// * `kernel` - The structuring element.
/// * `plan` - The partition of `src`'s rows over the group.
/// * `rank` - The participant whose rows are computed.
///
/// # Returns
///
/// An image with `plan.row_count(rank)` rows and the same number of columns as `src`.
///
/// # Errors
///
/// * [`MorphologyError::PlanMismatch`] if the plan was made for a different height.
/// * [`MorphologyError::Partition`] if `rank` is not part of the plan's group.
///
/// # Example
///
/// ```
/// use strata_image::{Image, ImageSize};
/// use strata_imgproc::morphology::{dilate_partition, StructuringElement};
/// use strata_imgproc::partition::PartitionPlan;
///
/// let src = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 6 }, 7).unwrap();
/// let plan = PartitionPlan::new(src.rows(), 3).unwrap();
///
/// let part = dilate_partition(&src, &StructuringElement::star5x5(), &plan, 1).unwrap();
///
/// assert_eq!(part.rows(), 2);
/// assert!(part.as_slice().iter().all(|&v| v == 7));
/// ```
pub fn dilate_partition<T>(
    src: &Image<T, 1>,
    kernel: &StructuringElement,
    plan: &PartitionPlan,
    rank: usize,
) -> Result<Image<T, 1>, MorphologyError>
where
    T: Copy + Ord + Default,
{
    if plan.total_rows() != src.rows() {
        return Err(MorphologyError::PlanMismatch(plan.total_rows(), src.rows()));
    }

    let rows = plan.range(rank)?;
    log::debug!(
        "rank {rank}: dilating rows {}..{} of {}",
        rows.start,
        rows.end,
        src.size()
    );

    let size = ImageSize {
        width: src.cols(),
        height: rows.len(),
    };
    let mut out = vec![T::default(); size.width * size.height];
    dilate_rows(src, kernel, rows, &mut out);

    Ok(Image::new(size, out)?)
}

/// Dilate a whole single-channel image.
///
/// Equivalent to [`dilate_partition`] with a group of one participant.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The structuring element.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the images differ in size.
pub fn dilate<T>(
    src: &Image<T, 1>,
    dst: &mut Image<T, 1>,
    kernel: &StructuringElement,
) -> Result<(), ImageError>
where
    T: Copy + Ord + Default,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            src.width(),
            src.height(),
        ));
    }

    dilate_rows(src, kernel, 0..src.rows(), dst.as_slice_mut());

    Ok(())
}

fn dilate_rows<T>(src: &Image<T, 1>, kernel: &StructuringElement, rows: Range<usize>, out: &mut [T])
where
    T: Copy + Ord + Default,
{
    let width = src.cols();
    let height = src.rows() as isize;
    let data = src.as_slice();
    let offsets = kernel.active_offsets();

    if width == 0 {
        return;
    }

    for (i, out_row) in rows.zip(out.chunks_exact_mut(width)) {
        for (j, out_px) in out_row.iter_mut().enumerate() {
            let mut max_val = T::default();

            for &(dy, dx) in &offsets {
                let y = i as isize + dy;
                let x = j as isize + dx;
                if y < 0 || x < 0 || y >= height || x >= width as isize {
                    continue;
                }
                max_val = max_val.max(data[y as usize * width + x as usize]);
            }

            *out_px = max_val;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::KernelShape;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_image(width: usize, height: usize, seed: u64) -> Result<Image<u8, 1>, ImageError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..width * height).map(|_| rng.random::<u8>()).collect();
        Image::new(ImageSize { width, height }, data)
    }

    #[test]
    fn uniform_image_stays_uniform() -> Result<(), MorphologyError> {
        let src = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 10,
                height: 10,
            },
            100,
        )?;
        let kernel = StructuringElement::from_shape(KernelShape::Box { size: 3 })?;
        let plan = PartitionPlan::new(src.rows(), 2)?;

        for rank in 0..2 {
            let part = dilate_partition(&src, &kernel, &plan, rank)?;
            assert_eq!(
                part.size(),
                ImageSize {
                    width: 10,
                    height: 5
                }
            );
            assert!(part.as_slice().iter().all(|&v| v == 100));
        }
        Ok(())
    }

    #[test]
    fn single_peak_spreads_as_kernel() -> Result<(), MorphologyError> {
        let mut src = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 7,
                height: 7,
            },
            0,
        )?;
        src.set_pixel(3, 3, 0, 200)?;
        let kernel = StructuringElement::star5x5();

        let mut dst = Image::from_size_val(src.size(), 0)?;
        dilate(&src, &mut dst, &kernel)?;

        for y in 0..7usize {
            for x in 0..7usize {
                let inside = x.abs_diff(3) + y.abs_diff(3) <= 2;
                assert_eq!(*dst.get_pixel(x, y, 0)?, if inside { 200 } else { 0 });
            }
        }
        Ok(())
    }

    #[test]
    fn anchor_offsets_and_empty_neighborhood() -> Result<(), MorphologyError> {
        // 2x1 element whose only active cell sits left of the anchor: out[j] = src[j - 1]
        let kernel = StructuringElement::new(2, 1, vec![true, false])?;
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![9, 5, 7, 3],
        )?;
        let mut dst = Image::from_size_val(src.size(), 0)?;
        dilate(&src, &mut dst, &kernel)?;
        assert_eq!(dst.as_slice(), &[0, 9, 5, 7]);
        Ok(())
    }

    #[test]
    fn border_is_not_zero_padded() -> Result<(), MorphologyError> {
        let src = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            50,
        )?;
        let kernel = StructuringElement::full(11)?;
        let mut dst = Image::from_size_val(src.size(), 0)?;
        dilate(&src, &mut dst, &kernel)?;
        assert!(dst.as_slice().iter().all(|&v| v == 50));
        Ok(())
    }

    #[test]
    fn dilation_is_extensive() -> Result<(), MorphologyError> {
        let src = random_image(23, 17, 7)?;
        for kernel in [
            StructuringElement::star5x5(),
            StructuringElement::full(3)?,
            StructuringElement::from_shape(KernelShape::Cross { size: 5 })?,
        ] {
            let mut dst = Image::from_size_val(src.size(), 0)?;
            dilate(&src, &mut dst, &kernel)?;
            for (d, s) in dst.as_slice().iter().zip(src.as_slice()) {
                assert!(d >= s);
            }
        }
        Ok(())
    }

    #[test]
    fn saturated_region_stays_saturated() -> Result<(), MorphologyError> {
        let mut src = random_image(20, 20, 11)?;
        for y in 5..15 {
            for x in 5..15 {
                src.set_pixel(x, y, 0, 255)?;
            }
        }
        let kernel = StructuringElement::star5x5();
        let mut dst = Image::from_size_val(src.size(), 0)?;
        dilate(&src, &mut dst, &kernel)?;

        // every pixel whose radius-2 neighborhood lies in the saturated square
        for y in 7..13 {
            for x in 7..13 {
                assert_eq!(*dst.get_pixel(x, y, 0)?, 255);
            }
        }
        Ok(())
    }

    #[test]
    fn partitioned_rows_match_any_group_size() -> Result<(), MorphologyError> {
        let src = random_image(13, 24, 3)?;
        let kernel = StructuringElement::full(5)?;

        let mut reference = Image::from_size_val(src.size(), 0)?;
        dilate(&src, &mut reference, &kernel)?;

        for group_size in 1..=6 {
            let plan = PartitionPlan::new(src.rows(), group_size)?;
            for rank in 0..group_size {
                let part = dilate_partition(&src, &kernel, &plan, rank)?;
                let expected = reference.row_block(plan.range(rank)?)?;
                assert_eq!(part, expected, "group {group_size}, rank {rank}");
            }
        }
        Ok(())
    }

    #[test]
    fn assembled_partitions_leave_tail_untouched() -> Result<(), MorphologyError> {
        let src = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 10,
            },
            80,
        )?;
        let kernel = StructuringElement::star5x5();
        let plan = PartitionPlan::new(src.rows(), 3)?;

        let mut merged = vec![0u8; 4 * 10];
        for rank in 0..3 {
            let part = dilate_partition(&src, &kernel, &plan, rank)?;
            let start = plan.range(rank)?.start * 4;
            merged[start..start + part.as_slice().len()].copy_from_slice(part.as_slice());
        }

        assert!(merged[..9 * 4].iter().all(|&v| v == 80));
        assert!(merged[9 * 4..].iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn plan_mismatch() -> Result<(), MorphologyError> {
        let src = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 10,
            },
            0,
        )?;
        let plan = PartitionPlan::new(12, 2)?;
        assert_eq!(
            dilate_partition(&src, &StructuringElement::star5x5(), &plan, 0),
            Err(MorphologyError::PlanMismatch(12, 10))
        );
        Ok(())
    }
}
