use strata_image::Image;

/// Apply a function to each pixel of `src` and the matching pixel of `dst`, row by row.
///
/// The channel counts of the two images may differ; the images must have the same size.
pub fn iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    mut f: impl FnMut(&[T1], &mut [T2]),
) {
    let cols = src.cols();
    if cols == 0 {
        return;
    }

    src.as_slice()
        .chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use strata_image::{Image, ImageError, ImageSize};

    #[test]
    fn iter_rows_maps_channels() -> Result<(), ImageError> {
        let src = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 2, 3, 4, 5, 6],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        super::iter_rows(&src, &mut dst, |s, d| d[0] = s[0] + s[1] + s[2]);

        assert_eq!(dst.as_slice(), &[6, 15]);
        Ok(())
    }
}
