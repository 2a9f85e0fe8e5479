use super::MorphologyError;

/// Predefined structuring element shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelShape {
    /// A `size` x `size` square with every cell active.
    Box {
        /// Side length.
        size: usize,
    },
    /// A `size` x `size` plus sign: the center row and column are active.
    Cross {
        /// Side length.
        size: usize,
    },
    /// An ellipse inscribed in a `width` x `height` rectangle.
    Ellipse {
        /// Number of columns.
        width: usize,
        /// Number of rows.
        height: usize,
    },
    /// A `size` x `size` diamond: cells within Manhattan distance `size / 2` of the center.
    Diamond {
        /// Side length.
        size: usize,
    },
}

/// An immutable binary structuring element.
///
/// Cells are stored row-major, `height` rows of `width` columns. The anchor sits at
/// `(width / 2, height / 2)` using integer division, so for even sizes it lies right/below of
/// the geometric center.
///
/// # Examples
///
/// ```
/// use strata_imgproc::morphology::StructuringElement;
///
/// let se = StructuringElement::star5x5();
///
/// assert_eq!(se.anchor(), (2, 2));
/// assert!(se.is_active(2, 0));
/// assert!(!se.is_active(0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuringElement {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl StructuringElement {
    /// Create a structuring element from explicit cells.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of columns.
    /// * `height` - Number of rows.
    /// * `data` - `width * height` flags in row-major order.
    ///
    /// # Errors
    ///
    /// * [`MorphologyError::EmptyKernel`] if either dimension is zero.
    /// * [`MorphologyError::InvalidDataLength`] if `data` has the wrong length.
    pub fn new(width: usize, height: usize, data: Vec<bool>) -> Result<Self, MorphologyError> {
        if width == 0 || height == 0 {
            return Err(MorphologyError::EmptyKernel);
        }
        if data.len() != width * height {
            return Err(MorphologyError::InvalidDataLength(
                data.len(),
                width * height,
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a structuring element from a predefined shape.
    pub fn from_shape(shape: KernelShape) -> Result<Self, MorphologyError> {
        let (width, height) = match shape {
            KernelShape::Box { size }
            | KernelShape::Cross { size }
            | KernelShape::Diamond { size } => (size, size),
            KernelShape::Ellipse { width, height } => (width, height),
        };
        let cy = height / 2;
        let cx = width / 2;

        let mut data = Vec::with_capacity(width * height);
        for r in 0..height {
            for c in 0..width {
                data.push(match shape {
                    KernelShape::Box { .. } => true,
                    KernelShape::Cross { .. } => r == cy || c == cx,
                    KernelShape::Diamond { size } => r.abs_diff(cy) + c.abs_diff(cx) <= size / 2,
                    KernelShape::Ellipse { .. } => {
                        let dy = (r as f64 - cy as f64) / (height as f64 / 2.0);
                        let dx = (c as f64 - cx as f64) / (width as f64 / 2.0);
                        dx * dx + dy * dy <= 1.0
                    }
                });
            }
        }

        Self::new(width, height, data)
    }

    /// The 5x5 star (diamond) element.
    pub fn star5x5() -> Self {
        #[rustfmt::skip]
        const STAR: [u8; 25] = [
            0, 0, 1, 0, 0,
            0, 1, 1, 1, 0,
            1, 1, 1, 1, 1,
            0, 1, 1, 1, 0,
            0, 0, 1, 0, 0,
        ];
        Self {
            width: 5,
            height: 5,
            data: STAR.iter().map(|&v| v == 1).collect(),
        }
    }

    /// A `size` x `size` element with every cell active; `full(11)` is the large preset.
    pub fn full(size: usize) -> Result<Self, MorphologyError> {
        Self::from_shape(KernelShape::Box { size })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The anchor as `(column, row)`.
    pub fn anchor(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Largest distance from the anchor to any cell, in rows or columns.
    pub fn radius(&self) -> usize {
        let (ax, ay) = self.anchor();
        ax.max(self.width - 1 - ax)
            .max(ay)
            .max(self.height - 1 - ay)
    }

    /// Whether the cell at column `x`, row `y` is active. Out-of-range cells are inactive.
    pub fn is_active(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.data[y * self.width + x]
    }

    /// The cells in row-major order.
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Offsets `(dy, dx)` of the active cells relative to the anchor.
    pub fn active_offsets(&self) -> Vec<(isize, isize)> {
        let (ax, ay) = self.anchor();
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_active(x, y))
            .map(|(x, y)| (y as isize - ay as isize, x as isize - ax as isize))
            .collect()
    }
}
