use log::debug;

use gaussblur_plane::{PlaneRef, PlaneRefMut};

use crate::blur::gaussian_blur;
use crate::error::FilterError;

/// Sample representation of a video format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    /// Unsigned integer samples.
    Integer,
    /// Floating point samples.
    Float,
}

/// The slice of the host's per-clip format the filter validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFormat {
    /// How samples are represented.
    pub sample_type: SampleType,
    /// Bits per sample.
    pub bits_per_sample: u32,
    /// Whether every frame of the clip shares this format.
    pub constant_format: bool,
}

impl VideoFormat {
    /// The only format the blur engine accepts: constant, integer, 16 bit.
    pub fn integer16() -> Self {
        Self {
            sample_type: SampleType::Integer,
            bits_per_sample: 16,
            constant_format: true,
        }
    }
}

impl std::fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:?} {} bit ({} format)",
            self.sample_type,
            self.bits_per_sample,
            if self.constant_format {
                "constant"
            } else {
                "variable"
            }
        )
    }
}

/// A configured blur filter instance.
///
/// All validation happens at construction, once per instance; the per-frame
/// path is error-free for valid buffers. The instance holds no mutable state,
/// so the host may call [`GaussianBlur::process_plane`] concurrently across
/// planes and frames.
///
/// # Examples
///
/// ```
/// use gaussblur_engine::{GaussianBlur, VideoFormat};
/// use gaussblur_plane::{Plane, PlaneSize};
///
/// let filter = GaussianBlur::new(VideoFormat::integer16(), 2).unwrap();
///
/// let size = PlaneSize { width: 8, height: 8 };
/// let src = Plane::from_size_val(size, 4000).unwrap();
/// let mut dst = Plane::from_size_val(size, 0).unwrap();
/// filter.process_plane(&src.view(), &mut dst.view_mut()).unwrap();
///
/// assert_eq!(dst.as_slice(), src.as_slice());
/// ```
#[derive(Debug, Clone)]
pub struct GaussianBlur {
    radius: usize,
}

impl GaussianBlur {
    /// Validate the clip format and radius, creating the filter instance.
    ///
    /// # Arguments
    ///
    /// * `format` - The host-reported clip format.
    /// * `radius` - The blur radius parameter, constant for the instance's lifetime.
    ///
    /// # Errors
    ///
    /// [`FilterError::UnsupportedFormat`] unless the format is constant,
    /// integer and 16 bits per sample; [`FilterError::InvalidRadius`] if
    /// `radius` is less than 1.
    pub fn new(format: VideoFormat, radius: i64) -> Result<Self, FilterError> {
        if !format.constant_format
            || format.sample_type != SampleType::Integer
            || format.bits_per_sample != 16
        {
            return Err(FilterError::UnsupportedFormat(format));
        }

        if radius < 1 {
            return Err(FilterError::InvalidRadius(radius));
        }

        debug!("created gaussian blur instance with radius {radius}");

        Ok(Self {
            radius: radius as usize,
        })
    }

    /// The blur radius, constant for the instance's lifetime.
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Blur one plane of a frame into a distinct destination buffer.
    ///
    /// Planes of the same frame may differ in size (subsampled chroma); each
    /// call carries its own dimensions and strides through the views.
    pub fn process_plane(
        &self,
        src: &PlaneRef<'_>,
        dst: &mut PlaneRefMut<'_>,
    ) -> Result<(), FilterError> {
        gaussian_blur(src, dst, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_constant_16bit_integer() {
        let filter = GaussianBlur::new(VideoFormat::integer16(), 3).unwrap();
        assert_eq!(filter.radius(), 3);
    }

    #[test]
    fn rejects_8bit_input() {
        let format = VideoFormat {
            bits_per_sample: 8,
            ..VideoFormat::integer16()
        };
        assert!(matches!(
            GaussianBlur::new(format, 3),
            Err(FilterError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_float_input() {
        let format = VideoFormat {
            sample_type: SampleType::Float,
            ..VideoFormat::integer16()
        };
        assert!(matches!(
            GaussianBlur::new(format, 3),
            Err(FilterError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_variable_format_input() {
        let format = VideoFormat {
            constant_format: false,
            ..VideoFormat::integer16()
        };
        assert!(matches!(
            GaussianBlur::new(format, 3),
            Err(FilterError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_non_positive_radius() {
        for radius in [0, -1, -100] {
            assert!(matches!(
                GaussianBlur::new(VideoFormat::integer16(), radius),
                Err(FilterError::InvalidRadius(r)) if r == radius
            ));
        }
    }

    #[test]
    fn unsupported_format_message_names_the_requirement() {
        let format = VideoFormat {
            bits_per_sample: 10,
            ..VideoFormat::integer16()
        };
        let err = GaussianBlur::new(format, 1).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("constant format 16-bit integer"));
        assert!(msg.contains("10 bit"));
    }
}
