use crate::dib::{self, RowLayout};
use crate::error::DibError;
use crate::image::NormalizedImage;
use crate::limits::Limits;

/// Decode a DIB payload, optionally under resource limits.
///
/// ```no_run
/// use dibcap::{DecodeRequest, Limits, NormalizedImage};
///
/// let payload: &[u8] = &[]; // header + pixel rows
/// let limits = Limits { max_pixels: Some(8192 * 8192), ..Default::default() };
///
/// // Fresh image sized from the header
/// let image = DecodeRequest::new(payload).with_limits(&limits).decode()?;
///
/// // Or reuse a caller-owned image of known size
/// let mut target = NormalizedImage::new(1920, 1080);
/// DecodeRequest::new(payload).decode_into(&mut target)?;
/// # Ok::<(), dibcap::DibError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode into a newly allocated image with the header's dimensions.
    pub fn decode(self) -> Result<NormalizedImage, DibError> {
        let header = dib::parse_header(self.data)?;
        if header.width <= 0 || header.height == 0 {
            return Err(DibError::InvalidDimensions {
                width: header.width,
                height: header.height,
            });
        }

        if let Some(limits) = self.limits {
            limits.check(&header)?;
        }

        let region = dib::pixel_region(self.data, &header);
        let layout = RowLayout::new(&header, region)?;
        let (width, height) = (header.width as usize, header.abs_height() as usize);
        let mut image =
            NormalizedImage::try_new(width, height).ok_or(DibError::DimensionsTooLarge {
                width: header.width,
                height: header.height,
            })?;
        layout.write(region, &mut image);
        Ok(image)
    }

    /// Decode into `target`, which must already have the header's dimensions.
    ///
    /// Limits are not consulted: nothing is allocated.
    pub fn decode_into(self, target: &mut NormalizedImage) -> Result<(), DibError> {
        let header = dib::parse_header(self.data)?;
        dib::unpack(&header, dib::pixel_region(self.data, &header), target)
    }
}

/// Decode a DIB payload into a new image.
pub fn decode(data: &[u8]) -> Result<NormalizedImage, DibError> {
    DecodeRequest::new(data).decode()
}

/// Decode a DIB payload into an existing image of matching size.
pub fn decode_into(data: &[u8], target: &mut NormalizedImage) -> Result<(), DibError> {
    DecodeRequest::new(data).decode_into(target)
}
