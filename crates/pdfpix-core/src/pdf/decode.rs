//! Image XObject to pixel conversion.
//!
//! Errors are plain reasons; the caller attaches the page and resource name.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, Stream};
use tracing::trace;

type DecodeResult<T> = std::result::Result<T, String>;

/// Colour space of the sample data.
#[derive(Debug, Clone, PartialEq)]
enum ColorSpace {
    Gray,
    Rgb,
    Cmyk,
    Indexed {
        base: Box<ColorSpace>,
        hival: usize,
        lookup: Vec<u8>,
    },
}

impl ColorSpace {
    fn components(&self) -> usize {
        match self {
            ColorSpace::Gray | ColorSpace::Indexed { .. } => 1,
            ColorSpace::Rgb => 3,
            ColorSpace::Cmyk => 4,
        }
    }
}

/// Decode an image XObject into pixels, with its soft mask as alpha.
pub(crate) fn decode_image(doc: &Document, stream: &Stream) -> DecodeResult<DynamicImage> {
    let image = decode_pixels(doc, stream)?;
    match soft_mask(doc, &stream.dict)? {
        Some(mask) => Ok(apply_alpha(image, mask)),
        None => Ok(image),
    }
}

/// Decode the samples of an image XObject, ignoring any `/SMask`.
fn decode_pixels(doc: &Document, stream: &Stream) -> DecodeResult<DynamicImage> {
    let dict = &stream.dict;
    let width = dimension(doc, dict, b"Width")?;
    let height = dimension(doc, dict, b"Height")?;

    let filters = filter_names(doc, dict);
    let image = match filters.iter().find(|f| is_image_codec(f)) {
        Some(codec) if matches!(codec.as_slice(), b"DCTDecode" | b"DCT") && filters.len() == 1 => {
            trace!("Decoding JPEG image");
            image::load_from_memory_with_format(&stream.content, ImageFormat::Jpeg)
                .map_err(|e| format!("JPEG data: {e}"))?
        }
        Some(codec) => {
            return Err(format!(
                "{} images are not supported",
                String::from_utf8_lossy(codec)
            ));
        }
        None => {
            let data = if filters.is_empty() {
                stream.content.clone()
            } else {
                stream
                    .decompressed_content()
                    .map_err(|e| format!("cannot decompress stream: {e}"))?
            };
            decode_samples(doc, dict, &data, width, height)?
        }
    };

    Ok(image)
}

/// Decode raw (already decompressed) sample data.
fn decode_samples(
    doc: &Document,
    dict: &Dictionary,
    data: &[u8],
    width: u32,
    height: u32,
) -> DecodeResult<DynamicImage> {
    let is_mask = dict
        .get(b"ImageMask")
        .and_then(Object::as_bool)
        .unwrap_or(false);

    let (space, bpc) = if is_mask {
        (ColorSpace::Gray, 1)
    } else {
        let space = match dict.get(b"ColorSpace") {
            Ok(obj) => resolve_color_space(doc, obj, 0)?,
            Err(_) => return Err("missing /ColorSpace".to_string()),
        };
        let bpc = integer(doc, dict, b"BitsPerComponent").unwrap_or(8);
        (space, bpc)
    };
    let bpc = u8::try_from(bpc)
        .ok()
        .filter(|b| matches!(*b, 1 | 2 | 4 | 8 | 16))
        .ok_or_else(|| format!("{bpc} bits per component is not supported"))?;

    trace!(
        "Creating image from raw data: {}x{}, colorspace={:?}, bits={}",
        width, height, space, bpc
    );

    let samples = unpack_samples(data, width, height, space.components(), bpc)?;
    let inverted = space.components() == 1 && decode_inverted(doc, dict);

    match space {
        ColorSpace::Indexed { base, hival, lookup } => {
            let stride = base.components();
            let mut bytes = Vec::with_capacity(samples.len() * stride);
            for &index in &samples {
                let start = (index as usize).min(hival) * stride;
                let entry = lookup
                    .get(start..start + stride)
                    .ok_or("colour lookup table is too short")?;
                bytes.extend_from_slice(entry);
            }
            to_image(&base, width, height, bytes)
        }
        space => {
            let bytes = samples
                .iter()
                .map(|&v| {
                    let v = scale_to_u8(v, bpc);
                    if inverted { 255 - v } else { v }
                })
                .collect();
            to_image(&space, width, height, bytes)
        }
    }
}

/// Split sample data into per-component values.
///
/// Each row starts on a byte boundary. Values keep their original range
/// (`0..2^bpc`).
fn unpack_samples(
    data: &[u8],
    width: u32,
    height: u32,
    components: usize,
    bpc: u8,
) -> DecodeResult<Vec<u16>> {
    let too_large = || "image dimensions are too large".to_string();
    let per_row = (width as usize).checked_mul(components).ok_or_else(too_large)?;
    let row_bytes = per_row
        .checked_mul(bpc as usize)
        .ok_or_else(too_large)?
        .div_ceil(8);
    let needed = row_bytes.checked_mul(height as usize).ok_or_else(too_large)?;

    if data.len() < needed {
        return Err(format!(
            "expected {needed} bytes of sample data, found {}",
            data.len()
        ));
    }

    let mut samples = Vec::with_capacity(per_row.saturating_mul(height as usize));
    for row in data[..needed].chunks_exact(row_bytes) {
        match bpc {
            8 => samples.extend(row.iter().map(|&b| u16::from(b))),
            16 => samples.extend(
                row.chunks_exact(2)
                    .map(|pair| u16::from_be_bytes([pair[0], pair[1]])),
            ),
            _ => {
                let per_byte = 8 / bpc as usize;
                let mask = (1u16 << bpc) - 1;
                for i in 0..per_row {
                    let byte = u16::from(row[i / per_byte]);
                    let shift = 8 - bpc as usize * (i % per_byte + 1);
                    samples.push((byte >> shift) & mask);
                }
            }
        }
    }

    Ok(samples)
}

fn scale_to_u8(value: u16, bpc: u8) -> u8 {
    match bpc {
        8 => value as u8,
        16 => (value >> 8) as u8,
        _ => (u32::from(value) * 255 / ((1u32 << bpc) - 1)) as u8,
    }
}

/// Build an 8-bit image from interleaved components in `space`.
fn to_image(space: &ColorSpace, width: u32, height: u32, bytes: Vec<u8>) -> DecodeResult<DynamicImage> {
    let image = match space {
        ColorSpace::Gray => GrayImage::from_raw(width, height, bytes).map(DynamicImage::ImageLuma8),
        ColorSpace::Rgb => RgbImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgb8),
        ColorSpace::Cmyk => {
            let rgb = bytes.chunks_exact(4).flat_map(cmyk_to_rgb).collect();
            RgbImage::from_raw(width, height, rgb).map(DynamicImage::ImageRgb8)
        }
        ColorSpace::Indexed { .. } => return Err("nested /Indexed colour space".to_string()),
    };
    image.ok_or_else(|| "sample data does not match image size".to_string())
}

fn cmyk_to_rgb(cmyk: &[u8]) -> [u8; 3] {
    let k = 255 - u16::from(cmyk[3]);
    let channel = |c: u8| ((255 - u16::from(c)) * k / 255) as u8;
    [channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2])]
}

/// Resolve a `/ColorSpace` value.
fn resolve_color_space(doc: &Document, obj: &Object, depth: usize) -> DecodeResult<ColorSpace> {
    if depth > 4 {
        return Err("colour space nesting is too deep".to_string());
    }
    let (_, obj) = doc.dereference(obj).map_err(|e| e.to_string())?;

    match obj {
        Object::Name(name) => device_space(name),
        Object::Array(items) => {
            let family = items
                .first()
                .and_then(|o| o.as_name().ok())
                .ok_or("empty colour space array")?;

            match family {
                b"ICCBased" => {
                    let profile = items.get(1).ok_or("ICCBased without a profile")?;
                    let (_, profile) = doc.dereference(profile).map_err(|e| e.to_string())?;
                    let profile = profile.as_stream().map_err(|e| e.to_string())?;
                    match integer(doc, &profile.dict, b"N") {
                        Some(1) => Ok(ColorSpace::Gray),
                        Some(3) => Ok(ColorSpace::Rgb),
                        Some(4) => Ok(ColorSpace::Cmyk),
                        other => Err(format!("ICCBased profile with N={other:?}")),
                    }
                }
                b"Indexed" | b"I" => {
                    let base = items.get(1).ok_or("Indexed without a base space")?;
                    let base = resolve_color_space(doc, base, depth + 1)?;
                    if matches!(base, ColorSpace::Indexed { .. }) {
                        return Err("nested /Indexed colour space".to_string());
                    }
                    let hival = items
                        .get(2)
                        .and_then(|o| doc.dereference(o).ok())
                        .and_then(|(_, o)| o.as_i64().ok())
                        .ok_or("Indexed without hival")?;
                    let lookup = items.get(3).ok_or("Indexed without a lookup table")?;
                    Ok(ColorSpace::Indexed {
                        base: Box::new(base),
                        hival: hival.clamp(0, 255) as usize,
                        lookup: lookup_bytes(doc, lookup)?,
                    })
                }
                other => device_space(other),
            }
        }
        _ => Err("unrecognised /ColorSpace value".to_string()),
    }
}

fn device_space(name: &[u8]) -> DecodeResult<ColorSpace> {
    match name {
        b"DeviceGray" | b"CalGray" | b"G" => Ok(ColorSpace::Gray),
        b"DeviceRGB" | b"CalRGB" | b"RGB" => Ok(ColorSpace::Rgb),
        b"DeviceCMYK" | b"CMYK" => Ok(ColorSpace::Cmyk),
        other => Err(format!(
            "colour space /{} is not supported",
            String::from_utf8_lossy(other)
        )),
    }
}

fn lookup_bytes(doc: &Document, obj: &Object) -> DecodeResult<Vec<u8>> {
    let (_, obj) = doc.dereference(obj).map_err(|e| e.to_string())?;
    match obj {
        Object::String(bytes, _) => Ok(bytes.clone()),
        Object::Stream(stream) if stream.dict.has(b"Filter") => stream
            .decompressed_content()
            .map_err(|e| format!("cannot decompress lookup table: {e}")),
        Object::Stream(stream) => Ok(stream.content.clone()),
        _ => Err("unrecognised lookup table".to_string()),
    }
}

/// Decode the `/SMask` of an image, if any, as a gray alpha channel.
///
/// A mask's own `/SMask` is not followed.
fn soft_mask(doc: &Document, dict: &Dictionary) -> DecodeResult<Option<GrayImage>> {
    let Ok(smask) = dict.get(b"SMask") else {
        return Ok(None);
    };
    let Ok((_, Object::Stream(stream))) = doc.dereference(smask) else {
        return Ok(None);
    };

    let mask = decode_pixels(doc, stream).map_err(|e| format!("soft mask: {e}"))?;
    Ok(Some(mask.to_luma8()))
}

fn apply_alpha(image: DynamicImage, mask: GrayImage) -> DynamicImage {
    let mut rgba = image.to_rgba8();
    let mask = if mask.dimensions() == rgba.dimensions() {
        mask
    } else {
        image::imageops::resize(&mask, rgba.width(), rgba.height(), FilterType::Triangle)
    };

    for (pixel, alpha) in rgba.pixels_mut().zip(mask.pixels()) {
        pixel.0[3] = alpha.0[0];
    }
    DynamicImage::ImageRgba8(rgba)
}

/// Whether a single-component `/Decode` array maps samples in reverse.
fn decode_inverted(doc: &Document, dict: &Dictionary) -> bool {
    let Ok((_, Object::Array(range))) = dict.get(b"Decode").and_then(|d| doc.dereference(d)) else {
        return false;
    };
    match (range.first().and_then(number), range.get(1).and_then(number)) {
        (Some(lo), Some(hi)) => lo > hi,
        _ => false,
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn filter_names(doc: &Document, dict: &Dictionary) -> Vec<Vec<u8>> {
    let Ok((_, filter)) = dict.get(b"Filter").and_then(|f| doc.dereference(f)) else {
        return Vec::new();
    };
    match filter {
        Object::Name(name) => vec![name.clone()],
        Object::Array(items) => items
            .iter()
            .filter_map(|o| o.as_name().ok())
            .map(<[u8]>::to_vec)
            .collect(),
        _ => Vec::new(),
    }
}

/// Filters that produce pixels rather than bytes.
fn is_image_codec(filter: &[u8]) -> bool {
    matches!(
        filter,
        b"DCTDecode" | b"DCT" | b"JPXDecode" | b"CCITTFaxDecode" | b"CCF" | b"JBIG2Decode"
    )
}

fn integer(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<i64> {
    let (_, obj) = dict.get(key).and_then(|o| doc.dereference(o)).ok()?;
    obj.as_i64().ok()
}

fn dimension(doc: &Document, dict: &Dictionary, key: &[u8]) -> DecodeResult<u32> {
    integer(doc, dict, key)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|&v| v > 0)
        .ok_or_else(|| format!("missing or invalid /{}", String::from_utf8_lossy(key)))
}
