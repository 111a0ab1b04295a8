//! PNG encoding.
//!
//! Rendered maps are dominated by the quantised gradient fill, so they
//! usually fit an indexed palette (colour type 3); `encode_auto` tries that
//! first and falls back to RGBA (colour type 6) when marker anti-aliasing
//! pushes the image past 256 unique colours.

use std::collections::HashMap;
use std::io::Write;

use rayon::prelude::*;

use crate::error::{RenderError, Result};

const MAX_PALETTE: usize = 256;

/// Below this many pixels the parallel palette pass costs more than it saves.
const PARALLEL_MIN_PIXELS: usize = 4096;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Encode RGBA pixels, picking indexed output when the palette fits.
pub fn encode_auto(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    debug_assert_eq!(pixels.len(), width * height * 4);
    let num_pixels = pixels.len() / 4;

    let palette = if num_pixels >= PARALLEL_MIN_PIXELS {
        extract_palette_parallel(pixels)
    } else {
        extract_palette(pixels)
    };

    match palette {
        Some((palette, indices)) => {
            tracing::debug!(colors = palette.len(), "encoding indexed PNG");
            encode_indexed(width, height, &palette, &indices)
        }
        None => {
            tracing::debug!("palette overflow, encoding RGBA PNG");
            encode_rgba(pixels, width, height)
        }
    }
}

#[inline]
fn pack(px: &[u8]) -> u32 {
    u32::from_le_bytes([px[0], px[1], px[2], px[3]])
}

fn extract_palette(pixels: &[u8]) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE);
    let mut palette: Vec<[u8; 4]> = Vec::with_capacity(MAX_PALETTE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for px in pixels.chunks_exact(4) {
        let key = pack(px);
        let index = match lookup.get(&key) {
            Some(&i) => i,
            None => {
                if palette.len() >= MAX_PALETTE {
                    return None;
                }
                let i = palette.len() as u8;
                palette.push([px[0], px[1], px[2], px[3]]);
                lookup.insert(key, i);
                i
            }
        };
        indices.push(index);
    }
    Some((palette, indices))
}

/// Two-pass parallel variant: gather unique colours per chunk, merge, then
/// map pixels to indices in parallel.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let pixels_per_chunk = (pixels.len() / 4 / rayon::current_num_threads()).max(256);
    let chunk_bytes = pixels_per_chunk * 4;

    let unique: Vec<u32> = pixels
        .par_chunks(chunk_bytes)
        .flat_map(|chunk| {
            let mut local: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE);
            for px in chunk.chunks_exact(4) {
                local.insert(pack(px), ());
                if local.len() > MAX_PALETTE {
                    break;
                }
            }
            local.into_keys().collect::<Vec<_>>()
        })
        .collect();

    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE);
    let mut palette: Vec<[u8; 4]> = Vec::with_capacity(MAX_PALETTE);
    for key in unique {
        if !lookup.contains_key(&key) {
            if palette.len() >= MAX_PALETTE {
                return None;
            }
            lookup.insert(key, palette.len() as u8);
            palette.push(key.to_le_bytes());
        }
    }

    let mut indices = vec![0u8; pixels.len() / 4];
    indices
        .par_chunks_mut(pixels_per_chunk)
        .zip(pixels.par_chunks(chunk_bytes))
        .for_each(|(out, chunk)| {
            for (i, px) in chunk.chunks_exact(4).enumerate() {
                out[i] = lookup[&pack(px)];
            }
        });

    Some((palette, indices))
}

/// Encode an indexed (colour type 3) PNG.
pub fn encode_indexed(
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    indices: &[u8],
) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let mut plte = Vec::with_capacity(palette.len() * 3);
    for c in palette {
        plte.extend_from_slice(&c[..3]);
    }
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width, height, 1)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode a full-colour RGBA (colour type 6) PNG.
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));
    let idat = deflate_scanlines(pixels, width, height, 4)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn ihdr(width: usize, height: usize, color_type: u8) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&(width as u32).to_be_bytes());
    data[4..8].copy_from_slice(&(height as u32).to_be_bytes());
    data[8] = 8; // bit depth
    data[9] = color_type;
    // compression, filter and interlace methods all zero
    data
}

/// Prefix each scanline with filter type 0 and zlib-compress the result.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>> {
    let row = width * bytes_per_pixel;
    let mut raw = Vec::with_capacity(height * (1 + row));
    for y in 0..height {
        raw.push(0);
        raw.extend_from_slice(&data[y * row..(y + 1) * row]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder
        .write_all(&raw)
        .map_err(|e| RenderError::encode(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| RenderError::encode(e.to_string()))
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}
