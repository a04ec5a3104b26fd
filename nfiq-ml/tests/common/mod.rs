//! Common test utilities for pipeline tests
//!
//! Provides a synthetic minutiae detector whose output is a pure function of
//! the image bytes, plus helpers for building detections by hand.

#![allow(dead_code)]

use nfiq_core::{
    Detection, DetectorParams, Direction, ImageRef, Minutia, MinutiaType, Minutiae,
    MinutiaeDetector, QualityMap,
};

/// Block size the synthetic detector grades at
pub const BLOCK: u32 = 8;

/// Detector that derives minutiae and block quality from pixel statistics.
///
/// Dark blocks count as ridge flow; the darker, the better the level. Each
/// block darker than mid-gray contributes one minutia whose reliability
/// tracks the block's darkness.
pub struct SyntheticDetector;

impl MinutiaeDetector for SyntheticDetector {
    fn detect(&self, image: &ImageRef<'_>, params: &DetectorParams) -> Result<Detection, i32> {
        let block = if params.block_size == 0 { BLOCK } else { params.block_size };
        let map_w = (image.width / block) as usize;
        let map_h = (image.height / block) as usize;
        if map_w == 0 || map_h == 0 {
            return Err(-3);
        }

        let mut cells = Vec::with_capacity(map_w * map_h);
        let mut minutiae = Minutiae::new();
        for by in 0..map_h {
            for bx in 0..map_w {
                let mut sum = 0u32;
                for y in 0..block as usize {
                    let row = (by * block as usize + y) * image.width as usize;
                    for x in 0..block as usize {
                        sum += image.pixels[row + bx * block as usize + x] as u32;
                    }
                }
                let mean = sum / (block * block);
                let darkness = 255 - mean.min(255);
                let level = (darkness / 52).min(4) as u8;
                cells.push(level);

                if darkness > 128 {
                    let reliability = darkness as f64 / 255.0;
                    let minutia = Minutia::new(
                        bx as u32 * block,
                        by as u32 * block,
                        Direction::new(((bx + by) % 16) as u8).map_err(|_| -4)?,
                        reliability,
                        if (bx + by) % 2 == 0 { MinutiaType::RidgeEnding } else { MinutiaType::Bifurcation },
                        true,
                    )
                    .map_err(|_| -4)?;
                    minutiae.push(minutia);
                }
            }
        }

        Ok(Detection {
            minutiae,
            quality_map: QualityMap::new(map_w, map_h, cells).map_err(|_| -5)?,
            binarized_width: image.width,
            binarized_height: image.height,
        })
    }
}

/// Detector that always fails with `code`
pub struct FailingDetector(pub i32);

impl MinutiaeDetector for FailingDetector {
    fn detect(&self, _: &ImageRef<'_>, _: &DetectorParams) -> Result<Detection, i32> {
        Err(self.0)
    }
}

/// Detector that returns a prepared detection for every image
pub struct CannedDetector(pub Detection);

impl MinutiaeDetector for CannedDetector {
    fn detect(&self, _: &ImageRef<'_>, _: &DetectorParams) -> Result<Detection, i32> {
        Ok(self.0.clone())
    }
}

/// Square image with a uniform background and a darker centre disc
pub fn fingerprint_like(size: u32, background: u8, ridge: u8) -> Vec<u8> {
    let c = size as i64 / 2;
    let r2 = (size as i64 / 3).pow(2);
    let mut pixels = Vec::with_capacity((size * size) as usize);
    for y in 0..size as i64 {
        for x in 0..size as i64 {
            let d2 = (x - c).pow(2) + (y - c).pow(2);
            pixels.push(if d2 <= r2 { ridge } else { background });
        }
    }
    pixels
}

/// Detection with `count` minutiae at `reliability` over a uniform map
pub fn uniform_detection(count: usize, reliability: f64, map_side: usize, level: u8) -> Detection {
    let minutiae = (0..count)
        .map(|i| {
            Minutia::new(i as u32, i as u32, Direction::default(), reliability, MinutiaType::RidgeEnding, true)
                .unwrap()
        })
        .collect();
    Detection {
        minutiae,
        quality_map: QualityMap::filled(map_side, map_side, level),
        binarized_width: (map_side * 8) as u32,
        binarized_height: (map_side * 8) as u32,
    }
}
