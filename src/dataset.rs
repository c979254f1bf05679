//! MNIST IDX dataset loader
//!
//! Reads the classic IDX image/label file pair into flat f32 matrices: pixel
//! intensities normalized to [0, 1] and labels one-hot encoded over ten
//! classes. The dataset is loaded once and read-only thereafter; format
//! violations surface as typed errors rather than aborts.

use log::info;

use crate::error::{Error, Result};

const IMAGE_MAGIC: u32 = 2051;
const LABEL_MAGIC: u32 = 2049;
const NUM_CLASSES: usize = 10;

/// An in-memory classification dataset.
///
/// `inputs` is a row-major `sample_size x input_size` matrix with values in
/// [0, 1]; `targets` is a `sample_size x output_size` one-hot matrix.
pub struct Dataset {
    pub inputs: Vec<f32>,
    pub targets: Vec<f32>,
    pub sample_size: usize,
    pub input_size: usize,
    pub output_size: usize,
}

impl Dataset {
    /// Load an IDX image/label file pair from disk.
    pub fn from_idx(images_path: &str, labels_path: &str) -> Result<Dataset> {
        let images = std::fs::read(images_path)?;
        let labels = std::fs::read(labels_path)?;
        let dataset = Dataset::from_idx_bytes(&images, &labels)?;
        info!(
            "loaded {} samples of {} features from {}",
            dataset.sample_size, dataset.input_size, images_path
        );
        Ok(dataset)
    }

    /// Parse IDX image and label payloads already held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Dataset`] for wrong magic numbers, disagreeing sample
    /// counts, truncated payloads, or out-of-range label values.
    pub fn from_idx_bytes(images: &[u8], labels: &[u8]) -> Result<Dataset> {
        let mut offset = 0usize;
        let image_magic = read_be_u32(images, &mut offset)?;
        if image_magic != IMAGE_MAGIC {
            return Err(Error::Dataset(format!(
                "bad image magic number: expected {}, got {}",
                IMAGE_MAGIC, image_magic
            )));
        }
        let sample_size = read_be_u32(images, &mut offset)? as usize;
        let rows = read_be_u32(images, &mut offset)? as usize;
        let cols = read_be_u32(images, &mut offset)? as usize;
        let input_size = rows * cols;

        let mut label_offset = 0usize;
        let label_magic = read_be_u32(labels, &mut label_offset)?;
        if label_magic != LABEL_MAGIC {
            return Err(Error::Dataset(format!(
                "bad label magic number: expected {}, got {}",
                LABEL_MAGIC, label_magic
            )));
        }
        let label_count = read_be_u32(labels, &mut label_offset)? as usize;
        if label_count != sample_size {
            return Err(Error::Dataset(format!(
                "image count {} does not match label count {}",
                sample_size, label_count
            )));
        }

        let pixel_count = sample_size * input_size;
        if images.len() < offset + pixel_count {
            return Err(Error::Dataset("image file is truncated".to_string()));
        }
        if labels.len() < label_offset + sample_size {
            return Err(Error::Dataset("label file is truncated".to_string()));
        }

        let inputs: Vec<f32> = images[offset..offset + pixel_count]
            .iter()
            .map(|&pixel| pixel as f32 / 255.0)
            .collect();

        let mut targets = vec![0.0f32; sample_size * NUM_CLASSES];
        for (i, &label) in labels[label_offset..label_offset + sample_size]
            .iter()
            .enumerate()
        {
            let class = label as usize;
            if class >= NUM_CLASSES {
                return Err(Error::Dataset(format!(
                    "label value {} out of range at sample {}",
                    label, i
                )));
            }
            targets[i * NUM_CLASSES + class] = 1.0;
        }

        Ok(Dataset {
            inputs,
            targets,
            sample_size,
            input_size,
            output_size: NUM_CLASSES,
        })
    }
}

fn read_be_u32(data: &[u8], offset: &mut usize) -> Result<u32> {
    if data.len() < *offset + 4 {
        return Err(Error::Dataset("truncated header".to_string()));
    }
    let value = u32::from_be_bytes([
        data[*offset],
        data[*offset + 1],
        data[*offset + 2],
        data[*offset + 3],
    ]);
    *offset += 4;
    Ok(value)
}
