use serde::Serialize;

use crate::assets::resolve::AssetSource;
use crate::eval::evaluator::{EvaluatedAudio, EvaluatedFrame, EvaluatedLayer, LayerContent};
use crate::foundation::core::Rect;
use crate::foundation::math::StableHasher;
use crate::subtitle::highlight::TokenTable;

/// 128-bit digest of an evaluated frame's content.
///
/// The frame index itself is not hashed, so two frames showing identical content share a
/// fingerprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FrameFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint an evaluated frame.
pub fn fingerprint_frame(eval: &EvaluatedFrame) -> FrameFingerprint {
    let mut h = StableHasher::new();

    match eval.scene_number {
        Some(n) => {
            h.write_u8(1);
            h.write_u32(n);
        }
        None => h.write_u8(0),
    }

    h.write_u64(eval.layers.len() as u64);
    for layer in &eval.layers {
        write_layer(&mut h, layer);
    }

    h.write_u64(eval.audio.len() as u64);
    for cue in &eval.audio {
        write_audio(&mut h, cue);
    }

    let d = h.digest128();
    FrameFingerprint {
        hi: (d >> 64) as u64,
        lo: d as u64,
    }
}

fn write_layer(h: &mut StableHasher, layer: &EvaluatedLayer) {
    h.write_u8(layer.slot.index());
    h.write_i32(layer.z);
    match layer.scene_number {
        Some(n) => {
            h.write_u8(1);
            h.write_u32(n);
        }
        None => h.write_u8(0),
    }
    h.write_u64(layer.item as u64);
    h.write_f64(layer.opacity);
    h.write_bool(layer.blank);

    match &layer.content {
        LayerContent::Background {
            source,
            source_frame,
        } => {
            h.write_u8(0);
            write_source(h, source);
            h.write_u64(*source_frame);
        }
        LayerContent::Media {
            source,
            source_frame,
        } => {
            h.write_u8(1);
            write_source(h, source);
            h.write_u64(*source_frame);
        }
        LayerContent::Meme {
            source,
            cell,
            scale,
        } => {
            h.write_u8(2);
            write_source(h, source);
            write_rect(h, *cell);
            h.write_f64(*scale);
        }
        LayerContent::Text { text } => {
            h.write_u8(3);
            h.write_str(text);
        }
        LayerContent::Subtitle {
            token,
            table,
            index,
            start_secs,
            end_secs,
        } => {
            h.write_u8(4);
            h.write_str(token);
            h.write_u8(match table {
                TokenTable::Word => 0,
                TokenTable::Character => 1,
            });
            h.write_u64(*index as u64);
            h.write_f64(*start_secs);
            h.write_f64(*end_secs);
        }
    }
}

fn write_audio(h: &mut StableHasher, cue: &EvaluatedAudio) {
    h.write_u8(cue.slot.index());
    h.write_u32(cue.scene_number);
    h.write_u64(cue.item as u64);
    write_source(h, &cue.source);
    h.write_u64(cue.cue_frame);
    h.write_bool(cue.blank);
}

fn write_source(h: &mut StableHasher, source: &AssetSource) {
    match source {
        AssetSource::Url(s) => {
            h.write_u8(0);
            h.write_str(s);
        }
        AssetSource::Local(s) => {
            h.write_u8(1);
            h.write_str(s);
        }
    }
}

fn write_rect(h: &mut StableHasher, r: Rect) {
    h.write_f64(r.x0);
    h.write_f64(r.y0);
    h.write_f64(r.x1);
    h.write_f64(r.y1);
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
