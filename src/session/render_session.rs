use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::assets::loader::{MediaFailures, MediaLoadFailure, MediaLoader, preflight};
use crate::audio::manifest::{AudioManifest, build_audio_manifest};
use crate::compile::fingerprint::{FrameFingerprint, fingerprint_frame};
use crate::compose::compositor::compose;
use crate::compose::layer::CompositionPlan;
use crate::config::compose::ComposeConfig;
use crate::eval::evaluator::{EvaluatedFrame, Evaluator};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{ReelError, ReelResult};
use crate::script::model::SceneScript;

/// Options controlling `RenderSession` range evaluation.
#[derive(Clone, Debug)]
pub struct RenderSessionOpts {
    /// Evaluate ranges in parallel on a dedicated rayon pool.
    pub parallel: bool,
    /// Frames handed to the pool per batch.
    pub chunk_size: usize,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RenderSessionOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Range evaluation statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RangeStats {
    /// Frames in the requested range.
    pub frames_total: u64,
    /// Frames with a fingerprint not seen earlier in the range.
    pub frames_distinct: u64,
}

/// Session over one scene script.
///
/// Allocation and composition happen once in [`RenderSession::new`]; every later call only reads
/// the plan, so a session can be shared across threads.
pub struct RenderSession {
    plan: CompositionPlan,
    failures: MediaFailures,
    opts: RenderSessionOpts,
}

impl RenderSession {
    /// Validate `cfg` and compose `script`.
    pub fn new(
        script: &SceneScript,
        cfg: &ComposeConfig,
        opts: RenderSessionOpts,
    ) -> ReelResult<Self> {
        cfg.validate()?;
        if let Some(0) = opts.threads {
            return Err(ReelError::validation(
                "render session 'threads' must be >= 1 when set",
            ));
        }
        let dups = script.duplicate_scene_numbers();
        if !dups.is_empty() {
            tracing::warn!(?dups, "scene numbers are not unique; joins use the first entry");
        }
        let plan = compose(script, cfg);
        tracing::info!(
            id = %plan.info.id,
            scenes = plan.scenes.len(),
            frames = plan.info.duration_frames,
            "composed scene script"
        );
        Ok(Self {
            plan,
            failures: MediaFailures::default(),
            opts,
        })
    }

    /// The composed layer tree.
    pub fn plan(&self) -> &CompositionPlan {
        &self.plan
    }

    /// Sources marked as failed by [`RenderSession::preflight`].
    pub fn failures(&self) -> &MediaFailures {
        &self.failures
    }

    /// Total frames to render.
    pub fn duration_frames(&self) -> u64 {
        self.plan.info.duration_frames
    }

    /// Audio cues for the whole render.
    pub fn audio_manifest(&self) -> AudioManifest {
        build_audio_manifest(&self.plan)
    }

    /// Probe every distinct media source once.
    ///
    /// Failures are reported through `on_error` and remembered so later evaluations flag the
    /// affected layers `blank`. Never aborts.
    pub fn preflight(
        &mut self,
        loader: &dyn MediaLoader,
        on_error: &mut dyn FnMut(&MediaLoadFailure),
    ) -> &MediaFailures {
        self.failures = preflight(self.plan.sources(), loader, on_error);
        &self.failures
    }

    /// Evaluate one frame inside the composition.
    pub fn eval_frame(&self, frame: FrameIndex) -> ReelResult<EvaluatedFrame> {
        if frame.0 >= self.plan.info.duration_frames {
            return Err(ReelError::validation(
                "eval_frame frame must be within composition duration",
            ));
        }
        Ok(Evaluator::eval_frame(&self.plan, frame, Some(&self.failures)))
    }

    /// Evaluate a frame range, returning frames in strictly increasing order.
    ///
    /// Parallel evaluation yields exactly the frames sequential evaluation would.
    pub fn eval_range(&self, range: FrameRange) -> ReelResult<(Vec<EvaluatedFrame>, RangeStats)> {
        let (frames, fingerprints) = self.eval_range_impl(range)?;
        Ok((frames, range_stats(&fingerprints)))
    }

    /// Fingerprints of a frame range, in frame order.
    pub fn fingerprint_range(
        &self,
        range: FrameRange,
    ) -> ReelResult<(Vec<FrameFingerprint>, RangeStats)> {
        let (_, fingerprints) = self.eval_range_impl(range)?;
        let stats = range_stats(&fingerprints);
        Ok((fingerprints, stats))
    }

    #[tracing::instrument(skip(self))]
    fn eval_range_impl(
        &self,
        range: FrameRange,
    ) -> ReelResult<(Vec<EvaluatedFrame>, Vec<FrameFingerprint>)> {
        self.check_range(range)?;
        let eval = |f: u64| Evaluator::eval_frame(&self.plan, FrameIndex(f), Some(&self.failures));

        let frames = if self.opts.parallel {
            let pool = build_thread_pool(self.opts.threads)?;
            let chunk_size = normalized_chunk_size(self.opts.chunk_size);
            let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
            let mut chunk_start = range.start.0;
            while chunk_start < range.end.0 {
                let chunk_end = (chunk_start + chunk_size).min(range.end.0);
                let mut chunk = pool.install(|| {
                    (chunk_start..chunk_end)
                        .into_par_iter()
                        .map(eval)
                        .collect::<Vec<_>>()
                });
                out.append(&mut chunk);
                chunk_start = chunk_end;
            }
            out
        } else {
            (range.start.0..range.end.0).map(eval).collect::<Vec<_>>()
        };

        let fingerprints = frames.iter().map(fingerprint_frame).collect();
        Ok((frames, fingerprints))
    }

    fn check_range(&self, range: FrameRange) -> ReelResult<()> {
        if range.is_empty() {
            return Err(ReelError::validation("eval_range range must be non-empty"));
        }
        if range.end.0 > self.plan.info.duration_frames {
            return Err(ReelError::validation(
                "eval_range range must be within composition duration",
            ));
        }
        Ok(())
    }
}

fn range_stats(fingerprints: &[FrameFingerprint]) -> RangeStats {
    let distinct: BTreeSet<&FrameFingerprint> = fingerprints.iter().collect();
    RangeStats {
        frames_total: fingerprints.len() as u64,
        frames_distinct: distinct.len() as u64,
    }
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/render_session.rs"]
mod tests;
