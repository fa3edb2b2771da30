//! Utilities for creating `rodio` sinks from audio source paths.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::AudioError;

/// Open and decode `src` without touching the output device.
pub(super) fn open_source(src: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
    let file = File::open(src).map_err(|source| AudioError::Open {
        path: src.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: src.to_path_buf(),
        source,
    })
}

/// Track length from the file's tags, for decoders that cannot tell.
pub(super) fn probe_duration(src: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(src).ok()?;
    let d = tagged.properties().duration();
    if d.is_zero() { None } else { Some(d) }
}

/// Create a paused `Sink` for `src` that starts playback at `start_at`.
///
/// Also returns the total length of the track when it can be determined.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    src: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<(Sink, Option<Duration>), AudioError> {
    let source = open_source(src)?;
    let total = source.total_duration().or_else(|| probe_duration(src));

    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is our fallback seeking primitive; even Duration::ZERO is fine.
    sink.append(source.skip_duration(start_at));
    sink.set_volume(volume);
    sink.pause();
    Ok((sink, total))
}
