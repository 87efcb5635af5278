use anyhow::{Result, anyhow};
use cpal::{
    SampleFormat, Stream,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};

use crate::scope::{FeedHandle, sample_to_byte};
use crate::session::SharedSession;

pub struct AudioEngine {
    _stream: Stream,
}

impl AudioEngine {
    /// Opens the default output device and starts pulling samples from
    /// the session. Every rendered sample is mirrored into the scope
    /// feed. A missing output device is an unrecoverable environment
    /// precondition; the caller aborts on it.
    pub fn start(session: SharedSession, feed: FeedHandle) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No default audio output"))?;
        let supported = device.default_output_config()?;
        let config = supported.config();
        let sample_rate = config.sample_rate.0 as f32;
        {
            let mut guard = session.lock().expect("session lock");
            guard.set_sample_rate(sample_rate);
        }
        let stream = match supported.sample_format() {
            SampleFormat::F32 => build_stream_f32(&device, &config, session, feed)?,
            SampleFormat::I16 => build_stream_i16(&device, &config, session, feed)?,
            SampleFormat::U16 => build_stream_u16(&device, &config, session, feed)?,
            _ => build_stream_f32(&device, &config, session, feed)?,
        };
        stream.play()?;
        Ok(Self { _stream: stream })
    }
}

fn build_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    session: SharedSession,
    feed: FeedHandle,
) -> Result<Stream> {
    let channels = config.channels as usize;
    let config = config.clone();
    let stream = device.build_output_stream(
        &config,
        move |output: &mut [f32], _| {
            fill_output_buffer(output, channels, &session, &feed, |sample| sample);
        },
        move |err| eprintln!("audio stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

fn build_stream_i16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    session: SharedSession,
    feed: FeedHandle,
) -> Result<Stream> {
    let channels = config.channels as usize;
    let config = config.clone();
    let stream = device.build_output_stream(
        &config,
        move |output: &mut [i16], _| {
            fill_output_buffer(output, channels, &session, &feed, |sample| {
                (sample * i16::MAX as f32) as i16
            });
        },
        move |err| eprintln!("audio stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

fn build_stream_u16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    session: SharedSession,
    feed: FeedHandle,
) -> Result<Stream> {
    let channels = config.channels as usize;
    let config = config.clone();
    let stream = device.build_output_stream(
        &config,
        move |output: &mut [u16], _| {
            fill_output_buffer(output, channels, &session, &feed, |sample| {
                let scaled = (sample * 0.5 + 0.5).clamp(0.0, 1.0);
                (scaled * u16::MAX as f32) as u16
            });
        },
        move |err| eprintln!("audio stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

fn fill_output_buffer<T, F>(
    output: &mut [T],
    channels: usize,
    session: &SharedSession,
    feed: &FeedHandle,
    mut convert: F,
) where
    F: FnMut(f32) -> T,
    T: Copy,
{
    let mut guard = session.lock().expect("session lock");
    let mut tap = feed.lock().expect("scope feed lock");
    for frame in output.chunks_mut(channels) {
        let sample = guard.next_sample().clamp(-0.98, 0.98);
        tap.push(sample_to_byte(sample));
        let value = convert(sample);
        for channel in frame {
            *channel = value;
        }
    }
}
