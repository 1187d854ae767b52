use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Audio manager for the laser sound effect
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    /// Pre-loaded and buffered laser sound (None if loading failed)
    laser_sound: Option<Buffered<Decoder<BufReader<File>>>>,
    volume: f32,
}

impl AudioManager {
    /// Opens the default output device and pre-loads the laser sound.
    /// A missing or undecodable sound file leaves the manager silent.
    pub fn new(laser_sound: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let (stream, stream_handle) = OutputStream::try_default()?;

        let laser_sound = match File::open(laser_sound) {
            Ok(file) => match Decoder::new(BufReader::new(file)) {
                Ok(source) => Some(source.buffered()),
                Err(err) => {
                    tracing::warn!(%err, path = %laser_sound.display(), "failed to decode laser sound");
                    None
                }
            },
            Err(err) => {
                tracing::warn!(%err, path = %laser_sound.display(), "laser sound not found, playing silently");
                None
            }
        };

        Ok(Self {
            _stream: stream,
            stream_handle,
            laser_sound,
            volume: 0.3,
        })
    }

    pub fn play_laser(&self) {
        // Only play if the sound was successfully loaded
        if let Some(laser_sound) = &self.laser_sound {
            // Playback errors are ignored; a dropped sound is not worth a frame
            if let Ok(sink) = Sink::try_new(&self.stream_handle) {
                sink.set_volume(self.volume);
                // Clone the buffered source (fast - just clones references)
                sink.append(laser_sound.clone());
                sink.detach();
            }
        }
    }
}
