//! Core library for the Sort Visualiser application.
//!
//! Sixteen classic sorting algorithms run against a shared bar sequence.
//! Every data movement is reported to a [`StepRenderer`] and followed by a
//! pause from a [`Pacer`], which is what turns a sort into an animation with
//! a tone per step. The [`SortEngine`] picks the algorithm by name, runs it
//! and finishes with a left-to-right confirmation sweep.

pub mod algorithms;
pub mod audio;
pub mod bars;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod step;
pub mod timeline;

pub use algorithms::Algorithm;
pub use audio::{PlaybackSession, RecordingSink, SilentSink, SinkEvent, ToneBuffer, ToneSink, Voice};
pub use bars::{is_sorted, random_bars};
pub use config::{AppConfig, AudioConfig, CanvasConfig, Palette, SortConfig};
pub use engine::{Collaborators, SortEngine, SortReport};
pub use error::{Result, SortVizError};
pub use render::{compose_frame, BarStyle, RecordedFrame, RecordingRenderer, TextRenderer};
pub use step::{CancelToken, Highlight, Pacer, Phase, Step, StepRenderer, Stepper};
pub use timeline::{ThreadPacer, VirtualClock};
