//! Client for the hosted voice-cloning service.
//!
//! Two operations are exposed: submitting an audio sample to train a
//! custom voice, and synthesizing speech with a trained voice. Both talk
//! to the provider's regional REST endpoints.

mod client;

pub use client::{VoiceClient, VoiceConfig, VoiceError};
