//! WebAudio tones and speech synthesis for the audio cues.
//!
//! Playback is best-effort: a missing or blocked audio context only logs.

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType, SpeechSynthesisUtterance, window};

use crate::audio::AudioCues;

/// Short pitched blip; frequency and volume both fall exponentially over `BLIP_LENGTH` seconds.
#[derive(Clone, Copy, Debug)]
struct Blip {
    delay: f64,
    volume: f32,
    pitch: f32,
    wave: OscillatorType,
}

const BLIP_LENGTH: f64 = 0.2;

pub struct WebAudio {
    ctx: Option<AudioContext>,
    speech_text: String,
}

impl WebAudio {
    pub fn new(speech_text: impl Into<String>) -> Self {
        Self {
            ctx: None,
            speech_text: speech_text.into(),
        }
    }

    /// Shared context, created on first use and resumed if the browser suspended it.
    fn context(&mut self) -> Result<&AudioContext, JsValue> {
        if self.ctx.is_none() {
            self.ctx = Some(AudioContext::new()?);
        }
        let ctx = self.ctx.as_ref().ok_or_else(|| JsValue::from_str("no audio context"))?;
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume()?;
        }
        Ok(ctx)
    }

    fn play(&mut self, blips: &[Blip]) {
        if let Err(e) = self.try_play(blips) {
            log::warn!("audio playback failed: {e:?}");
        }
    }

    fn try_play(&mut self, blips: &[Blip]) -> Result<(), JsValue> {
        let ctx = self.context()?;
        let t0 = ctx.current_time();
        for blip in blips {
            let start = t0 + blip.delay;
            let end = start + BLIP_LENGTH;
            let osc = ctx.create_oscillator()?;
            let gain = ctx.create_gain()?;
            osc.set_type(blip.wave);
            osc.frequency().set_value_at_time(blip.pitch, start)?;
            osc.frequency().exponential_ramp_to_value_at_time(20.0, end)?;
            gain.gain().set_value_at_time(blip.volume, start)?;
            gain.gain().exponential_ramp_to_value_at_time(0.001, end)?;
            osc.connect_with_audio_node(&gain)?;
            gain.connect_with_audio_node(&ctx.destination())?;
            osc.start_with_when(start)?;
            osc.stop_with_when(end)?;
        }
        Ok(())
    }

    fn speak(&self) -> Result<(), JsValue> {
        let synth = window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .speech_synthesis()?;
        let utterance = SpeechSynthesisUtterance::new_with_text(&self.speech_text)?;
        utterance.set_lang("en-US");
        utterance.set_rate(0.8);
        utterance.set_pitch(1.0);
        utterance.set_volume(1.0);
        // Never queue behind an earlier greeting.
        synth.cancel();
        synth.speak(&utterance);
        Ok(())
    }
}

impl AudioCues for WebAudio {
    fn impact(&mut self, grand: bool) {
        if grand {
            let cascade: Vec<Blip> = (0..5)
                .map(|i| Blip {
                    delay: i as f64 * 0.05,
                    volume: 0.2,
                    pitch: 800.0 + i as f32 * 100.0,
                    wave: OscillatorType::Triangle,
                })
                .collect();
            self.play(&cascade);
        } else {
            self.play(&[
                Blip {
                    delay: 0.0,
                    volume: 0.3,
                    pitch: 1200.0,
                    wave: OscillatorType::Sine,
                },
                Blip {
                    delay: 0.05,
                    volume: 0.1,
                    pitch: 400.0,
                    wave: OscillatorType::Sine,
                },
            ]);
        }
    }

    fn greeting(&mut self) {
        if let Err(e) = self.speak() {
            log::warn!("speech synthesis failed: {e:?}");
        }
    }

    fn level_up(&mut self) {
        // Rising major arpeggio.
        let notes = [523.25_f32, 659.25, 783.99, 1046.5];
        let arpeggio: Vec<Blip> = notes
            .iter()
            .enumerate()
            .map(|(i, pitch)| Blip {
                delay: i as f64 * 0.1,
                volume: 0.15,
                pitch: *pitch,
                wave: OscillatorType::Square,
            })
            .collect();
        self.play(&arpeggio);
    }
}
